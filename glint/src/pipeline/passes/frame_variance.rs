use crate::{gpu, ComputePass, PipelineBuffers, PipelineConfig};

/// Estimates each channel's variance, temporally where there's enough
/// history and spatially elsewhere.
#[derive(Debug)]
pub struct FrameVariancePass {
    passes: Vec<ComputePass>,
}

impl FrameVariancePass {
    pub fn new(config: &PipelineConfig) -> Self {
        let passes = config
            .channels
            .iter()
            .map(|channel| {
                ComputePass::new(format!("{}_variance", channel.label))
            })
            .collect();

        Self { passes }
    }

    pub fn run(
        &self,
        config: &PipelineConfig,
        buffers: &mut PipelineBuffers,
        alternate: bool,
    ) {
        let size = buffers.size;
        let surfaces =
            gpu::SurfaceMap::new(buffers.surfaces.curr(alternate).tex());

        for ((pass, channel_config), channel) in self
            .passes
            .iter()
            .zip(&config.channels)
            .zip(&mut buffers.channels)
        {
            let params = gpu::VariancePassParams {
                variance_floor: channel_config.variance_floor,
                depth_phi: config.depth_phi,
                normal_phi: config.normal_phi,
                luma_phi: config.luma_phi,
            };

            let colors = channel.colors.curr(alternate).tex();
            let moments = channel.moments.curr(alternate).tex();

            pass.run(size, [&mut channel.variance], |global_id| {
                [glint_shaders::frame_variance::main(
                    global_id, &params, surfaces, colors, moments,
                )]
            });
        }
    }
}
