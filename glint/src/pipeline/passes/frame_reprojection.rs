use crate::{gpu, ComputePass, FrameContext, PipelineBuffers, PipelineConfig};

/// Finds where each pixel was in the previous frame and which history taps
/// around that place can be trusted.
#[derive(Debug)]
pub struct FrameReprojectionPass {
    pass: ComputePass,
}

impl FrameReprojectionPass {
    pub fn new(_: &PipelineConfig) -> Self {
        Self {
            pass: ComputePass::new("frame_reprojection"),
        }
    }

    /// `prev_camera` is `None` when there's no history to reproject into
    /// (first frame, after a reset or a reallocation).
    pub fn run(
        &self,
        config: &PipelineConfig,
        ctxt: &FrameContext,
        prev_camera: Option<&gpu::Camera>,
        buffers: &mut PipelineBuffers,
        alternate: bool,
    ) {
        let curr_camera = ctxt.camera().serialize();

        let params = gpu::ReprojectionPassParams {
            depth_distance: config.depth_distance,
            world_distance: config.world_distance,
            normal_similarity: config.normal_similarity,
            has_history: prev_camera.is_some() as u32,
            dilation: config.dilation as u32,
        };

        let prev_camera = prev_camera.copied().unwrap_or(curr_camera);
        let curr_surfaces = ctxt.surfaces();

        let prev_surfaces =
            gpu::SurfaceMap::new(buffers.surfaces.past(alternate).tex());

        let velocities = ctxt.gbuffer().d1().tex();

        self.pass.run(
            buffers.size,
            [&mut buffers.reprojection_map],
            |global_id| {
                [glint_shaders::frame_reproject::main(
                    global_id,
                    &params,
                    &curr_camera,
                    &prev_camera,
                    curr_surfaces,
                    prev_surfaces,
                    velocities,
                )]
            },
        );
    }
}
