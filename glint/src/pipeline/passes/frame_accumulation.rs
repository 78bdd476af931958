use crate::{
    gpu, AccumulationMode, ChannelConfig, ComputePass, PipelineBuffers,
    PipelineConfig, Reconstruction, Texture,
};

/// Blends each channel's signal with its reprojected history, producing the
/// accumulated colors and moments.
#[derive(Debug)]
pub struct FrameAccumulationPass {
    passes: Vec<ComputePass<2>>,
}

impl FrameAccumulationPass {
    pub fn new(config: &PipelineConfig) -> Self {
        let passes = config
            .channels
            .iter()
            .map(|channel| {
                ComputePass::new(format!("{}_accumulation", channel.label))
            })
            .collect();

        Self { passes }
    }

    pub fn run(
        &self,
        config: &PipelineConfig,
        signals: &[&Texture],
        buffers: &mut PipelineBuffers,
        alternate: bool,
    ) {
        let size = buffers.size;
        let surfaces =
            gpu::SurfaceMap::new(buffers.surfaces.curr(alternate).tex());

        let reprojection_map =
            gpu::ReprojectionMap::new(buffers.reprojection_map.tex());

        for (((pass, channel_config), signal), channel) in self
            .passes
            .iter()
            .zip(&config.channels)
            .zip(signals)
            .zip(&mut buffers.channels)
        {
            let params = Self::params(config, channel_config);
            let signal = signal.tex();
            let (colors, prev_colors) = channel.colors.split(alternate);
            let (moments, prev_moments) = channel.moments.split(alternate);
            let prev_colors = prev_colors.tex();
            let prev_moments = prev_moments.tex();

            pass.run(size, [colors, moments], |global_id| {
                glint_shaders::frame_accumulate::main(
                    global_id,
                    &params,
                    surfaces,
                    reprojection_map,
                    signal,
                    prev_colors,
                    prev_moments,
                )
            });
        }
    }

    fn params(
        config: &PipelineConfig,
        channel: &ChannelConfig,
    ) -> gpu::TemporalPassParams {
        let mut flags = 0;

        if config.accumulation == AccumulationMode::Constant {
            flags |= gpu::TemporalPassParams::FLAG_CONSTANT_BLEND;
        }

        if config.log_transform {
            flags |= gpu::TemporalPassParams::FLAG_LOG_TRANSFORM;
        }

        if channel.neighborhood_clamp {
            flags |= gpu::TemporalPassParams::FLAG_NEIGHBORHOOD_CLAMP;
        }

        if channel.reconstruction == Reconstruction::CatmullRom {
            flags |= gpu::TemporalPassParams::FLAG_CATMULL_ROM;
        }

        if channel.roughness_dependent {
            flags |= gpu::TemporalPassParams::FLAG_ROUGHNESS_DEPENDENT;
        }

        gpu::TemporalPassParams {
            blend: config.blend,
            max_history: config.max_history as f32,
            clamp_intensity: config.clamp_intensity,
            clamp_radius: config.clamp_radius,
            flags,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Mode;

    #[test]
    fn params() {
        let config = PipelineConfig::new(Mode::GlobalIllumination);
        let diffuse =
            FrameAccumulationPass::params(&config, &config.channels[0]);
        let specular =
            FrameAccumulationPass::params(&config, &config.channels[1]);

        assert!(!diffuse.constant_blend());
        assert!(!diffuse.catmull_rom());
        assert!(!diffuse.roughness_dependent());
        assert!(specular.catmull_rom());
        assert!(specular.roughness_dependent());
        assert_eq!(32.0, specular.max_history);

        let config = PipelineConfig::new(Mode::TemporalAntiAliasing);
        let color =
            FrameAccumulationPass::params(&config, &config.channels[0]);

        assert!(color.constant_blend());
        assert!(color.log_transform());
        assert!(color.neighborhood_clamp());
        assert_eq!(0.9, color.blend);
    }
}
