use crate::{gpu, ComputePass, PipelineBuffers, PipelineConfig};

/// Runs the edge-avoiding à-trous filter over each channel's accumulated
/// signal, ping-ponging between two sets of textures; the last iteration's
/// output gets copied into the channel's denoised texture.
#[derive(Debug)]
pub struct FrameWaveletPass {
    /// Per channel, per iteration.
    passes: Vec<Vec<ComputePass<2>>>,
}

impl FrameWaveletPass {
    pub fn new(config: &PipelineConfig) -> Self {
        let passes = config
            .channels
            .iter()
            .map(|channel| {
                (0..config.iterations)
                    .map(|nth| {
                        ComputePass::new(format!(
                            "{}_wavelet_{}",
                            channel.label, nth
                        ))
                    })
                    .collect()
            })
            .collect();

        Self { passes }
    }

    /// `seed` is `None` when dithering is disabled.
    pub fn run(
        &self,
        config: &PipelineConfig,
        buffers: &mut PipelineBuffers,
        alternate: bool,
        seed: Option<u32>,
    ) {
        let size = buffers.size;
        let surfaces =
            gpu::SurfaceMap::new(buffers.surfaces.curr(alternate).tex());

        for ((passes, channel_config), channel) in self
            .passes
            .iter()
            .zip(&config.channels)
            .zip(&mut buffers.channels)
        {
            let mut flags = 0;

            if channel_config.roughness_dependent {
                flags |= gpu::WaveletPassParams::FLAG_ROUGHNESS_DEPENDENT;
            }

            if channel_config.dither && seed.is_some() {
                flags |= gpu::WaveletPassParams::FLAG_DITHER;
            }

            let [colors_a, colors_b] = &mut channel.wavelet_colors;
            let [variances_a, variances_b] = &mut channel.wavelet_variances;

            for (nth, pass) in passes.iter().enumerate() {
                let params = gpu::WaveletPassParams {
                    depth_phi: config.depth_phi,
                    normal_phi: config.normal_phi,
                    luma_phi: config.luma_phi,
                    roughness_phi: config.roughness_phi,
                    stride: 1 << nth,
                    flags,
                    seed: seed.unwrap_or_default().wrapping_add(nth as u32),
                };

                let (outputs, (colors, variances)) = if nth == 0 {
                    (
                        [&mut *colors_a, &mut *variances_a],
                        (
                            channel.colors.curr(alternate).tex(),
                            channel.variance.tex(),
                        ),
                    )
                } else if nth % 2 == 1 {
                    (
                        [&mut *colors_b, &mut *variances_b],
                        (colors_a.tex(), variances_a.tex()),
                    )
                } else {
                    (
                        [&mut *colors_a, &mut *variances_a],
                        (colors_b.tex(), variances_b.tex()),
                    )
                };

                pass.run(size, outputs, |global_id| {
                    glint_shaders::frame_wavelet::main(
                        global_id, &params, surfaces, colors, variances,
                    )
                });
            }

            let output = match passes.len() {
                0 => channel.colors.curr(alternate),
                n if n % 2 == 1 => &*colors_a,
                _ => &*colors_b,
            };

            channel.denoised.copy_from(output);
        }
    }
}
