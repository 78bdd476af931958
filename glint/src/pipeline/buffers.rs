use glam::UVec2;
use log::debug;

use crate::{ChannelConfig, DoubleBuffered, PipelineConfig, Result, Texture};

#[derive(Debug)]
pub struct PipelineBuffers {
    pub size: UVec2,

    /// Surfaces of the current and the previous frame; the current ones are
    /// copied from the frame context.
    pub surfaces: DoubleBuffered<Texture>,

    pub reprojection_map: Texture,
    pub channels: Vec<ChannelBuffers>,
}

impl PipelineBuffers {
    pub fn new(config: &PipelineConfig, size: UVec2) -> Result<Self> {
        debug!(
            "Allocating pipeline buffers; size={:?}, channels={}",
            size,
            config.channels.len()
        );

        let channels = config
            .channels
            .iter()
            .map(|channel| ChannelBuffers::new(channel, size))
            .collect::<Result<_>>()?;

        Ok(Self {
            size,
            surfaces: DoubleBuffered::new("surfaces", size)?,
            reprojection_map: Texture::new("reprojection_map", size)?,
            channels,
        })
    }
}

#[derive(Debug)]
pub struct ChannelBuffers {
    /// Accumulated signal.
    pub colors: DoubleBuffered<Texture>,

    /// See: [`crate::gpu::Moments`].
    pub moments: DoubleBuffered<Texture>,

    /// Variance estimated for the current frame, in `.x`.
    pub variance: Texture,

    pub wavelet_colors: [Texture; 2],
    pub wavelet_variances: [Texture; 2],
    pub denoised: Texture,
}

impl ChannelBuffers {
    fn new(config: &ChannelConfig, size: UVec2) -> Result<Self> {
        let label = &config.label;

        Ok(Self {
            colors: DoubleBuffered::new(format!("{label}_colors"), size)?,
            moments: DoubleBuffered::new(format!("{label}_moments"), size)?,
            variance: Texture::new(format!("{label}_variance"), size)?,
            wavelet_colors: [
                Texture::new(format!("{label}_wavelet_colors_a"), size)?,
                Texture::new(format!("{label}_wavelet_colors_b"), size)?,
            ],
            wavelet_variances: [
                Texture::new(format!("{label}_wavelet_variances_a"), size)?,
                Texture::new(format!("{label}_wavelet_variances_b"), size)?,
            ],
            denoised: Texture::new(format!("{label}_denoised"), size)?,
        })
    }
}
