mod buffers;
mod passes;

use glam::{UVec2, Vec2};
use log::{debug, info, trace, warn};
use rand::Rng;

pub use self::buffers::*;
pub use self::passes::*;
use crate::{
    gpu, Camera, ConfigDiff, Dither, Error, FrameContext, Jitter,
    JitterSequence, PipelineConfig, Result, Texture,
};

/// Temporal accumulation followed by spatial filtering of one or more noisy
/// signals.
///
/// Pipeline owns all of its history; each frame it gets a [`FrameContext`]
/// describing the frame's surfaces plus one signal per configured channel
/// and produces one denoised texture per channel, at the internal
/// resolution.
#[derive(Debug)]
pub struct Pipeline {
    config: PipelineConfig,
    output_size: UVec2,
    buffers: PipelineBuffers,
    passes: PipelinePasses,
    jitter: Option<Jitter>,

    /// Camera of the previous completed frame; `None` if there's no history
    /// (first frame, after a reset or a reallocation).
    prev_camera: Option<gpu::Camera>,

    alternate: bool,
    frame: gpu::Frame,
}

impl Pipeline {
    pub fn new(config: PipelineConfig, output_size: UVec2) -> Result<Self> {
        config.validate()?;

        let size = Self::internal_size(&config, output_size)?;

        info!(
            "Creating pipeline; channels={}, output_size={}, size={}",
            config.channels.len(),
            output_size,
            size
        );

        Self::warn_about_ignored_fields(&config);

        let buffers = PipelineBuffers::new(&config, size)?;
        let passes = PipelinePasses::new(&config);
        let jitter = Self::build_jitter(&config);

        debug!("Pipeline created");

        Ok(Self {
            config,
            output_size,
            buffers,
            passes,
            jitter,
            prev_camera: None,
            alternate: false,
            frame: gpu::Frame::default(),
        })
    }

    fn internal_size(
        config: &PipelineConfig,
        output_size: UVec2,
    ) -> Result<UVec2> {
        if output_size.x == 0 || output_size.y == 0 {
            return Err(Error::InvalidSize { size: output_size });
        }

        Ok((output_size.as_vec2() * config.resolution_scale)
            .ceil()
            .as_uvec2()
            .max(UVec2::ONE))
    }

    fn build_jitter(config: &PipelineConfig) -> Option<Jitter> {
        config.jitter.map(|pattern| {
            Jitter::new(
                JitterSequence::new(pattern, JitterSequence::DEFAULT_LEN),
                config.jitter_scale,
            )
        })
    }

    fn warn_about_ignored_fields(config: &PipelineConfig) {
        if config.iterations == 0 {
            let dithered = config.channels.iter().any(|c| c.dither);

            if dithered && config.dither != Dither::Disabled {
                warn!("Dithering has no effect without wavelet iterations");
            }
        }

        if config.jitter.is_none() && config.jitter_scale != 1.0 {
            warn!("`jitter_scale` has no effect without `jitter`");
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn output_size(&self) -> UVec2 {
        self.output_size
    }

    /// Returns the internal resolution, at which all of the inputs and
    /// outputs live.
    pub fn size(&self) -> UVec2 {
        self.buffers.size
    }

    pub fn frame(&self) -> gpu::Frame {
        self.frame
    }

    pub fn has_history(&self) -> bool {
        self.prev_camera.is_some()
    }

    /// Denoises given signals, one per channel, all at the internal
    /// resolution.
    ///
    /// History gets swapped only after every pass has completed, so a
    /// failed call leaves the pipeline as it was.
    pub fn render(
        &mut self,
        ctxt: &FrameContext,
        signals: &[&Texture],
    ) -> Result<()> {
        self.validate_inputs(ctxt, signals)?;

        trace!(
            "Rendering frame {}; has_history={}",
            self.frame.get(),
            self.has_history()
        );

        let alternate = self.alternate;
        let seed = self.dither_seed();

        self.buffers
            .surfaces
            .split(alternate)
            .0
            .copy_from(ctxt.surface_map());

        self.passes.frame_reprojection.run(
            &self.config,
            ctxt,
            self.prev_camera.as_ref(),
            &mut self.buffers,
            alternate,
        );

        self.passes.frame_accumulation.run(
            &self.config,
            signals,
            &mut self.buffers,
            alternate,
        );

        self.passes.frame_variance.run(
            &self.config,
            &mut self.buffers,
            alternate,
        );

        self.passes.frame_wavelet.run(
            &self.config,
            &mut self.buffers,
            alternate,
            seed,
        );

        self.alternate = !alternate;
        self.prev_camera = Some(ctxt.camera().serialize());
        self.frame = self.frame.next();

        Ok(())
    }

    fn validate_inputs(
        &self,
        ctxt: &FrameContext,
        signals: &[&Texture],
    ) -> Result<()> {
        if signals.len() != self.config.channels.len() {
            return Err(Error::ChannelCountMismatch {
                expected: self.config.channels.len(),
                actual: signals.len(),
            });
        }

        if ctxt.size() != self.buffers.size {
            return Err(Error::ResolutionMismatch {
                label: "gbuffer".into(),
                expected: self.buffers.size,
                actual: ctxt.size(),
            });
        }

        for signal in signals {
            if signal.size() != self.buffers.size {
                return Err(Error::ResolutionMismatch {
                    label: signal.label().into(),
                    expected: self.buffers.size,
                    actual: signal.size(),
                });
            }
        }

        Ok(())
    }

    fn dither_seed(&self) -> Option<u32> {
        match self.config.dither {
            Dither::Disabled => None,
            Dither::Seeded(seed) => {
                Some(seed ^ self.frame.get().wrapping_mul(0x9e3779b9))
            }
            Dither::Random => Some(rand::thread_rng().gen()),
        }
    }

    /// Returns `i`-th channel's output of the last rendered frame.
    ///
    /// # Panics
    ///
    /// Panics if there's no such channel.
    pub fn denoised(&self, i: usize) -> &Texture {
        &self.buffers.channels[i].denoised
    }

    /// Returns `i`-th channel's temporally accumulated signal of the last
    /// rendered frame, before any spatial filtering.
    ///
    /// # Panics
    ///
    /// Panics if there's no such channel.
    pub fn accumulated(&self, i: usize) -> &Texture {
        self.buffers.channels[i].colors.past(self.alternate)
    }

    /// Returns `i`-th channel's moments of the last rendered frame; see
    /// [`gpu::Moments`].
    ///
    /// # Panics
    ///
    /// Panics if there's no such channel.
    pub fn moments(&self, i: usize) -> &Texture {
        self.buffers.channels[i].moments.past(self.alternate)
    }

    /// Replaces the configuration, rebuilding whatever the change requires.
    ///
    /// On error the pipeline keeps its previous configuration and history.
    pub fn apply_config(
        &mut self,
        config: PipelineConfig,
    ) -> Result<ConfigDiff> {
        config.validate()?;

        let diff = ConfigDiff::between(&self.config, &config);

        if diff.is_empty() {
            return Ok(diff);
        }

        debug!("Applying config: {diff:?}");

        if diff.buffers {
            let size = Self::internal_size(&config, self.output_size)?;

            self.buffers = PipelineBuffers::new(&config, size)?;
            self.reset();
        }

        if diff.passes {
            self.passes = PipelinePasses::new(&config);
        }

        if config.jitter != self.config.jitter
            || config.jitter_scale != self.config.jitter_scale
        {
            self.jitter = Self::build_jitter(&config);
        }

        Self::warn_about_ignored_fields(&config);

        self.config = config;

        Ok(diff)
    }

    /// Changes the output resolution, reallocating buffers and discarding
    /// history; must happen between frames.
    pub fn resize(&mut self, output_size: UVec2) -> Result<()> {
        let size = Self::internal_size(&self.config, output_size)?;

        if output_size == self.output_size {
            return Ok(());
        }

        info!("Resizing pipeline; output_size={output_size}, size={size}");

        self.buffers = PipelineBuffers::new(&self.config, size)?;
        self.output_size = output_size;
        self.reset();

        Ok(())
    }

    /// Discards history, so that the next frame treats every pixel as
    /// observed for the first time.
    pub fn reset(&mut self) {
        debug!("Resetting history");

        self.prev_camera = None;
    }

    /// Jitters camera for the upcoming frame, returning the offset (in
    /// pixels); no-op when jittering is disabled.
    pub fn jitter(&self, camera: &mut Camera) -> Vec2 {
        match &self.jitter {
            Some(jitter) => jitter.jitter(camera, self.frame),
            None => Vec2::ZERO,
        }
    }

    pub fn unjitter(&self, camera: &mut Camera) {
        if let Some(jitter) = &self.jitter {
            jitter.unjitter(camera);
        }
    }
}

impl Drop for Pipeline {
    fn drop(&mut self) {
        info!("Deleting pipeline; size={}", self.buffers.size);
    }
}
