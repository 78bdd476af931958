use crate::{Error, JitterPattern, Result};

/// Which effect the pipeline denoises; selects channel layout and defaults.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Diffuse and specular lighting, as two separate channels.
    GlobalIllumination,

    /// Specular lighting alone.
    ReflectionsOnly,

    /// Diffuse lighting alone.
    DiffuseOnly,

    /// Final color, resolved temporally with a jittered camera and without
    /// any spatial filtering.
    TemporalAntiAliasing,

    /// Ambient occlusion term.
    AmbientOcclusion,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AccumulationMode {
    /// History weight is constant, see [`PipelineConfig::blend`].
    Constant,

    /// Every sample is weighted equally, up to
    /// [`PipelineConfig::max_history`] samples.
    #[default]
    Full,
}

/// How history gets sampled at the reprojected position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Reconstruction {
    #[default]
    Bilinear,

    /// Sharper than bilinear; falls back to bilinear near disocclusions.
    CatmullRom,
}

/// Source of noise used to dither the wavelet filter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Dither {
    #[default]
    Disabled,

    /// Deterministic noise, derived from given seed and the frame index.
    Seeded(u32),

    /// New random seed for each frame.
    Random,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChannelConfig {
    pub label: String,

    /// Whether history and spatial filtering depend on surface roughness
    /// (specular-like signals).
    pub roughness_dependent: bool,

    pub reconstruction: Reconstruction,
    pub neighborhood_clamp: bool,

    /// Lower bound of the estimated variance.
    pub variance_floor: f32,

    /// Whether the wavelet filter should be dithered for this channel; see
    /// [`PipelineConfig::dither`].
    pub dither: bool,
}

impl ChannelConfig {
    pub fn new(label: impl ToString) -> Self {
        Self {
            label: label.to_string(),
            roughness_dependent: false,
            reconstruction: Reconstruction::Bilinear,
            neighborhood_clamp: false,
            variance_floor: 0.0005,
            dither: false,
        }
    }

    pub fn diffuse() -> Self {
        Self::new("diffuse")
    }

    pub fn specular() -> Self {
        Self {
            roughness_dependent: true,
            reconstruction: Reconstruction::CatmullRom,
            ..Self::new("specular")
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PipelineConfig {
    pub channels: Vec<ChannelConfig>,

    /// Internal resolution, relative to the output one.
    pub resolution_scale: f32,

    // Reprojection
    /// Maximum allowed depth difference, in percents of depth.
    pub depth_distance: f32,

    /// Maximum allowed world-space distance, in percents of depth.
    pub world_distance: f32,

    /// Minimum cosine between the current and the previous normal.
    pub normal_similarity: f32,

    /// Whether each pixel should be reprojected with the velocity of the
    /// closest surface around it, which keeps edges of moving objects from
    /// trailing.
    pub dilation: bool,

    // Temporal accumulation
    pub accumulation: AccumulationMode,

    /// History weight for [`AccumulationMode::Constant`].
    pub blend: f32,

    pub max_history: u32,
    pub log_transform: bool,
    pub clamp_radius: u32,
    pub clamp_intensity: f32,

    // Spatial filtering
    /// Number of à-trous iterations; zero disables spatial filtering.
    pub iterations: u32,

    pub depth_phi: f32,
    pub normal_phi: f32,
    pub luma_phi: f32,
    pub roughness_phi: f32,
    pub dither: Dither,

    // Jittering
    pub jitter: Option<JitterPattern>,
    pub jitter_scale: f32,
}

impl PipelineConfig {
    pub const MAX_ITERATIONS: u32 = 8;
    pub const MAX_CLAMP_RADIUS: u32 = 4;

    pub fn new(mode: Mode) -> Self {
        let base = Self {
            channels: vec![ChannelConfig::diffuse()],
            resolution_scale: 1.0,
            depth_distance: 2.0,
            world_distance: 4.0,
            normal_similarity: 0.8,
            dilation: false,
            accumulation: AccumulationMode::Full,
            blend: 0.9,
            max_history: 32,
            log_transform: false,
            clamp_radius: 1,
            clamp_intensity: 1.0,
            iterations: 1,
            depth_phi: 2.0,
            normal_phi: 50.0,
            luma_phi: 10.0,
            roughness_phi: 1.0,
            dither: Dither::Disabled,
            jitter: None,
            jitter_scale: 1.0,
        };

        match mode {
            Mode::GlobalIllumination => Self {
                channels: vec![
                    ChannelConfig::diffuse(),
                    ChannelConfig::specular(),
                ],
                ..base
            },

            Mode::ReflectionsOnly => Self {
                channels: vec![ChannelConfig::specular()],
                ..base
            },

            Mode::DiffuseOnly => base,

            Mode::TemporalAntiAliasing => Self {
                channels: vec![ChannelConfig {
                    neighborhood_clamp: true,
                    ..ChannelConfig::new("color")
                }],
                accumulation: AccumulationMode::Constant,
                log_transform: true,
                dilation: true,
                iterations: 0,
                jitter: Some(JitterPattern::R2),
                ..base
            },

            Mode::AmbientOcclusion => Self {
                channels: vec![ChannelConfig {
                    variance_floor: 0.05,
                    ..ChannelConfig::new("ao")
                }],
                ..base
            },
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.channels.is_empty() {
            return Err(Error::NoChannels);
        }

        check_range("resolution_scale", self.resolution_scale, 0.0, 4.0)?;

        if self.resolution_scale <= 0.0 {
            return Err(Error::invalid_config(
                "resolution_scale",
                "must be positive",
            ));
        }

        check_range("depth_distance", self.depth_distance, 0.0, f32::MAX)?;
        check_range("world_distance", self.world_distance, 0.0, f32::MAX)?;
        check_range("normal_similarity", self.normal_similarity, -1.0, 1.0)?;
        check_range("blend", self.blend, 0.0, 1.0)?;

        if self.blend >= 1.0 {
            return Err(Error::invalid_config(
                "blend",
                "must be less than 1.0, otherwise history never updates",
            ));
        }

        if self.max_history == 0 {
            return Err(Error::invalid_config(
                "max_history",
                "must be positive",
            ));
        }

        if self.clamp_radius > Self::MAX_CLAMP_RADIUS {
            return Err(Error::invalid_config(
                "clamp_radius",
                format!("must be at most {}", Self::MAX_CLAMP_RADIUS),
            ));
        }

        check_range("clamp_intensity", self.clamp_intensity, 0.0, 1.0)?;

        if self.iterations > Self::MAX_ITERATIONS {
            return Err(Error::invalid_config(
                "iterations",
                format!("must be at most {}", Self::MAX_ITERATIONS),
            ));
        }

        check_range("depth_phi", self.depth_phi, 0.0, f32::MAX)?;
        check_range("normal_phi", self.normal_phi, 0.0, f32::MAX)?;
        check_range("luma_phi", self.luma_phi, 0.0, f32::MAX)?;
        check_range("roughness_phi", self.roughness_phi, 0.0, f32::MAX)?;
        check_range("jitter_scale", self.jitter_scale, 0.0, 1.0)?;

        for channel in &self.channels {
            check_range(
                "variance_floor",
                channel.variance_floor,
                0.0,
                f32::MAX,
            )?;
        }

        Ok(())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new(Mode::GlobalIllumination)
    }
}

fn check_range(
    field: &'static str,
    value: f32,
    min: f32,
    max: f32,
) -> Result<()> {
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(Error::invalid_config(
            field,
            format!("{value} is not within <{min}, {max}>"),
        ))
    }
}

/// Describes what has to be refreshed after the configuration changes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConfigDiff {
    /// Pass parameters changed; cheap, picked up by the next frame.
    pub uniforms: bool,

    /// Passes have to be recreated.
    pub passes: bool,

    /// Buffers have to be reallocated, which discards history.
    pub buffers: bool,
}

impl ConfigDiff {
    pub fn between(old: &PipelineConfig, new: &PipelineConfig) -> Self {
        let buffers = old.channels.len() != new.channels.len()
            || old.resolution_scale != new.resolution_scale;

        let passes = buffers
            || old.iterations != new.iterations
            || old.clamp_radius != new.clamp_radius;

        Self {
            uniforms: passes || old != new,
            passes,
            buffers,
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.uniforms && !self.passes && !self.buffers
    }
}
