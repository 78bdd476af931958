use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, Pod, Zeroable)]
pub struct ReprojectionPassParams {
    /// Maximum allowed difference between the previous and the expected
    /// depth, in percents of the expected depth; zero disables the test.
    pub depth_distance: f32,

    /// Maximum allowed distance between the previous and the current world
    /// position, in percents of the expected depth; zero disables the test.
    pub world_distance: f32,

    /// Minimum cosine between the previous and the current normal.
    pub normal_similarity: f32,

    /// Whether the previous generation holds anything; when zero, every pixel
    /// gets reprojected into nothing.
    pub has_history: u32,

    /// Whether velocity should be taken from the closest surface in the 3x3
    /// neighbourhood, so that edges move together with the foreground.
    pub dilation: u32,
}

impl ReprojectionPassParams {
    pub fn has_history(&self) -> bool {
        self.has_history != 0
    }

    pub fn dilation(&self) -> bool {
        self.dilation != 0
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, Pod, Zeroable)]
pub struct TemporalPassParams {
    /// History weight used in the constant-blend mode.
    pub blend: f32,

    /// Upper bound on the sample count; in the full-accumulation mode this
    /// is what the running average turns into an exponential one past.
    pub max_history: f32,

    pub clamp_intensity: f32,
    pub clamp_radius: u32,
    pub flags: u32,
}

impl TemporalPassParams {
    pub const FLAG_CONSTANT_BLEND: u32 = 1;
    pub const FLAG_LOG_TRANSFORM: u32 = 1 << 1;
    pub const FLAG_NEIGHBORHOOD_CLAMP: u32 = 1 << 2;
    pub const FLAG_CATMULL_ROM: u32 = 1 << 3;
    pub const FLAG_ROUGHNESS_DEPENDENT: u32 = 1 << 4;

    pub fn has(&self, flag: u32) -> bool {
        self.flags & flag == flag
    }

    pub fn constant_blend(&self) -> bool {
        self.has(Self::FLAG_CONSTANT_BLEND)
    }

    pub fn log_transform(&self) -> bool {
        self.has(Self::FLAG_LOG_TRANSFORM)
    }

    pub fn neighborhood_clamp(&self) -> bool {
        self.has(Self::FLAG_NEIGHBORHOOD_CLAMP) && self.clamp_intensity > 0.0
    }

    pub fn catmull_rom(&self) -> bool {
        self.has(Self::FLAG_CATMULL_ROM)
    }

    pub fn roughness_dependent(&self) -> bool {
        self.has(Self::FLAG_ROUGHNESS_DEPENDENT)
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, Pod, Zeroable)]
pub struct VariancePassParams {
    pub variance_floor: f32,
    pub depth_phi: f32,
    pub normal_phi: f32,
    pub luma_phi: f32,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, Pod, Zeroable)]
pub struct WaveletPassParams {
    pub depth_phi: f32,
    pub normal_phi: f32,
    pub luma_phi: f32,
    pub roughness_phi: f32,

    /// Distance between taps, `2^iteration`.
    pub stride: u32,

    pub flags: u32,
    pub seed: u32,
}

impl WaveletPassParams {
    pub const FLAG_ROUGHNESS_DEPENDENT: u32 = 1;
    pub const FLAG_DITHER: u32 = 1 << 1;

    pub fn roughness_dependent(&self) -> bool {
        self.flags & Self::FLAG_ROUGHNESS_DEPENDENT > 0
    }

    pub fn dither(&self) -> bool {
        self.flags & Self::FLAG_DITHER > 0
    }
}
