use glam::{vec4, Vec4};

use crate::{lerp, F32Ext, TemporalBlend};

/// Temporal statistics of a channel's luminance.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Moments {
    pub sample_count: f32,

    /// Running mean of luminance.
    pub m1: f32,

    /// Running mean of squared luminance.
    pub m2: f32,
}

impl Moments {
    pub fn first(luma: f32) -> Self {
        Self {
            sample_count: 1.0,
            m1: luma,
            m2: luma.sqr(),
        }
    }

    pub fn accumulate(self, luma: f32, blend: TemporalBlend) -> Self {
        Self {
            sample_count: blend.sample_count,
            m1: lerp(self.m1, luma, blend.weight),
            m2: lerp(self.m2, luma.sqr(), blend.weight),
        }
    }

    pub fn variance(&self) -> f32 {
        (self.m2 - self.m1.sqr()).max(0.0)
    }

    pub fn serialize(&self) -> Vec4 {
        vec4(self.sample_count, self.m1, self.m2, 0.0)
    }

    pub fn deserialize(d0: Vec4) -> Self {
        Self {
            sample_count: d0.x,
            m1: d0.y,
            m2: d0.z,
        }
    }
}
