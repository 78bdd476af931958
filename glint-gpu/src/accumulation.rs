use glam::{Vec3, Vec4, Vec4Swizzles};

use crate::{lerp, F32Ext, TemporalPassParams, Vec3Ext};

/// Roughness below which history starts getting suppressed for
/// roughness-dependent channels.
const GLOSSY_ROUGHNESS: f32 = 0.025;

/// Describes how much of the current frame's signal goes into the
/// accumulated one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TemporalBlend {
    /// Weight of the current signal, in range `<0.0, 1.0>`; one means that
    /// history gets discarded.
    pub weight: f32,

    /// Number of samples accumulated so far, including the current one.
    pub sample_count: f32,
}

impl TemporalBlend {
    /// Blend for a pixel that has no usable history.
    pub fn first() -> Self {
        Self {
            weight: 1.0,
            sample_count: 1.0,
        }
    }

    pub fn new(
        params: &TemporalPassParams,
        prev_sample_count: f32,
        roughness: f32,
    ) -> Self {
        let sample_count =
            (prev_sample_count + 1.0).min(params.max_history.max(1.0));

        let mut history_weight = if params.constant_blend() {
            params.blend.saturate()
        } else {
            1.0 - 1.0 / sample_count
        };

        if params.roughness_dependent() {
            history_weight *= 1.0 - Self::glossiness(roughness).sqr();
        }

        Self {
            weight: 1.0 - history_weight,
            sample_count,
        }
    }

    /// Returns how mirror-like given surface is, from `0.0` (rough enough to
    /// keep the full history) to `1.0` (perfect mirror).
    pub fn glossiness(roughness: f32) -> f32 {
        (GLOSSY_ROUGHNESS - roughness).max(0.0) / GLOSSY_ROUGHNESS
    }

    /// Blends history with the current signal; color is optionally blended
    /// in the logarithmic space, alpha is always blended linearly.
    pub fn apply(
        &self,
        history: Vec4,
        current: Vec4,
        log_transform: bool,
    ) -> Vec4 {
        let color = if log_transform {
            lerp(
                history.xyz().log_transform(),
                current.xyz().log_transform(),
                self.weight,
            )
            .exp_transform()
        } else {
            lerp(history.xyz(), current.xyz(), self.weight)
        };

        color.extend(lerp(history.w, current.w, self.weight))
    }
}

/// Min-max box of the current frame's signal around a pixel, used to pull
/// stale history towards what's on the screen now.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NeighborhoodClamp {
    min: Vec3,
    max: Vec3,
}

impl NeighborhoodClamp {
    pub fn new(center: Vec4) -> Self {
        Self {
            min: center.xyz(),
            max: center.xyz(),
        }
    }

    pub fn add(&mut self, sample: Vec4) {
        self.min = self.min.min(sample.xyz());
        self.max = self.max.max(sample.xyz());
    }

    /// Moves history's color into the box, by given intensity (zero keeps
    /// the history untouched, one clamps it fully).
    pub fn apply(&self, history: Vec4, intensity: f32) -> Vec4 {
        let clamped = history.xyz().clamp(self.min, self.max);

        lerp(history.xyz(), clamped, intensity).extend(history.w)
    }
}
