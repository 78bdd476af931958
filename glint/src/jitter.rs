use derivative::Derivative;
use glam::Vec2;
use log::debug;

use crate::{gpu, Camera};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum JitterPattern {
    /// R2 sequence, based on the plastic number.
    #[default]
    R2,

    /// Halton sequence with bases 2 and 3.
    Halton23,
}

/// Precomputed low-discrepancy sequence of sub-pixel offsets, each in range
/// `<-0.5, 0.5>²`.
#[derive(Clone, Derivative)]
#[derivative(Debug)]
pub struct JitterSequence {
    pattern: JitterPattern,

    #[derivative(Debug = "ignore")]
    points: Vec<Vec2>,
}

impl JitterSequence {
    pub const DEFAULT_LEN: usize = 256;

    pub fn new(pattern: JitterPattern, len: usize) -> Self {
        match pattern {
            JitterPattern::R2 => Self::r2(len),
            JitterPattern::Halton23 => Self::halton23(len),
        }
    }

    pub fn r2(len: usize) -> Self {
        Self::generate(JitterPattern::R2, len, |n| gpu::r2(n) - 0.5)
    }

    pub fn halton23(len: usize) -> Self {
        // Index zero is (0, 0) for every Halton sequence, so it's skipped
        Self::generate(JitterPattern::Halton23, len, |n| {
            Vec2::new(gpu::halton(n + 1, 2), gpu::halton(n + 1, 3)) - 0.5
        })
    }

    fn generate(
        pattern: JitterPattern,
        len: usize,
        point: impl Fn(u32) -> Vec2,
    ) -> Self {
        let len = len.max(1);

        debug!("Generating jitter sequence: {pattern:?} x {len}");

        Self {
            pattern,
            points: (0..len as u32).map(point).collect(),
        }
    }

    pub fn pattern(&self) -> JitterPattern {
        self.pattern
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `idx`-th point, wrapping around the sequence's length.
    pub fn get(&self, idx: u32) -> Vec2 {
        self.points[(idx as usize) % self.points.len()]
    }
}

/// Applies sub-pixel jitter to a camera's projection.
#[derive(Clone, Debug)]
pub struct Jitter {
    sequence: JitterSequence,
    scale: f32,
}

impl Jitter {
    pub fn new(sequence: JitterSequence, scale: f32) -> Self {
        Self { sequence, scale }
    }

    pub fn sequence(&self) -> &JitterSequence {
        &self.sequence
    }

    /// Offsets camera's projection by the jitter for given frame, replacing
    /// any previous jitter; returns the offset, in pixels.
    pub fn jitter(&self, camera: &mut Camera, frame: gpu::Frame) -> Vec2 {
        let offset = self.sequence.get(frame.get()) * self.scale;

        camera.set_jitter(offset);
        offset
    }

    /// Restores the unjittered projection; no-op if the camera isn't
    /// jittered.
    pub fn unjitter(&self, camera: &mut Camera) {
        camera.set_jitter(Vec2::ZERO);
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::{uvec2, vec2, vec3, Vec3};

    use super::*;

    fn camera() -> Camera {
        Camera::looking_at(
            vec3(1.0, 2.0, 3.0),
            Vec3::ZERO,
            1.0,
            uvec2(32, 32),
        )
    }

    #[test]
    fn r2() {
        let target = JitterSequence::r2(JitterSequence::DEFAULT_LEN);

        assert_eq!(256, target.len());
        assert_relative_eq!(
            target.get(0).x,
            0.112_775_68 - 0.5,
            epsilon = 1e-5
        );

        for idx in 0..256 {
            let point = target.get(idx);

            assert!(point.x >= -0.5 && point.x <= 0.5);
            assert!(point.y >= -0.5 && point.y <= 0.5);
        }
    }

    #[test]
    fn halton23() {
        let target = JitterSequence::halton23(4);

        assert_eq!(vec2(0.0, 1.0 / 3.0 - 0.5), target.get(0));
        assert_eq!(vec2(-0.25, 2.0 / 3.0 - 0.5), target.get(1));

        // Wraps around
        assert_eq!(target.get(1), target.get(5));
    }

    #[test]
    fn unjitter_is_idempotent() {
        let jitter = Jitter::new(JitterSequence::r2(16), 1.0);
        let original = camera();
        let mut target = original;

        let offset = jitter.jitter(&mut target, gpu::Frame::new(3));

        assert_eq!(offset, target.jitter());
        assert_ne!(original, target);

        jitter.unjitter(&mut target);

        let once = target;

        jitter.unjitter(&mut target);

        assert_eq!(once, target);
        assert_eq!(original, target);
    }

    #[test]
    fn jitter_doesnt_accumulate() {
        let jitter = Jitter::new(JitterSequence::halton23(8), 0.5);
        let mut target = camera();

        jitter.jitter(&mut target, gpu::Frame::new(1));
        jitter.jitter(&mut target, gpu::Frame::new(1));

        assert_eq!(vec2(-0.125, (2.0 / 3.0 - 0.5) * 0.5), target.jitter());
    }
}
