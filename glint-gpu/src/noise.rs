mod low_discrepancy;

use glam::{vec2, UVec2, Vec2};

pub use self::low_discrepancy::*;

/// PCG-based hash, used to dither the wavelet filter.
#[derive(Copy, Clone, Debug)]
pub struct Noise {
    state: u32,
}

impl Noise {
    pub fn new(seed: u32, id: UVec2) -> Self {
        Self {
            state: seed
                ^ 48619u32.wrapping_mul(id.x)
                ^ 95461u32.wrapping_mul(id.y),
        }
    }

    /// Generates a uniform sample in range `<0.0, 1.0>`.
    pub fn sample(&mut self) -> f32 {
        (self.sample_int() as f32) / (u32::MAX as f32)
    }

    /// Generates a uniform sample in range `<0, u32::MAX>`.
    pub fn sample_int(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(747796405)
            .wrapping_add(2891336453);

        let word = ((self.state >> ((self.state >> 28) + 4)) ^ self.state)
            .wrapping_mul(277803737);

        (word >> 22) ^ word
    }

    /// Generates a uniform sample in range `<0.0, 1.0>²`.
    pub fn sample_vec2(&mut self) -> Vec2 {
        vec2(self.sample(), self.sample())
    }
}

#[cfg(test)]
mod tests {
    use glam::uvec2;

    use super::*;

    #[test]
    fn deterministic() {
        let mut a = Noise::new(1234, uvec2(10, 20));
        let mut b = Noise::new(1234, uvec2(10, 20));

        for _ in 0..16 {
            assert_eq!(a.sample_int(), b.sample_int());
        }
    }

    #[test]
    fn range() {
        for y in 0..16 {
            for x in 0..16 {
                let mut noise = Noise::new(u32::MAX, uvec2(x, y));

                for _ in 0..8 {
                    let sample = noise.sample();

                    assert!((0.0..=1.0).contains(&sample));
                }
            }
        }
    }

    #[test]
    fn decorrelated_pixels() {
        let a = Noise::new(0, uvec2(0, 1)).sample_int();
        let b = Noise::new(0, uvec2(1, 0)).sample_int();

        assert_ne!(a, b);
    }
}
