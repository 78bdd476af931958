use glam::{UVec2, Vec4};

use crate::Reprojection;

#[derive(Clone, Copy, Debug)]
pub struct BilinearFilter {
    /// Sample at `f(x=0, y=0)`
    pub s00: Vec4,

    /// Sample at `f(x=1, y=0)`
    pub s10: Vec4,

    /// Sample at `f(x=0, y=1)`
    pub s01: Vec4,

    /// Sample at `f(x=1, y=1)`
    pub s11: Vec4,

    /// Weights for each sample (1.0 for valid taps, 0.0 for rejected ones)
    pub weights: Vec4,
}

impl BilinearFilter {
    /// Reads history at the reprojected position, skipping taps that the
    /// reprojection marked as invalid and renormalizing the rest.
    pub fn reproject(
        reprojection: Reprojection,
        sample: impl Fn(UVec2) -> Vec4,
    ) -> Vec4 {
        if reprojection.is_exact() {
            if reprojection.is_tap_valid(0) {
                sample(reprojection.prev_pos_round())
            } else {
                Default::default()
            }
        } else {
            Self::from_reprojection(reprojection, sample)
                .eval(Reprojection::tap_weights(reprojection.prev_pos()))
        }
    }

    pub fn from_reprojection(
        reprojection: Reprojection,
        sample: impl Fn(UVec2) -> Vec4,
    ) -> Self {
        let mut samples = [Vec4::ZERO; 4];
        let mut weights = [0.0; 4];

        for (tap_idx, tap) in Reprojection::taps(reprojection.prev_pos())
            .into_iter()
            .enumerate()
        {
            if reprojection.is_tap_valid(tap_idx) {
                samples[tap_idx] = sample(tap.as_uvec2());
                weights[tap_idx] = 1.0;
            }
        }

        let [s00, s10, s01, s11] = samples;

        Self {
            s00,
            s10,
            s01,
            s11,
            weights: Vec4::from_array(weights),
        }
    }

    /// Evaluates the filter for given bilinear tap weights.
    pub fn eval(&self, tap_weights: Vec4) -> Vec4 {
        let weights = self.weights * tap_weights;
        let w_sum = weights.dot(Vec4::ONE);

        if w_sum == 0.0 {
            Default::default()
        } else {
            (self.s00 * weights.x
                + self.s10 * weights.y
                + self.s01 * weights.z
                + self.s11 * weights.w)
                / w_sum
        }
    }

    pub fn min(&self) -> Vec4 {
        self.valid_samples()
            .fold(Vec4::splat(f32::MAX), |acc, sample| acc.min(sample))
    }

    pub fn max(&self) -> Vec4 {
        self.valid_samples()
            .fold(Vec4::splat(f32::MIN), |acc, sample| acc.max(sample))
    }

    fn valid_samples(&self) -> impl Iterator<Item = Vec4> + '_ {
        [self.s00, self.s10, self.s01, self.s11]
            .into_iter()
            .zip(self.weights.to_array())
            .filter(|(_, weight)| *weight > 0.0)
            .map(|(sample, _)| sample)
    }
}
