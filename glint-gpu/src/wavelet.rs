use glam::{IVec2, Vec3};

use crate::{Surface, GLINT_EPSILON};

/// Weights of the 3x3 à-trous kernel, indexed by `|dx| + |dy|`.
pub const WAVELET_KERNEL: [f32; 3] = [1.0 / 4.0, 1.0 / 8.0, 1.0 / 16.0];

pub fn wavelet_kernel(offset: IVec2) -> f32 {
    WAVELET_KERNEL[(offset.x.abs() + offset.y.abs()) as usize]
}

/// Edge-stopping functions; each phi set to zero turns its function off.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EdgeStopping {
    pub depth_phi: f32,
    pub normal_phi: f32,
    pub luma_phi: f32,
    pub roughness_phi: f32,
}

impl EdgeStopping {
    pub fn depth(&self, center: f32, sample: f32) -> f32 {
        if self.depth_phi <= 0.0 {
            return 1.0;
        }

        (-(center - sample).abs() / self.depth_phi).exp()
    }

    pub fn normal(&self, center: Vec3, sample: Vec3) -> f32 {
        if self.normal_phi <= 0.0 {
            return 1.0;
        }

        center.dot(sample).max(0.0).powf(self.normal_phi)
    }

    /// `variance` is the (prefiltered) variance at the center pixel.
    pub fn luma(&self, center: f32, sample: f32, variance: f32) -> f32 {
        if self.luma_phi <= 0.0 {
            return 1.0;
        }

        let sigma = self.luma_phi * variance.max(0.0).sqrt() + GLINT_EPSILON;

        (-(center - sample).abs() / sigma).exp()
    }

    /// Rough centers accept similarly rough neighbors, mirror-like centers
    /// accept nothing.
    pub fn roughness(&self, center: f32, sample: f32) -> f32 {
        if self.roughness_phi <= 0.0 {
            return 1.0;
        }

        center.max(0.0).powf(self.roughness_phi)
            * (-(center - sample).abs() * self.roughness_phi).exp()
    }

    pub fn surface(&self, center: &Surface, sample: &Surface) -> f32 {
        self.depth(center.depth, sample.depth)
            * self.normal(center.normal, sample.normal)
    }
}
