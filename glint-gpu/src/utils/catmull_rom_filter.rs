use glam::{ivec2, Vec4};

use crate::{BilinearFilter, Reprojection, Tex};

/// Bicubic (Catmull-Rom) history reconstruction; sharper than
/// [`BilinearFilter`], which helps with ghosting on fast-moving edges.
pub struct CatmullRomFilter;

impl CatmullRomFilter {
    /// Reads history at the reprojected position.
    ///
    /// Falls back to [`BilinearFilter`] unless all four inner taps are valid,
    /// since the outer ring of the kernel can't be validated separately. The
    /// result is clamped into the inner taps' bounding box, which removes the
    /// kernel's overshoot (and keeps non-negative signals non-negative).
    pub fn reproject(reprojection: Reprojection, tex: Tex) -> Vec4 {
        if reprojection.validity != 0b1111 || reprojection.is_exact() {
            return BilinearFilter::reproject(reprojection, |pos| tex.read(pos));
        }

        let prev_pos = reprojection.prev_pos();
        let origin = prev_pos.floor().as_ivec2();
        let wx = Self::weights(prev_pos.x - prev_pos.x.floor());
        let wy = Self::weights(prev_pos.y - prev_pos.y.floor());

        let mut sum = Vec4::ZERO;
        let mut sum_weights = 0.0;

        for (dy, wy) in wy.into_iter().enumerate() {
            for (dx, wx) in wx.into_iter().enumerate() {
                let pos = origin + ivec2(dx as i32 - 1, dy as i32 - 1);
                let weight = wx * wy;

                sum += tex.read_clamped(pos) * weight;
                sum_weights += weight;
            }
        }

        let bilinear =
            BilinearFilter::from_reprojection(reprojection, |pos| {
                tex.read(pos)
            });

        (sum / sum_weights).clamp(bilinear.min(), bilinear.max())
    }

    /// Returns Catmull-Rom weights for taps at offsets `-1, 0, 1, 2`.
    pub fn weights(t: f32) -> [f32; 4] {
        [
            t * (-0.5 + t * (1.0 - 0.5 * t)),
            1.0 + t * t * (-2.5 + 1.5 * t),
            t * (0.5 + t * (2.0 - 1.5 * t)),
            t * t * (-0.5 + 0.5 * t),
        ]
    }
}
