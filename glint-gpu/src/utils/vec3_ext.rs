use glam::{vec3, Vec3};

pub trait Vec3Ext
where
    Self: Sized,
{
    /// Returns luminance of this color-vector.
    fn luma(self) -> f32;

    /// Applies `ln(max(x, GLINT_EPSILON))` on each component.
    fn log_transform(self) -> Self;

    /// Inverse of [`Self::log_transform()`].
    fn exp_transform(self) -> Self;
}

impl Vec3Ext for Vec3 {
    fn luma(self) -> f32 {
        self.dot(vec3(0.2126, 0.7152, 0.0722))
    }

    fn log_transform(self) -> Self {
        let val = self.max(Vec3::splat(crate::GLINT_EPSILON));

        vec3(val.x.ln(), val.y.ln(), val.z.ln())
    }

    fn exp_transform(self) -> Self {
        vec3(self.x.exp(), self.y.exp(), self.z.exp())
    }
}
