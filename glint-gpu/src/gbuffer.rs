use glam::{vec4, Vec2, Vec3, Vec4, Vec4Swizzles};

use crate::Surface;

/// Everything the pipeline needs to know about a pixel's geometry.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GBufferEntry {
    pub normal: Vec3,
    pub depth: f32,
    pub roughness: f32,

    /// Screen-space UV delta from the previous to the current position.
    pub velocity: Vec2,
}

impl GBufferEntry {
    pub fn unpack([d0, d1]: [Vec4; 2]) -> Self {
        Self {
            normal: d0.xyz(),
            depth: d0.w,
            roughness: d1.z,
            velocity: d1.xy(),
        }
    }

    pub fn pack(self) -> [Vec4; 2] {
        let d0 = self.normal.extend(self.depth);
        let d1 = vec4(self.velocity.x, self.velocity.y, self.roughness, 0.0);

        [d0, d1]
    }

    pub fn surface(&self) -> Surface {
        let normal = self.normal.try_normalize().unwrap_or(Vec3::Z);

        Surface {
            normal,
            depth: self.depth,
            roughness: self.roughness.clamp(0.0, 1.0),
        }
    }
}
