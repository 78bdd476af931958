use glam::{IVec2, UVec2, Vec3, Vec4, Vec4Swizzles};

use crate::{Normal, Tex, GLINT_EPSILON};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Surface {
    pub normal: Vec3,
    pub depth: f32,
    pub roughness: f32,
}

impl Surface {
    pub fn serialize(&self) -> Vec4 {
        Normal::encode(self.normal).extend(self.depth).extend(self.roughness)
    }

    pub fn deserialize(d0: Vec4) -> Self {
        Self {
            normal: Normal::decode(d0.xy()),
            depth: d0.z,
            roughness: d0.w,
        }
    }

    /// Returns whether there's no geometry at this pixel.
    pub fn is_sky(&self) -> bool {
        !(self.depth > 0.0 && self.depth.is_finite())
    }

    /// Returns a score `<0.0, 1.0>` that determines the similarity of two given
    /// surfaces.
    pub fn evaluate_similarity_to(&self, other: &Self) -> f32 {
        if self.is_sky() || other.is_sky() {
            return 0.0;
        }

        let normal_score = self.normal.dot(other.normal).max(0.0);

        let depth_score = 1.0
            - ((self.depth - other.depth).abs()
                / self.depth.max(GLINT_EPSILON))
            .min(1.0);

        normal_score * depth_score
    }
}

/// Per-pixel normal, depth and roughness of the primary surface.
#[derive(Clone, Copy, Debug)]
pub struct SurfaceMap<'a> {
    tex: Tex<'a>,
}

impl<'a> SurfaceMap<'a> {
    pub fn new(tex: Tex<'a>) -> Self {
        Self { tex }
    }

    pub fn size(&self) -> UVec2 {
        self.tex.size()
    }

    pub fn contains(&self, pos: IVec2) -> bool {
        self.tex.contains(pos)
    }

    pub fn get(&self, screen_pos: UVec2) -> Surface {
        Surface::deserialize(self.tex.read(screen_pos))
    }
}
