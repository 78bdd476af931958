use glam::{ivec2, vec2, vec4, IVec2, UVec2, Vec2, Vec4};

use crate::Tex;

/// Where given pixel was located in the previous frame, together with the
/// information about which of the four bilinear taps surrounding that place
/// are safe to read history from.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Reprojection {
    /// Previous position, in texel-space (texel centers lay on integers).
    pub prev_x: f32,
    pub prev_y: f32,

    /// Sum of bilinear weights of the valid taps; zero means that the pixel
    /// has no usable history (disocclusion, off-screen, first frame etc.).
    pub confidence: f32,

    /// Bitmask of valid taps, in order: `p00`, `p10`, `p01`, `p11`.
    ///
    /// See: [`Reprojection::taps()`].
    pub validity: u32,
}

impl Reprojection {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn serialize(&self) -> Vec4 {
        vec4(
            self.prev_x,
            self.prev_y,
            self.confidence,
            f32::from_bits(self.validity),
        )
    }

    pub fn deserialize(d0: Vec4) -> Self {
        Self {
            prev_x: d0.x,
            prev_y: d0.y,
            confidence: d0.z,
            validity: d0.w.to_bits(),
        }
    }

    pub fn is_some(&self) -> bool {
        self.confidence > 0.0
    }

    pub fn is_none(&self) -> bool {
        !self.is_some()
    }

    pub fn prev_pos(&self) -> Vec2 {
        vec2(self.prev_x, self.prev_y)
    }

    pub fn prev_pos_round(&self) -> UVec2 {
        self.prev_pos().round().as_uvec2()
    }

    pub fn prev_pos_fract(&self) -> Vec2 {
        self.prev_pos() - self.prev_pos().floor()
    }

    pub fn is_exact(&self) -> bool {
        self.prev_pos_fract().length_squared() == 0.0
    }

    pub fn is_tap_valid(&self, tap_idx: usize) -> bool {
        self.validity & (1 << tap_idx) > 0
    }

    /// Returns the four texels surrounding given previous position.
    pub fn taps(prev_pos: Vec2) -> [IVec2; 4] {
        let p00 = prev_pos.floor().as_ivec2();

        [p00, p00 + ivec2(1, 0), p00 + ivec2(0, 1), p00 + ivec2(1, 1)]
    }

    /// Returns bilinear weights of [`Self::taps()`] for given previous
    /// position.
    pub fn tap_weights(prev_pos: Vec2) -> Vec4 {
        let uv = prev_pos - prev_pos.floor();

        vec4(
            (1.0 - uv.x) * (1.0 - uv.y),
            uv.x * (1.0 - uv.y),
            (1.0 - uv.x) * uv.y,
            uv.x * uv.y,
        )
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ReprojectionMap<'a> {
    tex: Tex<'a>,
}

impl<'a> ReprojectionMap<'a> {
    pub fn new(tex: Tex<'a>) -> Self {
        Self { tex }
    }

    pub fn get(&self, screen_pos: UVec2) -> Reprojection {
        Reprojection::deserialize(self.tex.read(screen_pos))
    }
}
