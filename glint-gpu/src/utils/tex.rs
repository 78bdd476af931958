use glam::{IVec2, UVec2, Vec4};

/// Read-only view into a 2D RGBA32F texture.
///
/// This is what every pass entry point receives for its inputs; outputs are
/// returned by value and written back by the dispatcher, so a pass can never
/// observe its own writes.
#[derive(Clone, Copy, Debug)]
pub struct Tex<'a> {
    size: UVec2,
    texels: &'a [Vec4],
}

impl<'a> Tex<'a> {
    pub fn new(size: UVec2, texels: &'a [Vec4]) -> Self {
        assert_eq!(
            texels.len(),
            (size.x as usize) * (size.y as usize),
            "texel count doesn't match texture size"
        );

        Self { size, texels }
    }

    pub fn size(&self) -> UVec2 {
        self.size
    }

    /// Returns whether given point lays inside the texture.
    pub fn contains(&self, pos: IVec2) -> bool {
        pos.x >= 0
            && pos.y >= 0
            && pos.x < self.size.x as i32
            && pos.y < self.size.y as i32
    }

    pub fn read(&self, pos: UVec2) -> Vec4 {
        self.texels[(pos.y * self.size.x + pos.x) as usize]
    }

    /// Reads texel at given position, clamping it to the texture's edges.
    pub fn read_clamped(&self, pos: IVec2) -> Vec4 {
        let max = self.size.as_ivec2() - IVec2::ONE;

        self.read(pos.clamp(IVec2::ZERO, max).as_uvec2())
    }
}
