use derivative::Derivative;
use glam::{uvec2, UVec2, Vec4};
use image::{Rgba, Rgba32FImage};
use log::debug;

use crate::{gpu, Error, Result};

/// Two-dimensional buffer of `Vec4` texels, stored row by row.
#[derive(Clone, Derivative)]
#[derivative(Debug)]
pub struct Texture {
    label: String,
    size: UVec2,

    #[derivative(Debug = "ignore")]
    texels: Vec<Vec4>,
}

impl Texture {
    /// Allocates a texture filled with zeros.
    pub fn new(label: impl AsRef<str>, size: UVec2) -> Result<Self> {
        Self::filled(label, size, Vec4::ZERO)
    }

    pub fn filled(
        label: impl AsRef<str>,
        size: UVec2,
        value: Vec4,
    ) -> Result<Self> {
        let label = label.as_ref();

        debug!("Allocating texture `{label}`; size={:?}", size);

        if size.x == 0 || size.y == 0 {
            return Err(Error::InvalidSize { size });
        }

        let len = (size.x as usize)
            .checked_mul(size.y as usize)
            .ok_or(Error::InvalidSize { size })?;

        let mut texels = Vec::new();

        texels.try_reserve_exact(len).map_err(|_| Error::Allocation {
            label: label.to_string(),
            texels: len,
        })?;

        texels.resize(len, value);

        Ok(Self {
            label: label.to_string(),
            size,
            texels,
        })
    }

    /// Creates a texture out of given image.
    pub fn from_image(
        label: impl AsRef<str>,
        image: &Rgba32FImage,
    ) -> Result<Self> {
        let (width, height) = image.dimensions();
        let mut this = Self::new(label, uvec2(width, height))?;

        for (texel, pixel) in this.texels.iter_mut().zip(image.pixels()) {
            *texel = Vec4::from_array(pixel.0);
        }

        Ok(this)
    }

    pub fn to_image(&self) -> Rgba32FImage {
        Rgba32FImage::from_fn(self.size.x, self.size.y, |x, y| {
            Rgba(self.read(uvec2(x, y)).to_array())
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn size(&self) -> UVec2 {
        self.size
    }

    pub fn read(&self, pos: UVec2) -> Vec4 {
        self.texels[self.idx(pos)]
    }

    pub fn write(&mut self, pos: UVec2, value: Vec4) {
        let idx = self.idx(pos);

        self.texels[idx] = value;
    }

    pub fn fill(&mut self, value: Vec4) {
        self.texels.fill(value);
    }

    /// Overwrites this texture with the contents of another one, which must
    /// be of the same size.
    pub fn copy_from(&mut self, other: &Self) {
        assert_eq!(
            self.size, other.size,
            "cannot copy `{}` into `{}`",
            other.label, self.label
        );

        self.texels.copy_from_slice(&other.texels);
    }

    pub fn tex(&self) -> gpu::Tex<'_> {
        gpu::Tex::new(self.size, &self.texels)
    }

    pub(crate) fn texels_mut(&mut self) -> &mut [Vec4] {
        &mut self.texels
    }

    fn idx(&self, pos: UVec2) -> usize {
        assert!(
            pos.x < self.size.x && pos.y < self.size.y,
            "position {pos} is out of `{}` ({})",
            self.label,
            self.size
        );

        (pos.y as usize) * (self.size.x as usize) + (pos.x as usize)
    }
}

#[cfg(test)]
mod tests {
    use glam::vec4;

    use super::*;

    #[test]
    fn read_write() {
        let mut target = Texture::new("test", uvec2(3, 2)).unwrap();

        assert_eq!(Vec4::ZERO, target.read(uvec2(2, 1)));

        target.write(uvec2(2, 1), vec4(1.0, 2.0, 3.0, 4.0));

        assert_eq!(vec4(1.0, 2.0, 3.0, 4.0), target.read(uvec2(2, 1)));
        assert_eq!(vec4(1.0, 2.0, 3.0, 4.0), target.tex().read(uvec2(2, 1)));
        assert_eq!(Vec4::ZERO, target.read(uvec2(1, 1)));
    }

    #[test]
    fn filled() {
        let target = Texture::filled("test", uvec2(2, 2), Vec4::ONE).unwrap();

        assert_eq!(Vec4::ONE, target.read(uvec2(1, 1)));
        assert_eq!("test", target.label());
    }

    #[test]
    fn empty() {
        assert!(matches!(
            Texture::new("test", uvec2(0, 4)),
            Err(Error::InvalidSize { .. })
        ));
    }

    #[test]
    #[should_panic(expected = "out of `test`")]
    fn out_of_bounds() {
        Texture::new("test", uvec2(2, 2)).unwrap().read(uvec2(2, 0));
    }

    #[test]
    fn image_round_trip() {
        let mut target = Texture::new("test", uvec2(3, 2)).unwrap();

        target.write(uvec2(0, 0), vec4(0.5, 1.0, 1.5, 1.0));
        target.write(uvec2(2, 1), vec4(-1.0, 0.0, 8.0, 0.25));

        let image = target.to_image();

        assert_eq!((3, 2), image.dimensions());
        assert_eq!([-1.0, 0.0, 8.0, 0.25], image.get_pixel(2, 1).0);

        let actual = Texture::from_image("test2", &image).unwrap();

        assert_eq!(vec4(0.5, 1.0, 1.5, 1.0), actual.read(uvec2(0, 0)));
        assert_eq!(vec4(-1.0, 0.0, 8.0, 0.25), actual.read(uvec2(2, 1)));
    }
}
