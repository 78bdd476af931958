use glam::UVec2;

use crate::{Result, Texture};

/// Pair of buffers where one is being written in the current frame and the
/// other keeps what was written in the previous one.
///
/// Which one is which is determined by the `alternate` flag that the owner
/// flips after each completed frame.
#[derive(Debug)]
pub struct DoubleBuffered<T> {
    a: T,
    b: T,
}

impl DoubleBuffered<Texture> {
    /// Creates a double-buffered texture.
    ///
    /// See: [`Texture::new()`].
    pub fn new(label: impl AsRef<str>, size: UVec2) -> Result<Self> {
        let label = label.as_ref();

        Ok(Self {
            a: Texture::new(format!("{}_a", label), size)?,
            b: Texture::new(format!("{}_b", label), size)?,
        })
    }
}

impl<T> DoubleBuffered<T> {
    /// Returns the buffer written in the current frame.
    pub fn curr(&self, alternate: bool) -> &T {
        if alternate {
            &self.b
        } else {
            &self.a
        }
    }

    /// Returns the buffer written in the previous frame.
    pub fn past(&self, alternate: bool) -> &T {
        self.curr(!alternate)
    }

    /// Returns the current buffer for writing, together with the previous
    /// one for reading.
    pub fn split(&mut self, alternate: bool) -> (&mut T, &T) {
        if alternate {
            (&mut self.b, &self.a)
        } else {
            (&mut self.a, &self.b)
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::{uvec2, Vec4};

    use super::*;

    #[test]
    fn flipping() {
        let mut target = DoubleBuffered::new("test", uvec2(1, 1)).unwrap();

        let (curr, _) = target.split(false);

        curr.write(uvec2(0, 0), Vec4::ONE);

        assert_eq!(Vec4::ONE, target.curr(false).read(uvec2(0, 0)));
        assert_eq!(Vec4::ONE, target.past(true).read(uvec2(0, 0)));
        assert_eq!(Vec4::ZERO, target.curr(true).read(uvec2(0, 0)));

        let (curr, past) = target.split(true);

        curr.copy_from(past);

        assert_eq!(Vec4::ONE, target.curr(true).read(uvec2(0, 0)));
    }

    #[test]
    fn labels() {
        let target = DoubleBuffered::new("history", uvec2(1, 1)).unwrap();

        assert_eq!("history_a", target.curr(false).label());
        assert_eq!("history_b", target.past(false).label());
    }
}
