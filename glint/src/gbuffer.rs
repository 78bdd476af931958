use glam::UVec2;

use crate::{gpu, Result, Texture};

/// Per-pixel geometry of the current frame, as produced by the renderer:
/// normals, depths, roughnesses and velocities.
#[derive(Clone, Debug)]
pub struct GBuffer {
    d0: Texture,
    d1: Texture,
}

impl GBuffer {
    pub fn new(size: UVec2) -> Result<Self> {
        Ok(Self {
            d0: Texture::new("gbuffer_d0", size)?,
            d1: Texture::new("gbuffer_d1", size)?,
        })
    }

    pub fn size(&self) -> UVec2 {
        self.d0.size()
    }

    pub fn set(&mut self, pos: UVec2, entry: gpu::GBufferEntry) {
        let [d0, d1] = entry.pack();

        self.d0.write(pos, d0);
        self.d1.write(pos, d1);
    }

    pub fn get(&self, pos: UVec2) -> gpu::GBufferEntry {
        gpu::GBufferEntry::unpack([self.d0.read(pos), self.d1.read(pos)])
    }

    /// Sets all pixels to given entry.
    pub fn fill(&mut self, entry: gpu::GBufferEntry) {
        let [d0, d1] = entry.pack();

        self.d0.fill(d0);
        self.d1.fill(d1);
    }

    pub(crate) fn d0(&self) -> &Texture {
        &self.d0
    }

    /// Velocities live in `.xy`.
    pub(crate) fn d1(&self) -> &Texture {
        &self.d1
    }
}

#[cfg(test)]
mod tests {
    use glam::{uvec2, vec2, vec3};

    use super::*;

    #[test]
    fn set_get() {
        let mut target = GBuffer::new(uvec2(4, 3)).unwrap();

        let entry = gpu::GBufferEntry {
            normal: vec3(0.0, 1.0, 0.0),
            depth: 3.5,
            roughness: 0.2,
            velocity: vec2(0.01, 0.0),
        };

        target.set(uvec2(3, 2), entry);

        assert_eq!(entry, target.get(uvec2(3, 2)));
        assert_eq!(gpu::GBufferEntry::default(), target.get(uvec2(0, 0)));
        assert_eq!(uvec2(4, 3), target.size());

        target.fill(entry);

        assert_eq!(entry, target.get(uvec2(0, 0)));
    }
}
