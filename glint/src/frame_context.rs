use glam::UVec2;
use log::trace;

use crate::{gpu, Camera, ComputePass, Error, GBuffer, Result, Texture};

/// Per-frame state shared by every pipeline that renders given frame.
///
/// The G-buffer gets packed into the surface map exactly once, when the
/// context is created, no matter how many pipelines read it later.
#[derive(Debug)]
pub struct FrameContext<'a> {
    camera: Camera,
    gbuffer: &'a GBuffer,
    surface_map: Texture,
}

impl<'a> FrameContext<'a> {
    pub fn new(camera: Camera, gbuffer: &'a GBuffer) -> Result<Self> {
        if camera.size() != gbuffer.size() {
            return Err(Error::ResolutionMismatch {
                label: "camera".into(),
                expected: gbuffer.size(),
                actual: camera.size(),
            });
        }

        trace!("Preparing frame: {}", camera.describe());

        let size = gbuffer.size();
        let mut surface_map = Texture::new("surface_map", size)?;

        ComputePass::<1>::new("gbuffer_pack").run(
            size,
            [&mut surface_map],
            |global_id| {
                [glint_shaders::gbuffer_pack::main(
                    global_id,
                    gbuffer.d0().tex(),
                    gbuffer.d1().tex(),
                )]
            },
        );

        Ok(Self {
            camera,
            gbuffer,
            surface_map,
        })
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn gbuffer(&self) -> &GBuffer {
        self.gbuffer
    }

    pub fn size(&self) -> UVec2 {
        self.gbuffer.size()
    }

    /// Returns normals, depths and roughnesses, packed as
    /// [`gpu::Surface`]s.
    pub fn surface_map(&self) -> &Texture {
        &self.surface_map
    }

    pub(crate) fn surfaces(&self) -> gpu::SurfaceMap<'_> {
        gpu::SurfaceMap::new(self.surface_map.tex())
    }
}

#[cfg(test)]
mod tests {
    use glam::{uvec2, vec3, Vec2, Vec3};

    use super::*;

    #[test]
    fn surface_map() {
        let size = uvec2(4, 4);
        let mut gbuffer = GBuffer::new(size).unwrap();

        gbuffer.fill(gpu::GBufferEntry {
            normal: Vec3::Z,
            depth: 2.0,
            roughness: 0.5,
            velocity: Vec2::ZERO,
        });

        gbuffer.set(
            uvec2(1, 2),
            gpu::GBufferEntry {
                normal: Vec3::X,
                depth: 0.0,
                roughness: 0.5,
                velocity: Vec2::ZERO,
            },
        );

        let camera = Camera::looking_at(Vec3::Z, Vec3::ZERO, 1.0, size);
        let ctxt = FrameContext::new(camera, &gbuffer).unwrap();
        let surfaces = ctxt.surfaces();

        assert_eq!(2.0, surfaces.get(uvec2(0, 0)).depth);
        assert!(surfaces.get(uvec2(1, 2)).is_sky());
        assert_eq!(size, ctxt.surface_map().size());
        assert_eq!(vec3(0.0, 0.0, 1.0), surfaces.get(uvec2(3, 3)).normal);
    }

    #[test]
    fn camera_size_mismatch() {
        let gbuffer = GBuffer::new(uvec2(4, 4)).unwrap();
        let camera = Camera::looking_at(Vec3::Z, Vec3::ZERO, 1.0, uvec2(8, 8));

        assert!(matches!(
            FrameContext::new(camera, &gbuffer),
            Err(Error::ResolutionMismatch { .. })
        ));
    }
}
