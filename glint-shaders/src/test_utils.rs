use glint_gpu::prelude::*;

/// Owned texture, for feeding passes in tests.
pub struct TestTex {
    size: UVec2,
    texels: Vec<Vec4>,
}

impl TestTex {
    pub fn new(size: UVec2, f: impl Fn(UVec2) -> Vec4) -> Self {
        let texels = (0..size.y)
            .flat_map(|y| (0..size.x).map(move |x| uvec2(x, y)))
            .map(f)
            .collect();

        Self { size, texels }
    }

    pub fn filled(size: UVec2, value: Vec4) -> Self {
        Self::new(size, |_| value)
    }

    pub fn surfaces(size: UVec2, f: impl Fn(UVec2) -> Surface) -> Self {
        Self::new(size, |pos| f(pos).serialize())
    }

    pub fn tex(&self) -> Tex<'_> {
        Tex::new(self.size, &self.texels)
    }

    pub fn surface_map(&self) -> SurfaceMap<'_> {
        SurfaceMap::new(self.tex())
    }
}

pub fn surface(depth: f32) -> Surface {
    Surface {
        normal: Vec3::Z,
        depth,
        roughness: 0.5,
    }
}

/// Camera looking down the negative z-axis, from `(0, 0, 5)`.
pub fn camera(size: UVec2) -> Camera {
    let origin = vec3(0.0, 0.0, 5.0);
    let view = Mat4::look_at_rh(origin, Vec3::ZERO, Vec3::Y);

    let projection = Mat4::perspective_rh(
        60f32.to_radians(),
        size.x as f32 / size.y as f32,
        0.1,
        100.0,
    );

    let projection_view = projection * view;

    Camera {
        projection_view,
        ndc_to_world: projection_view.inverse(),
        origin: origin.extend(1.0),
        screen: size.as_vec2().extend(0.0).extend(0.0),
    }
}
