use bytemuck::{Pod, Zeroable};
use glam::{vec2, Mat4, UVec2, Vec2, Vec4, Vec4Swizzles};

use crate::Ray;

/// Perspective camera, as seen by the passes.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, Pod, Zeroable)]
pub struct Camera {
    pub projection_view: Mat4,
    pub ndc_to_world: Mat4,
    pub origin: Vec4,
    pub screen: Vec4,
}

impl Camera {
    /// Casts a ray from camera's origin through given pixel's center.
    pub fn ray(&self, screen_pos: UVec2) -> Ray {
        self.uv_ray((screen_pos.as_vec2() + 0.5) / self.screen.xy())
    }

    /// Casts a ray from camera's origin through given uv-coordinates.
    pub fn uv_ray(&self, uv: Vec2) -> Ray {
        let ndc = uv * 2.0 - Vec2::ONE;
        let ndc = vec2(ndc.x, -ndc.y);

        // Any point with depth in (0, 1) lays on the ray, for both regular and
        // reversed-z projections
        let point = self.ndc_to_world.project_point3(ndc.extend(0.5));
        let origin = self.origin.xyz();

        Ray::new(origin, (point - origin).normalize())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::{uvec2, vec3, Vec3};

    use super::*;

    fn world_to_screen(camera: &Camera, pos: Vec3) -> Vec2 {
        let ndc = camera.projection_view.project_point3(pos);

        (0.5 * vec2(ndc.x, -ndc.y) + 0.5) * camera.screen.xy()
    }

    fn camera() -> Camera {
        let origin = vec3(1.0, 2.0, 3.0);
        let view = Mat4::look_at_rh(origin, Vec3::ZERO, Vec3::Y);
        let projection =
            Mat4::perspective_rh(60f32.to_radians(), 1.0, 0.1, 100.0);

        let projection_view = projection * view;

        Camera {
            projection_view,
            ndc_to_world: projection_view.inverse(),
            origin: origin.extend(1.0),
            screen: vec4_size(32, 32),
        }
    }

    fn vec4_size(w: u32, h: u32) -> Vec4 {
        Vec4::new(w as f32, h as f32, 0.0, 0.0)
    }

    #[test]
    fn ray_round_trip() {
        let camera = camera();

        for pos in [uvec2(0, 0), uvec2(16, 16), uvec2(31, 3), uvec2(7, 29)] {
            let point = camera.ray(pos).at(4.5);
            let actual = world_to_screen(&camera, point);

            assert_relative_eq!(actual.x, pos.x as f32 + 0.5, epsilon = 1e-3);
            assert_relative_eq!(actual.y, pos.y as f32 + 0.5, epsilon = 1e-3);
            assert_relative_eq!(
                point.distance(camera.origin.xyz()),
                4.5,
                epsilon = 1e-4
            );
        }
    }

    #[test]
    fn center_ray_looks_at_target() {
        let camera = camera();

        let dir = camera.uv_ray(vec2(0.5, 0.5)).direction();
        let expected = (Vec3::ZERO - vec3(1.0, 2.0, 3.0)).normalize();

        assert_relative_eq!(dir.x, expected.x, epsilon = 1e-4);
        assert_relative_eq!(dir.y, expected.y, epsilon = 1e-4);
        assert_relative_eq!(dir.z, expected.z, epsilon = 1e-4);
    }
}
