use glam::{vec3, Mat4, UVec2, Vec2, Vec3};

use crate::gpu;

/// Perspective camera rendering at given (internal) resolution.
///
/// Projection can be offset by a sub-pixel jitter, see [`crate::Jitter`];
/// the unjittered projection is always kept around, so jitter never
/// accumulates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    view: Mat4,
    projection: Mat4,
    size: UVec2,
    jitter: Vec2,
}

impl Camera {
    pub fn new(view: Mat4, projection: Mat4, size: UVec2) -> Self {
        Self {
            view,
            projection,
            size,
            jitter: Vec2::ZERO,
        }
    }

    /// Creates a camera at `origin`, looking at `target`, with given vertical
    /// field of view (in radians).
    pub fn looking_at(
        origin: Vec3,
        target: Vec3,
        fov_y: f32,
        size: UVec2,
    ) -> Self {
        let aspect_ratio = size.x as f32 / size.y.max(1) as f32;

        Self::new(
            Mat4::look_at_rh(origin, target, Vec3::Y),
            Mat4::perspective_rh(fov_y, aspect_ratio, 0.1, 1000.0),
            size,
        )
    }

    pub fn view(&self) -> Mat4 {
        self.view
    }

    /// Returns projection without jitter.
    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    /// Returns projection offset by the current jitter.
    pub fn jittered_projection(&self) -> Mat4 {
        if self.jitter == Vec2::ZERO {
            return self.projection;
        }

        // Jitter is in pixels, with y pointing down the screen, while clip
        // space's y points up
        let offset = 2.0 * self.jitter / self.size.as_vec2();

        Mat4::from_translation(vec3(offset.x, -offset.y, 0.0)) * self.projection
    }

    pub fn size(&self) -> UVec2 {
        self.size
    }

    pub fn jitter(&self) -> Vec2 {
        self.jitter
    }

    pub fn is_jittered(&self) -> bool {
        self.jitter != Vec2::ZERO
    }

    pub(crate) fn set_jitter(&mut self, jitter: Vec2) {
        self.jitter = jitter;
    }

    pub fn origin(&self) -> Vec3 {
        self.view.inverse().w_axis.truncate()
    }

    pub fn serialize(&self) -> gpu::Camera {
        let projection_view = self.jittered_projection() * self.view;

        gpu::Camera {
            projection_view,
            ndc_to_world: projection_view.inverse(),
            origin: self.origin().extend(1.0),
            screen: self.size.as_vec2().extend(0.0).extend(0.0),
        }
    }

    pub(crate) fn describe(&self) -> String {
        format!(
            "size={}, origin={:.2?}, jitter={:.3?}",
            self.size,
            self.origin(),
            self.jitter
        )
    }
}
