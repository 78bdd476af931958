//! Common structs, algorithms etc. used by Glint's shaders and pipeline.

#![allow(clippy::len_without_is_empty)]
#![allow(clippy::manual_range_contains)]
#![allow(clippy::too_many_arguments)]

mod accumulation;
mod camera;
mod frame;
mod gbuffer;
mod moments;
mod noise;
mod normal;
mod passes;
mod ray;
mod reprojection;
mod surface;
mod utils;
mod wavelet;

pub use self::accumulation::*;
pub use self::camera::*;
pub use self::frame::*;
pub use self::gbuffer::*;
pub use self::moments::*;
pub use self::noise::*;
pub use self::normal::*;
pub use self::passes::*;
pub use self::ray::*;
pub use self::reprojection::*;
pub use self::surface::*;
pub use self::utils::*;
pub use self::wavelet::*;

pub mod prelude {
    pub use glam::*;

    pub use crate::*;
}

/// Floor applied before taking logarithms of a signal and wherever a
/// denominator could otherwise reach zero.
pub const GLINT_EPSILON: f32 = 1e-5;
