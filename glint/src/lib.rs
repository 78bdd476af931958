//! Temporal reprojection and spatiotemporal variance-guided filtering of
//! noisy per-pixel signals.
//!
//! Each frame goes through a fixed sequence of data-parallel passes:
//! reprojection, temporal accumulation, variance estimation and a number
//! of edge-avoiding à-trous iterations; see [`Pipeline`].

mod buffers;
mod camera;
mod compute_pass;
mod config;
mod error;
mod frame_context;
mod gbuffer;
mod jitter;
mod materials;
mod pipeline;
mod utils;

pub use glint_gpu as gpu;

pub use self::buffers::*;
pub use self::camera::*;
pub use self::compute_pass::*;
pub use self::config::*;
pub use self::error::*;
pub use self::frame_context::*;
pub use self::gbuffer::*;
pub use self::jitter::*;
pub use self::materials::*;
pub use self::pipeline::*;
