//! Per-pixel entry points of Glint's passes.
//!
//! Each pass is a pure function of the pixel's position, pass parameters and
//! read-only textures, returning texel(s) the host writes into the pass's
//! outputs.

pub mod frame_accumulate;
pub mod frame_reproject;
pub mod frame_variance;
pub mod frame_wavelet;
pub mod gbuffer_pack;

#[cfg(test)]
mod test_utils;
