use glam::{uvec2, UVec2, Vec4};
use log::{debug, trace};
use rayon::prelude::*;

use crate::utils::measure;
use crate::Texture;

/// Data-parallel pass that evaluates a per-pixel entry point over the whole
/// screen, writing its results into `N` outputs.
///
/// Entry points only ever see read-only inputs, so pixels are evaluated in
/// any order (and on any thread); outputs get written after every pixel has
/// been evaluated.
#[derive(Debug)]
pub struct ComputePass<const N: usize = 1> {
    label: String,
}

impl<const N: usize> ComputePass<N> {
    pub fn new(label: impl ToString) -> Self {
        let label = label.to_string();

        debug!("Initializing pass: {label}");

        Self { label }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn run<F>(&self, size: UVec2, outputs: [&mut Texture; N], entry: F)
    where
        F: Fn(UVec2) -> [Vec4; N] + Sync,
    {
        for output in &outputs {
            assert_eq!(
                size,
                output.size(),
                "pass `{}` cannot write into `{}`",
                self.label,
                output.label()
            );
        }

        trace!("Dispatching pass `{}`; size={:?}", self.label, size);

        measure(&self.label, || {
            let texels: Vec<[Vec4; N]> = (0..size.x * size.y)
                .into_par_iter()
                .map(|idx| entry(uvec2(idx % size.x, idx / size.x)))
                .collect();

            for (output_idx, output) in outputs.into_iter().enumerate() {
                output
                    .texels_mut()
                    .par_iter_mut()
                    .zip(&texels)
                    .for_each(|(output, texels)| {
                        *output = texels[output_idx];
                    });
            }
        });
    }
}
