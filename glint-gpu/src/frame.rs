use bytemuck::{Pod, Zeroable};

/// Index of the frame being rendered, used to decorrelate noise.
#[repr(C)]
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Pod, Zeroable,
)]
pub struct Frame(u32);

impl Frame {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Returns index of the frame after this one, wrapping around.
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}
