use glam::UVec2;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("pipeline needs at least one channel")]
    NoChannels,

    #[error("invalid `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("invalid size: {size}")]
    InvalidSize { size: UVec2 },

    #[error("expected {expected} signal(s), got {actual}")]
    ChannelCountMismatch { expected: usize, actual: usize },

    #[error("`{label}` has size {actual}, but pipeline renders at {expected}")]
    ResolutionMismatch {
        label: String,
        expected: UVec2,
        actual: UVec2,
    },

    #[error("couldn't allocate {texels} texels for `{label}`")]
    Allocation { label: String, texels: usize },
}

impl Error {
    pub(crate) fn invalid_config(
        field: &'static str,
        reason: impl ToString,
    ) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.to_string(),
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
