mod double_buffered;
mod texture;

pub use self::double_buffered::*;
pub use self::texture::*;
