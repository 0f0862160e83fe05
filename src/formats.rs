mod api;
mod codec;
mod error;
mod format;
mod raster;

#[cfg(test)]
mod tests;

pub use api::{read_buffer, read_with, write_buffer, write_with};
pub use codec::{DefaultImageCodec, ImageCodec};
pub use error::{IoError, Result};
pub use format::{ImageFormat, supported_extensions};
