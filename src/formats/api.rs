use std::fs;
use std::path::Path;

use crate::model::PixelBuffer;

use super::{DefaultImageCodec, ImageCodec, ImageFormat, Result};

pub fn read_with(codec: &dyn ImageCodec, path: impl AsRef<Path>) -> Result<PixelBuffer> {
    let path = path.as_ref();
    let format = ImageFormat::from_path(path)?;
    let bytes = fs::read(path)?;
    let buffer = codec.decode(&bytes, format)?;
    log::debug!(
        "decoded {} as {format} ({}x{}x{})",
        path.display(),
        buffer.width(),
        buffer.height(),
        buffer.channels()
    );
    Ok(buffer)
}

pub fn write_with(
    codec: &dyn ImageCodec,
    path: impl AsRef<Path>,
    buffer: &PixelBuffer,
) -> Result<()> {
    let path = path.as_ref();
    let format = ImageFormat::from_path(path)?;
    let bytes = codec.encode(buffer, format)?;
    fs::write(path, bytes)?;
    log::debug!("wrote {} as {format}", path.display());
    Ok(())
}

pub fn read_buffer(path: impl AsRef<Path>) -> Result<PixelBuffer> {
    read_with(&DefaultImageCodec, path)
}

pub fn write_buffer(path: impl AsRef<Path>, buffer: &PixelBuffer) -> Result<()> {
    write_with(&DefaultImageCodec, path, buffer)
}
