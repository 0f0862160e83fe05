use crate::model::PixelBuffer;

use super::raster::{decode_raster, encode_raster};
use super::{ImageFormat, IoError, Result};

/// Turns file bytes into pixel buffers and back.
pub trait ImageCodec: Send + Sync {
    fn supports(&self, format: ImageFormat) -> bool;
    fn decode(&self, bytes: &[u8], format: ImageFormat) -> Result<PixelBuffer>;
    fn encode(&self, buffer: &PixelBuffer, format: ImageFormat) -> Result<Vec<u8>>;
}

/// PNG, BMP and JPEG through the `image` crate. VFF is recognised but not decoded.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultImageCodec;

impl DefaultImageCodec {
    fn check(&self, format: ImageFormat) -> Result<()> {
        if self.supports(format) {
            Ok(())
        } else {
            Err(IoError::UnsupportedFormat(format.to_string()))
        }
    }
}

impl ImageCodec for DefaultImageCodec {
    fn supports(&self, format: ImageFormat) -> bool {
        format.to_image().is_some()
    }

    fn decode(&self, bytes: &[u8], format: ImageFormat) -> Result<PixelBuffer> {
        self.check(format)?;
        decode_raster(bytes, format)
    }

    fn encode(&self, buffer: &PixelBuffer, format: ImageFormat) -> Result<Vec<u8>> {
        self.check(format)?;
        encode_raster(buffer, format)
    }
}
