use std::io::Cursor;

use image::{DynamicImage, ImageBuffer, Luma, Rgb, Rgba};

use crate::model::PixelBuffer;

use super::{ImageFormat, IoError, Result};

fn image_format(format: ImageFormat) -> Result<image::ImageFormat> {
    format
        .to_image()
        .ok_or_else(|| IoError::UnsupportedFormat(format.to_string()))
}

/// Gray and gray+alpha become one channel, color keeps 3 or 4.
pub(crate) fn decode_raster(bytes: &[u8], format: ImageFormat) -> Result<PixelBuffer> {
    let image = image::load_from_memory_with_format(bytes, image_format(format)?)?;
    let (width, height) = (image.width() as usize, image.height() as usize);
    let color = image.color();
    let (channels, samples) = if !color.has_color() {
        (1, image.to_luma8().into_raw())
    } else if color.has_alpha() {
        (4, image.to_rgba8().into_raw())
    } else {
        (3, image.to_rgb8().into_raw())
    };
    Ok(PixelBuffer::from_raw(width, height, channels, samples)?)
}

pub(crate) fn encode_raster(buffer: &PixelBuffer, format: ImageFormat) -> Result<Vec<u8>> {
    let target = image_format(format)?;
    let (width, height) = (buffer.width() as u32, buffer.height() as u32);
    let samples = buffer.to_raw();
    let layout_error = || IoError::UnsupportedLayout(format!("{} channels", buffer.channels()));
    let mut image = match buffer.channels() {
        1 => DynamicImage::ImageLuma8(
            ImageBuffer::<Luma<u8>, _>::from_raw(width, height, samples).ok_or_else(layout_error)?,
        ),
        3 => DynamicImage::ImageRgb8(
            ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, samples).ok_or_else(layout_error)?,
        ),
        4 => DynamicImage::ImageRgba8(
            ImageBuffer::<Rgba<u8>, _>::from_raw(width, height, samples).ok_or_else(layout_error)?,
        ),
        _ => return Err(layout_error()),
    };
    if format == ImageFormat::Jpeg && image.color().has_alpha() {
        log::debug!("jpeg cannot store alpha, flattening to rgb");
        image = DynamicImage::ImageRgb8(image.to_rgb8());
    }

    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), target)?;
    Ok(bytes)
}
