use ndarray::{Array3, s};

use crate::analytics::{LumaWeights, compute_histogram};
use crate::model::{Document, PixelBuffer, Result};

use super::{DerivedImage, threshold::otsu_threshold};

/// Copies the document's analysis region into a new image with the same name.
pub fn copy_crop(source: &Document) -> Result<DerivedImage> {
    Ok(DerivedImage {
        buffer: source.crop(&source.analysis_region())?,
        display_name: source.display_name().to_string(),
    })
}

pub fn convert_to_grayscale(source: &Document, weights: &LumaWeights) -> Result<DerivedImage> {
    Ok(DerivedImage {
        buffer: grayscale(source.buffer(), weights)?,
        display_name: source.display_name().to_string(),
    })
}

/// Grayscale conversion followed by an Otsu threshold to 0 / 255.
pub fn convert_to_binary(source: &Document, weights: &LumaWeights) -> Result<DerivedImage> {
    let gray = grayscale(source.buffer(), weights)?;
    let histogram = compute_histogram(&gray, None)?;
    let threshold = otsu_threshold(&histogram.channels[0]);
    log::debug!(
        "binarising `{}` at Otsu threshold {threshold}",
        source.display_name()
    );
    let binary = gray.data().mapv(|value| if value > threshold { 255 } else { 0 });
    Ok(DerivedImage {
        buffer: PixelBuffer::new(binary)?,
        display_name: source.display_name().to_string(),
    })
}

fn grayscale(buffer: &PixelBuffer, weights: &LumaWeights) -> Result<PixelBuffer> {
    let data = buffer.data();
    let (height, width, _) = data.dim();
    let gray = Array3::from_shape_fn((height, width, 1), |(y, x, _)| {
        weights.luminance(data.slice(s![y, x, ..]))
    });
    PixelBuffer::new(gray)
}
