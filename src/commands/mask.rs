use ndarray::Zip;
use serde::{Deserialize, Serialize};

use crate::model::{CoreError, Document, PixelBuffer, Result};

use super::DerivedImage;

pub const MASKED_SUFFIX: &str = " - masked";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaskKind {
    /// Each sample is scaled by `mask / max(mask)`.
    #[default]
    Weight,
    /// Samples pass where the mask is non-zero and become 0 elsewhere.
    Boolean,
}

/// Combines `source` with `mask` into a new image named `"<source> - masked"`.
///
/// The mask must have the source's width and height. When the mask has fewer
/// channels than the source, its first channel applies to every channel.
pub fn apply_mask(source: &Document, mask: &PixelBuffer, kind: MaskKind) -> Result<DerivedImage> {
    let buffer = source.buffer();
    if mask.width() != buffer.width() || mask.height() != buffer.height() {
        return Err(CoreError::DimensionMismatch {
            expected_width: buffer.width(),
            expected_height: buffer.height(),
            actual_width: mask.width(),
            actual_height: mask.height(),
        });
    }

    let per_channel = mask.channels() >= buffer.channels();
    let mask_data = mask.data();
    let max = mask_data.iter().copied().max().unwrap_or(0);
    let mut data = buffer.data().to_owned();
    Zip::indexed(&mut data).par_for_each(|(y, x, c), sample| {
        let weight = mask_data[(y, x, if per_channel { c } else { 0 })];
        *sample = match kind {
            MaskKind::Weight if max == 0 => 0,
            MaskKind::Weight => {
                (f32::from(*sample) * f32::from(weight) / f32::from(max)).round() as u8
            }
            MaskKind::Boolean if weight == 0 => 0,
            MaskKind::Boolean => *sample,
        };
    });

    Ok(DerivedImage {
        buffer: PixelBuffer::new(data)?,
        display_name: format!("{}{MASKED_SUFFIX}", source.display_name()),
    })
}
