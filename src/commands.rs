mod derive;
mod mask;
mod threshold;


use crate::model::PixelBuffer;

pub use derive::{convert_to_binary, convert_to_grayscale, copy_crop};
pub use mask::{MASKED_SUFFIX, MaskKind, apply_mask};

/// New image produced from an open document, not yet registered as a window.
#[derive(Debug)]
pub struct DerivedImage {
    pub buffer: PixelBuffer,
    pub display_name: String,
}
