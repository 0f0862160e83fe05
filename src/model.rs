mod buffer;
mod channel;
mod document;
mod error;
mod region;

#[cfg(test)]
mod tests;

pub use buffer::{BufferId, PixelBuffer};
pub use channel::{ChannelKind, SUPPORTED_CHANNEL_COUNTS, channel_layout};
pub use document::{Document, DocumentId, InteractionMode};
pub use error::{CoreError, Result};
pub use region::{Extent, Region, SelectionRect};
