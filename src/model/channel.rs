use serde::{Deserialize, Serialize};

/// Semantic name of one histogram or profile channel.
///
/// Buffer channels map to `Black` (single channel) or `Red`, `Green`, `Blue`
/// and optionally `Alpha`. The two luminance kinds only appear as composite
/// channels appended by the analytics engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChannelKind {
    Black,
    Red,
    Green,
    Blue,
    Alpha,
    Luminance,
    AlphaWeightedLuminance,
}

const GRAY: [ChannelKind; 1] = [ChannelKind::Black];
const RGB: [ChannelKind; 3] = [ChannelKind::Red, ChannelKind::Green, ChannelKind::Blue];
const RGBA: [ChannelKind; 4] = [
    ChannelKind::Red,
    ChannelKind::Green,
    ChannelKind::Blue,
    ChannelKind::Alpha,
];

pub const SUPPORTED_CHANNEL_COUNTS: [usize; 3] = [1, 3, 4];

pub fn channel_layout(channels: usize) -> Option<&'static [ChannelKind]> {
    match channels {
        1 => Some(&GRAY),
        3 => Some(&RGB),
        4 => Some(&RGBA),
        _ => None,
    }
}

impl ChannelKind {
    pub fn is_composite(self) -> bool {
        matches!(self, Self::Luminance | Self::AlphaWeightedLuminance)
    }
}
