use ndarray::parallel::prelude::*;
use ndarray::{ArrayView1, Axis};
use serde::{Deserialize, Serialize};

use crate::model::{ChannelKind, PixelBuffer, Region, Result};

use super::resolve_region;

pub const BINS: usize = 256;

/// Luminance weights applied to red, green and blue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LumaWeights {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

impl Default for LumaWeights {
    /// ITU-R BT.601.
    fn default() -> Self {
        Self {
            red: 0.299,
            green: 0.587,
            blue: 0.114,
        }
    }
}

impl LumaWeights {
    pub fn luminance(&self, pixel: ArrayView1<'_, u8>) -> u8 {
        if pixel.len() < 3 {
            return pixel[0];
        }
        let value = self.red * f32::from(pixel[0])
            + self.green * f32::from(pixel[1])
            + self.blue * f32::from(pixel[2]);
        value.round().clamp(0.0, 255.0) as u8
    }
}

/// How the extra composite histogram channel is derived from a pixel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CompositePolicy {
    Luminance {
        #[serde(default)]
        weights: LumaWeights,
    },
    /// Luminance scaled by `alpha / 255`; opaque when the buffer has no alpha.
    AlphaWeighted {
        #[serde(default)]
        weights: LumaWeights,
    },
}

impl CompositePolicy {
    pub fn channel(&self) -> ChannelKind {
        match self {
            Self::Luminance { .. } => ChannelKind::Luminance,
            Self::AlphaWeighted { .. } => ChannelKind::AlphaWeightedLuminance,
        }
    }

    pub fn combine(&self, pixel: ArrayView1<'_, u8>) -> u8 {
        match self {
            Self::Luminance { weights } => weights.luminance(pixel),
            Self::AlphaWeighted { weights } => {
                let luminance = f32::from(weights.luminance(pixel));
                let alpha = if pixel.len() == 4 {
                    f32::from(pixel[3])
                } else {
                    255.0
                };
                (luminance * alpha / 255.0).round() as u8
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HistogramOptions {
    #[serde(default)]
    pub composite: Option<CompositePolicy>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelCounts {
    pub channel: ChannelKind,
    pub counts: Vec<u64>,
}

impl ChannelCounts {
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn count(&self, value: u8) -> u64 {
        self.counts[usize::from(value)]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Histogram {
    pub region: Region,
    pub channels: Vec<ChannelCounts>,
}

impl Histogram {
    pub fn channel(&self, kind: ChannelKind) -> Option<&ChannelCounts> {
        self.channels.iter().find(|counts| counts.channel == kind)
    }
}

pub fn compute_histogram(buffer: &PixelBuffer, region: Option<&Region>) -> Result<Histogram> {
    compute_histogram_with(buffer, region, &HistogramOptions::default())
}

pub fn compute_histogram_with(
    buffer: &PixelBuffer,
    region: Option<&Region>,
    options: &HistogramOptions,
) -> Result<Histogram> {
    let region = resolve_region(buffer, region)?;
    let view = buffer.view(&region)?;
    let channels = buffer.channels();
    let composite = options.composite;
    let lanes = channels + usize::from(composite.is_some());

    let empty = || vec![[0_u64; BINS]; lanes];
    let bins = view
        .axis_iter(Axis(0))
        .into_par_iter()
        .fold(empty, |mut acc, row| {
            for pixel in row.outer_iter() {
                for (channel, value) in pixel.iter().enumerate() {
                    acc[channel][usize::from(*value)] += 1;
                }
                if let Some(policy) = &composite {
                    acc[channels][usize::from(policy.combine(pixel))] += 1;
                }
            }
            acc
        })
        .reduce(empty, |mut left, right| {
            for (lane, other) in left.iter_mut().zip(right) {
                for (count, extra) in lane.iter_mut().zip(other) {
                    *count += extra;
                }
            }
            left
        });

    let kinds = buffer
        .layout()
        .iter()
        .copied()
        .chain(composite.map(|policy| policy.channel()));
    let channels = kinds
        .zip(bins)
        .map(|(channel, counts)| ChannelCounts {
            channel,
            counts: counts.to_vec(),
        })
        .collect();
    Ok(Histogram { region, channels })
}

/// Running sum of [`compute_histogram`]; the last bin equals the region area.
pub fn compute_cumulative_histogram(
    buffer: &PixelBuffer,
    region: Option<&Region>,
) -> Result<Histogram> {
    let mut histogram = compute_histogram(buffer, region)?;
    for lane in &mut histogram.channels {
        let mut running = 0_u64;
        for count in &mut lane.counts {
            running += *count;
            *count = running;
        }
    }
    Ok(histogram)
}
