use serde::Serialize;

use crate::model::{ChannelKind, PixelBuffer, Region, Result};

use super::compute_histogram;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelSummary {
    pub channel: ChannelKind,
    pub min: u8,
    pub max: u8,
    pub mean: f64,
    pub deviation: f64,
}

/// Min, max, mean and population standard deviation per channel.
pub fn channel_summary(buffer: &PixelBuffer, region: Option<&Region>) -> Result<Vec<ChannelSummary>> {
    let histogram = compute_histogram(buffer, region)?;
    let summaries = histogram
        .channels
        .iter()
        .map(|lane| {
            let total = lane.total().max(1) as f64;
            let occupied = || lane.counts.iter().enumerate().filter(|(_, count)| **count > 0);
            let min = occupied().map(|(value, _)| value).next().unwrap_or(0);
            let max = occupied().map(|(value, _)| value).last().unwrap_or(0);
            let mean = occupied()
                .map(|(value, count)| value as f64 * *count as f64)
                .sum::<f64>()
                / total;
            let variance = occupied()
                .map(|(value, count)| (value as f64 - mean).powi(2) * *count as f64)
                .sum::<f64>()
                / total;
            ChannelSummary {
                channel: lane.channel,
                min: min as u8,
                max: max as u8,
                mean,
                deviation: variance.sqrt(),
            }
        })
        .collect();
    Ok(summaries)
}
