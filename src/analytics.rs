mod histogram;
mod profile;
mod projection;
mod summary;
mod worker;


use crate::model::{PixelBuffer, Region, Result};

pub use histogram::{
    BINS, ChannelCounts, CompositePolicy, Histogram, HistogramOptions, LumaWeights,
    compute_cumulative_histogram, compute_histogram, compute_histogram_with,
};
pub use profile::{PixelGrid, Profile, ProfileAxis, ProfileLine, compute_profile, pixel_grid};
pub use projection::{Projection, ProjectionAxis, ProjectionSeries, Reduction, compute_projection};
pub use summary::{ChannelSummary, channel_summary};
pub use worker::{
    AnalyticsOutput, AnalyticsRequest, AnalyticsSnapshot, AnalyticsWorker, Stamped, WorkerResult,
};

fn resolve_region(buffer: &PixelBuffer, region: Option<&Region>) -> Result<Region> {
    match region {
        Some(region) => {
            buffer.check_region(region)?;
            Ok(*region)
        }
        None => Ok(buffer.full_region()),
    }
}
