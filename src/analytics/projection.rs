use ndarray::parallel::prelude::*;
use ndarray::{ArrayView2, Axis};
use serde::{Deserialize, Serialize};

use crate::model::{ChannelKind, PixelBuffer, Region, Result};

use super::resolve_region;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionAxis {
    /// One value per row.
    Horizontal,
    /// One value per column.
    Vertical,
}

/// Per-line aggregate of the samples of one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Reduction {
    /// Number of samples equal to the given value.
    CountOf(u8),
    Sum,
    Mean,
}

impl Reduction {
    fn reduce(&self, samples: impl ExactSizeIterator<Item = u8>) -> f64 {
        let len = samples.len();
        match self {
            Self::CountOf(target) => samples.filter(|value| value == target).count() as f64,
            Self::Sum => samples.map(u64::from).sum::<u64>() as f64,
            Self::Mean => samples.map(u64::from).sum::<u64>() as f64 / len.max(1) as f64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionSeries {
    pub channel: ChannelKind,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Projection {
    pub axis: ProjectionAxis,
    pub reduction: Reduction,
    pub region: Region,
    pub series: Vec<ProjectionSeries>,
}

impl Projection {
    /// Row (horizontal) or column (vertical) index of the first value.
    pub fn origin(&self) -> usize {
        match self.axis {
            ProjectionAxis::Horizontal => self.region.y(),
            ProjectionAxis::Vertical => self.region.x(),
        }
    }
}

pub fn compute_projection(
    buffer: &PixelBuffer,
    region: Option<&Region>,
    axis: ProjectionAxis,
    reduction: Reduction,
) -> Result<Projection> {
    let region = resolve_region(buffer, region)?;
    let view = buffer.view(&region)?;
    let split = match axis {
        ProjectionAxis::Horizontal => Axis(0),
        ProjectionAxis::Vertical => Axis(1),
    };

    // Each line is a `[position, channel]` view regardless of the axis.
    let per_line = view
        .axis_iter(split)
        .into_par_iter()
        .map(|line: ArrayView2<'_, u8>| {
            line.axis_iter(Axis(1))
                .map(|lane| reduction.reduce(lane.iter().copied()))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    let series = buffer
        .layout()
        .iter()
        .enumerate()
        .map(|(channel, kind)| ProjectionSeries {
            channel: *kind,
            values: per_line.iter().map(|line| line[channel]).collect(),
        })
        .collect();

    Ok(Projection {
        axis,
        reduction,
        region,
        series,
    })
}
