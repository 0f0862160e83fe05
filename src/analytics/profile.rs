use ndarray::{Axis, s};
use serde::{Deserialize, Serialize};

use crate::model::{ChannelKind, CoreError, PixelBuffer, Region, Result};

use super::resolve_region;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileAxis {
    Row,
    Column,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileLine {
    pub channel: ChannelKind,
    pub samples: Vec<u8>,
}

/// Raw samples along one full row or column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub axis: ProfileAxis,
    pub index: usize,
    pub lines: Vec<ProfileLine>,
}

pub fn compute_profile(buffer: &PixelBuffer, index: usize, axis: ProfileAxis) -> Result<Profile> {
    let (limit, span) = match axis {
        ProfileAxis::Row => (buffer.height(), buffer.width()),
        ProfileAxis::Column => (buffer.width(), buffer.height()),
    };
    if index >= limit {
        let (x, y, width, height) = match axis {
            ProfileAxis::Row => (0, index, span, 1),
            ProfileAxis::Column => (index, 0, 1, span),
        };
        return Err(CoreError::InvalidRegion {
            x: x as i64,
            y: y as i64,
            width: width as i64,
            height: height as i64,
            reason: "profile line lies outside the buffer",
        });
    }

    let line = match axis {
        ProfileAxis::Row => buffer.data().slice(s![index, .., ..]),
        ProfileAxis::Column => buffer.data().slice(s![.., index, ..]),
    };
    let lines = line
        .axis_iter(Axis(1))
        .zip(buffer.layout())
        .map(|(lane, kind)| ProfileLine {
            channel: *kind,
            samples: lane.to_vec(),
        })
        .collect();
    Ok(Profile { axis, index, lines })
}

/// Sample readout of a region, as shown by the pixel grid view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PixelGrid {
    pub region: Region,
    pub channels: Vec<ChannelKind>,
    samples: Vec<u8>,
}

impl PixelGrid {
    /// Samples of the pixel at absolute image coordinates, if inside the grid.
    pub fn at(&self, x: usize, y: usize) -> Option<&[u8]> {
        if !self.region.columns().contains(&x) || !self.region.rows().contains(&y) {
            return None;
        }
        let stride = self.channels.len();
        let offset = ((y - self.region.y()) * self.region.width() + (x - self.region.x())) * stride;
        self.samples.get(offset..offset + stride)
    }
}

pub fn pixel_grid(buffer: &PixelBuffer, region: Option<&Region>) -> Result<PixelGrid> {
    let region = resolve_region(buffer, region)?;
    let samples = buffer.view(&region)?.iter().copied().collect();
    Ok(PixelGrid {
        region,
        channels: buffer.layout().to_vec(),
        samples,
    })
}
