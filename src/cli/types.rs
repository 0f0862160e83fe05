use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use crate::analytics::{ChannelSummary, CompositePolicy, LumaWeights, ProfileAxis, ProjectionAxis};
use crate::commands::MaskKind;
use crate::model::{ChannelKind, SelectionRect};

#[derive(Debug, Parser)]
#[command(
    name = "inspect",
    version,
    about = "Per-channel statistics, projections, profiles and masks for raster images"
)]
pub struct Cli {
    /// Shell configuration (YAML or JSON).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter, e.g. `info` or `image_inspect=debug`.
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Dimensions, channel layout and per-channel statistics.
    Info {
        input: PathBuf,
        #[arg(long)]
        region: Option<SelectionRect>,
    },
    Histogram {
        input: PathBuf,
        #[arg(long)]
        cumulative: bool,
        /// `x,y,width,height`; clamped to the image.
        #[arg(long)]
        region: Option<SelectionRect>,
        #[arg(long, value_enum)]
        composite: Option<CompositeArg>,
    },
    Projection {
        input: PathBuf,
        #[arg(long, value_enum, default_value_t = ProjectionAxisArg::Horizontal)]
        axis: ProjectionAxisArg,
        #[arg(long, value_enum, default_value_t = ReductionArg::Count)]
        reduction: ReductionArg,
        /// Sample value counted by the `count` reduction.
        #[arg(long, default_value_t = 0)]
        value: u8,
        #[arg(long)]
        region: Option<SelectionRect>,
    },
    Profile {
        input: PathBuf,
        #[arg(long, value_enum, default_value_t = ProfileAxisArg::Row)]
        axis: ProfileAxisArg,
        #[arg(long)]
        index: usize,
    },
    /// Raw samples of a region, row by row.
    Grid {
        input: PathBuf,
        #[arg(long)]
        region: SelectionRect,
    },
    /// Writes the masked image; the input stays untouched.
    Mask {
        input: PathBuf,
        mask: PathBuf,
        output: PathBuf,
        #[arg(long, value_enum, default_value_t = MaskArg::Weight)]
        kind: MaskArg,
    },
    Crop {
        input: PathBuf,
        output: PathBuf,
        #[arg(long)]
        region: SelectionRect,
    },
    /// Window placements for `count` open windows.
    Layout {
        #[arg(long, default_value_t = 4)]
        count: usize,
        #[arg(long, value_enum, default_value_t = LayoutArg::Tile)]
        mode: LayoutArg,
    },
    /// Prints the effective configuration.
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CompositeArg {
    Luminance,
    AlphaWeighted,
}

impl CompositeArg {
    pub(super) fn policy(self, weights: LumaWeights) -> CompositePolicy {
        match self {
            Self::Luminance => CompositePolicy::Luminance { weights },
            Self::AlphaWeighted => CompositePolicy::AlphaWeighted { weights },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProjectionAxisArg {
    Horizontal,
    Vertical,
}

impl From<ProjectionAxisArg> for ProjectionAxis {
    fn from(value: ProjectionAxisArg) -> Self {
        match value {
            ProjectionAxisArg::Horizontal => Self::Horizontal,
            ProjectionAxisArg::Vertical => Self::Vertical,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReductionArg {
    Count,
    Sum,
    Mean,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProfileAxisArg {
    Row,
    Column,
}

impl From<ProfileAxisArg> for ProfileAxis {
    fn from(value: ProfileAxisArg) -> Self {
        match value {
            ProfileAxisArg::Row => Self::Row,
            ProfileAxisArg::Column => Self::Column,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MaskArg {
    Weight,
    Boolean,
}

impl From<MaskArg> for MaskKind {
    fn from(value: MaskArg) -> Self {
        match value {
            MaskArg::Weight => Self::Weight,
            MaskArg::Boolean => Self::Boolean,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LayoutArg {
    Tile,
    Cascade,
}

#[derive(Debug, Serialize)]
pub(super) struct ImageInfo {
    pub(super) name: String,
    pub(super) source: Option<String>,
    pub(super) width: usize,
    pub(super) height: usize,
    pub(super) channels: Vec<ChannelKind>,
    pub(super) label_keys: Vec<&'static str>,
    pub(super) statistics: Vec<ChannelSummary>,
}

#[derive(Debug, Serialize)]
pub(super) struct WrittenImage {
    pub(super) name: String,
    pub(super) output: PathBuf,
    pub(super) width: usize,
    pub(super) height: usize,
    pub(super) channels: usize,
}
