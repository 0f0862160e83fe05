use std::path::Path;

use serde_json::Value;

use crate::analytics::{AnalyticsOutput, AnalyticsRequest, HistogramOptions, Reduction, pixel_grid};
use crate::config::{ShellConfig, load_config};
use crate::formats::read_buffer;
use crate::model::{DocumentId, PixelBuffer, SelectionRect};
use crate::runtime::{AppContext, channel_label_keys};

use super::types::{Cli, Commands, ImageInfo, LayoutArg, ReductionArg, WrittenImage};

/// Runs a parsed command line and prints its JSON result.
pub fn run(cli: Cli) -> Result<(), String> {
    let output = execute(cli)?;
    println!(
        "{}",
        serde_json::to_string_pretty(&output).map_err(|error| error.to_string())?
    );
    Ok(())
}

/// Runs a parsed command line and returns its result as JSON.
pub fn execute(cli: Cli) -> Result<Value, String> {
    let config = match &cli.config {
        Some(path) => load_config(path).map_err(|error| error.to_string())?,
        None => ShellConfig::default(),
    };
    let mut app = AppContext::with_default_services(config);
    if let Some(notice) = app.registry().integrity_notice() {
        log::warn!("{} service failures during setup", notice.failures.len());
    }

    match cli.command {
        Commands::Info { input, region } => {
            let id = open(&mut app, &input, region)?;
            let document = app.windows().document(id).map_err(|error| error.to_string())?;
            let buffer = document.buffer();
            let statistics = match app
                .analyze(id, AnalyticsRequest::Summary)
                .map_err(|error| error.to_string())?
            {
                AnalyticsOutput::Summary(statistics) => statistics,
                _ => Vec::new(),
            };
            let info = ImageInfo {
                name: document.display_name().to_string(),
                source: document.source().map(|path| path.display().to_string()),
                width: buffer.width(),
                height: buffer.height(),
                channels: buffer.layout().to_vec(),
                label_keys: channel_label_keys(buffer.layout()),
                statistics,
            };
            to_json(&info)
        }
        Commands::Histogram {
            input,
            cumulative,
            region,
            composite,
        } => {
            let id = open(&mut app, &input, region)?;
            let request = if cumulative {
                AnalyticsRequest::CumulativeHistogram
            } else {
                let mut options = app.config().histogram_options();
                if let Some(composite) = composite {
                    options = HistogramOptions {
                        composite: Some(composite.policy(app.config().luminance)),
                    };
                }
                AnalyticsRequest::Histogram { options }
            };
            analyze(&app, id, request)
        }
        Commands::Projection {
            input,
            axis,
            reduction,
            value,
            region,
        } => {
            let id = open(&mut app, &input, region)?;
            let reduction = match reduction {
                ReductionArg::Count => Reduction::CountOf(value),
                ReductionArg::Sum => Reduction::Sum,
                ReductionArg::Mean => Reduction::Mean,
            };
            let request = AnalyticsRequest::Projection {
                axis: axis.into(),
                reduction,
            };
            analyze(&app, id, request)
        }
        Commands::Profile { input, axis, index } => {
            let id = open(&mut app, &input, None)?;
            let request = AnalyticsRequest::Profile {
                axis: axis.into(),
                index,
            };
            analyze(&app, id, request)
        }
        Commands::Grid { input, region } => {
            let id = open(&mut app, &input, Some(region))?;
            let document = app.windows().document(id).map_err(|error| error.to_string())?;
            let grid = pixel_grid(document.buffer(), document.selection().as_ref())
                .map_err(|error| error.to_string())?;
            to_json(&grid)
        }
        Commands::Mask {
            input,
            mask,
            output,
            kind,
        } => {
            let id = open(&mut app, &input, None)?;
            let mask = read_buffer(&mask).map_err(|error| error.to_string())?;
            let masked = app
                .apply_mask(id, &mask, kind.into())
                .map_err(|error| error.to_string())?;
            save(&app, masked, &output)
        }
        Commands::Crop {
            input,
            output,
            region,
        } => {
            let id = open(&mut app, &input, Some(region))?;
            let cropped = app.copy_crop(id).map_err(|error| error.to_string())?;
            save(&app, cropped, &output)
        }
        Commands::Layout { count, mode } => {
            for _ in 0..count {
                let placeholder =
                    PixelBuffer::filled(1, 1, 1, 0).map_err(|error| error.to_string())?;
                app.open(placeholder, "window")
                    .map_err(|error| error.to_string())?;
            }
            let placements = match mode {
                LayoutArg::Tile => app.tile(),
                LayoutArg::Cascade => app.cascade(),
            };
            to_json(&placements)
        }
        Commands::Config => to_json(app.config()),
    }
}

fn open(
    app: &mut AppContext,
    input: &Path,
    region: Option<SelectionRect>,
) -> Result<DocumentId, String> {
    let id = app.open_file(input).map_err(|error| error.to_string())?;
    if let Some(rect) = region {
        let applied = app
            .document_mut(id)
            .map_err(|error| error.to_string())?
            .set_selection(rect)
            .map_err(|error| error.to_string())?;
        log::info!(
            "analysis region {}x{} at ({}, {})",
            applied.width(),
            applied.height(),
            applied.x(),
            applied.y()
        );
    }
    Ok(id)
}

fn analyze(app: &AppContext, id: DocumentId, request: AnalyticsRequest) -> Result<Value, String> {
    let output = app
        .analyze(id, request)
        .map_err(|error| error.to_string())?;
    to_json(&output)
}

fn save(app: &AppContext, id: DocumentId, output: &Path) -> Result<Value, String> {
    app.save_as(id, output).map_err(|error| error.to_string())?;
    let document = app.windows().document(id).map_err(|error| error.to_string())?;
    to_json(&WrittenImage {
        name: document.display_name().to_string(),
        output: output.to_path_buf(),
        width: document.buffer().width(),
        height: document.buffer().height(),
        channels: document.buffer().channels(),
    })
}

fn to_json(value: &impl serde::Serialize) -> Result<Value, String> {
    serde_json::to_value(value).map_err(|error| error.to_string())
}
