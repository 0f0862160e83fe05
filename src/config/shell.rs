use serde::{Deserialize, Serialize};

use crate::analytics::{CompositePolicy, HistogramOptions, LumaWeights};
use crate::windows::Canvas;

use super::{ConfigError, Result};

fn default_cascade_step() -> u32 {
    24
}

fn default_max_recent_files() -> usize {
    10
}

/// Settings shared by the shell, its services and the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShellConfig {
    #[serde(default)]
    pub canvas: Canvas,
    #[serde(default = "default_cascade_step")]
    pub cascade_step: u32,
    #[serde(default = "default_max_recent_files")]
    pub max_recent_files: usize,
    /// Extra histogram channel; `None` shows the image channels only.
    #[serde(default)]
    pub composite: Option<CompositePolicy>,
    /// Weights for grayscale and binary conversion.
    #[serde(default)]
    pub luminance: LumaWeights,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            cascade_step: default_cascade_step(),
            max_recent_files: default_max_recent_files(),
            composite: None,
            luminance: LumaWeights::default(),
        }
    }
}

impl ShellConfig {
    pub fn validate(&self) -> Result<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "canvas must be non-empty, got {}x{}",
                self.canvas.width, self.canvas.height
            )));
        }
        if self.cascade_step == 0 {
            return Err(ConfigError::Invalid("cascade_step must be positive".into()));
        }
        let weights = [self.luminance.red, self.luminance.green, self.luminance.blue];
        if weights.iter().any(|weight| !weight.is_finite() || *weight < 0.0) {
            return Err(ConfigError::Invalid(
                "luminance weights must be finite and non-negative".into(),
            ));
        }
        Ok(())
    }

    pub fn histogram_options(&self) -> HistogramOptions {
        HistogramOptions {
            composite: self.composite,
        }
    }
}
