use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{IoError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Png,
    Bmp,
    Jpeg,
    Vff,
}

impl ImageFormat {
    pub const ALL: [ImageFormat; 4] = [Self::Png, Self::Bmp, Self::Jpeg, Self::Vff];

    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "bmp" => Some(Self::Bmp),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "vff" => Some(Self::Vff),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        path.extension()
            .and_then(|value| value.to_str())
            .and_then(Self::from_extension)
            .ok_or_else(|| IoError::UnsupportedFormat(path.to_string_lossy().to_string()))
    }

    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Png => &["png"],
            Self::Bmp => &["bmp"],
            Self::Jpeg => &["jpg", "jpeg"],
            Self::Vff => &["vff"],
        }
    }

    pub(crate) fn to_image(self) -> Option<image::ImageFormat> {
        match self {
            Self::Png => Some(image::ImageFormat::Png),
            Self::Bmp => Some(image::ImageFormat::Bmp),
            Self::Jpeg => Some(image::ImageFormat::Jpeg),
            Self::Vff => None,
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.extensions()[0])
    }
}

/// Every extension the file dialog filter should offer.
pub fn supported_extensions() -> Vec<&'static str> {
    ImageFormat::ALL
        .iter()
        .flat_map(|format| format.extensions().iter().copied())
        .collect()
}
