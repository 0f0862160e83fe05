use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{CoreError, PixelBuffer, Region, Result, SelectionRect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DocumentId(u64);

impl DocumentId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "document #{}", self.0)
    }
}

/// How pointer drags on the image view are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InteractionMode {
    #[default]
    Select,
    Hand,
}

/// Model behind one image window.
///
/// Every selection or buffer change bumps `revision`, which lets background
/// analytics detect that their input snapshot went stale.
#[derive(Debug)]
pub struct Document {
    id: DocumentId,
    display_name: String,
    source: Option<PathBuf>,
    buffer: Arc<PixelBuffer>,
    selection: Option<Region>,
    mode: InteractionMode,
    revision: u64,
    parent: Option<DocumentId>,
}

impl Document {
    pub(crate) fn new(id: DocumentId, display_name: String, buffer: Arc<PixelBuffer>) -> Result<Self> {
        validate_name(&display_name)?;
        Ok(Self {
            id,
            display_name,
            source: None,
            buffer,
            selection: None,
            mode: InteractionMode::default(),
            revision: 0,
            parent: None,
        })
    }

    pub(crate) fn with_source(mut self, source: Option<PathBuf>) -> Self {
        self.source = source;
        self
    }

    pub(crate) fn with_parent(mut self, parent: Option<DocumentId>) -> Self {
        self.parent = parent;
        self
    }

    pub fn id(&self) -> DocumentId {
        self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn buffer(&self) -> &Arc<PixelBuffer> {
        &self.buffer
    }

    pub fn selection(&self) -> Option<Region> {
        self.selection
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn parent(&self) -> Option<DocumentId> {
        self.parent
    }

    /// Region analytics should run on: the selection, or the full image.
    pub fn analysis_region(&self) -> Region {
        self.selection.unwrap_or_else(|| self.buffer.full_region())
    }

    /// Replaces the selection, clamping `rect` to the image bounds.
    pub fn set_selection(&mut self, rect: SelectionRect) -> Result<Region> {
        let region = Region::clamped(rect, self.buffer.extent())?;
        self.selection = Some(region);
        self.bump();
        Ok(region)
    }

    /// Replaces the selection with an already-built region, which must fit.
    pub fn set_region(&mut self, region: Region) -> Result<()> {
        self.buffer.check_region(&region)?;
        self.selection = Some(region);
        self.bump();
        Ok(())
    }

    pub fn select_all(&mut self) -> Region {
        let region = self.buffer.full_region();
        self.selection = Some(region);
        self.bump();
        region
    }

    pub fn clear_selection(&mut self) {
        if self.selection.take().is_some() {
            self.bump();
        }
    }

    pub fn set_mode(&mut self, mode: InteractionMode) {
        self.mode = mode;
    }

    pub fn rename(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        validate_name(&name)?;
        self.display_name = name;
        Ok(())
    }

    /// Extracts `region` into a new buffer; the document is left untouched.
    pub fn crop(&self, region: &Region) -> Result<PixelBuffer> {
        self.buffer.crop(region)
    }

    /// Replaces the image with its current analysis region.
    pub fn crop_in_place(&mut self) -> Result<()> {
        let cropped = self.buffer.crop(&self.analysis_region())?;
        self.buffer = Arc::new(cropped);
        self.selection = None;
        self.bump();
        Ok(())
    }

    pub(crate) fn detach_parent(&mut self) {
        self.parent = None;
    }

    fn bump(&mut self) {
        self.revision += 1;
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(CoreError::InvalidName);
    }
    Ok(())
}
