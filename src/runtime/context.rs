use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::analytics::{AnalyticsOutput, AnalyticsRequest};
use crate::commands::MaskKind;
use crate::config::ShellConfig;
use crate::formats::{DefaultImageCodec, ImageCodec, read_with, write_with};
use crate::model::{Document, DocumentId, PixelBuffer};
use crate::windows::{CloseOutcome, ConfirmClose, Placement, WindowManager};

use super::{
    FileService, RecentFiles, Result, Service, ServiceId, ServiceRegistry, UtilityService,
    WindowService,
};

/// Composition root: owns the documents, the services, the codec and the settings.
///
/// Every operation that changes the set of windows forwards the resulting
/// lifecycle events to the registry before returning.
pub struct AppContext {
    windows: WindowManager,
    registry: ServiceRegistry,
    codec: Arc<dyn ImageCodec>,
    config: ShellConfig,
    recent: RecentFiles,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("AppContext")
            .field("documents", &self.windows.len())
            .field("registry", &self.registry)
            .field("config", &self.config)
            .finish()
    }
}

impl AppContext {
    /// A shell without services, using the default codec.
    pub fn new(config: ShellConfig) -> Self {
        Self::with_codec(config, Arc::new(DefaultImageCodec))
    }

    pub fn with_codec(config: ShellConfig, codec: Arc<dyn ImageCodec>) -> Self {
        let recent = RecentFiles::new(config.max_recent_files);
        Self {
            windows: WindowManager::new(),
            registry: ServiceRegistry::new(),
            codec,
            config,
            recent,
        }
    }

    /// A shell with the file, window and utility services registered.
    pub fn with_default_services(config: ShellConfig) -> Self {
        let mut context = Self::new(config);
        let files = FileService::new(context.config.max_recent_files);
        context.recent = files.recent();
        context.register(files);
        context.register(WindowService);
        context.register(UtilityService);
        context
    }

    pub fn register(&mut self, service: impl Service + 'static) -> ServiceId {
        self.registry.register(service)
    }

    pub fn windows(&self) -> &WindowManager {
        &self.windows
    }

    /// Mutable access for selection and mode changes; these emit no lifecycle events.
    pub fn document_mut(&mut self, id: DocumentId) -> Result<&mut Document> {
        Ok(self.windows.document_mut(id)?)
    }

    pub fn registry(&self) -> &ServiceRegistry {
        &self.registry
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    pub fn recent_files(&self) -> Vec<PathBuf> {
        self.recent.paths()
    }

    pub fn open(&mut self, buffer: PixelBuffer, name: &str) -> Result<DocumentId> {
        let id = self.windows.open(buffer, name)?;
        self.flush();
        Ok(id)
    }

    pub fn open_file(&mut self, path: impl AsRef<Path>) -> Result<DocumentId> {
        let path = path.as_ref();
        let buffer = read_with(self.codec.as_ref(), path)?;
        let id = self.windows.open_with_source(buffer, path)?;
        self.flush();
        Ok(id)
    }

    pub fn save_as(&self, id: DocumentId, path: impl AsRef<Path>) -> Result<()> {
        let document = self.windows.document(id)?;
        write_with(self.codec.as_ref(), path, document.buffer())?;
        Ok(())
    }

    pub fn close(&mut self, id: DocumentId) -> Result<()> {
        self.windows.close(id)?;
        self.flush();
        Ok(())
    }

    pub fn close_related(
        &mut self,
        id: DocumentId,
        confirm: &mut dyn ConfirmClose,
    ) -> Result<CloseOutcome> {
        let outcome = self.windows.close_related(id, confirm)?;
        self.flush();
        Ok(outcome)
    }

    pub fn activate(&mut self, id: DocumentId) -> Result<()> {
        self.windows.activate(id)?;
        self.flush();
        Ok(())
    }

    pub fn apply_mask(
        &mut self,
        source: DocumentId,
        mask: &PixelBuffer,
        kind: MaskKind,
    ) -> Result<DocumentId> {
        let id = self.windows.apply_mask(source, mask, kind)?;
        self.flush();
        Ok(id)
    }

    pub fn copy_crop(&mut self, source: DocumentId) -> Result<DocumentId> {
        let id = self.windows.copy_crop(source)?;
        self.flush();
        Ok(id)
    }

    pub fn convert_to_grayscale(&mut self, source: DocumentId) -> Result<DocumentId> {
        let id = self
            .windows
            .convert_to_grayscale(source, &self.config.luminance)?;
        self.flush();
        Ok(id)
    }

    pub fn convert_to_binary(&mut self, source: DocumentId) -> Result<DocumentId> {
        let id = self
            .windows
            .convert_to_binary(source, &self.config.luminance)?;
        self.flush();
        Ok(id)
    }

    pub fn tile(&self) -> Vec<Placement> {
        self.windows.tile(self.config.canvas)
    }

    pub fn cascade(&self) -> Vec<Placement> {
        self.windows.cascade(self.config.canvas, self.config.cascade_step)
    }

    /// Runs `request` synchronously against the document's current analysis region.
    pub fn analyze(&self, id: DocumentId, request: AnalyticsRequest) -> Result<AnalyticsOutput> {
        let snapshot = self.windows.snapshot(id)?;
        Ok(request.run(&snapshot)?)
    }

    fn flush(&mut self) {
        for event in self.windows.drain_events() {
            let delivered = self.registry.dispatch(&event, &self.windows);
            log::debug!("{event:?} delivered to {delivered} services");
        }
    }
}
