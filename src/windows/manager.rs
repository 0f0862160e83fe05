use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;

use crate::analytics::{AnalyticsSnapshot, LumaWeights, Stamped};
use crate::commands::{self, DerivedImage, MaskKind};
use crate::model::{Document, DocumentId, PixelBuffer};

use super::layout::{self, Canvas, Placement};
use super::{ConfirmClose, LifecycleEvent, Result, WindowError};

const UNTITLED: &str = "untitled";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "documents", rename_all = "snake_case")]
pub enum CloseOutcome {
    Closed(Vec<DocumentId>),
    Cancelled,
}

/// Owns every open document and tracks which one is active.
///
/// Ids are handed out in increasing order, so iterating the map yields the
/// documents in the order they were opened.
#[derive(Debug, Default)]
pub struct WindowManager {
    documents: BTreeMap<DocumentId, Document>,
    next_id: u64,
    active: Option<DocumentId>,
    history: Vec<DocumentId>,
    events: Vec<LifecycleEvent>,
}

impl WindowManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn contains(&self, id: DocumentId) -> bool {
        self.documents.contains_key(&id)
    }

    pub fn ids(&self) -> Vec<DocumentId> {
        self.documents.keys().copied().collect()
    }

    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.documents.values()
    }

    pub fn document(&self, id: DocumentId) -> Result<&Document> {
        self.documents
            .get(&id)
            .ok_or(WindowError::UnknownDocument(id))
    }

    pub fn document_mut(&mut self, id: DocumentId) -> Result<&mut Document> {
        self.documents
            .get_mut(&id)
            .ok_or(WindowError::UnknownDocument(id))
    }

    pub fn find_by_name(&self, name: &str) -> Option<DocumentId> {
        self.documents
            .values()
            .find(|doc| doc.display_name() == name)
            .map(Document::id)
    }

    pub fn active(&self) -> Option<DocumentId> {
        self.active
    }

    pub fn active_document(&self) -> Option<&Document> {
        self.active.and_then(|id| self.documents.get(&id))
    }

    pub fn open(&mut self, buffer: impl Into<Arc<PixelBuffer>>, name: &str) -> Result<DocumentId> {
        self.insert(buffer.into(), name, None, None)
    }

    /// Opens a decoded file; the window title is the file name of `path`.
    pub fn open_with_source(
        &mut self,
        buffer: impl Into<Arc<PixelBuffer>>,
        path: &Path,
    ) -> Result<DocumentId> {
        let title = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| UNTITLED.to_string());
        self.insert(buffer.into(), &title, Some(path), None)
    }

    pub fn open_derived(&mut self, parent: DocumentId, derived: DerivedImage) -> Result<DocumentId> {
        self.document(parent)?;
        self.insert(
            Arc::new(derived.buffer),
            &derived.display_name,
            None,
            Some(parent),
        )
    }

    pub fn apply_mask(
        &mut self,
        source: DocumentId,
        mask: &PixelBuffer,
        kind: MaskKind,
    ) -> Result<DocumentId> {
        let derived = commands::apply_mask(self.document(source)?, mask, kind)?;
        self.open_derived(source, derived)
    }

    pub fn copy_crop(&mut self, source: DocumentId) -> Result<DocumentId> {
        let derived = commands::copy_crop(self.document(source)?)?;
        self.open_derived(source, derived)
    }

    pub fn convert_to_grayscale(
        &mut self,
        source: DocumentId,
        weights: &LumaWeights,
    ) -> Result<DocumentId> {
        let derived = commands::convert_to_grayscale(self.document(source)?, weights)?;
        self.open_derived(source, derived)
    }

    pub fn convert_to_binary(
        &mut self,
        source: DocumentId,
        weights: &LumaWeights,
    ) -> Result<DocumentId> {
        let derived = commands::convert_to_binary(self.document(source)?, weights)?;
        self.open_derived(source, derived)
    }

    /// Stores `name` as given; only newly opened windows get numbered titles.
    pub fn rename(&mut self, id: DocumentId, name: &str) -> Result<()> {
        self.document_mut(id)?.rename(name)?;
        Ok(())
    }

    pub fn activate(&mut self, id: DocumentId) -> Result<()> {
        self.document(id)?;
        if self.active == Some(id) {
            return Ok(());
        }
        self.history.retain(|entry| *entry != id);
        self.history.push(id);
        self.active = Some(id);
        self.events.push(LifecycleEvent::DocumentActivated(id));
        log::debug!("activated {id}");
        Ok(())
    }

    pub fn close(&mut self, id: DocumentId) -> Result<()> {
        self.document(id)?;
        self.remove_all(&[id]);
        Ok(())
    }

    /// The target plus all of its transitive descendants, in insertion order.
    pub fn related(&self, id: DocumentId) -> Result<Vec<DocumentId>> {
        self.document(id)?;
        let mut closure = vec![id];
        let mut grew = true;
        while grew {
            grew = false;
            for doc in self.documents.values() {
                let linked = doc.parent().is_some_and(|parent| closure.contains(&parent));
                if linked && !closure.contains(&doc.id()) {
                    closure.push(doc.id());
                    grew = true;
                }
            }
        }
        closure.sort();
        Ok(closure)
    }

    /// Closes a document together with every window derived from it.
    ///
    /// `confirm` is asked once, and only when more than one window would close.
    pub fn close_related(
        &mut self,
        id: DocumentId,
        confirm: &mut dyn ConfirmClose,
    ) -> Result<CloseOutcome> {
        let closure = self.related(id)?;
        if closure.len() > 1 && !confirm.confirm_close(&closure) {
            log::info!("closing {} related windows cancelled", closure.len());
            return Ok(CloseOutcome::Cancelled);
        }
        self.remove_all(&closure);
        Ok(CloseOutcome::Closed(closure))
    }

    pub fn tile(&self, canvas: Canvas) -> Vec<Placement> {
        layout::tile(&self.ids(), canvas)
    }

    pub fn cascade(&self, canvas: Canvas, step: u32) -> Vec<Placement> {
        layout::cascade(&self.ids(), canvas, step)
    }

    pub fn snapshot(&self, id: DocumentId) -> Result<AnalyticsSnapshot> {
        Ok(AnalyticsSnapshot::of(self.document(id)?))
    }

    /// Unwraps a background result if its document is still at the same revision.
    pub fn accept<T>(&self, stamped: Stamped<T>) -> Option<T> {
        let current = self
            .documents
            .get(&stamped.document)
            .is_some_and(|doc| stamped.is_current(doc));
        if !current {
            log::debug!(
                "dropping stale analytics for {} at revision {}",
                stamped.document,
                stamped.revision
            );
            return None;
        }
        Some(stamped.value)
    }

    pub fn drain_events(&mut self) -> Vec<LifecycleEvent> {
        std::mem::take(&mut self.events)
    }

    fn insert(
        &mut self,
        buffer: Arc<PixelBuffer>,
        name: &str,
        source: Option<&Path>,
        parent: Option<DocumentId>,
    ) -> Result<DocumentId> {
        self.next_id += 1;
        let id = DocumentId::new(self.next_id);
        let title = self.unique_title(name);
        let document = Document::new(id, title, buffer)?
            .with_source(source.map(Path::to_path_buf))
            .with_parent(parent);
        log::info!(
            "opened {id} as '{}' ({}x{}x{})",
            document.display_name(),
            document.buffer().width(),
            document.buffer().height(),
            document.buffer().channels()
        );
        self.documents.insert(id, document);
        self.events.push(LifecycleEvent::DocumentOpened(id));
        self.activate(id)?;
        Ok(id)
    }

    fn remove_all(&mut self, ids: &[DocumentId]) {
        for id in ids {
            if self.documents.remove(id).is_some() {
                self.history.retain(|entry| entry != id);
                self.events.push(LifecycleEvent::DocumentClosed(*id));
                log::info!("closed {id}");
            }
        }
        for doc in self.documents.values_mut() {
            if doc.parent().is_some_and(|parent| ids.contains(&parent)) {
                doc.detach_parent();
            }
        }
        if self.active.is_some_and(|active| ids.contains(&active)) {
            self.active = None;
            if let Some(previous) = self.history.last().copied() {
                self.active = Some(previous);
                self.events.push(LifecycleEvent::DocumentActivated(previous));
                log::debug!("re-activated {previous}");
            }
        }
    }

    fn title_taken(&self, title: &str) -> bool {
        self.documents.values().any(|doc| doc.display_name() == title)
    }

    fn unique_title(&self, name: &str) -> String {
        if !self.title_taken(name) {
            return name.to_string();
        }
        let mut index = 0u64;
        loop {
            let candidate = format!("{name} - {index}");
            if !self.title_taken(&candidate) {
                return candidate;
            }
            index += 1;
        }
    }
}
