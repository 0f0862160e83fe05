use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::model::{Document, DocumentId, PixelBuffer, Region, Result};

use super::{
    ChannelSummary, Histogram, HistogramOptions, Profile, ProfileAxis, Projection, ProjectionAxis,
    Reduction, channel_summary, compute_cumulative_histogram, compute_histogram_with,
    compute_profile, compute_projection,
};

/// Immutable analytics input captured from a document at one revision.
#[derive(Debug, Clone)]
pub struct AnalyticsSnapshot {
    document: DocumentId,
    revision: u64,
    buffer: Arc<PixelBuffer>,
    region: Region,
}

impl AnalyticsSnapshot {
    pub fn of(document: &Document) -> Self {
        Self {
            document: document.id(),
            revision: document.revision(),
            buffer: Arc::clone(document.buffer()),
            region: document.analysis_region(),
        }
    }

    pub fn document(&self) -> DocumentId {
        self.document
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn stamp<T>(&self, value: T) -> Stamped<T> {
        Stamped {
            document: self.document,
            revision: self.revision,
            value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalyticsRequest {
    Histogram {
        #[serde(default)]
        options: HistogramOptions,
    },
    CumulativeHistogram,
    Projection {
        axis: ProjectionAxis,
        reduction: Reduction,
    },
    Profile {
        axis: ProfileAxis,
        index: usize,
    },
    Summary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "result", rename_all = "snake_case")]
pub enum AnalyticsOutput {
    Histogram(Histogram),
    Projection(Projection),
    Profile(Profile),
    Summary(Vec<ChannelSummary>),
}

impl AnalyticsRequest {
    pub fn run(&self, snapshot: &AnalyticsSnapshot) -> Result<AnalyticsOutput> {
        let buffer = snapshot.buffer();
        let region = snapshot.region();
        let output = match self {
            Self::Histogram { options } => {
                AnalyticsOutput::Histogram(compute_histogram_with(buffer, Some(&region), options)?)
            }
            Self::CumulativeHistogram => {
                AnalyticsOutput::Histogram(compute_cumulative_histogram(buffer, Some(&region))?)
            }
            Self::Projection { axis, reduction } => AnalyticsOutput::Projection(
                compute_projection(buffer, Some(&region), *axis, *reduction)?,
            ),
            Self::Profile { axis, index } => {
                AnalyticsOutput::Profile(compute_profile(buffer, *index, *axis)?)
            }
            Self::Summary => AnalyticsOutput::Summary(channel_summary(buffer, Some(&region))?),
        };
        Ok(output)
    }
}

/// A result tagged with the document revision it was computed from.
#[derive(Debug, Clone, PartialEq)]
pub struct Stamped<T> {
    pub document: DocumentId,
    pub revision: u64,
    pub value: T,
}

impl<T> Stamped<T> {
    pub fn is_current(&self, document: &Document) -> bool {
        document.id() == self.document && document.revision() == self.revision
    }
}

pub type WorkerResult = Stamped<Result<AnalyticsOutput>>;

/// Runs analytics requests on the rayon pool and collects their results.
///
/// There is no cancellation: callers drop stale results through
/// [`crate::windows::WindowManager::accept`].
#[derive(Debug)]
pub struct AnalyticsWorker {
    sender: Sender<WorkerResult>,
    receiver: Receiver<WorkerResult>,
}

impl Default for AnalyticsWorker {
    fn default() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self { sender, receiver }
    }
}

impl AnalyticsWorker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submit(&self, snapshot: AnalyticsSnapshot, request: AnalyticsRequest) {
        let sender = self.sender.clone();
        rayon::spawn(move || {
            let result = request.run(&snapshot);
            if sender.send(snapshot.stamp(result)).is_err() {
                log::debug!(
                    "analytics result for {} dropped: worker was shut down",
                    snapshot.document()
                );
            }
        });
    }

    pub fn try_recv(&self) -> Option<WorkerResult> {
        self.receiver.try_recv().ok()
    }

    /// Blocks until the next result arrives.
    ///
    /// The worker holds a sender itself, so with nothing submitted this waits
    /// forever; use [`AnalyticsWorker::recv_timeout`] to bound the wait.
    pub fn recv(&self) -> Option<WorkerResult> {
        self.receiver.recv().ok()
    }

    /// Waits at most `timeout` for the next result.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<WorkerResult> {
        self.receiver.recv_timeout(timeout).ok()
    }
}
