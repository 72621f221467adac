use crate::{error::AnalysisError, overlay::ImageSize};
use std::sync::Arc;
use tokio::sync::watch;

#[derive(Debug, Clone, PartialEq)]
enum LoadState {
    Pending,
    Loaded(ImageSize),
    Failed(String),
}

/// One-shot signal for "the displayed image has finished loading".
///
/// Settles at most once: whichever of [`ImageLoad::resolve`] or
/// [`ImageLoad::fail`] comes first wins, later calls are ignored. This lets a
/// view report both an already-cached image and a load event without
/// resolving twice. Clones share the same signal.
#[derive(Debug, Clone)]
pub struct ImageLoad {
    tx: Arc<watch::Sender<LoadState>>,
}

impl ImageLoad {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(LoadState::Pending);
        Self { tx: Arc::new(tx) }
    }

    /// Creates a signal that is already loaded, for cached images.
    pub fn loaded(size: ImageSize) -> Self {
        let load = Self::new();
        load.resolve(size);
        load
    }

    /// Marks the image loaded. Returns `false` if the signal had already settled.
    pub fn resolve(&self, size: ImageSize) -> bool {
        self.settle(LoadState::Loaded(size))
    }

    /// Marks the image failed. Returns `false` if the signal had already settled.
    pub fn fail(&self, reason: impl Into<String>) -> bool {
        self.settle(LoadState::Failed(reason.into()))
    }

    pub fn is_settled(&self) -> bool {
        *self.tx.borrow() != LoadState::Pending
    }

    /// Waits until the signal settles; returns at once if it already has.
    pub async fn wait(&self) -> Result<ImageSize, AnalysisError> {
        let mut rx = self.tx.subscribe();
        let state = rx
            .wait_for(|state| *state != LoadState::Pending)
            .await
            .map_err(|_| AnalysisError::ImageLoad("load signal dropped".to_string()))?;

        match &*state {
            LoadState::Loaded(size) => Ok(*size),
            LoadState::Failed(reason) => Err(AnalysisError::ImageLoad(reason.clone())),
            LoadState::Pending => Err(AnalysisError::ImageLoad("image still pending".to_string())),
        }
    }

    fn settle(&self, next: LoadState) -> bool {
        self.tx.send_if_modified(|state| {
            if *state == LoadState::Pending {
                *state = next;
                true
            } else {
                false
            }
        })
    }
}

impl Default for ImageLoad {
    fn default() -> Self {
        Self::new()
    }
}
