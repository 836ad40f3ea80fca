//! Background upload coordinator.
//!
//! One task per field key. `select` synchronously returns the local preview
//! value and spawns the slot request + byte transfer in the background; the
//! caller never blocks. A newer select supersedes the in-flight task via a
//! generation counter, and late resolutions for a superseded generation are
//! dropped silently.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::{broadcast, watch};

use crate::config::UploadConfig;
use crate::error::UploadError;
use crate::services::UploadStore;

use super::task::{UploadStatus, UploadTask};

/// An asset the user picked in the host UI, bytes already read.
#[derive(Debug, Clone)]
pub struct PickedAsset {
    pub local_reference: String,
    pub bytes: Vec<u8>,
}

/// Completion events broadcast to subscribers.
#[derive(Debug, Clone)]
pub enum UploadEvent {
    /// The durable identifier for a field resolved. Fires exactly once per
    /// honored task.
    Resolved {
        field_key: String,
        remote_identifier: String,
    },
    /// A task failed terminally. The local preview stays in place; a
    /// dependent save must stay blocked until a new select succeeds.
    Failed {
        field_key: String,
        error: UploadError,
    },
}

/// Per-field state under one lock.
///
/// Generations are monotonic per field and outlive task entries: discarding
/// a task must not reset the counter, or a late resolution from the
/// discarded transfer could match a fresh task's tag.
#[derive(Default)]
struct FieldTable {
    tasks: HashMap<String, UploadTask>,
    generations: HashMap<String, u64>,
}

struct Inner {
    fields: Mutex<FieldTable>,
    events_tx: broadcast::Sender<UploadEvent>,
    busy_tx: watch::Sender<bool>,
}

impl Inner {
    /// No panicking code runs while the lock is held, so a poisoned mutex
    /// still carries a consistent table.
    fn table(&self) -> MutexGuard<'_, FieldTable> {
        self.fields.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Recompute the OR-aggregate from the live map. Called after every
    /// status transition; never a cached snapshot.
    fn recompute_busy(&self) {
        let busy = self.table().tasks.values().any(|t| t.status.is_busy());
        self.busy_tx.send_if_modified(|current| {
            if *current != busy {
                *current = busy;
                true
            } else {
                false
            }
        });
    }
}

/// Coordinates one background upload per field.
pub struct UploadCoordinator {
    store: Arc<dyn UploadStore>,
    config: UploadConfig,
    inner: Arc<Inner>,
}

impl UploadCoordinator {
    pub fn new(store: Arc<dyn UploadStore>, config: UploadConfig) -> Self {
        let (events_tx, _) = broadcast::channel(config.event_buffer);
        let (busy_tx, _) = watch::channel(false);
        Self {
            store,
            config,
            inner: Arc::new(Inner {
                fields: Mutex::new(FieldTable::default()),
                events_tx,
                busy_tx,
            }),
        }
    }

    /// Start an upload for `field_key`, superseding any in-flight task.
    ///
    /// Returns the local reference synchronously — the caller shows it as
    /// the preview with no latency. The transfer runs in the background and
    /// resolves through the event channel.
    pub fn select(&self, field_key: &str, asset: PickedAsset) -> String {
        let generation = {
            let mut table = self.inner.table();
            let counter = table.generations.entry(field_key.to_string()).or_insert(0);
            *counter += 1;
            let generation = *counter;

            let task = table
                .tasks
                .entry(field_key.to_string())
                .or_insert_with(|| UploadTask::new(asset.local_reference.clone()));
            task.generation = generation;
            task.local_reference = asset.local_reference.clone();
            task.remote_identifier = None;
            task.status = UploadStatus::Uploading;
            generation
        };
        self.inner.recompute_busy();

        let store = self.store.clone();
        let inner = self.inner.clone();
        let timeout = self.config.transfer_timeout;
        let field = field_key.to_string();
        let bytes = asset.bytes;
        tokio::spawn(async move {
            let result = tokio::time::timeout(timeout, async {
                let slot = store.request_slot().await?;
                let remote = store.transfer(&slot, bytes).await?;
                if remote.is_empty() {
                    return Err(UploadError::InvalidIdentifier(
                        "empty identifier".to_string(),
                    ));
                }
                Ok(remote)
            })
            .await
            .unwrap_or(Err(UploadError::Timeout { after: timeout }));

            Self::resolve(&inner, &field, generation, result);
        });

        asset.local_reference
    }

    /// Apply a finished transfer to the field, honoring only the most
    /// recent generation.
    fn resolve(
        inner: &Inner,
        field_key: &str,
        generation: u64,
        result: Result<String, UploadError>,
    ) {
        let event = {
            let mut table = inner.table();
            let Some(task) = table.tasks.get_mut(field_key) else {
                tracing::debug!(field = field_key, "Resolution for a discarded field, dropping");
                return;
            };
            if task.generation != generation {
                tracing::debug!(
                    field = field_key,
                    stale = generation,
                    current = task.generation,
                    "Stale upload resolution, dropping"
                );
                return;
            }
            match result {
                Ok(remote_identifier) => {
                    task.status = UploadStatus::Succeeded;
                    task.remote_identifier = Some(remote_identifier.clone());
                    UploadEvent::Resolved {
                        field_key: field_key.to_string(),
                        remote_identifier,
                    }
                }
                Err(error) => {
                    // The local preview stays visible; only the status flips.
                    task.status = UploadStatus::Failed;
                    tracing::warn!(field = field_key, %error, "Upload failed");
                    UploadEvent::Failed {
                        field_key: field_key.to_string(),
                        error,
                    }
                }
            }
        };
        inner.recompute_busy();
        let _ = inner.events_tx.send(event);
    }

    /// Subscribe to completion events.
    pub fn subscribe(&self) -> broadcast::Receiver<UploadEvent> {
        self.inner.events_tx.subscribe()
    }

    /// Current status for a field (`Idle` if nothing was ever selected).
    pub fn status(&self, field_key: &str) -> UploadStatus {
        self.inner
            .table()
            .tasks
            .get(field_key)
            .map(|t| t.status)
            .unwrap_or_default()
    }

    /// The preview value for a field: the most recent local reference.
    pub fn preview(&self, field_key: &str) -> Option<String> {
        self.inner
            .table()
            .tasks
            .get(field_key)
            .map(|t| t.local_reference.clone())
    }

    /// The resolved durable identifier, if the latest task succeeded.
    pub fn remote_identifier(&self, field_key: &str) -> Option<String> {
        self.inner
            .table()
            .tasks
            .get(field_key)
            .and_then(|t| t.remote_identifier.clone())
    }

    pub fn is_busy(&self, field_key: &str) -> bool {
        self.status(field_key).is_busy()
    }

    /// Logical OR across all tracked fields, recomputed from the live map.
    /// A dependent submit action must be disabled while this is true.
    pub fn any_busy(&self) -> bool {
        self.inner
            .table()
            .tasks
            .values()
            .any(|t| t.status.is_busy())
    }

    /// Watch mirror of `any_busy`, updated on every constituent transition.
    pub fn busy_watch(&self) -> watch::Receiver<bool> {
        self.inner.busy_tx.subscribe()
    }

    /// Drop a field's task, e.g. when the owning form unmounts. The field's
    /// generation counter is kept so a late resolution from the discarded
    /// transfer can never match a later task's tag.
    pub fn discard(&self, field_key: &str) {
        self.inner.table().tasks.remove(field_key);
        self.inner.recompute_busy();
    }
}
