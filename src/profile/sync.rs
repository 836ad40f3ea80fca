//! Profile synchronization against the storage collaborator.
//!
//! Store failures are caught here and converted into a retry-capable status
//! flag; they never reach the router or evaluator. Successful saves publish
//! the merged record on a watch channel, which is what drives reactive
//! route re-evaluation.

use std::sync::Arc;

use tokio::sync::watch;

use crate::services::ProfileStore;

use super::model::{ProfilePatch, ProfileRecord};

/// Host-visible synchronization status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncStatus {
    Idle,
    Loading,
    Ready,
    /// A collaborator call failed; `retry_load` or a new `save` retries.
    Error { message: String },
}

/// Loads and saves one user's profile, publishing changes to subscribers.
pub struct ProfileSync {
    store: Arc<dyn ProfileStore>,
    user_id: String,
    record_tx: watch::Sender<ProfileRecord>,
    status_tx: watch::Sender<SyncStatus>,
}

impl ProfileSync {
    pub fn new(store: Arc<dyn ProfileStore>, user_id: impl Into<String>) -> Self {
        let (record_tx, _) = watch::channel(ProfileRecord::default());
        let (status_tx, _) = watch::channel(SyncStatus::Idle);
        Self {
            store,
            user_id: user_id.into(),
            record_tx,
            status_tx,
        }
    }

    /// Subscribe to the current record. Feeds `RouteWatcher`.
    pub fn subscribe_record(&self) -> watch::Receiver<ProfileRecord> {
        self.record_tx.subscribe()
    }

    /// Subscribe to the synchronization status.
    pub fn subscribe_status(&self) -> watch::Receiver<SyncStatus> {
        self.status_tx.subscribe()
    }

    /// Snapshot of the current record.
    pub fn record(&self) -> ProfileRecord {
        self.record_tx.borrow().clone()
    }

    pub fn status(&self) -> SyncStatus {
        self.status_tx.borrow().clone()
    }

    /// Fetch the record from the store. A missing record leaves the default
    /// (all-absent) record in place; a store failure sets the error status.
    pub async fn load(&self) {
        self.status_tx.send_replace(SyncStatus::Loading);
        match self.store.get_profile(&self.user_id).await {
            Ok(Some(record)) => {
                self.record_tx.send_replace(record);
                self.status_tx.send_replace(SyncStatus::Ready);
            }
            Ok(None) => {
                self.status_tx.send_replace(SyncStatus::Ready);
            }
            Err(e) => {
                tracing::warn!(user_id = %self.user_id, error = %e, "Profile load failed");
                self.status_tx.send_replace(SyncStatus::Error {
                    message: e.to_string(),
                });
            }
        }
    }

    /// Re-run the last load after a failure.
    pub async fn retry_load(&self) {
        self.load().await;
    }

    /// Push a partial update to the store and, on success, merge it into the
    /// published record (triggering route re-evaluation).
    pub async fn save(&self, patch: &ProfilePatch) {
        if patch.is_empty() {
            return;
        }
        match self.store.update_profile(&self.user_id, patch).await {
            Ok(()) => {
                self.record_tx.send_modify(|record| patch.apply(record));
                self.status_tx.send_replace(SyncStatus::Ready);
            }
            Err(e) => {
                tracing::warn!(user_id = %self.user_id, error = %e, "Profile save failed");
                self.status_tx.send_replace(SyncStatus::Error {
                    message: e.to_string(),
                });
            }
        }
    }
}
