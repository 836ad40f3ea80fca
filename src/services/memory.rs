//! In-memory collaborator backends for hosts and deterministic tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{ProfileStoreError, UploadError};
use crate::profile::{ProfilePatch, ProfileRecord};

use super::traits::{ProfileStore, UploadSlot, UploadStore};

/// Profile store backed by a map, with failure injection.
#[derive(Default)]
pub struct MemoryProfileStore {
    profiles: RwLock<HashMap<String, ProfileRecord>>,
    unavailable: AtomicBool,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// When set, every call fails with `ProfileStoreError::Unavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Seed a profile record directly.
    pub async fn insert(&self, user_id: &str, record: ProfileRecord) {
        self.profiles
            .write()
            .await
            .insert(user_id.to_string(), record);
    }

    fn check_available(&self) -> Result<(), ProfileStoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(ProfileStoreError::Unavailable(
                "injected outage".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn get_profile(
        &self,
        user_id: &str,
    ) -> Result<Option<ProfileRecord>, ProfileStoreError> {
        self.check_available()?;
        Ok(self.profiles.read().await.get(user_id).cloned())
    }

    async fn update_profile(
        &self,
        user_id: &str,
        patch: &ProfilePatch,
    ) -> Result<(), ProfileStoreError> {
        self.check_available()?;
        let mut profiles = self.profiles.write().await;
        let record = profiles.entry(user_id.to_string()).or_default();
        patch.apply(record);
        Ok(())
    }
}

/// Upload store backed by a counter, with configurable delay and failure
/// injection.
#[derive(Default)]
pub struct MemoryUploadStore {
    counter: AtomicU64,
    transfer_delay: RwLock<Duration>,
    fail_transfers: AtomicBool,
    deny_permission: AtomicBool,
}

impl MemoryUploadStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every transfer sleep for `delay` before resolving.
    pub async fn set_transfer_delay(&self, delay: Duration) {
        *self.transfer_delay.write().await = delay;
    }

    /// When set, transfers fail with `UploadError::Transfer`.
    pub fn set_fail_transfers(&self, fail: bool) {
        self.fail_transfers.store(fail, Ordering::SeqCst);
    }

    /// When set, transfers fail with `UploadError::PermissionDenied`.
    pub fn set_deny_permission(&self, deny: bool) {
        self.deny_permission.store(deny, Ordering::SeqCst);
    }

    /// Number of transfers that resolved successfully.
    pub fn completed_transfers(&self) -> u64 {
        self.counter.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UploadStore for MemoryUploadStore {
    async fn request_slot(&self) -> Result<UploadSlot, UploadError> {
        let id = Uuid::new_v4();
        Ok(UploadSlot {
            id,
            destination: format!("mem://{id}"),
        })
    }

    async fn transfer(&self, _slot: &UploadSlot, _bytes: Vec<u8>) -> Result<String, UploadError> {
        let delay = *self.transfer_delay.read().await;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        if self.deny_permission.load(Ordering::SeqCst) {
            return Err(UploadError::PermissionDenied(
                "injected denial".to_string(),
            ));
        }
        if self.fail_transfers.load(Ordering::SeqCst) {
            return Err(UploadError::Transfer("injected failure".to_string()));
        }
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        Ok(format!("st_{n}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn profile_store_roundtrip() {
        let store = MemoryProfileStore::new();
        assert!(store.get_profile("u1").await.unwrap().is_none());

        let patch = ProfilePatch {
            first_name: Some("Amina".to_string()),
            ..Default::default()
        };
        store.update_profile("u1", &patch).await.unwrap();

        let record = store.get_profile("u1").await.unwrap().unwrap();
        assert_eq!(record.first_name.as_deref(), Some("Amina"));
    }

    #[tokio::test]
    async fn profile_store_outage_is_recoverable() {
        let store = MemoryProfileStore::new();
        store.set_unavailable(true);
        assert!(matches!(
            store.get_profile("u1").await,
            Err(ProfileStoreError::Unavailable(_))
        ));
        store.set_unavailable(false);
        assert!(store.get_profile("u1").await.is_ok());
    }

    #[tokio::test]
    async fn upload_store_issues_sequential_identifiers() {
        let store = MemoryUploadStore::new();
        let slot = store.request_slot().await.unwrap();
        assert_eq!(store.transfer(&slot, vec![1]).await.unwrap(), "st_0");
        let slot = store.request_slot().await.unwrap();
        assert_eq!(store.transfer(&slot, vec![2]).await.unwrap(), "st_1");
        assert_eq!(store.completed_transfers(), 2);
    }

    #[tokio::test]
    async fn upload_store_failure_injection() {
        let store = MemoryUploadStore::new();
        let slot = store.request_slot().await.unwrap();

        store.set_fail_transfers(true);
        assert!(matches!(
            store.transfer(&slot, vec![]).await,
            Err(UploadError::Transfer(_))
        ));

        store.set_fail_transfers(false);
        store.set_deny_permission(true);
        assert!(matches!(
            store.transfer(&slot, vec![]).await,
            Err(UploadError::PermissionDenied(_))
        ));
    }
}
