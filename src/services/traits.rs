//! Backend-agnostic collaborator traits.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::{ProfileStoreError, UploadError};
use crate::profile::{ProfilePatch, ProfileRecord};

/// An authenticated session as reported by the host auth provider.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: String,
    pub display_name: Option<String>,
}

/// Auth/session provider. Absence of a session means unauthenticated; the
/// core defers to the host to redirect away.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn current_session(&self) -> Option<Session>;
}

/// Profile storage service.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fetch a user's profile record, if one exists.
    async fn get_profile(&self, user_id: &str)
        -> Result<Option<ProfileRecord>, ProfileStoreError>;

    /// Apply a partial update to a user's profile record.
    async fn update_profile(
        &self,
        user_id: &str,
        patch: &ProfilePatch,
    ) -> Result<(), ProfileStoreError>;
}

/// Single-use upload destination handle.
#[derive(Debug, Clone)]
pub struct UploadSlot {
    pub id: Uuid,
    pub destination: String,
}

/// Upload storage service.
#[async_trait]
pub trait UploadStore: Send + Sync {
    /// Request a single-use upload destination.
    async fn request_slot(&self) -> Result<UploadSlot, UploadError>;

    /// Transfer asset bytes to a slot, returning the durable remote
    /// identifier on success.
    async fn transfer(&self, slot: &UploadSlot, bytes: Vec<u8>) -> Result<String, UploadError>;
}
