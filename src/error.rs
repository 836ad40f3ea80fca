//! Error types for the onboarding core.

use std::time::Duration;

/// Top-level error type for the onboarding core.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Profile store error: {0}")]
    ProfileStore(#[from] ProfileStoreError),

    #[error("Upload error: {0}")]
    Upload(#[from] UploadError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Errors from the profile storage collaborator.
///
/// Caught at the async call site and converted into a retry-capable state
/// flag; never reaches the router or evaluator, which cannot fail.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProfileStoreError {
    #[error("Profile store unavailable: {0}")]
    Unavailable(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Errors from the upload storage collaborator.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UploadError {
    #[error("Upload slot request failed: {0}")]
    SlotRequest(String),

    #[error("Byte transfer failed: {0}")]
    Transfer(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Upload timed out after {after:?}")]
    Timeout { after: Duration },

    #[error("Storage returned an invalid identifier: {0}")]
    InvalidIdentifier(String),
}

/// Local validation failures. These block the advance action and are never
/// sent to the backend.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("Invalid date of birth: {value}")]
    InvalidDate { value: String },
}

/// Result type alias for the onboarding core.
pub type Result<T> = std::result::Result<T, Error>;
