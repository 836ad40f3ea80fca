//! Background upload coordination — per-field fire-and-forget transfers
//! with immediate local previews and stale-result suppression.

pub mod coordinator;
pub mod task;

pub use coordinator::{PickedAsset, UploadCoordinator, UploadEvent};
pub use task::{UploadStatus, UploadTask};
