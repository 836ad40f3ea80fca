//! Profile record, completeness evaluation, and store synchronization.

pub mod completeness;
pub mod model;
pub mod sync;

pub use completeness::Completeness;
pub use model::{FieldGroup, ImageRef, ProfilePatch, ProfileRecord};
pub use sync::{ProfileSync, SyncStatus};
