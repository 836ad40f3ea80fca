//! External collaborators — auth/session, profile storage, upload storage.
//!
//! All are dependency-injected trait objects, never module-level singletons,
//! so hosts and tests can swap backends deterministically.

pub mod http_upload;
pub mod memory;
pub mod traits;

pub use http_upload::HttpUploadStore;
pub use memory::{MemoryProfileStore, MemoryUploadStore};
pub use traits::{ProfileStore, Session, SessionProvider, UploadSlot, UploadStore};
