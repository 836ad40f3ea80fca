//! Configuration types.

use std::time::Duration;

/// Upload coordinator configuration.
#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Maximum wall-clock time for one slot request + byte transfer.
    /// Expiry is terminal for the task; retry is a new user-initiated select.
    pub transfer_timeout: Duration,
    /// Capacity of the completion event broadcast channel.
    pub event_buffer: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            transfer_timeout: Duration::from_secs(60), // 1 minute
            event_buffer: 64,
        }
    }
}
