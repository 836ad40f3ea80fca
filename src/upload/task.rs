//! Upload task lifecycle types.

use serde::{Deserialize, Serialize};

/// Status of one field's upload task.
///
/// Transitions idle → uploading on select, then uploading → succeeded or
/// uploading → failed when the network exchange resolves. Both outcomes are
/// terminal; retry is a new user-initiated select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadStatus {
    Idle,
    Uploading,
    Succeeded,
    Failed,
}

impl Default for UploadStatus {
    fn default() -> Self {
        Self::Idle
    }
}

impl UploadStatus {
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Uploading)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

impl std::fmt::Display for UploadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::Uploading => "uploading",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        };
        write!(f, "{s}")
    }
}

/// One field's upload state, tagged with the generation that created it.
///
/// A newer select on the same field bumps the generation; a resolution whose
/// generation no longer matches is stale and must be dropped.
#[derive(Debug, Clone)]
pub struct UploadTask {
    /// Device-local URI, surfaced as the preview immediately on select.
    pub local_reference: String,
    /// Durable remote identifier, set on success.
    pub remote_identifier: Option<String>,
    pub status: UploadStatus,
    pub generation: u64,
}

impl UploadTask {
    pub fn new(local_reference: impl Into<String>) -> Self {
        Self {
            local_reference: local_reference.into(),
            remote_identifier: None,
            status: UploadStatus::Idle,
            generation: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_uploading_is_busy() {
        assert!(UploadStatus::Uploading.is_busy());
        assert!(!UploadStatus::Idle.is_busy());
        assert!(!UploadStatus::Succeeded.is_busy());
        assert!(!UploadStatus::Failed.is_busy());
    }

    #[test]
    fn terminal_statuses() {
        assert!(UploadStatus::Succeeded.is_terminal());
        assert!(UploadStatus::Failed.is_terminal());
        assert!(!UploadStatus::Idle.is_terminal());
        assert!(!UploadStatus::Uploading.is_terminal());
    }

    #[test]
    fn display_matches_serde() {
        for status in [
            UploadStatus::Idle,
            UploadStatus::Uploading,
            UploadStatus::Succeeded,
            UploadStatus::Failed,
        ] {
            let display = format!("{status}");
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(format!("\"{display}\""), json);
        }
    }

    #[test]
    fn new_task_starts_idle() {
        let task = UploadTask::new("file:///tmp/a.jpg");
        assert_eq!(task.status, UploadStatus::Idle);
        assert_eq!(task.generation, 0);
        assert!(task.remote_identifier.is_none());
    }
}
