//! HTTP upload storage backend.
//!
//! Slot protocol: POST to the slot endpoint yields `{"uploadUrl": ...}`;
//! POSTing the asset bytes to that URL yields `{"storageId": ...}`.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::UploadError;

use super::traits::{UploadSlot, UploadStore};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SlotResponse {
    upload_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransferResponse {
    storage_id: String,
}

/// Upload store speaking the JSON slot protocol over HTTP.
pub struct HttpUploadStore {
    client: reqwest::Client,
    slot_endpoint: String,
}

impl HttpUploadStore {
    pub fn new(slot_endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            slot_endpoint: slot_endpoint.into(),
        }
    }
}

/// Classify a response status: auth rejections become `PermissionDenied`,
/// anything else stays in the failing call's own variant.
fn classify_status(
    status: StatusCode,
    detail: String,
    fallback: fn(String) -> UploadError,
) -> UploadError {
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        UploadError::PermissionDenied(detail)
    } else {
        fallback(detail)
    }
}

fn map_http_error(e: reqwest::Error, fallback: fn(String) -> UploadError) -> UploadError {
    match e.status() {
        Some(status) => classify_status(status, e.to_string(), fallback),
        None => fallback(e.to_string()),
    }
}

#[async_trait]
impl UploadStore for HttpUploadStore {
    async fn request_slot(&self) -> Result<UploadSlot, UploadError> {
        let resp = self
            .client
            .post(&self.slot_endpoint)
            .send()
            .await
            .map_err(|e| map_http_error(e, UploadError::SlotRequest))?
            .error_for_status()
            .map_err(|e| map_http_error(e, UploadError::SlotRequest))?;

        let slot: SlotResponse = resp
            .json()
            .await
            .map_err(|e| UploadError::SlotRequest(e.to_string()))?;

        Ok(UploadSlot {
            id: Uuid::new_v4(),
            destination: slot.upload_url,
        })
    }

    async fn transfer(&self, slot: &UploadSlot, bytes: Vec<u8>) -> Result<String, UploadError> {
        let resp = self
            .client
            .post(&slot.destination)
            .body(bytes)
            .send()
            .await
            .map_err(|e| map_http_error(e, UploadError::Transfer))?
            .error_for_status()
            .map_err(|e| map_http_error(e, UploadError::Transfer))?;

        let parsed: TransferResponse = resp
            .json()
            .await
            .map_err(|e| UploadError::InvalidIdentifier(e.to_string()))?;

        if parsed.storage_id.is_empty() {
            return Err(UploadError::InvalidIdentifier(
                "empty storage id".to_string(),
            ));
        }
        Ok(parsed.storage_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_response_parses_camel_case() {
        let parsed: SlotResponse =
            serde_json::from_str(r#"{"uploadUrl": "https://storage.test/slot/1"}"#).unwrap();
        assert_eq!(parsed.upload_url, "https://storage.test/slot/1");
    }

    #[test]
    fn transfer_response_parses_camel_case() {
        let parsed: TransferResponse =
            serde_json::from_str(r#"{"storageId": "st_abc"}"#).unwrap();
        assert_eq!(parsed.storage_id, "st_abc");
    }

    #[test]
    fn slot_status_errors_stay_in_the_slot_variant() {
        let err = classify_status(
            StatusCode::INTERNAL_SERVER_ERROR,
            "500".to_string(),
            UploadError::SlotRequest,
        );
        assert!(matches!(err, UploadError::SlotRequest(_)));
    }

    #[test]
    fn transfer_status_errors_stay_in_the_transfer_variant() {
        let err = classify_status(
            StatusCode::BAD_GATEWAY,
            "502".to_string(),
            UploadError::Transfer,
        );
        assert!(matches!(err, UploadError::Transfer(_)));
    }

    #[test]
    fn auth_rejections_become_permission_denied() {
        for status in [StatusCode::UNAUTHORIZED, StatusCode::FORBIDDEN] {
            let err = classify_status(status, status.to_string(), UploadError::SlotRequest);
            assert!(matches!(err, UploadError::PermissionDenied(_)));
        }
    }
}
