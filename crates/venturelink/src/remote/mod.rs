//! Contract with the platform's JSON API.
//!
//! Every response is wrapped in the same envelope:
//!
//! ```json
//! { "status": "success", "message": "optional", "data": <payload or null> }
//! ```
//!
//! Anything that does not decode into that shape is a [`RemoteError::MalformedPayload`].

mod http;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::workflows::investor_application::domain::{DraftRecord, RemoteDraftState};
use crate::workflows::investor_application::payload::ApplicationPayload;
use crate::workflows::matching::domain::{InvestorProfile, ProjectCandidate};

pub use http::HttpPlatformApi;

pub const SUCCESS_STATUS: &str = "success";

/// Remote operations the wizard and the matching flow depend on.
#[async_trait]
pub trait PlatformApi: Send + Sync {
    async fn fetch_draft(&self) -> Result<RemoteDraftState, RemoteError>;
    async fn create_application(
        &self,
        payload: &ApplicationPayload,
    ) -> Result<SubmitReceipt, RemoteError>;
    async fn update_application(
        &self,
        payload: &ApplicationPayload,
    ) -> Result<SubmitReceipt, RemoteError>;
    async fn fetch_investor_profile(&self) -> Result<InvestorProfile, RemoteError>;
    async fn list_projects(&self) -> Result<Vec<ProjectCandidate>, RemoteError>;
}

/// Tagged response wrapper shared by every endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: serde::Deserialize<'de>"))]
pub struct Envelope<T> {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn is_success(&self) -> bool {
        self.status.eq_ignore_ascii_case(SUCCESS_STATUS)
    }

    /// Fail with [`RemoteError::Rejected`] unless the status is `success`.
    pub fn accepted(self) -> Result<Self, RemoteError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(RemoteError::Rejected {
                status: self.status,
                message: self.message,
            })
        }
    }

    pub fn require_data(self) -> Result<T, RemoteError> {
        self.data
            .ok_or_else(|| RemoteError::MalformedPayload("envelope is missing `data`".to_string()))
    }
}

/// Strictly decode an envelope; a shape mismatch is reported, never probed around.
pub fn decode_envelope<T: DeserializeOwned>(body: &[u8]) -> Result<Envelope<T>, RemoteError> {
    serde_json::from_slice(body).map_err(|err| RemoteError::MalformedPayload(err.to_string()))
}

/// Payload of `GET my-request`: the review status next to the stored draft fields.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteDraft {
    #[serde(default)]
    pub status: String,
    #[serde(flatten)]
    pub record: DraftRecord,
}

impl RemoteDraft {
    /// Unknown review statuses (e.g. `rejected`) start a fresh application.
    pub fn into_state(self) -> RemoteDraftState {
        match self.status.trim().to_ascii_lowercase().as_str() {
            "pending" => RemoteDraftState::Pending(self.record),
            "approved" => RemoteDraftState::Approved(self.record),
            _ => RemoteDraftState::None,
        }
    }
}

/// Acknowledgement returned by create/update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitReceipt {
    pub message: Option<String>,
}

/// Failures talking to the platform API.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid endpoint path `{path}`: {source}")]
    Endpoint {
        path: String,
        source: url::ParseError,
    },
    #[error("server responded with HTTP {status}{}", .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    Status { status: u16, message: Option<String> },
    #[error("server rejected the request with status `{status}`{}", .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    Rejected {
        status: String,
        message: Option<String>,
    },
    #[error("malformed response payload: {0}")]
    MalformedPayload(String),
}

impl RemoteError {
    /// Message written by the server for the end user, if it sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            RemoteError::Status { message, .. } | RemoteError::Rejected { message, .. } => message
                .as_deref()
                .map(str::trim)
                .filter(|message| !message.is_empty()),
            _ => None,
        }
    }
}
