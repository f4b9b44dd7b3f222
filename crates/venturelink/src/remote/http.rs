use async_trait::async_trait;
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use super::{decode_envelope, Envelope, PlatformApi, RemoteDraft, RemoteError, SubmitReceipt};
use crate::config::ApiConfig;
use crate::workflows::investor_application::domain::RemoteDraftState;
use crate::workflows::investor_application::payload::ApplicationPayload;
use crate::workflows::matching::domain::{InvestorProfile, ProjectCandidate};

const DRAFT_PATH: &str = "my-request";
const APPLY_PATH: &str = "apply";
const PROFILE_PATH: &str = "investor/profile";
const PROJECTS_PATH: &str = "projects";

/// `reqwest` client for the platform API, authorized with a bearer token when configured.
#[derive(Debug, Clone)]
pub struct HttpPlatformApi {
    client: reqwest::Client,
    base_url: Url,
    token: Option<String>,
}

/// Error bodies only need to carry a message; they need not be full envelopes.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

impl HttpPlatformApi {
    pub fn from_config(config: &ApiConfig) -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("venturelink/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            token: config.token.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, RemoteError> {
        self.base_url
            .join(path)
            .map_err(|source| RemoteError::Endpoint {
                path: path.to_string(),
                source,
            })
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<Envelope<T>, RemoteError> {
        let response = self.authorize(request).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&body)
                .ok()
                .and_then(|body| body.message);
            return Err(RemoteError::Status {
                status: status.as_u16(),
                message,
            });
        }

        decode_envelope(&body)
    }

    async fn send_application(
        &self,
        request: RequestBuilder,
        payload: &ApplicationPayload,
    ) -> Result<SubmitReceipt, RemoteError> {
        let envelope = self
            .execute::<serde_json::Value>(request.json(payload))
            .await?
            .accepted()?;
        Ok(SubmitReceipt {
            message: envelope.message,
        })
    }
}

#[async_trait]
impl PlatformApi for HttpPlatformApi {
    async fn fetch_draft(&self) -> Result<RemoteDraftState, RemoteError> {
        let url = self.endpoint(DRAFT_PATH)?;
        let envelope = match self.execute::<RemoteDraft>(self.client.get(url)).await {
            Ok(envelope) => envelope,
            Err(RemoteError::Status { status, .. })
                if status == StatusCode::NOT_FOUND.as_u16() =>
            {
                debug!("no prior application on record");
                return Ok(RemoteDraftState::None);
            }
            Err(err) => return Err(err),
        };

        Ok(envelope
            .accepted()?
            .data
            .map(RemoteDraft::into_state)
            .unwrap_or(RemoteDraftState::None))
    }

    async fn create_application(
        &self,
        payload: &ApplicationPayload,
    ) -> Result<SubmitReceipt, RemoteError> {
        let url = self.endpoint(APPLY_PATH)?;
        self.send_application(self.client.post(url), payload).await
    }

    async fn update_application(
        &self,
        payload: &ApplicationPayload,
    ) -> Result<SubmitReceipt, RemoteError> {
        let url = self.endpoint(APPLY_PATH)?;
        self.send_application(self.client.put(url), payload).await
    }

    async fn fetch_investor_profile(&self) -> Result<InvestorProfile, RemoteError> {
        let url = self.endpoint(PROFILE_PATH)?;
        self.execute::<InvestorProfile>(self.client.get(url))
            .await?
            .accepted()?
            .require_data()
    }

    async fn list_projects(&self) -> Result<Vec<ProjectCandidate>, RemoteError> {
        let url = self.endpoint(PROJECTS_PATH)?;
        self.execute::<Vec<ProjectCandidate>>(self.client.get(url))
            .await?
            .accepted()?
            .require_data()
    }
}
