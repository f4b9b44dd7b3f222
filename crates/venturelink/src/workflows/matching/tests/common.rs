use async_trait::async_trait;
use axum::response::Response;
use serde_json::Value;

use crate::remote::{PlatformApi, RemoteError, SubmitReceipt};
use crate::workflows::investor_application::domain::RemoteDraftState;
use crate::workflows::investor_application::payload::ApplicationPayload;
use crate::workflows::matching::domain::{InvestorProfile, ProjectCandidate};

pub(super) fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

pub(super) fn profile(industries: &[&str], stages: &[&str], regions: &[&str]) -> InvestorProfile {
    InvestorProfile {
        industries: tags(industries),
        investment_stages: tags(stages),
        geographic_focus: tags(regions),
    }
}

pub(super) fn candidate(
    id: &str,
    categories: &[&str],
    stage: Option<&str>,
    location: Option<&str>,
) -> ProjectCandidate {
    ProjectCandidate {
        id: id.to_string(),
        name: format!("Project {id}"),
        categories: tags(categories),
        stage: stage.map(str::to_string),
        location: location.map(str::to_string),
    }
}

/// Fintech seed investor focused on Europe.
pub(super) fn focused_profile() -> InvestorProfile {
    profile(&["FinTech"], &["Seed"], &["Europe"])
}

/// Candidates scoring 10, 80, 100, 70 and 80 against [`focused_profile`].
pub(super) fn ranking_pool() -> Vec<ProjectCandidate> {
    vec![
        candidate("off-thesis", &["payments"], Some("Series B"), Some("Asia")),
        candidate("remote-seed", &["fintech"], Some("Seed"), Some("Remote")),
        candidate("berlin-seed", &["fintech"], Some("Seed"), Some("Berlin, Europe")),
        candidate("late-europe", &["fintech"], Some("Series B"), Some("Europe")),
        candidate("remote-seed-2", &["fintech"], Some("Seed"), Some("Remote")),
    ]
}

pub(super) fn ids(ranked: impl IntoIterator<Item = ProjectCandidate>) -> Vec<String> {
    ranked.into_iter().map(|candidate| candidate.id).collect()
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

/// Platform API double that only serves the matching endpoints.
pub(super) struct ListingApi {
    pub(super) profile: Result<InvestorProfile, u16>,
    pub(super) projects: Vec<ProjectCandidate>,
}

#[async_trait]
impl PlatformApi for ListingApi {
    async fn fetch_draft(&self) -> Result<RemoteDraftState, RemoteError> {
        Ok(RemoteDraftState::None)
    }

    async fn create_application(
        &self,
        _payload: &ApplicationPayload,
    ) -> Result<SubmitReceipt, RemoteError> {
        Ok(SubmitReceipt::default())
    }

    async fn update_application(
        &self,
        _payload: &ApplicationPayload,
    ) -> Result<SubmitReceipt, RemoteError> {
        Ok(SubmitReceipt::default())
    }

    async fn fetch_investor_profile(&self) -> Result<InvestorProfile, RemoteError> {
        self.profile.clone().map_err(|status| RemoteError::Status {
            status,
            message: None,
        })
    }

    async fn list_projects(&self) -> Result<Vec<ProjectCandidate>, RemoteError> {
        Ok(self.projects.clone())
    }
}
