use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use super::domain::{InvestorProfile, ProjectCandidate, RankedCandidate};
use super::explain::explain_match;
use super::scoring::match_candidates;
use crate::remote::{PlatformApi, RemoteError};

/// Ranked candidate with the reasons shown next to it in listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedMatchView {
    pub candidate: ProjectCandidate,
    pub score: u8,
    pub reasons: Vec<String>,
}

impl RankedMatchView {
    pub fn from_ranked(profile: &InvestorProfile, ranked: RankedCandidate) -> Self {
        let reasons = explain_match(profile, &ranked.candidate);
        Self {
            candidate: ranked.candidate,
            score: ranked.score,
            reasons,
        }
    }
}

/// Rank and explain a candidate list against a profile.
pub fn rank_with_reasons(
    profile: &InvestorProfile,
    candidates: Vec<ProjectCandidate>,
    min_score: u8,
) -> Vec<RankedMatchView> {
    match_candidates(profile, candidates, min_score)
        .into_iter()
        .map(|ranked| RankedMatchView::from_ranked(profile, ranked))
        .collect()
}

/// Pulls the signed-in investor's profile and the project listing from the platform API.
pub struct MatchingService<P> {
    api: Arc<P>,
    min_score: u8,
}

impl<P> MatchingService<P>
where
    P: PlatformApi,
{
    pub fn new(api: Arc<P>, min_score: u8) -> Self {
        Self { api, min_score }
    }

    pub fn min_score(&self) -> u8 {
        self.min_score
    }

    pub async fn ranked_projects(&self) -> Result<Vec<RankedMatchView>, RemoteError> {
        let profile = self.api.fetch_investor_profile().await?;
        let projects = self.api.list_projects().await?;
        let total = projects.len();

        let ranked = rank_with_reasons(&profile, projects, self.min_score);
        debug!(
            total,
            kept = ranked.len(),
            min_score = self.min_score,
            "ranked projects"
        );
        Ok(ranked)
    }
}
