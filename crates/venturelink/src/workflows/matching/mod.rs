//! Builder/investor compatibility scoring.

pub mod domain;
mod explain;
pub mod import;
pub mod router;
mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    InvestorProfile, MatchDimension, MatchScore, ProjectCandidate, RankedCandidate,
    ScoreComponent,
};
pub use explain::explain_match;
pub use import::{ProjectCsvImporter, ProjectImportError};
pub use router::matching_router;
pub use scoring::{calculate_match_score, match_candidates, score_candidate, DEFAULT_MIN_SCORE};
pub use service::{rank_with_reasons, MatchingService, RankedMatchView};
