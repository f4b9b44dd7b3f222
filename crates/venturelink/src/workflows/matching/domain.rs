use serde::{Deserialize, Serialize};

/// Declared interests of an investor, as stored on their approved profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvestorProfile {
    pub industries: Vec<String>,
    pub investment_stages: Vec<String>,
    pub geographic_focus: Vec<String>,
}

/// Project listed by a builder, as seen by the scorer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectCandidate {
    pub id: String,
    pub name: String,
    pub categories: Vec<String>,
    pub stage: Option<String>,
    pub location: Option<String>,
}

/// Scoring dimensions and their maximum contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchDimension {
    Industry,
    Stage,
    Geography,
    Baseline,
}

impl MatchDimension {
    pub const fn weight(self) -> u32 {
        match self {
            MatchDimension::Industry => 40,
            MatchDimension::Stage => 30,
            MatchDimension::Geography => 20,
            MatchDimension::Baseline => 10,
        }
    }
}

/// Points earned on one evaluated dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub dimension: MatchDimension,
    pub earned: u32,
    pub weight: u32,
}

/// Final 0-100 score plus the components that made up its denominator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchScore {
    pub score: u8,
    pub components: Vec<ScoreComponent>,
}

impl MatchScore {
    pub fn evaluated_weight(&self) -> u32 {
        self.components.iter().map(|component| component.weight).sum()
    }

    pub fn earned(&self) -> u32 {
        self.components.iter().map(|component| component.earned).sum()
    }
}

/// Candidate that cleared the ranking threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedCandidate {
    pub candidate: ProjectCandidate,
    pub score: u8,
}
