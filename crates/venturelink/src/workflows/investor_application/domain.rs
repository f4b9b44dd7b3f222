use serde::{Deserialize, Serialize};

use super::coerce;

/// Investor application assembled across the wizard steps.
///
/// Every field has an empty default so a partially filled record is always structurally
/// complete; emptiness only matters when a step is validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DraftRecord {
    // Basics
    #[serde(rename = "type", deserialize_with = "coerce::text")]
    pub investor_type: String,
    #[serde(deserialize_with = "coerce::text")]
    pub name: String,
    #[serde(deserialize_with = "coerce::text")]
    pub firm: String,
    #[serde(deserialize_with = "coerce::text")]
    pub location: String,
    #[serde(deserialize_with = "coerce::text")]
    pub linkedin_url: String,
    #[serde(deserialize_with = "coerce::optional_text")]
    pub website_url: Option<String>,

    // Focus
    #[serde(deserialize_with = "coerce::tags")]
    pub investment_stages: Vec<String>,
    #[serde(deserialize_with = "coerce::tags")]
    pub industries: Vec<String>,
    #[serde(deserialize_with = "coerce::tags")]
    pub geographic_focus: Vec<String>,

    // About
    #[serde(deserialize_with = "coerce::text")]
    pub bio: String,
    #[serde(deserialize_with = "coerce::text")]
    pub why_join: String,
    #[serde(deserialize_with = "coerce::text")]
    pub investment_thesis: String,

    // Track record
    #[serde(deserialize_with = "coerce::deal_count")]
    pub deals_count: Option<DealCount>,
    #[serde(deserialize_with = "coerce::portfolio")]
    pub portfolio: Vec<PortfolioEntry>,
    #[serde(deserialize_with = "coerce::text")]
    pub ticket_size_min: String,
    #[serde(deserialize_with = "coerce::text")]
    pub ticket_size_max: String,

    // Value add and visibility
    #[serde(deserialize_with = "coerce::tags")]
    pub value_add: Vec<String>,
    #[serde(deserialize_with = "coerce::text")]
    pub expertise: String,
    #[serde(deserialize_with = "coerce::flag")]
    pub is_public: bool,
    #[serde(deserialize_with = "coerce::flag")]
    pub open_to_pitches: bool,
    #[serde(deserialize_with = "coerce::optional_text")]
    pub calendly_url: Option<String>,
    #[serde(deserialize_with = "coerce::optional_text")]
    pub twitter_url: Option<String>,

    #[serde(deserialize_with = "coerce::plan")]
    pub plan: Option<InvestorPlan>,
}

impl DraftRecord {
    /// Toggle membership of `value` in one of the multi-select focus sets.
    pub fn toggle_focus(&mut self, field: FocusField, value: &str) {
        let set = match field {
            FocusField::Stages => &mut self.investment_stages,
            FocusField::Industries => &mut self.industries,
            FocusField::Geography => &mut self.geographic_focus,
            FocusField::ValueAdd => &mut self.value_add,
        };
        toggle(set, value);
    }
}

fn toggle(set: &mut Vec<String>, value: &str) {
    let value = value.trim();
    if value.is_empty() {
        return;
    }
    if let Some(position) = set.iter().position(|existing| existing == value) {
        set.remove(position);
    } else {
        set.push(value.to_string());
    }
}

/// Multi-select sets that behave like checkbox groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusField {
    Stages,
    Industries,
    Geography,
    ValueAdd,
}

/// Prior investment captured on the track-record step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioEntry {
    pub name: String,
    pub category: String,
    pub year: String,
}

/// Bucketed count of deals the investor has closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DealCount {
    #[serde(rename = "0")]
    None,
    #[serde(rename = "1-5")]
    Few,
    #[serde(rename = "6-15")]
    Several,
    #[serde(rename = "16-50")]
    Many,
    #[serde(rename = "50+")]
    Prolific,
}

impl DealCount {
    pub const ALL: [DealCount; 5] = [
        DealCount::None,
        DealCount::Few,
        DealCount::Several,
        DealCount::Many,
        DealCount::Prolific,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            DealCount::None => "0",
            DealCount::Few => "1-5",
            DealCount::Several => "6-15",
            DealCount::Many => "16-50",
            DealCount::Prolific => "50+",
        }
    }

    pub fn from_label(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL.into_iter().find(|bucket| bucket.label() == raw)
    }
}

/// Listing plan chosen before the first submission. Fixed once approved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvestorPlan {
    #[default]
    Basic,
    Featured,
}

impl InvestorPlan {
    pub const fn label(self) -> &'static str {
        match self {
            InvestorPlan::Basic => "basic",
            InvestorPlan::Featured => "featured",
        }
    }

    pub fn from_label(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "basic" | "free" => Some(InvestorPlan::Basic),
            "featured" | "premium" => Some(InvestorPlan::Featured),
            _ => None,
        }
    }
}

/// Review status of the most recent submission held by the remote store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteDraftState {
    None,
    Pending(DraftRecord),
    Approved(DraftRecord),
}

impl RemoteDraftState {
    pub const fn label(&self) -> &'static str {
        match self {
            RemoteDraftState::None => "none",
            RemoteDraftState::Pending(_) => "pending",
            RemoteDraftState::Approved(_) => "approved",
        }
    }
}

/// Whether the submit issues a create or an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionMode {
    New,
    Edit,
}
