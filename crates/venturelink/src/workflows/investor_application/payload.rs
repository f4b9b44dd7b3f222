use serde::Serialize;
use tracing::debug;

use super::domain::{DraftRecord, InvestorPlan, PortfolioEntry};

/// Body sent to `POST /apply` and `PUT /apply`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationPayload {
    #[serde(rename = "type")]
    pub investor_type: String,
    /// Omitted from updates that never learned the stored plan.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<InvestorPlan>,
    pub name: String,
    pub firm: String,
    pub location: String,
    pub linkedin_url: String,
    pub website_url: Option<String>,
    pub investment_stages: Vec<String>,
    pub industries: Vec<String>,
    pub geographic_focus: Vec<String>,
    pub bio: String,
    pub why_join: String,
    pub investment_thesis: String,
    pub deals_count: Option<&'static str>,
    pub portfolio: Vec<PortfolioEntry>,
    pub ticket_size_min: Option<u64>,
    pub ticket_size_max: Option<u64>,
    pub value_add: Vec<String>,
    pub expertise: String,
    pub is_public: bool,
    pub open_to_pitches: bool,
    pub calendly_url: Option<String>,
    pub twitter_url: Option<String>,
}

impl ApplicationPayload {
    /// Body for a new application; an unselected plan goes out as basic.
    pub fn from_record(record: &DraftRecord) -> Self {
        Self {
            plan: Some(record.plan.unwrap_or_default()),
            ..Self::for_update(record)
        }
    }

    /// Body for an update; the plan is only sent when the record carries one.
    pub fn for_update(record: &DraftRecord) -> Self {
        let investor_type = if record.investor_type.trim().is_empty() {
            "individual".to_string()
        } else {
            record.investor_type.trim().to_string()
        };

        Self {
            investor_type,
            plan: record.plan,
            name: record.name.trim().to_string(),
            firm: record.firm.trim().to_string(),
            location: record.location.trim().to_string(),
            linkedin_url: record.linkedin_url.trim().to_string(),
            website_url: record.website_url.clone(),
            investment_stages: record.investment_stages.clone(),
            industries: record.industries.clone(),
            geographic_focus: record.geographic_focus.clone(),
            bio: record.bio.trim().to_string(),
            why_join: record.why_join.trim().to_string(),
            investment_thesis: record.investment_thesis.trim().to_string(),
            deals_count: record.deals_count.map(|bucket| bucket.label()),
            portfolio: record.portfolio.clone(),
            ticket_size_min: coerce_amount("ticket_size_min", &record.ticket_size_min),
            ticket_size_max: coerce_amount("ticket_size_max", &record.ticket_size_max),
            value_add: record.value_add.clone(),
            expertise: record.expertise.trim().to_string(),
            is_public: record.is_public,
            open_to_pitches: record.open_to_pitches,
            calendly_url: record.calendly_url.clone(),
            twitter_url: record.twitter_url.clone(),
        }
    }
}

/// Integer amount typed into a free-text box. Blank or non-numeric input is unset, not zero.
pub fn parse_amount(raw: &str) -> Option<u64> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|ch| !matches!(ch, ',' | '_' | ' '))
        .collect();

    let (whole, fraction) = match cleaned.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (cleaned.as_str(), ""),
    };

    if whole.is_empty() || !fraction.chars().all(|ch| ch.is_ascii_digit()) {
        return None;
    }
    whole.parse::<u64>().ok()
}

fn coerce_amount(field: &str, raw: &str) -> Option<u64> {
    let parsed = parse_amount(raw);
    if parsed.is_none() && !raw.trim().is_empty() {
        debug!(field, raw, "dropping non-numeric amount");
    }
    parsed
}
