use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use super::domain::DraftRecord;
use super::wizard::WizardStep;

/// Single message surfaced alongside the inline field errors.
pub const VALIDATION_NOTICE: &str = "Please fix the highlighted fields before continuing";

pub const MIN_BIO_CHARS: usize = 50;
pub const MIN_WHY_JOIN_CHARS: usize = 30;

/// Field-scoped validation failures keyed by the draft field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(transparent)]
#[error("{} field(s) failed validation", .0.len())]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.insert(field, message);
        errors
    }

    pub fn insert(&mut self, field: &str, message: impl Into<String>) {
        self.0.insert(field.to_string(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|(field, message)| (field.as_str(), message.as_str()))
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

fn linkedin_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^https?://(www\.)?linkedin\.com/(in|company)/[A-Za-z0-9_-]+/?$")
            .expect("linkedin pattern compiles")
    })
}

/// Accepts personal (`/in/`) and company (`/company/`) profile links only.
pub fn is_valid_linkedin_url(raw: &str) -> bool {
    linkedin_pattern().is_match(raw.trim())
}

/// Step-local rules. Steps without hard constraints always pass.
pub fn validate_step(step: WizardStep, record: &DraftRecord) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    match step {
        WizardStep::Basics => check_basics(record, &mut errors),
        WizardStep::Focus => check_focus(record, &mut errors),
        WizardStep::About => check_about(record, &mut errors),
        WizardStep::TrackRecord => {
            if record.deals_count.is_none() {
                errors.insert("deals_count", "Select how many deals you have made");
            }
        }
        WizardStep::ValueAdd | WizardStep::Review => {}
    }

    errors.into_result()
}

fn check_basics(record: &DraftRecord, errors: &mut ValidationErrors) {
    if record.location.trim().is_empty() {
        errors.insert("location", "Location is required");
    }

    let linkedin = record.linkedin_url.trim();
    if linkedin.is_empty() {
        errors.insert("linkedin_url", "LinkedIn profile URL is required");
    } else if !is_valid_linkedin_url(linkedin) {
        errors.insert(
            "linkedin_url",
            "Enter a valid LinkedIn URL (https://linkedin.com/in/your-name or /company/your-firm)",
        );
    }
}

fn check_focus(record: &DraftRecord, errors: &mut ValidationErrors) {
    if record.investment_stages.is_empty() {
        errors.insert("investment_stages", "Select at least one investment stage");
    }
    if record.industries.is_empty() {
        errors.insert("industries", "Select at least one industry");
    }
    if record.geographic_focus.is_empty() {
        errors.insert("geographic_focus", "Select at least one region");
    }
}

fn check_about(record: &DraftRecord, errors: &mut ValidationErrors) {
    check_min_length(errors, "bio", "Bio", &record.bio, MIN_BIO_CHARS);
    check_min_length(
        errors,
        "why_join",
        "Reason for joining",
        &record.why_join,
        MIN_WHY_JOIN_CHARS,
    );
}

fn check_min_length(
    errors: &mut ValidationErrors,
    field: &str,
    label: &str,
    value: &str,
    minimum: usize,
) {
    let length = value.trim().chars().count();
    if length == 0 {
        errors.insert(field, format!("{label} is required"));
    } else if length < minimum {
        errors.insert(
            field,
            format!("{label} must be at least {minimum} characters ({length} so far)"),
        );
    }
}
