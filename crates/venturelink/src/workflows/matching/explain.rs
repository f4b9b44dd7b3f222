use super::domain::{InvestorProfile, ProjectCandidate};
use super::scoring::{declared, loosely_matches, matched_interests, present};

/// Human-readable reasons, one per matched dimension.
///
/// Recomputed from the same matching rule as the score but never from the score itself;
/// the baseline points carry no reason, so a non-zero score can come with no lines.
pub fn explain_match(profile: &InvestorProfile, candidate: &ProjectCandidate) -> Vec<String> {
    let mut reasons = Vec::new();

    let interests = declared(&profile.industries);
    let categories = declared(&candidate.categories);
    let matched = matched_interests(&interests, &categories);
    if !matched.is_empty() {
        reasons.push(format!("Industry match: {}", matched.join(", ")));
    }

    if let Some(stage) = present(candidate.stage.as_ref()) {
        if let Some(wanted) = declared(&profile.investment_stages)
            .into_iter()
            .find(|wanted| loosely_matches(wanted, stage))
        {
            reasons.push(format!("Stage match: {stage} fits your {wanted} focus"));
        }
    }

    if let Some(location) = present(candidate.location.as_ref()) {
        if let Some(region) = declared(&profile.geographic_focus)
            .into_iter()
            .find(|region| loosely_matches(region, location))
        {
            reasons.push(format!("Location match: {location} is within {region}"));
        }
    }

    reasons
}
