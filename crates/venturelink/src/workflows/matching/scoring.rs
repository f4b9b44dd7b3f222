use super::domain::{
    InvestorProfile, MatchDimension, MatchScore, ProjectCandidate, RankedCandidate, ScoreComponent,
};

/// Threshold applied when ranking without an explicit minimum.
pub const DEFAULT_MIN_SCORE: u8 = 30;

/// Case-insensitive containment in either direction. Blank strings never match.
pub(crate) fn loosely_matches(left: &str, right: &str) -> bool {
    let left = left.trim().to_lowercase();
    let right = right.trim().to_lowercase();
    if left.is_empty() || right.is_empty() {
        return false;
    }
    left.contains(&right) || right.contains(&left)
}

pub(crate) fn declared(values: &[String]) -> Vec<&str> {
    values
        .iter()
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .collect()
}

pub(crate) fn present(value: Option<&String>) -> Option<&str> {
    value.map(|value| value.trim()).filter(|value| !value.is_empty())
}

/// Interests that match at least one of the candidate's categories.
pub(crate) fn matched_interests<'a>(interests: &[&'a str], categories: &[&str]) -> Vec<&'a str> {
    interests
        .iter()
        .copied()
        .filter(|interest| {
            categories
                .iter()
                .any(|category| loosely_matches(interest, category))
        })
        .collect()
}

fn round_ratio(numerator: u32, denominator: u32, scale: u32) -> u32 {
    if denominator == 0 {
        return 0;
    }
    (f64::from(scale) * f64::from(numerator) / f64::from(denominator)).round() as u32
}

/// Score one candidate against a profile.
///
/// Dimensions the profile (or candidate) leaves empty are skipped entirely, so the
/// denominator only covers what was evaluated and the scale is relative to the profile.
pub fn score_candidate(profile: &InvestorProfile, candidate: &ProjectCandidate) -> MatchScore {
    let mut components = Vec::with_capacity(4);

    let interests = declared(&profile.industries);
    let categories = declared(&candidate.categories);
    if !interests.is_empty() && !categories.is_empty() {
        let weight = MatchDimension::Industry.weight();
        let matched = matched_interests(&interests, &categories).len() as u32;
        components.push(ScoreComponent {
            dimension: MatchDimension::Industry,
            earned: round_ratio(matched, interests.len() as u32, weight),
            weight,
        });
    }

    let stages = declared(&profile.investment_stages);
    if let Some(stage) = present(candidate.stage.as_ref()) {
        if !stages.is_empty() {
            let weight = MatchDimension::Stage.weight();
            let hit = stages.iter().any(|wanted| loosely_matches(wanted, stage));
            components.push(ScoreComponent {
                dimension: MatchDimension::Stage,
                earned: if hit { weight } else { 0 },
                weight,
            });
        }
    }

    let regions = declared(&profile.geographic_focus);
    if !regions.is_empty() {
        let weight = MatchDimension::Geography.weight();
        let hit = present(candidate.location.as_ref())
            .map(|location| regions.iter().any(|region| loosely_matches(region, location)))
            .unwrap_or(false);
        components.push(ScoreComponent {
            dimension: MatchDimension::Geography,
            earned: if hit { weight } else { 0 },
            weight,
        });
    }

    let baseline = MatchDimension::Baseline.weight();
    components.push(ScoreComponent {
        dimension: MatchDimension::Baseline,
        earned: baseline,
        weight: baseline,
    });

    let earned = components.iter().map(|component| component.earned).sum();
    let evaluated = components.iter().map(|component| component.weight).sum();
    let score = round_ratio(earned, evaluated, 100).min(100) as u8;

    MatchScore { score, components }
}

pub fn calculate_match_score(profile: &InvestorProfile, candidate: &ProjectCandidate) -> u8 {
    score_candidate(profile, candidate).score
}

/// Keep candidates scoring at least `min_score`, best first. Ties keep input order.
pub fn match_candidates<I>(
    profile: &InvestorProfile,
    candidates: I,
    min_score: u8,
) -> Vec<RankedCandidate>
where
    I: IntoIterator<Item = ProjectCandidate>,
{
    let mut ranked: Vec<RankedCandidate> = candidates
        .into_iter()
        .map(|candidate| {
            let score = calculate_match_score(profile, &candidate);
            RankedCandidate { candidate, score }
        })
        .filter(|ranked| ranked.score >= min_score)
        .collect();

    ranked.sort_by(|left, right| right.score.cmp(&left.score));
    ranked
}
