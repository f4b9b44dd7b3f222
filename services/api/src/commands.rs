use crate::infra::ConsoleNotifier;
use clap::Args;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use venturelink::config::AppConfig;
use venturelink::error::AppError;
use venturelink::remote::HttpPlatformApi;
use venturelink::storage::MemoryStore;
use venturelink::telemetry;
use venturelink::workflows::investor_application::{
    DraftRecord, InvestorApplicationService, StepOutcome, SubmitOutcome, ValidationErrors, Wizard,
    WizardEvent, WizardStep,
};
use venturelink::workflows::matching::{
    rank_with_reasons, score_candidate, InvestorProfile, ProjectCsvImporter, RankedMatchView,
};

#[derive(Args, Debug)]
pub(crate) struct MatchArgs {
    /// Investor profile as JSON (industries, investment_stages, geographic_focus)
    #[arg(long)]
    pub(crate) profile: PathBuf,
    /// Project CSV with columns id,name,categories,stage,location
    #[arg(long)]
    pub(crate) projects: PathBuf,
    /// Minimum score to keep (defaults to APP_MATCH_MIN_SCORE)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub(crate) min_score: Option<u8>,
    /// Print the per-dimension breakdown under each match
    #[arg(long)]
    pub(crate) explain: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ApplyArgs {
    /// Draft record as JSON, in the same shape the platform stores it
    #[arg(long)]
    pub(crate) draft: PathBuf,
    /// Update an existing submission instead of creating one
    #[arg(long)]
    pub(crate) edit: bool,
}

pub(crate) fn run_match(args: MatchArgs) -> Result<(), AppError> {
    let MatchArgs {
        profile,
        projects,
        min_score,
        explain,
    } = args;

    let min_score = match min_score {
        Some(min_score) => min_score,
        None => AppConfig::load()?.matching.min_score,
    };
    let profile = load_profile(&profile)?;
    let projects = ProjectCsvImporter::from_path(&projects)?;
    let total = projects.len();

    let matches = rank_with_reasons(&profile, projects, min_score);
    print!(
        "{}",
        render_matches(&profile, &matches, total, min_score, explain)
    );
    Ok(())
}

pub(crate) async fn run_apply(args: ApplyArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry, config.environment)?;

    let record: DraftRecord = serde_json::from_str(&fs::read_to_string(&args.draft)?)?;
    let mut wizard = if args.edit {
        Wizard::editing(record)
    } else {
        let mut wizard = Wizard::new();
        wizard.record = record;
        wizard
    };

    let api = Arc::new(HttpPlatformApi::from_config(&config.api)?);
    let service = InvestorApplicationService::new(
        api,
        Arc::new(ConsoleNotifier),
        Arc::new(MemoryStore::default()),
    );
    info!(base_url = %config.api.base_url, edit = args.edit, "walking investor application");

    for _ in WizardStep::ALL {
        match service.dispatch(&mut wizard, WizardEvent::Advance).await {
            StepOutcome::Moved { .. } | StepOutcome::Stayed(_) => continue,
            StepOutcome::Invalid(errors) => {
                print!("{}", render_step_errors(wizard.step(), &errors));
                return Ok(());
            }
            StepOutcome::Submitted(SubmitOutcome::Incomplete { step, errors }) => {
                print!("{}", render_step_errors(step, &errors));
                return Ok(());
            }
            StepOutcome::Submitted(outcome) => {
                info!(?outcome, "investor application finished");
                return Ok(());
            }
        }
    }
    Ok(())
}

fn load_profile(path: &Path) -> Result<InvestorProfile, AppError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

pub(crate) fn render_matches(
    profile: &InvestorProfile,
    matches: &[RankedMatchView],
    total: usize,
    min_score: u8,
    explain: bool,
) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Matched {} of {} projects (min score {})",
        matches.len(),
        total,
        min_score
    );

    for view in matches {
        let _ = writeln!(
            out,
            "{:>4}  {}  {}",
            view.score, view.candidate.id, view.candidate.name
        );
        for reason in &view.reasons {
            let _ = writeln!(out, "      - {reason}");
        }
        if explain {
            let breakdown = score_candidate(profile, &view.candidate)
                .components
                .iter()
                .map(|component| {
                    format!(
                        "{:?} {}/{}",
                        component.dimension, component.earned, component.weight
                    )
                    .to_lowercase()
                })
                .collect::<Vec<_>>()
                .join(", ");
            let _ = writeln!(out, "      = {breakdown}");
        }
    }
    out
}

pub(crate) fn render_step_errors(step: WizardStep, errors: &ValidationErrors) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Step {} ({}) needs attention:",
        step.number(),
        step.title()
    );
    for (field, message) in errors.iter() {
        let _ = writeln!(out, "  - {field}: {message}");
    }
    out
}
