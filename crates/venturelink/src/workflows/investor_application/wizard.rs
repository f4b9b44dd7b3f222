use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{DraftRecord, InvestorPlan, PortfolioEntry, SubmissionMode};
use super::track_record;
use super::validation::{validate_step, ValidationErrors};

/// Fixed, linear sequence of wizard steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Basics,
    Focus,
    About,
    TrackRecord,
    ValueAdd,
    Review,
}

impl WizardStep {
    pub const ALL: [WizardStep; 6] = [
        WizardStep::Basics,
        WizardStep::Focus,
        WizardStep::About,
        WizardStep::TrackRecord,
        WizardStep::ValueAdd,
        WizardStep::Review,
    ];

    pub const FIRST: WizardStep = WizardStep::Basics;
    pub const LAST: WizardStep = WizardStep::Review;

    /// 1-based position shown on the step rail.
    pub const fn number(self) -> usize {
        match self {
            WizardStep::Basics => 1,
            WizardStep::Focus => 2,
            WizardStep::About => 3,
            WizardStep::TrackRecord => 4,
            WizardStep::ValueAdd => 5,
            WizardStep::Review => 6,
        }
    }

    pub fn from_number(number: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|step| step.number() == number)
    }

    pub const fn slug(self) -> &'static str {
        match self {
            WizardStep::Basics => "basics",
            WizardStep::Focus => "focus",
            WizardStep::About => "about",
            WizardStep::TrackRecord => "track_record",
            WizardStep::ValueAdd => "value_add",
            WizardStep::Review => "review",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            WizardStep::Basics => "Basics",
            WizardStep::Focus => "Investment Focus",
            WizardStep::About => "About You",
            WizardStep::TrackRecord => "Track Record",
            WizardStep::ValueAdd => "Value Add & Visibility",
            WizardStep::Review => "Review",
        }
    }

    /// Accepts either the step number or its slug.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if let Ok(number) = raw.parse::<usize>() {
            return Self::from_number(number);
        }
        Self::ALL
            .into_iter()
            .find(|step| step.slug().eq_ignore_ascii_case(raw))
    }

    pub fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    pub fn previous(self) -> Option<Self> {
        self.number().checked_sub(1).and_then(Self::from_number)
    }
}

/// Inputs accepted by the wizard state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardEvent {
    Advance,
    Retreat,
    JumpTo(WizardStep),
}

/// Result of applying an event that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Moved { from: WizardStep, to: WizardStep },
    Stayed(WizardStep),
    /// Advance was accepted on the terminal step; the caller owns the submit.
    SubmitRequested,
}

/// Ephemeral UI state of one pass through the wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardSession {
    step: WizardStep,
    validation_errors: ValidationErrors,
    mode: SubmissionMode,
    is_submitting: bool,
}

impl WizardSession {
    pub fn new(mode: SubmissionMode) -> Self {
        Self {
            step: WizardStep::FIRST,
            validation_errors: ValidationErrors::new(),
            mode,
            is_submitting: false,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn validation_errors(&self) -> &ValidationErrors {
        &self.validation_errors
    }

    pub fn mode(&self) -> SubmissionMode {
        self.mode
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    /// Single entry point for step navigation.
    ///
    /// Events are ignored while a submit is in flight. Forward moves are gated on the
    /// current step's rules; a failure records the errors and keeps the step.
    pub fn transition(
        &mut self,
        event: WizardEvent,
        record: &DraftRecord,
    ) -> Result<Transition, ValidationErrors> {
        if self.is_submitting {
            debug!(?event, "ignoring wizard event while submitting");
            return Ok(Transition::Stayed(self.step));
        }

        match event {
            WizardEvent::Advance => self.advance(record),
            WizardEvent::Retreat => Ok(self.retreat()),
            WizardEvent::JumpTo(target) => Ok(self.jump_to(target)),
        }
    }

    pub fn advance(&mut self, record: &DraftRecord) -> Result<Transition, ValidationErrors> {
        if let Err(errors) = validate_step(self.step, record) {
            debug!(step = self.step.slug(), failed = errors.len(), "step validation failed");
            self.validation_errors = errors.clone();
            return Err(errors);
        }

        self.validation_errors.clear();
        match self.step.next() {
            Some(next) => Ok(self.move_to(next)),
            None => Ok(Transition::SubmitRequested),
        }
    }

    pub fn retreat(&mut self) -> Transition {
        match self.step.previous() {
            Some(previous) => self.move_to(previous),
            None => Transition::Stayed(self.step),
        }
    }

    /// Only earlier (or the current) steps are reachable without validating.
    pub fn jump_to(&mut self, target: WizardStep) -> Transition {
        if target > self.step {
            return Transition::Stayed(self.step);
        }
        self.move_to(target)
    }

    fn move_to(&mut self, to: WizardStep) -> Transition {
        let from = self.step;
        self.step = to;
        if from == to {
            Transition::Stayed(to)
        } else {
            debug!(from = from.slug(), to = to.slug(), "wizard moved");
            Transition::Moved { from, to }
        }
    }

    /// Returns `false` when a submit is already in flight.
    pub(crate) fn begin_submit(&mut self) -> bool {
        if self.is_submitting {
            return false;
        }
        self.is_submitting = true;
        true
    }

    pub(crate) fn finish_submit(&mut self) {
        self.is_submitting = false;
    }

    /// Park the session on `step` with the errors that blocked it.
    pub(crate) fn reject_at(&mut self, step: WizardStep, errors: ValidationErrors) {
        self.step = step;
        self.validation_errors = errors;
    }
}

/// Session, record, and the track-record scratch buffer edited together by the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wizard {
    pub session: WizardSession,
    pub record: DraftRecord,
    pub pending_entry: PortfolioEntry,
    plan_locked: bool,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    /// Empty wizard for a first-time applicant.
    pub fn new() -> Self {
        Self::with_record(DraftRecord::default(), SubmissionMode::New)
    }

    pub(crate) fn with_record(record: DraftRecord, mode: SubmissionMode) -> Self {
        Self {
            session: WizardSession::new(mode),
            record,
            pending_entry: PortfolioEntry::default(),
            plan_locked: false,
        }
    }

    /// Pre-filled wizard for an existing submission; the plan can no longer change.
    ///
    /// A record without a plan keeps it unset so the update leaves the stored plan alone.
    pub fn editing(record: DraftRecord) -> Self {
        let mut wizard = Self::with_record(record, SubmissionMode::Edit);
        wizard.plan_locked = true;
        wizard
    }

    /// Resume a locally saved draft, stopping at the first step that no longer validates.
    pub fn resume(record: DraftRecord, saved_step: WizardStep) -> Self {
        let mut wizard = Self::with_record(record, SubmissionMode::New);
        let mut step = WizardStep::FIRST;
        while step < saved_step && validate_step(step, &wizard.record).is_ok() {
            match step.next() {
                Some(next) => step = next,
                None => break,
            }
        }
        wizard.session.step = step;
        wizard
    }

    pub fn step(&self) -> WizardStep {
        self.session.step()
    }

    pub fn is_plan_locked(&self) -> bool {
        self.plan_locked
    }

    pub fn transition(&mut self, event: WizardEvent) -> Result<Transition, ValidationErrors> {
        self.session.transition(event, &self.record)
    }

    /// Returns `false` when the plan is fixed by an approved submission.
    pub fn select_plan(&mut self, plan: InvestorPlan) -> bool {
        if self.plan_locked {
            return false;
        }
        self.record.plan = Some(plan);
        true
    }

    pub fn add_entry(&mut self) -> Result<(), ValidationErrors> {
        track_record::add_entry(&mut self.record, &mut self.pending_entry)
    }

    pub fn remove_entry(&mut self, index: usize) -> Option<PortfolioEntry> {
        track_record::remove_entry(&mut self.record, index)
    }

    /// Validate every step in order, returning the first one that fails.
    pub fn first_invalid_step(&self) -> Option<(WizardStep, ValidationErrors)> {
        WizardStep::ALL.into_iter().find_map(|step| {
            validate_step(step, &self.record)
                .err()
                .map(|errors| (step, errors))
        })
    }
}
