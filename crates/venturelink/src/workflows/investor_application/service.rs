use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::domain::{DraftRecord, InvestorPlan, RemoteDraftState, SubmissionMode};
use super::notify::{Notice, Notifier, Route};
use super::payload::ApplicationPayload;
use super::validation::{ValidationErrors, VALIDATION_NOTICE};
use super::wizard::{Transition, Wizard, WizardEvent, WizardStep};
use crate::remote::PlatformApi;
use crate::storage::{KeyValueStore, StoreError};

/// Store key holding the locally autosaved draft.
pub const AUTOSAVE_KEY: &str = "investor_application.draft";

const SUBMITTED_NOTICE: &str = "Application submitted! We will review it shortly.";
const UPDATED_NOTICE: &str = "Your investor profile has been updated.";
const SUBMIT_FAILED_NOTICE: &str = "Failed to submit application";
const UPDATE_FAILED_NOTICE: &str = "Failed to update application";

/// How the wizard opens, decided by the remote review status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardEntry {
    /// No prior submission: empty (or locally resumed) wizard.
    Fresh(Wizard),
    /// Approved submission: pre-filled, edit mode, plan fixed.
    Editing(Wizard),
    /// Submission awaiting review: read-only until the user opts to edit.
    Pending(PendingView),
}

/// Read-only status view shown while a submission is under review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingView {
    record: DraftRecord,
}

impl PendingView {
    pub fn record(&self) -> &DraftRecord {
        &self.record
    }

    /// Re-enter the wizard to amend the pending submission.
    pub fn edit(self) -> Wizard {
        Wizard::editing(self.record)
    }
}

/// Result of dispatching a wizard event through the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Moved { from: WizardStep, to: WizardStep },
    Stayed(WizardStep),
    Invalid(ValidationErrors),
    Submitted(SubmitOutcome),
}

/// Result of a submit attempt. Every variant leaves the wizard interactive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted {
        mode: SubmissionMode,
        route: Route,
    },
    Failed {
        message: String,
    },
    AlreadySubmitting,
    /// Submit was called away from the review step; nothing was sent.
    NotOnReview {
        step: WizardStep,
    },
    Incomplete {
        step: WizardStep,
        errors: ValidationErrors,
    },
}

#[derive(Debug, Serialize, Deserialize)]
struct AutosaveSnapshot {
    mode: SubmissionMode,
    step: WizardStep,
    record: DraftRecord,
    saved_at: DateTime<Utc>,
}

/// Error raised while persisting the local autosave.
#[derive(Debug, thiserror::Error)]
pub enum AutosaveError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("unable to encode draft: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Service composing the remote API, UI notifier, and local store around the wizard.
pub struct InvestorApplicationService<P, N, S> {
    api: Arc<P>,
    notifier: Arc<N>,
    store: Arc<S>,
}

impl<P, N, S> InvestorApplicationService<P, N, S>
where
    P: PlatformApi,
    N: Notifier,
    S: KeyValueStore,
{
    pub fn new(api: Arc<P>, notifier: Arc<N>, store: Arc<S>) -> Self {
        Self {
            api,
            notifier,
            store,
        }
    }

    /// Fetch the remote review status once and open the wizard accordingly.
    pub async fn initialize(&self) -> WizardEntry {
        match self.api.fetch_draft().await {
            Ok(RemoteDraftState::None) => WizardEntry::Fresh(self.resume_or_new()),
            Ok(RemoteDraftState::Pending(record)) => WizardEntry::Pending(PendingView { record }),
            Ok(RemoteDraftState::Approved(record)) => WizardEntry::Editing(Wizard::editing(record)),
            Err(err) => {
                warn!(error = %err, "unable to load existing application, starting fresh");
                WizardEntry::Fresh(self.resume_or_new())
            }
        }
    }

    /// Apply a navigation event, submitting when the review step is confirmed.
    pub async fn dispatch(&self, wizard: &mut Wizard, event: WizardEvent) -> StepOutcome {
        match wizard.transition(event) {
            Ok(Transition::Moved { from, to }) => StepOutcome::Moved { from, to },
            Ok(Transition::Stayed(step)) => StepOutcome::Stayed(step),
            Ok(Transition::SubmitRequested) => StepOutcome::Submitted(self.submit(wizard).await),
            Err(errors) => {
                self.notifier.notify(Notice::error(VALIDATION_NOTICE));
                StepOutcome::Invalid(errors)
            }
        }
    }

    /// Send the draft as a create (new) or update (edit). Only the review step submits.
    ///
    /// Failures are reported through the notifier and leave the wizard where it was so the
    /// user can retry without re-entering anything.
    pub async fn submit(&self, wizard: &mut Wizard) -> SubmitOutcome {
        let step = wizard.step();
        if step != WizardStep::Review {
            debug!(step = step.slug(), "submit ignored outside review");
            return SubmitOutcome::NotOnReview { step };
        }

        if !wizard.session.begin_submit() {
            debug!("submit already in flight");
            return SubmitOutcome::AlreadySubmitting;
        }

        if let Some((step, errors)) = wizard.first_invalid_step() {
            wizard.session.finish_submit();
            wizard.session.reject_at(step, errors.clone());
            self.notifier.notify(Notice::error(VALIDATION_NOTICE));
            return SubmitOutcome::Incomplete { step, errors };
        }

        let mode = wizard.session.mode();
        let payload = match mode {
            SubmissionMode::New => ApplicationPayload::from_record(&wizard.record),
            SubmissionMode::Edit => ApplicationPayload::for_update(&wizard.record),
        };
        let result = match mode {
            SubmissionMode::New => self.api.create_application(&payload).await,
            SubmissionMode::Edit => self.api.update_application(&payload).await,
        };
        wizard.session.finish_submit();

        match result {
            Ok(receipt) => {
                let (default_notice, route) = match mode {
                    SubmissionMode::New => (SUBMITTED_NOTICE, Route::Landing),
                    SubmissionMode::Edit => (UPDATED_NOTICE, Route::Dashboard),
                };
                info!(
                    ?mode,
                    plan = payload.plan.map(InvestorPlan::label),
                    "investor application sent"
                );

                self.clear_autosave();
                self.notifier.notify(Notice::success(
                    receipt
                        .message
                        .filter(|message| !message.trim().is_empty())
                        .unwrap_or_else(|| default_notice.to_string()),
                ));
                self.notifier.navigate(route);
                SubmitOutcome::Accepted { mode, route }
            }
            Err(err) => {
                warn!(?mode, error = %err, "investor application submit failed");
                let fallback = match mode {
                    SubmissionMode::New => SUBMIT_FAILED_NOTICE,
                    SubmissionMode::Edit => UPDATE_FAILED_NOTICE,
                };
                let message = err.server_message().unwrap_or(fallback).to_string();
                self.notifier.notify(Notice::error(message.clone()));
                SubmitOutcome::Failed { message }
            }
        }
    }

    /// Append the pending portfolio entry, surfacing a notice when it is incomplete.
    pub fn add_entry(&self, wizard: &mut Wizard) -> Result<(), ValidationErrors> {
        wizard.add_entry().inspect_err(|errors| {
            if let Some((_, message)) = errors.iter().next() {
                self.notifier.notify(Notice::error(message));
            }
        })
    }

    /// Persist the draft and step so a fresh session can pick up where this one stopped.
    pub fn autosave(&self, wizard: &Wizard) -> Result<(), AutosaveError> {
        let snapshot = AutosaveSnapshot {
            mode: wizard.session.mode(),
            step: wizard.step(),
            record: wizard.record.clone(),
            saved_at: Utc::now(),
        };
        self.store.set(AUTOSAVE_KEY, serde_json::to_string(&snapshot)?)?;
        Ok(())
    }

    fn resume_or_new(&self) -> Wizard {
        let raw = match self.store.get(AUTOSAVE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Wizard::new(),
            Err(err) => {
                debug!(error = %err, "autosave store unavailable");
                return Wizard::new();
            }
        };

        match serde_json::from_str::<AutosaveSnapshot>(&raw) {
            Ok(snapshot) if snapshot.mode == SubmissionMode::New => {
                debug!(
                    saved_at = %snapshot.saved_at,
                    step = snapshot.step.slug(),
                    "resuming autosaved draft"
                );
                Wizard::resume(snapshot.record, snapshot.step)
            }
            Ok(_) => Wizard::new(),
            Err(err) => {
                debug!(error = %err, "ignoring unreadable autosave");
                Wizard::new()
            }
        }
    }

    fn clear_autosave(&self) {
        if let Err(err) = self.store.remove(AUTOSAVE_KEY) {
            debug!(error = %err, "unable to clear autosave");
        }
    }
}
