//! Investor application wizard: a six-step, validation-gated state machine that collects a
//! single draft record and submits it to the platform API as a create or an update.

pub(crate) mod coerce;
pub mod domain;
pub mod notify;
pub mod payload;
pub mod router;
pub mod service;
pub mod track_record;
pub mod validation;
pub mod wizard;

#[cfg(test)]
mod tests;

pub use domain::{
    DealCount, DraftRecord, FocusField, InvestorPlan, PortfolioEntry, RemoteDraftState,
    SubmissionMode,
};
pub use notify::{Notice, NoticeLevel, Notifier, Route};
pub use payload::ApplicationPayload;
pub use router::investor_application_router;
pub use service::{
    AutosaveError, InvestorApplicationService, PendingView, StepOutcome, SubmitOutcome,
    WizardEntry, AUTOSAVE_KEY,
};
pub use validation::{validate_step, ValidationErrors, VALIDATION_NOTICE};
pub use wizard::{Transition, Wizard, WizardEvent, WizardSession, WizardStep};
