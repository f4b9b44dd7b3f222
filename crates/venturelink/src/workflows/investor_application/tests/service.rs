use super::common::*;
use crate::storage::KeyValueStore;
use crate::workflows::investor_application::domain::{
    DraftRecord, InvestorPlan, PortfolioEntry, RemoteDraftState, SubmissionMode,
};
use crate::workflows::investor_application::notify::{Notice, NoticeLevel, Route};
use crate::workflows::investor_application::payload::ApplicationPayload;
use crate::workflows::investor_application::service::{
    StepOutcome, SubmitOutcome, WizardEntry, AUTOSAVE_KEY,
};
use crate::workflows::investor_application::track_record::INCOMPLETE_ENTRY_NOTICE;
use crate::workflows::investor_application::validation::VALIDATION_NOTICE;
use crate::workflows::investor_application::wizard::{Wizard, WizardEvent, WizardStep};

fn fresh(entry: WizardEntry) -> Wizard {
    match entry {
        WizardEntry::Fresh(wizard) => wizard,
        other => panic!("expected fresh wizard, got {other:?}"),
    }
}

fn submitted_payload(call: &ApiCall) -> &ApplicationPayload {
    match call {
        ApiCall::Create(payload) | ApiCall::Update(payload) => payload,
        ApiCall::FetchDraft => panic!("expected a submit call"),
    }
}

#[tokio::test]
async fn initialize_without_submission_starts_empty() {
    let (service, api, _, _) = build_service(MemoryApi::with_draft(RemoteDraftState::None));

    let wizard = fresh(service.initialize().await);

    assert_eq!(wizard.step(), WizardStep::Basics);
    assert_eq!(wizard.session.mode(), SubmissionMode::New);
    assert_eq!(wizard.record, DraftRecord::default());
    assert!(!wizard.is_plan_locked());
    assert_eq!(api.calls(), vec![ApiCall::FetchDraft]);
}

#[tokio::test]
async fn initialize_pending_shows_status_view_until_edit() {
    let (service, _, _, _) =
        build_service(MemoryApi::with_draft(RemoteDraftState::Pending(complete_record())));

    let WizardEntry::Pending(view) = service.initialize().await else {
        panic!("pending submission opens the status view");
    };
    assert_eq!(view.record().location, "Berlin, Germany");

    let wizard = view.edit();
    assert_eq!(wizard.session.mode(), SubmissionMode::Edit);
    assert_eq!(wizard.step(), WizardStep::Basics);
    assert_eq!(wizard.record.plan, None);
    assert!(wizard.is_plan_locked());
}

#[tokio::test]
async fn initialize_approved_prefills_edit_mode() {
    let (service, _, _, _) =
        build_service(MemoryApi::with_draft(RemoteDraftState::Approved(approved_record())));

    let WizardEntry::Editing(wizard) = service.initialize().await else {
        panic!("approved submission opens in edit mode");
    };
    assert_eq!(wizard.session.mode(), SubmissionMode::Edit);
    assert_eq!(wizard.record.industries, vec!["FinTech".to_string()]);
    assert_eq!(wizard.record.plan, Some(InvestorPlan::Featured));
    assert!(wizard.is_plan_locked());
}

#[tokio::test]
async fn initialize_tolerates_unreachable_api() {
    let (service, _, notifier, _) = build_service(MemoryApi::unreachable());

    let wizard = fresh(service.initialize().await);

    assert_eq!(wizard.step(), WizardStep::Basics);
    assert!(notifier.notices().is_empty());
}

#[tokio::test]
async fn initialize_resumes_local_autosave() {
    let (service, _, _, store) = build_service(MemoryApi::with_draft(RemoteDraftState::None));
    let mut wizard = wizard_at(WizardStep::ValueAdd);
    wizard.record.bio = "edited after save".to_string();
    service.autosave(&wizard).expect("autosave succeeds");
    assert!(store.get(AUTOSAVE_KEY).expect("store readable").is_some());

    let resumed = fresh(service.initialize().await);

    assert_eq!(resumed.step(), WizardStep::About);
    assert_eq!(resumed.record.bio, "edited after save");
}

#[tokio::test]
async fn initialize_ignores_unreadable_autosave() {
    let (service, _, _, store) = build_service(MemoryApi::with_draft(RemoteDraftState::None));
    store
        .set(AUTOSAVE_KEY, "{not json".to_string())
        .expect("store writable");

    let wizard = fresh(service.initialize().await);

    assert_eq!(wizard.record, DraftRecord::default());
}

#[tokio::test]
async fn initialize_does_not_resume_edit_autosave() {
    let (service, _, _, _) = build_service(MemoryApi::with_draft(RemoteDraftState::None));
    service
        .autosave(&Wizard::editing(approved_record()))
        .expect("autosave succeeds");

    let wizard = fresh(service.initialize().await);

    assert_eq!(wizard.session.mode(), SubmissionMode::New);
    assert_eq!(wizard.record, DraftRecord::default());
}

#[tokio::test]
async fn dispatch_invalid_step_emits_validation_notice() {
    let (service, _, notifier, _) = build_service(MemoryApi::with_draft(RemoteDraftState::None));
    let mut wizard = Wizard::new();

    let outcome = service.dispatch(&mut wizard, WizardEvent::Advance).await;

    let StepOutcome::Invalid(errors) = outcome else {
        panic!("empty basics must not advance");
    };
    assert!(errors.contains("location"));
    assert!(errors.contains("linkedin_url"));
    assert_eq!(wizard.step(), WizardStep::Basics);
    assert_eq!(notifier.notices(), vec![Notice::error(VALIDATION_NOTICE)]);
}

#[tokio::test]
async fn dispatch_valid_step_moves_quietly() {
    let (service, _, notifier, _) = build_service(MemoryApi::with_draft(RemoteDraftState::None));
    let mut wizard = wizard_at(WizardStep::Focus);

    let outcome = service.dispatch(&mut wizard, WizardEvent::Advance).await;

    assert_eq!(
        outcome,
        StepOutcome::Moved {
            from: WizardStep::Focus,
            to: WizardStep::About
        }
    );
    assert!(notifier.notices().is_empty());
}

#[tokio::test]
async fn new_submission_creates_and_lands_on_home() {
    let (service, api, notifier, store) =
        build_service(MemoryApi::submitting(SubmitBehavior::Succeed(None)));
    let mut wizard = wizard_at(WizardStep::Review);
    service.autosave(&wizard).expect("autosave succeeds");

    let outcome = service.dispatch(&mut wizard, WizardEvent::Advance).await;

    assert_eq!(
        outcome,
        StepOutcome::Submitted(SubmitOutcome::Accepted {
            mode: SubmissionMode::New,
            route: Route::Landing
        })
    );
    let calls = api.calls();
    assert_eq!(calls.len(), 1);
    assert!(matches!(calls[0], ApiCall::Create(_)));
    assert_eq!(
        notifier.notices(),
        vec![Notice::success(
            "Application submitted! We will review it shortly."
        )]
    );
    assert_eq!(notifier.routes(), vec![Route::Landing]);
    assert_eq!(store.get(AUTOSAVE_KEY).expect("store readable"), None);
    assert!(!wizard.session.is_submitting());
}

#[tokio::test]
async fn submission_coerces_amounts_and_plan() {
    let (service, api, _, _) = build_service(MemoryApi::submitting(SubmitBehavior::Succeed(None)));
    let mut wizard = wizard_at(WizardStep::Review);

    service.submit(&mut wizard).await;

    let calls = api.calls();
    let payload = submitted_payload(&calls[0]);
    assert_eq!(payload.ticket_size_min, Some(25_000));
    assert_eq!(payload.ticket_size_max, None);
    assert_eq!(payload.plan, Some(InvestorPlan::Basic));
    assert_eq!(payload.deals_count, Some("1-5"));
    assert_eq!(payload.investor_type, "angel");
}

#[tokio::test]
async fn edit_submission_updates_and_returns_to_dashboard() {
    let (service, api, notifier, _) = build_service(MemoryApi::submitting(
        SubmitBehavior::Succeed(Some("Profile saved".to_string())),
    ));
    let mut wizard = editing_wizard_at_review(approved_record());

    let outcome = service.submit(&mut wizard).await;

    assert_eq!(
        outcome,
        SubmitOutcome::Accepted {
            mode: SubmissionMode::Edit,
            route: Route::Dashboard
        }
    );
    let calls = api.calls();
    assert!(matches!(calls.as_slice(), [ApiCall::Update(_)]));
    assert_eq!(
        submitted_payload(&calls[0]).plan,
        Some(InvestorPlan::Featured)
    );
    assert_eq!(notifier.notices(), vec![Notice::success("Profile saved")]);
    assert_eq!(notifier.routes(), vec![Route::Dashboard]);
}

#[tokio::test]
async fn edit_submission_without_known_plan_leaves_it_out() {
    let (service, api, _, _) = build_service(MemoryApi::submitting(SubmitBehavior::Succeed(None)));
    let mut wizard = editing_wizard_at_review(complete_record());

    service.submit(&mut wizard).await;

    let calls = api.calls();
    assert!(matches!(calls.as_slice(), [ApiCall::Update(_)]));
    assert_eq!(submitted_payload(&calls[0]).plan, None);
}

#[tokio::test]
async fn submit_outside_review_sends_nothing() {
    let (service, api, notifier, store) =
        build_service(MemoryApi::submitting(SubmitBehavior::Succeed(None)));
    let mut wizard = wizard_at(WizardStep::Basics);
    service.autosave(&wizard).expect("autosave succeeds");

    let outcome = service.submit(&mut wizard).await;

    assert_eq!(
        outcome,
        SubmitOutcome::NotOnReview {
            step: WizardStep::Basics
        }
    );
    assert!(api.calls().is_empty());
    assert!(notifier.notices().is_empty());
    assert!(notifier.routes().is_empty());
    assert_eq!(wizard.step(), WizardStep::Basics);
    assert!(!wizard.session.is_submitting());
    assert!(store.get(AUTOSAVE_KEY).expect("store readable").is_some());
}

#[tokio::test]
async fn rejected_submission_surfaces_server_message_and_stays() {
    let (service, _, notifier, _) = build_service(MemoryApi::submitting(SubmitBehavior::Reject(
        Some("LinkedIn profile already registered".to_string()),
    )));
    let mut wizard = wizard_at(WizardStep::Review);
    let record = wizard.record.clone();

    let outcome = service.submit(&mut wizard).await;

    assert_eq!(
        outcome,
        SubmitOutcome::Failed {
            message: "LinkedIn profile already registered".to_string()
        }
    );
    assert_eq!(wizard.step(), WizardStep::Review);
    assert_eq!(wizard.record, record);
    assert!(!wizard.session.is_submitting());
    assert!(notifier.routes().is_empty());
    assert_eq!(
        notifier.notices()[0].level,
        NoticeLevel::Error,
        "failure is reported as an error toast"
    );
}

#[tokio::test]
async fn transport_failure_falls_back_to_generic_message() {
    let (service, _, notifier, _) =
        build_service(MemoryApi::submitting(SubmitBehavior::HttpError(500, None)));
    let mut wizard = wizard_at(WizardStep::Review);

    let outcome = service.submit(&mut wizard).await;

    assert_eq!(
        outcome,
        SubmitOutcome::Failed {
            message: "Failed to submit application".to_string()
        }
    );
    assert_eq!(
        notifier.notices(),
        vec![Notice::error("Failed to submit application")]
    );

    let mut editing = editing_wizard_at_review(approved_record());
    let outcome = service.submit(&mut editing).await;
    assert_eq!(
        outcome,
        SubmitOutcome::Failed {
            message: "Failed to update application".to_string()
        }
    );
}

#[tokio::test]
async fn failed_submission_can_be_retried() {
    let (service, api, _, _) = build_service(MemoryApi::submitting(SubmitBehavior::HttpError(
        502,
        Some("Upstream unavailable".to_string()),
    )));
    let mut wizard = wizard_at(WizardStep::Review);

    service.submit(&mut wizard).await;
    service.submit(&mut wizard).await;

    assert_eq!(api.calls().len(), 2);
}

#[tokio::test]
async fn submit_is_ignored_while_in_flight() {
    let (service, api, notifier, _) =
        build_service(MemoryApi::submitting(SubmitBehavior::Succeed(None)));
    let mut wizard = wizard_at(WizardStep::Review);
    assert!(wizard.session.begin_submit());

    let outcome = service.submit(&mut wizard).await;

    assert_eq!(outcome, SubmitOutcome::AlreadySubmitting);
    assert!(api.calls().is_empty());
    assert!(notifier.notices().is_empty());
}

#[tokio::test]
async fn submit_returns_to_first_invalid_step() {
    let (service, api, notifier, _) =
        build_service(MemoryApi::submitting(SubmitBehavior::Succeed(None)));
    let mut wizard = wizard_at(WizardStep::Review);
    wizard.record.industries.clear();

    let outcome = service.submit(&mut wizard).await;

    let SubmitOutcome::Incomplete { step, errors } = outcome else {
        panic!("incomplete record must not be sent");
    };
    assert_eq!(step, WizardStep::Focus);
    assert!(errors.contains("industries"));
    assert_eq!(wizard.step(), WizardStep::Focus);
    assert_eq!(wizard.session.validation_errors(), &errors);
    assert!(!wizard.session.is_submitting());
    assert!(api.calls().is_empty());
    assert_eq!(notifier.notices(), vec![Notice::error(VALIDATION_NOTICE)]);
}

#[tokio::test]
async fn incomplete_portfolio_entry_is_reported() {
    let (service, _, notifier, _) = build_service(MemoryApi::with_draft(RemoteDraftState::None));
    let mut wizard = wizard_at(WizardStep::TrackRecord);
    wizard.pending_entry = PortfolioEntry {
        name: "Acme".to_string(),
        ..PortfolioEntry::default()
    };

    assert!(service.add_entry(&mut wizard).is_err());
    assert_eq!(wizard.record.portfolio.len(), 1);
    assert_eq!(notifier.notices(), vec![Notice::error(INCOMPLETE_ENTRY_NOTICE)]);
}
