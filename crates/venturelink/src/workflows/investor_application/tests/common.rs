use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use serde_json::Value;

use crate::remote::{PlatformApi, RemoteError, SubmitReceipt};
use crate::storage::MemoryStore;
use crate::workflows::investor_application::domain::{
    DealCount, DraftRecord, InvestorPlan, PortfolioEntry, RemoteDraftState,
};
use crate::workflows::investor_application::notify::{Notice, Notifier, Route};
use crate::workflows::investor_application::payload::ApplicationPayload;
use crate::workflows::investor_application::service::InvestorApplicationService;
use crate::workflows::investor_application::wizard::{Wizard, WizardStep};
use crate::workflows::matching::domain::{InvestorProfile, ProjectCandidate};

pub(super) const BIO: &str =
    "Former operator turned angel, backing seed-stage fintech founders across Europe.";
pub(super) const WHY_JOIN: &str = "Looking for technical founders earlier in their journey.";

pub(super) fn complete_record() -> DraftRecord {
    DraftRecord {
        investor_type: "angel".to_string(),
        name: "Jane Doe".to_string(),
        firm: "Doe Ventures".to_string(),
        location: "Berlin, Germany".to_string(),
        linkedin_url: "https://linkedin.com/in/jane-doe".to_string(),
        investment_stages: vec!["Pre-Seed".to_string(), "Seed".to_string()],
        industries: vec!["FinTech".to_string()],
        geographic_focus: vec!["Europe".to_string()],
        bio: BIO.to_string(),
        why_join: WHY_JOIN.to_string(),
        deals_count: Some(DealCount::Few),
        portfolio: vec![PortfolioEntry {
            name: "LedgerLoop".to_string(),
            category: "FinTech".to_string(),
            year: "2022".to_string(),
        }],
        ticket_size_min: "25,000".to_string(),
        ticket_size_max: String::new(),
        value_add: vec!["Fundraising".to_string()],
        is_public: true,
        ..DraftRecord::default()
    }
}

/// Wizard positioned on `step` with a record that passes every earlier step.
pub(super) fn wizard_at(step: WizardStep) -> Wizard {
    let wizard = Wizard::resume(complete_record(), step);
    assert_eq!(wizard.step(), step, "fixture record must reach {step:?}");
    wizard
}

pub(super) fn editing_wizard_at_review(record: DraftRecord) -> Wizard {
    let mut wizard = Wizard::editing(record);
    while wizard.step() != WizardStep::Review {
        wizard
            .session
            .advance(&wizard.record)
            .expect("fixture record validates");
    }
    wizard
}

pub(super) fn approved_record() -> DraftRecord {
    DraftRecord {
        plan: Some(InvestorPlan::Featured),
        ..complete_record()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(super) enum ApiCall {
    FetchDraft,
    Create(ApplicationPayload),
    Update(ApplicationPayload),
}

#[derive(Debug, Clone)]
pub(super) enum SubmitBehavior {
    Succeed(Option<String>),
    Reject(Option<String>),
    HttpError(u16, Option<String>),
}

pub(super) struct MemoryApi {
    draft: Option<RemoteDraftState>,
    submit: SubmitBehavior,
    calls: Mutex<Vec<ApiCall>>,
}

impl MemoryApi {
    pub(super) fn with_draft(state: RemoteDraftState) -> Self {
        Self {
            draft: Some(state),
            submit: SubmitBehavior::Succeed(None),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn unreachable() -> Self {
        Self {
            draft: None,
            ..Self::with_draft(RemoteDraftState::None)
        }
    }

    pub(super) fn submitting(behavior: SubmitBehavior) -> Self {
        Self {
            submit: behavior,
            ..Self::with_draft(RemoteDraftState::None)
        }
    }

    pub(super) fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().expect("calls mutex poisoned").clone()
    }

    fn record(&self, call: ApiCall) {
        self.calls.lock().expect("calls mutex poisoned").push(call);
    }

    fn submit_result(&self) -> Result<SubmitReceipt, RemoteError> {
        match &self.submit {
            SubmitBehavior::Succeed(message) => Ok(SubmitReceipt {
                message: message.clone(),
            }),
            SubmitBehavior::Reject(message) => Err(RemoteError::Rejected {
                status: "error".to_string(),
                message: message.clone(),
            }),
            SubmitBehavior::HttpError(status, message) => Err(RemoteError::Status {
                status: *status,
                message: message.clone(),
            }),
        }
    }
}

#[async_trait]
impl PlatformApi for MemoryApi {
    async fn fetch_draft(&self) -> Result<RemoteDraftState, RemoteError> {
        self.record(ApiCall::FetchDraft);
        self.draft.clone().ok_or(RemoteError::Status {
            status: 503,
            message: None,
        })
    }

    async fn create_application(
        &self,
        payload: &ApplicationPayload,
    ) -> Result<SubmitReceipt, RemoteError> {
        self.record(ApiCall::Create(payload.clone()));
        self.submit_result()
    }

    async fn update_application(
        &self,
        payload: &ApplicationPayload,
    ) -> Result<SubmitReceipt, RemoteError> {
        self.record(ApiCall::Update(payload.clone()));
        self.submit_result()
    }

    async fn fetch_investor_profile(&self) -> Result<InvestorProfile, RemoteError> {
        Ok(InvestorProfile::default())
    }

    async fn list_projects(&self) -> Result<Vec<ProjectCandidate>, RemoteError> {
        Ok(Vec::new())
    }
}

#[derive(Default)]
pub(super) struct MemoryNotifier {
    notices: Mutex<Vec<Notice>>,
    routes: Mutex<Vec<Route>>,
}

impl MemoryNotifier {
    pub(super) fn notices(&self) -> Vec<Notice> {
        self.notices.lock().expect("notice mutex poisoned").clone()
    }

    pub(super) fn routes(&self) -> Vec<Route> {
        self.routes.lock().expect("route mutex poisoned").clone()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notice: Notice) {
        self.notices
            .lock()
            .expect("notice mutex poisoned")
            .push(notice);
    }

    fn navigate(&self, route: Route) {
        self.routes.lock().expect("route mutex poisoned").push(route);
    }
}

pub(super) type TestService = InvestorApplicationService<MemoryApi, MemoryNotifier, MemoryStore>;

pub(super) fn build_service(
    api: MemoryApi,
) -> (
    TestService,
    Arc<MemoryApi>,
    Arc<MemoryNotifier>,
    Arc<MemoryStore>,
) {
    let api = Arc::new(api);
    let notifier = Arc::new(MemoryNotifier::default());
    let store = Arc::new(MemoryStore::default());
    let service = InvestorApplicationService::new(api.clone(), notifier.clone(), store.clone());
    (service, api, notifier, store)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
