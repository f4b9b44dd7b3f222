use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::{info, warn};
use venturelink::workflows::investor_application::{Notice, NoticeLevel, Notifier, Route};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Notifier for the `apply` command: notices go to the terminal, navigation is only logged.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Success => {
                info!(message = %notice.message, "notice");
                println!("{}", notice.message);
            }
            NoticeLevel::Error => {
                warn!(message = %notice.message, "notice");
                eprintln!("{}", notice.message);
            }
        }
    }

    fn navigate(&self, route: Route) {
        info!(route = route.path(), "navigation requested");
    }
}
