use serde::{Deserialize, Serialize};

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Toast-style message for the hosting UI to display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Destinations the wizard may ask the host to navigate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Dashboard,
    Landing,
}

impl Route {
    pub const fn path(self) -> &'static str {
        match self {
            Route::Dashboard => "/investor/dashboard",
            Route::Landing => "/",
        }
    }
}

/// Outbound UI side effects. Implementations decide how (or whether) they are shown.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
    fn navigate(&self, route: Route);
}
