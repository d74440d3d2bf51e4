//! Headless screen controllers.
//!
//! Each controller exposes the actions a UI binds to buttons and reports
//! back a [`Outcome`]: where to navigate next and an optional one-shot
//! [`Notice`] to show.

mod dashboard;
mod login;
mod settings;

pub use dashboard::{DashboardEvent, DashboardScreen, Section};
pub use login::{LoginScreen, validate_input};
pub use settings::{SettingsField, SettingsScreen};

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
    Settings,
}

/// Short message a UI shows once and forgets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
}

impl Notice {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    pub fn from_error(context: &str, error: &AppError) -> Self {
        Self::new(format!("{context}: {}", error.user_message()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    pub route: Option<Route>,
    pub notice: Option<Notice>,
}

impl Outcome {
    pub fn stay() -> Self {
        Self::default()
    }

    pub fn navigate(route: Route) -> Self {
        Self { route: Some(route), notice: None }
    }

    pub fn with_notice(mut self, notice: Notice) -> Self {
        self.notice = Some(notice);
        self
    }

    /// Stays on the current screen and reports the failure.
    pub fn failed(context: &str, error: &AppError) -> Self {
        tracing::warn!("{}: {}", context, error);
        Self::stay().with_notice(Notice::from_error(context, error))
    }
}
