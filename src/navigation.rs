use std::fmt;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Screens the shell can route to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum Route {
    Home,
    Information,
    CompanyExperiences { company_name: String },
    ExperienceDetail { id: String },
    SubmitForm,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => f.write_str("/"),
            Route::Information => f.write_str("/Information"),
            Route::CompanyExperiences { company_name } => {
                write!(f, "/filteredExperiences?companyName={company_name}")
            }
            Route::ExperienceDetail { id } => write!(f, "/detailexperience/{id}"),
            Route::SubmitForm => f.write_str("/formpage"),
        }
    }
}

/// Navigation collaborator handed to the view models.
pub trait Navigator: Send + Sync {
    fn push(&self, route: Route);
}

/// Forwards every pushed route to a channel drained by the shell.
#[derive(Clone)]
pub struct ChannelNavigator {
    tx: mpsc::UnboundedSender<Route>,
}

impl ChannelNavigator {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Route>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Navigator for ChannelNavigator {
    fn push(&self, route: Route) {
        tracing::info!(route = %route, "navigate");
        if self.tx.send(route).is_err() {
            tracing::warn!("navigation receiver dropped; route ignored");
        }
    }
}
