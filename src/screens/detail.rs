use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;

use crate::api::source::ExperienceSource;
use crate::api::types::ExperienceRecord;
use crate::errors::ExpEaseError;
use crate::screens::state::GENERIC_ERROR_MESSAGE;
use crate::theme::Theme;

pub const NOT_FOUND_MESSAGE: &str = "Experience not found!";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DetailState {
    Loading,
    NotFound { message: String },
    Error { message: String },
    Loaded { view: ExperienceDetail },
}

/// Labelled line on the detail screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InfoRow {
    pub icon: &'static str,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExperienceDetail {
    pub id: String,
    pub image_url: String,
    pub company_name: String,
    pub student_name: String,
    pub rows: Vec<InfoRow>,
    pub details: String,
}

impl ExperienceDetail {
    pub fn from_record(record: &ExperienceRecord, placeholder_image: &str) -> Self {
        let rows = vec![
            InfoRow { icon: "user-tie", text: record.role.clone() },
            InfoRow { icon: "video", text: record.interview_mode.clone() },
            InfoRow { icon: "code", text: format!("{} Rounds", record.number_of_rounds) },
            InfoRow { icon: "school", text: record.college_name.clone() },
            InfoRow { icon: "calendar-alt", text: record.year_of_hiring.to_string() },
        ];
        Self {
            id: record.id.clone(),
            image_url: record.image_or(placeholder_image).to_string(),
            company_name: record.company_name.clone(),
            student_name: record.student_name.clone(),
            rows,
            details: format!("Details: {}", record.details),
        }
    }
}

/// View model for one experience, looked up by id.
pub struct DetailController {
    id: String,
    source: Arc<dyn ExperienceSource>,
    theme: Theme,
    placeholder_image: String,
    state: Mutex<DetailState>,
}

impl DetailController {
    pub fn new(
        id: impl Into<String>,
        source: Arc<dyn ExperienceSource>,
        theme: Theme,
        placeholder_image: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source,
            theme,
            placeholder_image: placeholder_image.into(),
            state: Mutex::new(DetailState::Loading),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub async fn load(&self) {
        tracing::info!(id = %self.id, source = %self.source.name(), "fetching experience");
        let next = match self.source.fetch_by_id(&self.id).await {
            Ok(record) => DetailState::Loaded {
                view: ExperienceDetail::from_record(&record, &self.placeholder_image),
            },
            Err(ExpEaseError::NotFound(_)) => {
                tracing::warn!(id = %self.id, "experience not found");
                DetailState::NotFound { message: NOT_FOUND_MESSAGE.to_string() }
            }
            Err(e) => {
                tracing::error!(id = %self.id, kind = ?e.fetch_kind(), error = %e, "failed to load experience");
                DetailState::Error {
                    message: e.user_message().unwrap_or(GENERIC_ERROR_MESSAGE).to_string(),
                }
            }
        };
        *self.state.lock() = next;
    }

    pub fn state(&self) -> DetailState {
        self.state.lock().clone()
    }
}
