use serde::Serialize;

use crate::api::types::ExperienceRecord;

pub const LOADING_MESSAGE: &str = "Hold on...";
pub const NO_RESULTS_MESSAGE: &str = "No matching results found.";
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong";

/// What a list screen currently shows. Exactly one variant at a time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ViewState {
    Loading,
    Error { message: String },
    Empty { message: String },
    Populated { cards: Vec<ExperienceCard> },
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ViewState::Error { .. })
    }

    pub fn cards(&self) -> &[ExperienceCard] {
        match self {
            ViewState::Populated { cards } => cards,
            _ => &[],
        }
    }
}

/// Display data for one list entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExperienceCard {
    /// Passed back to `select_record` when the card is activated.
    pub id: String,
    pub company_name: String,
    pub student_name: String,
    pub year_label: String,
    pub thumbnail_url: String,
}

impl ExperienceCard {
    pub fn from_record(record: &ExperienceRecord, placeholder_image: &str) -> Self {
        Self {
            id: record.id.clone(),
            company_name: record.company_name.clone(),
            student_name: record.student_name.clone(),
            year_label: format!("Batch : {}", record.year_of_hiring),
            thumbnail_url: record.image_or(placeholder_image).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::record;

    #[test]
    fn card_falls_back_to_placeholder() {
        let mut rec = record("9", "Epam", "MIT", 2024);
        let card = ExperienceCard::from_record(&rec, "https://ph");
        assert_eq!(card.thumbnail_url, "https://ph");
        assert_eq!(card.year_label, "Batch : 2024");
        assert_eq!(card.student_name, "student 9");

        rec.image_url = Some("  ".into());
        assert_eq!(ExperienceCard::from_record(&rec, "https://ph").thumbnail_url, "https://ph");

        rec.image_url = Some("https://img/epam.png".into());
        assert_eq!(
            ExperienceCard::from_record(&rec, "https://ph").thumbnail_url,
            "https://img/epam.png"
        );
    }

    #[test]
    fn serializes_with_state_tag() {
        let json = serde_json::to_value(ViewState::Empty { message: NO_RESULTS_MESSAGE.into() })
            .unwrap();
        assert_eq!(json["state"], "empty");
        assert_eq!(serde_json::to_value(ViewState::Loading).unwrap()["state"], "loading");
    }
}
