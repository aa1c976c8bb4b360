use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;

use crate::api::source::ExperienceSource;
use crate::api::types::NewExperience;
use crate::errors::{ExpEaseError, ExpEaseResult};

pub const SUBMIT_SUCCESS: &str = "Experience submitted successfully!";
pub const SUBMIT_REJECTED: &str = "Failed to submit experience. Please try again.";
pub const SUBMIT_FAILED: &str = "An error occurred. Please try again later.";

/// Editable fields of the share-your-experience form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    UserName,
    CompanyName,
    CollegeName,
    YearOfHiring,
    ExperienceDetails,
    Image,
    NumberOfRounds,
    Role,
    OnCampusOrOffCampus,
    InterviewMode,
    OfferStatus,
}

/// How a field is entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "choices", rename_all = "snake_case")]
pub enum FieldInput {
    Text,
    Numeric,
    Multiline,
    Picker(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct FieldSpec {
    pub field: FormField,
    pub label: &'static str,
    pub input: FieldInput,
    pub required: bool,
}

const CAMPUS_CHOICES: &[&str] = &["On-Campus", "Off-Campus"];
const MODE_CHOICES: &[&str] = &["Online", "Walk-In"];
const OFFER_CHOICES: &[&str] = &["Offer", "Rejected"];

/// Fields in display order.
pub const FORM_FIELDS: &[FieldSpec] = &[
    FieldSpec { field: FormField::UserName, label: "Name of the Student", input: FieldInput::Text, required: true },
    FieldSpec { field: FormField::CompanyName, label: "Company Name", input: FieldInput::Text, required: true },
    FieldSpec { field: FormField::CollegeName, label: "College Name", input: FieldInput::Text, required: true },
    FieldSpec { field: FormField::YearOfHiring, label: "Year of Hiring (e.g., 2021)", input: FieldInput::Numeric, required: true },
    FieldSpec { field: FormField::ExperienceDetails, label: "Experience Details", input: FieldInput::Multiline, required: true },
    FieldSpec { field: FormField::Image, label: "Add the Image URL (Optional)", input: FieldInput::Text, required: false },
    FieldSpec { field: FormField::NumberOfRounds, label: "Number of Rounds", input: FieldInput::Numeric, required: true },
    FieldSpec { field: FormField::Role, label: "Role (e.g., Cloud Engineer)", input: FieldInput::Text, required: true },
    FieldSpec { field: FormField::OnCampusOrOffCampus, label: "On Campus or Off Campus", input: FieldInput::Picker(CAMPUS_CHOICES), required: true },
    FieldSpec { field: FormField::InterviewMode, label: "Interview Mode", input: FieldInput::Picker(MODE_CHOICES), required: true },
    FieldSpec { field: FormField::OfferStatus, label: "Offer Status", input: FieldInput::Picker(OFFER_CHOICES), required: true },
];

impl FormField {
    pub fn spec(self) -> &'static FieldSpec {
        FORM_FIELDS
            .iter()
            .find(|s| s.field == self)
            .unwrap_or(&FORM_FIELDS[0])
    }

    pub fn key(self) -> &'static str {
        match self {
            FormField::UserName => "userName",
            FormField::CompanyName => "companyName",
            FormField::CollegeName => "collegeName",
            FormField::YearOfHiring => "yearOfHiring",
            FormField::ExperienceDetails => "experienceDetails",
            FormField::Image => "image",
            FormField::NumberOfRounds => "numberOfRounds",
            FormField::Role => "role",
            FormField::OnCampusOrOffCampus => "onCampusOrOffCampus",
            FormField::InterviewMode => "interviewMode",
            FormField::OfferStatus => "offerStatus",
        }
    }
}

impl FromStr for FormField {
    type Err = ExpEaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FORM_FIELDS
            .iter()
            .map(|spec| spec.field)
            .find(|f| f.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| ExpEaseError::Form(format!("unknown field '{s}'")))
    }
}

/// Result shown to the user after a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "message", rename_all = "snake_case")]
pub enum SubmitOutcome {
    Submitted(String),
    Rejected(String),
    Failed(String),
}

impl SubmitOutcome {
    pub fn message(&self) -> &str {
        match self {
            SubmitOutcome::Submitted(m) | SubmitOutcome::Rejected(m) | SubmitOutcome::Failed(m) => m,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Submitted(_))
    }
}

/// Form state for sharing a new experience. Nothing is validated; required
/// markers are informational only.
pub struct ExperienceForm {
    source: Arc<dyn ExperienceSource>,
    values: NewExperience,
}

impl ExperienceForm {
    pub fn new(source: Arc<dyn ExperienceSource>) -> Self {
        Self { source, values: default_values() }
    }

    pub fn values(&self) -> &NewExperience {
        &self.values
    }

    pub fn get(&self, field: FormField) -> &str {
        let v = &self.values;
        match field {
            FormField::UserName => &v.user_name,
            FormField::CompanyName => &v.company_name,
            FormField::CollegeName => &v.college_name,
            FormField::YearOfHiring => &v.year_of_hiring,
            FormField::ExperienceDetails => &v.experience_details,
            FormField::Image => &v.image,
            FormField::NumberOfRounds => &v.number_of_rounds,
            FormField::Role => &v.role,
            FormField::OnCampusOrOffCampus => &v.on_campus_or_off_campus,
            FormField::InterviewMode => &v.interview_mode,
            FormField::OfferStatus => &v.offer_status,
        }
    }

    /// Set a field. Picker fields only take one of their listed choices.
    pub fn set(&mut self, field: FormField, value: impl Into<String>) -> ExpEaseResult<()> {
        let value = value.into();
        if let FieldInput::Picker(choices) = field.spec().input {
            if !choices.contains(&value.as_str()) {
                return Err(ExpEaseError::Form(format!(
                    "'{value}' is not a choice for {} ({})",
                    field.key(),
                    choices.join(", ")
                )));
            }
        }
        let v = &mut self.values;
        let slot = match field {
            FormField::UserName => &mut v.user_name,
            FormField::CompanyName => &mut v.company_name,
            FormField::CollegeName => &mut v.college_name,
            FormField::YearOfHiring => &mut v.year_of_hiring,
            FormField::ExperienceDetails => &mut v.experience_details,
            FormField::Image => &mut v.image,
            FormField::NumberOfRounds => &mut v.number_of_rounds,
            FormField::Role => &mut v.role,
            FormField::OnCampusOrOffCampus => &mut v.on_campus_or_off_campus,
            FormField::InterviewMode => &mut v.interview_mode,
            FormField::OfferStatus => &mut v.offer_status,
        };
        *slot = value;
        Ok(())
    }

    pub fn reset(&mut self) {
        self.values = default_values();
    }

    /// Post the current values. The form is cleared only on success.
    pub async fn submit(&mut self) -> SubmitOutcome {
        tracing::info!(company = %self.values.company_name, "submitting experience");
        match self.source.submit(&self.values).await {
            Ok(()) => {
                tracing::info!("experience submitted");
                self.reset();
                SubmitOutcome::Submitted(SUBMIT_SUCCESS.to_string())
            }
            Err(ExpEaseError::Status { status, body }) => {
                tracing::warn!(status, body = %body, "experience submission rejected");
                SubmitOutcome::Rejected(SUBMIT_REJECTED.to_string())
            }
            Err(e) => {
                tracing::error!(error = %e, "error submitting form");
                SubmitOutcome::Failed(SUBMIT_FAILED.to_string())
            }
        }
    }
}

fn default_values() -> NewExperience {
    NewExperience {
        on_campus_or_off_campus: CAMPUS_CHOICES[0].to_string(),
        interview_mode: MODE_CHOICES[0].to_string(),
        offer_status: OFFER_CHOICES[0].to_string(),
        ..NewExperience::default()
    }
}
