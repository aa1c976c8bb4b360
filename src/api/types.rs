use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::{ExpEaseError, ExpEaseResult};

/// One submitted interview experience as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceRecord {
    #[serde(rename = "_id", alias = "id", deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub company_name: String,
    #[serde(
        default,
        rename = "userName",
        alias = "nameOfTheStudent",
        alias = "studentName",
        deserialize_with = "nullable"
    )]
    pub student_name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub college_name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub role: String,
    #[serde(default, deserialize_with = "nullable")]
    pub interview_mode: String,
    #[serde(default, deserialize_with = "nullable")]
    pub offer_status: String,
    #[serde(default, deserialize_with = "nullable")]
    pub year_of_hiring: YearOfHiring,
    #[serde(default, deserialize_with = "lenient_count")]
    pub number_of_rounds: u32,
    #[serde(default, rename = "image", alias = "imageUrl")]
    pub image_url: Option<String>,
    #[serde(
        default,
        rename = "experienceDetails",
        alias = "details",
        deserialize_with = "nullable"
    )]
    pub details: String,
    #[serde(
        default,
        rename = "onCampusOrOffCampus",
        skip_serializing_if = "Option::is_none"
    )]
    pub campus_type: Option<String>,
}

impl ExperienceRecord {
    /// Image to display, or `placeholder` when the record has none.
    pub fn image_or<'a>(&'a self, placeholder: &'a str) -> &'a str {
        match self.image_url.as_deref() {
            Some(url) if !url.trim().is_empty() => url,
            _ => placeholder,
        }
    }
}

/// Hiring year. The backend sends either a number or a string; numeric
/// strings are stored as numbers, anything else is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum YearOfHiring {
    Year(i64),
    Text(String),
}

impl YearOfHiring {
    pub fn year(&self) -> Option<i64> {
        match self {
            YearOfHiring::Year(y) => Some(*y),
            YearOfHiring::Text(_) => None,
        }
    }
}

impl Default for YearOfHiring {
    fn default() -> Self {
        YearOfHiring::Text(String::new())
    }
}

/// Canonical text form, used for both display and filtering.
impl fmt::Display for YearOfHiring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YearOfHiring::Year(y) => write!(f, "{y}"),
            YearOfHiring::Text(s) => f.write_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for YearOfHiring {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        RawYear::deserialize(deserializer).map(Into::into)
    }
}

impl From<i64> for YearOfHiring {
    fn from(year: i64) -> Self {
        YearOfHiring::Year(year)
    }
}

impl From<&str> for YearOfHiring {
    fn from(text: &str) -> Self {
        RawYear::Text(text.to_string()).into()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawYear {
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<RawYear> for YearOfHiring {
    fn from(raw: RawYear) -> Self {
        match raw {
            RawYear::Int(y) => YearOfHiring::Year(y),
            RawYear::Float(f) if f.fract() == 0.0 => YearOfHiring::Year(f as i64),
            RawYear::Float(f) => YearOfHiring::Text(f.to_string()),
            RawYear::Text(s) => match s.parse::<i64>() {
                Ok(y) => YearOfHiring::Year(y),
                Err(_) => YearOfHiring::Text(s),
            },
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Text(String),
    Int(i64),
    Float(f64),
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::Text(s) => s,
        StringOrNumber::Int(n) => n.to_string(),
        StringOrNumber::Float(f) => f.to_string(),
    })
}

fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Round counts arrive as numbers or as the text typed into the form.
/// Unparseable text counts as zero.
fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<StringOrNumber>::deserialize(deserializer)? {
        Some(StringOrNumber::Int(n)) => u32::try_from(n).unwrap_or(0),
        Some(StringOrNumber::Float(f)) if f >= 0.0 => f as u32,
        Some(StringOrNumber::Text(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

/// Body of the collection endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ExperienceListResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub experiences: Option<Vec<ExperienceRecord>>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ExperienceListResponse {
    /// Apply the success contract: the flag must be true and the array present.
    pub fn into_records(self) -> ExpEaseResult<Vec<ExperienceRecord>> {
        if !self.success {
            return Err(ExpEaseError::Application { message: self.message });
        }
        self.experiences.ok_or_else(|| {
            ExpEaseError::MalformedResponse("success response without `experiences`".into())
        })
    }
}

/// Body of the single-record endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ExperienceDetailResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub experience: Option<ExperienceRecord>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ExperienceDetailResponse {
    pub fn into_record(self, id: &str) -> ExpEaseResult<ExperienceRecord> {
        if self.success == Some(false) {
            return Err(ExpEaseError::Application { message: self.message });
        }
        self.experience.ok_or_else(|| ExpEaseError::NotFound(id.to_string()))
    }
}

/// Writable subset of a record, posted by the submit form. Values are sent
/// as entered.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExperience {
    pub user_name: String,
    pub company_name: String,
    pub college_name: String,
    pub on_campus_or_off_campus: String,
    pub year_of_hiring: String,
    pub experience_details: String,
    pub image: String,
    pub number_of_rounds: String,
    pub role: String,
    pub interview_mode: String,
    pub offer_status: String,
}
