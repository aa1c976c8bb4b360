use std::time::Duration;

use async_trait::async_trait;
use reqwest::{StatusCode, Url};

use crate::api::source::ExperienceSource;
use crate::api::types::{
    ExperienceDetailResponse, ExperienceListResponse, ExperienceRecord, NewExperience,
};
use crate::config::ApiConfig;
use crate::errors::{ExpEaseError, ExpEaseResult};

const ALL_EXPERIENCES: &[&str] = &["experience", "allexperiencedata"];
const BY_COMPANY: &[&str] = &["experience", "company"];
const BY_ID: &[&str] = &["experience", "company", "experience"];
const SUBMIT: &[&str] = &["experience", "experienceform"];

/// `reqwest` client for the ExpEase backend.
pub struct HttpExperienceSource {
    id: String,
    base: Url,
    client: reqwest::Client,
}

impl HttpExperienceSource {
    pub fn new(base_url: &str) -> ExpEaseResult<Self> {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn from_config(config: &ApiConfig) -> ExpEaseResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Self::with_client(&config.base_url, builder.build()?)
    }

    pub fn with_client(base_url: &str, client: reqwest::Client) -> ExpEaseResult<Self> {
        let base = Url::parse(base_url)
            .map_err(|e| ExpEaseError::Config(format!("invalid base url '{base_url}': {e}")))?;
        if base.cannot_be_a_base() {
            return Err(ExpEaseError::Config(format!("'{base_url}' cannot be used as a base url")));
        }
        Ok(Self {
            id: base.host_str().unwrap_or("backend").to_string(),
            base,
            client,
        })
    }

    /// Base url joined with `segments`, each percent-encoded as one path segment.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_list(&self, url: Url) -> ExpEaseResult<Vec<ExperienceRecord>> {
        tracing::debug!(source = %self.id, url = %url, "GET experience list");
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        parse_list_body(status, &body)
    }
}

#[async_trait]
impl ExperienceSource for HttpExperienceSource {
    fn name(&self) -> &str {
        &self.id
    }

    async fn fetch_all(&self) -> ExpEaseResult<Vec<ExperienceRecord>> {
        self.get_list(self.endpoint(ALL_EXPERIENCES)).await
    }

    async fn fetch_by_company(&self, company_name: &str) -> ExpEaseResult<Vec<ExperienceRecord>> {
        let mut segments = BY_COMPANY.to_vec();
        segments.push(company_name);
        self.get_list(self.endpoint(&segments)).await
    }

    async fn fetch_by_id(&self, id: &str) -> ExpEaseResult<ExperienceRecord> {
        let mut segments = BY_ID.to_vec();
        segments.push(id);
        let url = self.endpoint(&segments);
        tracing::debug!(source = %self.id, url = %url, "GET experience");
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        parse_detail_body(status, &body, id)
    }

    async fn submit(&self, experience: &NewExperience) -> ExpEaseResult<()> {
        let url = self.endpoint(SUBMIT);
        tracing::debug!(
            source = %self.id,
            url = %url,
            company = %experience.company_name,
            "POST experience form"
        );
        let response = self.client.post(url).json(experience).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExpEaseError::Status { status: status.as_u16(), body });
        }
        Ok(())
    }
}

/// Interpret a collection endpoint response.
pub fn parse_list_body(status: StatusCode, body: &str) -> ExpEaseResult<Vec<ExperienceRecord>> {
    if !status.is_success() {
        return Err(ExpEaseError::Status { status: status.as_u16(), body: body.to_string() });
    }
    let parsed: ExperienceListResponse = serde_json::from_str(body)?;
    parsed.into_records()
}

/// Interpret the single-record endpoint response.
pub fn parse_detail_body(
    status: StatusCode,
    body: &str,
    id: &str,
) -> ExpEaseResult<ExperienceRecord> {
    if status == StatusCode::NOT_FOUND {
        return Err(ExpEaseError::NotFound(id.to_string()));
    }
    if !status.is_success() {
        return Err(ExpEaseError::Status { status: status.as_u16(), body: body.to_string() });
    }
    let parsed: ExperienceDetailResponse = serde_json::from_str(body)?;
    parsed.into_record(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FetchErrorKind;

    fn source() -> HttpExperienceSource {
        HttpExperienceSource::new("https://exp-ease-backend.vercel.app/api/v1").unwrap()
    }

    #[test]
    fn builds_endpoints_under_base_path() {
        let s = source();
        assert_eq!(
            s.endpoint(ALL_EXPERIENCES).as_str(),
            "https://exp-ease-backend.vercel.app/api/v1/experience/allexperiencedata"
        );
        assert_eq!(
            s.endpoint(SUBMIT).as_str(),
            "https://exp-ease-backend.vercel.app/api/v1/experience/experienceform"
        );
        assert_eq!(s.name(), "exp-ease-backend.vercel.app");
    }

    #[test]
    fn trailing_slash_in_base_is_ignored() {
        let s = HttpExperienceSource::new("http://localhost:4000/api/v1/").unwrap();
        assert_eq!(
            s.endpoint(&["experience", "company", "experience", "42"]).as_str(),
            "http://localhost:4000/api/v1/experience/company/experience/42"
        );
    }

    #[test]
    fn company_names_are_encoded_as_one_segment() {
        let s = source();
        let url = s.endpoint(&["experience", "company", "Tata Consultancy/Services"]);
        assert_eq!(
            url.path(),
            "/api/v1/experience/company/Tata%20Consultancy%2FServices"
        );
    }

    #[test]
    fn rejects_non_base_url() {
        assert!(matches!(
            HttpExperienceSource::new("mailto:someone@example.com"),
            Err(ExpEaseError::Config(_))
        ));
    }

    #[test]
    fn list_body_success() {
        let body = r#"{"success":true,"experiences":[{"_id":"1","companyName":"TCS","yearOfHiring":2021}]}"#;
        let records = parse_list_body(StatusCode::OK, body).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].company_name, "TCS");
    }

    #[test]
    fn list_body_failures_are_classified() {
        let status = parse_list_body(StatusCode::INTERNAL_SERVER_ERROR, "oops").unwrap_err();
        assert_eq!(status.fetch_kind(), FetchErrorKind::NetworkFailure);

        let malformed = parse_list_body(StatusCode::OK, "<html>").unwrap_err();
        assert_eq!(malformed.fetch_kind(), FetchErrorKind::MalformedResponse);

        let app = parse_list_body(StatusCode::OK, r#"{"success":false}"#).unwrap_err();
        assert_eq!(app.fetch_kind(), FetchErrorKind::ApplicationError);
    }

    #[test]
    fn detail_body_not_found() {
        let err = parse_detail_body(StatusCode::NOT_FOUND, "", "x1").unwrap_err();
        assert!(matches!(err, ExpEaseError::NotFound(id) if id == "x1"));

        let rec = parse_detail_body(
            StatusCode::OK,
            r#"{"experience":{"_id":"x1","companyName":"Epam"}}"#,
            "x1",
        )
        .unwrap();
        assert_eq!(rec.company_name, "Epam");
    }
}
