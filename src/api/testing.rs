//! In-process `ExperienceSource` used by the view-model tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Notify;

use crate::api::source::ExperienceSource;
use crate::api::types::{ExperienceRecord, NewExperience, YearOfHiring};
use crate::errors::{ExpEaseError, ExpEaseResult};

pub(crate) fn record(id: &str, company: &str, college: &str, year: i64) -> ExperienceRecord {
    ExperienceRecord {
        id: id.to_string(),
        company_name: company.to_string(),
        student_name: format!("student {id}"),
        college_name: college.to_string(),
        role: "Engineer".to_string(),
        interview_mode: "Online".to_string(),
        offer_status: "Offer".to_string(),
        year_of_hiring: YearOfHiring::Year(year),
        number_of_rounds: 3,
        image_url: None,
        details: format!("details for {id}"),
        campus_type: None,
    }
}

/// The two-record collection used throughout the tests.
pub(crate) fn sample() -> Vec<ExperienceRecord> {
    vec![record("1", "TCS", "XYZ", 2021), record("2", "Infosys", "ABC", 2022)]
}

type Outcome = Box<dyn Fn() -> ExpEaseResult<Vec<ExperienceRecord>> + Send + Sync>;

pub(crate) struct FakeSource {
    outcome: Outcome,
    gate: Option<Arc<Notify>>,
    submit_status: Option<u16>,
    pub calls: AtomicUsize,
    pub companies: Mutex<Vec<String>>,
    pub submissions: Mutex<Vec<NewExperience>>,
}

impl FakeSource {
    pub fn returning(records: Vec<ExperienceRecord>) -> Self {
        Self::with(move || Ok(records.clone()))
    }

    pub fn failing<F>(make_err: F) -> Self
    where
        F: Fn() -> ExpEaseError + Send + Sync + 'static,
    {
        Self::with(move || Err(make_err()))
    }

    fn with<F>(outcome: F) -> Self
    where
        F: Fn() -> ExpEaseResult<Vec<ExperienceRecord>> + Send + Sync + 'static,
    {
        Self {
            outcome: Box::new(outcome),
            gate: None,
            submit_status: None,
            calls: AtomicUsize::new(0),
            companies: Mutex::new(Vec::new()),
            submissions: Mutex::new(Vec::new()),
        }
    }

    /// Hold every fetch until the returned notifier fires.
    pub fn gated(mut self) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        self.gate = Some(gate.clone());
        (self, gate)
    }

    /// Make `submit` answer with this HTTP status.
    pub fn submit_status(mut self, status: u16) -> Self {
        self.submit_status = Some(status);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn produce(&self) -> ExpEaseResult<Vec<ExperienceRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        (self.outcome)()
    }
}

#[async_trait]
impl ExperienceSource for FakeSource {
    fn name(&self) -> &str {
        "fake"
    }

    async fn fetch_all(&self) -> ExpEaseResult<Vec<ExperienceRecord>> {
        self.produce().await
    }

    async fn fetch_by_company(&self, company_name: &str) -> ExpEaseResult<Vec<ExperienceRecord>> {
        self.companies.lock().push(company_name.to_string());
        let records = self.produce().await?;
        Ok(records
            .into_iter()
            .filter(|r| r.company_name.eq_ignore_ascii_case(company_name))
            .collect())
    }

    async fn fetch_by_id(&self, id: &str) -> ExpEaseResult<ExperienceRecord> {
        let records = self.produce().await?;
        records
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| ExpEaseError::NotFound(id.to_string()))
    }

    async fn submit(&self, experience: &NewExperience) -> ExpEaseResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.submissions.lock().push(experience.clone());
        match self.submit_status {
            Some(status) if !(200..300).contains(&status) => {
                Err(ExpEaseError::Status { status, body: String::new() })
            }
            _ => Ok(()),
        }
    }
}
