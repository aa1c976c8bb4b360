use async_trait::async_trait;

use crate::api::types::{ExperienceRecord, NewExperience};
use crate::errors::ExpEaseResult;

/// Remote store of interview experiences. The HTTP client is the production
/// implementation; view models only ever see this trait.
#[async_trait]
pub trait ExperienceSource: Send + Sync {
    /// Identifier used in logs.
    fn name(&self) -> &str;

    /// Every experience, in the order the backend returns them.
    async fn fetch_all(&self) -> ExpEaseResult<Vec<ExperienceRecord>>;

    /// Experiences for one company.
    async fn fetch_by_company(&self, company_name: &str) -> ExpEaseResult<Vec<ExperienceRecord>>;

    /// A single experience by id. Unknown ids yield `ExpEaseError::NotFound`.
    async fn fetch_by_id(&self, id: &str) -> ExpEaseResult<ExperienceRecord>;

    /// Post a new experience. Does not return the stored record.
    async fn submit(&self, experience: &NewExperience) -> ExpEaseResult<()>;
}
