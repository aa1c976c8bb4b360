pub mod http;
pub mod source;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use http::HttpExperienceSource;
pub use source::ExperienceSource;
pub use types::{ExperienceRecord, NewExperience, YearOfHiring};
