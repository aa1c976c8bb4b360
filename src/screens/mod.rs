pub mod company;
pub mod detail;
pub mod filter;
pub mod form;
pub mod home;
pub mod list;
pub mod state;

pub use company::CompanyExperiencesController;
pub use detail::{DetailController, DetailState};
pub use form::{ExperienceForm, FormField, SubmitOutcome};
pub use home::HomeScreen;
pub use list::{ExperienceListController, ListOptions, Scope};
pub use state::{ExperienceCard, ViewState};
