use std::sync::Arc;

use crate::api::source::ExperienceSource;
use crate::navigation::Navigator;
use crate::screens::list::{ExperienceListController, ListOptions, Scope};
use crate::screens::state::ViewState;
use crate::theme::Theme;

/// Experiences for a single company, reached from the featured-company row.
pub struct CompanyExperiencesController {
    company_name: String,
    list: Arc<ExperienceListController>,
}

impl CompanyExperiencesController {
    pub fn new(
        company_name: impl Into<String>,
        source: Arc<dyn ExperienceSource>,
        navigator: Arc<dyn Navigator>,
        theme: Theme,
        placeholder_image: impl Into<String>,
    ) -> Self {
        let company_name = company_name.into();
        let options = ListOptions {
            theme,
            placeholder_image: placeholder_image.into(),
            empty_message: format!("No experiences available for {company_name}."),
        };
        let list = Arc::new(ExperienceListController::new(
            Scope::Company(company_name.clone()),
            source,
            navigator,
            options,
        ));
        Self { company_name, list }
    }

    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    pub fn title(&self) -> String {
        format!("Experiences with {}", self.company_name)
    }

    pub async fn load(&self) {
        self.list.load().await;
    }

    pub fn view_state(&self) -> ViewState {
        self.list.view_state()
    }

    pub fn select_record(&self, id: &str) {
        self.list.select_record(id);
    }

    /// Underlying list, for search, subscriptions and teardown.
    pub fn list(&self) -> &Arc<ExperienceListController> {
        &self.list
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{record, FakeSource};
    use crate::errors::ExpEaseError;
    use crate::navigation::testing::RecordingNavigator;
    use crate::navigation::Route;

    fn screen(source: Arc<FakeSource>, company: &str) -> (CompanyExperiencesController, Arc<RecordingNavigator>) {
        let nav = Arc::new(RecordingNavigator::default());
        let ctrl = CompanyExperiencesController::new(
            company,
            source,
            nav.clone(),
            Theme::default(),
            "https://ph",
        );
        (ctrl, nav)
    }

    #[tokio::test]
    async fn loads_only_the_requested_company() {
        let source = Arc::new(FakeSource::returning(vec![
            record("1", "TCS", "XYZ", 2021),
            record("2", "Infosys", "ABC", 2022),
            record("3", "TCS", "PQR", 2023),
        ]));
        let (ctrl, nav) = screen(source.clone(), "TCS");
        assert_eq!(ctrl.title(), "Experiences with TCS");

        ctrl.load().await;
        let ids: Vec<_> = ctrl.view_state().cards().iter().map(|c| c.id.clone()).collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert_eq!(*source.companies.lock(), vec!["TCS".to_string()]);

        ctrl.select_record("3");
        assert_eq!(*nav.routes.lock(), vec![Route::ExperienceDetail { id: "3".into() }]);
    }

    #[tokio::test]
    async fn empty_company_has_its_own_message() {
        let source = Arc::new(FakeSource::returning(vec![record("1", "TCS", "XYZ", 2021)]));
        let (ctrl, _) = screen(source, "Afford");
        ctrl.load().await;
        assert_eq!(
            ctrl.view_state(),
            ViewState::Empty { message: "No experiences available for Afford.".into() }
        );
    }

    #[tokio::test]
    async fn failure_is_error_state() {
        let source = Arc::new(FakeSource::failing(|| ExpEaseError::MalformedResponse("bad".into())));
        let (ctrl, _) = screen(source, "PWC");
        ctrl.load().await;
        assert!(ctrl.view_state().is_error());
    }
}
