pub mod cli;
pub mod render;

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{broadcast, mpsc};

use crate::api::{ExperienceSource, HttpExperienceSource};
use crate::config::AppConfig;
use crate::errors::{ExpEaseError, ExpEaseResult};
use crate::navigation::{ChannelNavigator, Navigator, Route};
use crate::screens::{
    CompanyExperiencesController, DetailController, ExperienceForm, ExperienceListController,
    HomeScreen, ListOptions, Scope,
};
use crate::theme::{Appearance, ColorScheme};

use self::cli::Command;

/// Everything the terminal screens share.
pub struct Shell {
    config: AppConfig,
    source: Arc<dyn ExperienceSource>,
    appearance: Appearance,
    navigator: Arc<ChannelNavigator>,
    routes: mpsc::UnboundedReceiver<Route>,
}

impl Shell {
    pub fn new(config: AppConfig, scheme: Option<ColorScheme>) -> ExpEaseResult<Self> {
        let source: Arc<dyn ExperienceSource> =
            Arc::new(HttpExperienceSource::from_config(&config.api)?);
        Ok(Self::with_source(config, source, scheme))
    }

    pub fn with_source(
        config: AppConfig,
        source: Arc<dyn ExperienceSource>,
        scheme: Option<ColorScheme>,
    ) -> Self {
        let appearance = Appearance::new(scheme.unwrap_or(config.ui.color_scheme));
        let (navigator, routes) = ChannelNavigator::new();
        Self {
            config,
            source,
            appearance,
            navigator: Arc::new(navigator),
            routes,
        }
    }

    fn list_options(&self) -> ListOptions {
        ListOptions {
            theme: self.appearance.theme(),
            placeholder_image: self.config.ui.placeholder_image_url.clone(),
            ..ListOptions::default()
        }
    }

    fn list_controller(&self) -> Arc<ExperienceListController> {
        Arc::new(ExperienceListController::new(
            Scope::All,
            self.source.clone(),
            self.navigator.clone(),
            self.list_options(),
        ))
    }

    pub async fn execute(&mut self, command: Command) -> ExpEaseResult<()> {
        match command {
            Command::List { query } => {
                let list = self.list_controller();
                list.set_search_query(query);
                list.load().await;
                print!("{}", render::view_state("Experiences", &list.view_state()));
                list.teardown();
            }
            Command::Browse => self.browse().await?,
            Command::Company { name } => self.show_company(&name).await,
            Command::Show { id } => self.show_detail(&id).await,
            Command::Companies => {
                let home = HomeScreen::new(self.navigator.clone());
                print!("{}", render::companies(home.companies()));
            }
            Command::Fields => print!("{}", render::form_fields()),
            Command::Submit { values } => {
                let mut form = ExperienceForm::new(self.source.clone());
                for (field, value) in values {
                    form.set(field, value)?;
                }
                let outcome = form.submit().await;
                println!("{}", outcome.message());
                if !outcome.is_success() {
                    return Err(ExpEaseError::Form(outcome.message().to_string()));
                }
            }
        }
        Ok(())
    }

    async fn show_company(&self, name: &str) {
        let screen = CompanyExperiencesController::new(
            name,
            self.source.clone(),
            self.navigator.clone(),
            self.appearance.theme(),
            self.config.ui.placeholder_image_url.clone(),
        );
        screen.load().await;
        print!("{}", render::view_state(&screen.title(), &screen.view_state()));
        screen.list().teardown();
    }

    async fn show_detail(&self, id: &str) {
        let screen = DetailController::new(
            id,
            self.source.clone(),
            self.appearance.theme(),
            self.config.ui.placeholder_image_url.clone(),
        );
        screen.load().await;
        print!("{}", render::detail(&screen.state()));
    }

    /// Interactive list. Plain lines replace the search query; `:open <id>`
    /// reads an experience, `:company <name>` opens a company, `:q` quits.
    async fn browse(&mut self) -> ExpEaseResult<()> {
        let list = self.list_controller();
        list.follow_appearance(&self.appearance);
        let mut states = list.subscribe();
        print!("{}", render::view_state("Experiences", &list.view_state()));
        list.spawn_load();

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            tokio::select! {
                state = states.recv() => match state {
                    Ok(state) => print!("{}", render::view_state("", &state)),
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::debug!(skipped, "renderer lagged behind list updates");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                },
                line = lines.next_line() => {
                    let Some(line) = line? else { break };
                    let cmd = line.trim().to_string();
                    if cmd == ":q" || cmd == ":quit" {
                        break;
                    } else if let Some(id) = cmd.strip_prefix(":open ") {
                        list.select_record(id.trim());
                    } else if let Some(name) = cmd.strip_prefix(":company ") {
                        HomeScreen::new(self.navigator.clone()).select_company(name.trim());
                    } else if cmd == ":dark" {
                        self.appearance.set(ColorScheme::Dark);
                    } else if cmd == ":light" {
                        self.appearance.set(ColorScheme::Light);
                    } else {
                        list.set_search_query(line);
                    }
                    self.follow_routes().await;
                }
            }
        }
        list.teardown();
        Ok(())
    }

    /// Render any screens requested since the last call.
    async fn follow_routes(&mut self) {
        while let Ok(route) = self.routes.try_recv() {
            println!("-> {route}");
            match route {
                Route::ExperienceDetail { id } => self.show_detail(&id).await,
                Route::CompanyExperiences { company_name } => self.show_company(&company_name).await,
                Route::SubmitForm => print!("{}", render::form_fields()),
                Route::Home | Route::Information => {
                    print!("{}", render::companies(crate::screens::home::FEATURED_COMPANIES));
                }
            }
        }
    }

    pub fn navigator(&self) -> Arc<dyn Navigator> {
        self.navigator.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{sample, FakeSource};
    use crate::screens::form::FormField;

    fn shell(source: Arc<FakeSource>) -> Shell {
        Shell::with_source(AppConfig::default(), source, None)
    }

    #[tokio::test]
    async fn list_command_fetches_once() {
        let source = Arc::new(FakeSource::returning(sample()));
        let mut sh = shell(source.clone());
        sh.execute(Command::List { query: "tcs".into() }).await.unwrap();
        assert_eq!(source.call_count(), 1);
    }

    #[tokio::test]
    async fn submit_command_reports_rejection() {
        let source = Arc::new(FakeSource::returning(Vec::new()).submit_status(400));
        let mut sh = shell(source.clone());
        let res = sh
            .execute(Command::Submit {
                values: vec![(FormField::CompanyName, "TCS".into())],
            })
            .await;
        assert!(matches!(res, Err(ExpEaseError::Form(_))));
        assert_eq!(source.submissions.lock()[0].company_name, "TCS");
    }

    #[tokio::test]
    async fn routes_are_drained_after_navigation() {
        let source = Arc::new(FakeSource::returning(sample()));
        let mut sh = shell(source.clone());
        sh.navigator().push(Route::ExperienceDetail { id: "1".into() });
        sh.follow_routes().await;
        assert!(sh.routes.try_recv().is_err());
        assert_eq!(source.call_count(), 1);
    }
}
