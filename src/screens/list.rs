use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::api::source::ExperienceSource;
use crate::api::types::ExperienceRecord;
use crate::errors::{ExpEaseError, ExpEaseResult};
use crate::navigation::{Navigator, Route};
use crate::screens::filter::filter_records;
use crate::screens::state::{
    ExperienceCard, ViewState, GENERIC_ERROR_MESSAGE, NO_RESULTS_MESSAGE,
};
use crate::theme::{Appearance, Subscription, Theme};

/// Which collection endpoint backs a list screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    All,
    Company(String),
}

impl Scope {
    async fn fetch(&self, source: &dyn ExperienceSource) -> ExpEaseResult<Vec<ExperienceRecord>> {
        match self {
            Scope::All => source.fetch_all().await,
            Scope::Company(name) => source.fetch_by_company(name).await,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Phase {
    Loading,
    Failed(String),
    Loaded,
}

/// Canonical collection plus the view derived from it.
struct ListModel {
    phase: Phase,
    canonical: Vec<ExperienceRecord>,
    query: String,
    filtered: Vec<ExperienceRecord>,
}

impl ListModel {
    fn new() -> Self {
        Self {
            phase: Phase::Loading,
            canonical: Vec::new(),
            query: String::new(),
            filtered: Vec::new(),
        }
    }

    fn refilter(&mut self) {
        self.filtered = filter_records(&self.canonical, &self.query);
    }
}

/// Construction parameters shared by the list screens.
#[derive(Debug, Clone)]
pub struct ListOptions {
    pub theme: Theme,
    pub placeholder_image: String,
    pub empty_message: String,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            placeholder_image: crate::config::DEFAULT_PLACEHOLDER_IMAGE.to_string(),
            empty_message: NO_RESULTS_MESSAGE.to_string(),
        }
    }
}

/// View model for a searchable list of experiences.
///
/// The collection is fetched once per mount and then filtered locally on
/// every query change. A fetch that completes after [`teardown`] (or after
/// the controller is dropped) is discarded without touching any state.
///
/// [`teardown`]: ExperienceListController::teardown
pub struct ExperienceListController {
    scope: Scope,
    source: Arc<dyn ExperienceSource>,
    navigator: Arc<dyn Navigator>,
    options: ListOptions,
    theme: RwLock<Theme>,
    model: Mutex<ListModel>,
    load_started: AtomicBool,
    mounted: AtomicBool,
    events: broadcast::Sender<ViewState>,
    appearance: Mutex<Option<Subscription>>,
}

impl ExperienceListController {
    pub fn new(
        scope: Scope,
        source: Arc<dyn ExperienceSource>,
        navigator: Arc<dyn Navigator>,
        options: ListOptions,
    ) -> Self {
        let (events, _rx) = broadcast::channel(64);
        Self {
            scope,
            source,
            navigator,
            theme: RwLock::new(options.theme.clone()),
            options,
            model: Mutex::new(ListModel::new()),
            load_started: AtomicBool::new(false),
            mounted: AtomicBool::new(true),
            events,
            appearance: Mutex::new(None),
        }
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn theme(&self) -> Theme {
        self.theme.read().clone()
    }

    /// Receive every view state published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<ViewState> {
        self.events.subscribe()
    }

    /// Follow system colour-scheme changes until teardown.
    pub fn follow_appearance(self: &Arc<Self>, appearance: &Appearance) {
        *self.theme.write() = appearance.theme();
        let weak = Arc::downgrade(self);
        let subscription = appearance.subscribe(move |theme| {
            if let Some(ctrl) = weak.upgrade() {
                tracing::debug!(scheme = ?theme.scheme, "list theme updated");
                *ctrl.theme.write() = theme;
            }
        });
        *self.appearance.lock() = Some(subscription);
    }

    fn begin_load(&self) -> bool {
        if self.load_started.swap(true, Ordering::SeqCst) {
            tracing::warn!(scope = ?self.scope, "load already issued for this mount; ignoring");
            return false;
        }
        tracing::info!(scope = ?self.scope, source = %self.source.name(), "fetching experiences");
        true
    }

    /// Fetch the collection and settle into a terminal state. Runs at most
    /// once per controller.
    pub async fn load(&self) {
        if !self.begin_load() {
            return;
        }
        let result = self.scope.fetch(self.source.as_ref()).await;
        self.finish_load(result);
    }

    /// Run [`load`](Self::load) on the runtime without keeping the
    /// controller alive. Returns `None` if a load was already issued.
    pub fn spawn_load(self: &Arc<Self>) -> Option<JoinHandle<()>> {
        if !self.begin_load() {
            return None;
        }
        let source = self.source.clone();
        let scope = self.scope.clone();
        let weak = Arc::downgrade(self);
        Some(tokio::spawn(async move {
            let result = scope.fetch(source.as_ref()).await;
            match weak.upgrade() {
                Some(ctrl) => ctrl.finish_load(result),
                None => tracing::debug!(scope = ?scope, "list dropped before fetch resolved"),
            }
        }))
    }

    fn finish_load(&self, result: ExpEaseResult<Vec<ExperienceRecord>>) {
        if !self.mounted.load(Ordering::SeqCst) {
            tracing::debug!(scope = ?self.scope, "fetch resolved after teardown; discarding");
            return;
        }
        {
            let mut model = self.model.lock();
            match result {
                Ok(records) => {
                    tracing::info!(scope = ?self.scope, count = records.len(), "experiences loaded");
                    model.canonical = records;
                    model.phase = Phase::Loaded;
                    model.refilter();
                }
                Err(e) => {
                    tracing::error!(
                        scope = ?self.scope,
                        kind = ?e.fetch_kind(),
                        error = %e,
                        "failed to load experiences"
                    );
                    model.phase = Phase::Failed(error_message(&e));
                }
            }
        }
        self.publish();
    }

    /// Replace the search query and recompute the filtered view.
    pub fn set_search_query(&self, query: impl Into<String>) {
        {
            let mut model = self.model.lock();
            model.query = query.into();
            model.refilter();
            tracing::debug!(
                query = %model.query,
                matched = model.filtered.len(),
                "search query changed"
            );
        }
        self.publish();
    }

    /// Hand off to the detail screen.
    pub fn select_record(&self, id: &str) {
        self.navigator.push(Route::ExperienceDetail { id: id.to_string() });
    }

    pub fn query(&self) -> String {
        self.model.lock().query.clone()
    }

    /// Everything the last successful fetch returned.
    pub fn canonical(&self) -> Vec<ExperienceRecord> {
        self.model.lock().canonical.clone()
    }

    pub fn filtered(&self) -> Vec<ExperienceRecord> {
        self.model.lock().filtered.clone()
    }

    pub fn view_state(&self) -> ViewState {
        let model = self.model.lock();
        match &model.phase {
            Phase::Loading => ViewState::Loading,
            Phase::Failed(message) => ViewState::Error { message: message.clone() },
            Phase::Loaded if model.filtered.is_empty() => ViewState::Empty {
                message: self.options.empty_message.clone(),
            },
            Phase::Loaded => ViewState::Populated {
                cards: model
                    .filtered
                    .iter()
                    .map(|r| ExperienceCard::from_record(r, &self.options.placeholder_image))
                    .collect(),
            },
        }
    }

    fn publish(&self) {
        let state = self.view_state();
        // No subscribers is fine.
        let _ = self.events.send(state);
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }

    /// Unmount: late fetch results are dropped and the appearance
    /// subscription is released.
    pub fn teardown(&self) {
        if self.mounted.swap(false, Ordering::SeqCst) {
            tracing::debug!(scope = ?self.scope, "list torn down");
        }
        self.appearance.lock().take();
    }
}

impl Drop for ExperienceListController {
    fn drop(&mut self) {
        self.mounted.store(false, Ordering::SeqCst);
    }
}

fn error_message(err: &ExpEaseError) -> String {
    err.user_message()
        .filter(|m| !m.trim().is_empty())
        .unwrap_or(GENERIC_ERROR_MESSAGE)
        .to_string()
}
