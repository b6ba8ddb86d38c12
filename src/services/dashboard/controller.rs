//! Event loop tying the dashboard state machines to the backend.
//!
//! One task owns all dashboard state. Presentation code talks to it through a
//! [`DashboardHandle`]: inputs go in over an mpsc channel, and every state
//! change is published as a fresh [`DashboardView`] on a watch channel.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::{Instant, sleep_until};

use crate::domain::filters::{DashboardFilters, QueryKey};
use crate::domain::page::PageResult;
use crate::domain::profile::Profile;
use crate::domain::session::SessionUser;
use crate::domain::types::PaymentStatus;
use crate::dto::dashboard::{
    DashboardCounts, DashboardView, GENERIC_ERROR, ProfileSummary, filter_tabs,
};
use crate::models::config::AppConfig;
use crate::query_cache::QueryCache;
use crate::repository::{BookingReader, Navigator, ProfileReader, SessionGateway};
use crate::services::ServiceResult;
use crate::services::dashboard::autoload::{AutoLoader, COOLDOWN, LINGER, LoadConditions};
use crate::services::dashboard::debounce::{SEARCH_DEBOUNCE, SearchDebounce};
use crate::services::dashboard::pagination::{PAGE_SIZE, PageCollection, fetch_page};
use crate::services::dashboard::refine::refine;
use crate::services::profile::load_profile;
use crate::services::session::{DEFAULT_LOGIN_PATH, SessionOutcome, guard_session};

/// Tunables for one dashboard instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardSettings {
    pub page_size: u32,
    pub debounce: Duration,
    pub linger: Duration,
    pub cooldown: Duration,
    pub handoff_url: String,
    pub login_path: String,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            page_size: PAGE_SIZE,
            debounce: SEARCH_DEBOUNCE,
            linger: LINGER,
            cooldown: COOLDOWN,
            handoff_url: "http://localhost:3001/".to_string(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
        }
    }
}

impl DashboardSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            page_size: config.dashboard.page_size,
            debounce: config.dashboard.debounce(),
            linger: config.dashboard.linger(),
            cooldown: config.dashboard.cooldown(),
            handoff_url: config.handoff_url.clone(),
            login_path: config.login_path.clone(),
        }
    }
}

#[derive(Debug)]
enum DashboardEvent {
    SearchInput(String),
    PaymentStatus(PaymentStatus),
    Sentinel(bool),
    LoadMore,
    Shutdown,
}

enum FetchOutcome {
    Page {
        key: QueryKey,
        page: u32,
        result: ServiceResult<PageResult>,
    },
    Profile(ServiceResult<Profile>),
    Session(Option<SessionOutcome>),
}

/// Client side of a running dashboard.
///
/// Dropping the handle stops the controller as well.
pub struct DashboardHandle {
    events: mpsc::UnboundedSender<DashboardEvent>,
    view: watch::Receiver<DashboardView>,
    task: Option<JoinHandle<()>>,
}

impl DashboardHandle {
    fn send(&self, event: DashboardEvent) {
        if self.events.send(event).is_err() {
            log::warn!("Dashboard controller is no longer running");
        }
    }

    /// Live search input; committed after the debounce window.
    pub fn type_search(&self, term: impl Into<String>) {
        self.send(DashboardEvent::SearchInput(term.into()));
    }

    pub fn select_status(&self, status: PaymentStatus) {
        self.send(DashboardEvent::PaymentStatus(status));
    }

    /// Reports whether the end-of-list sentinel is inside the viewport.
    pub fn sentinel_visible(&self, visible: bool) {
        self.send(DashboardEvent::Sentinel(visible));
    }

    /// Manual "load more".
    pub fn load_more(&self) {
        self.send(DashboardEvent::LoadMore);
    }

    /// Latest published view.
    pub fn view(&self) -> DashboardView {
        self.view.borrow().clone()
    }

    /// Waits for the next published view. Returns `false` once the
    /// controller has stopped.
    pub async fn changed(&mut self) -> bool {
        self.view.changed().await.is_ok()
    }

    pub fn subscribe(&self) -> watch::Receiver<DashboardView> {
        self.view.clone()
    }

    /// Stops the controller and waits for it to wind down.
    pub async fn shutdown(mut self) {
        self.send(DashboardEvent::Shutdown);
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                log::error!("Dashboard controller task failed: {e}");
            }
        }
    }
}

pub struct DashboardController<R, N> {
    repo: Arc<R>,
    navigator: Arc<N>,
    settings: DashboardSettings,
    user: Option<SessionUser>,
    debounce: SearchDebounce,
    autoload: AutoLoader,
    /// Page fetch the auto-loader is waiting on.
    autoload_fetch: Option<(QueryKey, u32)>,
    filters: DashboardFilters,
    sentinel_visible: bool,
    pages: QueryCache<QueryKey, PageCollection>,
    in_flight: HashSet<(QueryKey, u32)>,
    profile: Option<Profile>,
    session: Option<SessionOutcome>,
    fetches: JoinSet<FetchOutcome>,
    view: watch::Sender<DashboardView>,
}

impl<R, N> DashboardController<R, N>
where
    R: BookingReader + ProfileReader + SessionGateway + Send + Sync + 'static,
    N: Navigator + Send + Sync + 'static,
{
    /// Starts the dashboard on the current tokio runtime.
    pub fn spawn(
        repo: R,
        navigator: N,
        settings: DashboardSettings,
        user: Option<SessionUser>,
    ) -> DashboardHandle {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (view_tx, view_rx) = watch::channel(DashboardView::default());

        let controller = Self {
            repo: Arc::new(repo),
            navigator: Arc::new(navigator),
            debounce: SearchDebounce::new(settings.debounce),
            autoload: AutoLoader::new(settings.linger, settings.cooldown),
            settings,
            user,
            autoload_fetch: None,
            filters: DashboardFilters::default(),
            sentinel_visible: false,
            pages: QueryCache::unbounded(),
            in_flight: HashSet::new(),
            profile: None,
            session: None,
            fetches: JoinSet::new(),
            view: view_tx,
        };

        let task = tokio::spawn(controller.run(events_rx));

        DashboardHandle {
            events: events_tx,
            view: view_rx,
            task: Some(task),
        }
    }

    async fn run(mut self, mut events: mpsc::UnboundedReceiver<DashboardEvent>) {
        self.mount();
        self.step(Instant::now());

        loop {
            let deadline = self.next_deadline();
            let wake_at = deadline.unwrap_or_else(Instant::now);

            tokio::select! {
                event = events.recv() => match event {
                    Some(DashboardEvent::Shutdown) | None => break,
                    Some(event) => self.handle_event(event, Instant::now()),
                },
                Some(joined) = self.fetches.join_next(), if !self.fetches.is_empty() => {
                    match joined {
                        Ok(outcome) => self.handle_outcome(outcome, Instant::now()),
                        Err(e) => log::error!("Dashboard fetch task failed: {e}"),
                    }
                }
                _ = sleep_until(wake_at), if deadline.is_some() => {
                    let now = Instant::now();
                    if let Some(term) = self.debounce.poll(now) {
                        self.filters.search = term;
                        self.filters_changed(now);
                    }
                }
            }

            self.step(Instant::now());
        }

        self.debounce.cancel();
        self.autoload.reset();
        self.fetches.abort_all();
        log::debug!("Dashboard controller stopped");
    }

    /// Fires the one-off fetches made when the screen appears.
    fn mount(&mut self) {
        if let Some(user) = self.user.clone() {
            let repo = Arc::clone(&self.repo);
            let navigator = Arc::clone(&self.navigator);
            let handoff_url = self.settings.handoff_url.clone();
            let login_path = self.settings.login_path.clone();
            self.fetches.spawn(async move {
                let outcome = guard_session(
                    repo.as_ref(),
                    navigator.as_ref(),
                    Some(&user),
                    &handoff_url,
                    &login_path,
                )
                .await;
                FetchOutcome::Session(outcome)
            });
        }

        let repo = Arc::clone(&self.repo);
        self.fetches
            .spawn(async move { FetchOutcome::Profile(load_profile(repo.as_ref()).await) });
    }

    fn current_key(&self) -> QueryKey {
        self.filters.key(self.settings.page_size)
    }

    fn next_deadline(&self) -> Option<Instant> {
        match (self.debounce.deadline(), self.autoload.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    fn handle_event(&mut self, event: DashboardEvent, now: Instant) {
        match event {
            DashboardEvent::SearchInput(term) => self.debounce.input(term, now),
            DashboardEvent::PaymentStatus(status) => {
                if status != self.filters.payment_status {
                    self.filters.payment_status = status;
                    self.filters_changed(now);
                }
            }
            DashboardEvent::Sentinel(visible) => self.sentinel_visible = visible,
            DashboardEvent::LoadMore => {
                if !self.fetching_next_page(&self.current_key()) {
                    self.fetch_next_page(now);
                }
            }
            DashboardEvent::Shutdown => {}
        }
    }

    fn filters_changed(&mut self, now: Instant) {
        log::debug!("Dashboard filters changed to {:?}", self.filters);
        self.autoload.reset();
        self.autoload_fetch = None;

        // Revisiting a key that never loaded gets another first-page attempt.
        let key = self.current_key();
        let collection = self.pages.get_or_insert_default(key, now);
        if collection.is_empty() {
            collection.clear_error();
        }
    }

    fn handle_outcome(&mut self, outcome: FetchOutcome, now: Instant) {
        match outcome {
            FetchOutcome::Page { key, page, result } => {
                let fetch = (key, page);
                self.in_flight.remove(&fetch);
                if self.autoload_fetch.as_ref() == Some(&fetch) {
                    self.autoload.fetch_settled(now);
                    self.autoload_fetch = None;
                }

                let collection = self.pages.get_or_insert_default(fetch.0, now);
                match result {
                    Ok(result) => {
                        collection.push(result);
                    }
                    Err(e) => collection.fail(e.to_string()),
                }
            }
            FetchOutcome::Profile(result) => {
                self.profile = Some(result.unwrap_or_default());
            }
            FetchOutcome::Session(outcome) => self.session = outcome,
        }
    }

    fn fetching_next_page(&self, key: &QueryKey) -> bool {
        self.in_flight
            .iter()
            .any(|(k, page)| k == key && *page > 1)
    }

    /// Requests `page` for the current filters unless it is already on its way.
    fn spawn_page(&mut self, page: u32) -> bool {
        let key = self.current_key();
        if !self.in_flight.insert((key.clone(), page)) {
            return false;
        }

        let repo = Arc::clone(&self.repo);
        let filters = self.filters.clone();
        let limit = self.settings.page_size;
        self.fetches.spawn(async move {
            let result = fetch_page(repo.as_ref(), &filters, page, limit).await;
            FetchOutcome::Page { key, page, result }
        });
        true
    }

    fn fetch_next_page(&mut self, now: Instant) -> Option<u32> {
        let key = self.current_key();
        let page = self.pages.get_or_insert_default(key, now).next_page()?;
        self.spawn_page(page).then_some(page)
    }

    /// Re-evaluates automatic fetches, then publishes the view.
    fn step(&mut self, now: Instant) {
        let key = self.current_key();
        let collection = self.pages.get_or_insert_default(key.clone(), now);
        let needs_first_page = collection.is_empty() && collection.error().is_none();
        // A failed page stays failed until `load_more` or a filter change.
        let can_auto_load = collection.has_next_page() && collection.error().is_none();

        if needs_first_page {
            self.spawn_page(1);
        }

        let conditions = LoadConditions {
            sentinel_visible: self.sentinel_visible,
            has_next_page: can_auto_load,
            fetching_next_page: self.fetching_next_page(&key),
        };
        if self.autoload.update(now, conditions) {
            match self.fetch_next_page(now) {
                Some(page) => self.autoload_fetch = Some((key, page)),
                // Nothing to wait for, so let the cooldown start right away.
                None => self.autoload.fetch_settled(now),
            }
        }

        self.publish();
    }

    fn publish(&self) {
        let key = self.current_key();
        let collection = self.pages.get(&key);

        let loaded = collection.map(PageCollection::bookings).unwrap_or_default();
        let loaded_count = loaded.len();
        let counts = collection
            .map(|c| DashboardCounts::from(&c.counts()))
            .unwrap_or_default();
        let has_next_page = collection.is_some_and(PageCollection::has_next_page);
        let is_loading = self.in_flight.contains(&(key.clone(), 1))
            && collection.is_none_or(PageCollection::is_empty);
        let error = collection.and_then(PageCollection::error).map(|message| {
            if message.is_empty() {
                GENERIC_ERROR.to_string()
            } else {
                message.to_string()
            }
        });

        let view = DashboardView {
            search_term: self.debounce.term().to_string(),
            filters: self.filters.clone(),
            visible_bookings: refine(loaded, &self.filters.search_needle()),
            loaded_count,
            pages_loaded: collection.map_or(0, |c| c.pages().len()),
            tabs: filter_tabs(&counts, self.filters.payment_status),
            counts,
            profile: self.profile.as_ref().map(ProfileSummary::from),
            is_loading,
            is_fetching_next_page: self.fetching_next_page(&key),
            has_next_page,
            all_caught_up: !has_next_page && loaded_count > 0,
            error,
            session: self.session.clone(),
        };

        self.view.send_if_modified(|current| {
            if *current == view {
                false
            } else {
                *current = view;
                true
            }
        });
    }
}
