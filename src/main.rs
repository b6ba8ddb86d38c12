//! Command-line driver for the hotel listing and bookings dashboard screens.

use std::env;

use async_trait::async_trait;
use config::Config;
use dotenvy::dotenv;
use reqwest::Url;
use validator::Validate;

use travel_portal::domain::filters::DashboardFilters;
use travel_portal::domain::hotel::HotelQuery;
use travel_portal::domain::types::PaymentStatus;
use travel_portal::dto::api::HotelSearchResponse;
use travel_portal::dto::dashboard::DashboardView;
use travel_portal::models::config::AppConfig;
use travel_portal::repository::errors::RepositoryResult;
use travel_portal::repository::{
    FileStorage, FormStorage, HotelSearcher, HttpRepository, Navigator, SearchModules,
};
use travel_portal::services::dashboard::{DashboardController, DashboardSettings};
use travel_portal::services::listing::HotelListingController;
use travel_portal::state::HotelsState;

const USAGE: &str = "usage: travel-portal hotels <destination> <checkin> <checkout> <rooms> <adults> <children> <nationality>\n       travel-portal bookings [search] [status]";

/// Navigator for a terminal: there is nowhere to go, so moves are logged.
struct LogNavigator;

impl Navigator for LogNavigator {
    fn redirect(&self, path: &str) {
        log::warn!("Session requires login, redirecting to {path}");
    }

    fn navigate_to(&self, url: &Url) {
        log::info!("Handing session off to {url}");
    }
}

/// Remote search paired with the local form storage the listing reads.
struct ListingBackend {
    remote: HttpRepository,
    storage: FileStorage,
}

#[async_trait]
impl HotelSearcher for ListingBackend {
    async fn hotel_search_multi(
        &self,
        query: HotelQuery,
        modules: Vec<String>,
    ) -> RepositoryResult<HotelSearchResponse> {
        self.remote.hotel_search_multi(query, modules).await
    }
}

impl SearchModules for ListingBackend {
    fn hotel_module_names(&self) -> Vec<String> {
        self.remote.hotel_module_names()
    }
}

impl FormStorage for ListingBackend {
    fn get_item(&self, key: &str) -> RepositoryResult<Option<String>> {
        self.storage.get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> RepositoryResult<()> {
        self.storage.set_item(key, value)
    }
}

fn load_config() -> AppConfig {
    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let settings = Config::builder()
        .add_source(config::File::with_name("config/default"))
        .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
        .add_source(config::Environment::with_prefix("APP"))
        .build();

    let settings = match settings {
        Ok(settings) => settings,
        Err(err) => {
            log::error!("Error loading settings: {err}");
            std::process::exit(1);
        }
    };

    let config = match settings.try_deserialize::<AppConfig>() {
        Ok(config) => config,
        Err(err) => {
            log::error!("Error loading app config: {err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = config.validate() {
        log::error!("Invalid app config: {err}");
        std::process::exit(1);
    }
    config
}

fn remote(config: &AppConfig) -> HttpRepository {
    match HttpRepository::from_config(config) {
        Ok(repo) => repo,
        Err(e) => {
            log::error!("Failed to set up API client: {e}");
            std::process::exit(1);
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize output: {e}"),
    }
}

async fn run_hotels(config: &AppConfig, segments: &[String]) {
    let backend = ListingBackend {
        remote: remote(config),
        storage: FileStorage::new(&config.storage_path),
    };
    let state = HotelsState::new();
    let mut controller = HotelListingController::with_stale_after(
        backend,
        state.clone(),
        config.ambient_locale(),
        config.listing_stale_after(),
    );

    controller.mount();
    let view = controller.show(segments).await;
    log::info!("Listing view: {view:?}");
    print_json(&state.hotels());
}

/// Whether the dashboard has nothing more to load for `filters`.
fn settled(view: &DashboardView, filters: &DashboardFilters) -> bool {
    view.filters == *filters
        && !view.is_loading
        && !view.is_fetching_next_page
        && (view.error.is_some() || (view.pages_loaded > 0 && !view.has_next_page))
}

async fn run_bookings(config: &AppConfig, args: &[String]) {
    let search = args.first().cloned().unwrap_or_default();
    let status = match args.get(1).map(|s| s.parse::<PaymentStatus>()).transpose() {
        Ok(status) => status.unwrap_or_default(),
        Err(e) => {
            log::error!("{e}");
            std::process::exit(2);
        }
    };
    let filters = DashboardFilters {
        search: search.clone(),
        payment_status: status,
    };

    let handle = DashboardController::spawn(
        remote(config),
        LogNavigator,
        DashboardSettings::from_config(config),
        config.session_user.clone(),
    );
    if !search.is_empty() {
        handle.type_search(search);
    }
    handle.select_status(status);
    // Keep the end of the list in view so every page gets pulled in.
    handle.sentinel_visible(true);

    let mut views = handle.subscribe();
    let view = match views.wait_for(|view| settled(view, &filters)).await {
        Ok(view) => view.clone(),
        Err(e) => {
            log::error!("Dashboard stopped early: {e}");
            std::process::exit(1);
        }
    };
    drop(views);
    handle.shutdown().await;

    if let Some(error) = &view.error {
        log::error!("Failed to load bookings: {error}");
    }
    log::info!(
        "Loaded {} bookings over {} pages, {} total",
        view.loaded_count,
        view.pages_loaded,
        view.counts.total
    );
    print_json(&view.visible_bookings);
}

#[tokio::main]
async fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let args: Vec<String> = env::args().skip(1).collect();
    let Some((command, rest)) = args.split_first() else {
        eprintln!("{USAGE}");
        std::process::exit(2);
    };

    let config = load_config();
    match command.as_str() {
        "hotels" => run_hotels(&config, rest).await,
        "bookings" => run_bookings(&config, rest).await,
        _ => {
            eprintln!("{USAGE}");
            std::process::exit(2);
        }
    }
}
