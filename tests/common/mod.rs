#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use travel_portal::domain::hotel::{Hotel, HotelQuery};
use travel_portal::domain::profile::Profile;
use travel_portal::dto::api::{
    DashboardPageRequest, HotelSearchResponse, RawBooking, RawCounts, RawPageResult,
};
use travel_portal::repository::errors::{RepositoryError, RepositoryResult};
use travel_portal::repository::{
    BookingReader, FormStorage, HotelSearcher, MemoryStorage, Navigator, ProfileReader,
    SearchModules, SessionGateway,
};

pub fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

/// Lets spawned tasks drain before the paused clock moves on.
pub async fn settle() {
    tokio::time::sleep(ms(1)).await;
}

pub fn raw_booking(id: usize, name: &str) -> RawBooking {
    RawBooking {
        booking_id: Some(id.to_string()),
        reference: Some(format!("REF-{id:03}")),
        name: Some(name.to_string()),
        payment_status: Some("paid".into()),
        ..RawBooking::default()
    }
}

/// `n` bookings with distinct ids and names.
pub fn raw_bookings(n: usize) -> Vec<RawBooking> {
    const NAMES: [&str; 4] = ["Ada Lovelace", "Alan Turing", "Grace Hopper", "Edsger Dijkstra"];
    (1..=n)
        .map(|id| raw_booking(id, NAMES[(id - 1) % NAMES.len()]))
        .collect()
}

/// In-memory booking platform serving slices of a fixed data set.
///
/// Filters are recorded but not applied, so tests can observe the local
/// refinement on top of whatever the backend returns.
#[derive(Clone, Default)]
pub struct TestBackend {
    pub bookings: Vec<RawBooking>,
    pub counts: Option<RawCounts>,
    pub report_total: bool,
    pub fail_pages: HashSet<u32>,
    pub latency: Option<Duration>,
    pub profile: Option<Profile>,
    pub token_valid: bool,
    pub requests: Arc<Mutex<Vec<DashboardPageRequest>>>,
    pub profile_calls: Arc<Mutex<usize>>,
}

impl TestBackend {
    pub fn with_bookings(n: usize) -> Self {
        Self {
            bookings: raw_bookings(n),
            report_total: true,
            token_valid: true,
            ..Self::default()
        }
    }

    pub fn requests(&self) -> Vec<DashboardPageRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requested_pages(&self) -> Vec<u32> {
        self.requests().iter().map(|r| r.page).collect()
    }
}

#[async_trait]
impl BookingReader for TestBackend {
    async fn fetch_dashboard_data(
        &self,
        request: DashboardPageRequest,
    ) -> RepositoryResult<RawPageResult> {
        self.requests.lock().unwrap().push(request.clone());
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if self.fail_pages.contains(&request.page) {
            return Err(RepositoryError::Network("connection reset".into()));
        }

        let limit = request.limit as usize;
        let start = (request.page as usize - 1) * limit;
        let data = self
            .bookings
            .iter()
            .skip(start)
            .take(limit)
            .cloned()
            .collect();

        Ok(RawPageResult {
            data,
            page: Some(u64::from(request.page)),
            limit: Some(u64::from(request.limit)),
            total_records: self.report_total.then_some(self.bookings.len() as u64),
            counts: self.counts.clone(),
            ..RawPageResult::default()
        })
    }
}

#[async_trait]
impl ProfileReader for TestBackend {
    async fn get_profile(&self) -> RepositoryResult<Option<Profile>> {
        *self.profile_calls.lock().unwrap() += 1;
        Ok(self.profile.clone())
    }
}

#[async_trait]
impl SessionGateway for TestBackend {
    async fn verify_token(&self) -> RepositoryResult<bool> {
        Ok(self.token_valid)
    }

    async fn get_access_token(&self) -> RepositoryResult<String> {
        Ok("fresh-token".into())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Move {
    Redirect(String),
    Navigate(String),
}

#[derive(Clone, Default)]
pub struct TestNavigator {
    pub moves: Arc<Mutex<Vec<Move>>>,
}

impl TestNavigator {
    pub fn moves(&self) -> Vec<Move> {
        self.moves.lock().unwrap().clone()
    }
}

impl Navigator for TestNavigator {
    fn redirect(&self, path: &str) {
        self.moves.lock().unwrap().push(Move::Redirect(path.to_string()));
    }

    fn navigate_to(&self, url: &Url) {
        self.moves.lock().unwrap().push(Move::Navigate(url.to_string()));
    }
}

/// Hotel search backend paired with browser-style storage.
#[derive(Clone, Default)]
pub struct TestHotelBackend {
    pub storage: Arc<MemoryStorage>,
    pub modules: Vec<String>,
    pub hotels: Vec<Hotel>,
    pub queries: Arc<Mutex<Vec<HotelQuery>>>,
}

impl TestHotelBackend {
    pub fn queries(&self) -> Vec<HotelQuery> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl HotelSearcher for TestHotelBackend {
    async fn hotel_search_multi(
        &self,
        query: HotelQuery,
        _modules: Vec<String>,
    ) -> RepositoryResult<HotelSearchResponse> {
        self.queries.lock().unwrap().push(query);
        Ok(HotelSearchResponse {
            success: Some(self.hotels.clone()),
        })
    }
}

impl SearchModules for TestHotelBackend {
    fn hotel_module_names(&self) -> Vec<String> {
        self.modules.clone()
    }
}

impl FormStorage for TestHotelBackend {
    fn get_item(&self, key: &str) -> RepositoryResult<Option<String>> {
        self.storage.get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> RepositoryResult<()> {
        self.storage.set_item(key, value)
    }
}
