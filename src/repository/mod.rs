//! Collaborators the screen controllers talk to.
//!
//! Backend calls are async; client-local storage and navigation are
//! synchronous, as they are in a browser.

use async_trait::async_trait;
use reqwest::Url;

use crate::{
    domain::{hotel::HotelQuery, profile::Profile},
    dto::api::{DashboardPageRequest, HotelSearchResponse, RawPageResult},
    repository::errors::RepositoryResult,
};

pub mod errors;
pub mod http;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod storage;

pub use http::HttpRepository;
pub use storage::{FileStorage, MemoryStorage};

#[async_trait]
pub trait HotelSearcher {
    /// Runs one search across the given provider modules.
    async fn hotel_search_multi(
        &self,
        query: HotelQuery,
        modules: Vec<String>,
    ) -> RepositoryResult<HotelSearchResponse>;
}

/// Search context listing the hotel provider modules that are switched on.
pub trait SearchModules {
    fn hotel_module_names(&self) -> Vec<String>;
}

#[async_trait]
pub trait BookingReader {
    async fn fetch_dashboard_data(
        &self,
        request: DashboardPageRequest,
    ) -> RepositoryResult<RawPageResult>;
}

#[async_trait]
pub trait ProfileReader {
    /// Returns the first profile record, or `None` when the account has none.
    async fn get_profile(&self) -> RepositoryResult<Option<Profile>>;
}

#[async_trait]
pub trait SessionGateway {
    /// Whether the current session token is still accepted.
    async fn verify_token(&self) -> RepositoryResult<bool>;
    /// Issues a fresh access token.
    async fn get_access_token(&self) -> RepositoryResult<String>;
}

/// Browser-style key/value storage that survives reloads.
pub trait FormStorage {
    fn get_item(&self, key: &str) -> RepositoryResult<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> RepositoryResult<()>;
}

pub trait Navigator {
    /// Client-side route change inside the application.
    fn redirect(&self, path: &str);
    /// Full page navigation to another origin.
    fn navigate_to(&self, url: &Url);
}
