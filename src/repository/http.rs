//! Backend collaborators implemented over the platform's JSON HTTP API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::hotel::HotelQuery;
use crate::domain::profile::Profile;
use crate::dto::api::{
    AccessTokenResponse, DashboardPageRequest, HotelSearchResponse, ProfileResponse,
    RawPageResult, VerifyTokenResponse,
};
use crate::models::config::AppConfig;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{BookingReader, HotelSearcher, ProfileReader, SearchModules, SessionGateway};

const HOTEL_SEARCH_PATH: &str = "hotels/search";
const DASHBOARD_PATH: &str = "dashboard/bookings";
const PROFILE_PATH: &str = "profile";
const VERIFY_TOKEN_PATH: &str = "auth/verify";
const ACCESS_TOKEN_PATH: &str = "auth/access-token";

#[derive(Serialize)]
struct HotelSearchBody<'a> {
    #[serde(flatten)]
    query: &'a HotelQuery,
    modules: &'a [String],
}

/// reqwest-backed implementation of every backend collaborator.
#[derive(Clone, Debug)]
pub struct HttpRepository {
    client: Client,
    base_url: Url,
    token: Option<String>,
    modules: Vec<String>,
}

impl HttpRepository {
    pub fn new(
        base_url: &str,
        token: Option<String>,
        modules: Vec<String>,
        timeout: Duration,
    ) -> RepositoryResult<Self> {
        // `Url::join` drops the last path segment unless the base ends in a slash.
        let base = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url = Url::parse(&base)
            .map_err(|e| RepositoryError::ValidationError(format!("invalid api url: {e}")))?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RepositoryError::Unexpected(format!("failed to build http client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            token,
            modules,
        })
    }

    pub fn from_config(config: &AppConfig) -> RepositoryResult<Self> {
        Self::new(
            &config.api_base_url,
            config.api_token.clone(),
            config.hotel_modules.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    fn url(&self, path: &str) -> RepositoryResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| RepositoryError::ValidationError(format!("invalid api path {path}: {e}")))
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> RepositoryResult<T> {
        let response = self.authorized(request).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            log::warn!("Backend responded with {status}: {message}");
            return Err(RepositoryError::Status {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json::<T>().await?)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> RepositoryResult<T> {
        let url = self.url(path)?;
        self.send(self.client.get(url)).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> RepositoryResult<T> {
        let url = self.url(path)?;
        self.send(self.client.post(url).json(body)).await
    }
}

impl SearchModules for HttpRepository {
    fn hotel_module_names(&self) -> Vec<String> {
        self.modules.clone()
    }
}

#[async_trait]
impl HotelSearcher for HttpRepository {
    async fn hotel_search_multi(
        &self,
        query: HotelQuery,
        modules: Vec<String>,
    ) -> RepositoryResult<HotelSearchResponse> {
        let body = HotelSearchBody {
            query: &query,
            modules: &modules,
        };
        // The endpoint answers `false`/`null` when no provider responded.
        let value: serde_json::Value = self.post(HOTEL_SEARCH_PATH, &body).await?;
        if value.is_object() {
            Ok(serde_json::from_value(value)?)
        } else {
            Ok(HotelSearchResponse::default())
        }
    }
}

#[async_trait]
impl BookingReader for HttpRepository {
    async fn fetch_dashboard_data(
        &self,
        request: DashboardPageRequest,
    ) -> RepositoryResult<RawPageResult> {
        self.post(DASHBOARD_PATH, &request).await
    }
}

#[async_trait]
impl ProfileReader for HttpRepository {
    async fn get_profile(&self) -> RepositoryResult<Option<Profile>> {
        let response: ProfileResponse = self.get(PROFILE_PATH).await?;
        Ok(response
            .data
            .and_then(|records| records.into_iter().next())
            .map(Profile::from))
    }
}

#[async_trait]
impl SessionGateway for HttpRepository {
    async fn verify_token(&self) -> RepositoryResult<bool> {
        let response: VerifyTokenResponse = self.get(VERIFY_TOKEN_PATH).await?;
        Ok(response.is_valid())
    }

    async fn get_access_token(&self) -> RepositoryResult<String> {
        let response: AccessTokenResponse = self.get(ACCESS_TOKEN_PATH).await?;
        Ok(response.token)
    }
}
