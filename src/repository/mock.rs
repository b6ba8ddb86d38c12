//! Mock collaborator implementations for isolating controllers in tests.

use async_trait::async_trait;
use mockall::mock;
use reqwest::Url;

use crate::domain::hotel::HotelQuery;
use crate::domain::profile::Profile;
use crate::dto::api::{DashboardPageRequest, HotelSearchResponse, RawPageResult};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    BookingReader, FormStorage, HotelSearcher, Navigator, ProfileReader, SearchModules,
    SessionGateway,
};

mock! {
    pub Repository {}

    #[async_trait]
    impl HotelSearcher for Repository {
        async fn hotel_search_multi(
            &self,
            query: HotelQuery,
            modules: Vec<String>,
        ) -> RepositoryResult<HotelSearchResponse>;
    }

    impl SearchModules for Repository {
        fn hotel_module_names(&self) -> Vec<String>;
    }

    #[async_trait]
    impl BookingReader for Repository {
        async fn fetch_dashboard_data(
            &self,
            request: DashboardPageRequest,
        ) -> RepositoryResult<RawPageResult>;
    }

    #[async_trait]
    impl ProfileReader for Repository {
        async fn get_profile(&self) -> RepositoryResult<Option<Profile>>;
    }

    #[async_trait]
    impl SessionGateway for Repository {
        async fn verify_token(&self) -> RepositoryResult<bool>;
        async fn get_access_token(&self) -> RepositoryResult<String>;
    }

    impl FormStorage for Repository {
        fn get_item(&self, key: &str) -> RepositoryResult<Option<String>>;
        fn set_item(&self, key: &str, value: &str) -> RepositoryResult<()>;
    }
}

mock! {
    pub Navigator {}

    impl Navigator for Navigator {
        fn redirect(&self, path: &str);
        fn navigate_to(&self, url: &Url);
    }
}
