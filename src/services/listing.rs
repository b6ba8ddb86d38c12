//! Controller behind the hotel search-results page.

use std::time::Duration;

use tokio::time::Instant;

use crate::domain::hotel::{AmbientLocale, Hotel, HotelQuery, SAVED_FORM_KEY, SavedSearchForm};
use crate::domain::types::SearchSlug;
use crate::dto::listing::{LISTING_ERROR, ListingView};
use crate::query_cache::QueryCache;
use crate::repository::{FormStorage, HotelSearcher, SearchModules};
use crate::services::{ServiceError, ServiceResult};
use crate::state::HotelsState;

/// How long identical searches are served from memory.
pub const LISTING_STALE_AFTER: Duration = Duration::from_secs(5 * 60);

#[derive(Clone, Debug, PartialEq)]
enum SavedForm {
    /// Storage has not been read yet.
    Unread,
    Missing,
    Present(SavedSearchForm),
    /// Stored text is not a JSON object.
    Malformed(String),
}

/// Decision taken for one slug before any request is made.
enum Plan {
    Hide,
    Fail,
    /// Render the listing without searching.
    Idle,
    Cached(SearchSlug),
    Fetch(SearchSlug),
}

/// Parses the raw saved-form JSON.
pub fn parse_saved_form(raw: &str) -> ServiceResult<SavedSearchForm> {
    serde_json::from_str(raw).map_err(|e| ServiceError::MalformedSavedForm(e.to_string()))
}

pub struct HotelListingController<R> {
    repo: R,
    state: HotelsState,
    ambient: AmbientLocale,
    cache: QueryCache<SearchSlug, Vec<Hotel>>,
    saved_form: SavedForm,
}

impl<R> HotelListingController<R>
where
    R: HotelSearcher + SearchModules + FormStorage,
{
    pub fn new(repo: R, state: HotelsState, ambient: AmbientLocale) -> Self {
        Self::with_stale_after(repo, state, ambient, LISTING_STALE_AFTER)
    }

    pub fn with_stale_after(
        repo: R,
        state: HotelsState,
        ambient: AmbientLocale,
        stale_after: Duration,
    ) -> Self {
        Self {
            repo,
            state,
            ambient,
            cache: QueryCache::new(stale_after),
            saved_form: SavedForm::Unread,
        }
    }

    /// Reads the saved search form. Only the first call touches storage.
    pub fn mount(&mut self) {
        if self.saved_form != SavedForm::Unread {
            return;
        }

        self.saved_form = match self.repo.get_item(SAVED_FORM_KEY) {
            Ok(None) => SavedForm::Missing,
            Ok(Some(raw)) if raw.is_empty() => SavedForm::Missing,
            Ok(Some(raw)) => match parse_saved_form(&raw) {
                Ok(form) => SavedForm::Present(form),
                Err(err) => {
                    log::warn!("Ignoring saved search form: {err}");
                    SavedForm::Malformed(err.to_string())
                }
            },
            Err(err) => {
                log::error!("Failed to read saved search form: {err}");
                SavedForm::Missing
            }
        };
    }

    fn plan(&self, segments: &[String]) -> Plan {
        match &self.saved_form {
            SavedForm::Unread | SavedForm::Missing => return Plan::Hide,
            SavedForm::Malformed(_) => return Plan::Fail,
            SavedForm::Present(_) => {}
        }

        if segments.is_empty() {
            return Plan::Hide;
        }

        let slug = match SearchSlug::new(segments.iter().cloned()) {
            Ok(slug) => slug,
            Err(err) => {
                log::debug!("Not searching: {err}");
                return Plan::Hide;
            }
        };

        if self.repo.hotel_module_names().is_empty() {
            return Plan::Idle;
        }

        if self.cache.fresh(&slug, Instant::now()).is_some() {
            Plan::Cached(slug)
        } else {
            Plan::Fetch(slug)
        }
    }

    /// What to render while [`Self::show`] for the same slug is in progress.
    pub fn pending_view(&self, segments: &[String]) -> ListingView {
        match self.plan(segments) {
            Plan::Hide => ListingView::Hidden,
            Plan::Fail => ListingView::Error {
                message: LISTING_ERROR.to_string(),
            },
            Plan::Idle | Plan::Cached(_) => ListingView::Listing { is_loading: false },
            Plan::Fetch(_) => ListingView::Listing { is_loading: true },
        }
    }

    /// Resolves the listing for a route slug and publishes its hotels.
    ///
    /// The published list is replaced on every call; anything other than a
    /// successful search publishes an empty list.
    pub async fn show(&mut self, segments: &[String]) -> ListingView {
        let (hotels, view) = match self.plan(segments) {
            Plan::Hide => (Vec::new(), ListingView::Hidden),
            Plan::Fail => (
                Vec::new(),
                ListingView::Error {
                    message: LISTING_ERROR.to_string(),
                },
            ),
            Plan::Idle => (Vec::new(), ListingView::Listing { is_loading: false }),
            Plan::Cached(slug) => {
                let hotels = self.cache.get(&slug).cloned().unwrap_or_default();
                (hotels, ListingView::Listing { is_loading: false })
            }
            Plan::Fetch(slug) => match self.search(&slug).await {
                Ok(hotels) => {
                    self.cache.insert(slug, hotels.clone(), Instant::now());
                    (hotels, ListingView::Listing { is_loading: false })
                }
                Err(err) => {
                    log::error!("Hotel search for {slug} failed: {err}");
                    (
                        Vec::new(),
                        ListingView::Error {
                            message: LISTING_ERROR.to_string(),
                        },
                    )
                }
            },
        };

        self.state.set_hotels(hotels);
        view
    }

    async fn search(&self, slug: &SearchSlug) -> ServiceResult<Vec<Hotel>> {
        let SavedForm::Present(form) = &self.saved_form else {
            return Ok(Vec::new());
        };

        let query = HotelQuery::new(slug, form, &self.ambient);
        let modules = self.repo.hotel_module_names();
        log::info!("Searching hotels for {slug} across {} modules", modules.len());

        let response = self.repo.hotel_search_multi(query, modules).await?;
        Ok(response.success.unwrap_or_default())
    }
}
