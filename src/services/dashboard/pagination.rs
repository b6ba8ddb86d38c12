//! Backend-driven pagination of dashboard bookings.

use crate::domain::booking::Booking;
use crate::domain::filters::DashboardFilters;
use crate::domain::page::{PageResult, StatusCounts};
use crate::dto::api::{DashboardPageRequest, RawPageResult};
use crate::repository::BookingReader;
use crate::services::ServiceResult;

pub const PAGE_SIZE: u32 = 6;

/// Request for one page under the given filters.
pub fn page_request(filters: &DashboardFilters, page: u32, limit: u32) -> DashboardPageRequest {
    DashboardPageRequest::new(page, limit)
        .search(&filters.search)
        .payment_status(filters.payment_status)
}

/// Normalizes a backend page into the shape the engine pages over.
pub fn normalize_page(raw: RawPageResult, page: u32, limit: u32) -> PageResult {
    let page = PageResult::from_raw(raw, page, limit);
    if page.page == 1 {
        log::debug!("Dashboard counts from API: {:?}", page.counts);
    }
    page
}

/// Fetches and normalizes one page of bookings for `filters`.
pub async fn fetch_page<R>(
    repo: &R,
    filters: &DashboardFilters,
    page: u32,
    limit: u32,
) -> ServiceResult<PageResult>
where
    R: BookingReader + ?Sized,
{
    let raw = repo
        .fetch_dashboard_data(page_request(filters, page, limit))
        .await
        .map_err(|e| {
            log::error!("Failed to fetch dashboard page {page}: {e}");
            e
        })?;
    Ok(normalize_page(raw, page, limit))
}

/// Page param following `last`, if any.
///
/// A positive total is authoritative. Without one, a full page suggests
/// there may be more.
pub fn next_page_param(last: &PageResult) -> Option<u32> {
    let page = u64::from(last.page.max(1));
    let limit = u64::from(last.limit);

    let has_next = if last.total > 0 {
        page * limit < last.total
    } else {
        last.bookings.len() as u64 == limit
    };

    has_next.then(|| last.page.max(1) + 1)
}

/// Append-only pages loaded for one set of filters.
#[derive(Debug, Default, Clone)]
pub struct PageCollection {
    pages: Vec<PageResult>,
    error: Option<String>,
}

impl PageCollection {
    pub fn pages(&self) -> &[PageResult] {
        &self.pages
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Page param to request next: 1 while empty, then whatever the last
    /// page allows.
    pub fn next_page(&self) -> Option<u32> {
        match self.pages.last() {
            None => Some(1),
            Some(last) => next_page_param(last),
        }
    }

    /// Whether another page exists beyond the loaded ones.
    pub fn has_next_page(&self) -> bool {
        self.pages.last().and_then(next_page_param).is_some()
    }

    /// Appends `page` if it is the next one in sequence.
    pub fn push(&mut self, page: PageResult) -> bool {
        let expected = self.pages.len() as u32 + 1;
        if page.page != expected {
            log::warn!(
                "Dropping out-of-order dashboard page {} (expected {expected})",
                page.page
            );
            return false;
        }
        self.pages.push(page);
        self.error = None;
        true
    }

    pub fn fail(&mut self, message: String) {
        self.error = Some(message);
    }

    /// Forgets a failure so the first page may be requested again.
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Loaded bookings in fetch order; duplicates across pages are kept.
    pub fn bookings(&self) -> Vec<Booking> {
        self.pages
            .iter()
            .flat_map(|page| page.bookings.iter().cloned())
            .collect()
    }

    pub fn booking_count(&self) -> usize {
        self.pages.iter().map(|page| page.bookings.len()).sum()
    }

    /// Aggregate counts reported with the first page.
    pub fn counts(&self) -> StatusCounts {
        self.pages
            .first()
            .map(|page| page.counts)
            .unwrap_or_default()
    }
}
