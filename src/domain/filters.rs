use serde::{Deserialize, Serialize};

use crate::domain::types::PaymentStatus;

/// Filters the dashboard actually sends to the backend.
///
/// `search` holds the debounced term, not the live input value.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct DashboardFilters {
    pub search: String,
    pub payment_status: PaymentStatus,
}

impl DashboardFilters {
    /// Cache key identifying the page collection for these filters.
    pub fn key(&self, page_size: u32) -> QueryKey {
        QueryKey {
            search: self.search.clone(),
            payment_status: self.payment_status,
            page_size,
        }
    }

    /// Lowercased needle for the local refinement pass.
    pub fn search_needle(&self) -> String {
        self.search.to_lowercase()
    }
}

/// Identity of one append-only page collection.
#[derive(Clone, Debug, Serialize, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub search: String,
    pub payment_status: PaymentStatus,
    pub page_size: u32,
}
