//! DTOs shaped for the dashboard screen.

use serde::Serialize;

use crate::domain::booking::Booking;
use crate::domain::filters::DashboardFilters;
use crate::domain::page::StatusCounts;
use crate::domain::profile::Profile;
use crate::domain::types::PaymentStatus;
use crate::services::session::SessionOutcome;

/// Fallback shown when a fetch failed without a message.
pub const GENERIC_ERROR: &str = "Something went wrong";

/// Resolved aggregate counts for the filter tabs.
#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq, Eq)]
pub struct DashboardCounts {
    pub total: u64,
    pub paid: u64,
    pub unpaid: u64,
    pub refunded: u64,
    pub cancelled: u64,
}

impl From<&StatusCounts> for DashboardCounts {
    fn from(counts: &StatusCounts) -> Self {
        Self {
            total: counts.resolved_total(),
            paid: counts.paid(),
            unpaid: counts.unpaid(),
            refunded: counts.refunded(),
            cancelled: counts.resolved_cancelled(),
        }
    }
}

impl DashboardCounts {
    pub fn for_status(&self, status: PaymentStatus) -> u64 {
        match status {
            PaymentStatus::All => self.total,
            PaymentStatus::Paid => self.paid,
            PaymentStatus::Unpaid => self.unpaid,
            PaymentStatus::Refunded => self.refunded,
            PaymentStatus::Cancelled => self.cancelled,
        }
    }
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct FilterTab {
    pub status: PaymentStatus,
    pub label: &'static str,
    pub count: u64,
    pub selected: bool,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct StatTile {
    pub title: &'static str,
    pub label: &'static str,
    pub value: String,
}

/// Header data derived from the profile.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct ProfileSummary {
    pub welcome_name: String,
    pub tiles: Vec<StatTile>,
}

impl From<&Profile> for ProfileSummary {
    fn from(profile: &Profile) -> Self {
        Self {
            welcome_name: format!("{} {}", profile.first_name, profile.last_name)
                .trim()
                .to_string(),
            tiles: vec![
                StatTile {
                    title: "wallet",
                    label: "Wallet balance",
                    value: profile.balance.clone(),
                },
                StatTile {
                    title: "booking",
                    label: "Bookings",
                    value: profile.total_bookings.clone(),
                },
                StatTile {
                    title: "invoice",
                    label: "Pending invoices",
                    value: profile.pending_bookings.clone(),
                },
            ],
        }
    }
}

/// Everything the dashboard presentation layer needs for one frame.
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct DashboardView {
    /// Live value of the search input.
    pub search_term: String,
    /// Filters committed to the backend.
    pub filters: DashboardFilters,
    /// Loaded bookings after the local refinement pass.
    pub visible_bookings: Vec<Booking>,
    /// Number of bookings loaded across all pages of the current filters.
    pub loaded_count: usize,
    pub pages_loaded: usize,
    pub counts: DashboardCounts,
    pub tabs: Vec<FilterTab>,
    pub profile: Option<ProfileSummary>,
    pub is_loading: bool,
    pub is_fetching_next_page: bool,
    pub has_next_page: bool,
    /// No further page exists and at least one booking was loaded.
    pub all_caught_up: bool,
    pub error: Option<String>,
    pub session: Option<SessionOutcome>,
}

/// Builds the filter tabs for the selected status.
pub fn filter_tabs(counts: &DashboardCounts, selected: PaymentStatus) -> Vec<FilterTab> {
    PaymentStatus::TABS
        .into_iter()
        .map(|status| FilterTab {
            status,
            label: status.label(),
            count: counts.for_status(status),
            selected: status == selected,
        })
        .collect()
}
