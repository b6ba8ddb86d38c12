use serde::{Deserialize, Serialize};

use crate::domain::booking::Booking;
use crate::dto::api::{RawCounts, RawPageResult};

/// Payment-status totals reported by the backend for the whole filtered set.
///
/// Both spellings of "cancelled" are accepted; the US spelling wins.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusCounts {
    pub total: Option<u64>,
    pub paid: Option<u64>,
    pub unpaid: Option<u64>,
    pub refunded: Option<u64>,
    pub canceled: Option<u64>,
    pub cancelled: Option<u64>,
}

impl StatusCounts {
    pub fn paid(&self) -> u64 {
        self.paid.unwrap_or(0)
    }

    pub fn unpaid(&self) -> u64 {
        self.unpaid.unwrap_or(0)
    }

    pub fn refunded(&self) -> u64 {
        self.refunded.unwrap_or(0)
    }

    pub fn resolved_cancelled(&self) -> u64 {
        self.canceled.or(self.cancelled).unwrap_or(0)
    }

    /// Explicit total, otherwise the sum of the four categories.
    pub fn resolved_total(&self) -> u64 {
        self.total.unwrap_or_else(|| {
            self.paid()
                .saturating_add(self.unpaid())
                .saturating_add(self.refunded())
                .saturating_add(self.resolved_cancelled())
        })
    }
}

impl From<RawCounts> for StatusCounts {
    fn from(raw: RawCounts) -> Self {
        Self {
            total: raw.total,
            paid: raw.paid,
            unpaid: raw.unpaid,
            refunded: raw.refunded,
            canceled: raw.canceled,
            cancelled: raw.cancelled,
        }
    }
}

/// One page of dashboard bookings as requested by the pagination engine.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct PageResult {
    pub bookings: Vec<Booking>,
    /// Page param the page was requested with (1-based).
    pub page: u32,
    /// Page size the page was requested with.
    pub limit: u32,
    /// Total matching records, 0 when the backend did not say.
    pub total: u64,
    pub counts: StatusCounts,
}

impl PageResult {
    /// Normalizes a backend page, keeping the requested page and size.
    ///
    /// The total is taken from `total_records`, then `total`.
    #[must_use]
    pub fn from_raw(raw: RawPageResult, page: u32, limit: u32) -> Self {
        Self {
            total: raw.total_records.or(raw.total).unwrap_or(0),
            counts: raw.counts.map(StatusCounts::from).unwrap_or_default(),
            bookings: raw.data.into_iter().map(Booking::from).collect(),
            page,
            limit,
        }
    }
}
