//! Wire payloads exchanged with the booking-platform backend.
//!
//! These mirror the loosely-typed JSON the backend emits; they are converted
//! into domain records right after decoding.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::hotel::Hotel;
use crate::domain::types::{PaymentStatus, is_truthy, lenient_string, lenient_u64};

/// Fields the dashboard searches over on the server side.
pub const SEARCH_SCOPE: &str = "name,reference,booking_id";

/// Booking record as the backend sends it.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct RawBooking {
    #[serde(default, deserialize_with = "lenient_string")]
    pub booking_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub reference: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub pnr: Option<String>,
    #[serde(default)]
    pub payment_status: Option<String>,
    #[serde(default)]
    pub booking_status: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub lead_pax_name: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct RawCounts {
    #[serde(default, deserialize_with = "lenient_u64")]
    pub total: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub paid: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub unpaid: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub refunded: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub canceled: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub cancelled: Option<u64>,
}

/// One page of the dashboard listing endpoint.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct RawPageResult {
    #[serde(default)]
    pub status: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub data: Vec<RawBooking>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub page: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub limit: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub total: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub total_records: Option<u64>,
    #[serde(default)]
    pub counts: Option<RawCounts>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<RawBooking>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<RawBooking>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of a dashboard page request.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct DashboardPageRequest {
    pub page: u32,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
    pub search_scope: String,
}

impl DashboardPageRequest {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page,
            limit,
            search: None,
            payment_status: None,
            search_scope: SEARCH_SCOPE.to_string(),
        }
    }

    /// Adds the search term unless it is blank after trimming.
    pub fn search(mut self, term: &str) -> Self {
        let term = term.trim();
        self.search = (!term.is_empty()).then(|| term.to_string());
        self
    }

    /// Adds the payment status unless it is the "all" filter.
    pub fn payment_status(mut self, status: PaymentStatus) -> Self {
        self.payment_status = (!status.is_all()).then_some(status);
        self
    }
}

/// Multi-provider hotel search response; `success` may be missing or null.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct HotelSearchResponse {
    #[serde(default)]
    pub success: Option<Vec<Hotel>>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ProfileRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub total_bookings: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub pending_bookings: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub balance: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ProfileResponse {
    #[serde(default)]
    pub data: Option<Vec<ProfileRecord>>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct VerifyTokenResponse {
    #[serde(default)]
    pub status: Value,
}

impl VerifyTokenResponse {
    pub fn is_valid(&self) -> bool {
        is_truthy(&self.status)
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct AccessTokenResponse {
    pub token: String,
}
