use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::dto::api::RawBooking;

/// Canonical booking record shown on the dashboard.
///
/// Built only through [`Booking::from`] so the backend's aliasing name and id
/// fields are resolved in one place.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Booking {
    /// First non-null of booking id, reference and PNR.
    pub key: Option<String>,
    pub booking_id: Option<String>,
    pub reference: Option<String>,
    pub pnr: Option<String>,
    pub display_name: String,
    pub payment_status: Option<String>,
    pub booking_status: Option<String>,
    /// Fields the dashboard does not interpret, kept for the card view.
    pub extra: Map<String, Value>,
}

/// Resolves the customer name: `name`, `customer_name`, `lead_pax_name`,
/// then first and last name joined.
///
/// Only absent values fall through; an explicit empty `name` wins.
pub fn resolve_display_name(raw: &RawBooking) -> String {
    raw.name
        .clone()
        .or_else(|| raw.customer_name.clone())
        .or_else(|| raw.lead_pax_name.clone())
        .unwrap_or_else(|| {
            [raw.first_name.as_deref(), raw.last_name.as_deref()]
                .into_iter()
                .flatten()
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        })
}

impl From<RawBooking> for Booking {
    fn from(raw: RawBooking) -> Self {
        let display_name = resolve_display_name(&raw);
        let key = raw
            .booking_id
            .clone()
            .or_else(|| raw.reference.clone())
            .or_else(|| raw.pnr.clone());

        Self {
            key,
            booking_id: raw.booking_id,
            reference: raw.reference,
            pnr: raw.pnr,
            display_name,
            payment_status: raw.payment_status,
            booking_status: raw.booking_status,
            extra: raw.extra,
        }
    }
}
