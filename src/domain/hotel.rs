use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::types::{SearchSlug, is_truthy};

/// Client-local storage key the upstream search form writes to.
pub const SAVED_FORM_KEY: &str = "hotelSearchForm";

pub const PRICE_FROM: &str = "1";
pub const PRICE_TO: &str = "5000";

/// Search form persisted by the search widget before navigating to the listing.
///
/// Nothing is interpreted beyond the JSON shape; ages travel to the backend
/// exactly as the widget stored them.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct SavedSearchForm {
    #[serde(default)]
    pub children_ages: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SavedSearchForm {
    /// Stored ages, or an empty list when the field is absent or falsy.
    pub fn child_ages(&self) -> Value {
        if is_truthy(&self.children_ages) {
            self.children_ages.clone()
        } else {
            Value::Array(Vec::new())
        }
    }
}

/// Currency and language the whole page is rendered in.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AmbientLocale {
    pub locale: String,
    pub currency: String,
}

/// Request sent to the multi-provider hotel search.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct HotelQuery {
    pub destination: String,
    pub checkin: String,
    pub checkout: String,
    pub rooms: Option<u32>,
    pub adults: Option<u32>,
    pub children: Option<u32>,
    pub nationality: String,
    pub page: u32,
    pub price_from: String,
    pub price_to: String,
    pub rating: String,
    pub language: String,
    pub currency: String,
    pub child_age: Value,
}

impl HotelQuery {
    #[must_use]
    pub fn new(slug: &SearchSlug, form: &SavedSearchForm, ambient: &AmbientLocale) -> Self {
        Self {
            destination: slug.destination(),
            checkin: slug.checkin().to_string(),
            checkout: slug.checkout().to_string(),
            rooms: slug.rooms(),
            adults: slug.adults(),
            children: slug.children(),
            nationality: slug.nationality().to_string(),
            page: 1,
            price_from: PRICE_FROM.to_string(),
            price_to: PRICE_TO.to_string(),
            rating: String::new(),
            language: ambient.locale.clone(),
            currency: ambient.currency.clone(),
            child_age: form.child_ages(),
        }
    }
}

/// One search result; only the identity and name are interpreted.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Hotel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotel_id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
