use serde::Serialize;

/// Message rendered when the hotel search failed.
pub const LISTING_ERROR: &str = "Error loading hotels";

/// What the hotel listing screen renders.
///
/// The listing component reads the hotels themselves from
/// [`crate::state::HotelsState`]; only the loading flag is passed down.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ListingView {
    /// Render nothing.
    Hidden,
    Error { message: String },
    Listing { is_loading: bool },
}
