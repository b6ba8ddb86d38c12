pub mod api;
#[cfg(feature = "client")]
pub mod dashboard;
pub mod listing;
