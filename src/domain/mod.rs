//! Domain aggregates exposed by the screen controllers.

pub mod booking;
pub mod filters;
pub mod hotel;
pub mod page;
pub mod profile;
pub mod session;
pub mod types;
