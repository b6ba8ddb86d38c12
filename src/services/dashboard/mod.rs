//! Bookings dashboard: debounced filters, paged loading and viewport-driven
//! auto-load, driven by a single controller task.

pub mod autoload;
pub mod controller;
pub mod debounce;
pub mod pagination;
pub mod refine;

pub use controller::{DashboardController, DashboardHandle, DashboardSettings};
