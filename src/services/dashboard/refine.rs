//! Local narrowing of already-loaded bookings.
//!
//! The backend filters authoritatively; this pass only gives instant feedback
//! on what is on screen.

use crate::domain::booking::Booking;

fn matches(booking: &Booking, needle: &str) -> bool {
    let contains = |value: Option<&str>| {
        value
            .map(|v| v.to_lowercase().contains(needle))
            .unwrap_or(false)
    };

    booking.display_name.to_lowercase().contains(needle)
        || contains(booking.reference.as_deref())
        || contains(booking.booking_id.as_deref())
}

/// Bookings whose name, reference or id contains `needle`.
///
/// `needle` is expected lowercased; an empty needle keeps everything.
pub fn refine(bookings: Vec<Booking>, needle: &str) -> Vec<Booking> {
    if needle.is_empty() {
        return bookings;
    }
    bookings
        .into_iter()
        .filter(|booking| matches(booking, needle))
        .collect()
}
