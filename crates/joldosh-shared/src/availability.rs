//! Seat availability and action eligibility, derived from domain records.
//!
//! Pure functions with no side effects or network access.  Status values are
//! backend-authoritative: the client never infers a status from seat counts,
//! it only uses them to decide whether an action is offerable.

use crate::models::{Announcement, AnnouncementStatus, Booking, BookingStatus, Trip, TripStatus};

/// Seats still open on an announcement, clamped to zero.
///
/// Backend data quality is not trusted here: over-booked or negative counts
/// must never produce a negative result.
pub fn free_seats(announcement: &Announcement) -> u32 {
    announcement
        .available_seats
        .saturating_sub(announcement.booked_seats)
}

/// Whether a "book" action may be offered for this announcement.
pub fn is_bookable(announcement: &Announcement) -> bool {
    announcement.status == AnnouncementStatus::Active && free_seats(announcement) > 0
}

/// Whether the owning driver may still edit or cancel the announcement.
pub fn is_editable(announcement: &Announcement) -> bool {
    !announcement.status.is_terminal()
}

/// Whether a driver may offer to take this trip request.
pub fn is_takeable(trip: &Trip) -> bool {
    trip.status == TripStatus::Open
}

/// Whether the owning passenger may still cancel the trip request.
pub fn is_trip_cancellable(trip: &Trip) -> bool {
    matches!(trip.status, TripStatus::Open | TripStatus::Taken)
}

/// Whether the passenger may withdraw this booking.
pub fn is_booking_cancellable(booking: &Booking) -> bool {
    matches!(
        booking.status,
        BookingStatus::Pending | BookingStatus::Confirmed
    )
}

/// Whether the driver still has a pending decision on this booking.
pub fn awaits_driver_decision(booking: &Booking) -> bool {
    booking.status == BookingStatus::Pending
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn announcement(available: u32, booked: u32, status: AnnouncementStatus) -> Announcement {
        let json = serde_json::json!({
            "id": 1,
            "from_location": "Бишкек",
            "to_location": "Каракол",
            "departure_time": "2026-08-23T10:00:00Z",
            "available_seats": available,
            "booked_seats": booked,
            "price_per_seat": "500",
            "status": status,
            "driver": 9,
            "created_at": Utc::now().to_rfc3339(),
        });
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn free_seats_basic() {
        assert_eq!(free_seats(&announcement(4, 1, AnnouncementStatus::Active)), 3);
    }

    #[test]
    fn free_seats_never_negative_on_overbooked_input() {
        // Over-booked record from the backend must clamp, not wrap.
        let a = announcement(2, 5, AnnouncementStatus::Active);
        assert_eq!(free_seats(&a), 0);
        assert!(free_seats(&a) <= a.available_seats);
    }

    #[test]
    fn not_bookable_when_full() {
        assert!(!is_bookable(&announcement(3, 3, AnnouncementStatus::Active)));
    }

    #[test]
    fn not_bookable_when_inactive_even_with_free_seats() {
        for status in [
            AnnouncementStatus::Full,
            AnnouncementStatus::Completed,
            AnnouncementStatus::Cancelled,
            AnnouncementStatus::Expired,
        ] {
            let a = announcement(4, 0, status);
            assert!(free_seats(&a) > 0);
            assert!(!is_bookable(&a), "{status:?} must not be bookable");
        }
    }

    #[test]
    fn bookable_when_active_with_seats() {
        assert!(is_bookable(&announcement(4, 2, AnnouncementStatus::Active)));
    }

    #[test]
    fn terminal_announcement_not_editable() {
        assert!(is_editable(&announcement(4, 0, AnnouncementStatus::Active)));
        assert!(is_editable(&announcement(4, 4, AnnouncementStatus::Full)));
        assert!(!is_editable(&announcement(4, 0, AnnouncementStatus::Cancelled)));
        assert!(!is_editable(&announcement(4, 0, AnnouncementStatus::Expired)));
    }
}
