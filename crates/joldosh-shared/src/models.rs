//! Domain records returned by the marketplace backend.
//!
//! Field names follow the backend's wire format.  Every struct derives
//! `Serialize` and `Deserialize` so records can be cached locally and handed
//! to a presentation layer unchanged.  Status enums carry their small state
//! machines (`is_terminal`, transition predicates); seat maths lives in
//! [`crate::availability`].

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Registration role selected during sign-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Driver,
    Passenger,
}

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// The authenticated user's own profile.
///
/// The phone number is the unique external identity; the `is_driver` flag
/// only changes which derived fields are meaningful, never the identifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i64,
    /// Canonical format `+<country><subscriber>`, unique per account.
    pub phone_number: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_driver: bool,
    #[serde(default)]
    pub is_verified_driver: bool,
    #[serde(default)]
    pub is_verified_passenger: bool,
    #[serde(default)]
    pub trips_completed_as_driver: u32,
    #[serde(default)]
    pub trips_completed_as_passenger: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f64>,
}

impl User {
    /// Name shown in cards and headers; falls back to the phone number for
    /// accounts that never filled in a name.
    pub fn display_name(&self) -> &str {
        if self.full_name.trim().is_empty() {
            &self.phone_number
        } else {
            &self.full_name
        }
    }
}

/// Public profile projection of another user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PublicUser {
    pub id: i64,
    #[serde(default)]
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default)]
    pub is_driver: bool,
    #[serde(default)]
    pub is_verified_driver: bool,
    #[serde(default)]
    pub is_verified_passenger: bool,
    #[serde(default)]
    pub trips_completed_as_driver: u32,
    #[serde(default)]
    pub trips_completed_as_passenger: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f64>,
    /// Present only for drivers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cars: Option<Vec<CarInfo>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// Car
// ---------------------------------------------------------------------------

/// Car body type.  Unknown backend values fall back to `Other` rather than
/// failing the whole record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CarType {
    Sedan,
    Hatchback,
    Universal,
    Minivan,
    Suv,
    Bus,
    #[serde(other)]
    Other,
}

/// A driver's registered car.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Car {
    pub id: i64,
    pub brand: String,
    pub model: String,
    pub year: u16,
    pub color: String,
    pub plate_number: String,
    pub car_type: CarType,
    pub passenger_seats: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub has_air_conditioning: bool,
    #[serde(default)]
    pub has_wifi: bool,
    #[serde(default)]
    pub has_child_seat: bool,
    #[serde(default)]
    pub allows_smoking: bool,
    #[serde(default)]
    pub allows_pets: bool,
    #[serde(default)]
    pub has_luggage_space: bool,
}

impl Car {
    /// "Toyota Camry (2019)" style label.
    pub fn full_name(&self) -> String {
        format!("{} {} ({})", self.brand, self.model, self.year)
    }
}

/// Car summary embedded inside announcements and trips.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CarInfo {
    pub id: i64,
    pub brand: String,
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plate_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passenger_seats: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_verified: Option<bool>,
}

// ---------------------------------------------------------------------------
// Location
// ---------------------------------------------------------------------------

/// A known origin/destination point.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub id: i64,
    pub code: String,
    /// Name in the requested language.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_ru: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_en: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_ky: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default)]
    pub is_active: bool,
}

// ---------------------------------------------------------------------------
// Announcement (driver-posted ride offer)
// ---------------------------------------------------------------------------

/// Announcement lifecycle.  Transitions are backend-authoritative; the client
/// only reads the status to gate actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnouncementStatus {
    Active,
    Full,
    Completed,
    Cancelled,
    Expired,
}

impl AnnouncementStatus {
    /// Once terminal, no booking or edit action may be offered.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled | Self::Expired)
    }
}

/// A driver-posted ride offer with fixed capacity and price.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Announcement {
    pub id: i64,
    pub from_location: String,
    pub to_location: String,
    pub departure_time: DateTime<Utc>,
    pub available_seats: u32,
    #[serde(default)]
    pub booked_seats: u32,
    /// Backend sends this either as a JSON number or a decimal string.
    #[serde(deserialize_with = "de_money")]
    pub price_per_seat: String,
    #[serde(default)]
    pub is_negotiable: bool,
    pub status: AnnouncementStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default)]
    pub allow_smoking: bool,
    #[serde(default)]
    pub allow_pets: bool,
    #[serde(default)]
    pub allow_children: bool,
    #[serde(default)]
    pub has_air_conditioning: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intermediate_stops: Option<String>,
    pub driver: i64,
    #[serde(default)]
    pub driver_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_photo: Option<String>,
    #[serde(default)]
    pub driver_verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_trips_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub car: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub car_info: Option<CarInfo>,
    /// The current user's own booking against this announcement, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub my_booking: Option<Booking>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// Booking (passenger's claim against an announcement)
// ---------------------------------------------------------------------------

/// Booking state machine:
/// `pending -> confirmed | rejected`, `confirmed -> cancelled | completed`.
/// `rejected`, `cancelled` and `completed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Rejected,
    Cancelled,
    Completed,
}

impl BookingStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Rejected | Self::Cancelled | Self::Completed)
    }

    /// Whether the backend may legally move a booking from `self` to `next`.
    /// Useful for rejecting stale cached records before acting on them.
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Confirmed)
                | (Self::Pending, Self::Rejected)
                | (Self::Confirmed, Self::Cancelled)
                | (Self::Confirmed, Self::Completed)
        )
    }
}

/// Announcement summary embedded inside a booking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingAnnouncementInfo {
    pub id: i64,
    pub from_location: String,
    pub to_location: String,
    pub departure_time: DateTime<Utc>,
    #[serde(deserialize_with = "de_money")]
    pub price_per_seat: String,
    #[serde(default)]
    pub driver_name: String,
}

/// A passenger's seat claim against an announcement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Booking {
    pub id: i64,
    pub announcement: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub announcement_info: Option<BookingAnnouncementInfo>,
    pub passenger: i64,
    #[serde(default)]
    pub passenger_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passenger_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passenger_photo: Option<String>,
    #[serde(default)]
    pub passenger_verified: bool,
    pub seats_count: u32,
    pub status: BookingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_review_from_me: Option<bool>,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Trip (passenger-posted ride request)
// ---------------------------------------------------------------------------

/// Trip state machine:
/// `open -> taken -> in_progress -> completed`, with `open | taken ->
/// cancelled` at any pre-completion point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TripStatus {
    Open,
    Taken,
    InProgress,
    Completed,
    Cancelled,
    Expired,
}

impl TripStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled | Self::Expired)
    }

    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Open, Self::Taken)
                | (Self::Taken, Self::InProgress)
                | (Self::InProgress, Self::Completed)
                | (Self::Open, Self::Cancelled)
                | (Self::Taken, Self::Cancelled)
        )
    }
}

/// A passenger-posted ride request, optionally claimed by a driver.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Trip {
    pub id: i64,
    pub from_location: String,
    pub to_location: String,
    pub departure_time: DateTime<Utc>,
    pub passengers_count: u32,
    #[serde(default, deserialize_with = "de_opt_money")]
    pub price: Option<String>,
    #[serde(default)]
    pub is_negotiable: bool,
    pub status: TripStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default)]
    pub prefer_verified_driver: bool,
    #[serde(default)]
    pub allow_smoking: bool,
    #[serde(default)]
    pub has_luggage: bool,
    #[serde(default)]
    pub with_child: bool,
    #[serde(default)]
    pub with_pet: bool,
    pub passenger: i64,
    #[serde(default)]
    pub passenger_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passenger_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passenger_photo: Option<String>,
    #[serde(default)]
    pub passenger_verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_photo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_verified: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub car: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub car_info: Option<CarInfo>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// Review
// ---------------------------------------------------------------------------

/// A rating left after a completed ride.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    pub id: i64,
    pub author: i64,
    #[serde(default)]
    pub author_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_photo: Option<String>,
    pub recipient: i64,
    #[serde(default)]
    pub recipient_name: String,
    pub rating: u8,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub was_on_time: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub was_polite: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub car_was_clean: Option<bool>,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Wire-format helpers
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(untagged)]
enum MoneyRepr {
    Number(f64),
    Text(String),
}

impl MoneyRepr {
    fn into_string(self) -> String {
        match self {
            // Render whole amounts without a trailing ".0".
            Self::Number(n) if n.fract() == 0.0 => format!("{}", n as i64),
            Self::Number(n) => format!("{n}"),
            Self::Text(s) => s,
        }
    }
}

/// Money fields arrive as either a JSON number or a decimal string depending
/// on the serializer version; normalize both to a display string.
fn de_money<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    MoneyRepr::deserialize(deserializer).map(MoneyRepr::into_string)
}

fn de_opt_money<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<MoneyRepr>::deserialize(deserializer)?.map(MoneyRepr::into_string))
}
