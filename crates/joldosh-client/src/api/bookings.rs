//! Booking endpoints (passenger claims against announcements).

use joldosh_shared::Booking;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::ApiClient;

/// The authenticated passenger's own bookings.
pub async fn mine(api: &ApiClient) -> Result<Vec<Booking>, ApiError> {
    api.get_list("/bookings/my/", &[]).await
}

/// Bookings awaiting the authenticated driver's decision.
pub async fn incoming(api: &ApiClient) -> Result<Vec<Booking>, ApiError> {
    let lang = api.session().language();
    api.get_list("/bookings/incoming/", &[("lang", lang.as_str())]).await
}

/// Booking creation payload.  Seat count must not exceed the announcement's
/// free seats; the backend enforces this and answers with a rejection the
/// client surfaces rather than retrying.
#[derive(Debug, Serialize)]
pub struct BookingCreate<'a> {
    pub announcement: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seats_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<&'a str>,
}

pub async fn create(api: &ApiClient, data: &BookingCreate<'_>) -> Result<Booking, ApiError> {
    api.post_json("/bookings/", data).await
}

/// Driver accepts a pending booking.
pub async fn confirm(api: &ApiClient, id: i64) -> Result<Booking, ApiError> {
    api.post_json(&format!("/bookings/{id}/confirm/"), &serde_json::json!({}))
        .await
}

#[derive(Serialize)]
struct RejectRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    comment: Option<&'a str>,
}

/// Driver declines a pending booking, optionally with a comment.
pub async fn reject(api: &ApiClient, id: i64, comment: Option<&str>) -> Result<Booking, ApiError> {
    api.post_json(&format!("/bookings/{id}/reject/"), &RejectRequest { comment })
        .await
}

/// Passenger withdraws a pending or confirmed booking.
pub async fn cancel(api: &ApiClient, id: i64) -> Result<Booking, ApiError> {
    api.post_json(&format!("/bookings/{id}/cancel/"), &serde_json::json!({}))
        .await
}
