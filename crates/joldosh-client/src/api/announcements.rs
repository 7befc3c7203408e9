//! Announcement endpoints (driver-posted ride offers).

use joldosh_shared::{Announcement, Booking};
use serde::Serialize;

use crate::error::ApiError;
use crate::http::ApiClient;

/// Search filters for the public announcement feed.
#[derive(Debug, Default, Clone)]
pub struct AnnouncementFilters {
    pub from_location: Option<String>,
    pub to_location: Option<String>,
    /// `YYYY-MM-DD` departure day filter.
    pub date: Option<String>,
}

/// Announcements open for booking, optionally filtered by route and day.
pub async fn available(
    api: &ApiClient,
    filters: &AnnouncementFilters,
) -> Result<Vec<Announcement>, ApiError> {
    let lang = api.session().language();
    let mut query: Vec<(&str, &str)> = Vec::new();
    if let Some(from) = filters.from_location.as_deref() {
        query.push(("from", from));
    }
    if let Some(to) = filters.to_location.as_deref() {
        query.push(("to", to));
    }
    if let Some(date) = filters.date.as_deref() {
        query.push(("date", date));
    }
    query.push(("lang", lang.as_str()));

    api.get_list("/announcements/available/", &query).await
}

/// The authenticated driver's own announcements.
pub async fn mine(api: &ApiClient) -> Result<Vec<Announcement>, ApiError> {
    let lang = api.session().language();
    api.get_list("/announcements/my/", &[("lang", lang.as_str())]).await
}

pub async fn detail(api: &ApiClient, id: i64) -> Result<Announcement, ApiError> {
    let lang = api.session().language();
    api.get_json(&format!("/announcements/{id}/"), &[("lang", lang.as_str())])
        .await
}

/// Creation payload; required fields only, options default off.
#[derive(Debug, Serialize)]
pub struct AnnouncementCreate<'a> {
    pub from_location: &'a str,
    pub to_location: &'a str,
    /// RFC 3339 departure timestamp.
    pub departure_time: &'a str,
    pub available_seats: u32,
    pub price_per_seat: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_negotiable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub car: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_smoking: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_pets: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_children: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_air_conditioning: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intermediate_stops: Option<&'a str>,
}

pub async fn create(
    api: &ApiClient,
    data: &AnnouncementCreate<'_>,
) -> Result<Announcement, ApiError> {
    api.post_json("/announcements/", data).await
}

/// Partial update of a non-terminal announcement.
#[derive(Debug, Default, Serialize)]
pub struct AnnouncementUpdate<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure_time: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_seats: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_per_seat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_negotiable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub car: Option<i64>,
}

pub async fn update(
    api: &ApiClient,
    id: i64,
    data: &AnnouncementUpdate<'_>,
) -> Result<Announcement, ApiError> {
    api.patch_json(&format!("/announcements/{id}/"), data).await
}

/// Cancel an announcement.  Terminal on the backend; the client must stop
/// offering booking/edit actions on the returned record.
pub async fn cancel(api: &ApiClient, id: i64) -> Result<Announcement, ApiError> {
    api.post_json(&format!("/announcements/{id}/cancel/"), &serde_json::json!({}))
        .await
}

/// Mark an announcement's ride as completed.
pub async fn complete(api: &ApiClient, id: i64) -> Result<Announcement, ApiError> {
    api.post_json(
        &format!("/announcements/{id}/complete/"),
        &serde_json::json!({}),
    )
    .await
}

/// Bookings made against one of the driver's announcements.
pub async fn bookings(api: &ApiClient, id: i64) -> Result<Vec<Booking>, ApiError> {
    api.get_list(&format!("/announcements/{id}/bookings/"), &[])
        .await
}
