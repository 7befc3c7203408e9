//! Trip endpoints (passenger-posted ride requests).

use joldosh_shared::Trip;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::ApiClient;

/// Open trip requests a driver can take, optionally filtered by route.
pub async fn available(
    api: &ApiClient,
    from: Option<&str>,
    to: Option<&str>,
) -> Result<Vec<Trip>, ApiError> {
    let mut query: Vec<(&str, &str)> = Vec::new();
    if let Some(from) = from {
        query.push(("from", from));
    }
    if let Some(to) = to {
        query.push(("to", to));
    }
    api.get_list("/trips/available/", &query).await
}

/// The authenticated passenger's own trip requests.
pub async fn mine(api: &ApiClient) -> Result<Vec<Trip>, ApiError> {
    api.get_list("/trips/my/", &[]).await
}

/// Trips the authenticated driver currently has taken or in progress.
pub async fn my_active(api: &ApiClient) -> Result<Vec<Trip>, ApiError> {
    api.get_list("/trips/my-active/", &[]).await
}

pub async fn my_completed(api: &ApiClient) -> Result<Vec<Trip>, ApiError> {
    api.get_list("/trips/my-completed/", &[]).await
}

pub async fn detail(api: &ApiClient, id: i64) -> Result<Trip, ApiError> {
    api.get_json(&format!("/trips/{id}/"), &[]).await
}

/// Trip creation payload.
#[derive(Debug, Serialize)]
pub struct TripCreate<'a> {
    pub from_location: &'a str,
    pub to_location: &'a str,
    /// RFC 3339 departure timestamp.
    pub departure_time: &'a str,
    pub passengers_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_negotiable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefer_verified_driver: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_smoking: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_luggage: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub with_child: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub with_pet: Option<bool>,
}

pub async fn create(api: &ApiClient, data: &TripCreate<'_>) -> Result<Trip, ApiError> {
    api.post_json("/trips/", data).await
}

/// Partial update of an open trip request.
#[derive(Debug, Default, Serialize)]
pub struct TripUpdate<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure_time: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passengers_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_negotiable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<&'a str>,
}

pub async fn update(api: &ApiClient, id: i64, data: &TripUpdate<'_>) -> Result<Trip, ApiError> {
    api.patch_json(&format!("/trips/{id}/"), data).await
}

#[derive(Serialize)]
struct TakeRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    car_id: Option<i64>,
}

/// Driver accepts an open trip request, optionally naming the car.
pub async fn take(api: &ApiClient, id: i64, car_id: Option<i64>) -> Result<Trip, ApiError> {
    api.post_json(&format!("/trips/{id}/take/"), &TakeRequest { car_id })
        .await
}

/// Driver backs out of a taken trip, reopening it.
pub async fn release(api: &ApiClient, id: i64) -> Result<Trip, ApiError> {
    api.post_json(&format!("/trips/{id}/release/"), &serde_json::json!({}))
        .await
}

/// Driver marks the ride finished.
pub async fn finish(api: &ApiClient, id: i64) -> Result<Trip, ApiError> {
    api.post_json(&format!("/trips/{id}/finish/"), &serde_json::json!({}))
        .await
}

/// Passenger cancels an open or taken trip request.
pub async fn cancel(api: &ApiClient, id: i64) -> Result<Trip, ApiError> {
    api.post_json(&format!("/trips/{id}/cancel/"), &serde_json::json!({}))
        .await
}
