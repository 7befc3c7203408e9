//! Review endpoints.

use joldosh_shared::Review;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::ApiClient;

/// Reviews other users left about the authenticated user.
pub async fn my_received(api: &ApiClient) -> Result<Vec<Review>, ApiError> {
    api.get_list("/reviews/my_received/", &[]).await
}

/// Reviews the authenticated user wrote.
pub async fn my_written(api: &ApiClient) -> Result<Vec<Review>, ApiError> {
    api.get_list("/reviews/my_written/", &[]).await
}

/// Review creation payload; references either a trip or a booking.
#[derive(Debug, Default, Serialize)]
pub struct ReviewCreate<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trip: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking: Option<i64>,
    pub rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub was_on_time: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub was_polite: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub car_was_clean: Option<bool>,
}

pub async fn create(api: &ApiClient, data: &ReviewCreate<'_>) -> Result<Review, ApiError> {
    api.post_json("/reviews/", data).await
}
