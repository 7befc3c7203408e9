//! Profile and car endpoints.

use joldosh_shared::{Car, CarType, PublicUser, User};
use serde::Serialize;

use crate::error::ApiError;
use crate::http::ApiClient;

/// Fetch the authenticated user's own profile.
pub async fn my_profile(api: &ApiClient) -> Result<User, ApiError> {
    api.get_json("/users/me/", &[]).await
}

/// Fetch the current profile and overwrite the session's cached user.
///
/// On failure the prior cached user stays intact and the error is returned
/// as a value; a stale identity is preferable to losing the session.
pub async fn refresh_user(api: &ApiClient) -> Result<User, ApiError> {
    let user = my_profile(api).await?;
    api.session().update_user(Some(user.clone()))?;
    Ok(user)
}

/// Partial profile update; only the provided fields are sent.
#[derive(Debug, Default, Serialize)]
pub struct ProfileUpdate<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_driver: Option<bool>,
}

/// Patch the profile and refresh the cached user with the returned record.
pub async fn update_profile(api: &ApiClient, update: &ProfileUpdate<'_>) -> Result<User, ApiError> {
    let user: User = api.patch_json("/users/me/", update).await?;
    api.session().update_user(Some(user.clone()))?;
    Ok(user)
}

/// Public profile of another user.
pub async fn public_profile(api: &ApiClient, user_id: i64) -> Result<PublicUser, ApiError> {
    api.get_json(&format!("/users/{user_id}/profile/"), &[])
        .await
}

// ---------------------------------------------------------------------------
// Cars
// ---------------------------------------------------------------------------

/// Car create/update payload.  All fields optional so the same shape serves
/// both `POST` (create) and `PATCH` (partial update).
#[derive(Debug, Default, Serialize)]
pub struct CarPayload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plate_number: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub car_type: Option<CarType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passenger_seats: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_air_conditioning: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_wifi: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_child_seat: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allows_smoking: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allows_pets: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_luggage_space: Option<bool>,
}

/// List the authenticated driver's cars.
pub async fn my_cars(api: &ApiClient) -> Result<Vec<Car>, ApiError> {
    api.get_list("/users/cars/", &[]).await
}

pub async fn create_car(api: &ApiClient, car: &CarPayload<'_>) -> Result<Car, ApiError> {
    api.post_json("/users/cars/", car).await
}

pub async fn update_car(
    api: &ApiClient,
    car_id: i64,
    car: &CarPayload<'_>,
) -> Result<Car, ApiError> {
    api.patch_json(&format!("/users/cars/{car_id}/"), car).await
}

/// Delete a car.  Only the owning driver may do this; the backend enforces
/// ownership and answers 4xx otherwise.
pub async fn delete_car(api: &ApiClient, car_id: i64) -> Result<(), ApiError> {
    api.delete(&format!("/users/cars/{car_id}/")).await
}
