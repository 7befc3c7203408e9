//! Typed wrappers over the marketplace REST endpoints, one module per
//! backend app.  All functions take the [`ApiClient`](crate::ApiClient) and
//! return typed records; list endpoints go through the pagination
//! normalization boundary in the HTTP adapter.

pub mod announcements;
pub mod auth;
pub mod bookings;
pub mod locations;
pub mod reviews;
pub mod trips;
pub mod users;
