//! # joldosh-shared
//!
//! Domain models and pure derivation logic shared between the Joldosh
//! client crates.  Everything in here is side-effect free: records returned
//! by the marketplace backend, their status state machines, seat-availability
//! maths, calendar-day date labels, and phone/PIN format validation.
//!
//! Nothing in this crate performs I/O; the HTTP and storage layers live in
//! `joldosh-client` and `joldosh-store`.

pub mod availability;
pub mod datelabel;
pub mod models;
pub mod phone;

mod error;

pub use error::ValidationError;
pub use models::*;
