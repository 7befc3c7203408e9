//! # joldosh-store
//!
//! Durable client-side storage for the Joldosh SDK, backed by SQLite.
//!
//! The crate exposes a synchronous [`Database`] handle that wraps a
//! `rusqlite::Connection` and provides typed helpers for the persisted
//! session keys (access/refresh tokens, the cached user record) and the
//! language preference.  The store is read once at process start and written
//! through on every session mutation.

pub mod database;
pub mod migrations;
pub mod prefs;
pub mod session;

mod error;

pub use database::Database;
pub use error::StoreError;
