//! # joldosh-client
//!
//! Client SDK for the Joldosh ride-matching marketplace backend.
//!
//! The pieces, bottom to top:
//!
//! - [`http::ApiClient`] — reqwest wrapper that decorates every request with
//!   the bearer token and `Accept-Language` header and tears the session
//!   down on any 401.
//! - [`session::Session`] — the process-wide authentication state with
//!   write-through persistence (via `joldosh-store`).
//! - [`auth::OtpFlow`] / [`auth::PinFlow`] — the two login flows as explicit
//!   state machines a view layer merely renders.
//! - [`guard`] — pure route-guard decisions over the session resolution.
//! - [`api`] — typed wrappers for every backend endpoint.
//!
//! Typical startup:
//!
//! ```no_run
//! use std::sync::Arc;
//! use joldosh_client::{ApiClient, ClientConfig, Session};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! joldosh_client::init_tracing();
//!
//! let db = joldosh_store::Database::new()?;
//! let session = Arc::new(Session::new(db));
//! session.initialize()?; // before any route guard runs
//!
//! let api = ApiClient::new(&ClientConfig::from_env(), session.clone());
//! # let _ = api;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod guard;
pub mod http;
pub mod session;

mod error;
#[cfg(test)]
mod testing;

pub use config::ClientConfig;
pub use error::{ApiError, FlowError, SessionError};
pub use http::{ApiClient, Page};
pub use session::{AuthTokens, Session, SessionResolution};

use tracing_subscriber::{fmt, EnvFilter};

/// Initialise logging for binaries embedding the SDK.
///
/// Honours `RUST_LOG` when set, otherwise defaults to debug for the Joldosh
/// crates and warn for everything else.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("joldosh_client=debug,joldosh_store=info,warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}
