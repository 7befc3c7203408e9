//! The session store: authentication state plus write-through persistence.
//!
//! One [`Session`] exists per process.  All components read it through a
//! shared `Arc`; mutation happens only through the named operations
//! ([`initialize`], [`login`], [`logout`], [`update_user`]).  The core
//! invariant: the session is authenticated if and only if an access token
//! AND a cached user record are both present.  Partial state never counts as
//! authenticated and is cleared on sight.
//!
//! [`initialize`]: Session::initialize
//! [`login`]: Session::login
//! [`logout`]: Session::logout
//! [`update_user`]: Session::update_user

use std::sync::{Mutex, MutexGuard};

use joldosh_shared::User;
use joldosh_store::{Database, StoreError};

use crate::error::SessionError;

/// What route guards and other readers see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionResolution {
    /// Storage has not been read yet (or a login is mid-way waiting for a
    /// profile fetch).  Guards must render a placeholder, not redirect.
    Unresolved,
    /// Resolved: no valid session.
    Anonymous,
    /// Resolved: token and user both present.
    Authenticated,
}

/// Tokens handed to [`Session::login`], already normalized from whatever
/// field aliases the backend used.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthTokens {
    pub access: String,
    pub refresh: Option<String>,
    pub user: Option<User>,
}

enum State {
    Unresolved,
    Anonymous,
    /// Token persisted, user record not yet available; resolves to
    /// authenticated once `update_user` supplies one.
    Pending { access_token: String },
    Authenticated { access_token: String, user: User },
}

struct Inner {
    db: Database,
    state: State,
}

/// Process-wide session singleton.
pub struct Session {
    inner: Mutex<Inner>,
}

/// A token is usable only if it is non-empty and not a serializer artifact.
/// Guards against persisting a literal "undefined" from a malformed response.
fn is_usable_token(token: &str) -> bool {
    !token.is_empty() && token != "undefined" && token != "null"
}

impl Session {
    /// Wrap an opened database.  The session starts unresolved; call
    /// [`Session::initialize`] before any route guard runs.
    pub fn new(db: Database) -> Self {
        Self {
            inner: Mutex::new(Inner {
                db,
                state: State::Unresolved,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A poisoned lock means a panic elsewhere; the session data itself
        // is still consistent (every mutation is a single assignment).
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Read persisted state and resolve the session.  Must run exactly once
    /// per process start, before route guards make decisions.
    ///
    /// Both a usable token and a well-formed user present: authenticated.
    /// Anything partial or malformed: both keys are cleared and the session
    /// resolves to anonymous.
    pub fn initialize(&self) -> Result<SessionResolution, StoreError> {
        let mut inner = self.lock();

        let token = inner.db.access_token()?.filter(|t| is_usable_token(t));
        // A corrupt user record loads as None (and is deleted by the store).
        let user = inner.db.user()?;

        match (token, user) {
            (Some(access_token), Some(user)) => {
                tracing::debug!(user_id = user.id, "session restored from storage");
                inner.state = State::Authenticated { access_token, user };
                Ok(SessionResolution::Authenticated)
            }
            (None, None) => {
                inner.state = State::Anonymous;
                Ok(SessionResolution::Anonymous)
            }
            _ => {
                // Token without user or user without token: clear the
                // leftovers so the partial state cannot linger.
                tracing::warn!("partial persisted session, resolving to anonymous");
                inner.db.clear_session()?;
                inner.state = State::Anonymous;
                Ok(SessionResolution::Anonymous)
            }
        }
    }

    /// Persist tokens (and the user record when provided).
    ///
    /// Rejects unusable access tokens without persisting anything.  The
    /// session becomes authenticated only when a user record is available;
    /// otherwise it stays pending until [`Session::update_user`] supplies one.
    pub fn login(&self, tokens: AuthTokens) -> Result<SessionResolution, SessionError> {
        if !is_usable_token(&tokens.access) {
            tracing::warn!("rejected login with unusable access token");
            return Err(SessionError::InvalidAccessToken);
        }

        let mut inner = self.lock();

        inner.db.save_access_token(&tokens.access)?;
        if let Some(refresh) = tokens.refresh.as_deref().filter(|t| is_usable_token(t)) {
            inner.db.save_refresh_token(refresh)?;
        }

        match tokens.user {
            Some(user) => {
                inner.db.save_user(&user)?;
                tracing::info!(user_id = user.id, "logged in");
                inner.state = State::Authenticated {
                    access_token: tokens.access,
                    user,
                };
                Ok(SessionResolution::Authenticated)
            }
            None => {
                tracing::debug!("logged in without user record, awaiting profile");
                inner.state = State::Pending {
                    access_token: tokens.access,
                };
                Ok(SessionResolution::Unresolved)
            }
        }
    }

    /// Clear all persisted session keys and reset to anonymous.
    /// Safe to call when already anonymous.
    pub fn logout(&self) -> Result<(), StoreError> {
        let mut inner = self.lock();
        inner.db.clear_session()?;
        inner.state = State::Anonymous;
        tracing::info!("logged out");
        Ok(())
    }

    /// Replace the cached user record after a profile fetch or local edit.
    ///
    /// `None` forces the session anonymous: a retained token with an absent
    /// user would violate the authentication invariant, so the tokens are
    /// cleared along with the record.
    pub fn update_user(&self, user: Option<User>) -> Result<(), StoreError> {
        let mut inner = self.lock();

        match user {
            Some(user) => {
                inner.db.save_user(&user)?;
                let token = match &inner.state {
                    State::Pending { access_token }
                    | State::Authenticated { access_token, .. } => Some(access_token.clone()),
                    _ => inner.db.access_token()?.filter(|t| is_usable_token(t)),
                };
                match token {
                    Some(access_token) => {
                        inner.state = State::Authenticated { access_token, user };
                    }
                    // A user without a token cannot authenticate.
                    None => inner.state = State::Anonymous,
                }
            }
            None => {
                inner.db.clear_session()?;
                inner.state = State::Anonymous;
            }
        }
        Ok(())
    }

    /// Teardown used by the HTTP adapter's global 401 handler.  Storage
    /// failures are logged, not propagated: the in-memory state must reset
    /// regardless.
    pub(crate) fn force_logout(&self) {
        let mut inner = self.lock();
        if let Err(e) = inner.db.clear_session() {
            tracing::error!(error = %e, "failed to clear persisted session");
        }
        inner.state = State::Anonymous;
    }

    pub fn resolution(&self) -> SessionResolution {
        match self.lock().state {
            State::Unresolved | State::Pending { .. } => SessionResolution::Unresolved,
            State::Anonymous => SessionResolution::Anonymous,
            State::Authenticated { .. } => SessionResolution::Authenticated,
        }
    }

    /// True iff an access token and a user record are both present.
    pub fn is_authenticated(&self) -> bool {
        matches!(self.lock().state, State::Authenticated { .. })
    }

    /// Current bearer token, if any (pending logins included, so the profile
    /// fetch that completes them can authenticate).
    pub fn access_token(&self) -> Option<String> {
        match &self.lock().state {
            State::Pending { access_token } | State::Authenticated { access_token, .. } => {
                Some(access_token.clone())
            }
            _ => None,
        }
    }

    /// Snapshot of the cached user record.
    pub fn user(&self) -> Option<User> {
        match &self.lock().state {
            State::Authenticated { user, .. } => Some(user.clone()),
            _ => None,
        }
    }

    /// Persisted refresh token, if any.
    pub fn refresh_token(&self) -> Result<Option<String>, StoreError> {
        self.lock().db.refresh_token()
    }

    /// Language preference used for the `Accept-Language` header.
    /// Falls back to the store default on read failure.
    pub fn language(&self) -> String {
        self.lock().db.language().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to read language preference");
            joldosh_store::prefs::DEFAULT_LANGUAGE.to_string()
        })
    }

    pub fn set_language(&self, lang: &str) -> Result<(), StoreError> {
        self.lock().db.set_language(lang)
    }
}
