//! Route guard decisions.
//!
//! A pure function from session resolution + current route to a navigation
//! decision.  While storage is still being read the guard must show a
//! placeholder rather than flash a login redirect; once resolved, anonymous
//! sessions are sent to the login entry point unless they are already there
//! (no redirect loops).  Consumers performing the redirect should replace
//! history so back-navigation cannot re-enter a guarded view after logout.

use crate::session::SessionResolution;

/// Route prefix of the login entry point.
pub const LOGIN_ROUTE: &str = "/login";

/// What the consumer should render or do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Session not yet resolved: render a loading placeholder, navigate
    /// nowhere.
    Loading,
    /// Render the requested view.
    Render,
    /// Navigate to [`LOGIN_ROUTE`], replacing history.
    RedirectToLogin,
}

/// Decide what to do with a guarded route.
pub fn decide(resolution: SessionResolution, current_route: &str) -> RouteDecision {
    match resolution {
        SessionResolution::Unresolved => RouteDecision::Loading,
        SessionResolution::Authenticated => RouteDecision::Render,
        SessionResolution::Anonymous => {
            if current_route.starts_with(LOGIN_ROUTE) {
                // Already on the login view: redirecting again would loop.
                RouteDecision::Render
            } else {
                RouteDecision::RedirectToLogin
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unresolved_renders_placeholder_never_redirects() {
        assert_eq!(
            decide(SessionResolution::Unresolved, "/trips"),
            RouteDecision::Loading
        );
        assert_eq!(
            decide(SessionResolution::Unresolved, "/login"),
            RouteDecision::Loading
        );
    }

    #[test]
    fn authenticated_renders() {
        assert_eq!(
            decide(SessionResolution::Authenticated, "/profile"),
            RouteDecision::Render
        );
    }

    #[test]
    fn anonymous_redirects_to_login() {
        assert_eq!(
            decide(SessionResolution::Anonymous, "/profile"),
            RouteDecision::RedirectToLogin
        );
    }

    #[test]
    fn anonymous_on_login_route_does_not_loop() {
        assert_eq!(
            decide(SessionResolution::Anonymous, "/login"),
            RouteDecision::Render
        );
        // nested login routes count as the login view too
        assert_eq!(
            decide(SessionResolution::Anonymous, "/login/reset"),
            RouteDecision::Render
        );
    }
}
