//! The declarative proxy route table.
//!
//! Every intercepted path is listed here once, with its timeout and the
//! fallback shape to synthesize when the backend 404s or is unreachable.
//! Everything not in the table is forwarded verbatim with no fallback.

use axum::http::Method;
use std::time::Duration;

/// Which synthetic payload to produce when a rule's fallback fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// `{success: true, data: [], error: null}`
    CalendarEvents,
    /// `{success: true, documents: []}`
    Documents,
    /// `{success: true, message: ...}`
    ResetCalendar,
    /// Fabricated login: echoes the submitted username with a mock token.
    Login,
    /// Fabricated registration; nothing is persisted.
    Register,
    /// Benign verify envelope.
    Verify,
    /// Benign profile envelope.
    Me,
    /// Benign logout envelope.
    Logout,
    /// `{success: false, error: "backend unavailable"}`
    FetchResource,
}

/// One row of the route table.
pub struct ProxyRule {
    pub path: &'static str,
    pub method: Method,
    pub timeout: Option<Duration>,
    pub fallback: Fallback,
}

/// The fixed allow-list of intercepted routes.
///
/// Only the calendar reset carries an explicit timeout; every other
/// forward waits on the backend indefinitely.
pub static ROUTE_TABLE: &[ProxyRule] = &[
    ProxyRule {
        path: "/api/calendar-events",
        method: Method::GET,
        timeout: None,
        fallback: Fallback::CalendarEvents,
    },
    ProxyRule {
        path: "/api/documents",
        method: Method::GET,
        timeout: None,
        fallback: Fallback::Documents,
    },
    ProxyRule {
        path: "/api/reset-calendar-events",
        method: Method::POST,
        timeout: Some(Duration::from_secs(3)),
        fallback: Fallback::ResetCalendar,
    },
    ProxyRule {
        path: "/api/system/fetch-resource",
        method: Method::POST,
        timeout: None,
        fallback: Fallback::FetchResource,
    },
    ProxyRule {
        path: "/api/auth/login",
        method: Method::POST,
        timeout: None,
        fallback: Fallback::Login,
    },
    ProxyRule {
        path: "/api/auth/register",
        method: Method::POST,
        timeout: None,
        fallback: Fallback::Register,
    },
    ProxyRule {
        path: "/api/auth/verify",
        method: Method::POST,
        timeout: None,
        fallback: Fallback::Verify,
    },
    ProxyRule {
        path: "/api/auth/me",
        method: Method::GET,
        timeout: None,
        fallback: Fallback::Me,
    },
    ProxyRule {
        path: "/api/auth/logout",
        method: Method::POST,
        timeout: None,
        fallback: Fallback::Logout,
    },
];

/// Find the rule for a request, if any. Matches on the exact path (query
/// string already stripped) and method.
pub fn match_rule(method: &Method, path: &str) -> Option<&'static ProxyRule> {
    ROUTE_TABLE
        .iter()
        .find(|rule| rule.method == *method && rule.path == path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_routes_match() {
        let rule = match_rule(&Method::GET, "/api/calendar-events").unwrap();
        assert_eq!(rule.fallback, Fallback::CalendarEvents);

        let rule = match_rule(&Method::GET, "/api/documents").unwrap();
        assert_eq!(rule.fallback, Fallback::Documents);

        let rule = match_rule(&Method::POST, "/api/auth/login").unwrap();
        assert_eq!(rule.fallback, Fallback::Login);
    }

    #[test]
    fn only_reset_carries_a_timeout() {
        for rule in ROUTE_TABLE {
            if rule.path == "/api/reset-calendar-events" {
                assert_eq!(rule.timeout, Some(Duration::from_secs(3)));
            } else {
                assert_eq!(rule.timeout, None, "unexpected timeout on {}", rule.path);
            }
        }
    }

    #[test]
    fn unlisted_routes_do_not_match() {
        assert!(match_rule(&Method::GET, "/api/employees").is_none());
        assert!(match_rule(&Method::POST, "/api/calendar-events").is_none());
        assert!(match_rule(&Method::GET, "/api/auth/login").is_none());
    }
}
