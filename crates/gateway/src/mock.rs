//! Synthetic fallback payloads.
//!
//! Every mock is an HTTP 200 JSON body so the SPA's fetch-then-`.json()`
//! chain never hard-fails. When a mock replaces a failed call (rather
//! than a clean backend 404) it carries a `note` marking it as such.

use serde_json::{json, Value};

use crate::rules::Fallback;

/// Unix milliseconds, used to suffix mock tokens.
fn now_millis() -> u128 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

fn annotate(mut payload: Value, note: Option<&str>) -> Value {
    if let (Some(note), Some(map)) = (note, payload.as_object_mut()) {
        map.insert("note".into(), Value::String(note.to_string()));
    }
    payload
}

/// Build the synthetic payload for a fallback kind.
///
/// `request_body` is the original request body; the login mock reads the
/// submitted username out of it. Returns `None` when the fallback does
/// not apply (login without credentials), in which case the dispatcher
/// relays the upstream outcome instead.
pub fn payload(fallback: Fallback, request_body: &[u8], note: Option<&str>) -> Option<Value> {
    let value = match fallback {
        Fallback::CalendarEvents => json!({
            "success": true,
            "data": [],
            "error": null,
        }),
        Fallback::Documents => json!({
            "success": true,
            "documents": [],
        }),
        Fallback::ResetCalendar => json!({
            "success": true,
            "message": "calendar events reset to sample data",
        }),
        Fallback::FetchResource => json!({
            "success": false,
            "error": "backend unavailable",
        }),
        Fallback::Login => return login(request_body, note),
        Fallback::Register => json!({
            "success": true,
            "message": "registration accepted",
        }),
        Fallback::Verify => json!({
            "success": true,
            "valid": true,
        }),
        Fallback::Me => json!({
            "success": true,
            "user": mock_user("guest"),
        }),
        Fallback::Logout => json!({
            "success": true,
        }),
    };
    Some(annotate(value, note))
}

/// Fabricated login success. Only fires when the request actually carried
/// a username and password; the submitted username is echoed back with a
/// deterministic fake user and a timestamp-suffixed fake token.
fn login(request_body: &[u8], note: Option<&str>) -> Option<Value> {
    let body: Value = serde_json::from_slice(request_body).ok()?;
    let username = body.get("username")?.as_str()?;
    let password = body.get("password")?.as_str()?;
    if username.is_empty() || password.is_empty() {
        return None;
    }

    let payload = json!({
        "success": true,
        "user": mock_user(username),
        "token": format!("mock-jwt-token-{}", now_millis()),
    });
    Some(annotate(payload, note))
}

fn mock_user(username: &str) -> Value {
    json!({
        "id": "mock-user",
        "username": username,
        "role": "employee",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calendar_fallback_shape() {
        let value = payload(Fallback::CalendarEvents, b"", None).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["data"], json!([]));
        assert!(value["error"].is_null());
        assert!(value.get("note").is_none());
    }

    #[test]
    fn documents_fallback_shape() {
        let value = payload(Fallback::Documents, b"", Some("backend unreachable")).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["documents"], json!([]));
        assert_eq!(value["note"], "backend unreachable");
    }

    #[test]
    fn login_mock_echoes_username_and_prefixes_token() {
        let body = br#"{"username": "x", "password": "y"}"#;
        let value = payload(Fallback::Login, body, None).unwrap();
        assert_eq!(value["user"]["username"], "x");
        assert!(value["token"]
            .as_str()
            .unwrap()
            .starts_with("mock-jwt-token-"));
    }

    #[test]
    fn login_mock_requires_credentials() {
        assert!(payload(Fallback::Login, b"{}", None).is_none());
        assert!(payload(Fallback::Login, br#"{"username": "x"}"#, None).is_none());
        assert!(payload(Fallback::Login, b"not json", None).is_none());
    }
}
