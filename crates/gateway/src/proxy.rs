//! The generic proxy dispatcher.
//!
//! One code path serves every `/api` request: forward to the backend,
//! then let [`decide`] pick between relaying the upstream outcome and
//! synthesizing the matched rule's mock payload.

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::rules::{match_rule, Fallback, ProxyRule};
use crate::{mock, GatewayState};

/// Largest request body the proxy will buffer for forwarding.
const MAX_BODY_BYTES: usize = 50 * 1024 * 1024;

/// Request headers worth forwarding to the backend.
const FORWARDED_HEADERS: &[&str] = &["authorization", "content-type", "user-id"];

/// What actually came back from the backend attempt.
enum Upstream {
    Status(StatusCode),
    NetworkError(String),
    TimedOut,
}

/// What the dispatcher should do about it.
#[derive(Debug, PartialEq, Eq)]
enum Decision {
    /// Relay the upstream response (or error) unchanged.
    Relay,
    /// Synthesize the rule's mock payload, annotated with `note`.
    Mock(Option<&'static str>),
}

/// The fallback decision, separated from I/O so it can be tested.
///
/// - 2xx always relays.
/// - A clean backend 404 masks into the mock, un-annotated.
/// - Login/register mask *any* backend failure (the SPA's login flow is
///   never allowed to break).
/// - Network errors and timeouts mask into an annotated mock.
fn decide(fallback: Fallback, upstream: &Upstream) -> Decision {
    match upstream {
        Upstream::Status(s) if s.is_success() => Decision::Relay,
        Upstream::Status(s) if *s == StatusCode::NOT_FOUND => Decision::Mock(None),
        Upstream::Status(_) if matches!(fallback, Fallback::Login | Fallback::Register) => {
            Decision::Mock(None)
        }
        Upstream::Status(_) => Decision::Relay,
        Upstream::NetworkError(_) => Decision::Mock(Some("mock response: backend unreachable")),
        Upstream::TimedOut => Decision::Mock(Some("mock response: backend timed out")),
    }
}

/// Handle one `/api/*` request.
pub async fn dispatch(State(state): State<GatewayState>, req: Request) -> Response {
    let (parts, body) = req.into_parts();
    let method = parts.method.clone();
    let path = parts.uri.path().to_string();
    let path_and_query = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| path.clone());

    let body_bytes = match axum::body::to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            return (
                StatusCode::PAYLOAD_TOO_LARGE,
                Json(serde_json::json!({"error": format!("request body too large: {e}")})),
            )
                .into_response();
        }
    };

    let rule = match_rule(&method, &path);
    tracing::info!(
        "{} {}{}",
        method,
        path,
        if rule.is_some() { " (intercepted)" } else { "" },
    );

    let outcome = forward(
        &state,
        &method,
        &path_and_query,
        &parts.headers,
        &body_bytes,
        rule,
    )
    .await;

    match outcome {
        Ok(resp) => {
            let Some(rule) = rule else {
                return relay(resp).await;
            };
            match decide(rule.fallback, &Upstream::Status(resp.status())) {
                Decision::Relay => relay(resp).await,
                Decision::Mock(note) => match mock::payload(rule.fallback, &body_bytes, note) {
                    Some(payload) => mock_response(rule, payload),
                    // No applicable mock (login without credentials):
                    // relay the real outcome.
                    None => relay(resp).await,
                },
            }
        }
        Err(e) => {
            let failure = if e.timed_out {
                Upstream::TimedOut
            } else {
                Upstream::NetworkError(e.message.clone())
            };
            let Some(rule) = rule else {
                return bad_gateway(&failure);
            };
            match decide(rule.fallback, &failure) {
                Decision::Relay => bad_gateway(&failure),
                Decision::Mock(note) => match mock::payload(rule.fallback, &body_bytes, note) {
                    Some(payload) => mock_response(rule, payload),
                    None => bad_gateway(&failure),
                },
            }
        }
    }
}

/// Forwarding error: either a transport failure or the rule's timeout.
struct ForwardError {
    message: String,
    timed_out: bool,
}

async fn forward(
    state: &GatewayState,
    method: &Method,
    path_and_query: &str,
    headers: &HeaderMap,
    body: &[u8],
    rule: Option<&'static ProxyRule>,
) -> Result<reqwest::Response, ForwardError> {
    let url = format!("{}{}", state.backend_url, path_and_query);
    let mut request = state.client.request(method.clone(), &url);

    for name in FORWARDED_HEADERS {
        if let Some(value) = headers.get(*name) {
            request = request.header(*name, value.clone());
        }
    }
    if !body.is_empty() {
        request = request.body(body.to_vec());
    }

    let send = request.send();
    let result = match rule.and_then(|r| r.timeout) {
        Some(timeout) => match tokio::time::timeout(timeout, send).await {
            Ok(result) => result,
            Err(_) => {
                return Err(ForwardError {
                    message: format!("backend call timed out after {timeout:?}"),
                    timed_out: true,
                });
            }
        },
        None => send.await,
    };

    result.map_err(|e| ForwardError {
        message: e.to_string(),
        timed_out: e.is_timeout(),
    })
}

/// Relay the backend response: status, content type, and body verbatim.
async fn relay(resp: reqwest::Response) -> Response {
    let status = resp.status();
    let content_type = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_static("application/json"));

    match resp.bytes().await {
        Ok(bytes) => {
            let mut response = Response::new(Body::from(bytes));
            *response.status_mut() = status;
            response
                .headers_mut()
                .insert(header::CONTENT_TYPE, content_type);
            response
        }
        Err(e) => bad_gateway(&Upstream::NetworkError(e.to_string())),
    }
}

/// A synthesized mock is always HTTP 200.
fn mock_response(rule: &'static ProxyRule, payload: serde_json::Value) -> Response {
    tracing::warn!("serving mock fallback for {}", rule.path);
    Json(payload).into_response()
}

/// Only the literal upstream error surfaces; nothing is retried.
fn bad_gateway(failure: &Upstream) -> Response {
    let message = match failure {
        Upstream::NetworkError(e) => e.clone(),
        Upstream::TimedOut => "backend call timed out".to_string(),
        Upstream::Status(s) => format!("unexpected backend status {s}"),
    };
    (
        StatusCode::BAD_GATEWAY,
        Json(serde_json::json!({"error": message})),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_always_relays() {
        let upstream = Upstream::Status(StatusCode::OK);
        assert_eq!(decide(Fallback::CalendarEvents, &upstream), Decision::Relay);
        assert_eq!(decide(Fallback::Login, &upstream), Decision::Relay);
    }

    #[test]
    fn backend_404_masks_into_unannotated_mock() {
        let upstream = Upstream::Status(StatusCode::NOT_FOUND);
        assert_eq!(decide(Fallback::Documents, &upstream), Decision::Mock(None));
    }

    #[test]
    fn server_errors_relay_except_for_auth() {
        let upstream = Upstream::Status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(decide(Fallback::CalendarEvents, &upstream), Decision::Relay);
        assert_eq!(decide(Fallback::Login, &upstream), Decision::Mock(None));
        assert_eq!(decide(Fallback::Register, &upstream), Decision::Mock(None));
    }

    #[test]
    fn network_failures_mask_with_a_note() {
        let upstream = Upstream::NetworkError("connection refused".into());
        assert!(matches!(
            decide(Fallback::Documents, &upstream),
            Decision::Mock(Some(_))
        ));
        assert!(matches!(
            decide(Fallback::ResetCalendar, &Upstream::TimedOut),
            Decision::Mock(Some(_))
        ));
    }
}
