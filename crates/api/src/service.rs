//! Shared business logic — framework-agnostic pure functions.
//!
//! Route handlers stay thin adapters: validation, status derivation, and
//! token preparation all live here where they can be unit tested.

use crate::{AuthTokenResponse, GoalStatus, ServiceError, UserRole};

// ─── Validation ─────────────────────────────────────────────────────────────

/// Validate and normalize an email address. Returns the lowercased, trimmed email.
pub fn validate_email(email: &str) -> Result<String, ServiceError> {
    let email = email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') || email.len() > 254 {
        return Err(ServiceError::BadRequest("invalid email address".into()));
    }
    Ok(email)
}

/// Validate a password (at least 8 characters).
pub fn validate_password(password: &str) -> Result<(), ServiceError> {
    if password.len() < 8 {
        return Err(ServiceError::BadRequest(
            "password must be at least 8 characters".into(),
        ));
    }
    Ok(())
}

/// Validate and normalize a username. Returns the trimmed username.
pub fn validate_username(username: &str) -> Result<String, ServiceError> {
    let trimmed = username.trim().to_string();
    if trimmed.is_empty() || trimmed.len() > 64 {
        return Err(ServiceError::BadRequest(
            "username must be 1-64 characters".into(),
        ));
    }
    Ok(trimmed)
}

/// Validate a person or entity name (employee name, bank name, goal title).
pub fn validate_name(name: &str, what: &str) -> Result<String, ServiceError> {
    let trimmed = name.trim().to_string();
    if trimmed.is_empty() || trimmed.len() > 255 {
        return Err(ServiceError::BadRequest(format!(
            "{what} must be 1-255 characters"
        )));
    }
    Ok(trimmed)
}

// ─── Goal status derivation ─────────────────────────────────────────────────

/// Clamp a goal's progress into the 0–100 range.
pub fn clamp_progress(progress: i64) -> i64 {
    progress.clamp(0, 100)
}

/// Derive a goal's status from its progress.
///
/// 100 always completes the goal. Below 100 the goal moves to in-progress,
/// unless it was already completed (a completed goal is never demoted by a
/// progress-only update).
pub fn derive_goal_status(progress: i64, current: GoalStatus) -> GoalStatus {
    if clamp_progress(progress) >= 100 {
        GoalStatus::Completed
    } else if current == GoalStatus::Completed {
        GoalStatus::Completed
    } else {
        GoalStatus::InProgress
    }
}

// ─── Auth token resolution ──────────────────────────────────────────────────

/// Resolve a bearer token string into verified claims.
///
/// Centralizes the JWT handling shared by the server's extractor and the
/// verify endpoint; callers only extract the token string from headers.
pub fn resolve_auth_token(
    token: &str,
    jwt_secret: &str,
    now: u64,
) -> Result<crate::crypto::TokenClaims, ServiceError> {
    if jwt_secret.is_empty() {
        return Err(ServiceError::Unauthorized(
            "JWT authentication not configured".into(),
        ));
    }
    crate::crypto::verify_jwt(token, jwt_secret, now)
}

// ─── Token Bundle ───────────────────────────────────────────────────────────

/// Pre-computed token bundle returned by [`prepare_token_bundle`].
///
/// Contains everything needed to insert a refresh token and return the auth
/// response. The caller only needs to perform the DB INSERT.
pub struct TokenBundle {
    /// JWT access token.
    pub access_token: String,
    /// Raw refresh token (sent to the client).
    pub refresh_token: String,
    /// SHA-256 hash of the refresh token (stored in DB).
    pub token_hash: String,
    /// UUID primary key for the refresh_tokens row.
    pub token_id: String,
    /// `datetime` string for the refresh token expiry (DB column value).
    pub expires_at: String,
    /// Ready-to-return API response.
    pub response: AuthTokenResponse,
}

/// Build a [`TokenBundle`] containing a JWT, refresh token, and the auth response.
///
/// This is the pure-computation part of issuing tokens. Each caller only
/// needs to insert the refresh token row into the database.
pub fn prepare_token_bundle(
    jwt_secret: &str,
    user_id: &str,
    username: &str,
    role: UserRole,
    now_unix: u64,
) -> Result<TokenBundle, ServiceError> {
    use crate::crypto;

    let access_token = crypto::sign_jwt(user_id, role, jwt_secret, now_unix);
    let refresh_token = crypto::generate_token()?;
    let token_hash = crypto::hash_token(&refresh_token);
    let token_id = uuid::Uuid::new_v4().to_string();

    let base = chrono::DateTime::from_timestamp(now_unix as i64, 0)
        .ok_or_else(|| ServiceError::Internal("invalid timestamp".into()))?;
    let expires_at = base
        .checked_add_signed(chrono::Duration::seconds(
            crypto::REFRESH_EXPIRY_SECS as i64,
        ))
        .ok_or_else(|| ServiceError::Internal("timestamp overflow".into()))?
        .format("%Y-%m-%d %H:%M:%S")
        .to_string();

    let response = AuthTokenResponse {
        access_token: access_token.clone(),
        refresh_token: refresh_token.clone(),
        expires_in: crypto::JWT_EXPIRY_SECS,
        user_id: user_id.to_string(),
        username: username.to_string(),
        role,
    };

    Ok(TokenBundle {
        access_token,
        refresh_token,
        token_hash,
        token_id,
        expires_at,
        response,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_username() {
        assert!(validate_username("alice").is_ok());
        assert_eq!(validate_username("  bob  ").unwrap(), "bob");
        assert!(validate_username("").is_err());
        assert!(validate_username("   ").is_err());
        assert!(validate_username(&"x".repeat(65)).is_err());
        assert!(validate_username(&"x".repeat(64)).is_ok());
    }

    #[test]
    fn test_validate_email() {
        assert_eq!(validate_email(" Bob@Example.COM ").unwrap(), "bob@example.com");
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn progress_100_completes() {
        assert_eq!(
            derive_goal_status(100, GoalStatus::NotStarted),
            GoalStatus::Completed
        );
        assert_eq!(
            derive_goal_status(150, GoalStatus::InProgress),
            GoalStatus::Completed
        );
    }

    #[test]
    fn partial_progress_moves_to_in_progress() {
        assert_eq!(
            derive_goal_status(50, GoalStatus::NotStarted),
            GoalStatus::InProgress
        );
        assert_eq!(
            derive_goal_status(0, GoalStatus::Cancelled),
            GoalStatus::InProgress
        );
    }

    #[test]
    fn completed_goal_is_not_demoted() {
        assert_eq!(
            derive_goal_status(50, GoalStatus::Completed),
            GoalStatus::Completed
        );
    }

    #[test]
    fn progress_is_clamped() {
        assert_eq!(clamp_progress(-5), 0);
        assert_eq!(clamp_progress(250), 100);
        assert_eq!(clamp_progress(42), 42);
    }
}
