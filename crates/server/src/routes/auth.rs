use axum::{
    extract::{FromRef, FromRequestParts, State},
    http::request::Parts,
    Json,
};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use staffhub_api::{
    crypto, db, service, AuthRegisterRequest, AuthTokenResponse, LoginRequest, LogoutRequest,
    OkResponse, RefreshRequest, UserProfileResponse, UserRole, VerifyResponse,
};

use crate::error::ApiErr;
use crate::storage::{sq_execute, sq_query_row, Db};
use crate::AppConfig;

/// Current unix time in seconds.
pub fn now_unix() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Auth extractor
// ---------------------------------------------------------------------------

/// Authenticated user extracted from the `Authorization: Bearer <jwt>` header.
pub struct AuthUser {
    pub user_id: String,
    pub username: String,
    pub role: UserRole,
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    Db: FromRef<S>,
    AppConfig: FromRef<S>,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let db = Db::from_ref(state);
        let config = AppConfig::from_ref(state);

        let token = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or_else(|| {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(serde_json::json!({"error": "missing or invalid Authorization header"})),
                )
                    .into_response()
            })?
            .to_string();

        let claims = service::resolve_auth_token(&token, &config.jwt_secret, now_unix())
            .map_err(|e| ApiErr::from(e).into_response())?;

        // Re-read the username from the DB; also drops tokens for deleted users.
        let conn = db.conn();
        let username = sq_query_row(&conn, db::users::get_by_id(&claims.user_id), |row| {
            row.get::<_, String>(1)
        })
        .map_err(|_| {
            (
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({"error": "unknown user"})),
            )
                .into_response()
        })?;

        Ok(AuthUser {
            user_id: claims.user_id,
            username,
            role: claims.role,
        })
    }
}

// ---------------------------------------------------------------------------
// Register
// ---------------------------------------------------------------------------

/// POST /api/auth/register — create a user account and issue tokens.
pub async fn register(
    State(db): State<Db>,
    State(config): State<AppConfig>,
    Json(req): Json<AuthRegisterRequest>,
) -> Result<(StatusCode, Json<AuthTokenResponse>), ApiErr> {
    let registration = std::env::var("STAFFHUB_REGISTRATION").unwrap_or_default();
    if registration == "closed" {
        return Err(ApiErr::forbidden("registration is currently closed"));
    }

    let username = service::validate_username(&req.username)?;
    let email = service::validate_email(&req.email)?;
    service::validate_password(&req.password)?;

    let conn = db.conn();
    let exists: bool = sq_query_row(
        &conn,
        db::users::username_or_email_exists(&username, &email),
        |row| row.get(0),
    )
    .unwrap_or(false);
    if exists {
        return Err(ApiErr::conflict("username or email already taken"));
    }

    let (password_hash, password_salt) = crypto::hash_password(&req.password)?;
    let user_id = Uuid::new_v4().to_string();
    let role = UserRole::Employee;

    sq_execute(
        &conn,
        db::users::insert(
            &user_id,
            &username,
            &email,
            &password_hash,
            &password_salt,
            role.as_str(),
        ),
    )
    .map_err(ApiErr::from_db("insert user"))?;

    let bundle =
        service::prepare_token_bundle(&config.jwt_secret, &user_id, &username, role, now_unix())?;
    sq_execute(
        &conn,
        db::users::insert_refresh_token(
            &bundle.token_id,
            &user_id,
            &bundle.token_hash,
            &bundle.expires_at,
        ),
    )
    .map_err(ApiErr::from_db("insert refresh token"))?;

    Ok((StatusCode::CREATED, Json(bundle.response)))
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

/// POST /api/auth/login — verify credentials and issue tokens.
pub async fn login(
    State(db): State<Db>,
    State(config): State<AppConfig>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthTokenResponse>, ApiErr> {
    let conn = db.conn();

    let row = sq_query_row(
        &conn,
        db::users::get_by_username_for_login(req.username.trim()),
        |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
            ))
        },
    );

    let Ok((user_id, username, role, password_hash, password_salt)) = row else {
        return Err(ApiErr::unauthorized("invalid username or password"));
    };

    if !crypto::verify_password(&req.password, &password_hash, &password_salt) {
        tracing::info!("failed login for {username}");
        return Err(ApiErr::unauthorized("invalid username or password"));
    }

    let role = UserRole::parse(&role).unwrap_or(UserRole::Employee);
    let bundle =
        service::prepare_token_bundle(&config.jwt_secret, &user_id, &username, role, now_unix())?;
    sq_execute(
        &conn,
        db::users::insert_refresh_token(
            &bundle.token_id,
            &user_id,
            &bundle.token_hash,
            &bundle.expires_at,
        ),
    )
    .map_err(ApiErr::from_db("insert refresh token"))?;

    Ok(Json(bundle.response))
}

// ---------------------------------------------------------------------------
// Refresh
// ---------------------------------------------------------------------------

/// POST /api/auth/refresh — rotate a refresh token into a new token pair.
pub async fn refresh(
    State(db): State<Db>,
    State(config): State<AppConfig>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<AuthTokenResponse>, ApiErr> {
    let token_hash = crypto::hash_token(&req.refresh_token);
    let conn = db.conn();

    let row = sq_query_row(&conn, db::users::lookup_refresh_token(&token_hash), |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
            row.get::<_, String>(4)?,
        ))
    });

    let Ok((token_id, user_id, expires_at, username, role)) = row else {
        return Err(ApiErr::unauthorized("invalid refresh token"));
    };

    // expires_at uses a fixed sortable datetime format, so a string
    // comparison is an ordering comparison.
    let now_str = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();
    if expires_at < now_str {
        let _ = sq_execute(&conn, db::users::delete_refresh_token_by_id(&token_id));
        return Err(ApiErr::unauthorized("refresh token expired"));
    }

    // Rotate: old token is single-use.
    sq_execute(&conn, db::users::delete_refresh_token_by_id(&token_id))
        .map_err(ApiErr::from_db("delete refresh token"))?;

    let role = UserRole::parse(&role).unwrap_or(UserRole::Employee);
    let bundle =
        service::prepare_token_bundle(&config.jwt_secret, &user_id, &username, role, now_unix())?;
    sq_execute(
        &conn,
        db::users::insert_refresh_token(
            &bundle.token_id,
            &user_id,
            &bundle.token_hash,
            &bundle.expires_at,
        ),
    )
    .map_err(ApiErr::from_db("insert refresh token"))?;

    Ok(Json(bundle.response))
}

// ---------------------------------------------------------------------------
// Verify / Me / Logout
// ---------------------------------------------------------------------------

/// POST /api/auth/verify — confirm the bearer token is valid.
pub async fn verify(user: AuthUser) -> Json<VerifyResponse> {
    Json(VerifyResponse {
        user_id: user.user_id,
        username: user.username,
        role: user.role,
    })
}

/// GET /api/auth/me — full profile of the authenticated user.
pub async fn me(State(db): State<Db>, user: AuthUser) -> Result<Json<UserProfileResponse>, ApiErr> {
    let conn = db.conn();
    sq_query_row(&conn, db::users::get_by_id(&user.user_id), |row| {
        let role: String = row.get(3)?;
        Ok(UserProfileResponse {
            user_id: row.get(0)?,
            username: row.get(1)?,
            email: row.get(2)?,
            role: UserRole::parse(&role).unwrap_or(UserRole::Employee),
            employee_id: row.get(4)?,
            created_at: row.get(5)?,
        })
    })
    .map(Json)
    .map_err(ApiErr::from_db("load profile"))
}

/// POST /api/auth/logout — revoke the presented refresh token.
pub async fn logout(
    State(db): State<Db>,
    Json(req): Json<LogoutRequest>,
) -> Result<Json<OkResponse>, ApiErr> {
    let token_hash = crypto::hash_token(&req.refresh_token);
    let conn = db.conn();
    // Unknown tokens are not an error: logout is idempotent.
    let _ = sq_execute(&conn, db::users::delete_refresh_token(&token_hash));
    Ok(Json(OkResponse { ok: true }))
}
