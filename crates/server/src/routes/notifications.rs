use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use staffhub_api::{
    db, CreateNotificationRequest, NotificationListResponse, NotificationResponse, OkResponse,
    UserRole,
};

use crate::error::ApiErr;
use crate::routes::auth::AuthUser;
use crate::storage::{notification_from_row, sq_execute, sq_query_map, sq_query_row, Db};

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

/// GET /api/notifications — the authenticated user's rows, newest first.
pub async fn list(
    State(db): State<Db>,
    user: AuthUser,
) -> Result<Json<NotificationListResponse>, ApiErr> {
    let conn = db.conn();
    let notifications = sq_query_map(
        &conn,
        db::notifications::list(&user.user_id),
        notification_from_row,
    )
    .map_err(ApiErr::from_db("list notifications"))?;

    Ok(Json(NotificationListResponse { notifications }))
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

/// POST /api/notifications — managers and admins may notify any user.
pub async fn create(
    State(db): State<Db>,
    user: AuthUser,
    Json(req): Json<CreateNotificationRequest>,
) -> Result<(StatusCode, Json<NotificationResponse>), ApiErr> {
    if user.role == UserRole::Employee {
        return Err(ApiErr::forbidden("managers only"));
    }
    if req.title.trim().is_empty() {
        return Err(ApiErr::bad_request("title must not be empty"));
    }

    let id = Uuid::new_v4().to_string();
    let conn = db.conn();

    sq_execute(
        &conn,
        db::notifications::insert(&id, &req.user_id, req.title.trim(), &req.body),
    )
    .map_err(|e| match e {
        rusqlite::Error::SqliteFailure(err, _)
            if err.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            ApiErr::bad_request("unknown user")
        }
        e => {
            tracing::error!("create notification: {e}");
            ApiErr::internal("failed to create notification")
        }
    })?;

    let notification = sq_query_row(&conn, db::notifications::get(&id), notification_from_row)
        .map_err(ApiErr::from_db("reload notification"))?;

    Ok((StatusCode::CREATED, Json(notification)))
}

// ---------------------------------------------------------------------------
// Mark read
// ---------------------------------------------------------------------------

/// PUT /api/notifications/:id/read — a missing or foreign row is swallowed
/// into success; the SPA badge logic never needs the distinction.
pub async fn mark_read(
    State(db): State<Db>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Json<OkResponse> {
    let conn = db.conn();
    if let Err(e) = sq_execute(&conn, db::notifications::mark_read(&id, &user.user_id)) {
        tracing::error!("mark notification read: {e}");
    }
    Json(OkResponse { ok: true })
}

/// PUT /api/notifications/read-all
pub async fn mark_all_read(State(db): State<Db>, user: AuthUser) -> Json<OkResponse> {
    let conn = db.conn();
    if let Err(e) = sq_execute(&conn, db::notifications::mark_all_read(&user.user_id)) {
        tracing::error!("mark all notifications read: {e}");
    }
    Json(OkResponse { ok: true })
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

/// DELETE /api/notifications/:id — scoped to the owner; missing rows are
/// swallowed like mark-read.
pub async fn delete(
    State(db): State<Db>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Json<OkResponse> {
    let conn = db.conn();
    if let Err(e) = sq_execute(&conn, db::notifications::delete(&id, &user.user_id)) {
        tracing::error!("delete notification: {e}");
    }
    Json(OkResponse { ok: true })
}
