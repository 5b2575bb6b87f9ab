use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use staffhub_api::{
    db, service, CreateGoalRequest, GoalListQuery, GoalResponse, GoalStatus, OkResponse,
    UpdateGoalRequest,
};

use crate::error::ApiErr;
use crate::storage::{goal_from_row, sq_execute, sq_query_map, sq_query_row, Db};

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

/// GET /api/performance/goals?employeeId=
pub async fn list(
    State(db): State<Db>,
    Query(query): Query<GoalListQuery>,
) -> Result<Json<Vec<GoalResponse>>, ApiErr> {
    let conn = db.conn();
    sq_query_map(
        &conn,
        db::goals::list(query.employee_id.as_deref()),
        goal_from_row,
    )
    .map(Json)
    .map_err(ApiErr::from_db("list goals"))
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

/// POST /api/performance/goals
pub async fn create(
    State(db): State<Db>,
    Json(req): Json<CreateGoalRequest>,
) -> Result<(StatusCode, Json<GoalResponse>), ApiErr> {
    let title = service::validate_name(&req.title, "title")?;
    let progress = service::clamp_progress(req.progress.unwrap_or(0));
    let status = req.status.unwrap_or(if progress >= 100 {
        GoalStatus::Completed
    } else if progress > 0 {
        GoalStatus::InProgress
    } else {
        GoalStatus::NotStarted
    });

    let id = Uuid::new_v4().to_string();
    let conn = db.conn();

    let result = sq_execute(
        &conn,
        db::goals::insert(
            &id,
            &req.employee_id,
            &title,
            req.description.as_deref(),
            status.as_str(),
            progress,
            req.due_date.as_deref(),
        ),
    );

    match result {
        Ok(_) => {
            let goal = sq_query_row(&conn, db::goals::get(&id), goal_from_row)
                .map_err(ApiErr::from_db("reload goal"))?;
            Ok((StatusCode::CREATED, Json(goal)))
        }
        Err(rusqlite::Error::SqliteFailure(err, _))
            if err.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            Err(ApiErr::bad_request("unknown employee"))
        }
        Err(e) => {
            tracing::error!("create goal: {e}");
            Err(ApiErr::internal("failed to create goal"))
        }
    }
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

/// PUT /api/performance/goals/:id — dynamic update from the allow-listed
/// field map. When `progress` is present and `status` is not, the status
/// is derived: 100 completes; below 100 moves to in-progress unless the
/// goal is already completed.
pub async fn update(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(req): Json<UpdateGoalRequest>,
) -> Result<Json<GoalResponse>, ApiErr> {
    let conn = db.conn();

    let current = sq_query_row(&conn, db::goals::get(&id), goal_from_row)
        .map_err(|_| ApiErr::not_found("goal not found"))?;

    let progress = req.progress.map(service::clamp_progress);
    let status = match (req.status, progress) {
        (Some(explicit), _) => Some(explicit),
        (None, Some(p)) => Some(service::derive_goal_status(p, current.status)),
        (None, None) => None,
    };

    let built = db::goals::update(
        &id,
        req.title.as_deref(),
        req.description.as_deref(),
        status.as_ref().map(GoalStatus::as_str),
        progress,
        req.due_date.as_deref(),
    );

    if let Some(built) = built {
        sq_execute(&conn, built).map_err(ApiErr::from_db("update goal"))?;
    }

    sq_query_row(&conn, db::goals::get(&id), goal_from_row)
        .map(Json)
        .map_err(ApiErr::from_db("reload goal"))
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

/// DELETE /api/performance/goals/:id
pub async fn delete(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<OkResponse>, ApiErr> {
    let conn = db.conn();
    let affected =
        sq_execute(&conn, db::goals::delete(&id)).map_err(ApiErr::from_db("delete goal"))?;
    if affected == 0 {
        return Err(ApiErr::not_found("goal not found"));
    }
    Ok(Json(OkResponse { ok: true }))
}
