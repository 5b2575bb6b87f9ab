use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use rusqlite::Connection;
use uuid::Uuid;

use staffhub_api::{
    db, CalendarEventResponse, CalendarEventsEnvelope, CreateCalendarEventRequest, OkResponse,
    ResetCalendarResponse, UpdateCalendarEventRequest,
};

use crate::error::ApiErr;
use crate::storage::{calendar_event_from_row, sq_execute, sq_query_map, sq_query_row, Db};

/// Create the calendar table if it is missing and seed the sample rows
/// when it is empty. Runs before every read so an out-of-band drop never
/// breaks the listing.
fn ensure_table(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(db::calendar::CREATE_TABLE)?;
    let count: i64 = sq_query_row(conn, db::calendar::count(), |row| row.get(0))?;
    if count == 0 {
        seed_samples(conn)?;
    }
    Ok(())
}

fn seed_samples(conn: &Connection) -> rusqlite::Result<()> {
    for (id, title, start, end, event_type) in db::calendar::SAMPLE_EVENTS {
        sq_execute(
            conn,
            db::calendar::insert(id, title, start, end, event_type, None),
        )?;
    }
    Ok(())
}

/// Parse an event date: full datetime or bare date.
fn parse_event_date(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

/// GET /api/calendar-events — `{success: true, data: [...], error: null}`.
pub async fn list(State(db): State<Db>) -> Result<Json<CalendarEventsEnvelope>, ApiErr> {
    let conn = db.conn();
    ensure_table(&conn).map_err(ApiErr::from_db("ensure calendar table"))?;

    let data: Vec<CalendarEventResponse> =
        sq_query_map(&conn, db::calendar::list(), calendar_event_from_row)
            .map_err(ApiErr::from_db("list calendar events"))?;

    Ok(Json(CalendarEventsEnvelope {
        success: true,
        data,
        error: None,
    }))
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

/// POST /api/calendar-events
pub async fn create(
    State(db): State<Db>,
    Json(req): Json<CreateCalendarEventRequest>,
) -> Result<(StatusCode, Json<CalendarEventResponse>), ApiErr> {
    if req.title.trim().is_empty() {
        return Err(ApiErr::bad_request("title must not be empty"));
    }
    let start = parse_event_date(&req.start_date)
        .ok_or_else(|| ApiErr::bad_request("invalid start date"))?;
    let end =
        parse_event_date(&req.end_date).ok_or_else(|| ApiErr::bad_request("invalid end date"))?;
    if end < start {
        return Err(ApiErr::bad_request("event must end after it starts"));
    }

    let id = Uuid::new_v4().to_string();
    let conn = db.conn();
    ensure_table(&conn).map_err(ApiErr::from_db("ensure calendar table"))?;

    sq_execute(
        &conn,
        db::calendar::insert(
            &id,
            req.title.trim(),
            &req.start_date,
            &req.end_date,
            req.event_type.as_str(),
            req.created_by.as_deref(),
        ),
    )
    .map_err(ApiErr::from_db("insert calendar event"))?;

    let event = sq_query_row(&conn, db::calendar::get(&id), calendar_event_from_row)
        .map_err(ApiErr::from_db("reload calendar event"))?;

    Ok((StatusCode::CREATED, Json(event)))
}

// ---------------------------------------------------------------------------
// Update / Delete
// ---------------------------------------------------------------------------

/// PUT /api/calendar-events/:id
pub async fn update(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(req): Json<UpdateCalendarEventRequest>,
) -> Result<Json<OkResponse>, ApiErr> {
    let Some(built) = db::calendar::update(&id, &req) else {
        return Err(ApiErr::bad_request("no fields to update"));
    };

    let conn = db.conn();
    ensure_table(&conn).map_err(ApiErr::from_db("ensure calendar table"))?;
    let affected = sq_execute(&conn, built).map_err(ApiErr::from_db("update calendar event"))?;
    if affected == 0 {
        return Err(ApiErr::not_found("event not found"));
    }
    Ok(Json(OkResponse { ok: true }))
}

/// DELETE /api/calendar-events/:id
pub async fn delete(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<OkResponse>, ApiErr> {
    let conn = db.conn();
    ensure_table(&conn).map_err(ApiErr::from_db("ensure calendar table"))?;
    let affected =
        sq_execute(&conn, db::calendar::delete(&id)).map_err(ApiErr::from_db("delete event"))?;
    if affected == 0 {
        return Err(ApiErr::not_found("event not found"));
    }
    Ok(Json(OkResponse { ok: true }))
}

// ---------------------------------------------------------------------------
// Reset
// ---------------------------------------------------------------------------

/// POST /api/reset-calendar-events — drop, recreate, and reseed.
///
/// Never surfaces a failure: the SPA treats this as a maintenance action
/// and expects a success envelope regardless.
pub async fn reset(State(db): State<Db>) -> Json<ResetCalendarResponse> {
    let conn = db.conn();
    let result = conn
        .execute_batch(db::calendar::DROP_TABLE)
        .and_then(|_| conn.execute_batch(db::calendar::CREATE_TABLE))
        .map_err(anyhow::Error::from)
        .and_then(|_| seed_samples(&conn).map_err(anyhow::Error::from));

    if let Err(e) = result {
        tracing::error!("reset calendar events: {e}");
    }

    Json(ResetCalendarResponse {
        success: true,
        message: "calendar events reset to sample data".into(),
    })
}
