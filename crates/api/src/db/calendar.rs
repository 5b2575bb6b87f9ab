//! Calendar event query builders.
//!
//! The calendar table is created lazily: the listing and reset paths both
//! run [`CREATE_TABLE`] (idempotent) before touching it, and reseed the
//! sample rows when the table is empty or freshly recreated.

use sea_query::{Expr, Order, Query, SqliteQueryBuilder};

use super::tables::CalendarEvents;
use super::Built;
use crate::UpdateCalendarEventRequest;

/// Idempotent DDL for the lazily-created table.
pub const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS calendar_events (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    start_date TEXT NOT NULL,
    end_date TEXT NOT NULL,
    event_type TEXT NOT NULL DEFAULT 'other'
        CHECK (event_type IN ('meeting', 'holiday', 'training', 'conference', 'other')),
    created_by TEXT REFERENCES employees(id) ON DELETE SET NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
)";

pub const DROP_TABLE: &str = "DROP TABLE IF EXISTS calendar_events";

/// Sample rows seeded on reset and on lazy creation:
/// `(id, title, start_date, end_date, event_type)`.
pub const SAMPLE_EVENTS: &[(&str, &str, &str, &str, &str)] = &[
    (
        "sample-allhands",
        "Quarterly All-Hands",
        "2025-01-15 10:00:00",
        "2025-01-15 11:30:00",
        "meeting",
    ),
    (
        "sample-founders-day",
        "Founders' Day (office closed)",
        "2025-02-03 00:00:00",
        "2025-02-03 23:59:59",
        "holiday",
    ),
    (
        "sample-onboarding",
        "New Hire Onboarding",
        "2025-02-10 09:00:00",
        "2025-02-12 17:00:00",
        "training",
    ),
];

/// COUNT of rows (used to decide whether to reseed after lazy creation).
pub fn count() -> Built {
    Query::select()
        .expr(sea_query::Func::count(Expr::col(sea_query::Asterisk)))
        .from(CalendarEvents::Table)
        .build(SqliteQueryBuilder)
}

/// Fetch one event by id.
pub fn get(id: &str) -> Built {
    Query::select()
        .columns([
            CalendarEvents::Id,
            CalendarEvents::Title,
            CalendarEvents::StartDate,
            CalendarEvents::EndDate,
            CalendarEvents::EventType,
            CalendarEvents::CreatedBy,
            CalendarEvents::CreatedAt,
        ])
        .from(CalendarEvents::Table)
        .and_where(Expr::col(CalendarEvents::Id).eq(id))
        .build(SqliteQueryBuilder)
}

/// List all events ordered by start date.
pub fn list() -> Built {
    Query::select()
        .columns([
            CalendarEvents::Id,
            CalendarEvents::Title,
            CalendarEvents::StartDate,
            CalendarEvents::EndDate,
            CalendarEvents::EventType,
            CalendarEvents::CreatedBy,
            CalendarEvents::CreatedAt,
        ])
        .from(CalendarEvents::Table)
        .order_by(CalendarEvents::StartDate, Order::Asc)
        .build(SqliteQueryBuilder)
}

/// INSERT a new event.
pub fn insert(
    id: &str,
    title: &str,
    start_date: &str,
    end_date: &str,
    event_type: &str,
    created_by: Option<&str>,
) -> Built {
    Query::insert()
        .into_table(CalendarEvents::Table)
        .columns([
            CalendarEvents::Id,
            CalendarEvents::Title,
            CalendarEvents::StartDate,
            CalendarEvents::EndDate,
            CalendarEvents::EventType,
            CalendarEvents::CreatedBy,
        ])
        .values_panic([
            id.into(),
            title.into(),
            start_date.into(),
            end_date.into(),
            event_type.into(),
            created_by.map(|s| s.to_string()).into(),
        ])
        .build(SqliteQueryBuilder)
}

/// Partial UPDATE from the optional fields of the request.
/// Returns `None` when the request carries nothing to change.
pub fn update(id: &str, req: &UpdateCalendarEventRequest) -> Option<Built> {
    let mut stmt = Query::update().table(CalendarEvents::Table).to_owned();
    let mut any = false;

    if let Some(ref title) = req.title {
        stmt.value(CalendarEvents::Title, title.as_str());
        any = true;
    }
    if let Some(ref start) = req.start_date {
        stmt.value(CalendarEvents::StartDate, start.as_str());
        any = true;
    }
    if let Some(ref end) = req.end_date {
        stmt.value(CalendarEvents::EndDate, end.as_str());
        any = true;
    }
    if let Some(event_type) = req.event_type {
        stmt.value(CalendarEvents::EventType, event_type.as_str());
        any = true;
    }

    if !any {
        return None;
    }
    stmt.and_where(Expr::col(CalendarEvents::Id).eq(id));
    Some(stmt.build(SqliteQueryBuilder))
}

/// DELETE an event.
pub fn delete(id: &str) -> Built {
    Query::delete()
        .from_table(CalendarEvents::Table)
        .and_where(Expr::col(CalendarEvents::Id).eq(id))
        .build(SqliteQueryBuilder)
}
