//! Performance goal query builders.

use sea_query::{Expr, Order, Query, SqliteQueryBuilder};

use super::tables::PerformanceGoals;
use super::Built;

const GOAL_COLUMNS: [PerformanceGoals; 8] = [
    PerformanceGoals::Id,
    PerformanceGoals::EmployeeId,
    PerformanceGoals::Title,
    PerformanceGoals::Description,
    PerformanceGoals::Status,
    PerformanceGoals::Progress,
    PerformanceGoals::DueDate,
    PerformanceGoals::CreatedAt,
];

/// List goals, optionally scoped to one employee, newest first.
pub fn list(employee_id: Option<&str>) -> Built {
    let mut stmt = Query::select()
        .columns(GOAL_COLUMNS)
        .from(PerformanceGoals::Table)
        .order_by(PerformanceGoals::CreatedAt, Order::Desc)
        .to_owned();
    if let Some(emp) = employee_id {
        stmt.and_where(Expr::col(PerformanceGoals::EmployeeId).eq(emp));
    }
    stmt.build(SqliteQueryBuilder)
}

/// Fetch one goal by id.
pub fn get(id: &str) -> Built {
    Query::select()
        .columns(GOAL_COLUMNS)
        .from(PerformanceGoals::Table)
        .and_where(Expr::col(PerformanceGoals::Id).eq(id))
        .build(SqliteQueryBuilder)
}

/// INSERT a new goal.
pub fn insert(
    id: &str,
    employee_id: &str,
    title: &str,
    description: Option<&str>,
    status: &str,
    progress: i64,
    due_date: Option<&str>,
) -> Built {
    Query::insert()
        .into_table(PerformanceGoals::Table)
        .columns([
            PerformanceGoals::Id,
            PerformanceGoals::EmployeeId,
            PerformanceGoals::Title,
            PerformanceGoals::Description,
            PerformanceGoals::Status,
            PerformanceGoals::Progress,
            PerformanceGoals::DueDate,
        ])
        .values_panic([
            id.into(),
            employee_id.into(),
            title.into(),
            description.map(|s| s.to_string()).into(),
            status.into(),
            progress.into(),
            due_date.map(|s| s.to_string()).into(),
        ])
        .build(SqliteQueryBuilder)
}

/// Dynamic UPDATE from resolved field values.
///
/// The route handler resolves the allow-listed request fields (and the
/// derived status) before calling; this only assembles the statement.
/// Returns `None` when nothing is set.
pub fn update(
    id: &str,
    title: Option<&str>,
    description: Option<&str>,
    status: Option<&str>,
    progress: Option<i64>,
    due_date: Option<&str>,
) -> Option<Built> {
    let mut stmt = Query::update().table(PerformanceGoals::Table).to_owned();
    let mut any = false;

    if let Some(title) = title {
        stmt.value(PerformanceGoals::Title, title);
        any = true;
    }
    if let Some(description) = description {
        stmt.value(PerformanceGoals::Description, description);
        any = true;
    }
    if let Some(status) = status {
        stmt.value(PerformanceGoals::Status, status);
        any = true;
    }
    if let Some(progress) = progress {
        stmt.value(PerformanceGoals::Progress, progress);
        any = true;
    }
    if let Some(due_date) = due_date {
        stmt.value(PerformanceGoals::DueDate, due_date);
        any = true;
    }

    if !any {
        return None;
    }
    stmt.and_where(Expr::col(PerformanceGoals::Id).eq(id));
    Some(stmt.build(SqliteQueryBuilder))
}

/// DELETE a goal.
pub fn delete(id: &str) -> Built {
    Query::delete()
        .from_table(PerformanceGoals::Table)
        .and_where(Expr::col(PerformanceGoals::Id).eq(id))
        .build(SqliteQueryBuilder)
}
