//! Notification query builders.
//!
//! Ownership is enforced by the `user_id` WHERE clause on every statement
//! that touches an existing row.

use sea_query::{Expr, Order, Query, SqliteQueryBuilder};

use super::tables::Notifications;
use super::Built;

/// List a user's notifications, newest first.
pub fn list(user_id: &str) -> Built {
    Query::select()
        .columns([
            Notifications::Id,
            Notifications::UserId,
            Notifications::Title,
            Notifications::Body,
            Notifications::IsRead,
            Notifications::CreatedAt,
        ])
        .from(Notifications::Table)
        .and_where(Expr::col(Notifications::UserId).eq(user_id))
        .order_by(Notifications::CreatedAt, Order::Desc)
        .build(SqliteQueryBuilder)
}

/// Fetch one notification by id.
pub fn get(id: &str) -> Built {
    Query::select()
        .columns([
            Notifications::Id,
            Notifications::UserId,
            Notifications::Title,
            Notifications::Body,
            Notifications::IsRead,
            Notifications::CreatedAt,
        ])
        .from(Notifications::Table)
        .and_where(Expr::col(Notifications::Id).eq(id))
        .build(SqliteQueryBuilder)
}

/// INSERT a notification.
pub fn insert(id: &str, user_id: &str, title: &str, body: &str) -> Built {
    Query::insert()
        .into_table(Notifications::Table)
        .columns([
            Notifications::Id,
            Notifications::UserId,
            Notifications::Title,
            Notifications::Body,
        ])
        .values_panic([id.into(), user_id.into(), title.into(), body.into()])
        .build(SqliteQueryBuilder)
}

/// Mark one notification read (scoped to the owner).
pub fn mark_read(id: &str, user_id: &str) -> Built {
    Query::update()
        .table(Notifications::Table)
        .value(Notifications::IsRead, true)
        .and_where(Expr::col(Notifications::Id).eq(id))
        .and_where(Expr::col(Notifications::UserId).eq(user_id))
        .build(SqliteQueryBuilder)
}

/// Mark all of a user's notifications read.
pub fn mark_all_read(user_id: &str) -> Built {
    Query::update()
        .table(Notifications::Table)
        .value(Notifications::IsRead, true)
        .and_where(Expr::col(Notifications::UserId).eq(user_id))
        .build(SqliteQueryBuilder)
}

/// DELETE a notification (scoped to the owner).
pub fn delete(id: &str, user_id: &str) -> Built {
    Query::delete()
        .from_table(Notifications::Table)
        .and_where(Expr::col(Notifications::Id).eq(id))
        .and_where(Expr::col(Notifications::UserId).eq(user_id))
        .build(SqliteQueryBuilder)
}
