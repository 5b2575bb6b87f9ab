//! Employee query builders.

use sea_query::{Asterisk, Cond, Expr, Func, Order, Query, SqliteQueryBuilder};

use super::tables::Employees;
use super::Built;
use crate::EmployeeListQuery;

/// Result of building a paginated employee list query.
pub struct BuiltEmployeeListQuery {
    pub count_query: Built,
    pub select_query: Built,
    pub page: u32,
    pub per_page: u32,
}

const EMPLOYEE_COLUMNS: [Employees; 9] = [
    Employees::Id,
    Employees::Name,
    Employees::Position,
    Employees::Department,
    Employees::Email,
    Employees::Status,
    Employees::Salary,
    Employees::Manager,
    Employees::CreatedAt,
];

/// Shared WHERE clause for list/count: optional LIKE search over
/// name/email/department plus an optional status filter.
fn apply_filters(q: &mut sea_query::SelectStatement, query: &EmployeeListQuery) {
    if let Some(search) = query.search.as_deref() {
        let term = search.trim();
        if !term.is_empty() {
            let pattern = format!("%{term}%");
            q.cond_where(
                Cond::any()
                    .add(Expr::col(Employees::Name).like(pattern.clone()))
                    .add(Expr::col(Employees::Email).like(pattern.clone()))
                    .add(Expr::col(Employees::Department).like(pattern)),
            );
        }
    }
    if let Some(status) = query.status {
        q.and_where(Expr::col(Employees::Status).eq(status.as_str()));
    }
}

/// Build the paginated list query pair (COUNT + page SELECT).
pub fn list(query: &EmployeeListQuery) -> BuiltEmployeeListQuery {
    let page = query.page.max(1);
    let per_page = query.per_page.clamp(1, 100);

    let mut count = Query::select()
        .expr(Func::count(Expr::col(Asterisk)))
        .from(Employees::Table)
        .to_owned();
    apply_filters(&mut count, query);

    let mut select = Query::select()
        .columns(EMPLOYEE_COLUMNS)
        .from(Employees::Table)
        .to_owned();
    apply_filters(&mut select, query);
    select
        .order_by(Employees::Name, Order::Asc)
        .limit(per_page as u64)
        .offset((page as u64 - 1) * per_page as u64);

    BuiltEmployeeListQuery {
        count_query: count.build(SqliteQueryBuilder),
        select_query: select.build(SqliteQueryBuilder),
        page,
        per_page,
    }
}

/// Fetch one employee by id.
pub fn get(id: &str) -> Built {
    Query::select()
        .columns(EMPLOYEE_COLUMNS)
        .from(Employees::Table)
        .and_where(Expr::col(Employees::Id).eq(id))
        .build(SqliteQueryBuilder)
}

/// Check email existence (bulk upload duplicate detection).
pub fn email_exists(email: &str) -> Built {
    Query::select()
        .expr(Expr::expr(Func::count(Expr::col(Asterisk))).gt(0))
        .from(Employees::Table)
        .and_where(Expr::col(Employees::Email).eq(email))
        .build(SqliteQueryBuilder)
}

/// INSERT a new employee.
pub fn insert(
    id: &str,
    name: &str,
    position: &str,
    department: &str,
    email: &str,
    status: &str,
    salary: f64,
    manager: Option<&str>,
) -> Built {
    Query::insert()
        .into_table(Employees::Table)
        .columns([
            Employees::Id,
            Employees::Name,
            Employees::Position,
            Employees::Department,
            Employees::Email,
            Employees::Status,
            Employees::Salary,
            Employees::Manager,
        ])
        .values_panic([
            id.into(),
            name.into(),
            position.into(),
            department.into(),
            email.into(),
            status.into(),
            salary.into(),
            manager.map(|s| s.to_string()).into(),
        ])
        .build(SqliteQueryBuilder)
}

/// Full-replace UPDATE of all mutable fields in one statement.
pub fn update(
    id: &str,
    name: &str,
    position: &str,
    department: &str,
    email: &str,
    status: &str,
    salary: f64,
    manager: Option<&str>,
) -> Built {
    Query::update()
        .table(Employees::Table)
        .value(Employees::Name, name)
        .value(Employees::Position, position)
        .value(Employees::Department, department)
        .value(Employees::Email, email)
        .value(Employees::Status, status)
        .value(Employees::Salary, salary)
        .value(Employees::Manager, manager.map(|s| s.to_string()))
        .and_where(Expr::col(Employees::Id).eq(id))
        .build(SqliteQueryBuilder)
}

/// DELETE an employee.
pub fn delete(id: &str) -> Built {
    Query::delete()
        .from_table(Employees::Table)
        .and_where(Expr::col(Employees::Id).eq(id))
        .build(SqliteQueryBuilder)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_query_applies_search_and_status() {
        let built = list(&EmployeeListQuery {
            page: 2,
            per_page: 10,
            search: Some("eng".into()),
            status: Some(crate::EmployeeStatus::Active),
        });
        let (sql, _) = built.select_query;
        assert!(sql.contains("LIKE"));
        assert!(sql.contains("\"status\""));
        assert!(sql.contains("LIMIT"));
        assert_eq!(built.page, 2);
    }

    #[test]
    fn list_query_clamps_page_and_size() {
        let built = list(&EmployeeListQuery {
            page: 0,
            per_page: 10_000,
            search: None,
            status: None,
        });
        assert_eq!(built.page, 1);
        assert_eq!(built.per_page, 100);
    }
}
