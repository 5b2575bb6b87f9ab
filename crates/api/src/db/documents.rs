//! Document query builders.

use sea_query::{Expr, Order, Query, SqliteQueryBuilder};

use super::tables::Documents;
use super::Built;

const DOCUMENT_COLUMNS: [Documents; 7] = [
    Documents::Id,
    Documents::EmployeeId,
    Documents::DocumentType,
    Documents::FileName,
    Documents::FilePath,
    Documents::MimeType,
    Documents::UploadDate,
];

/// List documents, newest first, optionally scoped to one employee.
pub fn list(employee_id: Option<&str>) -> Built {
    let mut stmt = Query::select()
        .columns(DOCUMENT_COLUMNS)
        .from(Documents::Table)
        .order_by(Documents::UploadDate, Order::Desc)
        .to_owned();
    if let Some(emp) = employee_id {
        stmt.and_where(Expr::col(Documents::EmployeeId).eq(emp));
    }
    stmt.build(SqliteQueryBuilder)
}

/// Fetch one document by id.
pub fn get(id: &str) -> Built {
    Query::select()
        .columns(DOCUMENT_COLUMNS)
        .from(Documents::Table)
        .and_where(Expr::col(Documents::Id).eq(id))
        .build(SqliteQueryBuilder)
}

/// INSERT a document row referencing a stored file.
pub fn insert(
    id: &str,
    employee_id: Option<&str>,
    document_type: &str,
    file_name: &str,
    file_path: &str,
    mime_type: &str,
) -> Built {
    Query::insert()
        .into_table(Documents::Table)
        .columns([
            Documents::Id,
            Documents::EmployeeId,
            Documents::DocumentType,
            Documents::FileName,
            Documents::FilePath,
            Documents::MimeType,
        ])
        .values_panic([
            id.into(),
            employee_id.map(|s| s.to_string()).into(),
            document_type.into(),
            file_name.into(),
            file_path.into(),
            mime_type.into(),
        ])
        .build(SqliteQueryBuilder)
}

/// DELETE a document row.
pub fn delete(id: &str) -> Built {
    Query::delete()
        .from_table(Documents::Table)
        .and_where(Expr::col(Documents::Id).eq(id))
        .build(SqliteQueryBuilder)
}
