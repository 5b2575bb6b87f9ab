use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use staffhub_api::{
    db, service, BulkEmployeeRecord, BulkRowError, BulkUploadResponse, CreateEmployeeRequest,
    EmployeeListQuery, EmployeeListResponse, EmployeeResponse, EmployeeStatus, OkResponse,
    UpdateEmployeeRequest,
};

use crate::error::ApiErr;
use crate::storage::{employee_from_row, sq_execute, sq_query_map, sq_query_row, Db};

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

/// GET /api/employees — paginated listing with search and status filter.
pub async fn list(
    State(db): State<Db>,
    Query(query): Query<EmployeeListQuery>,
) -> Result<Json<EmployeeListResponse>, ApiErr> {
    let built = db::employees::list(&query);
    let conn = db.conn();

    let total: i64 = sq_query_row(&conn, built.count_query, |row| row.get(0))
        .map_err(ApiErr::from_db("count employees"))?;

    let employees = sq_query_map(&conn, built.select_query, employee_from_row)
        .map_err(ApiErr::from_db("list employees"))?;

    Ok(Json(EmployeeListResponse {
        employees,
        total,
        page: built.page,
        per_page: built.per_page,
    }))
}

// ---------------------------------------------------------------------------
// Get
// ---------------------------------------------------------------------------

/// GET /api/employees/:id
pub async fn get(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<EmployeeResponse>, ApiErr> {
    let conn = db.conn();
    sq_query_row(&conn, db::employees::get(&id), employee_from_row)
        .map(Json)
        .map_err(|_| ApiErr::not_found("employee not found"))
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

/// POST /api/employees
pub async fn create(
    State(db): State<Db>,
    Json(req): Json<CreateEmployeeRequest>,
) -> Result<(StatusCode, Json<EmployeeResponse>), ApiErr> {
    let name = service::validate_name(&req.name, "name")?;
    let email = service::validate_email(&req.email)?;
    let status = req.status.unwrap_or(EmployeeStatus::Active);
    let salary = req.salary.unwrap_or(0.0);

    let id = Uuid::new_v4().to_string();
    let conn = db.conn();

    let result = sq_execute(
        &conn,
        db::employees::insert(
            &id,
            &name,
            &req.position,
            &req.department,
            &email,
            status.as_str(),
            salary,
            req.manager.as_deref(),
        ),
    );

    match result {
        Ok(_) => {
            let employee = sq_query_row(&conn, db::employees::get(&id), employee_from_row)
                .map_err(ApiErr::from_db("reload employee"))?;
            Ok((StatusCode::CREATED, Json(employee)))
        }
        Err(rusqlite::Error::SqliteFailure(err, _))
            if err.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            Err(ApiErr::conflict("email already in use"))
        }
        Err(e) => {
            tracing::error!("create employee: {e}");
            Err(ApiErr::internal("failed to create employee"))
        }
    }
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

/// PUT /api/employees/:id — replaces all mutable fields in one statement.
pub async fn update(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(req): Json<UpdateEmployeeRequest>,
) -> Result<Json<EmployeeResponse>, ApiErr> {
    let name = service::validate_name(&req.name, "name")?;
    let email = service::validate_email(&req.email)?;
    let status = req.status.unwrap_or(EmployeeStatus::Active);
    let salary = req.salary.unwrap_or(0.0);

    let conn = db.conn();
    let affected = sq_execute(
        &conn,
        db::employees::update(
            &id,
            &name,
            &req.position,
            &req.department,
            &email,
            status.as_str(),
            salary,
            req.manager.as_deref(),
        ),
    )
    .map_err(|e| match e {
        rusqlite::Error::SqliteFailure(err, _)
            if err.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            ApiErr::conflict("email already in use")
        }
        e => {
            tracing::error!("update employee: {e}");
            ApiErr::internal("failed to update employee")
        }
    })?;

    if affected == 0 {
        return Err(ApiErr::not_found("employee not found"));
    }

    sq_query_row(&conn, db::employees::get(&id), employee_from_row)
        .map(Json)
        .map_err(ApiErr::from_db("reload employee"))
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

/// DELETE /api/employees/:id
pub async fn delete(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<OkResponse>, ApiErr> {
    let conn = db.conn();
    let affected = sq_execute(&conn, db::employees::delete(&id))
        .map_err(ApiErr::from_db("delete employee"))?;
    if affected == 0 {
        return Err(ApiErr::not_found("employee not found"));
    }
    Ok(Json(OkResponse { ok: true }))
}

// ---------------------------------------------------------------------------
// Bulk upload
// ---------------------------------------------------------------------------

/// POST /api/employees/bulk-upload — insert an array of employee records,
/// collecting per-row failures instead of aborting the batch.
///
/// The optional `metadata` field is parsed as plain JSON and validated
/// before the rest of the row; it is never evaluated or persisted.
pub async fn bulk_upload(
    State(db): State<Db>,
    Json(records): Json<Vec<BulkEmployeeRecord>>,
) -> Result<Json<BulkUploadResponse>, ApiErr> {
    let mut inserted = 0usize;
    let mut skipped = 0usize;
    let mut errors = Vec::new();

    let conn = db.conn();

    for (row, record) in records.iter().enumerate() {
        // Metadata first, matching the original intake order.
        if let Some(serde_json::Value::String(raw)) = &record.metadata {
            if serde_json::from_str::<serde_json::Value>(raw).is_err() {
                skipped += 1;
                errors.push(BulkRowError {
                    row,
                    email: Some(record.email.clone()),
                    message: "invalid metadata".into(),
                });
                continue;
            }
        }

        let (name, email) = match (
            service::validate_name(&record.name, "name"),
            service::validate_email(&record.email),
        ) {
            (Ok(n), Ok(e)) => (n, e),
            (Err(e), _) | (_, Err(e)) => {
                skipped += 1;
                errors.push(BulkRowError {
                    row,
                    email: Some(record.email.clone()),
                    message: e.message().to_string(),
                });
                continue;
            }
        };

        let duplicate: bool = sq_query_row(&conn, db::employees::email_exists(&email), |r| {
            r.get(0)
        })
        .unwrap_or(false);
        if duplicate {
            skipped += 1;
            errors.push(BulkRowError {
                row,
                email: Some(email),
                message: "duplicate email".into(),
            });
            continue;
        }

        let id = Uuid::new_v4().to_string();
        let status = record.status.unwrap_or(EmployeeStatus::Active);
        let result = sq_execute(
            &conn,
            db::employees::insert(
                &id,
                &name,
                &record.position,
                &record.department,
                &email,
                status.as_str(),
                record.salary.unwrap_or(0.0),
                record.manager.as_deref(),
            ),
        );

        match result {
            Ok(_) => inserted += 1,
            Err(e) => {
                tracing::error!("bulk insert row {row}: {e}");
                skipped += 1;
                errors.push(BulkRowError {
                    row,
                    email: Some(email),
                    message: "insert failed".into(),
                });
            }
        }
    }

    Ok(Json(BulkUploadResponse {
        inserted,
        skipped,
        errors,
    }))
}
