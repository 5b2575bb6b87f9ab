use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use staffhub_api::{
    db, BankAccountListQuery, BankAccountResponse, CreateBankAccountRequest, OkResponse,
    UpdateBankAccountRequest,
};

use crate::error::ApiErr;
use crate::storage::{bank_account_from_row, sq_execute, sq_query_map, sq_query_row, Db};

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

/// GET /api/bank-accounts?employeeId= — an employee's accounts, primary first.
pub async fn list(
    State(db): State<Db>,
    Query(query): Query<BankAccountListQuery>,
) -> Result<Json<Vec<BankAccountResponse>>, ApiErr> {
    let conn = db.conn();
    sq_query_map(
        &conn,
        db::bank_accounts::list(&query.employee_id),
        bank_account_from_row,
    )
    .map(Json)
    .map_err(ApiErr::from_db("list bank accounts"))
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

/// POST /api/bank-accounts — create an account; `isPrimary: true` demotes
/// any existing primary first. Both statements run under the same
/// connection lock, so sequential calls leave exactly one primary.
pub async fn create(
    State(db): State<Db>,
    Json(req): Json<CreateBankAccountRequest>,
) -> Result<(StatusCode, Json<BankAccountResponse>), ApiErr> {
    if req.account_number.trim().is_empty() {
        return Err(ApiErr::bad_request("account number must not be empty"));
    }

    let id = Uuid::new_v4().to_string();
    let conn = db.conn();

    if req.is_primary {
        sq_execute(&conn, db::bank_accounts::clear_primary(&req.employee_id))
            .map_err(ApiErr::from_db("clear primary flag"))?;
    }

    let result = sq_execute(
        &conn,
        db::bank_accounts::insert(
            &id,
            &req.employee_id,
            &req.account_type,
            req.account_number.trim(),
            &req.bank_name,
            req.is_primary,
        ),
    );

    match result {
        Ok(_) => {
            let account = sq_query_row(&conn, db::bank_accounts::get(&id), bank_account_from_row)
                .map_err(ApiErr::from_db("reload bank account"))?;
            Ok((StatusCode::CREATED, Json(account)))
        }
        Err(rusqlite::Error::SqliteFailure(err, _))
            if err.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            Err(ApiErr::bad_request("unknown employee"))
        }
        Err(e) => {
            tracing::error!("create bank account: {e}");
            Err(ApiErr::internal("failed to create bank account"))
        }
    }
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

/// PUT /api/bank-accounts/:id — partial update; promoting to primary runs
/// the same demote-then-set sequence as create.
pub async fn update(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(req): Json<UpdateBankAccountRequest>,
) -> Result<Json<BankAccountResponse>, ApiErr> {
    let conn = db.conn();

    let account = sq_query_row(&conn, db::bank_accounts::get(&id), bank_account_from_row)
        .map_err(|_| ApiErr::not_found("bank account not found"))?;

    if req.is_primary == Some(true) {
        sq_execute(&conn, db::bank_accounts::clear_primary(&account.employee_id))
            .map_err(ApiErr::from_db("clear primary flag"))?;
    }

    if let Some(built) = db::bank_accounts::update(&id, &req) {
        sq_execute(&conn, built).map_err(ApiErr::from_db("update bank account"))?;
    }

    sq_query_row(&conn, db::bank_accounts::get(&id), bank_account_from_row)
        .map(Json)
        .map_err(ApiErr::from_db("reload bank account"))
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

/// DELETE /api/bank-accounts/:id
pub async fn delete(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<OkResponse>, ApiErr> {
    let conn = db.conn();
    let affected = sq_execute(&conn, db::bank_accounts::delete(&id))
        .map_err(ApiErr::from_db("delete bank account"))?;
    if affected == 0 {
        return Err(ApiErr::not_found("bank account not found"));
    }
    Ok(Json(OkResponse { ok: true }))
}
