//! Bank account query builders.
//!
//! Primary-account exclusivity is not a schema constraint: callers run
//! [`clear_primary`] followed by the insert/update while holding the
//! connection, so sequential calls leave exactly one primary per employee.

use sea_query::{Expr, Query, SqliteQueryBuilder};

use super::tables::BankAccounts;
use super::Built;
use crate::UpdateBankAccountRequest;

const ACCOUNT_COLUMNS: [BankAccounts; 6] = [
    BankAccounts::Id,
    BankAccounts::EmployeeId,
    BankAccounts::AccountType,
    BankAccounts::AccountNumber,
    BankAccounts::BankName,
    BankAccounts::IsPrimary,
];

/// List an employee's accounts, primary first.
pub fn list(employee_id: &str) -> Built {
    Query::select()
        .columns(ACCOUNT_COLUMNS)
        .from(BankAccounts::Table)
        .and_where(Expr::col(BankAccounts::EmployeeId).eq(employee_id))
        .order_by(BankAccounts::IsPrimary, sea_query::Order::Desc)
        .build(SqliteQueryBuilder)
}

/// Fetch one account by id.
pub fn get(id: &str) -> Built {
    Query::select()
        .columns(ACCOUNT_COLUMNS)
        .from(BankAccounts::Table)
        .and_where(Expr::col(BankAccounts::Id).eq(id))
        .build(SqliteQueryBuilder)
}

/// Clear the primary flag on all of an employee's accounts.
pub fn clear_primary(employee_id: &str) -> Built {
    Query::update()
        .table(BankAccounts::Table)
        .value(BankAccounts::IsPrimary, false)
        .and_where(Expr::col(BankAccounts::EmployeeId).eq(employee_id))
        .build(SqliteQueryBuilder)
}

/// INSERT a new account.
pub fn insert(
    id: &str,
    employee_id: &str,
    account_type: &str,
    account_number: &str,
    bank_name: &str,
    is_primary: bool,
) -> Built {
    Query::insert()
        .into_table(BankAccounts::Table)
        .columns(ACCOUNT_COLUMNS)
        .values_panic([
            id.into(),
            employee_id.into(),
            account_type.into(),
            account_number.into(),
            bank_name.into(),
            is_primary.into(),
        ])
        .build(SqliteQueryBuilder)
}

/// Partial UPDATE from the optional fields of the request.
/// Returns `None` when the request carries nothing to change.
pub fn update(id: &str, req: &UpdateBankAccountRequest) -> Option<Built> {
    let mut stmt = Query::update().table(BankAccounts::Table).to_owned();
    let mut any = false;

    if let Some(ref account_type) = req.account_type {
        stmt.value(BankAccounts::AccountType, account_type.as_str());
        any = true;
    }
    if let Some(ref account_number) = req.account_number {
        stmt.value(BankAccounts::AccountNumber, account_number.as_str());
        any = true;
    }
    if let Some(ref bank_name) = req.bank_name {
        stmt.value(BankAccounts::BankName, bank_name.as_str());
        any = true;
    }
    if let Some(is_primary) = req.is_primary {
        stmt.value(BankAccounts::IsPrimary, is_primary);
        any = true;
    }

    if !any {
        return None;
    }
    stmt.and_where(Expr::col(BankAccounts::Id).eq(id));
    Some(stmt.build(SqliteQueryBuilder))
}

/// DELETE an account.
pub fn delete(id: &str) -> Built {
    Query::delete()
        .from_table(BankAccounts::Table)
        .and_where(Expr::col(BankAccounts::Id).eq(id))
        .build(SqliteQueryBuilder)
}
