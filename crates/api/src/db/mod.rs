//! Shared database schema, migrations, and query builders.
//!
//! Every query the server executes is built here with sea-query against
//! the `Iden` enums in [`tables`] — parameterized throughout.

pub mod bank_accounts;
pub mod calendar;
pub mod documents;
pub mod employees;
pub mod goals;
pub mod migrations;
pub mod notifications;
pub mod tables;
pub mod users;

// Re-export tables for convenience
pub use tables::*;

/// A built statement: SQL text plus its bound values.
pub type Built = (String, sea_query::Values);
