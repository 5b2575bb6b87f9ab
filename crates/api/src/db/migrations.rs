//! Canonical migration definitions.
//!
//! Applied in order by the server's storage layer, which records each
//! name in a `_migrations` bookkeeping table.

/// A named migration: `(name, sql)`.
pub type Migration = (&'static str, &'static str);

pub const MIGRATIONS: &[Migration] = &[
    (
        "0001_schema",
        include_str!("../../migrations/0001_schema.sql"),
    ),
    (
        "0002_hr_extras",
        include_str!("../../migrations/0002_hr_extras.sql"),
    ),
];
