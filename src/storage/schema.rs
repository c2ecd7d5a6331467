//! Database schema definitions using sea-query.
//!
//! These define the table and column identifiers for type-safe query building.

use sea_query::Iden;

/// Records table schema.
#[derive(Iden)]
pub enum Records {
    Table,
    #[iden = "key"]
    Key,
    #[iden = "value"]
    Value,
    #[iden = "updated_at"]
    UpdatedAt,
}

/// SQL for creating the records table.
pub const CREATE_RECORDS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS records (
    key TEXT NOT NULL PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
"#;
