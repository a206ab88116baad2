//! Database schema initialization and migrations.

use log::info;

use crate::error::{DatabaseResultExt, Result};

/// Schema version written to `PRAGMA user_version` once migrations ran.
pub const SCHEMA_VERSION: i64 = 2;

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        // Cascading deletes depend on this, and it is per-connection
        self.connection
            .execute("PRAGMA foreign_keys = ON", [])
            .db_context("Failed to enable foreign keys")?;

        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        self.apply_migrations()?;

        Ok(())
    }

    /// Returns the schema version recorded in the database file.
    pub fn schema_version(&self) -> Result<i64> {
        self.connection
            .query_row("PRAGMA user_version", [], |row| row.get(0))
            .db_context("Failed to read schema version")
    }

    /// Apply database migrations for existing databases
    fn apply_migrations(&self) -> Result<()> {
        let has_sort_order: bool = self
            .connection
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info('categories') WHERE name = 'sort_order'",
                [],
                |row| row.get(0),
            )
            .map(|count: i64| count > 0)
            .db_context("Failed to inspect categories table")?;

        // Version 1 had no manual ordering; number existing categories by age
        if !has_sort_order {
            info!("Migrating categories table: adding sort_order column");
            self.connection
                .execute_batch(
                    "ALTER TABLE categories ADD COLUMN sort_order INTEGER NOT NULL DEFAULT 0;
                     UPDATE categories SET sort_order = (
                         SELECT COUNT(*) FROM categories c2
                         WHERE c2.created_at < categories.created_at
                     ) + 1;",
                )
                .db_context("Failed to add sort_order column to categories table")?;
        }

        if self.schema_version()? < SCHEMA_VERSION {
            self.connection
                .pragma_update(None, "user_version", SCHEMA_VERSION)
                .db_context("Failed to record schema version")?;
        }

        Ok(())
    }
}
