//! Schema migrations from `migrations/sqlite/`, embedded at compile time.
//!
//! Files are named `NNN_description.sql` and applied in order. Once a file
//! has shipped it is never edited; schema changes go in a new file.

use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::error::DbResult;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Embedded versus applied migration counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MigrationStatus {
    pub available: usize,
    pub applied: usize,
}

impl MigrationStatus {
    pub fn is_current(&self) -> bool {
        self.applied >= self.available
    }
}

/// Applies whatever has not run yet. Safe to call on every start.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    MIGRATOR.run(pool).await?;
    info!(available = MIGRATOR.migrations.len(), "Schema up to date");
    Ok(())
}

pub async fn migration_status(pool: &SqlitePool) -> DbResult<MigrationStatus> {
    // The bookkeeping table only exists after the first run.
    let table: Option<String> = sqlx::query_scalar(
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name = '_sqlx_migrations'",
    )
    .fetch_optional(pool)
    .await?;

    let applied = match table {
        Some(_) => {
            let count: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations WHERE success = 1")
                    .fetch_one(pool)
                    .await?;
            usize::try_from(count).unwrap_or(0)
        }
        None => 0,
    };

    let status = MigrationStatus {
        available: MIGRATOR.migrations.len(),
        applied,
    };
    if !status.is_current() {
        warn!(?status, "Pending schema migrations");
    }
    Ok(status)
}
