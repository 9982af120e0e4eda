//! Helpers for integration tests.

use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use supplier_intake::db::{DbPool, establish_connection_pool};
use tempfile::NamedTempFile;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Temporary SQLite database with migrations applied.
pub struct TestDb {
    _tempfile: NamedTempFile,
    pool: DbPool,
}

impl TestDb {
    pub fn new() -> Self {
        let tempfile = NamedTempFile::new().expect("temp database file");
        let pool = establish_connection_pool(tempfile.path().to_str().unwrap())
            .expect("SQLite connection pool");
        let mut conn = pool.get().expect("pooled SQLite connection");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("migrations apply cleanly");
        TestDb {
            _tempfile: tempfile,
            pool,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }
}
