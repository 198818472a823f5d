//! Helpers for integration tests.

use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use pushkind_catalog::repository::DieselRepository;
use pushkind_common::db::{DbPool, establish_connection_pool};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Temporary SQLite file with the catalog schema applied.
pub struct TestDb {
    filename: String,
    pool: DbPool,
}

impl TestDb {
    pub fn new(filename: &str) -> Self {
        remove_files(filename);

        let pool =
            establish_connection_pool(filename).expect("Failed to establish SQLite connection.");
        let mut conn = pool
            .get()
            .expect("Failed to get SQLite connection from pool.");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Migrations failed");
        TestDb {
            filename: filename.to_string(),
            pool,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    #[allow(dead_code)]
    pub fn repo(&self) -> DieselRepository {
        DieselRepository::new(self.pool())
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        remove_files(&self.filename);
    }
}

fn remove_files(filename: &str) {
    std::fs::remove_file(filename).ok();
    std::fs::remove_file(format!("{filename}-shm")).ok();
    std::fs::remove_file(format!("{filename}-wal")).ok();
}
