#![allow(dead_code)]

use client_directory::db::{DbPool, establish_connection_pool, run_migrations};
use client_directory::domain::client::NewClient;
use client_directory::domain::types::ClientName;
use client_directory::repository::{ClientWriter, DieselRepository};
use tempfile::TempDir;

/// Migrated SQLite database living in a temporary directory.
pub struct TestDb {
    _dir: TempDir,
    pool: DbPool,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(name);
        let pool = establish_connection_pool(path.to_str().expect("utf-8 path"))
            .expect("create pool");
        run_migrations(&pool).expect("run migrations");
        Self { _dir: dir, pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub fn repo(&self) -> DieselRepository {
        DieselRepository::new(self.pool.clone())
    }
}

/// Inserts clients in the given order.
pub fn insert_clients(repo: &DieselRepository, names: &[&str]) {
    let new_clients: Vec<NewClient> = names
        .iter()
        .map(|name| NewClient::new(ClientName::new(*name).unwrap()))
        .collect();
    assert_eq!(repo.create_clients(&new_clients).unwrap(), names.len());
}
