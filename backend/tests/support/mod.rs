//! Shared helpers for integration tests that need a real PostgreSQL.
//!
//! Each test gets a temporary database on the shared embedded cluster, migrated
//! with the same embedded migrations the server runs at startup. Set
//! `SKIP_TEST_CLUSTER=1` to skip these suites where the cluster cannot start.

use pg_embedded_setup_unpriv::TemporaryDatabase;
use pg_embedded_setup_unpriv::test_support::shared_cluster_handle;
use snippetbox::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use tokio::runtime::Runtime;

/// A freshly migrated database with a pool and a runtime to drive it.
///
/// Cluster calls block, so tests stay synchronous and enter `runtime`
/// explicitly for repository work.
pub struct MigratedDatabase {
    /// Runtime used for every async call in the test.
    pub runtime: Runtime,
    /// Pool connected to the temporary database.
    pub pool: DbPool,
    _database: TemporaryDatabase,
}

impl MigratedDatabase {
    /// Run `future` to completion on the test runtime.
    pub fn block_on<F: std::future::Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}

fn provision() -> Result<MigratedDatabase, String> {
    let cluster = shared_cluster_handle().map_err(|err| format!("cluster: {err:?}"))?;
    let name = format!("snippetbox_test_{}", uuid::Uuid::new_v4().simple());
    let database = cluster
        .temporary_database(name.as_str())
        .map_err(|err| format!("create database: {err:?}"))?;
    let url = database.url().to_string();

    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let pool = runtime.block_on(async {
        run_pending_migrations(&url)
            .await
            .map_err(|err| err.to_string())?;
        DbPool::new(PoolConfig::new(url.as_str()).with_max_size(2))
            .await
            .map_err(|err| err.to_string())
    })?;

    Ok(MigratedDatabase {
        runtime,
        pool,
        _database: database,
    })
}

/// Returns true when `SKIP_TEST_CLUSTER` is "1", "true" or "yes".
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Provision a migrated database, or `None` when the cluster is unavailable
/// and skipping was requested.
///
/// # Panics
///
/// Panics when setup fails and `SKIP_TEST_CLUSTER` is not set, so CI breakage
/// is not masked.
pub fn migrated_database() -> Option<MigratedDatabase> {
    match provision() {
        Ok(database) => Some(database),
        Err(reason) if should_skip_test_cluster() => {
            eprintln!("SKIP-TEST-CLUSTER: {reason}");
            None
        }
        Err(reason) => {
            panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.")
        }
    }
}
