//! Embedded PostgreSQL helpers shared by the Diesel repository suites.
//!
//! Each suite borrows the process-wide cluster from `pg-embed-setup-unpriv`
//! and works in its own temporary database with the portal migrations
//! applied. Set `SKIP_TEST_CLUSTER=1` where the cluster cannot start.

use pg_embedded_setup_unpriv::TemporaryDatabase;
use pg_embedded_setup_unpriv::test_support::shared_cluster_handle;
use portal::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use tokio::runtime::Runtime;

/// Returns true when `SKIP_TEST_CLUSTER` is `1`, `true` or `yes`.
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Skip when the cluster is opted out, otherwise fail loudly.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}

/// A migrated temporary database and a small pool onto it.
pub struct MigratedDatabase {
    pub pool: DbPool,
    pub url: String,
    _database: TemporaryDatabase,
}

/// Create a fresh database on the shared cluster and migrate it.
pub fn migrated_database(runtime: &Runtime) -> Result<MigratedDatabase, String> {
    let cluster = shared_cluster_handle().map_err(|err| format!("cluster: {err:?}"))?;
    let name = format!("portal_test_{}", uuid::Uuid::new_v4().simple());
    let database = cluster
        .temporary_database(name.as_str())
        .map_err(|err| format!("temporary database: {err:?}"))?;
    let url = database.url().to_string();

    runtime
        .block_on(run_migrations(&url))
        .map_err(|err| err.to_string())?;
    let pool = runtime
        .block_on(DbPool::new(PoolConfig::new(url.as_str()).with_max_size(2)))
        .map_err(|err| err.to_string())?;

    Ok(MigratedDatabase {
        pool,
        url,
        _database: database,
    })
}
