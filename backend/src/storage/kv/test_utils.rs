//! Shared helpers for storage-backed tests.

use tempfile::TempDir;

use super::connection::KvConnection;

/// Fresh connection over a temp directory. The `TempDir` must be kept alive
/// for the duration of the test.
pub fn test_connection() -> (TempDir, KvConnection) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let connection = KvConnection::new(dir.path()).expect("failed to create test connection");
    (dir, connection)
}

/// Install a test-friendly tracing subscriber. Safe to call repeatedly.
#[allow(dead_code)]
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}
