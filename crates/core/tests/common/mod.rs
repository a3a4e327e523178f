//! Shared setup for integration tests

use ctor::ctor;
use tracing_subscriber::EnvFilter;

/// Route library logs to the test harness (filter with `RUST_LOG`).
#[ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
