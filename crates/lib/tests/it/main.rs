/*! Integration tests for Timecapsule.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * The module structure mirrors the main library structure:
 * - gate: Tests for reveal target computation and the locked/open classification
 * - message_store: Tests for the MessageStore trait and its implementations
 * - schedule: Tests for rolling and pinned reveal schedules
 * - controller: Tests for view rendering and submission handling
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("timecapsule=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod gate;
mod helpers;
mod message_store;
mod schedule;
