/*! Integration tests for Identra.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * The module structure mirrors the main library structure:
 * - user_lifecycle_tests: creating, fetching, and deleting users
 * - key_tests: key creation and lookup
 * - oprofile_tests: open profile creation and lookup
 * - merge_tests: the user merge algorithm
 * - partial_failure_tests: partial-completion semantics under injected store faults
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("identra=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod helpers;
mod key_tests;
mod oprofile_tests;
