//! Mock server infrastructure for testing
//!
//! A single mockito server shared by every test in a binary. Tests keep
//! their mocks apart by using unique release versions in their paths.

use lazy_static::lazy_static;
use mockito::{Server, ServerGuard};
use std::sync::Mutex;

lazy_static! {
    /// Global shared mockito server, created on first access
    pub static ref SHARED_MOCK_SERVER: Mutex<ServerGuard> = Mutex::new(Server::new());
}

/// Get reference to shared mock server
///
/// Hold the guard only while creating mocks, not for the whole test, so
/// tests can run in parallel. Mocks are removed when the `Mock` drops.
///
/// ```no_run
/// use twlab_testkit::get_shared_mock_server;
///
/// let (mock, base_url) = {
///     let mut server = get_shared_mock_server();
///     let mock = server
///         .mock("GET", "/tailwindlabs/tailwindcss/releases/download/v9.9.9/tailwindcss-linux-x64")
///         .with_status(200)
///         .create();
///     (mock, server.url())
/// };
/// ```
pub fn get_shared_mock_server() -> std::sync::MutexGuard<'static, ServerGuard> {
    // A panic in another test leaves the server usable
    SHARED_MOCK_SERVER
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
