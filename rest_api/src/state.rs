// rest_api/src/state.rs

use std::sync::Arc;

use security::AuthService;
use store::Datastore;

/// Shared state for the axum application. Both handles are built in
/// `main` (or by the test harness) and injected here; nothing in the
/// handlers reaches for globals.
#[derive(Clone)]
pub struct AppState {
    pub store: Datastore,
    pub auth: Arc<AuthService>,
}
