//! Application state.
//!
//! All shared collaborators (key registry, object store, audit sink) are
//! owned here and injected where needed; nothing in the request path reaches
//! for ambient globals.

use std::sync::Arc;

use imagegate_core::Config;
use imagegate_registry::KeyRegistry;
use imagegate_storage::Storage;

use crate::audit::AuditSink;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub registry: KeyRegistry,
    pub storage: Arc<dyn Storage>,
    pub audit: Arc<dyn AuditSink>,
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
