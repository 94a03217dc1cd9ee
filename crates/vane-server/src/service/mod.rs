//! Server operations
//!
//! `Server` validates requests, forwards them to the store, and shapes the
//! responses. It holds no state besides the store handle.

mod admin;
mod flag;
mod namespace;

use std::sync::Arc;

use vane_persistence::Store;

#[derive(Clone)]
pub struct Server {
    store: Arc<dyn Store>,
}

impl Server {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn Store> {
        &self.store
    }
}
