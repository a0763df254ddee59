use std::sync::Arc;

use folio_store::DocumentStore;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct ApiState {
    pub store: Arc<DocumentStore>,
}

impl ApiState {
    pub fn new(store: DocumentStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}
