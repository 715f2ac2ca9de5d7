use crate::storage::FileStorage;
use crate::store::Store;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<Store<FileStorage>>>,
}

impl AppState {
    pub fn new(store: Store<FileStorage>) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }
}
