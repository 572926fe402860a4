use activities_core::Directory;
use std::sync::Arc;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<Directory>,
}

impl AppState {
    pub fn new(directory: Arc<Directory>) -> Self {
        Self { directory }
    }
}
