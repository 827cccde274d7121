//! Shared state injected into every HTTP handler.

use std::sync::Arc;

use crate::application::services::DynShortenerService;
use crate::config::Config;
use crate::domain::user_directory::UserDirectory;

#[derive(Clone)]
pub struct AppState {
    pub shortener: Arc<DynShortenerService>,
    pub users: Arc<dyn UserDirectory>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(
        shortener: Arc<DynShortenerService>,
        users: Arc<dyn UserDirectory>,
        config: Arc<Config>,
    ) -> Self {
        Self {
            shortener,
            users,
            config,
        }
    }
}
