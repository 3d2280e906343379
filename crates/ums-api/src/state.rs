use std::sync::Arc;

use crate::{ApiConfig, user::model::UserDirectory};

#[derive(Clone, Debug)]
pub struct ApiState {
    /// Read-only seed data served by the listing endpoints
    pub directory: Arc<UserDirectory>,
    pub api_key: Option<String>,
}

impl ApiState {
    pub fn new(config: &ApiConfig) -> Self {
        if config.api_key.is_none() {
            tracing::warn!("No UMS_API_KEY configured, API key check disabled");
        }

        Self {
            directory: Arc::new(UserDirectory::seeded()),
            api_key: config.api_key.clone(),
        }
    }
}
