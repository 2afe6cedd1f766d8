pub mod chatbot;

use std::sync::Arc;

use anyhow::Result;

use crate::domain::models::SharedBackend;

pub struct BackendManager {}

impl BackendManager {
    pub fn get() -> Result<SharedBackend> {
        return Ok(Arc::new(chatbot::ChatbotServer::from_config()?));
    }
}
