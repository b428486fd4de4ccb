use crate::{Session, SessionConfig};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use vdk_core::{Persona, Result};

#[derive(Clone)]
pub struct CreateRequest {
    pub persona: Arc<dyn Persona>,
    pub session_id: Option<String>,
    pub config: SessionConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub id: String,
    pub persona: String,
    pub created_at: DateTime<Utc>,
    pub event_count: usize,
}

#[async_trait]
pub trait SessionService: Send + Sync {
    async fn create(&self, req: CreateRequest) -> Result<Arc<Session>>;
    async fn get(&self, session_id: &str) -> Result<Arc<Session>>;
    async fn list(&self) -> Result<Vec<SessionSummary>>;
    async fn delete(&self, session_id: &str) -> Result<()>;
}
