use crate::{CreateRequest, Session, SessionService, SessionSummary};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::info;
use uuid::Uuid;
use vdk_core::{Result, VdkError};

/// Keeps live sessions for the lifetime of the process. Session state is
/// discarded when the session is deleted.
pub struct InMemorySessionService {
    sessions: Arc<RwLock<HashMap<String, Arc<Session>>>>,
}

impl InMemorySessionService {
    pub fn new() -> Self {
        Self { sessions: Arc::new(RwLock::new(HashMap::new())) }
    }
}

impl Default for InMemorySessionService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionService for InMemorySessionService {
    async fn create(&self, req: CreateRequest) -> Result<Arc<Session>> {
        let session_id = req.session_id.unwrap_or_else(|| Uuid::new_v4().to_string());

        if self.sessions.read().unwrap_or_else(PoisonError::into_inner).contains_key(&session_id) {
            return Err(VdkError::Session(format!("session {} already exists", session_id)));
        }

        let session =
            Arc::new(Session::start_with_id(session_id.clone(), req.persona, req.config).await?);

        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        if sessions.contains_key(&session_id) {
            return Err(VdkError::Session(format!("session {} already exists", session_id)));
        }
        sessions.insert(session_id.clone(), session.clone());
        drop(sessions);

        info!(session.id = %session_id, persona.name = session.persona().name(), "session created");
        Ok(session)
    }

    async fn get(&self, session_id: &str) -> Result<Arc<Session>> {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(session_id)
            .cloned()
            .ok_or_else(|| VdkError::Session("session not found".into()))
    }

    async fn list(&self) -> Result<Vec<SessionSummary>> {
        let sessions: Vec<Arc<Session>> =
            self.sessions.read().unwrap_or_else(PoisonError::into_inner).values().cloned().collect();

        let mut result = Vec::with_capacity(sessions.len());
        for session in sessions {
            result.push(SessionSummary {
                id: session.id().to_string(),
                persona: session.persona().name().to_string(),
                created_at: session.created_at(),
                event_count: session.event_count().await,
            });
        }
        result.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(result)
    }

    async fn delete(&self, session_id: &str) -> Result<()> {
        let removed =
            self.sessions.write().unwrap_or_else(PoisonError::into_inner).remove(session_id);
        if removed.is_some() {
            info!(session.id = %session_id, "session deleted");
        }
        Ok(())
    }
}
