use crate::Event;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;
use vdk_core::{
    FunctionCall, FunctionResponse, Persona, ReadonlyContext, Result, ToolContext,
    ToolDeclaration, Toolset, TransitionPolicy,
};
use vdk_telemetry::{Instrument, session_span};
use vdk_tool::{BasicToolset, ToolRegistry, string_predicate};

#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    pub policy: TransitionPolicy,
    /// Restricts the persona's tools to these names. `None` exposes all.
    pub allowed_tools: Option<Vec<String>>,
}

/// Identity of a session, handed to toolsets before any call exists.
struct SessionInfo {
    session_id: String,
    persona_name: String,
}

impl ReadonlyContext for SessionInfo {
    fn session_id(&self) -> &str {
        &self.session_id
    }

    fn persona_name(&self) -> &str {
        &self.persona_name
    }
}

/// Context for a single tool call.
struct CallContext {
    session_id: String,
    persona_name: String,
    function_call_id: String,
    policy: TransitionPolicy,
}

impl ReadonlyContext for CallContext {
    fn session_id(&self) -> &str {
        &self.session_id
    }

    fn persona_name(&self) -> &str {
        &self.persona_name
    }
}

impl ToolContext for CallContext {
    fn function_call_id(&self) -> &str {
        &self.function_call_id
    }

    fn policy(&self) -> TransitionPolicy {
        self.policy
    }
}

/// One conversation with one persona.
///
/// Calls are processed strictly one at a time: the event log lock is held
/// for the whole dispatch, so a second call waits until the first has been
/// answered and recorded.
pub struct Session {
    id: String,
    persona: Arc<dyn Persona>,
    registry: ToolRegistry,
    policy: TransitionPolicy,
    created_at: DateTime<Utc>,
    events: Mutex<Vec<Event>>,
}

impl Session {
    pub async fn start(persona: Arc<dyn Persona>, config: SessionConfig) -> Result<Self> {
        Self::start_with_id(Uuid::new_v4().to_string(), persona, config).await
    }

    pub async fn start_with_id(
        id: impl Into<String>,
        persona: Arc<dyn Persona>,
        config: SessionConfig,
    ) -> Result<Self> {
        let id = id.into();
        let mut toolset = BasicToolset::for_persona(persona.as_ref());
        if let Some(allowed) = config.allowed_tools {
            toolset = toolset.with_predicate(string_predicate(allowed));
        }

        let info = Arc::new(SessionInfo {
            session_id: id.clone(),
            persona_name: persona.name().to_string(),
        });
        let registry = ToolRegistry::new(toolset.tools(info).await?);

        debug!(
            session.id = %id,
            persona.name = persona.name(),
            tools = ?registry.names(),
            policy = ?config.policy,
            "session started"
        );

        Ok(Self {
            id,
            persona,
            registry,
            policy: config.policy,
            created_at: Utc::now(),
            events: Mutex::new(Vec::new()),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn persona(&self) -> &Arc<dyn Persona> {
        &self.persona
    }

    pub fn policy(&self) -> TransitionPolicy {
        self.policy
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn instructions(&self) -> String {
        self.persona.instructions()
    }

    pub fn declarations(&self) -> Vec<ToolDeclaration> {
        self.registry.declarations()
    }

    pub fn tool_names(&self) -> Vec<&str> {
        self.registry.names()
    }

    /// The persona's current in-memory state.
    pub fn state(&self) -> Value {
        self.persona.snapshot()
    }

    pub async fn events(&self) -> Vec<Event> {
        self.events.lock().await.clone()
    }

    pub async fn event_count(&self) -> usize {
        self.events.lock().await.len()
    }

    /// Runs one tool call to completion and records it.
    pub async fn call(&self, call: FunctionCall) -> FunctionResponse {
        let mut events = self.events.lock().await;

        let call_id = call.id.clone().unwrap_or_else(|| Uuid::new_v4().to_string());
        let ctx = Arc::new(CallContext {
            session_id: self.id.clone(),
            persona_name: self.persona.name().to_string(),
            function_call_id: call_id,
            policy: self.policy,
        });

        let span = session_span(self.persona.name(), &self.id);
        let response = self.registry.dispatch(ctx, &call).instrument(span).await;

        events.push(Event::new(call, response.clone()));
        response
    }
}
