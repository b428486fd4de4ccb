use crate::Tool;
use serde_json::Value;
use std::sync::Arc;

/// A scripted conversational role: its instructions plus the tools that
/// mutate its per-session state.
///
/// A persona value owns the state of exactly one session. Build a fresh one
/// for every conversation.
pub trait Persona: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;

    /// The system prompt handed to the model at session start.
    fn instructions(&self) -> String;

    fn tools(&self) -> Vec<Arc<dyn Tool>>;

    /// Current session state, for inspection and debugging.
    fn snapshot(&self) -> Value {
        Value::Null
    }
}
