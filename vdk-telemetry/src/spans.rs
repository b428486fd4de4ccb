//! Span helpers for common VDK operations

use tracing::Span;

/// Create a span covering one conversation session
///
/// # Example
/// ```
/// use vdk_telemetry::session_span;
/// let span = session_span("grocery", "session-1");
/// let _enter = span.enter();
/// ```
pub fn session_span(persona: &str, session_id: &str) -> Span {
    tracing::info_span!("session", persona.name = persona, session.id = session_id)
}

/// Create a span for tool execution
///
/// # Example
/// ```
/// use vdk_telemetry::tool_execute_span;
/// let span = tool_execute_span("add_item", "call-7");
/// let _enter = span.enter();
/// ```
pub fn tool_execute_span(tool_name: &str, call_id: &str) -> Span {
    tracing::info_span!("tool.execute", tool.name = tool_name, call.id = call_id)
}

/// Create a span for a read-modify-write against a record file
pub fn store_write_span(path: &str) -> Span {
    tracing::debug_span!("store.write", store.path = path)
}
