use std::collections::HashSet;
use std::sync::Arc;
use tracing::{error, info, warn};
use vdk_core::{
    ErrorCode, FunctionCall, FunctionResponse, Tool, ToolContext, ToolDeclaration, ToolResponse,
};
use vdk_telemetry::{Instrument, tool_execute_span};

/// Name-indexed set of tools with a single dispatch entry point.
///
/// Dispatch never fails: every outcome, including an unknown tool name, is
/// folded into the [`ToolResponse`] envelope of the returned
/// [`FunctionResponse`].
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// When two tools share a name the first one wins.
    pub fn new(tools: Vec<Arc<dyn Tool>>) -> Self {
        let mut seen = HashSet::new();
        let mut unique = Vec::with_capacity(tools.len());
        for tool in tools {
            if seen.insert(tool.name().to_string()) {
                unique.push(tool);
            } else {
                warn!(tool.name = tool.name(), "duplicate tool name ignored");
            }
        }
        Self { tools: unique }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.iter().find(|t| t.name() == name).cloned()
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    pub fn declarations(&self) -> Vec<ToolDeclaration> {
        self.tools.iter().map(|t| t.declaration()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub async fn dispatch(
        &self,
        ctx: Arc<dyn ToolContext>,
        call: &FunctionCall,
    ) -> FunctionResponse {
        let response = match self.get(&call.name) {
            Some(tool) => {
                let span = tool_execute_span(&call.name, ctx.function_call_id());
                let result = tool.execute(ctx.clone(), call.args.clone()).instrument(span).await;
                let response = ToolResponse::from(result);
                log_outcome(&call.name, &response);
                response
            }
            None => {
                warn!(tool.name = %call.name, session.id = ctx.session_id(), "unknown tool");
                ToolResponse::failure(
                    ErrorCode::UnknownTool,
                    format!("Tool {} not found", call.name),
                )
            }
        };

        FunctionResponse { id: call.id.clone(), name: call.name.clone(), response }
    }
}

fn log_outcome(tool_name: &str, response: &ToolResponse) {
    match response.code {
        None => info!(tool.name = tool_name, "tool call succeeded"),
        Some(ErrorCode::StorageFailure) | Some(ErrorCode::Failed) => {
            error!(
                tool.name = tool_name,
                code = ?response.code,
                message = %response.message,
                "tool call failed"
            )
        }
        Some(code) => {
            warn!(tool.name = tool_name, ?code, message = %response.message, "tool call declined")
        }
    }
}
