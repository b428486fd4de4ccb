use tracing::warn;
use vdk_core::{Result, ToolContext, VdkError};

/// Checks a persona-script ordering rule before a tool mutates state.
///
/// When `allowed` is false the call is out of order. Under the advisory
/// policy this only logs; under the enforced policy it returns
/// [`VdkError::Rejected`] carrying `reason` as the spoken message.
pub fn check_transition(
    ctx: &dyn ToolContext,
    tool: &str,
    allowed: bool,
    reason: &str,
) -> Result<()> {
    if allowed {
        return Ok(());
    }

    if ctx.policy().is_enforced() {
        warn!(
            session.id = ctx.session_id(),
            persona.name = ctx.persona_name(),
            tool.name = tool,
            reason,
            "rejected out-of-order tool call"
        );
        Err(VdkError::Rejected(reason.to_string()))
    } else {
        warn!(
            session.id = ctx.session_id(),
            persona.name = ctx.persona_name(),
            tool.name = tool,
            reason,
            "out-of-order tool call"
        );
        Ok(())
    }
}
