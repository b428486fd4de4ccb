use serde_json::json;
use std::sync::Arc;
use vdk_core::{
    ErrorCode, FunctionCall, ReadonlyContext, Tool, ToolContext, ToolReply, TransitionPolicy,
    VdkError,
};
use vdk_tool::{FunctionTool, ToolRegistry};

struct MockToolContext;

impl ReadonlyContext for MockToolContext {
    fn session_id(&self) -> &str {
        "session-1"
    }
    fn persona_name(&self) -> &str {
        "test-persona"
    }
}

impl ToolContext for MockToolContext {
    fn function_call_id(&self) -> &str {
        "call-1"
    }
    fn policy(&self) -> TransitionPolicy {
        TransitionPolicy::Advisory
    }
}

fn registry() -> ToolRegistry {
    let echo: Arc<dyn Tool> =
        Arc::new(FunctionTool::new("echo", "Echo args", |_ctx, args| async move {
            Ok(ToolReply::new("echoed", args))
        }));
    let missing: Arc<dyn Tool> =
        Arc::new(FunctionTool::new("lookup", "Always misses", |_ctx, _args| async move {
            Err(VdkError::NotFound("I could not find that item.".to_string()))
        }));
    let broken: Arc<dyn Tool> =
        Arc::new(FunctionTool::new("save", "Always fails to write", |_ctx, _args| async move {
            Err(VdkError::Storage("I had an issue saving the order.".to_string()))
        }));
    ToolRegistry::new(vec![echo, missing, broken])
}

#[tokio::test]
async fn test_dispatch_success() {
    let call = FunctionCall::new("echo", json!({"x": 1})).with_id("abc");
    let resp = registry().dispatch(Arc::new(MockToolContext), &call).await;

    assert_eq!(resp.id.as_deref(), Some("abc"));
    assert_eq!(resp.name, "echo");
    assert!(resp.response.ok);
    assert_eq!(resp.response.data, json!({"x": 1}));
}

#[tokio::test]
async fn test_dispatch_not_found_keeps_message() {
    let call = FunctionCall::new("lookup", json!({}));
    let resp = registry().dispatch(Arc::new(MockToolContext), &call).await;

    assert!(!resp.response.ok);
    assert_eq!(resp.response.code, Some(ErrorCode::NotFound));
    assert_eq!(resp.response.message, "I could not find that item.");
}

#[tokio::test]
async fn test_dispatch_storage_failure() {
    let call = FunctionCall::new("save", json!({}));
    let resp = registry().dispatch(Arc::new(MockToolContext), &call).await;

    assert_eq!(resp.response.code, Some(ErrorCode::StorageFailure));
    assert_eq!(resp.response.message, "I had an issue saving the order.");
}

#[tokio::test]
async fn test_dispatch_unknown_tool() {
    let call = FunctionCall::new("teleport", json!({}));
    let resp = registry().dispatch(Arc::new(MockToolContext), &call).await;

    assert_eq!(resp.response.code, Some(ErrorCode::UnknownTool));
    assert!(resp.response.message.contains("teleport"));
}

#[test]
fn test_duplicate_names_first_wins() {
    let first: Arc<dyn Tool> = Arc::new(FunctionTool::new("dup", "first", |_ctx, _args| async move {
        Ok(ToolReply::text("first"))
    }));
    let second: Arc<dyn Tool> =
        Arc::new(FunctionTool::new("dup", "second", |_ctx, _args| async move {
            Ok(ToolReply::text("second"))
        }));
    let registry = ToolRegistry::new(vec![first, second]);

    assert_eq!(registry.len(), 1);
    assert_eq!(registry.get("dup").unwrap().description(), "first");
}

#[test]
fn test_declarations_in_order() {
    let names: Vec<String> = registry().declarations().into_iter().map(|d| d.name).collect();
    assert_eq!(names, vec!["echo", "lookup", "save"]);
}
