use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use vdk_core::{ReadonlyContext, Tool, ToolContext, ToolReply, TransitionPolicy, VdkError};
use vdk_tool::FunctionTool;

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

fn ctx() -> Arc<dyn ToolContext> {
    Arc::new(MockToolContext)
}

#[derive(Debug, Deserialize, JsonSchema)]
struct AddParams {
    a: i64,
    b: i64,
}

#[tokio::test]
async fn test_function_tool_basic() {
    let tool = FunctionTool::new("add", "Adds two numbers", |_ctx, args| async move {
        let a = args["a"].as_i64().unwrap_or_default();
        let b = args["b"].as_i64().unwrap_or_default();
        Ok(ToolReply::new(format!("{}", a + b), json!(a + b)))
    });

    assert_eq!(tool.name(), "add");
    assert_eq!(tool.description(), "Adds two numbers");
    assert!(tool.parameters_schema().is_none());

    let reply = tool.execute(ctx(), json!({"a": 5, "b": 3})).await.unwrap();
    assert_eq!(reply.data, json!(8));
    assert_eq!(reply.message, "8");
}

#[tokio::test]
async fn test_typed_tool_parses_arguments() {
    let tool = FunctionTool::typed("add", "Adds two numbers", |_ctx, args: AddParams| async move {
        Ok(ToolReply::new("sum", json!({"sum": args.a + args.b})))
    });

    let schema = tool.parameters_schema().unwrap();
    assert!(schema["properties"]["a"].is_object());
    assert!(schema["properties"]["b"].is_object());

    let reply = tool.execute(ctx(), json!({"a": 2, "b": 40})).await.unwrap();
    assert_eq!(reply.data["sum"], json!(42));
}

#[tokio::test]
async fn test_typed_tool_rejects_bad_arguments() {
    let tool = FunctionTool::typed("add", "Adds two numbers", |_ctx, args: AddParams| async move {
        Ok(ToolReply::new("sum", json!(args.a + args.b)))
    });

    let err = tool.execute(ctx(), json!({"a": "two"})).await.unwrap_err();
    assert!(matches!(err, VdkError::InvalidArguments(_)));
}

#[tokio::test]
async fn test_function_tool_error() {
    let tool = FunctionTool::new("fail", "Always fails", |_ctx, _args| async move {
        Err(VdkError::Tool("intentional error".to_string()))
    });

    let result = tool.execute(ctx(), json!({})).await;
    assert!(result.is_err());
}

#[test]
fn test_declaration_carries_schema() {
    let tool = FunctionTool::typed("add", "Adds two numbers", |_ctx, args: AddParams| async move {
        Ok(ToolReply::text(format!("{}", args.a + args.b)))
    });
    let decl = tool.declaration();
    assert_eq!(decl.name, "add");
    assert!(decl.parameters.is_some());
}
