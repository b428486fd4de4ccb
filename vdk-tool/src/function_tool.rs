use crate::schema::{parameters_schema_for, parse_args};
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use vdk_core::{Result, Tool, ToolContext, ToolReply};

type AsyncHandler = Box<
    dyn Fn(Arc<dyn ToolContext>, Value) -> Pin<Box<dyn Future<Output = Result<ToolReply>> + Send>>
        + Send
        + Sync,
>;

pub struct FunctionTool {
    name: String,
    description: String,
    handler: AsyncHandler,
    parameters_schema: Option<Value>,
}

impl FunctionTool {
    pub fn new<F, Fut>(name: impl Into<String>, description: impl Into<String>, handler: F) -> Self
    where
        F: Fn(Arc<dyn ToolContext>, Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<ToolReply>> + Send + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            handler: Box::new(move |ctx, args| Box::pin(handler(ctx, args))),
            parameters_schema: None,
        }
    }

    /// Builds a tool whose arguments are deserialized into `A` before the
    /// handler runs. The parameters schema is derived from `A`, and arguments
    /// that do not fit it become an invalid-arguments error.
    pub fn typed<A, F, Fut>(
        name: impl Into<String>,
        description: impl Into<String>,
        handler: F,
    ) -> Self
    where
        A: DeserializeOwned + JsonSchema + Send + 'static,
        F: Fn(Arc<dyn ToolContext>, A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<ToolReply>> + Send + 'static,
    {
        let name = name.into();
        let tool_name = name.clone();
        let handler = Arc::new(handler);
        Self::new(name, description, move |ctx, args| {
            let parsed = parse_args::<A>(&tool_name, args);
            let handler = handler.clone();
            async move {
                match parsed {
                    Ok(args) => handler(ctx, args).await,
                    Err(e) => Err(e),
                }
            }
        })
        .with_parameters_schema::<A>()
    }

    pub fn with_parameters_schema<T: JsonSchema>(mut self) -> Self {
        self.parameters_schema = Some(parameters_schema_for::<T>());
        self
    }
}

#[async_trait]
impl Tool for FunctionTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn parameters_schema(&self) -> Option<Value> {
        self.parameters_schema.clone()
    }

    async fn execute(&self, ctx: Arc<dyn ToolContext>, args: Value) -> Result<ToolReply> {
        (self.handler)(ctx, args).await
    }
}
