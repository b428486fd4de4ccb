use crate::VdkError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A tool invocation issued by the conversational layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    /// Tool call ID for OpenAI-style providers. None for Gemini.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub args: Value,
}

impl FunctionCall {
    pub fn new(name: impl Into<String>, args: Value) -> Self {
        Self { id: None, name: name.into(), args }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// The answer handed back to the conversational layer for one [`FunctionCall`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub response: ToolResponse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    NotFound,
    InvalidArguments,
    StorageFailure,
    RejectedTransition,
    UnknownTool,
    Failed,
}

/// What a tool produces on success: a sentence for the persona to speak and
/// optional structured data.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToolReply {
    pub message: String,
    pub data: Value,
}

impl ToolReply {
    pub fn new(message: impl Into<String>, data: Value) -> Self {
        Self { message: message.into(), data }
    }

    pub fn text(message: impl Into<String>) -> Self {
        Self { message: message.into(), data: Value::Null }
    }
}

/// Envelope returned across the tool-call boundary.
///
/// `ok` and `code` let a caller tell success from failure without parsing
/// `message`, which stays human readable for the conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResponse {
    pub ok: bool,
    pub code: Option<ErrorCode>,
    pub message: String,
    #[serde(default)]
    pub data: Value,
}

impl ToolResponse {
    pub fn success(reply: ToolReply) -> Self {
        Self { ok: true, code: None, message: reply.message, data: reply.data }
    }

    pub fn failure(code: ErrorCode, message: impl Into<String>) -> Self {
        Self { ok: false, code: Some(code), message: message.into(), data: Value::Null }
    }

    pub fn from_error(err: &VdkError) -> Self {
        Self::failure(err.code(), err.message())
    }
}

impl From<crate::Result<ToolReply>> for ToolResponse {
    fn from(result: crate::Result<ToolReply>) -> Self {
        match result {
            Ok(reply) => Self::success(reply),
            Err(err) => Self::from_error(&err),
        }
    }
}

/// Declaration of a tool as advertised to the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDeclaration {
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_function_call_deserialize_without_args() {
        let call: FunctionCall = serde_json::from_value(json!({"name": "show_cart"})).unwrap();
        assert_eq!(call.name, "show_cart");
        assert!(call.id.is_none());
        assert_eq!(call.args, Value::Null);
    }

    #[test]
    fn test_envelope_serialization() {
        let resp = ToolResponse::failure(ErrorCode::NotFound, "I could not find that item.");
        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(value["ok"], json!(false));
        assert_eq!(value["code"], json!("not_found"));
        assert_eq!(value["message"], json!("I could not find that item."));
    }

    #[test]
    fn test_from_result() {
        let ok: ToolResponse = Ok(ToolReply::text("done")).into();
        assert!(ok.ok);
        assert!(ok.code.is_none());

        let err: ToolResponse = Err(VdkError::Storage("sorry".into())).into();
        assert_eq!(err.code, Some(ErrorCode::StorageFailure));
        assert_eq!(err.message, "sorry");
    }
}
