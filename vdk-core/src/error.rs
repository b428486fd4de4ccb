use crate::types::ErrorCode;

#[derive(Debug, thiserror::Error)]
pub enum VdkError {
    #[error("Tool error: {0}")]
    Tool(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Rejected transition: {0}")]
    Rejected(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl VdkError {
    /// Machine-readable code surfaced in the tool response envelope.
    pub fn code(&self) -> ErrorCode {
        match self {
            VdkError::NotFound(_) => ErrorCode::NotFound,
            VdkError::InvalidArguments(_) => ErrorCode::InvalidArguments,
            VdkError::Storage(_) | VdkError::Io(_) => ErrorCode::StorageFailure,
            VdkError::Rejected(_) => ErrorCode::RejectedTransition,
            VdkError::Tool(_) | VdkError::Session(_) | VdkError::Config(_) | VdkError::Serde(_) => {
                ErrorCode::Failed
            }
        }
    }

    /// The conversational text carried by the error, without the variant prefix.
    ///
    /// Tools put the exact sentence the persona should speak into the variant,
    /// so this is what ends up in the envelope's `message` field.
    pub fn message(&self) -> String {
        match self {
            VdkError::Tool(msg)
            | VdkError::NotFound(msg)
            | VdkError::InvalidArguments(msg)
            | VdkError::Storage(msg)
            | VdkError::Rejected(msg)
            | VdkError::Session(msg)
            | VdkError::Config(msg) => msg.clone(),
            VdkError::Io(e) => e.to_string(),
            VdkError::Serde(e) => e.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, VdkError>;
