use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vdk_core::{FunctionCall, FunctionResponse};

/// One completed tool call and the response that went back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub call: FunctionCall,
    pub response: FunctionResponse,
}

impl Event {
    pub fn new(call: FunctionCall, response: FunctionResponse) -> Self {
        Self { id: Uuid::new_v4().to_string(), timestamp: Utc::now(), call, response }
    }

    pub fn is_success(&self) -> bool {
        self.response.response.ok
    }
}
