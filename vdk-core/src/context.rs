use serde::{Deserialize, Serialize};

pub trait ReadonlyContext: Send + Sync {
    fn session_id(&self) -> &str;
    fn persona_name(&self) -> &str;
}

pub trait ToolContext: ReadonlyContext {
    fn function_call_id(&self) -> &str;
    fn policy(&self) -> TransitionPolicy;
}

/// How a session treats tool calls that arrive out of the order the persona
/// script asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionPolicy {
    /// Out-of-order calls run anyway and are logged.
    #[default]
    Advisory,
    /// Out-of-order calls are rejected and leave state untouched.
    Enforced,
}

impl TransitionPolicy {
    pub fn is_enforced(self) -> bool {
        matches!(self, TransitionPolicy::Enforced)
    }
}

impl std::str::FromStr for TransitionPolicy {
    type Err = crate::VdkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "advisory" => Ok(TransitionPolicy::Advisory),
            "enforced" => Ok(TransitionPolicy::Enforced),
            other => Err(crate::VdkError::Config(format!("unknown transition policy '{other}'"))),
        }
    }
}
