//! # vdk-core
//!
//! Core traits and types for VDK personas, tools, and the tool-call boundary.
//!
//! ## Overview
//!
//! - [`Persona`] - A scripted role: instructions plus the tools that drive its session state
//! - [`Tool`] / [`Toolset`] - Named operations the model may call
//! - [`ToolContext`] - Per-call context (session, call id, [`TransitionPolicy`])
//! - [`FunctionCall`] / [`FunctionResponse`] / [`ToolResponse`] - The call boundary
//! - [`VdkError`] / [`Result`] - Unified error handling
//!
//! ## Tool
//!
//! ```rust,ignore
//! #[async_trait]
//! pub trait Tool: Send + Sync {
//!     fn name(&self) -> &str;
//!     fn description(&self) -> &str;
//!     async fn execute(&self, ctx: Arc<dyn ToolContext>, args: Value) -> Result<ToolReply>;
//! }
//! ```
//!
//! A tool returns a [`ToolReply`] on success. Failures are [`VdkError`]s whose
//! payload is the sentence the persona should say; the dispatcher turns either
//! into a [`ToolResponse`] envelope carrying `ok`, `code`, `message` and `data`.

pub mod context;
pub mod error;
pub mod instruction_template;
pub mod persona;
pub mod tool;
pub mod types;

pub use context::{ReadonlyContext, ToolContext, TransitionPolicy};
pub use error::{Result, VdkError};
pub use instruction_template::render_instructions;
pub use persona::Persona;
pub use tool::{Tool, ToolPredicate, Toolset};
pub use types::{
    ErrorCode, FunctionCall, FunctionResponse, ToolDeclaration, ToolReply, ToolResponse,
};
