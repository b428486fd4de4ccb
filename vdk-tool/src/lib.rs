//! # vdk-tool
//!
//! Tool system for VDK personas.
//!
//! ## Overview
//!
//! - [`FunctionTool`] - Create tools from async Rust closures, optionally with typed arguments
//! - [`BasicToolset`] - Group tools and filter them with a predicate
//! - [`ToolRegistry`] - Dispatch a [`FunctionCall`](vdk_core::FunctionCall) by name
//! - [`search`] - Keyword-overlap scoring used by FAQ and catalog lookups
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vdk_tool::FunctionTool;
//! use vdk_core::ToolReply;
//! use schemars::JsonSchema;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, JsonSchema)]
//! struct GreetArgs {
//!     name: String,
//! }
//!
//! let tool = FunctionTool::typed("greet", "Greets a person", |_ctx, args: GreetArgs| async move {
//!     Ok(ToolReply::text(format!("Hello, {}!", args.name)))
//! });
//! ```

mod function_tool;
pub mod registry;
pub mod schema;
pub mod search;
pub mod toolset;

pub use function_tool::FunctionTool;
pub use registry::ToolRegistry;
pub use schema::{parameters_schema_for, parse_args};
pub use search::{ScoredMatch, Searchable, best_match, keyword_score, query_tokens};
pub use toolset::{BasicToolset, deny_predicate, string_predicate};
pub use vdk_core::{Tool, ToolContext, Toolset};
