//! # vdk-cli
//!
//! Command-line harness for VDK personas.
//!
//! - `vdk personas` lists the personas
//! - `vdk tools <persona>` prints tool declarations as JSON
//! - `vdk instructions <persona>` prints the persona script
//! - `vdk console <persona>` opens a REPL where each line is `tool_name {json}`
//! - `vdk replay <persona> <calls.jsonl>` runs recorded calls and prints responses as JSONL
//!
//! Configuration comes from `vdk.toml`; see [`config::VdkConfig`].

pub mod cli;
pub mod commands;
pub mod config;
pub mod console;
pub mod replay;

pub use config::VdkConfig;
pub use console::{ConsoleInput, parse_line};
pub use replay::replay;
