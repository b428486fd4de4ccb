//! # VDK Telemetry
//!
//! Structured logging for VDK sessions, tools and stores.
//!
//! ## Usage
//!
//! ```rust
//! use vdk_telemetry::{init_telemetry, info, LogFormat};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     init_telemetry("vdk", LogFormat::Pretty)?;
//!     info!("Persona loaded");
//!     Ok(())
//! }
//! ```

pub mod init;
pub mod spans;

// Re-export tracing macros for convenience
pub use tracing::{debug, error, info, instrument, trace, warn, Instrument, Span};

pub use init::{init_telemetry, LogFormat};
pub use spans::*;
