//! # vdk-session
//!
//! A session is one conversation with one persona: the persona's tools are
//! dispatched through a registry, every call is answered with a response
//! envelope, and each call/response pair is appended to the session's event
//! log.
//!
//! Ordering rules from persona scripts are checked with
//! [`check_transition`], which logs under [`TransitionPolicy::Advisory`]
//! and rejects under [`TransitionPolicy::Enforced`].

pub mod event;
pub mod guard;
pub mod inmemory;
pub mod service;
pub mod session;

pub use event::Event;
pub use guard::check_transition;
pub use inmemory::InMemorySessionService;
pub use service::{CreateRequest, SessionService, SessionSummary};
pub use session::{Session, SessionConfig};
pub use vdk_core::TransitionPolicy;
