#![allow(dead_code)]

use serde_json::Value;
use std::sync::Arc;
use vdk_agents::CatalogItem;
use vdk_core::{FunctionCall, Persona, ToolResponse, TransitionPolicy};
use vdk_session::{Session, SessionConfig};

pub async fn session(persona: impl Persona + 'static) -> Session {
    Session::start(Arc::new(persona), SessionConfig::default()).await.unwrap()
}

pub async fn enforced_session(persona: impl Persona + 'static) -> Session {
    let config = SessionConfig { policy: TransitionPolicy::Enforced, allowed_tools: None };
    Session::start(Arc::new(persona), config).await.unwrap()
}

pub async fn call(session: &Session, name: &str, args: Value) -> ToolResponse {
    session.call(FunctionCall::new(name, args)).await.response
}

pub fn item(id: &str, name: &str, price: f64) -> CatalogItem {
    CatalogItem { id: id.into(), name: name.into(), price, ..Default::default() }
}
