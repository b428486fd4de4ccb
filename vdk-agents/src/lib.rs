//! # vdk-agents
//!
//! The demo personas. Each persona owns its per-session state and exposes
//! its behaviour only through tools; files are touched through
//! [`RecordStore`](vdk_store::RecordStore) implementations so tests can swap
//! in memory-backed stores.
//!
//! | persona | tools |
//! |---|---|
//! | `barista` | `save_order` |
//! | `wellness` | `save_wellness_log` |
//! | `sdr` | `search_faq`, `save_lead` |
//! | `fraud` | `load_case`, `update_case_status` |
//! | `grocery` | `search_catalog`, `add_item`, `update_item`, `remove_item`, `add_recipe`, `show_cart`, `save_order` |
//! | `game_master` | none |
//! | `shopping` | `list_products`, `create_order`, `get_last_order` |
//! | `improv` | `start_game`, `get_next_scenario`, `record_round`, `end_game` |

pub mod barista;
pub mod cart;
pub mod factory;
pub mod fraud;
pub mod game_master;
pub mod grocery;
pub mod improv;
pub mod kind;
pub mod models;
pub mod sdr;
pub mod settings;
pub mod shopping;
pub mod wellness;

pub use factory::PersonaFactory;
pub use kind::PersonaKind;
pub use models::{CatalogItem, FaqEntry, RecipeBook, ReferenceData};
pub use settings::{Brand, FileNames, PersonaSettings};

use serde_json::Value;
use std::collections::HashMap;
use vdk_core::{Result, render_instructions};

/// Renders a script that has a single placeholder.
pub(crate) fn render_with(template: &str, key: &str, value: &str) -> Result<String> {
    let mut vars = HashMap::new();
    vars.insert(key.to_string(), Value::String(value.to_string()));
    render_instructions(template, &vars)
}
