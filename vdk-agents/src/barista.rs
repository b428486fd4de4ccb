//! Coffee-shop barista that collects one drink order and saves it.

use crate::render_with;
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::error;
use vdk_core::{Persona, Result, Tool, ToolContext, ToolReply, VdkError};
use vdk_store::RecordStore;
use vdk_tool::FunctionTool;

const INSTRUCTIONS: &str = r#"You are a friendly barista at a modern specialty coffee shop called {cafe}.
The customer is talking to you by voice, so keep every reply short and conversational.
Your job is to take one coffee order and fill in this order:
{
  "drinkType": "string",
  "size": "string",
  "milk": "string",
  "extras": ["string"],
  "name": "string"
}
How to work:
1. Ask follow-up questions until every field is known.
   - drinkType: latte, cappuccino, americano, mocha, cold brew and so on.
   - size: small, medium or large.
   - milk: whole, skim, oat, almond or soy.
   - extras: whipped cream, caramel, an extra shot, vanilla. Use an empty list when there are none.
   - name: the name to write on the cup.
2. Briefly confirm each choice as you go.
3. When the order is complete, call `save_order` exactly once with the final values.
4. After the tool answers, read the full order back and say it has been saved.
5. Never call `save_order` while a field is still unknown.
6. No emojis, markdown, asterisks or other formatting."#;

const SAVED: &str = "The order has been saved to the system.";
const SAVE_FAILED: &str = "I had an issue saving the order. Please tell the human operator that there was an error writing the order file.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoffeeOrder {
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "drinkType")]
    pub drink_type: String,
    pub size: String,
    pub milk: String,
    pub extras: Vec<String>,
    pub name: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SaveOrderArgs {
    /// Drink, e.g. latte, cappuccino, americano
    #[serde(rename = "drinkType")]
    pub drink_type: String,
    /// small, medium or large
    pub size: String,
    /// Milk choice, e.g. whole, oat, almond
    pub milk: String,
    /// Extras such as caramel or an extra shot; empty when none
    #[serde(default)]
    pub extras: Vec<String>,
    /// Name to write on the cup
    pub name: String,
}

struct BaristaInner {
    orders: Arc<dyn RecordStore<CoffeeOrder>>,
}

impl BaristaInner {
    async fn save_order(
        &self,
        _ctx: Arc<dyn ToolContext>,
        args: SaveOrderArgs,
    ) -> Result<ToolReply> {
        let order = CoffeeOrder {
            timestamp: Utc::now(),
            drink_type: args.drink_type,
            size: args.size,
            milk: args.milk,
            extras: args.extras,
            name: args.name,
        };

        self.orders.append(order.clone()).await.map_err(|e| {
            error!(store = %self.orders.location(), error = %e, "failed to save coffee order");
            VdkError::Storage(SAVE_FAILED.to_string())
        })?;

        Ok(ToolReply::new(SAVED, json!(order)))
    }
}

pub struct Barista {
    instructions: String,
    inner: Arc<BaristaInner>,
}

impl Barista {
    pub fn new(cafe: &str, orders: Arc<dyn RecordStore<CoffeeOrder>>) -> Result<Self> {
        Ok(Self {
            instructions: render_with(INSTRUCTIONS, "cafe", cafe)?,
            inner: Arc::new(BaristaInner { orders }),
        })
    }
}

impl Persona for Barista {
    fn name(&self) -> &str {
        "barista"
    }

    fn description(&self) -> &str {
        "Takes a single coffee order and saves it"
    }

    fn instructions(&self) -> String {
        self.instructions.clone()
    }

    fn tools(&self) -> Vec<Arc<dyn Tool>> {
        let inner = self.inner.clone();
        let save_order = FunctionTool::typed(
            "save_order",
            "Save the finished coffee order. Call only once every field is known.",
            move |ctx, args: SaveOrderArgs| {
                let inner = inner.clone();
                async move { inner.save_order(ctx, args).await }
            },
        );
        vec![Arc::new(save_order)]
    }
}
