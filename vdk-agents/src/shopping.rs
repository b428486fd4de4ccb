//! Catalog-browsing shopping assistant that places single-product orders.

use crate::models::{CatalogItem, find_item};
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};
use vdk_core::{Persona, Result, Tool, ToolContext, ToolReply, VdkError};
use vdk_store::RecordStore;
use vdk_tool::FunctionTool;

const INSTRUCTIONS: &str = "You are a voice shopping assistant for an online store.
Rules:
- Never invent products. Always call `list_products` before recommending anything.
- Work out what the user wants from what they say, and narrow the list with category, price, color or keyword filters.
- When the user decides to buy, call `create_order` with the product id and quantity.
- When the user asks what they bought, call `get_last_order`.
- Be conversational and concise. No emojis.";

const INVALID_PRODUCT: &str = "Invalid product_id";
const NO_ORDERS: &str = "No orders yet.";
const NO_PRODUCTS: &str = "No products match those filters.";
const SAVE_FAILED: &str = "I could not place that order right now.";
const ZERO_QUANTITY: &str = "Quantity must be at least 1.";

/// Currency assumed for catalog items that do not state one.
pub const DEFAULT_CURRENCY: &str = "INR";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingOrderItem {
    pub product_id: String,
    pub name: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub currency: String,
    pub subtotal: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingOrder {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub items: Vec<ShoppingOrderItem>,
    pub total: f64,
    pub currency: String,
}

#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct ProductFilter {
    /// Exact category, case-insensitive
    pub category: Option<String>,
    /// Highest acceptable price
    pub max_price: Option<f64>,
    /// Exact color, case-insensitive
    pub color: Option<String>,
    /// Word to look for in the name or description
    pub keyword: Option<String>,
}

impl ProductFilter {
    pub fn matches(&self, item: &CatalogItem) -> bool {
        fn same(field: &Option<String>, wanted: &str) -> bool {
            field.as_deref().is_some_and(|v| v.to_lowercase() == wanted.to_lowercase())
        }

        if let Some(category) = &self.category {
            if !same(&item.category, category) {
                return false;
            }
        }
        if let Some(max_price) = self.max_price {
            if item.price > max_price {
                return false;
            }
        }
        if let Some(color) = &self.color {
            if !same(&item.color, color) {
                return false;
            }
        }
        if let Some(keyword) = &self.keyword {
            let keyword = keyword.to_lowercase();
            let in_name = item.name.to_lowercase().contains(&keyword);
            let in_description =
                item.description.as_deref().is_some_and(|d| d.to_lowercase().contains(&keyword));
            if !in_name && !in_description {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateOrderArgs {
    /// Catalog product id
    pub product_id: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

struct ShoppingInner {
    catalog: Arc<Vec<CatalogItem>>,
    orders: Arc<dyn RecordStore<ShoppingOrder>>,
}

impl ShoppingInner {
    fn list_products(&self, filter: ProductFilter) -> Result<ToolReply> {
        let products: Vec<&CatalogItem> =
            self.catalog.iter().filter(|item| filter.matches(item)).collect();
        let message = match products.len() {
            0 => NO_PRODUCTS.to_string(),
            1 => "I found 1 product.".to_string(),
            n => format!("I found {} products.", n),
        };
        Ok(ToolReply::new(message, json!(products)))
    }

    async fn create_order(
        &self,
        _ctx: Arc<dyn ToolContext>,
        args: CreateOrderArgs,
    ) -> Result<ToolReply> {
        let product = find_item(&self.catalog, &args.product_id)
            .ok_or_else(|| VdkError::NotFound(INVALID_PRODUCT.to_string()))?;
        if args.quantity == 0 {
            return Err(VdkError::InvalidArguments(ZERO_QUANTITY.to_string()));
        }

        let currency = product.currency.clone().unwrap_or_else(|| DEFAULT_CURRENCY.to_string());
        let subtotal = product.price * f64::from(args.quantity);
        let line = ShoppingOrderItem {
            product_id: product.id.clone(),
            name: product.name.clone(),
            quantity: args.quantity,
            unit_price: product.price,
            currency: currency.clone(),
            subtotal,
        };

        let order = self
            .orders
            .append_with(Box::new(move |existing: &[ShoppingOrder]| {
                Ok(ShoppingOrder {
                    id: format!("ORD-{}", existing.len() + 1),
                    created_at: Utc::now(),
                    items: vec![line],
                    total: subtotal,
                    currency,
                })
            }))
            .await
            .map_err(|e| {
                error!(
                    store = %self.orders.location(),
                    error = %e,
                    "failed to save shopping order"
                );
                VdkError::Storage(SAVE_FAILED.to_string())
            })?;

        info!(order.id = %order.id, total = order.total, "shopping order placed");
        Ok(ToolReply::new(
            format!("Order {} is placed. Total is {} {}.", order.id, order.total, order.currency),
            json!(order),
        ))
    }

    async fn get_last_order(&self) -> Result<ToolReply> {
        match self.orders.last().await {
            Some(order) => Ok(ToolReply::new(
                format!(
                    "Your last order was {} for a total of {} {}.",
                    order.id, order.total, order.currency
                ),
                json!(order),
            )),
            None => Err(VdkError::NotFound(NO_ORDERS.to_string())),
        }
    }
}

pub struct ShoppingAssistant {
    inner: Arc<ShoppingInner>,
}

impl ShoppingAssistant {
    pub fn new(
        catalog: Arc<Vec<CatalogItem>>,
        orders: Arc<dyn RecordStore<ShoppingOrder>>,
    ) -> Self {
        Self { inner: Arc::new(ShoppingInner { catalog, orders }) }
    }
}

impl Persona for ShoppingAssistant {
    fn name(&self) -> &str {
        "shopping"
    }

    fn description(&self) -> &str {
        "Browses the product catalog with filters and places orders"
    }

    fn instructions(&self) -> String {
        INSTRUCTIONS.to_string()
    }

    fn tools(&self) -> Vec<Arc<dyn Tool>> {
        let inner = self.inner.clone();
        let list_products = FunctionTool::typed(
            "list_products",
            "List catalog products, optionally filtered by category, max_price, color or keyword.",
            move |_ctx, filter: ProductFilter| {
                let inner = inner.clone();
                async move { inner.list_products(filter) }
            },
        );

        let inner = self.inner.clone();
        let create_order = FunctionTool::typed(
            "create_order",
            "Place an order for a quantity of one product.",
            move |ctx, args: CreateOrderArgs| {
                let inner = inner.clone();
                async move { inner.create_order(ctx, args).await }
            },
        );

        let inner = self.inner.clone();
        let get_last_order =
            FunctionTool::new("get_last_order", "Fetch the most recent order.", move |_ctx, _args| {
                let inner = inner.clone();
                async move { inner.get_last_order().await }
            });

        vec![Arc::new(list_products), Arc::new(create_order), Arc::new(get_last_order)]
    }
}
