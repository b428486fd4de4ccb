//! Grocery ordering assistant with a per-session cart.

use crate::cart::Cart;
use crate::models::{CatalogItem, RecipeBook, find_item};
use crate::render_with;
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, error, warn};
use vdk_core::{Persona, Result, Tool, ToolContext, ToolReply, VdkError};
use vdk_store::RecordStore;
use vdk_tool::{FunctionTool, best_match};

const INSTRUCTIONS: &str = "You are a friendly grocery and food ordering assistant for a fictional service called {grocer}.
You help users order groceries, snacks and simple prepared meals.

You can:
- search the catalog with `search_catalog` and add items by their id
- change quantities and remove items
- read the cart back
- add all the ingredients for a dish, for example 'ingredients for pasta for two', with `add_recipe`

Cart rules:
- Confirm after every change to the cart.
- Only use item ids returned by `search_catalog`.
- When the user is done ('place order', 'that's all'), ask for their name and call `save_order` exactly once.
- No emojis or markdown.";

const ITEM_NOT_FOUND: &str = "I could not find that item.";
const NOT_IN_CART: &str = "That item is not in your cart.";
const REMOVED: &str = "I removed that item from your cart.";
const NO_RECIPE: &str = "I do not have a recipe for that.";
const EMPTY_CART: &str = "Your cart is empty.";
const NOTHING_TO_SAVE: &str = "Your cart is empty. Nothing to save.";
const NO_SEARCH_RESULTS: &str = "I could not find anything like that in the catalog.";
const SAVE_FAILED: &str = "I had an issue placing your order. Please try again in a moment.";
const ZERO_QUANTITY: &str = "Quantity must be at least 1.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub item_id: String,
    pub name: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub subtotal: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroceryOrder {
    pub customer_name: String,
    pub timestamp: DateTime<Utc>,
    pub items: Vec<OrderItem>,
    pub total: f64,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SearchCatalogArgs {
    /// Words describing what the user wants, e.g. 'brown bread'
    pub query: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ItemQuantityArgs {
    /// Catalog item id
    pub item_id: String,
    pub quantity: u32,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct RemoveItemArgs {
    /// Catalog item id
    pub item_id: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct AddRecipeArgs {
    /// Dish name, e.g. 'pasta' or 'sandwich'
    pub recipe_name: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SaveOrderArgs {
    /// Name the order is placed under
    pub user_name: String,
}

struct GroceryInner {
    catalog: Arc<Vec<CatalogItem>>,
    recipes: Arc<RecipeBook>,
    orders: Arc<dyn RecordStore<GroceryOrder>>,
    cart: Mutex<Cart>,
}

impl GroceryInner {
    fn cart(&self) -> MutexGuard<'_, Cart> {
        self.cart.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn item(&self, item_id: &str) -> Result<&CatalogItem> {
        find_item(&self.catalog, item_id)
            .ok_or_else(|| VdkError::NotFound(ITEM_NOT_FOUND.to_string()))
    }

    /// Cart lines priced against the catalog. Lines whose id has left the
    /// catalog are skipped.
    fn priced_lines(&self, cart: &Cart) -> (Vec<OrderItem>, f64) {
        let mut items = Vec::with_capacity(cart.len());
        let mut total = 0.0;
        for (item_id, quantity) in cart.iter() {
            let Some(item) = find_item(&self.catalog, item_id) else {
                warn!(item.id = %item_id, "cart item missing from catalog");
                continue;
            };
            let subtotal = item.price * f64::from(quantity);
            total += subtotal;
            items.push(OrderItem {
                item_id: item.id.clone(),
                name: item.name.clone(),
                quantity,
                unit_price: item.price,
                subtotal,
            });
        }
        (items, total)
    }

    fn search_catalog(&self, args: SearchCatalogArgs) -> Result<ToolReply> {
        let Some(found) = best_match(&self.catalog, &args.query) else {
            debug!(query = %args.query, "no catalog item matched");
            return Err(VdkError::NotFound(NO_SEARCH_RESULTS.to_string()));
        };

        let item = found.item;
        Ok(ToolReply::new(
            format!("I found {} (id {}) at {}.", item.name, item.id, item.price),
            json!(item),
        ))
    }

    fn add_item(&self, args: ItemQuantityArgs) -> Result<ToolReply> {
        let item = self.item(&args.item_id)?;
        if args.quantity == 0 {
            return Err(VdkError::InvalidArguments(ZERO_QUANTITY.to_string()));
        }
        let total = self.cart().add(&item.id, args.quantity);
        Ok(ToolReply::new(
            format!("Added {} of {} to your cart.", args.quantity, item.name),
            json!({ "item_id": item.id, "quantity": total }),
        ))
    }

    fn update_item(&self, args: ItemQuantityArgs) -> Result<ToolReply> {
        let item = self.item(&args.item_id)?;
        let mut cart = self.cart();
        if args.quantity == 0 {
            if !cart.remove(&item.id) {
                return Err(VdkError::NotFound(NOT_IN_CART.to_string()));
            }
            return Ok(ToolReply::new(REMOVED, json!({ "item_id": item.id, "quantity": 0 })));
        }
        cart.set(&item.id, args.quantity);
        Ok(ToolReply::new(
            format!("Your cart now has {} of {}.", args.quantity, item.name),
            json!({ "item_id": item.id, "quantity": args.quantity }),
        ))
    }

    fn remove_item(&self, args: RemoveItemArgs) -> Result<ToolReply> {
        if self.cart().remove(&args.item_id) {
            Ok(ToolReply::new(REMOVED, json!({ "item_id": args.item_id })))
        } else {
            Err(VdkError::NotFound(NOT_IN_CART.to_string()))
        }
    }

    fn add_recipe(&self, args: AddRecipeArgs) -> Result<ToolReply> {
        let Some((recipe, ids)) = self.recipes.find(&args.recipe_name) else {
            return Err(VdkError::NotFound(NO_RECIPE.to_string()));
        };

        let mut cart = self.cart();
        let mut added = Vec::new();
        for id in ids {
            match find_item(&self.catalog, id) {
                Some(item) => {
                    cart.add(&item.id, 1);
                    added.push(item.name.clone());
                }
                None => {
                    warn!(recipe, item.id = %id, "skipping recipe ingredient missing from catalog")
                }
            }
        }

        if added.is_empty() {
            return Err(VdkError::NotFound(NO_RECIPE.to_string()));
        }
        Ok(ToolReply::new(
            format!("I have added {} for {}.", added.join(", "), recipe),
            json!({ "recipe": recipe, "added": added }),
        ))
    }

    fn show_cart(&self) -> Result<ToolReply> {
        let cart = self.cart().clone();
        if cart.is_empty() {
            return Ok(ToolReply::new(EMPTY_CART, json!({ "items": [], "total": 0.0 })));
        }

        let (items, total) = self.priced_lines(&cart);
        let parts: Vec<String> =
            items.iter().map(|line| format!("{} x {}", line.quantity, line.name)).collect();
        Ok(ToolReply::new(
            format!("Your cart currently has: {}", parts.join(", ")),
            json!({ "items": items, "total": total }),
        ))
    }

    async fn save_order(
        &self,
        _ctx: Arc<dyn ToolContext>,
        args: SaveOrderArgs,
    ) -> Result<ToolReply> {
        let cart = self.cart().clone();
        if cart.is_empty() {
            return Ok(ToolReply::text(NOTHING_TO_SAVE));
        }

        let (items, total) = self.priced_lines(&cart);
        let order =
            GroceryOrder { customer_name: args.user_name, timestamp: Utc::now(), items, total };

        self.orders.append(order.clone()).await.map_err(|e| {
            error!(store = %self.orders.location(), error = %e, "failed to save grocery order");
            VdkError::Storage(SAVE_FAILED.to_string())
        })?;

        Ok(ToolReply::new(format!("Your order has been placed. Total is {}.", total), json!(order)))
    }

    fn snapshot(&self) -> Value {
        json!({ "cart": self.cart().lines() })
    }
}

pub struct GroceryAssistant {
    instructions: String,
    inner: Arc<GroceryInner>,
}

impl GroceryAssistant {
    pub fn new(
        grocer: &str,
        catalog: Arc<Vec<CatalogItem>>,
        recipes: Arc<RecipeBook>,
        orders: Arc<dyn RecordStore<GroceryOrder>>,
    ) -> Result<Self> {
        Ok(Self {
            instructions: render_with(INSTRUCTIONS, "grocer", grocer)?,
            inner: Arc::new(GroceryInner { catalog, recipes, orders, cart: Mutex::new(Cart::new()) }),
        })
    }
}

impl Persona for GroceryAssistant {
    fn name(&self) -> &str {
        "grocery"
    }

    fn description(&self) -> &str {
        "Builds a grocery cart from items and recipes and places the order"
    }

    fn instructions(&self) -> String {
        self.instructions.clone()
    }

    fn tools(&self) -> Vec<Arc<dyn Tool>> {
        let inner = self.inner.clone();
        let search_catalog = FunctionTool::typed(
            "search_catalog",
            "Search the catalog by name, category, description or tag.",
            move |_ctx, args: SearchCatalogArgs| {
                let inner = inner.clone();
                async move { inner.search_catalog(args) }
            },
        );

        let inner = self.inner.clone();
        let add_item = FunctionTool::typed(
            "add_item",
            "Add a quantity of a catalog item to the cart.",
            move |_ctx, args: ItemQuantityArgs| {
                let inner = inner.clone();
                async move { inner.add_item(args) }
            },
        );

        let inner = self.inner.clone();
        let update_item = FunctionTool::typed(
            "update_item",
            "Set the quantity of an item in the cart. Zero removes it.",
            move |_ctx, args: ItemQuantityArgs| {
                let inner = inner.clone();
                async move { inner.update_item(args) }
            },
        );

        let inner = self.inner.clone();
        let remove_item = FunctionTool::typed(
            "remove_item",
            "Remove an item from the cart.",
            move |_ctx, args: RemoveItemArgs| {
                let inner = inner.clone();
                async move { inner.remove_item(args) }
            },
        );

        let inner = self.inner.clone();
        let add_recipe = FunctionTool::typed(
            "add_recipe",
            "Add one of each ingredient for a dish to the cart.",
            move |_ctx, args: AddRecipeArgs| {
                let inner = inner.clone();
                async move { inner.add_recipe(args) }
            },
        );

        let inner = self.inner.clone();
        let show_cart =
            FunctionTool::new("show_cart", "Read back the cart contents.", move |_ctx, _args| {
                let inner = inner.clone();
                async move { inner.show_cart() }
            });

        let inner = self.inner.clone();
        let save_order = FunctionTool::typed(
            "save_order",
            "Place the order for the current cart. Call exactly once when the user is done.",
            move |ctx, args: SaveOrderArgs| {
                let inner = inner.clone();
                async move { inner.save_order(ctx, args).await }
            },
        );

        vec![
            Arc::new(search_catalog),
            Arc::new(add_item),
            Arc::new(update_item),
            Arc::new(remove_item),
            Arc::new(add_recipe),
            Arc::new(show_cart),
            Arc::new(save_order),
        ]
    }

    fn snapshot(&self) -> Value {
        self.inner.snapshot()
    }
}
