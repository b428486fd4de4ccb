use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub item_id: String,
    pub quantity: u32,
}

/// Item quantities in the order items were first added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: IndexMap<String, u32>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds to any quantity already in the cart and returns the new quantity.
    pub fn add(&mut self, item_id: &str, quantity: u32) -> u32 {
        let entry = self.items.entry(item_id.to_string()).or_insert(0);
        *entry = entry.saturating_add(quantity);
        *entry
    }

    /// Sets an absolute quantity. Zero removes the line.
    pub fn set(&mut self, item_id: &str, quantity: u32) {
        if quantity == 0 {
            self.remove(item_id);
        } else {
            self.items.insert(item_id.to_string(), quantity);
        }
    }

    /// Returns false when the item was not in the cart.
    pub fn remove(&mut self, item_id: &str) -> bool {
        self.items.shift_remove(item_id).is_some()
    }

    pub fn quantity(&self, item_id: &str) -> u32 {
        self.items.get(item_id).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.items.iter().map(|(id, qty)| (id.as_str(), *qty))
    }

    pub fn lines(&self) -> Vec<CartLine> {
        self.iter()
            .map(|(item_id, quantity)| CartLine { item_id: item_id.to_string(), quantity })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
