//! Reference data shared by every session of a persona.

use crate::PersonaSettings;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use vdk_store::load_reference;
use vdk_tool::Searchable;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: String,
    pub name: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Searchable for CatalogItem {
    fn haystack(&self) -> String {
        let mut parts = vec![self.name.as_str()];
        parts.extend(self.category.as_deref());
        parts.extend(self.description.as_deref());
        parts.extend(self.tags.iter().map(String::as_str));
        parts.join(" ")
    }
}

pub fn find_item<'a>(catalog: &'a [CatalogItem], id: &str) -> Option<&'a CatalogItem> {
    catalog.iter().find(|item| item.id == id)
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FaqEntry {
    #[serde(default)]
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Searchable for FaqEntry {
    fn haystack(&self) -> String {
        let mut parts = vec![self.question.as_str(), self.answer.as_deref().unwrap_or_default()];
        parts.extend(self.tags.iter().map(String::as_str));
        parts.join(" ")
    }
}

/// Recipe name to ingredient item ids, in file order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeBook(IndexMap<String, Vec<String>>);

impl RecipeBook {
    pub fn new(recipes: IndexMap<String, Vec<String>>) -> Self {
        Self(recipes)
    }

    /// First recipe, in file order, whose name contains `query`
    /// case-insensitively.
    pub fn find(&self, query: &str) -> Option<(&str, &[String])> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return None;
        }
        self.0
            .iter()
            .find(|(name, _)| name.to_lowercase().contains(&query))
            .map(|(name, ids)| (name.as_str(), ids.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Everything loaded once per process and never written.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    pub faq: Vec<FaqEntry>,
    pub grocery_catalog: Vec<CatalogItem>,
    pub recipes: RecipeBook,
    pub shopping_catalog: Vec<CatalogItem>,
}

impl ReferenceData {
    pub fn load(settings: &PersonaSettings) -> Self {
        let files = &settings.files;
        let data = Self {
            faq: load_reference(&settings.reference_path(&files.faq)),
            grocery_catalog: load_reference(&settings.reference_path(&files.grocery_catalog)),
            recipes: load_reference(&settings.reference_path(&files.recipes)),
            shopping_catalog: load_reference(&settings.reference_path(&files.shopping_catalog)),
        };
        data.check_recipes();

        info!(
            faq = data.faq.len(),
            grocery_items = data.grocery_catalog.len(),
            recipes = data.recipes.len(),
            shopping_items = data.shopping_catalog.len(),
            "reference data loaded"
        );
        data
    }

    fn check_recipes(&self) {
        for (name, ids) in &self.recipes.0 {
            for id in ids {
                if find_item(&self.grocery_catalog, id).is_none() {
                    warn!(
                        recipe = %name,
                        item.id = %id,
                        "recipe ingredient missing from grocery catalog"
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vdk_tool::best_match;

    #[test]
    fn test_catalog_item_minimal_fields() {
        let item: CatalogItem =
            serde_json::from_str(r#"{"id": "A", "name": "Apple", "price": 10}"#).unwrap();
        assert_eq!(item.price, 10.0);
        assert!(item.currency.is_none());
        assert!(item.tags.is_empty());
    }

    #[test]
    fn test_recipe_book_keeps_file_order() {
        let book: RecipeBook = serde_json::from_str(
            r#"{"zucchini pasta": ["z1"], "pasta for two": ["p1", "s1"], "pasta salad": ["p1"]}"#,
        )
        .unwrap();
        let (name, ids) = book.find("PASTA").unwrap();
        assert_eq!(name, "zucchini pasta");
        assert_eq!(ids, ["z1".to_string()]);

        assert_eq!(book.find("for two").unwrap().0, "pasta for two");
        assert!(book.find("curry").is_none());
        assert!(book.find("  ").is_none());
    }

    #[test]
    fn test_faq_haystack_uses_tags() {
        let faq = vec![
            FaqEntry {
                question: "What is Kite?".into(),
                answer: Some("Our trading platform.".into()),
                tags: vec![],
            },
            FaqEntry {
                question: "How much does it cost?".into(),
                answer: Some("Equity delivery is free.".into()),
                tags: vec!["pricing".into(), "brokerage".into()],
            },
        ];
        let found = best_match(&faq, "tell me about brokerage").unwrap();
        assert_eq!(found.index, 1);
    }
}
