use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// File names, relative to the reference and output directories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileNames {
    pub faq: String,
    pub fraud_cases: String,
    pub grocery_catalog: String,
    pub recipes: String,
    pub shopping_catalog: String,
    pub coffee_orders: String,
    pub wellness_log: String,
    pub leads: String,
    pub grocery_orders: String,
    pub shopping_orders: String,
}

impl Default for FileNames {
    fn default() -> Self {
        Self {
            faq: "faq.json".to_string(),
            fraud_cases: "fraud_cases.json".to_string(),
            grocery_catalog: "grocery_catalog.json".to_string(),
            recipes: "recipes.json".to_string(),
            shopping_catalog: "shopping_catalog.json".to_string(),
            coffee_orders: "coffee_orders.json".to_string(),
            wellness_log: "wellness_log.json".to_string(),
            leads: "leads.json".to_string(),
            grocery_orders: "grocery_orders.json".to_string(),
            shopping_orders: "shopping_orders.json".to_string(),
        }
    }
}

/// Names the personas speak for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Brand {
    pub company: String,
    pub bank: String,
    pub cafe: String,
    pub grocer: String,
}

impl Default for Brand {
    fn default() -> Self {
        Self {
            company: "Zerodha".to_string(),
            bank: "Horizon Bank".to_string(),
            cafe: "Falcon Brew".to_string(),
            grocer: "QuickCart".to_string(),
        }
    }
}

/// Where persona data lives and how personas present themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonaSettings {
    /// Read-only catalogs, FAQ, recipes, and the seeded fraud case file.
    pub reference_dir: PathBuf,
    /// Order, lead, and log files written by the personas.
    pub output_dir: PathBuf,
    pub files: FileNames,
    pub brand: Brand,
    pub improv_max_rounds: u32,
}

impl Default for PersonaSettings {
    fn default() -> Self {
        Self {
            reference_dir: PathBuf::from("shared-data"),
            output_dir: PathBuf::from("."),
            files: FileNames::default(),
            brand: Brand::default(),
            improv_max_rounds: 3,
        }
    }
}

impl PersonaSettings {
    pub fn reference_path(&self, name: &str) -> PathBuf {
        self.reference_dir.join(name)
    }

    pub fn output_path(&self, name: &str) -> PathBuf {
        self.output_dir.join(name)
    }
}
