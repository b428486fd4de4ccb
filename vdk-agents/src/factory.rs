use crate::barista::Barista;
use crate::fraud::FraudAgent;
use crate::game_master::GameMaster;
use crate::grocery::GroceryAssistant;
use crate::improv::ImprovHost;
use crate::sdr::SalesRep;
use crate::shopping::ShoppingAssistant;
use crate::wellness::WellnessCoach;
use crate::{PersonaKind, PersonaSettings, ReferenceData};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;
use vdk_core::{Persona, Result};
use vdk_store::{JsonFileStore, Record, RecordStore};

fn file_store<T: Record>(path: PathBuf) -> Arc<dyn RecordStore<T>> {
    Arc::new(JsonFileStore::<T>::new(path))
}

/// Creates fresh personas, each with its own empty session state, over
/// reference data that is loaded once and shared.
pub struct PersonaFactory {
    settings: PersonaSettings,
    faq: Arc<Vec<crate::FaqEntry>>,
    grocery_catalog: Arc<Vec<crate::CatalogItem>>,
    recipes: Arc<crate::RecipeBook>,
    shopping_catalog: Arc<Vec<crate::CatalogItem>>,
}

impl PersonaFactory {
    pub fn new(settings: PersonaSettings) -> Self {
        let reference = ReferenceData::load(&settings);
        Self::with_reference(settings, reference)
    }

    pub fn with_reference(settings: PersonaSettings, reference: ReferenceData) -> Self {
        Self {
            settings,
            faq: Arc::new(reference.faq),
            grocery_catalog: Arc::new(reference.grocery_catalog),
            recipes: Arc::new(reference.recipes),
            shopping_catalog: Arc::new(reference.shopping_catalog),
        }
    }

    pub fn settings(&self) -> &PersonaSettings {
        &self.settings
    }

    pub async fn create(&self, kind: PersonaKind) -> Result<Arc<dyn Persona>> {
        let s = &self.settings;
        let files = &s.files;
        debug!(persona = %kind, "creating persona");

        let persona: Arc<dyn Persona> = match kind {
            PersonaKind::Barista => Arc::new(Barista::new(
                &s.brand.cafe,
                file_store(s.output_path(&files.coffee_orders)),
            )?),
            PersonaKind::Wellness => {
                Arc::new(WellnessCoach::new(file_store(s.output_path(&files.wellness_log))).await?)
            }
            PersonaKind::Sdr => Arc::new(SalesRep::new(
                &s.brand.company,
                self.faq.clone(),
                file_store(s.output_path(&files.leads)),
            )?),
            PersonaKind::Fraud => Arc::new(FraudAgent::new(
                &s.brand.bank,
                file_store(s.reference_path(&files.fraud_cases)),
            )?),
            PersonaKind::Grocery => Arc::new(GroceryAssistant::new(
                &s.brand.grocer,
                self.grocery_catalog.clone(),
                self.recipes.clone(),
                file_store(s.output_path(&files.grocery_orders)),
            )?),
            PersonaKind::GameMaster => Arc::new(GameMaster),
            PersonaKind::Shopping => Arc::new(ShoppingAssistant::new(
                self.shopping_catalog.clone(),
                file_store(s.output_path(&files.shopping_orders)),
            )),
            PersonaKind::Improv => Arc::new(ImprovHost::new(s.improv_max_rounds)?),
        };
        Ok(persona)
    }
}
