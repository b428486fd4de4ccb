use std::collections::HashSet;
use std::path::Path;
use vdk_agents::{PersonaFactory, PersonaKind, PersonaSettings, ReferenceData};
use vdk_core::FunctionCall;
use vdk_session::{Session, SessionConfig};

fn settings(reference_dir: &Path, output_dir: &Path) -> PersonaSettings {
    PersonaSettings {
        reference_dir: reference_dir.to_path_buf(),
        output_dir: output_dir.to_path_buf(),
        ..Default::default()
    }
}

fn shared_data() -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../shared-data")
}

#[tokio::test]
async fn test_every_persona_builds_with_unique_tool_names() {
    let out = tempfile::tempdir().unwrap();
    let factory = PersonaFactory::new(settings(&shared_data(), out.path()));

    for kind in PersonaKind::ALL {
        let persona = factory.create(kind).await.unwrap();
        assert_eq!(persona.name(), kind.as_str());
        assert!(!persona.instructions().is_empty());

        let tools = persona.tools();
        let names: HashSet<_> = tools.iter().map(|t| t.name().to_string()).collect();
        assert_eq!(names.len(), tools.len(), "duplicate tool in {}", kind);
        for tool in &tools {
            assert!(!tool.description().is_empty());
        }
    }
}

#[tokio::test]
async fn test_game_master_has_no_tools() {
    let out = tempfile::tempdir().unwrap();
    let factory = PersonaFactory::new(settings(&shared_data(), out.path()));
    let persona = factory.create(PersonaKind::GameMaster).await.unwrap();
    assert!(persona.tools().is_empty());
    assert!(persona.instructions().contains("What do you do?"));
}

#[tokio::test]
async fn test_missing_reference_dir_degrades_to_empty_data() {
    let dir = tempfile::tempdir().unwrap();
    let data = ReferenceData::load(&settings(&dir.path().join("missing"), dir.path()));
    assert!(data.faq.is_empty());
    assert!(data.grocery_catalog.is_empty());
    assert!(data.recipes.is_empty());
    assert!(data.shopping_catalog.is_empty());
}

#[tokio::test]
async fn test_sample_reference_data_loads() {
    let dir = tempfile::tempdir().unwrap();
    let data = ReferenceData::load(&settings(&shared_data(), dir.path()));
    assert!(!data.faq.is_empty());
    assert!(!data.grocery_catalog.is_empty());
    assert!(!data.recipes.is_empty());
    assert!(!data.shopping_catalog.is_empty());
}

#[tokio::test]
async fn test_grocery_session_writes_to_output_dir() {
    let out = tempfile::tempdir().unwrap();
    let factory = PersonaFactory::new(settings(&shared_data(), out.path()));
    let persona = factory.create(PersonaKind::Grocery).await.unwrap();
    let session = Session::start(persona, SessionConfig::default()).await.unwrap();

    let resp = session
        .call(FunctionCall::new("add_recipe", serde_json::json!({"recipe_name": "pasta"})))
        .await;
    assert!(resp.response.ok, "{}", resp.response.message);
    let resp = session
        .call(FunctionCall::new("save_order", serde_json::json!({"user_name": "Kiran"})))
        .await;
    assert!(resp.response.ok);

    let written = out.path().join(&factory.settings().files.grocery_orders);
    assert!(written.exists());
}

#[tokio::test]
async fn test_each_create_starts_with_fresh_state() {
    let out = tempfile::tempdir().unwrap();
    let factory = PersonaFactory::new(settings(&shared_data(), out.path()));

    let grocery = factory.create(PersonaKind::Grocery).await.unwrap();
    let first = Session::start(grocery, SessionConfig::default()).await.unwrap();
    let args = serde_json::json!({"item_id": "milk_1l", "quantity": 1});
    first.call(FunctionCall::new("add_item", args)).await;

    let grocery = factory.create(PersonaKind::Grocery).await.unwrap();
    let second = Session::start(grocery, SessionConfig::default()).await.unwrap();
    assert_eq!(first.state()["cart"].as_array().unwrap().len(), 1);
    assert_eq!(second.state()["cart"], serde_json::json!([]));
}
