mod common;

use common::{call, session};
use serde_json::json;
use std::sync::Arc;
use vdk_agents::FaqEntry;
use vdk_agents::barista::{Barista, CoffeeOrder};
use vdk_agents::sdr::{Lead, SalesRep};
use vdk_agents::wellness::{WellnessCoach, WellnessEntry};
use vdk_core::{ErrorCode, Persona};
use vdk_store::{InMemoryStore, JsonFileStore, RecordStore};

fn order_args(name: &str) -> serde_json::Value {
    json!({
        "drinkType": "latte",
        "size": "medium",
        "milk": "oat",
        "extras": ["extra shot"],
        "name": name
    })
}

#[tokio::test]
async fn test_barista_appends_each_order() {
    let store = Arc::new(InMemoryStore::<CoffeeOrder>::new("coffee"));
    let session = session(Barista::new("Falcon Brew", store.clone()).unwrap()).await;

    for name in ["Asha", "Ben", "Chen"] {
        let resp = call(&session, "save_order", order_args(name)).await;
        assert!(resp.ok);
        assert_eq!(resp.message, "The order has been saved to the system.");
    }

    let orders = store.load().await;
    assert_eq!(orders.len(), 3);
    assert_eq!(orders[1].name, "Ben");
    assert_eq!(orders[1].drink_type, "latte");
    assert_eq!(orders[1].extras, vec!["extra shot".to_string()]);
}

#[tokio::test]
async fn test_barista_file_uses_camel_case_drink_type() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("coffee_orders.json");
    let store = Arc::new(JsonFileStore::<CoffeeOrder>::new(&path));
    let session = session(Barista::new("Falcon Brew", store).unwrap()).await;

    call(&session, "save_order", order_args("Dev")).await;

    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(saved[0]["drinkType"], "latte");
    assert!(saved[0]["timestamp"].is_string());
}

#[tokio::test]
async fn test_barista_write_failure_apologises() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "x").unwrap();
    let store = Arc::new(JsonFileStore::<CoffeeOrder>::new(blocker.join("orders.json")));
    let session = session(Barista::new("Falcon Brew", store).unwrap()).await;

    let resp = call(&session, "save_order", order_args("Eve")).await;
    assert!(!resp.ok);
    assert_eq!(resp.code, Some(ErrorCode::StorageFailure));
    assert!(resp.message.starts_with("I had an issue saving the order."));
}

#[tokio::test]
async fn test_barista_missing_field_is_invalid_arguments() {
    let store = Arc::new(InMemoryStore::<CoffeeOrder>::new("coffee"));
    let session = session(Barista::new("Falcon Brew", store.clone()).unwrap()).await;

    let resp = call(&session, "save_order", json!({"drinkType": "mocha"})).await;
    assert_eq!(resp.code, Some(ErrorCode::InvalidArguments));
    assert!(store.load().await.is_empty());
}

#[tokio::test]
async fn test_barista_instructions_mention_cafe() {
    let barista = Barista::new("Night Owl", Arc::new(InMemoryStore::new("coffee"))).unwrap();
    let text = barista.instructions();
    assert!(text.contains("Night Owl"));
    assert!(text.contains("\"drinkType\": \"string\""));
}

#[tokio::test]
async fn test_wellness_first_session_has_no_history() {
    let store = Arc::new(InMemoryStore::<WellnessEntry>::new("wellness"));
    let coach = WellnessCoach::new(store).await.unwrap();
    assert!(!coach.instructions().contains("Context from our last check-in"));
}

#[tokio::test]
async fn test_wellness_next_session_sees_last_entry() {
    let store = Arc::new(InMemoryStore::<WellnessEntry>::new("wellness"));
    let first = session(WellnessCoach::new(store.clone()).await.unwrap()).await;

    let resp = call(
        &first,
        "save_wellness_log",
        json!({"mood": "low energy", "goals": ["walk", "read"], "summary": "Tired but hopeful."}),
    )
    .await;
    assert!(resp.ok);
    assert_eq!(
        resp.message,
        "I have saved today's wellness check-in so we can refer back to it next time."
    );

    let second = WellnessCoach::new(store).await.unwrap();
    let text = second.instructions();
    assert!(text.contains("You said you felt: 'low energy'."));
    assert!(text.contains("Your goals were: walk, read."));
}

fn faq() -> Arc<Vec<FaqEntry>> {
    Arc::new(vec![
        FaqEntry {
            question: "What does Zerodha do?".into(),
            answer: Some("We are a discount brokerage.".into()),
            tags: vec!["about".into()],
        },
        FaqEntry {
            question: "How much brokerage?".into(),
            answer: Some("Delivery is free.".into()),
            tags: vec!["pricing".into(), "fees".into()],
        },
        FaqEntry {
            question: "Referral program".into(),
            answer: None,
            tags: vec!["referral".into()],
        },
    ])
}

#[tokio::test]
async fn test_sdr_search_picks_best_answer() {
    let leads = Arc::new(InMemoryStore::<Lead>::new("leads"));
    let session = session(SalesRep::new("Zerodha", faq(), leads).unwrap()).await;

    let resp = call(&session, "search_faq", json!({"question": "brokerage fees"})).await;
    assert!(resp.ok);
    assert_eq!(resp.message, "Delivery is free.");

    let again = call(&session, "search_faq", json!({"question": "brokerage fees"})).await;
    assert_eq!(again, resp);
}

#[tokio::test]
async fn test_sdr_search_keeps_punctuated_short_words() {
    let leads = Arc::new(InMemoryStore::<Lead>::new("leads"));
    let faq = Arc::new(vec![FaqEntry {
        question: "Is it free?".into(),
        answer: Some("Account opening is free.".into()),
        tags: Vec::new(),
    }]);
    let session = session(SalesRep::new("Zerodha", faq, leads).unwrap()).await;

    let resp = call(&session, "search_faq", json!({"question": "it?"})).await;
    assert!(resp.ok);
    assert_eq!(resp.message, "Account opening is free.");

    let resp = call(&session, "search_faq", json!({"question": "it"})).await;
    assert_eq!(resp.code, Some(ErrorCode::NotFound));
}

#[tokio::test]
async fn test_sdr_search_fallbacks() {
    let leads = Arc::new(InMemoryStore::<Lead>::new("leads"));
    let session = session(SalesRep::new("Zerodha", faq(), leads.clone()).unwrap()).await;

    let resp = call(&session, "search_faq", json!({"question": "weather tomorrow"})).await;
    assert_eq!(resp.code, Some(ErrorCode::NotFound));
    assert_eq!(
        resp.message,
        "I am not sure about that specific detail. You may need to check the Zerodha website for the latest information."
    );

    let resp = call(&session, "search_faq", json!({"question": "referral bonus"})).await;
    assert!(resp.ok);
    assert_eq!(resp.message, "I have an answer, but it seems incomplete.");

    let empty = session_without_faq(leads).await;
    let resp = call(&empty, "search_faq", json!({"question": "fees"})).await;
    assert_eq!(resp.message, "I do not have company FAQ data loaded right now.");
}

async fn session_without_faq(leads: Arc<InMemoryStore<Lead>>) -> vdk_session::Session {
    session(SalesRep::new("Zerodha", Arc::new(Vec::new()), leads).unwrap()).await
}

#[tokio::test]
async fn test_sdr_saves_lead() {
    let leads = Arc::new(InMemoryStore::<Lead>::new("leads"));
    let session = session(SalesRep::new("Zerodha", faq(), leads.clone()).unwrap()).await;

    let resp = call(
        &session,
        "save_lead",
        json!({
            "name": "Ravi",
            "company": "individual",
            "email": "ravi@example.com",
            "role": "student",
            "use_case": "long term investing",
            "team_size": "1",
            "timeline": "soon",
            "summary": "Student who wants to start investing soon."
        }),
    )
    .await;
    assert!(resp.ok);
    assert_eq!(resp.message, "I have saved this lead to the system.");

    let saved = leads.load().await;
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].email, "ravi@example.com");
    assert_eq!(saved[0].timeline, "soon");
}
