use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use vdk_store::{InMemoryStore, JsonFileStore, RecordStore, load_reference, read_records};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Lead {
    name: String,
    company: Option<String>,
}

fn lead(name: &str) -> Lead {
    Lead { name: name.to_string(), company: None }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Case {
    #[serde(rename = "userName")]
    user_name: String,
    status: String,
}

#[tokio::test]
async fn test_append_grows_collection() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::<Lead>::new(dir.path().join("leads.json"));

    for i in 0..5 {
        let len = store.append(lead(&format!("lead-{i}"))).await.unwrap();
        assert_eq!(len, i + 1);
    }

    let records = store.load().await;
    assert_eq!(records.len(), 5);
    assert_eq!(records[0].name, "lead-0");
    assert_eq!(records[4].name, "lead-4");
}

#[tokio::test]
async fn test_file_is_pretty_json_array() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/out/leads.json");
    let store = JsonFileStore::<Lead>::new(&path);
    store.append(lead("Asha")).await.unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.starts_with('['));
    assert!(content.contains("\n  {"));
    assert!(!dir.path().join("nested/out/.leads.json.tmp").exists());

    let parsed: Vec<Lead> = read_records(&path).unwrap();
    assert_eq!(parsed, vec![lead("Asha")]);
}

#[tokio::test]
async fn test_load_missing_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::<Lead>::new(dir.path().join("absent.json"));
    assert!(store.load().await.is_empty());
    assert!(store.last().await.is_none());
}

#[tokio::test]
async fn test_append_with_sees_current_collection() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::<serde_json::Value>::new(dir.path().join("orders.json"));

    for expected in ["ORD-1", "ORD-2", "ORD-3"] {
        let order = store
            .append_with(Box::new(|existing: &[serde_json::Value]| {
                Ok(json!({ "id": format!("ORD-{}", existing.len() + 1) }))
            }))
            .await
            .unwrap();
        assert_eq!(order["id"], expected);
    }

    let last = store.last().await.unwrap();
    assert_eq!(last["id"], "ORD-3");
}

#[tokio::test]
async fn test_update_first_touches_only_first_match() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cases.json");
    let store = JsonFileStore::<Case>::new(&path);
    store
        .save(vec![
            Case { user_name: "John".into(), status: "pending_review".into() },
            Case { user_name: "john".into(), status: "pending_review".into() },
        ])
        .await
        .unwrap();

    let updated = store
        .update_first(
            Box::new(|c: &Case| c.user_name.to_lowercase() == "john"),
            Box::new(|c: &mut Case| c.status = "confirmed_safe".into()),
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.user_name, "John");

    let records = store.load().await;
    assert_eq!(records[0].status, "confirmed_safe");
    assert_eq!(records[1].status, "pending_review");
}

#[tokio::test]
async fn test_update_first_without_match_does_not_write() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cases.json");
    let store = JsonFileStore::<Case>::new(&path);

    let updated = store
        .update_first(Box::new(|_: &Case| true), Box::new(|c: &mut Case| c.status = "x".into()))
        .await
        .unwrap();
    assert!(updated.is_none());
    assert!(!path.exists());
}

#[tokio::test]
async fn test_write_failure_surfaces_error() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "not a directory").unwrap();

    let store = JsonFileStore::<Lead>::new(blocker.join("leads.json"));
    assert!(store.append(lead("x")).await.is_err());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_appends_keep_every_record() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("orders.json");

    let mut handles = Vec::new();
    for i in 0..20 {
        // separate store handles on the same path share one gate
        let store = Arc::new(JsonFileStore::<Lead>::new(&path));
        handles.push(tokio::spawn(async move { store.append(lead(&format!("c{i}"))).await }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let records: Vec<Lead> = read_records(&path).unwrap();
    assert_eq!(records.len(), 20);
}

#[tokio::test]
async fn test_in_memory_store_matches_file_semantics() {
    let store = InMemoryStore::<Lead>::new("leads");
    assert_eq!(store.location(), "memory:leads");
    store.append(lead("a")).await.unwrap();
    store.append(lead("b")).await.unwrap();

    let found = store.find_first(Box::new(|l: &Lead| l.name == "b")).await;
    assert_eq!(found, Some(lead("b")));
    assert_eq!(store.last().await, Some(lead("b")));
}

#[test]
fn test_reference_loads_list() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.json");
    std::fs::write(&path, r#"[{"name": "Milk", "company": null}]"#).unwrap();

    let items: Vec<Lead> = load_reference(&path);
    assert_eq!(items, vec![lead("Milk")]);
}
