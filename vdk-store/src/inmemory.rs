use crate::service::{Record, RecordBuilder, RecordPredicate, RecordStore, RecordUpdate};
use async_trait::async_trait;
use tokio::sync::Mutex;
use vdk_core::Result;

/// A [`RecordStore`] that lives only as long as the process.
pub struct InMemoryStore<T> {
    name: String,
    records: Mutex<Vec<T>>,
}

impl<T> InMemoryStore<T> {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), records: Mutex::new(Vec::new()) }
    }

    pub fn with_records(name: impl Into<String>, records: Vec<T>) -> Self {
        Self { name: name.into(), records: Mutex::new(records) }
    }
}

#[async_trait]
impl<T: Record> RecordStore<T> for InMemoryStore<T> {
    fn location(&self) -> String {
        format!("memory:{}", self.name)
    }

    async fn load(&self) -> Vec<T> {
        self.records.lock().await.clone()
    }

    async fn append(&self, record: T) -> Result<usize> {
        let mut records = self.records.lock().await;
        records.push(record);
        Ok(records.len())
    }

    async fn append_with(&self, build: RecordBuilder<T>) -> Result<T> {
        let mut records = self.records.lock().await;
        let record = build(&records)?;
        records.push(record.clone());
        Ok(record)
    }

    async fn update_first(
        &self,
        matches: RecordPredicate<T>,
        update: RecordUpdate<T>,
    ) -> Result<Option<T>> {
        let mut records = self.records.lock().await;
        Ok(records.iter_mut().find(|r| matches(r)).map(|record| {
            update(record);
            record.clone()
        }))
    }

    async fn save(&self, records: Vec<T>) -> Result<()> {
        *self.records.lock().await = records;
        Ok(())
    }
}
