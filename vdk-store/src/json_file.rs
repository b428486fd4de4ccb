use crate::file::{load_records, modify_records, write_records_atomic};
use crate::service::{Record, RecordBuilder, RecordPredicate, RecordStore, RecordUpdate};
use async_trait::async_trait;
use std::collections::HashMap;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock, PoisonError};
use tokio::sync::Mutex;
use tracing::{error, info};
use vdk_core::{Result, VdkError};
use vdk_telemetry::{Instrument, store_write_span};

type Gate = Arc<Mutex<()>>;

static PATH_GATES: OnceLock<std::sync::Mutex<HashMap<PathBuf, Gate>>> = OnceLock::new();

/// One gate per absolute path, shared by every store in the process that
/// points at the same file.
fn gate_for(path: &Path) -> Gate {
    let key = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let gates = PATH_GATES.get_or_init(|| std::sync::Mutex::new(HashMap::new()));
    let mut gates = gates.lock().unwrap_or_else(PoisonError::into_inner);
    gates.entry(key).or_insert_with(|| Arc::new(Mutex::new(()))).clone()
}

/// A [`RecordStore`] backed by a JSON array file.
///
/// Writers in this process are serialized per path; writers in other
/// processes are serialized by an exclusive lock on `<file>.lock`. Each write
/// replaces the file atomically.
pub struct JsonFileStore<T> {
    path: PathBuf,
    gate: Gate,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonFileStore<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let gate = gate_for(&path);
        Self { path, gate, _marker: PhantomData }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<T: Record> JsonFileStore<T> {
    async fn write<R, F>(&self, op: &'static str, f: F) -> Result<R>
    where
        R: Send + 'static,
        F: FnOnce(&Path) -> Result<R> + Send + 'static,
    {
        let span = store_write_span(&self.path.display().to_string());
        let _gate = self.gate.lock().instrument(span.clone()).await;
        let path = self.path.clone();

        let result = tokio::task::spawn_blocking(move || f(&path))
            .instrument(span)
            .await
            .map_err(|e| VdkError::Storage(format!("store task failed: {}", e)))
            .and_then(|r| r);

        if let Err(e) = &result {
            error!(path = %self.path.display(), op, error = %e, "record file write failed");
        }
        result
    }
}

#[async_trait]
impl<T: Record> RecordStore<T> for JsonFileStore<T> {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    async fn load(&self) -> Vec<T> {
        let path = self.path.clone();
        match tokio::task::spawn_blocking(move || load_records::<T>(&path)).await {
            Ok(records) => records,
            Err(e) => {
                error!(path = %self.path.display(), error = %e, "record file read task failed");
                Vec::new()
            }
        }
    }

    async fn append(&self, record: T) -> Result<usize> {
        let len = self
            .write("append", move |path| {
                modify_records::<T, _, _>(path, move |records| {
                    records.push(record);
                    Ok((true, records.len()))
                })
            })
            .await?;
        info!(path = %self.path.display(), records = len, "appended record");
        Ok(len)
    }

    async fn append_with(&self, build: RecordBuilder<T>) -> Result<T> {
        let record = self
            .write("append", move |path| {
                modify_records::<T, _, _>(path, move |records| {
                    let record = build(records)?;
                    records.push(record.clone());
                    Ok((true, record))
                })
            })
            .await?;
        info!(path = %self.path.display(), "appended record");
        Ok(record)
    }

    async fn update_first(
        &self,
        matches: RecordPredicate<T>,
        update: RecordUpdate<T>,
    ) -> Result<Option<T>> {
        let updated = self
            .write("update", move |path| {
                modify_records::<T, _, _>(path, move |records| {
                    match records.iter_mut().find(|r| matches(r)) {
                        Some(record) => {
                            update(record);
                            Ok((true, Some(record.clone())))
                        }
                        None => Ok((false, None)),
                    }
                })
            })
            .await?;
        if updated.is_some() {
            info!(path = %self.path.display(), "updated record in place");
        }
        Ok(updated)
    }

    async fn save(&self, records: Vec<T>) -> Result<()> {
        self.write("save", move |path| write_records_atomic(path, &records)).await
    }
}
