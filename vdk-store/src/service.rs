use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use vdk_core::Result;

/// Builds a record from the collection as it stands at write time.
pub type RecordBuilder<T> = Box<dyn FnOnce(&[T]) -> Result<T> + Send>;
pub type RecordPredicate<T> = Box<dyn Fn(&T) -> bool + Send>;
pub type RecordUpdate<T> = Box<dyn FnOnce(&mut T) + Send>;

/// Marker bounds for anything kept in a [`RecordStore`].
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {}

impl<T> Record for T where T: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {}

/// An ordered, append-mostly collection of persisted records.
///
/// Every mutating call is a complete read-modify-write of the collection.
#[async_trait]
pub trait RecordStore<T: Record>: Send + Sync {
    /// Human-readable location, for logs.
    fn location(&self) -> String;

    /// Current records. Read failures degrade to an empty list.
    async fn load(&self) -> Vec<T>;

    /// Appends one record and returns the new collection length.
    async fn append(&self, record: T) -> Result<usize>;

    /// Appends the record produced by `build`, which sees the current
    /// collection, and returns it.
    async fn append_with(&self, build: RecordBuilder<T>) -> Result<T>;

    /// Applies `update` to the first record matching `matches` and persists
    /// the collection. Returns `None`, without writing, when nothing matches.
    async fn update_first(
        &self,
        matches: RecordPredicate<T>,
        update: RecordUpdate<T>,
    ) -> Result<Option<T>>;

    /// Replaces the whole collection.
    async fn save(&self, records: Vec<T>) -> Result<()>;

    async fn last(&self) -> Option<T> {
        self.load().await.pop()
    }

    async fn find_first(&self, matches: RecordPredicate<T>) -> Option<T> {
        self.load().await.into_iter().find(|r| matches(r))
    }
}
