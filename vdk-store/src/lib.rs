//! # vdk-store
//!
//! Persistence for VDK tools.
//!
//! - [`RecordStore`] - Ordered record collection with whole-collection read-modify-write
//! - [`JsonFileStore`] - JSON array file, atomic rewrite, per-path and cross-process locking
//! - [`InMemoryStore`] - Process-local store for tests and throwaway sessions
//! - [`load_reference`] - Forgiving loader for read-only reference data

pub mod file;
pub mod inmemory;
pub mod json_file;
pub mod reference;
pub mod service;

pub use file::{load_records, read_records, write_records_atomic};
pub use inmemory::InMemoryStore;
pub use json_file::JsonFileStore;
pub use reference::load_reference;
pub use service::{Record, RecordBuilder, RecordPredicate, RecordStore, RecordUpdate};
