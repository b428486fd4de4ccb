//! Read-only reference data (catalogs, FAQs, recipe maps).

use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Loads reference data once, falling back to `T::default()` when the file is
/// missing or cannot be parsed. Never fails.
pub fn load_reference<T: DeserializeOwned + Default>(path: &Path) -> T {
    if !path.exists() {
        warn!(path = %path.display(), "reference file not found, using empty dataset");
        return T::default();
    }

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read reference file");
            return T::default();
        }
    };

    match serde_json::from_str(&content) {
        Ok(data) => {
            info!(path = %path.display(), "loaded reference data");
            data
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to parse reference file");
            T::default()
        }
    }
}
