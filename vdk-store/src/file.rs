//! Synchronous record-file primitives.
//!
//! A record file is a JSON array. Writes go to a sibling temp file that is
//! fsynced and renamed over the target, and every read-modify-write holds an
//! exclusive advisory lock on `<file>.lock` for its whole duration.

use serde::{Serialize, de::DeserializeOwned};
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};
use tracing::{error, warn};
use vdk_core::{Result, VdkError};

/// Reads a record file strictly.
///
/// - missing or blank file: `Ok(vec![])`
/// - unreadable, malformed, or not an array: `Err`
pub fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    let value: serde_json::Value = serde_json::from_str(&content)?;
    if !value.is_array() {
        return Err(VdkError::Storage(format!("{} does not hold a JSON array", path.display())));
    }
    Ok(serde_json::from_value(value)?)
}

/// Reads a record file, degrading every failure to an empty list.
pub fn load_records<T: DeserializeOwned>(path: &Path) -> Vec<T> {
    match read_records(path) {
        Ok(records) => records,
        Err(e) => {
            error!(path = %path.display(), error = %e, "failed to read record file");
            Vec::new()
        }
    }
}

/// Overwrites `path` with `records` via temp file + fsync + rename.
pub fn write_records_atomic<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_string_pretty(records)?;

    let tmp_path = temp_path(path)?;
    let mut tmp_file = File::create(&tmp_path)?;
    tmp_file.write_all(json.as_bytes())?;
    tmp_file.write_all(b"\n")?;
    tmp_file.sync_all()?;
    drop(tmp_file);

    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }
    Ok(())
}

/// Runs `f` over the current records under the file lock and writes the
/// result back when `f` asks for it.
///
/// `f` returns `(write_back, output)`. A corrupt file is reported as an error
/// and left untouched rather than being replaced by a fresh list.
pub fn modify_records<T, R, F>(path: &Path, f: F) -> Result<R>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce(&mut Vec<T>) -> Result<(bool, R)>,
{
    let _lock = FileLock::acquire(path)?;

    let mut records: Vec<T> = read_records(path).map_err(|e| {
        warn!(path = %path.display(), error = %e, "refusing to rewrite unreadable record file");
        e
    })?;

    let (write_back, output) = f(&mut records)?;
    if write_back {
        write_records_atomic(path, &records)?;
    }
    Ok(output)
}

fn temp_path(path: &Path) -> Result<PathBuf> {
    let file_name = path.file_name().ok_or_else(|| {
        VdkError::Io(std::io::Error::new(std::io::ErrorKind::InvalidInput, "Path has no file name"))
    })?;
    let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
    Ok(match path.parent() {
        Some(parent) => parent.join(tmp_name),
        None => PathBuf::from(tmp_name),
    })
}

/// Exclusive advisory lock held for the life of the guard.
struct FileLock {
    file: File,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self> {
        let lock_path = lock_path(path);

        if let Some(parent) = lock_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new().write(true).create(true).truncate(false).open(&lock_path)?;

        fs2::FileExt::lock_exclusive(&file)
            .map_err(|e| VdkError::Storage(format!("Failed to acquire lock: {}", e)))?;

        Ok(FileLock { file })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = fs2::FileExt::unlock(&self.file);
    }
}

fn lock_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".lock");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn test_lock_path_keeps_extension() {
        assert_eq!(lock_path(Path::new("out/leads.json")), PathBuf::from("out/leads.json.lock"));
    }

    #[test]
    fn test_temp_path_is_hidden_sibling() {
        assert_eq!(
            temp_path(Path::new("out/leads.json")).unwrap(),
            PathBuf::from("out/.leads.json.tmp")
        );
    }

    #[test]
    fn test_read_missing_and_blank() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("none.json");
        assert!(read_records::<Value>(&path).unwrap().is_empty());

        fs::write(&path, "   \n").unwrap();
        assert!(read_records::<Value>(&path).unwrap().is_empty());
    }

    #[test]
    fn test_read_rejects_object_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("order.json");
        fs::write(&path, r#"{"drinkType": "latte"}"#).unwrap();

        assert!(read_records::<Value>(&path).is_err());
        assert!(load_records::<Value>(&path).is_empty());
    }

    #[test]
    fn test_modify_without_write_back_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cases.json");

        let found =
            modify_records::<Value, _, _>(&path, |records| Ok((false, records.len()))).unwrap();
        assert_eq!(found, 0);
        assert!(!path.exists());
    }

    #[test]
    fn test_modify_refuses_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leads.json");
        fs::write(&path, "[{broken").unwrap();

        let result = modify_records::<Value, _, _>(&path, |records| {
            records.push(json!({"name": "x"}));
            Ok((true, ()))
        });
        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "[{broken");
    }
}
