use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};
use crate::core::library::{LibraryError, LibraryResult};

pub const BACKUP_MARKER: &str = ".backup_";

// JsonStore reads and writes whole JSON documents inside one data directory.
#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    pub fn new(dir: &Path) -> LibraryResult<Self> {
        fs::create_dir_all(dir).map_err(|err| LibraryError::runtime(
            format!("failed to create data directory {} {}", dir.display(), err).as_str(),
            Some("dataDir".to_string())))?;
        Ok(JsonStore { dir: dir.to_path_buf() })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    pub fn backup_path(&self, file: &str, suffix: &str) -> PathBuf {
        self.dir.join(format!("{}{}{}", file, BACKUP_MARKER, suffix))
    }

    pub fn exists(&self, file: &str) -> bool {
        self.path(file).is_file()
    }

    // a missing file reads as None
    pub fn read(&self, file: &str) -> LibraryResult<Option<Value>> {
        let path = self.path(file);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no document on disk");
                return Ok(None);
            }
            Err(err) => {
                return Err(LibraryError::runtime(
                    format!("failed to open {} for reading {}", path.display(), err).as_str(), None));
            }
        };
        let value = serde_json::from_str(&text).map_err(|err| LibraryError::serialization(
            format!("JSON parse error in {} {}", path.display(), err).as_str()))?;
        Ok(Some(value))
    }

    // Writes through a sibling temporary file so readers never see a partial document.
    pub fn write<T: Serialize>(&self, file: &str, document: &T) -> LibraryResult<()> {
        let path = self.path(file);
        let tmp = self.dir.join(format!(".{}.tmp", file));
        let text = serde_json::to_string_pretty(document)?;
        fs::write(&tmp, text).map_err(|err| LibraryError::runtime(
            format!("failed to write {} {}", tmp.display(), err).as_str(), None))?;
        fs::rename(&tmp, &path).map_err(|err| LibraryError::runtime(
            format!("failed to replace {} {}", path.display(), err).as_str(), None))?;
        debug!(path = %path.display(), "wrote document");
        Ok(())
    }

    // copies file to its backup; false when there is nothing to back up
    pub fn backup(&self, file: &str, suffix: &str) -> LibraryResult<bool> {
        let source = self.path(file);
        if !source.is_file() {
            return Ok(false);
        }
        let target = self.backup_path(file, suffix);
        fs::copy(&source, &target).map_err(|err| LibraryError::runtime(
            format!("failed to backup file {} {}", source.display(), err).as_str(), None))?;
        info!(from = %source.display(), to = %target.display(), "backed up document");
        Ok(true)
    }

    // copies the backup over the live file; false when no such backup exists
    pub fn restore(&self, file: &str, suffix: &str) -> LibraryResult<bool> {
        let source = self.backup_path(file, suffix);
        if !source.is_file() {
            return Ok(false);
        }
        let target = self.path(file);
        let tmp = self.dir.join(format!(".{}.tmp", file));
        fs::copy(&source, &tmp).map_err(|err| LibraryError::runtime(
            format!("failed to restore file {} {}", target.display(), err).as_str(), None))?;
        fs::rename(&tmp, &target).map_err(|err| LibraryError::runtime(
            format!("failed to replace {} {}", target.display(), err).as_str(), None))?;
        info!(from = %source.display(), to = %target.display(), "restored document");
        Ok(true)
    }

    // Suffix of the most recently modified backup of file.
    pub fn latest_backup_suffix(&self, file: &str) -> LibraryResult<Option<String>> {
        let prefix = format!("{}{}", file, BACKUP_MARKER);
        let mut latest: Option<(SystemTime, String)> = None;
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().to_string();
            let suffix = match name.strip_prefix(prefix.as_str()) {
                Some(suffix) if !suffix.is_empty() => suffix.to_string(),
                _ => continue,
            };
            let modified = entry.metadata()?.modified()?;
            let newer = match &latest {
                Some((time, current)) => modified > *time || (modified == *time && suffix > *current),
                None => true,
            };
            if newer {
                latest = Some((modified, suffix));
            }
        }
        Ok(latest.map(|(_, suffix)| suffix))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use serde_json::json;
    use uuid::Uuid;
    use crate::core::library::LibraryError;
    use crate::persistence::json_store::JsonStore;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("lms_store_{}", Uuid::new_v4()))
    }

    #[test]
    fn test_should_write_and_read_documents() {
        let dir = temp_dir();
        let store = JsonStore::new(&dir).expect("should create store");
        assert_eq!(None, store.read("users.json").expect("should read missing file"));
        store.write("users.json", &json!({"type": "users"})).expect("should write");
        assert!(store.exists("users.json"));
        assert!(!dir.join(".users.json.tmp").exists());
        assert_eq!(Some(json!({"type": "users"})), store.read("users.json").expect("should read"));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_should_report_malformed_documents() {
        let dir = temp_dir();
        let store = JsonStore::new(&dir).expect("should create store");
        fs::write(store.path("loans.json"), "{ not json").expect("should write file");
        let err = store.read("loans.json").expect_err("should fail to parse");
        assert!(matches!(err, LibraryError::Serialization { .. }));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_should_backup_and_restore() {
        let dir = temp_dir();
        let store = JsonStore::new(&dir).expect("should create store");
        assert!(!store.backup("config.json", "one").expect("should skip missing file"));
        store.write("config.json", &json!({"v": 1})).expect("should write");
        assert!(store.backup("config.json", "one").expect("should backup"));
        store.write("config.json", &json!({"v": 2})).expect("should write");
        assert!(store.restore("config.json", "one").expect("should restore"));
        assert_eq!(Some(json!({"v": 1})), store.read("config.json").expect("should read"));
        assert!(!store.restore("config.json", "two").expect("should report missing backup"));
        assert_eq!(Some("one".to_string()), store.latest_backup_suffix("config.json").expect("should scan"));
        assert_eq!(None, store.latest_backup_suffix("users.json").expect("should scan"));
        let _ = fs::remove_dir_all(&dir);
    }
}
