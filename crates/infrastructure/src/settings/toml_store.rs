use async_trait::async_trait;
use idle_reaper_application::ports::SettingsStore;
use idle_reaper_domain::{DomainError, SettingsPatch, StoredSettings};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;

const INACTIVE_TIME_KEY: &str = "inactiveTime";
const LEGACY_INACTIVE_TIME_KEY: &str = "inactive_time";
const WHITELIST_KEY: &str = "whitelist";

/// Settings persisted as a small TOML document.
///
/// Writes go through `toml_edit` so comments and unrelated keys in the file
/// survive a save.
pub struct TomlSettingsStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl TomlSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_contents(&self) -> Result<Option<String>, DomainError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DomainError::StorageError(format!(
                "Failed to read {}: {}",
                self.path.display(),
                e
            ))),
        }
    }
}

#[async_trait]
impl SettingsStore for TomlSettingsStore {
    async fn load(&self) -> Result<StoredSettings, DomainError> {
        let Some(contents) = self.read_contents().await? else {
            debug!(path = %self.path.display(), "Settings file missing; using defaults");
            return Ok(StoredSettings::default());
        };

        toml::from_str(&contents).map_err(|e| {
            DomainError::StorageError(format!("Failed to parse {}: {}", self.path.display(), e))
        })
    }

    async fn save(&self, patch: &SettingsPatch) -> Result<(), DomainError> {
        let _guard = self.write_lock.lock().await;

        let existing = self.read_contents().await?.unwrap_or_default();
        let mut doc = existing.parse::<toml_edit::DocumentMut>().map_err(|e| {
            DomainError::StorageError(format!("Failed to parse {}: {}", self.path.display(), e))
        })?;

        if let Some(minutes) = patch.inactive_time {
            // Both spellings deserialize into the same field.
            doc.as_table_mut().remove(LEGACY_INACTIVE_TIME_KEY);
            set_val(
                doc.as_table_mut(),
                INACTIVE_TIME_KEY,
                toml_edit::Value::from(i64::from(minutes)),
            );
        }
        if let Some(entries) = &patch.whitelist {
            set_val(doc.as_table_mut(), WHITELIST_KEY, str_array(entries));
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                DomainError::StorageError(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        let tmp_path = self.path.with_extension("toml.tmp");
        tokio::fs::write(&tmp_path, doc.to_string())
            .await
            .map_err(|e| {
                DomainError::StorageError(format!("Failed to write {}: {}", tmp_path.display(), e))
            })?;
        tokio::fs::rename(&tmp_path, &self.path).await.map_err(|e| {
            DomainError::StorageError(format!("Failed to replace {}: {}", self.path.display(), e))
        })?;

        debug!(path = %self.path.display(), "Settings written");
        Ok(())
    }
}

fn set_val(table: &mut toml_edit::Table, key: &str, new_val: toml_edit::Value) {
    match table.get_mut(key) {
        Some(item @ toml_edit::Item::Value(_)) => {
            let suffix = item.as_value().and_then(|v| v.decor().suffix()).cloned();
            *item = toml_edit::Item::Value(new_val);
            if let (Some(s), Some(v)) = (suffix, item.as_value_mut()) {
                v.decor_mut().set_suffix(s);
            }
        }
        Some(item) => *item = toml_edit::Item::Value(new_val),
        None => {
            table.insert(key, toml_edit::Item::Value(new_val));
        }
    }
}

fn str_array(values: &[String]) -> toml_edit::Value {
    let mut arr = toml_edit::Array::new();
    for v in values {
        arr.push(v.as_str());
    }
    toml_edit::Value::Array(arr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_val_preserves_trailing_comment() {
        let mut doc = "inactiveTime = 30 # minutes\n"
            .parse::<toml_edit::DocumentMut>()
            .unwrap();

        set_val(doc.as_table_mut(), INACTIVE_TIME_KEY, toml_edit::Value::from(5i64));

        let rendered = doc.to_string();
        assert!(rendered.contains("inactiveTime = 5"));
        assert!(rendered.contains("# minutes"));
    }

    #[test]
    fn test_legacy_key_is_replaced() {
        let mut doc = "inactive_time = 10\n"
            .parse::<toml_edit::DocumentMut>()
            .unwrap();

        doc.as_table_mut().remove(LEGACY_INACTIVE_TIME_KEY);
        set_val(doc.as_table_mut(), INACTIVE_TIME_KEY, toml_edit::Value::from(5i64));

        let stored: StoredSettings = toml::from_str(&doc.to_string()).unwrap();
        assert_eq!(stored.inactive_time, Some(5));
    }

    #[test]
    fn test_str_array() {
        let value = str_array(&["a.example".to_string(), "b.example".to_string()]);
        assert_eq!(value.as_array().unwrap().len(), 2);
    }
}
