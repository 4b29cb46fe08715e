use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::Result;
use crate::model::Theme;

/// Storage key of the dark-mode flag.
pub const DARK_MODE_KEY: &str = "dark-mode";

/// Client-local string key/value storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Store kept in memory only.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Store persisted as a JSON object of strings.
///
/// A missing or unparsable file reads as an empty store; every `set`
/// rewrites the file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(values) => Ok(values),
                Err(e) => {
                    warn!(
                        path = %self.path.display(),
                        error = %e,
                        "discarding malformed preference file"
                    );
                    Ok(BTreeMap::new())
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut values = self.load()?;
        values.insert(key.to_owned(), value.to_owned());
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&values)?)?;
        debug!(path = %self.path.display(), key, "saved preference");
        Ok(())
    }
}

/// The persisted dark-mode flag.
pub struct DarkModePreference<S> {
    store: S,
}

impl<S: KeyValueStore> DarkModePreference<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Read the flag; anything other than `"true"` counts as off.
    pub fn load(&self) -> Result<bool> {
        let value = self.store.get(DARK_MODE_KEY)?;
        if let Some(other) = value.as_deref().filter(|v| *v != "true" && *v != "false") {
            warn!(value = other, "ignoring unrecognised dark-mode value");
        }
        Ok(value.as_deref() == Some("true"))
    }

    pub fn set(&mut self, enabled: bool) -> Result<()> {
        self.store.set(DARK_MODE_KEY, if enabled { "true" } else { "false" })
    }

    /// Flip and persist the flag, returning the new value.
    pub fn toggle(&mut self) -> Result<bool> {
        let enabled = !self.load()?;
        self.set(enabled)?;
        Ok(enabled)
    }

    pub fn theme(&self) -> Result<Theme> {
        Ok(Theme::from_dark_mode(self.load()?))
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("matchday-prefs-{}-{name}", std::process::id()))
            .join("prefs.json")
    }

    #[test]
    fn test_defaults_to_light() {
        let prefs = DarkModePreference::new(MemoryStore::new());
        assert!(!prefs.load().unwrap());
        assert_eq!(prefs.theme().unwrap(), Theme::Light);
    }

    #[test]
    fn test_toggle_twice_restores_original() {
        let mut store = MemoryStore::new();
        store.set(DARK_MODE_KEY, "true").unwrap();
        let mut prefs = DarkModePreference::new(store);

        assert!(!prefs.toggle().unwrap());
        assert!(prefs.toggle().unwrap());
        assert_eq!(
            prefs.into_store().get(DARK_MODE_KEY).unwrap().as_deref(),
            Some("true")
        );
    }

    #[test]
    fn test_garbage_value_reads_as_off() {
        let mut store = MemoryStore::new();
        store.set(DARK_MODE_KEY, "yes please").unwrap();
        let prefs = DarkModePreference::new(store);
        assert!(!prefs.load().unwrap());
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let path = temp_path("persist");
        let _ = fs::remove_file(&path);

        let mut prefs = DarkModePreference::new(JsonFileStore::new(&path));
        assert!(prefs.toggle().unwrap());

        let reopened = DarkModePreference::new(JsonFileStore::new(&path));
        assert!(reopened.load().unwrap());
        assert_eq!(reopened.theme().unwrap(), Theme::Dark);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_file_store_recovers_from_malformed_file() {
        let path = temp_path("malformed");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{not json").unwrap();

        let mut prefs = DarkModePreference::new(JsonFileStore::new(&path));
        assert!(!prefs.load().unwrap());
        assert!(prefs.toggle().unwrap());

        let reopened = DarkModePreference::new(JsonFileStore::new(&path));
        assert!(reopened.load().unwrap());
        let raw = fs::read_to_string(&path).unwrap();
        assert!(serde_json::from_str::<BTreeMap<String, String>>(&raw).is_ok());

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
