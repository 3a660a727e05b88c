//! Settings store adapter.
//!
//! The host CMS owns persistence: a flat key/value bag per namespace, where
//! every value is stored with a declared type. This module only defines the
//! interface the engine needs ([`SettingsStore`]) and a [`Namespace`] handle
//! that is passed explicitly to every operation, so no code reaches for a
//! process-wide settings singleton.
//!
//! Two implementations are provided:
//!
//! - [`MemoryStore`]: an in-process map, used by tests and when embedding.
//! - [`FileStore`]: the same map persisted as a JSON file after every write,
//!   used by the command-line front end.
//!
//! ```text
//! {
//!   "originemini": {
//!     "global_page_width": { "type": "integer", "value": 35, "label": "…" },
//!     "styles":            { "type": "string",  "value": ":root{…}", "label": "…" }
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("setting '{id}' declared as {declared} but the value is {actual}")]
    TypeMismatch {
        id: String,
        declared: DeclaredType,
        actual: DeclaredType,
    },
}

/// Storage types understood by the host store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclaredType {
    Boolean,
    Integer,
    String,
    Array,
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DeclaredType::Boolean => "boolean",
            DeclaredType::Integer => "integer",
            DeclaredType::String => "string",
            DeclaredType::Array => "array",
        };
        f.write_str(name)
    }
}

/// A stored setting value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Boolean(bool),
    Integer(i64),
    String(String),
    Array(BTreeMap<String, SettingValue>),
}

impl SettingValue {
    pub fn declared_type(&self) -> DeclaredType {
        match self {
            SettingValue::Boolean(_) => DeclaredType::Boolean,
            SettingValue::Integer(_) => DeclaredType::Integer,
            SettingValue::String(_) => DeclaredType::String,
            SettingValue::Array(_) => DeclaredType::Array,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            SettingValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SettingValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&BTreeMap<String, SettingValue>> {
        match self {
            SettingValue::Array(map) => Some(map),
            _ => None,
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Boolean(b) => write!(f, "{b}"),
            SettingValue::Integer(n) => write!(f, "{n}"),
            SettingValue::String(s) => write!(f, "{s:?}"),
            SettingValue::Array(map) => {
                f.write_str("{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

/// Key/value persistence with typed namespaces, owned by the host.
pub trait SettingsStore {
    /// Current value of `id`, or `None` when nothing is stored.
    fn get(&self, namespace: &str, id: &str) -> Result<Option<SettingValue>, StoreError>;

    /// Store `value` under `id`, creating the namespace and the entry if needed.
    fn put(
        &mut self,
        namespace: &str,
        id: &str,
        value: SettingValue,
        declared: DeclaredType,
        label: &str,
    ) -> Result<(), StoreError>;

    /// Remove `id`. Removing a missing entry is not an error.
    fn remove(&mut self, namespace: &str, id: &str) -> Result<(), StoreError>;
}

/// A settings store bound to one namespace.
pub struct Namespace<'a, S: SettingsStore + ?Sized> {
    store: &'a mut S,
    name: String,
}

impl<'a, S: SettingsStore + ?Sized> Namespace<'a, S> {
    pub fn new(store: &'a mut S, name: impl Into<String>) -> Self {
        Self {
            store,
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, id: &str) -> Result<Option<SettingValue>, StoreError> {
        self.store.get(&self.name, id)
    }

    pub fn put(
        &mut self,
        id: &str,
        value: SettingValue,
        declared: DeclaredType,
        label: &str,
    ) -> Result<(), StoreError> {
        self.store.put(&self.name, id, value, declared, label)
    }

    pub fn remove(&mut self, id: &str) -> Result<(), StoreError> {
        self.store.remove(&self.name, id)
    }
}

fn check_declared(
    id: &str,
    value: &SettingValue,
    declared: DeclaredType,
) -> Result<(), StoreError> {
    let actual = value.declared_type();
    if actual == declared {
        Ok(())
    } else {
        Err(StoreError::TypeMismatch {
            id: id.to_string(),
            declared,
            actual,
        })
    }
}

/// A stored entry: value plus the metadata the host keeps beside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSetting {
    #[serde(rename = "type")]
    pub declared: DeclaredType,
    pub value: SettingValue,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub label: String,
}

/// In-memory store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryStore {
    namespaces: BTreeMap<String, BTreeMap<String, StoredSetting>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All entries of a namespace, sorted by id.
    pub fn entries(&self, namespace: &str) -> impl Iterator<Item = (&str, &StoredSetting)> {
        self.namespaces
            .get(namespace)
            .into_iter()
            .flat_map(|entries| entries.iter().map(|(id, s)| (id.as_str(), s)))
    }

    /// Stored ids of a namespace, sorted.
    pub fn ids(&self, namespace: &str) -> Vec<&str> {
        self.entries(namespace).map(|(id, _)| id).collect()
    }

    pub fn entry(&self, namespace: &str, id: &str) -> Option<&StoredSetting> {
        self.namespaces.get(namespace).and_then(|e| e.get(id))
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self, namespace: &str, id: &str) -> Result<Option<SettingValue>, StoreError> {
        Ok(self.entry(namespace, id).map(|s| s.value.clone()))
    }

    fn put(
        &mut self,
        namespace: &str,
        id: &str,
        value: SettingValue,
        declared: DeclaredType,
        label: &str,
    ) -> Result<(), StoreError> {
        check_declared(id, &value, declared)?;
        self.namespaces.entry(namespace.to_string()).or_default().insert(
            id.to_string(),
            StoredSetting {
                declared,
                value,
                label: label.to_string(),
            },
        );
        Ok(())
    }

    fn remove(&mut self, namespace: &str, id: &str) -> Result<(), StoreError> {
        if let Some(entries) = self.namespaces.get_mut(namespace) {
            entries.remove(id);
            if entries.is_empty() {
                self.namespaces.remove(namespace);
            }
        }
        Ok(())
    }
}

/// JSON file-backed store. Every mutation rewrites the file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    data: MemoryStore,
}

impl FileStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let data = if path.exists() {
            let content = fs::read_to_string(path)?;
            serde_json::from_str(&content)?
        } else {
            MemoryStore::new()
        };
        Ok(Self {
            path: path.to_path_buf(),
            data,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read-only view of the loaded data.
    pub fn data(&self) -> &MemoryStore {
        &self.data
    }

    fn flush(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.data)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl SettingsStore for FileStore {
    fn get(&self, namespace: &str, id: &str) -> Result<Option<SettingValue>, StoreError> {
        self.data.get(namespace, id)
    }

    fn put(
        &mut self,
        namespace: &str,
        id: &str,
        value: SettingValue,
        declared: DeclaredType,
        label: &str,
    ) -> Result<(), StoreError> {
        self.data.put(namespace, id, value, declared, label)?;
        self.flush()
    }

    fn remove(&mut self, namespace: &str, id: &str) -> Result<(), StoreError> {
        if self.data.entry(namespace, id).is_none() {
            return Ok(());
        }
        self.data.remove(namespace, id)?;
        self.flush()
    }
}
