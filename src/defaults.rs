//! In-process default table: section → entry → value.
//!
//! The table is keyed by the *bare* section token of a lookup key. Keys
//! without a dot live under the empty section `""`, not under `DEFAULT`.

use std::collections::BTreeMap;

use serde::Serialize;
use toml::{Table, Value};

use crate::error::GetconfError;
use crate::types::KeyPath;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Defaults {
    sections: BTreeMap<String, BTreeMap<String, Value>>,
}

impl Defaults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `entry` in `section`. Use `""` for unsectioned keys.
    pub fn with<V: Into<Value>>(mut self, section: &str, entry: &str, value: V) -> Self {
        self.insert(section, entry, value);
        self
    }

    /// Add a value by lookup key: `"db.host"` goes to section `db`, `"debug"`
    /// to section `""`.
    pub fn with_key<V: Into<Value>>(self, key: &str, value: V) -> Self {
        let path = KeyPath::parse(key);
        self.with(path.section, path.entry, value)
    }

    pub fn insert<V: Into<Value>>(&mut self, section: &str, entry: &str, value: V) {
        self.sections
            .entry(section.to_string())
            .or_default()
            .insert(entry.to_string(), value.into());
    }

    /// Build from a TOML table.
    ///
    /// Top-level tables become sections; every other top-level value goes to
    /// the `""` section. A table inside a section is rejected.
    pub fn from_table(table: Table) -> Result<Self, GetconfError> {
        let mut defaults = Self::new();
        for (key, value) in table {
            match value {
                Value::Table(entries) => {
                    for (entry, value) in entries {
                        if value.is_table() {
                            return Err(GetconfError::InvalidDefault {
                                key: format!("{key}.{entry}"),
                                reason: "default tables are two levels deep; found a nested table"
                                    .into(),
                            });
                        }
                        defaults.insert(&key, &entry, value);
                    }
                    // Keep empty sections visible.
                    defaults.sections.entry(key).or_default();
                }
                other => defaults.insert("", &key, other),
            }
        }
        Ok(defaults)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, GetconfError> {
        let table: Table = toml::from_str(content)?;
        Self::from_table(table)
    }

    /// Build from anything that serializes to a map, such as a struct with
    /// one field per section or a nested `HashMap`.
    pub fn from_serialize<S: Serialize>(source: &S) -> Result<Self, GetconfError> {
        match Value::try_from(source)? {
            Value::Table(table) => Self::from_table(table),
            other => Err(GetconfError::InvalidDefault {
                key: "<defaults>".into(),
                reason: format!("expected a map of sections, found {}", other.type_str()),
            }),
        }
    }

    pub fn get(&self, section: &str, entry: &str) -> Option<&Value> {
        self.sections.get(section)?.get(entry)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
