//! Configuration properties
//!
//! Properties are flat `dotted.key -> string` pairs. They can be built from
//! `key=value` entries or from a TOML file whose nested tables are flattened
//! into dotted keys:
//!
//! ```toml
//! [management.health.graph]
//! enabled = false
//! ```
//!
//! yields `management.health.graph.enabled = "false"`.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PropertyError, PropertyResult};

/// Ordered property map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Properties {
    values: BTreeMap<String, String>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `key=value` entries.
    pub fn from_pairs<I, S>(pairs: I) -> PropertyResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut properties = Self::new();
        properties.extend_pairs(pairs)?;
        Ok(properties)
    }

    /// Merge `key=value` entries, later entries override earlier ones.
    pub fn extend_pairs<I, S>(&mut self, pairs: I) -> PropertyResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for pair in pairs {
            let pair = pair.as_ref();
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| PropertyError::MalformedPair(pair.to_string()))?;
            let key = key.trim();
            if key.is_empty() {
                return Err(PropertyError::MalformedPair(pair.to_string()));
            }
            self.set(key, value.trim());
        }
        Ok(())
    }

    /// Parse a TOML document, flattening nested tables into dotted keys.
    pub fn from_toml_str(contents: &str) -> PropertyResult<Self> {
        let table: toml::Table = contents.parse()?;
        let mut properties = Self::new();
        flatten_table(&mut properties, None, &table)?;
        Ok(properties)
    }

    /// Load a TOML properties file. A missing file yields empty properties.
    pub fn load(path: impl AsRef<Path>) -> PropertyResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "No properties file, using defaults");
            return Ok(Self::new());
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Read a boolean property, ignoring case and surrounding whitespace.
    ///
    /// `true`, `on`, `yes` and `1` read as true; `false`, `off`, `no` and `0`
    /// read as false.
    pub fn get_bool(&self, key: &str) -> PropertyResult<Option<bool>> {
        match self.get(key) {
            None => Ok(None),
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "true" | "on" | "yes" | "1" => Ok(Some(true)),
                "false" | "off" | "no" | "0" => Ok(Some(false)),
                _ => Err(PropertyError::InvalidBoolean {
                    key: key.to_string(),
                    value: raw.to_string(),
                }),
            },
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn flatten_table(
    properties: &mut Properties,
    prefix: Option<&str>,
    table: &toml::Table,
) -> PropertyResult<()> {
    for (name, value) in table {
        let key = match prefix {
            Some(prefix) => format!("{}.{}", prefix, name),
            None => name.clone(),
        };
        match value {
            toml::Value::Table(nested) => flatten_table(properties, Some(&key), nested)?,
            toml::Value::Array(_) => return Err(PropertyError::UnsupportedValue(key)),
            toml::Value::String(s) => properties.set(key, s.clone()),
            other => properties.set(key, other.to_string()),
        }
    }
    Ok(())
}
