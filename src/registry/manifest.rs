//! Registry manifest types.
//!
//! Only the fields the gateway reads are modelled; everything else in a
//! packument is ignored during deserialization. Fields that carry an
//! unexpected JSON type deserialize as absent so one odd version cannot
//! make a whole package unreadable.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};

/// Full registry metadata for a package.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    #[serde(rename = "dist-tags", default)]
    pub dist_tags: HashMap<String, String>,

    #[serde(default)]
    pub versions: HashMap<String, VersionManifest>,
}

impl Manifest {
    /// Version the `latest` dist-tag points at.
    pub fn latest(&self) -> Option<&str> {
        self.dist_tags.get("latest").map(String::as_str)
    }

    /// Published manifest for an exact version string.
    pub fn version(&self, version: &str) -> Option<&VersionManifest> {
        self.versions.get(version)
    }
}

/// The package.json of one published version.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct VersionManifest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub jsdelivr: Option<String>,

    #[serde(default)]
    pub exports: Option<Exports>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub main: Option<String>,
}

/// The `exports` field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Exports {
    /// `"exports": "./index.js"`
    Path(String),
    /// `"exports": { ".": ..., "./sub": ... }` or a bare conditions object.
    Map(BTreeMap<String, ExportTarget>),
    /// Arrays and other shapes the gateway does not interpret.
    Other(Value),
}

impl Exports {
    /// The target of the `"."` subpath, if the exports field is a map with one.
    pub fn root(&self) -> Option<&ExportTarget> {
        match self {
            Exports::Map(map) => map.get("."),
            _ => None,
        }
    }
}

/// The value of one `exports` subpath.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ExportTarget {
    Path(String),
    Conditions(Map<String, Value>),
    Other(Value),
}

impl ExportTarget {
    /// The `default` condition, when it is a plain path.
    pub fn default_condition(&self) -> Option<&str> {
        match self {
            ExportTarget::Conditions(conditions) => conditions.get("default").and_then(Value::as_str),
            _ => None,
        }
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}
