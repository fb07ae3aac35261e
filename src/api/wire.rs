//! Typed wire records for the file manager endpoints.
//!
//! The IS serializes most scalars as strings and empty containers
//! inconsistently (`[]`, `{}`, `""`), so decoding is lenient here and
//! nothing untyped leaves this module.

use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Response of the directory query endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryResponse {
    /// Error message, present only on failure
    #[serde(rename = "chyba", default, deserialize_with = "opt_string")]
    pub error: Option<String>,
    /// Queried node; a single-element array on success
    #[serde(rename = "uzel", default)]
    pub nodes: Vec<RawNode>,
}

/// One filesystem entry as sent by the server.
#[derive(Debug, Clone, Deserialize)]
pub struct RawNode {
    #[serde(rename = "cesta", default, deserialize_with = "string")]
    pub path: String,
    #[serde(rename = "zkratka", default, deserialize_with = "string")]
    pub shortname: String,
    #[serde(rename = "nazev", default, deserialize_with = "opt_string")]
    pub name: Option<String>,
    #[serde(rename = "popis", default, deserialize_with = "opt_string")]
    pub annotation: Option<String>,
    #[serde(rename = "mam_precteno", default, deserialize_with = "number")]
    pub read: u64,
    #[serde(rename = "pocet_poduzlu", default, deserialize_with = "number")]
    pub child_count: u64,
    #[serde(rename = "zmenil_uco", default, deserialize_with = "opt_number")]
    pub changed_by: Option<u64>,
    #[serde(rename = "zmeneno", default, deserialize_with = "opt_string")]
    pub changed_at: Option<String>,
    #[serde(rename = "objekty", default)]
    pub objects: Nested<ObjectList>,
    #[serde(rename = "poduzly", default)]
    pub children: Nested<ChildList>,
}

impl RawNode {
    /// The stored object backing this node, if any.
    pub fn object(&self) -> Option<&RawObject> {
        match &self.objects {
            Nested::Present(list) => list.items.first(),
            Nested::Absent => None,
        }
    }

    /// Children expanded by the server (one level).
    pub fn children(&self) -> &[RawNode] {
        match &self.children {
            Nested::Present(list) => &list.items,
            Nested::Absent => &[],
        }
    }
}

/// Binary content metadata embedded in a file node.
#[derive(Debug, Clone, Deserialize)]
pub struct RawObject {
    #[serde(rename = "cesta", default, deserialize_with = "opt_string")]
    pub path: Option<String>,
    #[serde(rename = "jmeno_souboru", default, deserialize_with = "opt_string")]
    pub file_name: Option<String>,
    #[serde(rename = "mime_type", default, deserialize_with = "opt_string")]
    pub mime: Option<String>,
    #[serde(rename = "vlozil_uco", default, deserialize_with = "opt_number")]
    pub author: Option<u64>,
    #[serde(rename = "vlozeno", default, deserialize_with = "opt_string")]
    pub inserted_at: Option<String>,
    #[serde(rename = "objekt_id", default, deserialize_with = "opt_number")]
    pub object_id: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ObjectList {
    #[serde(rename = "objekt", default)]
    pub items: Vec<RawObject>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChildList {
    #[serde(rename = "poduzel", default)]
    pub items: Vec<RawNode>,
}

/// A container the server either fills or sends as an empty placeholder.
///
/// Only `null`, `""`, `[]` and `{}` count as absent; anything else must
/// decode as `T` or the whole record fails.
#[derive(Debug, Clone)]
pub enum Nested<T> {
    Present(T),
    Absent,
}

impl<T> Default for Nested<T> {
    fn default() -> Self {
        Nested::Absent
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Nested<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let empty = match &value {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            Value::Array(items) => items.is_empty(),
            Value::Object(fields) => fields.is_empty(),
            Value::Bool(_) | Value::Number(_) => false,
        };
        if empty {
            return Ok(Nested::Absent);
        }
        T::deserialize(value)
            .map(Nested::Present)
            .map_err(de::Error::custom)
    }
}

/// Response of the "open permissions" operation.
#[derive(Debug, Clone, Deserialize)]
pub struct PermissionView {
    /// Currently granted write-permission mode token
    #[serde(rename = "pravo_zapis", default, deserialize_with = "opt_string")]
    pub write_mode: Option<String>,
}

/// Response of operations whose body carries nothing beyond success.
#[derive(Debug, Clone, Deserialize)]
pub struct Ack {}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Int(u64),
    Float(f64),
    Bool(bool),
    Str(String),
}

fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Scalar>::deserialize(deserializer)? {
        None => None,
        Some(Scalar::Str(s)) => Some(s),
        Some(Scalar::Int(n)) => Some(n.to_string()),
        Some(Scalar::Float(f)) => Some(f.to_string()),
        Some(Scalar::Bool(b)) => Some(b.to_string()),
    })
}

fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_string(deserializer)?.unwrap_or_default())
}

fn opt_number<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Scalar>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Scalar::Int(n)) => Ok(Some(n)),
        Some(Scalar::Float(f)) if f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 => {
            Ok(Some(f as u64))
        }
        Some(Scalar::Float(f)) => Err(de::Error::custom(format!(
            "expected a non-negative integer, got {}",
            f
        ))),
        Some(Scalar::Bool(b)) => Ok(Some(b as u64)),
        Some(Scalar::Str(s)) if s.trim().is_empty() => Ok(None),
        Some(Scalar::Str(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("invalid number {:?}", s))),
    }
}

fn number<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_number(deserializer)?.unwrap_or(0))
}
