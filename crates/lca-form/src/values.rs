//! Entered field values for one wizard session.

use crate::schema::CategorySchema;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Field identifier -> entered text. An empty string means "not filled".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldValues(#[serde(deserialize_with = "text_map")] BTreeMap<String, String>);

/// Documents may hold numbers or booleans where the form holds text.
///
/// Integers keep their exact digits. Decimals are rendered in shortest
/// round-trip form, so `1.50` reads as `1.5`; quote a value to keep its text.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawValue {
    Text(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    Null(()),
}

impl RawValue {
    fn into_text(self) -> String {
        match self {
            RawValue::Text(s) => s,
            RawValue::Int(i) => i.to_string(),
            RawValue::UInt(u) => u.to_string(),
            RawValue::Float(f) => f.to_string(),
            RawValue::Bool(b) => b.to_string(),
            RawValue::Null(()) => String::new(),
        }
    }
}

fn is_blank_char(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

fn text_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, RawValue>::deserialize(deserializer)?;
    Ok(raw.into_iter().map(|(k, v)| (k, v.into_text())).collect())
}

impl FieldValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Template with every field of `schema` present and blank.
    pub fn blank_for(schema: &CategorySchema) -> Self {
        schema
            .all_fields()
            .into_iter()
            .map(|f| (f, String::new()))
            .collect()
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Missing and whitespace-only values both count as blank. A byte order
    /// mark counts as whitespace.
    pub fn is_blank(&self, field: &str) -> bool {
        self.get(field).is_none_or(|v| v.trim_matches(is_blank_char).is_empty())
    }

    /// Schema fields with no key at all in this map.
    pub fn missing_keys<'a>(&self, schema: &'a CategorySchema) -> Vec<&'a str> {
        schema
            .all_fields()
            .into_iter()
            .filter(|f| !self.0.contains_key(*f))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
