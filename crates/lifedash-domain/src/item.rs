//! Image-backed items and their schema-governed metadata bag.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::{common::*, field::*};

/// Lowest accepted rank value.
pub const MIN_RANK: u8 = 1;
/// Highest accepted rank value.
pub const MAX_RANK: u8 = 100;
/// Sort position used for items without a rank.
pub const UNRANKED_SORT_KEY: u32 = 999;

/// An image-backed record inside a generic category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Item {
    pub id: Uuid,
    pub category_id: Uuid,
    pub name: String,
    pub image_url: String,
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<u8>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Item {
    pub fn new(
        category_id: Uuid,
        name: impl Into<String>,
        image_url: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            category_id,
            name: name.into(),
            image_url: image_url.into(),
            metadata: Metadata::default(),
            rank: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_rank(mut self, rank: Option<u8>) -> Self {
        self.rank = rank;
        self
    }

    pub fn rank_sort_key(&self) -> u32 {
        self.rank.map(u32::from).unwrap_or(UNRANKED_SORT_KEY)
    }
}

impl Identifiable for Item {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Timestamped for Item {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

/// Open key/value bag whose meaningful keys are set by the category schema.
///
/// Raw values are kept as stored; typed reads go through [`Metadata::get`],
/// which coerces by the field's kind. Keys outside the schema stay inert until
/// [`Metadata::retain_schema`] drops them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Metadata(BTreeMap<String, Value>);

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &FieldDescriptor) -> Option<FieldValue> {
        self.0
            .get(field.key)
            .and_then(|raw| FieldValue::coerce(field, raw))
    }

    pub fn raw(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Merges a single edited key; `None` clears it.
    pub fn apply(&mut self, key: &str, value: Option<FieldValue>) {
        match value {
            Some(value) => {
                self.0.insert(key.to_string(), value.to_json());
            }
            None => {
                self.0.remove(key);
            }
        }
    }

    pub fn insert_raw(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    /// Keys that no field in `fields` declares.
    pub fn unknown_keys(&self, fields: &[FieldDescriptor]) -> Vec<String> {
        self.0
            .keys()
            .filter(|key| !fields.iter().any(|field| field.key == key.as_str()))
            .cloned()
            .collect()
    }

    /// Drops undeclared keys and values that do not coerce to their field's kind.
    pub fn retain_schema(&mut self, fields: &[FieldDescriptor]) {
        self.0.retain(|key, raw| {
            fields
                .iter()
                .find(|field| field.key == key.as_str())
                .is_some_and(|field| FieldValue::coerce(field, raw).is_some())
        });
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

impl FromIterator<(String, Value)> for Metadata {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const YEAR: FieldDescriptor = FieldDescriptor::new("year", "Year", FieldKind::Number);
    const RATING: FieldDescriptor = FieldDescriptor::new("rating", "Rating", FieldKind::Rating);

    #[test]
    fn apply_sets_and_clears_keys() {
        let mut metadata = Metadata::new();
        metadata.apply("year", Some(FieldValue::Number(2010.0)));
        assert_eq!(metadata.get(&YEAR), Some(FieldValue::Number(2010.0)));
        metadata.apply("year", None);
        assert!(metadata.is_empty());
    }

    #[test]
    fn retain_schema_drops_unknown_and_malformed_keys() {
        let mut metadata: Metadata = [
            ("year".to_string(), json!(2010)),
            ("rating".to_string(), json!("great")),
            ("themes".to_string(), json!(["heist", "dreams"])),
        ]
        .into_iter()
        .collect();
        assert_eq!(metadata.unknown_keys(&[YEAR, RATING]), vec!["themes"]);

        metadata.retain_schema(&[YEAR, RATING]);
        assert_eq!(metadata.len(), 1);
        assert!(metadata.raw("year").is_some());
    }

    #[test]
    fn unranked_items_sort_after_ranked_ones() {
        let now = Utc::now();
        let ranked = Item::new(Uuid::new_v4(), "Heat", "x", now).with_rank(Some(100));
        let unranked = Item::new(Uuid::new_v4(), "Inception", "y", now);
        assert!(ranked.rank_sort_key() < unranked.rank_sort_key());
    }
}
