//! Typed field descriptors and values for schema-driven item metadata.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;

/// Highest star count a rating field accepts.
pub const MAX_RATING: u8 = 5;
/// Slider granularity for percentage fields.
pub const PERCENT_STEP: u8 = 5;

/// Value kind of a schema field; fully determines the control and coercion.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Number,
    #[serde(rename = "textarea")]
    LongText,
    Select,
    Date,
    Rating,
    #[serde(rename = "progress")]
    Percentage,
    #[serde(rename = "checkbox")]
    Boolean,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FieldKind::Text => "text",
            FieldKind::Number => "number",
            FieldKind::LongText => "textarea",
            FieldKind::Select => "select",
            FieldKind::Date => "date",
            FieldKind::Rating => "rating",
            FieldKind::Percentage => "progress",
            FieldKind::Boolean => "checkbox",
        };
        f.write_str(label)
    }
}

/// One entry of a category schema. Built as compile-time constants.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    pub options: &'static [&'static str],
}

impl FieldDescriptor {
    pub const fn new(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            label,
            kind,
            options: &[],
        }
    }

    pub const fn select(
        key: &'static str,
        label: &'static str,
        options: &'static [&'static str],
    ) -> Self {
        Self {
            key,
            label,
            kind: FieldKind::Select,
            options,
        }
    }

    pub fn has_option(&self, candidate: &str) -> bool {
        self.options.iter().any(|option| *option == candidate)
    }

    /// Display form of an option tag: first letter upper-cased, first `_` as a space.
    pub fn option_label(option: &str) -> String {
        let mut chars = option.chars();
        let Some(first) = chars.next() else {
            return String::new();
        };
        let rest: String = chars.collect();
        format!("{}{}", first.to_uppercase(), rest.replacen('_', " ", 1))
    }
}

/// A metadata value already coerced to its field's kind.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Choice(String),
    Date(NaiveDate),
    Rating(u8),
    Percent(u8),
    Flag(bool),
}

impl FieldValue {
    /// Coerces a raw stored value according to `field`, returning `None` when
    /// the value is absent, empty, or unusable for that kind.
    pub fn coerce(field: &FieldDescriptor, raw: &Value) -> Option<FieldValue> {
        match field.kind {
            FieldKind::Text | FieldKind::LongText => text_of(raw).map(FieldValue::Text),
            FieldKind::Number => number_of(raw).map(FieldValue::Number),
            FieldKind::Select => raw
                .as_str()
                .filter(|option| field.has_option(option))
                .map(|option| FieldValue::Choice(option.to_string())),
            FieldKind::Date => raw.as_str().and_then(parse_date).map(FieldValue::Date),
            FieldKind::Rating => number_of(raw)
                .filter(|value| *value > 0.0)
                .map(|value| FieldValue::Rating(clamp_rating(value))),
            FieldKind::Percentage => {
                number_of(raw).map(|value| FieldValue::Percent(snap_percent(value)))
            }
            FieldKind::Boolean => match raw {
                Value::Bool(flag) => Some(FieldValue::Flag(*flag)),
                _ => None,
            },
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Text(text) | FieldValue::Choice(text) => Value::String(text.clone()),
            FieldValue::Number(number) => serde_json::Number::from_f64(*number)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            FieldValue::Date(date) => Value::String(date.format("%Y-%m-%d").to_string()),
            FieldValue::Rating(stars) => Value::from(*stars),
            FieldValue::Percent(percent) => Value::from(*percent),
            FieldValue::Flag(flag) => Value::Bool(*flag),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(text) => f.write_str(text),
            FieldValue::Number(number) if number.fract() == 0.0 => write!(f, "{number:.0}"),
            FieldValue::Number(number) => write!(f, "{number}"),
            FieldValue::Choice(option) => f.write_str(&FieldDescriptor::option_label(option)),
            FieldValue::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            FieldValue::Rating(stars) => write!(f, "{stars}/{MAX_RATING}"),
            FieldValue::Percent(percent) => write!(f, "{percent}%"),
            FieldValue::Flag(true) => f.write_str("Yes"),
            FieldValue::Flag(false) => f.write_str("No"),
        }
    }
}

/// Rounds to the nearest whole star and clamps into `1..=5`.
pub fn clamp_rating(value: f64) -> u8 {
    if value.is_nan() {
        return 1;
    }
    value.round().clamp(1.0, MAX_RATING as f64) as u8
}

/// Snaps to the nearest multiple of [`PERCENT_STEP`] and clamps into `0..=100`.
pub fn snap_percent(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    let step = PERCENT_STEP as f64;
    ((value / step).round() * step).clamp(0.0, 100.0) as u8
}

/// Parses an ISO calendar date, accepting a trailing time component.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    let date_part = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

fn text_of(raw: &Value) -> Option<String> {
    match raw {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        // Older records stored some text fields as string lists.
        Value::Array(entries) => {
            let joined = entries
                .iter()
                .filter_map(Value::as_str)
                .filter(|entry| !entry.is_empty())
                .collect::<Vec<_>>()
                .join(", ");
            (!joined.is_empty()).then_some(joined)
        }
        _ => None,
    }
}

fn number_of(raw: &Value) -> Option<f64> {
    match raw {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const STATUS: FieldDescriptor =
        FieldDescriptor::select("status", "Status", &["watched", "watching", "to_watch"]);

    #[test]
    fn option_labels_capitalise_and_space_first_underscore() {
        assert_eq!(FieldDescriptor::option_label("to_watch"), "To watch");
        assert_eq!(FieldDescriptor::option_label("cd"), "Cd");
        assert_eq!(FieldDescriptor::option_label(""), "");
    }

    #[test]
    fn select_values_outside_options_are_unset() {
        assert_eq!(
            FieldValue::coerce(&STATUS, &json!("watching")),
            Some(FieldValue::Choice("watching".into()))
        );
        assert_eq!(FieldValue::coerce(&STATUS, &json!("abandoned")), None);
        assert_eq!(FieldValue::coerce(&STATUS, &json!("")), None);
    }

    #[test]
    fn rating_and_percentage_clamp_into_range() {
        assert_eq!(clamp_rating(7.0), 5);
        assert_eq!(clamp_rating(0.2), 1);
        assert_eq!(snap_percent(42.0), 40);
        assert_eq!(snap_percent(43.0), 45);
        assert_eq!(snap_percent(-10.0), 0);
        assert_eq!(snap_percent(180.0), 100);
    }

    #[test]
    fn number_fields_accept_numeric_strings() {
        let year = FieldDescriptor::new("year", "Year", FieldKind::Number);
        assert_eq!(
            FieldValue::coerce(&year, &json!("2010")),
            Some(FieldValue::Number(2010.0))
        );
        assert_eq!(FieldValue::coerce(&year, &json!("20x0")), None);
        assert_eq!(FieldValue::Number(2010.0).to_string(), "2010");
    }
}
