//! Kind-dispatched field controls for metadata editing.
//!
//! A [`FieldEditor`] turns one [`FieldDescriptor`] plus the stored raw value into
//! a [`FieldControl`] description, and turns user [`Gesture`]s back into
//! `(key, value)` writes through a single callback. Merging into the metadata
//! bag and persisting it is the caller's job.

use chrono::NaiveDate;
use serde_json::Value;
use tracing::debug;

use lifedash_domain::{
    clamp_rating, parse_date, snap_percent, FieldDescriptor, FieldKind, FieldValue, MAX_RATING,
    PERCENT_STEP,
};

/// Upper bound of the percentage slider.
pub const PERCENT_MAX: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    #[default]
    Editable,
    ReadOnly,
}

/// One entry of a select control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: String,
}

/// What the UI should draw for a field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldControl {
    TextInput { value: String, multiline: bool },
    /// Keeps whatever the user typed, even when it does not parse.
    NumberInput { raw: String },
    Select {
        options: Vec<SelectOption>,
        selected: Option<String>,
    },
    DateInput { value: Option<NaiveDate> },
    Stars { filled: u8, max: u8, interactive: bool },
    Slider { value: u8, max: u8, step: u8 },
    Checkbox { checked: bool },
}

/// User input delivered to a control.
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    Typed(String),
    Picked(Option<String>),
    StarClicked(u8),
    Slid(f64),
    /// Tri-state input; indeterminate collapses to `false`.
    Toggled(Option<bool>),
}

#[derive(Debug, Clone)]
pub struct FieldEditor {
    field: FieldDescriptor,
    mode: EditMode,
    pending_raw: Option<String>,
}

impl FieldEditor {
    pub fn new(field: FieldDescriptor, mode: EditMode) -> Self {
        Self {
            field,
            mode,
            pending_raw: None,
        }
    }

    pub fn editable(field: FieldDescriptor) -> Self {
        Self::new(field, EditMode::Editable)
    }

    pub fn read_only(field: FieldDescriptor) -> Self {
        Self::new(field, EditMode::ReadOnly)
    }

    pub fn field(&self) -> &FieldDescriptor {
        &self.field
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    /// Describes the control for the currently stored raw value.
    pub fn render(&self, current: Option<&Value>) -> FieldControl {
        let value = current.and_then(|raw| FieldValue::coerce(&self.field, raw));
        match self.field.kind {
            FieldKind::Text | FieldKind::LongText => FieldControl::TextInput {
                value: match value {
                    Some(FieldValue::Text(text)) => text,
                    _ => String::new(),
                },
                multiline: self.field.kind == FieldKind::LongText,
            },
            FieldKind::Number => FieldControl::NumberInput {
                raw: match (&self.pending_raw, value) {
                    (Some(raw), _) => raw.clone(),
                    (None, Some(number)) => number.to_string(),
                    (None, None) => String::new(),
                },
            },
            FieldKind::Select => FieldControl::Select {
                options: self
                    .field
                    .options
                    .iter()
                    .copied()
                    .map(|option| SelectOption {
                        value: option,
                        label: FieldDescriptor::option_label(option),
                    })
                    .collect(),
                selected: match value {
                    Some(FieldValue::Choice(option)) => Some(option),
                    _ => None,
                },
            },
            FieldKind::Date => FieldControl::DateInput {
                value: match value {
                    Some(FieldValue::Date(date)) => Some(date),
                    _ => None,
                },
            },
            FieldKind::Rating => FieldControl::Stars {
                filled: match value {
                    Some(FieldValue::Rating(stars)) => stars,
                    _ => 0,
                },
                max: MAX_RATING,
                interactive: self.mode == EditMode::Editable,
            },
            FieldKind::Percentage => FieldControl::Slider {
                value: match value {
                    Some(FieldValue::Percent(percent)) => percent,
                    _ => 0,
                },
                max: PERCENT_MAX,
                step: PERCENT_STEP,
            },
            FieldKind::Boolean => FieldControl::Checkbox {
                checked: matches!(value, Some(FieldValue::Flag(true))),
            },
        }
    }

    /// Applies a gesture, calling `on_change` at most once.
    ///
    /// Returns whether a write was emitted. Read-only editors, gestures that do
    /// not fit the field kind, and unparseable input emit nothing.
    pub fn handle<F>(&mut self, gesture: Gesture, mut on_change: F) -> bool
    where
        F: FnMut(&str, Option<FieldValue>),
    {
        if self.mode == EditMode::ReadOnly {
            return false;
        }
        let key = self.field.key;
        let update = match (self.field.kind, gesture) {
            (FieldKind::Text | FieldKind::LongText, Gesture::Typed(text)) => {
                Some(Some(FieldValue::Text(text)))
            }
            (FieldKind::Number, Gesture::Typed(text)) => self.parse_number(text),
            (FieldKind::Date, Gesture::Typed(text)) => {
                if text.trim().is_empty() {
                    Some(None)
                } else {
                    parse_date(&text).map(|date| Some(FieldValue::Date(date)))
                }
            }
            (FieldKind::Select, Gesture::Picked(None)) => Some(None),
            (FieldKind::Select, Gesture::Picked(Some(option))) => self
                .field
                .has_option(&option)
                .then(|| Some(FieldValue::Choice(option))),
            (FieldKind::Rating, Gesture::StarClicked(star)) => {
                Some(Some(FieldValue::Rating(clamp_rating(star as f64))))
            }
            (FieldKind::Percentage, Gesture::Slid(position)) => {
                Some(Some(FieldValue::Percent(snap_percent(position))))
            }
            (FieldKind::Boolean, Gesture::Toggled(state)) => {
                Some(Some(FieldValue::Flag(state.unwrap_or(false))))
            }
            (kind, gesture) => {
                debug!(field = key, %kind, ?gesture, "gesture does not apply to field kind");
                None
            }
        };
        match update {
            Some(value) => {
                on_change(key, value);
                true
            }
            None => false,
        }
    }

    fn parse_number(&mut self, text: String) -> Option<Option<FieldValue>> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            self.pending_raw = None;
            return Some(None);
        }
        match trimmed.parse::<f64>() {
            Ok(number) if number.is_finite() => {
                self.pending_raw = None;
                Some(Some(FieldValue::Number(number)))
            }
            _ => {
                self.pending_raw = Some(text);
                None
            }
        }
    }
}

/// Editors for every field of a schema, in schema order.
pub fn editors_for(fields: &[FieldDescriptor], mode: EditMode) -> Vec<FieldEditor> {
    fields
        .iter()
        .map(|field| FieldEditor::new(*field, mode))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifedash_domain::Metadata;
    use serde_json::json;

    fn capture(editor: &mut FieldEditor, gesture: Gesture) -> Vec<(String, Option<FieldValue>)> {
        let mut writes = Vec::new();
        editor.handle(gesture, |key, value| writes.push((key.to_string(), value)));
        writes
    }

    #[test]
    fn star_click_sets_exact_value_without_toggle_off() {
        let field = FieldDescriptor::new("rating", "Rating", FieldKind::Rating);
        let mut editor = FieldEditor::editable(field);
        let writes = capture(&mut editor, Gesture::StarClicked(3));
        assert_eq!(writes, vec![("rating".into(), Some(FieldValue::Rating(3)))]);
        let again = capture(&mut editor, Gesture::StarClicked(3));
        assert_eq!(again[0].1, Some(FieldValue::Rating(3)));
        let high = capture(&mut editor, Gesture::StarClicked(9));
        assert_eq!(high[0].1, Some(FieldValue::Rating(5)));
    }

    #[test]
    fn unset_rating_renders_zero_stars() {
        let field = FieldDescriptor::new("rating", "Rating", FieldKind::Rating);
        let control = FieldEditor::read_only(field).render(None);
        assert_eq!(
            control,
            FieldControl::Stars {
                filled: 0,
                max: 5,
                interactive: false
            }
        );
    }

    #[test]
    fn read_only_never_writes() {
        let field = FieldDescriptor::new("rating", "Rating", FieldKind::Rating);
        let mut editor = FieldEditor::read_only(field);
        assert!(capture(&mut editor, Gesture::StarClicked(4)).is_empty());
    }

    #[test]
    fn number_input_keeps_raw_text_when_unparseable() {
        let field = FieldDescriptor::new("year", "Year", FieldKind::Number);
        let mut editor = FieldEditor::editable(field);

        assert!(capture(&mut editor, Gesture::Typed("20x".into())).is_empty());
        assert_eq!(
            editor.render(Some(&json!(1999))),
            FieldControl::NumberInput { raw: "20x".into() }
        );

        let writes = capture(&mut editor, Gesture::Typed("2010".into()));
        assert_eq!(writes[0].1, Some(FieldValue::Number(2010.0)));
        let cleared = capture(&mut editor, Gesture::Typed(String::new()));
        assert_eq!(cleared[0].1, None);
    }

    #[test]
    fn slider_snaps_and_checkbox_defaults_false() {
        let progress = FieldDescriptor::new("progress", "Progress %", FieldKind::Percentage);
        let mut slider = FieldEditor::editable(progress);
        let writes = capture(&mut slider, Gesture::Slid(137.0));
        assert_eq!(writes[0].1, Some(FieldValue::Percent(100)));

        let flag = FieldDescriptor::new("multiplayer", "Multiplayer", FieldKind::Boolean);
        let mut checkbox = FieldEditor::editable(flag);
        assert_eq!(
            checkbox.render(None),
            FieldControl::Checkbox { checked: false }
        );
        let writes = capture(&mut checkbox, Gesture::Toggled(None));
        assert_eq!(writes[0].1, Some(FieldValue::Flag(false)));
    }

    #[test]
    fn select_rejects_values_outside_options() {
        let field =
            FieldDescriptor::select("status", "Status", &["watched", "watching", "to_watch"]);
        let mut editor = FieldEditor::editable(field);
        assert!(capture(&mut editor, Gesture::Picked(Some("lost".into()))).is_empty());
        let writes = capture(&mut editor, Gesture::Picked(None));
        assert_eq!(writes, vec![("status".into(), None)]);

        match editor.render(Some(&json!("to_watch"))) {
            FieldControl::Select { options, selected } => {
                assert_eq!(options[2].label, "To watch");
                assert_eq!(selected.as_deref(), Some("to_watch"));
            }
            other => panic!("unexpected control {other:?}"),
        }
    }

    #[test]
    fn writes_merge_into_metadata_bag() {
        let field = FieldDescriptor::new("notes", "Notes", FieldKind::LongText);
        let mut editor = FieldEditor::editable(field);
        let mut bag = Metadata::new();
        editor.handle(Gesture::Typed("Loved it".into()), |key, value| {
            bag.apply(key, value)
        });
        assert_eq!(bag.raw("notes"), Some(&json!("Loved it")));
    }
}
