use std::cmp;

use colored::Colorize;

use lifedash_config::Config;
use lifedash_core::{schema, FieldControl, FieldEditor};
use lifedash_domain::{Category, Item};

const NOT_SET: &str = "Not set";
const BAR_CELLS: u8 = 10;

/// One rendered `label: value` row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailLine {
    pub label: String,
    pub value: String,
    pub is_set: bool,
}

/// Renders an item's schema fields as aligned terminal lines.
#[derive(Debug, Clone, Copy)]
pub struct DetailRenderer {
    color: bool,
}

impl DetailRenderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn plain() -> Self {
        Self::new(false)
    }

    pub fn is_colored(&self) -> bool {
        self.color
    }

    /// Rows in schema order; values outside the schema are not shown.
    pub fn lines(&self, category: &Category, item: &Item) -> Vec<DetailLine> {
        let mut lines: Vec<DetailLine> = schema::lookup(category.category_type)
            .iter()
            .map(|field| {
                let stored = item.metadata.raw(field.key);
                let value = item
                    .metadata
                    .get(field)
                    .map(|_| describe(&FieldEditor::read_only(*field).render(stored)));
                DetailLine {
                    label: field.label.to_string(),
                    is_set: value.is_some(),
                    value: value.unwrap_or_else(|| NOT_SET.to_string()),
                }
            })
            .collect();

        if category.category_type.supports_rank() {
            lines.push(DetailLine {
                label: "Rank".into(),
                is_set: item.rank.is_some(),
                value: item
                    .rank
                    .map(|rank| format!("#{rank}"))
                    .unwrap_or_else(|| NOT_SET.to_string()),
            });
        }
        lines
    }

    pub fn render(&self, category: &Category, item: &Item) -> String {
        let lines = self.lines(category, item);
        let label_width = lines
            .iter()
            .map(|line| line.label.len())
            .max()
            .unwrap_or(0);
        let title = format!("{} ({})", item.name, category.name);
        let rule = "-".repeat(cmp::max(title.len(), 40));

        let mut output = String::new();
        output.push_str(&self.heading(&title));
        output.push('\n');
        output.push_str(&rule);
        for line in &lines {
            output.push('\n');
            let label = format!("{:<width$}", line.label, width = label_width);
            output.push_str(&format!("  {}  {}", self.label(&label), self.value(line)));
        }
        output
    }

    fn heading(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn label(&self, text: &str) -> String {
        if self.color {
            text.cyan().to_string()
        } else {
            text.to_string()
        }
    }

    fn value(&self, line: &DetailLine) -> String {
        if !self.color {
            return line.value.clone();
        }
        if line.is_set {
            line.value.normal().to_string()
        } else {
            line.value.dimmed().italic().to_string()
        }
    }
}

impl From<&Config> for DetailRenderer {
    fn from(config: &Config) -> Self {
        Self::new(config.ui_color_enabled)
    }
}

fn describe(control: &FieldControl) -> String {
    match control {
        FieldControl::TextInput { value, .. } => value.clone(),
        FieldControl::NumberInput { raw } => raw.clone(),
        FieldControl::Select { options, selected } => selected
            .as_deref()
            .and_then(|value| options.iter().find(|option| option.value == value))
            .map(|option| option.label.clone())
            .unwrap_or_else(|| NOT_SET.to_string()),
        FieldControl::DateInput { value } => value
            .map(|date| date.format("%b %-d, %Y").to_string())
            .unwrap_or_else(|| NOT_SET.to_string()),
        FieldControl::Stars { filled, max, .. } => {
            let empty = max.saturating_sub(*filled);
            format!(
                "{}{}",
                "★".repeat(*filled as usize),
                "☆".repeat(empty as usize)
            )
        }
        FieldControl::Slider { value, max, .. } => {
            let cells = if *max == 0 {
                0
            } else {
                (*value as u32 * BAR_CELLS as u32 / *max as u32) as usize
            };
            format!(
                "[{}{}] {}%",
                "#".repeat(cells),
                "-".repeat(BAR_CELLS as usize - cells),
                value
            )
        }
        FieldControl::Checkbox { checked: true } => "Yes".into(),
        FieldControl::Checkbox { checked: false } => "No".into(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use lifedash_domain::{CategoryType, Metadata};
    use serde_json::json;

    use super::*;

    fn value_of<'a>(lines: &'a [DetailLine], label: &str) -> &'a str {
        &lines
            .iter()
            .find(|line| line.label == label)
            .expect("label present")
            .value
    }

    #[test]
    fn game_fields_render_by_kind() {
        let now = Utc::now();
        let games = Category::new("Games", CategoryType::Games, now);
        let metadata: Metadata = [
            ("rating".to_string(), json!(3)),
            ("completion_percentage".to_string(), json!(48)),
            ("multiplayer".to_string(), json!(false)),
            ("status".to_string(), json!("backlog")),
        ]
        .into_iter()
        .collect();
        let item = Item::new(games.id, "Hades", "u/h.png", now).with_metadata(metadata);

        let lines = DetailRenderer::plain().lines(&games, &item);

        assert_eq!(value_of(&lines, "Rating"), "★★★☆☆");
        assert_eq!(value_of(&lines, "Completion %"), "[#####-----] 50%");
        assert_eq!(value_of(&lines, "Multiplayer"), "No");
        assert_eq!(value_of(&lines, "Status"), "Backlog");
        assert_eq!(value_of(&lines, "Platform"), NOT_SET);
        assert!(lines.iter().all(|line| line.label != "Rank"));
    }

    #[test]
    fn movie_detail_shows_rank_and_option_labels() {
        let now = Utc::now();
        let movies = Category::new("Films", CategoryType::Movies, now);
        let metadata: Metadata = [("status".to_string(), json!("to_watch"))]
            .into_iter()
            .collect();
        let item = Item::new(movies.id, "Heat", "u/m.png", now)
            .with_metadata(metadata)
            .with_rank(Some(7));

        let rendered = DetailRenderer::plain().render(&movies, &item);

        assert!(rendered.starts_with("Heat (Films)"));
        assert!(rendered.contains("To watch"));
        assert!(rendered.contains("#7"));
    }

    #[test]
    fn color_follows_config() {
        let config = Config {
            ui_color_enabled: false,
            ..Config::default()
        };
        assert!(!DetailRenderer::from(&config).is_colored());
        assert!(DetailRenderer::from(&Config::default()).is_colored());

        let now = Utc::now();
        let ideas = Category::new("Ideas", CategoryType::Ideas, now);
        let item = Item::new(ideas.id, "Garden", "u/g.png", now);
        let rendered = DetailRenderer::from(&config).render(&ideas, &item);
        assert!(rendered.starts_with("Garden (Ideas)\n"));
        assert!(!rendered.contains('\u{1b}'));
    }
}
