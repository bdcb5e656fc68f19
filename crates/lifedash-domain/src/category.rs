//! Domain types representing dashboard categories.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{de::Deserializer, Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

/// A user-defined bucket whose `type` selects the view and item schema.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type", default)]
    pub category_type: CategoryType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    pub fn new(name: impl Into<String>, category_type: CategoryType, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            category_type,
            icon: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Explicit icon tag, falling back to the one implied by the category type.
    pub fn icon_name(&self) -> &str {
        self.icon
            .as_deref()
            .filter(|icon| !icon.trim().is_empty())
            .unwrap_or_else(|| self.category_type.default_icon())
    }
}

impl Identifiable for Category {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Timestamped for Category {
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

/// Closed set of category types. Unknown stored tags read back as `General`.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum CategoryType {
    #[default]
    General,
    /// Legacy combined movies & TV shows.
    Media,
    Movies,
    #[serde(rename = "tvshows")]
    TvShows,
    Music,
    Reading,
    Goals,
    Fitness,
    Games,
    Travel,
    Ideas,
    Career,
    Finance,
    Todos,
}

impl CategoryType {
    pub const ALL: [CategoryType; 14] = [
        CategoryType::General,
        CategoryType::Media,
        CategoryType::Movies,
        CategoryType::TvShows,
        CategoryType::Music,
        CategoryType::Reading,
        CategoryType::Goals,
        CategoryType::Fitness,
        CategoryType::Games,
        CategoryType::Travel,
        CategoryType::Ideas,
        CategoryType::Career,
        CategoryType::Finance,
        CategoryType::Todos,
    ];

    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "media" => CategoryType::Media,
            "movies" => CategoryType::Movies,
            "tvshows" => CategoryType::TvShows,
            "music" => CategoryType::Music,
            "reading" => CategoryType::Reading,
            "goals" => CategoryType::Goals,
            "fitness" => CategoryType::Fitness,
            "games" => CategoryType::Games,
            "travel" => CategoryType::Travel,
            "ideas" => CategoryType::Ideas,
            "career" => CategoryType::Career,
            "finance" => CategoryType::Finance,
            "todos" => CategoryType::Todos,
            _ => CategoryType::General,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            CategoryType::General => "general",
            CategoryType::Media => "media",
            CategoryType::Movies => "movies",
            CategoryType::TvShows => "tvshows",
            CategoryType::Music => "music",
            CategoryType::Reading => "reading",
            CategoryType::Goals => "goals",
            CategoryType::Fitness => "fitness",
            CategoryType::Games => "games",
            CategoryType::Travel => "travel",
            CategoryType::Ideas => "ideas",
            CategoryType::Career => "career",
            CategoryType::Finance => "finance",
            CategoryType::Todos => "todos",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CategoryType::General => "General",
            CategoryType::Media => "Movies & TV",
            CategoryType::Movies => "Movies",
            CategoryType::TvShows => "TV Shows",
            CategoryType::Music => "Music",
            CategoryType::Reading => "Books & Podcasts",
            CategoryType::Goals => "Goals",
            CategoryType::Fitness => "Gym & Fitness",
            CategoryType::Games => "Games",
            CategoryType::Travel => "Travel & Places",
            CategoryType::Ideas => "Ideas & Notes",
            CategoryType::Career => "Career & Learning",
            CategoryType::Finance => "Finance",
            CategoryType::Todos => "Todo List",
        }
    }

    pub fn default_icon(self) -> &'static str {
        match self {
            CategoryType::General => "folder",
            CategoryType::Media | CategoryType::Movies => "film",
            CategoryType::TvShows => "tv",
            CategoryType::Music => "music",
            CategoryType::Reading => "book",
            CategoryType::Goals => "target",
            CategoryType::Fitness => "dumbbell",
            CategoryType::Games => "gamepad",
            CategoryType::Travel => "plane",
            CategoryType::Ideas => "lightbulb",
            CategoryType::Career => "briefcase",
            CategoryType::Finance => "wallet",
            CategoryType::Todos => "check-square",
        }
    }

    /// Top-N list types where items carry an editable, sortable rank.
    pub fn supports_rank(self) -> bool {
        matches!(
            self,
            CategoryType::Movies
                | CategoryType::TvShows
                | CategoryType::Music
                | CategoryType::Reading
                | CategoryType::Media
        )
    }

    /// Types that own dedicated record kinds instead of image-backed items.
    pub fn has_dedicated_view(self) -> bool {
        matches!(
            self,
            CategoryType::Fitness | CategoryType::Finance | CategoryType::Todos
        )
    }
}

impl fmt::Display for CategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl<'de> Deserialize<'de> for CategoryType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value
            .map(|tag| CategoryType::from_tag(&tag))
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip_through_from_tag() {
        for kind in CategoryType::ALL {
            assert_eq!(CategoryType::from_tag(kind.tag()), kind);
        }
    }

    #[test]
    fn unknown_type_reads_back_as_general() {
        let json = r#"{
            "id": "5f0c6f4e-8d0a-4a43-9d59-0a3f3a0f2b11",
            "name": "Misc",
            "type": "recipes",
            "created_at": "2025-01-01T00:00:00Z",
            "updated_at": "2025-01-01T00:00:00Z"
        }"#;
        let category: Category = serde_json::from_str(json).unwrap();
        assert_eq!(category.category_type, CategoryType::General);
        assert_eq!(category.icon_name(), "folder");
    }

    #[test]
    fn rank_is_limited_to_top_list_types() {
        let ranked: Vec<_> = CategoryType::ALL
            .into_iter()
            .filter(|kind| kind.supports_rank())
            .collect();
        assert_eq!(
            ranked,
            vec![
                CategoryType::Media,
                CategoryType::Movies,
                CategoryType::TvShows,
                CategoryType::Music,
                CategoryType::Reading,
            ]
        );
    }
}
