//! Static registry mapping category types to their ordered metadata fields.
//!
//! The table is compile-time constant. Types with a dedicated view (fitness,
//! finance, todos) and the catch-all `general` type have no fields.

use lifedash_domain::{CategoryType, FieldDescriptor, FieldKind};

const LEVELS: &[&str] = &["low", "medium", "high"];

const NOTES: FieldDescriptor = FieldDescriptor::new("notes", "Notes", FieldKind::LongText);
const RATING: FieldDescriptor = FieldDescriptor::new("rating", "Rating", FieldKind::Rating);
const YEAR: FieldDescriptor = FieldDescriptor::new("year", "Year", FieldKind::Number);
const GENRE: FieldDescriptor = FieldDescriptor::new("genre", "Genre", FieldKind::Text);
const PLATFORM: FieldDescriptor = FieldDescriptor::new("platform", "Platform", FieldKind::Text);
const WATCH_STATUS: FieldDescriptor =
    FieldDescriptor::select("status", "Status", &["watched", "watching", "to_watch"]);
const MOOD: FieldDescriptor =
    FieldDescriptor::select("mood_type", "Mood", &["chill", "intense", "inspiring"]);
const REWATCH: FieldDescriptor =
    FieldDescriptor::select("rewatch_value", "Rewatch Value", LEVELS);

const MOVIES: &[FieldDescriptor] = &[
    YEAR,
    GENRE,
    WATCH_STATUS,
    RATING,
    MOOD,
    FieldDescriptor::new("runtime", "Runtime", FieldKind::Text),
    FieldDescriptor::new("director", "Director", FieldKind::Text),
    PLATFORM,
    REWATCH,
    NOTES,
];

const TV_SHOWS: &[FieldDescriptor] = &[
    YEAR,
    GENRE,
    WATCH_STATUS,
    RATING,
    MOOD,
    FieldDescriptor::new("seasons", "Seasons", FieldKind::Number),
    FieldDescriptor::new("episodes", "Episodes", FieldKind::Number),
    FieldDescriptor::new("creator", "Creator", FieldKind::Text),
    PLATFORM,
    REWATCH,
    NOTES,
];

const MUSIC: &[FieldDescriptor] = &[
    FieldDescriptor::new("artist", "Artist", FieldKind::Text),
    YEAR,
    GENRE,
    RATING,
    FieldDescriptor::select("replay_value", "Replay Value", LEVELS),
    FieldDescriptor::new("era", "Era / Life Phase", FieldKind::Text),
    FieldDescriptor::select("format", "Format", &["streaming", "vinyl", "cd"]),
    FieldDescriptor::new("notes", "Personal Meaning", FieldKind::LongText),
];

const READING: &[FieldDescriptor] = &[
    FieldDescriptor::new("author", "Author / Host", FieldKind::Text),
    FieldDescriptor::select("status", "Status", &["reading", "finished", "planned"]),
    RATING,
    FieldDescriptor::select("difficulty", "Difficulty", &["easy", "medium", "hard"]),
    FieldDescriptor::select("purpose", "Purpose", &["learning", "leisure", "mindset"]),
    FieldDescriptor::select("format", "Format", &["audio", "physical", "pdf"]),
    FieldDescriptor::select("revisit_potential", "Revisit Potential", LEVELS),
    FieldDescriptor::new("notes", "Key Ideas / Notes", FieldKind::LongText),
];

const GOALS: &[FieldDescriptor] = &[
    FieldDescriptor::select(
        "category",
        "Category",
        &["health", "career", "personal", "financial"],
    ),
    FieldDescriptor::new("deadline", "Deadline", FieldKind::Date),
    FieldDescriptor::new("progress", "Progress %", FieldKind::Percentage),
    FieldDescriptor::new("why_it_matters", "Why It Matters", FieldKind::LongText),
    FieldDescriptor::new("success_definition", "Success Definition", FieldKind::LongText),
    FieldDescriptor::new("motivation_level", "Motivation Level", FieldKind::Rating),
    NOTES,
];

const GAMES: &[FieldDescriptor] = &[
    PLATFORM,
    FieldDescriptor::select(
        "status",
        "Status",
        &["playing", "completed", "backlog", "dropped"],
    ),
    GENRE,
    FieldDescriptor::new("hours_played", "Hours Played", FieldKind::Number),
    RATING,
    FieldDescriptor::new("completion_percentage", "Completion %", FieldKind::Percentage),
    FieldDescriptor::select(
        "difficulty",
        "Difficulty",
        &["easy", "medium", "hard", "extreme"],
    ),
    FieldDescriptor::new("multiplayer", "Multiplayer", FieldKind::Boolean),
    FieldDescriptor::new("notes", "Favorite Moments", FieldKind::LongText),
];

const TRAVEL: &[FieldDescriptor] = &[
    FieldDescriptor::select("status", "Status", &["visited", "planned"]),
    FieldDescriptor::new("dates", "Dates", FieldKind::Text),
    FieldDescriptor::new("budget", "Budget", FieldKind::Number),
    FieldDescriptor::new("accommodation", "Accommodation", FieldKind::Text),
    RATING,
    FieldDescriptor::select(
        "purpose",
        "Purpose",
        &["relax", "culture", "adventure", "business"],
    ),
    FieldDescriptor::new("lessons", "Lessons / Mistakes", FieldKind::LongText),
    FieldDescriptor::new("notes", "Highlights", FieldKind::LongText),
];

const IDEAS: &[FieldDescriptor] = &[
    FieldDescriptor::new("source", "Source of Idea", FieldKind::Text),
    FieldDescriptor::new("problem_solved", "Problem It Solves", FieldKind::LongText),
    FieldDescriptor::select("potential_impact", "Potential Impact", LEVELS),
    FieldDescriptor::new("time_estimate", "Time Estimate", FieldKind::Text),
    FieldDescriptor::new("excitement_level", "Excitement Level", FieldKind::Rating),
    FieldDescriptor::new("next_action", "Next Action", FieldKind::Text),
    NOTES,
];

const CAREER: &[FieldDescriptor] = &[
    FieldDescriptor::new("skills_learned", "Skills Learned", FieldKind::Text),
    FieldDescriptor::new("courses", "Courses", FieldKind::Text),
    FieldDescriptor::new("tools_used", "Tools Used", FieldKind::Text),
    FieldDescriptor::new("certifications", "Certifications", FieldKind::Text),
    FieldDescriptor::new("feedback", "Feedback Received", FieldKind::LongText),
    FieldDescriptor::new("career_direction", "Career Direction Notes", FieldKind::LongText),
];

/// Ordered field list for a category type.
pub fn lookup(category_type: CategoryType) -> &'static [FieldDescriptor] {
    match category_type {
        CategoryType::Media | CategoryType::Movies => MOVIES,
        CategoryType::TvShows => TV_SHOWS,
        CategoryType::Music => MUSIC,
        CategoryType::Reading => READING,
        CategoryType::Goals => GOALS,
        CategoryType::Games => GAMES,
        CategoryType::Travel => TRAVEL,
        CategoryType::Ideas => IDEAS,
        CategoryType::Career => CAREER,
        CategoryType::General
        | CategoryType::Fitness
        | CategoryType::Finance
        | CategoryType::Todos => &[],
    }
}

/// Finds a single field by key within a category type's schema.
pub fn find_field(category_type: CategoryType, key: &str) -> Option<&'static FieldDescriptor> {
    lookup(category_type).iter().find(|field| field.key == key)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn dedicated_and_general_types_have_no_fields() {
        for ty in [
            CategoryType::General,
            CategoryType::Fitness,
            CategoryType::Finance,
            CategoryType::Todos,
            CategoryType::from_tag("spaceships"),
        ] {
            assert!(lookup(ty).is_empty(), "{ty} should have no schema");
        }
    }

    #[test]
    fn lookup_is_stable_across_calls() {
        for ty in CategoryType::ALL {
            assert_eq!(lookup(ty), lookup(ty));
        }
    }

    #[test]
    fn keys_are_unique_and_selects_have_options() {
        for ty in CategoryType::ALL {
            let fields = lookup(ty);
            let keys: HashSet<_> = fields.iter().map(|field| field.key).collect();
            assert_eq!(keys.len(), fields.len(), "duplicate key in {ty}");
            for field in fields {
                assert_eq!(field.kind == FieldKind::Select, !field.options.is_empty());
            }
        }
    }

    #[test]
    fn tv_shows_carry_season_counts_in_order() {
        let keys: Vec<_> = lookup(CategoryType::TvShows)
            .iter()
            .map(|field| field.key)
            .collect();
        assert_eq!(&keys[4..8], &["mood_type", "seasons", "episodes", "creator"]);
        assert_eq!(lookup(CategoryType::Media), lookup(CategoryType::Movies));
        assert_eq!(
            find_field(CategoryType::Games, "multiplayer").map(|field| field.kind),
            Some(FieldKind::Boolean)
        );
    }
}
