//! Workout logs and the exercises recorded inline with them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

/// Workout type tags offered by the workout form.
pub const WORKOUT_TYPES: [&str; 9] = [
    "Strength", "Cardio", "HIIT", "Yoga", "Sports", "Swimming", "Cycling", "Running", "Other",
];

/// Perceived exertion scale bounds.
pub const RPE_RANGE: (u8, u8) = (1, 10);
/// Sleep quality scale bounds.
pub const SLEEP_RANGE: (u8, u8) = (1, 5);

/// Monthly goals the fitness goal bars fill against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTargets {
    #[serde(default = "MonthlyTargets::default_workouts")]
    pub workouts: u32,
    #[serde(default = "MonthlyTargets::default_calories")]
    pub calories: u32,
    #[serde(default = "MonthlyTargets::default_active_hours")]
    pub active_hours: u32,
}

impl MonthlyTargets {
    fn default_workouts() -> u32 {
        20
    }

    fn default_calories() -> u32 {
        10_000
    }

    fn default_active_hours() -> u32 {
        30
    }
}

impl Default for MonthlyTargets {
    fn default() -> Self {
        Self {
            workouts: Self::default_workouts(),
            calories: Self::default_calories(),
            active_hours: Self::default_active_hours(),
        }
    }
}

/// A single logged workout session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkoutLog {
    pub id: Uuid,
    pub category_id: Uuid,
    #[serde(rename = "workout_date")]
    pub date: NaiveDate,
    pub workout_type: String,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories_burned: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpe: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleep_quality: Option<u8>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WorkoutLog {
    pub fn new(
        category_id: Uuid,
        date: NaiveDate,
        workout_type: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            category_id,
            date,
            workout_type: workout_type.into(),
            exercises: Vec::new(),
            duration_minutes: None,
            calories_burned: None,
            notes: None,
            rpe: None,
            sleep_quality: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_exercises(mut self, exercises: Vec<Exercise>) -> Self {
        self.exercises = exercises;
        self
    }

    /// Training volume: sum of `sets * reps * weight` with missing weight as zero.
    pub fn volume(&self) -> f64 {
        self.exercises.iter().map(Exercise::volume).sum()
    }
}

impl Identifiable for WorkoutLog {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Timestamped for WorkoutLog {
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

/// One exercise within a workout; owned inline, no identity of its own.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
    pub name: String,
    pub sets: u32,
    pub reps: u32,
    /// Kilograms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest_seconds: Option<u32>,
}

impl Exercise {
    pub fn new(name: impl Into<String>, sets: u32, reps: u32, weight: Option<f64>) -> Self {
        Self {
            name: name.into(),
            sets,
            reps,
            weight,
            rest_seconds: None,
        }
    }

    pub fn volume(&self) -> f64 {
        self.sets as f64 * self.reps as f64 * self.weight.unwrap_or(0.0)
    }
}
