//! Shared traits, table names, and calendar helpers for dashboard records.

use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Exposes a stable identifier for entities held by the record store.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Records that carry creation/update timestamps.
pub trait Timestamped {
    fn created_at(&self) -> DateTime<Utc>;
    fn updated_at(&self) -> DateTime<Utc>;
    fn touch(&mut self, now: DateTime<Utc>);
}

/// Names the record collections kept by the external store.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    Categories,
    Items,
    WorkoutLogs,
    Transactions,
    Budgets,
    SavingsGoals,
    Todos,
}

impl Table {
    pub const ALL: [Table; 7] = [
        Table::Categories,
        Table::Items,
        Table::WorkoutLogs,
        Table::Transactions,
        Table::Budgets,
        Table::SavingsGoals,
        Table::Todos,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Table::Categories => "categories",
            Table::Items => "items",
            Table::WorkoutLogs => "workout_logs",
            Table::Transactions => "transactions",
            Table::Budgets => "budgets",
            Table::SavingsGoals => "savings_goals",
            Table::Todos => "todos",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A calendar month, used for "this month" / "last month" windows.
///
/// Month arithmetic wraps the month index and rolls the year; it is never a
/// rolling 30-day window.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthKey {
    pub year: i32,
    /// 1-based calendar month.
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn previous(&self) -> Self {
        self.shift(-1)
    }

    pub fn shift(&self, months: i32) -> Self {
        let index = self.year * 12 + self.month as i32 - 1 + months;
        Self {
            year: index.div_euclid(12),
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    /// Three-letter English month label, e.g. `Jan`.
    pub fn short_label(&self) -> &'static str {
        const LABELS: [&str; 12] = [
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
        ];
        LABELS[(self.month.clamp(1, 12) - 1) as usize]
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Whole days from `earlier` to `later`; negative when `earlier` is in the future.
pub fn days_between(earlier: NaiveDate, later: NaiveDate) -> i64 {
    (later - earlier).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_shift_rolls_year_backwards() {
        let january = MonthKey::new(2025, 1);
        assert_eq!(january.previous(), MonthKey::new(2024, 12));
        assert_eq!(january.shift(-13), MonthKey::new(2023, 12));
        assert_eq!(MonthKey::new(2024, 11).shift(3), MonthKey::new(2025, 2));
    }

    #[test]
    fn month_contains_checks_month_and_year() {
        let key = MonthKey::new(2025, 3);
        assert!(key.contains(NaiveDate::from_ymd_opt(2025, 3, 31).unwrap()));
        assert!(!key.contains(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()));
        assert_eq!(key.short_label(), "Mar");
    }
}
