//! Workout aggregates: rolling windows, streaks, volume, series, balance.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use lifedash_domain::{days_between, MonthlyTargets, WorkoutLog};

/// Workouts per week the weekly goal bar fills against.
pub const DEFAULT_WEEKLY_GOAL: u32 = 4;
pub const DAILY_SERIES_DAYS: usize = 14;
pub const WEEKLY_SERIES_WEEKS: usize = 8;
/// Types plotted on the balance chart; anything else counts as `Other`.
pub const BALANCE_TYPES: [&str; 6] = ["Strength", "Cardio", "HIIT", "Yoga", "Sports", "Other"];

const SHORT_WINDOW_DAYS: i64 = 7;
const LONG_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct FitnessSummary {
    pub workouts_last_7_days: usize,
    pub workouts_last_30_days: usize,
    pub total_calories: u64,
    pub total_duration_minutes: u64,
    pub average_duration_minutes: u64,
    pub average_rpe: f64,
    pub average_sleep: f64,
    pub current_streak: u32,
    pub type_breakdown: BTreeMap<String, usize>,
    /// Rounded to a whole kilogram.
    pub total_volume: f64,
}

/// Within the trailing window ending `today`. Future-dated logs count too.
fn within_days(log: &WorkoutLog, today: NaiveDate, days: i64) -> bool {
    days_between(log.date, today) <= days
}

/// Totals over the trailing 7 and 30 days. All zero for an empty log list.
pub fn summarize(logs: &[WorkoutLog], today: NaiveDate) -> FitnessSummary {
    let recent: Vec<&WorkoutLog> = logs
        .iter()
        .filter(|log| within_days(log, today, LONG_WINDOW_DAYS))
        .collect();
    let count = recent.len();

    let total_calories: u64 = recent
        .iter()
        .map(|log| u64::from(log.calories_burned.unwrap_or(0)))
        .sum();
    let total_duration_minutes: u64 = recent
        .iter()
        .map(|log| u64::from(log.duration_minutes.unwrap_or(0)))
        .sum();
    let mut type_breakdown = BTreeMap::new();
    for log in &recent {
        *type_breakdown.entry(log.workout_type.clone()).or_insert(0) += 1;
    }

    FitnessSummary {
        workouts_last_7_days: logs
            .iter()
            .filter(|log| within_days(log, today, SHORT_WINDOW_DAYS))
            .count(),
        workouts_last_30_days: count,
        total_calories,
        total_duration_minutes,
        average_duration_minutes: if count > 0 {
            (total_duration_minutes as f64 / count as f64).round() as u64
        } else {
            0
        },
        average_rpe: mean(recent.iter().map(|log| log.rpe.unwrap_or(0) as f64), count),
        average_sleep: mean(
            recent.iter().map(|log| log.sleep_quality.unwrap_or(0) as f64),
            count,
        ),
        current_streak: current_streak(logs, today),
        type_breakdown,
        total_volume: total_volume(recent.iter().copied()).round(),
    }
}

fn mean(values: impl Iterator<Item = f64>, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        values.sum::<f64>() / count as f64
    }
}

/// Consecutive-day streak walking back from `today`.
///
/// Distinct dates are visited newest first; each one at most one day before
/// the cursor extends the streak and becomes the new cursor. The first larger
/// gap ends the walk.
pub fn current_streak(logs: &[WorkoutLog], today: NaiveDate) -> u32 {
    let dates: BTreeSet<NaiveDate> = logs.iter().map(|log| log.date).collect();
    let mut cursor = today;
    let mut streak = 0;
    for date in dates.into_iter().rev() {
        if days_between(date, cursor) <= 1 {
            streak += 1;
            cursor = date;
        } else {
            break;
        }
    }
    streak
}

pub fn total_volume<'a>(logs: impl IntoIterator<Item = &'a WorkoutLog>) -> f64 {
    logs.into_iter().map(WorkoutLog::volume).sum()
}

/// `min(workouts / goal * 100, 100)`; zero goal reports 0.
pub fn weekly_goal_progress(workouts_this_week: usize, weekly_goal: u32) -> f64 {
    if weekly_goal == 0 {
        return 0.0;
    }
    (workouts_this_week as f64 / weekly_goal as f64 * 100.0).min(100.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TargetProgress {
    pub current: f64,
    pub target: f64,
    /// Capped at 100.
    pub percentage: f64,
}

impl TargetProgress {
    fn new(current: f64, target: f64) -> Self {
        let percentage = if target > 0.0 {
            (current / target * 100.0).min(100.0)
        } else {
            0.0
        };
        Self {
            current,
            target,
            percentage,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlyProgress {
    pub workouts: TargetProgress,
    pub calories: TargetProgress,
    pub active_hours: TargetProgress,
}

/// Progress of the trailing-30-day totals against the monthly targets.
pub fn monthly_progress(summary: &FitnessSummary, targets: MonthlyTargets) -> MonthlyProgress {
    MonthlyProgress {
        workouts: TargetProgress::new(
            summary.workouts_last_30_days as f64,
            targets.workouts as f64,
        ),
        calories: TargetProgress::new(summary.total_calories as f64, targets.calories as f64),
        active_hours: TargetProgress::new(
            summary.total_duration_minutes as f64 / 60.0,
            targets.active_hours as f64,
        ),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayPoint {
    pub date: NaiveDate,
    /// e.g. `Mar 4`.
    pub label: String,
    pub workouts: usize,
    pub calories: u64,
    pub duration_minutes: u64,
    pub average_rpe: f64,
    pub average_sleep: f64,
}

/// One point per calendar day for the last `days` days, ending today.
pub fn daily_series(logs: &[WorkoutLog], today: NaiveDate, days: usize) -> Vec<DayPoint> {
    (0..days as i64)
        .rev()
        .map(|back| {
            let date = today - Duration::days(back);
            let day: Vec<&WorkoutLog> = logs.iter().filter(|log| log.date == date).collect();
            let count = day.len();
            DayPoint {
                date,
                label: date.format("%b %-d").to_string(),
                workouts: count,
                calories: day
                    .iter()
                    .map(|log| u64::from(log.calories_burned.unwrap_or(0)))
                    .sum(),
                duration_minutes: day
                    .iter()
                    .map(|log| u64::from(log.duration_minutes.unwrap_or(0)))
                    .sum(),
                average_rpe: mean(day.iter().map(|log| log.rpe.unwrap_or(0) as f64), count),
                average_sleep: mean(
                    day.iter().map(|log| log.sleep_quality.unwrap_or(0) as f64),
                    count,
                ),
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekPoint {
    /// `W1` is the oldest week.
    pub label: String,
    pub start: NaiveDate,
    pub workouts: usize,
    pub calories: u64,
    pub duration_minutes: u64,
}

/// Consecutive 7-day buckets; bucket `i` covers `[today - (weeks-1-i)*7, +7)`,
/// so the newest bucket starts today.
pub fn weekly_series(logs: &[WorkoutLog], today: NaiveDate, weeks: usize) -> Vec<WeekPoint> {
    (0..weeks)
        .map(|index| {
            let start = today - Duration::days(((weeks - 1 - index) * 7) as i64);
            let end = start + Duration::days(7);
            let week: Vec<&WorkoutLog> = logs
                .iter()
                .filter(|log| log.date >= start && log.date < end)
                .collect();
            WeekPoint {
                label: format!("W{}", index + 1),
                start,
                workouts: week.len(),
                calories: week
                    .iter()
                    .map(|log| u64::from(log.calories_burned.unwrap_or(0)))
                    .sum(),
                duration_minutes: week
                    .iter()
                    .map(|log| u64::from(log.duration_minutes.unwrap_or(0)))
                    .sum(),
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalancePoint {
    pub workout_type: &'static str,
    pub count: usize,
    /// Count relative to the busiest type, 0..=100.
    pub value: u32,
}

/// Trailing-30-day counts over [`BALANCE_TYPES`], normalised to the largest.
pub fn type_balance(logs: &[WorkoutLog], today: NaiveDate) -> Vec<BalancePoint> {
    let mut counts = [0usize; BALANCE_TYPES.len()];
    let other = BALANCE_TYPES.len() - 1;
    for log in logs
        .iter()
        .filter(|log| within_days(log, today, LONG_WINDOW_DAYS))
    {
        let slot = BALANCE_TYPES
            .iter()
            .position(|ty| *ty == log.workout_type)
            .unwrap_or(other);
        counts[slot] += 1;
    }
    let max = counts.iter().copied().max().unwrap_or(0).max(1);
    BALANCE_TYPES
        .iter()
        .copied()
        .zip(counts)
        .map(|(workout_type, count)| BalancePoint {
            workout_type,
            count,
            value: (count as f64 / max as f64 * 100.0).round() as u32,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use lifedash_domain::Exercise;
    use uuid::Uuid;

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 20).unwrap()
    }

    fn log_on(days_ago: i64, workout_type: &str) -> WorkoutLog {
        WorkoutLog::new(
            Uuid::new_v4(),
            today() - Duration::days(days_ago),
            workout_type,
            Utc::now(),
        )
    }

    #[test]
    fn streak_boundaries() {
        assert_eq!(current_streak(&[], today()), 0);
        let consecutive = [log_on(0, "Cardio"), log_on(1, "Yoga")];
        assert_eq!(current_streak(&consecutive, today()), 2);
        let gap = [log_on(0, "Cardio"), log_on(3, "Yoga")];
        assert_eq!(current_streak(&gap, today()), 1);
    }

    #[test]
    fn streak_counts_yesterday_and_dedupes_dates() {
        let logs = [
            log_on(1, "Strength"),
            log_on(1, "Cardio"),
            log_on(2, "HIIT"),
            log_on(5, "Yoga"),
        ];
        assert_eq!(current_streak(&logs, today()), 2);
        assert_eq!(current_streak(&[log_on(2, "HIIT")], today()), 0);
    }

    #[test]
    fn summary_of_no_logs_is_all_zero() {
        let summary = summarize(&[], today());
        assert_eq!(summary, FitnessSummary::default());
    }

    #[test]
    fn summary_windows_and_averages() {
        let mut a = log_on(2, "Strength").with_exercises(vec![
            Exercise::new("Squat", 3, 10, Some(20.0)),
            Exercise::new("Push-up", 4, 8, Some(0.0)),
        ]);
        a.duration_minutes = Some(45);
        a.rpe = Some(8);
        let mut b = log_on(10, "Cardio");
        b.duration_minutes = Some(30);
        b.calories_burned = Some(300);
        let c = log_on(40, "Cardio");

        let summary = summarize(&[a, b, c], today());
        assert_eq!(summary.workouts_last_7_days, 1);
        assert_eq!(summary.workouts_last_30_days, 2);
        assert_eq!(summary.total_volume, 600.0);
        assert_eq!(summary.average_duration_minutes, 38);
        assert_eq!(summary.average_rpe, 4.0);
        assert_eq!(summary.type_breakdown.get("Cardio"), Some(&1));
    }

    #[test]
    fn weekly_goal_caps_at_full() {
        assert_eq!(weekly_goal_progress(2, DEFAULT_WEEKLY_GOAL), 50.0);
        assert_eq!(weekly_goal_progress(6, DEFAULT_WEEKLY_GOAL), 100.0);
    }

    #[test]
    fn daily_series_ends_today_with_zeroed_empty_days() {
        let mut log = log_on(0, "Yoga");
        log.sleep_quality = Some(4);
        let series = daily_series(&[log], today(), DAILY_SERIES_DAYS);
        assert_eq!(series.len(), 14);
        assert_eq!(series[13].date, today());
        assert_eq!(series[13].label, "Mar 20");
        assert_eq!(series[13].average_sleep, 4.0);
        assert_eq!(series[0].average_sleep, 0.0);
    }

    #[test]
    fn weekly_series_buckets_are_half_open() {
        let logs = [
            log_on(56, "Cardio"),
            log_on(49, "Cardio"),
            log_on(43, "Cardio"),
            log_on(1, "HIIT"),
            log_on(0, "Yoga"),
        ];
        let series = weekly_series(&logs, today(), WEEKLY_SERIES_WEEKS);
        assert_eq!(series[0].label, "W1");
        assert_eq!(series[0].start, today() - Duration::days(49));
        assert_eq!(series[0].workouts, 2);
        assert_eq!(series[1].workouts, 0);
        assert_eq!(series[6].workouts, 1);
        assert_eq!(series[7].label, "W8");
        assert_eq!(series[7].workouts, 1);
    }

    #[test]
    fn balance_normalises_to_busiest_type() {
        let logs = [
            log_on(1, "Strength"),
            log_on(2, "Strength"),
            log_on(3, "Running"),
        ];
        let balance = type_balance(&logs, today());
        assert_eq!(balance[0].value, 100);
        assert_eq!(balance[5].workout_type, "Other");
        assert_eq!(balance[5].value, 50);
        assert_eq!(balance[1].value, 0);
    }
}
