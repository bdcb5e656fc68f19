use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use lifedash_config::Config;
use lifedash_core::stats::fitness::{
    self, BalancePoint, DayPoint, FitnessSummary, MonthlyProgress, WeekPoint,
    DAILY_SERIES_DAYS, DEFAULT_WEEKLY_GOAL, WEEKLY_SERIES_WEEKS,
};
use lifedash_domain::{MonthlyTargets, WorkoutLog};

/// Everything the fitness screen of one category shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitnessView {
    pub category_id: Uuid,
    pub summary: FitnessSummary,
    pub weekly_goal: u32,
    /// Workouts in the trailing week against the weekly goal, capped at 100.
    pub weekly_goal_progress: f64,
    pub monthly: MonthlyProgress,
    pub daily: Vec<DayPoint>,
    pub weekly: Vec<WeekPoint>,
    pub balance: Vec<BalancePoint>,
    pub logs: Vec<WorkoutLog>,
}

impl FitnessView {
    pub fn build(
        category_id: Uuid,
        logs: &[WorkoutLog],
        today: NaiveDate,
        weekly_goal: u32,
        targets: MonthlyTargets,
    ) -> Self {
        let logs: Vec<WorkoutLog> = logs
            .iter()
            .filter(|log| log.category_id == category_id)
            .cloned()
            .collect();
        let summary = fitness::summarize(&logs, today);

        Self {
            category_id,
            weekly_goal,
            weekly_goal_progress: fitness::weekly_goal_progress(
                summary.workouts_last_7_days,
                weekly_goal,
            ),
            monthly: fitness::monthly_progress(&summary, targets),
            daily: fitness::daily_series(&logs, today, DAILY_SERIES_DAYS),
            weekly: fitness::weekly_series(&logs, today, WEEKLY_SERIES_WEEKS),
            balance: fitness::type_balance(&logs, today),
            summary,
            logs,
        }
    }

    pub fn with_config(
        category_id: Uuid,
        logs: &[WorkoutLog],
        today: NaiveDate,
        config: &Config,
    ) -> Self {
        Self::build(
            category_id,
            logs,
            today,
            config.weekly_workout_goal,
            config.monthly_targets,
        )
    }

    pub fn defaults(category_id: Uuid, logs: &[WorkoutLog], today: NaiveDate) -> Self {
        Self::build(
            category_id,
            logs,
            today,
            DEFAULT_WEEKLY_GOAL,
            MonthlyTargets::default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
    }

    #[test]
    fn empty_category_reports_zeros() {
        let view = FitnessView::defaults(Uuid::new_v4(), &[], today());

        assert_eq!(view.summary, FitnessSummary::default());
        assert_eq!(view.weekly_goal_progress, 0.0);
        assert_eq!(view.daily.len(), DAILY_SERIES_DAYS);
        assert_eq!(view.weekly.len(), WEEKLY_SERIES_WEEKS);
        assert!(view.balance.iter().all(|point| point.value == 0));
    }

    #[test]
    fn weekly_goal_comes_from_config() {
        let category = Uuid::new_v4();
        let now = Utc::now();
        let logs: Vec<WorkoutLog> = (0..3)
            .map(|back| {
                let mut log =
                    WorkoutLog::new(category, today() - Duration::days(back), "Cardio", now);
                log.duration_minutes = Some(60);
                log
            })
            .collect();
        let config = Config {
            weekly_workout_goal: 3,
            monthly_targets: MonthlyTargets {
                active_hours: 12,
                ..MonthlyTargets::default()
            },
            ..Config::default()
        };

        let view = FitnessView::with_config(category, &logs, today(), &config);

        assert_eq!(view.weekly_goal, 3);
        assert_eq!(view.weekly_goal_progress, 100.0);
        assert_eq!(view.summary.current_streak, 3);
        assert_eq!(view.monthly.active_hours.current, 3.0);
        assert_eq!(view.monthly.active_hours.target, 12.0);
        assert_eq!(view.monthly.workouts.target, 20.0);
    }
}
