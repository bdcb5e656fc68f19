use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use lifedash_domain::{CategoryType, Timestamped, WorkoutLog, RPE_RANGE, SLEEP_RANGE};

use crate::{storage::RecordStore, CategoryService, CoreError, CoreResult};

pub struct FitnessService;

impl FitnessService {
    pub fn add_workout<S: RecordStore>(store: &S, log: WorkoutLog) -> CoreResult<WorkoutLog> {
        let log = Self::prepare(log)?;
        CategoryService::require_kind(store, log.category_id, CategoryType::Fitness)?;
        let log = store.insert(log)?;
        info!(
            id = %log.id,
            date = %log.date,
            workout_type = %log.workout_type,
            exercises = log.exercises.len(),
            "logged workout"
        );
        Ok(log)
    }

    /// Replaces the workout, including its exercise list, wholesale.
    pub fn update_workout<S: RecordStore>(
        store: &S,
        mut log: WorkoutLog,
        now: DateTime<Utc>,
    ) -> CoreResult<WorkoutLog> {
        store.get::<WorkoutLog>(log.id)?;
        CategoryService::require_kind(store, log.category_id, CategoryType::Fitness)?;
        log.touch(now);
        let log = store.update(Self::prepare(log)?)?;
        info!(id = %log.id, "updated workout");
        Ok(log)
    }

    pub fn delete_workout<S: RecordStore>(store: &S, id: Uuid) -> CoreResult<()> {
        store.delete::<WorkoutLog>(id)?;
        info!(%id, "deleted workout");
        Ok(())
    }

    /// Drops exercises without a name and checks the score ranges.
    fn prepare(mut log: WorkoutLog) -> CoreResult<WorkoutLog> {
        log.workout_type = log.workout_type.trim().to_string();
        if log.workout_type.is_empty() {
            return Err(CoreError::invalid("workout type is required"));
        }
        log.exercises.retain(|exercise| !exercise.name.trim().is_empty());
        for exercise in &mut log.exercises {
            exercise.name = exercise.name.trim().to_string();
        }
        Self::check_score("RPE", log.rpe, RPE_RANGE)?;
        Self::check_score("sleep quality", log.sleep_quality, SLEEP_RANGE)?;
        Ok(log)
    }

    fn check_score(what: &str, score: Option<u8>, (low, high): (u8, u8)) -> CoreResult<()> {
        match score {
            Some(value) if !(low..=high).contains(&value) => Err(CoreError::invalid(format!(
                "{what} must be between {low} and {high}"
            ))),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use lifedash_domain::Exercise;

    use super::*;
    use crate::memory::MemoryRecordStore;

    fn gym(store: &MemoryRecordStore) -> Uuid {
        CategoryService::create(store, "Gym", CategoryType::Fitness, None, Utc::now())
            .unwrap()
            .id
    }

    fn workout(category_id: Uuid) -> WorkoutLog {
        WorkoutLog::new(
            category_id,
            NaiveDate::from_ymd_opt(2025, 4, 2).unwrap(),
            "Strength",
            Utc::now(),
        )
    }

    #[test]
    fn blank_exercises_are_dropped_on_save() {
        let store = MemoryRecordStore::new();
        let log = workout(gym(&store)).with_exercises(vec![
            Exercise::new("Deadlift", 5, 5, Some(100.0)),
            Exercise::new("   ", 3, 10, None),
        ]);
        let saved = FitnessService::add_workout(&store, log).unwrap();
        assert_eq!(saved.exercises.len(), 1);
        assert_eq!(saved.volume(), 2500.0);
    }

    #[test]
    fn scores_outside_their_scales_are_rejected() {
        let store = MemoryRecordStore::new();
        let gym = gym(&store);
        let mut log = workout(gym);
        log.rpe = Some(11);
        assert!(FitnessService::add_workout(&store, log).is_err());

        let mut log = workout(gym);
        log.sleep_quality = Some(0);
        assert!(FitnessService::add_workout(&store, log).is_err());

        let mut log = workout(gym);
        log.rpe = Some(10);
        log.sleep_quality = Some(5);
        assert!(FitnessService::add_workout(&store, log).is_ok());
    }

    #[test]
    fn workouts_belong_to_a_fitness_category() {
        let store = MemoryRecordStore::new();
        let err = FitnessService::add_workout(&store, workout(Uuid::new_v4())).unwrap_err();
        assert!(matches!(err, CoreError::NotFound { .. }));

        let wallet =
            CategoryService::create(&store, "Wallet", CategoryType::Finance, None, Utc::now())
                .unwrap();
        let err = FitnessService::add_workout(&store, workout(wallet.id)).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));

        let saved = FitnessService::add_workout(&store, workout(gym(&store))).unwrap();
        let moved = WorkoutLog {
            category_id: wallet.id,
            ..saved
        };
        assert!(FitnessService::update_workout(&store, moved, Utc::now()).is_err());
        assert_eq!(store.list::<WorkoutLog>().unwrap().len(), 1);
    }
}
