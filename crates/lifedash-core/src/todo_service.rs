use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use lifedash_domain::{Timestamped, Todo};

use crate::{storage::RecordStore, CoreError, CoreResult};

pub struct TodoService;

impl TodoService {
    pub fn add<S: RecordStore>(store: &S, mut todo: Todo) -> CoreResult<Todo> {
        todo.title = Self::validate_title(&todo.title)?;
        let todo = store.insert(todo)?;
        info!(id = %todo.id, priority = %todo.priority, "added todo");
        Ok(todo)
    }

    pub fn update<S: RecordStore>(store: &S, mut todo: Todo, now: DateTime<Utc>) -> CoreResult<Todo> {
        store.get::<Todo>(todo.id)?;
        todo.title = Self::validate_title(&todo.title)?;
        todo.touch(now);
        store.update(todo)
    }

    /// Flips the completion flag.
    pub fn toggle<S: RecordStore>(store: &S, id: Uuid, now: DateTime<Utc>) -> CoreResult<Todo> {
        let mut todo: Todo = store.get(id)?;
        todo.completed = !todo.completed;
        todo.touch(now);
        let todo = store.update(todo)?;
        info!(%id, completed = todo.completed, "toggled todo");
        Ok(todo)
    }

    pub fn delete<S: RecordStore>(store: &S, id: Uuid) -> CoreResult<()> {
        store.delete::<Todo>(id)?;
        info!(%id, "deleted todo");
        Ok(())
    }

    fn validate_title(candidate: &str) -> CoreResult<String> {
        let trimmed = candidate.trim();
        if trimmed.is_empty() {
            Err(CoreError::invalid("todo title cannot be empty"))
        } else {
            Ok(trimmed.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use lifedash_domain::Priority;

    use super::*;
    use crate::memory::MemoryRecordStore;

    #[test]
    fn toggle_flips_completion_both_ways() {
        let store = MemoryRecordStore::new();
        let todo = TodoService::add(&store, Todo::new("Stretch", Priority::Medium, Utc::now()))
            .unwrap();
        assert!(TodoService::toggle(&store, todo.id, Utc::now()).unwrap().completed);
        assert!(!TodoService::toggle(&store, todo.id, Utc::now()).unwrap().completed);
    }

    #[test]
    fn missing_todo_reports_not_found() {
        let store = MemoryRecordStore::new();
        assert!(matches!(
            TodoService::toggle(&store, Uuid::new_v4(), Utc::now()),
            Err(CoreError::NotFound { .. })
        ));
    }
}
