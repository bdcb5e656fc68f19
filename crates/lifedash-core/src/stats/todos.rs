use chrono::NaiveDate;

use lifedash_domain::Todo;

/// Todos split for display: pending by priority, completed as stored.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TodoBoard<'a> {
    pub pending: Vec<&'a Todo>,
    pub completed: Vec<&'a Todo>,
}

impl TodoBoard<'_> {
    pub fn overdue_count(&self, today: NaiveDate) -> usize {
        self.pending
            .iter()
            .filter(|todo| todo.is_overdue(today))
            .count()
    }
}

/// Pending todos ordered high, medium, low; ties keep input order.
pub fn partition(todos: &[Todo]) -> TodoBoard<'_> {
    let (mut pending, completed): (Vec<&Todo>, Vec<&Todo>) =
        todos.iter().partition(|todo| !todo.completed);
    pending.sort_by_key(|todo| todo.priority.order());
    TodoBoard { pending, completed }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use lifedash_domain::Priority;

    use super::*;

    #[test]
    fn pending_sorted_by_priority_and_stable() {
        let now = Utc::now();
        let mut done = Todo::new("Done", Priority::High, now);
        done.completed = true;
        let todos = vec![
            Todo::new("Low", Priority::Low, now),
            Todo::new("Medium A", Priority::Medium, now),
            done,
            Todo::new("High", Priority::High, now),
            Todo::new("Medium B", Priority::Medium, now),
        ];
        let board = partition(&todos);
        let titles: Vec<_> = board.pending.iter().map(|todo| todo.title.as_str()).collect();
        assert_eq!(titles, vec!["High", "Medium A", "Medium B", "Low"]);
        assert_eq!(board.completed.len(), 1);
    }

    #[test]
    fn overdue_counts_only_pending() {
        let today = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
        let yesterday = today.pred_opt().unwrap();
        let now = Utc::now();
        let mut finished = Todo::new("Filed taxes", Priority::High, now).with_due_date(yesterday);
        finished.completed = true;
        let todos = vec![
            Todo::new("Call bank", Priority::Medium, now).with_due_date(yesterday),
            Todo::new("Book dentist", Priority::Low, now).with_due_date(today),
            finished,
        ];
        assert_eq!(partition(&todos).overdue_count(today), 1);
    }
}
