use chrono::NaiveDate;

use lifedash_core::stats::todos::{self, TodoBoard};
use lifedash_domain::Todo;

#[derive(Debug, Clone, PartialEq)]
pub struct TodoView<'a> {
    pub board: TodoBoard<'a>,
    pub overdue: usize,
}

impl<'a> TodoView<'a> {
    pub fn build(todos: &'a [Todo], today: NaiveDate) -> Self {
        let board = todos::partition(todos);
        let overdue = board.overdue_count(today);
        Self { board, overdue }
    }

    /// `done / total`, as shown in the list header.
    pub fn progress_label(&self) -> String {
        let done = self.board.completed.len();
        format!("{}/{}", done, done + self.board.pending.len())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use lifedash_domain::Priority;

    use super::*;

    #[test]
    fn overdue_counts_only_pending_todos() {
        let today = NaiveDate::from_ymd_opt(2025, 5, 10).unwrap();
        let yesterday = today.pred_opt().unwrap();
        let now = Utc::now();
        let mut done = Todo::new("File taxes", Priority::High, now).with_due_date(yesterday);
        done.completed = true;
        let todos = vec![
            done,
            Todo::new("Call bank", Priority::Low, now).with_due_date(yesterday),
            Todo::new("Plan trip", Priority::High, now).with_due_date(today),
        ];

        let view = TodoView::build(&todos, today);

        assert_eq!(view.overdue, 1);
        assert_eq!(view.board.pending[0].title, "Plan trip");
        assert_eq!(view.progress_label(), "1/3");
    }
}
