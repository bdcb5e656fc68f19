//! View coordinators: per-screen read models derived from the loaded collections.

pub mod finance_view;
pub mod fitness_view;
pub mod item_grid;
pub mod todo_view;

pub use finance_view::{FinanceLimits, FinanceView, GoalProgress};
pub use fitness_view::FitnessView;
pub use item_grid::{sort_options, ItemGrid, ItemGroup, ItemSort};
pub use todo_view::TodoView;
