//! lifedash-domain
//!
//! Pure domain models (Category, Item, WorkoutLog, Transaction, Budget, etc.).
//! No I/O, no storage. Only data types, core enums, and calendar helpers.

pub mod category;
pub mod common;
pub mod field;
pub mod finance;
pub mod fitness;
pub mod item;
pub mod todo;

pub use category::*;
pub use common::*;
pub use field::*;
pub use finance::*;
pub use fitness::*;
pub use item::*;
pub use todo::*;
