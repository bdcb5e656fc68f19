//! lifedash-core
//!
//! Schema registry, field editing, derived statistics, and CRUD services for
//! the dashboard. Depends on lifedash-domain. Storage is reached only through
//! the [`storage`] traits; no terminal I/O.

pub mod category_service;
pub mod editor;
pub mod error;
pub mod feed;
pub mod finance_service;
pub mod fitness_service;
pub mod item_service;
pub mod memory;
pub mod objects;
pub mod schema;
pub mod stats;
pub mod storage;
pub mod time;
pub mod todo_service;

pub use category_service::*;
pub use editor::*;
pub use error::CoreError;
pub use feed::*;
pub use finance_service::*;
pub use fitness_service::*;
pub use item_service::*;
pub use memory::*;
pub use objects::*;
pub use storage::*;
pub use time::*;
pub use todo_service::*;

pub type CoreResult<T> = Result<T, CoreError>;
