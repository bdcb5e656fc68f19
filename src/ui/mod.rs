pub mod detail;
pub mod money;

pub use detail::{DetailLine, DetailRenderer};
pub use money::MoneyFormat;
