//! Pure aggregate functions over in-memory record collections.
//!
//! Every function takes the reference date explicitly and recomputes from the
//! full input; nothing is cached between calls.

pub mod finance;
pub mod fitness;
pub mod todos;
