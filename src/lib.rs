#![doc(test(attr(deny(warnings))))]

//! LifeDash ties the category, item, fitness, finance, and todo stores into a
//! single dashboard with schema-driven item details and derived statistics.

pub mod clock;
pub mod dashboard;
pub mod errors;
pub mod ui;
pub mod utils;
pub mod views;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("LifeDash tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
