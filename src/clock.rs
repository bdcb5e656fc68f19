use chrono::{DateTime, Utc};

use lifedash_core::Clock;

/// Wall-clock time for production callers.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
