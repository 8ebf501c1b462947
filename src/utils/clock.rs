use std::sync::{Arc, Mutex};
use chrono::{Duration, Local, NaiveDateTime, Timelike};

// Clock abstracts the source of "now" for every time-dependent library rule.
pub trait Clock: Sync + Send {
    fn now(&self) -> NaiveDateTime;
}

// SystemClock reads local wall time truncated to whole seconds.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        let now = Local::now().naive_local();
        now.with_nanosecond(0).unwrap_or(now)
    }
}

// ManualClock only moves when told to; clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    current: Arc<Mutex<NaiveDateTime>>,
}

impl ManualClock {
    pub fn new(start: NaiveDateTime) -> Self {
        ManualClock {
            current: Arc::new(Mutex::new(start)),
        }
    }

    pub fn set(&self, time: NaiveDateTime) {
        match self.current.lock() {
            Ok(mut current) => *current = time,
            Err(poisoned) => *poisoned.into_inner() = time,
        }
    }

    pub fn advance(&self, by: Duration) {
        let next = self.now() + by;
        self.set(next);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        match self.current.lock() {
            Ok(current) => *current,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}
