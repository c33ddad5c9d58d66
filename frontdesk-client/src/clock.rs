//! Time source for date rules and request ids

use chrono::NaiveDate;

/// Supplies "today" and the current timestamp to the controllers
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
    fn now_millis(&self) -> i64;
}

/// Local wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }

    fn now_millis(&self) -> i64 {
        shared::util::now_millis()
    }
}

/// Frozen clock for tests and replays
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    pub today: NaiveDate,
    pub millis: i64,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        let millis = today
            .and_hms_opt(9, 0, 0)
            .map(|dt| dt.and_utc().timestamp_millis())
            .unwrap_or_default();
        Self { today, millis }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today
    }

    fn now_millis(&self) -> i64 {
        self.millis
    }
}
