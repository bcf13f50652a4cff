use chrono::{DateTime, FixedOffset, Utc};

use crate::abstract_trait::ClockTrait;

#[derive(Clone, Debug)]
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    pub fn new(offset: FixedOffset) -> Self {
        SystemClock { offset }
    }
}

impl ClockTrait for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.offset)
    }
}

/// Always returns the same instant.
#[derive(Clone, Debug)]
pub struct FixedClock {
    instant: DateTime<FixedOffset>,
}

impl FixedClock {
    pub fn new(instant: DateTime<FixedOffset>) -> Self {
        FixedClock { instant }
    }
}

impl ClockTrait for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.instant
    }
}
