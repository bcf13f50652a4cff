use chrono::{DateTime, FixedOffset};
use std::sync::Arc;

pub type DynClock = Arc<dyn ClockTrait + Send + Sync>;

pub trait ClockTrait {
    /// Wall-clock time in the zone transfers are stamped with.
    fn now(&self) -> DateTime<FixedOffset>;
}
