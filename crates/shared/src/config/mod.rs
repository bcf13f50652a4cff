mod clock;
mod database;
mod myconfig;

pub use self::clock::{FixedClock, SystemClock};
pub use self::database::{ConnectionManager, ConnectionPool};
pub use self::myconfig::{Config, DEFAULT_UTC_OFFSET, LogFormat, StoreBackend};
