mod di;
mod errors;
mod logger;
mod metrics;

pub use self::di::DependenciesInject;
pub use self::errors::AppError;
pub use self::logger::init_logger;
pub use self::metrics::{Method, MethodLabels, Metrics, Status};
