mod logs;
mod metrics;
mod otel;
mod parse_datetime;
mod random_string;
mod shutdown;
mod tracker;

pub use self::logs::init_logger;
pub use self::metrics::{Method, Metrics, Status, SystemMetrics, run_metrics_collector};
pub use self::otel::{Telemetry, TracingContext};
pub use self::parse_datetime::{format_timestamp, parse_date, parse_time};
pub use self::random_string::generate_random_string;
pub use self::shutdown::shutdown_signal;
pub use self::tracker::OperationTracker;
