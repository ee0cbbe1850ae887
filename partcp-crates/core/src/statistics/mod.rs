//! Statistics are written as lines of the form `{prefix} {name}={value}` once statistic logging
//! has been configured with [`configure_statistic_logging`]; until then they are dropped.

mod statistic_logger;
mod statistic_logging;

pub use statistic_logger::StatisticLogger;
pub use statistic_logging::configure_statistic_logging;
pub use statistic_logging::log_statistic;
pub use statistic_logging::log_statistic_postfix;
pub use statistic_logging::should_log_statistics;
