use std::time::Duration;

use crate::statistics::StatisticLogger;

/// Counters collected while searching.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStatistics {
    /// The number of values which were tried at a choice point.
    pub num_decisions: u64,
    /// The number of times propagation (or an assignment) led to an inconsistency.
    pub num_failures: u64,
    pub num_solutions: u64,
    /// The largest number of open choice points.
    pub peak_depth: u64,
    /// The number of constraint propagations performed during the search.
    pub num_propagations: u64,
    pub time_spent: Duration,
}

impl SearchStatistics {
    pub fn log(&self, statistic_logger: &StatisticLogger) {
        statistic_logger.log_statistic("decisions", self.num_decisions);
        statistic_logger.log_statistic("failures", self.num_failures);
        statistic_logger.log_statistic("solutions", self.num_solutions);
        statistic_logger.log_statistic("peakDepth", self.peak_depth);
        statistic_logger.log_statistic("propagations", self.num_propagations);
        statistic_logger.log_statistic("solveTime", self.time_spent.as_secs_f64());
    }
}
