use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::io::stdout;
use std::io::Write;
use std::sync::Mutex;
use std::sync::OnceLock;

use convert_case::Case;
use convert_case::Casing;

/// Where and how statistics are written.
struct StatisticOptions {
    /// Written in front of every statistic.
    prefix: &'static str,
    /// A closing line written after a block of statistics.
    after_statistics: Option<&'static str>,
    /// The casing applied to the names of the statistics.
    casing: Option<Case>,
    writer: Box<dyn Write + Send>,
}

impl Debug for StatisticOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatisticOptions")
            .field("prefix", &self.prefix)
            .field("after_statistics", &self.after_statistics)
            .field("casing", &self.casing)
            .finish_non_exhaustive()
    }
}

impl StatisticOptions {
    fn format(&self, name: impl Display, value: impl Display) -> String {
        let name = match self.casing {
            Some(casing) => name.to_string().to_case(casing),
            None => name.to_string(),
        };
        format!("{} {name}={value}", self.prefix)
    }
}

static STATISTIC_OPTIONS: OnceLock<Mutex<StatisticOptions>> = OnceLock::new();

/// Enables the logging of statistics.
///
/// Every statistic is written to `writer` (stdout if none is given) as
/// `{prefix} {name}={value}`, with the name converted to `casing` if one is given. The `after`
/// line is written by [`log_statistic_postfix`]. Only the first configuration takes effect.
pub fn configure_statistic_logging(
    prefix: &'static str,
    after: Option<&'static str>,
    casing: Option<Case>,
    writer: Option<Box<dyn Write + Send>>,
) {
    let _ = STATISTIC_OPTIONS.get_or_init(|| {
        Mutex::new(StatisticOptions {
            prefix,
            after_statistics: after,
            casing,
            writer: writer.unwrap_or_else(|| Box::new(stdout())),
        })
    });
}

fn with_options(action: impl FnOnce(&mut StatisticOptions)) {
    if let Some(options) = STATISTIC_OPTIONS.get() {
        if let Ok(mut options) = options.lock() {
            action(&mut options);
        }
    }
}

/// Logs the statistic `name` with the given `value`, if statistic logging is configured.
pub fn log_statistic(name: impl Display, value: impl Display) {
    with_options(|options| {
        let line = options.format(name, value);
        let _ = writeln!(options.writer, "{line}");
    });
}

/// Writes the closing line of a block of statistics, if one is configured.
pub fn log_statistic_postfix() {
    with_options(|options| {
        if let Some(after) = options.after_statistics {
            let _ = writeln!(options.writer, "{after}");
        }
    });
}

/// Whether [`configure_statistic_logging`] has been called.
pub fn should_log_statistics() -> bool {
    STATISTIC_OPTIONS.get().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(casing: Option<Case>) -> StatisticOptions {
        StatisticOptions {
            prefix: "%%%mzn-stat:",
            after_statistics: None,
            casing,
            writer: Box::new(std::io::sink()),
        }
    }

    #[test]
    fn statistics_are_prefixed() {
        assert_eq!(
            "%%%mzn-stat: numDecisions=12",
            options(None).format("numDecisions", 12)
        );
    }

    #[test]
    fn names_are_converted_to_the_casing() {
        assert_eq!(
            "%%%mzn-stat: num_decisions=12",
            options(Some(Case::Snake)).format("numDecisions", 12)
        );
        assert_eq!(
            "%%%mzn-stat: peakDepth=3",
            options(Some(Case::Camel)).format("peak_depth", 3)
        );
    }
}
