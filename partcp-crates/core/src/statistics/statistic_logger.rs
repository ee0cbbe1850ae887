use std::fmt::Display;

use itertools::Itertools;

use super::log_statistic;

/// Logs statistics under a common name prefix, such as `search_decisions`.
#[derive(Debug, Default, Clone)]
pub struct StatisticLogger {
    name_prefix: String,
}

impl StatisticLogger {
    pub fn new<Input: IntoIterator<Item = impl Display>>(name_prefix: Input) -> Self {
        Self {
            name_prefix: name_prefix.into_iter().join("_"),
        }
    }

    /// Returns a logger whose prefix is extended with `addition_to_prefix`.
    pub fn attach_to_prefix(&self, addition_to_prefix: impl Display) -> Self {
        Self {
            name_prefix: self.qualified_name(addition_to_prefix),
        }
    }

    /// Logs `value` under the name `{prefix}_{name}`.
    pub fn log_statistic(&self, name: impl Display, value: impl Display) {
        log_statistic(self.qualified_name(name), value);
    }

    fn qualified_name(&self, name: impl Display) -> String {
        if self.name_prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}_{name}", self.name_prefix)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_are_joined_with_underscores() {
        let logger = StatisticLogger::new(["search", "root"]).attach_to_prefix("store");

        assert_eq!("search_root_store_decisions", logger.qualified_name("decisions"));
        assert_eq!("decisions", StatisticLogger::default().qualified_name("decisions"));
    }
}
