//! Auto-configurations and their ordering.
//!
//! An [`AutoConfiguration`] is a named group of registration rules that may
//! ask to run before or after other auto-configurations. A health indicator
//! for a specific system, for example, runs before the generic health
//! auto-configuration so the generic fallback only kicks in when nothing
//! more specific was registered.

use std::collections::{BTreeSet, HashMap};

use crate::error::{AutoConfigError, AutoConfigResult};
use crate::rule::RegistrationRule;

/// Named group of registration rules with ordering hints.
#[derive(Debug, Clone)]
pub struct AutoConfiguration {
    name: String,
    before: Vec<String>,
    after: Vec<String>,
    rules: Vec<RegistrationRule>,
}

impl AutoConfiguration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            before: Vec::new(),
            after: Vec::new(),
            rules: Vec::new(),
        }
    }

    /// Run before the named auto-configuration.
    pub fn before(mut self, name: impl Into<String>) -> Self {
        self.before.push(name.into());
        self
    }

    /// Run after the named auto-configuration.
    pub fn after(mut self, name: impl Into<String>) -> Self {
        self.after.push(name.into());
        self
    }

    pub fn rule(mut self, rule: RegistrationRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rules(&self) -> &[RegistrationRule] {
        &self.rules
    }
}

/// An ordered set of auto-configurations.
#[derive(Debug, Clone, Default)]
pub struct AutoConfigurations {
    configurations: Vec<AutoConfiguration>,
}

impl AutoConfigurations {
    pub fn of<I>(configurations: I) -> Self
    where
        I: IntoIterator<Item = AutoConfiguration>,
    {
        Self {
            configurations: configurations.into_iter().collect(),
        }
    }

    /// Add configurations, ignoring names already present.
    pub fn merge(mut self, other: AutoConfigurations) -> Self {
        for configuration in other.configurations {
            if !self.configurations.iter().any(|c| c.name == configuration.name) {
                self.configurations.push(configuration);
            }
        }
        self
    }

    pub fn len(&self) -> usize {
        self.configurations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configurations.is_empty()
    }

    /// Configurations sorted so every `before`/`after` hint is honoured.
    ///
    /// Declaration order breaks ties. Hints naming unknown configurations
    /// are ignored.
    pub fn sorted(&self) -> AutoConfigResult<Vec<&AutoConfiguration>> {
        let index: HashMap<&str, usize> = self
            .configurations
            .iter()
            .enumerate()
            .map(|(i, c)| (c.name.as_str(), i))
            .collect();

        let n = self.configurations.len();
        let mut successors: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); n];
        for (i, configuration) in self.configurations.iter().enumerate() {
            for target in &configuration.before {
                if let Some(&j) = index.get(target.as_str()) {
                    successors[i].insert(j);
                }
            }
            for target in &configuration.after {
                if let Some(&j) = index.get(target.as_str()) {
                    successors[j].insert(i);
                }
            }
        }

        let mut in_degree = vec![0usize; n];
        for edges in &successors {
            for &j in edges {
                in_degree[j] += 1;
            }
        }

        let mut ready: BTreeSet<usize> = (0..n).filter(|&i| in_degree[i] == 0).collect();
        let mut ordered = Vec::with_capacity(n);
        while let Some(i) = ready.pop_first() {
            ordered.push(&self.configurations[i]);
            for &j in &successors[i] {
                in_degree[j] -= 1;
                if in_degree[j] == 0 {
                    ready.insert(j);
                }
            }
        }

        if ordered.len() < n {
            let stuck = (0..n)
                .filter(|&i| in_degree[i] > 0)
                .map(|i| self.configurations[i].name.clone())
                .collect();
            return Err(AutoConfigError::OrderingCycle(stuck));
        }
        Ok(ordered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(configs: &AutoConfigurations) -> Vec<String> {
        configs
            .sorted()
            .unwrap()
            .into_iter()
            .map(|c| c.name().to_string())
            .collect()
    }

    #[test]
    fn test_declaration_order_without_hints() {
        let configs = AutoConfigurations::of([
            AutoConfiguration::new("a"),
            AutoConfiguration::new("b"),
            AutoConfiguration::new("c"),
        ]);
        assert_eq!(names(&configs), ["a", "b", "c"]);
    }

    #[test]
    fn test_before_hint_moves_configuration_forward() {
        let configs = AutoConfigurations::of([
            AutoConfiguration::new("health-indicator"),
            AutoConfiguration::new("graph-health").before("health-indicator"),
        ]);
        assert_eq!(names(&configs), ["graph-health", "health-indicator"]);
    }

    #[test]
    fn test_after_hint_and_unknown_targets() {
        let configs = AutoConfigurations::of([
            AutoConfiguration::new("late").after("early").before("missing"),
            AutoConfiguration::new("early"),
        ]);
        assert_eq!(names(&configs), ["early", "late"]);
    }

    #[test]
    fn test_cycle_detected() {
        let configs = AutoConfigurations::of([
            AutoConfiguration::new("a").before("b"),
            AutoConfiguration::new("b").before("a"),
            AutoConfiguration::new("c"),
        ]);
        match configs.sorted() {
            Err(AutoConfigError::OrderingCycle(stuck)) => assert_eq!(stuck, ["a", "b"]),
            other => panic!("expected cycle, got {:?}", other.map(|v| v.len())),
        }
    }

    #[test]
    fn test_merge_skips_duplicates() {
        let merged = AutoConfigurations::of([AutoConfiguration::new("a")])
            .merge(AutoConfigurations::of([
                AutoConfiguration::new("a"),
                AutoConfiguration::new("b"),
            ]));
        assert_eq!(merged.len(), 2);
    }
}
