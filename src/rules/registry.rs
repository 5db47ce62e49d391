// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule registry: resolving rule tokens to constructible rules.

use std::collections::BTreeMap;

use crate::config::RuleSpec;
use crate::error::ConfigError;

use super::builtin::{Email, Exists, Max, Min, Numeric, Required, Rule, Unique};

/// Constructs a rule from its literal arguments, failing on a malformed
/// argument list.
pub type RuleFactory =
    Box<dyn Fn(&[String]) -> Result<Box<dyn Rule>, ConfigError> + Send + Sync>;

/// Maps rule names to factories. Unknown names are a configuration
/// error, never a validation failure.
pub struct RuleRegistry {
    factories: BTreeMap<String, RuleFactory>,
}

impl RuleRegistry {
    /// A registry with all built-in rules pre-registered.
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        registry.register("required", Required::from_args);
        registry.register("email", Email::from_args);
        registry.register("numeric", Numeric::from_args);
        registry.register("max", Max::from_args);
        registry.register("min", Min::from_args);
        registry.register("unique", Unique::from_args);
        registry.register("exists", Exists::from_args);
        registry
    }

    /// A registry with no rules at all.
    pub fn empty() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// Register a custom rule factory, replacing any rule of the same name.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&[String]) -> Result<Box<dyn Rule>, ConfigError> + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Box::new(factory));
    }

    /// Whether a rule with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Construct the rule named by `spec`, with its arguments.
    pub fn resolve(&self, spec: &RuleSpec) -> Result<Box<dyn Rule>, ConfigError> {
        let factory = self
            .factories
            .get(&spec.name)
            .ok_or_else(|| ConfigError::UnknownRule {
                name: spec.name.clone(),
            })?;
        factory(&spec.args)
    }

    /// Registered rule names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}
