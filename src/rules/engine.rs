// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! The validation orchestrator.

use std::sync::Arc;

use crate::config::{FieldRules, ParsedRules};
use crate::error::{Error, Result};
use crate::field::{Field, FieldData, Value};
use crate::lookup::ExternalLookup;

use super::builtin::Rule;
use super::context::RuleContext;
use super::registry::RuleRegistry;
use super::report::{render_message, LookupFault, ValidationReport};

/// What to do when an [`ExternalLookup`] call fails mid-pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LookupPolicy {
    /// Surface the fault to the caller as [`Error::Lookup`].
    #[default]
    Propagate,
    /// Treat the value as failing the rule (uniqueness unconfirmed means
    /// not unique), record the fault in the report, and keep going.
    FailClosed,
}

/// A field absent from the input reads as empty text, so `required`
/// fails and optional rules short-circuit.
static ABSENT: Value = Value::Text(String::new());

/// Validates input data against per-field rule chains.
///
/// Rules for one field run sequentially in declared order, each to
/// completion; a later rule may introspect the field's configured rule
/// set (the `numeric` coupling) but never a prior rule's outcome. The
/// configuration is immutable for the duration of a pass, and rules and
/// lookups are `Send + Sync`, so a caller may validate disjoint field
/// sets concurrently if it wants to.
pub struct Validator {
    registry: RuleRegistry,
    lookup: Option<Arc<dyn ExternalLookup>>,
    lookup_policy: LookupPolicy,
}

impl Validator {
    /// A validator with the built-in rules and no external lookup.
    pub fn new() -> Self {
        Self {
            registry: RuleRegistry::with_builtins(),
            lookup: None,
            lookup_policy: LookupPolicy::default(),
        }
    }

    /// Inject the lookup collaborator used by `unique`/`exists`.
    pub fn with_lookup(mut self, lookup: Arc<dyn ExternalLookup>) -> Self {
        self.lookup = Some(lookup);
        self
    }

    /// Select the lookup-fault policy.
    pub fn with_lookup_policy(mut self, policy: LookupPolicy) -> Self {
        self.lookup_policy = policy;
        self
    }

    /// Register a custom rule, replacing any rule of the same name.
    pub fn register_rule<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&[String]) -> std::result::Result<Box<dyn Rule>, crate::error::ConfigError>
            + Send
            + Sync
            + 'static,
    {
        self.registry.register(name, factory);
    }

    /// The rule registry.
    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Validate `data` against `rules`.
    ///
    /// Resolution runs first: every spec string is parsed and every rule
    /// token resolved through the registry, so a configuration defect
    /// aborts the pass before any predicate executes. Evaluation then
    /// walks each field's chain in order, collecting a rendered message
    /// per failing rule. Predicate failure never stops the pass.
    pub fn validate(&self, data: &FieldData, rules: &FieldRules) -> Result<ValidationReport> {
        let parsed = ParsedRules::parse(rules)?;

        // Resolution pass: all configuration defects surface here.
        let mut chains = Vec::with_capacity(parsed.len());
        for (name, field_rules) in parsed.iter() {
            let mut chain = Vec::with_capacity(field_rules.specs().len());
            for spec in field_rules.specs() {
                chain.push(self.registry.resolve(spec)?);
            }
            chains.push((name, field_rules, chain));
        }
        tracing::debug!("Resolved rule chains for {} field(s)", chains.len());

        // Evaluation pass.
        let mut report = ValidationReport::new();
        for (name, field_rules, chain) in &chains {
            let name = name.as_str();
            let value = data.get(name).unwrap_or(&ABSENT);
            let field = Field { name, value };
            let ctx = RuleContext::new(data, self.lookup.as_deref(), field_rules);

            for rule in chain {
                match rule.check(&field, &ctx) {
                    Ok(true) => {}
                    Ok(false) => {
                        report.record_failure(name, render_message(rule.message(), name));
                    }
                    Err(err) => match self.lookup_policy {
                        LookupPolicy::Propagate => return Err(Error::Lookup(err)),
                        LookupPolicy::FailClosed => {
                            tracing::warn!(
                                "Lookup fault on field '{}' rule '{}', failing closed: {}",
                                name,
                                rule.name(),
                                err
                            );
                            report.record_failure(name, render_message(rule.message(), name));
                            report.record_fault(LookupFault {
                                field: name.to_string(),
                                rule: rule.name().to_string(),
                                message: err.to_string(),
                            });
                        }
                    },
                }
            }
        }

        Ok(report)
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Validator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Validator")
            .field("registry", &self.registry)
            .field("has_lookup", &self.lookup.is_some())
            .field("lookup_policy", &self.lookup_policy)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, LookupError};
    use crate::lookup::MemoryLookup;

    fn data_of(pairs: &[(&str, &str)]) -> FieldData {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), Value::text(*v)))
            .collect()
    }

    fn rules_of(pairs: &[(&str, &str)]) -> FieldRules {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_validate_passing_fields() {
        let validator = Validator::new();
        let data = data_of(&[("email", "a@b.com"), ("name", "Ada")]);
        let rules = rules_of(&[("email", "required|email"), ("name", "required|max:24")]);

        let report = validator.validate(&data, &rules).unwrap();
        assert!(report.is_valid());
    }

    #[test]
    fn test_optional_empty_field_collects_nothing() {
        let validator = Validator::new();
        let data = data_of(&[("email", "")]);
        let rules = rules_of(&[("email", "email|max:50|min:3")]);

        let report = validator.validate(&data, &rules).unwrap();
        assert!(report.is_valid());
        assert!(report.messages_for("email").is_empty());
    }

    #[test]
    fn test_required_empty_field_fails() {
        let validator = Validator::new();
        let data = data_of(&[("email", "")]);
        let rules = rules_of(&[("email", "required|email")]);

        let report = validator.validate(&data, &rules).unwrap();
        assert!(!report.is_valid());
        assert!(report
            .messages_for("email")
            .iter()
            .any(|m| m == "Field email is required"));
    }

    #[test]
    fn test_field_absent_from_data() {
        let validator = Validator::new();
        let data = FieldData::new();
        let rules = rules_of(&[("email", "required|email"), ("nickname", "max:12")]);

        let report = validator.validate(&data, &rules).unwrap();
        assert!(!report.is_valid());
        assert!(!report.messages_for("email").is_empty());
        // Optional missing field short-circuits.
        assert!(report.messages_for("nickname").is_empty());
    }

    #[test]
    fn test_failures_follow_rule_order() {
        let validator = Validator::new();
        let data = data_of(&[("email", "definitely not an email and far too long for it")]);
        let rules = rules_of(&[("email", "required|email|max:10")]);

        let report = validator.validate(&data, &rules).unwrap();
        let messages = report.messages_for("email");
        assert_eq!(messages.len(), 2);
        assert!(messages[0].contains("bad email format"));
        assert!(messages[1].contains("maximum"));
    }

    #[test]
    fn test_unknown_rule_is_config_error() {
        let validator = Validator::new();
        let data = data_of(&[("email", "a@b.com")]);
        let rules = rules_of(&[("email", "required|telepathic")]);

        let err = validator.validate(&data, &rules).unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::UnknownRule { .. })
        ));
    }

    #[test]
    fn test_bad_argument_aborts_before_evaluation() {
        let validator = Validator::new();
        // "name" would fail required, but the malformed "max" bound on a
        // later field must abort the whole pass first.
        let data = data_of(&[("name", "")]);
        let rules = rules_of(&[("name", "required"), ("age", "max:young")]);

        let err = validator.validate(&data, &rules).unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_unique_through_validator() {
        let mut lookup = MemoryLookup::new();
        lookup.insert("users", "email", "a@b.com");
        let validator = Validator::new().with_lookup(Arc::new(lookup));

        let data = data_of(&[("email", "a@b.com")]);
        let rules = rules_of(&[("email", "required|email|unique:users")]);

        let report = validator.validate(&data, &rules).unwrap();
        assert!(!report.is_valid());
        assert_eq!(
            report.messages_for("email"),
            &["Field email must be unique".to_string()]
        );
    }

    #[derive(Debug)]
    struct DownLookup;

    impl ExternalLookup for DownLookup {
        fn count(&self, _table: &str, _field: &str, _value: &str) -> std::result::Result<u64, LookupError> {
            Err(LookupError::Timeout { millis: 250 })
        }
    }

    #[test]
    fn test_lookup_fault_propagates_by_default() {
        let validator = Validator::new().with_lookup(Arc::new(DownLookup));
        let data = data_of(&[("email", "a@b.com")]);
        let rules = rules_of(&[("email", "unique:users")]);

        let err = validator.validate(&data, &rules).unwrap_err();
        assert!(matches!(err, Error::Lookup(LookupError::Timeout { .. })));
    }

    #[test]
    fn test_lookup_fault_fails_closed_when_configured() {
        let validator = Validator::new()
            .with_lookup(Arc::new(DownLookup))
            .with_lookup_policy(LookupPolicy::FailClosed);
        let data = data_of(&[("email", "a@b.com")]);
        let rules = rules_of(&[("email", "unique:users")]);

        let report = validator.validate(&data, &rules).unwrap();
        assert!(!report.is_valid());
        assert_eq!(report.faults().len(), 1);
        assert_eq!(report.faults()[0].rule, "unique");
        assert!(report.faults()[0].message.contains("250"));
    }

    #[test]
    fn test_custom_rule_through_validator() {
        #[derive(Debug)]
        struct Starts {
            prefix: String,
        }

        impl Rule for Starts {
            fn name(&self) -> &'static str {
                "starts"
            }

            fn check(
                &self,
                field: &Field<'_>,
                _ctx: &crate::rules::RuleContext<'_>,
            ) -> std::result::Result<bool, LookupError> {
                Ok(field
                    .value
                    .as_text()
                    .map(|t| t.starts_with(&self.prefix))
                    .unwrap_or(false))
            }

            fn message(&self) -> &'static str {
                "Field :field: has the wrong prefix"
            }
        }

        let mut validator = Validator::new();
        validator.register_rule("starts", |args| {
            if args.len() != 1 {
                return Err(ConfigError::BadArity {
                    rule: "starts".to_string(),
                    expected: 1,
                    got: args.len(),
                });
            }
            Ok(Box::new(Starts {
                prefix: args[0].clone(),
            }))
        });

        let data = data_of(&[("sku", "XYZ-1")]);
        let rules = rules_of(&[("sku", "required|starts:SKU-")]);

        let report = validator.validate(&data, &rules).unwrap();
        assert_eq!(
            report.messages_for("sku"),
            &["Field sku has the wrong prefix".to_string()]
        );
    }

    #[test]
    fn test_validation_is_idempotent() {
        let validator = Validator::new();
        let data = data_of(&[("email", "nope"), ("age", "130")]);
        let rules = rules_of(&[("email", "required|email"), ("age", "numeric|max:120")]);

        let first = validator.validate(&data, &rules).unwrap();
        let second = validator.validate(&data, &rules).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_field_with_no_rules_passes() {
        let validator = Validator::new();
        let data = data_of(&[("note", "anything")]);
        let rules = rules_of(&[("note", "")]);

        let report = validator.validate(&data, &rules).unwrap();
        assert!(report.is_valid());
    }
}
