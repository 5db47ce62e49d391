// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Validation-configuration schema.
//!
//! [`FieldRules`] is the declarative input (field name to rule-spec
//! string); [`ParsedRules`] is its resolved form with tokenized rule
//! chains, built once per validation pass. File loading is left to the
//! caller — the map deserializes from any serde format.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::ConfigError;

use super::spec::{parse_spec, RuleSpec};

/// Declarative rule configuration: field name to rule-spec string,
/// e.g. `"email" => "required|email|max:50"`.
///
/// A `BTreeMap` keeps field evaluation order deterministic.
pub type FieldRules = BTreeMap<String, String>;

/// The parsed rule chain for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFieldRules {
    specs: Vec<RuleSpec>,
    names: BTreeSet<String>,
}

impl ParsedFieldRules {
    /// Parse one field's rule-spec string.
    pub fn parse(spec: &str) -> Result<Self, ConfigError> {
        let specs = parse_spec(spec)?;
        let names = specs.iter().map(|s| s.name.clone()).collect();
        Ok(Self { specs, names })
    }

    /// The ordered rule tokens for this field.
    pub fn specs(&self) -> &[RuleSpec] {
        &self.specs
    }

    /// Whether this field carries the named rule.
    ///
    /// Matching is token-exact over the parsed rule names: `max` does not
    /// match a field whose spec says `maxLength`. The original substring
    /// check produced false positives on such prefixes.
    pub fn has_rule(&self, name: &str) -> bool {
        self.names.contains(name)
    }
}

/// All fields' parsed rule chains for one validation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRules {
    fields: BTreeMap<String, ParsedFieldRules>,
}

impl ParsedRules {
    /// Parse every field's spec string. Fails on the first malformed
    /// spec; rule names are not resolved here (see the registry).
    pub fn parse(rules: &FieldRules) -> Result<Self, ConfigError> {
        let mut fields = BTreeMap::new();
        for (name, spec) in rules {
            fields.insert(name.clone(), ParsedFieldRules::parse(spec)?);
        }
        Ok(Self { fields })
    }

    /// The parsed chain for one field.
    pub fn field(&self, name: &str) -> Option<&ParsedFieldRules> {
        self.fields.get(name)
    }

    /// Iterate fields in deterministic (sorted) order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ParsedFieldRules)> {
        self.fields.iter()
    }

    /// Number of configured fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when no fields are configured.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
