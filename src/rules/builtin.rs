// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! The rule contract and the built-in rules.
//!
//! Each rule is a named, parameterizable predicate plus a static failure
//! message template. Rule arguments are parsed into typed fields when the
//! rule is constructed, so a malformed argument list fails at resolution
//! time, before any predicate runs.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{ConfigError, LookupError};
use crate::field::Field;

use super::context::{RuleContext, ValueKind};

lazy_static! {
    /// HTML5-style email address grammar.
    static ref EMAIL_REGEX: Regex = Regex::new(
        r"(?i)^[a-z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?(?:\.[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?)+$"
    )
    .unwrap();
}

/// Contract every rule implements.
///
/// `check` must read only from the field and the context, hold no state
/// across evaluations, and never mutate shared configuration. Returning
/// `Ok(false)` is the normal failure signal; `Err` is reserved for
/// collaborator faults. `message` must be callable whether or not `check`
/// ran — messages are generic per rule type, not per failure reason.
pub trait Rule: std::fmt::Debug + Send + Sync {
    /// The rule's registered name, unqualified.
    fn name(&self) -> &'static str;

    /// Evaluate the predicate for one field.
    fn check(&self, field: &Field<'_>, ctx: &RuleContext<'_>) -> Result<bool, LookupError>;

    /// Failure message template with a `:field:` placeholder.
    fn message(&self) -> &'static str;
}

fn expect_no_args(rule: &'static str, args: &[String]) -> Result<(), ConfigError> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::BadArity {
            rule: rule.to_string(),
            expected: 0,
            got: args.len(),
        })
    }
}

fn expect_one_arg<'a>(rule: &'static str, args: &'a [String]) -> Result<&'a str, ConfigError> {
    if args.len() == 1 {
        Ok(&args[0])
    } else {
        Err(ConfigError::BadArity {
            rule: rule.to_string(),
            expected: 1,
            got: args.len(),
        })
    }
}

fn parse_bound(rule: &'static str, arg: &str) -> Result<f64, ConfigError> {
    arg.parse::<f64>().map_err(|_| ConfigError::InvalidArgument {
        rule: rule.to_string(),
        message: format!("'{}' is not a numeric bound", arg),
    })
}

/// The value must be present: non-empty text, or a file upload with a
/// file name. The one rule that never consults the short-circuit guard.
#[derive(Debug, Default)]
pub struct Required;

impl Required {
    pub(crate) fn from_args(args: &[String]) -> Result<Box<dyn Rule>, ConfigError> {
        expect_no_args("required", args)?;
        Ok(Box::new(Required))
    }
}

impl Rule for Required {
    fn name(&self) -> &'static str {
        "required"
    }

    fn check(&self, field: &Field<'_>, _ctx: &RuleContext<'_>) -> Result<bool, LookupError> {
        Ok(match field.value {
            crate::field::Value::Text(text) => !text.is_empty(),
            crate::field::Value::File(upload) => !upload.name.is_empty(),
        })
    }

    fn message(&self) -> &'static str {
        "Field :field: is required"
    }
}

/// The value must match a standard email-address grammar.
#[derive(Debug, Default)]
pub struct Email;

impl Email {
    pub(crate) fn from_args(args: &[String]) -> Result<Box<dyn Rule>, ConfigError> {
        expect_no_args("email", args)?;
        Ok(Box::new(Email))
    }
}

impl Rule for Email {
    fn name(&self) -> &'static str {
        "email"
    }

    fn check(&self, field: &Field<'_>, ctx: &RuleContext<'_>) -> Result<bool, LookupError> {
        if ctx.optional_and_empty(field, ValueKind::Var) {
            return Ok(true);
        }

        Ok(field
            .value
            .as_text()
            .map(|text| EMAIL_REGEX.is_match(text))
            .unwrap_or(false))
    }

    fn message(&self) -> &'static str {
        "Field :field: has a bad email format"
    }
}

/// The value must parse as a number.
#[derive(Debug, Default)]
pub struct Numeric;

impl Numeric {
    pub(crate) fn from_args(args: &[String]) -> Result<Box<dyn Rule>, ConfigError> {
        expect_no_args("numeric", args)?;
        Ok(Box::new(Numeric))
    }
}

impl Rule for Numeric {
    fn name(&self) -> &'static str {
        "numeric"
    }

    fn check(&self, field: &Field<'_>, ctx: &RuleContext<'_>) -> Result<bool, LookupError> {
        if ctx.optional_and_empty(field, ValueKind::Var) {
            return Ok(true);
        }

        Ok(parse_number(field).is_some())
    }

    fn message(&self) -> &'static str {
        "Field :field: must be numeric"
    }
}

fn parse_number(field: &Field<'_>) -> Option<f64> {
    field
        .value
        .as_text()
        .and_then(|text| text.trim().parse::<f64>().ok())
}

/// Upper bound on the value.
///
/// When the same field also carries the `numeric` rule, the bound applies
/// to the parsed number; otherwise the value must be text and the bound
/// applies to its character length. The mode is decided by cross-rule
/// introspection, an intentional coupling between rules on one field.
#[derive(Debug)]
pub struct Max {
    bound: f64,
}

impl Max {
    pub fn new(bound: f64) -> Self {
        Self { bound }
    }

    pub(crate) fn from_args(args: &[String]) -> Result<Box<dyn Rule>, ConfigError> {
        let arg = expect_one_arg("max", args)?;
        Ok(Box::new(Max::new(parse_bound("max", arg)?)))
    }
}

impl Rule for Max {
    fn name(&self) -> &'static str {
        "max"
    }

    fn check(&self, field: &Field<'_>, ctx: &RuleContext<'_>) -> Result<bool, LookupError> {
        if ctx.optional_and_empty(field, ValueKind::Var) {
            return Ok(true);
        }

        if ctx.has_rule("numeric") {
            return Ok(parse_number(field).map(|n| n <= self.bound).unwrap_or(false));
        }

        Ok(field
            .value
            .as_text()
            .map(|text| text.chars().count() as f64 <= self.bound)
            .unwrap_or(false))
    }

    fn message(&self) -> &'static str {
        "Field :field: exceeds the allowed maximum"
    }
}

/// Lower bound on the value; mirror of [`Max`].
#[derive(Debug)]
pub struct Min {
    bound: f64,
}

impl Min {
    pub fn new(bound: f64) -> Self {
        Self { bound }
    }

    pub(crate) fn from_args(args: &[String]) -> Result<Box<dyn Rule>, ConfigError> {
        let arg = expect_one_arg("min", args)?;
        Ok(Box::new(Min::new(parse_bound("min", arg)?)))
    }
}

impl Rule for Min {
    fn name(&self) -> &'static str {
        "min"
    }

    fn check(&self, field: &Field<'_>, ctx: &RuleContext<'_>) -> Result<bool, LookupError> {
        if ctx.optional_and_empty(field, ValueKind::Var) {
            return Ok(true);
        }

        if ctx.has_rule("numeric") {
            return Ok(parse_number(field).map(|n| n >= self.bound).unwrap_or(false));
        }

        Ok(field
            .value
            .as_text()
            .map(|text| text.chars().count() as f64 >= self.bound)
            .unwrap_or(false))
    }

    fn message(&self) -> &'static str {
        "Field :field: is below the allowed minimum"
    }
}

fn lookup_count(
    table: &str,
    field: &Field<'_>,
    ctx: &RuleContext<'_>,
) -> Result<u64, LookupError> {
    let lookup = match ctx.lookup() {
        Some(lookup) => lookup,
        None => {
            return Err(LookupError::Backend {
                message: "no external lookup configured".to_string(),
            })
        }
    };

    let value = field.value.as_text().unwrap_or("").trim();
    lookup.count(table.trim(), field.name.trim(), value)
}

/// No stored row may already hold this value. Always executes — there is
/// no short-circuit for uniqueness checks.
#[derive(Debug)]
pub struct Unique {
    table: String,
}

impl Unique {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
        }
    }

    pub(crate) fn from_args(args: &[String]) -> Result<Box<dyn Rule>, ConfigError> {
        Ok(Box::new(Unique::new(expect_one_arg("unique", args)?)))
    }
}

impl Rule for Unique {
    fn name(&self) -> &'static str {
        "unique"
    }

    fn check(&self, field: &Field<'_>, ctx: &RuleContext<'_>) -> Result<bool, LookupError> {
        Ok(lookup_count(&self.table, field, ctx)? == 0)
    }

    fn message(&self) -> &'static str {
        "Field :field: must be unique"
    }
}

/// Some stored row must already hold this value; negation of [`Unique`].
#[derive(Debug)]
pub struct Exists {
    table: String,
}

impl Exists {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
        }
    }

    pub(crate) fn from_args(args: &[String]) -> Result<Box<dyn Rule>, ConfigError> {
        Ok(Box::new(Exists::new(expect_one_arg("exists", args)?)))
    }
}

impl Rule for Exists {
    fn name(&self) -> &'static str {
        "exists"
    }

    fn check(&self, field: &Field<'_>, ctx: &RuleContext<'_>) -> Result<bool, LookupError> {
        Ok(lookup_count(&self.table, field, ctx)? > 0)
    }

    fn message(&self) -> &'static str {
        "Field :field: does not exist"
    }
}
