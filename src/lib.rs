// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Fieldcheck - Declarative Field Validation
//!
//! A rule-based validation engine: input values are checked against
//! per-field rule-spec strings, with optional-and-empty short-circuiting
//! and a human-readable message per failing rule.
//!
//! # Features
//!
//! - **Rule Specs**: `|`-delimited rule tokens with literal arguments
//!   (`"required|email|max:50"`)
//! - **Rule Engine**: ordered per-field chains, resolution before
//!   evaluation, configuration defects surfaced as errors
//! - **Built-in Rules**: required, email, numeric, min, max, unique,
//!   exists
//! - **Custom Rules**: register your own factories at runtime
//! - **External Lookups**: uniqueness checks against an injected store
//!   collaborator, with a caller-selected fault policy
//!
//! # Example
//!
//! ```
//! use fieldcheck::{FieldData, FieldRules, Validator, Value};
//!
//! let mut data = FieldData::new();
//! data.insert("email".to_string(), Value::text("a@b.com"));
//! data.insert("nickname".to_string(), Value::text(""));
//!
//! let mut rules = FieldRules::new();
//! rules.insert("email".to_string(), "required|email".to_string());
//! rules.insert("nickname".to_string(), "max:12".to_string());
//!
//! let report = Validator::new().validate(&data, &rules).unwrap();
//! assert!(report.is_valid());
//! ```

// Module declarations
pub mod config;
pub mod error;
pub mod field;
pub mod lookup;
pub mod rules;

// Re-exports for convenience
pub use config::{FieldRules, ParsedFieldRules, ParsedRules, RuleSpec};
pub use error::{ConfigError, Error, LookupError, Result};
pub use field::{Field, FieldData, FileUpload, Value};
pub use lookup::ExternalLookup;
pub use rules::{
    LookupPolicy, Rule, RuleContext, RuleRegistry, ValidationReport, Validator,
};
