// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Validation configuration: rule-spec strings and their parsed form.
//!
//! Loading the configuration from files is the caller's concern; this
//! module only defines the schema and the spec-string grammar.

mod schema;
mod spec;

pub use schema::{FieldRules, ParsedFieldRules, ParsedRules};
pub use spec::{parse_spec, RuleSpec};
