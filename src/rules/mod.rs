// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule engine module for field validation.
//!
//! This module provides the rule contract, the built-in rules, the
//! registry that resolves rule tokens, and the orchestrator that runs
//! per-field rule chains.

mod builtin;
mod context;
mod engine;
mod registry;
mod report;

pub use builtin::{Email, Exists, Max, Min, Numeric, Required, Rule, Unique};
pub use context::{RuleContext, ValueKind};
pub use engine::{LookupPolicy, Validator};
pub use registry::{RuleFactory, RuleRegistry};
pub use report::{render_message, LookupFault, ValidationReport};
