// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Shared services available to every rule during evaluation.

use crate::config::ParsedFieldRules;
use crate::field::{Field, FieldData, Value};
use crate::lookup::ExternalLookup;

/// How the short-circuit guard reads emptiness for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// A plain variable: empty means zero-length text.
    Var,
    /// A file upload: empty means no file name was submitted.
    File,
}

/// Read-only evaluation context handed to each rule.
///
/// Replaces inherited base-class state: the full input data, the optional
/// lookup collaborator, and the current field's parsed rule chain are
/// composed in, and rules may only read from them.
pub struct RuleContext<'a> {
    data: &'a FieldData,
    lookup: Option<&'a dyn ExternalLookup>,
    field_rules: &'a ParsedFieldRules,
}

impl<'a> RuleContext<'a> {
    /// Context for evaluating one field's rule chain.
    pub fn new(
        data: &'a FieldData,
        lookup: Option<&'a dyn ExternalLookup>,
        field_rules: &'a ParsedFieldRules,
    ) -> Self {
        Self {
            data,
            lookup,
            field_rules,
        }
    }

    /// The full input data for the pass.
    pub fn data(&self) -> &FieldData {
        self.data
    }

    /// The injected lookup collaborator, when one is configured.
    pub fn lookup(&self) -> Option<&dyn ExternalLookup> {
        self.lookup
    }

    /// Whether the current field carries the named rule.
    ///
    /// Token-exact membership; see
    /// [`ParsedFieldRules::has_rule`](crate::config::ParsedFieldRules::has_rule).
    pub fn has_rule(&self, name: &str) -> bool {
        self.field_rules.has_rule(name)
    }

    /// The short-circuit guard: true when the field is not `required` and
    /// its value is empty, meaning all further checks should be skipped.
    ///
    /// Every rule except `required` itself must call this first, so that
    /// optional fields left empty never collect spurious failures.
    pub fn optional_and_empty(&self, field: &Field<'_>, kind: ValueKind) -> bool {
        if self.has_rule("required") {
            return false;
        }

        match kind {
            ValueKind::Var => field.value.is_empty_text(),
            ValueKind::File => match field.value {
                Value::File(upload) => upload.name.is_empty(),
                // No upload at all reads as an absent file.
                Value::Text(text) => text.is_empty(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context_parts(spec: &str) -> (FieldData, ParsedFieldRules) {
        (FieldData::new(), ParsedFieldRules::parse(spec).unwrap())
    }

    #[test]
    fn test_guard_skips_optional_empty_var() {
        let (data, rules) = context_parts("email|max:50");
        let ctx = RuleContext::new(&data, None, &rules);

        let value = Value::text("");
        let field = Field {
            name: "email",
            value: &value,
        };
        assert!(ctx.optional_and_empty(&field, ValueKind::Var));
    }

    #[test]
    fn test_guard_keeps_required_field() {
        let (data, rules) = context_parts("required|email");
        let ctx = RuleContext::new(&data, None, &rules);

        let value = Value::text("");
        let field = Field {
            name: "email",
            value: &value,
        };
        assert!(!ctx.optional_and_empty(&field, ValueKind::Var));
    }

    #[test]
    fn test_guard_keeps_non_empty_value() {
        let (data, rules) = context_parts("email");
        let ctx = RuleContext::new(&data, None, &rules);

        let value = Value::text("a@b.com");
        let field = Field {
            name: "email",
            value: &value,
        };
        assert!(!ctx.optional_and_empty(&field, ValueKind::Var));
    }

    #[test]
    fn test_guard_file_kind() {
        let (data, rules) = context_parts("mimes:png");
        let ctx = RuleContext::new(&data, None, &rules);

        let empty_upload = Value::file("");
        let field = Field {
            name: "avatar",
            value: &empty_upload,
        };
        assert!(ctx.optional_and_empty(&field, ValueKind::File));

        let upload = Value::file("avatar.png");
        let field = Field {
            name: "avatar",
            value: &upload,
        };
        assert!(!ctx.optional_and_empty(&field, ValueKind::File));

        // Field absent from the submission entirely.
        let absent = Value::text("");
        let field = Field {
            name: "avatar",
            value: &absent,
        };
        assert!(ctx.optional_and_empty(&field, ValueKind::File));
    }

    #[test]
    fn test_has_rule_exact_token_not_substring() {
        // Redesigned from the original substring match: "max" no longer
        // leaks into "maxLength".
        let (data, rules) = context_parts("maxLength:5|numeric");
        let ctx = RuleContext::new(&data, None, &rules);

        assert!(!ctx.has_rule("max"));
        assert!(ctx.has_rule("maxLength"));
        assert!(ctx.has_rule("numeric"));
    }
}
