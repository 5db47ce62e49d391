// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule-spec string parsing.
//!
//! A field's rule spec is a `|`-delimited list of rule tokens, each
//! optionally suffixed with a `:`-separated, `,`-delimited argument list,
//! e.g. `"required|max:50|between:1,10"`.

use crate::error::ConfigError;

/// One rule token parsed from a spec string: the rule name plus its
/// literal arguments, still unparsed text at this stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSpec {
    /// Registered rule name, e.g. `max`.
    pub name: String,
    /// Literal arguments, e.g. `["50"]` for `max:50`.
    pub args: Vec<String>,
}

/// Parse a spec string into ordered rule tokens.
///
/// Empty tokens (doubled or trailing `|`) are skipped; an empty spec
/// string parses to an empty list. A token with arguments but no rule
/// name (e.g. `":5"`) is a [`ConfigError::MalformedSpec`].
pub fn parse_spec(spec: &str) -> Result<Vec<RuleSpec>, ConfigError> {
    let mut specs = Vec::new();

    for token in spec.split('|') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }

        let (name, args) = match token.split_once(':') {
            Some((name, args)) => (
                name.trim(),
                args.split(',').map(|a| a.trim().to_string()).collect(),
            ),
            None => (token, Vec::new()),
        };

        if name.is_empty() {
            return Err(ConfigError::MalformedSpec {
                spec: spec.to_string(),
            });
        }

        specs.push(RuleSpec {
            name: name.to_string(),
            args,
        });
    }

    Ok(specs)
}
