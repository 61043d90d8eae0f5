//! Tag expression parsing.
//!
//! A tag expression is a comma-separated list of rules, each an optional
//! `|`-separated set of alternatives with an optional `=param`:
//!
//! ```text
//! required,min=18,max=200
//! omitempty,email|url
//! oneof=red green blue
//! ```
//!
//! `omitempty` stops evaluation when the value is empty; a lone `-` skips the
//! field entirely.

use super::EngineError;

/// One tag with its optional parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub param: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    /// Stop evaluating when the value is empty.
    OmitEmpty,
    /// Passes when any alternative passes.
    AnyOf(Vec<Tag>),
}

impl Clause {
    /// Tag reported on failure: alternatives joined with `|`.
    pub fn tag(&self) -> String {
        match self {
            Clause::OmitEmpty => "omitempty".to_string(),
            Clause::AnyOf(tags) => tags
                .iter()
                .map(|tag| tag.name.as_str())
                .collect::<Vec<_>>()
                .join("|"),
        }
    }

    /// Parameter reported on failure; only single-tag clauses carry one.
    pub fn param(&self) -> Option<String> {
        match self {
            Clause::AnyOf(tags) if tags.len() == 1 => tags[0].param.clone(),
            _ => None,
        }
    }
}

/// A parsed tag expression.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleExpr {
    skip: bool,
    clauses: Vec<Clause>,
}

impl RuleExpr {
    pub fn parse(expression: &str) -> Result<Self, EngineError> {
        let trimmed = expression.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }
        if trimmed == "-" {
            return Ok(Self {
                skip: true,
                clauses: Vec::new(),
            });
        }

        let invalid = |reason: &str| EngineError::InvalidRule {
            expression: expression.to_string(),
            reason: reason.to_string(),
        };

        let mut clauses = Vec::new();
        for part in trimmed.split(',') {
            let part = part.trim();
            if part.is_empty() {
                return Err(invalid("empty tag"));
            }
            if part == "omitempty" {
                clauses.push(Clause::OmitEmpty);
                continue;
            }

            let mut alternatives = Vec::new();
            for alternative in part.split('|') {
                let (name, param) = match alternative.split_once('=') {
                    Some((name, param)) => (name.trim(), Some(param.trim().to_string())),
                    None => (alternative.trim(), None),
                };
                if name.is_empty() {
                    return Err(invalid("empty tag name"));
                }
                if name == "omitempty" || name == "-" {
                    return Err(invalid("'omitempty' and '-' cannot be combined with '|'"));
                }
                alternatives.push(Tag {
                    name: name.to_string(),
                    param,
                });
            }
            clauses.push(Clause::AnyOf(alternatives));
        }

        Ok(Self {
            skip: false,
            clauses,
        })
    }

    /// True for the `-` expression.
    pub fn is_skip(&self) -> bool {
        self.skip
    }

    /// True when there is nothing to evaluate.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }
}
