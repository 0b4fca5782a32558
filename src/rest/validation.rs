//! Declarative field validation for mutating requests.
//!
//! Mutators check their input against a rule table before anything is sent,
//! so a rejected call never reaches the panel.
//!
//! Rules can be built directly or parsed from the `|`-separated DSL:
//!
//! ```rust
//! use pterodactyl_api::rest::validation::{validate_fields, FieldRules, Rule};
//! use serde_json::json;
//!
//! let rules = vec![
//!     FieldRules::new("name", [Rule::Required, Rule::String]),
//!     FieldRules::parse("memory", "required_without:limits.memory|number").unwrap(),
//! ];
//!
//! let input = json!({"name": "A", "limits": {"memory": 512}});
//! assert!(validate_fields(&input, &rules).is_ok());
//! ```

use std::fmt;
use std::str::FromStr;

use serde_json::Value;
use thiserror::Error;

use crate::rest::ResourceError;

/// A single validation rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rule {
    /// The field must exist and be neither `null` nor `""`.
    Required,
    /// The field must exist; any value is accepted.
    Present,
    /// When the field at the given path is absent or empty, this field is
    /// [`Rule::Required`].
    RequiredWithout(String),
    /// A JSON number or a numeric string.
    Number,
    /// A JSON boolean.
    Boolean,
    /// A JSON string.
    String,
    /// A JSON object.
    Object,
    /// A JSON number or any string.
    NumberOrString,
}

/// Error returned when a rule string cannot be parsed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuleParseError {
    /// The rule name is not recognised.
    #[error("Unknown validation rule '{rule}'")]
    UnknownRule {
        /// The rejected rule text.
        rule: String,
    },
    /// A rule that takes an argument was given none.
    #[error("Validation rule '{rule}' requires an argument")]
    MissingArgument {
        /// The rule name.
        rule: String,
    },
}

impl FromStr for Rule {
    type Err = RuleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, argument) = match s.split_once(':') {
            Some((name, argument)) => (name, Some(argument)),
            None => (s, None),
        };

        match name {
            "required" => Ok(Self::Required),
            "present" => Ok(Self::Present),
            "required_without" => match argument {
                Some(path) if !path.is_empty() => Ok(Self::RequiredWithout(path.to_string())),
                _ => Err(RuleParseError::MissingArgument {
                    rule: name.to_string(),
                }),
            },
            "number" => Ok(Self::Number),
            "boolean" => Ok(Self::Boolean),
            "string" => Ok(Self::String),
            "object" => Ok(Self::Object),
            "number_or_string" => Ok(Self::NumberOrString),
            _ => Err(RuleParseError::UnknownRule {
                rule: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => f.write_str("required"),
            Self::Present => f.write_str("present"),
            Self::RequiredWithout(path) => write!(f, "required_without:{path}"),
            Self::Number => f.write_str("number"),
            Self::Boolean => f.write_str("boolean"),
            Self::String => f.write_str("string"),
            Self::Object => f.write_str("object"),
            Self::NumberOrString => f.write_str("number_or_string"),
        }
    }
}

/// The rules applied to one (possibly dotted) field path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldRules {
    field: String,
    rules: Vec<Rule>,
}

impl FieldRules {
    /// Creates a rule set for `field`.
    #[must_use]
    pub fn new(field: impl Into<String>, rules: impl IntoIterator<Item = Rule>) -> Self {
        Self {
            field: field.into(),
            rules: rules.into_iter().collect(),
        }
    }

    /// Parses a `|`-separated rule string for `field`.
    ///
    /// # Errors
    ///
    /// Returns [`RuleParseError`] for the first rule that fails to parse.
    pub fn parse(field: impl Into<String>, rules: &str) -> Result<Self, RuleParseError> {
        let rules = rules
            .split('|')
            .filter(|rule| !rule.is_empty())
            .map(str::parse)
            .collect::<Result<Vec<Rule>, _>>()?;
        Ok(Self::new(field, rules))
    }

    /// Returns the field path.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Returns the rules, in checking order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }
}

/// Resolves a dotted `path` inside `value`.
///
/// Any intermediate value that is not an object makes the path absent.
#[must_use]
pub fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    match path.split_once('.') {
        Some((head, rest)) => lookup(value.as_object()?.get(head)?, rest),
        None => value.as_object()?.get(path),
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn is_numeric(value: &Value) -> bool {
    match value {
        Value::Number(_) => true,
        Value::String(s) => s.trim().parse::<f64>().is_ok_and(f64::is_finite),
        _ => false,
    }
}

fn check(input: &Value, field: &str, rule: &Rule) -> Result<(), ResourceError> {
    let value = lookup(input, field);
    let required = || ResourceError::FieldRequired {
        field: field.to_string(),
    };
    let mismatch = |expected: &'static str| ResourceError::FieldTypeMismatch {
        field: field.to_string(),
        expected,
    };

    match rule {
        Rule::Required => match value {
            Some(v) if !is_empty(v) => Ok(()),
            _ => Err(required()),
        },
        Rule::Present => value.map(|_| ()).ok_or_else(|| ResourceError::FieldNotPresent {
            field: field.to_string(),
        }),
        Rule::RequiredWithout(other) => {
            let other_filled = lookup(input, other).is_some_and(|v| !is_empty(v));
            match value {
                _ if other_filled => Ok(()),
                Some(v) if !is_empty(v) => Ok(()),
                _ => Err(required()),
            }
        }
        Rule::Number | Rule::Boolean | Rule::String | Rule::Object | Rule::NumberOrString => {
            let Some(v) = value.filter(|v| !v.is_null()) else {
                return Ok(());
            };
            let (ok, expected) = match rule {
                Rule::Number => (is_numeric(v), "number"),
                Rule::Boolean => (v.is_boolean(), "boolean"),
                Rule::String => (v.is_string(), "string"),
                Rule::Object => (v.is_object(), "object"),
                _ => (v.is_number() || v.is_string(), "number or string"),
            };
            if ok {
                Ok(())
            } else {
                Err(mismatch(expected))
            }
        }
    }
}

/// Checks `input` against `rules`.
///
/// Field sets are checked in order and each set's rules in order; the first
/// failure is returned.
///
/// # Errors
///
/// Returns [`ResourceError::FieldRequired`], [`ResourceError::FieldNotPresent`]
/// or [`ResourceError::FieldTypeMismatch`].
pub fn validate_fields(input: &Value, rules: &[FieldRules]) -> Result<(), ResourceError> {
    for set in rules {
        for rule in &set.rules {
            check(input, &set.field, rule)?;
        }
    }
    Ok(())
}
