//! Declarative form validation.
//!
//! A [`Schema`] maps field names to rules; [`validate`] walks a JSON document
//! and reports, per field, the first rule that failed. Dotted names such as
//! `address.cep` address nested objects.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;
use thiserror::Error;

pub type FormatCheck = fn(&str) -> bool;
pub type ValueCheck = fn(&Value) -> bool;

#[derive(Clone)]
pub enum Constraint {
    /// Whole number (numeric strings are accepted).
    Integer { message: &'static str },
    Min { bound: f64, message: &'static str },
    MinItems { count: usize, message: &'static str },
    Format {
        check: FormatCheck,
        message: &'static str,
    },
    Check {
        check: ValueCheck,
        message: &'static str,
    },
}

impl fmt::Debug for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer { .. } => f.write_str("Integer"),
            Self::Min { bound, .. } => write!(f, "Min({bound})"),
            Self::MinItems { count, .. } => write!(f, "MinItems({count})"),
            Self::Format { .. } => f.write_str("Format"),
            Self::Check { .. } => f.write_str("Check"),
        }
    }
}

impl Constraint {
    const fn message(&self) -> &'static str {
        match self {
            Self::Integer { message }
            | Self::Min { message, .. }
            | Self::MinItems { message, .. }
            | Self::Format { message, .. }
            | Self::Check { message, .. } => *message,
        }
    }

    fn holds(&self, value: &Value) -> bool {
        match self {
            Self::Integer { .. } => as_number(value).is_some_and(|n| n.fract() == 0.0),
            Self::Min { bound, .. } => as_number(value).is_some_and(|n| n >= *bound),
            Self::MinItems { count, .. } => value.as_array().is_some_and(|a| a.len() >= *count),
            Self::Format { check, .. } => value.as_str().is_some_and(check),
            Self::Check { check, .. } => check(value),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct FieldRule {
    required: Option<&'static str>,
    constraints: Vec<Constraint>,
}

impl FieldRule {
    #[must_use]
    pub const fn required(message: &'static str) -> Self {
        Self {
            required: Some(message),
            constraints: Vec::new(),
        }
    }

    #[must_use]
    pub const fn optional() -> Self {
        Self {
            required: None,
            constraints: Vec::new(),
        }
    }

    #[must_use]
    pub fn with(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    fn check(&self, value: Option<&Value>) -> Option<&'static str> {
        let value = value.filter(|v| !is_blank(v));
        let Some(value) = value else {
            return self.required;
        };
        self.constraints
            .iter()
            .find(|constraint| !constraint.holds(value))
            .map(Constraint::message)
    }
}

#[derive(Clone, Debug, Default)]
pub struct Schema {
    fields: Vec<(&'static str, FieldRule)>,
}

impl Schema {
    #[must_use]
    pub const fn new() -> Self {
        Self { fields: Vec::new() }
    }

    #[must_use]
    pub fn field(mut self, name: &'static str, rule: FieldRule) -> Self {
        self.fields.push((name, rule));
        self
    }

    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &FieldRule)> {
        self.fields.iter().map(|(name, rule)| (*name, rule))
    }
}

/// Field name to message, one entry per failing field.
#[derive(Clone, Debug, Default, Error, Eq, PartialEq)]
#[error("{} field(s) failed validation", .0.len())]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Check `values` against `schema`.
///
/// # Errors
///
/// Returns every failing field with its message.
pub fn validate(schema: &Schema, values: &Value) -> Result<(), ValidationErrors> {
    let errors: BTreeMap<String, String> = schema
        .fields()
        .filter_map(|(name, rule)| {
            rule.check(lookup(values, name))
                .map(|message| (name.to_string(), message.to_string()))
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(errors))
    }
}

fn lookup<'a>(values: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(values, |node, segment| node.as_object()?.get(segment))
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
