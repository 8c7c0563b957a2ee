//! Static description of an operation's parameters, response and confirmation policy

use serde_json::{Map, Number, Value};

use super::selector::OutputSelector;

/// How a bound parameter value is validated and normalized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    String,
    Integer,
    /// A list of strings; a single string is wrapped into a one-element list
    StringList,
    /// A list of records; a single record is wrapped into a one-element list
    RecordList,
    /// An object whose values are records
    RecordMap,
    /// A string restricted to the listed values, matched case-insensitively
    Enum(&'static [&'static str]),
}

impl ParamKind {
    /// Validate `value` against this kind and return its canonical form
    pub(crate) fn normalize(&self, value: Value) -> Result<Value, String> {
        match self {
            ParamKind::String => match value {
                Value::String(_) => Ok(value),
                Value::Number(n) => Ok(Value::String(n.to_string())),
                Value::Bool(b) => Ok(Value::String(b.to_string())),
                other => Err(format!("expected a string, got {}", kind_name(&other))),
            },
            ParamKind::Integer => match value {
                Value::Number(ref n) if n.is_i64() || n.is_u64() => Ok(value),
                Value::String(s) => s
                    .trim()
                    .parse::<i64>()
                    .map(|n| Value::Number(Number::from(n)))
                    .map_err(|_| format!("expected an integer, got '{}'", s)),
                other => Err(format!("expected an integer, got {}", kind_name(&other))),
            },
            ParamKind::StringList => match value {
                Value::Array(items) => items
                    .into_iter()
                    .map(|item| ParamKind::String.normalize(item))
                    .collect::<Result<Vec<_>, _>>()
                    .map(Value::Array),
                scalar => ParamKind::String
                    .normalize(scalar)
                    .map(|s| Value::Array(vec![s])),
            },
            ParamKind::RecordList => match value {
                Value::Array(items) => items
                    .into_iter()
                    .map(record)
                    .collect::<Result<Vec<_>, _>>()
                    .map(Value::Array),
                Value::Object(_) => record(value).map(|r| Value::Array(vec![r])),
                other => Err(format!(
                    "expected a record or list of records, got {}",
                    kind_name(&other)
                )),
            },
            ParamKind::RecordMap => match value {
                Value::Object(entries) => entries
                    .into_iter()
                    .map(|(key, entry)| record(entry).map(|r| (key, r)))
                    .collect::<Result<Map<_, _>, _>>()
                    .map(Value::Object),
                other => Err(format!(
                    "expected a map of records, got {}",
                    kind_name(&other)
                )),
            },
            ParamKind::Enum(allowed) => {
                let text = match &value {
                    Value::String(s) => s.as_str(),
                    other => {
                        return Err(format!(
                            "expected one of {}, got {}",
                            allowed.join(", "),
                            kind_name(other)
                        ));
                    }
                };
                allowed
                    .iter()
                    .find(|candidate| candidate.eq_ignore_ascii_case(text.trim()))
                    .map(|canonical| Value::String((*canonical).to_string()))
                    .ok_or_else(|| format!("expected one of {}, got '{}'", allowed.join(", "), text))
            }
        }
    }
}

fn record(value: Value) -> Result<Value, String> {
    match value {
        Value::Object(_) => Ok(camel_case_keys(value)),
        other => Err(format!("expected a record, got {}", kind_name(&other))),
    }
}

/// Lower the first letter of every object key so `Key`/`Value` style records
/// land on the service's camelCase wire names
pub(crate) fn camel_case_keys(value: Value) -> Value {
    match value {
        Value::Object(entries) => Value::Object(
            entries
                .into_iter()
                .map(|(key, v)| (lower_first(&key), camel_case_keys(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(camel_case_keys).collect()),
        other => other,
    }
}

pub(crate) fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a record",
    }
}

/// Value applied when an optional parameter is not supplied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamDefault {
    Integer(i64),
    Text(&'static str),
}

impl ParamDefault {
    pub(crate) fn to_value(self) -> Value {
        match self {
            ParamDefault::Integer(n) => Value::Number(Number::from(n)),
            ParamDefault::Text(s) => Value::String(s.to_string()),
        }
    }
}

/// One declared parameter of an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub required: bool,
    pub aliases: &'static [&'static str],
    pub default: Option<ParamDefault>,
}

impl ParamSpec {
    pub const fn required(name: &'static str, kind: ParamKind) -> Self {
        Self {
            name,
            kind,
            required: true,
            aliases: &[],
            default: None,
        }
    }

    pub const fn optional(name: &'static str, kind: ParamKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            aliases: &[],
            default: None,
        }
    }

    pub const fn aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    pub const fn default_value(mut self, default: ParamDefault) -> Self {
        self.default = Some(default);
        self
    }

    /// Case-insensitive match against the name and every alias
    pub fn matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
            || self.aliases.iter().any(|alias| alias.eq_ignore_ascii_case(name))
    }
}

/// Confirmation policy for destructive operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmSpec {
    /// Human readable action, e.g. "delete index"
    pub action: &'static str,
    /// Parameter naming the affected resource
    pub target: &'static str,
}

/// Everything the adapter needs to know about one remote operation
#[derive(Debug)]
pub struct OperationDescriptor {
    pub name: &'static str,
    pub params: &'static [ParamSpec],
    /// Top-level response fields, PascalCase
    pub response_fields: &'static [&'static str],
    pub default_output: OutputSelector,
    pub confirm: Option<ConfirmSpec>,
}

impl OperationDescriptor {
    /// Look up a parameter by name or alias
    pub fn param(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|spec| spec.matches(name))
    }

    /// Canonical spelling of a declared response field
    pub fn response_field(&self, name: &str) -> Option<&'static str> {
        self.response_fields
            .iter()
            .copied()
            .find(|field| field.eq_ignore_ascii_case(name))
    }

    pub fn requires_confirmation(&self) -> bool {
        self.confirm.is_some()
    }

    pub fn required_params(&self) -> impl Iterator<Item = &ParamSpec> {
        self.params.iter().filter(|spec| spec.required)
    }
}
