//! Parameter binding
//!
//! Callers hand over loosely typed [`Bindings`]; [`InvocationContext::bind`]
//! resolves names and aliases, validates every value against its declared
//! [`ParamKind`](super::ParamKind) and applies defaults. Binding is strict:
//! the first problem found stops the invocation with a [`UsageError`].

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::descriptor::OperationDescriptor;
use crate::error::UsageError;

/// Raw parameter values supplied by a caller
///
/// Two layers are kept: a structured input document and explicitly named
/// values. Explicit values win when both name the same parameter.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    structured: Option<Value>,
    explicit: Vec<(String, Value)>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a named value
    pub fn set(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.explicit.push((name.into(), value.into()));
        self
    }

    /// Bind a named value only when present
    pub fn set_opt<V: Into<Value>>(self, name: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.set(name, value),
            None => self,
        }
    }

    /// Supply a structured input document (a JSON object keyed by parameter name)
    pub fn with_structured(mut self, input: Value) -> Self {
        self.structured = Some(input);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.explicit.is_empty() && self.structured.is_none()
    }
}

/// Validated parameter values for one invocation
#[derive(Debug, Clone)]
pub struct InvocationContext {
    operation: &'static OperationDescriptor,
    /// Normalized values, shaped for the request
    values: BTreeMap<&'static str, Value>,
    /// Values as the caller supplied them
    supplied: BTreeMap<&'static str, Value>,
}

impl InvocationContext {
    /// Resolve, validate and default `bindings` for `operation`
    pub fn bind(
        operation: &'static OperationDescriptor,
        bindings: Bindings,
    ) -> Result<Self, UsageError> {
        let mut values = match bindings.structured {
            Some(Value::Object(input)) => collect_layer(operation, input)?,
            Some(Value::Null) | None => BTreeMap::new(),
            Some(other) => {
                return Err(UsageError::InvalidStructuredInput {
                    operation: operation.name,
                    found: json_kind(&other),
                });
            }
        };
        let explicit = collect_layer(operation, bindings.explicit)?;
        values.extend(explicit);

        let mut normalized = BTreeMap::new();
        let mut supplied = BTreeMap::new();
        for (name, value) in values {
            let spec = operation
                .param(name)
                .ok_or_else(|| UsageError::UnknownParameter {
                    operation: operation.name,
                    parameter: name.to_string(),
                })?;
            supplied.insert(spec.name, value.clone());
            let value = spec
                .kind
                .normalize(value)
                .map_err(|reason| UsageError::InvalidParameter {
                    operation: operation.name,
                    parameter: spec.name,
                    reason,
                })?;
            normalized.insert(spec.name, value);
        }

        for spec in operation.params {
            if normalized.contains_key(spec.name) {
                continue;
            }
            if let Some(default) = spec.default {
                supplied.insert(spec.name, default.to_value());
                normalized.insert(spec.name, default.to_value());
            } else if spec.required {
                return Err(UsageError::MissingParameter {
                    operation: operation.name,
                    parameter: spec.name,
                });
            }
        }

        Ok(Self {
            operation,
            values: normalized,
            supplied,
        })
    }

    pub fn operation(&self) -> &'static OperationDescriptor {
        self.operation
    }

    /// Returns true if the parameter was supplied or defaulted
    pub fn is_bound(&self, name: &str) -> bool {
        self.raw(name).is_some()
    }

    /// The normalized value of a bound parameter
    pub fn raw(&self, name: &str) -> Option<&Value> {
        let spec = self.operation.param(name)?;
        self.values.get(spec.name)
    }

    /// A bound parameter exactly as supplied, before normalization
    ///
    /// Defaulted parameters report their default.
    pub fn supplied(&self, name: &str) -> Option<&Value> {
        let spec = self.operation.param(name)?;
        self.supplied.get(spec.name)
    }

    /// Names of every bound parameter, in canonical spelling
    pub fn bound_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.values.keys().copied()
    }

    /// Read an optional parameter as `T`
    pub fn get<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, UsageError> {
        let spec = self
            .operation
            .param(name)
            .ok_or_else(|| UsageError::UnknownParameter {
                operation: self.operation.name,
                parameter: name.to_string(),
            })?;
        match self.values.get(spec.name) {
            None => Ok(None),
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|e| UsageError::InvalidParameter {
                    operation: self.operation.name,
                    parameter: spec.name,
                    reason: e.to_string(),
                }),
        }
    }

    /// Read a parameter that must be present as `T`
    pub fn require<T: DeserializeOwned>(&self, name: &str) -> Result<T, UsageError> {
        self.get(name)?.ok_or_else(|| UsageError::MissingParameter {
            operation: self.operation.name,
            parameter: self
                .operation
                .param(name)
                .map(|spec| spec.name)
                .unwrap_or("<undeclared>"),
        })
    }
}

/// Resolve one layer of raw values to canonical names
///
/// `null` counts as not supplied. Two spellings of one parameter within the
/// same layer are rejected.
fn collect_layer(
    operation: &'static OperationDescriptor,
    layer: impl IntoIterator<Item = (String, Value)>,
) -> Result<BTreeMap<&'static str, Value>, UsageError> {
    let mut resolved = BTreeMap::new();
    for (name, value) in layer {
        let spec = operation
            .param(&name)
            .ok_or_else(|| UsageError::UnknownParameter {
                operation: operation.name,
                parameter: name.clone(),
            })?;
        if value.is_null() {
            continue;
        }
        if resolved.insert(spec.name, value).is_some() {
            return Err(UsageError::DuplicateParameter {
                operation: operation.name,
                parameter: spec.name,
            });
        }
    }
    Ok(resolved)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

impl From<Map<String, Value>> for Bindings {
    fn from(input: Map<String, Value>) -> Self {
        Bindings::new().with_structured(Value::Object(input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::{OutputSelector, ParamDefault, ParamKind, ParamSpec};
    use serde_json::json;

    static DESCRIPTOR: OperationDescriptor = OperationDescriptor {
        name: "ListThings",
        params: &[
            ParamSpec::required("ApplicationId", ParamKind::String),
            ParamSpec::optional("MaxResult", ParamKind::Integer)
                .aliases(&["MaxResults", "MaxItems"]),
            ParamSpec::optional("Mode", ParamKind::Enum(&["FAST", "SLOW"]))
                .default_value(ParamDefault::Text("FAST")),
            ParamSpec::optional("DataSourceId", ParamKind::StringList),
        ],
        response_fields: &["Things"],
        default_output: OutputSelector::Field("Things"),
        confirm: None,
    };

    #[test]
    fn test_bind_resolves_aliases_and_case() {
        let ctx = InvocationContext::bind(
            &DESCRIPTOR,
            Bindings::new()
                .set("applicationid", "app-1")
                .set("MaxResults", "10"),
        )
        .unwrap();

        assert_eq!(ctx.require::<String>("ApplicationId").unwrap(), "app-1");
        assert_eq!(ctx.get::<i32>("MaxResult").unwrap(), Some(10));
        assert_eq!(ctx.raw("maxitems"), Some(&json!(10)));
    }

    #[test]
    fn test_bind_applies_defaults() {
        let ctx =
            InvocationContext::bind(&DESCRIPTOR, Bindings::new().set("ApplicationId", "a"))
                .unwrap();
        assert_eq!(ctx.get::<String>("Mode").unwrap().as_deref(), Some("FAST"));
        assert!(!ctx.is_bound("DataSourceId"));
        assert_eq!(
            ctx.bound_names().collect::<Vec<_>>(),
            vec!["ApplicationId", "Mode"]
        );
    }

    #[test]
    fn test_missing_required_parameter() {
        let err = InvocationContext::bind(&DESCRIPTOR, Bindings::new().set("MaxResult", 5))
            .unwrap_err();
        assert_eq!(
            err,
            UsageError::MissingParameter {
                operation: "ListThings",
                parameter: "ApplicationId"
            }
        );
    }

    #[test]
    fn test_null_counts_as_unset() {
        let err = InvocationContext::bind(
            &DESCRIPTOR,
            Bindings::new().set("ApplicationId", Value::Null),
        )
        .unwrap_err();
        assert!(matches!(err, UsageError::MissingParameter { .. }));
    }

    #[test]
    fn test_unknown_parameter_rejected() {
        let err = InvocationContext::bind(
            &DESCRIPTOR,
            Bindings::new().set("ApplicationId", "a").set("Bogus", 1),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            UsageError::UnknownParameter { ref parameter, .. } if parameter == "Bogus"
        ));
    }

    #[test]
    fn test_duplicate_spelling_rejected() {
        let err = InvocationContext::bind(
            &DESCRIPTOR,
            Bindings::new()
                .set("ApplicationId", "a")
                .set("MaxResult", 1)
                .set("MaxItems", 2),
        )
        .unwrap_err();
        assert_eq!(
            err,
            UsageError::DuplicateParameter {
                operation: "ListThings",
                parameter: "MaxResult"
            }
        );
    }

    #[test]
    fn test_invalid_value_rejected() {
        let err = InvocationContext::bind(
            &DESCRIPTOR,
            Bindings::new().set("ApplicationId", "a").set("Mode", "medium"),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            UsageError::InvalidParameter { parameter: "Mode", .. }
        ));
    }

    #[test]
    fn test_explicit_values_override_structured_input() {
        let bindings = Bindings::new()
            .with_structured(json!({"ApplicationId": "from-json", "MaxResults": 3}))
            .set("applicationId", "from-flag");
        let ctx = InvocationContext::bind(&DESCRIPTOR, bindings).unwrap();
        assert_eq!(ctx.require::<String>("ApplicationId").unwrap(), "from-flag");
        assert_eq!(ctx.get::<i64>("MaxResult").unwrap(), Some(3));
    }

    #[test]
    fn test_structured_input_must_be_object() {
        let err = InvocationContext::bind(
            &DESCRIPTOR,
            Bindings::new().with_structured(json!(["ApplicationId"])),
        )
        .unwrap_err();
        assert_eq!(
            err,
            UsageError::InvalidStructuredInput {
                operation: "ListThings",
                found: "a list"
            }
        );
    }

    #[test]
    fn test_supplied_keeps_caller_spelling() {
        let ctx = InvocationContext::bind(
            &DESCRIPTOR,
            Bindings::new()
                .set("ApplicationId", "a")
                .set("MaxResult", "10")
                .set("Mode", "slow")
                .set("DataSourceId", "ds-1"),
        )
        .unwrap();

        assert_eq!(ctx.supplied("MaxResult"), Some(&json!("10")));
        assert_eq!(ctx.raw("MaxResult"), Some(&json!(10)));
        assert_eq!(ctx.supplied("mode"), Some(&json!("slow")));
        assert_eq!(ctx.raw("Mode"), Some(&json!("SLOW")));
        assert_eq!(ctx.supplied("DataSourceId"), Some(&json!("ds-1")));
        assert_eq!(ctx.raw("DataSourceId"), Some(&json!(["ds-1"])));
    }

    #[test]
    fn test_get_rejects_out_of_range_integer() {
        let ctx = InvocationContext::bind(
            &DESCRIPTOR,
            Bindings::new()
                .set("ApplicationId", "a")
                .set("MaxResult", 10_000_000_000_i64),
        )
        .unwrap();
        assert!(ctx.get::<i32>("MaxResult").is_err());
    }
}
