//! Output selection: the whole response, one response field, or an echoed parameter

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use super::context::InvocationContext;
use super::descriptor::{OperationDescriptor, lower_first};
use crate::error::UsageError;

/// What an invocation emits on success
///
/// Parsed from the textual forms `*`, `FieldName` and `^ParameterName`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputSelector {
    WholeResponse,
    /// A top-level response field, PascalCase
    Field(&'static str),
    /// An input parameter, echoed as the caller supplied it
    EchoParameter(&'static str),
}

impl OutputSelector {
    /// Use `expr` when given, otherwise the operation's default
    pub fn resolve(
        expr: Option<&str>,
        operation: &OperationDescriptor,
    ) -> Result<Self, UsageError> {
        match expr {
            Some(expr) => Self::parse(expr, operation),
            None => Ok(operation.default_output),
        }
    }

    /// Parse a selector expression against the operation's declared fields and parameters
    pub fn parse(expr: &str, operation: &OperationDescriptor) -> Result<Self, UsageError> {
        let trimmed = expr.trim();
        let invalid = |reason: String| UsageError::InvalidSelector {
            selector: expr.to_string(),
            reason,
        };

        if trimmed.is_empty() {
            return Err(invalid("selector is empty".to_string()));
        }
        if trimmed == "*" {
            return Ok(OutputSelector::WholeResponse);
        }
        if let Some(param) = trimmed.strip_prefix('^') {
            let param = param.trim();
            if param.is_empty() {
                return Err(invalid("'^' must be followed by a parameter name".to_string()));
            }
            return operation
                .param(param)
                .map(|spec| OutputSelector::EchoParameter(spec.name))
                .ok_or_else(|| {
                    invalid(format!(
                        "'{}' is not a parameter of {}",
                        param, operation.name
                    ))
                });
        }

        operation
            .response_field(trimmed)
            .map(OutputSelector::Field)
            .ok_or_else(|| {
                let known = if operation.response_fields.is_empty() {
                    "the response has no fields; use '*'".to_string()
                } else {
                    format!(
                        "valid fields are {}",
                        operation.response_fields.join(", ")
                    )
                };
                invalid(format!(
                    "'{}' is not a field of the {} response; {}",
                    trimmed, operation.name, known
                ))
            })
    }

    /// Produce the output value for a response
    ///
    /// A field missing from the serialized response and an echoed parameter
    /// that was never bound both yield `null`.
    pub fn select<R: Serialize>(
        &self,
        response: &R,
        context: &InvocationContext,
    ) -> Result<Value, serde_json::Error> {
        match self {
            OutputSelector::WholeResponse => serde_json::to_value(response),
            OutputSelector::Field(field) => {
                let mut value = serde_json::to_value(response)?;
                let selected = value
                    .as_object_mut()
                    .and_then(|object| {
                        object
                            .remove(&lower_first(field))
                            .or_else(|| object.remove(*field))
                    })
                    .unwrap_or(Value::Null);
                Ok(selected)
            }
            OutputSelector::EchoParameter(param) => {
                Ok(context.supplied(param).cloned().unwrap_or(Value::Null))
            }
        }
    }
}

impl fmt::Display for OutputSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputSelector::WholeResponse => write!(f, "*"),
            OutputSelector::Field(field) => write!(f, "{}", field),
            OutputSelector::EchoParameter(param) => write!(f, "^{}", param),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::{Bindings, ParamKind, ParamSpec};
    use serde_json::json;

    static DESCRIPTOR: OperationDescriptor = OperationDescriptor {
        name: "CreateThing",
        params: &[
            ParamSpec::required("DisplayName", ParamKind::String),
            ParamSpec::optional("Description", ParamKind::String),
        ],
        response_fields: &["ThingId", "ThingArn"],
        default_output: OutputSelector::Field("ThingId"),
        confirm: None,
    };

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Response {
        thing_id: Option<String>,
        thing_arn: Option<String>,
    }

    fn context() -> InvocationContext {
        InvocationContext::bind(&DESCRIPTOR, Bindings::new().set("DisplayName", "My Thing"))
            .unwrap()
    }

    #[test]
    fn test_parse_forms() {
        assert_eq!(
            OutputSelector::parse("*", &DESCRIPTOR).unwrap(),
            OutputSelector::WholeResponse
        );
        assert_eq!(
            OutputSelector::parse("thingarn", &DESCRIPTOR).unwrap(),
            OutputSelector::Field("ThingArn")
        );
        assert_eq!(
            OutputSelector::parse("^displayName", &DESCRIPTOR).unwrap(),
            OutputSelector::EchoParameter("DisplayName")
        );
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = OutputSelector::parse("Nope", &DESCRIPTOR).unwrap_err();
        assert!(err.to_string().contains("ThingId, ThingArn"));
        assert!(OutputSelector::parse("^Nope", &DESCRIPTOR).is_err());
        assert!(OutputSelector::parse("^", &DESCRIPTOR).is_err());
        assert!(OutputSelector::parse("  ", &DESCRIPTOR).is_err());
    }

    #[test]
    fn test_resolve_falls_back_to_default() {
        assert_eq!(
            OutputSelector::resolve(None, &DESCRIPTOR).unwrap(),
            OutputSelector::Field("ThingId")
        );
    }

    #[test]
    fn test_select_field_and_whole() {
        let response = Response {
            thing_id: Some("t-1".into()),
            thing_arn: None,
        };
        let ctx = context();
        assert_eq!(
            OutputSelector::Field("ThingId")
                .select(&response, &ctx)
                .unwrap(),
            json!("t-1")
        );
        assert_eq!(
            OutputSelector::Field("ThingArn")
                .select(&response, &ctx)
                .unwrap(),
            Value::Null
        );
        assert_eq!(
            OutputSelector::WholeResponse
                .select(&response, &ctx)
                .unwrap(),
            json!({"thingId": "t-1", "thingArn": null})
        );
    }

    #[test]
    fn test_select_echo_parameter() {
        let response = Response {
            thing_id: Some("t-1".into()),
            thing_arn: None,
        };
        let ctx = context();
        assert_eq!(
            OutputSelector::EchoParameter("DisplayName")
                .select(&response, &ctx)
                .unwrap(),
            json!("My Thing")
        );
        assert_eq!(
            OutputSelector::EchoParameter("Description")
                .select(&response, &ctx)
                .unwrap(),
            Value::Null
        );
    }

    #[test]
    fn test_display_round_trips_forms() {
        assert_eq!(OutputSelector::WholeResponse.to_string(), "*");
        assert_eq!(OutputSelector::EchoParameter("IndexId").to_string(), "^IndexId");
    }
}
