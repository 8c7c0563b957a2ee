//! Rendering of command output as JSON, YAML or a table

use std::io::IsTerminal;
use std::sync::OnceLock;

use anyhow::{Context, Result};
use comfy_table::Table;
use jpx_core::Runtime;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;

/// Global JMESPath runtime with extended functions
static JMESPATH_RUNTIME: OnceLock<Runtime> = OnceLock::new();

pub fn get_jmespath_runtime() -> &'static Runtime {
    JMESPATH_RUNTIME.get_or_init(|| Runtime::builder().with_all_extensions().build())
}

/// Normalize backtick literals in JMESPath expressions.
///
/// JMESPath allows elided quotes in backtick literals, so `` `foo` `` means
/// `` `"foo"` ``. The runtime only accepts valid JSON between backticks, so
/// bare words are quoted here; numbers, booleans, null and JSON values are
/// left untouched.
fn normalize_backtick_literals(query: &str) -> String {
    static BACKTICK_RE: OnceLock<Option<Regex>> = OnceLock::new();
    let Some(re) = BACKTICK_RE
        .get_or_init(|| Regex::new(r"`([^`\\]*(?:\\.[^`\\]*)*)`").ok())
        .as_ref()
    else {
        return query.to_string();
    };

    re.replace_all(query, |caps: &regex::Captures| {
        let content = &caps[1];
        let trimmed = content.trim();

        if serde_json::from_str::<Value>(trimmed).is_ok() {
            format!("`{}`", content)
        } else {
            let escaped = trimmed.replace('\\', "\\\\").replace('"', "\\\"");
            format!("`\"{}\"`", escaped)
        }
    })
    .into_owned()
}

/// Compile a JMESPath expression using the extended runtime.
pub fn compile_jmespath(
    query: &str,
) -> Result<jpx_core::Expression<'static>, jpx_core::JmespathError> {
    let normalized = normalize_backtick_literals(query);
    get_jmespath_runtime().compile(&normalized)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, Default)]
pub enum OutputFormat {
    /// Table for lists of records on a terminal, JSON otherwise
    #[default]
    Auto,
    Json,
    Yaml,
    Table,
}

impl OutputFormat {
    /// Pick a concrete format for `value`
    fn resolve(self, value: &Value, is_terminal: bool) -> OutputFormat {
        match self {
            OutputFormat::Auto if is_terminal && is_record_list(value) => OutputFormat::Table,
            OutputFormat::Auto => OutputFormat::Json,
            other => other,
        }
    }
}

fn is_record_list(value: &Value) -> bool {
    matches!(value, Value::Array(items) if !items.is_empty() && items.iter().all(Value::is_object))
}

/// Apply the optional JMESPath query to `data`
pub fn apply_query(data: Value, query: Option<&str>) -> Result<Value> {
    match query {
        Some(query_str) => {
            let expr = compile_jmespath(query_str)
                .with_context(|| format!("Invalid JMESPath expression: {}", query_str))?;
            expr.search(&data).context("JMESPath query failed")
        }
        None => Ok(data),
    }
}

/// Render `data` in `format` as a string, without a trailing newline
pub fn render<T: Serialize>(data: T, format: OutputFormat, query: Option<&str>) -> Result<String> {
    let json_value = apply_query(serde_json::to_value(data)?, query)?;

    let rendered = match format.resolve(&json_value, std::io::stdout().is_terminal()) {
        OutputFormat::Yaml => serde_yaml::to_string(&json_value)?
            .trim_end()
            .to_string(),
        OutputFormat::Table => render_table(&json_value),
        OutputFormat::Json | OutputFormat::Auto => serde_json::to_string_pretty(&json_value)?,
    };
    Ok(rendered)
}

pub fn print_output<T: Serialize>(
    data: T,
    format: OutputFormat,
    query: Option<&str>,
) -> Result<()> {
    println!("{}", render(data, format, query)?);
    Ok(())
}

fn render_table(value: &Value) -> String {
    match value {
        Value::Array(arr) if !arr.is_empty() => {
            let mut table = Table::new();

            if let Value::Object(first) = &arr[0] {
                let headers: Vec<String> = first.keys().cloned().collect();
                table.set_header(&headers);

                for item in arr {
                    if let Value::Object(obj) = item {
                        let row: Vec<String> = headers
                            .iter()
                            .map(|h| format_value(obj.get(h).unwrap_or(&Value::Null)))
                            .collect();
                        table.add_row(row);
                    }
                }
            } else {
                table.set_header(vec!["Value"]);
                for item in arr {
                    table.add_row(vec![format_value(item)]);
                }
            }

            table.to_string()
        }
        Value::Object(obj) => {
            let mut table = Table::new();
            table.set_header(vec!["Key", "Value"]);

            for (key, val) in obj {
                table.add_row(vec![key.clone(), format_value(val)]);
            }

            table.to_string()
        }
        _ => format_value(value),
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_backtick_unquoted_string() {
        assert_eq!(
            normalize_backtick_literals(r#"[?status==`ACTIVE`]"#),
            r#"[?status==`"ACTIVE"`]"#
        );
    }

    #[test]
    fn test_normalize_backtick_leaves_json_alone() {
        assert_eq!(
            normalize_backtick_literals(r#"[?status==`"ACTIVE"`]"#),
            r#"[?status==`"ACTIVE"`]"#
        );
        assert_eq!(
            normalize_backtick_literals(r#"[?units==`2`]"#),
            r#"[?units==`2`]"#
        );
        assert_eq!(
            normalize_backtick_literals(r#"[?enabled==`true`]"#),
            r#"[?enabled==`true`]"#
        );
    }

    #[test]
    fn test_apply_query_projects_field() {
        let data = json!([
            {"indexId": "idx-1", "status": "ACTIVE"},
            {"indexId": "idx-2", "status": "CREATING"}
        ]);
        let result = apply_query(data, Some("[?status==`ACTIVE`].indexId")).unwrap();
        assert_eq!(result, json!(["idx-1"]));
    }

    #[test]
    fn test_apply_query_rejects_invalid_expression() {
        let err = apply_query(json!({}), Some("[?")).unwrap_err();
        assert!(err.to_string().contains("Invalid JMESPath expression"));
    }

    #[test]
    fn test_auto_resolves_to_table_only_for_records_on_terminal() {
        let records = json!([{"a": 1}]);
        assert_eq!(
            OutputFormat::Auto.resolve(&records, true),
            OutputFormat::Table
        );
        assert_eq!(
            OutputFormat::Auto.resolve(&records, false),
            OutputFormat::Json
        );
        assert_eq!(
            OutputFormat::Auto.resolve(&json!("idx-1"), true),
            OutputFormat::Json
        );
        assert_eq!(
            OutputFormat::Yaml.resolve(&records, true),
            OutputFormat::Yaml
        );
    }

    #[test]
    fn test_render_scalar_json() {
        let rendered = render(json!("idx-1"), OutputFormat::Json, None).unwrap();
        assert_eq!(rendered, "\"idx-1\"");
    }

    #[test]
    fn test_render_table_of_records() {
        let table = render_table(&json!([
            {"applicationId": "app-1", "displayName": "Support"},
            {"applicationId": "app-2", "displayName": "Sales"}
        ]));
        assert!(table.contains("applicationId"));
        assert!(table.contains("app-2"));
        assert!(table.contains("Sales"));
    }

    #[test]
    fn test_format_value_summarizes_nested() {
        assert_eq!(format_value(&json!([1, 2, 3])), "[3 items]");
        assert_eq!(format_value(&json!({"a": 1})), "{1 fields}");
        assert_eq!(format_value(&Value::Null), "null");
    }
}
