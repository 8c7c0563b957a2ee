//! Running one operation through the command adapter

use std::io::{self, IsTerminal};
use std::path::Path;

use qbizctl_core::adapter::{AssumeNo, ConfirmationRequest, Confirmer};
use qbizctl_core::{Bindings, CommandAdapter, InvocationOptions, Operation, Outcome};
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::cli::{ForceArgs, InputArgs, OutputFormat, PageArgs};
use crate::connection::ConnectionManager;
use crate::error::{QbizCtlError, Result};
use crate::output;

/// Everything an operation command needs besides its own parameters
pub struct InvokeEnv<'a> {
    pub conn_mgr: &'a ConnectionManager,
    pub profile: Option<&'a str>,
    pub output: OutputFormat,
    pub query: Option<&'a str>,
    pub select: Option<&'a str>,
    pub cancel: &'a CancellationToken,
}

/// Interactive yes/no prompt, defaulting to no
struct PromptConfirmer;

impl Confirmer for PromptConfirmer {
    fn confirm(&self, request: &ConfirmationRequest) -> io::Result<bool> {
        dialoguer::Confirm::new()
            .with_prompt(format!("Are you sure you want to {}?", request))
            .default(false)
            .interact()
            .map_err(|dialoguer::Error::IO(e)| e)
    }
}

/// Parse `--input-json`, reading `@path` from disk
pub fn read_structured_input(input: &InputArgs) -> Result<Option<Value>> {
    let Some(raw) = input.input_json.as_deref() else {
        return Ok(None);
    };

    let text = match raw.strip_prefix('@') {
        Some(path) => {
            std::fs::read_to_string(Path::new(path)).map_err(|e| QbizCtlError::FileError {
                path: path.to_string(),
                message: e.to_string(),
            })?
        }
        None => raw.to_string(),
    };

    serde_json::from_str(&text)
        .map(Some)
        .map_err(|e| QbizCtlError::InvalidInput {
            message: format!("--input-json is not valid JSON: {}", e),
        })
}

/// Bind the paging flags shared by list operations
pub fn page_bindings(bindings: Bindings, page: &PageArgs) -> Bindings {
    bindings
        .set_opt("MaxResult", page.max_results)
        .set_opt("NextToken", page.next_token.clone())
}

/// Bind `values` as a list, leaving the parameter unset when empty
pub fn list_binding<V: Into<Value>>(bindings: Bindings, name: &str, values: Vec<V>) -> Bindings {
    if values.is_empty() {
        bindings
    } else {
        bindings.set(name, Value::Array(values.into_iter().map(Into::into).collect()))
    }
}

/// Bind `KEY=VALUE` tags as records
pub fn tag_binding(bindings: Bindings, tags: &[(String, String)]) -> Bindings {
    let records = tags
        .iter()
        .map(|(key, value)| serde_json::json!({ "Key": key, "Value": value }))
        .collect::<Vec<_>>();
    list_binding(bindings, "Tag", records)
}

/// Run `operation` and print its output
///
/// An aborted confirmation is not an error. Cancellation maps to
/// [`QbizCtlError::Cancelled`].
pub async fn run_operation<O: Operation>(
    env: &InvokeEnv<'_>,
    operation: O,
    bindings: Bindings,
    input: &InputArgs,
    force: ForceArgs,
) -> Result<()> {
    let adapter = CommandAdapter::new(operation);
    let name = adapter.descriptor().name;

    let bindings = match read_structured_input(input)? {
        Some(structured) => bindings.with_structured(structured),
        None => bindings,
    };

    let client = env.conn_mgr.create_client(env.profile)?;

    let confirmer: &dyn Confirmer = if io::stdin().is_terminal() {
        &PromptConfirmer
    } else {
        &AssumeNo
    };

    let mut options = InvocationOptions::default().force(force.force);
    if let Some(select) = env.select {
        options = options.select(select);
    }

    let cancel = env.cancel.child_token();
    let invocation = adapter
        .invoke(&client, confirmer, bindings, &options, &cancel)
        .await;
    debug!(operation = name, trail = ?invocation.trail(), "Invocation finished");

    match invocation.into_outcome() {
        Outcome::Succeeded(value) => {
            output::print_output(value, env.output, env.query).map_err(|e| {
                QbizCtlError::OutputError {
                    message: format!("{:#}", e),
                }
            })
        }
        Outcome::Aborted => {
            info!(operation = name, "Aborted by user");
            if !io::stdin().is_terminal() {
                eprintln!(
                    "{} requires confirmation; re-run with --force in non-interactive sessions",
                    name
                );
            } else {
                eprintln!("Aborted, nothing was sent");
            }
            Ok(())
        }
        Outcome::Cancelled => Err(QbizCtlError::Cancelled),
        Outcome::Failed(err) => Err(err.into()),
    }
}
