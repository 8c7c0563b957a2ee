//! The command adapter
//!
//! Every remote operation runs through the same pipeline:
//!
//! 1. bind parameters into an [`InvocationContext`]
//! 2. resolve the [`OutputSelector`]
//! 3. build the typed request from the bound parameters only
//! 4. ask a [`Confirmer`] when the operation is destructive, unless forced
//! 5. dispatch it through the injected [`QBusinessApi`], racing cancellation
//! 6. project the response through the selector
//!
//! The request is built before the prompt so a malformed one never asks the
//! user first; [`InvocationState::RequestBuilt`] is entered once it is cleared
//! for dispatch.
//!
//! The result is an [`Invocation`]: its [`Outcome`] plus the ordered
//! [`InvocationState`] trail it passed through.
//!
//! # Example
//!
//! ```rust,no_run
//! use qbizctl_core::adapter::{AssumeYes, Bindings, CommandAdapter, InvocationOptions, Outcome};
//! use qbizctl_core::operations::ListDocuments;
//! use qbizctl_core::QBusinessClient;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = QBusinessClient::builder("https://qbusiness.us-east-1.amazonaws.com")
//!     .token("token")
//!     .build()?;
//!
//! let invocation = CommandAdapter::new(ListDocuments)
//!     .invoke(
//!         &client,
//!         &AssumeYes,
//!         Bindings::new().set("ApplicationId", "app-1").set("IndexId", "idx-1"),
//!         &InvocationOptions::default(),
//!         &CancellationToken::new(),
//!     )
//!     .await;
//!
//! if let Outcome::Succeeded(documents) = invocation.outcome() {
//!     println!("{documents}");
//! }
//! # Ok(())
//! # }
//! ```

mod confirm;
mod context;
mod descriptor;
mod selector;

pub use confirm::{AssumeNo, AssumeYes, ConfirmationRequest, Confirmer};
pub use context::{Bindings, InvocationContext};
pub use descriptor::{ConfirmSpec, OperationDescriptor, ParamDefault, ParamKind, ParamSpec};
pub use selector::OutputSelector;

use std::fmt;
use std::io;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::api::{ApiResult, QBusinessApi};
use crate::error::{CoreError, UsageError};

/// One remote operation: its descriptor, request construction and dispatch
#[async_trait]
pub trait Operation: Send + Sync {
    type Request: fmt::Debug + Send + 'static;
    type Response: Serialize + Send + 'static;

    fn descriptor(&self) -> &'static OperationDescriptor;

    /// Build the request from bound parameters; unbound optionals stay unset
    fn build_request(&self, context: &InvocationContext) -> Result<Self::Request, UsageError>;

    async fn call(
        &self,
        client: &dyn QBusinessApi,
        request: Self::Request,
    ) -> ApiResult<Self::Response>;
}

/// Lifecycle of a single invocation, in the order states are entered
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InvocationState {
    Created,
    ParametersBound,
    ConfirmationPending,
    ConfirmationGranted,
    RequestBuilt,
    Dispatched,
    Succeeded,
    Failed,
    Cancelled,
    Aborted,
}

impl InvocationState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            InvocationState::Succeeded
                | InvocationState::Failed
                | InvocationState::Cancelled
                | InvocationState::Aborted
        )
    }
}

impl fmt::Display for InvocationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InvocationState::Created => "created",
            InvocationState::ParametersBound => "parameters-bound",
            InvocationState::ConfirmationPending => "confirmation-pending",
            InvocationState::ConfirmationGranted => "confirmation-granted",
            InvocationState::RequestBuilt => "request-built",
            InvocationState::Dispatched => "dispatched",
            InvocationState::Succeeded => "succeeded",
            InvocationState::Failed => "failed",
            InvocationState::Cancelled => "cancelled",
            InvocationState::Aborted => "aborted",
        };
        f.write_str(name)
    }
}

/// How an invocation ended
#[derive(Debug)]
pub enum Outcome {
    /// The selected output
    Succeeded(Value),
    Failed(CoreError),
    /// Cancellation was signalled before the call completed
    Cancelled,
    /// The user declined confirmation; nothing was sent
    Aborted,
}

impl Outcome {
    pub fn state(&self) -> InvocationState {
        match self {
            Outcome::Succeeded(_) => InvocationState::Succeeded,
            Outcome::Failed(_) => InvocationState::Failed,
            Outcome::Cancelled => InvocationState::Cancelled,
            Outcome::Aborted => InvocationState::Aborted,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Succeeded(_))
    }

    pub fn output(&self) -> Option<&Value> {
        match self {
            Outcome::Succeeded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&CoreError> {
        match self {
            Outcome::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Caller choices that are not operation parameters
#[derive(Debug, Clone, Default)]
pub struct InvocationOptions {
    /// Selector expression; the operation default applies when unset
    pub select: Option<String>,
    /// Skip confirmation of destructive operations
    pub force: bool,
}

impl InvocationOptions {
    pub fn select(mut self, select: impl Into<String>) -> Self {
        self.select = Some(select.into());
        self
    }

    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }
}

/// The result of running an operation through the adapter
#[derive(Debug)]
pub struct Invocation {
    outcome: Outcome,
    trail: Vec<InvocationState>,
}

impl Invocation {
    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    pub fn into_outcome(self) -> Outcome {
        self.outcome
    }

    /// Every state entered, in order, ending with the terminal state
    pub fn trail(&self) -> &[InvocationState] {
        &self.trail
    }

    pub fn reached(&self, state: InvocationState) -> bool {
        self.trail.contains(&state)
    }
}

struct Trail {
    operation: &'static str,
    states: Vec<InvocationState>,
}

impl Trail {
    fn start(operation: &'static str) -> Self {
        let mut trail = Self {
            operation,
            states: Vec::with_capacity(8),
        };
        trail.advance(InvocationState::Created);
        trail
    }

    fn advance(&mut self, next: InvocationState) {
        debug_assert!(
            self.states.last().is_none_or(|last| *last < next),
            "invocation state went backwards"
        );
        debug!(operation = self.operation, state = %next, "Invocation state");
        self.states.push(next);
    }

    fn finish(mut self, outcome: Outcome) -> Invocation {
        self.advance(outcome.state());
        Invocation {
            outcome,
            trail: self.states,
        }
    }

    fn fail(self, error: impl Into<CoreError>) -> Invocation {
        let error = error.into();
        debug!(operation = self.operation, error = %error, "Invocation failed");
        self.finish(Outcome::Failed(error))
    }
}

/// Runs an [`Operation`] through the shared invocation pipeline
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandAdapter<O> {
    operation: O,
}

impl<O: Operation> CommandAdapter<O> {
    pub fn new(operation: O) -> Self {
        Self { operation }
    }

    pub fn descriptor(&self) -> &'static OperationDescriptor {
        self.operation.descriptor()
    }

    /// Run one invocation to a terminal state
    ///
    /// Never panics and never returns early with an error: every failure is
    /// reported through [`Outcome::Failed`].
    pub async fn invoke(
        &self,
        client: &dyn QBusinessApi,
        confirmer: &dyn Confirmer,
        bindings: Bindings,
        options: &InvocationOptions,
        cancel: &CancellationToken,
    ) -> Invocation {
        let descriptor = self.operation.descriptor();
        let operation = descriptor.name;
        let mut trail = Trail::start(operation);

        if cancel.is_cancelled() {
            return trail.finish(Outcome::Cancelled);
        }

        let context = match InvocationContext::bind(descriptor, bindings) {
            Ok(context) => context,
            Err(e) => return trail.fail(e),
        };
        trail.advance(InvocationState::ParametersBound);

        let selector = match OutputSelector::resolve(options.select.as_deref(), descriptor) {
            Ok(selector) => selector,
            Err(e) => return trail.fail(e),
        };

        let request = match self.operation.build_request(&context) {
            Ok(request) => request,
            Err(e) => return trail.fail(e),
        };

        if let Some(confirm) = descriptor.confirm
            && !options.force
        {
            trail.advance(InvocationState::ConfirmationPending);
            let prompt = ConfirmationRequest {
                operation,
                action: confirm.action,
                target: context.raw(confirm.target).map(display_value),
            };
            match confirmer.confirm(&prompt) {
                Ok(true) => trail.advance(InvocationState::ConfirmationGranted),
                Ok(false) => {
                    info!(operation, "Confirmation declined, nothing sent");
                    return trail.finish(Outcome::Aborted);
                }
                // Ctrl-C at a terminal prompt surfaces as an interrupted read
                Err(e) if cancel.is_cancelled() || e.kind() == io::ErrorKind::Interrupted => {
                    warn!(operation, "Invocation cancelled at the confirmation prompt");
                    return trail.finish(Outcome::Cancelled);
                }
                Err(e) => return trail.fail(CoreError::Prompt(e)),
            }
        }

        if cancel.is_cancelled() {
            return trail.finish(Outcome::Cancelled);
        }
        trail.advance(InvocationState::RequestBuilt);
        debug!(operation, ?request, "Request built");
        trail.advance(InvocationState::Dispatched);
        info!(operation, endpoint = ?client.endpoint(), "Dispatching request");

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            result = self.operation.call(client, request) => Some(result),
        };

        match result {
            None => {
                warn!(operation, "Invocation cancelled while the request was in flight");
                trail.finish(Outcome::Cancelled)
            }
            Some(Ok(response)) => match selector.select(&response, &context) {
                Ok(output) => {
                    info!(operation, %selector, "Invocation succeeded");
                    trail.finish(Outcome::Succeeded(output))
                }
                Err(source) => trail.fail(CoreError::Output { operation, source }),
            },
            Some(Err(e)) => trail.fail(CoreError::from_api(operation, client.endpoint(), e)),
        }
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
