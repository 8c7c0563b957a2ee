//! Confirmation of destructive operations

use std::fmt;
use std::io;

/// What the user is being asked to approve
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationRequest {
    pub operation: &'static str,
    pub action: &'static str,
    /// Identifier of the affected resource, when bound
    pub target: Option<String>,
}

impl fmt::Display for ConfirmationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.target {
            Some(target) => write!(f, "{} '{}' ({})", self.action, target, self.operation),
            None => write!(f, "{} ({})", self.action, self.operation),
        }
    }
}

/// Asks whether a destructive operation may proceed
///
/// `Ok(false)` aborts the invocation; an error fails it.
pub trait Confirmer: Send + Sync {
    fn confirm(&self, request: &ConfirmationRequest) -> io::Result<bool>;
}

impl<F> Confirmer for F
where
    F: Fn(&ConfirmationRequest) -> io::Result<bool> + Send + Sync,
{
    fn confirm(&self, request: &ConfirmationRequest) -> io::Result<bool> {
        self(request)
    }
}

/// Grants every confirmation
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl Confirmer for AssumeYes {
    fn confirm(&self, _request: &ConfirmationRequest) -> io::Result<bool> {
        Ok(true)
    }
}

/// Declines every confirmation, for non-interactive sessions without `--force`
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeNo;

impl Confirmer for AssumeNo {
    fn confirm(&self, _request: &ConfirmationRequest) -> io::Result<bool> {
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let request = ConfirmationRequest {
            operation: "DeleteIndex",
            action: "delete index",
            target: Some("idx-1".to_string()),
        };
        assert_eq!(request.to_string(), "delete index 'idx-1' (DeleteIndex)");
    }

    #[test]
    fn test_closure_confirmer() {
        let confirmer =
            |request: &ConfirmationRequest| -> io::Result<bool> { Ok(request.target.is_some()) };
        let request = ConfirmationRequest {
            operation: "DeleteIndex",
            action: "delete index",
            target: None,
        };
        assert!(!confirmer.confirm(&request).unwrap());
        assert!(AssumeYes.confirm(&request).unwrap());
        assert!(!AssumeNo.confirm(&request).unwrap());
    }
}
