use kit::types::diagnostics::Diagnostic;

/// Why a call to a provider function produced no usable result.
///
/// Every variant is scoped to the call that raised it: the caller still gets
/// the return type's unknown placeholder next to the error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FunctionCallError {
    #[error("argument \"{name}\" cannot be null")]
    ArgumentRejected { position: usize, name: String },

    #[error("function '{function}' expects {expected} argument(s), found {found}")]
    ArityMismatch { function: String, expected: String, found: usize },

    #[error("failed to launch provider plugin: {}", .cause.message)]
    LaunchFailure { cause: Diagnostic },

    #[error("{}", .0.message)]
    RemoteFailure(Diagnostic),

    #[error("provider returned no result and no errors")]
    ProtocolViolation,

    #[error("{}", inconsistent_result_message(.was.as_deref(), .now))]
    InconsistentResult {
        /// Rendering of the first recorded result, when it was kept in memory.
        was: Option<String>,
        now: String,
    },
}

fn inconsistent_result_message(was: Option<&str>, now: &str) -> String {
    match was {
        Some(was) => format!(
            "provider function returned an inconsistent result,\nwas: {},\nnow: {}",
            was, now
        ),
        None => "provider function returned an inconsistent result".to_string(),
    }
}

impl From<FunctionCallError> for Diagnostic {
    fn from(err: FunctionCallError) -> Self {
        match err {
            FunctionCallError::RemoteFailure(diagnostic) => diagnostic,
            FunctionCallError::LaunchFailure { ref cause } => {
                Diagnostic::error_from_string(err.to_string()).with_parent(cause.clone())
            }
            FunctionCallError::InconsistentResult { .. } => {
                Diagnostic::error_from_string(err.to_string()).with_suggestion(
                    "the provider function is registered as pure but is not; report this to the provider's developers",
                )
            }
            other => Diagnostic::error_from_string(other.to_string()),
        }
    }
}
