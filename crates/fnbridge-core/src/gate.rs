use kit::types::functions::{FunctionDecl, FunctionParam};
use kit::types::types::Value;

use crate::errors::FunctionCallError;

/// What the parameter gate decided for a whole argument list.
#[derive(Debug, Clone, PartialEq)]
pub enum GateDecision {
    /// Every argument may be forwarded to the provider unchanged.
    Proceed,
    /// An argument is not wholly known where the parameter does not opt in:
    /// the call evaluates to unknown, without error.
    Unknown,
    /// The call fails with the unknown placeholder and this error.
    Rejected(FunctionCallError),
}

/// Checks a single argument against the parameter it is matched with.
pub fn check_argument(param: &FunctionParam, position: usize, arg: &Value) -> GateDecision {
    // Providers are promised they will not see even nested unknowns unless
    // they ask for them.
    if !param.allow_unknown_values && !arg.is_wholly_known() {
        return GateDecision::Unknown;
    }
    if !param.accepts_null() && arg.is_null() {
        return GateDecision::Rejected(FunctionCallError::ArgumentRejected {
            position,
            name: param.name.clone(),
        });
    }
    GateDecision::Proceed
}

/// Runs the gate over `args` in positional order; the first argument that
/// does not proceed decides the outcome of the call.
pub fn check_arguments(function: &str, decl: &FunctionDecl, args: &[Value]) -> GateDecision {
    if !decl.accepts_arity(args.len()) {
        return GateDecision::Rejected(FunctionCallError::ArityMismatch {
            function: function.to_string(),
            expected: decl.expected_arity(),
            found: args.len(),
        });
    }

    for (position, arg) in args.iter().enumerate() {
        let Some(param) = decl.parameter_at(position) else {
            continue;
        };
        match check_argument(param, position, arg) {
            GateDecision::Proceed => {}
            decision => return decision,
        }
    }
    GateDecision::Proceed
}
