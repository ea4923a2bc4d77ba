use std::sync::Arc;

use kit::types::diagnostics::Diagnostic;
use kit::types::functions::FunctionDecl;
use kit::types::provider::{CallFunctionRequest, ProviderAddr, ProviderFactory};
use kit::types::type_compatibility::TypeChecker;
use kit::types::types::{Type, Value};

use crate::cache::FunctionResultsCache;
use crate::errors::FunctionCallError;
use crate::gate::{check_arguments, GateDecision};
use crate::Context;

/// The value produced by a call, and the error explaining it when the call failed.
///
/// A failed call still yields a value of the declared return type: the unknown
/// placeholder, so that evaluation of sibling expressions can continue.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionOutcome {
    pub value: Value,
    pub error: Option<FunctionCallError>,
}

impl FunctionOutcome {
    fn success(value: Value) -> Self {
        FunctionOutcome { value, error: None }
    }

    fn failure(return_type: &Type, error: FunctionCallError) -> Self {
        FunctionOutcome { value: Value::unknown(return_type.clone()), error: Some(error) }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn into_result(self) -> Result<Value, Diagnostic> {
        match self.error {
            Some(error) => Err(error.into()),
            None => Ok(self.value),
        }
    }
}

/// A provider function ready to be called by the host.
///
/// Built from the declaration the provider published, the name it registered
/// it under and a factory yielding an unconfigured instance of that provider.
/// If the name does not match the provider's registry, or the factory yields a
/// different or configured provider, calls have undefined results.
#[derive(Clone)]
pub struct ProviderFunction {
    provider: ProviderAddr,
    name: String,
    decl: Arc<FunctionDecl>,
    factory: ProviderFactory,
    results: Arc<FunctionResultsCache>,
    ctx: Context,
}

impl ProviderFunction {
    /// Callers should pass a factory that reuses running plugins, since it may
    /// be invoked on every call.
    pub fn build(
        decl: FunctionDecl,
        provider: ProviderAddr,
        name: &str,
        factory: ProviderFactory,
        results: Arc<FunctionResultsCache>,
        ctx: &Context,
    ) -> ProviderFunction {
        ProviderFunction {
            provider,
            name: name.to_string(),
            decl: Arc::new(decl),
            factory,
            results,
            ctx: ctx.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn provider(&self) -> &ProviderAddr {
        &self.provider
    }

    pub fn declaration(&self) -> &FunctionDecl {
        &self.decl
    }

    pub fn return_type(&self) -> &Type {
        &self.decl.return_type
    }

    /// Static check of argument types, yielding the declared return type.
    pub fn check_argument_types(&self, args: &[Type]) -> Result<Type, Diagnostic> {
        if !self.decl.accepts_arity(args.len()) {
            return Err(FunctionCallError::ArityMismatch {
                function: self.name.clone(),
                expected: self.decl.expected_arity(),
                found: args.len(),
            }
            .into());
        }
        for (position, actual) in args.iter().enumerate() {
            let Some(param) = self.decl.parameter_at(position) else {
                continue;
            };
            if !TypeChecker::types_compatible(actual, &param.typing) {
                return Err(diagnosed_error!(
                    "function '{}' argument #{} ({}) should be of type {}, found {}",
                    self.name,
                    position + 1,
                    param.name,
                    param.typing.to_string(),
                    actual.to_string()
                ));
            }
        }
        Ok(self.decl.return_type.clone())
    }

    pub fn call(&self, args: &[Value]) -> FunctionOutcome {
        let return_type = &self.decl.return_type;

        match check_arguments(&self.name, &self.decl, args) {
            GateDecision::Proceed => {}
            GateDecision::Unknown => return FunctionOutcome::success(Value::unknown(return_type.clone())),
            GateDecision::Rejected(error) => return FunctionOutcome::failure(return_type, error),
        }

        if self.ctx.tracer {
            self.ctx.try_log(|logger| {
                debug!(logger, "calling {}::{} with {} argument(s)", self.provider, self.name, args.len())
            });
        }

        let instance = match (self.factory)() {
            Ok(instance) => instance,
            Err(cause) => {
                self.ctx.try_log(|logger| {
                    warn!(logger, "unable to launch provider {}: {}", self.provider, cause.message)
                });
                return FunctionOutcome::failure(return_type, FunctionCallError::LaunchFailure { cause });
            }
        };

        let response = instance.call_function(CallFunctionRequest {
            function_name: self.name.clone(),
            arguments: args.to_vec(),
        });

        // Functions return a value or an error, warnings have nowhere to go
        // but the logs.
        for warning in response.warnings() {
            self.ctx.try_log(|logger| {
                warn!(logger, "{}::{}: {}", self.provider, self.name, warning.message)
            });
        }

        if let Some(diagnostic) = response.errors_to_diagnostic() {
            self.ctx.try_log(|logger| {
                warn!(logger, "{}::{} failed: {}", self.provider, self.name, diagnostic.message)
            });
            return FunctionOutcome::failure(return_type, FunctionCallError::RemoteFailure(diagnostic));
        }

        let Some(result) = response.result else {
            return FunctionOutcome::failure(return_type, FunctionCallError::ProtocolViolation);
        };

        if let Err(error) = self.results.check_prior(&self.provider, &self.name, args, &result) {
            self.ctx.try_log(|logger| {
                error!(logger, "{}::{} is not pure: {}", self.provider, self.name, error)
            });
            return FunctionOutcome::failure(return_type, error);
        }

        FunctionOutcome::success(result)
    }
}

impl std::fmt::Debug for ProviderFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderFunction")
            .field("provider", &self.provider)
            .field("name", &self.name)
            .field("decl", &self.decl)
            .finish()
    }
}
