use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_PROVIDER_HOSTNAME;

use super::diagnostics::Diagnostic;
use super::types::Value;

/// Stable identity of a provider: `hostname/namespace/type`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProviderAddr {
    pub hostname: String,
    pub namespace: String,
    pub provider_type: String,
}

impl ProviderAddr {
    pub fn new(hostname: &str, namespace: &str, provider_type: &str) -> Self {
        ProviderAddr {
            hostname: hostname.to_string(),
            namespace: namespace.to_string(),
            provider_type: provider_type.to_string(),
        }
    }

    pub fn default_registry(namespace: &str, provider_type: &str) -> Self {
        ProviderAddr::new(DEFAULT_PROVIDER_HOSTNAME, namespace, provider_type)
    }
}

impl fmt::Display for ProviderAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.hostname, self.namespace, self.provider_type)
    }
}

impl FromStr for ProviderAddr {
    type Err = Diagnostic;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        let parts = source.split('/').collect::<Vec<_>>();
        if parts.iter().any(|p| p.is_empty()) {
            return Err(diagnosed_error!("invalid provider address '{}': empty segment", source));
        }
        match parts.as_slice() {
            [namespace, provider_type] => {
                Ok(ProviderAddr::default_registry(namespace, provider_type))
            }
            [hostname, namespace, provider_type] => {
                Ok(ProviderAddr::new(hostname, namespace, provider_type))
            }
            _ => Err(diagnosed_error!(
                "invalid provider address '{}': expected 'namespace/type' or 'hostname/namespace/type'",
                source
            )),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CallFunctionRequest {
    pub function_name: String,
    pub arguments: Vec<Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CallFunctionResponse {
    /// `None` when the provider produced nothing, which is only legal
    /// alongside an error diagnostic.
    pub result: Option<Value>,
    pub diagnostics: Vec<Diagnostic>,
}

impl CallFunctionResponse {
    pub fn ok(result: Value) -> Self {
        CallFunctionResponse { result: Some(result), diagnostics: vec![] }
    }

    pub fn err(diagnostic: Diagnostic) -> Self {
        CallFunctionResponse { result: None, diagnostics: vec![diagnostic] }
    }

    pub fn with_diagnostic(mut self, diagnostic: Diagnostic) -> Self {
        self.diagnostics.push(diagnostic);
        self
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.is_error())
    }

    pub fn errors_to_diagnostic(&self) -> Option<Diagnostic> {
        Diagnostic::join_errors(&self.diagnostics)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_warning())
    }
}

/// A running, unconfigured provider able to execute the functions it declared.
pub trait ProviderInstance: Send + Sync {
    fn call_function(&self, request: CallFunctionRequest) -> CallFunctionResponse;
}

/// Produces a ready provider instance. May start a process or open a
/// connection, so callers are expected to memoize behind it when that matters.
pub type ProviderFactory =
    Arc<dyn Fn() -> Result<Arc<dyn ProviderInstance>, Diagnostic> + Send + Sync>;
