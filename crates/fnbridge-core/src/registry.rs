use std::collections::HashMap;
use std::sync::Arc;

use kit::indexmap::IndexMap;
use kit::types::diagnostics::Diagnostic;
use kit::types::functions::FunctionDecl;
use kit::types::provider::{ProviderAddr, ProviderFactory};
use kit::types::types::{Type, Value};
use kit::types::Fingerprint;
use kit::Provider;

use crate::cache::FunctionResultsCache;
use crate::function::ProviderFunction;
use crate::settings::FunctionsSettings;
use crate::Context;

struct ProviderNamespace {
    provider: ProviderAddr,
    functions: IndexMap<String, ProviderFunction>,
}

/// The host's view of provider functions, addressed as `namespace::name`.
///
/// Every function registered here records into the same purity cache.
pub struct ProviderFunctionsRegistry {
    namespaces: HashMap<String, ProviderNamespace>,
    results: Arc<FunctionResultsCache>,
    ctx: Context,
}

impl ProviderFunctionsRegistry {
    pub fn new(settings: &FunctionsSettings, ctx: &Context) -> Self {
        let results = if settings.retain_result_values {
            FunctionResultsCache::new()
        } else {
            FunctionResultsCache::without_values()
        };
        Self::with_results_cache(Arc::new(results), settings, ctx)
    }

    /// Shares an existing cache, e.g. [FunctionResultsCache::global].
    pub fn with_results_cache(
        results: Arc<FunctionResultsCache>,
        settings: &FunctionsSettings,
        ctx: &Context,
    ) -> Self {
        let mut ctx = ctx.clone();
        ctx.tracer = ctx.tracer || settings.trace_calls;
        ProviderFunctionsRegistry { namespaces: HashMap::new(), results, ctx }
    }

    pub fn register_provider(
        &mut self,
        namespace: &str,
        provider: ProviderAddr,
        decls: IndexMap<String, FunctionDecl>,
        factory: ProviderFactory,
    ) -> Result<(), Diagnostic> {
        let entry = self
            .namespaces
            .entry(namespace.to_string())
            .or_insert_with(|| ProviderNamespace { provider: provider.clone(), functions: IndexMap::new() });

        if entry.provider != provider {
            return Err(diagnosed_error!(
                "namespace {} is already bound to provider {}, cannot register {}",
                namespace,
                entry.provider,
                provider
            ));
        }

        for (name, decl) in decls.into_iter() {
            let function = ProviderFunction::build(
                decl,
                provider.clone(),
                &name,
                factory.clone(),
                self.results.clone(),
                &self.ctx,
            );
            entry.functions.insert(name, function);
        }

        let count = entry.functions.len();
        self.ctx.try_log(|logger| {
            info!(logger, "{} function(s) available in namespace {} ({})", count, namespace, provider)
        });
        Ok(())
    }

    /// Registers everything a [Provider] declares under `namespace`.
    pub fn register(
        &mut self,
        namespace: &str,
        provider: &dyn Provider,
        factory: ProviderFactory,
    ) -> Result<(), Diagnostic> {
        self.register_provider(namespace, provider.get_address(), provider.get_functions(), factory)
    }

    pub fn get_function(&self, namespace: &str, name: &str) -> Option<&ProviderFunction> {
        self.namespaces.get(namespace).and_then(|ns| ns.functions.get(name))
    }

    pub fn functions_in(&self, namespace: &str) -> Vec<&ProviderFunction> {
        self.namespaces
            .get(namespace)
            .map(|ns| ns.functions.values().collect())
            .unwrap_or_default()
    }

    fn lookup(&self, namespace: &str, name: &str) -> Result<&ProviderFunction, Diagnostic> {
        let Some(ns) = self.namespaces.get(namespace) else {
            return Err(diagnosed_error!("could not find namespace {}", namespace));
        };
        ns.functions
            .get(name)
            .ok_or_else(|| diagnosed_error!("could not find function {name} in namespace {}", namespace))
    }

    pub fn execute_function(
        &self,
        namespace: &str,
        name: &str,
        args: &[Value],
    ) -> Result<Value, Diagnostic> {
        self.lookup(namespace, name)?.call(args).into_result()
    }

    pub fn check_function_arguments(
        &self,
        namespace: &str,
        name: &str,
        arg_types: &[Type],
    ) -> Result<Type, Diagnostic> {
        self.lookup(namespace, name)?.check_argument_types(arg_types)
    }

    /// Restores a result hash recorded by an earlier run.
    pub fn seed_prior_result(&self, call_hash: Fingerprint, result_hash: Fingerprint) {
        self.results.add(call_hash, result_hash);
    }
}
