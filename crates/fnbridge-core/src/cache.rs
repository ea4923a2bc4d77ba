//! Purity verification for provider functions.
//!
//! Key: sha256 of `provider|name|arg0|arg1...` using the detailed rendering
//! Value: sha256 of the rendered result
//!
//! - Absent key → record the result, success
//! - Same key + same result hash → success
//! - Same key + different result hash → inconsistent result, entry untouched

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use kit::constants::CALL_IDENTITY_SEPARATOR;
use kit::types::provider::ProviderAddr;
use kit::types::types::Value;
use kit::types::Fingerprint;

use crate::errors::FunctionCallError;
use crate::render::render_value;

lazy_static! {
    static ref GLOBAL_FUNCTION_RESULTS: Arc<FunctionResultsCache> =
        Arc::new(FunctionResultsCache::new());
}

struct PriorResult {
    hash: Fingerprint,
    // Only results observed by this process keep their value, to show both
    // sides of an inconsistency. Seeded entries only carry the hash.
    value: Option<Value>,
}

pub struct FunctionResultsCache {
    results: Mutex<HashMap<Fingerprint, PriorResult>>,
    retain_values: bool,
}

impl FunctionResultsCache {
    pub fn new() -> Self {
        FunctionResultsCache { results: Mutex::new(HashMap::new()), retain_values: true }
    }

    /// A cache that only keeps hashes, even for results observed live.
    pub fn without_values() -> Self {
        FunctionResultsCache { results: Mutex::new(HashMap::new()), retain_values: false }
    }

    /// The cache shared by the whole process.
    pub fn global() -> Arc<FunctionResultsCache> {
        GLOBAL_FUNCTION_RESULTS.clone()
    }

    pub fn call_hash(provider: &ProviderAddr, name: &str, args: &[Value]) -> Fingerprint {
        let mut components = vec![provider.to_string(), CALL_IDENTITY_SEPARATOR.to_string()];
        components.push(name.to_string());
        for arg in args.iter() {
            components.push(CALL_IDENTITY_SEPARATOR.to_string());
            components.push(render_value(arg));
        }
        Fingerprint::from_components(components)
    }

    pub fn result_hash(result: &Value) -> Fingerprint {
        Fingerprint::from_components(vec![render_value(result)])
    }

    /// Compares the call against any prior result for the same identity,
    /// recording it when there is none.
    pub fn check_prior(
        &self,
        provider: &ProviderAddr,
        name: &str,
        args: &[Value],
        result: &Value,
    ) -> Result<(), FunctionCallError> {
        let call_hash = Self::call_hash(provider, name, args);
        let result_hash = Self::result_hash(result);

        let mut results = self.lock();
        if let Some(prior) = results.get(&call_hash) {
            if prior.hash != result_hash {
                return Err(FunctionCallError::InconsistentResult {
                    was: prior.value.as_ref().map(render_value),
                    now: render_value(result),
                });
            }
            return Ok(());
        }

        let value = if self.retain_values { Some(result.clone()) } else { None };
        results.insert(call_hash, PriorResult { hash: result_hash, value });
        Ok(())
    }

    /// Preloads a result hash, typically restored from an earlier run. Never
    /// replaces an existing entry.
    pub fn add(&self, call_hash: Fingerprint, result_hash: Fingerprint) {
        let mut results = self.lock();
        results.entry(call_hash).or_insert(PriorResult { hash: result_hash, value: None });
    }

    pub fn get_result_hash(&self, call_hash: &Fingerprint) -> Option<Fingerprint> {
        self.lock().get(call_hash).map(|prior| prior.hash)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Every mutation is a single insert, so a panicking holder cannot leave a
    // half-written entry behind.
    fn lock(&self) -> MutexGuard<'_, HashMap<Fingerprint, PriorResult>> {
        self.results.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for FunctionResultsCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FunctionResultsCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionResultsCache")
            .field("entries", &self.len())
            .field("retain_values", &self.retain_values)
            .finish()
    }
}
