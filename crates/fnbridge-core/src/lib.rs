#[macro_use]
extern crate lazy_static;

#[macro_use]
extern crate serde_derive;

#[macro_use]
extern crate hiro_system_kit;

#[macro_use]
pub extern crate fnbridge_kit as kit;

pub mod cache;
pub mod errors;
pub mod function;
pub mod gate;
pub mod registry;
pub mod render;
pub mod settings;


use hiro_system_kit::Logger;

pub use cache::FunctionResultsCache;
pub use function::{FunctionOutcome, ProviderFunction};
pub use registry::ProviderFunctionsRegistry;
pub use settings::FunctionsSettings;

#[derive(Clone)]
pub struct Context {
    pub logger: Option<Logger>,
    /// Log every provider function call, not only the failing ones.
    pub tracer: bool,
}

impl Context {
    pub fn empty() -> Context {
        Context { logger: None, tracer: false }
    }

    pub fn new(logger: Logger) -> Context {
        Context { logger: Some(logger), tracer: false }
    }

    pub fn try_log<F>(&self, closure: F)
    where
        F: FnOnce(&Logger),
    {
        if let Some(ref logger) = self.logger {
            closure(logger)
        }
    }
}
