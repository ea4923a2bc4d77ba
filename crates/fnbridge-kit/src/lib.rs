#[macro_use]
extern crate serde_derive;

#[macro_use]
mod macros;
pub mod constants;

pub use hex;
pub use indexmap;
pub use indoc::formatdoc;
pub use indoc::indoc;
pub use serde;
pub use serde_json;
pub use sha2;

use indexmap::IndexMap;
use types::functions::FunctionDecl;
use types::provider::ProviderAddr;

pub mod types;

/// A plugin that contributes functions to the host.
///
/// Implementations describe what they offer; calling into them goes through a
/// [`types::provider::ProviderInstance`] obtained from a factory.
pub trait Provider: std::fmt::Debug + Sync + Send {
    ///
    fn get_address(&self) -> ProviderAddr;
    ///
    fn get_description(&self) -> &str {
        ""
    }
    /// Declarations keyed by the name the provider registered them under.
    fn get_functions(&self) -> IndexMap<String, FunctionDecl> {
        IndexMap::new()
    }
}
