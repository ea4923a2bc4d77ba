use std::path::Path;

use kit::types::diagnostics::Diagnostic;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FunctionsSettings {
    /// Keep the values of results observed by this process next to their
    /// hashes, so that inconsistencies can show both results.
    pub retain_result_values: bool,
    /// Log every provider function call at debug level.
    pub trace_calls: bool,
}

impl Default for FunctionsSettings {
    fn default() -> Self {
        FunctionsSettings { retain_result_values: true, trace_calls: false }
    }
}

impl FunctionsSettings {
    pub fn from_yaml_str(content: &str) -> Result<FunctionsSettings, Diagnostic> {
        serde_yml::from_str(content)
            .map_err(|e| diagnosed_error!("functions settings malformatted: {}", e))
    }

    pub fn from_path(path: &Path) -> Result<FunctionsSettings, Diagnostic> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            diagnosed_error!("unable to read functions settings {}: {}", path.display(), e)
        })?;
        FunctionsSettings::from_yaml_str(&content)
    }
}
