// This module defines the external request schema and its deserialization entry points.
// A request arrives as JSON (command-line argument, stdin, or file) or YAML (file) and
// maps onto GenerateRequest: the dispatch point name (with cpo_name accepted as an alias
// for compatibility with existing specs), either an explicit args array in the argument
// mini-language or a named operation_type, an optional runtime_dispatch block, and the
// optional doxygen presentation flag. Deserialization failures surface as the structured
// InvalidRequest error; all semantic validation happens later in the normalizer so error
// messages stay close to user input.

//! External request schema (JSON/YAML).

use serde::Deserialize;

use crate::core::{GenerateError, GenerateResult};

/// Raw, unvalidated generation request.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    /// Dispatch point name; `cpo_name` is accepted as an alias.
    #[serde(alias = "cpo_name")]
    pub name: String,
    /// Explicit argument entries, mutually exclusive with `operation_type`.
    #[serde(default)]
    pub args: Option<Vec<String>>,
    /// Named canned operation pattern, mutually exclusive with `args`.
    #[serde(default)]
    pub operation_type: Option<String>,
    #[serde(default)]
    pub runtime_dispatch: Option<DispatchRequest>,
    /// Emit doc comments even without the host's --doxygen flag.
    #[serde(default)]
    pub doxygen: Option<bool>,
}

/// Raw runtime dispatch block.
#[derive(Debug, Clone, Deserialize)]
pub struct DispatchRequest {
    /// `"bool"` or `"string"`.
    #[serde(rename = "type")]
    pub kind: String,
    pub dispatch_arg: String,
    /// Branch labels; Boolean dispatch may omit them to get the default pair.
    #[serde(default)]
    pub options: Option<Vec<String>>,
}

impl GenerateRequest {
    /// Parse a request from JSON text.
    pub fn from_json(text: &str) -> GenerateResult<Self> {
        serde_json::from_str(text).map_err(|e| GenerateError::InvalidRequest {
            reason: e.to_string(),
        })
    }

    /// Parse a request from YAML text.
    pub fn from_yaml(text: &str) -> GenerateResult<Self> {
        serde_yaml::from_str(text).map_err(|e| GenerateError::InvalidRequest {
            reason: e.to_string(),
        })
    }
}
