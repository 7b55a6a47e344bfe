//! Reading and writing variable collections. None of this takes part in the
//! dependency analysis; it only moves records in and out of the core.

pub mod bash;
pub mod json;
pub mod special;

use std::fmt;
use std::str::FromStr;

pub use bash::{from_bash_expression, to_bash_expression};
pub use json::{from_json_array, tidy_analysis, to_json_array};
pub use special::SpecialVars;

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputType {
    /// `[{"name": ..., "value": ..., "sort_group": ...}, ...]`
    JsonArray,
    /// `{"versions": [{"environment_variables": [...]}, ...]}`
    JsonAnalysis,
    /// `export NAME=VALUE` lines
    BashExports,
    /// `NAME=VALUE` lines
    BashEnv,
}

impl InputType {
    pub const ALL: [InputType; 4] = [
        InputType::JsonArray,
        InputType::JsonAnalysis,
        InputType::BashExports,
        InputType::BashEnv,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            InputType::JsonArray => "json-array",
            InputType::JsonAnalysis => "json-analysis",
            InputType::BashExports => "bash-exports",
            InputType::BashEnv => "bash-env",
        }
    }

    /// Guess the type from the first non-blank characters of the input.
    pub fn detect(input: &str) -> Self {
        let input = input.trim_start();
        if input.starts_with('[') {
            InputType::JsonArray
        } else if input.starts_with('{') {
            InputType::JsonAnalysis
        } else if input.starts_with("export") {
            InputType::BashExports
        } else {
            InputType::BashEnv
        }
    }
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| Error::UnknownInputType(s.to_string()))
    }
}
