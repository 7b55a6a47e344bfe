//! JSON inputs: a bare array of records, or an analysis document whose
//! `versions[*].environment_variables` arrays are regrouped in place.

use serde_json::Value;

use crate::diagnostics::DiagnosticSink;
use crate::error::Error;
use crate::record::{EnvironmentVariable, validate_batch};
use crate::tidy::{TidyOptions, tidy_sort_groups};

pub fn from_json_array(text: &str) -> Result<Vec<EnvironmentVariable>, Error> {
    Ok(serde_json::from_str(text)?)
}

pub fn to_json_array<'a, I>(vars: I) -> Result<String, Error>
where
    I: IntoIterator<Item = &'a EnvironmentVariable>,
{
    let vars: Vec<&EnvironmentVariable> = vars.into_iter().collect();
    Ok(serde_json::to_string_pretty(&vars)?)
}

/// Regroup every version of an analysis document. Everything else in the
/// document is left as it was.
pub fn tidy_analysis(
    text: &str,
    options: &TidyOptions,
    sink: &mut dyn DiagnosticSink,
) -> Result<String, Error> {
    let mut doc: Value = serde_json::from_str(text)?;
    let versions = doc
        .get_mut("versions")
        .and_then(Value::as_array_mut)
        .ok_or_else(|| Error::Analysis("missing \"versions\" array".into()))?;

    for (i, version) in versions.iter_mut().enumerate() {
        let slot = version
            .get_mut("environment_variables")
            .ok_or_else(|| Error::Analysis(format!("version {i} has no environment_variables")))?;
        let vars: Vec<EnvironmentVariable> = serde_json::from_value(slot.take())?;
        validate_batch(&vars)?;
        let tidied = tidy_sort_groups(&vars, options, sink)?;
        let tidied: Vec<&EnvironmentVariable> = tidied.iter().map(|c| c.as_ref()).collect();
        *slot = serde_json::to_value(tidied)?;
    }

    Ok(serde_json::to_string_pretty(&doc)?)
}
