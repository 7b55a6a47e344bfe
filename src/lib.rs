//! envtidy: reorders shell environment-variable definitions so that every
//! variable is emitted after the variables its value references.
//!
//! Each value is scanned for variable references, the references form a
//! dependency graph, and the graph is layered into sort groups: group 1 holds
//! variables that depend on nothing in the batch, group *k+1* those whose
//! dependencies all sit in groups up to *k*. A reference cycle fails the whole
//! batch.
//!
//! # Architecture
//!
//! - **[`parse`]**: Expression scanner: nesting-pair table, token types, reference extraction.
//! - **[`graph`]**: Dependency graph builder (with injection guard) and Kahn layering.
//! - **[`tidy`]**: Merges computed groups back into records; batch entry point.
//! - **[`record`]**: The variable record and its ingestion checks.
//! - **[`diagnostics`]**: Non-fatal diagnostic stream passed into the core.
//! - **[`format`]**: Bash text and JSON readers/writers, `PATH`-style prefix handling.
//! - **[`config`]**: Configuration loading: embedded defaults + user overlay merge.
//! - **[`logging`]**: simplelog setup for the binary.

/// Configuration types, loading, and overlay merge logic.
pub mod config;
/// Diagnostic sink interface and implementations.
pub mod diagnostics;
/// Crate-level error type.
pub mod error;
/// Serialized forms of a variable collection.
pub mod format;
/// Dependency graph construction and layering.
pub mod graph;
/// Logger initialisation.
pub mod logging;
/// Shell value scanning: nesting contexts, tokens, referenced names.
pub mod parse;
/// The environment-variable record.
pub mod record;
/// Group assignment and the batch pipeline.
pub mod tidy;

pub use error::{Error, Result};
pub use graph::CycleError;
pub use record::EnvironmentVariable;
pub use tidy::{TidyOptions, tidy_sort_groups};

use diagnostics::LogSink;

/// Regroup a batch with default options, reporting through the `log` facade.
///
/// This is the main entry point for tests and simple usage. The records are
/// validated first; the result is owned.
pub fn tidy(vars: &[EnvironmentVariable]) -> Result<Vec<EnvironmentVariable>> {
    record::validate_batch(vars)?;
    let out = tidy_sort_groups(vars, &TidyOptions::default(), &mut LogSink)?;
    Ok(out.into_iter().map(|c| c.into_owned()).collect())
}
