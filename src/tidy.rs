//! Regrouping a batch: merge computed sort groups back into the records.

use std::borrow::Cow;
use std::collections::BTreeMap;

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::graph::{CycleError, build_dependency_graph, layer_dependency_graph};
use crate::record::EnvironmentVariable;

/// Group given to a variable the layering never placed.
pub const DEFAULT_SORT_GROUP: u32 = 1;

#[derive(Debug, Clone, Copy, Default)]
pub struct TidyOptions {
    /// Report every sort group reassignment on the diagnostic sink.
    pub verbose: bool,
}

/// Apply `groups` to each record.
///
/// Records whose group is unchanged come back as [`Cow::Borrowed`] pointing at
/// the input; reassigned records are new [`Cow::Owned`] copies.
pub fn assign_groups<'a>(
    vars: &'a [EnvironmentVariable],
    groups: &BTreeMap<String, u32>,
    options: &TidyOptions,
    sink: &mut dyn DiagnosticSink,
) -> Vec<Cow<'a, EnvironmentVariable>> {
    vars.iter()
        .map(|ev| {
            let new_group = groups.get(&ev.name).copied().unwrap_or(DEFAULT_SORT_GROUP);
            if ev.sort_group == Some(new_group) {
                return Cow::Borrowed(ev);
            }
            if options.verbose {
                sink.emit(Diagnostic::GroupChanged {
                    name: ev.name.clone(),
                    from: ev.sort_group,
                    to: new_group,
                });
            }
            Cow::Owned(EnvironmentVariable {
                sort_group: Some(new_group),
                ..ev.clone()
            })
        })
        .collect()
}

/// Recompute sort groups for a whole batch.
///
/// Fails with no output if the references form a cycle.
pub fn tidy_sort_groups<'a>(
    vars: &'a [EnvironmentVariable],
    options: &TidyOptions,
    sink: &mut dyn DiagnosticSink,
) -> Result<Vec<Cow<'a, EnvironmentVariable>>, CycleError> {
    let graph = build_dependency_graph(vars, sink);
    let layering = layer_dependency_graph(&graph)?;
    Ok(assign_groups(vars, &layering.groups(), options, sink))
}
