//! Builds the name → referenced-names graph for a batch of variables.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use regex::Regex;

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::parse::extract_variables;
use crate::record::EnvironmentVariable;

/// Variable name → names its value references.
///
/// Every variable of the batch is a key. Targets that are not keys are
/// external references.
pub type DependencyGraph = BTreeMap<String, BTreeSet<String>>;

static INJECTION_HEAD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^\s*"\s*;"#).expect("valid regex"));
static INJECTION_TAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^.*=\s*"\s*$"#).expect("valid regex"));

/// Whether `value` looks crafted to close an assignment and run a statement,
/// e.g. `"; rm -rf / ;x="`.
pub fn is_shell_injection(value: &str) -> bool {
    INJECTION_HEAD.is_match(value) && INJECTION_TAIL.is_match(value)
}

/// Scan every value and collect its references.
///
/// Values that look like injections get no edges and a warning on `sink`.
pub fn build_dependency_graph(
    vars: &[EnvironmentVariable],
    sink: &mut dyn DiagnosticSink,
) -> DependencyGraph {
    let mut graph = DependencyGraph::new();
    for ev in vars {
        let deps = graph.entry(ev.name.clone()).or_default();
        if is_shell_injection(&ev.value) {
            sink.emit(Diagnostic::SuspectedInjection {
                name: ev.name.clone(),
                value: ev.value.clone(),
            });
            continue;
        }
        deps.extend(extract_variables(&ev.value));
    }
    graph
}
