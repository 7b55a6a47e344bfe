//! Kahn-style layering of a dependency graph into sort groups.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use thiserror::Error;

use super::builder::DependencyGraph;

/// Layers of names, first layer first. Group numbers are 1-indexed positions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupLayering {
    layers: Vec<BTreeSet<String>>,
}

impl GroupLayering {
    pub fn layers(&self) -> &[BTreeSet<String>] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Group of `name`, or `None` if it was never placed.
    pub fn group_of(&self, name: &str) -> Option<u32> {
        self.layers
            .iter()
            .position(|layer| layer.contains(name))
            .map(|i| i as u32 + 1)
    }

    /// Flatten into a name → group lookup.
    pub fn groups(&self) -> BTreeMap<String, u32> {
        let mut out = BTreeMap::new();
        for (i, layer) in self.layers.iter().enumerate() {
            for name in layer {
                out.insert(name.clone(), i as u32 + 1);
            }
        }
        out
    }
}

/// The graph has no valid ordering. Holds every name that could not be
/// placed, with the dependencies still blocking it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("dependency cycle among: {}", join_names(.unresolved))]
pub struct CycleError {
    pub unresolved: BTreeMap<String, BTreeSet<String>>,
}

impl CycleError {
    pub fn names(&self) -> Vec<&str> {
        self.unresolved.keys().map(String::as_str).collect()
    }
}

fn join_names(unresolved: &BTreeMap<String, BTreeSet<String>>) -> String {
    unresolved.keys().cloned().collect::<Vec<_>>().join(", ")
}

/// Peel the graph into layers.
///
/// Targets that are not keys of `graph` count as already satisfied and are
/// never placed. A node's dependency on itself is ignored. Fails without a
/// partial result if some nodes can never be placed.
pub fn layer_dependency_graph(graph: &DependencyGraph) -> Result<GroupLayering, CycleError> {
    // dependency -> dependents, and how many in-batch dependencies each node waits on
    let mut dependents: HashMap<&str, Vec<&str>> = HashMap::new();
    let mut pending: HashMap<&str, usize> = HashMap::with_capacity(graph.len());
    for (name, deps) in graph {
        let mut count = 0;
        for dep in deps {
            if dep == name || !graph.contains_key(dep) {
                continue;
            }
            dependents.entry(dep.as_str()).or_default().push(name.as_str());
            count += 1;
        }
        pending.insert(name.as_str(), count);
    }

    let mut frontier: Vec<&str> = pending
        .iter()
        .filter(|(_, count)| **count == 0)
        .map(|(name, _)| *name)
        .collect();

    let mut layering = GroupLayering::default();
    let mut placed = 0;
    while !frontier.is_empty() {
        let mut next = Vec::new();
        for name in &frontier {
            for dependent in dependents.get(name).into_iter().flatten() {
                if let Some(count) = pending.get_mut(dependent) {
                    *count -= 1;
                    if *count == 0 {
                        next.push(*dependent);
                    }
                }
            }
        }
        placed += frontier.len();
        layering
            .layers
            .push(frontier.into_iter().map(str::to_string).collect());
        frontier = next;
    }

    if placed < graph.len() {
        let unresolved = graph
            .iter()
            .filter(|(name, _)| pending[name.as_str()] > 0)
            .map(|(name, deps)| {
                let blocking = deps
                    .iter()
                    .filter(|d| {
                        *d != name && pending.get(d.as_str()).is_some_and(|count| *count > 0)
                    })
                    .cloned()
                    .collect();
                (name.clone(), blocking)
            })
            .collect();
        return Err(CycleError { unresolved });
    }

    log::debug!(
        "layered dependency graph into {} groups (sizes {:?})",
        layering.len(),
        layering.layers().iter().map(BTreeSet::len).collect::<Vec<_>>()
    );
    Ok(layering)
}
