//! Dependency graph construction and layering.

pub mod builder;
pub mod layering;

pub use builder::{DependencyGraph, build_dependency_graph, is_shell_injection};
pub use layering::{CycleError, GroupLayering, layer_dependency_graph};
