//! Scope-side collaborators: the graph traits the engine resolves
//! against, an in-memory implementation, the outward lexical walk, and
//! the import memo table.

mod cache;
mod graph;
mod tree;
mod walk;

pub use cache::ImportCache;
pub use graph::{
    ImportFallback, InferredType, OpenNamespaceProvider, ScopeGraph, ScopeKind, TypeOracle,
};
pub use tree::ScopeTree;
pub use walk::{ScopeEvent, ScopeTransition, ScopeWalk};
