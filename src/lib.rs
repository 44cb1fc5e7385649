//! # nameres-core
//!
//! Core library for qualified-symbol resolution: scope-distance
//! computation, type-driven namespace discovery, accessibility
//! enforcement, and multi-criteria candidate ranking.
//!
//! The engine is host-agnostic: the embedding analyzer implements the
//! [`scope`] traits over its own syntax trees and indexes, and each
//! [`resolve::Resolver`] call answers one reference from those alone.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! resolve   → The engine: scope stack, classification, ranking
//!   ↓
//! scope     → Graph traits, lexical walk, import cache
//!   ↓
//! model     → Namespaces, declarations, references
//!   ↓
//! base      → Primitives (FileId, host-entity handles, TextRange)
//! ```

// ============================================================================
// MODULES (dependency order: base → model → scope → resolve)
// ============================================================================

/// Foundation types: FileId, host-entity handles, TextRange
pub mod base;

/// Data model: qualified names, namespaces, declarations, references
pub mod model;

/// Scope graph traits, the outward lexical walk, import caching
pub mod scope;

/// The resolution engine: scope stack, accessibility, ranking
pub mod resolve;

// Re-export foundation types
pub use base::{DeclId, ExprId, FileId, NodeId, ScopeId, TextRange, TextSize};

// Re-export the data model
pub use model::{
    Access, ContextKind, DeclKind, Declaration, Namespace, QualifiedName, Qualifier, Reference,
};

// Re-export the engine surface
pub use resolve::{
    AccessProblem, LanguageOptions, ResolveCandidate, ResolveOptions, ResolveOutcome, Resolver,
};
pub use scope::{
    ImportCache, ImportFallback, InferredType, OpenNamespaceProvider, ScopeGraph, ScopeKind,
    ScopeTree, TypeOracle,
};
