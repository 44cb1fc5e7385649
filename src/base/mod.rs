//! Foundation types for the resolution engine.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`FileId`] - Interned file identifiers
//! - [`ScopeId`], [`DeclId`], [`NodeId`], [`ExprId`] - Host-entity handles
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//!
//! This module has NO dependencies on other nameres modules.

mod ids;

pub use ids::{DeclId, ExprId, FileId, NodeId, ScopeId};

// Re-export text-size types for convenience
pub use text_size::{TextRange, TextSize};
