//! Handle types for files, scopes, and syntax-tree entities.
//!
//! The resolution engine never owns the syntax tree or the scope graph;
//! it refers to their entities through these u32 handles. The host that
//! implements [`crate::scope::ScopeGraph`] decides what the indices mean.
//! Handles are 4 bytes, so passing and hashing them is cheap.

use std::fmt;

macro_rules! handle_type {
    ($(#[$doc:meta])* $name:ident, $display:literal) => {
        $(#[$doc])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
        pub struct $name(pub u32);

        impl $name {
            /// Create a new handle from a raw index.
            #[inline]
            pub const fn new(id: u32) -> Self {
                Self(id)
            }

            /// Get the raw index.
            #[inline]
            pub const fn index(self) -> u32 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($display, "#{}"), self.0)
            }
        }

        impl From<u32> for $name {
            #[inline]
            fn from(id: u32) -> Self {
                Self(id)
            }
        }
    };
}

handle_type!(
    /// An interned identifier for a source file. The actual path is
    /// stored by the host.
    FileId,
    "file"
);

handle_type!(
    /// A scope in the host's scope graph (block, function, class, package, file).
    ScopeId,
    "scope"
);

handle_type!(
    /// A declaration stored by the host's scope graph.
    DeclId,
    "decl"
);

handle_type!(
    /// A node in the host's syntax tree. Used for identity checks
    /// (self-reference detection) and as the anchor for open-namespace
    /// lookups; the engine never dereferences it.
    NodeId,
    "node"
);

handle_type!(
    /// An expression in the host's syntax tree, handed to the type oracle
    /// when a reference carries a qualifier expression.
    ExprId,
    "expr"
);
