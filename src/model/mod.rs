//! The namespace data model: qualified names, namespaces, declarations,
//! and reference sites.
//!
//! Everything here is a plain value type. Namespaces and qualified names
//! are built on demand during a resolution call and thrown away with it;
//! declarations and references are flattened views of host-owned nodes.

mod declaration;
mod namespace;
mod qualified_name;
mod reference;

pub use declaration::{Access, DeclKind, Declaration};
pub use namespace::{ContextKind, Namespace, UNIVERSAL_BASE};
pub use qualified_name::QualifiedName;
pub use reference::{Qualifier, Reference};
