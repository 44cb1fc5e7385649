//! Candidate declarations as the engine consumes them.
//!
//! The engine never owns declarations; the host's scope graph does. A
//! [`Declaration`] is the flattened view of one declaration node: its name,
//! modifiers, binding namespace, and position, which is everything the
//! accessibility filter, classifier, and ranker look at.

use smol_str::SmolStr;

use crate::base::{FileId, NodeId, ScopeId, TextRange};
use crate::model::{Namespace, QualifiedName};

/// What kind of declaration a candidate is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeclKind {
    Class,
    Function,
    /// `function get name()` accessor.
    GetAccessor,
    /// `function set name(v)` accessor.
    SetAccessor,
    Field,
    Var,
    Const,
    /// A `namespace` declaration (a custom access namespace value).
    NamespaceDecl,
    Package,
}

impl DeclKind {
    /// Get/set accessors form a property pair and are never duplicates of
    /// one another.
    pub fn is_accessor(&self) -> bool {
        matches!(self, Self::GetAccessor | Self::SetAccessor)
    }

    /// Whether two kinds form a get/set pair.
    pub fn pairs_with(&self, other: DeclKind) -> bool {
        matches!(
            (self, other),
            (Self::GetAccessor, Self::SetAccessor) | (Self::SetAccessor, Self::GetAccessor)
        )
    }

    /// Get a display label for this kind.
    pub fn display(&self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Function => "function",
            Self::GetAccessor => "getter",
            Self::SetAccessor => "setter",
            Self::Field => "field",
            Self::Var => "var",
            Self::Const => "const",
            Self::NamespaceDecl => "namespace",
            Self::Package => "package",
        }
    }
}

/// Access modifier on a declaration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Access {
    #[default]
    Public,
    Private,
    Protected,
    /// Package-internal visibility.
    Internal,
}

/// One candidate declaration, as supplied by the host's scope graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    /// Simple name the declaration binds.
    pub name: SmolStr,
    pub kind: DeclKind,
    pub access: Access,
    pub is_static: bool,
    /// The containing class is declared `dynamic` (members may be added
    /// at runtime).
    pub in_dynamic_class: bool,
    /// Custom access-namespace attribute (`my_ns var x`), if any. Not one
    /// of public/private/protected/internal.
    pub attribute_namespace: Option<SmolStr>,
    /// The declaration's logical binding scope.
    pub namespace: Namespace,
    /// An access modifier or namespace attribute was written on the
    /// declaration, as opposed to a namespace synthesized by the indexer
    /// or no namespace at all (plain locals).
    pub namespace_explicit: bool,
    /// Scope the declaration lives in.
    pub scope: ScopeId,
    /// File the declaration lives in.
    pub file: FileId,
    /// Syntax node of the declaration, for self-reference detection.
    pub node: NodeId,
    /// Source range of the declared name.
    pub range: TextRange,
    /// Definition created by an assignment (`a.b = ...`), not a formal
    /// declaration statement.
    pub is_assignment_definition: bool,
    /// Class-scoped property assignment (a member minted on the class
    /// body/prototype rather than declared).
    pub prototype_member: bool,
    /// Conditional-compilation guard variable, when the declaration is
    /// inside a conditional block (`CONFIG::debug`).
    pub condition_guard: Option<SmolStr>,
}

impl Declaration {
    /// Create a declaration with the given name and kind; everything else
    /// starts at its default (public, non-static, no declared namespace).
    pub fn new(name: impl Into<SmolStr>, kind: DeclKind) -> Self {
        Self {
            name: name.into(),
            kind,
            access: Access::Public,
            is_static: false,
            in_dynamic_class: false,
            attribute_namespace: None,
            namespace: Namespace::anonymous(),
            namespace_explicit: false,
            scope: ScopeId::new(0),
            file: FileId::new(0),
            node: NodeId::new(0),
            range: TextRange::empty(0.into()),
            is_assignment_definition: false,
            prototype_member: false,
            condition_guard: None,
        }
    }

    /// Set the access modifier.
    pub fn with_access(mut self, access: Access) -> Self {
        self.access = access;
        self
    }

    /// Mark as static.
    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    /// Set the binding namespace as declared in source (an access
    /// modifier or namespace attribute was written on the declaration).
    pub fn with_namespace(mut self, namespace: Namespace) -> Self {
        self.namespace = namespace;
        self.namespace_explicit = true;
        self
    }

    /// Set a namespace synthesized by the indexer rather than declared.
    pub fn with_synthetic_namespace(mut self, namespace: Namespace) -> Self {
        self.namespace = namespace;
        self.namespace_explicit = false;
        self
    }

    /// Tag with a custom access namespace.
    pub fn with_attribute_namespace(mut self, value: impl Into<SmolStr>) -> Self {
        self.attribute_namespace = Some(value.into());
        self
    }

    /// Mark as an assignment-created definition.
    pub fn assignment_definition(mut self) -> Self {
        self.is_assignment_definition = true;
        self
    }

    /// Mark as a class-scoped property assignment.
    pub fn as_prototype_member(mut self) -> Self {
        self.prototype_member = true;
        self
    }

    /// Set the conditional-compilation guard.
    pub fn with_condition_guard(mut self, guard: impl Into<SmolStr>) -> Self {
        self.condition_guard = Some(guard.into());
        self
    }

    /// Mark the containing class as dynamic.
    pub fn with_dynamic_class(mut self) -> Self {
        self.in_dynamic_class = true;
        self
    }

    /// Set the source range of the declared name.
    pub fn with_range(mut self, range: TextRange) -> Self {
        self.range = range;
        self
    }

    /// Set the containing file. Only needed when the declaring scope does
    /// not determine one (package and global scopes span files).
    pub fn in_file(mut self, file: FileId) -> Self {
        self.file = file;
        self
    }

    /// The class or package this declaration is a member of, from its
    /// binding namespace.
    pub fn declaring_type(&self) -> Option<&QualifiedName> {
        self.namespace.qualified_name.as_ref()
    }

    /// A constructor: a function member whose name equals its declaring
    /// class's simple name.
    pub fn is_constructor(&self) -> bool {
        self.kind == DeclKind::Function
            && self
                .declaring_type()
                .is_some_and(|q| q.base_name() == self.name)
    }
}
