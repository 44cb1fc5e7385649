//! Accessibility rules.
//!
//! [`AccessibilityState`] is the per-resolution gate deciding whether a
//! candidate may be referenced from the reference site. It folds the
//! scope walk's transitions into the little state the rules need (are we
//! looking at inherited members right now), and answers with the problem
//! kind on rejection so candidates are explained rather than dropped.
//!
//! Rule order: private, protected, static/instance, custom namespace.
//! The relative order of the last two is a deliberate choice; observed
//! behavior does not pin it down.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;

use crate::model::{Access, Declaration, Namespace, QualifiedName, Qualifier, Reference};
use crate::resolve::problems::AccessProblem;
use crate::resolve::{LanguageOptions, ResolveOptions};
use crate::scope::{OpenNamespaceProvider, ScopeGraph, ScopeTransition};

/// Visibility gate for one resolution call.
pub struct AccessibilityState<'a> {
    graph: &'a dyn ScopeGraph,
    namespaces: &'a dyn OpenNamespaceProvider,
    language: &'a LanguageOptions,
    reference: &'a Reference,
    /// Nearest class enclosing the reference site.
    origin_class: Option<QualifiedName>,
    /// The reference reads like class-body code (unqualified or
    /// self-qualified inside a class), so subtype-based rules apply.
    class_scope_context: bool,
    /// Static members are what the context demands.
    process_statics: bool,
    accept_private: bool,
    indexing_mode: bool,
    /// The walk is currently delivering inherited members.
    in_inherited: bool,
    /// Origin class plus all its ancestors, computed on first protected
    /// check.
    origin_ancestors: Option<Vec<QualifiedName>>,
}

impl<'a> AccessibilityState<'a> {
    pub fn new(
        graph: &'a dyn ScopeGraph,
        namespaces: &'a dyn OpenNamespaceProvider,
        language: &'a LanguageOptions,
        reference: &'a Reference,
        options: &ResolveOptions,
        process_statics: bool,
    ) -> Self {
        let origin_class = graph.declaring_class_of(reference.scope);
        let class_scope_context = matches!(
            reference.qualifier,
            Qualifier::None | Qualifier::This | Qualifier::Super
        ) && origin_class.is_some();
        Self {
            graph,
            namespaces,
            language,
            reference,
            origin_class,
            class_scope_context,
            process_statics,
            accept_private: options.accept_private,
            indexing_mode: options.indexing_mode,
            in_inherited: false,
            origin_ancestors: None,
        }
    }

    /// Fold one walk transition into the state.
    pub fn on_transition(&mut self, transition: &ScopeTransition) {
        self.in_inherited = matches!(transition, ScopeTransition::InheritedMembers);
    }

    /// Apply the rules to one candidate. `None` means visible.
    pub fn check(&mut self, decl: &Declaration) -> Option<AccessProblem> {
        if decl.namespace.qualified_name.is_some() {
            if let Some(problem) = self.check_member(decl) {
                return Some(problem);
            }
        }
        self.check_attribute_namespace(decl)
    }

    fn check_member(&mut self, decl: &Declaration) -> Option<AccessProblem> {
        let same_class = self
            .origin_class
            .as_ref()
            .zip(decl.declaring_type())
            .is_some_and(|(origin, declaring)| origin.equivalent_to(declaring));

        match decl.access {
            Access::Private if !self.accept_private && !same_class => {
                return Some(AccessProblem::PrivateMemberNotAccessible);
            }
            Access::Protected if !same_class => {
                let inherited_ok =
                    self.class_scope_context && self.origin_inherits(decl.declaring_type());
                if !inherited_ok {
                    return Some(AccessProblem::ProtectedMemberNotAccessible);
                }
            }
            _ => {}
        }

        if self.process_statics {
            if !decl.is_static && !decl.is_constructor() {
                return Some(AccessProblem::InstanceMemberInaccessible);
            }
        } else if decl.is_static && self.class_scope_context {
            // Statics are not inherited; reaching one through the
            // supertype walk never counts.
            if self.in_inherited {
                return Some(AccessProblem::StaticMemberInaccessible);
            }
            if !self.reference.in_static_member && !self.language.unqualified_static_from_instance
            {
                return Some(AccessProblem::StaticMemberInaccessible);
            }
        }
        None
    }

    fn check_attribute_namespace(&self, decl: &Declaration) -> Option<AccessProblem> {
        let attribute = decl.attribute_namespace.as_ref()?;
        // Cross-file directive resolution is unsafe while indexing;
        // defer the check instead of guessing.
        if self.indexing_mode {
            return None;
        }
        if self.language.default_namespace.as_ref() == Some(attribute) {
            return None;
        }
        if self
            .namespaces
            .open_namespaces_at(self.reference.node)
            .contains_key(attribute)
        {
            return None;
        }
        Some(AccessProblem::MemberFromUnopenedNamespace)
    }

    fn origin_inherits(&mut self, declaring: Option<&QualifiedName>) -> bool {
        let Some(declaring) = declaring else {
            return false;
        };
        let graph = self.graph;
        let origin = self.origin_class.clone();
        let ancestors = self.origin_ancestors.get_or_insert_with(|| {
            let mut seen: FxHashSet<QualifiedName> = FxHashSet::default();
            let mut out = Vec::new();
            let mut pending = VecDeque::new();
            if let Some(start) = origin {
                seen.insert(start.clone());
                out.push(start.clone());
                pending.push_back(start);
            }
            while let Some(class) = pending.pop_front() {
                for parent in graph.supertypes_of(&Namespace::of_type(class)) {
                    if let Some(qname) = parent.qualified_name {
                        if seen.insert(qname.clone()) {
                            out.push(qname.clone());
                            pending.push_back(qname);
                        }
                    }
                }
            }
            out
        });
        ancestors.iter().any(|q| q.equivalent_to(declaring))
    }
}

/// Conditional-compilation duplicate suppression: the same name declared
/// twice under the same guard is one declaration seen twice, while
/// differing guards (or a getter/setter pair) are genuinely distinct.
pub(crate) fn conditional_duplicate(existing: &Declaration, incoming: &Declaration) -> bool {
    existing.name == incoming.name
        && !existing.kind.pairs_with(incoming.kind)
        && existing.condition_guard.is_some()
        && existing.condition_guard == incoming.condition_guard
}
