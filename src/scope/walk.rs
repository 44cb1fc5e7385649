//! Outward lexical scope walk.
//!
//! [`ScopeWalk`] enumerates every declaration visible from a starting
//! scope, innermost first: the scope's own declarations, then each
//! enclosing scope's, crossing file roots into packages, the global
//! root, and synthetic host scopes for embedded files. Class scopes
//! additionally pull in inherited members, breadth-first over the
//! supertype chain.
//!
//! Region changes are reported in-band as [`ScopeTransition`] items
//! rather than through callbacks, so consumers fold them into whatever
//! state they need and can stop the walk at any point.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;

use crate::base::{DeclId, ScopeId};
use crate::model::{Namespace, QualifiedName};
use crate::scope::{ScopeGraph, ScopeKind};

/// A region boundary crossed by the walk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScopeTransition {
    /// The next candidates are the named class's own members.
    ClassMembers { class: QualifiedName },
    /// The next candidates are members inherited from supertypes.
    InheritedMembers,
    /// The class and its supertypes are exhausted; back to lexical
    /// scopes.
    ClassDone,
    /// One scope is exhausted and the walk moves to its lexical parent.
    /// Consumers short-circuit here: a name bound in a finished scope
    /// shadows anything farther out.
    EnclosingScope { exited: ScopeKind },
    /// The walk crossed from an embedded file into its host document's
    /// synthetic scope.
    HostScope,
}

/// One step of the walk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScopeEvent {
    Transition(ScopeTransition),
    Candidate(DeclId),
}

/// Iterator over [`ScopeEvent`]s, outward from a starting scope.
///
/// The walk is a plain iterator with no side effects; callers decide how
/// far to drive it and check for cancellation between items.
pub struct ScopeWalk<'a> {
    graph: &'a dyn ScopeGraph,
    current: Option<ScopeId>,
    queue: VecDeque<ScopeEvent>,
    /// Types whose members were already enumerated, over the whole walk.
    visited_types: FxHashSet<QualifiedName>,
}

impl<'a> ScopeWalk<'a> {
    pub fn new(graph: &'a dyn ScopeGraph, start: ScopeId) -> Self {
        Self {
            graph,
            current: Some(start),
            queue: VecDeque::new(),
            visited_types: FxHashSet::default(),
        }
    }

    /// Queue everything one scope contributes.
    fn fill_from(&mut self, scope: ScopeId) {
        let owner = if self.graph.scope_kind(scope) == ScopeKind::Class {
            self.graph.owner_of(scope)
        } else {
            None
        };
        match owner {
            Some(class) => self.fill_class(scope, class),
            None => {
                for &decl in self.graph.declarations_in(scope) {
                    self.queue.push_back(ScopeEvent::Candidate(decl));
                }
            }
        }
    }

    /// A class body contributes its own members, then inherited ones.
    fn fill_class(&mut self, scope: ScopeId, class: QualifiedName) {
        self.queue
            .push_back(ScopeEvent::Transition(ScopeTransition::ClassMembers {
                class: class.clone(),
            }));
        for &decl in self.graph.declarations_in(scope) {
            self.queue.push_back(ScopeEvent::Candidate(decl));
        }

        self.queue
            .push_back(ScopeEvent::Transition(ScopeTransition::InheritedMembers));
        self.visited_types.insert(class.clone());
        let mut pending: VecDeque<QualifiedName> = VecDeque::new();
        self.enqueue_supertypes(&class, &mut pending);
        while let Some(ty) = pending.pop_front() {
            if let Some(members) = self.graph.scope_of(&Namespace::of_type(ty.clone())) {
                // A type's member scope may coincide with the walked
                // scope in degenerate self-inheriting graphs.
                if members != scope {
                    for &decl in self.graph.declarations_in(members) {
                        self.queue.push_back(ScopeEvent::Candidate(decl));
                    }
                }
            }
            self.enqueue_supertypes(&ty, &mut pending);
        }

        self.queue
            .push_back(ScopeEvent::Transition(ScopeTransition::ClassDone));
    }

    fn enqueue_supertypes(&mut self, ty: &QualifiedName, pending: &mut VecDeque<QualifiedName>) {
        for parent in self.graph.supertypes_of(&Namespace::of_type(ty.clone())) {
            if let Some(qname) = parent.qualified_name {
                if self.visited_types.insert(qname.clone()) {
                    pending.push_back(qname);
                }
            }
        }
    }

    /// The scope the walk continues into after `scope`: the host scope
    /// for an embedded file root, otherwise the lexical parent.
    fn advance_from(&mut self, scope: ScopeId) -> Option<ScopeId> {
        let kind = self.graph.scope_kind(scope);
        if kind == ScopeKind::File {
            if let Some(host) = self
                .graph
                .file_of(scope)
                .and_then(|file| self.graph.host_scope_of(file))
            {
                self.queue
                    .push_back(ScopeEvent::Transition(ScopeTransition::HostScope));
                return Some(host);
            }
        }
        let parent = self.graph.enclosing_scope(scope);
        if parent.is_some() {
            self.queue
                .push_back(ScopeEvent::Transition(ScopeTransition::EnclosingScope {
                    exited: kind,
                }));
        }
        parent
    }
}

impl Iterator for ScopeWalk<'_> {
    type Item = ScopeEvent;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(event) = self.queue.pop_front() {
                return Some(event);
            }
            let scope = self.current?;
            self.fill_from(scope);
            self.current = self.advance_from(scope);
        }
    }
}
