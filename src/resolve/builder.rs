//! Scope-stack construction.
//!
//! Turns a reference site into the [`TypeInfo`] it resolves against:
//! the global root when the reference might mean a top-level symbol,
//! the qualifier's type hierarchy when it has one, the enclosing class
//! hierarchy when it reads like class-body code, and the enclosing
//! package as a last lexical fallback.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;
use tracing::{trace, warn};

use crate::base::DeclId;
use crate::model::{ContextKind, Namespace, QualifiedName, Qualifier, Reference, UNIVERSAL_BASE};
use crate::resolve::Resolver;
use crate::resolve::type_info::{GlobalStatus, MatchStrictness, TypeInfo};

/// Hierarchy depth past which the walk is logged as suspect.
const HIERARCHY_DEPTH_WARN: i32 = 100;

/// What the reference's syntax alone says about global visibility.
fn global_status_hint(reference: &Reference) -> GlobalStatus {
    if reference.qualifier.is_present() {
        GlobalStatus::NonGlobal
    } else if reference.in_dynamic_scope {
        GlobalStatus::Unknown
    } else {
        GlobalStatus::Global
    }
}

impl Resolver<'_> {
    /// Build the scope stack for one reference, accumulating strictness
    /// signs on the way.
    pub(crate) fn build_type_info(
        &self,
        reference: &Reference,
        signs: &mut MatchStrictness,
    ) -> TypeInfo {
        let hint = global_status_hint(reference);
        let mut info = TypeInfo::new(hint);
        if hint == GlobalStatus::Global {
            info.add_namespace(Namespace::anonymous(), true);
        }

        match reference.qualifier {
            Qualifier::This => self.add_self_context(reference, false, &mut info, signs),
            Qualifier::Super => self.add_self_context(reference, true, &mut info, signs),
            Qualifier::Expr(expr) => self.evaluate_qualifier(expr, &mut info, signs),
            Qualifier::None => {
                if let Some(class) = self.graph.declaring_class_of(reference.scope) {
                    // Class-body code sees its own members unqualified.
                    // Static sites only see the static side; elsewhere
                    // the context stays open so the accessibility rules
                    // police statics instead.
                    let context = if reference.in_static_member {
                        ContextKind::Static
                    } else {
                        ContextKind::Unknown
                    };
                    self.add_type_hierarchy(
                        Namespace::of_type(class).with_context(context),
                        &mut info,
                    );
                }
                match self.import_hit(reference) {
                    Some(target) => {
                        let ns = self.graph.declaration(target).namespace.clone();
                        info.add_namespace(ns, false);
                    }
                    None => self.add_package_scope(reference, &mut info),
                }
            }
        }

        if info.type_was_processed() {
            info.add_universal_base(Namespace::of_type(QualifiedName::new(UNIVERSAL_BASE)));
        }
        trace!(
            hint = ?hint,
            levels = info.levels().len(),
            "scope stack built"
        );
        info
    }

    /// The enclosing class (or its supertypes, for a super-qualifier) as
    /// the reference's context.
    fn add_self_context(
        &self,
        reference: &Reference,
        from_super: bool,
        info: &mut TypeInfo,
        signs: &mut MatchStrictness,
    ) {
        let Some(class) = self.graph.declaring_class_of(reference.scope) else {
            // A self-qualifier outside any class has no trustworthy
            // context at all.
            info.force_unknown();
            return;
        };
        let class_ns = Namespace::of_type(class).with_context(ContextKind::Instance);
        if from_super {
            for parent in self.graph.supertypes_of(&class_ns) {
                self.add_type_hierarchy(parent.with_context(ContextKind::Instance), info);
            }
        } else {
            self.add_type_hierarchy(class_ns.clone(), info);
        }

        // A dynamic self-type poisons the global verdict and keeps the
        // relaxed fallbacks; a known static one ends guessing.
        if self.graph.class_is_dynamic(&class_ns) {
            info.force_unknown();
        } else {
            signs.require_complete();
        }
    }

    /// Add a namespace and everything above it in the type hierarchy.
    /// Supertypes land one level farther than their subtype, inherit its
    /// context and strictness, and are deduplicated across the whole
    /// stack; the universal base is left for the final sentinel level.
    pub(crate) fn add_type_hierarchy(&self, namespace: Namespace, info: &mut TypeInfo) {
        info.mark_type_processed();
        let entry_level = info.add_namespace(namespace.clone(), true);

        let mut visited: FxHashSet<QualifiedName> = FxHashSet::default();
        if let Some(qname) = &namespace.qualified_name {
            visited.insert(qname.clone());
        }
        let mut pending: VecDeque<(Namespace, i32)> = VecDeque::new();
        pending.push_back((namespace, entry_level));
        while let Some((child, child_level)) = pending.pop_front() {
            let depth = child_level - entry_level;
            if depth == HIERARCHY_DEPTH_WARN {
                warn!(
                    depth,
                    namespace = ?child.qualified_name,
                    "type hierarchy is suspiciously deep"
                );
            }
            for parent in self.graph.supertypes_of(&child) {
                if parent.is_universal_base() {
                    continue;
                }
                let Some(qname) = &parent.qualified_name else {
                    continue;
                };
                if !visited.insert(qname.clone()) {
                    continue;
                }
                let parent = parent
                    .with_context(child.context)
                    .with_strict(child.is_source_strict);
                info.add_at_level(parent.clone(), child_level + 1, false);
                pending.push_back((parent, child_level + 1));
            }
        }
    }

    /// Lexical fallback for unqualified references no import explains:
    /// the enclosing package, from the file's package statement, the
    /// declaring class's qualifier, or the host document of an embedded
    /// file.
    fn add_package_scope(&self, reference: &Reference, info: &mut TypeInfo) {
        let package = self
            .graph
            .package_of(reference.file)
            .or_else(|| {
                self.graph
                    .declaring_class_of(reference.scope)
                    .and_then(|class| class.parent())
            })
            .or_else(|| self.graph.host_package_of(reference.file));
        if let Some(package) = package {
            info.add_namespace(Namespace::of_type(package), false);
            info.mark_type_processed();
        }
    }

    /// The declaration an import binds this name to, memoized.
    pub(crate) fn import_hit(&self, reference: &Reference) -> Option<DeclId> {
        self.import_cache
            .resolve(&reference.name, reference.scope, self.imports)
    }
}
