//! Qualifier type evaluation.
//!
//! Adapts the host's type oracle: each type inferred for a qualifier
//! expression becomes namespaces on the scope stack, while the shape of
//! the answer (strict annotation, dynamic class, any-type, no answer)
//! accumulates into the strictness signs.

use tracing::trace;

use crate::base::ExprId;
use crate::resolve::Resolver;
use crate::resolve::type_info::{MatchStrictness, TypeInfo};
use crate::scope::InferredType;

impl Resolver<'_> {
    /// Evaluate a qualifier expression into context levels.
    pub(crate) fn evaluate_qualifier(
        &self,
        expr: ExprId,
        info: &mut TypeInfo,
        signs: &mut MatchStrictness,
    ) {
        for inferred in self.oracle.infer_type(expr) {
            if inferred.strict_typing_possible() {
                // A precise annotated type: stop guessing.
                signs.require_complete();
            }
            match inferred {
                InferredType::Known {
                    namespace,
                    strict_source,
                    empty_object,
                    type_parameter,
                    dynamic_class,
                } => {
                    if !strict_source || empty_object || type_parameter || dynamic_class {
                        signs.allow_partial();
                    }
                    self.add_type_hierarchy(namespace.with_strict(true), info);
                }
                InferredType::Dynamic => signs.allow_partial(),
                InferredType::Unresolved => {}
            }
        }

        // When inference said nothing binding, a package or type name
        // readable off the qualifier's own syntax still works.
        if !signs.complete_only_evaluated() || info.is_empty() {
            if let Some(namespace) = self.graph.local_namespace_of(expr) {
                self.add_type_hierarchy(namespace.with_strict(true), info);
            }
        }
        trace!(
            levels = info.levels().len(),
            complete_only = signs.complete_only(),
            "qualifier evaluated"
        );
    }
}
