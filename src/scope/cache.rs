//! Memoized import lookups.
//!
//! Import resolution is the one collaborator call hot enough to cache:
//! every unqualified reference in a file consults the same directives.
//! Entries are keyed by `(scope, name)` and cache misses too, so a name
//! no import binds is answered without re-walking directives.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use crate::base::{DeclId, ScopeId};
use crate::scope::ImportFallback;

/// Shared cache over an [`ImportFallback`].
///
/// Callers own invalidation: [`clear`](Self::clear) on project-wide
/// changes, [`remove_scope`](Self::remove_scope) when one file's imports
/// are edited.
#[derive(Debug, Default)]
pub struct ImportCache {
    entries: RwLock<FxHashMap<(ScopeId, SmolStr), Option<DeclId>>>,
}

impl ImportCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up `name` as seen from `scope`, consulting `fallback` on a
    /// cache miss. A `None` result is cached like any other.
    pub fn resolve(
        &self,
        name: &str,
        scope: ScopeId,
        fallback: &dyn ImportFallback,
    ) -> Option<DeclId> {
        if let Some(cached) = self.entries.read().get(&(scope, SmolStr::new(name))) {
            return *cached;
        }
        let resolved = fallback.resolve_via_import(name, scope);
        // Two racing misses compute the same answer; last write wins.
        self.entries
            .write()
            .insert((scope, SmolStr::new(name)), resolved);
        resolved
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Drop entries recorded for one scope.
    pub fn remove_scope(&self, scope: ScopeId) {
        self.entries.write().retain(|(s, _), _| *s != scope);
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.read().len()
    }
}
