//! Accessibility problem kinds.
//!
//! Rejections are data, not errors: a candidate turned away by the
//! accessibility rules is recorded with the reason and still ranked, so
//! a caller can report "found but private" instead of "not found".

use thiserror::Error;

/// Why an otherwise-matching declaration may not be referenced from the
/// reference site.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum AccessProblem {
    /// The member is private to a class the reference site is not in.
    #[error("member is private and not accessible from here")]
    PrivateMemberNotAccessible,
    /// The member is protected and the reference site is not in the
    /// declaring class or one of its subclasses.
    #[error("member is protected and not accessible from here")]
    ProtectedMemberNotAccessible,
    /// A static context was required but the member is an instance
    /// member.
    #[error("instance member is not accessible from a static context")]
    InstanceMemberInaccessible,
    /// An instance context reached a static member it may not use
    /// unqualified.
    #[error("static member is not accessible without its class as qualifier")]
    StaticMemberInaccessible,
    /// The member belongs to a custom namespace that is not open at the
    /// reference site.
    #[error("member belongs to a namespace that is not open here")]
    MemberFromUnopenedNamespace,
}
