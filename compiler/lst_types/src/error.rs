use lst_ir::TypeId;

use crate::TypeKind;

/// Failure to intern a type.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InternError {
    /// The signature is already bound to an entry of a different kind.
    ///
    /// Signatures are the identity of a type across the whole batch, so this
    /// means the cache is corrupt and nothing built from it can be trusted.
    #[error("signature `{signature}` is bound to a {existing} entry, cannot intern a {incoming}")]
    SignatureCollision {
        signature: String,
        existing: TypeKind,
        incoming: TypeKind,
    },
    /// `fill` on an id that is not a reserved class entry.
    #[error("{id:?} is not a reserved class entry")]
    NotReserved { id: TypeId },
}
