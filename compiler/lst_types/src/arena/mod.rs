//! Type storage keyed by signature.
//!
//! The arena is append-only. Every entry except [`TypeRef::Cyclic`] is
//! registered under its signature, and a signature is bound at most once: a
//! second intern of the same signature returns the existing id, or fails when
//! the existing entry has a different structural kind.
//!
//! # Pre-interned Types
//!
//! Primitives occupy the fixed ids in [`PrimitiveKind`] order, followed by
//! [`TypeId::UNKNOWN`], so nodes can name them without touching the arena.

use lst_ir::token::PrimitiveKind;
use lst_ir::TypeId;
use rustc_hash::FxHashMap;

use crate::{ClassType, InternError, TypeKind, TypeRef};

/// Signature of the `Unknown` sentinel.
pub const UNKNOWN_SIGNATURE: &str = "{undefined}";

/// Signature of a primitive. `None` has no keyword of its own.
pub fn primitive_signature(kind: PrimitiveKind) -> &'static str {
    match kind {
        PrimitiveKind::None => "{none}",
        other => other.keyword(),
    }
}

#[derive(Clone, Debug)]
struct Entry {
    signature: String,
    ty: TypeRef,
}

/// Append-only type storage for one batch.
#[derive(Clone, Debug)]
pub struct TypeArena {
    entries: Vec<Entry>,
    by_signature: FxHashMap<String, TypeId>,
    /// `Cyclic` entries, keyed by the signature they point back to.
    cyclic: FxHashMap<String, TypeId>,
}

impl Default for TypeArena {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeArena {
    pub fn new() -> Self {
        let mut arena = TypeArena {
            entries: Vec::with_capacity(256),
            by_signature: FxHashMap::default(),
            cyclic: FxHashMap::default(),
        };
        for kind in PrimitiveKind::ALL {
            arena.push(primitive_signature(kind).to_owned(), TypeRef::Primitive(kind));
        }
        arena.push(UNKNOWN_SIGNATURE.to_owned(), TypeRef::Unknown);
        debug_assert_eq!(arena.entries.len(), TypeId::FIRST_DYNAMIC as usize);
        arena
    }

    fn push(&mut self, signature: String, ty: TypeRef) -> TypeId {
        let id = TypeId::from_raw(u32::try_from(self.entries.len()).unwrap_or(u32::MAX));
        self.by_signature.insert(signature.clone(), id);
        self.entries.push(Entry { signature, ty });
        id
    }

    /// Number of entries, including the pre-interned ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entry for `id`, or `Unknown` for an id from another arena.
    pub fn get(&self, id: TypeId) -> &TypeRef {
        self.entries
            .get(id.index())
            .map_or(&TypeRef::Unknown, |entry| &entry.ty)
    }

    pub fn signature(&self, id: TypeId) -> &str {
        self.entries
            .get(id.index())
            .map_or(UNKNOWN_SIGNATURE, |entry| entry.signature.as_str())
    }

    pub fn lookup(&self, signature: &str) -> Option<TypeId> {
        self.by_signature.get(signature).copied()
    }

    /// Intern `ty` under `signature`.
    ///
    /// Returns the existing id when the signature is already bound to an entry
    /// of the same kind.
    pub fn intern(&mut self, signature: String, ty: TypeRef) -> Result<TypeId, InternError> {
        if let Some(existing) = self.lookup(&signature) {
            self.check_kind(existing, &signature, ty.kind())?;
            return Ok(existing);
        }
        Ok(self.push(signature, ty))
    }

    /// Allocate a class entry before its members are resolved.
    ///
    /// The placeholder is visible under its signature immediately, which is
    /// what lets members that mention the class resolve to this id.
    pub fn reserve(&mut self, placeholder: ClassType) -> Result<TypeId, InternError> {
        let signature = placeholder.fq_name.clone();
        self.intern(signature, TypeRef::Class(placeholder))
    }

    /// Replace a reserved class entry with the completed class.
    pub fn fill(&mut self, id: TypeId, mut class: ClassType) -> Result<(), InternError> {
        match self.entries.get_mut(id.index()) {
            Some(Entry {
                ty: TypeRef::Class(slot),
                ..
            }) => {
                class.complete = true;
                *slot = class;
                Ok(())
            }
            _ => Err(InternError::NotReserved { id }),
        }
    }

    /// The `Cyclic` entry pointing back at `signature`.
    pub fn cyclic(&mut self, signature: &str) -> TypeId {
        if let Some(&id) = self.cyclic.get(signature) {
            return id;
        }
        let id = TypeId::from_raw(u32::try_from(self.entries.len()).unwrap_or(u32::MAX));
        self.entries.push(Entry {
            signature: signature.to_owned(),
            ty: TypeRef::Cyclic {
                signature: signature.to_owned(),
            },
        });
        self.cyclic.insert(signature.to_owned(), id);
        id
    }

    /// Resolve a `Cyclic` entry to the type it refers to.
    ///
    /// Other entries, and back-references whose target was never interned,
    /// are returned unchanged.
    pub fn follow_cyclic(&self, id: TypeId) -> TypeId {
        match self.get(id) {
            TypeRef::Cyclic { signature } => self.lookup(signature).unwrap_or(id),
            _ => id,
        }
    }

    fn check_kind(&self, existing: TypeId, signature: &str, incoming: TypeKind) -> Result<(), InternError> {
        let existing_kind = self.get(existing).kind();
        if existing_kind == incoming {
            Ok(())
        } else {
            tracing::error!(signature, %existing_kind, %incoming, "type signature collision");
            Err(InternError::SignatureCollision {
                signature: signature.to_owned(),
                existing: existing_kind,
                incoming,
            })
        }
    }

    /// Fail unless `signature` is free or bound to an entry of kind `kind`.
    pub fn expect_kind(&self, signature: &str, kind: TypeKind) -> Result<Option<TypeId>, InternError> {
        match self.lookup(signature) {
            Some(existing) => {
                self.check_kind(existing, signature, kind)?;
                Ok(Some(existing))
            }
            None => Ok(None),
        }
    }

    /// Iterate `(id, signature, entry)` in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (TypeId, &str, &TypeRef)> {
        self.entries.iter().enumerate().map(|(i, entry)| {
            (
                TypeId::from_raw(u32::try_from(i).unwrap_or(u32::MAX)),
                entry.signature.as_str(),
                &entry.ty,
            )
        })
    }
}
