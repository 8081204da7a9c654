//! Type graph for lossless semantic trees.
//!
//! Front-end types are interned into a [`TypeArena`] keyed by signature, so
//! every occurrence of a type across a batch shares one [`TypeId`]. The graph
//! is cyclic (a class's methods return the class, a type variable is bounded
//! by a type mentioning itself); cycles are closed through reserved ids and
//! [`TypeRef::Cyclic`] back-references rather than shared pointers.
//!
//! # Entry points
//!
//! - [`SharedTypeCache::resolve`]: intern one front-end type, thread-safe
//! - [`TypeInterner`]: the resolution algorithm over an exclusive arena
//! - [`TypeMatcher`]: compare types from different arenas

mod arena;
mod cache;
mod error;
mod flags;
mod format;
mod interner;
mod matcher;
mod signature;
mod source;
mod type_ref;

pub use arena::{primitive_signature, TypeArena, UNKNOWN_SIGNATURE};
pub use cache::{InternConfig, SharedTypeCache, DEFAULT_TOP_TYPE};
pub use error::InternError;
pub use flags::Flags;
pub use interner::{shape_kind, TypeInterner};
pub use matcher::TypeMatcher;
pub use signature::{erased_class_name, SignatureBuilder};
pub use source::{ClassShape, MethodShape, TypeShape, TypeSource, VariableShape};
pub use type_ref::{ClassType, MethodType, TypeKind, TypeRef, VariableType, Variance};

#[cfg(test)]
mod test_helpers;
