//! Handle into the batch type arena.
//!
//! Nodes refer to resolved types by a 32-bit index into the arena owned by
//! the batch's type cache. Two nodes whose types have the same signature hold
//! the same `TypeId`, so type identity is an integer comparison.
//!
//! # Layout
//!
//! - 0-11: primitives, pre-interned in [`PrimitiveKind`] order
//! - 12: the `Unknown` sentinel
//! - 13..: dynamically allocated types

use std::fmt;

use crate::token::PrimitiveKind;

/// Index of a type in the batch arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct TypeId(u32);

impl TypeId {
    pub const BOOLEAN: Self = Self(0);
    pub const BYTE: Self = Self(1);
    pub const CHAR: Self = Self(2);
    pub const DOUBLE: Self = Self(3);
    pub const FLOAT: Self = Self(4);
    pub const INT: Self = Self(5);
    pub const LONG: Self = Self(6);
    pub const SHORT: Self = Self(7);
    pub const VOID: Self = Self(8);
    pub const STRING: Self = Self(9);
    pub const NULL: Self = Self(10);
    pub const NONE: Self = Self(11);

    /// A type the front end could not resolve: present, but unavailable.
    ///
    /// Never equivalent to a node having no type at all.
    pub const UNKNOWN: Self = Self(12);

    /// Number of pre-interned primitive types.
    pub const PRIMITIVE_COUNT: u32 = 12;

    /// First index handed out for dynamically allocated types.
    pub const FIRST_DYNAMIC: u32 = 13;

    /// Create an id from a raw index.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw index.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Index into arena storage.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Fixed id of a primitive.
    #[inline]
    pub const fn primitive(kind: PrimitiveKind) -> Self {
        Self(kind as u32)
    }

    #[inline]
    pub const fn is_primitive(self) -> bool {
        self.0 < Self::PRIMITIVE_COUNT
    }

    #[inline]
    pub const fn is_unknown(self) -> bool {
        self.0 == Self::UNKNOWN.0
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unknown() {
            return write!(f, "TypeId::UNKNOWN");
        }
        match PrimitiveKind::from_index(self.0) {
            Some(kind) => write!(f, "TypeId::{kind:?}"),
            None => write!(f, "TypeId({})", self.0),
        }
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unknown() {
            return write!(f, "{{undefined}}");
        }
        match PrimitiveKind::from_index(self.0) {
            Some(kind) => write!(f, "{}", kind.keyword()),
            None => write!(f, "type#{}", self.0),
        }
    }
}

const _: () = assert!(std::mem::size_of::<TypeId>() == 4);
