//! Declaration flags carried by class, method and variable types.

use bitflags::bitflags;
use lst_ir::token::ModifierKind;

bitflags! {
    /// Modifiers and declaration properties of a type member.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct Flags: u32 {
        // === Access (bits 0-2) ===
        const PUBLIC = 1 << 0;
        const PROTECTED = 1 << 1;
        const PRIVATE = 1 << 2;

        // === Modifiers (bits 3-13) ===
        const STATIC = 1 << 3;
        const FINAL = 1 << 4;
        const ABSTRACT = 1 << 5;
        const DEFAULT = 1 << 6;
        const SYNCHRONIZED = 1 << 7;
        const NATIVE = 1 << 8;
        const TRANSIENT = 1 << 9;
        const VOLATILE = 1 << 10;
        const STRICTFP = 1 << 11;
        const SEALED = 1 << 12;
        const NON_SEALED = 1 << 13;

        // === Declaration properties (bits 16+) ===
        /// Method taking a variable number of trailing arguments.
        const VARARGS = 1 << 16;
        /// Member produced by the compiler rather than written in source.
        const SYNTHETIC = 1 << 17;
        /// Constructor rather than an ordinary method.
        const CONSTRUCTOR = 1 << 18;
        /// Enum constant field.
        const ENUM_CONSTANT = 1 << 19;
    }
}

impl Flags {
    pub const ACCESS: Flags = Flags::PUBLIC.union(Flags::PROTECTED).union(Flags::PRIVATE);

    pub fn from_modifier(modifier: ModifierKind) -> Flags {
        match modifier {
            ModifierKind::Public => Flags::PUBLIC,
            ModifierKind::Protected => Flags::PROTECTED,
            ModifierKind::Private => Flags::PRIVATE,
            ModifierKind::Static => Flags::STATIC,
            ModifierKind::Final => Flags::FINAL,
            ModifierKind::Abstract => Flags::ABSTRACT,
            ModifierKind::Default => Flags::DEFAULT,
            ModifierKind::Synchronized => Flags::SYNCHRONIZED,
            ModifierKind::Native => Flags::NATIVE,
            ModifierKind::Transient => Flags::TRANSIENT,
            ModifierKind::Volatile => Flags::VOLATILE,
            ModifierKind::Strictfp => Flags::STRICTFP,
            ModifierKind::Sealed => Flags::SEALED,
            ModifierKind::NonSealed => Flags::NON_SEALED,
        }
    }

    pub fn from_modifiers(modifiers: impl IntoIterator<Item = ModifierKind>) -> Flags {
        modifiers
            .into_iter()
            .fold(Flags::empty(), |acc, m| acc | Flags::from_modifier(m))
    }
}
