//! Token vocabulary shared by the builder and the printer.
//!
//! The tree stores tags, not keyword or operator text. The builder scans the
//! source for `tag.as_str()` to locate a token and its surrounding space, and
//! the printer emits the same text back, so both sides must read it from here.

use std::fmt;

/// Primitive types, also used as the order of the pre-interned type ids.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum PrimitiveKind {
    Boolean = 0,
    Byte = 1,
    Char = 2,
    Double = 3,
    Float = 4,
    Int = 5,
    Long = 6,
    Short = 7,
    Void = 8,
    String = 9,
    Null = 10,
    /// No type at all (e.g. the type of a package name).
    None = 11,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 12] = [
        PrimitiveKind::Boolean,
        PrimitiveKind::Byte,
        PrimitiveKind::Char,
        PrimitiveKind::Double,
        PrimitiveKind::Float,
        PrimitiveKind::Int,
        PrimitiveKind::Long,
        PrimitiveKind::Short,
        PrimitiveKind::Void,
        PrimitiveKind::String,
        PrimitiveKind::Null,
        PrimitiveKind::None,
    ];

    /// Source keyword. `String` and `None` are not keywords but still have a
    /// stable name used in type signatures.
    pub const fn keyword(self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::Char => "char",
            PrimitiveKind::Double => "double",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Short => "short",
            PrimitiveKind::Void => "void",
            PrimitiveKind::String => "String",
            PrimitiveKind::Null => "null",
            PrimitiveKind::None => "",
        }
    }

    pub fn from_index(index: u32) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }
}

/// Flavor of a type declaration.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClassKind {
    Class,
    Interface,
    Enum,
    Record,
    Annotation,
}

impl ClassKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            ClassKind::Class => "class",
            ClassKind::Interface => "interface",
            ClassKind::Enum => "enum",
            ClassKind::Record => "record",
            ClassKind::Annotation => "@interface",
        }
    }

    /// Keyword introducing the implemented-interfaces list.
    ///
    /// Interfaces list their super-interfaces after `extends`.
    pub const fn implements_keyword(self) -> Keyword {
        match self {
            ClassKind::Interface | ClassKind::Annotation => Keyword::Extends,
            ClassKind::Class | ClassKind::Enum | ClassKind::Record => Keyword::Implements,
        }
    }
}

/// Declaration modifiers.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModifierKind {
    Public,
    Protected,
    Private,
    Static,
    Final,
    Abstract,
    Default,
    Synchronized,
    Native,
    Transient,
    Volatile,
    Strictfp,
    Sealed,
    NonSealed,
}

impl ModifierKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            ModifierKind::Public => "public",
            ModifierKind::Protected => "protected",
            ModifierKind::Private => "private",
            ModifierKind::Static => "static",
            ModifierKind::Final => "final",
            ModifierKind::Abstract => "abstract",
            ModifierKind::Default => "default",
            ModifierKind::Synchronized => "synchronized",
            ModifierKind::Native => "native",
            ModifierKind::Transient => "transient",
            ModifierKind::Volatile => "volatile",
            ModifierKind::Strictfp => "strictfp",
            ModifierKind::Sealed => "sealed",
            ModifierKind::NonSealed => "non-sealed",
        }
    }
}

/// Binary operators, also used (minus the `=`) by compound assignments.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    And,
    Or,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
    UShr,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

impl BinaryOp {
    pub const fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::UShr => ">>>",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
        }
    }

    /// Text of the compound assignment form (`+=`, `<<=`, ...).
    pub fn assign_str(self) -> String {
        format!("{}=", self.as_str())
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnaryOp {
    PreIncrement,
    PreDecrement,
    PostIncrement,
    PostDecrement,
    Positive,
    Negative,
    Complement,
    Not,
}

impl UnaryOp {
    pub const fn as_str(self) -> &'static str {
        match self {
            UnaryOp::PreIncrement | UnaryOp::PostIncrement => "++",
            UnaryOp::PreDecrement | UnaryOp::PostDecrement => "--",
            UnaryOp::Positive => "+",
            UnaryOp::Negative => "-",
            UnaryOp::Complement => "~",
            UnaryOp::Not => "!",
        }
    }

    /// Postfix operators follow their operand.
    pub const fn is_postfix(self) -> bool {
        matches!(self, UnaryOp::PostIncrement | UnaryOp::PostDecrement)
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LiteralKind {
    Int,
    Long,
    Float,
    Double,
    Char,
    String,
    TextBlock,
    Boolean,
    Null,
}

/// Direction of an explicit wildcard bound.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WildcardBound {
    Extends,
    Super,
}

impl WildcardBound {
    pub const fn keyword(self) -> Keyword {
        match self {
            WildcardBound::Extends => Keyword::Extends,
            WildcardBound::Super => Keyword::Super,
        }
    }
}

/// What separates a switch case's labels from its body.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CaseForm {
    /// `case A:` followed by statements that may fall through.
    Statement,
    /// `case A ->` followed by one expression, block or throw.
    Rule,
}

impl CaseForm {
    pub const fn as_str(self) -> &'static str {
        match self {
            CaseForm::Statement => punct::COLON,
            CaseForm::Rule => punct::ARROW,
        }
    }
}

/// Keywords the tree derives from node kinds rather than storing.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Keyword {
    Package,
    Import,
    Static,
    Return,
    If,
    Else,
    While,
    Do,
    For,
    Break,
    Continue,
    Throw,
    New,
    InstanceOf,
    Extends,
    Implements,
    Throws,
    Super,
    Try,
    Catch,
    Finally,
    Switch,
    Case,
    Default,
    Synchronized,
    Assert,
    Yield,
}

impl Keyword {
    pub const fn as_str(self) -> &'static str {
        match self {
            Keyword::Package => "package",
            Keyword::Import => "import",
            Keyword::Static => "static",
            Keyword::Return => "return",
            Keyword::If => "if",
            Keyword::Else => "else",
            Keyword::While => "while",
            Keyword::Do => "do",
            Keyword::For => "for",
            Keyword::Break => "break",
            Keyword::Continue => "continue",
            Keyword::Throw => "throw",
            Keyword::New => "new",
            Keyword::InstanceOf => "instanceof",
            Keyword::Extends => "extends",
            Keyword::Implements => "implements",
            Keyword::Throws => "throws",
            Keyword::Super => "super",
            Keyword::Try => "try",
            Keyword::Catch => "catch",
            Keyword::Finally => "finally",
            Keyword::Switch => "switch",
            Keyword::Case => "case",
            Keyword::Default => "default",
            Keyword::Synchronized => "synchronized",
            Keyword::Assert => "assert",
            Keyword::Yield => "yield",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Punctuation.
pub mod punct {
    pub const LPAREN: &str = "(";
    pub const RPAREN: &str = ")";
    pub const LBRACE: &str = "{";
    pub const RBRACE: &str = "}";
    pub const LBRACKET: &str = "[";
    pub const RBRACKET: &str = "]";
    pub const LT: &str = "<";
    pub const GT: &str = ">";
    pub const COMMA: &str = ",";
    pub const SEMI: &str = ";";
    pub const DOT: &str = ".";
    pub const EQ: &str = "=";
    pub const QUESTION: &str = "?";
    pub const COLON: &str = ":";
    pub const ARROW: &str = "->";
    pub const AT: &str = "@";
    pub const AMP: &str = "&";
    pub const PIPE: &str = "|";
    pub const DOUBLE_COLON: &str = "::";
}
