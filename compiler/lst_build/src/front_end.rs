//! What the builder needs from a compiler front end.
//!
//! A front end hands over an already parsed and attributed AST. The builder
//! never looks at tokens the front end produced; it only needs node kinds,
//! spans, role-tagged children and the type of each node. Everything between
//! and around those spans is recovered from the source text.

use std::fmt::Debug;

use lst_ir::token::{BinaryOp, ClassKind, LiteralKind, ModifierKind, PrimitiveKind, UnaryOp, WildcardBound};
use lst_ir::Span;
use lst_types::TypeSource;

/// Syntactic category of a front-end node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AstKind {
    CompilationUnit,
    Package,
    Import { is_static: bool },
    ClassDecl(ClassKind),
    EnumConstant,
    MethodDecl,
    VariableDecl,
    Modifier(ModifierKind),
    Annotation,
    TypeParameter,

    Block,
    Return,
    If,
    WhileLoop,
    DoWhileLoop,
    ForLoop,
    ForEachLoop,
    Break,
    Continue,
    Throw,
    /// `try`, with its resources, catches and `finally` block as children.
    Try,
    Catch,
    /// Selector in [`Role::Selector`], one [`AstKind::Case`] per case.
    Switch,
    /// `case` labels in [`Role::Label`]; a case without labels is `default`.
    Case,
    Yield,
    Labeled,
    Synchronized,
    Assert,
    EmptyStatement,

    Parentheses,
    Binary(BinaryOp),
    Unary(UnaryOp),
    Assignment,
    CompoundAssignment(BinaryOp),
    Conditional,
    InstanceOf,
    TypeCast,
    MethodInvocation,
    NewClass,
    FieldAccess,
    Identifier,
    Literal(LiteralKind),
    ArrayAccess,
    /// `new T[n][]{..}`. The element type, without brackets, is in
    /// [`Role::Element`]; sized dimensions in [`Role::Dimension`]; initializer
    /// values in [`Role::Initializer`]. A bare `{..}` has no element type.
    NewArray,
    /// `Type::name`.
    MemberReference,
    Lambda,

    PrimitiveType(PrimitiveKind),
    ArrayType,
    ParameterizedType,
    Wildcard(Option<WildcardBound>),
    /// Alternatives of a multi-catch type.
    UnionType,

    /// A construct the front end parsed but could not classify.
    Erroneous,
}

impl AstKind {
    /// Whether nodes of this kind declare a named symbol.
    pub const fn is_declaration(self) -> bool {
        matches!(
            self,
            AstKind::ClassDecl(_) | AstKind::MethodDecl | AstKind::VariableDecl
        )
    }
}

/// Position of a child within its parent.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// Top-level item of a compilation unit.
    Item,
    /// Modifier or annotation, in source order.
    Modifier,
    Name,
    TypeParam,
    Extends,
    /// Implemented interfaces, or super-interfaces of an interface.
    Implements,
    Member,
    Param,
    ReturnType,
    Throws,
    Body,
    Type,
    Initializer,
    Statement,
    Expression,
    Condition,
    Then,
    Else,
    Init,
    Update,
    Variable,
    Iterable,
    Label,
    Operand,
    Left,
    Right,
    Target,
    Value,
    Select,
    Argument,
    Clazz,
    TypeArg,
    Bound,
    Index,
    Element,
    Dimension,
    Resource,
    Catch,
    Finally,
    Selector,
    Case,
    Detail,
    Alternative,
}

/// One child of a node, tagged with its role.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Child<N> {
    pub role: Role,
    pub node: N,
}

/// A parsed and attributed AST together with its types.
///
/// Children must be reported in source order with non-decreasing,
/// non-overlapping spans. The one exception is a declaration of several
/// names (`int a, b;`), which the front end may split into sibling
/// [`AstKind::VariableDecl`] nodes sharing a start offset. Spans exclude
/// statement terminators.
pub trait FrontEnd: TypeSource {
    /// Handle for one AST node.
    type Node: Copy + Eq + Debug;

    fn root(&self) -> Self::Node;

    fn kind(&self, node: Self::Node) -> AstKind;

    fn children(&self, node: Self::Node) -> Vec<Child<Self::Node>>;

    fn span(&self, node: Self::Node) -> Span;

    /// Name of the symbol a declaration introduces or a reference resolves to.
    fn symbol(&self, node: Self::Node) -> Option<String>;

    /// Attributed type, if the front end computed one.
    fn ty(&self, node: Self::Node) -> Option<Self::Type>;

    /// The node was synthesized by the front end and has no source text.
    fn is_synthetic(&self, node: Self::Node) -> bool;
}
