//! Tree nodes.
//!
//! One closed sum type, [`NodeKind`], covers every syntactic form, so the
//! builder and the printer both match it exhaustively. Keywords, operators and
//! punctuation are derived from the kind; only identifiers, literals and
//! comments store source text.

use std::sync::atomic::{AtomicU32, Ordering};

use crate::token::{
    BinaryOp, CaseForm, ClassKind, LiteralKind, ModifierKind, PrimitiveKind, UnaryOp, WildcardBound,
};
use crate::{Container, LeftPadded, Marker, Markers, RightPadded, Space, TypeId};

/// Opaque node identifier, stable across edits of other nodes.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(u32);

static NEXT_NODE_ID: AtomicU32 = AtomicU32::new(1);

impl NodeId {
    /// Placeholder id, never handed out by [`NodeId::fresh`].
    pub const DUMMY: NodeId = NodeId(0);

    /// Allocate an id unique within the process.
    pub fn fresh() -> Self {
        NodeId(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// A tree node: the space before it, its markers, its syntax and its type.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub id: NodeId,
    pub prefix: Space,
    pub markers: Markers,
    pub kind: NodeKind,
    pub ty: Option<TypeId>,
}

impl Node {
    pub fn new(prefix: Space, kind: NodeKind) -> Self {
        Node {
            id: NodeId::fresh(),
            prefix,
            markers: Markers::new(),
            kind,
            ty: None,
        }
    }

    /// A node with no source text. The printer skips it entirely.
    pub fn implicit(kind: NodeKind) -> Self {
        Node {
            id: NodeId::fresh(),
            prefix: Space::EMPTY,
            markers: Markers::of(Marker::Implicit),
            kind,
            ty: None,
        }
    }

    /// Empty node with an empty prefix, used where a list position has no element.
    pub fn empty() -> Self {
        Node::new(Space::EMPTY, NodeKind::Empty)
    }

    #[must_use]
    pub fn with_markers(mut self, markers: Markers) -> Self {
        self.markers = markers;
        self
    }

    #[must_use]
    pub fn with_type(mut self, ty: Option<TypeId>) -> Self {
        self.ty = ty;
        self
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: Space) -> Self {
        self.prefix = prefix;
        self
    }

    #[must_use]
    pub fn with_kind(mut self, kind: NodeKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn is_implicit(&self) -> bool {
        self.markers.is_implicit()
    }

    /// Short name of the node kind, for logs and diagnostics.
    pub fn kind_name(&self) -> &'static str {
        self.kind.name()
    }

    /// Name of an identifier node.
    pub fn as_identifier(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Identifier { name } => Some(name),
            _ => None,
        }
    }

    /// The written node an implicit node wraps, e.g. the expression of a
    /// lambda body's implicit `return`.
    pub fn written_inner(&self) -> Option<&Node> {
        if !self.is_implicit() {
            return None;
        }
        match &self.kind {
            NodeKind::Return { expr: Some(expr) } if !expr.is_implicit() => Some(expr),
            _ => None,
        }
    }

    /// Whether the node has no source text at all.
    pub fn is_zero_width(&self) -> bool {
        self.is_implicit() && self.written_inner().is_none()
    }
}

/// Root of one source file.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceFile {
    pub items: Vec<RightPadded<Node>>,
    /// Trailing text after the last item.
    pub eof: Space,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Import {
    /// Space before `static`, when the import is static.
    pub static_prefix: Option<Space>,
    pub qualid: Box<Node>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassDecl {
    /// Modifiers and annotations, in source order.
    pub modifiers: Vec<Node>,
    pub kind: LeftPadded<ClassKind>,
    pub name: Box<Node>,
    pub type_params: Option<Container<Node>>,
    pub extends: Option<LeftPadded<Box<Node>>>,
    pub implements: Option<Container<Node>>,
    pub body: Box<Node>,
}

/// The leading constants of an enum body.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnumValueSet {
    pub values: Vec<RightPadded<Node>>,
    /// Whether the constants were closed with `;`.
    pub terminated: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnumValue {
    pub name: Box<Node>,
    pub args: Option<Container<Node>>,
    /// Constant-specific class body.
    pub body: Option<Box<Node>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MethodDecl {
    pub modifiers: Vec<Node>,
    pub type_params: Option<Container<Node>>,
    /// Absent for constructors.
    pub return_type: Option<Box<Node>>,
    pub name: Box<Node>,
    pub params: Container<Node>,
    pub throws: Option<Container<Node>>,
    /// Absent for abstract and interface methods.
    pub body: Option<Box<Node>>,
}

/// One declaration statement, possibly declaring several names.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VariableDecls {
    pub modifiers: Vec<Node>,
    /// Absent for untyped lambda parameters.
    pub type_expr: Option<Box<Node>>,
    /// Each entry's `after` is the space before the comma that follows it.
    pub vars: Vec<RightPadded<Node>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NamedVariable {
    pub name: Box<Node>,
    pub initializer: Option<LeftPadded<Box<Node>>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Annotation {
    pub name: Box<Node>,
    pub args: Option<Container<Node>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeParameter {
    pub annotations: Vec<Node>,
    pub name: Box<Node>,
    /// `extends` bounds joined by `&`.
    pub bounds: Option<Container<Node>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Block {
    pub statements: Vec<RightPadded<Node>>,
    /// Space before the closing brace.
    pub end: Space,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct If {
    pub condition: Box<Node>,
    pub then_part: RightPadded<Box<Node>>,
    /// An [`NodeKind::Else`] node.
    pub else_part: Option<Box<Node>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForControl {
    pub init: Vec<RightPadded<Node>>,
    pub condition: RightPadded<Box<Node>>,
    pub update: Vec<RightPadded<Node>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForEachControl {
    pub variable: RightPadded<Box<Node>>,
    pub iterable: RightPadded<Box<Node>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MethodInvocation {
    /// Receiver and the space before the `.`.
    pub select: Option<RightPadded<Box<Node>>>,
    pub name: Box<Node>,
    pub args: Container<Node>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NewClass {
    pub class: Box<Node>,
    pub args: Container<Node>,
    /// Anonymous class body.
    pub body: Option<Box<Node>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Try {
    /// `(a; b)` resources of a try-with-resources.
    pub resources: Option<Container<Node>>,
    pub body: Box<Node>,
    /// [`NodeKind::Catch`] nodes.
    pub catches: Vec<Node>,
    /// Space before `finally`, then the block.
    pub finally: Option<LeftPadded<Box<Node>>>,
}

/// One `case` or `default` of a switch.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Case {
    /// Empty for `default`.
    pub labels: Vec<RightPadded<Node>>,
    pub form: LeftPadded<CaseForm>,
    pub statements: Vec<RightPadded<Node>>,
}

/// `new T[n][]`, `new T[]{..}` or a bare `{..}` initializer.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NewArray {
    /// Absent for a bare initializer.
    pub element: Option<Box<Node>>,
    /// [`NodeKind::ArrayDimension`] nodes; an unsized one holds `Empty`.
    pub dimensions: Vec<Node>,
    pub initializer: Option<Container<Node>>,
}

/// Every syntactic form the tree can hold.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    SourceFile(SourceFile),
    Package {
        name: Box<Node>,
    },
    Import(Import),
    ClassDecl(ClassDecl),
    EnumValueSet(EnumValueSet),
    EnumValue(EnumValue),
    MethodDecl(MethodDecl),
    VariableDecls(VariableDecls),
    NamedVariable(NamedVariable),
    Modifier {
        keyword: ModifierKind,
    },
    Annotation(Annotation),
    TypeParameter(TypeParameter),
    Block(Block),
    Return {
        expr: Option<Box<Node>>,
    },
    If(If),
    Else {
        body: RightPadded<Box<Node>>,
    },
    WhileLoop {
        condition: Box<Node>,
        body: RightPadded<Box<Node>>,
    },
    DoWhileLoop {
        body: RightPadded<Box<Node>>,
        condition: LeftPadded<Box<Node>>,
    },
    ForLoop {
        control: Box<Node>,
        body: RightPadded<Box<Node>>,
    },
    ForControl(ForControl),
    ForEachLoop {
        control: Box<Node>,
        body: RightPadded<Box<Node>>,
    },
    ForEachControl(ForEachControl),
    Break {
        label: Option<Box<Node>>,
    },
    Continue {
        label: Option<Box<Node>>,
    },
    Throw {
        exception: Box<Node>,
    },
    Try(Try),
    Catch {
        /// A [`NodeKind::Parentheses`] around the caught variable.
        parameter: Box<Node>,
        body: Box<Node>,
    },
    Switch {
        selector: Box<Node>,
        /// A block of [`NodeKind::Case`] nodes.
        cases: Box<Node>,
    },
    Case(Case),
    Yield {
        value: Box<Node>,
    },
    Labeled {
        /// The label and the space before `:`.
        label: RightPadded<Box<Node>>,
        statement: Box<Node>,
    },
    Synchronized {
        lock: Box<Node>,
        body: Box<Node>,
    },
    Assert {
        condition: Box<Node>,
        /// Space before `:`, then the message.
        detail: Option<LeftPadded<Box<Node>>>,
    },
    Parentheses {
        inner: RightPadded<Box<Node>>,
    },
    Binary {
        left: Box<Node>,
        operator: LeftPadded<BinaryOp>,
        right: Box<Node>,
    },
    Unary {
        operator: LeftPadded<UnaryOp>,
        operand: Box<Node>,
    },
    Assignment {
        target: Box<Node>,
        value: LeftPadded<Box<Node>>,
    },
    CompoundAssignment {
        target: Box<Node>,
        operator: LeftPadded<BinaryOp>,
        value: Box<Node>,
    },
    Ternary {
        condition: Box<Node>,
        then_part: LeftPadded<Box<Node>>,
        else_part: LeftPadded<Box<Node>>,
    },
    InstanceOf {
        expr: Box<Node>,
        class: LeftPadded<Box<Node>>,
    },
    TypeCast {
        class: RightPadded<Box<Node>>,
        expr: Box<Node>,
    },
    MethodInvocation(MethodInvocation),
    NewClass(NewClass),
    FieldAccess {
        target: Box<Node>,
        name: LeftPadded<Box<Node>>,
    },
    NewArray(NewArray),
    /// `Type::name` or `Type::new`.
    MemberReference {
        target: Box<Node>,
        name: LeftPadded<Box<Node>>,
    },
    Identifier {
        name: String,
    },
    Literal {
        kind: LiteralKind,
        source: String,
    },
    ArrayAccess {
        indexed: Box<Node>,
        dimension: Box<Node>,
    },
    ArrayDimension {
        index: RightPadded<Box<Node>>,
    },
    ArrayType {
        element: Box<Node>,
        /// Space before `[` and the space inside before `]`.
        dimension: LeftPadded<Space>,
    },
    ParameterizedType {
        base: Box<Node>,
        args: Container<Node>,
    },
    Wildcard {
        bound: Option<LeftPadded<WildcardBound>>,
        bounded: Option<Box<Node>>,
    },
    Primitive {
        kind: PrimitiveKind,
    },
    /// Alternatives of a multi-catch type, joined by `|`.
    UnionType {
        alternatives: Vec<RightPadded<Node>>,
    },
    Lambda {
        params: Container<Node>,
        /// Space before `->`.
        arrow: Space,
        body: Box<Node>,
    },
    Empty,
    /// Raw text the builder could not map.
    Unparsed {
        text: String,
    },
}

impl NodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::SourceFile(_) => "SourceFile",
            NodeKind::Package { .. } => "Package",
            NodeKind::Import(_) => "Import",
            NodeKind::ClassDecl(_) => "ClassDecl",
            NodeKind::EnumValueSet(_) => "EnumValueSet",
            NodeKind::EnumValue(_) => "EnumValue",
            NodeKind::MethodDecl(_) => "MethodDecl",
            NodeKind::VariableDecls(_) => "VariableDecls",
            NodeKind::NamedVariable(_) => "NamedVariable",
            NodeKind::Modifier { .. } => "Modifier",
            NodeKind::Annotation(_) => "Annotation",
            NodeKind::TypeParameter(_) => "TypeParameter",
            NodeKind::Block(_) => "Block",
            NodeKind::Return { .. } => "Return",
            NodeKind::If(_) => "If",
            NodeKind::Else { .. } => "Else",
            NodeKind::WhileLoop { .. } => "WhileLoop",
            NodeKind::DoWhileLoop { .. } => "DoWhileLoop",
            NodeKind::ForLoop { .. } => "ForLoop",
            NodeKind::ForControl(_) => "ForControl",
            NodeKind::ForEachLoop { .. } => "ForEachLoop",
            NodeKind::ForEachControl(_) => "ForEachControl",
            NodeKind::Break { .. } => "Break",
            NodeKind::Continue { .. } => "Continue",
            NodeKind::Throw { .. } => "Throw",
            NodeKind::Try(_) => "Try",
            NodeKind::Catch { .. } => "Catch",
            NodeKind::Switch { .. } => "Switch",
            NodeKind::Case(_) => "Case",
            NodeKind::Yield { .. } => "Yield",
            NodeKind::Labeled { .. } => "Labeled",
            NodeKind::Synchronized { .. } => "Synchronized",
            NodeKind::Assert { .. } => "Assert",
            NodeKind::Parentheses { .. } => "Parentheses",
            NodeKind::Binary { .. } => "Binary",
            NodeKind::Unary { .. } => "Unary",
            NodeKind::Assignment { .. } => "Assignment",
            NodeKind::CompoundAssignment { .. } => "CompoundAssignment",
            NodeKind::Ternary { .. } => "Ternary",
            NodeKind::InstanceOf { .. } => "InstanceOf",
            NodeKind::TypeCast { .. } => "TypeCast",
            NodeKind::MethodInvocation(_) => "MethodInvocation",
            NodeKind::NewClass(_) => "NewClass",
            NodeKind::FieldAccess { .. } => "FieldAccess",
            NodeKind::NewArray(_) => "NewArray",
            NodeKind::MemberReference { .. } => "MemberReference",
            NodeKind::Identifier { .. } => "Identifier",
            NodeKind::Literal { .. } => "Literal",
            NodeKind::ArrayAccess { .. } => "ArrayAccess",
            NodeKind::ArrayDimension { .. } => "ArrayDimension",
            NodeKind::ArrayType { .. } => "ArrayType",
            NodeKind::ParameterizedType { .. } => "ParameterizedType",
            NodeKind::Wildcard { .. } => "Wildcard",
            NodeKind::Primitive { .. } => "Primitive",
            NodeKind::UnionType { .. } => "UnionType",
            NodeKind::Lambda { .. } => "Lambda",
            NodeKind::Empty => "Empty",
            NodeKind::Unparsed { .. } => "Unparsed",
        }
    }
}
