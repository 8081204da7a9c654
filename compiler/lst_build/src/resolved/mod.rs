//! Arena-backed [`FrontEnd`] that adapters populate.
//!
//! Front ends whose AST does not fit the [`FrontEnd`] trait directly can copy
//! the parts the builder needs into a [`ResolvedAst`]: nodes with kinds, spans
//! and role-tagged children, plus a table of type shapes.

use lst_ir::token::{ClassKind, PrimitiveKind};
use lst_ir::Span;
use lst_types::{ClassShape, TypeShape, TypeSource};

use crate::front_end::{AstKind, Child, FrontEnd, Role};

/// Handle for a node in a [`ResolvedAst`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AstId(u32);

/// Handle for a type in [`ResolvedTypes`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeHandle(u32);

fn index(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

/// Type shapes addressed by [`TypeHandle`].
#[derive(Clone, Debug, Default)]
pub struct ResolvedTypes {
    shapes: Vec<TypeShape<TypeHandle>>,
}

impl ResolvedTypes {
    pub fn add(&mut self, shape: TypeShape<TypeHandle>) -> TypeHandle {
        self.shapes.push(shape);
        TypeHandle(index(self.shapes.len() - 1))
    }

    /// Handle to be filled in later with [`set`](Self::set).
    ///
    /// Needed for shapes that refer to themselves, such as a class whose
    /// method returns the class.
    pub fn slot(&mut self) -> TypeHandle {
        self.add(TypeShape::Unknown)
    }

    pub fn set(&mut self, handle: TypeHandle, shape: TypeShape<TypeHandle>) {
        if let Some(entry) = self.shapes.get_mut(handle.0 as usize) {
            *entry = shape;
        }
    }

    pub fn primitive(&mut self, kind: PrimitiveKind) -> TypeHandle {
        self.add(TypeShape::Primitive(kind))
    }

    /// A class with no members.
    pub fn class(&mut self, fq_name: &str, kind: ClassKind) -> TypeHandle {
        self.add(TypeShape::Class(ClassShape::named(fq_name, kind)))
    }

    pub fn get(&self, handle: TypeHandle) -> Option<&TypeShape<TypeHandle>> {
        self.shapes.get(handle.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

#[derive(Clone, Debug)]
struct AstNode {
    kind: AstKind,
    span: Span,
    children: Vec<Child<AstId>>,
    symbol: Option<String>,
    ty: Option<TypeHandle>,
    synthetic: bool,
}

/// A resolved AST stored as a flat arena.
#[derive(Clone, Debug, Default)]
pub struct ResolvedAst {
    nodes: Vec<AstNode>,
    root: Option<AstId>,
    types: ResolvedTypes,
}

impl ResolvedAst {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node with no children.
    pub fn add(&mut self, kind: AstKind, span: Span) -> AstId {
        self.nodes.push(AstNode {
            kind,
            span,
            children: Vec::new(),
            symbol: None,
            ty: None,
            synthetic: false,
        });
        AstId(index(self.nodes.len() - 1))
    }

    /// Add a node together with its children, in source order.
    pub fn add_node(&mut self, kind: AstKind, span: Span, children: &[(Role, AstId)]) -> AstId {
        let id = self.add(kind, span);
        for &(role, child) in children {
            self.add_child(id, role, child);
        }
        id
    }

    pub fn add_child(&mut self, parent: AstId, role: Role, child: AstId) {
        if let Some(node) = self.node_mut(parent) {
            node.children.push(Child { role, node: child });
        }
    }

    pub fn set_root(&mut self, root: AstId) {
        self.root = Some(root);
    }

    pub fn set_symbol(&mut self, id: AstId, symbol: impl Into<String>) {
        if let Some(node) = self.node_mut(id) {
            node.symbol = Some(symbol.into());
        }
    }

    pub fn set_type(&mut self, id: AstId, ty: TypeHandle) {
        if let Some(node) = self.node_mut(id) {
            node.ty = Some(ty);
        }
    }

    pub fn mark_synthetic(&mut self, id: AstId) {
        if let Some(node) = self.node_mut(id) {
            node.synthetic = true;
        }
    }

    pub fn types(&self) -> &ResolvedTypes {
        &self.types
    }

    pub fn types_mut(&mut self) -> &mut ResolvedTypes {
        &mut self.types
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn node(&self, id: AstId) -> Option<&AstNode> {
        self.nodes.get(id.0 as usize)
    }

    fn node_mut(&mut self, id: AstId) -> Option<&mut AstNode> {
        self.nodes.get_mut(id.0 as usize)
    }
}

impl TypeSource for ResolvedAst {
    type Type = TypeHandle;

    fn shape(&self, ty: &TypeHandle) -> TypeShape<TypeHandle> {
        self.types.get(*ty).cloned().unwrap_or(TypeShape::Unknown)
    }
}

impl FrontEnd for ResolvedAst {
    type Node = AstId;

    /// The explicit root, or the first node added.
    fn root(&self) -> AstId {
        self.root.unwrap_or(AstId(0))
    }

    fn kind(&self, node: AstId) -> AstKind {
        self.node(node).map_or(AstKind::Erroneous, |n| n.kind)
    }

    fn children(&self, node: AstId) -> Vec<Child<AstId>> {
        self.node(node).map(|n| n.children.clone()).unwrap_or_default()
    }

    fn span(&self, node: AstId) -> Span {
        self.node(node).map(|n| n.span).unwrap_or_default()
    }

    fn symbol(&self, node: AstId) -> Option<String> {
        self.node(node).and_then(|n| n.symbol.clone())
    }

    fn ty(&self, node: AstId) -> Option<TypeHandle> {
        self.node(node).and_then(|n| n.ty)
    }

    fn is_synthetic(&self, node: AstId) -> bool {
        self.node(node).is_some_and(|n| n.synthetic)
    }
}
