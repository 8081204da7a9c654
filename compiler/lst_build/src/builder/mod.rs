//! Maps one front-end AST onto a lossless tree.
//!
//! The builder walks the AST in source order with a [`SourceCursor`] that
//! only moves forward. For each node it:
//!
//! 1. consumes the text up to the node's start as the node's prefix,
//! 2. runs the rule for the node's kind, which recurses into children and
//!    scans for every keyword and punctuation token the kind implies,
//! 3. checks that the rule consumed the node's whole span,
//! 4. interns the node's attributed type in the batch [`SharedTypeCache`].
//!
//! Every byte of the source ends up in exactly one prefix, padding or token,
//! so printing the tree reproduces the source. A rule that cannot account for
//! its text fails the whole file rather than dropping bytes.
//!
//! Rules live in submodules by syntactic category: [`decl`], [`stmt`],
//! [`expr`] and [`types`].

mod decl;
mod expr;
mod stmt;
mod types;

use lst_ir::stack::ensure_sufficient_stack;
use lst_ir::token::{punct, Keyword};
use lst_ir::{
    pad_right, CommentSyntax, Container, Marker, Markers, MethodInvocation, Node, NodeKind,
    RightPadded, Space, Span, TypeId,
};
use lst_scan::{LineIndex, SourceCursor, Stop};
use lst_types::SharedTypeCache;

use crate::front_end::{AstKind, Child, FrontEnd, Role};
use crate::{MappingError, MappingErrorKind};

/// What a rule produced for one node, before prefix and type are attached.
struct Mapped {
    kind: NodeKind,
    markers: Markers,
}

impl Mapped {
    fn marked(kind: NodeKind, markers: Markers) -> Self {
        Mapped { kind, markers }
    }
}

impl From<NodeKind> for Mapped {
    fn from(kind: NodeKind) -> Self {
        Mapped {
            kind,
            markers: Markers::new(),
        }
    }
}

/// Children of one node, looked up by role.
struct Children<N> {
    parent: AstKind,
    list: Vec<Child<N>>,
}

impl<N: Copy> Children<N> {
    fn first(&self, role: Role) -> Option<N> {
        self.list.iter().find(|c| c.role == role).map(|c| c.node)
    }

    fn all(&self, role: Role) -> Vec<N> {
        self.list
            .iter()
            .filter(|c| c.role == role)
            .map(|c| c.node)
            .collect()
    }

    fn has(&self, role: Role) -> bool {
        self.list.iter().any(|c| c.role == role)
    }

    /// Every child regardless of role.
    fn nodes(&self) -> Vec<N> {
        self.list.iter().map(|c| c.node).collect()
    }
}

/// Builds the tree for one file.
pub struct TreeBuilder<'a, F: FrontEnd> {
    fe: &'a F,
    cursor: SourceCursor<'a>,
    types: &'a SharedTypeCache,
    lines: LineIndex,
    /// Nodes currently being mapped, outermost first.
    ancestors: Vec<F::Node>,
}

impl<'a, F: FrontEnd> TreeBuilder<'a, F> {
    pub fn new(fe: &'a F, source: &'a str, types: &'a SharedTypeCache) -> Self {
        Self::with_syntax(fe, source, types, CommentSyntax::default())
    }

    pub fn with_syntax(
        fe: &'a F,
        source: &'a str,
        types: &'a SharedTypeCache,
        syntax: CommentSyntax,
    ) -> Self {
        TreeBuilder {
            fe,
            cursor: SourceCursor::with_syntax(source, syntax),
            types,
            lines: LineIndex::new(source),
            ancestors: Vec::new(),
        }
    }

    /// Map the front end's root node.
    ///
    /// Only a compilation unit root records the text after its last item;
    /// other roots end at their own span.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn build(mut self) -> Result<Node, MappingError> {
        let root = self.fe.root();
        let tree = self.visit(root)?;
        tracing::debug!(offset = self.cursor.offset(), "tree built");
        Ok(tree)
    }

    fn visit(&mut self, node: F::Node) -> Result<Node, MappingError> {
        if self.fe.is_synthetic(node) {
            return self.implicit(node);
        }
        let kind = self.fe.kind(node);
        self.enter(node, |this, span| this.dispatch(node, kind, span))
    }

    /// Frame shared by every mapped node: prefix, rule, span check, type.
    fn enter(
        &mut self,
        node: F::Node,
        rule: impl FnOnce(&mut Self, Span) -> Result<Mapped, MappingError>,
    ) -> Result<Node, MappingError> {
        let span = self.fe.span(node);
        let prefix = self.cursor.space_until(span.start);
        self.ancestors.push(node);
        let result = ensure_sufficient_stack(|| self.frame(node, span, rule));
        self.ancestors.pop();
        result.map(|mapped| mapped.with_prefix(prefix))
    }

    fn frame(
        &mut self,
        node: F::Node,
        span: Span,
        rule: impl FnOnce(&mut Self, Span) -> Result<Mapped, MappingError>,
    ) -> Result<Node, MappingError> {
        let Mapped { kind, markers } = rule(self, span)?;
        let reached = self.cursor.offset();
        if reached < span.end {
            return Err(self.fail(MappingErrorKind::UnconsumedText {
                kind: kind.name().to_owned(),
                from: reached,
                to: span.end,
            }));
        }
        self.cursor.advance_to(span.end);

        // A declaration statement's type belongs to each declared name.
        let ty = match &kind {
            NodeKind::VariableDecls(_) => None,
            _ => self.node_type(node)?,
        };
        Ok(Node::new(Space::EMPTY, kind)
            .with_markers(markers)
            .with_type(ty))
    }

    /// A synthetic node: no text of its own and no cursor movement.
    ///
    /// An implicit `return` still maps the written expression it wraps.
    /// Any other synthetic node must have no written children.
    fn implicit(&mut self, node: F::Node) -> Result<Node, MappingError> {
        let symbol = self.fe.symbol(node);
        let children = self.children_of(node);
        let kind = match children.parent {
            AstKind::Return => NodeKind::Return {
                expr: self.optional_child(&children, Role::Expression)?,
            },
            kind if !self.written(&children.nodes()).is_empty() => {
                return Err(self.fail(MappingErrorKind::UnsupportedShape {
                    kind: format!("synthetic {kind:?} with written children"),
                    offset: self.cursor.offset(),
                }));
            }
            AstKind::MethodInvocation => NodeKind::MethodInvocation(MethodInvocation {
                select: None,
                name: Box::new(Node::implicit(NodeKind::Identifier {
                    name: symbol.unwrap_or_else(|| Keyword::Super.as_str().to_owned()),
                })),
                args: Container::build(Space::EMPTY, Vec::new(), Markers::new()),
            }),
            AstKind::Identifier => NodeKind::Identifier {
                name: symbol.unwrap_or_default(),
            },
            _ => NodeKind::Empty,
        };
        let ty = self.node_type(node)?;
        Ok(Node::implicit(kind).with_type(ty))
    }

    fn dispatch(&mut self, node: F::Node, kind: AstKind, span: Span) -> Result<Mapped, MappingError> {
        let children = self.children_of(node);
        match kind {
            AstKind::CompilationUnit => self.compilation_unit(&children),
            AstKind::Package => self.package(&children),
            AstKind::Import { is_static } => self.import(is_static, &children),
            AstKind::ClassDecl(class_kind) => self.class_decl(class_kind, &children),
            AstKind::EnumConstant => self.enum_constant(&children),
            AstKind::MethodDecl => self.method_decl(&children),
            AstKind::VariableDecl => self.variable_decls(&[node]),
            AstKind::Modifier(keyword) => {
                self.take(span);
                Ok(NodeKind::Modifier { keyword }.into())
            }
            AstKind::Annotation => self.annotation(span, &children),
            AstKind::TypeParameter => self.type_parameter(&children),

            AstKind::Block => self.block(&children),
            AstKind::Return => self.return_stmt(&children),
            AstKind::If => self.if_stmt(&children),
            AstKind::WhileLoop => self.while_loop(&children),
            AstKind::DoWhileLoop => self.do_while_loop(&children),
            AstKind::ForLoop => self.for_loop(&children),
            AstKind::ForEachLoop => self.for_each_loop(&children),
            AstKind::Break => self.jump(Keyword::Break, &children),
            AstKind::Continue => self.jump(Keyword::Continue, &children),
            AstKind::Throw => self.throw(&children),
            AstKind::Try => self.try_stmt(&children),
            AstKind::Catch => self.catch(&children),
            AstKind::Switch => self.switch(&children),
            AstKind::Case => self.case(&children),
            AstKind::Yield => self.yield_stmt(&children),
            AstKind::Labeled => self.labeled(&children),
            AstKind::Synchronized => self.synchronized(&children),
            AstKind::Assert => self.assert(&children),
            AstKind::EmptyStatement => Ok(NodeKind::Empty.into()),

            AstKind::Parentheses => self.parentheses(&children),
            AstKind::Binary(op) => self.binary(op, &children),
            AstKind::Unary(op) => self.unary(op, &children),
            AstKind::Assignment => self.assignment(&children),
            AstKind::CompoundAssignment(op) => self.compound_assignment(op, &children),
            AstKind::Conditional => self.ternary(&children),
            AstKind::InstanceOf => self.instance_of(&children),
            AstKind::TypeCast => self.type_cast(&children),
            AstKind::MethodInvocation => self.method_invocation(&children),
            AstKind::NewClass => self.new_class(&children),
            AstKind::FieldAccess => self.field_access(&children),
            AstKind::NewArray => self.new_array(&children),
            AstKind::MemberReference => self.member_reference(&children),
            AstKind::Identifier => {
                let name = self.take(span).to_owned();
                Ok(NodeKind::Identifier { name }.into())
            }
            AstKind::Literal(kind) => {
                let source = self.take(span).to_owned();
                Ok(NodeKind::Literal { kind, source }.into())
            }
            AstKind::ArrayAccess => self.array_access(&children),
            AstKind::Lambda => self.lambda(&children),

            AstKind::PrimitiveType(kind) => {
                self.take(span);
                Ok(NodeKind::Primitive { kind }.into())
            }
            AstKind::ArrayType => self.array_type(&children),
            AstKind::ParameterizedType => self.parameterized_type(&children),
            AstKind::Wildcard(bound) => self.wildcard(bound, &children),
            AstKind::UnionType => self.union_type(&children),

            AstKind::Erroneous => Err(self.fail(MappingErrorKind::UnsupportedShape {
                kind: format!("{kind:?}"),
                offset: span.start,
            })),
        }
    }

    // Type attribution

    /// Intern the node's attributed type. Nodes without one stay untyped.
    fn node_type(&self, node: F::Node) -> Result<Option<TypeId>, MappingError> {
        let Some(ty) = self.fe.ty(node) else {
            return Ok(None);
        };
        self.types
            .resolve(self.fe, &ty)
            .map(Some)
            .map_err(|error| self.fail(error.into()))
    }

    // Failure reporting

    /// Log where mapping failed and build the error for propagation.
    ///
    /// The error covers the unmapped text when that is known, otherwise the
    /// innermost node being mapped.
    fn fail(&self, kind: MappingErrorKind) -> MappingError {
        let path = self
            .ancestors
            .iter()
            .map(|&n| format!("{:?}", self.fe.kind(n)))
            .collect::<Vec<_>>()
            .join(" > ");
        let declaration = self
            .ancestors
            .iter()
            .rev()
            .find(|&&n| self.fe.kind(n).is_declaration())
            .and_then(|&n| self.fe.symbol(n));
        let span = match &kind {
            MappingErrorKind::UnconsumedText { from, to, .. } => Span::new(*from, *to),
            _ => self
                .ancestors
                .last()
                .map_or(Span::point(self.cursor.offset()), |&n| self.fe.span(n)),
        };
        let position = self.lines.line_col(self.cursor.source(), span.start);
        tracing::warn!(
            %path,
            declaration = declaration.as_deref().unwrap_or("<none>"),
            %position,
            error = %kind,
            "cannot map node"
        );
        MappingError::new(span, kind)
    }

    fn children_of(&self, node: F::Node) -> Children<F::Node> {
        Children {
            parent: self.fe.kind(node),
            list: self.fe.children(node),
        }
    }

    fn boxed(&mut self, node: F::Node) -> Result<Box<Node>, MappingError> {
        self.visit(node).map(Box::new)
    }

    /// Visit the child in `role`, which must exist.
    fn child(&mut self, children: &Children<F::Node>, role: Role) -> Result<Box<Node>, MappingError> {
        let node = self.required(children, role)?;
        self.boxed(node)
    }

    fn optional_child(
        &mut self,
        children: &Children<F::Node>,
        role: Role,
    ) -> Result<Option<Box<Node>>, MappingError> {
        children.first(role).map(|node| self.boxed(node)).transpose()
    }

    /// Visit every written node in order.
    fn visit_all(&mut self, nodes: &[F::Node]) -> Result<Vec<Node>, MappingError> {
        let mut out = Vec::with_capacity(nodes.len());
        for node in self.written(nodes) {
            out.push(self.visit(node)?);
        }
        Ok(out)
    }

    fn required(&self, children: &Children<F::Node>, role: Role) -> Result<F::Node, MappingError> {
        children.first(role).ok_or_else(|| {
            self.fail(MappingErrorKind::MissingChild {
                parent: format!("{:?}", children.parent),
                role,
            })
        })
    }

    // Scanning

    /// Consume `delimiter`, which must be the next token.
    fn expect(&mut self, delimiter: &str) -> Result<Space, MappingError> {
        match self.cursor.consume(delimiter, Stop::AnyToken) {
            Ok(space) => Ok(space),
            Err(not_found) => Err(self.fail(not_found.into())),
        }
    }

    fn keyword(&mut self, keyword: Keyword) -> Result<Space, MappingError> {
        self.expect(keyword.as_str())
    }

    /// Consume the token a node starts with. Its space was the node's prefix.
    fn lead(&mut self, token: &str) -> Result<(), MappingError> {
        let space = self.expect(token)?;
        debug_assert!(space.is_empty(), "`{token}` does not start its node");
        Ok(())
    }

    /// Consume a token whose text is stored in the tree.
    fn take(&mut self, span: Span) -> &'a str {
        self.cursor.advance_to(span.end);
        self.cursor.text(span)
    }

    /// The nodes that have source text.
    fn written(&self, nodes: &[F::Node]) -> Vec<F::Node> {
        nodes
            .iter()
            .copied()
            .filter(|&n| !self.fe.is_synthetic(n))
            .collect()
    }

    // Lists

    /// Visit `node` and bind an optional `;` after it.
    fn statement(&mut self, node: F::Node) -> Result<RightPadded<Node>, MappingError> {
        let mapped = self.visit(node)?;
        Ok(self.terminated(mapped))
    }

    fn terminated(&mut self, node: Node) -> RightPadded<Node> {
        if node.is_zero_width() {
            return pad_right(node, Space::EMPTY);
        }
        match self.cursor.consume_optional(punct::SEMI) {
            Some(before) => {
                RightPadded::new(node, before).with_markers(Markers::of(Marker::Semicolon))
            }
            None => pad_right(node, Space::EMPTY),
        }
    }

    /// Statements in order, merging split multi-name declarations.
    fn statements(&mut self, items: &[F::Node]) -> Result<Vec<RightPadded<Node>>, MappingError> {
        let mut out = Vec::with_capacity(items.len());
        for group in self.group_declarations(items) {
            let node = self.visit_group(&group)?;
            out.push(self.terminated(node));
        }
        Ok(out)
    }

    /// Sibling declarations sharing a start offset form one group, in
    /// encounter order. Every other node is a group of its own.
    fn group_declarations(&self, items: &[F::Node]) -> Vec<Vec<F::Node>> {
        let mut groups: Vec<Vec<F::Node>> = Vec::new();
        let mut open_start = None;
        for &item in items {
            let start = self.fe.span(item).start;
            let is_decl =
                self.fe.kind(item) == AstKind::VariableDecl && !self.fe.is_synthetic(item);
            if is_decl && open_start == Some(start) {
                if let Some(group) = groups.last_mut() {
                    group.push(item);
                    continue;
                }
            }
            open_start = is_decl.then_some(start);
            groups.push(vec![item]);
        }
        groups
    }

    fn visit_group(&mut self, group: &[F::Node]) -> Result<Node, MappingError> {
        match group {
            [single] => self.visit(*single),
            [first, ..] => self.enter(*first, |this, _| this.variable_decls(group)),
            [] => Ok(Node::empty()),
        }
    }

    /// `open item sep item ... close`. The last element's `after` is the
    /// space before `close`; an empty list holds one `Empty` element.
    fn container(
        &mut self,
        open: &str,
        items: &[F::Node],
        separator: &str,
        close: &str,
    ) -> Result<Container<Node>, MappingError> {
        let before = self.expect(open)?;
        let elements = self.delimited(items, separator, close)?;
        Ok(Container::build(before, elements, Markers::new()))
    }

    /// The elements of a list whose opening token is already consumed.
    fn delimited(
        &mut self,
        items: &[F::Node],
        separator: &str,
        close: &str,
    ) -> Result<Vec<RightPadded<Node>>, MappingError> {
        self.list(items, separator, close, false)
    }

    /// [`delimited`](Self::delimited), also accepting a separator after the
    /// last element. It is recorded as [`Marker::TrailingComma`].
    fn delimited_trailing(
        &mut self,
        items: &[F::Node],
        separator: &str,
        close: &str,
    ) -> Result<Vec<RightPadded<Node>>, MappingError> {
        self.list(items, separator, close, true)
    }

    fn list(
        &mut self,
        items: &[F::Node],
        separator: &str,
        close: &str,
        trailing: bool,
    ) -> Result<Vec<RightPadded<Node>>, MappingError> {
        let groups = self.group_declarations(&self.written(items));
        if groups.is_empty() {
            let inside = self.expect(close)?;
            return Ok(vec![pad_right(Node::empty(), inside)]);
        }
        let last = groups.len() - 1;
        let mut elements = Vec::with_capacity(groups.len());
        for (i, group) in groups.iter().enumerate() {
            let node = self.visit_group(group)?;
            if i < last {
                let after = self.expect(separator)?;
                elements.push(pad_right(node, after));
                continue;
            }
            let extra = if trailing {
                self.cursor.consume_optional(separator)
            } else {
                None
            };
            let padded = match extra {
                Some(before) => {
                    let suffix = self.expect(close)?;
                    RightPadded::new(node, before)
                        .with_markers(Markers::of(Marker::TrailingComma(suffix)))
                }
                None => pad_right(node, self.expect(close)?),
            };
            elements.push(padded);
        }
        Ok(elements)
    }

    /// `item sep item ...` with no closing delimiter; the last `after` is empty.
    fn separated(
        &mut self,
        items: &[F::Node],
        separator: &str,
    ) -> Result<Vec<RightPadded<Node>>, MappingError> {
        let items = self.written(items);
        let mut elements = Vec::with_capacity(items.len());
        for (i, &item) in items.iter().enumerate() {
            let node = self.visit(item)?;
            let after = if i + 1 == items.len() {
                Space::EMPTY
            } else {
                self.expect(separator)?
            };
            elements.push(pad_right(node, after));
        }
        Ok(elements)
    }

    /// `keyword item sep item ...`, e.g. a `throws` clause.
    fn keyword_list(
        &mut self,
        keyword: Keyword,
        items: &[F::Node],
        separator: &str,
    ) -> Result<Container<Node>, MappingError> {
        let before = self.keyword(keyword)?;
        let elements = self.separated(items, separator)?;
        Ok(Container::build(before, elements, Markers::new()))
    }
}
