//! Files, packages, imports, type declarations, methods and variables.

use lst_ir::token::{punct, ClassKind, Keyword};
use lst_ir::{
    pad_left, pad_right, Annotation, Block, ClassDecl, Container, EnumValue, EnumValueSet, Import,
    Marker, Markers, MethodDecl, NamedVariable, Node, NodeKind, RightPadded, SourceFile, Space,
    Span, TypeParameter, VariableDecls,
};

use super::{Children, Mapped, TreeBuilder};
use crate::front_end::{AstKind, FrontEnd, Role};
use crate::{MappingError, MappingErrorKind};

impl<F: FrontEnd> TreeBuilder<'_, F> {
    pub(super) fn compilation_unit(
        &mut self,
        children: &Children<F::Node>,
    ) -> Result<Mapped, MappingError> {
        let items = self.statements(&children.nodes())?;
        let from = self.cursor.offset();
        let eof = self.cursor.skip_trivia();
        if !self.cursor.is_eof() {
            let to = u32::try_from(self.cursor.source().len()).unwrap_or(u32::MAX);
            return Err(self.fail(MappingErrorKind::UnconsumedText {
                kind: "SourceFile".to_owned(),
                from,
                to,
            }));
        }
        Ok(NodeKind::SourceFile(SourceFile { items, eof }).into())
    }

    pub(super) fn package(&mut self, children: &Children<F::Node>) -> Result<Mapped, MappingError> {
        self.lead(Keyword::Package.as_str())?;
        let name = self.child(children, Role::Name)?;
        Ok(NodeKind::Package { name }.into())
    }

    pub(super) fn import(
        &mut self,
        is_static: bool,
        children: &Children<F::Node>,
    ) -> Result<Mapped, MappingError> {
        self.lead(Keyword::Import.as_str())?;
        let static_prefix = if is_static {
            Some(self.keyword(Keyword::Static)?)
        } else {
            None
        };
        let qualid = self.child(children, Role::Name)?;
        Ok(NodeKind::Import(Import {
            static_prefix,
            qualid,
        })
        .into())
    }

    pub(super) fn class_decl(
        &mut self,
        class_kind: ClassKind,
        children: &Children<F::Node>,
    ) -> Result<Mapped, MappingError> {
        let modifiers = self.visit_all(&children.all(Role::Modifier))?;
        let kind = pad_left(self.expect(class_kind.as_str())?, class_kind);
        let name = self.child(children, Role::Name)?;
        let type_params = self.type_params(children)?;

        let extends = match children.first(Role::Extends) {
            Some(supertype) => {
                let before = self.keyword(Keyword::Extends)?;
                Some(pad_left(before, self.boxed(supertype)?))
            }
            None => None,
        };
        let implements = if children.has(Role::Implements) {
            Some(self.keyword_list(
                class_kind.implements_keyword(),
                &children.all(Role::Implements),
                punct::COMMA,
            )?)
        } else {
            None
        };

        let body = Box::new(self.class_body(class_kind, &children.all(Role::Member))?);
        Ok(NodeKind::ClassDecl(ClassDecl {
            modifiers,
            kind,
            name,
            type_params,
            extends,
            implements,
            body,
        })
        .into())
    }

    /// The braced member list. An enum's constants come first, as one
    /// [`EnumValueSet`] statement.
    fn class_body(&mut self, class_kind: ClassKind, members: &[F::Node]) -> Result<Node, MappingError> {
        let before = self.expect(punct::LBRACE)?;

        let (constants, rest): (Vec<_>, Vec<_>) = members
            .iter()
            .copied()
            .partition(|&m| self.fe.kind(m) == AstKind::EnumConstant && !self.fe.is_synthetic(m));
        let mut statements = Vec::with_capacity(members.len() + 1);
        if class_kind == ClassKind::Enum
            && (!constants.is_empty() || self.cursor.peek_token(punct::SEMI))
        {
            statements.push(self.enum_values(&constants)?);
        }
        statements.extend(self.statements(&rest)?);

        let end = self.expect(punct::RBRACE)?;
        Ok(Node::new(before, NodeKind::Block(Block { statements, end })))
    }

    fn enum_values(&mut self, constants: &[F::Node]) -> Result<RightPadded<Node>, MappingError> {
        let mut values = Vec::with_capacity(constants.len());
        for (i, &constant) in constants.iter().enumerate() {
            let value = self.visit(constant)?;
            if i + 1 < constants.len() {
                let after = self.expect(punct::COMMA)?;
                values.push(pad_right(value, after));
            } else {
                values.push(self.trailing_comma(value));
            }
        }

        let set = Node::new(
            Space::EMPTY,
            NodeKind::EnumValueSet(EnumValueSet {
                values,
                terminated: false,
            }),
        );
        let mut padded = self.terminated(set);
        let terminated = padded.markers.has_semicolon();
        if let NodeKind::EnumValueSet(set) = &mut padded.element.kind {
            set.terminated = terminated;
        }
        Ok(padded)
    }

    /// The last enum constant, with the comma that may follow it.
    fn trailing_comma(&mut self, value: Node) -> RightPadded<Node> {
        match self.cursor.consume_optional(punct::COMMA) {
            Some(before) => {
                let suffix = self.cursor.skip_trivia();
                RightPadded::new(value, before)
                    .with_markers(Markers::of(Marker::TrailingComma(suffix)))
            }
            None => pad_right(value, Space::EMPTY),
        }
    }

    pub(super) fn enum_constant(
        &mut self,
        children: &Children<F::Node>,
    ) -> Result<Mapped, MappingError> {
        let name = self.child(children, Role::Name)?;
        let args = if self.cursor.peek_token(punct::LPAREN) {
            Some(self.container(
                punct::LPAREN,
                &children.all(Role::Argument),
                punct::COMMA,
                punct::RPAREN,
            )?)
        } else {
            None
        };
        let body = self.optional_child(children, Role::Body)?;
        Ok(NodeKind::EnumValue(EnumValue { name, args, body }).into())
    }

    pub(super) fn method_decl(&mut self, children: &Children<F::Node>) -> Result<Mapped, MappingError> {
        let modifiers = self.visit_all(&children.all(Role::Modifier))?;
        let type_params = self.type_params(children)?;
        let return_type = self.optional_child(children, Role::ReturnType)?;
        let name = self.child(children, Role::Name)?;
        let params = self.container(
            punct::LPAREN,
            &children.all(Role::Param),
            punct::COMMA,
            punct::RPAREN,
        )?;
        let throws = if children.has(Role::Throws) {
            Some(self.keyword_list(Keyword::Throws, &children.all(Role::Throws), punct::COMMA)?)
        } else {
            None
        };
        let body = self.optional_child(children, Role::Body)?;
        Ok(NodeKind::MethodDecl(MethodDecl {
            modifiers,
            type_params,
            return_type,
            name,
            params,
            throws,
            body,
        })
        .into())
    }

    /// One declaration statement for `members`, which share their modifiers
    /// and type. Only the first member's modifiers and type are mapped; the
    /// others report the same source range for them.
    pub(super) fn variable_decls(&mut self, members: &[F::Node]) -> Result<Mapped, MappingError> {
        let Some(&first) = members.first() else {
            return Ok(NodeKind::Empty.into());
        };
        let head = self.children_of(first);
        let modifiers = self.visit_all(&head.all(Role::Modifier))?;
        let type_expr = self.optional_child(&head, Role::Type)?;

        let mut vars = Vec::with_capacity(members.len());
        for (i, &member) in members.iter().enumerate() {
            let var = self.named_variable(member)?;
            let after = if i + 1 < members.len() {
                self.expect(punct::COMMA)?
            } else {
                Space::EMPTY
            };
            vars.push(pad_right(var, after));
        }
        Ok(NodeKind::VariableDecls(VariableDecls {
            modifiers,
            type_expr,
            vars,
        })
        .into())
    }

    fn named_variable(&mut self, member: F::Node) -> Result<Node, MappingError> {
        let children = self.children_of(member);
        let name = self.child(&children, Role::Name)?;
        let initializer = match children.first(Role::Initializer) {
            Some(init) => {
                let before = self.expect(punct::EQ)?;
                Some(pad_left(before, self.boxed(init)?))
            }
            None => None,
        };
        let ty = self.node_type(member)?;
        Ok(Node::new(
            Space::EMPTY,
            NodeKind::NamedVariable(NamedVariable { name, initializer }),
        )
        .with_type(ty))
    }

    pub(super) fn annotation(
        &mut self,
        span: Span,
        children: &Children<F::Node>,
    ) -> Result<Mapped, MappingError> {
        self.lead(punct::AT)?;
        let name = self.child(children, Role::Name)?;
        // Arguments are present exactly when the span reaches past the name.
        let args = if self.cursor.offset() < span.end {
            Some(self.container(
                punct::LPAREN,
                &children.all(Role::Argument),
                punct::COMMA,
                punct::RPAREN,
            )?)
        } else {
            None
        };
        Ok(NodeKind::Annotation(Annotation { name, args }).into())
    }

    pub(super) fn type_parameter(
        &mut self,
        children: &Children<F::Node>,
    ) -> Result<Mapped, MappingError> {
        let annotations = self.visit_all(&children.all(Role::Modifier))?;
        let name = self.child(children, Role::Name)?;
        let bounds = if children.has(Role::Bound) {
            Some(self.keyword_list(Keyword::Extends, &children.all(Role::Bound), punct::AMP)?)
        } else {
            None
        };
        Ok(NodeKind::TypeParameter(TypeParameter {
            annotations,
            name,
            bounds,
        })
        .into())
    }

    fn type_params(
        &mut self,
        children: &Children<F::Node>,
    ) -> Result<Option<Container<Node>>, MappingError> {
        if !children.has(Role::TypeParam) {
            return Ok(None);
        }
        self.container(punct::LT, &children.all(Role::TypeParam), punct::COMMA, punct::GT)
            .map(Some)
    }
}
