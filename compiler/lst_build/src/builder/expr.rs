//! Expressions.
//!
//! Operators come from the front end as tags. The builder scans for the
//! tag's text, which yields the space in front of the operator.

use lst_ir::token::{punct, BinaryOp, Keyword, UnaryOp};
use lst_ir::{
    pad_left, pad_right, Container, Marker, Markers, MethodInvocation, NewArray, NewClass, Node,
    NodeKind, Space,
};

use super::{Children, Mapped, TreeBuilder};
use crate::front_end::{FrontEnd, Role};
use crate::MappingError;

impl<F: FrontEnd> TreeBuilder<'_, F> {
    pub(super) fn parentheses(&mut self, children: &Children<F::Node>) -> Result<Mapped, MappingError> {
        self.lead(punct::LPAREN)?;
        let inner = self.child(children, Role::Expression)?;
        let inner = pad_right(inner, self.expect(punct::RPAREN)?);
        Ok(NodeKind::Parentheses { inner }.into())
    }

    pub(super) fn binary(
        &mut self,
        op: BinaryOp,
        children: &Children<F::Node>,
    ) -> Result<Mapped, MappingError> {
        let left = self.child(children, Role::Left)?;
        let operator = pad_left(self.expect(op.as_str())?, op);
        let right = self.child(children, Role::Right)?;
        Ok(NodeKind::Binary {
            left,
            operator,
            right,
        }
        .into())
    }

    pub(super) fn unary(
        &mut self,
        op: UnaryOp,
        children: &Children<F::Node>,
    ) -> Result<Mapped, MappingError> {
        let (operator, operand) = if op.is_postfix() {
            let operand = self.child(children, Role::Operand)?;
            (pad_left(self.expect(op.as_str())?, op), operand)
        } else {
            self.lead(op.as_str())?;
            (pad_left(Space::EMPTY, op), self.child(children, Role::Operand)?)
        };
        Ok(NodeKind::Unary { operator, operand }.into())
    }

    pub(super) fn assignment(&mut self, children: &Children<F::Node>) -> Result<Mapped, MappingError> {
        let target = self.child(children, Role::Target)?;
        let before = self.expect(punct::EQ)?;
        let value = pad_left(before, self.child(children, Role::Value)?);
        Ok(NodeKind::Assignment { target, value }.into())
    }

    pub(super) fn compound_assignment(
        &mut self,
        op: BinaryOp,
        children: &Children<F::Node>,
    ) -> Result<Mapped, MappingError> {
        let target = self.child(children, Role::Target)?;
        let operator = pad_left(self.expect(&op.assign_str())?, op);
        let value = self.child(children, Role::Value)?;
        Ok(NodeKind::CompoundAssignment {
            target,
            operator,
            value,
        }
        .into())
    }

    pub(super) fn ternary(&mut self, children: &Children<F::Node>) -> Result<Mapped, MappingError> {
        let condition = self.child(children, Role::Condition)?;
        let before = self.expect(punct::QUESTION)?;
        let then_part = pad_left(before, self.child(children, Role::Then)?);
        let before = self.expect(punct::COLON)?;
        let else_part = pad_left(before, self.child(children, Role::Else)?);
        Ok(NodeKind::Ternary {
            condition,
            then_part,
            else_part,
        }
        .into())
    }

    pub(super) fn instance_of(&mut self, children: &Children<F::Node>) -> Result<Mapped, MappingError> {
        let expr = self.child(children, Role::Expression)?;
        let before = self.keyword(Keyword::InstanceOf)?;
        let class = pad_left(before, self.child(children, Role::Clazz)?);
        Ok(NodeKind::InstanceOf { expr, class }.into())
    }

    pub(super) fn type_cast(&mut self, children: &Children<F::Node>) -> Result<Mapped, MappingError> {
        self.lead(punct::LPAREN)?;
        let class = self.child(children, Role::Clazz)?;
        let class = pad_right(class, self.expect(punct::RPAREN)?);
        let expr = self.child(children, Role::Expression)?;
        Ok(NodeKind::TypeCast { class, expr }.into())
    }

    pub(super) fn method_invocation(
        &mut self,
        children: &Children<F::Node>,
    ) -> Result<Mapped, MappingError> {
        let select = match children.first(Role::Select) {
            Some(receiver) => {
                let mapped = self.boxed(receiver)?;
                Some(pad_right(mapped, self.dot_after(receiver)?))
            }
            None => None,
        };
        let name = self.child(children, Role::Name)?;
        let args = self.arguments(children)?;
        Ok(NodeKind::MethodInvocation(MethodInvocation { select, name, args }).into())
    }

    pub(super) fn new_class(&mut self, children: &Children<F::Node>) -> Result<Mapped, MappingError> {
        self.lead(Keyword::New.as_str())?;
        let class = self.child(children, Role::Clazz)?;
        let args = self.arguments(children)?;
        let body = self.optional_child(children, Role::Body)?;
        Ok(NodeKind::NewClass(NewClass { class, args, body }).into())
    }

    fn arguments(&mut self, children: &Children<F::Node>) -> Result<Container<Node>, MappingError> {
        self.container(
            punct::LPAREN,
            &children.all(Role::Argument),
            punct::COMMA,
            punct::RPAREN,
        )
    }

    pub(super) fn field_access(&mut self, children: &Children<F::Node>) -> Result<Mapped, MappingError> {
        let target_node = self.required(children, Role::Target)?;
        let target = self.boxed(target_node)?;
        let before = self.dot_after(target_node)?;
        let name = pad_left(before, self.child(children, Role::Name)?);
        Ok(NodeKind::FieldAccess { target, name }.into())
    }

    /// Space before the `.` following `receiver`. An implicit receiver
    /// (`f()` meaning `this.f()`) has no dot.
    fn dot_after(&mut self, receiver: F::Node) -> Result<Space, MappingError> {
        if self.fe.is_synthetic(receiver) {
            Ok(Space::EMPTY)
        } else {
            self.expect(punct::DOT)
        }
    }

    /// `new T[n][]`, `new T[]{a, b}` or, without an element type, `{a, b}`.
    pub(super) fn new_array(&mut self, children: &Children<F::Node>) -> Result<Mapped, MappingError> {
        let element = match children.first(Role::Element) {
            Some(element) => {
                self.lead(Keyword::New.as_str())?;
                Some(self.boxed(element)?)
            }
            None => None,
        };

        let mut sizes = children.all(Role::Dimension).into_iter();
        let mut dimensions = Vec::new();
        if element.is_some() {
            while let Some(before) = self.cursor.consume_optional(punct::LBRACKET) {
                let index = match sizes.next() {
                    Some(size) => self.visit(size)?,
                    None => Node::empty(),
                };
                let index = pad_right(Box::new(index), self.expect(punct::RBRACKET)?);
                dimensions.push(Node::new(before, NodeKind::ArrayDimension { index }));
            }
        }

        let initializer = if element.is_none() || self.cursor.peek_token(punct::LBRACE) {
            let before = self.expect(punct::LBRACE)?;
            let values = self.delimited_trailing(
                &children.all(Role::Initializer),
                punct::COMMA,
                punct::RBRACE,
            )?;
            Some(Container::build(before, values, Markers::new()))
        } else {
            None
        };
        Ok(NodeKind::NewArray(NewArray {
            element,
            dimensions,
            initializer,
        })
        .into())
    }

    /// `Type::name`, including `Type::new`.
    pub(super) fn member_reference(
        &mut self,
        children: &Children<F::Node>,
    ) -> Result<Mapped, MappingError> {
        let target = self.child(children, Role::Target)?;
        let before = self.expect(punct::DOUBLE_COLON)?;
        let name = pad_left(before, self.child(children, Role::Name)?);
        Ok(NodeKind::MemberReference { target, name }.into())
    }

    pub(super) fn array_access(&mut self, children: &Children<F::Node>) -> Result<Mapped, MappingError> {
        let indexed = self.child(children, Role::Target)?;
        let before = self.expect(punct::LBRACKET)?;
        let index = self.child(children, Role::Index)?;
        let index = pad_right(index, self.expect(punct::RBRACKET)?);
        let dimension = Box::new(Node::new(before, NodeKind::ArrayDimension { index }));
        Ok(NodeKind::ArrayAccess { indexed, dimension }.into())
    }

    /// `(a, b) -> body`, or `a -> body` marked [`Marker::OmitParentheses`].
    pub(super) fn lambda(&mut self, children: &Children<F::Node>) -> Result<Mapped, MappingError> {
        let param_nodes = children.all(Role::Param);
        let params = if self.cursor.peek_token(punct::LPAREN) {
            self.container(punct::LPAREN, &param_nodes, punct::COMMA, punct::RPAREN)?
        } else {
            let elements = self.separated(&param_nodes, punct::COMMA)?;
            Container::build(Space::EMPTY, elements, Markers::of(Marker::OmitParentheses))
        };
        let arrow = self.expect(punct::ARROW)?;
        let body = self.child(children, Role::Body)?;
        Ok(NodeKind::Lambda {
            params,
            arrow,
            body,
        }
        .into())
    }
}
