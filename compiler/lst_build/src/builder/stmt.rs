//! Statements.

use lst_ir::token::{punct, CaseForm, Keyword};
use lst_ir::{
    pad_left, pad_right, Block, Case, Container, ForControl, ForEachControl, If, Marker, Markers,
    Node, NodeKind, Space, Try,
};

use super::{Children, Mapped, TreeBuilder};
use crate::front_end::{FrontEnd, Role};
use crate::MappingError;

impl<F: FrontEnd> TreeBuilder<'_, F> {
    /// A braced block, or a braceless one (e.g. a lambda body the front end
    /// wrapped in a block) marked [`Marker::OmitBraces`].
    pub(super) fn block(&mut self, children: &Children<F::Node>) -> Result<Mapped, MappingError> {
        let nodes = children.nodes();
        if self.cursor.peek_token(punct::LBRACE) {
            self.lead(punct::LBRACE)?;
            let statements = self.statements(&nodes)?;
            let end = self.expect(punct::RBRACE)?;
            Ok(NodeKind::Block(Block { statements, end }).into())
        } else {
            let statements = self.statements(&nodes)?;
            Ok(Mapped::marked(
                NodeKind::Block(Block {
                    statements,
                    end: Space::EMPTY,
                }),
                Markers::of(Marker::OmitBraces),
            ))
        }
    }

    pub(super) fn return_stmt(&mut self, children: &Children<F::Node>) -> Result<Mapped, MappingError> {
        self.lead(Keyword::Return.as_str())?;
        let expr = self.optional_child(children, Role::Expression)?;
        Ok(NodeKind::Return { expr }.into())
    }

    pub(super) fn if_stmt(&mut self, children: &Children<F::Node>) -> Result<Mapped, MappingError> {
        self.lead(Keyword::If.as_str())?;
        let condition = self.child(children, Role::Condition)?;
        let then_node = self.required(children, Role::Then)?;
        let then_part = self.statement(then_node)?.map(Box::new);

        let else_part = match children.first(Role::Else) {
            Some(else_node) => {
                let before = self.keyword(Keyword::Else)?;
                let body = self.statement(else_node)?.map(Box::new);
                Some(Box::new(Node::new(before, NodeKind::Else { body })))
            }
            None => None,
        };
        Ok(NodeKind::If(If {
            condition,
            then_part,
            else_part,
        })
        .into())
    }

    pub(super) fn while_loop(&mut self, children: &Children<F::Node>) -> Result<Mapped, MappingError> {
        self.lead(Keyword::While.as_str())?;
        let condition = self.child(children, Role::Condition)?;
        let body_node = self.required(children, Role::Body)?;
        let body = self.statement(body_node)?.map(Box::new);
        Ok(NodeKind::WhileLoop { condition, body }.into())
    }

    pub(super) fn do_while_loop(
        &mut self,
        children: &Children<F::Node>,
    ) -> Result<Mapped, MappingError> {
        self.lead(Keyword::Do.as_str())?;
        let body_node = self.required(children, Role::Body)?;
        let body = self.statement(body_node)?.map(Box::new);
        let before = self.keyword(Keyword::While)?;
        let condition = pad_left(before, self.child(children, Role::Condition)?);
        Ok(NodeKind::DoWhileLoop { body, condition }.into())
    }

    pub(super) fn for_loop(&mut self, children: &Children<F::Node>) -> Result<Mapped, MappingError> {
        self.lead(Keyword::For.as_str())?;
        let control = Box::new(self.for_control(children)?);
        let body_node = self.required(children, Role::Body)?;
        let body = self.statement(body_node)?.map(Box::new);
        Ok(NodeKind::ForLoop { control, body }.into())
    }

    /// `(init; condition; update)`. Missing parts are `Empty` nodes.
    fn for_control(&mut self, children: &Children<F::Node>) -> Result<Node, MappingError> {
        let before = self.expect(punct::LPAREN)?;
        let init = self.delimited(&children.all(Role::Init), punct::COMMA, punct::SEMI)?;

        let condition = match children.first(Role::Condition) {
            Some(condition) => self.visit(condition)?,
            None => Node::empty(),
        };
        let after = self.expect(punct::SEMI)?;
        let condition = pad_right(Box::new(condition), after);

        let update = self.delimited(&children.all(Role::Update), punct::COMMA, punct::RPAREN)?;
        Ok(Node::new(
            before,
            NodeKind::ForControl(ForControl {
                init,
                condition,
                update,
            }),
        ))
    }

    pub(super) fn for_each_loop(
        &mut self,
        children: &Children<F::Node>,
    ) -> Result<Mapped, MappingError> {
        self.lead(Keyword::For.as_str())?;
        let before = self.expect(punct::LPAREN)?;
        let variable = self.child(children, Role::Variable)?;
        let variable = pad_right(variable, self.expect(punct::COLON)?);
        let iterable = self.child(children, Role::Iterable)?;
        let iterable = pad_right(iterable, self.expect(punct::RPAREN)?);
        let control = Box::new(Node::new(
            before,
            NodeKind::ForEachControl(ForEachControl { variable, iterable }),
        ));

        let body_node = self.required(children, Role::Body)?;
        let body = self.statement(body_node)?.map(Box::new);
        Ok(NodeKind::ForEachLoop { control, body }.into())
    }

    /// `break` or `continue`, with an optional label.
    pub(super) fn jump(
        &mut self,
        keyword: Keyword,
        children: &Children<F::Node>,
    ) -> Result<Mapped, MappingError> {
        self.lead(keyword.as_str())?;
        let label = self.optional_child(children, Role::Label)?;
        let kind = if keyword == Keyword::Continue {
            NodeKind::Continue { label }
        } else {
            NodeKind::Break { label }
        };
        Ok(kind.into())
    }

    pub(super) fn throw(&mut self, children: &Children<F::Node>) -> Result<Mapped, MappingError> {
        self.lead(Keyword::Throw.as_str())?;
        let exception = self.child(children, Role::Expression)?;
        Ok(NodeKind::Throw { exception }.into())
    }

    /// `try (resources) { } catch (..) { } finally { }`.
    pub(super) fn try_stmt(&mut self, children: &Children<F::Node>) -> Result<Mapped, MappingError> {
        self.lead(Keyword::Try.as_str())?;
        let resource_nodes = children.all(Role::Resource);
        let resources = if resource_nodes.is_empty() {
            None
        } else {
            let before = self.expect(punct::LPAREN)?;
            let elements = self.delimited_trailing(&resource_nodes, punct::SEMI, punct::RPAREN)?;
            Some(Container::build(before, elements, Markers::new()))
        };
        let body = self.child(children, Role::Body)?;
        let catches = self.visit_all(&children.all(Role::Catch))?;
        let finally = match children.first(Role::Finally) {
            Some(block) => {
                let before = self.keyword(Keyword::Finally)?;
                Some(pad_left(before, self.boxed(block)?))
            }
            None => None,
        };
        Ok(NodeKind::Try(Try {
            resources,
            body,
            catches,
            finally,
        })
        .into())
    }

    pub(super) fn catch(&mut self, children: &Children<F::Node>) -> Result<Mapped, MappingError> {
        self.lead(Keyword::Catch.as_str())?;
        let before = self.expect(punct::LPAREN)?;
        let param = self.child(children, Role::Param)?;
        let inner = pad_right(param, self.expect(punct::RPAREN)?);
        let parameter = Box::new(Node::new(before, NodeKind::Parentheses { inner }));
        let body = self.child(children, Role::Body)?;
        Ok(NodeKind::Catch { parameter, body }.into())
    }

    /// A switch statement or expression. The cases sit in a block node that
    /// holds the braces.
    pub(super) fn switch(&mut self, children: &Children<F::Node>) -> Result<Mapped, MappingError> {
        self.lead(Keyword::Switch.as_str())?;
        let selector = self.child(children, Role::Selector)?;
        let before = self.expect(punct::LBRACE)?;
        let statements = self
            .visit_all(&children.all(Role::Case))?
            .into_iter()
            .map(|case| pad_right(case, Space::EMPTY))
            .collect();
        let end = self.expect(punct::RBRACE)?;
        let cases = Box::new(Node::new(before, NodeKind::Block(Block { statements, end })));
        Ok(NodeKind::Switch { selector, cases }.into())
    }

    /// `case a, b:` or `case a ->`; `default` when there are no labels.
    pub(super) fn case(&mut self, children: &Children<F::Node>) -> Result<Mapped, MappingError> {
        let label_nodes = children.all(Role::Label);
        let labels = if label_nodes.is_empty() {
            self.lead(Keyword::Default.as_str())?;
            Vec::new()
        } else {
            self.lead(Keyword::Case.as_str())?;
            self.separated(&label_nodes, punct::COMMA)?
        };
        let form = if self.cursor.peek_token(punct::ARROW) {
            CaseForm::Rule
        } else {
            CaseForm::Statement
        };
        let form = pad_left(self.expect(form.as_str())?, form);
        let statements = self.statements(&children.all(Role::Statement))?;
        Ok(NodeKind::Case(Case {
            labels,
            form,
            statements,
        })
        .into())
    }

    pub(super) fn yield_stmt(&mut self, children: &Children<F::Node>) -> Result<Mapped, MappingError> {
        self.lead(Keyword::Yield.as_str())?;
        let value = self.child(children, Role::Expression)?;
        Ok(NodeKind::Yield { value }.into())
    }

    pub(super) fn labeled(&mut self, children: &Children<F::Node>) -> Result<Mapped, MappingError> {
        let label = self.child(children, Role::Label)?;
        let label = pad_right(label, self.expect(punct::COLON)?);
        let statement = self.child(children, Role::Body)?;
        Ok(NodeKind::Labeled { label, statement }.into())
    }

    pub(super) fn synchronized(
        &mut self,
        children: &Children<F::Node>,
    ) -> Result<Mapped, MappingError> {
        self.lead(Keyword::Synchronized.as_str())?;
        let lock = self.child(children, Role::Expression)?;
        let body = self.child(children, Role::Body)?;
        Ok(NodeKind::Synchronized { lock, body }.into())
    }

    /// `assert condition` or `assert condition : detail`.
    pub(super) fn assert(&mut self, children: &Children<F::Node>) -> Result<Mapped, MappingError> {
        self.lead(Keyword::Assert.as_str())?;
        let condition = self.child(children, Role::Condition)?;
        let detail = match children.first(Role::Detail) {
            Some(detail) => {
                let before = self.expect(punct::COLON)?;
                Some(pad_left(before, self.boxed(detail)?))
            }
            None => None,
        };
        Ok(NodeKind::Assert { condition, detail }.into())
    }
}
