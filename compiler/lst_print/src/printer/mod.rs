//! Tree printer.
//!
//! Walks a tree in source order. Each node writes its prefix, then the tokens
//! its kind implies, recursing into children. Padding spaces are written
//! where the builder found them, so the output is the input byte for byte.

use lst_ir::stack::ensure_sufficient_stack;
use lst_ir::token::{punct, Keyword};
use lst_ir::{Container, LeftPadded, Markers, Node, NodeKind, RightPadded, Space};

use crate::{Emitter, StringEmitter};

/// Print `node` to a string.
pub fn print(node: &Node) -> String {
    let mut emitter = StringEmitter::new();
    print_to(node, &mut emitter);
    emitter.output()
}

/// Print `node` to `emitter`.
pub fn print_to<E: Emitter>(node: &Node, emitter: &mut E) {
    Printer::new(emitter).node(node);
}

/// Writes trees to an [`Emitter`].
pub struct Printer<'e, E: Emitter> {
    out: &'e mut E,
}

impl<'e, E: Emitter> Printer<'e, E> {
    pub fn new(out: &'e mut E) -> Self {
        Printer { out }
    }

    /// Print one node and its subtree. Implicit nodes print only the written
    /// node they wrap, if any.
    pub fn node(&mut self, node: &Node) {
        if node.is_implicit() {
            if let Some(inner) = node.written_inner() {
                self.node(inner);
            }
            return;
        }
        ensure_sufficient_stack(|| {
            self.space(&node.prefix);
            self.kind(node);
        });
    }

    fn emit(&mut self, text: &str) {
        self.out.emit(text);
    }

    fn space(&mut self, space: &Space) {
        self.out.emit_space(space);
    }

    fn keyword(&mut self, keyword: Keyword) {
        self.emit(keyword.as_str());
    }

    /// `before` then `token`.
    fn token(&mut self, before: &Space, token: &str) {
        self.space(before);
        self.emit(token);
    }

    fn nodes(&mut self, nodes: &[Node]) {
        for node in nodes {
            self.node(node);
        }
    }

    fn optional(&mut self, node: Option<&Node>) {
        if let Some(node) = node {
            self.node(node);
        }
    }

    /// A statement and its optional `;`.
    fn statement(&mut self, element: &Node, after: &Space, markers: &Markers) {
        self.node(element);
        self.space(after);
        if markers.has_semicolon() {
            self.emit(punct::SEMI);
        }
    }

    fn statements(&mut self, statements: &[RightPadded<Node>]) {
        for stmt in statements {
            self.statement(&stmt.element, &stmt.after, &stmt.markers);
        }
    }

    fn boxed_statement(&mut self, stmt: &RightPadded<Box<Node>>) {
        self.statement(&stmt.element, &stmt.after, &stmt.markers);
    }

    /// `open a sep b close`, or just the elements when the container was
    /// written without its delimiters.
    fn container(&mut self, container: &Container<Node>, open: &str, separator: &str, close: &str) {
        let bare = container.markers.omits_parentheses();
        self.space(&container.before);
        if !bare {
            self.emit(open);
        }
        self.separated(&container.elements, separator);
        if !bare {
            self.emit(close);
        }
    }

    /// `keyword a sep b`, e.g. an `implements` list.
    fn keyword_list(&mut self, keyword: Keyword, list: &Container<Node>, separator: &str) {
        self.token(&list.before, keyword.as_str());
        self.separated(&list.elements, separator);
    }

    /// Elements joined by `separator`, plus a trailing one where recorded.
    fn separated(&mut self, elements: &[RightPadded<Node>], separator: &str) {
        let last = elements.len().saturating_sub(1);
        for (i, element) in elements.iter().enumerate() {
            self.node(&element.element);
            self.space(&element.after);
            if i < last {
                self.emit(separator);
            } else if let Some(suffix) = element.markers.trailing_comma() {
                self.emit(separator);
                self.space(suffix);
            }
        }
    }

    fn left(&mut self, padded: &LeftPadded<Box<Node>>, token: &str) {
        self.token(&padded.before, token);
        self.node(&padded.element);
    }

    fn kind(&mut self, node: &Node) {
        match &node.kind {
            NodeKind::SourceFile(file) => {
                self.statements(&file.items);
                self.space(&file.eof);
            }
            NodeKind::Package { name } => {
                self.keyword(Keyword::Package);
                self.node(name);
            }
            NodeKind::Import(import) => {
                self.keyword(Keyword::Import);
                if let Some(before) = &import.static_prefix {
                    self.token(before, Keyword::Static.as_str());
                }
                self.node(&import.qualid);
            }
            NodeKind::ClassDecl(class) => {
                self.nodes(&class.modifiers);
                self.token(&class.kind.before, class.kind.element.as_str());
                self.node(&class.name);
                if let Some(params) = &class.type_params {
                    self.container(params, punct::LT, punct::COMMA, punct::GT);
                }
                if let Some(extends) = &class.extends {
                    self.left(extends, Keyword::Extends.as_str());
                }
                if let Some(implements) = &class.implements {
                    self.keyword_list(
                        class.kind.element.implements_keyword(),
                        implements,
                        punct::COMMA,
                    );
                }
                self.node(&class.body);
            }
            NodeKind::EnumValueSet(set) => self.separated(&set.values, punct::COMMA),
            NodeKind::EnumValue(value) => {
                self.node(&value.name);
                if let Some(args) = &value.args {
                    self.container(args, punct::LPAREN, punct::COMMA, punct::RPAREN);
                }
                self.optional(value.body.as_deref());
            }
            NodeKind::MethodDecl(method) => {
                self.nodes(&method.modifiers);
                if let Some(params) = &method.type_params {
                    self.container(params, punct::LT, punct::COMMA, punct::GT);
                }
                self.optional(method.return_type.as_deref());
                self.node(&method.name);
                self.container(&method.params, punct::LPAREN, punct::COMMA, punct::RPAREN);
                if let Some(throws) = &method.throws {
                    self.keyword_list(Keyword::Throws, throws, punct::COMMA);
                }
                self.optional(method.body.as_deref());
            }
            NodeKind::VariableDecls(decls) => {
                self.nodes(&decls.modifiers);
                self.optional(decls.type_expr.as_deref());
                self.separated(&decls.vars, punct::COMMA);
            }
            NodeKind::NamedVariable(var) => {
                self.node(&var.name);
                if let Some(init) = &var.initializer {
                    self.left(init, punct::EQ);
                }
            }
            NodeKind::Modifier { keyword } => self.emit(keyword.as_str()),
            NodeKind::Annotation(annotation) => {
                self.emit(punct::AT);
                self.node(&annotation.name);
                if let Some(args) = &annotation.args {
                    self.container(args, punct::LPAREN, punct::COMMA, punct::RPAREN);
                }
            }
            NodeKind::TypeParameter(param) => {
                self.nodes(&param.annotations);
                self.node(&param.name);
                if let Some(bounds) = &param.bounds {
                    self.keyword_list(Keyword::Extends, bounds, punct::AMP);
                }
            }
            NodeKind::Block(block) => {
                let braces = !node.markers.omits_braces();
                if braces {
                    self.emit(punct::LBRACE);
                }
                self.statements(&block.statements);
                self.space(&block.end);
                if braces {
                    self.emit(punct::RBRACE);
                }
            }
            NodeKind::Return { expr } => {
                self.keyword(Keyword::Return);
                self.optional(expr.as_deref());
            }
            NodeKind::Try(try_stmt) => {
                self.keyword(Keyword::Try);
                if let Some(resources) = &try_stmt.resources {
                    self.container(resources, punct::LPAREN, punct::SEMI, punct::RPAREN);
                }
                self.node(&try_stmt.body);
                self.nodes(&try_stmt.catches);
                if let Some(finally) = &try_stmt.finally {
                    self.left(finally, Keyword::Finally.as_str());
                }
            }
            NodeKind::Catch { parameter, body } => {
                self.keyword(Keyword::Catch);
                self.node(parameter);
                self.node(body);
            }
            NodeKind::Switch { selector, cases } => {
                self.keyword(Keyword::Switch);
                self.node(selector);
                self.node(cases);
            }
            NodeKind::Case(case) => {
                if case.labels.is_empty() {
                    self.keyword(Keyword::Default);
                } else {
                    self.keyword(Keyword::Case);
                    self.separated(&case.labels, punct::COMMA);
                }
                self.token(&case.form.before, case.form.element.as_str());
                self.statements(&case.statements);
            }
            NodeKind::Yield { value } => {
                self.keyword(Keyword::Yield);
                self.node(value);
            }
            NodeKind::Labeled { label, statement } => {
                self.node(&label.element);
                self.token(&label.after, punct::COLON);
                self.node(statement);
            }
            NodeKind::Synchronized { lock, body } => {
                self.keyword(Keyword::Synchronized);
                self.node(lock);
                self.node(body);
            }
            NodeKind::Assert { condition, detail } => {
                self.keyword(Keyword::Assert);
                self.node(condition);
                if let Some(detail) = detail {
                    self.left(detail, punct::COLON);
                }
            }
            NodeKind::If(if_stmt) => {
                self.keyword(Keyword::If);
                self.node(&if_stmt.condition);
                self.boxed_statement(&if_stmt.then_part);
                self.optional(if_stmt.else_part.as_deref());
            }
            NodeKind::Else { body } => {
                self.keyword(Keyword::Else);
                self.boxed_statement(body);
            }
            NodeKind::WhileLoop { condition, body } => {
                self.keyword(Keyword::While);
                self.node(condition);
                self.boxed_statement(body);
            }
            NodeKind::DoWhileLoop { body, condition } => {
                self.keyword(Keyword::Do);
                self.boxed_statement(body);
                self.left(condition, Keyword::While.as_str());
            }
            NodeKind::ForLoop { control, body } | NodeKind::ForEachLoop { control, body } => {
                self.keyword(Keyword::For);
                self.node(control);
                self.boxed_statement(body);
            }
            NodeKind::ForControl(control) => {
                self.emit(punct::LPAREN);
                self.separated(&control.init, punct::COMMA);
                self.emit(punct::SEMI);
                self.node(&control.condition.element);
                self.space(&control.condition.after);
                self.emit(punct::SEMI);
                self.separated(&control.update, punct::COMMA);
                self.emit(punct::RPAREN);
            }
            NodeKind::ForEachControl(control) => {
                self.emit(punct::LPAREN);
                self.node(&control.variable.element);
                self.token(&control.variable.after, punct::COLON);
                self.node(&control.iterable.element);
                self.token(&control.iterable.after, punct::RPAREN);
            }
            NodeKind::Break { label } => {
                self.keyword(Keyword::Break);
                self.optional(label.as_deref());
            }
            NodeKind::Continue { label } => {
                self.keyword(Keyword::Continue);
                self.optional(label.as_deref());
            }
            NodeKind::Throw { exception } => {
                self.keyword(Keyword::Throw);
                self.node(exception);
            }
            NodeKind::Parentheses { inner } => {
                self.emit(punct::LPAREN);
                self.node(&inner.element);
                self.token(&inner.after, punct::RPAREN);
            }
            NodeKind::Binary {
                left,
                operator,
                right,
            } => {
                self.node(left);
                self.token(&operator.before, operator.element.as_str());
                self.node(right);
            }
            NodeKind::Unary { operator, operand } => {
                if operator.element.is_postfix() {
                    self.node(operand);
                    self.token(&operator.before, operator.element.as_str());
                } else {
                    self.token(&operator.before, operator.element.as_str());
                    self.node(operand);
                }
            }
            NodeKind::Assignment { target, value } => {
                self.node(target);
                self.left(value, punct::EQ);
            }
            NodeKind::CompoundAssignment {
                target,
                operator,
                value,
            } => {
                self.node(target);
                self.token(&operator.before, &operator.element.assign_str());
                self.node(value);
            }
            NodeKind::Ternary {
                condition,
                then_part,
                else_part,
            } => {
                self.node(condition);
                self.left(then_part, punct::QUESTION);
                self.left(else_part, punct::COLON);
            }
            NodeKind::InstanceOf { expr, class } => {
                self.node(expr);
                self.left(class, Keyword::InstanceOf.as_str());
            }
            NodeKind::TypeCast { class, expr } => {
                self.emit(punct::LPAREN);
                self.node(&class.element);
                self.token(&class.after, punct::RPAREN);
                self.node(expr);
            }
            NodeKind::MethodInvocation(call) => {
                if let Some(select) = &call.select {
                    if !select.element.is_zero_width() {
                        self.node(&select.element);
                        self.token(&select.after, punct::DOT);
                    }
                }
                self.node(&call.name);
                self.container(&call.args, punct::LPAREN, punct::COMMA, punct::RPAREN);
            }
            NodeKind::NewClass(new_class) => {
                self.keyword(Keyword::New);
                self.node(&new_class.class);
                self.container(&new_class.args, punct::LPAREN, punct::COMMA, punct::RPAREN);
                self.optional(new_class.body.as_deref());
            }
            NodeKind::FieldAccess { target, name } => {
                if target.is_zero_width() {
                    self.node(&name.element);
                } else {
                    self.node(target);
                    self.left(name, punct::DOT);
                }
            }
            NodeKind::NewArray(array) => {
                if let Some(element) = &array.element {
                    self.keyword(Keyword::New);
                    self.node(element);
                }
                self.nodes(&array.dimensions);
                if let Some(init) = &array.initializer {
                    self.container(init, punct::LBRACE, punct::COMMA, punct::RBRACE);
                }
            }
            NodeKind::MemberReference { target, name } => {
                self.node(target);
                self.left(name, punct::DOUBLE_COLON);
            }
            NodeKind::Identifier { name } => self.emit(name),
            NodeKind::Literal { source, .. } => self.emit(source),
            NodeKind::ArrayAccess { indexed, dimension } => {
                self.node(indexed);
                self.node(dimension);
            }
            NodeKind::ArrayDimension { index } => {
                self.emit(punct::LBRACKET);
                self.node(&index.element);
                self.token(&index.after, punct::RBRACKET);
            }
            NodeKind::ArrayType { element, dimension } => {
                self.node(element);
                self.token(&dimension.before, punct::LBRACKET);
                self.token(&dimension.element, punct::RBRACKET);
            }
            NodeKind::ParameterizedType { base, args } => {
                self.node(base);
                self.container(args, punct::LT, punct::COMMA, punct::GT);
            }
            NodeKind::Wildcard { bound, bounded } => {
                self.emit(punct::QUESTION);
                if let Some(bound) = bound {
                    self.token(&bound.before, bound.element.keyword().as_str());
                }
                self.optional(bounded.as_deref());
            }
            NodeKind::Primitive { kind } => self.emit(kind.keyword()),
            NodeKind::UnionType { alternatives } => self.separated(alternatives, punct::PIPE),
            NodeKind::Lambda { params, arrow, body } => {
                self.container(params, punct::LPAREN, punct::COMMA, punct::RPAREN);
                self.token(arrow, punct::ARROW);
                self.node(body);
            }
            NodeKind::Empty => {}
            NodeKind::Unparsed { text } => self.emit(text),
        }
    }
}
