//! Tree traversal and rewriting.
//!
//! Trees are values: an edit consumes a tree and returns the edited one.
//! Subtrees the edit does not touch are moved into the result unchanged,
//! including their prefixes and markers, which is what keeps a reprint of an
//! edited tree identical outside the edited region.

use crate::stack::ensure_sufficient_stack;
use crate::{Markers, Node, NodeId, NodeKind, Space};

/// Call `$f` on every direct child node of `$kind`, in source order.
///
/// Shared by the `&` and `&mut` traversals; pass `mut` as the third argument
/// for the mutable one.
macro_rules! each_child {
    ($kind:expr, $f:expr $(, $m:tt)?) => {{
        let f = $f;
        match $kind {
            NodeKind::SourceFile(file) => {
                for item in & $($m)? file.items {
                    f(& $($m)? item.element);
                }
            }
            NodeKind::Package { name } => f(name),
            NodeKind::Import(import) => f(& $($m)? import.qualid),
            NodeKind::ClassDecl(class) => {
                for modifier in & $($m)? class.modifiers {
                    f(modifier);
                }
                f(& $($m)? class.name);
                if let Some(params) = & $($m)? class.type_params {
                    for param in & $($m)? params.elements {
                        f(& $($m)? param.element);
                    }
                }
                if let Some(extends) = & $($m)? class.extends {
                    f(& $($m)? extends.element);
                }
                if let Some(implements) = & $($m)? class.implements {
                    for iface in & $($m)? implements.elements {
                        f(& $($m)? iface.element);
                    }
                }
                f(& $($m)? class.body);
            }
            NodeKind::EnumValueSet(set) => {
                for value in & $($m)? set.values {
                    f(& $($m)? value.element);
                }
            }
            NodeKind::EnumValue(value) => {
                f(& $($m)? value.name);
                if let Some(args) = & $($m)? value.args {
                    for arg in & $($m)? args.elements {
                        f(& $($m)? arg.element);
                    }
                }
                if let Some(body) = & $($m)? value.body {
                    f(body);
                }
            }
            NodeKind::MethodDecl(method) => {
                for modifier in & $($m)? method.modifiers {
                    f(modifier);
                }
                if let Some(params) = & $($m)? method.type_params {
                    for param in & $($m)? params.elements {
                        f(& $($m)? param.element);
                    }
                }
                if let Some(ret) = & $($m)? method.return_type {
                    f(ret);
                }
                f(& $($m)? method.name);
                for param in & $($m)? method.params.elements {
                    f(& $($m)? param.element);
                }
                if let Some(throws) = & $($m)? method.throws {
                    for thrown in & $($m)? throws.elements {
                        f(& $($m)? thrown.element);
                    }
                }
                if let Some(body) = & $($m)? method.body {
                    f(body);
                }
            }
            NodeKind::VariableDecls(decls) => {
                for modifier in & $($m)? decls.modifiers {
                    f(modifier);
                }
                if let Some(type_expr) = & $($m)? decls.type_expr {
                    f(type_expr);
                }
                for var in & $($m)? decls.vars {
                    f(& $($m)? var.element);
                }
            }
            NodeKind::NamedVariable(var) => {
                f(& $($m)? var.name);
                if let Some(init) = & $($m)? var.initializer {
                    f(& $($m)? init.element);
                }
            }
            NodeKind::Annotation(annotation) => {
                f(& $($m)? annotation.name);
                if let Some(args) = & $($m)? annotation.args {
                    for arg in & $($m)? args.elements {
                        f(& $($m)? arg.element);
                    }
                }
            }
            NodeKind::TypeParameter(param) => {
                for annotation in & $($m)? param.annotations {
                    f(annotation);
                }
                f(& $($m)? param.name);
                if let Some(bounds) = & $($m)? param.bounds {
                    for bound in & $($m)? bounds.elements {
                        f(& $($m)? bound.element);
                    }
                }
            }
            NodeKind::Block(block) => {
                for stmt in & $($m)? block.statements {
                    f(& $($m)? stmt.element);
                }
            }
            NodeKind::Return { expr } => {
                if let Some(expr) = expr {
                    f(expr);
                }
            }
            NodeKind::If(if_stmt) => {
                f(& $($m)? if_stmt.condition);
                f(& $($m)? if_stmt.then_part.element);
                if let Some(else_part) = & $($m)? if_stmt.else_part {
                    f(else_part);
                }
            }
            NodeKind::Else { body } => f(& $($m)? body.element),
            NodeKind::WhileLoop { condition, body } => {
                f(condition);
                f(& $($m)? body.element);
            }
            NodeKind::DoWhileLoop { body, condition } => {
                f(& $($m)? body.element);
                f(& $($m)? condition.element);
            }
            NodeKind::ForLoop { control, body } | NodeKind::ForEachLoop { control, body } => {
                f(control);
                f(& $($m)? body.element);
            }
            NodeKind::ForControl(control) => {
                for init in & $($m)? control.init {
                    f(& $($m)? init.element);
                }
                f(& $($m)? control.condition.element);
                for update in & $($m)? control.update {
                    f(& $($m)? update.element);
                }
            }
            NodeKind::ForEachControl(control) => {
                f(& $($m)? control.variable.element);
                f(& $($m)? control.iterable.element);
            }
            NodeKind::Break { label } | NodeKind::Continue { label } => {
                if let Some(label) = label {
                    f(label);
                }
            }
            NodeKind::Throw { exception } | NodeKind::Yield { value: exception } => f(exception),
            NodeKind::Try(try_stmt) => {
                if let Some(resources) = & $($m)? try_stmt.resources {
                    for resource in & $($m)? resources.elements {
                        f(& $($m)? resource.element);
                    }
                }
                f(& $($m)? try_stmt.body);
                for catch in & $($m)? try_stmt.catches {
                    f(catch);
                }
                if let Some(finally) = & $($m)? try_stmt.finally {
                    f(& $($m)? finally.element);
                }
            }
            NodeKind::Catch { parameter, body } => {
                f(parameter);
                f(body);
            }
            NodeKind::Switch { selector, cases } => {
                f(selector);
                f(cases);
            }
            NodeKind::Case(case) => {
                for label in & $($m)? case.labels {
                    f(& $($m)? label.element);
                }
                for stmt in & $($m)? case.statements {
                    f(& $($m)? stmt.element);
                }
            }
            NodeKind::Labeled { label, statement } => {
                f(& $($m)? label.element);
                f(statement);
            }
            NodeKind::Synchronized { lock, body } => {
                f(lock);
                f(body);
            }
            NodeKind::Assert { condition, detail } => {
                f(condition);
                if let Some(detail) = detail {
                    f(& $($m)? detail.element);
                }
            }
            NodeKind::Parentheses { inner } => f(& $($m)? inner.element),
            NodeKind::Binary { left, right, .. } => {
                f(left);
                f(right);
            }
            NodeKind::Unary { operand, .. } => f(operand),
            NodeKind::Assignment { target, value } => {
                f(target);
                f(& $($m)? value.element);
            }
            NodeKind::CompoundAssignment { target, value, .. } => {
                f(target);
                f(value);
            }
            NodeKind::Ternary {
                condition,
                then_part,
                else_part,
            } => {
                f(condition);
                f(& $($m)? then_part.element);
                f(& $($m)? else_part.element);
            }
            NodeKind::InstanceOf { expr, class } => {
                f(expr);
                f(& $($m)? class.element);
            }
            NodeKind::TypeCast { class, expr } => {
                f(& $($m)? class.element);
                f(expr);
            }
            NodeKind::MethodInvocation(call) => {
                if let Some(select) = & $($m)? call.select {
                    f(& $($m)? select.element);
                }
                f(& $($m)? call.name);
                for arg in & $($m)? call.args.elements {
                    f(& $($m)? arg.element);
                }
            }
            NodeKind::NewClass(new_class) => {
                f(& $($m)? new_class.class);
                for arg in & $($m)? new_class.args.elements {
                    f(& $($m)? arg.element);
                }
                if let Some(body) = & $($m)? new_class.body {
                    f(body);
                }
            }
            NodeKind::FieldAccess { target, name }
            | NodeKind::MemberReference { target, name } => {
                f(target);
                f(& $($m)? name.element);
            }
            NodeKind::NewArray(array) => {
                if let Some(element) = & $($m)? array.element {
                    f(element);
                }
                for dimension in & $($m)? array.dimensions {
                    f(dimension);
                }
                if let Some(init) = & $($m)? array.initializer {
                    for value in & $($m)? init.elements {
                        f(& $($m)? value.element);
                    }
                }
            }
            NodeKind::ArrayAccess { indexed, dimension } => {
                f(indexed);
                f(dimension);
            }
            NodeKind::ArrayDimension { index } => f(& $($m)? index.element),
            NodeKind::ArrayType { element, .. } => f(element),
            NodeKind::ParameterizedType { base, args } => {
                f(base);
                for arg in & $($m)? args.elements {
                    f(& $($m)? arg.element);
                }
            }
            NodeKind::Wildcard { bounded, .. } => {
                if let Some(bounded) = bounded {
                    f(bounded);
                }
            }
            NodeKind::UnionType { alternatives } => {
                for alternative in alternatives {
                    f(& $($m)? alternative.element);
                }
            }
            NodeKind::Lambda { params, body, .. } => {
                for param in & $($m)? params.elements {
                    f(& $($m)? param.element);
                }
                f(body);
            }
            NodeKind::Modifier { .. }
            | NodeKind::Identifier { .. }
            | NodeKind::Literal { .. }
            | NodeKind::Primitive { .. }
            | NodeKind::Empty
            | NodeKind::Unparsed { .. } => {}
        }
    }};
}

impl Node {
    /// Visit each direct child in source order.
    pub fn for_each_child<'a>(&'a self, f: &mut dyn FnMut(&'a Node)) {
        each_child!(&self.kind, f);
    }

    /// Visit each direct child mutably in source order.
    pub fn for_each_child_mut(&mut self, f: &mut dyn FnMut(&mut Node)) {
        each_child!(&mut self.kind, f, mut);
    }

    /// Pre-order walk over this node and all descendants.
    pub fn walk<'a>(&'a self, f: &mut dyn FnMut(&'a Node)) {
        ensure_sufficient_stack(|| {
            f(self);
            self.for_each_child(&mut |child| child.walk(f));
        });
    }

    /// Find the node with the given id.
    pub fn find(&self, id: NodeId) -> Option<&Node> {
        if self.id == id {
            return Some(self);
        }
        let mut found = None;
        self.for_each_child(&mut |child| {
            if found.is_none() {
                found = child.find(id);
            }
        });
        found
    }

    /// Collect references to every node matching `predicate`, in source order.
    pub fn collect<'a>(&'a self, predicate: &dyn Fn(&Node) -> bool) -> Vec<&'a Node> {
        let mut out = Vec::new();
        self.collect_into(predicate, &mut out);
        out
    }

    fn collect_into<'a>(&'a self, predicate: &dyn Fn(&Node) -> bool, out: &mut Vec<&'a Node>) {
        if predicate(self) {
            out.push(self);
        }
        self.for_each_child(&mut |child| child.collect_into(predicate, out));
    }

    /// Bottom-up rewrite: children first, then `f` on the rebuilt node.
    #[must_use]
    pub fn rewrite(mut self, f: &mut dyn FnMut(Node) -> Node) -> Node {
        ensure_sufficient_stack(|| {
            self.for_each_child_mut(&mut |child| {
                let taken = std::mem::replace(child, Node::placeholder());
                *child = taken.rewrite(f);
            });
            f(self)
        })
    }

    /// Replace the node with id `id` by `replacement`, keeping everything else.
    #[must_use]
    pub fn replace(self, id: NodeId, replacement: Node) -> Node {
        let mut replacement = Some(replacement);
        self.rewrite(&mut |node| {
            if node.id == id {
                if let Some(new) = replacement.take() {
                    return new;
                }
            }
            node
        })
    }

    /// Stand-in used while a child is moved out during a rewrite.
    fn placeholder() -> Node {
        Node {
            id: NodeId::DUMMY,
            prefix: Space::EMPTY,
            markers: Markers::new(),
            kind: NodeKind::Empty,
            ty: None,
        }
    }
}
