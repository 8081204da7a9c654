use lst_build::{AstKind, Role};
use lst_ir::token::{BinaryOp, LiteralKind, PrimitiveKind};
use lst_ir::{Node, NodeKind, Space, TypeId};
use lst_print::print;
use lst_types::SharedTypeCache;
use pretty_assertions::assert_eq;

use super::fixture::Fixture;

fn only<'a>(tree: &'a Node, kind: &str) -> &'a Node {
    let found = tree.collect(&|n| n.kind_name() == kind);
    assert_eq!(found.len(), 1, "expected one {kind}");
    found[0]
}

#[test]
fn call_on_implicit_this_prints_no_dot() {
    let mut fx = Fixture::new("g();\n");
    let receiver = fx.synthetic(AstKind::Identifier, 0);
    fx.ast.set_symbol(receiver, "this");
    let name = fx.ident("g");
    fx.tok("(");
    let close = fx.tok(")");
    let call = fx.node(
        AstKind::MethodInvocation,
        fx.span(name),
        close,
        &[(Role::Select, receiver), (Role::Name, name)],
    );
    fx.tok(";");
    fx.unit(&[call]);

    let tree = fx.build(&SharedTypeCache::default()).unwrap();
    assert_eq!(print(&tree), fx.source);

    let NodeKind::MethodInvocation(invocation) = &only(&tree, "MethodInvocation").kind else {
        unreachable!()
    };
    let select = invocation.select.as_ref().unwrap();
    assert!(select.element.is_implicit());
    assert_eq!(select.element.as_identifier(), Some("this"));
}

#[test]
fn field_on_implicit_this_prints_only_its_name() {
    let mut fx = Fixture::new("n = size + 1;\n");
    let target = fx.ident("n");
    fx.tok("=");
    let size = fx.ident("size");
    let this = fx.synthetic(AstKind::Identifier, fx.span(size).start);
    fx.ast.set_symbol(this, "this");
    let field = fx.node(
        AstKind::FieldAccess,
        fx.span(size),
        fx.span(size),
        &[(Role::Target, this), (Role::Name, size)],
    );
    fx.tok("+");
    let one = fx.leaf(AstKind::Literal(LiteralKind::Int), "1");
    let sum = fx.node(
        AstKind::Binary(BinaryOp::Add),
        fx.span(size),
        fx.span(one),
        &[(Role::Left, field), (Role::Right, one)],
    );
    let assign = fx.node(
        AstKind::Assignment,
        fx.span(target),
        fx.span(one),
        &[(Role::Target, target), (Role::Value, sum)],
    );
    fx.tok(";");
    fx.unit(&[assign]);

    let tree = fx.build(&SharedTypeCache::default()).unwrap();
    assert_eq!(print(&tree), fx.source);

    let NodeKind::FieldAccess { target, name } = &only(&tree, "FieldAccess").kind else {
        unreachable!()
    };
    assert!(target.is_zero_width());
    assert_eq!(name.element.as_identifier(), Some("size"));
}

#[test]
fn expression_lambda_keeps_its_implicit_return() {
    let mut fx = Fixture::new("f(v -> v * 2);\n");
    let int_type = fx.types().primitive(PrimitiveKind::Int);

    let callee = fx.ident("f");
    fx.tok("(");
    let param_name = fx.ident("v");
    let param = fx.node(
        AstKind::VariableDecl,
        fx.span(param_name),
        fx.span(param_name),
        &[(Role::Name, param_name)],
    );
    fx.tok("->");
    let left = fx.ident("v");
    fx.tok("*");
    let two = fx.leaf(AstKind::Literal(LiteralKind::Int), "2");
    let product = fx.node(
        AstKind::Binary(BinaryOp::Mul),
        fx.span(left),
        fx.span(two),
        &[(Role::Left, left), (Role::Right, two)],
    );
    fx.ast.set_type(product, int_type);
    let ret = fx.synthetic(AstKind::Return, fx.span(left).start);
    fx.ast.add_child(ret, Role::Expression, product);
    let lambda = fx.node(
        AstKind::Lambda,
        fx.span(param_name),
        fx.span(two),
        &[(Role::Param, param), (Role::Body, ret)],
    );
    let close = fx.tok(")");
    let call = fx.node(
        AstKind::MethodInvocation,
        fx.span(callee),
        close,
        &[(Role::Name, callee), (Role::Argument, lambda)],
    );
    fx.tok(";");
    fx.unit(&[call]);

    let tree = fx.build(&SharedTypeCache::default()).unwrap();
    assert_eq!(print(&tree), fx.source);

    let ret = only(&tree, "Return");
    assert!(ret.is_implicit());
    assert!(!ret.is_zero_width());
    let written = ret.written_inner().unwrap();
    assert_eq!(written.kind_name(), "Binary");
    assert_eq!(written.ty, Some(TypeId::INT));

    // Edits inside the wrapped expression still print.
    let literal = only(&tree, "Literal").id;
    let edited = tree.replace(
        literal,
        Node::new(
            Space::single(),
            NodeKind::Literal {
                kind: LiteralKind::Int,
                source: "3".to_owned(),
            },
        ),
    );
    assert_eq!(print(&edited), "f(v -> v * 3);\n");
}
