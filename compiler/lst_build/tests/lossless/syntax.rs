use lst_build::{AstKind, Role};
use lst_ir::token::{CaseForm, ClassKind, LiteralKind, PrimitiveKind};
use lst_ir::{Node, NodeKind};
use lst_print::print;
use lst_types::SharedTypeCache;
use pretty_assertions::assert_eq;

use super::fixture::Fixture;

fn nodes_of<'a>(tree: &'a Node, kind: &str) -> Vec<&'a Node> {
    tree.collect(&|n| n.kind_name() == kind)
}

/// A no-argument call `name()` starting at the next `name`.
fn call(fx: &mut Fixture, name: &str) -> lst_build::AstId {
    let name = fx.ident(name);
    fx.tok("(");
    let close = fx.tok(")");
    fx.node(AstKind::MethodInvocation, fx.span(name), close, &[(Role::Name, name)])
}

#[test]
fn try_with_resources_catch_and_finally_round_trip() {
    let mut fx = Fixture::new(
        "try (Reader r = open();) {
    r.read();
} catch (IOException | RuntimeException e) {
    log(e);
} finally {
    close();
}
",
    );

    let try_kw = fx.tok("try");
    fx.tok("(");
    let reader = fx.ident("Reader");
    let r = fx.ident("r");
    fx.tok("=");
    let open = call(&mut fx, "open");
    let resource = fx.node(
        AstKind::VariableDecl,
        fx.span(reader),
        fx.span(open),
        &[(Role::Type, reader), (Role::Name, r), (Role::Initializer, open)],
    );
    fx.tok(";");
    fx.tok(")");

    let body_open = fx.tok("{");
    let receiver = fx.ident("r");
    fx.tok(".");
    let read_name = fx.ident("read");
    fx.tok("(");
    let read_close = fx.tok(")");
    let read = fx.node(
        AstKind::MethodInvocation,
        fx.span(receiver),
        read_close,
        &[(Role::Select, receiver), (Role::Name, read_name)],
    );
    fx.tok(";");
    let body_close = fx.tok("}");
    let body = fx.node(AstKind::Block, body_open, body_close, &[(Role::Statement, read)]);

    let catch_kw = fx.tok("catch");
    fx.tok("(");
    let io = fx.ident("IOException");
    fx.tok("|");
    let runtime = fx.ident("RuntimeException");
    let union = fx.node(
        AstKind::UnionType,
        fx.span(io),
        fx.span(runtime),
        &[(Role::Alternative, io), (Role::Alternative, runtime)],
    );
    let e = fx.ident("e");
    let param = fx.node(
        AstKind::VariableDecl,
        fx.span(io),
        fx.span(e),
        &[(Role::Type, union), (Role::Name, e)],
    );
    fx.tok(")");
    let handler_open = fx.tok("{");
    let log_name = fx.ident("log");
    fx.tok("(");
    let logged = fx.ident("e");
    let log_close = fx.tok(")");
    let log = fx.node(
        AstKind::MethodInvocation,
        fx.span(log_name),
        log_close,
        &[(Role::Name, log_name), (Role::Argument, logged)],
    );
    fx.tok(";");
    let handler_close = fx.tok("}");
    let handler = fx.node(AstKind::Block, handler_open, handler_close, &[(Role::Statement, log)]);
    let catch = fx.node(
        AstKind::Catch,
        catch_kw,
        handler_close,
        &[(Role::Param, param), (Role::Body, handler)],
    );

    fx.tok("finally");
    let cleanup_open = fx.tok("{");
    let close = call(&mut fx, "close");
    fx.tok(";");
    let cleanup_close = fx.tok("}");
    let cleanup = fx.node(AstKind::Block, cleanup_open, cleanup_close, &[(Role::Statement, close)]);

    let try_stmt = fx.node(
        AstKind::Try,
        try_kw,
        cleanup_close,
        &[
            (Role::Resource, resource),
            (Role::Body, body),
            (Role::Catch, catch),
            (Role::Finally, cleanup),
        ],
    );
    fx.unit(&[try_stmt]);

    let tree = fx.build(&SharedTypeCache::default()).unwrap();
    assert_eq!(print(&tree), fx.source);

    let NodeKind::Try(stmt) = &nodes_of(&tree, "Try")[0].kind else {
        unreachable!()
    };
    let resources = stmt.resources.as_ref().unwrap();
    assert_eq!(resources.len(), 1);
    assert!(resources.elements[0].markers.trailing_comma().is_some());
    assert_eq!(stmt.catches.len(), 1);
    assert!(stmt.finally.is_some());

    let NodeKind::UnionType { alternatives } = &nodes_of(&tree, "UnionType")[0].kind else {
        unreachable!()
    };
    let names: Vec<_> = alternatives
        .iter()
        .filter_map(|alt| alt.element.as_identifier())
        .collect();
    assert_eq!(names, vec!["IOException", "RuntimeException"]);
}

#[test]
fn switch_statement_with_grouped_labels_and_default() {
    let mut fx = Fixture::new(
        "switch (day) {
    case MON, TUE:
        work();
        break;
    default:
        rest();
}
",
    );

    let switch_kw = fx.tok("switch");
    let open = fx.tok("(");
    let day = fx.ident("day");
    let close = fx.tok(")");
    let selector = fx.node(AstKind::Parentheses, open, close, &[(Role::Expression, day)]);
    fx.tok("{");

    let case_kw = fx.tok("case");
    let mon = fx.ident("MON");
    fx.tok(",");
    let tue = fx.ident("TUE");
    fx.tok(":");
    let work = call(&mut fx, "work");
    fx.tok(";");
    let brk = fx.leaf(AstKind::Break, "break");
    fx.tok(";");
    let weekday = fx.node(
        AstKind::Case,
        case_kw,
        fx.span(brk),
        &[
            (Role::Label, mon),
            (Role::Label, tue),
            (Role::Statement, work),
            (Role::Statement, brk),
        ],
    );

    let default_kw = fx.tok("default");
    fx.tok(":");
    let rest = call(&mut fx, "rest");
    fx.tok(";");
    let fallback = fx.node(
        AstKind::Case,
        default_kw,
        fx.span(rest),
        &[(Role::Statement, rest)],
    );
    let end = fx.tok("}");
    let switch = fx.node(
        AstKind::Switch,
        switch_kw,
        end,
        &[
            (Role::Selector, selector),
            (Role::Case, weekday),
            (Role::Case, fallback),
        ],
    );
    fx.unit(&[switch]);

    let tree = fx.build(&SharedTypeCache::default()).unwrap();
    assert_eq!(print(&tree), fx.source);

    let cases: Vec<_> = nodes_of(&tree, "Case")
        .into_iter()
        .map(|node| match &node.kind {
            NodeKind::Case(case) => (case.labels.len(), case.form.element, case.statements.len()),
            _ => unreachable!(),
        })
        .collect();
    assert_eq!(
        cases,
        vec![(2, CaseForm::Statement, 2), (0, CaseForm::Statement, 1)]
    );
}

#[test]
fn switch_expression_with_rules_and_yield() {
    let mut fx = Fixture::new(
        "int n = switch (k) {
    case 1 -> 10;
    default -> {
        yield 0;
    }
};
",
    );

    let int = fx.leaf(AstKind::PrimitiveType(PrimitiveKind::Int), "int");
    let n = fx.ident("n");
    fx.tok("=");
    let switch_kw = fx.tok("switch");
    let open = fx.tok("(");
    let k = fx.ident("k");
    let close = fx.tok(")");
    let selector = fx.node(AstKind::Parentheses, open, close, &[(Role::Expression, k)]);
    fx.tok("{");

    let case_kw = fx.tok("case");
    let one = fx.leaf(AstKind::Literal(LiteralKind::Int), "1");
    fx.tok("->");
    let ten = fx.leaf(AstKind::Literal(LiteralKind::Int), "10");
    fx.tok(";");
    let first = fx.node(
        AstKind::Case,
        case_kw,
        fx.span(ten),
        &[(Role::Label, one), (Role::Statement, ten)],
    );

    let default_kw = fx.tok("default");
    fx.tok("->");
    let block_open = fx.tok("{");
    let yield_kw = fx.tok("yield");
    let zero = fx.leaf(AstKind::Literal(LiteralKind::Int), "0");
    let yielded = fx.node(AstKind::Yield, yield_kw, fx.span(zero), &[(Role::Expression, zero)]);
    fx.tok(";");
    let block_close = fx.tok("}");
    let block = fx.node(AstKind::Block, block_open, block_close, &[(Role::Statement, yielded)]);
    let second = fx.node(AstKind::Case, default_kw, block_close, &[(Role::Statement, block)]);

    let end = fx.tok("}");
    let switch = fx.node(
        AstKind::Switch,
        switch_kw,
        end,
        &[(Role::Selector, selector), (Role::Case, first), (Role::Case, second)],
    );
    let decl = fx.node(
        AstKind::VariableDecl,
        fx.span(int),
        end,
        &[(Role::Type, int), (Role::Name, n), (Role::Initializer, switch)],
    );
    fx.tok(";");
    fx.unit(&[decl]);

    let tree = fx.build(&SharedTypeCache::default()).unwrap();
    assert_eq!(print(&tree), fx.source);

    let forms: Vec<_> = nodes_of(&tree, "Case")
        .into_iter()
        .filter_map(|node| match &node.kind {
            NodeKind::Case(case) => Some(case.form.element),
            _ => None,
        })
        .collect();
    assert_eq!(forms, vec![CaseForm::Rule, CaseForm::Rule]);
    assert_eq!(nodes_of(&tree, "Yield").len(), 1);
}

#[test]
fn array_creation_and_initializers() {
    let mut fx = Fixture::new(
        "int[][] grid = new int[3][];
int[] xs = new int[] {1, 2,};
int[] ys = {};
",
    );

    // int[][] grid = new int[3][];
    let grid_int = fx.leaf(AstKind::PrimitiveType(PrimitiveKind::Int), "int");
    fx.tok("[");
    let inner_close = fx.tok("]");
    let inner = fx.node(
        AstKind::ArrayType,
        fx.span(grid_int),
        inner_close,
        &[(Role::Element, grid_int)],
    );
    fx.tok("[");
    let outer_close = fx.tok("]");
    let grid_type = fx.node(
        AstKind::ArrayType,
        fx.span(grid_int),
        outer_close,
        &[(Role::Element, inner)],
    );
    let grid = fx.ident("grid");
    fx.tok("=");
    let new_kw = fx.tok("new");
    let cell = fx.leaf(AstKind::PrimitiveType(PrimitiveKind::Int), "int");
    fx.tok("[");
    let three = fx.leaf(AstKind::Literal(LiteralKind::Int), "3");
    fx.tok("]");
    fx.tok("[");
    let dims_end = fx.tok("]");
    let sized = fx.node(
        AstKind::NewArray,
        new_kw,
        dims_end,
        &[(Role::Element, cell), (Role::Dimension, three)],
    );
    let grid_decl = fx.node(
        AstKind::VariableDecl,
        fx.span(grid_int),
        dims_end,
        &[(Role::Type, grid_type), (Role::Name, grid), (Role::Initializer, sized)],
    );
    fx.tok(";");

    // int[] xs = new int[] {1, 2,};
    let xs_int = fx.leaf(AstKind::PrimitiveType(PrimitiveKind::Int), "int");
    fx.tok("[");
    let xs_close = fx.tok("]");
    let xs_type = fx.node(AstKind::ArrayType, fx.span(xs_int), xs_close, &[(Role::Element, xs_int)]);
    let xs = fx.ident("xs");
    fx.tok("=");
    let new_kw = fx.tok("new");
    let element = fx.leaf(AstKind::PrimitiveType(PrimitiveKind::Int), "int");
    fx.tok("[");
    fx.tok("]");
    fx.tok("{");
    let first = fx.leaf(AstKind::Literal(LiteralKind::Int), "1");
    fx.tok(",");
    let second = fx.leaf(AstKind::Literal(LiteralKind::Int), "2");
    fx.tok(",");
    let values_end = fx.tok("}");
    let listed = fx.node(
        AstKind::NewArray,
        new_kw,
        values_end,
        &[
            (Role::Element, element),
            (Role::Initializer, first),
            (Role::Initializer, second),
        ],
    );
    let xs_decl = fx.node(
        AstKind::VariableDecl,
        fx.span(xs_int),
        values_end,
        &[(Role::Type, xs_type), (Role::Name, xs), (Role::Initializer, listed)],
    );
    fx.tok(";");

    // int[] ys = {};
    let ys_int = fx.leaf(AstKind::PrimitiveType(PrimitiveKind::Int), "int");
    fx.tok("[");
    let ys_close = fx.tok("]");
    let ys_type = fx.node(AstKind::ArrayType, fx.span(ys_int), ys_close, &[(Role::Element, ys_int)]);
    let ys = fx.ident("ys");
    fx.tok("=");
    let empty_open = fx.tok("{");
    let empty_close = fx.tok("}");
    let bare = fx.node(AstKind::NewArray, empty_open, empty_close, &[]);
    let ys_decl = fx.node(
        AstKind::VariableDecl,
        fx.span(ys_int),
        empty_close,
        &[(Role::Type, ys_type), (Role::Name, ys), (Role::Initializer, bare)],
    );
    fx.tok(";");
    fx.unit(&[grid_decl, xs_decl, ys_decl]);

    let tree = fx.build(&SharedTypeCache::default()).unwrap();
    assert_eq!(print(&tree), fx.source);

    let arrays: Vec<_> = nodes_of(&tree, "NewArray")
        .into_iter()
        .filter_map(|node| match &node.kind {
            NodeKind::NewArray(array) => Some(array),
            _ => None,
        })
        .collect();
    assert_eq!(arrays.len(), 3);

    assert_eq!(arrays[0].dimensions.len(), 2);
    let NodeKind::ArrayDimension { index } = &arrays[0].dimensions[1].kind else {
        unreachable!()
    };
    assert_eq!(index.element.kind_name(), "Empty");
    assert!(arrays[0].initializer.is_none());

    let values = arrays[1].initializer.as_ref().unwrap();
    assert_eq!(values.len(), 2);
    assert!(values.elements[1].markers.trailing_comma().is_some());

    assert!(arrays[2].element.is_none());
    assert!(arrays[2].dimensions.is_empty());
}

#[test]
fn labeled_loop_synchronized_assert_and_method_reference() {
    let mut fx = Fixture::new(
        "outer:
for (;;) {
    break outer;
}
synchronized (lock) {
    assert ok : \"broken\";
}
list.forEach(System.out::println);
",
    );

    let label = fx.ident("outer");
    fx.tok(":");
    let for_kw = fx.tok("for");
    fx.tok("(");
    fx.tok(";");
    fx.tok(";");
    fx.tok(")");
    let loop_open = fx.tok("{");
    let break_kw = fx.tok("break");
    let target = fx.ident("outer");
    let brk = fx.node(AstKind::Break, break_kw, fx.span(target), &[(Role::Label, target)]);
    fx.tok(";");
    let loop_close = fx.tok("}");
    let loop_body = fx.node(AstKind::Block, loop_open, loop_close, &[(Role::Statement, brk)]);
    let for_loop = fx.node(AstKind::ForLoop, for_kw, loop_close, &[(Role::Body, loop_body)]);
    let labeled = fx.node(
        AstKind::Labeled,
        fx.span(label),
        loop_close,
        &[(Role::Label, label), (Role::Body, for_loop)],
    );

    let sync_kw = fx.tok("synchronized");
    let lock_open = fx.tok("(");
    let lock = fx.ident("lock");
    let lock_close = fx.tok(")");
    let monitor = fx.node(AstKind::Parentheses, lock_open, lock_close, &[(Role::Expression, lock)]);
    let guarded_open = fx.tok("{");
    let assert_kw = fx.tok("assert");
    let ok = fx.ident("ok");
    fx.tok(":");
    let message = fx.leaf(AstKind::Literal(LiteralKind::String), "\"broken\"");
    let assertion = fx.node(
        AstKind::Assert,
        assert_kw,
        fx.span(message),
        &[(Role::Condition, ok), (Role::Detail, message)],
    );
    fx.tok(";");
    let guarded_close = fx.tok("}");
    let guarded = fx.node(
        AstKind::Block,
        guarded_open,
        guarded_close,
        &[(Role::Statement, assertion)],
    );
    let sync = fx.node(
        AstKind::Synchronized,
        sync_kw,
        guarded_close,
        &[(Role::Expression, monitor), (Role::Body, guarded)],
    );

    let list = fx.ident("list");
    fx.tok(".");
    let for_each = fx.ident("forEach");
    fx.tok("(");
    let system = fx.ident("System");
    fx.tok(".");
    let out = fx.ident("out");
    let system_out = fx.node(
        AstKind::FieldAccess,
        fx.span(system),
        fx.span(out),
        &[(Role::Target, system), (Role::Name, out)],
    );
    fx.tok("::");
    let println = fx.ident("println");
    let reference = fx.node(
        AstKind::MemberReference,
        fx.span(system),
        fx.span(println),
        &[(Role::Target, system_out), (Role::Name, println)],
    );
    let call_close = fx.tok(")");
    let invocation = fx.node(
        AstKind::MethodInvocation,
        fx.span(list),
        call_close,
        &[
            (Role::Select, list),
            (Role::Name, for_each),
            (Role::Argument, reference),
        ],
    );
    fx.tok(";");
    fx.unit(&[labeled, sync, invocation]);

    let tree = fx.build(&SharedTypeCache::default()).unwrap();
    assert_eq!(print(&tree), fx.source);

    let NodeKind::Labeled { label, statement } = &nodes_of(&tree, "Labeled")[0].kind else {
        unreachable!()
    };
    assert_eq!(label.element.as_identifier(), Some("outer"));
    assert_eq!(statement.kind_name(), "ForLoop");

    let NodeKind::Break { label: Some(target) } = &nodes_of(&tree, "Break")[0].kind else {
        unreachable!()
    };
    assert_eq!(target.as_identifier(), Some("outer"));

    let NodeKind::Assert { detail, .. } = &nodes_of(&tree, "Assert")[0].kind else {
        unreachable!()
    };
    assert!(detail.is_some());

    let NodeKind::MemberReference { target, name } = &nodes_of(&tree, "MemberReference")[0].kind
    else {
        unreachable!()
    };
    assert_eq!(target.kind_name(), "FieldAccess");
    assert_eq!(name.element.as_identifier(), Some("println"));
}

#[test]
fn enum_constant_with_a_class_body() {
    let mut fx = Fixture::new(
        "enum Op {
    PLUS {
        void run() {}
    },
    MINUS;
}
",
    );

    let enum_kw = fx.tok("enum");
    let name = fx.ident("Op");
    fx.tok("{");
    let plus_name = fx.ident("PLUS");
    let body_open = fx.tok("{");
    let void = fx.leaf(AstKind::PrimitiveType(PrimitiveKind::Void), "void");
    let run = fx.ident("run");
    fx.tok("(");
    fx.tok(")");
    let run_open = fx.tok("{");
    let run_close = fx.tok("}");
    let run_body = fx.node(AstKind::Block, run_open, run_close, &[]);
    let method = fx.node(
        AstKind::MethodDecl,
        fx.span(void),
        run_close,
        &[(Role::ReturnType, void), (Role::Name, run), (Role::Body, run_body)],
    );
    let body_close = fx.tok("}");
    let body = fx.node(AstKind::Block, body_open, body_close, &[(Role::Member, method)]);
    let plus = fx.node(
        AstKind::EnumConstant,
        fx.span(plus_name),
        body_close,
        &[(Role::Name, plus_name), (Role::Body, body)],
    );
    fx.tok(",");
    let minus_name = fx.ident("MINUS");
    let minus = fx.node(
        AstKind::EnumConstant,
        fx.span(minus_name),
        fx.span(minus_name),
        &[(Role::Name, minus_name)],
    );
    fx.tok(";");
    let close = fx.tok("}");
    let class = fx.node(
        AstKind::ClassDecl(ClassKind::Enum),
        enum_kw,
        close,
        &[(Role::Name, name), (Role::Member, plus), (Role::Member, minus)],
    );
    fx.unit(&[class]);

    let tree = fx.build(&SharedTypeCache::default()).unwrap();
    assert_eq!(print(&tree), fx.source);

    let bodies: Vec<_> = nodes_of(&tree, "EnumValue")
        .into_iter()
        .filter_map(|node| match &node.kind {
            NodeKind::EnumValue(value) => Some(value.body.is_some()),
            _ => None,
        })
        .collect();
    assert_eq!(bodies, vec![true, false]);
    assert_eq!(nodes_of(&tree, "MethodDecl").len(), 1);
}
