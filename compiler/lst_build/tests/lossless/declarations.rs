use lst_build::{AstKind, Role};
use lst_ir::token::{ClassKind, LiteralKind, PrimitiveKind};
use lst_ir::{Node, NodeKind, TypeId};
use lst_print::print;
use lst_types::{ClassShape, Flags, MethodShape, SharedTypeCache, TypeRef, TypeShape};
use pretty_assertions::assert_eq;

use super::fixture::Fixture;

fn nodes_of<'a>(tree: &'a Node, kind: &str) -> Vec<&'a Node> {
    tree.collect(&|n| n.kind_name() == kind)
}

#[test]
fn self_bounded_class_round_trips_with_cyclic_bound() {
    let mut fx = Fixture::new("class A<T extends A<T>> { T self(){ return null; } }\n");

    let class_kw = fx.tok("class");
    let name = fx.ident("A");
    let t_name = fx.ident("T");
    fx.tok("extends");
    let bound_base = fx.ident("A");
    let bound_arg = fx.ident("T");
    let bound_end = fx.tok(">");
    let bound = fx.node(
        AstKind::ParameterizedType,
        fx.span(bound_base),
        bound_end,
        &[(Role::Clazz, bound_base), (Role::TypeArg, bound_arg)],
    );
    let type_param = fx.node(
        AstKind::TypeParameter,
        fx.span(t_name),
        fx.span(bound),
        &[(Role::Name, t_name), (Role::Bound, bound)],
    );
    fx.tok(">");
    fx.tok("{");
    let return_type = fx.ident("T");
    let method_name = fx.ident("self");
    fx.tok("(");
    fx.tok(")");
    let body_open = fx.tok("{");
    let return_kw = fx.tok("return");
    let null = fx.leaf(AstKind::Literal(LiteralKind::Null), "null");
    let ret = fx.node(AstKind::Return, return_kw, fx.span(null), &[(Role::Expression, null)]);
    fx.tok(";");
    let body_close = fx.tok("}");
    let body = fx.node(AstKind::Block, body_open, body_close, &[(Role::Statement, ret)]);
    let method = fx.node(
        AstKind::MethodDecl,
        fx.span(return_type),
        body_close,
        &[
            (Role::ReturnType, return_type),
            (Role::Name, method_name),
            (Role::Body, body),
        ],
    );
    let class_close = fx.tok("}");
    let class = fx.node(
        AstKind::ClassDecl(ClassKind::Class),
        class_kw,
        class_close,
        &[
            (Role::Name, name),
            (Role::TypeParam, type_param),
            (Role::Member, method),
        ],
    );
    fx.unit(&[class]);

    // A<T extends A<T>> with `T self()`
    let types = fx.types();
    let a = types.slot();
    let var = types.slot();
    let a_of_t = types.add(TypeShape::Parameterized {
        base: a,
        args: vec![var],
    });
    types.set(
        var,
        TypeShape::TypeVariable {
            name: "T".into(),
            bounds: vec![a_of_t],
        },
    );
    let self_method = types.add(TypeShape::Method(MethodShape {
        owner: a,
        name: "self".into(),
        flags: Flags::empty(),
        return_type: var,
        param_types: Vec::new(),
        thrown: Vec::new(),
    }));
    let mut shape = ClassShape::named("A", ClassKind::Class);
    shape.type_params = vec![var];
    shape.methods = vec![self_method];
    types.set(a, TypeShape::Class(shape));
    let null_type = types.primitive(PrimitiveKind::Null);

    fx.ast.set_type(class, a);
    fx.ast.set_type(type_param, var);
    fx.ast.set_type(bound, a_of_t);
    fx.ast.set_type(return_type, var);
    fx.ast.set_type(method, self_method);
    fx.ast.set_type(null, null_type);

    let cache = SharedTypeCache::default();
    let tree = fx.build(&cache).unwrap();
    assert_eq!(print(&tree), fx.source);

    let class_node = nodes_of(&tree, "ClassDecl")[0];
    let arena = cache.read();
    let class_type = arena.get(class_node.ty.unwrap()).as_class().unwrap();
    assert_eq!(class_type.fq_name, "A");
    assert!(class_type.complete);
    assert_eq!(class_type.methods.len(), 1);

    let TypeRef::GenericVariable { name, bounds, .. } = arena.get(class_type.type_params[0]) else {
        panic!("type parameter is not a type variable");
    };
    assert_eq!(name, "T");
    assert_eq!(
        arena.get(bounds[0]),
        &TypeRef::Cyclic {
            signature: "A".into()
        }
    );

    let literal = nodes_of(&tree, "Literal")[0];
    assert_eq!(literal.ty, Some(TypeId::NULL));
}

/// `class C { void f() { int a, b = 2; } }` with the declaration split in two.
fn split_declaration() -> Fixture {
    let mut fx = Fixture::new("class C {\n    void f() {\n        int a, b = 2;\n    }\n}\n");

    let class_kw = fx.tok("class");
    let name = fx.ident("C");
    let void = fx.leaf(AstKind::PrimitiveType(PrimitiveKind::Void), "void");
    let method_name = fx.ident("f");
    fx.tok("(");
    fx.tok(")");
    let body_open = fx.tok("{");
    let int = fx.leaf(AstKind::PrimitiveType(PrimitiveKind::Int), "int");
    let a = fx.ident("a");
    let decl_a = fx.node(
        AstKind::VariableDecl,
        fx.span(int),
        fx.span(a),
        &[(Role::Type, int), (Role::Name, a)],
    );
    fx.tok(",");
    let b = fx.ident("b");
    fx.tok("=");
    let two = fx.leaf(AstKind::Literal(LiteralKind::Int), "2");
    let decl_b = fx.node(
        AstKind::VariableDecl,
        fx.span(int),
        fx.span(two),
        &[(Role::Type, int), (Role::Name, b), (Role::Initializer, two)],
    );
    fx.tok(";");
    let body_close = fx.tok("}");
    let body = fx.node(
        AstKind::Block,
        body_open,
        body_close,
        &[(Role::Statement, decl_a), (Role::Statement, decl_b)],
    );
    let method = fx.node(
        AstKind::MethodDecl,
        fx.span(void),
        body_close,
        &[(Role::ReturnType, void), (Role::Name, method_name), (Role::Body, body)],
    );
    let class_close = fx.tok("}");
    let class = fx.node(
        AstKind::ClassDecl(ClassKind::Class),
        class_kw,
        class_close,
        &[(Role::Name, name), (Role::Member, method)],
    );
    fx.unit(&[class]);

    let int_type = fx.types().primitive(PrimitiveKind::Int);
    fx.ast.set_type(decl_a, int_type);
    fx.ast.set_type(decl_b, int_type);
    fx
}

#[test]
fn split_declaration_becomes_one_statement() {
    let fx = split_declaration();
    let tree = fx.build(&SharedTypeCache::default()).unwrap();
    assert_eq!(print(&tree), fx.source);

    let decls = nodes_of(&tree, "VariableDecls");
    assert_eq!(decls.len(), 1);
    assert_eq!(decls[0].ty, None);
    let NodeKind::VariableDecls(decl) = &decls[0].kind else {
        unreachable!()
    };
    assert_eq!(decl.vars.len(), 2);
    assert!(decl.vars[0].after.is_empty());
    assert!(decl.vars[1].after.is_empty());

    let names: Vec<_> = nodes_of(&tree, "NamedVariable")
        .iter()
        .map(|v| v.ty)
        .collect();
    assert_eq!(names, vec![Some(TypeId::INT), Some(TypeId::INT)]);

    let statements = nodes_of(&tree, "Block")
        .iter()
        .map(|block| match &block.kind {
            NodeKind::Block(b) => b.statements.len(),
            _ => 0,
        })
        .collect::<Vec<_>>();
    assert_eq!(statements, vec![1, 1]);
}

#[test]
fn replacing_one_identifier_leaves_the_rest_untouched() {
    let fx = split_declaration();
    let tree = fx.build(&SharedTypeCache::default()).unwrap();

    let target = tree
        .collect(&|n| n.as_identifier() == Some("a"))
        .first()
        .map(|n| (n.id, n.prefix.clone()))
        .unwrap();
    let renamed = Node::new(
        target.1,
        NodeKind::Identifier {
            name: "alpha".into(),
        },
    );
    let edited = tree.replace(target.0, renamed);

    assert_eq!(
        print(&edited),
        "class C {\n    void f() {\n        int alpha, b = 2;\n    }\n}\n"
    );
}

#[test]
fn implicit_super_call_prints_nothing() {
    let mut fx = Fixture::new("class C {\n    C() {\n    }\n}\n");

    let class_kw = fx.tok("class");
    let name = fx.ident("C");
    let ctor_name = fx.ident("C");
    fx.tok("(");
    fx.tok(")");
    let body_open = fx.tok("{");
    let super_call = fx.synthetic(AstKind::MethodInvocation, body_open.end);
    let body_close = fx.tok("}");
    let body = fx.node(
        AstKind::Block,
        body_open,
        body_close,
        &[(Role::Statement, super_call)],
    );
    let ctor = fx.node(
        AstKind::MethodDecl,
        fx.span(ctor_name),
        body_close,
        &[(Role::Name, ctor_name), (Role::Body, body)],
    );
    let class_close = fx.tok("}");
    let class = fx.node(
        AstKind::ClassDecl(ClassKind::Class),
        class_kw,
        class_close,
        &[(Role::Name, name), (Role::Member, ctor)],
    );
    fx.unit(&[class]);

    let tree = fx.build(&SharedTypeCache::default()).unwrap();
    assert_eq!(print(&tree), fx.source);

    let calls = nodes_of(&tree, "MethodInvocation");
    assert_eq!(calls.len(), 1);
    assert!(calls[0].is_implicit());
    let NodeKind::MethodInvocation(call) = &calls[0].kind else {
        unreachable!()
    };
    assert_eq!(call.name.as_identifier(), Some("super"));
}

#[test]
fn enum_with_trailing_comma_and_fields() {
    let mut fx = Fixture::new(
        "enum Color {\n    RED,\n    GREEN(1),\n    BLUE,\n    ;\n    int v;\n}\n",
    );

    let enum_kw = fx.tok("enum");
    let name = fx.ident("Color");
    let red_name = fx.ident("RED");
    let red = fx.node(
        AstKind::EnumConstant,
        fx.span(red_name),
        fx.span(red_name),
        &[(Role::Name, red_name)],
    );
    let green_name = fx.ident("GREEN");
    fx.tok("(");
    let one = fx.leaf(AstKind::Literal(LiteralKind::Int), "1");
    let green_close = fx.tok(")");
    let green = fx.node(
        AstKind::EnumConstant,
        fx.span(green_name),
        green_close,
        &[(Role::Name, green_name), (Role::Argument, one)],
    );
    let blue_name = fx.ident("BLUE");
    let blue = fx.node(
        AstKind::EnumConstant,
        fx.span(blue_name),
        fx.span(blue_name),
        &[(Role::Name, blue_name)],
    );
    let int = fx.leaf(AstKind::PrimitiveType(PrimitiveKind::Int), "int");
    let v = fx.ident("v");
    let field = fx.node(
        AstKind::VariableDecl,
        fx.span(int),
        fx.span(v),
        &[(Role::Type, int), (Role::Name, v)],
    );
    fx.tok(";");
    let close = fx.tok("}");
    let class = fx.node(
        AstKind::ClassDecl(ClassKind::Enum),
        enum_kw,
        close,
        &[
            (Role::Name, name),
            (Role::Member, red),
            (Role::Member, green),
            (Role::Member, blue),
            (Role::Member, field),
        ],
    );
    fx.unit(&[class]);

    let tree = fx.build(&SharedTypeCache::default()).unwrap();
    assert_eq!(print(&tree), fx.source);

    let sets = nodes_of(&tree, "EnumValueSet");
    let NodeKind::EnumValueSet(set) = &sets[0].kind else {
        unreachable!()
    };
    assert!(set.terminated);
    assert_eq!(set.values.len(), 3);
    assert_eq!(set.values[1].element.kind_name(), "EnumValue");
    assert_eq!(
        set.values[2]
            .markers
            .trailing_comma()
            .map(|suffix| suffix.whitespace.as_str()),
        Some("\n    ")
    );
    assert_eq!(nodes_of(&tree, "VariableDecls").len(), 1);
}
