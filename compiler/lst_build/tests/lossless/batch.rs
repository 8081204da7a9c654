use std::path::Path;

use lst_build::{build_batch, AstKind, BuildConfig, FileInput, ParsedFile, ResolvedAst, Role};
use lst_ir::token::ClassKind;
use lst_ir::{NodeKind, Span, TypeId};
use lst_print::print;
use lst_types::{ClassShape, Flags, TypeShape};
use pretty_assertions::assert_eq;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use super::fixture::Fixture;

const EMPTY_CLASS: &str = "class A {\n}\n";

/// `class A {}` whose class node carries `shape`.
fn empty_class(shape: ClassShape<lst_build::TypeHandle>) -> ResolvedAst {
    let mut fx = Fixture::new(EMPTY_CLASS);
    let class_kw = fx.tok("class");
    let name = fx.ident("A");
    fx.tok("{");
    let close = fx.tok("}");
    let class = fx.node(
        AstKind::ClassDecl(ClassKind::Class),
        class_kw,
        close,
        &[(Role::Name, name)],
    );
    fx.unit(&[class]);
    let ty = fx.types().add(TypeShape::Class(shape));
    fx.ast.set_type(class, ty);
    fx.ast
}

/// `class B { ??? }` where the front end gave up on the member.
fn broken_class() -> ResolvedAst {
    let mut fx = Fixture::new("class B { ??? }\n");
    let class_kw = fx.tok("class");
    let name = fx.ident("B");
    fx.tok("{");
    let member = fx.leaf(AstKind::Erroneous, "???");
    let close = fx.tok("}");
    let class = fx.node(
        AstKind::ClassDecl(ClassKind::Class),
        class_kw,
        close,
        &[(Role::Name, name), (Role::Member, member)],
    );
    fx.unit(&[class]);
    fx.ast
}

fn class_type(file: &ParsedFile) -> TypeId {
    let NodeKind::SourceFile(unit) = &file.tree.kind else {
        panic!("{} is not a source file", file.path.display());
    };
    unit.items[0].element.ty.unwrap()
}

#[test]
fn unmappable_file_does_not_affect_its_neighbours() {
    let _guard = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("lst_build=debug"))
        .finish()
        .set_default();

    let inputs = vec![
        FileInput::new("A.java", EMPTY_CLASS, empty_class(ClassShape::named("A", ClassKind::Class))),
        FileInput::new("B.java", "class B { ??? }\n", broken_class()),
    ];
    let batch = build_batch(&inputs, &BuildConfig::default()).unwrap();

    let good = batch.file(Path::new("A.java")).unwrap();
    assert!(!good.is_unparsed());
    assert!(!good.has_errors());
    assert_eq!(print(&good.tree), EMPTY_CLASS);

    let bad = batch.file(Path::new("B.java")).unwrap();
    assert!(bad.is_unparsed());
    assert!(bad.has_errors());
    assert_eq!(print(&bad.tree), "class B { ??? }\n");
    assert_eq!(bad.diagnostics.len(), 1);
    // The file is one node, but the diagnostic points at the member.
    assert_eq!(bad.diagnostics[0].span, Span::new(10, 13));
    assert!(bad.diagnostics[0].message.contains("unsupported"));
}

#[test]
fn relaxed_matching_compares_signatures_only() {
    let plain = ClassShape::named("p.A", ClassKind::Class);
    let mut sealed = ClassShape::named("p.A", ClassKind::Class);
    sealed.flags = Flags::FINAL;

    let first = |relaxed: bool| {
        let inputs = vec![FileInput::new("A.java", EMPTY_CLASS, empty_class(plain.clone()))];
        build_batch(&inputs, &BuildConfig::default().with_relaxed_type_matching(relaxed)).unwrap()
    };
    let second = build_batch(
        &[FileInput::new("A.java", EMPTY_CLASS, empty_class(sealed))],
        &BuildConfig::default(),
    )
    .unwrap();
    let b = class_type(&second.files[0]);

    let strict = first(false);
    let a = class_type(&strict.files[0]);
    assert!(strict.same_type(a, &strict, a));
    assert!(!strict.same_type(a, &second, b));

    let relaxed = first(true);
    let a = class_type(&relaxed.files[0]);
    assert!(relaxed.same_type(a, &second, b));
}
