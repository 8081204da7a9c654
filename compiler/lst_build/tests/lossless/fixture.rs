//! Builds [`ResolvedAst`] fixtures by locating tokens in the source text.
//!
//! Tokens are found left to right, so a fixture reads in source order: each
//! lookup starts where the previous one ended.

use lst_build::{AstId, AstKind, FrontEnd, MappingError, ResolvedAst, ResolvedTypes, Role, TreeBuilder};
use lst_ir::{Node, Span};
use lst_types::SharedTypeCache;

pub struct Fixture {
    pub source: &'static str,
    pub ast: ResolvedAst,
    cursor: usize,
}

impl Fixture {
    pub fn new(source: &'static str) -> Self {
        Fixture {
            source,
            ast: ResolvedAst::new(),
            cursor: 0,
        }
    }

    /// Span of the next whole-token occurrence of `token`.
    pub fn tok(&mut self, token: &str) -> Span {
        let word = |b: u8| b.is_ascii_alphanumeric() || b == b'_';
        let bytes = self.source.as_bytes();
        let mut from = self.cursor;
        loop {
            let start = from
                + self.source[from..]
                    .find(token)
                    .unwrap_or_else(|| panic!("`{token}` not found after offset {from}"));
            let end = start + token.len();
            let glued_before = word(token.as_bytes()[0]) && start > 0 && word(bytes[start - 1]);
            let glued_after =
                word(token.as_bytes()[token.len() - 1]) && end < bytes.len() && word(bytes[end]);
            if !glued_before && !glued_after {
                self.cursor = end;
                return Span::try_from_range(start..end).unwrap();
            }
            from = start + 1;
        }
    }

    /// A childless node over the next `token`.
    pub fn leaf(&mut self, kind: AstKind, token: &str) -> AstId {
        let span = self.tok(token);
        self.ast.add(kind, span)
    }

    pub fn ident(&mut self, name: &str) -> AstId {
        self.leaf(AstKind::Identifier, name)
    }

    pub fn span(&self, id: AstId) -> Span {
        self.ast.span(id)
    }

    /// A node reaching from the start of `first` to the end of `last`.
    pub fn node(
        &mut self,
        kind: AstKind,
        first: Span,
        last: Span,
        children: &[(Role, AstId)],
    ) -> AstId {
        self.ast.add_node(kind, Span::new(first.start, last.end), children)
    }

    /// A compiler-generated node with no text, placed at `offset`.
    pub fn synthetic(&mut self, kind: AstKind, offset: u32) -> AstId {
        let id = self.ast.add(kind, Span::point(offset));
        self.ast.mark_synthetic(id);
        id
    }

    /// The compilation unit over the whole source, made the root.
    pub fn unit(&mut self, items: &[AstId]) -> AstId {
        let end = u32::try_from(self.source.len()).unwrap();
        let children: Vec<_> = items.iter().map(|&item| (Role::Item, item)).collect();
        let unit = self
            .ast
            .add_node(AstKind::CompilationUnit, Span::new(0, end), &children);
        self.ast.set_root(unit);
        unit
    }

    pub fn types(&mut self) -> &mut ResolvedTypes {
        self.ast.types_mut()
    }

    pub fn build(&self, cache: &SharedTypeCache) -> Result<Node, MappingError> {
        TreeBuilder::new(&self.ast, self.source, cache).build()
    }
}
