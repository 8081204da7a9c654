//! Building a batch of files against one shared type cache.
//!
//! Files are independent: each gets its own builder and cursor, and only the
//! type cache is shared. A file that cannot be mapped becomes a single
//! `Unparsed` node with an error diagnostic; the rest of the batch is not
//! affected. A corrupted type cache is the one failure that stops the batch.

use std::path::{Path, PathBuf};

use lst_ir::{Node, NodeKind, Space, TypeId};
use lst_types::{InternError, SharedTypeCache, TypeMatcher};
use rayon::prelude::*;

use crate::{BatchError, BuildConfig, Diagnostic, FrontEnd, MappingError, TreeBuilder};

/// One source file and the front end that parsed it.
#[derive(Clone, Debug)]
pub struct FileInput<F> {
    pub path: PathBuf,
    pub source: String,
    /// Name of the encoding the source was decoded from, kept for writing back.
    pub charset: String,
    pub front_end: F,
}

impl<F> FileInput<F> {
    pub fn new(path: impl Into<PathBuf>, source: impl Into<String>, front_end: F) -> Self {
        FileInput {
            path: path.into(),
            source: source.into(),
            charset: "UTF-8".to_owned(),
            front_end,
        }
    }

    #[must_use]
    pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = charset.into();
        self
    }
}

/// Result of building one file.
#[derive(Clone, Debug)]
pub struct ParsedFile {
    pub path: PathBuf,
    pub charset: String,
    pub tree: Node,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParsedFile {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// Whether the file fell back to a single `Unparsed` node.
    pub fn is_unparsed(&self) -> bool {
        matches!(self.tree.kind, NodeKind::Unparsed { .. })
    }
}

/// The trees of a batch and the type cache they share.
#[derive(Debug)]
pub struct Batch {
    pub files: Vec<ParsedFile>,
    pub types: SharedTypeCache,
    matcher: TypeMatcher,
}

impl Batch {
    pub fn file(&self, path: &Path) -> Option<&ParsedFile> {
        self.files.iter().find(|f| f.path == path)
    }

    /// Whether `a` from this batch and `b` from `other` are the same type,
    /// by this batch's matching mode.
    pub fn same_type(&self, a: TypeId, other: &Batch, b: TypeId) -> bool {
        let left = self.types.read();
        if std::ptr::eq(self, other) {
            return self.matcher.matches(&left, a, &left, b);
        }
        let right = other.types.read();
        self.matcher.matches(&left, a, &right, b)
    }

    pub fn format_type(&self, id: TypeId) -> String {
        self.types.format_type(id)
    }
}

/// Build every file in `inputs` with a fresh type cache.
#[tracing::instrument(level = "debug", skip_all, fields(files = inputs.len()))]
pub fn build_batch<F>(inputs: &[FileInput<F>], config: &BuildConfig) -> Result<Batch, BatchError>
where
    F: FrontEnd + Sync,
{
    let types = SharedTypeCache::new(config.intern_config());
    let files = build_files(inputs, &types, config)?;
    tracing::debug!(types = types.len(), "batch built");
    Ok(Batch {
        files,
        types,
        matcher: config.type_matcher(),
    })
}

/// Build every file in `inputs` against an existing cache.
pub fn build_files<F>(
    inputs: &[FileInput<F>],
    types: &SharedTypeCache,
    config: &BuildConfig,
) -> Result<Vec<ParsedFile>, BatchError>
where
    F: FrontEnd + Sync,
{
    let build = |input: &FileInput<F>| build_file(input, types, config);
    if inputs.len() <= 1 || !config.parallel {
        inputs.iter().map(build).collect()
    } else {
        inputs.par_iter().map(build).collect()
    }
}

/// Build one file. Mapping failures are contained in the returned file.
#[tracing::instrument(level = "debug", skip_all, fields(path = %input.path.display()))]
pub fn build_file<F: FrontEnd>(
    input: &FileInput<F>,
    types: &SharedTypeCache,
    config: &BuildConfig,
) -> Result<ParsedFile, BatchError> {
    let builder =
        TreeBuilder::with_syntax(&input.front_end, &input.source, types, config.comment_syntax);
    let (tree, diagnostics) = match builder.build() {
        Ok(tree) => (tree, Vec::new()),
        Err(error) => {
            if let Some(source @ InternError::SignatureCollision { .. }) = error.intern_error() {
                tracing::error!(%source, "type cache corrupted");
                return Err(BatchError::CacheCorruption {
                    path: input.path.display().to_string(),
                    source: source.clone(),
                });
            }
            tracing::warn!(%error, span = %error.span, "file left unparsed");
            unparsed(&input.source, &error)
        }
    };
    Ok(ParsedFile {
        path: input.path.clone(),
        charset: input.charset.clone(),
        tree,
        diagnostics,
    })
}

/// The whole file as one `Unparsed` node, with a diagnostic at the node
/// that could not be mapped.
fn unparsed(source: &str, error: &MappingError) -> (Node, Vec<Diagnostic>) {
    let tree = Node::new(
        Space::EMPTY,
        NodeKind::Unparsed {
            text: source.to_owned(),
        },
    );
    (tree, vec![Diagnostic::error(error.span, error.to_string())])
}
