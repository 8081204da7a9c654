//! Builder and batch errors.

use lst_ir::Span;
use lst_scan::NotFound;
use lst_types::InternError;

use crate::front_end::Role;

/// Why one file could not be mapped, and where.
///
/// Any of these turns the file into a single `Unparsed` node; the rest of
/// the batch is unaffected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{kind}")]
pub struct MappingError {
    /// Source range of the node that could not be mapped.
    pub span: Span,
    pub kind: MappingErrorKind,
}

impl MappingError {
    pub fn new(span: Span, kind: MappingErrorKind) -> Self {
        MappingError { span, kind }
    }

    /// The interner error behind this failure, if any.
    pub fn intern_error(&self) -> Option<&InternError> {
        match &self.kind {
            MappingErrorKind::Types(error) => Some(error),
            _ => None,
        }
    }
}

/// What went wrong while mapping a node.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MappingErrorKind {
    /// A required keyword or punctuation token was not in the source.
    #[error("delimiter {0}")]
    DelimiterNotFound(#[from] NotFound),

    /// The front end produced a construct the builder cannot map.
    #[error("unsupported {kind} at offset {offset}")]
    UnsupportedShape { kind: String, offset: u32 },

    /// A node lacked a child its kind requires.
    #[error("{parent} has no {role:?} child")]
    MissingChild { parent: String, role: Role },

    /// Source text inside a node's span that no rule consumed.
    #[error("unmapped text in {kind} between offsets {from} and {to}")]
    UnconsumedText { kind: String, from: u32, to: u32 },

    #[error(transparent)]
    Types(#[from] InternError),
}

/// Errors that abort a whole batch.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BatchError {
    #[error("type cache corrupted while mapping {path}: {source}")]
    CacheCorruption { path: String, source: InternError },
}
