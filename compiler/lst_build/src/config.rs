//! Batch build configuration.

use lst_ir::CommentSyntax;
use lst_types::{InternConfig, TypeMatcher, DEFAULT_TOP_TYPE};

/// Options for building a batch of trees.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildConfig {
    /// Compare types by signature only instead of by structure.
    pub relaxed_type_matching: bool,

    /// Map files on the rayon pool. Off means one file after another.
    pub parallel: bool,

    /// Fully qualified name of the top type. `? extends <top>` is written `?`.
    pub top_type: String,

    /// Comment delimiters of the source language.
    pub comment_syntax: CommentSyntax,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            relaxed_type_matching: false,
            parallel: true,
            top_type: DEFAULT_TOP_TYPE.to_owned(),
            comment_syntax: CommentSyntax::default(),
        }
    }
}

impl BuildConfig {
    #[must_use]
    pub fn with_relaxed_type_matching(mut self, relaxed: bool) -> Self {
        self.relaxed_type_matching = relaxed;
        self
    }

    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    #[must_use]
    pub fn with_top_type(mut self, top_type: impl Into<String>) -> Self {
        self.top_type = top_type.into();
        self
    }

    #[must_use]
    pub fn with_comment_syntax(mut self, syntax: CommentSyntax) -> Self {
        self.comment_syntax = syntax;
        self
    }

    pub fn intern_config(&self) -> InternConfig {
        InternConfig::default().with_top_type(self.top_type.clone())
    }

    pub fn type_matcher(&self) -> TypeMatcher {
        TypeMatcher::new(self.relaxed_type_matching)
    }
}
