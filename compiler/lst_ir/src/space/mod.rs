//! Whitespace and comments bound to tree values.
//!
//! A [`Space`] is the run of non-semantic text in front of a token: leading
//! whitespace, then zero or more comments, each followed by its own trailing
//! whitespace. Printing a space writes exactly the text it was parsed from.

use std::fmt;

/// Comment delimiters recognized when splitting a trivia run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CommentSyntax {
    /// Opens a comment that runs to the end of the line.
    pub line: &'static str,
    /// Opens a block comment.
    pub block_open: &'static str,
    /// Closes a block comment.
    pub block_close: &'static str,
}

impl CommentSyntax {
    /// `//` line comments and `/* */` block comments.
    pub const C_FAMILY: CommentSyntax = CommentSyntax {
        line: "//",
        block_open: "/*",
        block_close: "*/",
    };
}

impl Default for CommentSyntax {
    fn default() -> Self {
        Self::C_FAMILY
    }
}

/// One comment inside a [`Space`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Comment {
    /// Full comment text including its delimiters.
    pub text: String,
    pub is_block: bool,
    /// Whitespace between the end of this comment and the next comment or token.
    pub suffix: String,
}

impl Comment {
    pub fn line(text: impl Into<String>, suffix: impl Into<String>) -> Self {
        Comment {
            text: text.into(),
            is_block: false,
            suffix: suffix.into(),
        }
    }

    pub fn block(text: impl Into<String>, suffix: impl Into<String>) -> Self {
        Comment {
            text: text.into(),
            is_block: true,
            suffix: suffix.into(),
        }
    }
}

/// Whitespace followed by comments, in encounter order.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Space {
    /// Whitespace before the first comment (or the whole run if there are none).
    pub whitespace: String,
    pub comments: Vec<Comment>,
}

impl Space {
    /// The empty space.
    pub const EMPTY: Space = Space {
        whitespace: String::new(),
        comments: Vec::new(),
    };

    /// A space holding only whitespace.
    pub fn whitespace(text: impl Into<String>) -> Self {
        Space {
            whitespace: text.into(),
            comments: Vec::new(),
        }
    }

    /// A single ASCII space.
    pub fn single() -> Self {
        Space::whitespace(" ")
    }

    /// Split a trivia run into whitespace and comments.
    ///
    /// Text that is neither whitespace nor part of a comment is kept verbatim in
    /// the surrounding whitespace bucket, so `parse(text).to_string() == text`
    /// holds for any input.
    pub fn parse(text: &str, syntax: CommentSyntax) -> Self {
        if text.is_empty() {
            return Space::EMPTY;
        }

        let mut space = Space::default();
        let mut pos = 0;
        let mut plain_start = 0;

        while pos < text.len() {
            let rest = &text[pos..];
            let comment_len = if rest.starts_with(syntax.line) {
                Some((rest.find('\n').unwrap_or(rest.len()), false))
            } else if rest.starts_with(syntax.block_open) {
                let body = syntax.block_open.len();
                let len = rest[body..]
                    .find(syntax.block_close)
                    .map_or(rest.len(), |close| body + close + syntax.block_close.len());
                Some((len, true))
            } else {
                None
            };

            match comment_len {
                Some((len, is_block)) => {
                    space.push_plain(&text[plain_start..pos]);
                    space.comments.push(Comment {
                        text: rest[..len].to_owned(),
                        is_block,
                        suffix: String::new(),
                    });
                    pos += len;
                    plain_start = pos;
                }
                None => {
                    pos += rest.chars().next().map_or(1, char::len_utf8);
                }
            }
        }
        space.push_plain(&text[plain_start..]);
        space
    }

    /// Append non-comment text to whichever bucket is currently open.
    fn push_plain(&mut self, text: &str) {
        match self.comments.last_mut() {
            Some(last) => last.suffix.push_str(text),
            None => self.whitespace.push_str(text),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.whitespace.is_empty() && self.comments.is_empty()
    }

    pub fn has_comments(&self) -> bool {
        !self.comments.is_empty()
    }

    /// Byte length of the printed space.
    pub fn len(&self) -> usize {
        self.whitespace.len()
            + self
                .comments
                .iter()
                .map(|c| c.text.len() + c.suffix.len())
                .sum::<usize>()
    }

    /// Append the exact text of this space to `out`.
    pub fn write_to(&self, out: &mut String) {
        out.push_str(&self.whitespace);
        for comment in &self.comments {
            out.push_str(&comment.text);
            out.push_str(&comment.suffix);
        }
    }

    /// Whitespace that follows the last comment, or the leading whitespace
    /// when there are no comments. This is what precedes the next token.
    pub fn indent(&self) -> &str {
        let last = match self.comments.last() {
            Some(comment) => comment.suffix.as_str(),
            None => self.whitespace.as_str(),
        };
        last.rsplit('\n').next().unwrap_or(last)
    }
}

impl fmt::Display for Space {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.whitespace)?;
        for comment in &self.comments {
            f.write_str(&comment.text)?;
            f.write_str(&comment.suffix)?;
        }
        Ok(())
    }
}
