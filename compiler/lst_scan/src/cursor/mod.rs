//! Monotonic cursor over source text.
//!
//! The cursor only ever moves forward. Each scan either finds its delimiter
//! and yields the space in front of it plus a cursor positioned after it, or
//! reports [`NotFound`] and leaves the caller's cursor where it was. Comments
//! are skipped as a unit, so a delimiter inside a comment never matches.
//! String literals get no special treatment: by the time the builder scans
//! for punctuation, every literal in range has already been consumed through
//! its span.

use lst_ir::{CommentSyntax, Space, Span};

/// Where a scan gives up.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Stop {
    /// Scan to the delimiter or the end of the source.
    Never,
    /// Give up on reaching this character outside a comment.
    At(char),
    /// The delimiter must be the next token; any other token gives up.
    AnyToken,
}

/// A delimiter scan that did not find its delimiter.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("`{delimiter}` not found after offset {offset}")]
pub struct NotFound {
    pub delimiter: String,
    pub offset: u32,
}

/// Position in a source file plus the comment syntax used to read trivia.
#[derive(Copy, Clone, Debug)]
pub struct SourceCursor<'a> {
    source: &'a str,
    offset: u32,
    syntax: CommentSyntax,
}

impl<'a> SourceCursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self::with_syntax(source, CommentSyntax::default())
    }

    pub fn with_syntax(source: &'a str, syntax: CommentSyntax) -> Self {
        SourceCursor {
            source,
            offset: 0,
            syntax,
        }
    }

    #[inline]
    pub fn offset(&self) -> u32 {
        self.offset
    }

    #[inline]
    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn syntax(&self) -> CommentSyntax {
        self.syntax
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "sources over 4 GiB are rejected by the front end"
    )]
    fn source_len(&self) -> u32 {
        self.source.len() as u32
    }

    pub fn is_eof(&self) -> bool {
        self.offset >= self.source_len()
    }

    /// Text from the cursor to the end of the source.
    pub fn rest(&self) -> &'a str {
        self.source.get(self.offset as usize..).unwrap_or("")
    }

    /// Source text under `span`, clamped to the source.
    pub fn text(&self, span: Span) -> &'a str {
        let end = (span.end as usize).min(self.source.len());
        let start = (span.start as usize).min(end);
        self.source.get(start..end).unwrap_or("")
    }

    /// Move to `max(offset, target)`. Never moves backwards.
    pub fn advance_to(&mut self, target: u32) {
        self.offset = self.offset.max(target.min(self.source_len()));
    }

    /// Consume the text up to `offset` as a [`Space`].
    ///
    /// Returns the empty space without moving when `offset` is at or before
    /// the cursor.
    pub fn space_until(&mut self, offset: u32) -> Space {
        let end = offset.min(self.source_len());
        if end <= self.offset {
            return Space::EMPTY;
        }
        let Some(text) = self.source.get(self.offset as usize..end as usize) else {
            tracing::warn!(from = self.offset, to = end, "space boundary splits a character");
            return Space::EMPTY;
        };
        self.offset = end;
        Space::parse(text, self.syntax)
    }

    /// Find `delimiter` after the cursor.
    ///
    /// On success returns the space in front of the delimiter and a cursor
    /// positioned just past it. The receiver is never modified.
    pub fn scan_to(&self, delimiter: &str, stop: Stop) -> Result<(Space, SourceCursor<'a>), NotFound> {
        match self.position_of(delimiter, stop) {
            Some(pos) => {
                let skipped = self.source.get(self.offset as usize..pos).unwrap_or("");
                let space = Space::parse(skipped, self.syntax);
                let mut next = *self;
                next.offset = u32::try_from(pos + delimiter.len()).unwrap_or(u32::MAX);
                Ok((space, next))
            }
            None => {
                tracing::trace!(delimiter, offset = self.offset, ?stop, "delimiter not found");
                Err(NotFound {
                    delimiter: delimiter.to_owned(),
                    offset: self.offset,
                })
            }
        }
    }

    /// [`scan_to`](Self::scan_to), moving this cursor on success.
    pub fn consume(&mut self, delimiter: &str, stop: Stop) -> Result<Space, NotFound> {
        let (space, next) = self.scan_to(delimiter, stop)?;
        *self = next;
        Ok(space)
    }

    /// Consume `delimiter` only if it is the next token.
    pub fn consume_optional(&mut self, delimiter: &str) -> Option<Space> {
        self.consume(delimiter, Stop::AnyToken).ok()
    }

    /// Whether `delimiter` is the next token.
    pub fn peek_token(&self, delimiter: &str) -> bool {
        self.position_of(delimiter, Stop::AnyToken).is_some()
    }

    /// Consume whitespace and comments up to the next token.
    pub fn skip_trivia(&mut self) -> Space {
        let mut pos = self.offset as usize;
        while pos < self.source.len() {
            let rest = &self.source[pos..];
            if rest.starts_with(self.syntax.line) {
                pos += memchr::memchr(b'\n', rest.as_bytes()).unwrap_or(rest.len());
            } else if rest.starts_with(self.syntax.block_open) {
                let body = self.syntax.block_open.len();
                pos += rest[body..]
                    .find(self.syntax.block_close)
                    .map_or(rest.len(), |close| body + close + self.syntax.block_close.len());
            } else {
                match rest.chars().next() {
                    Some(ch) if ch.is_whitespace() => pos += ch.len_utf8(),
                    _ => break,
                }
            }
        }
        self.space_until(u32::try_from(pos).unwrap_or(u32::MAX))
    }

    /// Byte position of the next match of `delimiter` outside comments.
    fn position_of(&self, delimiter: &str, stop: Stop) -> Option<usize> {
        if delimiter.is_empty() {
            return None;
        }
        let bytes = self.source.as_bytes();
        let mut pos = self.offset as usize;

        while pos < self.source.len() {
            let rest = &self.source[pos..];
            if rest.starts_with(self.syntax.line) {
                pos += memchr::memchr(b'\n', rest.as_bytes()).unwrap_or(rest.len());
                continue;
            }
            if rest.starts_with(self.syntax.block_open) {
                let body = self.syntax.block_open.len();
                // An unterminated block comment swallows the rest of the source.
                let close = rest[body..].find(self.syntax.block_close)?;
                pos += body + close + self.syntax.block_close.len();
                continue;
            }
            if rest.starts_with(delimiter) && is_token_boundary(bytes, pos, delimiter) {
                return Some(pos);
            }

            let ch = rest.chars().next()?;
            if !ch.is_whitespace() {
                match stop {
                    Stop::AnyToken => return None,
                    Stop::At(stop_char) if ch == stop_char => return None,
                    Stop::At(_) | Stop::Never => {}
                }
            }
            pos += ch.len_utf8();
        }
        None
    }
}

/// A word delimiter (`class`, `extends`) must not be glued to an identifier.
fn is_token_boundary(bytes: &[u8], pos: usize, delimiter: &str) -> bool {
    let word = |b: u8| b.is_ascii_alphanumeric() || b == b'_' || b == b'$';
    let first = delimiter.as_bytes()[0];
    let last = delimiter.as_bytes()[delimiter.len() - 1];
    let before_ok = !word(first) || pos == 0 || !word(bytes[pos - 1]);
    let after = pos + delimiter.len();
    let after_ok = !word(last) || after >= bytes.len() || !word(bytes[after]);
    before_ok && after_ok
}
