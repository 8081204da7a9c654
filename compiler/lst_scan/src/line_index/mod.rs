//! Byte offset to line/column lookup.

use std::fmt;

/// 1-based line and column. Columns count characters, not bytes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct LineCol {
    pub line: u32,
    pub column: u32,
}

impl fmt::Display for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Start offset of every line in a source, for O(log L) lookups.
#[derive(Clone, Debug, Default)]
pub struct LineIndex {
    /// `starts[0] == 0`; `starts[i]` is the byte after the i-th newline.
    starts: Vec<u32>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut starts = vec![0u32];
        starts.extend(
            memchr::memchr_iter(b'\n', source.as_bytes())
                .map(|i| u32::try_from(i + 1).unwrap_or(u32::MAX)),
        );
        LineIndex { starts }
    }

    /// 1-based line containing `offset`.
    pub fn line(&self, offset: u32) -> u32 {
        let idx = match self.starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        u32::try_from(idx).unwrap_or(u32::MAX - 1) + 1
    }

    pub fn line_col(&self, source: &str, offset: u32) -> LineCol {
        let line = self.line(offset);
        let start = self.starts.get((line - 1) as usize).copied().unwrap_or(0) as usize;
        let end = (offset as usize).min(source.len());
        let column = source
            .get(start..end)
            .map_or(0, |text| text.chars().count());
        LineCol {
            line,
            column: u32::try_from(column).unwrap_or(u32::MAX - 1) + 1,
        }
    }

    pub fn line_count(&self) -> usize {
        self.starts.len()
    }
}
