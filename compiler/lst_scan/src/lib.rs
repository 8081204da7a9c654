//! Leaf scanning over raw source text.
//!
//! The tree builder knows where every node starts and ends from the front
//! end's spans, but not where the keywords and punctuation between them are.
//! [`SourceCursor`] walks the text once, left to right, finding those tokens
//! and turning everything it skips over into [`Space`](lst_ir::Space).
//!
//! [`LineIndex`] maps byte offsets back to lines for diagnostics.

mod cursor;
mod line_index;

pub use cursor::{NotFound, SourceCursor, Stop};
pub use line_index::{LineCol, LineIndex};
