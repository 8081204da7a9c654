//! Output Emitter
//!
//! Abstraction for output production during printing.
//! Supports string building for in-memory printing.

use lst_ir::Space;

/// Trait for emitting printed output.
///
/// The printer writes to an emitter as it walks the tree. Different
/// implementations support in-memory strings or other destinations.
pub trait Emitter {
    /// Emit a text fragment.
    fn emit(&mut self, text: &str);

    /// Emit a space exactly as it was read: whitespace, then each comment
    /// followed by its suffix.
    fn emit_space(&mut self, space: &Space) {
        self.emit(&space.whitespace);
        for comment in &space.comments {
            self.emit(&comment.text);
            self.emit(&comment.suffix);
        }
    }
}

/// String-based emitter for in-memory printing.
#[derive(Default)]
pub struct StringEmitter {
    buffer: String,
}

impl StringEmitter {
    /// Create a new string emitter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: String::with_capacity(capacity),
        }
    }

    /// Get the current buffer contents without consuming.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Get the printed output.
    pub fn output(self) -> String {
        self.buffer
    }
}

impl Emitter for StringEmitter {
    fn emit(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn emit_space(&mut self, space: &Space) {
        space.write_to(&mut self.buffer);
    }
}
