//! Printing lossless semantic trees.
//!
//! The printer is the inverse of the builder: it writes every prefix and
//! padding space verbatim and derives keywords, operators and punctuation from
//! node kinds. Printing a freshly built tree reproduces its source exactly;
//! printing an edited tree changes only the text of the edited nodes.

mod emitter;
mod printer;

pub use emitter::{Emitter, StringEmitter};
pub use printer::{print, print_to, Printer};
