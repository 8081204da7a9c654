//! Lossless semantic tree construction.
//!
//! Combines a front end's resolved AST with the original source text into a
//! tree that keeps every byte of whitespace and every comment, and carries an
//! interned type on each attributed node.
//!
//! # Entry points
//!
//! - [`build_batch`]: build many files with one shared type cache
//! - [`TreeBuilder`]: build one file
//! - [`FrontEnd`]: what a compiler front end must expose
//! - [`ResolvedAst`]: ready-made [`FrontEnd`] for adapters and tests

mod batch;
mod builder;
mod config;
mod diagnostic;
mod error;
mod front_end;
mod resolved;

pub use batch::{build_batch, build_file, build_files, Batch, FileInput, ParsedFile};
pub use builder::TreeBuilder;
pub use config::BuildConfig;
pub use diagnostic::{Diagnostic, Severity};
pub use error::{BatchError, MappingError, MappingErrorKind};
pub use front_end::{AstKind, Child, FrontEnd, Role};
pub use resolved::{AstId, ResolvedAst, ResolvedTypes, TypeHandle};
