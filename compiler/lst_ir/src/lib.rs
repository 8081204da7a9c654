//! Data model for the lossless semantic tree.
//!
//! Everything a tree is made of lives here so that the scanner, the type
//! interner, the builder and the printer agree on one vocabulary:
//!
//! - [`Span`]: byte ranges reported by the front end
//! - [`Space`] and [`Comment`]: the non-semantic text between tokens
//! - [`Marker`]: open set of facts attached to a node
//! - [`LeftPadded`], [`RightPadded`], [`Container`]: the padding model
//! - [`Node`] and [`NodeKind`]: the tree itself
//! - [`TypeId`]: handle into the batch type arena

mod marker;
mod node;
mod padding;
mod space;
mod span;
pub mod stack;
pub mod token;
mod type_id;
mod visit;

pub use marker::{Marker, Markers};
pub use node::{
    Annotation, Block, Case, ClassDecl, EnumValue, EnumValueSet, ForControl, ForEachControl, If,
    Import, MethodDecl, MethodInvocation, NamedVariable, NewArray, NewClass, Node, NodeId,
    NodeKind, SourceFile, Try, TypeParameter, VariableDecls,
};
pub use padding::{pad_left, pad_right, Container, LeftPadded, RightPadded};
pub use space::{Comment, CommentSyntax, Space};
pub use span::{Span, SpanError};
pub use type_id::TypeId;
