//! Type signatures: the identity of a type within a batch.
//!
//! | Shape | Signature |
//! |-------|-----------|
//! | class | `java.util.List` |
//! | parameterized | `java.util.List<java.lang.String>` |
//! | array | `int[]` |
//! | type variable | `Generic{T}`, `Generic{T extends A & B}` |
//! | wildcard | `Generic{?}`, `Generic{? extends X}`, `Generic{? super X}` |
//! | intersection | `A & B` |
//! | method | `Owner{name=m,return=R,parameters=[P,Q]}` |
//! | variable | `Owner{name=x,type=T}` |
//! | unknown | `{undefined}` |
//!
//! A type variable reached again while its own bounds are being written is
//! written as `Generic{T}`, which is what keeps `T extends Comparable<T>`
//! finite.

use lst_ir::stack::ensure_sufficient_stack;
use lst_ir::token::WildcardBound;

use crate::arena::{primitive_signature, UNKNOWN_SIGNATURE};
use crate::{TypeShape, TypeSource};

/// Computes signatures from front-end shapes without touching the arena.
pub struct SignatureBuilder<'a, S: TypeSource> {
    source: &'a S,
    top_type: &'a str,
    var_stack: Vec<String>,
}

impl<'a, S: TypeSource> SignatureBuilder<'a, S> {
    pub fn new(source: &'a S, top_type: &'a str) -> Self {
        Self::with_stack(source, top_type, Vec::new())
    }

    /// Builder that treats `var_stack` names as already being expanded.
    pub(crate) fn with_stack(source: &'a S, top_type: &'a str, var_stack: Vec<String>) -> Self {
        SignatureBuilder {
            source,
            top_type,
            var_stack,
        }
    }

    pub fn signature(&mut self, ty: &S::Type) -> String {
        ensure_sufficient_stack(|| match self.source.shape(ty) {
            TypeShape::Primitive(kind) => primitive_signature(kind).to_owned(),
            TypeShape::Class(class) => class.fq_name,
            TypeShape::Parameterized { base, args } => {
                format!("{}<{}>", self.signature(&base), self.join(&args, ","))
            }
            TypeShape::Array { element } => format!("{}[]", self.signature(&element)),
            TypeShape::TypeVariable { name, bounds } => self.type_variable(name, &bounds),
            TypeShape::Wildcard { bound } => self.wildcard(bound.as_ref()),
            TypeShape::Intersection { members } => self.join(&members, " & "),
            TypeShape::Method(method) => format!(
                "{}{{name={},return={},parameters=[{}]}}",
                self.signature(&method.owner),
                method.name,
                self.signature(&method.return_type),
                self.join(&method.param_types, ","),
            ),
            TypeShape::Variable(var) => {
                let owner = match &var.owner {
                    Some(owner) => self.signature(owner),
                    None => UNKNOWN_SIGNATURE.to_owned(),
                };
                format!("{owner}{{name={},type={}}}", var.name, self.signature(&var.ty))
            }
            TypeShape::Unknown => UNKNOWN_SIGNATURE.to_owned(),
        })
    }

    fn type_variable(&mut self, name: String, bounds: &[S::Type]) -> String {
        if self.var_stack.contains(&name) {
            return format!("Generic{{{name}}}");
        }
        self.var_stack.push(name);
        let top_type = self.top_type;
        let bounds: Vec<String> = bounds
            .iter()
            .map(|bound| self.signature(bound))
            .filter(|sig| sig.as_str() != top_type)
            .collect();
        let name = self.var_stack.pop().unwrap_or_default();
        if bounds.is_empty() {
            format!("Generic{{{name}}}")
        } else {
            format!("Generic{{{name} extends {}}}", bounds.join(" & "))
        }
    }

    fn wildcard(&mut self, bound: Option<&(WildcardBound, S::Type)>) -> String {
        match bound {
            None => "Generic{?}".to_owned(),
            Some((WildcardBound::Extends, ty)) => {
                let bound = self.signature(ty);
                if bound == self.top_type {
                    "Generic{?}".to_owned()
                } else {
                    format!("Generic{{? extends {bound}}}")
                }
            }
            Some((WildcardBound::Super, ty)) => {
                format!("Generic{{? super {}}}", self.signature(ty))
            }
        }
    }

    fn join(&mut self, types: &[S::Type], separator: &str) -> String {
        types
            .iter()
            .map(|ty| self.signature(ty))
            .collect::<Vec<_>>()
            .join(separator)
    }
}

/// Fully qualified name of the class a type erases to, if it is a class.
pub fn erased_class_name<S: TypeSource>(source: &S, ty: &S::Type) -> Option<String> {
    match source.shape(ty) {
        TypeShape::Class(class) => Some(class.fq_name),
        TypeShape::Parameterized { base, .. } => erased_class_name(source, &base),
        _ => None,
    }
}
