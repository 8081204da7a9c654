//! Arena entries.
//!
//! Types refer to each other by [`TypeId`], never by pointer, so a class
//! whose members mention the class itself is an ordinary entry: its id is
//! handed out by [`TypeArena::reserve`](crate::TypeArena::reserve) before
//! the members are resolved.

use std::fmt;

use lst_ir::token::{ClassKind, PrimitiveKind};
use lst_ir::TypeId;

use crate::{ClassShape, Flags};

/// How a generic variable relates to its bounds.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Variance {
    /// A named type variable or an unbounded wildcard.
    Invariant,
    /// `? extends X`
    Covariant,
    /// `? super X`
    Contravariant,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassType {
    pub fq_name: String,
    pub kind: ClassKind,
    pub flags: Flags,
    pub type_params: Vec<TypeId>,
    pub supertype: Option<TypeId>,
    pub interfaces: Vec<TypeId>,
    pub fields: Vec<TypeId>,
    pub methods: Vec<TypeId>,
    pub annotations: Vec<TypeId>,
    /// False while the class is reserved but its members are still being resolved.
    pub complete: bool,
}

impl ClassType {
    /// Entry allocated before the members are known.
    pub fn placeholder(fq_name: impl Into<String>, kind: ClassKind, flags: Flags) -> Self {
        ClassType {
            fq_name: fq_name.into(),
            kind,
            flags,
            type_params: Vec::new(),
            supertype: None,
            interfaces: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            annotations: Vec::new(),
            complete: false,
        }
    }

    /// Unqualified name: the part after the last `.` or `$`.
    pub fn simple_name(&self) -> &str {
        simple_name(&self.fq_name)
    }

    /// The first part of `shape` that disagrees with this entry, compared by
    /// kind, flags and member counts.
    pub fn mismatch<T>(&self, shape: &ClassShape<T>) -> Option<&'static str> {
        let parts = [
            ("kind", self.kind == shape.kind),
            ("flags", self.flags == shape.flags),
            ("type parameters", self.type_params.len() == shape.type_params.len()),
            ("supertype", self.supertype.is_some() == shape.supertype.is_some()),
            ("interfaces", self.interfaces.len() == shape.interfaces.len()),
            ("fields", self.fields.len() == shape.fields.len()),
            ("methods", self.methods.len() == shape.methods.len()),
            ("annotations", self.annotations.len() == shape.annotations.len()),
        ];
        parts.into_iter().find(|&(_, same)| !same).map(|(part, _)| part)
    }
}

pub(crate) fn simple_name(fq_name: &str) -> &str {
    fq_name.rsplit(['.', '$']).next().unwrap_or(fq_name)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodType {
    pub owner: TypeId,
    pub name: String,
    pub flags: Flags,
    pub return_type: TypeId,
    pub param_types: Vec<TypeId>,
    pub thrown: Vec<TypeId>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariableType {
    /// Declaring class or method; absent for locals the front end did not attribute.
    pub owner: Option<TypeId>,
    pub name: String,
    pub flags: Flags,
    pub ty: TypeId,
}

/// One entry in the type arena.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeRef {
    Primitive(PrimitiveKind),
    Class(ClassType),
    Parameterized { base: TypeId, args: Vec<TypeId> },
    Array { element: TypeId },
    GenericVariable {
        name: String,
        variance: Variance,
        bounds: Vec<TypeId>,
    },
    Intersection { members: Vec<TypeId> },
    Method(MethodType),
    Variable(VariableType),
    Unknown,
    /// Back-reference to a type that was being expanded when it was reached again.
    Cyclic { signature: String },
}

impl TypeRef {
    pub fn kind(&self) -> TypeKind {
        match self {
            TypeRef::Primitive(_) => TypeKind::Primitive,
            TypeRef::Class(_) => TypeKind::Class,
            TypeRef::Parameterized { .. } => TypeKind::Parameterized,
            TypeRef::Array { .. } => TypeKind::Array,
            TypeRef::GenericVariable { .. } => TypeKind::GenericVariable,
            TypeRef::Intersection { .. } => TypeKind::Intersection,
            TypeRef::Method(_) => TypeKind::Method,
            TypeRef::Variable(_) => TypeKind::Variable,
            TypeRef::Unknown => TypeKind::Unknown,
            TypeRef::Cyclic { .. } => TypeKind::Cyclic,
        }
    }

    pub fn as_class(&self) -> Option<&ClassType> {
        match self {
            TypeRef::Class(class) => Some(class),
            _ => None,
        }
    }
}

/// Structural kind of a [`TypeRef`], compared when a signature is re-interned.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeKind {
    Primitive,
    Class,
    Parameterized,
    Array,
    GenericVariable,
    Intersection,
    Method,
    Variable,
    Unknown,
    Cyclic,
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
