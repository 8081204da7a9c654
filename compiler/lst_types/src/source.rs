//! What the interner needs to know about a front end's types.
//!
//! The front end keeps its own representation of types; the interner only
//! asks for the shape of one type at a time. Shapes refer to nested types by
//! the front end's own handle, so no graph is ever materialized outside the
//! arena.

use lst_ir::token::{ClassKind, PrimitiveKind, WildcardBound};

use crate::Flags;

/// Access to front-end types by handle.
pub trait TypeSource {
    /// Front-end handle for one type.
    type Type: Clone;

    /// Describe `ty` one level deep.
    fn shape(&self, ty: &Self::Type) -> TypeShape<Self::Type>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassShape<T> {
    pub fq_name: String,
    pub kind: ClassKind,
    pub flags: Flags,
    pub type_params: Vec<T>,
    pub supertype: Option<T>,
    pub interfaces: Vec<T>,
    /// Variable shapes owned by the class.
    pub fields: Vec<T>,
    /// Method shapes owned by the class.
    pub methods: Vec<T>,
    pub annotations: Vec<T>,
}

impl<T> ClassShape<T> {
    /// A class with no members.
    pub fn named(fq_name: impl Into<String>, kind: ClassKind) -> Self {
        ClassShape {
            fq_name: fq_name.into(),
            kind,
            flags: Flags::empty(),
            type_params: Vec::new(),
            supertype: None,
            interfaces: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            annotations: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodShape<T> {
    pub owner: T,
    pub name: String,
    pub flags: Flags,
    pub return_type: T,
    pub param_types: Vec<T>,
    pub thrown: Vec<T>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariableShape<T> {
    pub owner: Option<T>,
    pub name: String,
    pub flags: Flags,
    pub ty: T,
}

/// One level of a front-end type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeShape<T> {
    Primitive(PrimitiveKind),
    Class(ClassShape<T>),
    Parameterized { base: T, args: Vec<T> },
    Array { element: T },
    /// A named type variable with its declared bounds.
    TypeVariable { name: String, bounds: Vec<T> },
    /// `?`, `? extends X` or `? super X`.
    Wildcard { bound: Option<(WildcardBound, T)> },
    Intersection { members: Vec<T> },
    Method(MethodShape<T>),
    Variable(VariableShape<T>),
    /// The front end could not attribute this type.
    Unknown,
}
