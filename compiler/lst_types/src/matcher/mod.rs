//! Type equality across arenas.
//!
//! Ids are only comparable within one arena. Tools that hold trees from
//! different batches compare types through a [`TypeMatcher`] instead.

use lst_ir::TypeId;
use rustc_hash::FxHashSet;

use crate::{TypeArena, TypeRef};

/// Compares types that may live in different arenas.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TypeMatcher {
    /// Compare signatures only, ignoring members and bounds.
    pub relaxed: bool,
}

impl TypeMatcher {
    pub const STRICT: TypeMatcher = TypeMatcher { relaxed: false };
    pub const RELAXED: TypeMatcher = TypeMatcher { relaxed: true };

    pub fn new(relaxed: bool) -> Self {
        TypeMatcher { relaxed }
    }

    /// Whether `a` in `left` and `b` in `right` denote the same type.
    pub fn matches(&self, left: &TypeArena, a: TypeId, right: &TypeArena, b: TypeId) -> bool {
        if self.relaxed {
            return left.signature(a) == right.signature(b);
        }
        Structural {
            left,
            right,
            assumed: FxHashSet::default(),
        }
        .equal(a, b)
    }
}

/// Co-inductive structural comparison: a pair already under comparison is
/// assumed equal, so recursive types terminate.
struct Structural<'a> {
    left: &'a TypeArena,
    right: &'a TypeArena,
    assumed: FxHashSet<(TypeId, TypeId)>,
}

impl Structural<'_> {
    fn equal(&mut self, a: TypeId, b: TypeId) -> bool {
        let a = self.left.follow_cyclic(a);
        let b = self.right.follow_cyclic(b);
        if !self.assumed.insert((a, b)) {
            return true;
        }
        lst_ir::stack::ensure_sufficient_stack(|| self.equal_entries(a, b))
    }

    fn equal_entries(&mut self, a: TypeId, b: TypeId) -> bool {
        let (left, right) = (self.left, self.right);
        match (left.get(a), right.get(b)) {
            (TypeRef::Primitive(x), TypeRef::Primitive(y)) => x == y,
            (TypeRef::Class(x), TypeRef::Class(y)) => {
                x.fq_name == y.fq_name
                    && x.kind == y.kind
                    && x.flags == y.flags
                    && self.equal_opt(x.supertype, y.supertype)
                    && self.equal_all(&x.type_params, &y.type_params)
                    && self.equal_all(&x.interfaces, &y.interfaces)
                    && self.equal_all(&x.annotations, &y.annotations)
                    && self.equal_all(&x.fields, &y.fields)
                    && self.equal_all(&x.methods, &y.methods)
            }
            (
                TypeRef::Parameterized { base: xb, args: xa },
                TypeRef::Parameterized { base: yb, args: ya },
            ) => self.equal(*xb, *yb) && self.equal_all(xa, ya),
            (TypeRef::Array { element: x }, TypeRef::Array { element: y }) => self.equal(*x, *y),
            (
                TypeRef::GenericVariable {
                    name: xn,
                    variance: xv,
                    bounds: xb,
                },
                TypeRef::GenericVariable {
                    name: yn,
                    variance: yv,
                    bounds: yb,
                },
            ) => xn == yn && xv == yv && self.equal_all(xb, yb),
            (TypeRef::Intersection { members: x }, TypeRef::Intersection { members: y }) => {
                self.equal_all(x, y)
            }
            (TypeRef::Method(x), TypeRef::Method(y)) => {
                x.name == y.name
                    && x.flags == y.flags
                    && self.equal(x.owner, y.owner)
                    && self.equal(x.return_type, y.return_type)
                    && self.equal_all(&x.param_types, &y.param_types)
                    && self.equal_all(&x.thrown, &y.thrown)
            }
            (TypeRef::Variable(x), TypeRef::Variable(y)) => {
                x.name == y.name
                    && x.flags == y.flags
                    && self.equal_opt(x.owner, y.owner)
                    && self.equal(x.ty, y.ty)
            }
            (TypeRef::Unknown, TypeRef::Unknown) => true,
            // Only reached when the target was never interned.
            (TypeRef::Cyclic { signature: x }, TypeRef::Cyclic { signature: y }) => x == y,
            _ => false,
        }
    }

    fn equal_opt(&mut self, a: Option<TypeId>, b: Option<TypeId>) -> bool {
        match (a, b) {
            (Some(a), Some(b)) => self.equal(a, b),
            (None, None) => true,
            _ => false,
        }
    }

    fn equal_all(&mut self, a: &[TypeId], b: &[TypeId]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| self.equal(*x, *y))
    }
}
