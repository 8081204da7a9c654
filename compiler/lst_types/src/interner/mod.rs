//! Resolution of front-end types into the arena.
//!
//! Every type is looked up by signature before anything is allocated. A
//! class is reserved under its name before its members are resolved, so a
//! member that mentions the class finds the reserved id instead of recursing.
//! Two stacks handle what reservation alone cannot:
//!
//! - the names of type variables whose bounds are being resolved: meeting
//!   one again yields `Cyclic{Generic{T}}`;
//! - the classes being expanded: a type-variable bound that erases to one of
//!   them yields `Cyclic{<class signature>}`.

use lst_ir::stack::ensure_sufficient_stack;
use lst_ir::token::WildcardBound;
use lst_ir::TypeId;

use crate::signature::{erased_class_name, SignatureBuilder};
use crate::{
    ClassShape, ClassType, InternError, MethodType, TypeArena, TypeKind, TypeRef, TypeShape,
    TypeSource, VariableType, Variance,
};

/// Structural kind an entry for `shape` will have.
pub fn shape_kind<T>(shape: &TypeShape<T>) -> TypeKind {
    match shape {
        TypeShape::Primitive(_) => TypeKind::Primitive,
        TypeShape::Class(_) => TypeKind::Class,
        TypeShape::Parameterized { .. } => TypeKind::Parameterized,
        TypeShape::Array { .. } => TypeKind::Array,
        TypeShape::TypeVariable { .. } | TypeShape::Wildcard { .. } => TypeKind::GenericVariable,
        TypeShape::Intersection { .. } => TypeKind::Intersection,
        TypeShape::Method(_) => TypeKind::Method,
        TypeShape::Variable(_) => TypeKind::Variable,
        TypeShape::Unknown => TypeKind::Unknown,
    }
}

/// Warn when the class interned as `id` disagrees with `shape`, which shares
/// its name. The interned entry is kept.
pub(crate) fn warn_if_reshaped<T>(arena: &TypeArena, id: TypeId, shape: &ClassShape<T>) {
    let Some(existing) = arena.get(id).as_class() else {
        return;
    };
    if !existing.complete {
        return;
    }
    if let Some(part) = existing.mismatch(shape) {
        tracing::warn!(class = %shape.fq_name, part, "class interned again with a different shape");
    }
}

/// One resolution pass over an exclusively borrowed arena.
pub struct TypeInterner<'a, S: TypeSource> {
    source: &'a S,
    arena: &'a mut TypeArena,
    top_type: &'a str,
    class_stack: Vec<String>,
    var_stack: Vec<String>,
}

impl<'a, S: TypeSource> TypeInterner<'a, S> {
    pub fn new(source: &'a S, arena: &'a mut TypeArena, top_type: &'a str) -> Self {
        TypeInterner {
            source,
            arena,
            top_type,
            class_stack: Vec::new(),
            var_stack: Vec::new(),
        }
    }

    /// Intern `ty` and everything it references, returning its id.
    pub fn resolve(&mut self, ty: &S::Type) -> Result<TypeId, InternError> {
        ensure_sufficient_stack(|| self.resolve_shape(ty))
    }

    fn resolve_all(&mut self, types: &[S::Type]) -> Result<Vec<TypeId>, InternError> {
        types.iter().map(|ty| self.resolve(ty)).collect()
    }

    fn signature(&self, ty: &S::Type) -> String {
        SignatureBuilder::with_stack(self.source, self.top_type, self.var_stack.clone()).signature(ty)
    }

    fn resolve_shape(&mut self, ty: &S::Type) -> Result<TypeId, InternError> {
        match self.source.shape(ty) {
            TypeShape::Primitive(kind) => Ok(TypeId::primitive(kind)),
            TypeShape::Unknown => Ok(TypeId::UNKNOWN),
            TypeShape::Class(class) => self.class(class),
            TypeShape::TypeVariable { name, bounds } => self.type_variable(ty, name, &bounds),
            TypeShape::Parameterized { base, args } => {
                self.interned(ty, TypeKind::Parameterized, |this| {
                    Ok(TypeRef::Parameterized {
                        base: this.resolve(&base)?,
                        args: this.resolve_all(&args)?,
                    })
                })
            }
            TypeShape::Array { element } => self.interned(ty, TypeKind::Array, |this| {
                Ok(TypeRef::Array {
                    element: this.resolve(&element)?,
                })
            }),
            TypeShape::Wildcard { bound } => {
                self.interned(ty, TypeKind::GenericVariable, |this| this.wildcard(bound))
            }
            TypeShape::Intersection { members } => {
                self.interned(ty, TypeKind::Intersection, |this| {
                    Ok(TypeRef::Intersection {
                        members: this.resolve_all(&members)?,
                    })
                })
            }
            TypeShape::Method(method) => self.interned(ty, TypeKind::Method, |this| {
                Ok(TypeRef::Method(MethodType {
                    owner: this.resolve(&method.owner)?,
                    name: method.name,
                    flags: method.flags,
                    return_type: this.resolve(&method.return_type)?,
                    param_types: this.resolve_all(&method.param_types)?,
                    thrown: this.resolve_all(&method.thrown)?,
                }))
            }),
            TypeShape::Variable(var) => self.interned(ty, TypeKind::Variable, |this| {
                let owner = match &var.owner {
                    Some(owner) => Some(this.resolve(owner)?),
                    None => None,
                };
                Ok(TypeRef::Variable(VariableType {
                    owner,
                    name: var.name,
                    flags: var.flags,
                    ty: this.resolve(&var.ty)?,
                }))
            }),
        }
    }

    /// Look `ty` up by signature, building and interning it on a miss.
    fn interned(
        &mut self,
        ty: &S::Type,
        kind: TypeKind,
        build: impl FnOnce(&mut Self) -> Result<TypeRef, InternError>,
    ) -> Result<TypeId, InternError> {
        let signature = self.signature(ty);
        if let Some(id) = self.arena.expect_kind(&signature, kind)? {
            return Ok(id);
        }
        let entry = build(self)?;
        self.arena.intern(signature, entry)
    }

    fn class(&mut self, shape: ClassShape<S::Type>) -> Result<TypeId, InternError> {
        if let Some(id) = self.arena.expect_kind(&shape.fq_name, TypeKind::Class)? {
            warn_if_reshaped(self.arena, id, &shape);
            return Ok(id);
        }
        let id = self
            .arena
            .reserve(ClassType::placeholder(shape.fq_name.clone(), shape.kind, shape.flags))?;
        tracing::trace!(class = %shape.fq_name, ?id, "reserved class");

        // Type variable names are scoped to the class that declares them.
        let outer_vars = std::mem::take(&mut self.var_stack);
        self.class_stack.push(shape.fq_name.clone());
        let class = self.class_members(shape);
        self.class_stack.pop();
        self.var_stack = outer_vars;

        self.arena.fill(id, class?)?;
        Ok(id)
    }

    fn class_members(&mut self, shape: ClassShape<S::Type>) -> Result<ClassType, InternError> {
        let supertype = match &shape.supertype {
            Some(supertype) => Some(self.resolve(supertype)?),
            None => None,
        };
        Ok(ClassType {
            type_params: self.resolve_all(&shape.type_params)?,
            supertype,
            interfaces: self.resolve_all(&shape.interfaces)?,
            annotations: self.resolve_all(&shape.annotations)?,
            fields: self.resolve_all(&shape.fields)?,
            methods: self.resolve_all(&shape.methods)?,
            fq_name: shape.fq_name,
            kind: shape.kind,
            flags: shape.flags,
            complete: true,
        })
    }

    fn type_variable(
        &mut self,
        ty: &S::Type,
        name: String,
        bounds: &[S::Type],
    ) -> Result<TypeId, InternError> {
        if self.var_stack.contains(&name) {
            return Ok(self.arena.cyclic(&format!("Generic{{{name}}}")));
        }
        let signature = self.signature(ty);
        if let Some(id) = self.arena.expect_kind(&signature, TypeKind::GenericVariable)? {
            return Ok(id);
        }

        self.var_stack.push(name.clone());
        let resolved = self.bounds(bounds);
        self.var_stack.pop();

        let entry = TypeRef::GenericVariable {
            name,
            variance: Variance::Invariant,
            bounds: resolved?,
        };
        self.arena.intern(signature, entry)
    }

    fn bounds(&mut self, bounds: &[S::Type]) -> Result<Vec<TypeId>, InternError> {
        let mut resolved = Vec::with_capacity(bounds.len());
        for bound in bounds {
            if let Some(class) = erased_class_name(self.source, bound) {
                if self.class_stack.contains(&class) {
                    resolved.push(self.arena.cyclic(&class));
                    continue;
                }
            }
            let id = self.resolve(bound)?;
            if self.arena.signature(id) != self.top_type {
                resolved.push(id);
            }
        }
        Ok(resolved)
    }

    fn wildcard(&mut self, bound: Option<(WildcardBound, S::Type)>) -> Result<TypeRef, InternError> {
        let (variance, bounds) = match bound {
            None => (Variance::Invariant, Vec::new()),
            Some((WildcardBound::Extends, ty)) => {
                let id = self.resolve(&ty)?;
                if self.arena.signature(id) == self.top_type {
                    (Variance::Invariant, Vec::new())
                } else {
                    (Variance::Covariant, vec![id])
                }
            }
            Some((WildcardBound::Super, ty)) => (Variance::Contravariant, vec![self.resolve(&ty)?]),
        };
        Ok(TypeRef::GenericVariable {
            name: "?".to_owned(),
            variance,
            bounds,
        })
    }
}
