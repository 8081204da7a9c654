//! In-memory [`TypeSource`] for unit tests.

use lst_ir::token::{ClassKind, PrimitiveKind, WildcardBound};

use crate::{ClassShape, TypeShape, TypeSource};

/// Types addressed by index into a table of shapes.
#[derive(Default)]
pub(crate) struct Table {
    shapes: Vec<TypeShape<usize>>,
}

impl Table {
    pub(crate) fn add(&mut self, shape: TypeShape<usize>) -> usize {
        self.shapes.push(shape);
        self.shapes.len() - 1
    }

    /// Slot to be filled later with [`Table::set`], for self-referencing shapes.
    pub(crate) fn slot(&mut self) -> usize {
        self.add(TypeShape::Unknown)
    }

    pub(crate) fn set(&mut self, index: usize, shape: TypeShape<usize>) {
        self.shapes[index] = shape;
    }

    pub(crate) fn class(&mut self, fq_name: &str) -> usize {
        self.add(TypeShape::Class(ClassShape::named(fq_name, ClassKind::Class)))
    }

    pub(crate) fn primitive(&mut self, kind: PrimitiveKind) -> usize {
        self.add(TypeShape::Primitive(kind))
    }

    pub(crate) fn parameterized(&mut self, base: usize, args: &[usize]) -> usize {
        self.add(TypeShape::Parameterized {
            base,
            args: args.to_vec(),
        })
    }

    pub(crate) fn wildcard(&mut self, bound: Option<(WildcardBound, usize)>) -> usize {
        self.add(TypeShape::Wildcard { bound })
    }

    pub(crate) fn type_var(&mut self, name: &str, bounds: &[usize]) -> usize {
        self.add(TypeShape::TypeVariable {
            name: name.to_owned(),
            bounds: bounds.to_vec(),
        })
    }
}

impl TypeSource for Table {
    type Type = usize;

    fn shape(&self, ty: &usize) -> TypeShape<usize> {
        self.shapes.get(*ty).cloned().unwrap_or(TypeShape::Unknown)
    }
}
