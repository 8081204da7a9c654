//! Type expressions.

use lst_ir::token::{punct, WildcardBound};
use lst_ir::{pad_left, NodeKind};

use super::{Children, Mapped, TreeBuilder};
use crate::front_end::{FrontEnd, Role};
use crate::MappingError;

impl<F: FrontEnd> TreeBuilder<'_, F> {
    /// `Base<A, B>`. A diamond (`<>`) holds one `Empty` argument.
    pub(super) fn parameterized_type(
        &mut self,
        children: &Children<F::Node>,
    ) -> Result<Mapped, MappingError> {
        let base = self.child(children, Role::Clazz)?;
        let args = self.container(
            punct::LT,
            &children.all(Role::TypeArg),
            punct::COMMA,
            punct::GT,
        )?;
        Ok(NodeKind::ParameterizedType { base, args }.into())
    }

    pub(super) fn array_type(&mut self, children: &Children<F::Node>) -> Result<Mapped, MappingError> {
        let element = self.child(children, Role::Element)?;
        let before = self.expect(punct::LBRACKET)?;
        let inside = self.expect(punct::RBRACKET)?;
        Ok(NodeKind::ArrayType {
            element,
            dimension: pad_left(before, inside),
        }
        .into())
    }

    pub(super) fn wildcard(
        &mut self,
        bound: Option<WildcardBound>,
        children: &Children<F::Node>,
    ) -> Result<Mapped, MappingError> {
        self.lead(punct::QUESTION)?;
        let Some(bound) = bound else {
            return Ok(NodeKind::Wildcard {
                bound: None,
                bounded: None,
            }
            .into());
        };
        let before = self.keyword(bound.keyword())?;
        let bounded = self.child(children, Role::Bound)?;
        Ok(NodeKind::Wildcard {
            bound: Some(pad_left(before, bound)),
            bounded: Some(bounded),
        }
        .into())
    }

    /// `A | B`, the type of a multi-catch parameter.
    pub(super) fn union_type(&mut self, children: &Children<F::Node>) -> Result<Mapped, MappingError> {
        let alternatives = self.separated(&children.all(Role::Alternative), punct::PIPE)?;
        Ok(NodeKind::UnionType { alternatives }.into())
    }
}
