//! Human-readable type rendering for logs and diagnostics.

use lst_ir::token::PrimitiveKind;
use lst_ir::TypeId;

use crate::type_ref::simple_name;
use crate::{TypeArena, TypeRef, Variance};

impl TypeArena {
    /// Format a type with unqualified class names, e.g. `List<? extends Number>`.
    pub fn format_type(&self, id: TypeId) -> String {
        let mut buf = String::new();
        self.format_type_into(id, &mut buf);
        buf
    }

    pub fn format_type_into(&self, id: TypeId, buf: &mut String) {
        match self.get(id) {
            TypeRef::Primitive(PrimitiveKind::None) => buf.push_str("none"),
            TypeRef::Primitive(kind) => buf.push_str(kind.keyword()),
            TypeRef::Class(class) => buf.push_str(class.simple_name()),
            TypeRef::Parameterized { base, args } => {
                self.format_type_into(*base, buf);
                buf.push('<');
                self.format_list(args, ", ", buf);
                buf.push('>');
            }
            TypeRef::Array { element } => {
                self.format_type_into(*element, buf);
                buf.push_str("[]");
            }
            TypeRef::GenericVariable {
                name,
                variance,
                bounds,
            } => {
                buf.push_str(name);
                match variance {
                    Variance::Invariant => {}
                    Variance::Covariant => buf.push_str(" extends "),
                    Variance::Contravariant => buf.push_str(" super "),
                }
                if *variance != Variance::Invariant {
                    self.format_list(bounds, " & ", buf);
                }
            }
            TypeRef::Intersection { members } => self.format_list(members, " & ", buf),
            TypeRef::Method(method) => {
                self.format_type_into(method.return_type, buf);
                buf.push(' ');
                self.format_type_into(method.owner, buf);
                buf.push('.');
                buf.push_str(&method.name);
                buf.push('(');
                self.format_list(&method.param_types, ", ", buf);
                buf.push(')');
            }
            TypeRef::Variable(var) => {
                self.format_type_into(var.ty, buf);
                buf.push(' ');
                if let Some(owner) = var.owner {
                    self.format_type_into(owner, buf);
                    buf.push('.');
                }
                buf.push_str(&var.name);
            }
            TypeRef::Unknown => buf.push_str("<unknown>"),
            TypeRef::Cyclic { signature } => {
                let target = signature
                    .strip_prefix("Generic{")
                    .and_then(|rest| rest.strip_suffix('}'))
                    .unwrap_or_else(|| simple_name(signature));
                buf.push_str(target);
            }
        }
    }

    fn format_list(&self, ids: &[TypeId], separator: &str, buf: &mut String) {
        for (i, id) in ids.iter().enumerate() {
            if i > 0 {
                buf.push_str(separator);
            }
            self.format_type_into(*id, buf);
        }
    }
}
