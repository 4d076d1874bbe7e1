//! Projection of schema field types onto Rust type expressions.

use crate::{
    error::GenError,
    lifetime::LifetimeAnalyzer,
    naming::{struct_name, union_name},
};
use tl_serde_gen_schema::{Schema, Type, TypeId};

pub struct Projector<'s> {
    schema:              &'s Schema,
    lifetimes:           &'s LifetimeAnalyzer,
    string_deserializer: &'s str,
}

impl<'s> Projector<'s> {
    pub fn new(schema: &'s Schema, lifetimes: &'s LifetimeAnalyzer, string_deserializer: &'s str) -> Self {
        Projector { schema, lifetimes, string_deserializer }
    }

    /// Rust type of a field.
    ///
    /// `parent` is the custom type the enclosing declaration belongs to; a
    /// field referring back to it is boxed, directly or as a vector element.
    pub fn project(&self, type_: &Type, parent: Option<TypeId>) -> Result<String, GenError> {
        let projected = match type_ {
            Type::Bool => "bool".to_string(),
            Type::Int32 => "i32".to_string(),
            Type::Int53 | Type::Int64 => "i64".to_string(),
            Type::Double => "f64".to_string(),
            Type::Bytes => "Option<&'a [u8]>".to_string(),
            Type::String => "Option<Cow<'a, str>>".to_string(),
            Type::Vector(element) => format!("Vec<{}>", self.project(element, parent)?),
            Type::Custom(id) => {
                let mut name = self.custom_name(*id)?;
                if self.lifetimes.custom_type_needs_lifetime(*id) {
                    name.push_str("<'a>");
                }
                if parent == Some(*id) {
                    name = format!("Box<{}>", name);
                }
                format!("Option<{}>", name)
            }
        };
        Ok(projected)
    }

    /// Serde attribute a field of this type needs, if any.
    pub fn field_attr(&self, type_: &Type) -> Option<String> {
        if *type_ == Type::String {
            return Some(format!(
                "#[serde(borrow, deserialize_with=\"{}\")]",
                self.string_deserializer
            ));
        }
        if self.lifetimes.needs_lifetime(type_) {
            return Some("#[serde(borrow)]".to_string());
        }
        None
    }

    /// Name of the generated type standing for a custom type: its union, or
    /// the struct of its only constructor.
    pub fn custom_name(&self, id: TypeId) -> Result<String, GenError> {
        let custom_type = self.schema.custom_type(id).ok_or_else(|| GenError::UnresolvedType {
            type_id: id,
            reason:  "no such custom type in the schema".to_string(),
        })?;
        match custom_type.constructors.as_slice() {
            [] => Err(GenError::UnresolvedType {
                type_id: id,
                reason:  format!("type \"{}\" has no constructors", custom_type.name),
            }),
            [only] => struct_name(&only.name),
            _ => union_name(&custom_type.name),
        }
    }
}
