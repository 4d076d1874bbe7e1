use tl_serde_gen_schema::{Arg, Schema, Type, TypeId};
use tracing::{debug, info};

use crate::{
    error::GenError,
    lifetime::LifetimeAnalyzer,
    naming::{field_name, strip_prefix, struct_name, union_name},
    options::{GenOptions, MaximalUnion},
    projector::Projector,
};

/// Name of the synthetic union over every constructor.
pub const OBJECT_UNION: &str = "Object";
/// Name of the synthetic union over every function.
pub const FUNCTION_UNION: &str = "Function";

/// One variant of a generated union.
struct Member {
    /// Name on the wire, used as the serde tag.
    wire:        String,
    /// Struct wrapped by the variant.
    struct_name: String,
    lifetime:    bool,
}

impl Member {
    fn struct_type(&self) -> String {
        with_lifetime(&self.struct_name, self.lifetime)
    }
}

/// The other side of a `TryFrom`/`From` pair.
struct ConversionTarget {
    path:     String,
    lifetime: bool,
    /// Variant name in the target union for each member, in member order.
    variants: Vec<String>,
}

fn with_lifetime(name: &str, lifetime: bool) -> String {
    if lifetime {
        format!("{}<'a>", name)
    } else {
        name.to_string()
    }
}

fn impl_generics(lifetime: bool) -> &'static str {
    if lifetime { "impl<'a>" } else { "impl" }
}

/// Compiles the entire schema into one Rust source file: a `dynamic` module
/// with the tagged unions, then the `types` and `functions` structs.
pub fn compile_schema_to_rust(schema: &Schema, options: &GenOptions) -> Result<String, GenError> {
    let lifetimes = LifetimeAnalyzer::new(schema);
    let projector = Projector::new(schema, &lifetimes, &options.string_deserializer);
    let generator = Generator {
        schema,
        lifetimes: &lifetimes,
        projector,
        maximal_union: options.maximal_union()?,
    };

    let mut out = String::new();
    out.push_str("//! Auto-generated JSON messages\n");
    out.push_str("// Auto-generated, do not edit\n");
    out.push_str("#![allow(unused_imports, unreachable_patterns)]\n");
    out.push_str("use serde::{Serialize, Deserialize};\n");
    out.push_str("use std::{borrow::Cow, convert::TryFrom};\n");

    generator.gen_enums(&mut out)?;
    generator.gen_structs(&mut out)?;

    info!(
        types = schema.custom_types.len(),
        functions = schema.functions.len(),
        bytes = out.len(),
        "generated rust source"
    );
    Ok(out)
}

struct Generator<'s> {
    schema:        &'s Schema,
    lifetimes:     &'s LifetimeAnalyzer,
    projector:     Projector<'s>,
    maximal_union: Option<MaximalUnion>,
}

impl Generator<'_> {
    fn gen_enums(&self, out: &mut String) -> Result<(), GenError> {
        out.push_str("/// Enums containing type markers and subclasses\n");
        out.push_str("pub mod dynamic {\n\tuse super::{*, types::*, functions::*};\n");

        let mut objects = Vec::new();
        for custom_type in &self.schema.custom_types {
            let mut members = Vec::with_capacity(custom_type.constructors.len());
            for constructor in &custom_type.constructors {
                members.push(self.member(&constructor.name, &constructor.args)?);
            }

            if members.len() > 1 {
                let name = union_name(&custom_type.name)?;
                let lifetime = self.lifetimes.constructors_need_lifetime(&custom_type.constructors);
                let object = self.object_target(&members);
                self.gen_union(out, &name, lifetime, &members, Some(&object));
            }
            objects.extend(members);
        }

        let external = self.maximal_union.as_ref();

        let object_lifetime = self.lifetimes.constructors_need_lifetime(self.schema.constructors());
        let object_target = external.map(|m| self.external_target(m, &objects));
        self.gen_union(out, OBJECT_UNION, object_lifetime, &objects, object_target.as_ref());

        let mut functions = Vec::with_capacity(self.schema.functions.len());
        for function in &self.schema.functions {
            functions.push(self.member(&function.name, &function.args)?);
        }
        let function_lifetime = self.lifetimes.functions_need_lifetime(&self.schema.functions);
        let function_target = external.map(|m| self.external_target(m, &functions));
        self.gen_union(out, FUNCTION_UNION, function_lifetime, &functions, function_target.as_ref());

        out.push_str("}\n\n");
        Ok(())
    }

    fn member(&self, wire: &str, args: &[Arg]) -> Result<Member, GenError> {
        Ok(Member {
            wire:        wire.to_string(),
            struct_name: struct_name(wire)?,
            lifetime:    self.lifetimes.args_need_lifetime(args),
        })
    }

    /// `Object` as seen from a per-type union.
    fn object_target(&self, members: &[Member]) -> ConversionTarget {
        ConversionTarget {
            path:     OBJECT_UNION.to_string(),
            lifetime: self.lifetimes.constructors_need_lifetime(self.schema.constructors()),
            variants: members
                .iter()
                .map(|m| strip_prefix(&m.struct_name, OBJECT_UNION).to_string())
                .collect(),
        }
    }

    fn external_target(&self, union: &MaximalUnion, members: &[Member]) -> ConversionTarget {
        ConversionTarget {
            path:     union.path.clone(),
            lifetime: union.lifetime,
            variants: members.iter().map(|m| m.struct_name.clone()).collect(),
        }
    }

    /// Emits one tagged union, `From` for each of its structs, and the
    /// conversions to and from `target` when given.
    fn gen_union(
        &self,
        out: &mut String,
        name: &str,
        union_lifetime: bool,
        members: &[Member],
        target: Option<&ConversionTarget>,
    ) {
        let union_type = with_lifetime(name, union_lifetime);
        let variants: Vec<&str> = members.iter().map(|m| strip_prefix(&m.struct_name, name)).collect();

        out.push_str("\t#[derive(Serialize, Deserialize, Clone, Debug)]\n");
        out.push_str("\t#[serde(tag=\"@type\")]\n");
        out.push_str(&format!("\tpub enum {} {{\n", union_type));
        for (member, variant) in members.iter().zip(&variants) {
            out.push_str(&format!("\t\t#[serde(rename=\"{}\")]\n", member.wire));
            let borrow = if member.lifetime { "#[serde(borrow)]" } else { "" };
            out.push_str(&format!("\t\t{}({}{}),\n", variant, borrow, member.struct_type()));
        }
        out.push_str("\t}\n");

        for (member, variant) in members.iter().zip(&variants) {
            out.push_str(&format!(
                "\t{} From<{}> for {} {{ fn from(v: {}) -> Self {{ Self::{}(v) }}}}\n",
                impl_generics(union_lifetime),
                member.struct_type(),
                union_type,
                member.struct_type(),
                variant
            ));
        }

        if let Some(target) = target {
            let target_type = with_lifetime(&target.path, target.lifetime);
            let generics = impl_generics(union_lifetime || target.lifetime);

            out.push_str(&format!("\t{} TryFrom<{}> for {} {{\n", generics, target_type, union_type));
            out.push_str(&format!("\t\ttype Error = {};\n", target_type));
            out.push_str(&format!(
                "\t\tfn try_from(v: {}) -> Result<Self, {}> {{\n",
                target_type, target_type
            ));
            out.push_str("\t\t\tmatch v {\n");
            for (variant, target_variant) in variants.iter().zip(&target.variants) {
                out.push_str(&format!(
                    "\t\t\t\t{}::{}(v) => Result::Ok(Self::{}(v)),\n",
                    target.path, target_variant, variant
                ));
            }
            out.push_str("\t\t\t\tv => Result::Err(v),\n");
            out.push_str("\t\t\t}\n");
            out.push_str("\t\t}\n");
            out.push_str("\t}\n");

            out.push_str(&format!("\t{} From<{}> for {} {{\n", generics, union_type, target_type));
            out.push_str(&format!("\t\tfn from(v: {}) -> {} {{\n", union_type, target_type));
            out.push_str("\t\t\tmatch v {\n");
            for (variant, target_variant) in variants.iter().zip(&target.variants) {
                out.push_str(&format!(
                    "\t\t\t\t{}::{}(v) => {}::{}(v),\n",
                    name, variant, target.path, target_variant
                ));
            }
            out.push_str("\t\t\t}\n");
            out.push_str("\t\t}\n");
            out.push_str("\t}\n");
        }

        out.push('\n');
        debug!(union = name, variants = members.len(), lifetime = union_lifetime, "emitted union");
    }

    fn gen_structs(&self, out: &mut String) -> Result<(), GenError> {
        out.push_str("/// API Types\n");
        out.push_str("pub mod types {\n\tuse super::{*, dynamic::*};\n");
        for custom_type in &self.schema.custom_types {
            for constructor in &custom_type.constructors {
                out.push_str(&format!("\t/// Super type: {}\n", custom_type.name));
                self.gen_struct(out, &constructor.name, &constructor.args, Some(constructor.type_id))?;
            }
        }
        out.push_str("}\n\n");

        out.push_str("/// API functions\n");
        out.push_str("pub mod functions {\n\tuse super::{*, dynamic::*, types::*};\n");
        for function in &self.schema.functions {
            let parent = match function.result {
                Type::Custom(id) => Some(id),
                _ => None,
            };
            self.gen_struct(out, &function.name, &function.args, parent)?;
        }
        out.push_str("}\n");
        Ok(())
    }

    /// Emits the struct for a constructor or function. `parent` is the custom
    /// type whose self references get boxed.
    fn gen_struct(&self, out: &mut String, name: &str, args: &[Arg], parent: Option<TypeId>) -> Result<(), GenError> {
        let struct_name = struct_name(name)?;

        out.push_str("\t#[derive(Serialize, Deserialize, Clone, Debug)]\n");
        if args.is_empty() {
            out.push_str(&format!("\tpub struct {};\n\n", struct_name));
            return Ok(());
        }

        let lifetime = self.lifetimes.args_need_lifetime(args);
        out.push_str(&format!("\tpub struct {} {{\n", with_lifetime(&struct_name, lifetime)));
        for arg in args {
            let field = field_name(&arg.name).map_err(|e| e.in_field(name, &arg.name))?;
            let rust_type = self
                .projector
                .project(&arg.type_, parent)
                .map_err(|e| e.in_field(name, &arg.name))?;

            if let Some(wire) = &field.rename {
                out.push_str(&format!("\t\t#[serde(rename=\"{}\")]\n", wire));
            }
            if let Some(attr) = self.projector.field_attr(&arg.type_) {
                out.push_str(&format!("\t\t{}\n", attr));
            }
            out.push_str(&format!("\t\tpub {}: {},\n", field.ident, rust_type));
        }
        out.push_str("\t}\n\n");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate(schema: &Schema) -> String {
        compile_schema_to_rust(schema, &GenOptions::default()).expect("compile_schema_to_rust failed")
    }

    #[test]
    fn test_bytes_field_borrows() {
        let mut schema = Schema::new();
        let photo = schema.add_type("Photo");
        schema.add_constructor(photo, "photo", vec![
            Arg::new("id", Type::Int64),
            Arg::new("data", Type::Bytes),
        ]);
        let point = schema.add_type("Point");
        schema.add_constructor(point, "point", vec![
            Arg::new("x", Type::Double),
            Arg::new("y", Type::Double),
        ]);

        let code = generate(&schema);
        assert!(code.contains("\tpub struct Photo<'a> {\n\t\tpub id: i64,\n\t\t#[serde(borrow)]\n\t\tpub data: Option<&'a [u8]>,\n\t}\n"));
        assert!(code.contains("\tpub struct Point {\n\t\tpub x: f64,\n\t\tpub y: f64,\n\t}\n"));
        // Single constructor types get no union of their own.
        assert!(!code.contains("pub enum Photo"));
        assert!(code.contains("\t\tPhoto(#[serde(borrow)]Photo<'a>),\n"));
        assert!(code.contains("\tpub enum Object<'a> {\n"));
    }

    #[test]
    fn test_string_field_uses_cow_deserializer() {
        let mut schema = Schema::new();
        let user = schema.add_type("User");
        schema.add_constructor(user, "user", vec![Arg::new("first_name", Type::String)]);

        let options = GenOptions {
            string_deserializer: "tl_serde_gen::cow_de::de_opt_cow_str".to_string(),
            ..GenOptions::default()
        };
        let code = compile_schema_to_rust(&schema, &options).unwrap();
        assert!(code.contains(
            "\t\t#[serde(borrow, deserialize_with=\"tl_serde_gen::cow_de::de_opt_cow_str\")]\n\t\tpub first_name: Option<Cow<'a, str>>,\n"
        ));
    }

    #[test]
    fn test_type_field_is_renamed() {
        let mut schema = Schema::new();
        let entity = schema.add_type("TextEntity");
        schema.add_constructor(entity, "textEntity", vec![
            Arg::new("offset", Type::Int32),
            Arg::new("type", Type::Int32),
        ]);

        let code = generate(&schema);
        assert!(code.contains("\t\t#[serde(rename=\"type\")]\n\t\tpub typ: i32,\n"));
        assert!(!code.contains("pub type:"));
    }

    #[test]
    fn test_self_reference_is_boxed() {
        let mut schema = Schema::new();
        let block = schema.add_type("PageBlock");
        schema.add_constructor(block, "pageBlockDivider", vec![]);
        schema.add_constructor(block, "pageBlockDetails", vec![
            Arg::new("header", Type::Custom(block)),
            Arg::new("blocks", Type::vector(Type::Custom(block))),
        ]);

        let code = generate(&schema);
        assert!(code.contains("\tpub struct PageBlockDivider;\n"));
        assert!(code.contains("\t\tpub header: Option<Box<PageBlock>>,\n"));
        assert!(code.contains("\t\tpub blocks: Vec<Option<Box<PageBlock>>>,\n"));
        assert!(code.contains("\t\tDivider(PageBlockDivider),\n"));
        assert!(code.contains("\t\tDetails(PageBlockDetails),\n"));
    }

    #[test]
    fn test_function_result_guards_self_reference() {
        let mut schema = Schema::new();
        let chat = schema.add_type("Chat");
        schema.add_constructor(chat, "chat", vec![Arg::new("id", Type::Int53)]);
        schema.add_function("forwardChat", vec![Arg::new("chat", Type::Custom(chat))], Type::Custom(chat));
        schema.add_function("closeChat", vec![Arg::new("chat", Type::Custom(chat))], Type::Bool);

        let code = generate(&schema);
        assert!(code.contains("\tpub struct ForwardChat {\n\t\tpub chat: Option<Box<Chat>>,\n"));
        assert!(code.contains("\tpub struct CloseChat {\n\t\tpub chat: Option<Chat>,\n"));
        assert!(code.contains("\t\t#[serde(rename=\"forwardChat\")]\n\t\tForwardChat(ForwardChat),\n"));
    }

    #[test]
    fn test_conversion_lifetimes_follow_each_side() {
        let mut schema = Schema::new();
        let shape = schema.add_type("Shape");
        schema.add_constructor(shape, "shapeCircle", vec![Arg::new("radius", Type::Double)]);
        schema.add_constructor(shape, "shapeSquare", vec![Arg::new("side", Type::Double)]);
        let label = schema.add_type("Label");
        schema.add_constructor(label, "labelText", vec![Arg::new("text", Type::String)]);
        schema.add_constructor(label, "labelNone", vec![]);

        let code = generate(&schema);
        assert!(code.contains("\timpl<'a> TryFrom<Object<'a>> for Shape {\n\t\ttype Error = Object<'a>;\n"));
        assert!(code.contains("\timpl<'a> From<Shape> for Object<'a> {\n"));
        assert!(code.contains("\timpl<'a> TryFrom<Object<'a>> for Label<'a> {\n"));
        assert!(code.contains("\timpl<'a> From<LabelNone> for Label<'a> { fn from(v: LabelNone) -> Self { Self::None(v) }}\n"));
        assert!(code.contains("\timpl<'a> From<LabelText<'a>> for Label<'a> { fn from(v: LabelText<'a>) -> Self { Self::Text(v) }}\n"));
        assert!(code.contains("\t\t\t\tObject::LabelText(v) => Result::Ok(Self::Text(v)),\n"));
        assert!(code.contains("\t\t\t\tLabel::Text(v) => Object::LabelText(v),\n"));
    }

    #[test]
    fn test_external_maximal_union_conversions() {
        let mut schema = Schema::new();
        let ok = schema.add_type("Ok");
        schema.add_constructor(ok, "ok", vec![]);
        schema.add_function("setName", vec![Arg::new("name", Type::String)], Type::Custom(ok));

        let options = GenOptions {
            maximal_union: Some("crate::Any<'a>".to_string()),
            ..GenOptions::default()
        };
        let code = compile_schema_to_rust(&schema, &options).unwrap();

        assert!(code.contains("\timpl<'a> TryFrom<crate::Any<'a>> for Object {\n"));
        assert!(code.contains("\t\t\t\tcrate::Any::Ok(v) => Result::Ok(Self::Ok(v)),\n"));
        assert!(code.contains("\timpl<'a> From<Function<'a>> for crate::Any<'a> {\n"));
        assert!(code.contains("\t\t\t\tFunction::SetName(v) => crate::Any::SetName(v),\n"));
        assert!(code.contains("\t\t\t\tv => Result::Err(v),\n"));
    }

    #[test]
    fn test_no_external_conversions_by_default() {
        let mut schema = Schema::new();
        schema.add_function("close", vec![], Type::Bool);
        let code = generate(&schema);
        assert!(!code.contains("TryFrom<Object> for Object"));
        assert!(!code.contains("for Function {\n\t\ttype Error"));
        assert!(code.contains("\tpub enum Function {\n\t\t#[serde(rename=\"close\")]\n\t\tClose(Close),\n\t}\n"));
    }

    #[test]
    fn test_unresolved_field_type_names_field() {
        let mut schema = Schema::new();
        let user = schema.add_type("User");
        let status = schema.add_type("UserStatus");
        schema.add_constructor(user, "user", vec![Arg::new("status", Type::Custom(status))]);

        let err = compile_schema_to_rust(&schema, &GenOptions::default()).unwrap_err();
        match err {
            GenError::Field { owner, field, source } => {
                assert_eq!(owner, "user");
                assert_eq!(field, "status");
                assert!(matches!(*source, GenError::UnresolvedType { type_id, .. } if type_id == status));
            }
            other => panic!("expected a field error but got {:?}", other),
        }
    }

    #[test]
    fn test_empty_names_fail() {
        let mut schema = Schema::new();
        let user = schema.add_type("User");
        schema.add_constructor(user, "user", vec![Arg::new("", Type::Int32)]);
        let err = compile_schema_to_rust(&schema, &GenOptions::default()).unwrap_err();
        assert!(matches!(err, GenError::Field { ref source, .. } if matches!(**source, GenError::EmptyIdentifier(_))));

        let mut schema = Schema::new();
        schema.add_function("", vec![], Type::Bool);
        assert!(matches!(
            compile_schema_to_rust(&schema, &GenOptions::default()),
            Err(GenError::EmptyIdentifier(_))
        ));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let mut schema = Schema::new();
        let content = schema.add_type("MessageContent");
        schema.add_constructor(content, "messageText", vec![Arg::new("text", Type::String)]);
        schema.add_constructor(content, "messagePhoto", vec![Arg::new("photo", Type::Bytes)]);
        schema.add_function("sendMessage", vec![Arg::new("content", Type::Custom(content))], Type::Custom(content));

        assert_eq!(generate(&schema), generate(&schema));
    }
}
