use std::collections::HashMap;
use std::collections::HashSet;
use crate::{
    error::GenError,
    naming::{strip_prefix, struct_name, union_name},
    utils::quote,
};
use tl_serde_gen_schema::Schema;

/// Union names the generator emits for every schema.
pub const RESERVED_NAMES: [&str; 2] = ["Object", "Function"];

/// Returns `Ok(())` if verification passed, or `Err(GenError::VerifierError(_))` otherwise.
pub fn verify_schema(schema: &Schema) -> Result<(), GenError> {
    // 1) Type names must be unique
    let mut type_names = HashSet::new();
    for custom_type in &schema.custom_types {
        if !type_names.insert(custom_type.name.as_str()) {
            return Err(GenError::VerifierError(format!(
                "The type {} is defined twice",
                quote(&custom_type.name)
            )));
        }
    }

    // 2) Constructor names must be unique across the schema, they all share `Object`
    let mut constructor_names = HashSet::new();
    for constructor in schema.constructors() {
        if !constructor_names.insert(constructor.name.as_str()) {
            return Err(GenError::VerifierError(format!(
                "The constructor {} is defined twice",
                quote(&constructor.name)
            )));
        }
    }

    // 3) Function names must be unique
    let mut function_names = HashSet::new();
    for function in &schema.functions {
        if !function_names.insert(function.name.as_str()) {
            return Err(GenError::VerifierError(format!(
                "The function {} is defined twice",
                quote(&function.name)
            )));
        }
    }

    // 4) Multi-constructor unions live next to the synthetic ones
    for custom_type in &schema.custom_types {
        if custom_type.constructors.len() < 2 {
            continue;
        }
        let name = union_name(&custom_type.name)?;
        if RESERVED_NAMES.contains(&name.as_str()) {
            return Err(GenError::VerifierError(format!(
                "The type name {} is reserved",
                quote(&custom_type.name)
            )));
        }
    }

    // 5) Every union needs distinct variant names once prefixes are stripped
    for custom_type in &schema.custom_types {
        if custom_type.constructors.len() > 1 {
            let name = union_name(&custom_type.name)?;
            check_variants(&name, custom_type.constructors.iter().map(|c| c.name.as_str()))?;
        }
    }
    check_variants("Object", schema.constructors().map(|c| c.name.as_str()))?;
    check_variants("Function", schema.functions.iter().map(|f| f.name.as_str()))?;

    // 6) Structs and unions are glob-imported into each other's modules, so
    //    every generated name must be distinct
    check_generated_names(schema)?;

    Ok(())
}

fn check_generated_names(schema: &Schema) -> Result<(), GenError> {
    let mut structs: HashMap<String, &str> = HashMap::new();
    let declarations = schema
        .constructors()
        .map(|c| c.name.as_str())
        .chain(schema.functions.iter().map(|f| f.name.as_str()));
    for name in declarations {
        let struct_name = struct_name(name)?;
        if let Some(previous) = structs.insert(struct_name.clone(), name) {
            return Err(GenError::VerifierError(format!(
                "{} and {} both generate the struct {}",
                quote(previous),
                quote(name),
                quote(&struct_name)
            )));
        }
    }

    let mut unions: HashMap<String, &str> = HashMap::new();
    for name in RESERVED_NAMES {
        unions.insert(name.to_string(), name);
    }
    for custom_type in &schema.custom_types {
        if custom_type.constructors.len() < 2 {
            continue;
        }
        let union = union_name(&custom_type.name)?;
        if let Some(previous) = unions.insert(union.clone(), custom_type.name.as_str()) {
            return Err(GenError::VerifierError(format!(
                "The types {} and {} both generate the union {}",
                quote(previous),
                quote(&custom_type.name),
                quote(&union)
            )));
        }
    }

    for (union, type_name) in &unions {
        if let Some(declaration) = structs.get(union) {
            return Err(GenError::VerifierError(format!(
                "The struct for {} has the same name as the union for {}",
                quote(declaration),
                quote(type_name)
            )));
        }
    }
    Ok(())
}

fn check_variants<'n>(union: &str, names: impl Iterator<Item = &'n str>) -> Result<(), GenError> {
    let mut seen: HashMap<String, &str> = HashMap::new();
    for name in names {
        let struct_name = struct_name(name)?;
        let variant = strip_prefix(&struct_name, union).to_string();
        if let Some(previous) = seen.insert(variant.clone(), name) {
            return Err(GenError::VerifierError(format!(
                "{} and {} both map to variant {} of {}",
                quote(previous),
                quote(name),
                quote(&variant),
                quote(union)
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tl_serde_gen_schema::{Arg, Type};

    #[test]
    fn test_verify_accepts_valid_schema() {
        let mut schema = Schema::new();
        let shape = schema.add_type("shape");
        schema.add_constructor(shape, "shapeCircle", vec![Arg::new("radius", Type::Double)]);
        schema.add_constructor(shape, "shapeSquare", vec![Arg::new("side", Type::Double)]);
        schema.add_function("getShape", vec![], Type::Custom(shape));
        assert!(verify_schema(&schema).is_ok());
    }

    #[test]
    fn test_verify_duplicate_constructor() {
        let mut schema = Schema::new();
        let a = schema.add_type("A");
        let b = schema.add_type("B");
        schema.add_constructor(a, "same", vec![]);
        schema.add_constructor(b, "same", vec![]);
        let err = verify_schema(&schema).unwrap_err();
        assert!(matches!(err, GenError::VerifierError(ref msg) if msg.contains("\"same\"")), "{:?}", err);
    }

    #[test]
    fn test_verify_duplicate_function() {
        let mut schema = Schema::new();
        schema.add_function("close", vec![], Type::Bool);
        schema.add_function("close", vec![], Type::Bool);
        assert!(matches!(verify_schema(&schema), Err(GenError::VerifierError(_))));
    }

    #[test]
    fn test_verify_reserved_union_name() {
        let mut schema = Schema::new();
        let object = schema.add_type("object");
        schema.add_constructor(object, "objectA", vec![]);
        schema.add_constructor(object, "objectB", vec![]);
        assert!(matches!(verify_schema(&schema), Err(GenError::VerifierError(_))));

        // A single constructor never becomes a union.
        let mut schema = Schema::new();
        let function = schema.add_type("Function");
        schema.add_constructor(function, "functionCall", vec![]);
        assert!(verify_schema(&schema).is_ok());
    }

    #[test]
    fn test_verify_constructor_named_like_its_union() {
        let mut schema = Schema::new();
        let chat = schema.add_type("Chat");
        schema.add_constructor(chat, "chat", vec![Arg::new("id", Type::Int53)]);
        schema.add_constructor(chat, "chatEmpty", vec![]);
        let err = verify_schema(&schema).unwrap_err();
        assert!(
            matches!(err, GenError::VerifierError(ref msg) if msg.contains("\"chat\"") && msg.contains("\"Chat\"")),
            "{:?}",
            err
        );

        // With a single constructor there is no union to clash with.
        let mut schema = Schema::new();
        let user = schema.add_type("User");
        schema.add_constructor(user, "user", vec![Arg::new("id", Type::Int53)]);
        assert!(verify_schema(&schema).is_ok());
    }

    #[test]
    fn test_verify_struct_named_like_synthetic_union() {
        let mut schema = Schema::new();
        let wrapper = schema.add_type("Wrapper");
        schema.add_constructor(wrapper, "object", vec![]);
        assert!(matches!(verify_schema(&schema), Err(GenError::VerifierError(_))));

        let mut schema = Schema::new();
        schema.add_function("function", vec![], Type::Bool);
        assert!(matches!(verify_schema(&schema), Err(GenError::VerifierError(_))));
    }

    #[test]
    fn test_verify_struct_shared_by_constructor_and_function() {
        let mut schema = Schema::new();
        let ok = schema.add_type("Ok");
        schema.add_constructor(ok, "ok", vec![]);
        schema.add_function("ok", vec![], Type::Custom(ok));
        let err = verify_schema(&schema).unwrap_err();
        assert!(matches!(err, GenError::VerifierError(ref msg) if msg.contains("struct")), "{:?}", err);

        // Names equal after capitalization collide as well.
        let mut schema = Schema::new();
        let a = schema.add_type("A");
        schema.add_constructor(a, "point", vec![]);
        let b = schema.add_type("B");
        schema.add_constructor(b, "Point", vec![]);
        assert!(matches!(verify_schema(&schema), Err(GenError::VerifierError(_))));
    }

    #[test]
    fn test_verify_variant_collision_after_prefix_strip() {
        let mut schema = Schema::new();
        let photo = schema.add_type("Photo");
        schema.add_constructor(photo, "photoSize", vec![]);
        schema.add_constructor(photo, "size", vec![]);
        let err = verify_schema(&schema).unwrap_err();
        assert!(
            matches!(err, GenError::VerifierError(ref msg) if msg.contains("\"Size\"")),
            "{:?}",
            err
        );
    }
}
