use serde::Serialize;

/// Index of a [`CustomType`] inside [`Schema::custom_types`].
pub type TypeId = usize;

/// The type of a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Type {
    Bool,
    Int32,
    /// Integer that stays exact when represented as a double.
    Int53,
    Int64,
    Double,
    String,
    Bytes,
    Vector(Box<Type>),
    /// Reference into the schema's custom types. May point back at the type
    /// that contains the field.
    Custom(TypeId),
}

impl Type {
    pub fn vector(element: Type) -> Self {
        Type::Vector(Box::new(element))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Arg {
    pub name:  String,
    #[serde(rename = "type")]
    pub type_: Type,
}

impl Arg {
    pub fn new(name: impl Into<String>, type_: Type) -> Self {
        Arg { name: name.into(), type_ }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Constructor {
    pub name:    String,
    /// The custom type this constructor produces.
    pub type_id: TypeId,
    pub args:    Vec<Arg>,
}

/// An RPC call. Its arguments become one structure; `result` is what the
/// call returns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Function {
    pub name:   String,
    pub args:   Vec<Arg>,
    pub result: Type,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomType {
    pub name:         String,
    pub constructors: Vec<Constructor>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Schema {
    pub custom_types: Vec<CustomType>,
    pub functions:    Vec<Function>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an empty custom type and returns its id.
    pub fn add_type(&mut self, name: impl Into<String>) -> TypeId {
        self.custom_types.push(CustomType {
            name:         name.into(),
            constructors: Vec::new(),
        });
        self.custom_types.len() - 1
    }

    /// Appends a constructor to `type_id`.
    ///
    /// # Panics
    ///
    /// Panics if `type_id` was not returned by [`Schema::add_type`].
    pub fn add_constructor(&mut self, type_id: TypeId, name: impl Into<String>, args: Vec<Arg>) {
        self.custom_types[type_id].constructors.push(Constructor {
            name: name.into(),
            type_id,
            args,
        });
    }

    pub fn add_function(&mut self, name: impl Into<String>, args: Vec<Arg>, result: Type) {
        self.functions.push(Function {
            name: name.into(),
            args,
            result,
        });
    }

    pub fn custom_type(&self, id: TypeId) -> Option<&CustomType> {
        self.custom_types.get(id)
    }

    /// Every constructor of every custom type, in schema order.
    pub fn constructors(&self) -> impl Iterator<Item = &Constructor> {
        self.custom_types.iter().flat_map(|t| t.constructors.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_keep_schema_order() {
        let mut schema = Schema::new();
        let a = schema.add_type("A");
        let b = schema.add_type("B");
        schema.add_constructor(b, "b1", vec![]);
        schema.add_constructor(a, "a1", vec![]);
        schema.add_constructor(a, "a2", vec![]);

        let names: Vec<&str> = schema.constructors().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["a1", "a2", "b1"]);
        assert_eq!(schema.custom_types[a].constructors[1].type_id, a);
    }

    #[test]
    fn test_custom_type_lookup() {
        let mut schema = Schema::new();
        schema.add_type("Error");
        let ok = schema.add_type("Ok");
        assert_eq!(schema.custom_type(ok).map(|t| t.name.as_str()), Some("Ok"));
        assert!(schema.custom_type(42).is_none());
    }
}
