//! In-memory model of a TL interface schema: custom types with their
//! constructors, RPC functions, and the typed fields they carry.
//!
//! The model is produced by a loader (see `tl-serde-gen-compiler`) or built by
//! hand, and is read-only for the duration of a generation run.
//!
//! ```
//! use tl_serde_gen_schema::*;
//!
//! let mut schema = Schema::new();
//! let shape = schema.add_type("shape");
//! schema.add_constructor(shape, "shapeCircle", vec![Arg::new("radius", Type::Double)]);
//! schema.add_constructor(shape, "shapeSquare", vec![Arg::new("side", Type::Double)]);
//!
//! assert_eq!(schema.custom_type(shape).unwrap().constructors.len(), 2);
//! assert_eq!(schema.constructors().count(), 2);
//! ```

pub mod schema;

pub use schema::*;

/// TL names of the built-in types. Declarations producing one of these are
/// part of the schema prelude and never become custom types.
pub const BUILTIN_TYPES: [&str; 8] = [
    "Bool", "Int32", "Int53", "Int64", "Double", "String", "Bytes", "Vector",
];
