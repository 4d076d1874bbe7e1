//! tl-serde-gen
//!
//! Facade over the TL schema loader and the Rust generator, plus the runtime
//! support that generated code refers to.
//!
//! - `load_schema`, `render`, `generate_file` (re-exported from the compiler)
//! - `cow_de::de_opt_cow_str`, the deserializer generated string fields use
//! - `schema_to_json` for inspecting a loaded schema

use std::path::Path;

pub use tl_serde_gen_compiler::{
    compile_schema_to_rust,
    load_schema,
    render,
    GenError,
    GenOptions,
    LineEnding,
    WriteOutcome,
};
pub use tl_serde_gen_schema::{Arg, Constructor, CustomType, Function, Schema, Type, TypeId};

/// Serialize a loaded schema into pretty-printed JSON.
pub fn schema_to_json(schema: &Schema) -> Result<String, GenError> {
    let json = serde_json::to_string_pretty(schema).map_err(std::io::Error::from)?;
    Ok(json)
}

/// Load the TL schema at `input` and write the generated Rust to `output`.
pub fn generate(input: &Path, output: &Path, options: &GenOptions) -> Result<WriteOutcome, GenError> {
    options.validate()?;
    let text = std::fs::read_to_string(input)?;
    let schema = load_schema(&text)?;
    tl_serde_gen_compiler::generate_file(&schema, output, options)
}

pub mod cow_de {
    //! Deserializers referenced by generated code through
    //! `#[serde(deserialize_with = "...")]`.

    use std::borrow::Cow;

    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    struct CowStr<'a>(#[serde(borrow)] Cow<'a, str>);

    /// Deserializes an optional string, borrowing from the input when it
    /// contains no escape sequences.
    pub fn de_opt_cow_str<'de: 'a, 'a, D>(deserializer: D) -> Result<Option<Cow<'a, str>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value: Option<CowStr<'de>> = Option::deserialize(deserializer)?;
        Ok(value.map(|CowStr(s)| s))
    }
}

pub mod error {
    pub use tl_serde_gen_compiler::error::GenError;
}

pub mod schema {
    pub use tl_serde_gen_schema::{Arg, Constructor, CustomType, Function, Schema, Type, TypeId};
}
