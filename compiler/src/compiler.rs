use std::path::Path;

use tl_serde_gen_schema::Schema;
use tracing::debug;

use crate::{
    error::GenError,
    gen_rust::compile_schema_to_rust,
    options::GenOptions,
    parser::parse_schema,
    tokenizer::tokenize_schema,
    verifier::verify_schema,
    writer::{write_if_changed, WriteOutcome},
};

/// Load a textual TL schema into a `Schema`.
/// Returns `Err(GenError)` if tokenization/parsing/verification fails.
pub fn load_schema(text: &str) -> Result<Schema, GenError> {
    let tokens = tokenize_schema(text)?;
    let schema = parse_schema(&tokens)?;
    verify_schema(&schema)?;
    debug!(
        tokens = tokens.len(),
        types = schema.custom_types.len(),
        functions = schema.functions.len(),
        "loaded schema"
    );
    Ok(schema)
}

/// Generate the Rust source for `schema` with the configured line endings.
pub fn render(schema: &Schema, options: &GenOptions) -> Result<String, GenError> {
    let code = compile_schema_to_rust(schema, options)?;
    Ok(options.line_ending.apply(code))
}

/// Generate the Rust source for `schema` and store it at `path`, touching the
/// file only when its content changes.
pub fn generate_file(schema: &Schema, path: &Path, options: &GenOptions) -> Result<WriteOutcome, GenError> {
    let code = render(schema, options)?;
    write_if_changed(path, &code)
}
