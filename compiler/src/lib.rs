//! tl-serde-gen-compiler
//!
//! This crate implements:
//!  1) A tokenizer + parser for TL schema files,
//!  2) A schema verifier (duplicate names, reserved union names, variant clashes),
//!  3) Lifetime analysis and type projection over the schema's type graph,
//!  4) Code generation (`compile_schema_to_rust` → `String`) of serde structs,
//!     tagged unions and their conversions,
//!  5) Idempotent output (`generate_file` only writes changed content),
//!  6) Error types (`GenError`) and generation options (`GenOptions`).

pub mod error;
pub mod utils;
pub mod tokenizer;
pub mod parser;
pub mod verifier;
pub mod naming;
pub mod lifetime;
pub mod projector;
pub mod options;
pub mod gen_rust;
pub mod writer;
pub mod compiler;

pub use compiler::{generate_file, load_schema, render};
pub use error::GenError;
pub use gen_rust::compile_schema_to_rust;
pub use options::{GenOptions, LineEnding};
pub use writer::WriteOutcome;
