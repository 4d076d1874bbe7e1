use std::path::PathBuf;

use thiserror::Error;
use tl_serde_gen_schema::TypeId;

#[derive(Debug, Error)]
pub enum GenError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error at line {line}, column {column}: {msg}")]
    ParseError {
        msg:    String,
        line:   usize,
        column: usize,
    },

    #[error("Verifier error: {0}")]
    VerifierError(String),

    #[error("Empty identifier for {0}")]
    EmptyIdentifier(String),

    #[error("Type #{type_id} cannot be projected: {reason}")]
    UnresolvedType {
        type_id: TypeId,
        reason:  String,
    },

    #[error("Field \"{field}\" of {owner}: {source}")]
    Field {
        owner:  String,
        field:  String,
        #[source]
        source: Box<GenError>,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is out of date, regenerate it", .0.display())]
    OutOfDate(PathBuf),

    #[error("Invalid option \"{key}\": {msg}")]
    InvalidOption {
        key: String,
        msg: String,
    },
}

impl GenError {
    /// Attaches the declaration and field that triggered this error.
    pub fn in_field(self, owner: &str, field: &str) -> Self {
        GenError::Field {
            owner:  owner.to_string(),
            field:  field.to_string(),
            source: Box::new(self),
        }
    }
}
