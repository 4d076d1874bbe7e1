//! Generation options, loadable from JSON.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;

use crate::error::GenError;

lazy_static! {
    static ref TYPE_PATH: Regex = Regex::new(r"^(::)?[A-Za-z_][A-Za-z0-9_]*(::[A-Za-z_][A-Za-z0-9_]*)*$").unwrap();
}

/// Path of the deserializer the generated code uses for `Option<Cow<'a, str>>`
/// fields.
pub const DEFAULT_STRING_DESERIALIZER: &str = "crate::cow_de::de_opt_cow_str";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn apply(self, text: String) -> String {
        match self {
            LineEnding::Lf => text,
            LineEnding::CrLf => text.replace('\n', "\r\n"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenOptions {
    pub string_deserializer: String,
    /// Externally defined union aggregating every constructor and function,
    /// e.g. `crate::Any<'a>`. When set, `Object` and `Function` get
    /// conversions to and from it.
    pub maximal_union: Option<String>,
    pub line_ending: LineEnding,
}

impl Default for GenOptions {
    fn default() -> Self {
        GenOptions {
            string_deserializer: DEFAULT_STRING_DESERIALIZER.to_string(),
            maximal_union:       None,
            line_ending:         LineEnding::Lf,
        }
    }
}

impl GenOptions {
    pub fn from_json(text: &str) -> Result<Self, GenError> {
        let options: GenOptions = serde_json::from_str(text).map_err(|e| GenError::InvalidOption {
            key: "config".to_string(),
            msg: e.to_string(),
        })?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<(), GenError> {
        if !TYPE_PATH.is_match(&self.string_deserializer) {
            return Err(GenError::InvalidOption {
                key: "string_deserializer".to_string(),
                msg: format!("{:?} is not a function path", self.string_deserializer),
            });
        }
        self.maximal_union()?;
        Ok(())
    }

    pub fn maximal_union(&self) -> Result<Option<MaximalUnion>, GenError> {
        self.maximal_union.as_deref().map(MaximalUnion::parse).transpose()
    }
}

/// A union type defined outside the generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaximalUnion {
    /// Type path without generic parameters.
    pub path:     String,
    /// Whether the type takes the `'a` lifetime.
    pub lifetime: bool,
}

impl MaximalUnion {
    pub fn parse(text: &str) -> Result<Self, GenError> {
        let text = text.trim();
        let (path, lifetime) = match text.strip_suffix("<'a>") {
            Some(path) => (path.trim_end(), true),
            None => (text, false),
        };
        if !TYPE_PATH.is_match(path) {
            return Err(GenError::InvalidOption {
                key: "maximal_union".to_string(),
                msg: format!("{:?} must be a type path, optionally followed by <'a>", text),
            });
        }
        Ok(MaximalUnion {
            path: path.to_string(),
            lifetime,
        })
    }
}
