use std::collections::HashMap;

use crate::{
    tokenizer::Token,
    utils::{error, quote},
    error::GenError,
};
use lazy_static::lazy_static;
use regex::Regex;
use tl_serde_gen_schema::{Arg, Schema, Type, TypeId, BUILTIN_TYPES};

lazy_static! {
    static ref IDENTIFIER:        Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_.]*$").unwrap();
    static ref COLON:             Regex = Regex::new(r"^:$").unwrap();
    static ref EQUALS:            Regex = Regex::new(r"^=$").unwrap();
    static ref SEMICOLON:         Regex = Regex::new(r"^;$").unwrap();
    static ref LEFT_ANGLE:        Regex = Regex::new(r"^<$").unwrap();
    static ref RIGHT_ANGLE:       Regex = Regex::new(r"^>$").unwrap();
    static ref PRELUDE_SYNTAX:    Regex = Regex::new(r"^[{}?#\[\]!%]$").unwrap();
    static ref FUNCTIONS_SECTION: Regex = Regex::new(r"^---functions---$").unwrap();
    static ref TYPES_SECTION:     Regex = Regex::new(r"^---types---$").unwrap();
    static ref EOF:               Regex = Regex::new(r"^$").unwrap();
}

/// A field type as written, before names are resolved against the schema.
#[derive(Debug, Clone, PartialEq)]
enum TypeRef {
    Named {
        name:   String,
        line:   usize,
        column: usize,
    },
    Vector(Box<TypeRef>),
}

#[derive(Debug)]
struct RawArg {
    name:  String,
    type_: TypeRef,
}

#[derive(Debug)]
struct Declaration {
    name:        String,
    args:        Vec<RawArg>,
    result:      TypeRef,
    is_function: bool,
}

/// Parses TL declarations into a [`Schema`].
///
/// Declarations producing a built-in type (`boolTrue = Bool;`,
/// `vector {t:Type} # [ t ] = Vector t;`, ...) are skipped. Field types are
/// resolved after all declarations are read, so forward references work.
pub fn parse_schema(tokens: &[Token]) -> Result<Schema, GenError> {
    let declarations = parse_declarations(tokens)?;

    let mut schema = Schema::new();
    let mut type_ids: HashMap<String, TypeId> = HashMap::new();
    let mut constructor_types: HashMap<String, TypeId> = HashMap::new();

    for decl in declarations.iter().filter(|d| !d.is_function) {
        let result = match &decl.result {
            TypeRef::Named { name, .. } => name.clone(),
            TypeRef::Vector(_) => {
                return Err(GenError::VerifierError(format!(
                    "Constructor {} cannot produce a vector",
                    quote(&decl.name)
                )));
            }
        };
        let type_id = *type_ids
            .entry(result.clone())
            .or_insert_with(|| schema.add_type(result));
        constructor_types.insert(decl.name.clone(), type_id);
    }

    let resolver = Resolver {
        type_ids:          &type_ids,
        constructor_types: &constructor_types,
    };

    for decl in &declarations {
        let mut args = Vec::with_capacity(decl.args.len());
        for arg in &decl.args {
            args.push(Arg::new(arg.name.clone(), resolver.resolve(&arg.type_, &arg.name)?));
        }

        if decl.is_function {
            let result = resolver.resolve(&decl.result, "result")?;
            schema.add_function(decl.name.clone(), args, result);
        } else {
            let type_id = constructor_types[&decl.name];
            schema.add_constructor(type_id, decl.name.clone(), args);
        }
    }

    Ok(schema)
}

struct Resolver<'a> {
    type_ids:          &'a HashMap<String, TypeId>,
    constructor_types: &'a HashMap<String, TypeId>,
}

impl Resolver<'_> {
    fn resolve(&self, type_ref: &TypeRef, field: &str) -> Result<Type, GenError> {
        let (name, line, column) = match type_ref {
            TypeRef::Vector(element) => return Ok(Type::vector(self.resolve(element, field)?)),
            TypeRef::Named { name, line, column } => (name, *line, *column),
        };

        let resolved = match name.as_str() {
            "Bool" | "bool" => Type::Bool,
            "int32" | "Int32" | "int" => Type::Int32,
            "int53" | "Int53" => Type::Int53,
            "int64" | "Int64" | "long" => Type::Int64,
            "double" | "Double" => Type::Double,
            "string" | "String" => Type::String,
            "bytes" | "Bytes" => Type::Bytes,
            other => {
                // A bare constructor name stands for the type it produces.
                let type_id = self
                    .type_ids
                    .get(other)
                    .or_else(|| self.constructor_types.get(other));
                match type_id {
                    Some(&id) => Type::Custom(id),
                    None => {
                        return Err(error(
                            &format!(
                                "The type {} is not defined for field {}",
                                quote(other),
                                quote(field)
                            ),
                            line,
                            column,
                        ));
                    }
                }
            }
        };
        Ok(resolved)
    }
}

fn parse_declarations(tokens: &[Token]) -> Result<Vec<Declaration>, GenError> {
    let mut declarations = Vec::new();
    let mut is_function  = false;
    let mut index        = 0;

    fn current_token(tokens: &[Token], index: usize) -> Result<&Token, GenError> {
        match tokens.get(index).or_else(|| tokens.last()) {
            Some(tok) => Ok(tok),
            None => Err(error("Unexpected end of tokens", 0, 0)),
        }
    }

    fn eat(tokens: &[Token], index: &mut usize, test: &Regex) -> Result<bool, GenError> {
        if *index < tokens.len() && test.is_match(&current_token(tokens, *index)?.text) {
            *index += 1;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn expect(tokens: &[Token], index: &mut usize, test: &Regex, expected: &str) -> Result<(), GenError> {
        if !eat(tokens, index, test)? {
            let tok = current_token(tokens, *index)?;
            return Err(error(
                &format!("Expected {} but found {}", expected, quote(&tok.text)),
                tok.line,
                tok.column,
            ));
        }
        Ok(())
    }

    // Collects tokens up to the terminator and consumes it. Running into
    // `forbidden` or the end of input first is an error.
    fn until<'t>(
        tokens: &'t [Token],
        index: &mut usize,
        stop: &Regex,
        forbidden: &Regex,
        expected: &str,
    ) -> Result<&'t [Token], GenError> {
        let start = *index;
        while *index < tokens.len() && !stop.is_match(&tokens[*index].text) {
            let tok = &tokens[*index];
            if EOF.is_match(&tok.text) || forbidden.is_match(&tok.text) {
                return Err(error(
                    &format!("Expected {} but found {}", expected, quote(&tok.text)),
                    tok.line,
                    tok.column,
                ));
            }
            *index += 1;
        }
        let body = &tokens[start..*index];
        expect(tokens, index, stop, expected)?;
        Ok(body)
    }

    fn parse_type_ref(tokens: &[Token], index: &mut usize) -> Result<TypeRef, GenError> {
        let tok = match tokens.get(*index) {
            Some(tok) => tok,
            None => {
                let (line, column) = tokens.last().map_or((0, 0), |t| (t.line, t.column));
                return Err(error("Expected type but found end of declaration", line, column));
            }
        };
        expect(tokens, index, &IDENTIFIER, "type")?;

        if eat(tokens, index, &LEFT_ANGLE)? {
            if !tok.text.eq_ignore_ascii_case("vector") {
                return Err(error(
                    &format!("Type {} does not take parameters", quote(&tok.text)),
                    tok.line,
                    tok.column,
                ));
            }
            let element = parse_type_ref(tokens, index)?;
            if *index >= tokens.len() {
                return Err(error("Expected \">\" but found end of declaration", tok.line, tok.column));
            }
            expect(tokens, index, &RIGHT_ANGLE, "\">\"")?;
            return Ok(TypeRef::Vector(Box::new(element)));
        }

        Ok(TypeRef::Named {
            name:   tok.text.clone(),
            line:   tok.line,
            column: tok.column,
        })
    }

    while index < tokens.len() && !eat(tokens, &mut index, &EOF)? {
        if eat(tokens, &mut index, &FUNCTIONS_SECTION)? {
            is_function = true;
            continue;
        }
        if eat(tokens, &mut index, &TYPES_SECTION)? {
            is_function = false;
            continue;
        }

        let name_tok = current_token(tokens, index)?;
        expect(tokens, &mut index, &IDENTIFIER, "identifier")?;

        let body   = until(tokens, &mut index, &EQUALS, &SEMICOLON, "\"=\"")?;
        let result = until(tokens, &mut index, &SEMICOLON, &EQUALS, "\";\"")?;

        // Functions may return built-in types; only constructors of them are prelude.
        let is_prelude = body.iter().any(|t| PRELUDE_SYNTAX.is_match(&t.text))
            || (!is_function && result.first().map_or(false, |t| BUILTIN_TYPES.contains(&t.text.as_str())));
        if is_prelude {
            continue;
        }

        let mut args = Vec::new();
        let mut i = 0;
        while i < body.len() {
            let arg_tok = &body[i];
            expect(body, &mut i, &IDENTIFIER, "field name")?;
            expect(body, &mut i, &COLON, "\":\"")?;
            let type_ = parse_type_ref(body, &mut i)?;
            args.push(RawArg {
                name: arg_tok.text.clone(),
                type_,
            });
        }

        let mut i = 0;
        let result_type = parse_type_ref(result, &mut i)?;
        if i < result.len() {
            let tok = &result[i];
            return Err(error(
                &format!("Unexpected token {}", quote(&tok.text)),
                tok.line,
                tok.column,
            ));
        }

        declarations.push(Declaration {
            name:   name_tok.text.clone(),
            args,
            result: result_type,
            is_function,
        });
    }

    Ok(declarations)
}
