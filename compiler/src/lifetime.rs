//! Decides which generated types have to carry a `'a` lifetime.
//!
//! Strings and byte strings are projected as borrowed views, so any type that
//! can reach one of them through its fields borrows from the input too.

use tl_serde_gen_schema::{Arg, Constructor, Function, Schema, Type, TypeId};
use tracing::debug;

pub struct LifetimeAnalyzer {
    /// Per custom type: does any of its constructors need a lifetime.
    custom: Vec<bool>,
}

impl LifetimeAnalyzer {
    /// Computes the answer for every custom type of `schema` up front.
    ///
    /// Types start out as "no lifetime" and are flipped as soon as one of
    /// their fields is known to need one, until nothing changes. Each pass is
    /// linear in the schema size and cycles between custom types terminate.
    pub fn new(schema: &Schema) -> Self {
        let mut custom = vec![false; schema.custom_types.len()];
        let mut passes = 0;
        loop {
            passes += 1;
            let mut changed = false;
            for (id, custom_type) in schema.custom_types.iter().enumerate() {
                if custom[id] {
                    continue;
                }
                let needs = custom_type
                    .constructors
                    .iter()
                    .any(|c| c.args.iter().any(|a| type_needs(&a.type_, &custom)));
                if needs {
                    custom[id] = true;
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }
        debug!(
            passes,
            borrowing = custom.iter().filter(|b| **b).count(),
            total = custom.len(),
            "lifetime analysis finished"
        );
        LifetimeAnalyzer { custom }
    }

    pub fn needs_lifetime(&self, type_: &Type) -> bool {
        type_needs(type_, &self.custom)
    }

    pub fn custom_type_needs_lifetime(&self, id: TypeId) -> bool {
        self.custom.get(id).copied().unwrap_or(false)
    }

    pub fn args_need_lifetime(&self, args: &[Arg]) -> bool {
        args.iter().any(|arg| self.needs_lifetime(&arg.type_))
    }

    pub fn constructors_need_lifetime<'c>(
        &self,
        constructors: impl IntoIterator<Item = &'c Constructor>,
    ) -> bool {
        constructors.into_iter().any(|c| self.args_need_lifetime(&c.args))
    }

    pub fn functions_need_lifetime<'f>(&self, functions: impl IntoIterator<Item = &'f Function>) -> bool {
        functions.into_iter().any(|f| self.args_need_lifetime(&f.args))
    }
}

fn type_needs(type_: &Type, custom: &[bool]) -> bool {
    match type_ {
        Type::Bytes | Type::String => true,
        Type::Vector(element) => type_needs(element, custom),
        Type::Custom(id) => custom.get(*id).copied().unwrap_or(false),
        Type::Bool | Type::Int32 | Type::Int53 | Type::Int64 | Type::Double => false,
    }
}
