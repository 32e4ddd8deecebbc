//! Names for extracted nested types.
//!
//! A registry lives for exactly one conversion. It walks the lowered tree in
//! pre-order, gives every distinct object signature one type name, and
//! remembers the order in which the signatures were first met so that
//! declarations come out in a stable order.
use std::collections::HashMap;

use crate::ir::{Field, Ty};
use crate::naming::{NameStyle, Namer};

/// A named object type to be declared after the root.
#[derive(Debug, Clone, PartialEq)]
pub struct Decl {
    pub name: String,
    pub fields: Vec<Field>,
}

#[derive(Debug, Default)]
pub struct Registry {
    root_name: String,
    by_signature: HashMap<String, String>,
    decls: Vec<Decl>,
    namer: Namer,
}

impl Registry {
    /// A registry that extracts nothing: every nested object stays inline.
    pub fn inline(root_name: &str) -> Self {
        Self { root_name: root_name.to_string(), ..Self::default() }
    }

    /// `root_name` is suffixed if it clashes with a name the target reserves.
    pub fn build(root: &Ty, root_name: &str, names: &NameStyle) -> Self {
        let mut reg = Self::default();
        for reserved in names.reserved_type_names() {
            reg.namer.reserve(reserved);
        }
        reg.root_name = reg.namer.claim(root_name);
        match root {
            Ty::Object(fields) => {
                for f in fields {
                    reg.discover(&f.ty, &f.key, names);
                }
            }
            other => {
                let hint = format!("{}Elem", reg.root_name);
                reg.discover(other, &hint, names)
            }
        }
        reg
    }

    fn discover(&mut self, ty: &Ty, hint: &str, names: &NameStyle) {
        let inner = ty.innermost();
        let Ty::Object(fields) = inner else { return };
        let signature = inner.signature();
        if self.by_signature.contains_key(&signature) {
            return;
        }
        let name = self.namer.claim(&names.type_name(hint));
        tracing::debug!(%name, fields = fields.len(), "extracted nested type");
        self.by_signature.insert(signature, name.clone());
        self.decls.push(Decl { name, fields: fields.clone() });
        for f in fields {
            self.discover(&f.ty, &f.key, names);
        }
    }

    pub fn root_name(&self) -> &str {
        &self.root_name
    }

    /// Declared name for a nested object type, if it was extracted.
    pub fn name_of(&self, ty: &Ty) -> Option<&str> {
        match ty {
            Ty::Object(_) => self.by_signature.get(&ty.signature()).map(String::as_str),
            _ => None,
        }
    }

    /// Extracted declarations in first-discovered order (the root is not included).
    pub fn decls(&self) -> &[Decl] {
        &self.decls
    }
}
