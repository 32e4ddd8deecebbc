use std::fmt::Write;

use super::{Annotation, CodeGenerator, Conversion};
use crate::ir::{Field, Ty};
use crate::options::ConvertOptions;
use crate::registry::Registry;

/// Rust structs deriving `serde::{Serialize, Deserialize}`.
///
/// Rust has no anonymous struct types, so every nested object is declared
/// under its registry name.
pub struct RustGenerator;

const DERIVES: &str = "#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]";

impl CodeGenerator for RustGenerator {
    fn language(&self) -> &'static str {
        "rust"
    }

    fn supports_inline(&self) -> bool {
        false
    }

    fn generate(&self, root: &Ty, registry: &Registry, options: &ConvertOptions) -> Conversion {
        let all_optional = options.all_fields_optional;
        let mut annotations = Vec::new();
        let root_name = registry.root_name();

        let mut out = String::from("use serde::{Deserialize, Serialize};\n");
        match root {
            Ty::Object(fields) => {
                write_struct(&mut out, root_name, fields, registry, all_optional, &mut annotations);
            }
            other => {
                let _ = writeln!(out, "\npub type {root_name} = {};", type_expr(other, registry));
            }
        }
        for decl in registry.decls() {
            write_struct(&mut out, &decl.name, &decl.fields, registry, all_optional, &mut annotations);
        }

        Conversion { declaration: out, annotations }
    }
}

fn write_struct(
    out: &mut String,
    name: &str,
    fields: &[Field],
    registry: &Registry,
    all_optional: bool,
    annotations: &mut Vec<Annotation>,
) {
    let _ = writeln!(out, "\n{DERIVES}\npub struct {name} {{");
    for f in fields {
        let optional = all_optional || f.optional;
        // Debug formatting of a str is a valid Rust string literal
        let attr = if optional {
            format!("#[serde(rename = {:?}, default, skip_serializing_if = \"Option::is_none\")]", f.key)
        } else {
            format!("#[serde(rename = {:?})]", f.key)
        };
        let ty = type_expr(&f.ty, registry);
        let ty = if optional { format!("Option<{ty}>") } else { ty };
        let _ = writeln!(out, "    {attr}\n    pub {}: {ty},", f.ident);
        annotations.push(Annotation {
            type_name: name.to_string(),
            ident: f.ident.clone(),
            key: f.key.clone(),
            annotation: attr,
            optional,
        });
    }
    out.push_str("}\n");
}

fn type_expr(ty: &Ty, registry: &Registry) -> String {
    match ty {
        Ty::Bool => "bool".to_string(),
        Ty::Int | Ty::Int64 => "i64".to_string(),
        Ty::Float => "f64".to_string(),
        Ty::String => "String".to_string(),
        Ty::Time => "chrono::DateTime<chrono::FixedOffset>".to_string(),
        Ty::Unknown => "serde_json::Value".to_string(),
        Ty::Array(item) => format!("Vec<{}>", type_expr(item, registry)),
        Ty::Object(_) => match registry.name_of(ty) {
            Some(name) => name.to_string(),
            None => {
                tracing::warn!("nested object without a registered name, falling back to a dynamic value");
                "serde_json::Value".to_string()
            }
        },
    }
}
