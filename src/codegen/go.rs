use std::fmt::Write;

use super::{Annotation, CodeGenerator, Conversion};
use crate::ir::{Field, Ty};
use crate::options::ConvertOptions;
use crate::registry::Registry;

/// Go structs with `encoding/json` tags.
pub struct GoGenerator;

impl CodeGenerator for GoGenerator {
    fn language(&self) -> &'static str {
        "go"
    }

    fn supports_inline(&self) -> bool {
        true
    }

    fn generate(&self, root: &Ty, registry: &Registry, options: &ConvertOptions) -> Conversion {
        let mut w = GoWriter {
            registry,
            all_optional: options.all_fields_optional,
            annotations: Vec::new(),
        };
        let root_name = registry.root_name();

        let mut out = String::new();
        if let Some(package) = &options.package {
            let _ = writeln!(out, "package {package}\n");
        }
        if root.uses_time() {
            out.push_str("import \"time\"\n\n");
        }

        let root_body = match root {
            Ty::Object(fields) => w.struct_body(fields, root_name, 0),
            other => w.type_expr(other, root_name, 0),
        };
        let _ = writeln!(out, "type {root_name} {root_body}");

        for decl in registry.decls() {
            let body = w.struct_body(&decl.fields, &decl.name, 0);
            let _ = write!(out, "\ntype {} {body}\n", decl.name);
        }

        Conversion { declaration: out, annotations: w.annotations }
    }
}

struct GoWriter<'a> {
    registry: &'a Registry,
    all_optional: bool,
    annotations: Vec<Annotation>,
}

struct Row {
    ident: String,
    ty: String,
    tag: String,
}

impl GoWriter<'_> {
    fn type_expr(&mut self, ty: &Ty, owner: &str, depth: usize) -> String {
        match ty {
            Ty::Bool => "bool".to_string(),
            Ty::Int => "int".to_string(),
            Ty::Int64 => "int64".to_string(),
            Ty::Float => "float64".to_string(),
            Ty::String => "string".to_string(),
            Ty::Time => "time.Time".to_string(),
            Ty::Unknown => "any".to_string(),
            Ty::Array(item) => format!("[]{}", self.type_expr(item, owner, depth)),
            Ty::Object(fields) => match self.registry.name_of(ty) {
                Some(name) => name.to_string(),
                None => self.struct_body(fields, owner, depth),
            },
        }
    }

    /// `struct { ... }` with fields indented one level below `depth`.
    fn struct_body(&mut self, fields: &[Field], owner: &str, depth: usize) -> String {
        if fields.is_empty() {
            return "struct{}".to_string();
        }
        let mut rows = Vec::with_capacity(fields.len());
        for f in fields {
            let optional = self.all_optional || f.optional;
            let tag = json_tag(&f.key, optional);
            self.annotations.push(Annotation {
                type_name: owner.to_string(),
                ident: f.ident.clone(),
                key: f.key.clone(),
                annotation: tag.clone(),
                optional,
            });
            let ty = self.type_expr(&f.ty, &format!("{owner}.{}", f.ident), depth + 1);
            rows.push(Row { ident: f.ident.clone(), ty, tag: quote_tag(&tag) });
        }

        let indent = "\t".repeat(depth + 1);
        let mut out = String::from("struct {\n");
        // gofmt aligns runs of single-line fields; a multi-line type ends the run
        let mut run: Vec<&Row> = Vec::new();
        for row in &rows {
            if row.ty.contains('\n') {
                write_aligned(&mut out, &run, &indent);
                run.clear();
                let _ = writeln!(out, "{indent}{} {} {}", row.ident, row.ty, row.tag);
            } else {
                run.push(row);
            }
        }
        write_aligned(&mut out, &run, &indent);

        out.push_str(&"\t".repeat(depth));
        out.push('}');
        out
    }
}

fn write_aligned(out: &mut String, rows: &[&Row], indent: &str) {
    let ident_w = rows.iter().map(|r| r.ident.len()).max().unwrap_or(0);
    let ty_w = rows.iter().map(|r| r.ty.len()).max().unwrap_or(0);
    for r in rows {
        let _ = writeln!(out, "{indent}{:<ident_w$} {:<ty_w$} {}", r.ident, r.ty, r.tag);
    }
}

/// `json:"key"` / `json:"key,omitempty"`.
fn json_tag(key: &str, omitempty: bool) -> String {
    let mut value = escape_go(key);
    if omitempty {
        value.push_str(",omitempty");
    }
    format!("json:\"{value}\"")
}

/// Struct tags are raw string literals unless they contain a backquote.
fn quote_tag(tag: &str) -> String {
    if tag.contains('`') {
        format!("\"{}\"", escape_go(tag))
    } else {
        format!("`{tag}`")
    }
}

fn escape_go(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}
