// Strongly-typed IR for codegen. No serde_json::Value here.

#[derive(Debug, Clone, PartialEq)]
pub enum Ty {
    Bool,
    Int,                     // integer-valued, fits in 32 bits
    Int64,                   // integer-valued, needs 64 bits
    Float,
    String,
    Time,                    // RFC 3339 timestamps
    Unknown,                 // null-only, empty, or disagreeing evidence
    Array(Box<Ty>),
    Object(Vec<Field>),      // first-seen key order
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub key: String,         // raw JSON key, verbatim
    pub ident: String,       // sanitized, unique within the object
    pub ty: Ty,
    pub optional: bool,      // absent (or null next to a concrete value) in some sibling
}

impl Ty {
    /// Canonical fingerprint: raw keys, optionality and kinds, in field order.
    /// Two objects with equal signatures render to the same declaration.
    pub fn signature(&self) -> String {
        let mut out = String::new();
        self.write_signature(&mut out);
        out
    }

    fn write_signature(&self, out: &mut String) {
        match self {
            Ty::Bool => out.push_str("bool"),
            Ty::Int => out.push_str("int"),
            Ty::Int64 => out.push_str("int64"),
            Ty::Float => out.push_str("float"),
            Ty::String => out.push_str("string"),
            Ty::Time => out.push_str("time"),
            Ty::Unknown => out.push_str("any"),
            Ty::Array(item) => {
                out.push('[');
                item.write_signature(out);
                out.push(']');
            }
            Ty::Object(fields) => {
                out.push('{');
                for (i, f) in fields.iter().enumerate() {
                    if i > 0 { out.push(','); }
                    // keys are JSON-escaped so separators inside keys stay unambiguous
                    out.push_str(&serde_json::to_string(&f.key).unwrap_or_default());
                    if f.optional { out.push('?'); }
                    out.push(':');
                    f.ty.write_signature(out);
                }
                out.push('}');
            }
        }
    }

    /// Strip array wrappers.
    pub fn innermost(&self) -> &Ty {
        match self {
            Ty::Array(item) => item.innermost(),
            other => other,
        }
    }

    pub fn uses_time(&self) -> bool {
        match self {
            Ty::Time => true,
            Ty::Array(item) => item.uses_time(),
            Ty::Object(fields) => fields.iter().any(|f| f.ty.uses_time()),
            _ => false,
        }
    }
}
