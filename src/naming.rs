//! Raw JSON keys → target-language identifiers.
//!
//! Everything that is not an ASCII letter or digit is dropped and treated as a
//! word boundary. Words are then re-joined in the target's casing. Results are
//! deterministic: the same key always maps to the same base identifier, and
//! [`Namer`] appends numeric suffixes when two keys of one object collide.
use std::collections::HashSet;

use heck::ToSnakeCase;
use once_cell::sync::Lazy;
use regex::Regex;

static WORD_SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9]+").unwrap());
static PASCAL_IDENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z][A-Za-z0-9]*$").unwrap());
static SNAKE_IDENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z][a-z0-9_]*$").unwrap());

/// Common initialisms, upper-cased as a whole (golint's list, as used by json-to-go).
static INITIALISMS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "acl", "api", "ascii", "cpu", "css", "dns", "eof", "guid", "html", "http", "https", "id",
        "ip", "json", "lhs", "qps", "ram", "rhs", "rpc", "sla", "smtp", "sql", "ssh", "tcp",
        "tls", "ttl", "udp", "ui", "uid", "uuid", "uri", "url", "utf8", "vm", "xml", "xmpp",
        "xsrf", "xss",
    ]
    .into_iter()
    .collect()
});

/// Strict and reserved keywords that cannot be used as plain Rust identifiers.
static RUST_KEYWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "abstract", "as", "async", "await", "become", "box", "break", "const", "continue",
        "crate", "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen",
        "if", "impl", "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override",
        "priv", "pub", "ref", "return", "self", "static", "struct", "super", "trait", "true",
        "try", "type", "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
    ]
    .into_iter()
    .collect()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Casing {
    /// `UserID`, exported Go fields and all type names.
    Pascal,
    /// `user_id`, Rust fields.
    Snake,
}

/// How one target spells field and type identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameStyle {
    pub fields: Casing,
    /// Upper-case whole sub-words such as `id` or `url` in Pascal names.
    pub initialisms: bool,
    /// Keys that already are valid identifiers in `fields` casing are kept verbatim.
    pub preserve_valid: bool,
    /// Escape Rust keywords (`r#type`, `self_`).
    pub rust_keywords: bool,
}

impl NameStyle {
    pub fn go(preserve_valid: bool) -> Self {
        Self { fields: Casing::Pascal, initialisms: true, preserve_valid, rust_keywords: false }
    }

    pub fn rust(preserve_valid: bool) -> Self {
        Self { fields: Casing::Snake, initialisms: false, preserve_valid, rust_keywords: true }
    }

    /// Identifier for the field at 1-based `position` of an object.
    pub fn field_ident(&self, raw: &str, position: usize) -> String {
        match self.fields {
            Casing::Pascal => {
                if self.preserve_valid && PASCAL_IDENT.is_match(raw) {
                    return raw.to_string();
                }
                with_placeholder(pascal_case(raw, self.initialisms), "Field", position)
            }
            Casing::Snake => {
                let ident = if self.preserve_valid && SNAKE_IDENT.is_match(raw) {
                    raw.to_string()
                } else {
                    with_placeholder(snake_case(raw), "field_", position)
                };
                if self.rust_keywords { escape_rust_keyword(ident) } else { ident }
            }
        }
    }

    /// Type name derived from a key (or any other hint). Always Pascal case.
    pub fn type_name(&self, raw: &str) -> String {
        let name = if self.preserve_valid && PASCAL_IDENT.is_match(raw) {
            raw.to_string()
        } else {
            with_placeholder(pascal_case(raw, self.initialisms), "Type", 0)
        };
        // `Self` is the only Pascal-cased keyword.
        if self.rust_keywords && name == "Self" { format!("{name}_") } else { name }
    }

    /// Type names the generated file already refers to; extracted types must not shadow them.
    pub fn reserved_type_names(&self) -> &'static [&'static str] {
        if self.rust_keywords {
            &["Self", "String", "Option", "Vec", "Box", "Result", "Serialize", "Deserialize"]
        } else {
            &[]
        }
    }
}

/// `"user_id"` → `UserId` (or `UserID` with initialisms). Case inside a word is kept.
pub fn pascal_case(raw: &str, initialisms: bool) -> String {
    let mut out = String::with_capacity(raw.len());
    for word in WORD_SEPARATORS.split(raw).filter(|w| !w.is_empty()) {
        for hump in humps(word) {
            if initialisms && INITIALISMS.contains(hump.to_ascii_lowercase().as_str()) {
                out.push_str(&hump.to_ascii_uppercase());
            } else {
                let mut chars = hump.chars();
                if let Some(first) = chars.next() {
                    out.push(first.to_ascii_uppercase());
                    out.push_str(chars.as_str());
                }
            }
        }
    }
    out
}

/// `"userID"` → `user_id`.
pub fn snake_case(raw: &str) -> String {
    let joined = WORD_SEPARATORS
        .split(raw)
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join("_");
    joined.to_snake_case()
}

/// Split a separator-free word at lower→upper and digit→upper transitions.
fn humps(word: &str) -> Vec<&str> {
    let bytes = word.as_bytes();
    let mut out = Vec::new();
    let mut start = 0;
    for i in 1..bytes.len() {
        let prev = bytes[i - 1];
        if bytes[i].is_ascii_uppercase() && (prev.is_ascii_lowercase() || prev.is_ascii_digit()) {
            out.push(&word[start..i]);
            start = i;
        }
    }
    if start < word.len() {
        out.push(&word[start..]);
    }
    out
}

fn with_placeholder(ident: String, placeholder: &str, position: usize) -> String {
    if ident.is_empty() {
        if position == 0 { placeholder.trim_end_matches('_').to_string() } else { format!("{placeholder}{position}") }
    } else if ident.starts_with(|c: char| c.is_ascii_digit()) {
        format!("{placeholder}{ident}")
    } else {
        ident
    }
}

fn escape_rust_keyword(ident: String) -> String {
    if !RUST_KEYWORDS.contains(ident.as_str()) {
        return ident;
    }
    match ident.as_str() {
        // not allowed as raw identifiers
        "self" | "super" | "crate" => format!("{ident}_"),
        _ => format!("r#{ident}"),
    }
}

/// Hands out unique identifiers within one scope (one object, or the set of type names).
#[derive(Debug, Default)]
pub struct Namer {
    taken: HashSet<String>,
}

impl Namer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reserve(&mut self, name: &str) {
        self.taken.insert(name.to_string());
    }

    /// Returns `base` if unused, otherwise `base2`, `base3`, ...
    pub fn claim(&mut self, base: &str) -> String {
        if self.taken.insert(base.to_string()) {
            return base.to_string();
        }
        let mut n = 2;
        loop {
            let candidate = match base.strip_prefix("r#") {
                Some(bare) => format!("{bare}{n}"),
                None => format!("{base}{n}"),
            };
            if self.taken.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }
}
