//! Declaration text from the typed IR.
pub mod go;
pub mod rust;

use crate::ir::Ty;
use crate::options::{ConvertOptions, Target};
use crate::registry::Registry;

pub use go::GoGenerator;
pub use rust::RustGenerator;

/// One rendered field and the annotation that ties it back to its JSON key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    /// Declaring type; inline Go structs use a dotted path (`Root.Address`).
    pub type_name: String,
    pub ident: String,
    /// Raw JSON key, verbatim.
    pub key: String,
    /// Target annotation text, e.g. `json:"key,omitempty"`.
    pub annotation: String,
    pub optional: bool,
}

/// Result of a successful conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub declaration: String,
    /// Every rendered field, in output order.
    pub annotations: Vec<Annotation>,
}

/// A target language.
pub trait CodeGenerator {
    /// Language tag for editors and file extensions.
    fn language(&self) -> &'static str;

    /// Whether nested objects can be written in place instead of being named.
    fn supports_inline(&self) -> bool;

    /// Render the root declaration followed by every extracted type.
    fn generate(&self, root: &Ty, registry: &Registry, options: &ConvertOptions) -> Conversion;
}

pub fn generator_for(target: Target) -> Box<dyn CodeGenerator> {
    match target {
        Target::Go => Box::new(GoGenerator),
        Target::Rust => Box::new(RustGenerator),
    }
}
