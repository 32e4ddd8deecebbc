use serde::Deserialize;

use crate::naming::NameStyle;

/// Output language of the generated declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    /// Go structs with `json:"..."` tags
    #[default]
    Go,
    /// Rust structs deriving serde traits
    Rust,
}

/// How JSON numbers map to static types. Fixed for a whole conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum NumberPolicy {
    /// Integer-only positions become `int` (`int64` past 32 bits); anything with
    /// a fraction or exponent becomes `float64`, and so do unsigned integers
    /// past `i64::MAX`.
    #[default]
    #[value(name = "split")]
    #[serde(rename = "split")]
    SplitIntegers,
    /// Every number is `float64`.
    Unified,
}

/// Configuration of a single conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Name of the top-level type.
    pub root_type_name: String,
    /// Give nested objects their own named declarations, shared between
    /// identical shapes. When false they are written inline where the target
    /// allows it.
    pub extract_nested_types: bool,
    /// Mark every field optional, regardless of what inference found.
    pub all_fields_optional: bool,
    pub target: Target,
    pub number_policy: NumberPolicy,
    /// Strings that are all RFC 3339 timestamps become a time type.
    pub detect_time: bool,
    /// Keep keys that already are valid identifiers verbatim.
    pub preserve_valid_identifiers: bool,
    /// Go only: prepend a `package` clause.
    pub package: Option<String>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            root_type_name: "AutoGenerated".to_string(),
            extract_nested_types: true,
            all_fields_optional: false,
            target: Target::Go,
            number_policy: NumberPolicy::SplitIntegers,
            detect_time: true,
            preserve_valid_identifiers: true,
            package: None,
        }
    }
}

impl ConvertOptions {
    pub fn rust() -> Self {
        Self { target: Target::Rust, ..Default::default() }
    }

    pub fn name_style(&self) -> NameStyle {
        match self.target {
            Target::Go => NameStyle::go(self.preserve_valid_identifiers),
            Target::Rust => NameStyle::rust(self.preserve_valid_identifiers),
        }
    }
}
