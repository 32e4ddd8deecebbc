//! Convert JSON text into struct declarations.
//!
//! The pipeline is parse → infer → lower (with identifier sanitization) →
//! register nested types → render. Every call builds its own state and shares
//! nothing with other calls, so [`convert`] can run concurrently from any
//! number of threads. It is cheap enough to run on every edit; throttling is up
//! to the caller.
//!
//! ```
//! use json_to_struct::{convert, ConvertOptions};
//!
//! let out = convert(r#"{"name": "Ann", "age": 30}"#, &ConvertOptions::default()).unwrap();
//! assert!(out.declaration.starts_with("type AutoGenerated struct {"));
//! assert!(out.declaration.contains("`json:\"age\"`"));
//! ```
pub mod codegen;
pub mod error;
pub mod host;
pub mod inference;
pub mod ir;
pub mod lower;
pub mod naming;
pub mod options;
pub mod parse;
pub mod registry;
pub mod select;
pub mod settings;

use serde_json::Value;

pub use codegen::{Annotation, CodeGenerator, Conversion};
pub use error::{ParseError, SettingsError};
pub use options::{ConvertOptions, NumberPolicy, Target};

use crate::lower::Lowering;
use crate::registry::Registry;

/// Parse `text` and render it. Fails only when `text` is not valid JSON.
pub fn convert(text: &str, options: &ConvertOptions) -> Result<Conversion, ParseError> {
    let value = parse::parse_json(text)?;
    Ok(convert_value(&value, options))
}

/// Render an already parsed value. Never fails.
pub fn convert_value(value: &Value, options: &ConvertOptions) -> Conversion {
    convert_samples([value], options)
}

/// Treat every value as a sample of the same type and render their union.
pub fn convert_samples<'a, I>(values: I, options: &ConvertOptions) -> Conversion
where
    I: IntoIterator<Item = &'a Value>,
{
    let shape = inference::infer_from_values(values);

    let names = options.name_style();
    let lowering = Lowering {
        numbers: options.number_policy,
        detect_time: options.detect_time,
        names,
    };
    let root = lowering.lower(&shape);

    let generator = codegen::generator_for(options.target);
    let root_name = names.type_name(&options.root_type_name);
    let registry = if options.extract_nested_types || !generator.supports_inline() {
        Registry::build(&root, &root_name, &names)
    } else {
        Registry::inline(&root_name)
    };
    tracing::debug!(
        target_language = generator.language(),
        root = %registry.root_name(),
        root_kind = shape.kind_name(),
        extracted = registry.decls().len(),
        "rendering declaration"
    );

    generator.generate(&root, &registry, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn go(text: &str) -> Conversion {
        convert(text, &ConvertOptions::default()).unwrap()
    }

    #[test]
    fn scenario_default_options() {
        let out = go(r#"{"name":"Ann","age":30,"tags":["x","y"]}"#);
        assert_eq!(
            out.declaration,
            "type AutoGenerated struct {\n\
             \tName string   `json:\"name\"`\n\
             \tAge  int      `json:\"age\"`\n\
             \tTags []string `json:\"tags\"`\n\
             }\n"
        );
        let keys: Vec<&str> = out.annotations.iter().map(|a| a.key.as_str()).collect();
        assert_eq!(keys, ["name", "age", "tags"]);
        assert!(out.annotations.iter().all(|a| !a.optional));
    }

    #[test]
    fn scenario_all_optional() {
        let options = ConvertOptions { all_fields_optional: true, ..Default::default() };
        let out = convert(r#"{"name":"Ann","age":30,"tags":["x","y"]}"#, &options).unwrap();
        let idents: Vec<&str> = out.annotations.iter().map(|a| a.ident.as_str()).collect();
        assert_eq!(idents, ["Name", "Age", "Tags"]);
        assert!(out.annotations.iter().all(|a| a.optional && a.annotation.ends_with(",omitempty\"")));
    }

    #[test]
    fn valid_json_never_errors() {
        for text in ["null", "true", "1.5", "\"s\"", "[]", "{}", "[[[]]]", "[null, null]", r#"{"":{"":[{}]}}"#] {
            assert!(convert(text, &ConvertOptions::default()).is_ok(), "{text}");
            assert!(convert(text, &ConvertOptions::rust()).is_ok(), "{text}");
        }
    }

    #[test]
    fn invalid_json_always_errors() {
        for text in ["", "{", "[1,]", "{'a': 1}", "nul", "{\"a\" 1}", "[1] [2]"] {
            assert!(convert(text, &ConvertOptions::default()).is_err(), "{text}");
        }
    }

    #[test]
    fn idempotent_output() {
        let text = r#"{"a": {"x": 1}, "list": [{"b": 2}, {"b": 3, "c": "x"}], "when": "2024-01-01T00:00:00Z"}"#;
        for options in [ConvertOptions::default(), ConvertOptions::rust(), ConvertOptions { extract_nested_types: false, ..Default::default() }] {
            assert_eq!(convert(text, &options).unwrap(), convert(text, &options).unwrap());
        }
    }

    #[test]
    fn every_annotation_carries_its_raw_key() {
        let text = r#"{"first-name": "a", "2fa": true, "": 1, "user_id": {"inner key": [1]}, "a-b": 1, "a_b": 2}"#;
        for options in [ConvertOptions::default(), ConvertOptions::rust(), ConvertOptions { extract_nested_types: false, ..Default::default() }] {
            let out = convert(text, &options).unwrap();
            assert_eq!(out.annotations.len(), 7);
            for a in &out.annotations {
                assert!(a.annotation.contains(&format!("\"{}", a.key)), "{a:?}");
            }
        }
    }

    #[test]
    fn colliding_keys_both_survive() {
        let out = go(r#"{"a-b": 1, "a_b": 2}"#);
        assert!(out.declaration.contains("\tAB  int `json:\"a-b\"`\n"));
        assert!(out.declaration.contains("\tAB2 int `json:\"a_b\"`\n"));
    }

    #[test]
    fn optional_inferred_from_array_samples() {
        let out = go(r#"[{"a":1},{"a":1,"b":2}]"#);
        assert_eq!(
            out.declaration,
            "type AutoGenerated []AutoGeneratedElem\n\
             \n\
             type AutoGeneratedElem struct {\n\
             \tA int `json:\"a\"`\n\
             \tB int `json:\"b,omitempty\"`\n\
             }\n"
        );
    }

    #[test]
    fn heterogeneous_array_is_any() {
        let out = go("[1, \"two\", true]");
        assert_eq!(out.declaration, "type AutoGenerated []any\n");
    }

    #[test]
    fn nested_extraction_shares_one_declaration() {
        let out = go(r#"{"a":{"x":1},"b":{"x":1}}"#);
        assert_eq!(
            out.declaration,
            "type AutoGenerated struct {\n\
             \tA A `json:\"a\"`\n\
             \tB A `json:\"b\"`\n\
             }\n\
             \n\
             type A struct {\n\
             \tX int `json:\"x\"`\n\
             }\n"
        );
        assert_eq!(out.declaration.matches("struct {").count(), 2);
    }

    #[test]
    fn inline_nested_types() {
        let options = ConvertOptions { extract_nested_types: false, ..Default::default() };
        let out = convert(r#"{"id": 1, "owner": {"name": "x", "tags": []}, "ok": true, "n": 2}"#, &options).unwrap();
        assert_eq!(
            out.declaration,
            "type AutoGenerated struct {\n\
             \tID int `json:\"id\"`\n\
             \tOwner struct {\n\
             \t\tName string `json:\"name\"`\n\
             \t\tTags []any  `json:\"tags\"`\n\
             \t} `json:\"owner\"`\n\
             \tOk bool `json:\"ok\"`\n\
             \tN  int  `json:\"n\"`\n\
             }\n"
        );
        let owners: Vec<&str> = out.annotations.iter().map(|a| a.type_name.as_str()).collect();
        assert_eq!(owners, ["AutoGenerated", "AutoGenerated", "AutoGenerated.Owner", "AutoGenerated.Owner", "AutoGenerated", "AutoGenerated"]);
    }

    #[test]
    fn package_and_time_import() {
        let options = ConvertOptions { package: Some("model".into()), root_type_name: "event".into(), ..Default::default() };
        let out = convert(r#"{"at": "2024-02-11T09:30:00Z"}"#, &options).unwrap();
        assert_eq!(
            out.declaration,
            "package model\n\nimport \"time\"\n\ntype Event struct {\n\tAt time.Time `json:\"at\"`\n}\n"
        );
    }

    #[test]
    fn primitive_roots() {
        assert_eq!(go("\"x\"").declaration, "type AutoGenerated string\n");
        assert_eq!(go("null").declaration, "type AutoGenerated any\n");
        assert_eq!(go("{}").declaration, "type AutoGenerated struct{}\n");
    }

    #[test]
    fn samples_are_merged() {
        let docs = [json!({"id": 1}), json!({"id": 2, "note": "x"})];
        let out = convert_samples(docs.iter(), &ConvertOptions::default());
        assert!(out.declaration.contains("`json:\"note,omitempty\"`"));
        assert!(out.declaration.contains("`json:\"id\"`"));
    }

    #[test]
    fn odd_keys_are_escaped_in_tags() {
        let out = go(r#"{"say \"hi\"": 1, "back`tick": 2}"#);
        assert!(out.declaration.contains("`json:\"say \\\"hi\\\"\"`"));
        assert!(out.declaration.contains("\"json:\\\"back`tick\\\"\""));
    }
}
