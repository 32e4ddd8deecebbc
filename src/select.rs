//! Narrow a parsed document before conversion: JSON Pointer, then jq.
use anyhow::{anyhow, Context, Result};
use jaq_core::{compile::Undefined, load, Compiler, Ctx, RcIter};
use jaq_json::Val;
use serde_json::Value;

/// Pre-conversion selection of the part of each document to type.
#[derive(Debug, Clone, Default)]
pub struct Selector {
    /// e.g. `/data/items/0/payload`
    pub json_pointer: Option<String>,
    /// jq filter; every output becomes its own sample.
    pub jq_expr: Option<String>,
}

impl Selector {
    pub fn is_identity(&self) -> bool {
        self.json_pointer.is_none() && self.jq_expr.is_none()
    }

    pub fn apply(&self, value: Value) -> Result<Vec<Value>> {
        let value = match self.json_pointer.as_deref() {
            None => value,
            Some(pointer) => value
                .pointer(pointer)
                .cloned()
                .ok_or_else(|| anyhow!("JSON pointer {pointer} matched nothing"))?,
        };
        match self.jq_expr.as_deref() {
            None => Ok(vec![value]),
            Some(jq_expr) => run_jaq(jq_expr, &value)
                .with_context(|| format!("failed to apply jq expression `{jq_expr}`")),
        }
    }
}

pub fn run_jaq(filter_src: &str, input: &Value) -> Result<Vec<Value>> {
    let loader = load::Loader::new(jaq_std::defs().chain(jaq_json::defs()));
    let arena = load::Arena::default();
    let program = load::File { code: filter_src, path: () };

    let modules = loader
        .load(&arena, program)
        .map_err(format_parse_errors)?;

    let filter = Compiler::default()
        .with_funs(jaq_std::funs().chain(jaq_json::funs()))
        .compile(modules)
        .map_err(format_undefined_errors)?;

    let inputs = RcIter::new(core::iter::empty());
    let outputs = filter.run((Ctx::new([], &inputs), Val::from(input.clone())));

    let mut out = Vec::new();
    for item in outputs {
        let v = item.map_err(|e| anyhow!("{e:?}"))?;
        // Val prints as JSON text; round-trip it into serde_json
        let value = serde_json::from_str::<Value>(&v.to_string())
            .context("jq produced a value that is not JSON")?;
        out.push(value);
    }
    Ok(out)
}

fn format_parse_errors(
    errs: Vec<(load::File<&str, ()>, load::Error<&str>)>,
) -> anyhow::Error {
    let mut s = String::new();
    for (file, err) in errs {
        s.push_str(&format!("parse error: {err:?} in `{}`\n", file.code));
    }
    anyhow!(s)
}

fn format_undefined_errors(
    errs: Vec<(load::File<&str, ()>, Vec<(&str, Undefined)>)>,
) -> anyhow::Error {
    let mut s = String::new();
    for (file, list) in errs {
        for (name, undef) in list {
            s.push_str(&format!("undefined `{name}`: {undef:?} in `{}`\n", file.code));
        }
    }
    anyhow!(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pointer_selects_subtree() {
        let sel = Selector { json_pointer: Some("/data/0".into()), jq_expr: None };
        let out = sel.apply(json!({"data": [{"a": 1}, {"b": 2}]})).unwrap();
        assert_eq!(out, vec![json!({"a": 1})]);

        let miss = Selector { json_pointer: Some("/nope".into()), jq_expr: None };
        assert!(miss.apply(json!({})).is_err());
    }

    #[test]
    fn jq_outputs_become_samples() {
        let sel = Selector { json_pointer: None, jq_expr: Some(".items[]".into()) };
        let out = sel.apply(json!({"items": [{"id": 1}, {"id": 2, "x": true}]})).unwrap();
        assert_eq!(out, vec![json!({"id": 1}), json!({"id": 2, "x": true})]);
    }

    #[test]
    fn bad_jq_is_an_error() {
        let sel = Selector { json_pointer: None, jq_expr: Some(".[".into()) };
        assert!(sel.apply(json!([])).is_err());
        assert!(Selector::default().is_identity());
    }
}
