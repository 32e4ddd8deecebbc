//! Text → `serde_json::Value`, keeping object keys in document order.
use serde_json::Value;

use crate::error::ParseError;

pub fn parse_json(text: &str) -> Result<Value, ParseError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    if text.trim().is_empty() {
        return Err(ParseError::empty());
    }
    let value = serde_json::from_str::<Value>(text)?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseErrorKind;

    #[test]
    fn keeps_key_order() {
        let v = parse_json(r#"{"zeta": 1, "alpha": 2, "mid": 3}"#).unwrap();
        let keys: Vec<&str> = v.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn tolerates_bom_and_whitespace() {
        let v = parse_json("\u{feff}  \n [1, 2]\n").unwrap();
        assert!(v.is_array());
    }

    #[test]
    fn syntax_error_has_position() {
        let err = parse_json("{\n  \"a\": 1,\n  \"b\": }").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::Syntax);
        assert_eq!(err.line, 3);
        assert!(err.column > 0);
        assert!(!err.message.contains(" at line "));
    }

    #[test]
    fn truncated_input_is_eof() {
        let err = parse_json(r#"{"a": [1, 2"#).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::Eof);
    }

    #[test]
    fn empty_input_is_rejected() {
        let err = parse_json("   \n\t").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::Empty);
        assert_eq!(err.to_string(), "invalid JSON: no JSON content");
    }
}
