//! JSON settings file, using the key names of the JSON-to-Go editor plugin.
//!
//! ```json
//! {
//!   "generatedTypeName": "AutoGenerated",
//!   "inlineTypeDefinitions": false,
//!   "allOmitEmpty": false,
//!   "target": null,
//!   "numberPolicy": "split",
//!   "detectTime": true,
//!   "preserveValidIdentifiers": true,
//!   "package": null
//! }
//! ```
//!
//! Every key is optional and falls back to the default shown above. An unset
//! `target` means Go; a host that already fixes the target (the CLI
//! subcommand) warns when the file names a different one.
use std::path::Path;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::SettingsError;
use crate::options::{ConvertOptions, NumberPolicy, Target};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct Settings {
    pub generated_type_name: String,
    /// Inverse of `ConvertOptions::extract_nested_types`.
    pub inline_type_definitions: bool,
    /// Same as `ConvertOptions::all_fields_optional`.
    pub all_omit_empty: bool,
    pub target: Option<Target>,
    pub number_policy: NumberPolicy,
    pub detect_time: bool,
    pub preserve_valid_identifiers: bool,
    pub package: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self { target: None, ..Self::from(&ConvertOptions::default()) }
    }
}

impl From<&ConvertOptions> for Settings {
    fn from(o: &ConvertOptions) -> Self {
        Self {
            generated_type_name: o.root_type_name.clone(),
            inline_type_definitions: !o.extract_nested_types,
            all_omit_empty: o.all_fields_optional,
            target: Some(o.target),
            number_policy: o.number_policy,
            detect_time: o.detect_time,
            preserve_valid_identifiers: o.preserve_valid_identifiers,
            package: o.package.clone(),
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let src = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_string_lossy().to_string(),
            source,
        })?;
        let settings = from_str_with_path::<Settings>(&src)?;
        tracing::debug!(path = %path.display(), ?settings, "loaded settings");
        Ok(settings)
    }

    pub fn to_options(&self) -> ConvertOptions {
        ConvertOptions {
            root_type_name: self.generated_type_name.clone(),
            extract_nested_types: !self.inline_type_definitions,
            all_fields_optional: self.all_omit_empty,
            target: self.target.unwrap_or_default(),
            number_policy: self.number_policy,
            detect_time: self.detect_time,
            preserve_valid_identifiers: self.preserve_valid_identifiers,
            package: self.package.clone(),
        }
    }
}

/// Deserialize with JSON-path context in error messages.
pub fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T, SettingsError> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, T>(de).map_err(|err| SettingsError::Invalid {
        path: err.path().to_string(),
        message: err.into_inner().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_convert_options() {
        let s: Settings = from_str_with_path("{}").unwrap();
        assert_eq!(s, Settings::default());
        assert_eq!(s.to_options(), ConvertOptions::default());
        assert_eq!(s.generated_type_name, "AutoGenerated");
        assert!(!s.inline_type_definitions);
        assert_eq!(s.target, None);
    }

    #[test]
    fn plugin_keys() {
        let s: Settings = from_str_with_path(r#"{
            "generatedTypeName": "Payload",
            "inlineTypeDefinitions": true,
            "allOmitEmpty": true,
            "target": "rust",
            "numberPolicy": "unified",
            "package": "model"
        }"#).unwrap();
        let o = s.to_options();
        assert_eq!(o.root_type_name, "Payload");
        assert!(!o.extract_nested_types);
        assert!(o.all_fields_optional);
        assert_eq!(o.target, Target::Rust);
        assert_eq!(o.number_policy, NumberPolicy::Unified);
        assert_eq!(o.package.as_deref(), Some("model"));
        assert!(o.detect_time);
    }

    #[test]
    fn errors_point_at_the_offending_key() {
        let err = from_str_with_path::<Settings>(r#"{"target": "cobol"}"#).unwrap_err();
        match err {
            SettingsError::Invalid { path, .. } => assert_eq!(path, "target"),
            other => panic!("unexpected error: {other}"),
        }

        let err = from_str_with_path::<Settings>(r#"{"allOmitEmpty": "yes"}"#).unwrap_err();
        assert!(err.to_string().starts_with("invalid settings at JSON path allOmitEmpty"));

        assert!(from_str_with_path::<Settings>(r#"{"typo": 1}"#).is_err());
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Settings::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, SettingsError::Io { .. }));
    }
}
