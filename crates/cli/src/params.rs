//! Engine parameter loading: a JSON config file overlaid with inline params.

use crate::error::CliError;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Parses a JSON object, naming `source` in the error.
fn parse_object(text: &str, source: &str) -> Result<Map<String, Value>, CliError> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(CliError::Input(format!(
            "{source} must be a JSON object, got {}",
            kind(&other)
        ))),
        Err(e) => Err(CliError::Input(format!("invalid {source} JSON: {e}"))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Builds the engine params object. Keys from `inline` override keys read
/// from `config_file`.
pub fn load(config_file: Option<&Path>, inline: &str) -> Result<Value, CliError> {
    let mut merged = match config_file {
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|e| CliError::Io(format!("{}: {e}", path.display())))?;
            let map = parse_object(&text, &format!("config file {}", path.display()))?;
            log::debug!("loaded {} params from {}", map.len(), path.display());
            map
        }
        None => Map::new(),
    };
    for (key, value) in parse_object(inline, "--params")? {
        if let Some(previous) = merged.insert(key.clone(), value) {
            log::debug!("--params overrides config value {key} = {previous}");
        }
    }
    Ok(Value::Object(merged))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn inline_only() {
        let params = load(None, r#"{"density": 20}"#).unwrap();
        assert_eq!(params, json!({ "density": 20 }));
    }

    #[test]
    fn inline_overrides_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"density": 20, "flow_speed": 2.0}}"#).unwrap();
        let params = load(Some(file.path()), r#"{"density": 5}"#).unwrap();
        assert_eq!(params, json!({ "density": 5, "flow_speed": 2.0 }));
    }

    #[test]
    fn non_object_is_input_error() {
        let err = load(None, "[1, 2]").unwrap_err();
        assert_eq!(err.exit_code(), 12);
        assert!(err.to_string().contains("an array"));
    }

    #[test]
    fn malformed_inline_is_input_error() {
        let err = load(None, "{density").unwrap_err();
        assert_eq!(err.exit_code(), 12);
        assert!(err.to_string().contains("--params"));
    }

    #[test]
    fn missing_config_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(Some(&dir.path().join("nope.json")), "{}").unwrap_err();
        assert_eq!(err.exit_code(), 11);
    }
}
