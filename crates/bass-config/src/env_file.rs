//! `KEY=VALUE` env-file loading, with `$VAR` expansion against the
//! process environment.

use std::collections::HashMap;
use std::path::Path;

use crate::error::{ConfigError, ConfigResult};

/// Parse `KEY=VALUE` lines (blank lines and `#`-prefixed comments
/// ignored), expanding `$VAR`/`${VAR}` references against the current
/// process environment.
pub fn parse_env_file(contents: &str, source_name: &str) -> ConfigResult<HashMap<String, String>> {
    let process_env: HashMap<String, String> = std::env::vars().collect();
    let mut result = HashMap::new();

    for (idx, raw_line) in contents.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            return Err(ConfigError::MalformedEnvLine {
                path: source_name.to_string(),
                line_no: idx + 1,
                line: raw_line.to_string(),
            });
        };

        let expanded = bass_core::vars::expand_vars(value.trim(), &process_env);
        result.insert(key.trim().to_string(), expanded);
    }

    Ok(result)
}

pub fn load_env_file(path: &Path) -> ConfigResult<HashMap<String, String>> {
    let path_str = path.display().to_string();
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path_str.clone(),
        source,
    })?;
    parse_env_file(&contents, &path_str)
}
