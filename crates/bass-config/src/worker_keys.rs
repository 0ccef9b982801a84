//! Worker API key file loading: one key per line.

use std::collections::HashSet;
use std::path::Path;

use crate::error::ConfigError;

pub fn parse_worker_keys(contents: &str) -> HashSet<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn load_worker_keys_file(path: &Path) -> Result<HashSet<String>, ConfigError> {
    let path_str = path.display().to_string();
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path_str,
        source,
    })?;
    Ok(parse_worker_keys(&contents))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_one_key_per_line() {
        let keys = parse_worker_keys("key-one\nkey-two\n\n  key-three  \n");
        assert_eq!(keys.len(), 3);
        assert!(keys.contains("key-one"));
        assert!(keys.contains("key-three"));
    }
}
