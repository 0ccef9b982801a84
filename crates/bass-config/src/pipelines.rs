//! Pipeline catalog loading: `{pipeline-name: {repository, ref, exec,
//! worker-tags, cwd?, notifications?}}` JSON.

use std::path::Path;

use bass_core::job::PipelineCatalog;

use crate::error::{ConfigError, ConfigResult};

/// Load the pipeline catalog from a JSON file.
pub fn load_pipelines_file(path: &Path) -> ConfigResult<PipelineCatalog> {
    let path_str = path.display().to_string();
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path_str.clone(),
        source,
    })?;
    parse_pipelines(&contents, &path_str)
}

pub fn parse_pipelines(contents: &str, source_name: &str) -> ConfigResult<PipelineCatalog> {
    serde_json::from_str(contents).map_err(|source| ConfigError::Json {
        path: source_name.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_catalog() {
        let json = r#"
        {
            "demo": {
                "repository": "git@example.com:demo.git",
                "ref": "main",
                "exec": ["./pipeline.sh"],
                "worker-tags": ["linux"]
            }
        }
        "#;
        let catalog = parse_pipelines(json, "test").unwrap();
        let demo = catalog.get("demo").unwrap();
        assert_eq!(demo.repository, "git@example.com:demo.git");
        assert_eq!(demo.worker_tags, vec!["linux".to_string()]);
        assert!(demo.cwd.is_none());
    }

    #[test]
    fn worker_tags_default_to_empty() {
        let json = r#"
        {
            "demo": {
                "repository": "git@example.com:demo.git",
                "ref": "main",
                "exec": ["./pipeline.sh"]
            }
        }
        "#;
        let catalog = parse_pipelines(json, "test").unwrap();
        assert!(catalog.get("demo").unwrap().worker_tags.is_empty());
    }

    #[test]
    fn malformed_json_errors() {
        let result = parse_pipelines("{not json", "test");
        assert!(result.is_err());
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pipelines.json");
        std::fs::write(
            &path,
            r#"{"demo": {"repository": "r", "ref": "main", "exec": ["x"]}}"#,
        )
        .unwrap();
        let catalog = load_pipelines_file(&path).unwrap();
        assert!(catalog.contains_key("demo"));
    }
}
