//! Pipeline validation: turns a duck-typed `RawNode` tree into a strict
//! `Node` tree, failing fast with a diagnostic naming the offending node.

use thiserror::Error;

use crate::node::{BranchNode, LeafNode, Node, RawNode};

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("node '{name}' has an empty name")]
    EmptyName { name: String },

    #[error("node '{name}' must have exactly one of `exec` or `steps`")]
    ExecXorSteps { name: String },

    #[error("node '{name}' has `steps` but it is empty")]
    EmptySteps { name: String },

    #[error("node '{name}' has an invalid `if-changeset-matches` regex: {source}")]
    InvalidRegex {
        name: String,
        #[source]
        source: regex::Error,
    },
}

/// Validate (and convert) a raw pipeline tree, recursing into `steps`,
/// `setup`, and `teardown`.
pub fn validate_pipeline(raw: &RawNode) -> Result<Node, ValidationError> {
    if raw.name.is_empty() {
        return Err(ValidationError::EmptyName {
            name: raw.name.clone(),
        });
    }

    match (&raw.exec, &raw.steps) {
        (Some(_), Some(_)) | (None, None) => {
            return Err(ValidationError::ExecXorSteps {
                name: raw.name.clone(),
            });
        }
        _ => {}
    }

    if let Some(pattern) = &raw.if_changeset_matches {
        regex::Regex::new(pattern).map_err(|source| ValidationError::InvalidRegex {
            name: raw.name.clone(),
            source,
        })?;
    }

    let setup = raw
        .setup
        .as_ref()
        .map(|s| validate_pipeline(s).map(Box::new))
        .transpose()?;
    let teardown = raw
        .teardown
        .as_ref()
        .map(|t| validate_pipeline(t).map(Box::new))
        .transpose()?;

    if let Some(exec) = &raw.exec {
        Ok(Node::Leaf(LeafNode {
            name: raw.name.clone(),
            exec: exec.clone(),
            timeout: raw.timeout,
            cwd: raw.cwd.clone(),
            if_changeset_matches: raw.if_changeset_matches.clone(),
            setup,
            teardown,
        }))
    } else {
        let steps = raw.steps.as_ref().expect("exec xor steps checked above");
        if steps.is_empty() {
            return Err(ValidationError::EmptySteps {
                name: raw.name.clone(),
            });
        }

        let steps = steps
            .iter()
            .map(validate_pipeline)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Node::Branch(BranchNode {
            name: raw.name.clone(),
            steps,
            order: raw.order,
            cwd: raw.cwd.clone(),
            if_changeset_matches: raw.if_changeset_matches.clone(),
            setup,
            teardown,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Exec;

    fn leaf(name: &str) -> RawNode {
        RawNode {
            name: name.to_string(),
            exec: Some(Exec::Single(format!("{name}.sh"))),
            steps: None,
            order: Default::default(),
            setup: None,
            teardown: None,
            cwd: None,
            if_changeset_matches: None,
            timeout: None,
        }
    }

    #[test]
    fn empty_steps_fails() {
        let raw = RawNode {
            name: "root".into(),
            exec: None,
            steps: Some(vec![]),
            order: Default::default(),
            setup: None,
            teardown: None,
            cwd: None,
            if_changeset_matches: None,
            timeout: None,
        };
        assert!(matches!(
            validate_pipeline(&raw),
            Err(ValidationError::EmptySteps { .. })
        ));
    }

    #[test]
    fn both_exec_and_steps_fails() {
        let mut raw = leaf("root");
        raw.steps = Some(vec![leaf("child")]);
        assert!(matches!(
            validate_pipeline(&raw),
            Err(ValidationError::ExecXorSteps { .. })
        ));
    }

    #[test]
    fn neither_exec_nor_steps_fails() {
        let raw = RawNode {
            name: "root".into(),
            exec: None,
            steps: None,
            order: Default::default(),
            setup: None,
            teardown: None,
            cwd: None,
            if_changeset_matches: None,
            timeout: None,
        };
        assert!(matches!(
            validate_pipeline(&raw),
            Err(ValidationError::ExecXorSteps { .. })
        ));
    }

    #[test]
    fn invalid_regex_fails() {
        let mut raw = leaf("root");
        raw.if_changeset_matches = Some("(unclosed".to_string());
        assert!(matches!(
            validate_pipeline(&raw),
            Err(ValidationError::InvalidRegex { .. })
        ));
    }

    #[test]
    fn valid_tree_converts() {
        let raw = RawNode {
            name: "root".into(),
            exec: None,
            steps: Some(vec![leaf("a"), leaf("b")]),
            order: Default::default(),
            setup: Some(Box::new(leaf("setup"))),
            teardown: Some(Box::new(leaf("teardown"))),
            cwd: None,
            if_changeset_matches: None,
            timeout: None,
        };
        let node = validate_pipeline(&raw).unwrap();
        match node {
            Node::Branch(b) => {
                assert_eq!(b.steps.len(), 2);
                assert!(b.setup.is_some());
                assert!(b.teardown.is_some());
            }
            Node::Leaf(_) => panic!("expected branch"),
        }
    }
}
