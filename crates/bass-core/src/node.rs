//! Pipeline node types: the raw, duck-typed wire shape (`RawNode`) as
//! received over JSON, and the strict, typed tree (`Node`) that the
//! executor actually walks. `RawNode` -> `Node` conversion is where
//! validation happens, once, on load (see `validate`).

use serde::{Deserialize, Serialize};

/// `exec` may be a single command string or a command vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Exec {
    Single(String),
    Vector(Vec<String>),
}

impl Exec {
    pub fn as_argv(&self) -> Vec<String> {
        match self {
            Exec::Single(cmd) => vec![cmd.clone()],
            Exec::Vector(cmds) => cmds.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    #[default]
    Ordered,
    Unordered,
}

/// The wire shape of a pipeline node: every field is optional, matching
/// the ad-hoc, duck-typed JSON a hand-written pipeline file uses. Never
/// used directly by the executor; convert via `validate::validate_pipeline`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawNode {
    pub name: String,
    pub exec: Option<Exec>,
    pub steps: Option<Vec<RawNode>>,
    #[serde(default)]
    pub order: Order,
    pub setup: Option<Box<RawNode>>,
    pub teardown: Option<Box<RawNode>>,
    pub cwd: Option<String>,
    #[serde(rename = "if-changeset-matches")]
    pub if_changeset_matches: Option<String>,
    pub timeout: Option<u64>,
}

/// A validated leaf: runs a single command.
#[derive(Debug, Clone)]
pub struct LeafNode {
    pub name: String,
    pub exec: Exec,
    pub timeout: Option<u64>,
    pub cwd: Option<String>,
    pub if_changeset_matches: Option<String>,
    pub setup: Option<Box<Node>>,
    pub teardown: Option<Box<Node>>,
}

/// A validated branch: runs an ordered or unordered sequence of children.
#[derive(Debug, Clone)]
pub struct BranchNode {
    pub name: String,
    pub steps: Vec<Node>,
    pub order: Order,
    pub cwd: Option<String>,
    pub if_changeset_matches: Option<String>,
    pub setup: Option<Box<Node>>,
    pub teardown: Option<Box<Node>>,
}

/// A validated pipeline node: exactly a leaf (`exec`) or a branch
/// (`steps`), never both, never neither.
#[derive(Debug, Clone)]
pub enum Node {
    Leaf(LeafNode),
    Branch(BranchNode),
}

impl Node {
    pub fn name(&self) -> &str {
        match self {
            Node::Leaf(l) => &l.name,
            Node::Branch(b) => &b.name,
        }
    }

    pub fn cwd(&self) -> Option<&str> {
        match self {
            Node::Leaf(l) => l.cwd.as_deref(),
            Node::Branch(b) => b.cwd.as_deref(),
        }
    }

    pub fn if_changeset_matches(&self) -> Option<&str> {
        match self {
            Node::Leaf(l) => l.if_changeset_matches.as_deref(),
            Node::Branch(b) => b.if_changeset_matches.as_deref(),
        }
    }

    pub fn setup(&self) -> Option<&Node> {
        match self {
            Node::Leaf(l) => l.setup.as_deref(),
            Node::Branch(b) => b.setup.as_deref(),
        }
    }

    pub fn teardown(&self) -> Option<&Node> {
        match self {
            Node::Leaf(l) => l.teardown.as_deref(),
            Node::Branch(b) => b.teardown.as_deref(),
        }
    }
}
