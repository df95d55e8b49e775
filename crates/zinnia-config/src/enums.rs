use serde::{Deserialize, Serialize};

/// Which outgoing handle an edge leaves its source node through.
///
/// Branch nodes expose a `True` and a `False` handle; every other node
/// exposes a single `Default` handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BranchKind {
  Default,
  True,
  False,
}

/// The bare node variant tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
  Start,
  Action,
  Branch,
  Loop,
}
