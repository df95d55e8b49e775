use thiserror::Error;

use crate::enums::BranchKind;

/// Structural defects in an externally supplied workflow document.
#[derive(Debug, Error)]
pub enum ValidationError {
  #[error("duplicate node id: {0}")]
  DuplicateNodeId(String),

  #[error("duplicate edge id: {0}")]
  DuplicateEdgeId(String),

  #[error("edge references unknown node: source={source_id}, target={target}")]
  UnknownEndpoint { source_id: String, target: String },

  #[error("workflow must have exactly one start node, found {0}")]
  StartNodeCount(usize),

  #[error("branch node {node_id} has more than one {branch:?} edge")]
  DuplicateBranchEdge { node_id: String, branch: BranchKind },
}
