use serde::{Deserialize, Serialize};

use crate::enums::BranchKind;

/// A directed connection between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeDef {
  pub edge_id: String,
  pub source: String,
  pub target: String,
  pub branch: BranchKind,
}
