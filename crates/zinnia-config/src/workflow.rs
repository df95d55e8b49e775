use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::edge::EdgeDef;
use crate::enums::{BranchKind, NodeKind};
use crate::error::ValidationError;
use crate::node::NodeDef;

/// One workflow document: the editable unit, and the shape the persistence
/// layer loads and saves.
///
/// Node and edge order is insertion order; it carries no execution meaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowDef {
  pub workflow_id: String,
  pub name: String,
  pub nodes: Vec<NodeDef>,
  pub edges: Vec<EdgeDef>,
}

impl WorkflowDef {
  /// Get a node by id.
  pub fn node(&self, node_id: &str) -> Option<&NodeDef> {
    self.nodes.iter().find(|n| n.node_id == node_id)
  }

  pub fn node_mut(&mut self, node_id: &str) -> Option<&mut NodeDef> {
    self.nodes.iter_mut().find(|n| n.node_id == node_id)
  }

  /// Get an edge by id.
  pub fn edge(&self, edge_id: &str) -> Option<&EdgeDef> {
    self.edges.iter().find(|e| e.edge_id == edge_id)
  }

  /// The workflow's Start node.
  pub fn start_node(&self) -> Option<&NodeDef> {
    self
      .nodes
      .iter()
      .find(|n| n.node_type.kind() == NodeKind::Start)
  }

  /// Edges whose source or target is the given node.
  pub fn edges_of(&self, node_id: &str) -> Vec<&EdgeDef> {
    self
      .edges
      .iter()
      .filter(|e| e.source == node_id || e.target == node_id)
      .collect()
  }

  /// Structural validation for externally supplied documents.
  ///
  /// The editor store maintains these invariants by construction; this is
  /// for documents arriving from storage.
  pub fn validate(&self) -> Result<(), ValidationError> {
    let mut node_ids = HashSet::new();
    for node in &self.nodes {
      if !node_ids.insert(node.node_id.as_str()) {
        return Err(ValidationError::DuplicateNodeId(node.node_id.clone()));
      }
    }

    let mut edge_ids = HashSet::new();
    for edge in &self.edges {
      if !edge_ids.insert(edge.edge_id.as_str()) {
        return Err(ValidationError::DuplicateEdgeId(edge.edge_id.clone()));
      }
      if !node_ids.contains(edge.source.as_str()) || !node_ids.contains(edge.target.as_str()) {
        return Err(ValidationError::UnknownEndpoint {
          source_id: edge.source.clone(),
          target: edge.target.clone(),
        });
      }
    }

    let starts = self
      .nodes
      .iter()
      .filter(|n| n.node_type.kind() == NodeKind::Start)
      .count();
    if starts != 1 {
      return Err(ValidationError::StartNodeCount(starts));
    }

    let mut taken: HashSet<(&str, BranchKind)> = HashSet::new();
    for edge in &self.edges {
      let branch_source = self
        .node(&edge.source)
        .is_some_and(|n| n.node_type.kind() == NodeKind::Branch);
      if branch_source
        && edge.branch != BranchKind::Default
        && !taken.insert((edge.source.as_str(), edge.branch))
      {
        return Err(ValidationError::DuplicateBranchEdge {
          node_id: edge.source.clone(),
          branch: edge.branch,
        });
      }
    }

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::node::{NodeType, Position};

  fn node(id: &str, node_type: NodeType) -> NodeDef {
    NodeDef {
      node_id: id.to_string(),
      node_type,
      position: Position::new(0.0, 0.0),
    }
  }

  fn edge(id: &str, source: &str, target: &str, branch: BranchKind) -> EdgeDef {
    EdgeDef {
      edge_id: id.to_string(),
      source: source.to_string(),
      target: target.to_string(),
      branch,
    }
  }

  fn two_step_workflow() -> WorkflowDef {
    WorkflowDef {
      workflow_id: "wf_1".to_string(),
      name: "notify".to_string(),
      nodes: vec![
        node("n_start", NodeType::default_for(NodeKind::Start)),
        node("n_act", NodeType::default_for(NodeKind::Action)),
      ],
      edges: vec![edge("e_1", "n_start", "n_act", BranchKind::Default)],
    }
  }

  #[test]
  fn test_validate_accepts_well_formed() {
    assert!(two_step_workflow().validate().is_ok());
  }

  #[test]
  fn test_validate_rejects_unknown_endpoint() {
    let mut wf = two_step_workflow();
    wf.edges
      .push(edge("e_2", "n_act", "n_ghost", BranchKind::Default));

    assert!(matches!(
      wf.validate(),
      Err(ValidationError::UnknownEndpoint { .. })
    ));
  }

  #[test]
  fn test_validate_rejects_missing_start() {
    let mut wf = two_step_workflow();
    wf.nodes.remove(0);
    wf.edges.clear();

    assert!(matches!(
      wf.validate(),
      Err(ValidationError::StartNodeCount(0))
    ));
  }

  #[test]
  fn test_validate_rejects_double_true_edge() {
    let mut wf = two_step_workflow();
    wf.nodes
      .push(node("n_br", NodeType::default_for(NodeKind::Branch)));
    wf.nodes
      .push(node("n_b", NodeType::default_for(NodeKind::Action)));
    wf.edges
      .push(edge("e_2", "n_br", "n_act", BranchKind::True));
    wf.edges.push(edge("e_3", "n_br", "n_b", BranchKind::True));

    assert!(matches!(
      wf.validate(),
      Err(ValidationError::DuplicateBranchEdge { .. })
    ));
  }

  #[test]
  fn test_document_round_trip() {
    let wf = two_step_workflow();
    let json = serde_json::to_string(&wf).unwrap();
    let back: WorkflowDef = serde_json::from_str(&json).unwrap();
    assert_eq!(back, wf);
  }
}
