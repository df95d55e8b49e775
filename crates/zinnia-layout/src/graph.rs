use std::collections::{HashMap, HashSet};

use zinnia_config::WorkflowDef;

/// Adjacency view of a workflow document for traversal and analysis.
///
/// Neighbor lists preserve edge insertion order, so anything iterating them
/// is deterministic for a given document.
#[derive(Debug, Clone)]
pub struct Graph {
  /// node_id -> downstream node_ids.
  adjacency: HashMap<String, Vec<String>>,
  /// node_id -> upstream node_ids.
  reverse_adjacency: HashMap<String, Vec<String>>,
  /// Nodes with no incoming edges, in node insertion order.
  entry_points: Vec<String>,
  /// Nodes with multiple incoming edges.
  join_points: HashSet<String>,
}

impl Graph {
  /// Build the adjacency view. Edges naming unknown nodes are skipped;
  /// malformed documents degrade instead of failing.
  pub fn new(workflow: &WorkflowDef) -> Self {
    let mut adjacency: HashMap<String, Vec<String>> = HashMap::new();
    let mut reverse_adjacency: HashMap<String, Vec<String>> = HashMap::new();

    for node in &workflow.nodes {
      adjacency.entry(node.node_id.clone()).or_default();
      reverse_adjacency.entry(node.node_id.clone()).or_default();
    }

    for edge in &workflow.edges {
      if !adjacency.contains_key(&edge.source) || !adjacency.contains_key(&edge.target) {
        continue;
      }
      adjacency
        .entry(edge.source.clone())
        .or_default()
        .push(edge.target.clone());
      reverse_adjacency
        .entry(edge.target.clone())
        .or_default()
        .push(edge.source.clone());
    }

    let entry_points: Vec<String> = workflow
      .nodes
      .iter()
      .filter(|n| {
        reverse_adjacency
          .get(&n.node_id)
          .is_none_or(|v| v.is_empty())
      })
      .map(|n| n.node_id.clone())
      .collect();

    let join_points: HashSet<String> = reverse_adjacency
      .iter()
      .filter(|(_, incoming)| incoming.len() > 1)
      .map(|(id, _)| id.clone())
      .collect();

    Self {
      adjacency,
      reverse_adjacency,
      entry_points,
      join_points,
    }
  }

  /// Nodes with no incoming edges.
  pub fn entry_points(&self) -> &[String] {
    &self.entry_points
  }

  /// Downstream nodes for a given node, in edge insertion order.
  pub fn downstream(&self, node_id: &str) -> &[String] {
    self
      .adjacency
      .get(node_id)
      .map(|v| v.as_slice())
      .unwrap_or(&[])
  }

  /// Upstream nodes for a given node, in edge insertion order.
  pub fn upstream(&self, node_id: &str) -> &[String] {
    self
      .reverse_adjacency
      .get(node_id)
      .map(|v| v.as_slice())
      .unwrap_or(&[])
  }

  /// Whether a node has multiple incoming edges.
  pub fn is_join_point(&self, node_id: &str) -> bool {
    self.join_points.contains(node_id)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use zinnia_config::{BranchKind, EdgeDef, NodeDef, NodeKind, NodeType, Position};

  fn diamond() -> WorkflowDef {
    let node = |id: &str, kind: NodeKind| NodeDef {
      node_id: id.to_string(),
      node_type: NodeType::default_for(kind),
      position: Position::new(0.0, 0.0),
    };
    let edge = |id: &str, source: &str, target: &str, branch: BranchKind| EdgeDef {
      edge_id: id.to_string(),
      source: source.to_string(),
      target: target.to_string(),
      branch,
    };

    WorkflowDef {
      workflow_id: "wf_1".to_string(),
      name: "diamond".to_string(),
      nodes: vec![
        node("start", NodeKind::Start),
        node("branch", NodeKind::Branch),
        node("yes", NodeKind::Action),
        node("no", NodeKind::Action),
        node("join", NodeKind::Action),
      ],
      edges: vec![
        edge("e1", "start", "branch", BranchKind::Default),
        edge("e2", "branch", "yes", BranchKind::True),
        edge("e3", "branch", "no", BranchKind::False),
        edge("e4", "yes", "join", BranchKind::Default),
        edge("e5", "no", "join", BranchKind::Default),
      ],
    }
  }

  #[test]
  fn test_adjacency_both_directions() {
    let graph = Graph::new(&diamond());

    assert_eq!(graph.downstream("branch"), ["yes", "no"].as_slice());
    assert_eq!(graph.upstream("join"), ["yes", "no"].as_slice());
    assert_eq!(graph.entry_points(), ["start"].as_slice());
  }

  #[test]
  fn test_join_point_detection() {
    let graph = Graph::new(&diamond());

    assert!(graph.is_join_point("join"));
    assert!(!graph.is_join_point("branch"));
  }

  #[test]
  fn test_unknown_endpoints_are_skipped() {
    let mut wf = diamond();
    wf.edges.push(EdgeDef {
      edge_id: "e6".to_string(),
      source: "join".to_string(),
      target: "ghost".to_string(),
      branch: BranchKind::Default,
    });

    let graph = Graph::new(&wf);
    assert!(graph.downstream("join").is_empty());
  }
}
