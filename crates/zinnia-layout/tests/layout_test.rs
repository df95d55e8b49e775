//! Integration tests for the layered layout: determinism and geometry.

use std::collections::HashMap;

use zinnia_config::{BranchKind, EdgeDef, NodeDef, NodeKind, NodeType, Position, WorkflowDef};
use zinnia_layout::{NODE_HEIGHT, NODE_WIDTH, RANK_GAP, layout};

fn node(id: &str, kind: NodeKind) -> NodeDef {
  NodeDef {
    node_id: id.to_string(),
    node_type: NodeType::default_for(kind),
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

/// start -> branch -> (yes | no) -> join, plus a disconnected note node.
fn branching_workflow() -> WorkflowDef {
  WorkflowDef {
    workflow_id: "wf_1".to_string(),
    name: "branching".to_string(),
    nodes: vec![
      node("start", NodeKind::Start),
      node("branch", NodeKind::Branch),
      node("yes", NodeKind::Action),
      node("no", NodeKind::Action),
      node("join", NodeKind::Action),
      node("orphan", NodeKind::Action),
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
fn test_layout_is_bit_identical_across_calls() {
  let wf = branching_workflow();

  let first = layout(&wf, 1200.0);
  let second = layout(&wf, 1200.0);
  assert_eq!(first, second);

  // a structurally equal document built separately lays out the same
  let rebuilt = branching_workflow();
  assert_eq!(layout(&rebuilt, 1200.0), first);
}

#[test]
fn test_layout_covers_every_node() {
  let wf = branching_workflow();
  let positions = layout(&wf, 1200.0);

  assert_eq!(positions.len(), wf.nodes.len());
  assert!(
    positions
      .values()
      .all(|p| p.x.is_finite() && p.y.is_finite())
  );
}

#[test]
fn test_ranks_descend_by_fixed_pitch() {
  let positions = layout(&branching_workflow(), 1200.0);
  let pitch = NODE_HEIGHT + RANK_GAP;

  assert_eq!(positions["start"].y, 0.0);
  assert_eq!(positions["branch"].y, pitch);
  assert_eq!(positions["yes"].y, 2.0 * pitch);
  assert_eq!(positions["no"].y, 2.0 * pitch);
  assert_eq!(positions["join"].y, 3.0 * pitch);
  // unreachable nodes sit beside the start rank rather than vanishing
  assert_eq!(positions["orphan"].y, 0.0);
}

#[test]
fn test_layout_is_centered_on_viewport() {
  let viewport_width = 1200.0;
  let positions = layout(&branching_workflow(), viewport_width);

  let left = positions
    .values()
    .map(|p| p.x)
    .fold(f64::INFINITY, f64::min);
  let right = positions
    .values()
    .map(|p| p.x + NODE_WIDTH)
    .fold(f64::NEG_INFINITY, f64::max);

  assert_eq!((left + right) / 2.0, viewport_width / 2.0);
}

#[test]
fn test_barycenter_untangles_crossed_branches() {
  // x descends from a, y descends from b, but x and y were inserted in
  // the opposite order; the barycenter pass must put x back under a
  let wf = WorkflowDef {
    workflow_id: "wf_2".to_string(),
    name: "crossed".to_string(),
    nodes: vec![
      node("start", NodeKind::Start),
      node("a", NodeKind::Action),
      node("b", NodeKind::Action),
      node("y", NodeKind::Action),
      node("x", NodeKind::Action),
    ],
    edges: vec![
      edge("e1", "start", "a", BranchKind::Default),
      edge("e2", "start", "b", BranchKind::Default),
      edge("e3", "a", "x", BranchKind::Default),
      edge("e4", "b", "y", BranchKind::Default),
    ],
  };

  let positions = layout(&wf, 1200.0);
  assert!(positions["a"].x < positions["b"].x);
  assert!(positions["x"].x < positions["y"].x);
  assert_eq!(positions["x"].x, positions["a"].x);
}

#[test]
fn test_viewport_width_only_shifts_horizontally() {
  let wf = branching_workflow();
  let narrow: HashMap<String, Position> = layout(&wf, 800.0);
  let wide = layout(&wf, 1600.0);

  for (node_id, position) in &narrow {
    assert_eq!(wide[node_id].y, position.y);
    assert_eq!(wide[node_id].x - position.x, 400.0);
  }
}
