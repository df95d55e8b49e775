use std::collections::{HashMap, HashSet};

use tracing::debug;
use zinnia_config::{Position, WorkflowDef};

use crate::graph::Graph;

pub const NODE_WIDTH: f64 = 180.0;
pub const NODE_HEIGHT: f64 = 72.0;
/// Vertical gap between consecutive ranks.
pub const RANK_GAP: f64 = 64.0;
/// Horizontal gap between neighboring nodes in a rank.
pub const NODE_GAP: f64 = 48.0;

const BARYCENTER_PASSES: usize = 4;
/// A pass that moves no node by at least this many slots has converged.
const SLOT_EPSILON: f64 = 0.5;

/// Compute a top-left-anchored position for every node.
///
/// Pure function of `(nodes, edges, viewport_width)`: identical input
/// yields bit-identical output, so reloading a saved workflow never jumps.
/// Every node gets a finite position, whatever shape the document is in.
pub fn layout(workflow: &WorkflowDef, viewport_width: f64) -> HashMap<String, Position> {
  if workflow.nodes.is_empty() {
    return HashMap::new();
  }

  let graph = Graph::new(workflow);
  let ranks = assign_ranks(workflow, &graph);
  let rows = order_ranks(workflow, &graph, &ranks);
  let positions = to_pixels(&rows, viewport_width);

  debug!(
    nodes = workflow.nodes.len(),
    ranks = rows.len(),
    "layout_computed"
  );
  positions
}

/// Longest-path rank per node, with the Start node pinned at rank 0.
///
/// Pass-based relaxation over upstream neighbors, capped at `|nodes|`
/// passes. An acyclic graph stabilizes within the cap; on a cyclic one,
/// nodes still moving at the cap are demoted to rank 0 so layout degrades
/// instead of looping. Nodes unreachable from Start keep their initial
/// rank 0.
fn assign_ranks(workflow: &WorkflowDef, graph: &Graph) -> HashMap<String, usize> {
  let start_id = workflow.start_node().map(|n| n.node_id.clone());
  let mut ranks: HashMap<String, usize> = workflow
    .nodes
    .iter()
    .map(|n| (n.node_id.clone(), 0))
    .collect();

  let mut moved_last_pass: HashSet<String> = HashSet::new();
  for _ in 0..workflow.nodes.len() {
    moved_last_pass.clear();
    for node in &workflow.nodes {
      if Some(&node.node_id) == start_id.as_ref() {
        continue;
      }
      let highest_pred = graph
        .upstream(&node.node_id)
        .iter()
        .filter_map(|p| ranks.get(p.as_str()).copied())
        .max();
      let Some(pred_rank) = highest_pred else {
        continue;
      };
      if ranks[node.node_id.as_str()] < pred_rank + 1 {
        ranks.insert(node.node_id.clone(), pred_rank + 1);
        moved_last_pass.insert(node.node_id.clone());
      }
    }
    if moved_last_pass.is_empty() {
      break;
    }
  }

  for node_id in moved_last_pass {
    ranks.insert(node_id, 0);
  }
  ranks
}

/// Group nodes into per-rank rows and order each row by the barycenter
/// heuristic: a node's slot gravitates to the mean of its predecessors'
/// slots. Iterated a fixed number of passes or until slots stop moving.
fn order_ranks(
  workflow: &WorkflowDef,
  graph: &Graph,
  ranks: &HashMap<String, usize>,
) -> Vec<Vec<String>> {
  let max_rank = ranks.values().copied().max().unwrap_or(0);
  let mut rows: Vec<Vec<String>> = vec![Vec::new(); max_rank + 1];
  for node in &workflow.nodes {
    rows[ranks[node.node_id.as_str()]].push(node.node_id.clone());
  }

  let mut slots: HashMap<String, f64> = HashMap::new();
  for row in &rows {
    for (i, node_id) in row.iter().enumerate() {
      slots.insert(node_id.clone(), i as f64);
    }
  }

  for _ in 0..BARYCENTER_PASSES {
    let mut max_delta: f64 = 0.0;
    for r in 1..rows.len() {
      let barycenters: Vec<f64> = rows[r]
        .iter()
        .map(|node_id| {
          let preds = graph.upstream(node_id);
          if preds.is_empty() {
            slots[node_id.as_str()]
          } else {
            preds.iter().map(|p| slots[p.as_str()]).sum::<f64>() / preds.len() as f64
          }
        })
        .collect();

      // stable sort: ties keep insertion order
      let mut order: Vec<usize> = (0..rows[r].len()).collect();
      order.sort_by(|&a, &b| barycenters[a].total_cmp(&barycenters[b]));
      let reordered: Vec<String> = order.iter().map(|&i| rows[r][i].clone()).collect();
      rows[r] = reordered;

      for (i, node_id) in rows[r].iter().enumerate() {
        let delta = (slots[node_id.as_str()] - i as f64).abs();
        max_delta = max_delta.max(delta);
        slots.insert(node_id.clone(), i as f64);
      }
    }
    if max_delta < SLOT_EPSILON {
      break;
    }
  }

  rows
}

/// Convert rank/slot pairs to pixel coordinates: fixed-size nodes on a
/// fixed grid, the whole layout recentered against the viewport, centers
/// translated to top-left anchors last (canvas node tools anchor there).
fn to_pixels(rows: &[Vec<String>], viewport_width: f64) -> HashMap<String, Position> {
  let mut positions = HashMap::new();
  let mut min_x = f64::INFINITY;
  let mut max_x = f64::NEG_INFINITY;

  for (rank, row) in rows.iter().enumerate() {
    for (slot, node_id) in row.iter().enumerate() {
      let center_x = slot as f64 * (NODE_WIDTH + NODE_GAP) + NODE_WIDTH / 2.0;
      let center_y = rank as f64 * (NODE_HEIGHT + RANK_GAP) + NODE_HEIGHT / 2.0;
      min_x = min_x.min(center_x - NODE_WIDTH / 2.0);
      max_x = max_x.max(center_x + NODE_WIDTH / 2.0);
      positions.insert(node_id.clone(), Position::new(center_x, center_y));
    }
  }

  let shift = viewport_width / 2.0 - (min_x + max_x) / 2.0;
  for position in positions.values_mut() {
    position.x += shift - NODE_WIDTH / 2.0;
    position.y -= NODE_HEIGHT / 2.0;
  }
  positions
}
