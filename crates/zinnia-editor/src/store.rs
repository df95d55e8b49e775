use std::collections::HashMap;

use tracing::{debug, warn};
use zinnia_config::{
  BranchKind, EdgeDef, NodeDef, NodeKind, NodeType, Position, WebhookConfig, WorkflowDef,
};

use crate::ids::IdAllocator;
use crate::provision::{DraftSecretProvisioner, SecretProvisioner};

/// Canvas offset applied to a duplicated node so it lands beside the
/// original instead of on top of it.
const DUPLICATE_OFFSET: (f64, f64) = (32.0, 32.0);

/// Server-assigned replacements for draft ids, supplied by the save flow.
#[derive(Debug, Clone, Default)]
pub struct SavedIds {
  /// Replacement for a draft workflow id.
  pub workflow_id: Option<String>,
  /// Draft node id -> server-assigned id.
  pub node_ids: HashMap<String, String>,
  /// Draft edge id -> server-assigned id.
  pub edge_ids: HashMap<String, String>,
  /// Server-issued webhook endpoint for the Start node.
  pub webhook: Option<WebhookConfig>,
}

/// The single source of truth for the workflow being edited.
///
/// Holds the live graph next to the last persisted snapshot. Mutations are
/// synchronous and atomic with respect to each other; nothing here blocks
/// or spawns.
///
/// Generic over `P: SecretProvisioner` to allow different secret
/// provisioning strategies on node duplication. Use [`EditorStore::new`]
/// for the default draft-minting provisioner, or
/// [`EditorStore::with_provisioner`] to supply one that calls out.
pub struct EditorStore<P: SecretProvisioner = DraftSecretProvisioner> {
  workflow: WorkflowDef,
  snapshot: Option<WorkflowDef>,
  ids: IdAllocator,
  provisioner: P,
}

impl EditorStore<DraftSecretProvisioner> {
  /// Start a fresh editing session: a draft workflow holding its Start
  /// node, with nothing persisted yet.
  pub fn new(name: &str) -> Self {
    Self::with_provisioner(name, DraftSecretProvisioner)
  }
}

impl<P: SecretProvisioner> EditorStore<P> {
  /// Start a fresh editing session with a custom secret provisioner.
  pub fn with_provisioner(name: &str, provisioner: P) -> Self {
    let mut ids = IdAllocator::new();
    let workflow_id = ids.next_id();
    let start_id = ids.next_id();
    let workflow = WorkflowDef {
      workflow_id,
      name: name.to_string(),
      nodes: vec![NodeDef {
        node_id: start_id,
        node_type: NodeType::default_for(NodeKind::Start),
        position: Position::new(0.0, 0.0),
      }],
      edges: Vec::new(),
    };

    Self {
      workflow,
      snapshot: None,
      ids,
      provisioner,
    }
  }

  /// The live workflow document, as submitted by the save flow.
  pub fn workflow(&self) -> &WorkflowDef {
    &self.workflow
  }

  /// Get a node by id.
  pub fn node(&self, node_id: &str) -> Option<&NodeDef> {
    self.workflow.node(node_id)
  }

  /// Edges whose source or target is the given node.
  pub fn edges_of(&self, node_id: &str) -> Vec<&EdgeDef> {
    self.workflow.edges_of(node_id)
  }

  /// The workflow's Start node.
  pub fn start_node(&self) -> Option<&NodeDef> {
    self.workflow.start_node()
  }

  /// Insert a node of the given kind with its variant default payload.
  ///
  /// Returns the new node's id. Inserting a second Start node is a guarded
  /// no-op: the store creates the sole Start node at construction.
  pub fn add_node(&mut self, kind: NodeKind, position: Position) -> Option<String> {
    if kind == NodeKind::Start {
      warn!("add_node_rejected_start");
      return None;
    }

    let node_id = self.ids.next_id();
    self.workflow.nodes.push(NodeDef {
      node_id: node_id.clone(),
      node_type: NodeType::default_for(kind),
      position,
    });
    debug!(node_id = %node_id, kind = ?kind, "node_added");
    Some(node_id)
  }

  /// Replace a node's variant payload.
  ///
  /// Replacement is within-variant: a payload of a different variant, or an
  /// absent id, is a no-op. The canvas may race a delete against a queued
  /// update for the same node; a no-op is the safe resolution.
  pub fn update_node(&mut self, node_id: &str, node_type: NodeType) {
    let Some(node) = self.workflow.node_mut(node_id) else {
      return;
    };
    if node.node_type.kind() != node_type.kind() {
      warn!(node_id = %node_id, "update_rejected_variant_change");
      return;
    }
    node.node_type = node_type;
    debug!(node_id = %node_id, "node_updated");
  }

  /// Move a node on the canvas. Positions persist with the document, so
  /// drags participate in dirty detection like any other edit.
  pub fn move_node(&mut self, node_id: &str, position: Position) {
    if let Some(node) = self.workflow.node_mut(node_id) {
      node.position = position;
    }
  }

  /// Remove a node and, atomically, every edge incident to it.
  ///
  /// Deleting the Start node is a guarded no-op so an accidental
  /// drag-delete on the canvas cannot leave the graph without its trigger.
  pub fn delete_node(&mut self, node_id: &str) {
    let Some(node) = self.workflow.node(node_id) else {
      return;
    };
    if node.node_type.kind() == NodeKind::Start {
      warn!(node_id = %node_id, "delete_rejected_start");
      return;
    }

    self.workflow.nodes.retain(|n| n.node_id != node_id);
    self
      .workflow
      .edges
      .retain(|e| e.source != node_id && e.target != node_id);
    debug!(node_id = %node_id, "node_deleted");
  }

  /// Deep-copy a node under a fresh draft id, offset on the canvas,
  /// disconnected from every edge.
  ///
  /// Secret ids on an Action copy are re-provisioned through the store's
  /// [`SecretProvisioner`]: the duplicate never aliases the original's live
  /// secrets. The Start node cannot be duplicated.
  pub fn duplicate_node(&mut self, node_id: &str) -> Option<String> {
    let source = self.workflow.node(node_id)?.clone();
    if source.node_type.kind() == NodeKind::Start {
      warn!(node_id = %node_id, "duplicate_rejected_start");
      return None;
    }

    let mut node_type = source.node_type;
    if let NodeType::Action { secrets, .. } = &mut node_type {
      for secret_id in secrets.values_mut() {
        *secret_id = self.provisioner.duplicate_secret(secret_id);
      }
    }

    let new_id = self.ids.next_id();
    self.workflow.nodes.push(NodeDef {
      node_id: new_id.clone(),
      node_type,
      position: source.position.offset(DUPLICATE_OFFSET.0, DUPLICATE_OFFSET.1),
    });
    debug!(node_id = %node_id, new_id = %new_id, "node_duplicated");
    Some(new_id)
  }

  /// Connect two nodes through the given source handle.
  ///
  /// The handle is meaningful only on a Branch source; on any other node it
  /// collapses to `Default`. A Branch output already wired for the same
  /// handle is rewired: the existing edge is replaced, never accumulated.
  /// Unknown endpoints are a no-op.
  pub fn connect(&mut self, source: &str, handle: BranchKind, target: &str) -> Option<String> {
    let source_kind = self.workflow.node(source)?.node_type.kind();
    self.workflow.node(target)?;

    let branch = if source_kind == NodeKind::Branch {
      handle
    } else {
      BranchKind::Default
    };
    if source_kind == NodeKind::Branch {
      self
        .workflow
        .edges
        .retain(|e| !(e.source == source && e.branch == branch));
    }

    let edge_id = self.ids.next_id();
    self.workflow.edges.push(EdgeDef {
      edge_id: edge_id.clone(),
      source: source.to_string(),
      target: target.to_string(),
      branch,
    });
    debug!(
      edge_id = %edge_id,
      source = %source,
      target = %target,
      branch = ?branch,
      "edge_connected"
    );
    Some(edge_id)
  }

  /// Remove an edge. No cascade; absent ids are a no-op.
  pub fn delete_edge(&mut self, edge_id: &str) {
    self.workflow.edges.retain(|e| e.edge_id != edge_id);
  }

  /// Whether the live graph differs from the last persisted snapshot.
  ///
  /// Recomputed structurally on every call: cardinality first, then draft
  /// ids, then a deep comparison. There is no stored flag to go stale.
  pub fn is_dirty(&self) -> bool {
    let Some(snapshot) = &self.snapshot else {
      return true;
    };
    if self.workflow.nodes.len() != snapshot.nodes.len()
      || self.workflow.edges.len() != snapshot.edges.len()
    {
      return true;
    }
    if self.has_draft_ids() {
      return true;
    }
    self.workflow != *snapshot
  }

  fn has_draft_ids(&self) -> bool {
    IdAllocator::is_draft(&self.workflow.workflow_id)
      || self
        .workflow
        .nodes
        .iter()
        .any(|n| IdAllocator::is_draft(&n.node_id))
      || self
        .workflow
        .edges
        .iter()
        .any(|e| IdAllocator::is_draft(&e.edge_id))
  }

  /// Fold a successful save back into the store.
  ///
  /// Draft ids are re-keyed in place to their server-assigned replacements
  /// (nodes, edges, edge endpoints, the workflow id itself), the
  /// server-issued webhook lands on the Start node, and the result becomes
  /// the new persisted snapshot. Re-keying rather than re-allocating keeps
  /// in-flight selection by id valid for entities the server kept.
  pub fn commit_snapshot(&mut self, saved: SavedIds) {
    if let Some(workflow_id) = saved.workflow_id {
      self.workflow.workflow_id = workflow_id;
    }
    for node in &mut self.workflow.nodes {
      if let Some(server_id) = saved.node_ids.get(&node.node_id) {
        node.node_id = server_id.clone();
      }
    }
    for edge in &mut self.workflow.edges {
      if let Some(server_id) = saved.edge_ids.get(&edge.edge_id) {
        edge.edge_id = server_id.clone();
      }
      if let Some(server_id) = saved.node_ids.get(&edge.source) {
        edge.source = server_id.clone();
      }
      if let Some(server_id) = saved.node_ids.get(&edge.target) {
        edge.target = server_id.clone();
      }
    }
    if let Some(webhook) = saved.webhook {
      let start = self
        .workflow
        .nodes
        .iter_mut()
        .find(|n| n.node_type.kind() == NodeKind::Start);
      if let Some(node) = start
        && let NodeType::Start { webhook: slot, .. } = &mut node.node_type
      {
        *slot = Some(webhook);
      }
    }

    self.snapshot = Some(self.workflow.clone());
    debug!(workflow_id = %self.workflow.workflow_id, "snapshot_committed");
  }

  /// Atomically replace the live graph and the persisted snapshot with a
  /// document from storage, starting a fresh session id space.
  ///
  /// Refused when unsaved edits exist for a different workflow; the caller
  /// must save or discard those first. Returns whether the load happened.
  pub fn load(&mut self, def: WorkflowDef) -> bool {
    let switching = def.workflow_id != self.workflow.workflow_id;
    if switching && self.is_dirty() && !self.is_untouched() {
      warn!(
        current = %self.workflow.workflow_id,
        requested = %def.workflow_id,
        "load_rejected_dirty"
      );
      return false;
    }

    self.ids.reset();
    self.workflow = def.clone();
    self.snapshot = Some(def);
    debug!(workflow_id = %self.workflow.workflow_id, "workflow_loaded");
    true
  }

  /// A never-saved store still holding exactly the constructor scaffold.
  /// Loading over it discards nothing the user made.
  fn is_untouched(&self) -> bool {
    self.snapshot.is_none()
      && self.workflow.edges.is_empty()
      && self.workflow.nodes.len() == 1
      && self.workflow.nodes[0].node_type == NodeType::default_for(NodeKind::Start)
      && self.workflow.nodes[0].position == Position::new(0.0, 0.0)
  }
}
