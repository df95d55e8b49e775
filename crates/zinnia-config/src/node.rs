use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::enums::NodeKind;

/// A node in the editable workflow graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDef {
  pub node_id: String,
  #[serde(flatten)]
  pub node_type: NodeType,
  pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeType {
  /// The trigger node that initiates workflow execution.
  ///
  /// Exactly one per workflow. Never deleted by graph operations; only its
  /// trigger configuration (webhook, schedules) changes.
  Start {
    #[serde(skip_serializing_if = "Option::is_none")]
    webhook: Option<WebhookConfig>,
    #[serde(default)]
    schedules: Vec<Schedule>,
  },
  /// A step that executes an action server-side.
  Action {
    action_kind: String,
    /// Name under which the step's output is exposed to downstream nodes.
    result_name: String,
    /// Placeholder name -> secret id, resolved server-side at run time.
    #[serde(default)]
    secrets: HashMap<String, String>,
    #[serde(default)]
    args: HashMap<String, String>,
  },
  /// A two-way split evaluated against a condition at run time.
  Branch { condition: String },
  /// Iterates downstream nodes over a collection.
  Loop {
    /// Expression naming the collection to iterate over.
    items: String,
  },
}

impl NodeType {
  /// The bare variant tag.
  pub fn kind(&self) -> NodeKind {
    match self {
      NodeType::Start { .. } => NodeKind::Start,
      NodeType::Action { .. } => NodeKind::Action,
      NodeType::Branch { .. } => NodeKind::Branch,
      NodeType::Loop { .. } => NodeKind::Loop,
    }
  }

  /// Default payload for a freshly inserted node of the given kind.
  pub fn default_for(kind: NodeKind) -> NodeType {
    match kind {
      NodeKind::Start => NodeType::Start {
        webhook: None,
        schedules: Vec::new(),
      },
      NodeKind::Action => NodeType::Action {
        action_kind: String::new(),
        result_name: String::new(),
        secrets: HashMap::new(),
        args: HashMap::new(),
      },
      NodeKind::Branch => NodeType::Branch {
        condition: String::new(),
      },
      NodeKind::Loop => NodeType::Loop {
        items: String::new(),
      },
    }
  }
}

/// Canvas position of a node. Display-only; execution never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
  pub x: f64,
  pub y: f64,
}

impl Position {
  pub fn new(x: f64, y: f64) -> Self {
    Self { x, y }
  }

  pub fn offset(self, dx: f64, dy: f64) -> Self {
    Self {
      x: self.x + dx,
      y: self.y + dy,
    }
  }
}

/// Webhook endpoint issued by the server for a Start node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookConfig {
  pub webhook_id: String,
  pub secret: String,
}

/// Cron schedule attached to a Start node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
  pub cron: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub timezone: Option<String>,
}
