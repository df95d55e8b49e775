//! Zinnia Config
//!
//! Serializable workflow definition types for Zinnia. A [`WorkflowDef`] is
//! the document shape the persistence layer loads and saves: a flat list of
//! nodes plus the directed edges between them.
//!
//! Invariants the rest of the engine relies on:
//! - Exactly one `Start` node per workflow
//! - Every edge's endpoints name nodes present in the document
//! - A branch node carries at most one outgoing edge per `True`/`False` handle
//!
//! [`WorkflowDef::validate`] checks these for documents arriving from
//! storage; the editor store maintains them by construction.

mod edge;
mod enums;
mod error;
mod node;
mod workflow;

pub use edge::EdgeDef;
pub use enums::{BranchKind, NodeKind};
pub use error::ValidationError;
pub use node::{NodeDef, NodeType, Position, Schedule, WebhookConfig};
pub use workflow::WorkflowDef;
