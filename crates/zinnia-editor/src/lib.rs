//! Zinnia Editor
//!
//! The mutable in-memory side of the workflow editor: the canonical graph
//! being edited, the operations that keep it internally consistent, and the
//! session-local id space that separates unsaved entities from persisted
//! ones.
//!
//! The store raises no errors. Unknown ids are no-ops (the canvas may race a
//! delete against a queued update for the same entity), and the guarded
//! operations on the Start node simply refuse. Dirty state is derived by
//! structural comparison against the last persisted snapshot, never tracked
//! with a flag.

mod ids;
mod provision;
mod store;

pub use ids::IdAllocator;
pub use provision::{DraftSecretProvisioner, SecretProvisioner};
pub use store::{EditorStore, SavedIds};
