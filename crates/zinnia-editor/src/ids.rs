/// Prefix carried by session-local ids not yet acknowledged by storage.
const DRAFT_PREFIX: &str = "draft-";

/// Issues unique node/edge ids for the current editing session.
///
/// Draft ids carry a reserved prefix so the dirty check and the save flow
/// can tell "needs insert" from "needs update" with a plain prefix test.
/// Server-assigned ids never carry the prefix.
#[derive(Debug, Default)]
pub struct IdAllocator {
  next: u64,
}

impl IdAllocator {
  pub fn new() -> Self {
    Self { next: 0 }
  }

  /// A fresh draft id, unique within this editing session.
  pub fn next_id(&mut self) -> String {
    self.next += 1;
    format!("{DRAFT_PREFIX}{}", self.next)
  }

  /// Whether an id was minted by this session rather than assigned by
  /// storage.
  pub fn is_draft(id: &str) -> bool {
    id.starts_with(DRAFT_PREFIX)
  }

  /// Restart the id space. Only called when the store is cleared for a new
  /// editing session.
  pub fn reset(&mut self) {
    self.next = 0;
  }
}
