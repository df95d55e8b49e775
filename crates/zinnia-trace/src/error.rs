use thiserror::Error;

#[derive(Debug, Error)]
pub enum TraceError {
  /// A step's parent reference does not resolve within the supplied
  /// records, typically because pagination truncated the step list.
  #[error("ancestor step not found: {0}")]
  MissingAncestor(String),

  /// The requested target step is absent from the supplied records.
  #[error("step not found: {0}")]
  TargetNotFound(String),

  /// A step repeated on the parent walk. Steps are created in causal order
  /// upstream, so this indicates corrupt input; surfaced rather than
  /// walking forever.
  #[error("cyclic parent chain at step: {0}")]
  CyclicParents(String),
}
