//! Zinnia Trace
//!
//! Causal trace reconstruction for workflow runs. The execution engine
//! emits one [`StepRecord`] per executed step, each carrying only a
//! back-reference to its causal predecessor; [`reconstruct`] turns the flat
//! record collection for one run into the ordered chain from the run's
//! origin to a chosen step.
//!
//! Unlike the editing core, gaps here are surfaced as errors: a partial
//! trace presented as complete would mislead whoever is debugging the run.
//! Callers decide whether to re-fetch a larger page or show a truncation
//! notice.

mod error;
mod reconstruct;
mod types;

pub use error::TraceError;
pub use reconstruct::reconstruct;
pub use types::StepRecord;
