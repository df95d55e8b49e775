use std::collections::{HashMap, HashSet};

use crate::error::TraceError;
use crate::types::StepRecord;

/// Reconstruct the ordered causal chain from a run's origin step to
/// `target_step_id`, inclusive.
///
/// `records` is the full record collection fetched for one run, in any
/// order. The walk follows `parent_step_id` back from the target and
/// reverses, so the result reads origin-first; for a well-formed run it
/// completes in at most `records.len()` lookups and has length >= 1.
pub fn reconstruct(
  records: &[StepRecord],
  target_step_id: &str,
) -> Result<Vec<StepRecord>, TraceError> {
  let by_id: HashMap<&str, &StepRecord> =
    records.iter().map(|r| (r.step_id.as_str(), r)).collect();

  let Some(&target) = by_id.get(target_step_id) else {
    return Err(TraceError::TargetNotFound(target_step_id.to_string()));
  };

  let mut chain: Vec<&StepRecord> = vec![target];
  let mut seen: HashSet<&str> = HashSet::from([target.step_id.as_str()]);
  let mut current = target;

  while let Some(parent_id) = current.parent_step_id.as_deref() {
    let Some(&parent) = by_id.get(parent_id) else {
      return Err(TraceError::MissingAncestor(parent_id.to_string()));
    };
    if !seen.insert(parent.step_id.as_str()) {
      return Err(TraceError::CyclicParents(parent_id.to_string()));
    }
    chain.push(parent);
    current = parent;
  }

  chain.reverse();
  Ok(chain.into_iter().cloned().collect())
}
