use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One execution step of a workflow run, as supplied by the run-step feed.
///
/// `parent_step_id` is `None` exactly for the run's origin step; a run has
/// a single origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
  pub step_id: String,
  pub action_kind: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub parent_step_id: Option<String>,
  pub created_at: DateTime<Utc>,
  pub payload: serde_json::Value,
}
