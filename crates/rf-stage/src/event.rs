//! StageEvent — A stage occurrence with its timestamp

use serde::{Deserialize, Serialize};

use crate::stage::Stage;

/// A stage stamped with the orchestrator clock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageEvent {
    /// The canonical stage
    pub stage: Stage,

    /// Milliseconds on the orchestrator's monotonic clock
    pub timestamp_ms: f64,
}

impl StageEvent {
    pub fn new(stage: Stage, timestamp_ms: f64) -> Self {
        Self {
            stage,
            timestamp_ms,
        }
    }

    /// Get stage type name
    pub fn type_name(&self) -> &'static str {
        self.stage.type_name()
    }
}
