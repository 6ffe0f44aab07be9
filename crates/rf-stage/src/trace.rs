//! StageTrace — The complete stage timeline of one spin
//!
//! Besides recording, a trace can check itself against the sequencing rules
//! every spin must obey: the grid is committed first, stop commands go out in
//! increasing reel order and time, each reel lands on its committed center
//! symbol, and wins are evaluated only after every reel has settled.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::event::StageEvent;
use crate::stage::Stage;

/// Sequencing violation found in a trace
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TraceError {
    #[error("Trace is empty")]
    Empty,

    #[error("First stage must be spin_start, found {0}")]
    MissingSpinStart(&'static str),

    #[error("Event {index} goes back in time")]
    TimeReversal { index: usize },

    #[error("Stop command for reel {reel} does not follow reel {previous} in order")]
    StopOrder { previous: u8, reel: u8 },

    #[error("Reel {reel} settled without a stop command")]
    StopWithoutCommand { reel: u8 },

    #[error("Reel {reel} landed on {actual}, committed center symbol is {expected}")]
    LandingMismatch {
        reel: u8,
        expected: u32,
        actual: u32,
    },

    #[error("Wins evaluated while reel {reel} was still moving")]
    EvaluatedBeforeSettle { reel: u8 },
}

/// Stage timeline of a single spin
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StageTrace {
    /// Sequential spin number within the session
    pub spin_id: u64,

    /// All events in chronological order
    pub events: Vec<StageEvent>,
}

impl StageTrace {
    pub fn new(spin_id: u64) -> Self {
        Self {
            spin_id,
            events: Vec::new(),
        }
    }

    /// Add an event to the trace
    pub fn push(&mut self, event: StageEvent) {
        self.events.push(event);
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Get total duration in milliseconds
    pub fn duration_ms(&self) -> f64 {
        match (self.events.first(), self.events.last()) {
            (Some(first), Some(last)) => last.timestamp_ms - first.timestamp_ms,
            _ => 0.0,
        }
    }

    /// Get events by stage type name
    pub fn events_by_type(&self, type_name: &str) -> Vec<&StageEvent> {
        self.events
            .iter()
            .filter(|e| e.stage.type_name() == type_name)
            .collect()
    }

    /// Check if trace contains a specific stage type
    pub fn has_stage(&self, type_name: &str) -> bool {
        self.events.iter().any(|e| e.stage.type_name() == type_name)
    }

    /// Committed grid from the spin_start stage
    pub fn grid(&self) -> Option<&Vec<Vec<u32>>> {
        self.events.iter().find_map(|e| match &e.stage {
            Stage::SpinStart { grid, .. } => Some(grid),
            _ => None,
        })
    }

    /// Reel indices in the order their stop commands were issued
    pub fn stop_command_order(&self) -> Vec<u8> {
        self.events
            .iter()
            .filter_map(|e| match e.stage {
                Stage::ReelStopCommand { reel_index, .. } => Some(reel_index),
                _ => None,
            })
            .collect()
    }

    /// Total win reported by spin_end, if the spin finished
    pub fn total_win(&self) -> Option<u64> {
        self.events.iter().rev().find_map(|e| match e.stage {
            Stage::SpinEnd { total_win } => Some(total_win),
            _ => None,
        })
    }

    /// Export as pretty JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Check the trace against spin sequencing rules
    pub fn validate(&self) -> Result<(), TraceError> {
        let first = self.events.first().ok_or(TraceError::Empty)?;
        let grid = match &first.stage {
            Stage::SpinStart { grid, .. } => grid,
            other => return Err(TraceError::MissingSpinStart(other.type_name())),
        };

        let mut last_time = first.timestamp_ms;
        let mut last_command: Option<(u8, f64)> = None;
        let mut commanded: Vec<(u8, u32)> = Vec::new();
        let mut settled: Vec<u8> = Vec::new();

        for (index, event) in self.events.iter().enumerate() {
            if event.timestamp_ms < last_time {
                return Err(TraceError::TimeReversal { index });
            }
            last_time = event.timestamp_ms;

            match event.stage {
                Stage::ReelStopCommand {
                    reel_index,
                    symbol_id,
                } => {
                    if let Some((previous, at)) = last_command {
                        if reel_index <= previous || event.timestamp_ms <= at {
                            return Err(TraceError::StopOrder {
                                previous,
                                reel: reel_index,
                            });
                        }
                    }
                    last_command = Some((reel_index, event.timestamp_ms));
                    commanded.push((reel_index, symbol_id));
                }
                Stage::ReelStop {
                    reel_index,
                    symbol_id,
                } => {
                    let commanded_symbol = commanded
                        .iter()
                        .find(|(reel, _)| *reel == reel_index)
                        .map(|(_, symbol)| *symbol)
                        .ok_or(TraceError::StopWithoutCommand { reel: reel_index })?;
                    let expected = grid
                        .get(reel_index as usize)
                        .and_then(|column| column.get(1))
                        .copied()
                        .unwrap_or(commanded_symbol);
                    if symbol_id != expected || commanded_symbol != expected {
                        return Err(TraceError::LandingMismatch {
                            reel: reel_index,
                            expected,
                            actual: symbol_id,
                        });
                    }
                    settled.push(reel_index);
                }
                Stage::EvaluateWins => {
                    for reel in 0..grid.len() as u8 {
                        if !settled.contains(&reel) {
                            return Err(TraceError::EvaluatedBeforeSettle { reel });
                        }
                    }
                }
                _ => {}
            }
        }

        Ok(())
    }
}
