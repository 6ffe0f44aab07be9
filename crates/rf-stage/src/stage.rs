//! Stage — The enum of canonical spin phases
//!
//! A Stage is NOT an animation and NOT a render call.
//! A Stage is the SEMANTIC MEANING of a moment in the spin flow.

use serde::{Deserialize, Serialize};

/// Canonical spin stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Stage {
    // ═══════════════════════════════════════════════════════════════════════
    // SPIN LIFECYCLE
    // ═══════════════════════════════════════════════════════════════════════
    /// Bet accepted and debited, outcome committed
    SpinStart {
        /// Bet debited for this spin
        bet: u64,
        /// Committed grid (reels × rows)
        grid: Vec<Vec<u32>>,
    },

    /// Single reel received its spin command
    ReelSpinningStart {
        /// Which reel (0-indexed)
        reel_index: u8,
    },

    /// Stop command issued to a reel
    ReelStopCommand {
        /// Which reel (0-indexed)
        reel_index: u8,
        /// Symbol the reel must land on its center row
        symbol_id: u32,
    },

    /// Reel finished its stop animation and settled
    ReelStop {
        /// Which reel settled (0-indexed)
        reel_index: u8,
        /// Symbol showing at the center row
        symbol_id: u32,
    },

    /// All reels settled, wins being evaluated
    EvaluateWins,

    /// A single payline paid
    WinLine {
        line_index: u8,
        symbol_id: u32,
        count: u8,
        amount: u64,
    },

    /// Ledger balance changed (debit or credit)
    BalanceChanged {
        balance: u64,
    },

    /// Spin complete, orchestrator idle again
    SpinEnd {
        /// Sum of all payline wins
        total_win: u64,
    },
}

impl Stage {
    /// Stable snake_case name, matches the serde tag
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::SpinStart { .. } => "spin_start",
            Self::ReelSpinningStart { .. } => "reel_spinning_start",
            Self::ReelStopCommand { .. } => "reel_stop_command",
            Self::ReelStop { .. } => "reel_stop",
            Self::EvaluateWins => "evaluate_wins",
            Self::WinLine { .. } => "win_line",
            Self::BalanceChanged { .. } => "balance_changed",
            Self::SpinEnd { .. } => "spin_end",
        }
    }

    /// Reel index for per-reel stages
    pub fn reel_index(&self) -> Option<u8> {
        match self {
            Self::ReelSpinningStart { reel_index }
            | Self::ReelStopCommand { reel_index, .. }
            | Self::ReelStop { reel_index, .. } => Some(*reel_index),
            _ => None,
        }
    }

    pub fn is_reel_stage(&self) -> bool {
        self.reel_index().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_name_matches_serde_tag() {
        let stage = Stage::ReelStop {
            reel_index: 2,
            symbol_id: 4,
        };
        let json = serde_json::to_value(&stage).unwrap();
        assert_eq!(json["type"], stage.type_name());
        assert_eq!(json["reel_index"], 2);
    }

    #[test]
    fn test_reel_index() {
        assert_eq!(Stage::ReelSpinningStart { reel_index: 3 }.reel_index(), Some(3));
        assert_eq!(Stage::EvaluateWins.reel_index(), None);
        assert!(!Stage::SpinEnd { total_win: 0 }.is_reel_stage());
    }
}
