//! Paylines, payout table and win calculation

use serde::{Deserialize, Serialize};

use crate::config::{PAYLINE_COUNT, REEL_COUNT};
use crate::error::{SlotError, SlotResult};
use crate::spin::Grid;
use crate::symbols::SymbolId;

/// Minimum contiguous run that can pay
pub const MIN_MATCH: u8 = 3;

/// The 20 fixed payline paths, row index per reel, in evaluation order
pub const STANDARD_PAYLINES: [[u8; REEL_COUNT]; PAYLINE_COUNT] = [
    [1, 1, 1, 1, 1], // Middle
    [0, 0, 0, 0, 0], // Top
    [2, 2, 2, 2, 2], // Bottom
    [0, 1, 2, 1, 0], // V
    [2, 1, 0, 1, 2], // Inverted V
    [0, 0, 1, 0, 0], // Top dip
    [2, 2, 1, 2, 2], // Bottom bump
    [1, 0, 0, 0, 1], // Middle to top
    [1, 2, 2, 2, 1], // Middle to bottom
    [0, 1, 1, 1, 0], // Top center
    [2, 1, 1, 1, 2], // Bottom center
    [0, 1, 0, 1, 0], // Zigzag top
    [2, 1, 2, 1, 2], // Zigzag bottom
    [1, 0, 1, 0, 1], // Center zigzag A
    [1, 2, 1, 2, 1], // Center zigzag B
    [0, 1, 2, 2, 2], // Top diagonal down
    [2, 1, 0, 0, 0], // Bottom diagonal up
    [0, 2, 0, 2, 0], // Wide zigzag
    [2, 0, 2, 0, 2], // Wide zigzag inverted
    [0, 0, 2, 0, 0], // Top drop
];

/// Pays per symbol id, indexed by match count (0..=5)
const STANDARD_PAYS: [[u64; REEL_COUNT + 1]; 5] = [
    [0, 0, 0, 5, 20, 100],
    [0, 0, 0, 10, 40, 200],
    [0, 0, 0, 20, 80, 400],
    [0, 0, 0, 40, 160, 800],
    [0, 0, 0, 100, 500, 2000],
];

/// A payline definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payline {
    /// Payline index (0-based, table order)
    pub index: u8,
    /// Row positions for each reel (e.g., [1, 0, 0, 0, 1])
    pub positions: Vec<u8>,
}

impl Payline {
    pub fn new(index: u8, positions: impl Into<Vec<u8>>) -> Self {
        Self {
            index,
            positions: positions.into(),
        }
    }

    /// Create a straight line (same row across all reels)
    pub fn straight(index: u8, row: u8, reel_count: u8) -> Self {
        Self {
            index,
            positions: vec![row; reel_count as usize],
        }
    }
}

/// Standard payline set for the 5×3 board
pub fn standard_20_paylines() -> Vec<Payline> {
    STANDARD_PAYLINES
        .iter()
        .enumerate()
        .map(|(i, rows)| Payline::new(i as u8, rows.to_vec()))
        .collect()
}

/// A win on a single payline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaylineWin {
    /// Payline index
    pub line_index: u8,
    /// Anchor symbol (the symbol on reel 0)
    pub symbol_id: SymbolId,
    /// Contiguous matches from reel 0
    pub count: u8,
    /// Credits paid
    pub amount: u64,
}

/// Wins of one grid plus their sum
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub wins: Vec<PaylineWin>,
    pub total_win: u64,
}

impl Evaluation {
    pub fn from_wins(wins: Vec<PaylineWin>) -> Self {
        let total_win = wins.iter().map(|w| w.amount).sum();
        Self { wins, total_win }
    }

    pub fn is_win(&self) -> bool {
        self.total_win > 0
    }
}

/// Payout table: symbol id → pay by match count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayTable {
    pays: Vec<Vec<u64>>,
}

impl PayTable {
    /// The fixed board paytable
    pub fn standard() -> Self {
        Self {
            pays: STANDARD_PAYS.iter().map(|row| row.to_vec()).collect(),
        }
    }

    /// Custom table, `pays[symbol][count]`
    pub fn new(pays: Vec<Vec<u64>>) -> Self {
        Self { pays }
    }

    /// Number of symbols with a pay row
    pub fn symbol_count(&self) -> usize {
        self.pays.len()
    }

    /// Strict lookup; unknown symbols and counts past the row are errors
    pub fn lookup(&self, symbol_id: SymbolId, count: u8) -> SlotResult<u64> {
        self.pays
            .get(symbol_id as usize)
            .and_then(|row| row.get(count as usize))
            .copied()
            .ok_or(SlotError::UnknownPayout { symbol_id, count })
    }

    /// Payout for `count` contiguous `symbol_id`, zero when not in the table
    pub fn payout(&self, symbol_id: SymbolId, count: u8) -> u64 {
        self.lookup(symbol_id, count).unwrap_or_else(|e| {
            log::trace!("{e}, paying 0");
            0
        })
    }

    /// Evaluate one payline: contiguous run from reel 0, no wilds
    pub fn evaluate_line(&self, grid: &Grid, payline: &Payline) -> Option<PaylineWin> {
        let first_row = *payline.positions.first()? as usize;
        let anchor = grid.symbol(0, first_row)?;

        let mut count = 1u8;
        for (reel, &row) in payline.positions.iter().enumerate().skip(1) {
            if grid.symbol(reel, row as usize) == Some(anchor) {
                count += 1;
            } else {
                break;
            }
        }

        if count < MIN_MATCH {
            return None;
        }

        let amount = self.payout(anchor, count);
        (amount > 0).then_some(PaylineWin {
            line_index: payline.index,
            symbol_id: anchor,
            count,
            amount,
        })
    }

    /// Evaluate all paylines, wins in payline-table order
    pub fn check_wins(&self, grid: &Grid, paylines: &[Payline]) -> Vec<PaylineWin> {
        paylines
            .iter()
            .filter_map(|line| self.evaluate_line(grid, line))
            .collect()
    }
}

impl Default for PayTable {
    fn default() -> Self {
        Self::standard()
    }
}
