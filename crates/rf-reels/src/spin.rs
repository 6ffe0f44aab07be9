//! Committed spin outcome and per-spin session state

use serde::{Deserialize, Serialize};

use crate::config::ROW_COUNT;
use crate::paytable::PaylineWin;
use crate::symbols::SymbolId;

/// Row whose symbol lands at a reel's visual center
pub const LANDING_ROW: usize = 1;

/// Reel-major symbol grid (`grid[reel][row]`)
///
/// Produced once per spin by the outcome engine and never modified after.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    columns: Vec<[SymbolId; ROW_COUNT]>,
}

impl Grid {
    pub fn from_columns(columns: Vec<[SymbolId; ROW_COUNT]>) -> Self {
        Self { columns }
    }

    pub fn reel_count(&self) -> usize {
        self.columns.len()
    }

    pub fn symbol(&self, reel: usize, row: usize) -> Option<SymbolId> {
        self.columns.get(reel).and_then(|c| c.get(row)).copied()
    }

    /// Symbol the reel must show at its center once settled
    pub fn landing_symbol(&self, reel: usize) -> Option<SymbolId> {
        self.symbol(reel, LANDING_ROW)
    }

    /// Check every cell is a valid id for `symbol_count` symbols
    pub fn is_within(&self, symbol_count: usize) -> bool {
        self.columns
            .iter()
            .flatten()
            .all(|&s| (s as usize) < symbol_count)
    }

    /// Nested-vec form used by stage traces and reports
    pub fn to_vecs(&self) -> Vec<Vec<SymbolId>> {
        self.columns.iter().map(|c| c.to_vec()).collect()
    }
}

impl From<Vec<[SymbolId; ROW_COUNT]>> for Grid {
    fn from(columns: Vec<[SymbolId; ROW_COUNT]>) -> Self {
        Self::from_columns(columns)
    }
}

/// Transient state of the spin in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpinSession {
    /// Sequential spin number
    pub spin_id: u64,
    /// Bet debited for this spin
    pub bet: u64,
    /// Authoritative grid, fixed before any reel moved
    pub grid: Grid,
    /// Reels that have not settled yet
    pub pending_reels: usize,
    /// Filled at evaluation
    pub wins: Vec<PaylineWin>,
}

impl SpinSession {
    pub fn new(spin_id: u64, bet: u64, grid: Grid) -> Self {
        let pending_reels = grid.reel_count();
        Self {
            spin_id,
            bet,
            grid,
            pending_reels,
            wins: Vec::new(),
        }
    }

    pub fn all_settled(&self) -> bool {
        self.pending_reels == 0
    }
}
