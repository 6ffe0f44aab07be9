//! Outcome engine — seeded grid draws and payline evaluation

use crate::config::ROW_COUNT;
use crate::paytable::{Evaluation, PayTable, Payline, PaylineWin, standard_20_paylines};
use crate::rng::RandomSource;
use crate::spin::Grid;
use crate::symbols::SymbolId;

/// Draws result grids from a seeded stream and evaluates them
///
/// The draw order is reel-major, row-minor: for a fixed seed the sequence
/// of grids is fully reproducible.
#[derive(Debug, Clone)]
pub struct OutcomeEngine {
    rng: RandomSource,
    symbol_count: u32,
    paytable: PayTable,
    paylines: Vec<Payline>,
}

impl OutcomeEngine {
    /// Engine with the standard paytable and 20 paylines
    pub fn new(seed: u32, symbol_count: usize) -> Self {
        Self::with_tables(
            seed,
            symbol_count,
            PayTable::standard(),
            standard_20_paylines(),
        )
    }

    pub fn with_tables(
        seed: u32,
        symbol_count: usize,
        paytable: PayTable,
        paylines: Vec<Payline>,
    ) -> Self {
        Self {
            rng: RandomSource::new(seed),
            symbol_count: symbol_count.max(1) as u32,
            paytable,
            paylines,
        }
    }

    pub fn symbol_count(&self) -> usize {
        self.symbol_count as usize
    }

    pub fn paytable(&self) -> &PayTable {
        &self.paytable
    }

    pub fn paylines(&self) -> &[Payline] {
        &self.paylines
    }

    /// Draw a fresh `reel_count × 3` grid
    pub fn spin(&mut self, reel_count: usize) -> Grid {
        let max_id = self.symbol_count - 1;
        let columns = (0..reel_count)
            .map(|_| {
                let mut column = [0 as SymbolId; ROW_COUNT];
                for cell in &mut column {
                    *cell = self.rng.next_int(0, max_id);
                }
                column
            })
            .collect();
        Grid::from_columns(columns)
    }

    /// Wins of `grid` on the given paylines, in payline order
    pub fn check_wins(&self, grid: &Grid, paylines: &[Payline]) -> Vec<PaylineWin> {
        self.paytable.check_wins(grid, paylines)
    }

    /// Wins on the engine's own paylines, with their total
    pub fn evaluate(&self, grid: &Grid) -> Evaluation {
        Evaluation::from_wins(self.check_wins(grid, &self.paylines))
    }
}
