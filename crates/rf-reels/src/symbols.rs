//! Symbol definitions

use serde::{Deserialize, Serialize};

/// Symbol identifier, indexes the paytable and the texture atlas
pub type SymbolId = u32;

/// Number of distinct symbols on the board
pub const SYMBOL_COUNT: usize = 5;

/// The five board symbols, in id order (lowest to highest paying)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum SymbolKind {
    Cherry = 0,
    Seven = 1,
    Bar = 2,
    Bell = 3,
    /// Jackpot symbol
    Diamond = 4,
}

impl SymbolKind {
    pub const ALL: [SymbolKind; SYMBOL_COUNT] = [
        Self::Cherry,
        Self::Seven,
        Self::Bar,
        Self::Bell,
        Self::Diamond,
    ];

    pub fn from_id(id: SymbolId) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }

    pub fn id(self) -> SymbolId {
        self as SymbolId
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Cherry => "CHERRY",
            Self::Seven => "SEVEN",
            Self::Bar => "BAR",
            Self::Bell => "BELL",
            Self::Diamond => "DIAMOND",
        }
    }
}

/// Display name for an id, `"?"` if unknown
pub fn symbol_name(id: SymbolId) -> &'static str {
    SymbolKind::from_id(id).map(SymbolKind::name).unwrap_or("?")
}
