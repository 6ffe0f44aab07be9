//! # rf-reels — Reel Spin Orchestration for ReelForge
//!
//! Deterministic 5×3 slot core: a seeded outcome engine decides every spin
//! up front, animated reels are driven to land on it, and a balance ledger
//! settles the bet and the payout.
//!
//! ## Features
//!
//! - **Seeded RNG**: bit-reproducible LCG outcomes per seed
//! - **Paylines**: 20 fixed lines, left-to-right runs of 3+ pay
//! - **Reel Animation**: accelerate, spin, back-out stop onto a committed symbol
//! - **Sequencing**: staggered starts and stops on a single tick-driven scheduler
//! - **Stage Trace**: every spin recorded as timestamped `rf-stage` events
//! - **Headless Backend**: run and test the whole flow without a renderer
//!
//! ## Architecture
//!
//! ```text
//! SpinOrchestrator
//!     │
//!     ├── BalanceLedger (debit/credit + observers)
//!     ├── OutcomeEngine (RandomSource → Grid → PaylineWins)
//!     ├── Scheduler (reel start/stop + settle deadlines)
//!     └── ReelController × 5 (Tween-driven strips)
//!           │
//!           v
//!     RenderBackend (nodes, textures, positions, mask)
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod orchestrator;
pub mod paytable;
pub mod reel;
pub mod render;
pub mod rng;
pub mod scheduler;
pub mod spin;
pub mod symbols;
pub mod timing;
pub mod tween;

pub use config::*;
pub use engine::*;
pub use error::*;
pub use ledger::*;
pub use orchestrator::*;
pub use paytable::*;
pub use reel::*;
pub use render::*;
pub use rng::*;
pub use spin::*;
pub use symbols::*;
pub use timing::*;
pub use tween::*;

pub use rf_stage::{Stage, StageEvent, StageTrace, TraceError};
