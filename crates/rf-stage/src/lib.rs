//! # rf-stage — ReelForge Spin Stages
//!
//! Defines the canonical moments of a reel spin and a per-spin trace of them.
//! The orchestrator records stages as they happen; hosts and tests read the
//! trace to drive audio/UI cues or to check sequencing.
//!
//! ## Philosophy
//!
//! A spin always passes through the same semantic phases:
//! - Bet debited → Reels start → Stops issued → Reels settle → Wins evaluated
//!
//! Stages carry no animation data, only what happened and when.

pub mod event;
pub mod stage;
pub mod trace;

pub use event::*;
pub use stage::*;
pub use trace::*;
