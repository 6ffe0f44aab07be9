//! SpinOrchestrator — bet, outcome, reel sequencing and payout
//!
//! ```text
//! spin() ─▶ CollectingBet ─▶ Spinning ──(last stop command)──▶ AwaitingStops
//!   debit       grid fixed      reel i starts at i·stagger           │
//!                               reel i stops at duration + i·interval│
//!                                                                    ▼
//!        Idle ◀── credit + notify ◀── Evaluating ◀──(last settle + delay)
//! ```
//!
//! Everything runs on the host's tick. Pending actions live in one
//! [`Scheduler`], so teardown is a single `cancel_all`.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rf_stage::{Stage, StageEvent, StageTrace};
use serde::Serialize;

use crate::config::{BET, REEL_COUNT, SlotConfig};
use crate::engine::OutcomeEngine;
use crate::error::{SlotError, SlotResult};
use crate::ledger::{BalanceLedger, SubscriptionId};
use crate::paytable::PaylineWin;
use crate::reel::{ReelController, ReelMotion, ReelSignal, STRIP_SLOTS};
use crate::render::{RenderBackend, TextureAtlas};
use crate::scheduler::{Scheduler, ms};
use crate::spin::SpinSession;
use crate::symbols::{SYMBOL_COUNT, SymbolId, symbol_name};
use crate::timing::TimingConfig;

/// Orchestrator phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SpinPhase {
    Idle,
    CollectingBet,
    Spinning,
    AwaitingStops,
    Evaluating,
}

impl SpinPhase {
    pub fn name(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::CollectingBet => "collecting_bet",
            Self::Spinning => "spinning",
            Self::AwaitingStops => "awaiting_stops",
            Self::Evaluating => "evaluating",
        }
    }
}

/// Host attachment state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Lifecycle {
    Created,
    Running,
    Destroyed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Timer {
    ReelStart(usize),
    ReelStop(usize),
    Settle,
}

/// Running totals over the session
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionStats {
    /// Spins accepted (bet debited)
    pub total_spins: u64,
    /// Spins that reached evaluation
    pub completed_spins: u64,
    pub total_bet: u64,
    pub total_win: u64,
    pub winning_spins: u64,
    pub biggest_win: u64,
}

impl SessionStats {
    /// Return to player: total won / total bet
    pub fn rtp(&self) -> f64 {
        if self.total_bet == 0 {
            0.0
        } else {
            self.total_win as f64 / self.total_bet as f64
        }
    }

    /// Fraction of completed spins that paid anything
    pub fn hit_rate(&self) -> f64 {
        if self.completed_spins == 0 {
            0.0
        } else {
            self.winning_spins as f64 / self.completed_spins as f64
        }
    }
}

/// Drives one slot session against a render backend
pub struct SpinOrchestrator<B: RenderBackend> {
    seed: u32,
    timing: TimingConfig,
    config: SlotConfig,
    engine: OutcomeEngine,
    ledger: BalanceLedger,
    scheduler: Scheduler<Timer>,
    phase: SpinPhase,
    lifecycle: Lifecycle,
    backend: Option<B>,
    textures: Option<TextureAtlas>,
    reels: Vec<ReelController>,
    session: Option<SpinSession>,
    last_spin: Option<SpinSession>,
    trace: Option<StageTrace>,
    stats: SessionStats,
    spin_counter: u64,
}

impl<B: RenderBackend> SpinOrchestrator<B> {
    pub fn new(config: SlotConfig) -> SlotResult<Self> {
        config.validate()?;
        let seed = config.resolved_seed();
        let timing = config.timing_config();
        log::debug!("SpinOrchestrator: seed {}, profile {:?}", seed, timing.profile);

        Ok(Self {
            seed,
            timing,
            engine: OutcomeEngine::new(seed, SYMBOL_COUNT),
            ledger: BalanceLedger::new(config.initial_balance),
            config,
            scheduler: Scheduler::new(),
            phase: SpinPhase::Idle,
            lifecycle: Lifecycle::Created,
            backend: None,
            textures: None,
            reels: Vec::new(),
            session: None,
            last_spin: None,
            trace: None,
            stats: SessionStats::default(),
            spin_counter: 0,
        })
    }

    // ═══════════════════════════════════════════════════════════════════════
    // LIFECYCLE
    // ═══════════════════════════════════════════════════════════════════════

    /// Attach the render surface, build the reels and start accepting ticks
    pub fn initialize(&mut self, mut backend: B, textures: TextureAtlas) -> SlotResult<()> {
        match self.lifecycle {
            Lifecycle::Created => {}
            Lifecycle::Running => {
                log::warn!("initialize() called twice, ignoring");
                backend.release();
                return Err(SlotError::LifecycleMisuse("already initialized"));
            }
            Lifecycle::Destroyed => {
                log::warn!("initialize() after clean_up(), releasing host");
                backend.release();
                return Err(SlotError::LifecycleMisuse("initialize after teardown"));
            }
        }

        if textures.len() != SYMBOL_COUNT {
            backend.release();
            return Err(SlotError::TextureCount {
                expected: SYMBOL_COUNT,
                actual: textures.len(),
            });
        }

        let layout = self.config.layout;
        let motion = ReelMotion::from_timing(&self.timing);
        let mut cosmetic = StdRng::seed_from_u64(u64::from(self.seed));

        self.reels = (0..REEL_COUNT)
            .map(|i| {
                let symbols: [SymbolId; STRIP_SLOTS] =
                    std::array::from_fn(|_| cosmetic.random_range(0..SYMBOL_COUNT as SymbolId));
                ReelController::new(
                    i,
                    layout.reel_geometry(i),
                    motion,
                    symbols,
                    &textures,
                    &mut backend,
                )
            })
            .collect();
        backend.mask_region(layout.mask_bounds());

        self.backend = Some(backend);
        self.textures = Some(textures);
        self.lifecycle = Lifecycle::Running;
        log::info!(
            "SpinOrchestrator initialized: {} reels, balance {}",
            REEL_COUNT,
            self.ledger.balance()
        );
        Ok(())
    }

    /// Stop everything and release the backend. Safe at any time, any number
    /// of times.
    pub fn clean_up(&mut self) {
        if self.lifecycle == Lifecycle::Destroyed {
            return;
        }
        self.scheduler.cancel_all();
        for reel in &mut self.reels {
            reel.cancel();
        }
        if let Some(backend) = self.backend.as_mut() {
            backend.release();
        }
        if let Some(session) = self.session.take() {
            log::warn!("Spin {} abandoned by teardown", session.spin_id);
        }
        self.phase = SpinPhase::Idle;
        self.lifecycle = Lifecycle::Destroyed;
        log::info!("SpinOrchestrator cleaned up");
    }

    // ═══════════════════════════════════════════════════════════════════════
    // BALANCE
    // ═══════════════════════════════════════════════════════════════════════

    pub fn subscribe_balance(&mut self, observer: impl FnMut(u64) + 'static) -> SubscriptionId {
        self.ledger.subscribe(observer)
    }

    pub fn unsubscribe_balance(&mut self, id: SubscriptionId) -> bool {
        self.ledger.unsubscribe(id)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // SPIN FLOW
    // ═══════════════════════════════════════════════════════════════════════

    /// Take the bet, commit the outcome and schedule the reels.
    ///
    /// Rejections leave everything untouched: no debit, no notification, no
    /// timers.
    pub fn spin(&mut self) -> SlotResult<()> {
        match self.lifecycle {
            Lifecycle::Running => {}
            Lifecycle::Created => return Err(SlotError::LifecycleMisuse("spin before initialize")),
            Lifecycle::Destroyed => return Err(SlotError::LifecycleMisuse("spin after teardown")),
        }
        if self.phase != SpinPhase::Idle {
            return Err(SlotError::AlreadySpinning {
                phase: self.phase.name(),
            });
        }
        if !self.ledger.can_afford(BET) {
            return Err(SlotError::InsufficientBalance {
                balance: self.ledger.balance(),
                bet: BET,
            });
        }

        self.phase = SpinPhase::CollectingBet;
        let balance = self.ledger.debit(BET)?;

        self.phase = SpinPhase::Spinning;
        let grid = self.engine.spin(REEL_COUNT);
        self.spin_counter += 1;
        self.stats.total_spins += 1;
        self.stats.total_bet += BET;

        let now = self.scheduler.now();
        let mut trace = StageTrace::new(self.spin_counter);
        trace.push(StageEvent::new(
            Stage::SpinStart {
                bet: BET,
                grid: grid.to_vecs(),
            },
            to_ms(now),
        ));
        trace.push(StageEvent::new(
            Stage::BalanceChanged { balance },
            to_ms(now),
        ));
        self.trace = Some(trace);

        for reel in 0..grid.reel_count() {
            let start_at = now.saturating_add(ms(self.timing.reel_start_at_ms(reel)));
            let stop_at = now.saturating_add(ms(self.timing.reel_stop_at_ms(reel)));
            self.scheduler.schedule_at(start_at, Timer::ReelStart(reel));
            self.scheduler.schedule_at(stop_at, Timer::ReelStop(reel));
        }

        log::debug!(
            "Spin {}: bet {}, balance {}, grid {:?}",
            self.spin_counter,
            BET,
            balance,
            grid.to_vecs()
        );
        self.session = Some(SpinSession::new(self.spin_counter, BET, grid));
        Ok(())
    }

    /// Advance the clock by `delta_ms`: fire due actions, then animate reels
    pub fn tick(&mut self, delta_ms: f64) {
        if self.lifecycle != Lifecycle::Running {
            return;
        }
        self.scheduler.advance(delta_ms);

        while let Some((deadline, timer)) = self.scheduler.pop_due() {
            self.fire(timer, deadline);
        }

        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        let signals: Vec<ReelSignal> = self
            .reels
            .iter_mut()
            .filter_map(|reel| reel.update(delta_ms, backend))
            .collect();

        let now = self.scheduler.now();
        for signal in signals {
            self.on_reel_settled(signal, now);
        }
    }

    fn fire(&mut self, timer: Timer, at: Duration) {
        match timer {
            Timer::ReelStart(reel) => self.start_reel(reel, at),
            Timer::ReelStop(reel) => self.stop_reel(reel, at),
            Timer::Settle => self.evaluate(at),
        }
    }

    fn start_reel(&mut self, index: usize, at: Duration) {
        let Some(reel) = self.reels.get_mut(index) else {
            return;
        };
        if !reel.phase().is_moving() {
            reel.cancel();
        }
        if reel.spin() {
            self.record(
                Stage::ReelSpinningStart {
                    reel_index: index as u8,
                },
                at,
            );
        }
    }

    fn stop_reel(&mut self, index: usize, at: Duration) {
        let Some(target) = self
            .session
            .as_ref()
            .and_then(|s| s.grid.landing_symbol(index))
        else {
            return;
        };
        self.record(
            Stage::ReelStopCommand {
                reel_index: index as u8,
                symbol_id: target,
            },
            at,
        );

        let (Some(reel), Some(backend), Some(textures)) = (
            self.reels.get_mut(index),
            self.backend.as_mut(),
            self.textures.as_ref(),
        ) else {
            return;
        };
        let snapped = if reel.stop(target, textures, backend) {
            None
        } else {
            log::warn!("Reel {} was not spinning at its stop command, snapping", index);
            Some(reel.snap_to(target, textures, backend))
        };

        if index + 1 == REEL_COUNT {
            self.phase = SpinPhase::AwaitingStops;
        }
        if let Some(signal) = snapped {
            self.on_reel_settled(signal, at);
        }
    }

    fn on_reel_settled(&mut self, signal: ReelSignal, at: Duration) {
        let ReelSignal::Settled {
            reel_index,
            symbol_id,
        } = signal;
        self.record(
            Stage::ReelStop {
                reel_index: reel_index as u8,
                symbol_id,
            },
            at,
        );

        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.pending_reels = session.pending_reels.saturating_sub(1);
        if session.all_settled() {
            log::debug!("Spin {}: all reels settled", session.spin_id);
            let settle_at = at.saturating_add(ms(self.timing.settle_delay_ms));
            self.scheduler.schedule_at(settle_at, Timer::Settle);
        }
    }

    fn evaluate(&mut self, at: Duration) {
        let Some(mut session) = self.session.take() else {
            return;
        };
        self.phase = SpinPhase::Evaluating;
        self.record(Stage::EvaluateWins, at);

        let evaluation = self.engine.evaluate(&session.grid);
        for win in &evaluation.wins {
            log::trace!(
                "Spin {}: line {} pays {} x{} = {}",
                session.spin_id,
                win.line_index,
                symbol_name(win.symbol_id),
                win.count,
                win.amount
            );
            self.record(
                Stage::WinLine {
                    line_index: win.line_index,
                    symbol_id: win.symbol_id,
                    count: win.count,
                    amount: win.amount,
                },
                at,
            );
        }

        let balance = self.ledger.credit(evaluation.total_win);
        self.record(Stage::BalanceChanged { balance }, at);

        self.stats.completed_spins += 1;
        self.stats.total_win += evaluation.total_win;
        if evaluation.is_win() {
            self.stats.winning_spins += 1;
            self.stats.biggest_win = self.stats.biggest_win.max(evaluation.total_win);
        }
        self.record(
            Stage::SpinEnd {
                total_win: evaluation.total_win,
            },
            at,
        );

        log::debug!(
            "Spin {}: {} winning lines, won {}, balance {}",
            session.spin_id,
            evaluation.wins.len(),
            evaluation.total_win,
            balance
        );
        session.wins = evaluation.wins;
        self.last_spin = Some(session);
        self.phase = SpinPhase::Idle;
    }

    fn record(&mut self, stage: Stage, at: Duration) {
        if let Some(trace) = self.trace.as_mut() {
            trace.push(StageEvent::new(stage, to_ms(at)));
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // ACCESSORS
    // ═══════════════════════════════════════════════════════════════════════

    pub fn phase(&self) -> SpinPhase {
        self.phase
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_idle(&self) -> bool {
        self.phase == SpinPhase::Idle
    }

    pub fn balance(&self) -> u64 {
        self.ledger.balance()
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn timing(&self) -> &TimingConfig {
        &self.timing
    }

    pub fn reels(&self) -> &[ReelController] {
        &self.reels
    }

    pub fn backend(&self) -> Option<&B> {
        self.backend.as_ref()
    }

    /// Spin in flight
    pub fn session(&self) -> Option<&SpinSession> {
        self.session.as_ref()
    }

    /// Most recently evaluated spin
    pub fn last_spin(&self) -> Option<&SpinSession> {
        self.last_spin.as_ref()
    }

    pub fn last_wins(&self) -> &[PaylineWin] {
        self.last_spin.as_ref().map(|s| s.wins.as_slice()).unwrap_or(&[])
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Stage trace of the current or most recent spin
    pub fn trace(&self) -> Option<&StageTrace> {
        self.trace.as_ref()
    }

    pub fn clock_ms(&self) -> f64 {
        self.scheduler.now_ms()
    }

    /// Actions still waiting on the clock
    pub fn pending_actions(&self) -> usize {
        self.scheduler.pending()
    }
}

impl<B: RenderBackend> Drop for SpinOrchestrator<B> {
    fn drop(&mut self) {
        self.clean_up();
    }
}

fn to_ms(at: Duration) -> f64 {
    at.as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    use crate::reel::{LANDING_SLOT, ReelPhase};
    use crate::render::{Bounds, HeadlessBackend, NodeId, TextureId};

    const FRAME_MS: f64 = 1000.0 / 60.0;

    fn running(seed: u32) -> SpinOrchestrator<HeadlessBackend> {
        let mut orch = SpinOrchestrator::new(SlotConfig::seeded(seed)).unwrap();
        orch.initialize(
            HeadlessBackend::new(),
            TextureAtlas::sequential(SYMBOL_COUNT),
        )
        .unwrap();
        orch
    }

    fn run_until_idle(orch: &mut SpinOrchestrator<HeadlessBackend>) {
        for _ in 0..2_000 {
            orch.tick(FRAME_MS);
            if orch.is_idle() {
                return;
            }
        }
        panic!("spin never finished");
    }

    #[test]
    fn test_initialize_builds_reels() {
        let orch = running(12345);
        assert_eq!(orch.lifecycle(), Lifecycle::Running);
        assert_eq!(orch.reels().len(), REEL_COUNT);
        let backend = orch.backend().unwrap();
        assert_eq!(backend.node_count(), REEL_COUNT * STRIP_SLOTS);
        assert_eq!(backend.masks().len(), 1);
    }

    #[test]
    fn test_initialize_rejects_wrong_texture_count() {
        let mut orch = SpinOrchestrator::new(SlotConfig::seeded(1)).unwrap();
        let result = orch.initialize(HeadlessBackend::new(), TextureAtlas::sequential(3));
        assert_eq!(
            result,
            Err(SlotError::TextureCount {
                expected: 5,
                actual: 3
            })
        );
        assert_eq!(orch.lifecycle(), Lifecycle::Created);
    }

    #[test]
    fn test_spin_before_initialize() {
        let mut orch: SpinOrchestrator<HeadlessBackend> =
            SpinOrchestrator::new(SlotConfig::seeded(1)).unwrap();
        assert!(matches!(orch.spin(), Err(SlotError::LifecycleMisuse(_))));
        assert_eq!(orch.balance(), 1000);
    }

    #[test]
    fn test_spin_debits_and_commits_grid() {
        let mut orch = running(12345);
        orch.spin().unwrap();
        assert_eq!(orch.balance(), 990);
        assert_eq!(orch.phase(), SpinPhase::Spinning);
        let session = orch.session().unwrap();
        assert_eq!(
            session.grid.to_vecs(),
            vec![
                vec![3, 1, 3],
                vec![0, 2, 2],
                vec![3, 1, 1],
                vec![1, 4, 0],
                vec![1, 3, 3]
            ]
        );
        assert_eq!(orch.pending_actions(), 2 * REEL_COUNT);
    }

    #[test]
    fn test_second_spin_rejected() {
        let mut orch = running(12345);
        orch.spin().unwrap();
        assert_eq!(
            orch.spin(),
            Err(SlotError::AlreadySpinning { phase: "spinning" })
        );
        assert_eq!(orch.balance(), 990);
    }

    #[test]
    fn test_full_spin_lands_committed_symbols() {
        let mut orch = running(12345);
        orch.spin().unwrap();
        run_until_idle(&mut orch);

        let spin = orch.last_spin().unwrap();
        for (i, reel) in orch.reels().iter().enumerate() {
            assert_eq!(
                reel.displayed_symbol(LANDING_SLOT),
                spin.grid.landing_symbol(i)
            );
        }
        assert!(orch.last_wins().is_empty());
        assert_eq!(orch.balance(), 990);
        assert_eq!(orch.stats().completed_spins, 1);
    }

    #[test]
    fn test_phase_progression() {
        let mut orch = running(12345);
        orch.spin().unwrap();
        let mut phases = vec![orch.phase()];
        for _ in 0..2_000 {
            orch.tick(FRAME_MS);
            if phases.last() != Some(&orch.phase()) {
                phases.push(orch.phase());
            }
            if orch.is_idle() {
                break;
            }
        }
        // Evaluating is entered and left within one tick
        assert_eq!(
            phases,
            vec![SpinPhase::Spinning, SpinPhase::AwaitingStops, SpinPhase::Idle]
        );
    }

    #[test]
    fn test_evaluation_waits_for_settle_delay() {
        let mut orch = running(12345);
        orch.spin().unwrap();
        while orch.session().is_some_and(|s| !s.all_settled()) {
            orch.tick(FRAME_MS);
        }
        let settled_at = orch.clock_ms();
        assert_eq!(orch.phase(), SpinPhase::AwaitingStops);
        while !orch.is_idle() {
            orch.tick(FRAME_MS);
        }
        assert!(orch.clock_ms() - settled_at >= orch.timing().settle_delay_ms);
    }

    #[test]
    fn test_clean_up_mid_spin() {
        let mut orch = running(12345);
        orch.spin().unwrap();
        for _ in 0..150 {
            orch.tick(FRAME_MS);
        }
        orch.clean_up();

        assert_eq!(orch.lifecycle(), Lifecycle::Destroyed);
        assert_eq!(orch.pending_actions(), 0);
        assert!(orch.reels().iter().all(|r| r.phase() == ReelPhase::Idle));
        assert_eq!(orch.backend().unwrap().release_count(), 1);

        orch.tick(10_000.0);
        assert!(orch.last_spin().is_none());
        assert!(matches!(orch.spin(), Err(SlotError::LifecycleMisuse(_))));

        orch.clean_up();
        assert_eq!(orch.backend().unwrap().release_count(), 1);
    }

    /// Backend whose release count survives being moved into the orchestrator
    #[derive(Default)]
    struct SharedBackend {
        inner: HeadlessBackend,
        released: Rc<Cell<u32>>,
    }

    impl RenderBackend for SharedBackend {
        fn create_node(&mut self) -> NodeId {
            self.inner.create_node()
        }

        fn set_texture(&mut self, node: NodeId, texture: TextureId) {
            self.inner.set_texture(node, texture);
        }

        fn set_position(&mut self, node: NodeId, x: f64, y: f64) {
            self.inner.set_position(node, x, y);
        }

        fn mask_region(&mut self, bounds: Bounds) {
            self.inner.mask_region(bounds);
        }

        fn release(&mut self) {
            self.released.set(self.released.get() + 1);
            self.inner.release();
        }
    }

    #[test]
    fn test_second_initialize_rejected() {
        let mut orch: SpinOrchestrator<SharedBackend> =
            SpinOrchestrator::new(SlotConfig::seeded(12345)).unwrap();
        let first = SharedBackend::default();
        let first_released = Rc::clone(&first.released);
        orch.initialize(first, TextureAtlas::sequential(SYMBOL_COUNT))
            .unwrap();

        let second = SharedBackend::default();
        let second_released = Rc::clone(&second.released);
        assert!(matches!(
            orch.initialize(second, TextureAtlas::sequential(SYMBOL_COUNT)),
            Err(SlotError::LifecycleMisuse(_))
        ));

        assert_eq!(orch.lifecycle(), Lifecycle::Running);
        let attached = &orch.backend().unwrap().inner;
        assert_eq!(attached.node_count(), REEL_COUNT * STRIP_SLOTS);
        assert_eq!(attached.release_count(), 0);
        assert_eq!(first_released.get(), 0);
        assert_eq!(second_released.get(), 1);

        // The running session is unaffected
        orch.spin().unwrap();
        assert_eq!(orch.balance(), 990);
    }

    #[test]
    fn test_wrong_texture_count_releases_backend() {
        let mut orch: SpinOrchestrator<SharedBackend> =
            SpinOrchestrator::new(SlotConfig::seeded(1)).unwrap();
        let backend = SharedBackend::default();
        let released = Rc::clone(&backend.released);
        assert!(matches!(
            orch.initialize(backend, TextureAtlas::sequential(4)),
            Err(SlotError::TextureCount { .. })
        ));
        assert_eq!(released.get(), 1);
        assert!(orch.backend().is_none());
    }

    #[test]
    fn test_spin_after_saturated_clock() {
        let mut orch = running(12345);
        orch.tick(f64::MAX);
        assert_eq!(orch.spin(), Ok(()));
        assert_eq!(orch.balance(), 990);
        assert_eq!(orch.pending_actions(), 2 * REEL_COUNT);
        for _ in 0..10 {
            orch.tick(FRAME_MS);
        }
        orch.clean_up();
        assert_eq!(orch.pending_actions(), 0);
    }

    #[test]
    fn test_initialize_after_clean_up_rejected() {
        let mut orch = running(7);
        orch.clean_up();
        assert!(matches!(
            orch.initialize(
                HeadlessBackend::new(),
                TextureAtlas::sequential(SYMBOL_COUNT),
            ),
            Err(SlotError::LifecycleMisuse(_))
        ));
        assert_eq!(orch.lifecycle(), Lifecycle::Destroyed);
    }

    #[test]
    fn test_stats() {
        let mut stats = SessionStats::default();
        assert_eq!(stats.rtp(), 0.0);
        assert_eq!(stats.hit_rate(), 0.0);
        stats.total_bet = 100;
        stats.total_win = 50;
        stats.completed_spins = 10;
        stats.winning_spins = 3;
        assert_eq!(stats.rtp(), 0.5);
        assert_eq!(stats.hit_rate(), 0.3);
    }
}
