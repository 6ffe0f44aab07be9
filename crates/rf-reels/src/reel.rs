//! Reel controller — per-reel spin/stop animation state machine
//!
//! ```text
//! Idle ──spin()──▶ Accelerating ──(ramp done)──▶ Spinning
//!                       │                            │
//!                       └──────────stop(id)──────────┤
//!                                                    ▼
//! Idle ◀──(next tick)── Settled ◀──(tween done)── Stopping
//! ```
//!
//! The strip is a ring of `STRIP_SLOTS` slots. Slot `i` sits at raw height
//! `(offset + i·h) mod (STRIP_SLOTS·h)` and is drawn at `raw − h`, so the
//! strip wraps continuously as `offset` grows. A stop always lands
//! `LANDING_SLOT` at the vertical center (raw `2h`).

use serde::{Deserialize, Serialize};

use crate::config::ReelGeometry;
use crate::render::{NodeId, RenderBackend, TextureAtlas};
use crate::symbols::SymbolId;
use crate::timing::TimingConfig;
use crate::tween::{Easing, Tween};

/// Slots on the strip (3 visible + buffer)
pub const STRIP_SLOTS: usize = 5;
/// Slot that carries the committed symbol into the center row
pub const LANDING_SLOT: usize = 0;
/// Raw strip height of the center row, in slot heights
const CENTER_SLOTS: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReelPhase {
    Idle,
    Accelerating,
    Spinning,
    Stopping,
    Settled,
}

impl ReelPhase {
    pub fn is_moving(self) -> bool {
        matches!(self, Self::Accelerating | Self::Spinning | Self::Stopping)
    }
}

/// Snapshot of a reel's animation state
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReelState {
    pub phase: ReelPhase,
    /// Scroll offset (px)
    pub offset: f64,
    /// Current scroll speed (px per ms)
    pub speed: f64,
    /// Symbol the current or last stop landed on
    pub landing_symbol: Option<SymbolId>,
}

/// Completion signal returned from `update`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReelSignal {
    Settled {
        reel_index: usize,
        symbol_id: SymbolId,
    },
}

/// Motion parameters, taken from the timing config
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReelMotion {
    pub spin_speed: f64,
    pub accel_duration_ms: f64,
    pub stop_duration_ms: f64,
    pub extra_strip_loops: u32,
    pub overshoot: f64,
}

impl ReelMotion {
    pub fn from_timing(timing: &TimingConfig) -> Self {
        Self {
            spin_speed: timing.spin_speed_px_per_ms,
            accel_duration_ms: timing.reel_accel_duration_ms,
            stop_duration_ms: timing.reel_stop_duration_ms,
            extra_strip_loops: timing.extra_strip_loops,
            overshoot: timing.stop_overshoot,
        }
    }
}

impl Default for ReelMotion {
    fn default() -> Self {
        Self::from_timing(&TimingConfig::normal())
    }
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    node: NodeId,
    symbol: SymbolId,
}

/// One reel: owns its strip nodes and its animation state
#[derive(Debug, Clone)]
pub struct ReelController {
    index: usize,
    geometry: ReelGeometry,
    symbol_height: f64,
    motion: ReelMotion,
    slots: Vec<Slot>,
    state: ReelState,
    speed_tween: Option<Tween>,
    stop_tween: Option<Tween>,
}

impl ReelController {
    /// Create the strip nodes and lay them out at rest
    pub fn new(
        index: usize,
        geometry: ReelGeometry,
        motion: ReelMotion,
        initial_symbols: [SymbolId; STRIP_SLOTS],
        textures: &TextureAtlas,
        backend: &mut dyn RenderBackend,
    ) -> Self {
        let slots = initial_symbols
            .iter()
            .map(|&symbol| {
                let node = backend.create_node();
                if let Some(texture) = textures.get(symbol) {
                    backend.set_texture(node, texture);
                }
                Slot { node, symbol }
            })
            .collect();

        let reel = Self {
            index,
            geometry,
            symbol_height: geometry.height / 3.0,
            motion,
            slots,
            state: ReelState {
                phase: ReelPhase::Idle,
                offset: 0.0,
                speed: 0.0,
                landing_symbol: None,
            },
            speed_tween: None,
            stop_tween: None,
        };
        reel.layout(backend);
        reel
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn state(&self) -> ReelState {
        self.state
    }

    pub fn phase(&self) -> ReelPhase {
        self.state.phase
    }

    pub fn symbol_height(&self) -> f64 {
        self.symbol_height
    }

    /// Height of one full loop of the strip
    pub fn strip_height(&self) -> f64 {
        self.symbol_height * self.slots.len() as f64
    }

    /// Symbol currently displayed by `slot`
    pub fn displayed_symbol(&self, slot: usize) -> Option<SymbolId> {
        self.slots.get(slot).map(|s| s.symbol)
    }

    pub fn slot_node(&self, slot: usize) -> Option<NodeId> {
        self.slots.get(slot).map(|s| s.node)
    }

    /// Raw strip height of `slot`, in `[0, strip_height)`
    pub fn slot_raw_y(&self, slot: usize) -> f64 {
        wrap(
            self.state.offset + slot as f64 * self.symbol_height,
            self.strip_height(),
        )
    }

    /// Raw height at which a slot is centered in the window
    pub fn center_raw_y(&self) -> f64 {
        CENTER_SLOTS * self.symbol_height
    }

    /// Start spinning. No-op unless idle.
    pub fn spin(&mut self) -> bool {
        if self.state.phase != ReelPhase::Idle {
            return false;
        }
        self.state.phase = ReelPhase::Accelerating;
        self.state.speed = 0.0;
        self.speed_tween = Some(Tween::new(
            0.0,
            self.motion.spin_speed,
            self.motion.accel_duration_ms,
            Easing::CubicIn,
        ));
        true
    }

    /// Decelerate onto `target` at the center row. No-op unless moving
    /// freely (accelerating or spinning).
    pub fn stop(
        &mut self,
        target: SymbolId,
        textures: &TextureAtlas,
        backend: &mut dyn RenderBackend,
    ) -> bool {
        if !matches!(
            self.state.phase,
            ReelPhase::Accelerating | ReelPhase::Spinning
        ) {
            return false;
        }

        // The landing slot shows the target before it ever reaches the window
        self.assign_landing(target, textures, backend);

        let strip = self.strip_height();
        let current = wrap(self.state.offset, strip);
        let mut distance = (self.center_raw_y() - current).rem_euclid(strip);
        distance += strip * f64::from(self.motion.extra_strip_loops);

        self.speed_tween = None;
        self.stop_tween = Some(Tween::new(
            self.state.offset,
            self.state.offset + distance,
            self.motion.stop_duration_ms,
            Easing::BackOut {
                overshoot: self.motion.overshoot,
            },
        ));
        self.state.phase = ReelPhase::Stopping;
        true
    }

    /// Put `target` at the center immediately, without animation
    pub fn snap_to(
        &mut self,
        target: SymbolId,
        textures: &TextureAtlas,
        backend: &mut dyn RenderBackend,
    ) -> ReelSignal {
        self.assign_landing(target, textures, backend);
        self.speed_tween = None;
        self.stop_tween = None;
        self.state.offset = self.center_raw_y();
        self.finish_stop(backend)
    }

    /// Advance animation by `dt_ms`; returns a signal when a stop completes
    pub fn update(&mut self, dt_ms: f64, backend: &mut dyn RenderBackend) -> Option<ReelSignal> {
        let dt_ms = if dt_ms.is_finite() { dt_ms.max(0.0) } else { 0.0 };

        match self.state.phase {
            ReelPhase::Idle => None,
            ReelPhase::Settled => {
                self.state.phase = ReelPhase::Idle;
                None
            }
            ReelPhase::Accelerating => {
                if let Some(tween) = self.speed_tween.as_mut() {
                    self.state.speed = tween.advance(dt_ms);
                    if tween.is_finished() {
                        self.speed_tween = None;
                        self.state.speed = self.motion.spin_speed;
                        self.state.phase = ReelPhase::Spinning;
                    }
                }
                self.state.offset += self.state.speed * dt_ms;
                self.layout(backend);
                None
            }
            ReelPhase::Spinning => {
                self.state.offset += self.state.speed * dt_ms;
                self.layout(backend);
                None
            }
            ReelPhase::Stopping => {
                let Some(tween) = self.stop_tween.as_mut() else {
                    return Some(self.finish_stop(backend));
                };
                self.state.offset = tween.advance(dt_ms);
                if tween.is_finished() {
                    self.stop_tween = None;
                    return Some(self.finish_stop(backend));
                }
                self.layout(backend);
                None
            }
        }
    }

    /// Kill any in-flight animation and come to rest where the strip is
    pub fn cancel(&mut self) {
        self.speed_tween = None;
        self.stop_tween = None;
        self.state.speed = 0.0;
        self.state.offset = wrap(self.state.offset, self.strip_height());
        self.state.phase = ReelPhase::Idle;
    }

    fn assign_landing(
        &mut self,
        target: SymbolId,
        textures: &TextureAtlas,
        backend: &mut dyn RenderBackend,
    ) {
        let slot = &mut self.slots[LANDING_SLOT];
        slot.symbol = target;
        match textures.get(target) {
            Some(texture) => backend.set_texture(slot.node, texture),
            None => log::warn!("Reel {}: no texture for symbol {}", self.index, target),
        }
        self.state.landing_symbol = Some(target);
    }

    fn finish_stop(&mut self, backend: &mut dyn RenderBackend) -> ReelSignal {
        self.state.offset = wrap(self.state.offset, self.strip_height());
        self.state.speed = 0.0;
        self.state.phase = ReelPhase::Settled;
        self.layout(backend);
        ReelSignal::Settled {
            reel_index: self.index,
            symbol_id: self.slots[LANDING_SLOT].symbol,
        }
    }

    fn layout(&self, backend: &mut dyn RenderBackend) {
        let x = self.geometry.x + self.geometry.width / 2.0;
        for (i, slot) in self.slots.iter().enumerate() {
            let y = self.geometry.y + self.slot_raw_y(i) - self.symbol_height;
            backend.set_position(slot.node, x, y);
        }
    }
}

/// `value mod modulus` in `[0, modulus)`
fn wrap(value: f64, modulus: f64) -> f64 {
    let wrapped = value.rem_euclid(modulus);
    if wrapped >= modulus { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{HeadlessBackend, TextureId};
    use approx::assert_relative_eq;

    const FRAME_MS: f64 = 1000.0 / 60.0;

    fn geometry() -> ReelGeometry {
        ReelGeometry {
            x: 100.0,
            y: 60.0,
            width: 200.0,
            height: 600.0,
        }
    }

    fn make_reel(backend: &mut HeadlessBackend) -> (ReelController, TextureAtlas) {
        let atlas = TextureAtlas::sequential(5);
        let reel = ReelController::new(
            0,
            geometry(),
            ReelMotion::default(),
            [0, 1, 2, 3, 4],
            &atlas,
            backend,
        );
        (reel, atlas)
    }

    fn run_until_settled(reel: &mut ReelController, backend: &mut HeadlessBackend) -> ReelSignal {
        for _ in 0..10_000 {
            if let Some(signal) = reel.update(FRAME_MS, backend) {
                return signal;
            }
        }
        panic!("reel never settled");
    }

    #[test]
    fn test_initial_layout() {
        let mut backend = HeadlessBackend::new();
        let (reel, _) = make_reel(&mut backend);
        assert_eq!(backend.node_count(), STRIP_SLOTS);
        assert_eq!(reel.strip_height(), 1000.0);
        // Slot 1 at raw 200 is drawn at the window top + 200 − 200
        let node = reel.slot_node(1).unwrap();
        assert_eq!(backend.position_of(node), Some((200.0, 60.0)));
        assert_eq!(backend.texture_of(node), Some(TextureId(1)));
    }

    #[test]
    fn test_spin_only_from_idle() {
        let mut backend = HeadlessBackend::new();
        let (mut reel, _) = make_reel(&mut backend);
        assert!(reel.spin());
        assert_eq!(reel.phase(), ReelPhase::Accelerating);
        assert!(!reel.spin());
    }

    #[test]
    fn test_acceleration_reaches_spinning() {
        let mut backend = HeadlessBackend::new();
        let (mut reel, _) = make_reel(&mut backend);
        reel.spin();
        reel.update(500.0, &mut backend);
        assert_eq!(reel.phase(), ReelPhase::Accelerating);
        assert!(reel.state().speed < ReelMotion::default().spin_speed);
        reel.update(500.0, &mut backend);
        assert_eq!(reel.phase(), ReelPhase::Spinning);
        assert_eq!(reel.state().speed, ReelMotion::default().spin_speed);

        let before = reel.state().offset;
        reel.update(10.0, &mut backend);
        assert_relative_eq!(reel.state().offset - before, 12.0, epsilon = 1e-9);
    }

    #[test]
    fn test_stop_rejected_when_idle() {
        let mut backend = HeadlessBackend::new();
        let (mut reel, atlas) = make_reel(&mut backend);
        assert!(!reel.stop(3, &atlas, &mut backend));
        assert_eq!(reel.phase(), ReelPhase::Idle);
        assert_eq!(reel.state().landing_symbol, None);
    }

    #[test]
    fn test_landing_texture_set_before_deceleration() {
        let mut backend = HeadlessBackend::new();
        let (mut reel, atlas) = make_reel(&mut backend);
        reel.spin();
        for _ in 0..90 {
            reel.update(FRAME_MS, &mut backend);
        }
        assert!(reel.stop(3, &atlas, &mut backend));
        let landing = reel.slot_node(LANDING_SLOT).unwrap();
        assert_eq!(backend.texture_of(landing), Some(TextureId(3)));
        assert_eq!(reel.phase(), ReelPhase::Stopping);
        // A second stop during the deceleration is ignored
        assert!(!reel.stop(1, &atlas, &mut backend));
    }

    #[test]
    fn test_stop_lands_target_at_center() {
        let mut backend = HeadlessBackend::new();
        let (mut reel, atlas) = make_reel(&mut backend);
        reel.spin();
        for _ in 0..137 {
            reel.update(FRAME_MS, &mut backend);
        }
        reel.stop(4, &atlas, &mut backend);

        let signal = run_until_settled(&mut reel, &mut backend);
        assert_eq!(
            signal,
            ReelSignal::Settled {
                reel_index: 0,
                symbol_id: 4
            }
        );
        assert_eq!(reel.phase(), ReelPhase::Settled);
        assert_eq!(reel.displayed_symbol(LANDING_SLOT), Some(4));

        let offset = reel.state().offset;
        assert!((0.0..reel.strip_height()).contains(&offset));
        assert_relative_eq!(reel.slot_raw_y(LANDING_SLOT), reel.center_raw_y(), epsilon = 1e-6);

        // Drawn one slot below the window top, i.e. the middle row
        let (_, y) = backend.position_of(reel.slot_node(LANDING_SLOT).unwrap()).unwrap();
        assert_relative_eq!(y, 60.0 + reel.symbol_height(), epsilon = 1e-6);

        reel.update(FRAME_MS, &mut backend);
        assert_eq!(reel.phase(), ReelPhase::Idle);
    }

    #[test]
    fn test_stop_during_acceleration() {
        let mut backend = HeadlessBackend::new();
        let (mut reel, atlas) = make_reel(&mut backend);
        reel.spin();
        reel.update(FRAME_MS, &mut backend);
        assert!(reel.stop(2, &atlas, &mut backend));
        run_until_settled(&mut reel, &mut backend);
        assert_eq!(reel.displayed_symbol(LANDING_SLOT), Some(2));
    }

    #[test]
    fn test_stop_travels_extra_loops() {
        let mut backend = HeadlessBackend::new();
        let (mut reel, atlas) = make_reel(&mut backend);
        reel.spin();
        reel.update(1000.0, &mut backend);
        let start = reel.state().offset;
        reel.stop(0, &atlas, &mut backend);
        let travel = reel.stop_tween.as_ref().unwrap().to() - start;
        let strip = reel.strip_height();
        assert!(travel >= strip * 5.0);
        assert!(travel < strip * 6.0);
    }

    #[test]
    fn test_cancel_mid_stop() {
        let mut backend = HeadlessBackend::new();
        let (mut reel, atlas) = make_reel(&mut backend);
        reel.spin();
        reel.update(1200.0, &mut backend);
        reel.stop(1, &atlas, &mut backend);
        reel.update(100.0, &mut backend);
        reel.cancel();
        assert_eq!(reel.phase(), ReelPhase::Idle);
        assert_eq!(reel.update(5000.0, &mut backend), None);
        assert!(reel.state().offset < reel.strip_height());
    }

    #[test]
    fn test_snap_to() {
        let mut backend = HeadlessBackend::new();
        let (mut reel, atlas) = make_reel(&mut backend);
        let signal = reel.snap_to(3, &atlas, &mut backend);
        assert_eq!(
            signal,
            ReelSignal::Settled {
                reel_index: 0,
                symbol_id: 3
            }
        );
        assert_relative_eq!(reel.slot_raw_y(LANDING_SLOT), reel.center_raw_y());
    }
}
