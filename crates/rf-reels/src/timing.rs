//! Timing profiles for spin sequencing and reel motion

use serde::{Deserialize, Serialize};

use crate::error::{SlotError, SlotResult};

/// Timing profile for a spin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TimingProfile {
    /// Normal gameplay timing
    #[default]
    Normal,
    /// Fast/Turbo mode
    Turbo,
    /// Scaled or hand-edited timing
    Custom,
}

/// Detailed timing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Profile type
    pub profile: TimingProfile,

    /// Delay between consecutive reel starts (ms)
    pub reel_start_stagger_ms: f64,

    /// Time from spin start to the first stop command (ms)
    pub reel_spin_duration_ms: f64,

    /// Delay between consecutive stop commands (ms)
    pub reel_stop_interval_ms: f64,

    /// Pause after the last reel settles before evaluating (ms)
    pub settle_delay_ms: f64,

    /// Speed ramp from rest to full spin (ms)
    pub reel_accel_duration_ms: f64,

    /// Deceleration + overshoot after a stop command (ms)
    pub reel_stop_duration_ms: f64,

    /// Full spin speed (px per ms)
    pub spin_speed_px_per_ms: f64,

    /// Whole strip loops added to each stop for a longer slowdown
    pub extra_strip_loops: u32,

    /// Back-out overshoot strength of the stop ease
    pub stop_overshoot: f64,
}

impl TimingConfig {
    /// Normal gameplay timing
    pub fn normal() -> Self {
        Self {
            profile: TimingProfile::Normal,
            reel_start_stagger_ms: 100.0,
            reel_spin_duration_ms: 2000.0,
            reel_stop_interval_ms: 500.0,
            settle_delay_ms: 500.0,
            reel_accel_duration_ms: 1000.0,
            reel_stop_duration_ms: 2500.0,
            spin_speed_px_per_ms: 1.2,
            extra_strip_loops: 5,
            stop_overshoot: 0.5,
        }
    }

    /// Turbo mode
    pub fn turbo() -> Self {
        Self {
            profile: TimingProfile::Turbo,
            reel_start_stagger_ms: 50.0,
            reel_spin_duration_ms: 800.0,
            reel_stop_interval_ms: 200.0,
            settle_delay_ms: 200.0,
            reel_accel_duration_ms: 400.0,
            reel_stop_duration_ms: 1000.0,
            spin_speed_px_per_ms: 2.4,
            extra_strip_loops: 2,
            stop_overshoot: 0.5,
        }
    }

    /// Get config for profile
    pub fn from_profile(profile: TimingProfile) -> Self {
        match profile {
            TimingProfile::Normal => Self::normal(),
            TimingProfile::Turbo => Self::turbo(),
            TimingProfile::Custom => Self::normal(),
        }
    }

    /// Scale timing by factor (< 1.0 = faster)
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            profile: TimingProfile::Custom,
            reel_start_stagger_ms: self.reel_start_stagger_ms * factor,
            reel_spin_duration_ms: self.reel_spin_duration_ms * factor,
            reel_stop_interval_ms: self.reel_stop_interval_ms * factor,
            settle_delay_ms: self.settle_delay_ms * factor,
            reel_accel_duration_ms: self.reel_accel_duration_ms * factor,
            reel_stop_duration_ms: self.reel_stop_duration_ms * factor,
            spin_speed_px_per_ms: self.spin_speed_px_per_ms / factor,
            extra_strip_loops: self.extra_strip_loops,
            stop_overshoot: self.stop_overshoot,
        }
    }

    /// Offset from spin start at which reel `reel` begins spinning
    pub fn reel_start_at_ms(&self, reel: usize) -> f64 {
        reel as f64 * self.reel_start_stagger_ms
    }

    /// Offset from spin start at which reel `reel` gets its stop command
    pub fn reel_stop_at_ms(&self, reel: usize) -> f64 {
        self.reel_spin_duration_ms + reel as f64 * self.reel_stop_interval_ms
    }

    /// Spin start to evaluation, assuming every reel stops on schedule
    pub fn total_spin_duration(&self, reel_count: usize) -> f64 {
        self.reel_stop_at_ms(reel_count.saturating_sub(1))
            + self.reel_stop_duration_ms
            + self.settle_delay_ms
    }

    /// Reject timing the orchestrator cannot sequence
    pub fn validate(&self, reel_count: usize) -> SlotResult<()> {
        let durations = [
            ("reel_start_stagger_ms", self.reel_start_stagger_ms),
            ("reel_spin_duration_ms", self.reel_spin_duration_ms),
            ("reel_stop_interval_ms", self.reel_stop_interval_ms),
            ("settle_delay_ms", self.settle_delay_ms),
            ("reel_accel_duration_ms", self.reel_accel_duration_ms),
            ("reel_stop_duration_ms", self.reel_stop_duration_ms),
        ];
        for (name, value) in durations {
            if !value.is_finite() || value < 0.0 {
                return Err(SlotError::InvalidTiming(format!("{name} = {value}")));
            }
        }
        if self.reel_stop_interval_ms <= 0.0 {
            return Err(SlotError::InvalidTiming(
                "reel_stop_interval_ms must be positive".into(),
            ));
        }
        if !(self.spin_speed_px_per_ms.is_finite() && self.spin_speed_px_per_ms > 0.0) {
            return Err(SlotError::InvalidTiming(format!(
                "spin_speed_px_per_ms = {}",
                self.spin_speed_px_per_ms
            )));
        }
        // Every reel has to be moving before its stop command arrives
        if let Some(reel) =
            (0..reel_count).find(|&r| self.reel_stop_at_ms(r) < self.reel_start_at_ms(r))
        {
            return Err(SlotError::InvalidTiming(format!(
                "reel {reel} would be stopped before it starts"
            )));
        }
        Ok(())
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self::normal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timing_profiles() {
        let normal = TimingConfig::normal();
        let turbo = TimingConfig::turbo();

        assert!(turbo.reel_spin_duration_ms < normal.reel_spin_duration_ms);
        assert!(turbo.reel_stop_interval_ms < normal.reel_stop_interval_ms);
        assert_eq!(TimingConfig::from_profile(TimingProfile::Turbo), turbo);
        assert!(normal.validate(5).is_ok());
        assert!(turbo.validate(5).is_ok());
    }

    #[test]
    fn test_stop_schedule() {
        let timing = TimingConfig::normal();
        assert_eq!(timing.reel_start_at_ms(3), 300.0);
        assert_eq!(timing.reel_stop_at_ms(0), 2000.0);
        assert_eq!(timing.reel_stop_at_ms(4), 4000.0);
        assert_eq!(timing.total_spin_duration(5), 4000.0 + 2500.0 + 500.0);
    }

    #[test]
    fn test_scaled() {
        let half = TimingConfig::normal().scaled(0.5);
        assert_eq!(half.profile, TimingProfile::Custom);
        assert_eq!(half.reel_spin_duration_ms, 1000.0);
        assert_eq!(half.spin_speed_px_per_ms, 2.4);
        assert!(half.validate(5).is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_timing() {
        let mut timing = TimingConfig::normal();
        timing.reel_stop_interval_ms = 0.0;
        assert!(timing.validate(5).is_err());

        let mut timing = TimingConfig::normal();
        timing.settle_delay_ms = f64::NAN;
        assert!(timing.validate(5).is_err());

        let mut timing = TimingConfig::normal();
        timing.reel_start_stagger_ms = 5000.0;
        timing.reel_stop_interval_ms = 10.0;
        assert!(matches!(timing.validate(5), Err(SlotError::InvalidTiming(_))));
    }
}
