use crate::config::HeadBobConfig;

/// Nudge so a timer sitting exactly on a step boundary targets the next one.
///
/// The timer is kept in `f64` so this stays above its resolution for any
/// realistic session length.
const BOUNDARY_EPSILON: f64 = 1e-6;

/// One-shot head-bob timer.
///
/// Movement arms it; [`HeadBob::advance`] then runs the timer up to the next
/// step boundary and disarms. Movement every frame keeps re-arming it, which
/// reads as continuous bobbing.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HeadBob {
    timer: f64,
    active: bool,
}

impl HeadBob {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn timer(&self) -> f64 {
        self.timer
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn trigger(&mut self) {
        if !self.active {
            tracing::trace!(timer = self.timer, "head bob armed");
        }
        self.active = true;
    }

    /// Advance toward the next step boundary without overshooting it.
    pub fn advance(&mut self, dt: f32, config: &HeadBobConfig) {
        if !self.active {
            return;
        }

        let step = f64::from(config.step());
        let next_step = 1.0 + ((self.timer + BOUNDARY_EPSILON) / step).floor();
        let next_step_time = next_step * step;
        self.timer = (self.timer + f64::from(dt)).min(next_step_time);

        if self.timer == next_step_time {
            self.active = false;
            tracing::trace!(timer = self.timer, "head bob step finished");
        }
    }

    /// Vertical offset for the written pose.
    pub fn offset(&self, config: &HeadBobConfig) -> f32 {
        ((self.timer * f64::from(config.frequency)).sin() * f64::from(config.amplitude)) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inactive_does_not_advance() {
        let mut bob = HeadBob::new();
        bob.advance(1.0, &HeadBobConfig::default());
        assert_eq!(bob.timer(), 0.0);
    }

    #[test]
    fn advance_clamps_to_boundary_and_disarms() {
        let config = HeadBobConfig::default();
        let mut bob = HeadBob::new();
        bob.trigger();
        bob.advance(0.5, &config);
        assert_eq!(bob.timer(), f64::from(config.step()));
        assert!(!bob.is_active());
    }

    #[test]
    fn small_steps_stay_active_until_boundary() {
        let config = HeadBobConfig::default();
        let mut bob = HeadBob::new();
        bob.trigger();
        bob.advance(0.1, &config);
        assert!(bob.is_active());
        assert!((bob.timer() - 0.1).abs() < 1e-6);
        bob.advance(0.1, &config);
        assert!(bob.is_active());
        bob.advance(0.2, &config);
        assert!(!bob.is_active());
        assert_eq!(bob.timer(), f64::from(config.step()));
    }

    #[test]
    fn retrigger_at_boundary_targets_next_step() {
        let config = HeadBobConfig::default();
        let mut bob = HeadBob::new();
        bob.trigger();
        bob.advance(1.0, &config);
        assert!(!bob.is_active());

        bob.trigger();
        bob.advance(1.0, &config);
        assert!((bob.timer() - 2.0 * f64::from(config.step())).abs() < 1e-6);
    }

    #[test]
    fn zero_dt_leaves_timer_unchanged() {
        let config = HeadBobConfig::default();
        let mut bob = HeadBob::new();
        bob.trigger();
        bob.advance(0.05, &config);
        bob.advance(0.0, &config);
        assert!((bob.timer() - 0.05).abs() < 1e-7);
        assert!(bob.is_active());
    }

    #[test]
    fn offset_is_zero_at_rest_and_at_boundaries() {
        let config = HeadBobConfig::default();
        let mut bob = HeadBob::new();
        assert_eq!(bob.offset(&config), 0.0);
        bob.trigger();
        bob.advance(0.05, &config);
        assert!((bob.offset(&config) - (0.5f32).sin() * 0.25).abs() < 1e-6);
        bob.advance(1.0, &config);
        assert!(bob.offset(&config).abs() < 1e-5);
    }

    #[test]
    fn sustained_retrigger_keeps_advancing_for_minutes() {
        let config = HeadBobConfig::default();
        let mut bob = HeadBob::new();
        let dt = 1.0 / 60.0;
        // ten minutes of frames, well past the range where f32 stalls
        for frame in 0..36_000 {
            let before = bob.timer();
            bob.trigger();
            bob.advance(dt, &config);
            assert!(bob.timer() > before, "timer stalled at frame {frame} ({before})");
        }
        assert!(bob.timer() > 500.0);
    }
}
