// extensions/timer.rs
//
// Phase timers and fades: the time-driven building blocks of stage
// animations and the card flip video.
//
// Usage:
//   let mut flip = PhaseTimer::new(1.0);
//   let progress = flip.advance(dt);          // 0.0 ..= 1.0, never decreases
//   let angle = flip.lerp(0.0, 180.0);
//
//   let mut title = Fade::new(0.0, 255.0);   // alpha units per second
//   title.raise(dt);

use super::easing::{Easing, ease};

/// Maximum alpha value, matching 8-bit channel opacity.
pub const ALPHA_MAX: f32 = 255.0;

/// Elapsed-time accumulator for one animation phase.
#[derive(Debug, Clone, Copy)]
pub struct PhaseTimer {
    duration: f32,
    elapsed: f32,
    progress: f32,
    easing: Easing,
}

impl PhaseTimer {
    /// Create a timer for a phase lasting `duration` seconds.
    ///
    /// # Panics
    /// If `duration` is negative or not finite.
    pub fn new(duration: f32) -> Self {
        assert!(
            duration.is_finite() && duration >= 0.0,
            "phase duration must be finite and non-negative, got {}",
            duration
        );
        Self {
            duration,
            elapsed: 0.0,
            progress: 0.0,
            easing: Easing::Linear,
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Advance by `dt` and return progress in [0, 1].
    /// Progress is clamped at 1.0 and never decreases.
    pub fn advance(&mut self, dt: f32) -> f32 {
        self.elapsed += dt.max(0.0);
        let raw = if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).min(1.0)
        };
        self.progress = self.progress.max(raw);
        self.progress
    }

    /// Add `dt` to the elapsed time without a duration contract.
    /// Returns total elapsed seconds. Used by open-ended phases that leave
    /// on a predicate rather than a fixed length.
    pub fn accumulate(&mut self, dt: f32) -> f32 {
        self.elapsed += dt.max(0.0);
        self.elapsed
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Eased interpolation at the current progress.
    pub fn lerp(&self, start: f32, end: f32) -> f32 {
        ease(start, end, self.progress, self.easing)
    }

    /// Zero elapsed time and derived progress.
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.progress = 0.0;
    }
}

/// Rate-driven alpha in [0, 255], clamped at both ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fade {
    alpha: f32,
    rate: f32,
}

impl Fade {
    /// `rate` is alpha units per second.
    pub fn new(initial: f32, rate: f32) -> Self {
        Self {
            alpha: initial.clamp(0.0, ALPHA_MAX),
            rate: rate.abs(),
        }
    }

    pub fn transparent(rate: f32) -> Self {
        Self::new(0.0, rate)
    }

    pub fn opaque(rate: f32) -> Self {
        Self::new(ALPHA_MAX, rate)
    }

    /// Fade in by `dt` seconds worth of rate.
    pub fn raise(&mut self, dt: f32) -> f32 {
        self.alpha = (self.alpha + self.rate * dt.max(0.0)).min(ALPHA_MAX);
        self.alpha
    }

    /// Fade out by `dt` seconds worth of rate.
    pub fn lower(&mut self, dt: f32) -> f32 {
        self.alpha = (self.alpha - self.rate * dt.max(0.0)).max(0.0);
        self.alpha
    }

    pub fn set(&mut self, alpha: f32) {
        self.alpha = alpha.clamp(0.0, ALPHA_MAX);
    }

    pub fn value(&self) -> f32 {
        self.alpha
    }

    /// Alpha normalized to [0, 1] for sprite and label components.
    pub fn unit(&self) -> f32 {
        self.alpha / ALPHA_MAX
    }

    pub fn is_opaque(&self) -> bool {
        self.alpha >= ALPHA_MAX
    }

    pub fn is_transparent(&self) -> bool {
        self.alpha <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_summing_to_duration_reach_one() {
        let mut timer = PhaseTimer::new(1.0);
        for _ in 0..4 {
            timer.advance(0.25);
        }
        assert_eq!(timer.progress(), 1.0);
        assert!(timer.is_finished());
    }

    #[test]
    fn progress_clamps_and_is_monotonic() {
        let mut timer = PhaseTimer::new(2.0);
        let mut prev = 0.0;
        for dt in [0.3, 0.0, 0.7, -0.5, 5.0, 0.1] {
            let p = timer.advance(dt);
            assert!(p >= prev);
            assert!(p <= 1.0);
            prev = p;
        }
        assert_eq!(prev, 1.0);
    }

    #[test]
    fn zero_duration_is_immediately_done() {
        let mut timer = PhaseTimer::new(0.0);
        assert_eq!(timer.advance(0.0), 1.0);
    }

    #[test]
    #[should_panic]
    fn negative_duration_fails_fast() {
        let _ = PhaseTimer::new(-1.0);
    }

    #[test]
    fn accumulate_ignores_duration() {
        let mut timer = PhaseTimer::new(0.5);
        timer.accumulate(3.0);
        assert!((timer.elapsed() - 3.0).abs() < 1e-6);
        timer.reset();
        assert_eq!(timer.elapsed(), 0.0);
        assert_eq!(timer.progress(), 0.0);
    }

    #[test]
    fn lerp_follows_progress() {
        let mut timer = PhaseTimer::new(1.0);
        timer.advance(0.5);
        assert!((timer.lerp(1.0, 0.5) - 0.75).abs() < 1e-4);
        assert!((timer.lerp(0.0, 180.0) - 90.0).abs() < 1e-3);
    }

    #[test]
    fn fade_clamps_at_both_ends() {
        let mut fade = Fade::transparent(510.0);
        fade.raise(0.25);
        assert!((fade.value() - 127.5).abs() < 0.01);
        fade.raise(10.0);
        assert_eq!(fade.value(), ALPHA_MAX);
        assert!(fade.is_opaque());
        fade.lower(100.0);
        assert_eq!(fade.value(), 0.0);
        assert!(fade.is_transparent());
    }

    #[test]
    fn fade_unit_is_normalized() {
        let fade = Fade::opaque(255.0);
        assert_eq!(fade.unit(), 1.0);
    }
}
