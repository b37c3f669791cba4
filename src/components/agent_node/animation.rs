//! Transition state for the progress bar and running glow.
//!
//! The presenter emits only *target* values; this module animates the
//! displayed values toward them. Uses exponential smoothing for natural
//! ease-out behavior that slows as it approaches the target.

/// Smoothing speed - higher = faster response.
/// At 60fps with speed=15: reaches ~63% in ~4 frames, ~95% in ~12 frames (~200ms)
const FILL_SPEED: f64 = 15.0;

/// Displayed width is considered settled within this distance of the target.
const SETTLE_EPSILON: f64 = 0.05;

/// Animates the progress bar fill width toward a target percentage.
///
/// Every target change restarts the animation from zero width: when values
/// jump, a fresh fill sweep gives clearer feedback than continuity from the
/// old width.
#[derive(Clone, Debug, Default)]
pub struct ProgressTransition {
	target: f64,
	current: f64,
}

impl ProgressTransition {
	pub fn new() -> Self {
		Self::default()
	}

	/// Set a new target fill width (percent). A changed target resets the
	/// displayed width to 0 so the fill animates in from the left.
	pub fn retarget(&mut self, target: f64) {
		if (target - self.target).abs() > f64::EPSILON {
			self.target = target;
			self.current = 0.0;
		}
	}

	/// Advance the displayed width by `dt` seconds.
	///
	/// Exponential smoothing: value += (target - value) * (1 - e^(-speed * dt))
	pub fn tick(&mut self, dt: f64) {
		let factor = 1.0 - (-FILL_SPEED * dt).exp();
		self.current += (self.target - self.current) * factor;
		if (self.target - self.current).abs() < SETTLE_EPSILON {
			self.current = self.target;
		}
	}

	/// Currently displayed fill width (percent).
	pub fn width(&self) -> f64 {
		self.current
	}

	pub fn target(&self) -> f64 {
		self.target
	}
}

/// Pulse phase in [0, 1] for the running-glow treatment.
pub fn pulse_phase(time: f64) -> f64 {
	const PULSE_SPEED: f64 = 3.0;
	0.5 + 0.5 * (time * PULSE_SPEED).sin()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn retarget_restarts_the_fill_from_zero() {
		let mut transition = ProgressTransition::new();
		transition.retarget(40.0);
		for _ in 0..120 {
			transition.tick(1.0 / 60.0);
		}
		assert_eq!(transition.width(), 40.0);

		// A value jump begins a fresh sweep rather than easing from 40.
		transition.retarget(60.0);
		assert_eq!(transition.width(), 0.0);
		assert_eq!(transition.target(), 60.0);
	}

	#[test]
	fn retarget_with_same_value_keeps_the_current_width() {
		let mut transition = ProgressTransition::new();
		transition.retarget(40.0);
		transition.tick(0.1);
		let mid = transition.width();
		assert!(mid > 0.0);

		transition.retarget(40.0);
		assert_eq!(transition.width(), mid);
	}

	#[test]
	fn tick_approaches_target_monotonically() {
		let mut transition = ProgressTransition::new();
		transition.retarget(80.0);
		let mut previous = 0.0;
		for _ in 0..30 {
			transition.tick(1.0 / 60.0);
			assert!(transition.width() >= previous);
			assert!(transition.width() <= 80.0);
			previous = transition.width();
		}
		assert!(previous > 0.0);
	}

	#[test]
	fn fill_settles_on_the_target() {
		let mut transition = ProgressTransition::new();
		transition.retarget(10.0);
		for _ in 0..300 {
			transition.tick(1.0 / 60.0);
		}
		assert_eq!(transition.width(), 10.0);
	}

	#[test]
	fn pulse_phase_stays_in_unit_range() {
		let mut t = 0.0;
		while t < 10.0 {
			let phase = pulse_phase(t);
			assert!((0.0..=1.0).contains(&phase), "phase {} at t={}", phase, t);
			t += 0.05;
		}
	}
}
