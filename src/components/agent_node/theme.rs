//! Visual theming for agent nodes.
//!
//! Two exhaustive lookup tables live here: status → style bundle and agent
//! type → identity (icon + gradient). Both are plain `match` expressions over
//! closed enums, so "every status has a style" and "every agent type has an
//! identity" hold at compile time.

use super::types::{AgentType, Status};

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	/// Darken the color by a factor (0.0 = unchanged, 1.0 = black)
	pub fn darken(self, factor: f64) -> Self {
		let f = 1.0 - factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * f) as u8,
			g: (self.g as f64 * f) as u8,
			b: (self.b as f64 * f) as u8,
			a: self.a,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Style bundle applied to the node card for one status.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StatusStyle {
	pub border: Color,
	pub background: Color,
	pub text: Color,
	pub icon: Color,
}

/// Two-stop linear gradient used for the agent-type header strip.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gradient {
	pub from: Color,
	pub to: Color,
}

impl Gradient {
	pub const fn new(from: Color, to: Color) -> Self {
		Self { from, to }
	}

	/// CSS form, used where the gradient is compared or exported rather than
	/// painted (canvas painting builds a `CanvasGradient` from the stops).
	pub fn to_css(self) -> String {
		format!(
			"linear-gradient(90deg, {}, {})",
			self.from.to_css(),
			self.to.to_css()
		)
	}
}

/// Per-agent-type visual identity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AgentIdentity {
	/// Header icon glyph.
	pub icon: &'static str,
	pub gradient: Gradient,
}

impl Status {
	/// Style bundle for this status. Total over the enum; the parse-time idle
	/// fallback in [`Status::parse`] means unknown wire values land on the
	/// `Idle` arm rather than anywhere surprising.
	pub fn style(self) -> StatusStyle {
		match self {
			Status::Idle => StatusStyle {
				border: Color::rgb(100, 110, 125),
				background: Color::rgb(35, 39, 47),
				text: Color::rgb(170, 178, 190),
				icon: Color::rgb(130, 140, 155),
			},
			Status::Running => StatusStyle {
				border: Color::rgb(86, 148, 222),
				background: Color::rgb(28, 38, 54),
				text: Color::rgb(186, 208, 235),
				icon: Color::rgb(110, 168, 240),
			},
			Status::Completed => StatusStyle {
				border: Color::rgb(90, 180, 130),
				background: Color::rgb(26, 42, 34),
				text: Color::rgb(175, 215, 190),
				icon: Color::rgb(110, 200, 150),
			},
			Status::Error => StatusStyle {
				border: Color::rgb(210, 100, 95),
				background: Color::rgb(48, 30, 30),
				text: Color::rgb(230, 180, 175),
				icon: Color::rgb(230, 120, 110),
			},
		}
	}
}

impl AgentType {
	/// Icon and gradient for this agent type. Total over the enum; there is
	/// deliberately no fallback arm.
	pub fn identity(self) -> AgentIdentity {
		match self {
			AgentType::Generator => AgentIdentity {
				icon: "✎",
				gradient: Gradient::new(Color::rgb(130, 100, 200), Color::rgb(190, 110, 180)),
			},
			AgentType::WebSearchCritic => AgentIdentity {
				icon: "🌐",
				gradient: Gradient::new(Color::rgb(70, 130, 200), Color::rgb(80, 180, 210)),
			},
			AgentType::QualityCritic => AgentIdentity {
				icon: "🛡",
				gradient: Gradient::new(Color::rgb(200, 150, 70), Color::rgb(210, 110, 70)),
			},
			AgentType::Coordinator => AgentIdentity {
				icon: "⚙",
				gradient: Gradient::new(Color::rgb(70, 170, 140), Color::rgb(80, 150, 190)),
			},
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const ALL_STATUSES: [Status; 4] = [
		Status::Idle,
		Status::Running,
		Status::Completed,
		Status::Error,
	];

	#[test]
	fn every_status_has_a_complete_style_bundle() {
		for status in ALL_STATUSES {
			let style = status.style();
			assert!(!style.border.to_css().is_empty());
			assert!(!style.background.to_css().is_empty());
			assert!(!style.text.to_css().is_empty());
			assert!(!style.icon.to_css().is_empty());
		}
	}

	#[test]
	fn status_styles_are_distinct() {
		for (i, a) in ALL_STATUSES.iter().enumerate() {
			for b in &ALL_STATUSES[i + 1..] {
				assert_ne!(a.style(), b.style(), "{:?} vs {:?}", a, b);
			}
		}
	}

	#[test]
	fn unknown_status_token_lands_on_the_idle_bundle() {
		let style = Status::parse("definitely-not-a-status").style();
		assert_eq!(style, Status::Idle.style());
	}

	#[test]
	fn every_agent_type_has_icon_and_distinct_gradient() {
		for (i, a) in AgentType::ALL.iter().enumerate() {
			let identity = a.identity();
			assert!(!identity.icon.is_empty());
			for b in &AgentType::ALL[i + 1..] {
				assert_ne!(
					identity.gradient.to_css(),
					b.identity().gradient.to_css(),
					"{:?} vs {:?}",
					a,
					b
				);
			}
		}
	}

	#[test]
	fn color_css_forms() {
		assert_eq!(Color::rgb(255, 0, 128).to_css(), "#ff0080");
		assert_eq!(Color::rgba(10, 20, 30, 0.5).to_css(), "rgba(10, 20, 30, 0.5)");
	}

	#[test]
	fn lighten_and_darken_move_toward_extremes() {
		let base = Color::rgb(100, 100, 100);
		assert_eq!(base.lighten(1.0), Color::rgb(255, 255, 255));
		assert_eq!(base.darken(1.0), Color::rgb(0, 0, 0));
		assert_eq!(base.lighten(0.0), base);
	}
}
