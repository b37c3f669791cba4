//! The node presenter: pure mapping from [`NodeData`] to a [`VisualDescriptor`].
//!
//! [`present`] is invoked on every state change of the underlying agent, so it
//! stays a plain synchronous function of its inputs: no caching, no partial
//! updates, no way to fail. Malformed or missing input degrades to default
//! visuals (idle style, 0% progress, suppressed panels) instead of erroring.

use super::theme::{AgentIdentity, StatusStyle};
use super::types::{Metrics, MetricValue, NodeData, Status};

/// How many metric entries are considered for display. The window is applied
/// to *raw* entries before undefined values are dropped, so an undefined value
/// inside the window shrinks the visible row count rather than promoting a
/// later entry. Matches the observed behavior of the upstream UI.
pub const METRIC_SLOTS: usize = 2;

/// Fill width floor (percent) so a just-started task is never invisible.
/// Applies to the bar only, never to the percent label.
pub const MIN_FILL_WIDTH: f64 = 10.0;

/// Status glyph shown in the card header. Exactly one per render.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusGlyph {
	/// Animated spinner (running).
	Spinner,
	/// Check mark (completed).
	Check,
	/// Cross (error).
	Cross,
	/// Clock (idle, or anything unrecognized).
	Clock,
}

/// Progress affordance, present only while running.
#[derive(Clone, Debug, PartialEq)]
pub struct ProgressSpec {
	/// Section title, always the literal "Processing".
	pub title: &'static str,
	/// Rounded integer percentage, e.g. "37%". Missing progress reads as 0.
	pub percent_label: String,
	/// Bar fill width in percent: `max(progress, 10)`. The floor is a display
	/// affordance and never leaks into `percent_label`.
	pub fill_width: f64,
}

/// One formatted metric row.
#[derive(Clone, Debug, PartialEq)]
pub struct MetricRow {
	/// Humanized key, e.g. "tokens Used". Title-casing is left to the paint
	/// layer so the key string itself is never case-mutated.
	pub key: String,
	/// Formatted value: numbers with one decimal place, text verbatim.
	pub value: String,
}

/// Which side of the card an anchor sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnchorSide {
	Left,
	Right,
}

/// A fixed edge-attachment point, addressable by the enclosing canvas system.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Anchor {
	pub side: AnchorSide,
	/// Marker radius in pixels, independent of node state.
	pub radius: f64,
}

/// The two connection points every node exposes, regardless of status:
/// incoming edges terminate at `target`, outgoing edges leave from `source`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Anchors {
	pub target: Anchor,
	pub source: Anchor,
}

impl Anchors {
	pub const fn fixed() -> Self {
		Self {
			target: Anchor {
				side: AnchorSide::Left,
				radius: 4.0,
			},
			source: Anchor {
				side: AnchorSide::Right,
				radius: 4.0,
			},
		}
	}
}

/// Fully resolved visual state for one render. Recomputed from scratch on
/// every input change and compared structurally in tests.
#[derive(Clone, Debug, PartialEq)]
pub struct VisualDescriptor {
	/// Label carried verbatim; single-line ellipsis truncation happens at
	/// paint time.
	pub label: String,
	pub style: StatusStyle,
	pub identity: AgentIdentity,
	pub status_glyph: StatusGlyph,
	/// Present only while running.
	pub progress: Option<ProgressSpec>,
	/// At most [`METRIC_SLOTS`] rows.
	pub metric_rows: Vec<MetricRow>,
	/// Present only for error status with a defined `errorMessage` metric.
	/// Visually clamped to two lines at paint time, content unmodified.
	pub error_panel: Option<String>,
	/// Focus ring, set by selection. Additive over the status style.
	pub focus_ring: bool,
	/// Pulsing glow, set while running. Additive over the status style.
	pub glow: bool,
	pub anchors: Anchors,
}

/// Resolve the visual state for one agent node.
pub fn present(data: &NodeData, selected: bool) -> VisualDescriptor {
	let status = data.status;

	let status_glyph = match status {
		Status::Running => StatusGlyph::Spinner,
		Status::Completed => StatusGlyph::Check,
		Status::Error => StatusGlyph::Cross,
		Status::Idle => StatusGlyph::Clock,
	};

	let progress = (status == Status::Running).then(|| progress_spec(data.progress));

	let metric_rows = data
		.metrics
		.as_ref()
		.map(metric_rows)
		.unwrap_or_default();

	let error_panel = if status == Status::Error {
		data.metrics.as_ref().and_then(Metrics::error_message)
	} else {
		None
	};

	VisualDescriptor {
		label: data.label.clone(),
		style: status.style(),
		identity: data.agent_type.identity(),
		status_glyph,
		progress,
		metric_rows,
		error_panel,
		focus_ring: selected,
		glow: status == Status::Running,
		anchors: Anchors::fixed(),
	}
}

fn progress_spec(progress: Option<f64>) -> ProgressSpec {
	let progress = progress.unwrap_or(0.0);
	ProgressSpec {
		title: "Processing",
		percent_label: format!("{}%", progress.round() as i64),
		fill_width: progress.max(MIN_FILL_WIDTH),
	}
}

/// First [`METRIC_SLOTS`] raw entries in insertion order, then entries whose
/// value is undefined are dropped *within* that window.
fn metric_rows(metrics: &Metrics) -> Vec<MetricRow> {
	metrics
		.entries()
		.iter()
		.take(METRIC_SLOTS)
		.filter_map(|(key, value)| {
			value.as_ref().map(|value| MetricRow {
				key: humanize_key(key),
				value: format_value(value),
			})
		})
		.collect()
}

/// Turn a machine-style identifier into a readable key: a space at each
/// camel-case boundary, literal underscores stripped, result trimmed. Casing
/// is untouched ("tokensUsed" becomes "tokens Used", not "Tokens Used").
pub fn humanize_key(key: &str) -> String {
	let mut out = String::with_capacity(key.len() + 4);
	for ch in key.chars() {
		if ch == '_' {
			continue;
		}
		if ch.is_uppercase() && !out.is_empty() {
			out.push(' ');
		}
		out.push(ch);
	}
	out.trim().to_string()
}

fn format_value(value: &MetricValue) -> String {
	match value {
		MetricValue::Number(n) => format!("{:.1}", n),
		MetricValue::Text(s) => s.clone(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::agent_node::types::AgentType;

	fn node(status: Status) -> NodeData {
		NodeData {
			label: "Research critic".to_string(),
			agent_type: AgentType::WebSearchCritic,
			status,
			progress: None,
			metrics: None,
		}
	}

	#[test]
	fn status_glyphs_are_mutually_exclusive() {
		assert_eq!(
			present(&node(Status::Running), false).status_glyph,
			StatusGlyph::Spinner
		);
		assert_eq!(
			present(&node(Status::Completed), false).status_glyph,
			StatusGlyph::Check
		);
		assert_eq!(
			present(&node(Status::Error), false).status_glyph,
			StatusGlyph::Cross
		);
		assert_eq!(
			present(&node(Status::Idle), false).status_glyph,
			StatusGlyph::Clock
		);
	}

	#[test]
	fn progress_label_and_width_agree_above_the_floor() {
		let mut data = node(Status::Running);
		data.progress = Some(37.0);
		let spec = present(&data, false).progress.unwrap();
		assert_eq!(spec.title, "Processing");
		assert_eq!(spec.percent_label, "37%");
		assert_eq!(spec.fill_width, 37.0);
	}

	#[test]
	fn fill_width_floor_never_touches_the_label() {
		let mut data = node(Status::Running);
		data.progress = Some(3.0);
		let spec = present(&data, false).progress.unwrap();
		assert_eq!(spec.percent_label, "3%");
		assert_eq!(spec.fill_width, 10.0);
	}

	#[test]
	fn missing_progress_reads_as_zero_percent() {
		let spec = present(&node(Status::Running), false).progress.unwrap();
		assert_eq!(spec.percent_label, "0%");
		assert_eq!(spec.fill_width, 10.0);
	}

	#[test]
	fn progress_is_rendered_only_while_running() {
		let mut data = node(Status::Completed);
		data.progress = Some(80.0);
		assert_eq!(present(&data, false).progress, None);
		assert_eq!(present(&node(Status::Idle), false).progress, None);
	}

	#[test]
	fn undefined_value_in_the_window_shrinks_the_row_count() {
		let mut data = node(Status::Idle);
		data.metrics = Some(Metrics::from_iter([
			("a", Some(MetricValue::Number(1.0))),
			("b", None),
			("c", Some(MetricValue::Number(3.0))),
		]));
		let rows = present(&data, false).metric_rows;
		// Only the first two raw entries are considered; "c" is never reached.
		assert_eq!(rows.len(), 1);
		assert_eq!(rows[0].key, "a");
	}

	#[test]
	fn at_most_two_metric_rows_render() {
		let mut data = node(Status::Idle);
		data.metrics = Some(Metrics::from_iter([
			("first", Some(MetricValue::Number(1.0))),
			("second", Some(MetricValue::Number(2.0))),
			("third", Some(MetricValue::Number(3.0))),
		]));
		let rows = present(&data, false).metric_rows;
		assert_eq!(rows.len(), 2);
		assert_eq!(rows[0].key, "first");
		assert_eq!(rows[1].key, "second");
	}

	#[test]
	fn metric_key_and_value_formatting() {
		let mut data = node(Status::Idle);
		data.metrics = Some(Metrics::from_iter([(
			"tokensUsed",
			Some(MetricValue::Number(12.345)),
		)]));
		let rows = present(&data, false).metric_rows;
		assert_eq!(rows[0].key, "tokens Used");
		assert_eq!(rows[0].value, "12.3");
	}

	#[test]
	fn text_metric_values_render_verbatim() {
		let mut data = node(Status::Idle);
		data.metrics = Some(Metrics::from_iter([(
			"model",
			Some(MetricValue::Text("gpt-mini".to_string())),
		)]));
		assert_eq!(present(&data, false).metric_rows[0].value, "gpt-mini");
	}

	#[test]
	fn humanize_key_rules() {
		assert_eq!(humanize_key("tokensUsed"), "tokens Used");
		assert_eq!(humanize_key("avgScorePerRound"), "avg Score Per Round");
		assert_eq!(humanize_key("plain"), "plain");
		// Underscores are stripped, not replaced.
		assert_eq!(humanize_key("tokens_used"), "tokensused");
		// Leading uppercase gets no leading space.
		assert_eq!(humanize_key("TokensUsed"), "Tokens Used");
	}

	#[test]
	fn error_panel_requires_error_status_and_a_message() {
		let mut data = node(Status::Error);
		data.metrics = Some(Metrics::from_iter([(
			"errorMessage",
			Some(MetricValue::Text("timeout".to_string())),
		)]));
		assert_eq!(
			present(&data, false).error_panel.as_deref(),
			Some("timeout")
		);

		// Error status with no message: panel suppressed, error style kept.
		let bare = present(&node(Status::Error), false);
		assert_eq!(bare.error_panel, None);
		assert_eq!(bare.style, Status::Error.style());

		// Message present but status not error: panel suppressed.
		data.status = Status::Running;
		assert_eq!(present(&data, false).error_panel, None);
	}

	#[test]
	fn idle_node_is_minimal_but_keeps_anchors() {
		let descriptor = present(&node(Status::Idle), false);
		assert_eq!(descriptor.progress, None);
		assert!(!descriptor.glow);
		assert!(!descriptor.focus_ring);
		assert_eq!(descriptor.anchors, Anchors::fixed());
		assert_eq!(descriptor.anchors.target.side, AnchorSide::Left);
		assert_eq!(descriptor.anchors.source.side, AnchorSide::Right);
	}

	#[test]
	fn selection_and_running_emphasis_are_additive() {
		let selected = present(&node(Status::Idle), true);
		assert!(selected.focus_ring);
		assert!(!selected.glow);

		let running = present(&node(Status::Running), true);
		assert!(running.focus_ring);
		assert!(running.glow);
	}

	#[test]
	fn present_is_idempotent() {
		let mut data = node(Status::Running);
		data.progress = Some(58.2);
		data.metrics = Some(Metrics::from_iter([
			("tokensUsed", Some(MetricValue::Number(812.0))),
			("round", Some(MetricValue::Number(2.0))),
		]));
		assert_eq!(present(&data, true), present(&data, true));
	}

	#[test]
	fn label_is_carried_verbatim() {
		let mut data = node(Status::Idle);
		data.label = "a very long label that will only be truncated at paint time".to_string();
		assert_eq!(present(&data, false).label, data.label);
	}
}
