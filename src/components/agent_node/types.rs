//! Input data structures for the agent node component.
//!
//! A `NodeData` record is produced by the upstream workflow orchestrator and
//! pushed into the component on every agent state change. Nothing here is
//! mutated by this crate.

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;

/// Kind of agent a node represents. Closed set: adding a new agent kind means
/// adding an enumerant plus its icon/gradient entry in the theme tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AgentType {
	/// Produces content (drafts, code, answers).
	Generator,
	/// Critiques output against live web-search evidence.
	WebSearchCritic,
	/// Critiques output against quality rubrics.
	QualityCritic,
	/// Coordinates the other agents in the workflow.
	Coordinator,
}

impl AgentType {
	/// All enumerants, for table-coverage checks and demo pages.
	pub const ALL: [AgentType; 4] = [
		AgentType::Generator,
		AgentType::WebSearchCritic,
		AgentType::QualityCritic,
		AgentType::Coordinator,
	];
}

/// Agent lifecycle status. Exactly one value at a time; drives nearly every
/// visual decision.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Status {
	#[default]
	Idle,
	Running,
	Completed,
	Error,
}

impl Status {
	/// Parse a wire token. Unrecognized tokens collapse to [`Status::Idle`]:
	/// an unknown status from a newer orchestrator must degrade to the neutral
	/// visual treatment, never fail the render.
	pub fn parse(token: &str) -> Self {
		match token {
			"running" => Status::Running,
			"completed" => Status::Completed,
			"error" => Status::Error,
			_ => Status::Idle,
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Status::Idle => "idle",
			Status::Running => "running",
			Status::Completed => "completed",
			Status::Error => "error",
		}
	}
}

impl<'de> Deserialize<'de> for Status {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let token = String::deserialize(deserializer)?;
		Ok(Status::parse(&token))
	}
}

/// A single metric value. The orchestrator decides which keys exist per agent
/// type; values are either numeric or free text.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
	Number(f64),
	Text(String),
}

impl MetricValue {
	/// Plain string form, used where a metric is shown outside a formatted row
	/// (e.g. the reserved error message).
	pub fn display(&self) -> String {
		match self {
			MetricValue::Number(n) => n.to_string(),
			MetricValue::Text(s) => s.clone(),
		}
	}
}

/// Reserved metric key carrying a human-readable failure description.
pub const ERROR_MESSAGE_KEY: &str = "errorMessage";

/// Open, *ordered* metric mapping. Insertion order is the display order, so
/// the backing store is a vector of pairs rather than a hash map; a `null`
/// value on the wire is kept as an explicit `None` entry because it still
/// occupies a display slot (see the presenter's two-slot rule).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Metrics {
	entries: Vec<(String, Option<MetricValue>)>,
}

impl Metrics {
	pub fn new() -> Self {
		Self::default()
	}

	/// Append an entry, preserving insertion order.
	pub fn push(&mut self, key: impl Into<String>, value: Option<MetricValue>) {
		self.entries.push((key.into(), value));
	}

	pub fn entries(&self) -> &[(String, Option<MetricValue>)] {
		&self.entries
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Value of the reserved [`ERROR_MESSAGE_KEY`] entry, if present and defined.
	pub fn error_message(&self) -> Option<String> {
		self.entries
			.iter()
			.find(|(key, _)| key == ERROR_MESSAGE_KEY)
			.and_then(|(_, value)| value.as_ref())
			.map(MetricValue::display)
	}
}

impl<K: Into<String>> FromIterator<(K, Option<MetricValue>)> for Metrics {
	fn from_iter<I: IntoIterator<Item = (K, Option<MetricValue>)>>(iter: I) -> Self {
		Self {
			entries: iter
				.into_iter()
				.map(|(key, value)| (key.into(), value))
				.collect(),
		}
	}
}

impl<'de> Deserialize<'de> for Metrics {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		struct MetricsVisitor;

		impl<'de> Visitor<'de> for MetricsVisitor {
			type Value = Metrics;

			fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
				f.write_str("a map of metric names to numbers, strings, or null")
			}

			// Visits entries in document order, which is what keeps the
			// "first two entries" display rule well-defined.
			fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Metrics, A::Error> {
				let mut metrics = Metrics::new();
				while let Some((key, value)) = map.next_entry::<String, Option<MetricValue>>()? {
					metrics.push(key, value);
				}
				Ok(metrics)
			}
		}

		deserializer.deserialize_map(MetricsVisitor)
	}
}

/// Everything the component needs to render one agent node.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeData {
	/// Display label, rendered verbatim (truncation is paint-time only).
	pub label: String,
	pub agent_type: AgentType,
	pub status: Status,
	/// Percentage 0-100. Only meaningful while running; absent reads as 0.
	#[serde(default)]
	pub progress: Option<f64>,
	#[serde(default)]
	pub metrics: Option<Metrics>,
}

impl Default for NodeData {
	fn default() -> Self {
		Self {
			label: "agent".to_string(),
			agent_type: AgentType::Generator,
			status: Status::Idle,
			progress: None,
			metrics: None,
		}
	}
}
