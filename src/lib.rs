//! agent-flow-node: workflow agent node visualization.
//!
//! This crate provides a WASM-based canvas component that renders a single
//! node of an agent workflow graph: status-colored card, agent-type gradient
//! and icon, animated progress bar, metric rows, error panel, and the two
//! anchor points an external graph-layout system attaches edges to.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::agent_node::{
	present, AgentNodeCanvas, AgentType, Metrics, MetricValue, NodeData, Status,
	VisualDescriptor,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("agent-flow-node: logging initialized");
}

/// Load node data from a script element with id="agent-node-data".
/// Expected format: JSON NodeData as emitted by the workflow orchestrator.
fn load_node_data() -> Option<NodeData> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("agent-node-data")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<NodeData>(&json_text) {
		Ok(data) => {
			info!(
				"agent-flow-node: loaded node '{}' with status {}",
				data.label,
				data.status.as_str()
			);
			Some(data)
		}
		Err(e) => {
			warn!("agent-flow-node: failed to parse node data: {}", e);
			None
		}
	}
}

/// Main application component.
/// Loads node data from the DOM and renders a single agent node.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let node_data = load_node_data().unwrap_or_default();
	let node_signal = Signal::derive(move || node_data.clone());

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Agent Workflow Node" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="agent-node-page">
			<AgentNodeCanvas data=node_signal />
		</div>
	}
}
