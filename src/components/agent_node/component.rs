//! Leptos component wrapping the agent node canvas.
//!
//! The component creates an HTML canvas element, recomputes the visual
//! descriptor whenever the node data or selection changes, and runs an
//! animation loop via `requestAnimationFrame` that advances the progress
//! transition and repaints each frame.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use super::animation::ProgressTransition;
use super::presenter::{present, VisualDescriptor};
use super::render;
use super::types::NodeData;

const DEFAULT_WIDTH: f64 = 230.0;
const DEFAULT_HEIGHT: f64 = 130.0;

/// Margin around the card so the glow halo and focus ring stay on-canvas.
const CANVAS_MARGIN: f64 = 24.0;

/// Bundles the resolved descriptor with the animated values that accompany it.
struct NodeContext {
	descriptor: VisualDescriptor,
	transition: ProgressTransition,
	clock: f64,
	last_frame_ms: f64,
	width: f64,
	height: f64,
}

impl NodeContext {
	fn apply(&mut self, data: &NodeData, selected: bool) {
		self.descriptor = present(data, selected);
		let target = self
			.descriptor
			.progress
			.as_ref()
			.map_or(0.0, |p| p.fill_width);
		self.transition.retarget(target);
	}
}

/// Renders a single workflow agent node on a canvas element.
///
/// Pass the node record via the reactive `data` signal; the enclosing graph
/// canvas supplies `selected` and is responsible for positioning this node and
/// routing edges between the anchor markers of different node instances.
#[component]
pub fn AgentNodeCanvas(
	#[prop(into)] data: Signal<NodeData>,
	/// Selection flag supplied by the enclosing canvas system. Unselected
	/// when omitted.
	#[prop(optional)]
	selected: Option<Signal<bool>>,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<NodeContext>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (context_init, animate_init) = (context.clone(), animate.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let window: Window = web_sys::window().unwrap();

		let card_w = width.unwrap_or(DEFAULT_WIDTH);
		let card_h = height.unwrap_or(DEFAULT_HEIGHT);
		let (w, h) = (card_w + CANVAS_MARGIN * 2.0, card_h + CANVAS_MARGIN * 2.0);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();

		// Untracked read: data changes are handled by the update effect below,
		// re-running the mount effect would tear down the animation loop.
		let mut node_context = NodeContext {
			descriptor: present(
				&data.get_untracked(),
				selected.is_some_and(|s| s.get_untracked()),
			),
			transition: ProgressTransition::new(),
			clock: 0.0,
			last_frame_ms: js_sys::Date::now(),
			width: card_w,
			height: card_h,
		};
		let initial = node_context
			.descriptor
			.progress
			.as_ref()
			.map_or(0.0, |p| p.fill_width);
		node_context.transition.retarget(initial);
		*context_init.borrow_mut() = Some(node_context);

		let (context_anim, animate_inner) = (context_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				let now = js_sys::Date::now();
				let dt = ((now - c.last_frame_ms) / 1000.0).clamp(0.0, 0.1);
				c.last_frame_ms = now;
				c.clock += dt;
				c.transition.tick(dt);

				ctx.clear_rect(
					0.0,
					0.0,
					c.width + CANVAS_MARGIN * 2.0,
					c.height + CANVAS_MARGIN * 2.0,
				);
				render::render(
					&c.descriptor,
					&ctx,
					CANVAS_MARGIN,
					CANVAS_MARGIN,
					c.width,
					c.height,
					c.transition.width(),
					c.clock,
				);
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				let _ = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	// Reactive update path: a new NodeData or selection flips the descriptor
	// and retargets the progress transition; the animation loop picks both up
	// on its next frame.
	let context_update = context.clone();
	Effect::new(move |_| {
		let current = data.get();
		let is_selected = selected.is_some_and(|s| s.get());
		if let Some(ref mut c) = *context_update.borrow_mut() {
			c.apply(&current, is_selected);
		}
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="agent-node-canvas"
			style="display: block;"
		/>
	}
}
