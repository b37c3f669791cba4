//! Canvas rendering for one agent node card.
//!
//! Consumes a [`VisualDescriptor`] plus the animated values (fill width, clock)
//! and paints in passes for correct z-ordering:
//! 1. Running glow halo (behind the card)
//! 2. Card body, border, and selection focus ring
//! 3. Header strip (agent gradient, icon, label, status glyph)
//! 4. Body sections (progress bar, metric rows, error panel)
//! 5. Anchor markers on top

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::animation::pulse_phase;
use super::presenter::{AnchorSide, StatusGlyph, VisualDescriptor};
use super::theme::{Color, Gradient};

const CORNER_RADIUS: f64 = 8.0;
const HEADER_HEIGHT: f64 = 30.0;
const PADDING: f64 = 10.0;
const ROW_HEIGHT: f64 = 16.0;
const BAR_HEIGHT: f64 = 6.0;

/// Paints the complete node card into the rectangle `(x, y, w, h)`.
///
/// `fill_width` is the *animated* progress fill in percent (the descriptor
/// carries the target); `time` drives the spinner rotation and glow pulse.
pub fn render(
	descriptor: &VisualDescriptor,
	ctx: &CanvasRenderingContext2d,
	x: f64,
	y: f64,
	w: f64,
	h: f64,
	fill_width: f64,
	time: f64,
) {
	if descriptor.glow {
		draw_glow(descriptor, ctx, x, y, w, h, time);
	}

	draw_card(descriptor, ctx, x, y, w, h);

	if descriptor.focus_ring {
		draw_focus_ring(ctx, x, y, w, h);
	}

	draw_header(descriptor, ctx, x, y, w, time);

	let mut cursor = y + HEADER_HEIGHT + PADDING;
	if let Some(progress) = &descriptor.progress {
		cursor = draw_progress(
			ctx,
			&descriptor.style.text,
			&descriptor.style.border,
			progress,
			fill_width,
			x,
			cursor,
			w,
		);
	}

	for row in &descriptor.metric_rows {
		draw_metric_row(ctx, &descriptor.style.text, row, x, cursor, w);
		cursor += ROW_HEIGHT;
	}

	if let Some(message) = &descriptor.error_panel {
		draw_error_panel(descriptor, ctx, message, x, cursor, w);
	}

	draw_anchors(descriptor, ctx, x, y, w, h);
}

fn draw_glow(
	descriptor: &VisualDescriptor,
	ctx: &CanvasRenderingContext2d,
	x: f64,
	y: f64,
	w: f64,
	h: f64,
	time: f64,
) {
	let pulse = pulse_phase(time);
	let (cx, cy) = (x + w / 2.0, y + h / 2.0);
	let inner = w.min(h) / 2.0;
	let outer = inner + 18.0 + 10.0 * pulse;
	let glow = descriptor.style.border;

	let Ok(gradient) = ctx.create_radial_gradient(cx, cy, inner, cx, cy, outer) else {
		return;
	};
	let alpha = 0.25 + 0.2 * pulse;
	let _ = gradient.add_color_stop(0.0, &glow.with_alpha(alpha).to_css());
	let _ = gradient.add_color_stop(1.0, "rgba(0, 0, 0, 0)");

	ctx.begin_path();
	let _ = ctx.arc(cx, cy, outer, 0.0, 2.0 * PI);
	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	ctx.fill();
}

fn draw_card(
	descriptor: &VisualDescriptor,
	ctx: &CanvasRenderingContext2d,
	x: f64,
	y: f64,
	w: f64,
	h: f64,
) {
	rounded_rect_path(ctx, x, y, w, h, CORNER_RADIUS);
	ctx.set_fill_style_str(&descriptor.style.background.to_css());
	ctx.fill();

	rounded_rect_path(ctx, x, y, w, h, CORNER_RADIUS);
	ctx.set_stroke_style_str(&descriptor.style.border.to_css());
	ctx.set_line_width(2.0);
	ctx.stroke();
}

/// Double-stroked ring just outside the card, same treatment the rest of the
/// canvas uses for focused elements.
fn draw_focus_ring(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64) {
	rounded_rect_path(ctx, x - 3.0, y - 3.0, w + 6.0, h + 6.0, CORNER_RADIUS + 3.0);
	ctx.set_stroke_style_str("rgba(255, 255, 255, 0.8)");
	ctx.set_line_width(1.5);
	ctx.stroke();

	rounded_rect_path(ctx, x - 6.0, y - 6.0, w + 12.0, h + 12.0, CORNER_RADIUS + 6.0);
	ctx.set_stroke_style_str("rgba(255, 255, 255, 0.3)");
	ctx.set_line_width(0.75);
	ctx.stroke();
}

fn draw_header(
	descriptor: &VisualDescriptor,
	ctx: &CanvasRenderingContext2d,
	x: f64,
	y: f64,
	w: f64,
	time: f64,
) {
	fill_gradient_strip(ctx, &descriptor.identity.gradient, x, y, w, HEADER_HEIGHT);

	ctx.set_text_baseline("middle");
	let mid = y + HEADER_HEIGHT / 2.0;

	ctx.set_font("14px sans-serif");
	ctx.set_fill_style_str("rgba(255, 255, 255, 0.95)");
	ctx.set_text_align("left");
	let _ = ctx.fill_text(descriptor.identity.icon, x + PADDING, mid);

	// Label in the space between icon and status glyph, single line with ellipsis.
	ctx.set_font("12px sans-serif");
	let label_x = x + PADDING + 20.0;
	let label_max = w - PADDING * 2.0 - 20.0 - 18.0;
	let label = truncate_to_width(ctx, &descriptor.label, label_max);
	let _ = ctx.fill_text(&label, label_x, mid);

	let glyph_x = x + w - PADDING - 6.0;
	match descriptor.status_glyph {
		StatusGlyph::Spinner => draw_spinner(ctx, &descriptor.style.icon, glyph_x, mid, time),
		StatusGlyph::Check => draw_glyph(ctx, &descriptor.style.icon, "✓", glyph_x, mid),
		StatusGlyph::Cross => draw_glyph(ctx, &descriptor.style.icon, "✕", glyph_x, mid),
		StatusGlyph::Clock => draw_glyph(ctx, &descriptor.style.icon, "🕒", glyph_x, mid),
	}
	ctx.set_text_align("left");
}

/// Header strip with the agent-type gradient, rounded on top to follow the card.
fn fill_gradient_strip(
	ctx: &CanvasRenderingContext2d,
	gradient: &Gradient,
	x: f64,
	y: f64,
	w: f64,
	h: f64,
) {
	let canvas_gradient = ctx.create_linear_gradient(x, y, x + w, y);
	let _ = canvas_gradient.add_color_stop(0.0, &gradient.from.to_css());
	let _ = canvas_gradient.add_color_stop(1.0, &gradient.to.to_css());

	ctx.begin_path();
	ctx.move_to(x + CORNER_RADIUS, y);
	ctx.line_to(x + w - CORNER_RADIUS, y);
	ctx.quadratic_curve_to(x + w, y, x + w, y + CORNER_RADIUS);
	ctx.line_to(x + w, y + h);
	ctx.line_to(x, y + h);
	ctx.line_to(x, y + CORNER_RADIUS);
	ctx.quadratic_curve_to(x, y, x + CORNER_RADIUS, y);
	ctx.close_path();
	#[allow(deprecated)]
	ctx.set_fill_style(&canvas_gradient);
	ctx.fill();
}

fn draw_glyph(ctx: &CanvasRenderingContext2d, color: &Color, glyph: &str, x: f64, y: f64) {
	ctx.set_font("12px sans-serif");
	ctx.set_fill_style_str(&color.to_css());
	ctx.set_text_align("center");
	let _ = ctx.fill_text(glyph, x, y);
}

/// Rotating open arc, three quarters of a circle.
fn draw_spinner(ctx: &CanvasRenderingContext2d, color: &Color, x: f64, y: f64, time: f64) {
	const SPIN_SPEED: f64 = 5.0;
	let start = time * SPIN_SPEED;

	ctx.begin_path();
	let _ = ctx.arc(x, y, 6.0, start, start + 1.5 * PI);
	ctx.set_stroke_style_str(&color.to_css());
	ctx.set_line_width(2.0);
	ctx.stroke();
}

#[allow(clippy::too_many_arguments)]
fn draw_progress(
	ctx: &CanvasRenderingContext2d,
	text: &Color,
	fill: &Color,
	progress: &super::presenter::ProgressSpec,
	fill_width: f64,
	x: f64,
	y: f64,
	w: f64,
) -> f64 {
	let inner_x = x + PADDING;
	let inner_w = w - PADDING * 2.0;

	ctx.set_font("10px sans-serif");
	ctx.set_text_baseline("alphabetic");
	ctx.set_fill_style_str(&text.to_css());
	ctx.set_text_align("left");
	let _ = ctx.fill_text(progress.title, inner_x, y + 8.0);
	ctx.set_text_align("right");
	let _ = ctx.fill_text(&progress.percent_label, inner_x + inner_w, y + 8.0);
	ctx.set_text_align("left");

	let bar_y = y + 13.0;
	ctx.set_fill_style_str("rgba(255, 255, 255, 0.12)");
	ctx.fill_rect(inner_x, bar_y, inner_w, BAR_HEIGHT);

	let clamped = fill_width.clamp(0.0, 100.0);
	ctx.set_fill_style_str(&fill.to_css());
	ctx.fill_rect(inner_x, bar_y, inner_w * clamped / 100.0, BAR_HEIGHT);

	bar_y + BAR_HEIGHT + 7.0
}

fn draw_metric_row(
	ctx: &CanvasRenderingContext2d,
	text: &Color,
	row: &super::presenter::MetricRow,
	x: f64,
	y: f64,
	w: f64,
) {
	let inner_x = x + PADDING;
	let inner_w = w - PADDING * 2.0;

	ctx.set_font("10px sans-serif");
	ctx.set_text_baseline("alphabetic");

	// Title-casing is a paint effect; the descriptor key keeps its own casing.
	ctx.set_fill_style_str(&text.with_alpha(0.75).to_css());
	ctx.set_text_align("left");
	let _ = ctx.fill_text(&capitalize_words(&row.key), inner_x, y + 10.0);

	ctx.set_fill_style_str(&text.to_css());
	ctx.set_text_align("right");
	let _ = ctx.fill_text(&row.value, inner_x + inner_w, y + 10.0);
	ctx.set_text_align("left");
}

fn draw_error_panel(
	descriptor: &VisualDescriptor,
	ctx: &CanvasRenderingContext2d,
	message: &str,
	x: f64,
	y: f64,
	w: f64,
) {
	let inner_x = x + PADDING;
	let inner_w = w - PADDING * 2.0;

	ctx.set_font("10px sans-serif");
	let lines = wrap_two_lines(ctx, message, inner_w - 8.0);
	let panel_h = 8.0 + lines.len() as f64 * 12.0;

	rounded_rect_path(ctx, inner_x, y, inner_w, panel_h, 4.0);
	ctx.set_fill_style_str(&descriptor.style.border.with_alpha(0.15).to_css());
	ctx.fill();

	ctx.set_fill_style_str(&descriptor.style.text.to_css());
	ctx.set_text_baseline("alphabetic");
	ctx.set_text_align("left");
	for (i, line) in lines.iter().enumerate() {
		let _ = ctx.fill_text(line, inner_x + 4.0, y + 13.0 + i as f64 * 12.0);
	}
}

fn draw_anchors(
	descriptor: &VisualDescriptor,
	ctx: &CanvasRenderingContext2d,
	x: f64,
	y: f64,
	w: f64,
	h: f64,
) {
	let mid = y + h / 2.0;
	for anchor in [descriptor.anchors.target, descriptor.anchors.source] {
		let ax = match anchor.side {
			AnchorSide::Left => x,
			AnchorSide::Right => x + w,
		};
		ctx.begin_path();
		let _ = ctx.arc(ax, mid, anchor.radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str("#8a94a6");
		ctx.fill();
		ctx.set_stroke_style_str("#1a1d24");
		ctx.set_line_width(1.5);
		ctx.stroke();
	}
}

fn rounded_rect_path(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
	let r = r.min(w / 2.0).min(h / 2.0);
	ctx.begin_path();
	ctx.move_to(x + r, y);
	ctx.line_to(x + w - r, y);
	ctx.quadratic_curve_to(x + w, y, x + w, y + r);
	ctx.line_to(x + w, y + h - r);
	ctx.quadratic_curve_to(x + w, y + h, x + w - r, y + h);
	ctx.line_to(x + r, y + h);
	ctx.quadratic_curve_to(x, y + h, x, y + h - r);
	ctx.line_to(x, y + r);
	ctx.quadratic_curve_to(x, y, x + r, y);
	ctx.close_path();
}

fn text_width(ctx: &CanvasRenderingContext2d, text: &str) -> f64 {
	ctx.measure_text(text).map(|m| m.width()).unwrap_or(0.0)
}

/// Single-line ellipsis truncation against the current canvas font.
fn truncate_to_width(ctx: &CanvasRenderingContext2d, text: &str, max_width: f64) -> String {
	if text_width(ctx, text) <= max_width {
		return text.to_string();
	}
	let mut out = String::new();
	for ch in text.chars() {
		out.push(ch);
		if text_width(ctx, &format!("{}…", out)) > max_width {
			out.pop();
			out.push('…');
			return out;
		}
	}
	out
}

/// Word-wrap to at most two lines, ellipsizing the second.
fn wrap_two_lines(ctx: &CanvasRenderingContext2d, text: &str, max_width: f64) -> Vec<String> {
	let mut first = String::new();
	let mut rest = String::new();
	for word in text.split_whitespace() {
		if rest.is_empty() {
			let candidate = if first.is_empty() {
				word.to_string()
			} else {
				format!("{} {}", first, word)
			};
			if first.is_empty() || text_width(ctx, &candidate) <= max_width {
				first = candidate;
				continue;
			}
		}
		if rest.is_empty() {
			rest = word.to_string();
		} else {
			rest = format!("{} {}", rest, word);
		}
	}

	if rest.is_empty() {
		if first.is_empty() {
			return Vec::new();
		}
		return vec![first];
	}
	vec![first, truncate_to_width(ctx, &rest, max_width)]
}

/// Uppercase the first letter of each space-separated word. Paint-time only.
fn capitalize_words(text: &str) -> String {
	text.split(' ')
		.map(|word| {
			let mut chars = word.chars();
			match chars.next() {
				Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
				None => String::new(),
			}
		})
		.collect::<Vec<_>>()
		.join(" ")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn capitalize_words_is_paint_time_title_casing() {
		assert_eq!(capitalize_words("tokens Used"), "Tokens Used");
		assert_eq!(capitalize_words("avg Score Per Round"), "Avg Score Per Round");
		assert_eq!(capitalize_words("plain"), "Plain");
		assert_eq!(capitalize_words(""), "");
	}
}
