use std::f64::consts::PI;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::engine::Surface;
use super::state::{Link, NeuralMapState, Node};

const LABEL_FONT: &str = "bold 11px 'Courier New', monospace";

/// A 2D canvas the neural map paints onto.
pub struct CanvasSurface {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
	/// Wraps `canvas`, or `None` when it cannot hand out a 2D context.
	pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
		let ctx = canvas
			.get_context("2d")
			.ok()
			.flatten()?
			.dyn_into::<CanvasRenderingContext2d>()
			.ok()?;
		Some(Self { canvas, ctx })
	}
}

impl Surface for CanvasSurface {
	fn size(&self) -> (f64, f64) {
		(self.canvas.width() as f64, self.canvas.height() as f64)
	}

	fn draw(&self, state: &NeuralMapState) {
		render(state, &self.ctx);
	}
}

pub fn render(state: &NeuralMapState, ctx: &CanvasRenderingContext2d) {
	ctx.clear_rect(0.0, 0.0, state.width, state.height);
	for link in &state.links {
		if let (Some(source), Some(target)) =
			(state.nodes.get(link.source), state.nodes.get(link.target))
		{
			draw_link(link, source, target, ctx);
		}
	}
	for node in &state.nodes {
		draw_node(node, ctx);
	}
}

fn draw_link(link: &Link, source: &Node, target: &Node, ctx: &CanvasRenderingContext2d) {
	let alpha = 0.2 + link.strength * 0.6;
	ctx.set_stroke_style_str(&format!("rgba(0, 255, 255, {})", alpha));
	ctx.set_line_width(1.0 + link.strength * 3.0);
	ctx.begin_path();
	ctx.move_to(source.x, source.y);
	ctx.line_to(target.x, target.y);
	ctx.stroke();
}

fn draw_node(node: &Node, ctx: &CanvasRenderingContext2d) {
	let (x, y, r) = (node.x, node.y, node.radius);

	// Glow
	if let Ok(gradient) = ctx.create_radial_gradient(x, y, 0.0, x, y, r * 2.0) {
		let _ = gradient.add_color_stop(0.0, &node.color);
		let _ = gradient.add_color_stop(1.0, "transparent");
		ctx.set_global_alpha(0.35);
		ctx.begin_path();
		let _ = ctx.arc(x, y, r * 2.0, 0.0, 2.0 * PI);
		#[allow(deprecated)]
		ctx.set_fill_style(&gradient);
		ctx.fill();
		ctx.set_global_alpha(1.0);
	}

	ctx.begin_path();
	let _ = ctx.arc(x, y, r, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(&node.color);
	ctx.fill();

	ctx.begin_path();
	let _ = ctx.arc(x, y, r * 0.7, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(node.status.color());
	ctx.fill();

	ctx.set_text_align("center");
	ctx.set_fill_style_str("#ffffff");
	ctx.set_font(LABEL_FONT);
	let _ = ctx.fill_text(&node.id.to_uppercase(), x, y + r + 15.0);

	ctx.set_text_baseline("middle");
	ctx.set_font(&format!("{}px sans-serif", (r * 0.9).round()));
	let _ = ctx.fill_text(&node.icon, x, y);
	ctx.set_text_baseline("alphabetic");
}
