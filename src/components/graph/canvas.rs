//! [`Surface`] implementation over a 2D canvas context.

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::render::{Paint, Surface};
use super::theme::Color;

/// Paints render records onto an HTML canvas.
pub struct CanvasSurface<'a> {
	ctx: &'a CanvasRenderingContext2d,
}

impl<'a> CanvasSurface<'a> {
	/// Wraps a 2D context. The surface borrows it for one paint pass.
	pub fn new(ctx: &'a CanvasRenderingContext2d) -> Self {
		Self { ctx }
	}

	fn begin(&self, paint: &Paint) {
		self.ctx.set_global_alpha(paint.opacity.clamp(0.0, 1.0));
		let dash = match paint.dash {
			Some((dash, gap)) => js_sys::Array::of2(&JsValue::from_f64(dash), &JsValue::from_f64(gap)),
			None => js_sys::Array::new(),
		};
		let _ = self.ctx.set_line_dash(&dash);
	}

	fn finish(&self, paint: &Paint) {
		if let Some(fill) = paint.fill {
			self.ctx.set_fill_style_str(&fill.to_css());
			self.ctx.fill();
		}
		if let Some(stroke) = paint.stroke {
			self.ctx.set_stroke_style_str(&stroke.to_css());
			self.ctx.set_line_width(paint.line_width);
			self.ctx.stroke();
		}
		self.ctx.set_global_alpha(1.0);
	}
}

impl Surface for CanvasSurface<'_> {
	fn clear(&mut self, width: f64, height: f64, background: Color) {
		self.ctx.set_global_alpha(1.0);
		self.ctx.set_fill_style_str(&background.to_css());
		self.ctx.fill_rect(0.0, 0.0, width, height);
	}

	fn circle(&mut self, x: f64, y: f64, radius: f64, paint: &Paint) {
		if !(radius.is_finite() && radius > 0.0) {
			return;
		}
		self.begin(paint);
		self.ctx.begin_path();
		let _ = self.ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		self.finish(paint);
	}

	fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, paint: &Paint) {
		self.begin(paint);
		self.ctx.begin_path();
		self.ctx.move_to(x1, y1);
		self.ctx.line_to(x2, y2);
		self.finish(paint);
	}

	fn polygon(&mut self, points: &[(f64, f64)], paint: &Paint) {
		let Some((&(x0, y0), rest)) = points.split_first() else {
			return;
		};
		self.begin(paint);
		self.ctx.begin_path();
		self.ctx.move_to(x0, y0);
		for &(x, y) in rest {
			self.ctx.line_to(x, y);
		}
		self.ctx.close_path();
		self.finish(paint);
	}

	fn text(&mut self, text: &str, x: f64, y: f64, font: &str, paint: &Paint) {
		self.ctx.set_global_alpha(paint.opacity.clamp(0.0, 1.0));
		self.ctx.set_font(font);
		if let Some(fill) = paint.fill {
			self.ctx.set_fill_style_str(&fill.to_css());
			let _ = self.ctx.fill_text(text, x, y);
		}
		self.ctx.set_global_alpha(1.0);
	}
}
