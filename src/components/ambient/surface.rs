//! Drawing surface abstraction.
//!
//! Animations render through [`Surface`] so their output can be checked
//! without a browser. The canvas 2D context implements it directly.

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use super::color::Color;

/// The handful of primitives the ambient animations draw with.
pub trait Surface {
	/// Erases the `width` x `height` area starting at the origin.
	fn clear(&mut self, width: f64, height: f64);

	/// Filled circle.
	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color);

	/// Straight line segment.
	fn stroke_segment(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Color);

	/// Axis-aligned ellipse outline.
	fn stroke_ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64, width: f64, color: Color);

	/// Disc filled with a radial gradient from `inner` at the center to `outer` at `radius`.
	fn fill_glow(&mut self, cx: f64, cy: f64, radius: f64, inner: Color, outer: Color);

	/// Rectangle filled with a vertical gradient from `top` to `bottom`.
	fn fill_gradient_bar(
		&mut self,
		x: f64,
		y: f64,
		width: f64,
		height: f64,
		top: Color,
		bottom: Color,
	);
}

impl Surface for CanvasRenderingContext2d {
	fn clear(&mut self, width: f64, height: f64) {
		self.clear_rect(0.0, 0.0, width, height);
	}

	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) {
		self.begin_path();
		let _ = self.arc(x, y, radius, 0.0, TAU);
		self.set_fill_style_str(&color.to_css());
		self.fill();
	}

	fn stroke_segment(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Color) {
		self.begin_path();
		self.move_to(from.0, from.1);
		self.line_to(to.0, to.1);
		self.set_stroke_style_str(&color.to_css());
		self.set_line_width(width);
		self.stroke();
	}

	fn stroke_ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64, width: f64, color: Color) {
		self.begin_path();
		let _ = self.ellipse(cx, cy, rx, ry, 0.0, 0.0, TAU);
		self.set_stroke_style_str(&color.to_css());
		self.set_line_width(width);
		self.stroke();
	}

	fn fill_glow(&mut self, cx: f64, cy: f64, radius: f64, inner: Color, outer: Color) {
		let Ok(gradient) = self.create_radial_gradient(cx, cy, 0.0, cx, cy, radius) else {
			return;
		};
		let _ = gradient.add_color_stop(0.0, &inner.to_css());
		let _ = gradient.add_color_stop(1.0, &outer.to_css());

		#[allow(deprecated)]
		self.set_fill_style(&gradient);
		self.begin_path();
		let _ = self.arc(cx, cy, radius, 0.0, TAU);
		self.fill();
	}

	fn fill_gradient_bar(
		&mut self,
		x: f64,
		y: f64,
		width: f64,
		height: f64,
		top: Color,
		bottom: Color,
	) {
		let gradient = self.create_linear_gradient(0.0, y, 0.0, y + height);
		let _ = gradient.add_color_stop(0.0, &top.to_css());
		let _ = gradient.add_color_stop(1.0, &bottom.to_css());

		#[allow(deprecated)]
		self.set_fill_style(&gradient);
		self.fill_rect(x, y, width, height);
	}
}

/// Surface that records draw calls, for tests.
#[cfg(test)]
pub(crate) mod recording {
	use super::{Color, Surface};

	#[derive(Clone, Debug, PartialEq)]
	pub(crate) enum Op {
		Clear {
			width: f64,
			height: f64,
		},
		Circle {
			x: f64,
			y: f64,
			radius: f64,
			color: Color,
		},
		Segment {
			from: (f64, f64),
			to: (f64, f64),
			width: f64,
			color: Color,
		},
		Ellipse {
			cx: f64,
			cy: f64,
			rx: f64,
			ry: f64,
			color: Color,
		},
		Glow {
			cx: f64,
			cy: f64,
			radius: f64,
			inner: Color,
			outer: Color,
		},
		Bar {
			x: f64,
			y: f64,
			width: f64,
			height: f64,
		},
	}

	#[derive(Debug, Default)]
	pub(crate) struct Recorder {
		pub ops: Vec<Op>,
	}

	impl Recorder {
		pub fn segments(&self) -> Vec<&Op> {
			self.ops
				.iter()
				.filter(|op| matches!(op, Op::Segment { .. }))
				.collect()
		}

		pub fn circles(&self) -> Vec<&Op> {
			self.ops
				.iter()
				.filter(|op| matches!(op, Op::Circle { .. }))
				.collect()
		}
	}

	impl Surface for Recorder {
		fn clear(&mut self, width: f64, height: f64) {
			self.ops.push(Op::Clear { width, height });
		}

		fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) {
			self.ops.push(Op::Circle { x, y, radius, color });
		}

		fn stroke_segment(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Color) {
			self.ops.push(Op::Segment {
				from,
				to,
				width,
				color,
			});
		}

		fn stroke_ellipse(
			&mut self,
			cx: f64,
			cy: f64,
			rx: f64,
			ry: f64,
			_width: f64,
			color: Color,
		) {
			self.ops.push(Op::Ellipse {
				cx,
				cy,
				rx,
				ry,
				color,
			});
		}

		fn fill_glow(&mut self, cx: f64, cy: f64, radius: f64, inner: Color, outer: Color) {
			self.ops.push(Op::Glow {
				cx,
				cy,
				radius,
				inner,
				outer,
			});
		}

		fn fill_gradient_bar(
			&mut self,
			x: f64,
			y: f64,
			width: f64,
			height: f64,
			_top: Color,
			_bottom: Color,
		) {
			self.ops.push(Op::Bar {
				x,
				y,
				width,
				height,
			});
		}
	}
}
