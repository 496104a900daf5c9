//! Equalizer-style vertical bars.

use std::f64::consts::TAU;

use fastrand::Rng;

use super::color::Color;
use super::lifecycle::Animation;
use super::surface::Surface;

/// Horizontal distance between bar slots.
pub const BAR_SPACING: f64 = 4.0;
const BAR_WIDTH: f64 = 2.0;
const TIME_STEP: f64 = 0.02;
const TOP_COLOR: Color = Color::rgba(120, 140, 180, 0.3);
const BOTTOM_COLOR: Color = Color::rgba(120, 140, 180, 0.02);

/// One oscillating bar.
#[derive(Clone, Debug, PartialEq)]
pub struct Bar {
	/// Left edge of the bar's slot.
	pub x: f64,
	/// Peak height.
	pub height: f64,
	/// Oscillation speed.
	pub speed: f64,
	/// Phase offset in radians.
	pub phase: f64,
}

impl Bar {
	/// Height at global time `time`, always within `[0, self.height]`.
	pub fn height_at(&self, time: f64) -> f64 {
		let level = 0.5 + 0.5 * (time * self.speed + self.phase).sin();
		self.height * level.clamp(0.0, 1.0)
	}
}

/// Number of bar slots that fit in `width`.
pub fn bar_count(width: f64) -> usize {
	if width.is_finite() && width > 0.0 {
		(width / BAR_SPACING).floor() as usize
	} else {
		0
	}
}

/// Vertical bars animation.
#[derive(Debug)]
pub struct VerticalBars {
	bars: Vec<Bar>,
	time: f64,
	width: f64,
	height: f64,
	rng: Rng,
}

impl VerticalBars {
	/// Creates bars for a `width` x `height` canvas.
	pub fn new(width: f64, height: f64, rng: Rng) -> Self {
		let mut bars = Self {
			bars: Vec::new(),
			time: 0.0,
			width: 0.0,
			height: 0.0,
			rng,
		};
		bars.regenerate(width, height);
		bars
	}

	/// Current bars.
	pub fn bars(&self) -> &[Bar] {
		&self.bars
	}

	/// Global time accumulator.
	pub fn time(&self) -> f64 {
		self.time
	}
}

impl Animation for VerticalBars {
	fn size(&self) -> (f64, f64) {
		(self.width, self.height)
	}

	fn regenerate(&mut self, width: f64, height: f64) {
		self.width = width.max(0.0);
		self.height = height.max(0.0);
		let rng = &mut self.rng;
		self.bars = (0..bar_count(self.width))
			.map(|i| Bar {
				x: i as f64 * BAR_SPACING,
				height: 20.0 + rng.f64() * 60.0,
				speed: 0.5 + rng.f64() * 2.0,
				phase: rng.f64() * TAU,
			})
			.collect();
	}

	fn advance(&mut self) {
		self.time += TIME_STEP;
	}

	fn render<S: Surface>(&self, surface: &mut S) {
		for bar in &self.bars {
			let h = bar.height_at(self.time);
			surface.fill_gradient_bar(
				bar.x,
				self.height - h,
				BAR_WIDTH,
				h,
				TOP_COLOR,
				BOTTOM_COLOR,
			);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::ambient::surface::recording::{Op, Recorder};

	#[test]
	fn twelve_pixels_hold_three_bars() {
		let bars = VerticalBars::new(12.0, 50.0, Rng::with_seed(3));
		assert_eq!(bars.bars().len(), 3);
		let xs: Vec<f64> = bars.bars().iter().map(|b| b.x).collect();
		assert_eq!(xs, vec![0.0, 4.0, 8.0]);
	}

	#[test]
	fn count_floors_partial_slots() {
		assert_eq!(bar_count(15.9), 3);
		assert_eq!(bar_count(16.0), 4);
		assert_eq!(bar_count(3.9), 0);
		assert_eq!(bar_count(0.0), 0);
		assert_eq!(bar_count(-8.0), 0);
		assert_eq!(bar_count(f64::NAN), 0);
	}

	#[test]
	fn height_stays_within_base() {
		let bar = Bar {
			x: 0.0,
			height: 42.0,
			speed: 1.7,
			phase: 0.3,
		};
		for i in 0..10_000 {
			let t = i as f64 * 0.137 - 300.0;
			let h = bar.height_at(t);
			assert!((0.0..=42.0).contains(&h), "t={t} h={h}");
		}
		// Peak and trough are reachable.
		let peak = Bar {
			speed: 1.0,
			phase: 0.0,
			..bar.clone()
		};
		assert!((peak.height_at(std::f64::consts::FRAC_PI_2) - 42.0).abs() < 1e-9);
		assert!(peak.height_at(-std::f64::consts::FRAC_PI_2).abs() < 1e-9);
	}

	#[test]
	fn bars_anchor_to_bottom() {
		let mut bars = VerticalBars::new(40.0, 100.0, Rng::with_seed(5));
		bars.advance();
		let mut rec = Recorder::default();
		bars.render(&mut rec);

		assert_eq!(rec.ops.len(), 10);
		for op in &rec.ops {
			let Op::Bar { y, width, height, .. } = op else {
				panic!("unexpected op {op:?}");
			};
			assert!((y + height - 100.0).abs() < 1e-9);
			assert_eq!(*width, BAR_WIDTH);
		}
		assert!((bars.time() - TIME_STEP).abs() < 1e-12);
	}

	#[test]
	fn randomized_parameters_in_range() {
		let bars = VerticalBars::new(400.0, 100.0, Rng::with_seed(9));
		for b in bars.bars() {
			assert!((20.0..80.0).contains(&b.height));
			assert!((0.5..2.5).contains(&b.speed));
			assert!((0.0..TAU).contains(&b.phase));
		}
	}

	#[test]
	fn zero_width_resize_draws_nothing() {
		let mut bars = VerticalBars::new(400.0, 100.0, Rng::with_seed(1));
		bars.regenerate(0.0, 100.0);
		assert!(bars.bars().is_empty());

		bars.advance();
		let mut rec = Recorder::default();
		bars.render(&mut rec);
		assert!(rec.ops.is_empty());
	}
}
