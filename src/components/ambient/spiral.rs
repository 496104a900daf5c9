//! Spiral particles orbiting an off-center point.
//!
//! Each particle circles the shared center on an ellipse whose radius wobbles
//! with a sine of both the global time and the particle's own angle. Static
//! guide rings and a soft center glow are drawn over the particles.

use std::f64::consts::TAU;

use fastrand::Rng;
use serde::Deserialize;

use super::color::Color;
use super::lifecycle::Animation;
use super::surface::Surface;

/// Vertical axis compression of every orbit.
const ORBIT_SQUASH: f64 = 0.7;
const WOBBLE_AMPLITUDE: f64 = 15.0;
const PARTICLE_BLEND: f64 = 0.6;
const RING_RADII: [f64; 4] = [60.0, 110.0, 160.0, 210.0];
const RING_ALPHA: f64 = 0.08;
const RING_EMPHASIS: f64 = 0.06;
const GLOW_RADIUS: f64 = 40.0;
const GLOW_ALPHA: f64 = 0.15;

/// Spiral particle configuration.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpiralConfig {
	/// Number of particles.
	pub particle_count: usize,
	/// Base color of particles, rings and glow.
	pub color: Color,
	/// Global time advance per frame.
	pub speed: f64,
}

impl Default for SpiralConfig {
	fn default() -> Self {
		Self {
			particle_count: 200,
			color: Color::rgb(255, 107, 107),
			speed: 0.005,
		}
	}
}

impl SpiralConfig {
	/// Replaces a negative or non-finite speed with the default.
	pub fn validated(self) -> Self {
		if self.speed.is_finite() && self.speed >= 0.0 {
			return self;
		}
		let speed = Self::default().speed;
		log::warn!("ambient: spiral speed {} out of range, using {speed}", self.speed);
		Self { speed, ..self }
	}
}

/// One particle on its orbit.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitingParticle {
	/// Polar angle in radians.
	pub angle: f64,
	/// Orbit radius before wobble.
	pub radius: f64,
	/// Angle advance per frame.
	pub speed: f64,
	/// Drawn radius.
	pub size: f64,
	/// Opacity before blending.
	pub opacity: f64,
}

/// Position of a particle at `angle` on an orbit of base `radius` around
/// `center`, at global time `time`. Pure in its inputs.
pub fn orbit_position(center: (f64, f64), time: f64, angle: f64, radius: f64) -> (f64, f64) {
	let wobble = (time * 2.0 + angle * 3.0).sin() * WOBBLE_AMPLITUDE;
	let r = radius + wobble;
	(
		center.0 + r * angle.cos(),
		center.1 + r * angle.sin() * ORBIT_SQUASH,
	)
}

/// Spiral particle animation.
#[derive(Debug)]
pub struct SpiralParticles {
	config: SpiralConfig,
	particles: Vec<OrbitingParticle>,
	center: (f64, f64),
	time: f64,
	width: f64,
	height: f64,
	rng: Rng,
}

impl SpiralParticles {
	/// Creates a spiral sized `width` x `height` and populates it.
	pub fn new(config: SpiralConfig, width: f64, height: f64, rng: Rng) -> Self {
		let mut spiral = Self {
			config: config.validated(),
			particles: Vec::new(),
			center: (0.0, 0.0),
			time: 0.0,
			width: 0.0,
			height: 0.0,
			rng,
		};
		spiral.regenerate(width, height);
		spiral
	}

	/// Current particles.
	pub fn particles(&self) -> &[OrbitingParticle] {
		&self.particles
	}

	/// Shared orbit center, left of the canvas midpoint.
	pub fn center(&self) -> (f64, f64) {
		self.center
	}

	/// Global time accumulator.
	pub fn time(&self) -> f64 {
		self.time
	}

	fn spawn(&mut self) -> OrbitingParticle {
		OrbitingParticle {
			angle: self.rng.f64() * TAU,
			radius: 30.0 + self.rng.f64() * 200.0,
			speed: 0.001 + self.rng.f64() * 0.008,
			size: 1.0 + self.rng.f64() * 2.0,
			opacity: 0.3 + self.rng.f64() * 0.7,
		}
	}
}

impl Animation for SpiralParticles {
	fn size(&self) -> (f64, f64) {
		(self.width, self.height)
	}

	fn regenerate(&mut self, width: f64, height: f64) {
		self.width = width.max(0.0);
		self.height = height.max(0.0);
		self.center = (self.width * 0.4, self.height * 0.5);
		let count = self.config.particle_count;
		let particles: Vec<OrbitingParticle> = (0..count).map(|_| self.spawn()).collect();
		self.particles = particles;
	}

	fn advance(&mut self) {
		self.time += self.config.speed;
		for p in &mut self.particles {
			p.angle += p.speed;
		}
	}

	fn render<S: Surface>(&self, surface: &mut S) {
		let color = self.config.color;
		let (cx, cy) = self.center;

		for p in &self.particles {
			let (x, y) = orbit_position(self.center, self.time, p.angle, p.radius);
			surface.fill_circle(x, y, p.size, color.with_alpha(p.opacity * PARTICLE_BLEND));
		}

		for (i, r) in RING_RADII.into_iter().enumerate() {
			let emphasis = if i % 2 == 1 { RING_EMPHASIS } else { 0.0 };
			surface.stroke_ellipse(
				cx,
				cy,
				r,
				r * ORBIT_SQUASH,
				1.0,
				color.with_alpha(RING_ALPHA + emphasis),
			);
		}

		surface.fill_glow(
			cx,
			cy,
			GLOW_RADIUS,
			color.with_alpha(GLOW_ALPHA),
			color.with_alpha(0.0),
		);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::ambient::surface::recording::{Op, Recorder};

	fn spiral(count: usize, width: f64, height: f64) -> SpiralParticles {
		SpiralParticles::new(
			SpiralConfig {
				particle_count: count,
				..SpiralConfig::default()
			},
			width,
			height,
			Rng::with_seed(11),
		)
	}

	#[test]
	fn orbit_position_is_pure_and_exact() {
		let a = orbit_position((100.0, 50.0), 1.25, 0.4, 80.0);
		let b = orbit_position((100.0, 50.0), 1.25, 0.4, 80.0);
		assert_eq!(a, b);

		// sin(0) = 0: no wobble, plain ellipse point.
		let (x, y) = orbit_position((10.0, 20.0), 0.0, 0.0, 30.0);
		assert_eq!((x, y), (40.0, 20.0));

		// time 0, angle pi/6: wobble = sin(pi/2) * 15 = 15.
		let angle = std::f64::consts::FRAC_PI_6;
		let (x, y) = orbit_position((0.0, 0.0), 0.0, angle, 30.0);
		assert!((x - 45.0 * angle.cos()).abs() < 1e-9);
		assert!((y - 45.0 * angle.sin() * 0.7).abs() < 1e-9);
	}

	#[test]
	fn center_sits_left_of_middle() {
		let s = spiral(10, 500.0, 300.0);
		assert_eq!(s.center(), (200.0, 150.0));
	}

	#[test]
	fn creation_respects_ranges() {
		let s = spiral(300, 800.0, 600.0);
		assert_eq!(s.particles().len(), 300);
		for p in s.particles() {
			assert!((0.0..TAU).contains(&p.angle));
			assert!((30.0..230.0).contains(&p.radius));
			assert!((0.001..0.009).contains(&p.speed));
			assert!((1.0..3.0).contains(&p.size));
			assert!((0.3..1.0).contains(&p.opacity));
		}
	}

	#[test]
	fn advance_moves_time_and_angles() {
		let mut s = spiral(5, 400.0, 400.0);
		let before: Vec<f64> = s.particles().iter().map(|p| p.angle + p.speed).collect();
		s.advance();
		assert!((s.time() - 0.005).abs() < 1e-12);
		for (p, expected) in s.particles().iter().zip(before) {
			assert_eq!(p.angle, expected);
		}
	}

	#[test]
	fn render_draws_particles_rings_and_glow() {
		let s = spiral(3, 400.0, 400.0);
		let mut rec = Recorder::default();
		s.render(&mut rec);

		assert_eq!(rec.circles().len(), 3);
		let rings: Vec<&Op> = rec
			.ops
			.iter()
			.filter(|op| matches!(op, Op::Ellipse { .. }))
			.collect();
		assert_eq!(rings.len(), 4);
		let alphas: Vec<f64> = rings
			.iter()
			.map(|op| match op {
				Op::Ellipse { color, rx, ry, .. } => {
					assert!((ry - rx * ORBIT_SQUASH).abs() < 1e-12);
					color.a
				}
				_ => unreachable!(),
			})
			.collect();
		assert!(alphas[0] < alphas[1] && alphas[2] < alphas[3]);

		let Some(Op::Glow { cx, cy, radius, .. }) = rec.ops.last() else {
			panic!("expected the glow last, got {:?}", rec.ops.last());
		};
		assert_eq!((*cx, *cy, *radius), (160.0, 200.0, GLOW_RADIUS));
	}

	#[test]
	fn particle_alpha_is_blended_opacity() {
		let s = spiral(1, 400.0, 400.0);
		let mut rec = Recorder::default();
		s.render(&mut rec);
		let Op::Circle { color, .. } = rec.circles()[0] else {
			unreachable!()
		};
		let expected = s.particles()[0].opacity * PARTICLE_BLEND;
		assert!((color.a - expected).abs() < 1e-12);
		assert_eq!((color.r, color.g, color.b), (255, 107, 107));
	}

	#[test]
	fn regenerate_on_zero_size() {
		let mut s = spiral(20, 400.0, 400.0);
		s.regenerate(0.0, 0.0);
		assert_eq!(s.center(), (0.0, 0.0));
		assert_eq!(s.particles().len(), 20);
		let mut rec = Recorder::default();
		s.render(&mut rec);
		assert!(!rec.ops.is_empty());
	}

	#[test]
	fn negative_speed_is_replaced() {
		let c = SpiralConfig {
			speed: -1.0,
			..SpiralConfig::default()
		}
		.validated();
		assert_eq!(c.speed, 0.005);
	}
}
