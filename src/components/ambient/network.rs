//! Particle network: drifting points joined by fading lines.
//!
//! Particles move in straight lines and wrap around the canvas edges. Any two
//! particles closer than `line_distance` are connected by a line whose alpha
//! falls off linearly with distance. With `interactive` enabled, particles near
//! the pointer are also tied to it.

use fastrand::Rng;
use serde::Deserialize;

use super::color::Color;
use super::lifecycle::Animation;
use super::surface::Surface;

/// Blend factor applied to particle-to-particle line alpha.
const LINE_BLEND: f64 = 0.3;
const LINE_WIDTH: f64 = 0.6;
/// Pointer lines reach further than particle links.
const POINTER_RADIUS: f64 = 200.0;
const POINTER_BLEND: f64 = 0.4;
const POINTER_LINE_WIDTH: f64 = 0.5;
const MIN_PARTICLE_RADIUS: f64 = 0.5;

/// Particle network configuration.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NetworkConfig {
	/// Number of particles.
	pub particle_count: usize,
	/// Particle fill color.
	pub particle_color: Color,
	/// Line color; its alpha is replaced by the distance falloff.
	pub line_color: Color,
	/// Upper bound added to the minimum particle radius.
	pub particle_radius: f64,
	/// Particles closer than this are connected.
	pub line_distance: f64,
	/// Velocity components are drawn from `[-speed / 2, speed / 2)`.
	pub speed: f64,
	/// Track the pointer and draw pointer lines.
	pub interactive: bool,
}

impl Default for NetworkConfig {
	fn default() -> Self {
		Self {
			particle_count: 80,
			particle_color: Color::rgba(150, 170, 200, 0.6),
			line_color: Color::rgba(150, 170, 200, 0.12),
			particle_radius: 2.0,
			line_distance: 150.0,
			speed: 0.3,
			interactive: true,
		}
	}
}

impl NetworkConfig {
	/// Replaces negative or non-finite numeric options with their defaults.
	pub fn validated(self) -> Self {
		let defaults = Self::default();
		let sane = |v: f64, fallback: f64| {
			if v.is_finite() && v >= 0.0 {
				v
			} else {
				log::warn!("ambient: network option {v} out of range, using {fallback}");
				fallback
			}
		};
		Self {
			particle_radius: sane(self.particle_radius, defaults.particle_radius),
			line_distance: sane(self.line_distance, defaults.line_distance),
			speed: sane(self.speed, defaults.speed),
			..self
		}
	}
}

/// A single drifting particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	/// Horizontal position.
	pub x: f64,
	/// Vertical position.
	pub y: f64,
	/// Horizontal velocity per frame.
	pub vx: f64,
	/// Vertical velocity per frame.
	pub vy: f64,
	/// Drawn radius.
	pub radius: f64,
}

/// Wraps `v` into `[0, extent)`. A non-positive extent collapses to `0`.
pub fn wrap(v: f64, extent: f64) -> f64 {
	if extent.is_nan() || extent <= 0.0 {
		return 0.0;
	}
	let w = v.rem_euclid(extent);
	// rem_euclid can round up to `extent` for tiny negative inputs.
	if w >= extent { 0.0 } else { w }
}

/// Alpha of a connection line between points `dist` apart, or `None` at or beyond `threshold`.
pub fn link_alpha(dist: f64, threshold: f64) -> Option<f64> {
	(dist < threshold).then(|| 1.0 - dist / threshold)
}

/// Particle network animation.
#[derive(Debug)]
pub struct ParticleNetwork {
	config: NetworkConfig,
	particles: Vec<Particle>,
	pointer: Option<(f64, f64)>,
	width: f64,
	height: f64,
	rng: Rng,
}

impl ParticleNetwork {
	/// Creates a network sized `width` x `height` and populates it.
	pub fn new(config: NetworkConfig, width: f64, height: f64, rng: Rng) -> Self {
		let mut network = Self {
			config: config.validated(),
			particles: Vec::new(),
			pointer: None,
			width: 0.0,
			height: 0.0,
			rng,
		};
		network.regenerate(width, height);
		network
	}

	/// Effective configuration.
	pub fn config(&self) -> &NetworkConfig {
		&self.config
	}

	/// Current particles.
	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	/// Current particles, mutably.
	pub fn particles_mut(&mut self) -> &mut [Particle] {
		&mut self.particles
	}

	/// Last known pointer position.
	pub fn pointer(&self) -> Option<(f64, f64)> {
		self.pointer
	}

	fn spawn(&mut self) -> Particle {
		let speed = self.config.speed;
		Particle {
			x: self.rng.f64() * self.width,
			y: self.rng.f64() * self.height,
			vx: (self.rng.f64() - 0.5) * speed,
			vy: (self.rng.f64() - 0.5) * speed,
			radius: self.rng.f64() * self.config.particle_radius + MIN_PARTICLE_RADIUS,
		}
	}

	fn draw_links<S: Surface>(&self, surface: &mut S) {
		let threshold = self.config.line_distance;
		// Pairwise O(n^2); fine for the tens of particles these pages use.
		for (i, a) in self.particles.iter().enumerate() {
			for b in &self.particles[i + 1..] {
				let dist = (a.x - b.x).hypot(a.y - b.y);
				if let Some(alpha) = link_alpha(dist, threshold) {
					surface.stroke_segment(
						(a.x, a.y),
						(b.x, b.y),
						LINE_WIDTH,
						self.config.line_color.with_alpha(alpha * LINE_BLEND),
					);
				}
			}
		}
	}

	fn draw_pointer_links<S: Surface>(&self, surface: &mut S, (mx, my): (f64, f64)) {
		for p in &self.particles {
			let dist = (mx - p.x).hypot(my - p.y);
			if let Some(alpha) = link_alpha(dist, POINTER_RADIUS) {
				surface.stroke_segment(
					(p.x, p.y),
					(mx, my),
					POINTER_LINE_WIDTH,
					self.config.line_color.with_alpha(alpha * POINTER_BLEND),
				);
			}
		}
	}
}

impl Animation for ParticleNetwork {
	fn size(&self) -> (f64, f64) {
		(self.width, self.height)
	}

	fn regenerate(&mut self, width: f64, height: f64) {
		self.width = width.max(0.0);
		self.height = height.max(0.0);
		let count = self.config.particle_count;
		let particles: Vec<Particle> = (0..count).map(|_| self.spawn()).collect();
		self.particles = particles;
		log::trace!(
			"ambient: network regenerated {count} particles for {}x{}",
			self.width,
			self.height
		);
	}

	fn advance(&mut self) {
		let (width, height) = (self.width, self.height);
		for p in &mut self.particles {
			p.x = wrap(p.x + p.vx, width);
			p.y = wrap(p.y + p.vy, height);
		}
	}

	fn render<S: Surface>(&self, surface: &mut S) {
		for p in &self.particles {
			surface.fill_circle(p.x, p.y, p.radius, self.config.particle_color);
		}

		self.draw_links(surface);

		if self.config.interactive {
			if let Some(pointer) = self.pointer {
				self.draw_pointer_links(surface, pointer);
			}
		}
	}

	fn tracks_pointer(&self) -> bool {
		self.config.interactive
	}

	fn set_pointer(&mut self, pointer: Option<(f64, f64)>) {
		if self.config.interactive {
			self.pointer = pointer;
		}
	}
}
