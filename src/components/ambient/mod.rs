//! Decorative canvas animations for landing pages.
//!
//! Three self-contained effects share one lifecycle:
//! - [`ParticleNetwork`]: drifting points joined by distance-faded lines,
//!   optionally reaching for the pointer
//! - [`SpiralParticles`]: particles orbiting an off-center point with a wobble
//! - [`VerticalBars`]: equalizer bars oscillating on independent phases
//!
//! Each effect is driven by an [`AnimationLoop`] that only requests frames
//! while its canvas is on screen.
//!
//! # Example
//!
//! ```ignore
//! use ambient_canvas::{AmbientCanvas, AmbientEffect, NetworkConfig};
//!
//! view! {
//!     <section class="hero">
//!         <AmbientCanvas effect=AmbientEffect::Network(NetworkConfig::default()) />
//!     </section>
//! }
//! ```

mod bars;
mod canvas;
mod color;
mod component;
mod effect;
mod lifecycle;
mod network;
mod spiral;
mod surface;

pub use bars::{Bar, VerticalBars};
pub use canvas::{MountedAnimation, mount, mount_effect};
pub use color::Color;
pub use component::AmbientCanvas;
pub use effect::{AmbientEffect, merge_overrides, page_presets, parse_overrides};
pub use lifecycle::{
	Animation, AnimationLoop, FrameId, FrameScheduler, Instance, VISIBILITY_THRESHOLD,
};
pub use network::{NetworkConfig, Particle, ParticleNetwork};
pub use spiral::{OrbitingParticle, SpiralConfig, SpiralParticles};
pub use surface::Surface;
