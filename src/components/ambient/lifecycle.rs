//! Visibility-gated animation loop shared by every ambient effect.
//!
//! An [`AnimationLoop`] owns one animation, the surface it draws on and a
//! [`FrameScheduler`] handle. It only keeps a frame chain alive while its
//! canvas is visible, and never has more than one frame request in flight.

use super::surface::Surface;

/// Fraction of the canvas that must intersect the viewport before animating.
pub const VISIBILITY_THRESHOLD: f64 = 0.1;

/// Identifier of a scheduled frame callback (the `requestAnimationFrame` id in browsers).
pub type FrameId = i32;

/// Host frame scheduler: "call me back on the next frame", cancelable.
pub trait FrameScheduler {
	/// Schedules the owner's frame callback. `None` if the host refused.
	fn request_frame(&mut self) -> Option<FrameId>;

	/// Cancels a previously scheduled callback.
	fn cancel_frame(&mut self, id: FrameId);
}

/// A self-contained ambient animation: an element collection plus its motion and drawing rules.
pub trait Animation {
	/// Current drawable size.
	fn size(&self) -> (f64, f64);

	/// Rebuilds the element collection from scratch for a new drawable size.
	fn regenerate(&mut self, width: f64, height: f64);

	/// Advances motion state by one nominal frame.
	fn advance(&mut self);

	/// Draws every element at its current position.
	fn render<S: Surface>(&self, surface: &mut S);

	/// Whether this animation reacts to the pointer.
	fn tracks_pointer(&self) -> bool {
		false
	}

	/// Updates the pointer position in canvas-local coordinates; `None` once it leaves.
	fn set_pointer(&mut self, _pointer: Option<(f64, f64)>) {}
}

/// Owner of one animation instance and its frame chain.
#[derive(Debug)]
pub struct AnimationLoop<A, S, F> {
	animation: A,
	surface: S,
	scheduler: F,
	visible: bool,
	pending: Option<FrameId>,
}

impl<A: Animation, S: Surface, F: FrameScheduler> AnimationLoop<A, S, F> {
	/// Creates a hidden loop; nothing is scheduled until [`Self::set_visible`].
	pub fn new(animation: A, surface: S, scheduler: F) -> Self {
		Self {
			animation,
			surface,
			scheduler,
			visible: false,
			pending: None,
		}
	}

	/// Starts or stops the frame chain.
	pub fn set_visible(&mut self, visible: bool) {
		self.visible = visible;
		if visible {
			if self.pending.is_none() {
				self.pending = self.scheduler.request_frame();
			}
		} else if let Some(id) = self.pending.take() {
			self.scheduler.cancel_frame(id);
		}
	}

	/// Runs one frame: clear, advance, render, and schedule the next one.
	pub fn on_frame(&mut self) {
		self.pending = None;
		if !self.visible {
			return;
		}

		let (width, height) = self.animation.size();
		self.surface.clear(width, height);
		self.animation.advance();
		self.animation.render(&mut self.surface);

		self.pending = self.scheduler.request_frame();
	}

	/// Regenerates the element collection for a resized container.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.animation.regenerate(width, height);
	}

	/// Whether the canvas is currently visible.
	pub fn is_visible(&self) -> bool {
		self.visible
	}

	/// Whether a frame callback is in flight.
	pub fn has_pending_frame(&self) -> bool {
		self.pending.is_some()
	}

	/// The owned animation.
	pub fn animation(&self) -> &A {
		&self.animation
	}

	/// The owned animation, mutably.
	pub fn animation_mut(&mut self) -> &mut A {
		&mut self.animation
	}

	/// The owned surface.
	pub fn surface(&self) -> &S {
		&self.surface
	}
}

/// Object-safe view of a running loop, used by the browser driver to hold
/// heterogeneous instances behind one type.
pub trait Instance {
	/// See [`AnimationLoop::set_visible`].
	fn set_visible(&mut self, visible: bool);
	/// See [`AnimationLoop::on_frame`].
	fn on_frame(&mut self);
	/// See [`AnimationLoop::resize`].
	fn resize(&mut self, width: f64, height: f64);
	/// Whether pointer events should be forwarded.
	fn tracks_pointer(&self) -> bool;
	/// Forwards the pointer position to the animation.
	fn set_pointer(&mut self, pointer: Option<(f64, f64)>);
	/// See [`AnimationLoop::is_visible`].
	fn is_visible(&self) -> bool;
}

impl<A: Animation, S: Surface, F: FrameScheduler> Instance for AnimationLoop<A, S, F> {
	fn set_visible(&mut self, visible: bool) {
		AnimationLoop::set_visible(self, visible);
	}

	fn on_frame(&mut self) {
		AnimationLoop::on_frame(self);
	}

	fn resize(&mut self, width: f64, height: f64) {
		AnimationLoop::resize(self, width, height);
	}

	fn tracks_pointer(&self) -> bool {
		self.animation.tracks_pointer()
	}

	fn set_pointer(&mut self, pointer: Option<(f64, f64)>) {
		self.animation.set_pointer(pointer);
	}

	fn is_visible(&self) -> bool {
		self.visible
	}
}
