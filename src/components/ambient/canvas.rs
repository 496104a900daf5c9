//! Browser driver: wires an animation loop to a real canvas.
//!
//! Mounting sizes the canvas to its parent, starts an `IntersectionObserver`
//! that gates the `requestAnimationFrame` chain, listens for window resizes
//! and, for pointer-reactive effects, forwards mouse position. Everything is
//! torn down again when the returned [`MountedAnimation`] is dropped.

use std::cell::RefCell;
use std::rc::Rc;

use fastrand::Rng;
use js_sys::Array;
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, IntersectionObserver,
	IntersectionObserverEntry, IntersectionObserverInit, MouseEvent, Window,
};

use super::bars::VerticalBars;
use super::effect::AmbientEffect;
use super::lifecycle::{
	Animation, AnimationLoop, FrameId, FrameScheduler, Instance, VISIBILITY_THRESHOLD,
};
use super::network::ParticleNetwork;
use super::spiral::SpiralParticles;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// `requestAnimationFrame`-backed scheduler. The callback slot is filled once
/// the owning loop exists.
struct AnimationFrames {
	window: Window,
	callback: FrameCallback,
}

impl FrameScheduler for AnimationFrames {
	fn request_frame(&mut self) -> Option<FrameId> {
		let callback = self.callback.borrow();
		let cb = callback.as_ref()?;
		self.window
			.request_animation_frame(cb.as_ref().unchecked_ref())
			.ok()
	}

	fn cancel_frame(&mut self, id: FrameId) {
		let _ = self.window.cancel_animation_frame(id);
	}
}

/// Sizes the canvas backing store to its parent container and returns the new size.
fn fit_to_container(canvas: &HtmlCanvasElement) -> (f64, f64) {
	let (w, h) = match canvas.parent_element() {
		Some(parent) => match parent.dyn_ref::<HtmlElement>() {
			Some(el) => (el.offset_width(), el.offset_height()),
			None => (parent.client_width(), parent.client_height()),
		},
		None => (canvas.width() as i32, canvas.height() as i32),
	};
	let (w, h) = (w.max(0) as u32, h.max(0) as u32);
	canvas.set_width(w);
	canvas.set_height(h);
	(w as f64, h as f64)
}

/// Fresh randomness for a new instance.
fn browser_rng() -> Rng {
	Rng::with_seed((js_sys::Math::random() * u64::MAX as f64) as u64)
}

/// A live animation bound to a canvas. Dropping it stops the animation and
/// detaches every listener.
pub struct MountedAnimation {
	canvas: HtmlCanvasElement,
	instance: Rc<RefCell<dyn Instance>>,
	frame: FrameCallback,
	observer: IntersectionObserver,
	_on_visibility: Closure<dyn FnMut(Array)>,
	on_resize: Closure<dyn FnMut()>,
	pointer_listeners: Vec<(&'static str, Closure<dyn FnMut(MouseEvent)>)>,
}

impl MountedAnimation {
	/// The canvas this animation draws on.
	pub fn canvas(&self) -> &HtmlCanvasElement {
		&self.canvas
	}

	/// Whether the canvas is currently on screen and keeping a frame chain alive.
	pub fn is_animating(&self) -> bool {
		// Only a running frame callback holds the borrow.
		self.instance
			.try_borrow()
			.map(|instance| instance.is_visible())
			.unwrap_or(true)
	}
}

impl Drop for MountedAnimation {
	fn drop(&mut self) {
		self.observer.disconnect();
		if let Some(window) = web_sys::window() {
			let _ = window.remove_event_listener_with_callback(
				"resize",
				self.on_resize.as_ref().unchecked_ref(),
			);
		}
		for (event, cb) in &self.pointer_listeners {
			let _ = self
				.canvas
				.remove_event_listener_with_callback(event, cb.as_ref().unchecked_ref());
		}
		if let Ok(mut instance) = self.instance.try_borrow_mut() {
			instance.set_visible(false);
		}
		// Breaks the callback -> instance -> scheduler -> callback cycle.
		self.frame.borrow_mut().take();
	}
}

/// Mounts `effect` on `canvas`. `None` if the canvas has no 2D context or the
/// browser lacks the required APIs.
pub fn mount_effect(canvas: HtmlCanvasElement, effect: AmbientEffect) -> Option<MountedAnimation> {
	let (w, h) = fit_to_container(&canvas);
	match effect {
		AmbientEffect::Network(config) => {
			mount(canvas, ParticleNetwork::new(config, w, h, browser_rng()))
		}
		AmbientEffect::Spiral(config) => {
			mount(canvas, SpiralParticles::new(config, w, h, browser_rng()))
		}
		AmbientEffect::Bars => mount(canvas, VerticalBars::new(w, h, browser_rng())),
	}
}

/// Mounts an already-populated animation on `canvas`.
pub fn mount<A: Animation + 'static>(
	canvas: HtmlCanvasElement,
	animation: A,
) -> Option<MountedAnimation> {
	let window: Window = web_sys::window()?;
	let ctx: CanvasRenderingContext2d = canvas.get_context("2d").ok()??.dyn_into().ok()?;

	let frame: FrameCallback = Rc::new(RefCell::new(None));
	let scheduler = AnimationFrames {
		window: window.clone(),
		callback: frame.clone(),
	};
	let instance: Rc<RefCell<dyn Instance>> =
		Rc::new(RefCell::new(AnimationLoop::new(animation, ctx, scheduler)));

	let instance_frame = instance.clone();
	*frame.borrow_mut() = Some(Closure::new(move || {
		instance_frame.borrow_mut().on_frame();
	}));

	let instance_vis = instance.clone();
	let on_visibility = Closure::<dyn FnMut(Array)>::new(move |entries: Array| {
		for entry in entries.iter() {
			if let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() {
				instance_vis.borrow_mut().set_visible(entry.is_intersecting());
			}
		}
	});
	let options = IntersectionObserverInit::new();
	options.set_threshold(&JsValue::from_f64(VISIBILITY_THRESHOLD));
	let observer =
		IntersectionObserver::new_with_options(on_visibility.as_ref().unchecked_ref(), &options)
			.ok()?;
	observer.observe(&canvas);

	let (instance_resize, canvas_resize) = (instance.clone(), canvas.clone());
	let on_resize = Closure::<dyn FnMut()>::new(move || {
		let (w, h) = fit_to_container(&canvas_resize);
		instance_resize.borrow_mut().resize(w, h);
	});
	let _ = window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());

	let mut pointer_listeners = Vec::new();
	if instance.borrow().tracks_pointer() {
		let (instance_mm, canvas_mm) = (instance.clone(), canvas.clone());
		let on_mousemove = Closure::<dyn FnMut(MouseEvent)>::new(move |ev: MouseEvent| {
			let rect = canvas_mm.get_bounding_client_rect();
			let (x, y) = (
				ev.client_x() as f64 - rect.left(),
				ev.client_y() as f64 - rect.top(),
			);
			instance_mm.borrow_mut().set_pointer(Some((x, y)));
		});

		let instance_ml = instance.clone();
		let on_mouseleave = Closure::<dyn FnMut(MouseEvent)>::new(move |_: MouseEvent| {
			instance_ml.borrow_mut().set_pointer(None);
		});

		pointer_listeners.push(("mousemove", on_mousemove));
		pointer_listeners.push(("mouseleave", on_mouseleave));
		for (event, cb) in &pointer_listeners {
			let _ = canvas.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref());
		}
	}

	log::debug!(
		"ambient: mounted on #{} ({}x{})",
		canvas.id(),
		canvas.width(),
		canvas.height()
	);

	Some(MountedAnimation {
		canvas,
		instance,
		frame,
		observer,
		_on_visibility: on_visibility,
		on_resize,
		pointer_listeners,
	})
}
