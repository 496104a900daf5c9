//! Leptos component wrapping an ambient canvas.
//!
//! The component renders a canvas that fills its parent and mounts the chosen
//! effect once the element exists. The animation lives as long as the
//! component; unmounting drops it, which cancels any pending frame.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use web_sys::HtmlCanvasElement;

use super::canvas::{MountedAnimation, mount_effect};
use super::effect::AmbientEffect;

/// Renders `effect` on a canvas sized to the parent container.
///
/// Place it inside a positioned element; the canvas takes the parent's
/// offset size and follows window resizes.
#[component]
pub fn AmbientCanvas(
	#[prop(into)] effect: AmbientEffect,
	#[prop(optional, into)] class: Option<String>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let mounted: Rc<RefCell<Option<MountedAnimation>>> = Rc::new(RefCell::new(None));

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let animation = mount_effect(canvas, effect.clone());
		if animation.is_none() {
			log::warn!("ambient: canvas has no 2d context, effect skipped");
		}
		*mounted.borrow_mut() = animation;
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class=class.unwrap_or_else(|| "ambient-canvas".to_string())
			style="display: block; width: 100%; height: 100%; pointer-events: auto;"
		/>
	}
}
