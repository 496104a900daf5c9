//! ambient-canvas: decorative canvas animations for landing pages.
//!
//! This crate provides WASM-based background effects (particle network,
//! spiral particles, equalizer bars) that only animate while their canvas is
//! on screen, plus a bootstrap that finds the page's canvases by id.

use std::collections::HashMap;

use log::{Level, debug, info};
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, HtmlScriptElement, Window};

pub mod components;

pub use components::ambient::{
	AmbientCanvas, AmbientEffect, Color, MountedAnimation, NetworkConfig, SpiralConfig,
	mount_effect,
};

/// Id of the optional JSON block overriding per-canvas effects.
pub const OVERRIDES_SCRIPT_ID: &str = "ambient-config";

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("ambient-canvas: logging initialized");
}

/// Load effect overrides from a script element with id="ambient-config".
/// Expected format: JSON object mapping canvas ids to `{ "kind": ..., ...options }`.
fn load_overrides() -> Option<HashMap<String, AmbientEffect>> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(OVERRIDES_SCRIPT_ID)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	let overrides = components::ambient::parse_overrides(&json_text)?;
	info!("ambient-canvas: loaded {} effect overrides", overrides.len());
	Some(overrides)
}

/// Every animation mounted by [`attach_page_animations`].
///
/// Animations stop when this is dropped; call [`PageAnimations::forget`] to
/// keep them running for the lifetime of the page.
#[derive(Default)]
pub struct PageAnimations {
	mounted: Vec<MountedAnimation>,
}

impl PageAnimations {
	/// Number of canvases that were found and mounted.
	pub fn len(&self) -> usize {
		self.mounted.len()
	}

	/// Whether no canvas was mounted.
	pub fn is_empty(&self) -> bool {
		self.mounted.is_empty()
	}

	/// Ids of the mounted canvases, in mount order.
	pub fn canvas_ids(&self) -> Vec<String> {
		self.mounted.iter().map(|m| m.canvas().id()).collect()
	}

	/// Leaks the animations so they outlive the caller.
	pub fn forget(self) {
		std::mem::forget(self);
	}
}

/// Finds the known canvases on the current page and mounts their effects.
///
/// Canvases that are missing, or are not `<canvas>` elements, are skipped
/// silently.
pub fn attach_page_animations() -> PageAnimations {
	let Some(document) = web_sys::window().and_then(|w| w.document()) else {
		return PageAnimations::default();
	};

	let effects = components::ambient::merge_overrides(
		components::ambient::page_presets(),
		load_overrides().unwrap_or_default(),
	);

	let mounted: Vec<MountedAnimation> = effects
		.into_iter()
		.filter_map(|(id, effect)| {
			let canvas = document
				.get_element_by_id(&id)
				.and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok());
			let Some(canvas) = canvas else {
				debug!("ambient-canvas: #{id} not on this page");
				return None;
			};
			mount_effect(canvas, effect)
		})
		.collect();

	info!("ambient-canvas: {} animations attached", mounted.len());
	PageAnimations { mounted }
}
