//! Effect selection and the per-page presets.

use std::collections::HashMap;

use serde::Deserialize;

use super::color::Color;
use super::network::NetworkConfig;
use super::spiral::SpiralConfig;

/// Which animation to run on a canvas, with its configuration.
///
/// Deserializes from `{"kind": "network" | "spiral" | "bars", ...options}`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum AmbientEffect {
	/// Drifting particles joined by fading lines.
	Network(NetworkConfig),
	/// Particles orbiting an off-center point.
	Spiral(SpiralConfig),
	/// Equalizer bars; not configurable.
	Bars,
}

impl Default for AmbientEffect {
	fn default() -> Self {
		Self::Network(NetworkConfig::default())
	}
}

/// Canvas ids the landing page ships with, paired with their effects.
pub fn page_presets() -> Vec<(&'static str, AmbientEffect)> {
	vec![
		(
			"heroCanvas",
			AmbientEffect::Network(NetworkConfig {
				particle_count: 100,
				particle_color: Color::rgba(140, 160, 200, 0.5),
				line_color: Color::rgba(140, 160, 200, 0.15),
				particle_radius: 2.0,
				line_distance: 160.0,
				speed: 0.25,
				interactive: true,
			}),
		),
		(
			"governanceCanvas",
			AmbientEffect::Network(NetworkConfig {
				particle_count: 50,
				particle_color: Color::rgba(100, 130, 180, 0.3),
				line_color: Color::rgba(100, 130, 180, 0.08),
				particle_radius: 1.5,
				line_distance: 130.0,
				speed: 0.15,
				interactive: false,
			}),
		),
		(
			"empowerCanvas",
			AmbientEffect::Spiral(SpiralConfig {
				particle_count: 250,
				color: Color::rgb(255, 107, 107),
				speed: 0.004,
			}),
		),
		("metricsCanvas", AmbientEffect::Bars),
		(
			"ctaCanvas",
			AmbientEffect::Network(NetworkConfig {
				particle_count: 60,
				particle_color: Color::rgba(255, 107, 107, 0.25),
				line_color: Color::rgba(255, 107, 107, 0.08),
				particle_radius: 1.5,
				line_distance: 140.0,
				speed: 0.2,
				interactive: false,
			}),
		),
	]
}

/// Applies JSON overrides (canvas id to effect) on top of the presets.
///
/// Overrides replace the preset for an existing id; unknown ids are appended
/// in sorted order so mounting stays deterministic.
pub fn merge_overrides(
	presets: Vec<(&'static str, AmbientEffect)>,
	mut overrides: HashMap<String, AmbientEffect>,
) -> Vec<(String, AmbientEffect)> {
	let mut merged: Vec<(String, AmbientEffect)> = presets
		.into_iter()
		.map(|(id, effect)| {
			let effect = overrides.remove(id).unwrap_or(effect);
			(id.to_string(), effect)
		})
		.collect();

	let mut extra: Vec<(String, AmbientEffect)> = overrides.into_iter().collect();
	extra.sort_by(|a, b| a.0.cmp(&b.0));
	merged.extend(extra);
	merged
}

/// Parses the override block. Malformed JSON yields `None`.
pub fn parse_overrides(json: &str) -> Option<HashMap<String, AmbientEffect>> {
	match serde_json::from_str(json) {
		Ok(overrides) => Some(overrides),
		Err(e) => {
			log::warn!("ambient: ignoring malformed effect overrides: {e}");
			None
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn presets_cover_page_canvases() {
		let ids: Vec<&str> = page_presets().iter().map(|(id, _)| *id).collect();
		assert_eq!(
			ids,
			[
				"heroCanvas",
				"governanceCanvas",
				"empowerCanvas",
				"metricsCanvas",
				"ctaCanvas"
			]
		);
	}

	#[test]
	fn tagged_json_selects_effect() {
		let overrides = parse_overrides(
			r##"{
				"heroCanvas": {"kind": "network", "particleCount": 12, "interactive": false},
				"footerCanvas": {"kind": "spiral", "color": "#00ff00"},
				"bandCanvas": {"kind": "bars"}
			}"##,
		)
		.unwrap();

		assert_eq!(
			overrides["heroCanvas"],
			AmbientEffect::Network(NetworkConfig {
				particle_count: 12,
				interactive: false,
				..NetworkConfig::default()
			})
		);
		assert_eq!(
			overrides["footerCanvas"],
			AmbientEffect::Spiral(SpiralConfig {
				color: Color::rgb(0, 255, 0),
				..SpiralConfig::default()
			})
		);
		assert_eq!(overrides["bandCanvas"], AmbientEffect::Bars);
	}

	#[test]
	fn malformed_overrides_are_ignored() {
		assert!(parse_overrides("{ not json").is_none());
		assert!(parse_overrides(r#"{"x": {"kind": "confetti"}}"#).is_none());
	}

	#[test]
	fn overrides_replace_and_extend_presets() {
		let mut overrides = HashMap::new();
		overrides.insert("metricsCanvas".to_string(), AmbientEffect::default());
		overrides.insert("zCanvas".to_string(), AmbientEffect::Bars);
		overrides.insert("aCanvas".to_string(), AmbientEffect::Bars);

		let merged = merge_overrides(page_presets(), overrides);
		let ids: Vec<&str> = merged.iter().map(|(id, _)| id.as_str()).collect();
		assert_eq!(
			ids,
			[
				"heroCanvas",
				"governanceCanvas",
				"empowerCanvas",
				"metricsCanvas",
				"ctaCanvas",
				"aCanvas",
				"zCanvas"
			]
		);
		assert_eq!(merged[3].1, AmbientEffect::default());
	}
}
