//! Structured RGBA color with CSS parsing.
//!
//! Opacity is a separate numeric channel, so fading a line is
//! `color.with_alpha(a)` rather than rewriting the alpha inside a CSS string.

use serde::Deserialize;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Alpha in `[0, 1]`.
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with explicit alpha.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same channels, replaced alpha (clamped to `[0, 1]`).
	pub fn with_alpha(self, a: f64) -> Self {
		Self {
			a: a.clamp(0.0, 1.0),
			..self
		}
	}

	/// Parses a CSS color string.
	/// Supports hex (`#RGB`, `#RRGGBB`) and `rgb()`/`rgba()` functional notation.
	pub fn parse(color_str: &str) -> Option<Self> {
		let s = color_str.trim();
		if let Some(hex) = s.strip_prefix('#') {
			return Self::parse_hex(hex);
		}

		let body = s
			.strip_prefix("rgba(")
			.or_else(|| s.strip_prefix("rgb("))?
			.strip_suffix(')')?;
		let parts: Vec<&str> = body.split(',').map(str::trim).collect();
		if !(3..=4).contains(&parts.len()) {
			return None;
		}

		let channel = |s: &str| -> Option<u8> {
			let v: f64 = s.parse().ok()?;
			v.is_finite().then(|| v.round().clamp(0.0, 255.0) as u8)
		};
		let alpha = match parts.get(3) {
			Some(a) => {
				let a: f64 = a.parse().ok()?;
				if !a.is_finite() {
					return None;
				}
				a.clamp(0.0, 1.0)
			}
			None => 1.0,
		};

		Some(Self::rgba(
			channel(parts[0])?,
			channel(parts[1])?,
			channel(parts[2])?,
			alpha,
		))
	}

	fn parse_hex(hex: &str) -> Option<Self> {
		if !hex.is_ascii() {
			return None;
		}
		match hex.len() {
			3 => {
				let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
				Some(Self::rgb(nibble(0)?, nibble(1)?, nibble(2)?))
			}
			6 => {
				let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
				Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?))
			}
			_ => None,
		}
	}

	/// CSS representation; opaque colors use hex.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

impl TryFrom<String> for Color {
	type Error = String;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::parse(&value).ok_or_else(|| format!("unrecognized color `{value}`"))
	}
}
