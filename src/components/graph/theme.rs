//! Visual theming for the graph.
//!
//! Provides colors, value-to-color colormaps, and the style defaults used when
//! a vertex or link carries no explicit style.

use log::debug;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Opacity in `[0, 1]`.
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with opacity `a`.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same color with opacity `a`.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	/// Linear interpolation between two colors
	pub fn lerp(self, other: Color, t: f64) -> Self {
		let t = t.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * (1.0 - t) + other.r as f64 * t).round() as u8,
			g: (self.g as f64 * (1.0 - t) + other.g as f64 * t).round() as u8,
			b: (self.b as f64 * (1.0 - t) + other.b as f64 * t).round() as u8,
			a: self.a * (1.0 - t) + other.a * t,
		}
	}

	/// Hex notation when opaque, `rgba(...)` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}

	/// Parses a CSS color string.
	/// Supports hex (`#RRGGBB`) and `rgb()`/`rgba()` functional notation;
	/// anything else becomes mid gray.
	pub fn parse(color_str: &str) -> Color {
		let color_str = color_str.trim();
		if color_str.starts_with('#') && color_str.len() == 7 {
			let channel = |range| {
				color_str
					.get(range)
					.and_then(|s| u8::from_str_radix(s, 16).ok())
					.unwrap_or(128)
			};
			Color::rgb(channel(1..3), channel(3..5), channel(5..7))
		} else if color_str.starts_with("rgb") {
			let nums: Vec<&str> = color_str
				.trim_start_matches("rgba(")
				.trim_start_matches("rgb(")
				.trim_end_matches(')')
				.split(',')
				.collect();
			let channel = |i: usize| {
				nums.get(i)
					.and_then(|s| s.trim().parse().ok())
					.unwrap_or(128)
			};
			let a = nums
				.get(3)
				.and_then(|s| s.trim().parse().ok())
				.unwrap_or(1.0);
			Color::rgba(channel(0), channel(1), channel(2), a)
		} else {
			Color::rgb(128, 128, 128)
		}
	}
}

/// Piecewise-linear gradient mapping `[0, 1]` to colors.
#[derive(Clone, Debug, PartialEq)]
pub struct Colormap {
	/// Lookup name of the colormap.
	pub name: &'static str,
	stops: Vec<Color>,
}

impl Colormap {
	/// Resolves a colormap by name. Missing or unknown names get [`Colormap::gray`].
	pub fn resolve(name: Option<&str>) -> Self {
		let Some(name) = name else {
			return Self::gray();
		};
		match name.trim().to_ascii_lowercase().as_str() {
			"viridis" => Self::new(
				"viridis",
				vec![
					Color::rgb(68, 1, 84),
					Color::rgb(59, 82, 139),
					Color::rgb(33, 145, 140),
					Color::rgb(94, 201, 98),
					Color::rgb(253, 231, 37),
				],
			),
			"magma" => Self::new(
				"magma",
				vec![
					Color::rgb(0, 0, 4),
					Color::rgb(81, 18, 124),
					Color::rgb(183, 55, 121),
					Color::rgb(252, 137, 97),
					Color::rgb(252, 253, 191),
				],
			),
			"blues" => Self::new("blues", vec![Color::rgb(247, 251, 255), Color::rgb(8, 48, 107)]),
			"reds" => Self::new("reds", vec![Color::rgb(255, 245, 240), Color::rgb(103, 0, 13)]),
			"greens" => Self::new("greens", vec![Color::rgb(247, 252, 245), Color::rgb(0, 68, 27)]),
			// Muted, harmonious slate blues and teals
			"slate" => Self::new(
				"slate",
				vec![
					Color::rgb(94, 129, 172),
					Color::rgb(100, 148, 160),
					Color::rgb(143, 163, 180),
				],
			),
			// Warm earth tones
			"earth" => Self::new(
				"earth",
				vec![
					Color::rgb(145, 120, 95),
					Color::rgb(180, 136, 100),
					Color::rgb(175, 150, 120),
				],
			),
			"ocean" => Self::new(
				"ocean",
				vec![
					Color::rgb(70, 110, 140),
					Color::rgb(85, 135, 155),
					Color::rgb(100, 145, 160),
				],
			),
			"aurora" => Self::new(
				"aurora",
				vec![
					Color::rgb(100, 145, 135),
					Color::rgb(115, 135, 155),
					Color::rgb(130, 120, 150),
				],
			),
			other => {
				debug!("unknown colormap {other:?}, using gray");
				Self::gray()
			}
		}
	}

	/// Two-stop gray gradient used as the fallback.
	pub fn gray() -> Self {
		Self::new("gray", vec![Color::rgb(217, 217, 217), Color::rgb(64, 64, 64)])
	}

	fn new(name: &'static str, stops: Vec<Color>) -> Self {
		Self { name, stops }
	}

	/// Maps `value` (clamped to `[0, 1]`, NaN treated as 0) to a color.
	pub fn color(&self, value: f64) -> Color {
		let t = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
		let last = self.stops.len() - 1;
		let scaled = t * last as f64;
		let i = (scaled.floor() as usize).min(last.saturating_sub(1));
		if last == 0 {
			return self.stops[0];
		}
		self.stops[i].lerp(self.stops[i + 1], scaled - i as f64)
	}

	/// CSS color for `value`.
	pub fn css(&self, value: f64) -> String {
		self.color(value).to_css()
	}

	/// Boxed `value -> css color` function for callers that only need the mapping.
	pub fn into_fn(self) -> Box<dyn Fn(f64) -> String> {
		Box::new(move |value| self.css(value))
	}
}

/// Edge visual style.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	/// Default edge color.
	pub color: Color,
	/// Edge color when either endpoint is highlighted.
	pub highlight_color: Color,
}

/// Node visual style.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	/// Whether nodes have inner gradients
	pub use_gradient: bool,
	/// Border/stroke width in screen pixels (0 = no border)
	pub border_width: f64,
	/// Border color.
	pub border_color: Color,
	/// Label text color.
	pub label_color: Color,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Theme name.
	pub name: &'static str,
	/// Surface background.
	pub background: Color,
	/// Edge defaults.
	pub edge: EdgeStyle,
	/// Vertex defaults.
	pub node: NodeStyle,
	/// Ring drawn around selected vertices.
	pub selection: Color,
	/// Fill for off-screen locators when the vertex color is unavailable.
	pub locator: Color,
	/// Gradient used for vertices with neither a fill nor a value.
	pub palette: Colormap,
}

impl Theme {
	/// Clean modern theme with subtle effects (default)
	pub fn default_theme() -> Self {
		Self {
			name: "default",
			background: Color::rgb(22, 27, 34),
			edge: EdgeStyle {
				color: Color::rgba(140, 160, 180, 0.5),
				highlight_color: Color::rgba(200, 215, 230, 0.9),
			},
			node: NodeStyle {
				use_gradient: true,
				border_width: 0.0,
				border_color: Color::rgba(255, 255, 255, 0.0),
				label_color: Color::rgba(255, 255, 255, 0.85),
			},
			selection: Color::rgb(255, 196, 0),
			locator: Color::rgba(200, 215, 230, 0.8),
			palette: Colormap::resolve(Some("slate")),
		}
	}

	/// Light background with bordered nodes
	pub fn minimal() -> Self {
		Self {
			name: "minimal",
			background: Color::rgb(250, 250, 250),
			edge: EdgeStyle {
				color: Color::rgba(90, 100, 115, 0.5),
				highlight_color: Color::rgba(30, 40, 55, 0.9),
			},
			node: NodeStyle {
				use_gradient: false,
				border_width: 1.0,
				border_color: Color::rgb(60, 60, 60),
				label_color: Color::rgb(40, 40, 40),
			},
			selection: Color::rgb(230, 81, 0),
			locator: Color::rgba(60, 60, 60, 0.7),
			palette: Colormap::resolve(Some("ocean")),
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::default_theme()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn unknown_or_missing_colormap_is_gray() {
		assert_eq!(Colormap::resolve(None), Colormap::gray());
		assert_eq!(Colormap::resolve(Some("nope")), Colormap::gray());
		assert_eq!(Colormap::resolve(Some("Viridis")).name, "viridis");
	}

	#[test]
	fn colormap_hits_end_stops_and_clamps() {
		let gray = Colormap::gray();
		assert_eq!(gray.css(0.0), "#d9d9d9");
		assert_eq!(gray.css(1.0), "#404040");
		assert_eq!(gray.css(-3.0), gray.css(0.0));
		assert_eq!(gray.css(7.0), gray.css(1.0));
		assert_eq!(gray.css(f64::NAN), gray.css(0.0));
	}

	#[test]
	fn colormap_interpolates_between_stops() {
		let mid = Colormap::gray().color(0.5);
		assert!(mid.r < 217 && mid.r > 64);
		let f = Colormap::resolve(Some("blues")).into_fn();
		assert_eq!(f(0.0), "#f7fbff");
	}

	#[test]
	fn parses_css_colors() {
		assert_eq!(Color::parse("#ff8000"), Color::rgb(255, 128, 0));
		assert_eq!(Color::parse("rgba(1, 2, 3, 0.5)"), Color::rgba(1, 2, 3, 0.5));
		assert_eq!(Color::parse("teal"), Color::rgb(128, 128, 128));
	}
}
