//! Drawing-surface geometry: canvas size, margins, viewBox and content bounds.

use serde::Deserialize;

/// Space reserved around the plot area, in pixels.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Margin {
	/// Top margin.
	pub top: f64,
	/// Right margin.
	pub right: f64,
	/// Bottom margin.
	pub bottom: f64,
	/// Left margin.
	pub left: f64,
}

impl Margin {
	/// Same margin on every side.
	pub const fn uniform(px: f64) -> Self {
		Self {
			top: px,
			right: px,
			bottom: px,
			left: px,
		}
	}
}

impl Default for Margin {
	fn default() -> Self {
		Self::uniform(20.0)
	}
}

/// Requested surface size.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct SizeConfig {
	/// Surface width in pixels.
	pub width: f64,
	/// Surface height in pixels.
	pub height: f64,
	/// Margins inside the surface.
	pub margin: Margin,
}

impl Default for SizeConfig {
	fn default() -> Self {
		Self {
			width: 800.0,
			height: 600.0,
			margin: Margin::default(),
		}
	}
}

/// Resolved surface geometry. A pure function of [`SizeConfig`].
#[derive(Clone, Debug, PartialEq)]
pub struct Geometry {
	/// Outer surface width in pixels.
	pub width: f64,
	/// Outer surface height in pixels.
	pub height: f64,
	/// Margins copied from the config.
	pub margin: Margin,
	/// Plot area width (outer width minus horizontal margins, never negative).
	pub inner_width: f64,
	/// Plot area height (outer height minus vertical margins, never negative).
	pub inner_height: f64,
	/// SVG-style `viewBox` attribute for the outer surface.
	pub view_box: String,
}

impl Geometry {
	/// Resolves `config`, treating negative sizes as zero.
	pub fn new(config: &SizeConfig) -> Self {
		let width = config.width.max(0.0);
		let height = config.height.max(0.0);
		let margin = config.margin;
		Self {
			width,
			height,
			margin,
			inner_width: (width - margin.left - margin.right).max(0.0),
			inner_height: (height - margin.top - margin.bottom).max(0.0),
			view_box: format!("0 0 {} {}", width, height),
		}
	}

	/// Recomputes for a new outer size, keeping the margins.
	pub fn resized(&self, width: f64, height: f64) -> Self {
		Self::new(&SizeConfig {
			width,
			height,
			margin: self.margin,
		})
	}

	/// Top-left corner of the plot area in surface pixels.
	pub fn origin(&self) -> (f64, f64) {
		(self.margin.left, self.margin.top)
	}
}

/// Axis-aligned bounding box in data space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
	/// Left edge.
	pub x_min: f64,
	/// Right edge.
	pub x_max: f64,
	/// Top edge.
	pub y_min: f64,
	/// Bottom edge.
	pub y_max: f64,
}

impl Bounds {
	/// Box from its four edges.
	pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
		Self {
			x_min,
			x_max,
			y_min,
			y_max,
		}
	}

	/// Smallest box containing every finite point. `None` when there are none.
	pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Option<Self> {
		points
			.into_iter()
			.filter(|(x, y)| x.is_finite() && y.is_finite())
			.fold(None, |acc: Option<Bounds>, (x, y)| {
				Some(match acc {
					None => Bounds::new(x, x, y, y),
					Some(b) => Bounds::new(b.x_min.min(x), b.x_max.max(x), b.y_min.min(y), b.y_max.max(y)),
				})
			})
	}

	/// Horizontal extent.
	pub fn width(&self) -> f64 {
		self.x_max - self.x_min
	}

	/// Vertical extent.
	pub fn height(&self) -> f64 {
		self.y_max - self.y_min
	}

	/// Midpoint of the box.
	pub fn center(&self) -> (f64, f64) {
		((self.x_min + self.x_max) / 2.0, (self.y_min + self.y_max) / 2.0)
	}

	/// Grows the box by `amount` on every side.
	pub fn inflate(&self, amount: f64) -> Self {
		Bounds::new(
			self.x_min - amount,
			self.x_max + amount,
			self.y_min - amount,
			self.y_max + amount,
		)
	}

	/// True when the box has no area and no length, or is not finite.
	pub fn is_degenerate(&self) -> bool {
		let (w, h) = (self.width(), self.height());
		!(w.is_finite() && h.is_finite()) || (w <= 0.0 && h <= 0.0)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn geometry_subtracts_margins() {
		let g = Geometry::new(&SizeConfig::default());
		assert_eq!((g.inner_width, g.inner_height), (760.0, 560.0));
		assert_eq!(g.view_box, "0 0 800 600");
		assert_eq!(g.origin(), (20.0, 20.0));
	}

	#[test]
	fn oversized_margins_clamp_to_zero() {
		let g = Geometry::new(&SizeConfig {
			width: 30.0,
			height: 30.0,
			margin: Margin::uniform(20.0),
		});
		assert_eq!((g.inner_width, g.inner_height), (0.0, 0.0));
	}

	#[test]
	fn bounds_from_points_skips_non_finite() {
		let b = Bounds::from_points([(1.0, 2.0), (f64::NAN, 0.0), (-3.0, 5.0)]).unwrap();
		assert_eq!(b, Bounds::new(-3.0, 1.0, 2.0, 5.0));
		assert_eq!(Bounds::from_points(std::iter::empty()), None);
	}

	#[test]
	fn degenerate_bounds() {
		assert!(Bounds::new(1.0, 1.0, 2.0, 2.0).is_degenerate());
		assert!(!Bounds::new(0.0, 4.0, 2.0, 2.0).is_degenerate());
		assert!(Bounds::new(0.0, f64::INFINITY, 0.0, 1.0).is_degenerate());
	}
}
