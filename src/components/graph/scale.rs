//! Zoom-dependent sizing for rendered records.
//!
//! Records are emitted in screen pixels, so every size here answers one
//! question: at zoom `k`, how many pixels should this element take?
//!
//! # Scaling Behaviors
//!
//! - [`ScaleBehavior::World`]: size is fixed in data units and grows with zoom.
//! - [`ScaleBehavior::Screen`]: size is fixed in pixels.
//! - [`ScaleBehavior::Clamped`]: grows with zoom, but stays within a pixel range.

/// How a size reacts to the zoom level.
#[derive(Clone, Debug, PartialEq)]
pub enum ScaleBehavior {
	/// Fixed in data units.
	World,
	/// Fixed in pixels.
	Screen,
	/// Scales with zoom within a pixel range.
	Clamped {
		/// Smallest size in pixels.
		min_screen: f64,
		/// Largest size in pixels.
		max_screen: f64,
	},
}

impl ScaleBehavior {
	/// Pixel size of an element whose base size is `base` at zoom `k`.
	pub fn pixels(&self, base: f64, k: f64) -> f64 {
		match self {
			ScaleBehavior::World => base * k,
			ScaleBehavior::Screen => base,
			ScaleBehavior::Clamped {
				min_screen,
				max_screen,
			} => (base * k).clamp(*min_screen, *max_screen),
		}
	}
}

/// How an opacity multiplier reacts to the zoom level.
#[derive(Clone, Debug, PartialEq)]
pub enum AlphaBehavior {
	/// Always 1.
	Constant,
	/// Invisible at `zero_alpha_k` and below, opaque from `full_alpha_k` up.
	Fade {
		/// Zoom at which the multiplier reaches 0.
		zero_alpha_k: f64,
		/// Zoom at which the multiplier reaches 1.
		full_alpha_k: f64,
	},
}

impl AlphaBehavior {
	/// Opacity multiplier at zoom `k`.
	pub fn apply(&self, k: f64) -> f64 {
		match self {
			AlphaBehavior::Constant => 1.0,
			AlphaBehavior::Fade {
				zero_alpha_k,
				full_alpha_k,
			} => {
				if zero_alpha_k == full_alpha_k {
					return 1.0;
				}
				((k - zero_alpha_k) / (full_alpha_k - zero_alpha_k)).clamp(0.0, 1.0)
			}
		}
	}
}

/// Vertex sizing.
#[derive(Clone, Debug)]
pub struct NodeScaleConfig {
	/// Radius in data units for vertices without an explicit radius.
	pub radius: f64,
	/// How the radius follows the zoom.
	pub radius_behavior: ScaleBehavior,
	/// Extra pixels around a vertex that still count as a hit.
	pub hit_slop: f64,
	/// Label font size in pixels at `k = 1`.
	pub label_size: f64,
	/// Label font stops shrinking below this zoom.
	pub label_min_k: f64,
	/// Label opacity by zoom.
	pub label_alpha: AlphaBehavior,
}

/// Edge sizing.
#[derive(Clone, Debug)]
pub struct EdgeScaleConfig {
	/// Line width in pixels for edges without an explicit width.
	pub line_width: f64,
	/// How the line width follows the zoom.
	pub width_behavior: ScaleBehavior,
}

/// Arrowhead sizing on directed edges.
#[derive(Clone, Debug)]
pub struct ArrowScaleConfig {
	/// Arrowhead length in data units.
	pub size: f64,
	/// How the arrowhead length follows the zoom.
	pub size_behavior: ScaleBehavior,
	/// Arrowhead opacity by zoom.
	pub alpha_behavior: AlphaBehavior,
	/// Arrows fainter than this are not emitted.
	pub cull_alpha: f64,
}

/// Selection and hover ring sizing, in pixels.
#[derive(Clone, Debug)]
pub struct RingScaleConfig {
	/// Ring stroke width.
	pub width: f64,
	/// Gap between the vertex rim and the ring.
	pub offset: f64,
	/// Radius multiplier for the hovered vertex at full intensity.
	pub hovered_growth: f64,
	/// Radius multiplier for its neighbours at full intensity.
	pub neighbor_growth: f64,
}

/// Complete scale configuration.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	/// Vertex sizing.
	pub node: NodeScaleConfig,
	/// Edge sizing.
	pub edge: EdgeScaleConfig,
	/// Arrowhead sizing.
	pub arrow: ArrowScaleConfig,
	/// Ring sizing.
	pub ring: RingScaleConfig,
	/// Locator arrow length in pixels at scale 1.
	pub locator_size: f64,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			node: NodeScaleConfig {
				radius: 5.0,
				radius_behavior: ScaleBehavior::Clamped {
					min_screen: 2.5,
					max_screen: f64::INFINITY,
				},
				hit_slop: 4.0,
				label_size: 10.0,
				label_min_k: 0.5,
				label_alpha: AlphaBehavior::Fade {
					zero_alpha_k: 0.3,
					full_alpha_k: 0.6,
				},
			},
			edge: EdgeScaleConfig {
				line_width: 1.5,
				width_behavior: ScaleBehavior::Screen,
			},
			arrow: ArrowScaleConfig {
				size: 5.0,
				size_behavior: ScaleBehavior::Clamped {
					min_screen: 0.0,
					max_screen: 18.0,
				},
				alpha_behavior: AlphaBehavior::Fade {
					zero_alpha_k: 0.2,
					full_alpha_k: 1.0,
				},
				cull_alpha: 0.05,
			},
			ring: RingScaleConfig {
				width: 1.5,
				offset: 2.0,
				hovered_growth: 1.4,
				neighbor_growth: 1.25,
			},
			locator_size: 10.0,
		}
	}
}

/// Pixel sizes for one zoom level.
///
/// Built once per frame and shared by every record builder.
#[derive(Clone, Debug)]
pub struct ScaledValues {
	/// Zoom level these values were built for.
	pub k: f64,
	/// Radius in pixels of a vertex with the default radius.
	pub node_radius: f64,
	/// CSS font for vertex labels.
	pub label_font: String,
	/// Label font size in pixels.
	pub label_size: f64,
	/// Label opacity multiplier.
	pub label_alpha: f64,
	/// Default edge width in pixels.
	pub edge_width: f64,
	/// Arrowhead length in pixels.
	pub arrow_size: f64,
	/// Arrowhead opacity multiplier.
	pub arrow_alpha: f64,
	/// Arrowheads are skipped at this zoom.
	pub cull_arrows: bool,
	/// Ring stroke width in pixels.
	pub ring_width: f64,
	/// Ring gap in pixels.
	pub ring_offset: f64,
	/// See [`RingScaleConfig::hovered_growth`].
	pub hovered_growth: f64,
	/// See [`RingScaleConfig::neighbor_growth`].
	pub neighbor_growth: f64,
	/// Locator arrow length in pixels.
	pub locator_size: f64,
	radius_behavior: ScaleBehavior,
	width_behavior: ScaleBehavior,
	hit_slop: f64,
}

impl ScaledValues {
	/// Evaluates every behavior in `config` at zoom `k`.
	pub fn new(config: &ScaleConfig, k: f64) -> Self {
		let label_size = config.node.label_size * k.max(config.node.label_min_k).min(1.0);
		let arrow_alpha = config.arrow.alpha_behavior.apply(k);
		Self {
			k,
			node_radius: config.node.radius_behavior.pixels(config.node.radius, k),
			label_font: format!("{label_size}px sans-serif"),
			label_size,
			label_alpha: config.node.label_alpha.apply(k),
			edge_width: config.edge.width_behavior.pixels(config.edge.line_width, k),
			arrow_size: config.arrow.size_behavior.pixels(config.arrow.size, k),
			arrow_alpha,
			cull_arrows: arrow_alpha < config.arrow.cull_alpha,
			ring_width: config.ring.width,
			ring_offset: config.ring.offset,
			hovered_growth: config.ring.hovered_growth,
			neighbor_growth: config.ring.neighbor_growth,
			locator_size: config.locator_size,
			radius_behavior: config.node.radius_behavior.clone(),
			width_behavior: config.edge.width_behavior.clone(),
			hit_slop: config.node.hit_slop,
		}
	}

	/// Pixel radius of a vertex with `radius` data units.
	pub fn radius(&self, radius: f64) -> f64 {
		self.radius_behavior.pixels(radius, self.k)
	}

	/// Pixel radius within which a pointer hits a vertex of `radius` data units.
	pub fn hit_radius(&self, radius: f64) -> f64 {
		self.radius(radius) + self.hit_slop
	}

	/// Pixel width of an edge with base width `width`.
	pub fn edge_width(&self, width: f64) -> f64 {
		self.width_behavior.pixels(width, self.k)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn behaviors_map_to_pixels() {
		assert_eq!(ScaleBehavior::World.pixels(5.0, 2.0), 10.0);
		assert_eq!(ScaleBehavior::Screen.pixels(5.0, 2.0), 5.0);
		let clamped = ScaleBehavior::Clamped {
			min_screen: 3.0,
			max_screen: 8.0,
		};
		assert_eq!(clamped.pixels(5.0, 0.1), 3.0);
		assert_eq!(clamped.pixels(5.0, 1.0), 5.0);
		assert_eq!(clamped.pixels(5.0, 4.0), 8.0);
	}

	#[test]
	fn fade_is_clamped() {
		let fade = AlphaBehavior::Fade {
			zero_alpha_k: 0.2,
			full_alpha_k: 0.6,
		};
		assert_eq!(fade.apply(0.1), 0.0);
		assert!((fade.apply(0.4) - 0.5).abs() < 1e-12);
		assert_eq!(fade.apply(3.0), 1.0);
	}

	#[test]
	fn zoomed_out_arrows_are_culled() {
		let config = ScaleConfig::default();
		assert!(ScaledValues::new(&config, 0.1).cull_arrows);
		let near = ScaledValues::new(&config, 2.0);
		assert!(!near.cull_arrows);
		assert_eq!(near.node_radius, 10.0);
		assert_eq!(near.hit_radius(5.0), 14.0);
		assert_eq!(near.label_size, 10.0);
	}
}
