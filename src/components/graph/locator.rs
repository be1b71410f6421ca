//! Off-screen locators.
//!
//! A vertex that the current transform maps outside the plot area gets a small
//! arrow pinned to the viewport edge, pointing from the center toward it.
//! Locators are recomputed on every frame and never cached.

use std::borrow::Cow;

use super::reconcile::Keyed;
use super::theme::Color;
use super::viewport::Transform;

/// Drawn vertex radius, in pixels, that maps to a locator scale of 1.
pub const DEFAULT_RADIUS: f64 = 5.0;

/// A vertex as seen by the locator calculator.
#[derive(Clone, Debug, PartialEq)]
pub struct LocatorTarget {
	/// Vertex id, reused as the locator key.
	pub id: String,
	/// Data-space x.
	pub x: f64,
	/// Data-space y.
	pub y: f64,
	/// Radius of the drawn circle in pixels.
	pub radius: f64,
	/// Vertex fill, copied to the locator.
	pub color: Color,
}

/// Edge indicator for one off-screen vertex.
#[derive(Clone, Debug, PartialEq)]
pub struct Locator {
	/// Id of the vertex this locator points at.
	pub id: String,
	/// Boundary x in plot-area pixels.
	pub x: f64,
	/// Boundary y in plot-area pixels.
	pub y: f64,
	/// Direction from the viewport center, in degrees.
	pub rotation: f64,
	/// Arrow size multiplier: drawn radius over [`DEFAULT_RADIUS`].
	pub scale: f64,
	/// Fill of the vertex.
	pub color: Color,
}

impl Keyed for Locator {
	fn key(&self) -> Cow<'_, str> {
		Cow::Borrowed(&self.id)
	}
}

/// Whether a circle at screen `(sx, sy)` with screen radius `r` lies fully in `width x height`.
fn fully_inside(sx: f64, sy: f64, r: f64, width: f64, height: f64) -> bool {
	sx - r >= 0.0 && sx + r <= width && sy - r >= 0.0 && sy + r <= height
}

/// Clamps a center-relative offset to the inset rectangle. Returns center-relative coordinates.
fn clamp_to_edge(dx: f64, dy: f64, width: f64, height: f64, inset: f64) -> (f64, f64) {
	let half_w = (width / 2.0 - inset).max(0.0);
	let half_h = (height / 2.0 - inset).max(0.0);
	if dx == 0.0 && dy == 0.0 {
		return (0.0, -half_h);
	}
	if dx.abs() * height <= dy.abs() * width {
		let x = (dx * half_h / dy.abs()).clamp(-half_w, half_w);
		(x, half_h.copysign(dy))
	} else {
		let y = (dy * half_w / dx.abs()).clamp(-half_h, half_h);
		(half_w.copysign(dx), y)
	}
}

/// Computes locators for every target the transform maps outside `width x height`.
///
/// Targets without a finite position are skipped. An empty viewport has no
/// edge to pin to and yields no locators.
pub fn compute(targets: &[LocatorTarget], transform: &Transform, width: f64, height: f64, inset: f64) -> Vec<Locator> {
	if !(width > 0.0 && height > 0.0) {
		return Vec::new();
	}
	let (cx, cy) = (width / 2.0, height / 2.0);
	targets
		.iter()
		.filter(|t| t.x.is_finite() && t.y.is_finite())
		.filter_map(|target| {
			let (sx, sy) = transform.apply(target.x, target.y);
			if fully_inside(sx, sy, target.radius, width, height) {
				return None;
			}
			let (x, y) = clamp_to_edge(sx - cx, sy - cy, width, height, inset);
			Some(Locator {
				id: target.id.clone(),
				x: cx + x,
				y: cy + y,
				rotation: y.atan2(x).to_degrees(),
				scale: target.radius / DEFAULT_RADIUS,
				color: target.color,
			})
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	const W: f64 = 800.0;
	const H: f64 = 600.0;
	const INSET: f64 = 12.0;

	fn target(id: &str, x: f64, y: f64) -> LocatorTarget {
		LocatorTarget {
			id: id.into(),
			x,
			y,
			radius: DEFAULT_RADIUS,
			color: Color::rgb(255, 0, 0),
		}
	}

	fn on_boundary(l: &Locator) -> bool {
		let near = |a: f64, b: f64| (a - b).abs() < 1e-9;
		let in_x = l.x >= INSET - 1e-9 && l.x <= W - INSET + 1e-9;
		let in_y = l.y >= INSET - 1e-9 && l.y <= H - INSET + 1e-9;
		in_x && in_y && (near(l.x, INSET) || near(l.x, W - INSET) || near(l.y, INSET) || near(l.y, H - INSET))
	}

	#[test]
	fn visible_vertices_emit_nothing() {
		let t = Transform::new(W / 2.0, H / 2.0, 1.0);
		let targets = [target("a", 0.0, 0.0), target("b", 390.0, 290.0), target("c", -390.0, -290.0)];
		assert!(compute(&targets, &t, W, H, INSET).is_empty());
	}

	#[test]
	fn partially_clipped_vertex_gets_a_locator() {
		let t = Transform::new(W / 2.0, H / 2.0, 1.0);
		let locators = compute(&[target("edge", 398.0, 0.0)], &t, W, H, INSET);
		assert_eq!(locators.len(), 1);
		assert_eq!((locators[0].x, locators[0].y), (W - INSET, H / 2.0));
		assert_eq!(locators[0].rotation, 0.0);
	}

	#[test]
	fn offscreen_vertices_clamp_to_the_boundary() {
		let t = Transform::new(W / 2.0, H / 2.0, 2.0);
		let targets = [
			target("right", 1000.0, 10.0),
			target("above", 5.0, -2000.0),
			target("below-left", -900.0, 700.0),
			target("corner", 4000.0, 3000.0),
		];
		let locators = compute(&targets, &t, W, H, INSET);
		assert_eq!(locators.len(), targets.len());
		for l in &locators {
			assert!(on_boundary(l), "{l:?} is not on the boundary");
		}
		let above = &locators[1];
		assert!((above.y - INSET).abs() < 1e-9);
		assert!((above.rotation + 90.0).abs() < 1.0);
	}

	#[test]
	fn vertical_clamp_follows_aspect_ratio() {
		// Slope exactly matching the viewport diagonal uses the vertical clamp.
		let (dx, dy) = clamp_to_edge(400.0, 300.0, W, H, 0.0);
		assert_eq!((dx, dy), (400.0, 300.0));
		let (dx, dy) = clamp_to_edge(401.0, 300.0, W, H, 0.0);
		assert_eq!(dx, 400.0);
		assert!(dy < 300.0);
	}

	#[test]
	fn centered_target_clamps_to_top() {
		assert_eq!(clamp_to_edge(0.0, 0.0, W, H, INSET), (0.0, -(H / 2.0 - INSET)));
		// A huge vertex at the center overflows the viewport but still has a direction.
		let mut big = target("big", 0.0, 0.0);
		big.radius = 1000.0;
		let t = Transform::new(W / 2.0, H / 2.0, 1.0);
		let locators = compute(&[big], &t, W, H, INSET);
		assert_eq!((locators[0].x, locators[0].y), (W / 2.0, INSET));
		assert!((locators[0].rotation + 90.0).abs() < 1e-9);
		assert_eq!(locators[0].scale, 200.0);
	}

	#[test]
	fn drawn_radius_decides_clipping_when_zoomed_out() {
		// At k = 0.1 a 2.5px circle one pixel from the edge is clipped.
		let t = Transform::new(W / 2.0, H / 2.0, 0.1);
		let mut clipped = target("clipped", 3990.0, 0.0);
		clipped.radius = 2.5;
		let locators = compute(&[clipped], &t, W, H, INSET);
		assert_eq!(locators.len(), 1);
		assert_eq!(locators[0].scale, 0.5);
	}

	#[test]
	fn empty_viewport_has_no_locators() {
		let t = Transform::new(W / 2.0, 0.0, 1.0);
		let level = [target("level", 1000.0, 0.0), target("far", -5000.0, 40.0)];
		assert!(compute(&level, &t, W, 0.0, INSET).is_empty());
		assert!(compute(&level, &t, 0.0, H, INSET).is_empty());
		assert!(compute(&level, &t, f64::NAN, H, INSET).is_empty());
	}

	#[test]
	fn unplaced_vertices_are_skipped() {
		let t = Transform::default();
		assert!(compute(&[target("nan", f64::NAN, 0.0)], &t, W, H, INSET).is_empty());
	}
}
