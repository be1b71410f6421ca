//! Render records and painting.
//!
//! Each frame the engine describes what should be on screen as flat records in
//! plot-area pixels: nodes, edges, texts, selection rings and locators. The
//! [`RenderSet`] keeps the live records per layer and reconciles every new
//! frame against them by key, so records that persist keep their transient
//! state (age, used for fade-in) while new ones enter and stale ones exit.
//!
//! Painting is a separate pass over a [`Surface`]:
//! 1. Edges and arrowheads
//! 2. Selection rings
//! 3. Nodes, dimmed ones first, then highlighted ones on top with hover rings
//! 4. Labels
//! 5. Locators

use std::borrow::Cow;

use indexmap::IndexMap;

use super::highlight::HighlightState;
use super::locator::{self, Locator, LocatorTarget};
use super::reconcile::{Keyed, reconcile};
use super::scale::{ScaleConfig, ScaledValues};
use super::theme::{Color, Colormap, Theme};
use super::types::{GraphLink, GraphNode, edge_key};
use super::viewport::Transform;

/// Smooths values that would otherwise cause abrupt visual changes.
fn smooth_step(t: f64) -> f64 {
	let t = t.clamp(0.0, 1.0);
	t * t * (3.0 - 2.0 * t)
}

/// A vertex disc.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeRecord {
	/// Vertex id.
	pub id: String,
	/// Center x in plot-area pixels.
	pub x: f64,
	/// Center y in plot-area pixels.
	pub y: f64,
	/// Drawn radius in pixels, growth included.
	pub radius: f64,
	/// Fill color.
	pub fill: Color,
	/// Border color, if any.
	pub stroke: Option<Color>,
	/// Border width in pixels.
	pub stroke_width: f64,
	/// Dimming multiplier while another vertex is hovered.
	pub opacity: f64,
	/// Smoothed hover/neighbour intensity; highlighted nodes paint last.
	pub highlight: f64,
	/// Hover ring intensity.
	pub ring: f64,
	/// Frames this record has been live.
	pub age: u32,
}

/// A straight edge, shortened to the node rims.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeRecord {
	/// Source vertex id.
	pub source: String,
	/// Target vertex id.
	pub target: String,
	/// Start x, on the source rim.
	pub x1: f64,
	/// Start y, on the source rim.
	pub y1: f64,
	/// End x, on the target rim.
	pub x2: f64,
	/// End y, on the target rim.
	pub y2: f64,
	/// Stroke color.
	pub color: Color,
	/// Line width in pixels.
	pub width: f64,
	/// Present on directed edges.
	pub arrow: Option<Arrowhead>,
	/// Frames this record has been live.
	pub age: u32,
}

/// Triangle at the target end of a directed edge.
#[derive(Clone, Debug, PartialEq)]
pub struct Arrowhead {
	/// Tip first.
	pub points: [(f64, f64); 3],
	/// Alpha multiplier on the edge color; arrows fade out when zoomed out.
	pub alpha: f64,
}

/// A vertex or edge label.
#[derive(Clone, Debug, PartialEq)]
pub struct TextRecord {
	/// `node:<vertex id>` for vertex labels, `link:<edge key>` for edge labels.
	pub id: String,
	/// Label text.
	pub text: String,
	/// Anchor x in plot-area pixels.
	pub x: f64,
	/// Anchor y in plot-area pixels.
	pub y: f64,
	/// CSS font.
	pub font: String,
	/// Text color.
	pub color: Color,
	/// Frames this record has been live.
	pub age: u32,
}

/// A dashed ring around a selected vertex.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectionRecord {
	/// Vertex id.
	pub id: String,
	/// Center x.
	pub x: f64,
	/// Center y.
	pub y: f64,
	/// Ring radius in pixels.
	pub radius: f64,
	/// Ring color.
	pub color: Color,
	/// Stroke width in pixels.
	pub width: f64,
	/// Frames this record has been live.
	pub age: u32,
}

impl Keyed for NodeRecord {
	fn key(&self) -> Cow<'_, str> {
		Cow::Borrowed(&self.id)
	}
}

impl Keyed for EdgeRecord {
	fn key(&self) -> Cow<'_, str> {
		Cow::Owned(edge_key(&self.source, &self.target))
	}
}

impl Keyed for TextRecord {
	fn key(&self) -> Cow<'_, str> {
		Cow::Borrowed(&self.id)
	}
}

impl Keyed for SelectionRecord {
	fn key(&self) -> Cow<'_, str> {
		Cow::Borrowed(&self.id)
	}
}

/// Records describing one frame, before reconciliation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
	/// Vertex discs.
	pub nodes: Vec<NodeRecord>,
	/// Edges.
	pub edges: Vec<EdgeRecord>,
	/// Labels.
	pub texts: Vec<TextRecord>,
	/// Selection rings.
	pub selections: Vec<SelectionRecord>,
	/// Off-screen indicators.
	pub locators: Vec<Locator>,
}

/// Keys that entered and exited one layer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayerDelta {
	/// Keys new in this frame.
	pub entered: Vec<String>,
	/// Number of keys kept.
	pub updated: usize,
	/// Keys gone in this frame.
	pub exited: Vec<String>,
}

impl LayerDelta {
	/// True when no key entered or exited.
	pub fn is_unchanged(&self) -> bool {
		self.entered.is_empty() && self.exited.is_empty()
	}
}

/// Per-layer outcome of [`RenderSet::sync`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderDelta {
	/// Vertex layer.
	pub nodes: LayerDelta,
	/// Edge layer.
	pub edges: LayerDelta,
	/// Label layer.
	pub texts: LayerDelta,
	/// Selection layer.
	pub selections: LayerDelta,
	/// Locator layer.
	pub locators: LayerDelta,
}

impl RenderDelta {
	/// True when every layer kept its key set.
	pub fn is_unchanged(&self) -> bool {
		self.nodes.is_unchanged()
			&& self.edges.is_unchanged()
			&& self.texts.is_unchanged()
			&& self.selections.is_unchanged()
			&& self.locators.is_unchanged()
	}
}

/// Live records per layer, in insertion order and keyed for lookup.
#[derive(Clone, Debug, Default)]
pub struct RenderSet {
	/// Vertex discs by id.
	pub nodes: IndexMap<String, NodeRecord>,
	/// Edges by edge key.
	pub edges: IndexMap<String, EdgeRecord>,
	/// Labels by text id.
	pub texts: IndexMap<String, TextRecord>,
	/// Selection rings by vertex id.
	pub selections: IndexMap<String, SelectionRecord>,
	/// Locators by vertex id.
	pub locators: IndexMap<String, Locator>,
}

fn sync_layer<T, C>(layer: &mut IndexMap<String, T>, next: Vec<T>, carry: C) -> LayerDelta
where
	T: Keyed,
	C: FnMut(&T, &mut T),
{
	let previous: Vec<T> = std::mem::take(layer).into_values().collect();
	let rec = reconcile(previous, next, carry);
	let delta = LayerDelta {
		entered: rec.enter.iter().map(|r| r.key().into_owned()).collect(),
		updated: rec.update.len(),
		exited: rec.exit.iter().map(|r| r.key().into_owned()).collect(),
	};
	*layer = rec
		.into_live()
		.into_iter()
		.map(|r| (r.key().into_owned(), r))
		.collect();
	delta
}

impl RenderSet {
	/// Reconciles every layer against `frame`. Surviving records age by one frame.
	pub fn sync(&mut self, frame: Frame) -> RenderDelta {
		RenderDelta {
			nodes: sync_layer(&mut self.nodes, frame.nodes, |old, new| {
				new.age = old.age.saturating_add(1)
			}),
			edges: sync_layer(&mut self.edges, frame.edges, |old, new| {
				new.age = old.age.saturating_add(1)
			}),
			texts: sync_layer(&mut self.texts, frame.texts, |old, new| {
				new.age = old.age.saturating_add(1)
			}),
			selections: sync_layer(&mut self.selections, frame.selections, |old, new| {
				new.age = old.age.saturating_add(1)
			}),
			locators: sync_layer(&mut self.locators, frame.locators, |_, _| {}),
		}
	}

	/// Drops every record.
	pub fn clear(&mut self) {
		*self = Self::default();
	}

	/// True when nothing would be drawn.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty() && self.edges.is_empty() && self.locators.is_empty()
	}
}

/// Builds the records for one frame from positioned vertices and links.
pub struct FrameBuilder<'a> {
	transform: Transform,
	scale: ScaledValues,
	theme: &'a Theme,
	colormap: &'a Colormap,
	highlight: &'a HighlightState,
	/// `(min, max)` of vertex values, for colormap normalization.
	value_range: Option<(f64, f64)>,
	dim: f64,
	targets: Vec<LocatorTarget>,
	frame: Frame,
}

impl<'a> FrameBuilder<'a> {
	/// Builder for one frame at `transform`.
	pub fn new(
		transform: Transform,
		config: &ScaleConfig,
		theme: &'a Theme,
		colormap: &'a Colormap,
		highlight: &'a HighlightState,
		value_range: Option<(f64, f64)>,
	) -> Self {
		Self {
			transform,
			scale: ScaledValues::new(config, transform.k),
			theme,
			colormap,
			highlight,
			value_range,
			dim: smooth_step(highlight.max_intensity()),
			targets: Vec::new(),
			frame: Frame::default(),
		}
	}

	/// Pixel sizes at this frame's zoom.
	pub fn scale(&self) -> &ScaledValues {
		&self.scale
	}

	/// Fill color: explicit style, then value through the colormap, then the theme palette at `ordinal`.
	pub fn fill(&self, node: &GraphNode, ordinal: f64) -> Color {
		if let Some(fill) = &node.style.fill {
			return Color::parse(fill);
		}
		match (node.value, self.value_range) {
			(Some(value), Some((min, max))) => {
				let t = if max > min { (value - min) / (max - min) } else { 0.5 };
				self.colormap.color(t)
			}
			_ => self.theme.palette.color(ordinal),
		}
	}

	/// Adds a vertex at data position `(x, y)` with a radius of `radius` data units.
	pub fn vertex(&mut self, node: &GraphNode, x: f64, y: f64, radius: f64, fill: Color) {
		if !(x.is_finite() && y.is_finite()) {
			return;
		}
		let (sx, sy) = self.transform.apply(x, y);
		let t = smooth_step(self.highlight.node_intensity(&node.id));
		let ring = smooth_step(self.highlight.ring_intensity(&node.id));

		let dim_alpha = 1.0 - 0.7 * self.dim;
		let dim_radius = 1.0 - 0.15 * self.dim;
		let neighbor = 1.0 + (self.scale.neighbor_growth - 1.0) * t;
		let hovered = 1.0 + (self.scale.hovered_growth - 1.0) * t;
		let grown = neighbor + (hovered - neighbor) * ring;
		let opacity = dim_alpha + (1.0 - dim_alpha) * t;
		let radius_mult = dim_radius + (grown - dim_radius) * t;
		let r = self.scale.radius(radius) * radius_mult;

		let node_style = &self.theme.node;
		let stroke = node
			.style
			.stroke
			.as_deref()
			.map(Color::parse)
			.or((node_style.border_width > 0.0).then_some(node_style.border_color));
		let stroke_width = node.style.stroke_width.unwrap_or(node_style.border_width);

		self.frame.nodes.push(NodeRecord {
			id: node.id.clone(),
			x: sx,
			y: sy,
			radius: r,
			fill,
			stroke,
			stroke_width,
			opacity,
			highlight: t,
			ring,
			age: 0,
		});

		if node.selected {
			self.frame.selections.push(SelectionRecord {
				id: node.id.clone(),
				x: sx,
				y: sy,
				radius: r + self.scale.ring_offset * 2.0,
				color: self.theme.selection,
				width: self.scale.ring_width,
				age: 0,
			});
		}

		if let Some(label) = &node.label {
			let alpha = self.scale.label_alpha.max(t) * opacity;
			if alpha > 0.01 {
				self.frame.texts.push(TextRecord {
					id: format!("node:{}", node.id),
					text: label.clone(),
					x: sx + r + 4.0,
					y: sy + 3.0,
					font: self.scale.label_font.clone(),
					color: self.theme.node.label_color.with_alpha(self.theme.node.label_color.a * alpha),
					age: 0,
				});
			}
		}

		self.targets.push(LocatorTarget {
			id: node.id.clone(),
			x,
			y,
			radius: r,
			color: fill,
		});
	}

	/// Adds an edge between data positions, trimmed by each endpoint's radius in data units.
	#[allow(clippy::too_many_arguments)]
	pub fn edge(
		&mut self,
		source: &str,
		target: &str,
		link: Option<&GraphLink>,
		from: (f64, f64),
		to: (f64, f64),
		source_radius: f64,
		target_radius: f64,
	) {
		let (x1, y1) = self.transform.apply(from.0, from.1);
		let (x2, y2) = self.transform.apply(to.0, to.1);
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if !dist.is_finite() || dist < 0.001 {
			return;
		}
		let (ux, uy) = (dx / dist, dy / dist);
		let r1 = self.scale.radius(source_radius);
		let r2 = self.scale.radius(target_radius);

		let t = smooth_step(self.highlight.edge_intensity(source, target));
		let edge_style = &self.theme.edge;
		let base = link
			.and_then(|l| l.style.stroke.as_deref())
			.map(Color::parse)
			.unwrap_or(edge_style.color);
		let color = if t > 0.01 {
			base.lerp(edge_style.highlight_color, t)
		} else {
			base.with_alpha(base.a * (1.0 - 0.6 * self.dim))
		};
		let base_width = link
			.and_then(|l| l.style.width)
			.map_or(self.scale.edge_width, |w| self.scale.edge_width(w));
		let width = base_width * (1.0 + 0.4 * t);

		let directed = link.is_some_and(|l| l.directed);
		let draw_arrow = directed && !self.scale.cull_arrows;
		let head = if draw_arrow { self.scale.arrow_size } else { 0.0 };
		let arrow = draw_arrow.then(|| {
			let (tip_x, tip_y) = (x2 - ux * r2, y2 - uy * r2);
			let (back_x, back_y) = (tip_x - ux * head, tip_y - uy * head);
			let (px, py) = (-uy * head * 0.5, ux * head * 0.5);
			Arrowhead {
				points: [(tip_x, tip_y), (back_x + px, back_y + py), (back_x - px, back_y - py)],
				alpha: self.scale.arrow_alpha,
			}
		});

		self.frame.edges.push(EdgeRecord {
			source: source.to_owned(),
			target: target.to_owned(),
			x1: x1 + ux * r1,
			y1: y1 + uy * r1,
			x2: x2 - ux * (r2 + head),
			y2: y2 - uy * (r2 + head),
			color,
			width,
			arrow,
			age: 0,
		});

		if let Some(label) = link.and_then(|l| l.label.as_ref()) {
			if self.scale.label_alpha > 0.01 {
				self.frame.texts.push(TextRecord {
					id: format!("link:{}", edge_key(source, target)),
					text: label.clone(),
					x: (x1 + x2) / 2.0,
					y: (y1 + y2) / 2.0 - 4.0,
					font: self.scale.label_font.clone(),
					color: self
						.theme
						.node
						.label_color
						.with_alpha(self.theme.node.label_color.a * self.scale.label_alpha * 0.8),
					age: 0,
				});
			}
		}
	}

	/// Finishes the frame, adding locators for vertices outside `width x height`.
	pub fn finish(mut self, width: f64, height: f64, inset: f64) -> Frame {
		self.frame.locators = locator::compute(&self.targets, &self.transform, width, height, inset);
		self.frame
	}
}

/// Fill, stroke and dash for one drawing call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Paint {
	/// Fill color.
	pub fill: Option<Color>,
	/// Stroke color.
	pub stroke: Option<Color>,
	/// Stroke width in pixels.
	pub line_width: f64,
	/// `(dash, gap)` in pixels; solid when `None`.
	pub dash: Option<(f64, f64)>,
	/// Multiplies the alpha of both fill and stroke.
	pub opacity: f64,
}

impl Paint {
	/// Fill only.
	pub fn fill(color: Color) -> Self {
		Self {
			fill: Some(color),
			opacity: 1.0,
			..Self::default()
		}
	}

	/// Stroke only.
	pub fn stroke(color: Color, line_width: f64) -> Self {
		Self {
			stroke: Some(color),
			line_width,
			opacity: 1.0,
			..Self::default()
		}
	}

	/// Sets the opacity.
	pub fn with_opacity(mut self, opacity: f64) -> Self {
		self.opacity = opacity;
		self
	}

	/// Dashes the stroke.
	pub fn dashed(mut self, dash: f64, gap: f64) -> Self {
		self.dash = Some((dash, gap));
		self
	}
}

/// Drawing backend. Coordinates are surface pixels.
pub trait Surface {
	/// Fills the whole surface with `background`.
	fn clear(&mut self, width: f64, height: f64, background: Color);
	/// Circle centered at `(x, y)`.
	fn circle(&mut self, x: f64, y: f64, radius: f64, paint: &Paint);
	/// Straight segment.
	fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, paint: &Paint);
	/// Closed polygon.
	fn polygon(&mut self, points: &[(f64, f64)], paint: &Paint);
	/// Text anchored at `(x, y)`.
	fn text(&mut self, text: &str, x: f64, y: f64, font: &str, paint: &Paint);
}

/// Options for [`paint`].
#[derive(Clone, Copy, Debug)]
pub struct PaintOptions {
	/// Outer surface size.
	pub width: f64,
	/// Outer surface height.
	pub height: f64,
	/// Plot-area origin inside the surface (the top-left margin).
	pub origin: (f64, f64),
	/// Frames over which new records fade in; 0 disables fading.
	pub fade_in_frames: u32,
	/// Locator arrow length in pixels.
	pub locator_size: f64,
}

fn fade(age: u32, frames: u32) -> f64 {
	if frames == 0 {
		1.0
	} else {
		((age as f64 + 1.0) / frames as f64).min(1.0)
	}
}

/// Paints the live records of `set` onto `surface`.
pub fn paint<S: Surface + ?Sized>(surface: &mut S, set: &RenderSet, theme: &Theme, options: &PaintOptions) {
	let (ox, oy) = options.origin;
	let frames = options.fade_in_frames;
	surface.clear(options.width, options.height, theme.background);

	for edge in set.edges.values() {
		let alpha = fade(edge.age, frames);
		surface.line(
			ox + edge.x1,
			oy + edge.y1,
			ox + edge.x2,
			oy + edge.y2,
			&Paint::stroke(edge.color, edge.width).with_opacity(alpha),
		);
		if let Some(arrow) = &edge.arrow {
			let points = arrow.points.map(|(x, y)| (ox + x, oy + y));
			surface.polygon(&points, &Paint::fill(edge.color).with_opacity(alpha * arrow.alpha));
		}
	}

	for ring in set.selections.values() {
		surface.circle(
			ox + ring.x,
			oy + ring.y,
			ring.radius,
			&Paint::stroke(ring.color, ring.width)
				.dashed(4.0, 3.0)
				.with_opacity(fade(ring.age, frames)),
		);
	}

	let (dimmed, highlighted): (Vec<&NodeRecord>, Vec<&NodeRecord>) =
		set.nodes.values().partition(|n| n.highlight <= 0.001);
	for node in dimmed.into_iter().chain(highlighted) {
		paint_node(surface, node, theme, (ox, oy), fade(node.age, frames));
	}

	for text in set.texts.values() {
		surface.text(
			&text.text,
			ox + text.x,
			oy + text.y,
			&text.font,
			&Paint::fill(text.color).with_opacity(fade(text.age, frames)),
		);
	}

	for locator in set.locators.values() {
		let size = options.locator_size * locator.scale.clamp(0.5, 3.0);
		let theta = locator.rotation.to_radians();
		let (ux, uy) = (theta.cos(), theta.sin());
		let (cx, cy) = (ox + locator.x, oy + locator.y);
		let tip = (cx + ux * size * 0.5, cy + uy * size * 0.5);
		let (bx, by) = (cx - ux * size * 0.5, cy - uy * size * 0.5);
		let (px, py) = (-uy * size * 0.4, ux * size * 0.4);
		surface.polygon(
			&[tip, (bx + px, by + py), (bx - px, by - py)],
			&Paint::fill(locator.color.with_alpha(theme.locator.a)),
		);
	}
}

fn paint_node<S: Surface + ?Sized>(surface: &mut S, node: &NodeRecord, theme: &Theme, origin: (f64, f64), alpha: f64) {
	let (x, y) = (origin.0 + node.x, origin.1 + node.y);
	let opacity = node.opacity * alpha;
	surface.circle(x, y, node.radius, &Paint::fill(node.fill).with_opacity(opacity));
	if theme.node.use_gradient && node.radius > 3.0 {
		let shine = node.radius * 0.45;
		surface.circle(
			x - node.radius * 0.3,
			y - node.radius * 0.3,
			shine,
			&Paint::fill(node.fill.lighten(0.4).with_alpha(0.5)).with_opacity(opacity),
		);
	}
	if let Some(stroke) = node.stroke {
		if node.stroke_width > 0.0 {
			surface.circle(x, y, node.radius, &Paint::stroke(stroke, node.stroke_width).with_opacity(opacity));
		}
	}
	if node.ring > 0.01 {
		let white = Color::rgb(255, 255, 255);
		surface.circle(
			x,
			y,
			node.radius + 2.0,
			&Paint::stroke(white.with_alpha(0.8 * node.ring), 1.5),
		);
		surface.circle(
			x,
			y,
			node.radius + 5.0,
			&Paint::stroke(white.with_alpha(0.3 * node.ring), 0.75),
		);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn node(id: &str) -> NodeRecord {
		NodeRecord {
			id: id.into(),
			x: 0.0,
			y: 0.0,
			radius: 5.0,
			fill: Color::rgb(1, 2, 3),
			stroke: None,
			stroke_width: 0.0,
			opacity: 1.0,
			highlight: 0.0,
			ring: 0.0,
			age: 0,
		}
	}

	fn edge(source: &str, target: &str) -> EdgeRecord {
		EdgeRecord {
			source: source.into(),
			target: target.into(),
			x1: 0.0,
			y1: 0.0,
			x2: 10.0,
			y2: 0.0,
			color: Color::rgb(0, 0, 0),
			width: 1.0,
			arrow: None,
			age: 0,
		}
	}

	fn frame(ids: &[&str], edges: &[(&str, &str)]) -> Frame {
		Frame {
			nodes: ids.iter().map(|id| node(id)).collect(),
			edges: edges.iter().map(|(s, t)| edge(s, t)).collect(),
			..Frame::default()
		}
	}

	#[test]
	fn sync_is_idempotent_and_ages_survivors() {
		let mut set = RenderSet::default();
		let first = set.sync(frame(&["a", "b"], &[("a", "b")]));
		assert_eq!(first.nodes.entered, vec!["a", "b"]);
		assert_eq!(first.edges.entered, vec!["a-b"]);

		let second = set.sync(frame(&["a", "b"], &[("a", "b")]));
		assert!(second.is_unchanged());
		assert_eq!(second.nodes.updated, 2);
		assert_eq!(set.nodes["a"].age, 1);
		assert_eq!(set.edges["a-b"].age, 1);
	}

	#[test]
	fn exits_leave_the_live_set() {
		let mut set = RenderSet::default();
		set.sync(frame(&["a", "b", "c"], &[("a", "b"), ("b", "c")]));
		let delta = set.sync(frame(&["c", "a"], &[]));
		assert_eq!(delta.nodes.exited, vec!["b"]);
		assert_eq!(delta.edges.exited, vec!["a-b", "b-c"]);
		assert_eq!(set.nodes.keys().collect::<Vec<_>>(), vec!["c", "a"]);
		assert!(set.edges.is_empty());
	}

	#[test]
	fn fade_in_reaches_full_opacity() {
		assert_eq!(fade(0, 0), 1.0);
		assert_eq!(fade(0, 4), 0.25);
		assert_eq!(fade(3, 4), 1.0);
		assert_eq!(fade(40, 4), 1.0);
	}

	#[test]
	fn palette_value_and_explicit_fills() {
		let theme = Theme::default();
		let colormap = Colormap::resolve(Some("blues"));
		let highlight = HighlightState::default();
		let builder = FrameBuilder::new(
			Transform::default(),
			&ScaleConfig::default(),
			&theme,
			&colormap,
			&highlight,
			Some((0.0, 10.0)),
		);
		let explicit = GraphNode::new("a").with_style(super::super::types::VertexStyle {
			fill: Some("#ff0000".into()),
			..Default::default()
		});
		assert_eq!(builder.fill(&explicit, 0.0), Color::rgb(255, 0, 0));
		assert_eq!(builder.fill(&GraphNode::new("b").with_value(10.0), 0.0), colormap.color(1.0));
		assert_eq!(builder.fill(&GraphNode::new("c"), 0.5), theme.palette.color(0.5));
	}

	#[test]
	fn edges_with_dashes_in_ids_keep_distinct_keys() {
		let mut set = RenderSet::default();
		let delta = set.sync(frame(&["a-b", "c", "a", "b-c"], &[("a-b", "c"), ("a", "b-c")]));
		assert_eq!(delta.edges.entered.len(), 2);
		assert_eq!(set.edges.len(), 2);
	}

	#[test]
	fn clipped_vertex_is_located_by_its_drawn_radius() {
		let theme = Theme::default();
		let colormap = Colormap::gray();
		let highlight = HighlightState::default();
		let mut builder = FrameBuilder::new(
			Transform::new(400.0, 300.0, 0.1),
			&ScaleConfig::default(),
			&theme,
			&colormap,
			&highlight,
			None,
		);
		// 5 data units at k = 0.1 draws at the 2.5px floor, one pixel from the right edge.
		builder.vertex(&GraphNode::new("v"), 3990.0, 0.0, 5.0, Color::rgb(1, 2, 3));
		let frame = builder.finish(800.0, 600.0, 10.0);
		assert_eq!(frame.nodes[0].radius, 2.5);
		assert_eq!(frame.locators.len(), 1);
		assert_eq!(frame.locators[0].id, "v");
	}

	#[test]
	fn directed_edges_get_arrowheads_at_the_target_rim() {
		let theme = Theme::default();
		let colormap = Colormap::gray();
		let highlight = HighlightState::default();
		let mut builder = FrameBuilder::new(
			Transform::new(0.0, 0.0, 2.0),
			&ScaleConfig::default(),
			&theme,
			&colormap,
			&highlight,
			None,
		);
		let link = GraphLink::directed("a", "b");
		builder.edge("a", "b", Some(&link), (0.0, 0.0), (50.0, 0.0), 5.0, 5.0);
		let frame = builder.finish(800.0, 600.0, 10.0);
		let edge = &frame.edges[0];
		let arrow = edge.arrow.as_ref().expect("directed edge has an arrow");
		assert_eq!(arrow.points[0], (90.0, 0.0));
		assert_eq!(arrow.alpha, 1.0);
		assert_eq!((edge.x1, edge.x2), (10.0, 80.0));
	}
}
