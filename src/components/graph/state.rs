//! Graph engine state and interaction tracking.
//!
//! [`GraphState`] owns the graph data and every piece of derived state: the
//! force simulation (positions for every layout mode), the tree forest in tree
//! modes, the viewport transform, hover highlights, click disambiguation and
//! the live render records. The host drives it once per animation frame with
//! [`GraphState::frame`] and then paints with [`GraphState::paint`].

use std::collections::HashMap;

use log::{debug, info};

use super::config::GraphConfig;
use super::events::{Click, ClickTarget, ClickTracker, GraphEvents, NodeClick, SpaceClick, SubscriptionId};
use super::geometry::{Bounds, Geometry};
use super::highlight::HighlightState;
use super::render::{self, FrameBuilder, PaintOptions, RenderDelta, RenderSet, Surface};
use super::scale::{ScaleConfig, ScaledValues};
use super::simulation::{GraphDelta, SimNode, Simulation};
use super::theme::{Colormap, Theme};
use super::tree::{Forest, ForestLayout, Orientation};
use super::types::{GraphData, GraphLink, LayoutMode, PlotKind, edge_key};
use super::viewport::{Gesture, Modifiers, Transform, Viewport};
use crate::error::Result;

/// Pointer travel in pixels below which a press and release count as a click.
const CLICK_TOLERANCE: f64 = 3.0;

/// Frame interval assumed for the first frame, in milliseconds.
const FIRST_FRAME_MS: f64 = 16.0;

/// Tracks an in-progress node drag.
#[derive(Clone, Debug)]
struct DragState {
	id: String,
	/// Whether the vertex was pinned before the drag started.
	was_pinned: bool,
	start_x: f64,
	start_y: f64,
	moved: bool,
}

/// Core engine state, created once per mounted plot.
pub struct GraphState {
	config: GraphConfig,
	geometry: Geometry,
	data: GraphData,
	index: HashMap<String, usize>,
	link_index: HashMap<String, usize>,
	/// Degree-derived radius multiplier per vertex.
	sizes: Vec<f64>,
	value_range: Option<(f64, f64)>,
	mode: LayoutMode,
	simulation: Simulation,
	forest: Option<Forest>,
	forest_layout: Option<ForestLayout>,
	viewport: Viewport,
	highlight: HighlightState,
	scale: ScaleConfig,
	theme: Theme,
	colormap: Colormap,
	records: RenderSet,
	clicks: ClickTracker,
	events: GraphEvents,
	drag: Option<DragState>,
	pan_start: Option<(f64, f64)>,
	last_frame_ms: Option<f64>,
}

impl GraphState {
	/// Empty graph in the configured layout with the default theme.
	pub fn new(config: GraphConfig) -> Self {
		let geometry = Geometry::new(&config.size);
		Self {
			viewport: Viewport::new(geometry.inner_width, geometry.inner_height, config.viewport.clone()),
			simulation: Simulation::new(&config.forces),
			colormap: Colormap::resolve(config.colormap.as_deref()),
			clicks: ClickTracker::new(config.click_window_ms),
			mode: config.layout,
			geometry,
			data: GraphData::default(),
			index: HashMap::new(),
			link_index: HashMap::new(),
			sizes: Vec::new(),
			value_range: None,
			forest: None,
			forest_layout: None,
			highlight: HighlightState::default(),
			scale: ScaleConfig::default(),
			theme: Theme::default(),
			records: RenderSet::default(),
			events: GraphEvents::default(),
			drag: None,
			pan_start: None,
			last_frame_ms: None,
			config,
		}
	}

	/// Creates the engine for a plot kind. Kinds other than graph and tree draw nothing here.
	pub fn for_kind(kind: PlotKind, mut config: GraphConfig) -> Option<Self> {
		match kind.layout_mode() {
			Some(mode) => {
				if mode.is_tree() && !config.layout.is_tree() {
					config.layout = mode;
				}
				Some(Self::new(config))
			}
			None => {
				info!("graph: plot kind {kind:?} is not drawn by this engine");
				None
			}
		}
	}

	/// Replaces the graph data.
	///
	/// Vertices whose id recurs keep their position, velocity and pin. A data
	/// set with a repeated vertex id is rejected and the previous data stays.
	pub fn set_data(&mut self, data: GraphData) -> Result<GraphDelta> {
		data.validate()?;

		self.index = data
			.nodes
			.iter()
			.enumerate()
			.map(|(i, n)| (n.id.clone(), i))
			.collect();
		self.link_index = data
			.links
			.iter()
			.enumerate()
			.map(|(i, l)| (l.key(), i))
			.collect();
		self.sizes = degree_sizes(&data, &self.index);
		self.value_range = data.nodes.iter().filter_map(|n| n.value).filter(|v| v.is_finite()).fold(
			None,
			|range: Option<(f64, f64)>, v| Some(range.map_or((v, v), |(lo, hi)| (lo.min(v), hi.max(v)))),
		);

		let nodes = data.nodes.iter().map(|n| SimNode::new(&n.id)).collect();
		let edges: Vec<(String, String)> = data
			.links
			.iter()
			.map(|l| (l.source.clone(), l.target.clone()))
			.collect();
		self.data = data;
		let delta = self.simulation.set_graph(nodes, &edges);

		let index = &self.index;
		self.highlight.retain(|id| index.contains_key(id));
		if self.drag.as_ref().is_some_and(|d| !index.contains_key(&d.id)) {
			self.drag = None;
		}

		if self.mode.is_tree() {
			self.rebuild_tree();
		} else if delta.is_structural() {
			self.simulation.restart(1.0);
		}
		info!(
			"graph: {} nodes, {} links ({} entered, {} exited)",
			self.data.nodes.len(),
			self.data.links.len(),
			delta.entered.len(),
			delta.exited.len()
		);
		Ok(delta)
	}

	/// Switches layout. Tree modes lay the forest out immediately and frame it.
	pub fn set_layout_mode(&mut self, mode: LayoutMode) {
		if mode == self.mode {
			return;
		}
		info!("graph: layout {} -> {}", self.mode, mode);
		self.mode = mode;
		if mode.is_tree() {
			self.rebuild_tree();
			self.zoom_to_fit();
		} else {
			self.forest = None;
			self.forest_layout = None;
			self.simulation.restart(1.0);
		}
	}

	/// Rebuilds and lays out the forest, writing tree positions into the simulation.
	fn rebuild_tree(&mut self) {
		let Some(orientation) = Orientation::from_mode(self.mode) else {
			return;
		};
		let ids: Vec<&str> = self.data.nodes.iter().map(|n| n.id.as_str()).collect();
		let edges: Vec<(&str, &str)> = self
			.data
			.links
			.iter()
			.map(|l| (l.source.as_str(), l.target.as_str()))
			.collect();
		let mut forest = Forest::build(&ids, &edges);
		for node in self.data.nodes.iter().filter(|n| !n.expanded) {
			forest.set_expanded(&node.id, false);
		}
		let layout = forest.layout(orientation, &self.config.tree);

		// Hidden nodes sit on their collapsed ancestor so they grow out of it on expand.
		let nodes = forest.nodes();
		for node in nodes {
			let mut anchor = node;
			while !anchor.visible {
				match anchor.parent {
					Some(p) => anchor = &nodes[p],
					None => break,
				}
			}
			self.simulation.place(&node.id, anchor.x, anchor.y);
		}
		self.simulation.stop();
		debug!(
			"graph: {} layout over {} trees",
			self.mode,
			layout.trees.len()
		);
		self.forest = Some(forest);
		self.forest_layout = Some(layout);
	}

	/// Advances the force simulation one step. Tree modes have nothing to integrate.
	pub fn tick(&mut self) -> bool {
		if self.mode.is_tree() {
			return false;
		}
		self.simulation.tick()
	}

	/// Runs one animation frame at time `now_ms`: resolves pending clicks,
	/// advances the viewport transition and hover fades, rebuilds the render
	/// records from the current positions, then ticks the layout for the next
	/// frame.
	pub fn frame(&mut self, now_ms: f64) -> RenderDelta {
		let dt = self
			.last_frame_ms
			.map_or(FIRST_FRAME_MS, |last| (now_ms - last).clamp(0.0, 100.0));
		self.last_frame_ms = Some(now_ms);
		self.poll_clicks(now_ms);
		self.viewport.advance(dt);
		self.highlight.tick(dt / 1000.0);
		let delta = self.render();
		self.tick();
		delta
	}

	fn is_visible(&self, id: &str) -> bool {
		match &self.forest {
			Some(forest) if self.mode.is_tree() => forest.node(id).is_some_and(|n| n.visible),
			_ => true,
		}
	}

	fn radius_of(&self, i: usize) -> f64 {
		let node = &self.data.nodes[i];
		node.style
			.radius
			.unwrap_or(self.scale.node.radius * self.sizes.get(i).copied().unwrap_or(1.0))
	}

	/// Rebuilds screen-space records from current positions and reconciles them
	/// with the live set.
	pub fn render(&mut self) -> RenderDelta {
		let mut builder = FrameBuilder::new(
			self.viewport.transform(),
			&self.scale,
			&self.theme,
			&self.colormap,
			&self.highlight,
			self.value_range,
		);
		let n = self.data.nodes.len();

		let tree_links = match &self.forest {
			Some(forest) if self.mode.is_tree() => Some(forest.links()),
			_ => None,
		};
		match &tree_links {
			Some(links) => {
				for &(parent, child) in links {
					let link = self
						.link_index
						.get(&edge_key(parent, child))
						.map(|&i| &self.data.links[i]);
					self.edge_between(&mut builder, parent, child, link);
				}
			}
			None => {
				for link in &self.data.links {
					self.edge_between(&mut builder, &link.source, &link.target, Some(link));
				}
			}
		}

		for (i, node) in self.data.nodes.iter().enumerate() {
			if !self.is_visible(&node.id) {
				continue;
			}
			let Some(sim) = self.simulation.node(&node.id) else {
				continue;
			};
			let ordinal = if n > 1 { i as f64 / (n - 1) as f64 } else { 0.5 };
			let fill = builder.fill(node, ordinal);
			builder.vertex(node, sim.x, sim.y, self.radius_of(i), fill);
		}

		let (width, height) = self.viewport.size();
		let frame = builder.finish(width, height, self.config.locator_inset);
		self.records.sync(frame)
	}

	fn edge_between(
		&self,
		builder: &mut FrameBuilder<'_>,
		source: &str,
		target: &str,
		link: Option<&GraphLink>,
	) {
		let (Some(&si), Some(&ti)) = (self.index.get(source), self.index.get(target)) else {
			return;
		};
		let (Some(a), Some(b)) = (self.simulation.node(source), self.simulation.node(target)) else {
			return;
		};
		builder.edge(
			source,
			target,
			link,
			(a.x, a.y),
			(b.x, b.y),
			self.radius_of(si),
			self.radius_of(ti),
		);
	}

	/// Paints the live records.
	pub fn paint<S: Surface + ?Sized>(&self, surface: &mut S) {
		render::paint(
			surface,
			&self.records,
			&self.theme,
			&PaintOptions {
				width: self.geometry.width,
				height: self.geometry.height,
				origin: self.geometry.origin(),
				fade_in_frames: self.config.fade_in_frames,
				locator_size: self.scale.locator_size,
			},
		);
	}

	/// Bounding box of the visible vertices in data space.
	pub fn bounds(&self) -> Option<Bounds> {
		Bounds::from_points(
			self.simulation
				.nodes()
				.iter()
				.filter(|n| self.is_visible(&n.id))
				.map(|n| (n.x, n.y)),
		)
	}

	/// Animates the viewport to frame every visible vertex. No-op (false) when
	/// there is nothing to frame or all vertices coincide.
	pub fn zoom_to_fit(&mut self) -> bool {
		let Some(bounds) = self.bounds() else {
			return false;
		};
		if bounds.is_degenerate() {
			return false;
		}
		let padding = self.config.viewport.fit_padding;
		self.viewport
			.zoom_to_fit(&bounds.inflate(self.scale.node.radius), padding)
	}

	/// Pins a vertex at a data-space position. Returns false for unknown ids.
	pub fn pin(&mut self, id: &str, x: f64, y: f64) -> bool {
		self.simulation.pin(id, x, y)
	}

	/// Releases a pin. Returns false when the vertex was not pinned.
	pub fn unpin(&mut self, id: &str) -> bool {
		self.simulation.unpin(id)
	}

	/// Collapses or expands a vertex; tree layouts are rebuilt immediately.
	pub fn set_expanded(&mut self, id: &str, expanded: bool) -> bool {
		let Some(&i) = self.index.get(id) else {
			return false;
		};
		self.data.nodes[i].expanded = expanded;
		if self.mode.is_tree() {
			self.rebuild_tree();
		}
		true
	}

	fn to_plot(&self, x: f64, y: f64) -> (f64, f64) {
		let (ox, oy) = self.geometry.origin();
		(x - ox, y - oy)
	}

	/// Topmost vertex under surface position `(x, y)`.
	pub fn node_at_position(&self, x: f64, y: f64) -> Option<String> {
		let (px, py) = self.to_plot(x, y);
		let transform = self.viewport.transform();
		let scale = ScaledValues::new(&self.scale, transform.k);
		self.data
			.nodes
			.iter()
			.enumerate()
			.rev()
			.filter(|(_, n)| self.is_visible(&n.id))
			.find(|(i, n)| {
				self.simulation.node(&n.id).is_some_and(|sim| {
					let (sx, sy) = transform.apply(sim.x, sim.y);
					let (dx, dy) = (sx - px, sy - py);
					(dx * dx + dy * dy).sqrt() < scale.hit_radius(self.radius_of(*i))
				})
			})
			.map(|(_, n)| n.id.clone())
	}

	/// Hovers a vertex, or clears the hover with `None`.
	pub fn set_hover(&mut self, id: Option<&str>) {
		match &self.forest {
			Some(forest) if self.mode.is_tree() => self.highlight.set_hover(id, forest.links()),
			_ => self.highlight.set_hover(
				id,
				self.data
					.links
					.iter()
					.map(|l| (l.source.as_str(), l.target.as_str())),
			),
		}
	}

	/// Pointer pressed at surface position `(x, y)`. Returns whether a drag or pan started.
	pub fn pointer_down(&mut self, x: f64, y: f64, button: i16, modifiers: Modifiers) -> bool {
		let (px, py) = self.to_plot(x, y);
		if button == 0 && !modifiers.ctrl {
			if let Some(id) = self.node_at_position(x, y) {
				return self.begin_drag(&id, (px, py));
			}
		}
		let started = self.viewport.on_gesture(Gesture::DragStart {
			x: px,
			y: py,
			button,
			modifiers,
		});
		if started {
			self.pan_start = Some((px, py));
		}
		started
	}

	/// Pointer moved: drags the held vertex, pans, or updates the hover.
	pub fn pointer_move(&mut self, x: f64, y: f64) {
		let (px, py) = self.to_plot(x, y);
		if let Some(drag) = self.drag.as_mut() {
			if !drag.moved && (px - drag.start_x).hypot(py - drag.start_y) > CLICK_TOLERANCE {
				drag.moved = true;
			}
			if drag.moved {
				let (gx, gy) = self.viewport.transform().invert(px, py);
				self.simulation.pin(&drag.id, gx, gy);
			}
		} else if self.viewport.is_panning() {
			self.viewport.on_gesture(Gesture::Drag { x: px, y: py });
		} else {
			let hovered = self.node_at_position(x, y);
			self.set_hover(hovered.as_deref());
		}
	}

	/// Pointer released at `now_ms`. A press that barely moved counts as a click.
	pub fn pointer_up(&mut self, x: f64, y: f64, now_ms: f64) {
		let (px, py) = self.to_plot(x, y);
		if let Some(drag) = self.release_drag() {
			if !drag.moved {
				self.click(ClickTarget::Node(drag.id), now_ms);
			}
		} else if let Some((sx, sy)) = self.pan_start.take() {
			self.viewport.on_gesture(Gesture::DragEnd);
			if (px - sx).hypot(py - sy) <= CLICK_TOLERANCE {
				self.click(ClickTarget::Empty { x: px, y: py }, now_ms);
			}
		}
	}

	/// Pointer left the surface: ends any drag or pan without clicking.
	pub fn pointer_leave(&mut self) {
		self.release_drag();
		if self.pan_start.take().is_some() {
			self.viewport.on_gesture(Gesture::DragEnd);
		}
		self.set_hover(None);
	}

	/// Starts dragging vertex `id`: pins it in place and keeps the force layout warm
	/// until [`GraphState::drag_end`].
	pub fn drag_start(&mut self, id: &str) -> bool {
		let Some(node) = self.simulation.node(id) else {
			return false;
		};
		let start = self.viewport.transform().apply(node.x, node.y);
		self.begin_drag(id, start)
	}

	/// Moves the dragged vertex to data-space `(x, y)`.
	pub fn drag(&mut self, x: f64, y: f64) -> bool {
		let Some(drag) = self.drag.as_mut() else {
			return false;
		};
		drag.moved = true;
		self.simulation.pin(&drag.id, x, y)
	}

	/// Ends the drag. The vertex stays pinned only if it was pinned before.
	pub fn drag_end(&mut self) -> Option<String> {
		self.release_drag().map(|d| d.id)
	}

	fn begin_drag(&mut self, id: &str, start: (f64, f64)) -> bool {
		let Some(node) = self.simulation.node(id) else {
			return false;
		};
		let (nx, ny, was_pinned) = (node.x, node.y, node.is_pinned());
		self.simulation.pin(id, nx, ny);
		if !self.mode.is_tree() {
			self.simulation
				.set_alpha_target(self.config.forces.drag_alpha_target);
		}
		self.drag = Some(DragState {
			id: id.to_owned(),
			was_pinned,
			start_x: start.0,
			start_y: start.1,
			moved: false,
		});
		true
	}

	fn release_drag(&mut self) -> Option<DragState> {
		let drag = self.drag.take()?;
		if !drag.was_pinned {
			self.simulation.unpin(&drag.id);
		}
		if !self.mode.is_tree() {
			self.simulation.set_alpha_target(0.0);
		}
		Some(drag)
	}

	/// Wheel zoom about surface position `(x, y)`.
	pub fn wheel(&mut self, x: f64, y: f64, delta_y: f64, modifiers: Modifiers) -> bool {
		let (px, py) = self.to_plot(x, y);
		self.viewport.on_gesture(Gesture::Wheel {
			x: px,
			y: py,
			delta_y,
			modifiers,
		})
	}

	/// Registers a click at `now_ms`; a second click on the same target within
	/// the click window becomes a double click.
	pub fn click(&mut self, target: ClickTarget, now_ms: f64) {
		if let Some(click) = self.clicks.register(target, now_ms) {
			self.dispatch(click);
		}
	}

	/// Emits a held single click once its window has passed.
	pub fn poll_clicks(&mut self, now_ms: f64) {
		if let Some(click) = self.clicks.poll(now_ms) {
			self.dispatch(click);
		}
	}

	fn dispatch(&mut self, click: Click) {
		match click {
			Click::Single(ClickTarget::Node(id)) => {
				debug!("graph: click {id}");
				self.events.single_click_node.emit(&NodeClick { id });
			}
			Click::Double(ClickTarget::Node(id)) => {
				debug!("graph: double click {id}");
				if let Some(&i) = self.index.get(&id) {
					let expanded = !self.data.nodes[i].expanded;
					self.set_expanded(&id, expanded);
				}
				self.events.double_click_node.emit(&NodeClick { id });
			}
			Click::Single(ClickTarget::Empty { x, y }) | Click::Double(ClickTarget::Empty { x, y }) => {
				self.events.click_empty_space.emit(&SpaceClick { x, y });
			}
		}
	}

	/// Subscribes to single clicks on vertices.
	pub fn on_single_click_node(&mut self, callback: impl FnMut(&NodeClick) + 'static) -> SubscriptionId {
		self.events.single_click_node.subscribe(callback)
	}

	/// Subscribes to double clicks on vertices.
	pub fn on_double_click_node(&mut self, callback: impl FnMut(&NodeClick) + 'static) -> SubscriptionId {
		self.events.double_click_node.subscribe(callback)
	}

	/// Subscribes to clicks that hit no vertex.
	pub fn on_click_empty_space(&mut self, callback: impl FnMut(&SpaceClick) + 'static) -> SubscriptionId {
		self.events.click_empty_space.subscribe(callback)
	}

	/// Subscribes to viewport transform changes.
	pub fn on_transform(&mut self, callback: impl FnMut(&Transform) + 'static) -> SubscriptionId {
		self.viewport.subscribe(callback)
	}

	/// Event channels, for `subscribe_once` and unsubscribing.
	pub fn events_mut(&mut self) -> &mut GraphEvents {
		&mut self.events
	}

	/// Resizes the outer surface; margins are kept.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.geometry = self.geometry.resized(width, height);
		self.viewport
			.resize(self.geometry.inner_width, self.geometry.inner_height);
	}

	/// Data-space position of a vertex.
	pub fn position(&self, id: &str) -> Option<(f64, f64)> {
		self.simulation.node(id).map(|n| (n.x, n.y))
	}

	/// Last accepted data set.
	pub fn data(&self) -> &GraphData {
		&self.data
	}

	/// Active layout.
	pub fn layout_mode(&self) -> LayoutMode {
		self.mode
	}

	/// Config the state was built with.
	pub fn config(&self) -> &GraphConfig {
		&self.config
	}

	/// Surface geometry.
	pub fn geometry(&self) -> &Geometry {
		&self.geometry
	}

	/// Force simulation. Tree layouts place their positions here too.
	pub fn simulation(&self) -> &Simulation {
		&self.simulation
	}

	/// Mutable simulation, for custom forces.
	pub fn simulation_mut(&mut self) -> &mut Simulation {
		&mut self.simulation
	}

	/// Forest of the current tree layout.
	pub fn forest(&self) -> Option<&Forest> {
		self.forest.as_ref()
	}

	/// Metrics of the last tree layout.
	pub fn forest_layout(&self) -> Option<&ForestLayout> {
		self.forest_layout.as_ref()
	}

	/// Pan and zoom state.
	pub fn viewport(&self) -> &Viewport {
		&self.viewport
	}

	/// Mutable viewport.
	pub fn viewport_mut(&mut self) -> &mut Viewport {
		&mut self.viewport
	}

	/// Current viewport transform.
	pub fn transform(&self) -> Transform {
		self.viewport.transform()
	}

	/// Records from the last render.
	pub fn records(&self) -> &RenderSet {
		&self.records
	}

	/// Hover intensities.
	pub fn highlight(&self) -> &HighlightState {
		&self.highlight
	}

	/// Active theme.
	pub fn theme(&self) -> &Theme {
		&self.theme
	}

	/// Replaces the theme from the next render on.
	pub fn set_theme(&mut self, theme: Theme) {
		self.theme = theme;
	}

	/// Zoom-dependent sizing.
	pub fn scale_config(&self) -> &ScaleConfig {
		&self.scale
	}

	/// Replaces the sizing from the next render on.
	pub fn set_scale_config(&mut self, scale: ScaleConfig) {
		self.scale = scale;
	}
}

/// Radius multipliers from vertex degree: labeled vertices 1.2x to 1.7x,
/// unlabeled 0.8x to 1.2x.
fn degree_sizes(data: &GraphData, index: &HashMap<String, usize>) -> Vec<f64> {
	let mut degree = vec![0usize; data.nodes.len()];
	for link in &data.links {
		if let (Some(&s), Some(&t)) = (index.get(&link.source), index.get(&link.target)) {
			degree[s] += 1;
			degree[t] += 1;
		}
	}
	let max = degree.iter().copied().max().unwrap_or(0).max(1);
	data.nodes
		.iter()
		.zip(&degree)
		.map(|(node, &d)| {
			let f = (d as f64 / max as f64).sqrt();
			if node.label.is_some() {
				1.2 + 0.5 * f
			} else {
				0.8 + 0.4 * f
			}
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;
	use std::rc::Rc;

	use super::*;
	use crate::components::graph::types::GraphNode;

	fn chain() -> GraphData {
		GraphData::new(
			vec![GraphNode::new("a"), GraphNode::new("b"), GraphNode::new("c")],
			vec![GraphLink::new("a", "b"), GraphLink::new("b", "c")],
		)
	}

	fn fixed_view() -> GraphConfig {
		GraphConfig {
			viewport: super::super::viewport::ViewportConfig {
				transition_ms: 0.0,
				..Default::default()
			},
			..GraphConfig::default()
		}
	}

	#[test]
	fn duplicate_ids_keep_previous_data() {
		let mut state = GraphState::new(GraphConfig::default());
		state.set_data(chain()).unwrap();
		let bad = GraphData::new(vec![GraphNode::new("x"), GraphNode::new("x")], vec![]);
		assert!(state.set_data(bad).is_err());
		assert_eq!(state.data().nodes.len(), 3);
		assert!(state.position("a").is_some());
	}

	#[test]
	fn degree_sizes_favour_labels_and_hubs() {
		let data = GraphData::new(
			vec![GraphNode::new("hub").with_label("Hub"), GraphNode::new("leaf"), GraphNode::new("lone")],
			vec![GraphLink::new("hub", "leaf")],
		);
		let index = data
			.nodes
			.iter()
			.enumerate()
			.map(|(i, n)| (n.id.clone(), i))
			.collect();
		let sizes = degree_sizes(&data, &index);
		for (got, want) in sizes.iter().zip([1.7, 1.2, 0.8]) {
			assert!((got - want).abs() < 1e-12, "{sizes:?}");
		}
	}

	#[test]
	fn dragging_pins_then_releases() {
		let mut state = GraphState::new(fixed_view());
		state.set_data(chain()).unwrap();
		state.pin("a", 0.0, 0.0);
		state.unpin("a");
		let t = state.transform();
		let (ox, oy) = state.geometry().origin();
		let (sx, sy) = t.apply(0.0, 0.0);

		assert!(state.pointer_down(ox + sx, oy + sy, 0, Modifiers::default()));
		state.pointer_move(ox + sx + 40.0, oy + sy);
		assert_eq!(state.position("a"), Some((40.0 / t.k, 0.0)));
		assert!(state.simulation().node("a").is_some_and(|n| n.is_pinned()));
		state.pointer_up(ox + sx + 40.0, oy + sy, 0.0);
		assert!(!state.simulation().node("a").is_some_and(|n| n.is_pinned()));
	}

	#[test]
	fn press_without_motion_is_a_click() {
		let clicks = Rc::new(RefCell::new(Vec::new()));
		let mut state = GraphState::new(fixed_view());
		state.set_data(chain()).unwrap();
		state.pin("b", 0.0, 0.0);
		let c = clicks.clone();
		state.on_single_click_node(move |e| c.borrow_mut().push(e.id.clone()));

		let (ox, oy) = state.geometry().origin();
		let (sx, sy) = state.transform().apply(0.0, 0.0);
		state.pointer_down(ox + sx, oy + sy, 0, Modifiers::default());
		state.pointer_up(ox + sx + 1.0, oy + sy, 0.0);
		state.poll_clicks(100.0);
		assert!(clicks.borrow().is_empty());
		state.poll_clicks(300.0);
		assert_eq!(*clicks.borrow(), vec!["b".to_string()]);
		assert!(state.simulation().node("b").is_some_and(|n| n.is_pinned()));
	}

	#[test]
	fn programmatic_drag_keeps_existing_pins() {
		let mut state = GraphState::new(fixed_view());
		state.set_data(chain()).unwrap();
		assert!(!state.drag(1.0, 1.0));
		assert!(!state.drag_start("missing"));

		state.pin("c", 5.0, 5.0);
		assert!(state.drag_start("c"));
		assert!(state.simulation().is_running());
		assert!(state.drag(20.0, -10.0));
		assert_eq!(state.position("c"), Some((20.0, -10.0)));
		assert_eq!(state.drag_end().as_deref(), Some("c"));
		assert_eq!(state.simulation().node("c").and_then(|n| n.pin), Some((20.0, -10.0)));
		assert!(state.drag_end().is_none());
	}

	#[test]
	fn new_edge_between_settled_vertices_reheats_the_layout() {
		let mut state = GraphState::new(fixed_view());
		state
			.set_data(GraphData::new(
				vec![GraphNode::new("a"), GraphNode::new("b"), GraphNode::new("c")],
				vec![GraphLink::new("a", "b")],
			))
			.unwrap();
		let mut ticks = 0;
		while state.tick() {
			ticks += 1;
			assert!(ticks < 5000);
		}
		let before = state.position("c");

		let delta = state.set_data(chain()).unwrap();
		assert!(delta.links_changed);
		assert!(state.simulation().is_running());
		for _ in 0..50 {
			state.tick();
		}
		assert_ne!(state.position("c"), before);
	}

	#[test]
	fn frame_records_positions_before_the_tick() {
		let mut state = GraphState::new(fixed_view());
		state.set_data(chain()).unwrap();
		let before = state.position("a").unwrap();
		let (sx, sy) = state.transform().apply(before.0, before.1);

		state.frame(0.0);
		let record = &state.records().nodes["a"];
		assert_eq!((record.x, record.y), (sx, sy));
		assert_ne!(state.position("a"), Some(before));
	}

	#[test]
	fn other_plot_kinds_have_no_engine() {
		assert!(GraphState::for_kind(PlotKind::Heatmap, GraphConfig::default()).is_none());
		let tree = GraphState::for_kind(PlotKind::Tree, GraphConfig::default()).unwrap();
		assert_eq!(tree.layout_mode(), LayoutMode::Vertical);
		let graph = GraphState::for_kind(PlotKind::Graph, GraphConfig::default()).unwrap();
		assert_eq!(graph.layout_mode(), LayoutMode::None);
	}
}
