//! Force-directed layout simulation.
//!
//! Each [`Simulation::tick`] lets every registered [`Force`] add to vertex
//! velocities, then damps and integrates them. The step size is scaled by
//! `alpha`, a temperature that decays toward `alpha_target` and stops the
//! simulation once it falls below `alpha_min`. Drag interactions reheat it by
//! raising `alpha_target`.
//!
//! Positions and velocities live in [`SimNode`]s that survive
//! [`Simulation::set_graph`] as long as their id recurs.

use std::collections::HashMap;
use std::f64::consts::PI;

use indexmap::IndexMap;
use log::{debug, info};
use serde::Deserialize;

use super::reconcile::reconcile_by;

/// Radius of the first phyllotaxis ring used to seed new vertices.
const INITIAL_RADIUS: f64 = 10.0;

/// Simulated vertex state.
#[derive(Clone, Debug, PartialEq)]
pub struct SimNode {
	/// Vertex id.
	pub id: String,
	/// Position x; NaN until seeded.
	pub x: f64,
	/// Position y; NaN until seeded.
	pub y: f64,
	/// Velocity x.
	pub vx: f64,
	/// Velocity y.
	pub vy: f64,
	/// Authoritative position override. While set the integrator snaps the
	/// vertex here every tick and never displaces it.
	pub pin: Option<(f64, f64)>,
}

impl SimNode {
	/// A vertex with no position yet; [`Simulation::set_graph`] seeds it.
	pub fn new(id: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			x: f64::NAN,
			y: f64::NAN,
			vx: 0.0,
			vy: 0.0,
			pin: None,
		}
	}

	/// A vertex at a known position.
	pub fn at(id: impl Into<String>, x: f64, y: f64) -> Self {
		Self {
			x,
			y,
			..Self::new(id)
		}
	}

	/// True while a pin is set.
	pub fn is_pinned(&self) -> bool {
		self.pin.is_some()
	}

	/// True once both coordinates are finite.
	pub fn has_position(&self) -> bool {
		self.x.is_finite() && self.y.is_finite()
	}
}

/// An edge resolved to node indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimLink {
	/// Index of the source vertex.
	pub source: usize,
	/// Index of the target vertex.
	pub target: usize,
}

/// A pluggable force. Implementations add to `vx`/`vy` in place.
pub trait Force {
	/// Called whenever the node or link set changes.
	fn initialize(&mut self, _nodes: &[SimNode], _links: &[SimLink]) {}

	/// Adds this force's contribution at temperature `alpha`.
	fn apply(&mut self, nodes: &mut [SimNode], links: &[SimLink], alpha: f64);
}

/// Deterministic pseudo-random value in `[0, 1)`.
fn pseudo_random(seed: f64) -> f64 {
	let x = (seed * 12.9898 + seed * 78.233).sin() * 43758.5453;
	x - x.floor()
}

/// Tiny deterministic nudge used to separate coincident vertices.
fn jiggle(a: usize, b: usize, axis: usize) -> f64 {
	let seed = (a * 7919 + b * 104_729 + axis * 31) as f64 + 1.0;
	let j = (pseudo_random(seed) - 0.5) * 1e-6;
	if j == 0.0 { 1e-7 } else { j }
}

/// Pairwise inverse-distance repulsion (negative strength) or attraction.
#[derive(Clone, Debug)]
pub struct ManyBody {
	/// Force scale; negative repels.
	pub strength: f64,
	/// Distances below this are floored, bounding the force between near-coincident vertices.
	pub distance_min: f64,
	/// Pairs further apart than this are ignored.
	pub distance_max: f64,
}

impl Default for ManyBody {
	fn default() -> Self {
		Self {
			strength: -500.0,
			distance_min: 1.0,
			distance_max: f64::INFINITY,
		}
	}
}

impl Force for ManyBody {
	fn apply(&mut self, nodes: &mut [SimNode], _links: &[SimLink], alpha: f64) {
		let min2 = self.distance_min * self.distance_min;
		let max2 = self.distance_max * self.distance_max;
		for i in 0..nodes.len() {
			for j in (i + 1)..nodes.len() {
				let mut dx = nodes[j].x - nodes[i].x;
				let mut dy = nodes[j].y - nodes[i].y;
				if dx == 0.0 {
					dx = jiggle(i, j, 0);
				}
				if dy == 0.0 {
					dy = jiggle(i, j, 1);
				}
				let l = dx * dx + dy * dy;
				if l >= max2 {
					continue;
				}
				let w = self.strength * alpha / l.max(min2);
				nodes[i].vx += dx * w;
				nodes[i].vy += dy * w;
				nodes[j].vx -= dx * w;
				nodes[j].vy -= dy * w;
			}
		}
	}
}

/// Spring along each link toward `distance`.
///
/// The correction is split between endpoints in proportion to their degree so
/// that hubs move less than leaves.
#[derive(Clone, Debug)]
pub struct LinkForce {
	/// Spring stiffness in `[0, 1]`.
	pub strength: f64,
	/// Rest length in data units.
	pub distance: f64,
	bias: Vec<f64>,
}

impl LinkForce {
	/// Spring with the given stiffness and rest length.
	pub fn new(strength: f64, distance: f64) -> Self {
		Self {
			strength,
			distance,
			bias: Vec::new(),
		}
	}

	fn compute_bias(&mut self, node_count: usize, links: &[SimLink]) {
		let mut degree = vec![0usize; node_count];
		for link in links {
			degree[link.source] += 1;
			degree[link.target] += 1;
		}
		self.bias = links
			.iter()
			.map(|l| {
				let (s, t) = (degree[l.source] as f64, degree[l.target] as f64);
				s / (s + t)
			})
			.collect();
	}
}

impl Default for LinkForce {
	fn default() -> Self {
		Self::new(0.2, 30.0)
	}
}

impl Force for LinkForce {
	fn initialize(&mut self, nodes: &[SimNode], links: &[SimLink]) {
		self.compute_bias(nodes.len(), links);
	}

	fn apply(&mut self, nodes: &mut [SimNode], links: &[SimLink], alpha: f64) {
		if self.bias.len() != links.len() {
			self.compute_bias(nodes.len(), links);
		}
		for (i, link) in links.iter().enumerate() {
			let (s, t) = (link.source, link.target);
			if s == t {
				continue;
			}
			let mut x = nodes[t].x + nodes[t].vx - nodes[s].x - nodes[s].vx;
			let mut y = nodes[t].y + nodes[t].vy - nodes[s].y - nodes[s].vy;
			if x == 0.0 {
				x = jiggle(s, t, 0);
			}
			if y == 0.0 {
				y = jiggle(s, t, 1);
			}
			let len = (x * x + y * y).sqrt();
			let l = (len - self.distance) / len * alpha * self.strength;
			x *= l;
			y *= l;
			let b = self.bias[i];
			nodes[t].vx -= x * b;
			nodes[t].vy -= y * b;
			nodes[s].vx += x * (1.0 - b);
			nodes[s].vy += y * (1.0 - b);
		}
	}
}

/// Axis a [`PositionForce`] acts on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
	/// Horizontal.
	X,
	/// Vertical.
	Y,
}

/// Spring pulling every vertex toward `target` along one axis.
#[derive(Clone, Debug)]
pub struct PositionForce {
	/// Axis the spring acts on.
	pub axis: Axis,
	/// Coordinate pulled toward.
	pub target: f64,
	/// Spring stiffness.
	pub strength: f64,
}

impl PositionForce {
	/// Pulls toward `x = 0`.
	pub fn x(strength: f64) -> Self {
		Self {
			axis: Axis::X,
			target: 0.0,
			strength,
		}
	}

	/// Pulls toward `y = 0`.
	pub fn y(strength: f64) -> Self {
		Self {
			axis: Axis::Y,
			target: 0.0,
			strength,
		}
	}
}

impl Force for PositionForce {
	fn apply(&mut self, nodes: &mut [SimNode], _links: &[SimLink], alpha: f64) {
		let k = self.strength * alpha;
		for node in nodes {
			match self.axis {
				Axis::X => node.vx += (self.target - node.x) * k,
				Axis::Y => node.vy += (self.target - node.y) * k,
			}
		}
	}
}

/// Force and integrator parameters. Deserializable as part of the graph config.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ForceConfig {
	/// Many-body strength; negative repels.
	pub charge: f64,
	/// Spring stiffness of each link.
	pub link_strength: f64,
	/// Rest length of each link.
	pub link_distance: f64,
	/// Strength of each of the two centering springs (toward x=0 and y=0).
	pub center_strength: f64,
	/// Ticking stops once alpha falls below this.
	pub alpha_min: f64,
	/// Fraction of the remaining distance to `alpha_target` covered per tick.
	pub alpha_decay: f64,
	/// Fraction of velocity lost per tick (0 = frictionless, 1 = no momentum).
	pub velocity_decay: f64,
	/// `alpha_target` while a vertex is being dragged, keeping the layout live.
	pub drag_alpha_target: f64,
}

impl Default for ForceConfig {
	fn default() -> Self {
		let alpha_min: f64 = 0.001;
		Self {
			charge: -500.0,
			link_strength: 0.2,
			link_distance: 30.0,
			center_strength: 0.05,
			alpha_min,
			alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
			velocity_decay: 0.4,
			drag_alpha_target: 0.3,
		}
	}
}

/// Ids that entered and exited during a [`Simulation::set_graph`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphDelta {
	/// Ids new in this graph, in input order.
	pub entered: Vec<String>,
	/// Ids no longer present.
	pub exited: Vec<String>,
	/// Links dropped because an endpoint is not in the vertex set.
	pub dropped_links: usize,
	/// Whether the resolved links, compared by endpoint ids, differ from the previous set.
	pub links_changed: bool,
}

impl GraphDelta {
	/// Whether anything the forces act on changed.
	pub fn is_structural(&self) -> bool {
		self.links_changed || !(self.entered.is_empty() && self.exited.is_empty())
	}
}

/// Force simulation over a vertex/edge set.
pub struct Simulation {
	nodes: Vec<SimNode>,
	links: Vec<SimLink>,
	index: HashMap<String, usize>,
	forces: IndexMap<String, Box<dyn Force>>,
	config: ForceConfig,
	alpha: f64,
	alpha_target: f64,
	running: bool,
	ticks: u64,
	on_tick: Option<Box<dyn FnMut(&[SimNode])>>,
}

impl Simulation {
	/// Creates a simulation with the default forces: `charge`, `link`, `x`, `y`.
	pub fn new(config: &ForceConfig) -> Self {
		let mut forces: IndexMap<String, Box<dyn Force>> = IndexMap::new();
		forces.insert(
			"charge".into(),
			Box::new(ManyBody {
				strength: config.charge,
				..ManyBody::default()
			}),
		);
		forces.insert(
			"link".into(),
			Box::new(LinkForce::new(config.link_strength, config.link_distance)),
		);
		forces.insert("x".into(), Box::new(PositionForce::x(config.center_strength)));
		forces.insert("y".into(), Box::new(PositionForce::y(config.center_strength)));
		Self {
			nodes: Vec::new(),
			links: Vec::new(),
			index: HashMap::new(),
			forces,
			config: config.clone(),
			alpha: 1.0,
			alpha_target: 0.0,
			running: true,
			ticks: 0,
			on_tick: None,
		}
	}

	/// Replaces the simulated vertex and edge sets.
	///
	/// Vertices whose id was already simulated keep their position, velocity and
	/// pin exactly. New vertices without a finite position are seeded on a
	/// phyllotaxis spiral. Edges naming an unknown id are dropped.
	pub fn set_graph(&mut self, nodes: Vec<SimNode>, edges: &[(String, String)]) -> GraphDelta {
		let previous_links = self.link_ids();
		let previous = std::mem::take(&mut self.nodes);
		let rec = reconcile_by(
			previous,
			nodes,
			|n| n.id.clone(),
			|old, new| {
				new.x = old.x;
				new.y = old.y;
				new.vx = old.vx;
				new.vy = old.vy;
				new.pin = old.pin;
			},
		);
		let entered: Vec<String> = rec.enter.iter().map(|n| n.id.clone()).collect();
		let exited: Vec<String> = rec.exit.iter().map(|n| n.id.clone()).collect();
		self.nodes = rec.into_live();
		self.index = self
			.nodes
			.iter()
			.enumerate()
			.map(|(i, n)| (n.id.clone(), i))
			.collect();

		for (i, node) in self.nodes.iter_mut().enumerate() {
			if !node.has_position() {
				let radius = INITIAL_RADIUS * (0.5 + i as f64).sqrt();
				let angle = i as f64 * PI * (3.0 - 5f64.sqrt());
				node.x = radius * angle.cos();
				node.y = radius * angle.sin();
			}
			if !(node.vx.is_finite() && node.vy.is_finite()) {
				node.vx = 0.0;
				node.vy = 0.0;
			}
		}

		let dropped_links = self.resolve_links(edges);
		let links_changed = self.link_ids() != previous_links;
		for force in self.forces.values_mut() {
			force.initialize(&self.nodes, &self.links);
		}
		debug!(
			"simulation: {} nodes, {} links ({} entered, {} exited, {} dropped)",
			self.nodes.len(),
			self.links.len(),
			entered.len(),
			exited.len(),
			dropped_links
		);
		GraphDelta {
			entered,
			exited,
			dropped_links,
			links_changed,
		}
	}

	/// Sorted `(source, target)` id pairs of the resolved links.
	fn link_ids(&self) -> Vec<(String, String)> {
		let mut ids: Vec<_> = self
			.links
			.iter()
			.map(|l| (self.nodes[l.source].id.clone(), self.nodes[l.target].id.clone()))
			.collect();
		ids.sort_unstable();
		ids
	}

	fn resolve_links(&mut self, edges: &[(String, String)]) -> usize {
		self.links.clear();
		let mut dropped = 0;
		for (source, target) in edges {
			match (self.index.get(source), self.index.get(target)) {
				(Some(&source), Some(&target)) => self.links.push(SimLink { source, target }),
				_ => dropped += 1,
			}
		}
		dropped
	}

	/// Advances one integration step and fires the tick callback.
	///
	/// Returns whether the simulation is still running afterwards. A stopped
	/// simulation does nothing until [`Simulation::restart`].
	pub fn tick(&mut self) -> bool {
		if !self.running {
			return false;
		}
		self.alpha += (self.alpha_target - self.alpha) * self.config.alpha_decay;
		for force in self.forces.values_mut() {
			force.apply(&mut self.nodes, &self.links, self.alpha);
		}
		let keep = 1.0 - self.config.velocity_decay;
		for node in &mut self.nodes {
			match node.pin {
				Some((fx, fy)) => {
					node.x = fx;
					node.y = fy;
					node.vx = 0.0;
					node.vy = 0.0;
				}
				None => {
					node.vx *= keep;
					node.vy *= keep;
					node.x += node.vx;
					node.y += node.vy;
				}
			}
		}
		self.ticks += 1;
		if let Some(callback) = self.on_tick.as_mut() {
			callback(&self.nodes);
		}
		if self.alpha < self.config.alpha_min {
			self.running = false;
			info!("simulation: cooled after {} ticks", self.ticks);
		}
		self.running
	}

	/// Reheats to `alpha` and resumes ticking.
	pub fn restart(&mut self, alpha: f64) {
		self.alpha = alpha.max(0.0);
		self.running = true;
	}

	/// Stops ticking; alpha is kept.
	pub fn stop(&mut self) {
		self.running = false;
	}

	/// Sets the temperature alpha decays toward. Values above `alpha_min` keep the simulation live.
	pub fn set_alpha_target(&mut self, target: f64) {
		self.alpha_target = target.max(0.0);
		if self.alpha_target >= self.config.alpha_min {
			self.running = true;
		}
	}

	/// Pins a vertex. Returns false for unknown ids.
	pub fn pin(&mut self, id: &str, x: f64, y: f64) -> bool {
		match self.node_mut(id) {
			Some(node) => {
				node.pin = Some((x, y));
				node.x = x;
				node.y = y;
				node.vx = 0.0;
				node.vy = 0.0;
				true
			}
			None => false,
		}
	}

	/// Releases a pin. Returns false when the vertex was not pinned.
	pub fn unpin(&mut self, id: &str) -> bool {
		match self.node_mut(id) {
			Some(node) => node.pin.take().is_some(),
			None => false,
		}
	}

	/// Moves a vertex without pinning it and clears its velocity.
	pub fn place(&mut self, id: &str, x: f64, y: f64) -> bool {
		match self.node_mut(id) {
			Some(node) => {
				node.x = x;
				node.y = y;
				node.vx = 0.0;
				node.vy = 0.0;
				if node.pin.is_some() {
					node.pin = Some((x, y));
				}
				true
			}
			None => false,
		}
	}

	/// Adds or replaces a named force. Default names are `charge`, `link`, `x` and `y`.
	pub fn set_force(&mut self, name: impl Into<String>, mut force: Box<dyn Force>) {
		force.initialize(&self.nodes, &self.links);
		self.forces.insert(name.into(), force);
	}

	/// Removes a named force. False when no force had that name.
	pub fn remove_force(&mut self, name: &str) -> bool {
		self.forces.shift_remove(name).is_some()
	}

	/// Registers the callback fired once per tick with the updated vertices.
	pub fn on_tick(&mut self, callback: impl FnMut(&[SimNode]) + 'static) {
		self.on_tick = Some(Box::new(callback));
	}

	/// Sum of `½|v|²` over all vertices.
	pub fn kinetic_energy(&self) -> f64 {
		self.nodes
			.iter()
			.map(|n| 0.5 * (n.vx * n.vx + n.vy * n.vy))
			.sum()
	}

	/// Vertices in input order.
	pub fn nodes(&self) -> &[SimNode] {
		&self.nodes
	}

	/// Links resolved to vertex indices.
	pub fn links(&self) -> &[SimLink] {
		&self.links
	}

	/// Vertex by id.
	pub fn node(&self, id: &str) -> Option<&SimNode> {
		self.index.get(id).map(|&i| &self.nodes[i])
	}

	fn node_mut(&mut self, id: &str) -> Option<&mut SimNode> {
		self.index.get(id).map(|&i| &mut self.nodes[i])
	}

	/// Current temperature.
	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	/// True until alpha cools below `alpha_min`.
	pub fn is_running(&self) -> bool {
		self.running
	}

	/// Ticks run since construction.
	pub fn tick_count(&self) -> u64 {
		self.ticks
	}
}

#[cfg(test)]
mod tests {
	use std::cell::Cell;
	use std::rc::Rc;

	use super::*;

	fn nodes(ids: &[&str]) -> Vec<SimNode> {
		ids.iter().map(|id| SimNode::new(*id)).collect()
	}

	fn edges(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
		pairs
			.iter()
			.map(|(s, t)| (s.to_string(), t.to_string()))
			.collect()
	}

	#[test]
	fn new_vertices_are_seeded_at_distinct_finite_positions() {
		let mut sim = Simulation::new(&ForceConfig::default());
		sim.set_graph(nodes(&["a", "b", "c"]), &[]);
		let ps: Vec<(f64, f64)> = sim.nodes().iter().map(|n| (n.x, n.y)).collect();
		assert!(ps.iter().all(|(x, y)| x.is_finite() && y.is_finite()));
		assert_ne!(ps[0], ps[1]);
		assert_ne!(ps[1], ps[2]);
	}

	#[test]
	fn recurring_ids_keep_position_and_velocity_exactly() {
		let mut sim = Simulation::new(&ForceConfig::default());
		sim.set_graph(nodes(&["a", "b", "c"]), &edges(&[("a", "b"), ("b", "c")]));
		for _ in 0..10 {
			sim.tick();
		}
		let before = sim.node("b").unwrap().clone();
		let delta = sim.set_graph(nodes(&["b", "c", "d"]), &edges(&[("b", "d")]));
		let after = sim.node("b").unwrap();
		assert_eq!(
			(after.x, after.y, after.vx, after.vy),
			(before.x, before.y, before.vx, before.vy)
		);
		assert_eq!(delta.entered, vec!["d".to_string()]);
		assert_eq!(delta.exited, vec!["a".to_string()]);
		assert!(sim.node("a").is_none());
	}

	#[test]
	fn link_changes_are_reported_by_endpoint_ids() {
		let mut sim = Simulation::new(&ForceConfig::default());
		let first = sim.set_graph(nodes(&["a", "b", "c"]), &edges(&[("a", "b")]));
		assert!(first.links_changed);

		let same = sim.set_graph(nodes(&["a", "b", "c"]), &edges(&[("a", "b")]));
		assert!(!same.links_changed);
		assert!(!same.is_structural());

		let added = sim.set_graph(nodes(&["a", "b", "c"]), &edges(&[("a", "b"), ("b", "c")]));
		assert!(added.links_changed);
		assert!(added.entered.is_empty() && added.exited.is_empty());
		assert!(added.is_structural());

		let reordered = sim.set_graph(nodes(&["c", "b", "a"]), &edges(&[("b", "c"), ("a", "b")]));
		assert!(!reordered.links_changed);
	}

	#[test]
	fn dangling_links_are_dropped() {
		let mut sim = Simulation::new(&ForceConfig::default());
		let delta = sim.set_graph(nodes(&["a", "b"]), &edges(&[("a", "b"), ("a", "zzz")]));
		assert_eq!(delta.dropped_links, 1);
		assert_eq!(sim.links(), &[SimLink { source: 0, target: 1 }]);
	}

	#[test]
	fn edgeless_graph_converges() {
		let mut sim = Simulation::new(&ForceConfig::default());
		sim.set_graph(nodes(&["a", "b", "c", "d", "e"]), &[]);
		let mut ticks = 0;
		while sim.tick() {
			ticks += 1;
			assert!(ticks < 1000, "simulation never cooled");
		}
		assert!(ticks <= 400);
		assert!(sim.kinetic_energy() / 5.0 < 1e-2);
	}

	#[test]
	fn chain_stabilizes_with_finite_coordinates() {
		let mut sim = Simulation::new(&ForceConfig::default());
		sim.set_graph(
			vec![
				SimNode::at("A", 13.0, -7.0),
				SimNode::at("B", -4.0, 21.0),
				SimNode::at("C", 2.5, 3.0),
			],
			&edges(&[("A", "B"), ("B", "C")]),
		);
		let mut last: Vec<(f64, f64)> = Vec::new();
		let mut step = f64::INFINITY;
		while sim.tick() {
			let now: Vec<(f64, f64)> = sim.nodes().iter().map(|n| (n.x, n.y)).collect();
			if !last.is_empty() {
				step = now
					.iter()
					.zip(&last)
					.map(|(a, b)| ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt())
					.fold(0.0, f64::max);
			}
			last = now;
		}
		assert!(sim.nodes().iter().all(|n| n.x.is_finite() && n.y.is_finite()));
		assert!(step < 1e-2, "final step {step}");
	}

	#[test]
	fn coincident_vertices_separate_without_nan() {
		let mut sim = Simulation::new(&ForceConfig::default());
		sim.set_graph(
			vec![SimNode::at("a", 0.0, 0.0), SimNode::at("b", 0.0, 0.0)],
			&[],
		);
		for _ in 0..50 {
			sim.tick();
		}
		let (a, b) = (sim.node("a").unwrap(), sim.node("b").unwrap());
		assert!(a.x.is_finite() && a.y.is_finite() && b.x.is_finite() && b.y.is_finite());
		assert!((a.x - b.x).abs() + (a.y - b.y).abs() > 1.0);
	}

	#[test]
	fn pinned_vertex_is_not_displaced() {
		let mut sim = Simulation::new(&ForceConfig::default());
		sim.set_graph(nodes(&["a", "b", "c"]), &edges(&[("a", "b")]));
		assert!(sim.pin("a", 50.0, -20.0));
		for _ in 0..20 {
			sim.tick();
		}
		let a = sim.node("a").unwrap();
		assert_eq!((a.x, a.y, a.vx, a.vy), (50.0, -20.0, 0.0, 0.0));
		assert!(sim.unpin("a"));
		assert!(!sim.unpin("a"));
		assert!(!sim.pin("nope", 0.0, 0.0));
	}

	#[test]
	fn pins_survive_set_graph() {
		let mut sim = Simulation::new(&ForceConfig::default());
		sim.set_graph(nodes(&["a", "b"]), &[]);
		sim.pin("a", 1.0, 2.0);
		sim.set_graph(nodes(&["a", "c"]), &[]);
		assert_eq!(sim.node("a").unwrap().pin, Some((1.0, 2.0)));
	}

	#[test]
	fn stop_restart_and_alpha_target() {
		let mut sim = Simulation::new(&ForceConfig::default());
		sim.set_graph(nodes(&["a"]), &[]);
		sim.stop();
		assert!(!sim.tick());
		assert_eq!(sim.tick_count(), 0);
		sim.restart(0.5);
		assert!(sim.tick());
		assert!(sim.alpha() < 0.5);

		sim.set_alpha_target(0.3);
		for _ in 0..2000 {
			assert!(sim.tick());
		}
		assert!((sim.alpha() - 0.3).abs() < 1e-3);
	}

	#[test]
	fn tick_callback_fires_once_per_step() {
		let count = Rc::new(Cell::new(0));
		let mut sim = Simulation::new(&ForceConfig::default());
		sim.set_graph(nodes(&["a", "b"]), &[]);
		let c = count.clone();
		sim.on_tick(move |nodes| {
			assert_eq!(nodes.len(), 2);
			c.set(c.get() + 1);
		});
		sim.tick();
		sim.tick();
		assert_eq!(count.get(), 2);
	}

	struct Drift;

	impl Force for Drift {
		fn apply(&mut self, nodes: &mut [SimNode], _links: &[SimLink], _alpha: f64) {
			for node in nodes {
				node.vx += 1.0;
			}
		}
	}

	#[test]
	fn forces_are_pluggable() {
		let mut sim = Simulation::new(&ForceConfig::default());
		for name in ["charge", "link", "x", "y"] {
			assert!(sim.remove_force(name));
		}
		sim.set_force("drift", Box::new(Drift));
		sim.set_graph(vec![SimNode::at("a", 0.0, 0.0)], &[]);
		sim.tick();
		let a = sim.node("a").unwrap();
		assert!((a.x - 0.6).abs() < 1e-12);
		assert_eq!(a.y, 0.0);
	}
}
