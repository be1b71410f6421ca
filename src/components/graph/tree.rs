//! Hierarchical tree layouts inferred from a graph.
//!
//! [`Forest::build`] projects an arbitrary vertex/edge set onto a forest:
//! roots are the vertices without an incoming edge, and each vertex is claimed
//! by the first parent that reaches it in a depth-first walk over outgoing
//! edges in input order. Cycles are cut at the first revisit.
//!
//! [`Forest::layout`] then assigns every visible node a breadth (leaf order,
//! parents centered over their children) and a depth, and maps that pair to
//! screen axes through an [`Orientation`].

use std::collections::HashMap;
use std::f64::consts::TAU;

use log::{debug, warn};
use serde::Deserialize;

use super::geometry::Bounds;
use super::types::LayoutMode;

/// How breadth and depth map to coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
	/// breadth → x, depth → y (roots on top).
	Vertical,
	/// depth → x, breadth → y (roots on the left).
	Horizontal,
	/// breadth → angle, depth → radius (roots at the center).
	Radial,
}

impl Orientation {
	/// Tree orientation for a layout mode, `None` for free-form layout.
	pub fn from_mode(mode: LayoutMode) -> Option<Self> {
		match mode {
			LayoutMode::None => None,
			LayoutMode::Vertical => Some(Orientation::Vertical),
			LayoutMode::Horizontal => Some(Orientation::Horizontal),
			LayoutMode::Radial => Some(Orientation::Radial),
		}
	}

	/// Maps cartesian (breadth, depth) offsets to (x, y).
	fn place(self, breadth: f64, depth: f64) -> (f64, f64) {
		match self {
			Orientation::Vertical => (breadth, depth),
			Orientation::Horizontal => (depth, breadth),
			Orientation::Radial => (depth * breadth.sin(), -depth * breadth.cos()),
		}
	}
}

/// Spacing for tree layouts, in world units.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct TreeConfig {
	/// Distance between adjacent leaves.
	pub node_spacing: f64,
	/// Distance between depth levels (minimum ring step in radial mode).
	pub level_spacing: f64,
	/// Empty leaf slots between neighbouring cartesian trees.
	pub tree_gap: f64,
	/// Radial gap between the bands of consecutive radial trees.
	pub band_gap: f64,
}

impl Default for TreeConfig {
	fn default() -> Self {
		Self {
			node_spacing: 40.0,
			level_spacing: 80.0,
			tree_gap: 1.0,
			band_gap: 80.0,
		}
	}
}

/// A vertex placed in the forest.
#[derive(Clone, Debug, PartialEq)]
pub struct TreeNode {
	/// Vertex id.
	pub id: String,
	/// Distance from the root; roots are 0.
	pub depth: usize,
	/// Slot of the parent node. Lookup only; the forest owns every node.
	pub parent: Option<usize>,
	/// Child slots in attachment order.
	pub children: Vec<usize>,
	/// Index of the tree (root) this node belongs to.
	pub tree: usize,
	/// Collapsed nodes keep their slot but hide their descendants.
	pub expanded: bool,
	/// False when an ancestor is collapsed.
	pub visible: bool,
	/// Layout x in data units.
	pub x: f64,
	/// Layout y in data units.
	pub y: f64,
	/// Angular position, radial layouts only.
	pub angle: Option<f64>,
}

/// Size of one laid-out tree.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TreeMetrics {
	/// Breadth along the sibling axis.
	pub width: f64,
	/// Depth along the level axis.
	pub height: f64,
	/// Largest extent from the layout origin along either axis (outer radius when radial).
	pub max_extent: f64,
	/// Visible leaf count.
	pub leaves: usize,
}

/// Result of [`Forest::layout`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ForestLayout {
	/// One entry per root, in root order.
	pub trees: Vec<TreeMetrics>,
	/// Box around every visible node; `(0, 0)` sized for an empty forest.
	pub bounds: Bounds,
}

impl ForestLayout {
	/// Uniform scale that fits `bounds` in a `width` × `height` viewport. 1.0 when degenerate.
	pub fn scale_to_fit(&self, width: f64, height: f64) -> f64 {
		let (bw, bh) = (self.bounds.width(), self.bounds.height());
		let sx = if bw > 0.0 { width / bw } else { f64::INFINITY };
		let sy = if bh > 0.0 { height / bh } else { f64::INFINITY };
		let s = sx.min(sy);
		if s.is_finite() && s > 0.0 { s } else { 1.0 }
	}
}

/// Rooted-tree projection of a graph. Nodes of each tree occupy a contiguous
/// range of slots in depth-first preorder.
#[derive(Clone, Debug, Default)]
pub struct Forest {
	nodes: Vec<TreeNode>,
	roots: Vec<usize>,
	index: HashMap<String, usize>,
	promoted: usize,
}

impl Forest {
	/// Builds the forest for `ids` and directed `edges`.
	///
	/// Edges with an unknown endpoint and self-loops are ignored. Vertices only
	/// reachable through a cycle are promoted to roots in input order, so every
	/// vertex appears exactly once.
	pub fn build<S: AsRef<str>>(ids: &[S], edges: &[(S, S)]) -> Self {
		let n = ids.len();
		let mut position: HashMap<&str, usize> = HashMap::with_capacity(n);
		for (i, id) in ids.iter().enumerate() {
			position.entry(id.as_ref()).or_insert(i);
		}

		let mut outgoing = vec![Vec::new(); n];
		let mut has_parent = vec![false; n];
		for (source, target) in edges {
			if let (Some(&s), Some(&t)) = (position.get(source.as_ref()), position.get(target.as_ref())) {
				if s != t {
					outgoing[s].push(t);
					has_parent[t] = true;
				}
			}
		}

		// Repeated ids never get a slot of their own.
		let mut visited: Vec<bool> = ids
			.iter()
			.enumerate()
			.map(|(i, id)| position[id.as_ref()] != i)
			.collect();

		let mut forest = Forest::default();
		for root in 0..n {
			if !has_parent[root] && !visited[root] {
				forest.attach(root, ids, &outgoing, &mut visited);
			}
		}
		for v in 0..n {
			if !visited[v] {
				forest.promoted += 1;
				forest.attach(v, ids, &outgoing, &mut visited);
			}
		}
		if forest.promoted > 0 {
			warn!(
				"tree: {} vertices only reachable through cycles were promoted to roots",
				forest.promoted
			);
		}
		debug!(
			"tree: built {} trees over {} nodes",
			forest.roots.len(),
			forest.nodes.len()
		);
		forest
	}

	/// Depth-first attachment from `start`, claiming each vertex on first visit.
	fn attach<S: AsRef<str>>(
		&mut self,
		start: usize,
		ids: &[S],
		outgoing: &[Vec<usize>],
		visited: &mut [bool],
	) {
		let tree = self.roots.len();
		let mut stack = vec![(start, None::<usize>, 0usize)];
		while let Some((v, parent, depth)) = stack.pop() {
			if visited[v] {
				continue;
			}
			visited[v] = true;
			let slot = self.nodes.len();
			let id = ids[v].as_ref().to_string();
			self.index.insert(id.clone(), slot);
			self.nodes.push(TreeNode {
				id,
				depth,
				parent,
				children: Vec::new(),
				tree,
				expanded: true,
				visible: true,
				x: 0.0,
				y: 0.0,
				angle: None,
			});
			match parent {
				Some(p) => self.nodes[p].children.push(slot),
				None => self.roots.push(slot),
			}
			for &child in outgoing[v].iter().rev() {
				if !visited[child] {
					stack.push((child, Some(slot), depth + 1));
				}
			}
		}
	}

	/// Collapses or expands a node. Returns false for unknown ids.
	pub fn set_expanded(&mut self, id: &str, expanded: bool) -> bool {
		match self.index.get(id) {
			Some(&slot) => {
				self.nodes[slot].expanded = expanded;
				true
			}
			None => false,
		}
	}

	fn is_visible_leaf(&self, slot: usize) -> bool {
		let node = &self.nodes[slot];
		!node.expanded || node.children.is_empty()
	}

	fn tree_range(&self, tree: usize) -> std::ops::Range<usize> {
		let start = self.roots[tree];
		let end = self.roots.get(tree + 1).copied().unwrap_or(self.nodes.len());
		start..end
	}

	/// Positions every visible node and packs the trees so they do not overlap.
	pub fn layout(&mut self, orientation: Orientation, config: &TreeConfig) -> ForestLayout {
		let mut trees = Vec::with_capacity(self.roots.len());
		let mut breadth_offset = 0.0;
		let mut band_offset = 0.0;

		for tree in 0..self.roots.len() {
			let range = self.tree_range(tree);
			let start = range.start;

			for slot in range.clone() {
				let visible = match self.nodes[slot].parent {
					None => true,
					Some(p) => self.nodes[p].visible && self.nodes[p].expanded,
				};
				let node = &mut self.nodes[slot];
				node.visible = visible;
				node.angle = None;
			}

			// Leaves take consecutive breadth slots in preorder; parents center
			// over their first and last child (children always follow parents).
			let mut breadth = vec![0.0; range.len()];
			let mut leaves = 0usize;
			let mut max_depth = 0usize;
			for slot in range.clone() {
				if !self.nodes[slot].visible {
					continue;
				}
				max_depth = max_depth.max(self.nodes[slot].depth);
				if self.is_visible_leaf(slot) {
					breadth[slot - start] = leaves as f64;
					leaves += 1;
				}
			}
			for slot in range.clone().rev() {
				if !self.nodes[slot].visible || self.is_visible_leaf(slot) {
					continue;
				}
				let children = &self.nodes[slot].children;
				let first = breadth[children[0] - start];
				let last = breadth[children[children.len() - 1] - start];
				breadth[slot - start] = (first + last) / 2.0;
			}

			let metrics = match orientation {
				Orientation::Vertical | Orientation::Horizontal => {
					for slot in range.clone() {
						let node = &mut self.nodes[slot];
						if !node.visible {
							continue;
						}
						let b = (breadth_offset + breadth[slot - start]) * config.node_spacing;
						let d = node.depth as f64 * config.level_spacing;
						(node.x, node.y) = orientation.place(b, d);
					}
					breadth_offset += leaves as f64 + config.tree_gap;
					let span = leaves.saturating_sub(1) as f64 * config.node_spacing;
					let depth_span = max_depth as f64 * config.level_spacing;
					let (width, height) = if orientation == Orientation::Vertical {
						(span, depth_span)
					} else {
						(depth_span, span)
					};
					TreeMetrics {
						width,
						height,
						max_extent: span.max(depth_span),
						leaves,
					}
				}
				Orientation::Radial => {
					// Ring step grows with the leaf count to keep angular density roughly constant.
					let ring = config
						.level_spacing
						.max(leaves as f64 * config.node_spacing / TAU);
					for slot in range.clone() {
						let node = &mut self.nodes[slot];
						if !node.visible {
							continue;
						}
						let angle = TAU * breadth[slot - start] / leaves as f64;
						let radius = band_offset + node.depth as f64 * ring;
						(node.x, node.y) = orientation.place(angle, radius);
						node.angle = Some(angle);
					}
					let max_extent = band_offset + max_depth as f64 * ring;
					band_offset = max_extent + config.band_gap;
					TreeMetrics {
						width: 2.0 * max_extent,
						height: 2.0 * max_extent,
						max_extent,
						leaves,
					}
				}
			};
			trees.push(metrics);
		}

		let bounds = Bounds::from_points(self.visible_nodes().map(|n| (n.x, n.y))).unwrap_or_default();
		ForestLayout { trees, bounds }
	}

	/// Parent → child id pairs between visible nodes.
	pub fn links(&self) -> Vec<(&str, &str)> {
		self.visible_nodes()
			.filter_map(|n| n.parent.map(|p| (self.nodes[p].id.as_str(), n.id.as_str())))
			.collect()
	}

	/// Nodes not hidden by a collapsed ancestor.
	pub fn visible_nodes(&self) -> impl Iterator<Item = &TreeNode> {
		self.nodes.iter().filter(|n| n.visible)
	}

	/// Every node, in slot order.
	pub fn nodes(&self) -> &[TreeNode] {
		&self.nodes
	}

	/// Root slots, one per tree.
	pub fn roots(&self) -> &[usize] {
		&self.roots
	}

	/// Node with the given id.
	pub fn node(&self, id: &str) -> Option<&TreeNode> {
		self.index.get(id).map(|&slot| &self.nodes[slot])
	}

	/// Number of vertices promoted to roots because only cycles reached them.
	pub fn promoted(&self) -> usize {
		self.promoted
	}

	/// Node count, hidden ones included.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// True for an empty forest.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use super::*;

	fn parent_of<'a>(forest: &'a Forest, id: &str) -> Option<&'a str> {
		forest
			.node(id)
			.and_then(|n| n.parent)
			.map(|p| forest.nodes()[p].id.as_str())
	}

	#[test]
	fn acyclic_graph_gives_single_parents_and_no_duplicates() {
		let ids = ["a", "b", "c", "d", "e"];
		let edges = [("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")];
		let forest = Forest::build(&ids, &edges);

		assert_eq!(forest.len(), 5);
		let unique: HashSet<&str> = forest.nodes().iter().map(|n| n.id.as_str()).collect();
		assert_eq!(unique.len(), 5);
		let roots: Vec<&str> = forest
			.roots()
			.iter()
			.map(|&r| forest.nodes()[r].id.as_str())
			.collect();
		assert_eq!(roots, vec!["a", "e"]);
		// d is claimed by the first parent that reaches it.
		assert_eq!(parent_of(&forest, "d"), Some("b"));
		for (slot, node) in forest.nodes().iter().enumerate() {
			let claims = forest
				.nodes()
				.iter()
				.filter(|p| p.children.contains(&slot))
				.count();
			assert_eq!(claims, usize::from(node.parent.is_some()));
		}
	}

	#[test]
	fn cycles_are_truncated_at_first_revisit() {
		let ids = ["x", "a", "b", "c"];
		let edges = [("x", "a"), ("a", "b"), ("b", "c"), ("c", "a")];
		let forest = Forest::build(&ids, &edges);
		assert_eq!(forest.len(), 4);
		assert_eq!(parent_of(&forest, "c"), Some("b"));
		assert!(forest.node("c").unwrap().children.is_empty());
		assert_eq!(forest.promoted(), 0);
	}

	#[test]
	fn pure_cycles_promote_first_vertex_to_root() {
		let forest = Forest::build(&["p", "q"], &[("p", "q"), ("q", "p")]);
		assert_eq!(forest.promoted(), 1);
		assert_eq!(forest.roots().len(), 1);
		assert_eq!(parent_of(&forest, "q"), Some("p"));
	}

	#[test]
	fn dangling_edges_and_self_loops_are_ignored() {
		let forest = Forest::build(&["a", "b"], &[("a", "a"), ("a", "ghost"), ("a", "b")]);
		assert_eq!(forest.roots().len(), 1);
		assert_eq!(forest.links(), vec![("a", "b")]);
	}

	#[test]
	fn empty_forest_lays_out_to_nothing() {
		let mut forest = Forest::build::<&str>(&[], &[]);
		let layout = forest.layout(Orientation::Radial, &TreeConfig::default());
		assert!(forest.is_empty());
		assert!(forest.links().is_empty());
		assert!(layout.trees.is_empty());
		assert_eq!(layout.bounds, Bounds::default());
		assert_eq!(layout.scale_to_fit(800.0, 600.0), 1.0);
	}

	#[test]
	fn radial_children_split_the_circle_evenly() {
		let ids = ["r", "c1", "c2", "c3", "c4", "c5"];
		let edges = [("r", "c1"), ("r", "c2"), ("r", "c3"), ("r", "c4"), ("r", "c5")];
		let mut forest = Forest::build(&ids, &edges);
		forest.layout(Orientation::Radial, &TreeConfig::default());

		let mut angles: Vec<f64> = ids[1..]
			.iter()
			.map(|id| forest.node(id).unwrap().angle.unwrap())
			.collect();
		angles.sort_by(f64::total_cmp);
		assert!(angles.iter().all(|a| (0.0..TAU).contains(a)));
		assert!(angles.windows(2).all(|w| w[1] - w[0] > 1e-9));
		let gaps: f64 = angles.windows(2).map(|w| w[1] - w[0]).sum::<f64>()
			+ (TAU - angles[4] + angles[0]);
		assert!((gaps - TAU).abs() < 1e-9);

		let root = forest.node("r").unwrap();
		assert_eq!((root.x, root.y), (0.0, 0.0));
		let child = forest.node("c1").unwrap();
		assert!(((child.x.powi(2) + child.y.powi(2)).sqrt() - 80.0).abs() < 1e-9);
	}

	#[test]
	fn radial_trees_stack_in_bands() {
		let mut forest = Forest::build(&["a", "b", "c", "d"], &[("a", "b"), ("c", "d")]);
		let layout = forest.layout(Orientation::Radial, &TreeConfig::default());
		let c = forest.node("c").unwrap();
		let c_radius = (c.x.powi(2) + c.y.powi(2)).sqrt();
		assert!(c_radius > layout.trees[0].max_extent);
	}

	#[test]
	fn horizontal_is_vertical_with_axes_swapped() {
		let ids = ["a", "b", "c", "d"];
		let edges = [("a", "b"), ("a", "c"), ("c", "d")];
		let config = TreeConfig::default();
		let mut vertical = Forest::build(&ids, &edges);
		let v = vertical.layout(Orientation::Vertical, &config);
		let mut horizontal = Forest::build(&ids, &edges);
		let h = horizontal.layout(Orientation::Horizontal, &config);
		for id in ids {
			let (vn, hn) = (vertical.node(id).unwrap(), horizontal.node(id).unwrap());
			assert_eq!((vn.x, vn.y), (hn.y, hn.x));
		}
		assert_eq!((v.trees[0].width, v.trees[0].height), (h.trees[0].height, h.trees[0].width));
	}

	#[test]
	fn parents_center_over_children() {
		let mut forest = Forest::build(&["a", "b", "c"], &[("a", "b"), ("a", "c")]);
		forest.layout(Orientation::Vertical, &TreeConfig::default());
		let (a, b, c) = (
			forest.node("a").unwrap(),
			forest.node("b").unwrap(),
			forest.node("c").unwrap(),
		);
		assert_eq!(a.x, (b.x + c.x) / 2.0);
		assert!(a.y < b.y);
		assert_eq!(b.y, c.y);
	}

	#[test]
	fn cartesian_trees_do_not_overlap() {
		let ids = ["a", "a1", "a2", "b", "b1", "b2"];
		let edges = [("a", "a1"), ("a", "a2"), ("b", "b1"), ("b", "b2")];
		let mut forest = Forest::build(&ids, &edges);
		let layout = forest.layout(Orientation::Vertical, &TreeConfig::default());
		let max_first = ["a", "a1", "a2"]
			.iter()
			.map(|id| forest.node(id).unwrap().x)
			.fold(f64::MIN, f64::max);
		let min_second = ["b", "b1", "b2"]
			.iter()
			.map(|id| forest.node(id).unwrap().x)
			.fold(f64::MAX, f64::min);
		assert!(min_second > max_first);
		assert_eq!(layout.trees.len(), 2);
		assert!(layout.scale_to_fit(800.0, 600.0) > 0.0);
	}

	#[test]
	fn collapsed_nodes_hide_descendants() {
		let mut forest = Forest::build(&["a", "b", "c", "d"], &[("a", "b"), ("b", "c"), ("a", "d")]);
		assert!(forest.set_expanded("b", false));
		let layout = forest.layout(Orientation::Vertical, &TreeConfig::default());
		assert!(!forest.node("c").unwrap().visible);
		assert!(forest.node("b").unwrap().visible);
		assert_eq!(forest.links(), vec![("a", "b"), ("a", "d")]);
		assert_eq!(layout.trees[0].leaves, 2);
		assert!(!forest.set_expanded("zzz", false));
	}
}
