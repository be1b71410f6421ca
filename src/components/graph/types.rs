//! Graph data structures for input to the graph component.

use std::collections::HashSet;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use log::warn;
use serde::Deserialize;

use crate::error::{Error, Result};

/// Optional per-vertex style overrides. Missing fields fall back to the theme.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct VertexStyle {
	/// CSS fill color (e.g., "#ff0000" or "rgb(255, 0, 0)").
	pub fill: Option<String>,
	/// Fill radius in world units. Overrides the degree-derived size.
	pub radius: Option<f64>,
	/// CSS stroke color.
	pub stroke: Option<String>,
	/// Stroke width in screen pixels.
	pub stroke_width: Option<f64>,
}

/// A vertex in the graph.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct GraphNode {
	/// Unique identifier for this vertex. Used to reference vertices in links.
	pub id: String,
	/// Optional display label. Labeled vertices are rendered larger.
	#[serde(default)]
	pub label: Option<String>,
	/// Per-vertex style overrides.
	#[serde(default)]
	pub style: VertexStyle,
	/// Scalar fed through the colormap when `style.fill` is not set.
	#[serde(default)]
	pub value: Option<f64>,
	/// Draws a selection ring around the vertex.
	#[serde(default)]
	pub selected: bool,
	/// Collapsed vertices hide their descendants in tree layouts.
	#[serde(default = "default_expanded")]
	pub expanded: bool,
}

fn default_expanded() -> bool {
	true
}

impl GraphNode {
	/// Creates an expanded, unselected vertex with no label or style.
	pub fn new(id: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			label: None,
			style: VertexStyle::default(),
			value: None,
			selected: false,
			expanded: true,
		}
	}

	/// Sets the label.
	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	/// Sets the style overrides.
	pub fn with_style(mut self, style: VertexStyle) -> Self {
		self.style = style;
		self
	}

	/// Sets the colormap value.
	pub fn with_value(mut self, value: f64) -> Self {
		self.value = Some(value);
		self
	}

	/// Marks the vertex selected.
	pub fn selected(mut self, selected: bool) -> Self {
		self.selected = selected;
		self
	}

	/// Sets whether the subtree is shown in tree layouts.
	pub fn expanded(mut self, expanded: bool) -> Self {
		self.expanded = expanded;
		self
	}
}

/// Optional per-edge style overrides.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct LinkStyle {
	/// CSS stroke color.
	pub stroke: Option<String>,
	/// Line width in pixels.
	pub width: Option<f64>,
}

/// An edge between two vertices.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct GraphLink {
	/// Source vertex ID.
	pub source: String,
	/// Target vertex ID.
	pub target: String,
	/// Directed edges are drawn with an arrowhead at the target.
	#[serde(default)]
	pub directed: bool,
	/// Drawn at the edge midpoint.
	#[serde(default)]
	pub label: Option<String>,
	/// Per-edge style overrides.
	#[serde(default)]
	pub style: LinkStyle,
}

impl GraphLink {
	/// Creates an undirected edge.
	pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
			directed: false,
			label: None,
			style: LinkStyle::default(),
		}
	}

	/// Creates a directed edge.
	pub fn directed(source: impl Into<String>, target: impl Into<String>) -> Self {
		Self {
			directed: true,
			..Self::new(source, target)
		}
	}

	/// Reconciliation key, see [`edge_key`].
	pub fn key(&self) -> String {
		edge_key(&self.source, &self.target)
	}
}

/// Key for the edge `source → target`: the two ids joined by `-`.
///
/// A `-` or `\` inside an id is escaped with a backslash, so the only bare
/// `-` is the separator and distinct pairs never share a key.
pub fn edge_key(source: &str, target: &str) -> String {
	let mut key = String::with_capacity(source.len() + target.len() + 1);
	push_escaped(&mut key, source);
	key.push('-');
	push_escaped(&mut key, target);
	key
}

fn push_escaped(key: &mut String, id: &str) {
	for c in id.chars() {
		if c == '-' || c == '\\' {
			key.push('\\');
		}
		key.push(c);
	}
}

/// Complete graph data: vertices and links.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct GraphData {
	/// Vertices; ids must be unique.
	pub nodes: Vec<GraphNode>,
	/// Edges by vertex id.
	pub links: Vec<GraphLink>,
}

impl GraphData {
	/// Wraps vertices and links without validating them.
	pub fn new(nodes: Vec<GraphNode>, links: Vec<GraphLink>) -> Self {
		Self { nodes, links }
	}

	/// Decodes `{ nodes: [...], links: [...] }` and checks id uniqueness.
	pub fn from_json(json: &str) -> Result<Self> {
		let data: GraphData = serde_json::from_str(json)?;
		data.validate()?;
		Ok(data)
	}

	/// Rejects data sets where two vertices share an id.
	pub fn validate(&self) -> Result<()> {
		let mut seen = HashSet::with_capacity(self.nodes.len());
		for node in &self.nodes {
			if !seen.insert(node.id.as_str()) {
				return Err(Error::DuplicateVertex {
					id: node.id.clone(),
				});
			}
		}
		Ok(())
	}
}

/// Active layout. `None` runs the force simulation; the others are tree layouts.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "String")]
pub enum LayoutMode {
	/// Force-directed layout.
	#[default]
	None,
	/// Roots on the left, depth grows to the right.
	Horizontal,
	/// Roots on top, depth grows downward.
	Vertical,
	/// Roots at the center, depth grows outward.
	Radial,
}

impl LayoutMode {
	/// True for the tree layouts.
	pub fn is_tree(self) -> bool {
		self != LayoutMode::None
	}

	/// Lowercase name, as accepted by `from_str`.
	pub fn as_str(self) -> &'static str {
		match self {
			LayoutMode::None => "none",
			LayoutMode::Horizontal => "horizontal",
			LayoutMode::Vertical => "vertical",
			LayoutMode::Radial => "radial",
		}
	}
}

impl FromStr for LayoutMode {
	type Err = Infallible;

	/// Unknown names fall back to [`LayoutMode::None`].
	fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
		Ok(match s.trim().to_ascii_lowercase().as_str() {
			"" | "none" => LayoutMode::None,
			"horizontal" => LayoutMode::Horizontal,
			"vertical" => LayoutMode::Vertical,
			"radial" => LayoutMode::Radial,
			other => {
				warn!("unknown layout mode {other:?}, using none");
				LayoutMode::None
			}
		})
	}
}

impl From<String> for LayoutMode {
	fn from(s: String) -> Self {
		s.parse().unwrap_or_default()
	}
}

impl fmt::Display for LayoutMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Chart kinds a host may request. Only graph and tree kinds are drawn here.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PlotKind {
	/// Scatter plot.
	Scatter,
	/// Line chart.
	Line,
	/// Histogram.
	Histogram,
	/// Donut chart.
	Donut,
	/// Heatmap.
	Heatmap,
	/// Force-directed graph.
	#[default]
	Graph,
	/// Tree layout.
	Tree,
}

impl PlotKind {
	/// Initial layout for kinds this engine draws, `None` for the rest.
	pub fn layout_mode(self) -> Option<LayoutMode> {
		match self {
			PlotKind::Graph => Some(LayoutMode::None),
			PlotKind::Tree => Some(LayoutMode::Vertical),
			PlotKind::Scatter
			| PlotKind::Line
			| PlotKind::Histogram
			| PlotKind::Donut
			| PlotKind::Heatmap => None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_graph_json_with_defaults() {
		let data = GraphData::from_json(
			r#"{
				"nodes": [{ "id": "a", "label": "A" }, { "id": "b", "expanded": false }],
				"links": [{ "source": "a", "target": "b", "directed": true }]
			}"#,
		)
		.unwrap();
		assert_eq!(data.nodes.len(), 2);
		assert!(data.nodes[0].expanded);
		assert!(!data.nodes[1].expanded);
		assert_eq!(data.nodes[1].style, VertexStyle::default());
		assert!(data.links[0].directed);
		assert_eq!(data.links[0].key(), "a-b");
	}

	#[test]
	fn edge_keys_escape_separators_inside_ids() {
		assert_eq!(edge_key("a", "b"), "a-b");
		assert_eq!(edge_key("a-b", "c"), r"a\-b-c");
		assert_eq!(edge_key("a", "b-c"), r"a-b\-c");
		assert_ne!(edge_key("a-b", "c"), edge_key("a", "b-c"));
		assert_ne!(edge_key(r"a\", "b"), edge_key("a", r"\b"));
	}

	#[test]
	fn rejects_duplicate_ids() {
		let err = GraphData::from_json(r#"{ "nodes": [{ "id": "a" }, { "id": "a" }], "links": [] }"#)
			.unwrap_err();
		assert!(matches!(err, Error::DuplicateVertex { ref id } if id == "a"));
	}

	#[test]
	fn malformed_json_is_a_parse_error() {
		assert!(matches!(GraphData::from_json("{"), Err(Error::Parse(_))));
	}

	#[test]
	fn unknown_layout_mode_falls_back_to_none() {
		assert_eq!("radial".parse::<LayoutMode>(), Ok(LayoutMode::Radial));
		assert_eq!(" Horizontal ".parse::<LayoutMode>(), Ok(LayoutMode::Horizontal));
		assert_eq!("spiral".parse::<LayoutMode>(), Ok(LayoutMode::None));
		let mode: LayoutMode = serde_json::from_str(r#""sideways""#).unwrap();
		assert_eq!(mode, LayoutMode::None);
	}

	#[test]
	fn only_graph_and_tree_kinds_have_layouts() {
		assert_eq!(PlotKind::Graph.layout_mode(), Some(LayoutMode::None));
		assert_eq!(PlotKind::Tree.layout_mode(), Some(LayoutMode::Vertical));
		assert_eq!(PlotKind::Donut.layout_mode(), None);
	}
}
