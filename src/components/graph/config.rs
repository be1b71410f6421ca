//! Engine configuration, decodable from the `graph-config` script element.

use serde::Deserialize;

use super::geometry::SizeConfig;
use super::simulation::ForceConfig;
use super::tree::TreeConfig;
use super::types::LayoutMode;
use super::viewport::ViewportConfig;
use crate::error::Result;

/// Everything [`GraphState`](super::state::GraphState) needs to start.
///
/// Every field has a default, so `{}` is a complete configuration.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct GraphConfig {
	/// Outer surface size and margins.
	pub size: SizeConfig,
	/// Force simulation parameters.
	pub forces: ForceConfig,
	/// Spacing for the tree layouts.
	pub tree: TreeConfig,
	/// Zoom limits, wheel factor and fit transition.
	pub viewport: ViewportConfig,
	/// Distance in pixels between a locator and the viewport edge.
	pub locator_inset: f64,
	/// Time in milliseconds within which a second click counts as a double click.
	pub click_window_ms: f64,
	/// Colormap for vertices that carry a `value` but no fill.
	pub colormap: Option<String>,
	/// Initial layout mode.
	pub layout: LayoutMode,
	/// Frames over which newly entered records fade in.
	pub fade_in_frames: u32,
}

impl Default for GraphConfig {
	fn default() -> Self {
		Self {
			size: SizeConfig::default(),
			forces: ForceConfig::default(),
			tree: TreeConfig::default(),
			viewport: ViewportConfig::default(),
			locator_inset: 12.0,
			click_window_ms: 250.0,
			colormap: None,
			layout: LayoutMode::None,
			fade_in_frames: 12,
		}
	}
}

impl GraphConfig {
	/// Decodes a configuration from JSON. Missing fields take their defaults.
	pub fn from_json(json: &str) -> Result<Self> {
		Ok(serde_json::from_str(json)?)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_object_is_the_default() {
		assert_eq!(GraphConfig::from_json("{}").unwrap(), GraphConfig::default());
	}

	#[test]
	fn partial_sections_keep_other_defaults() {
		let config = GraphConfig::from_json(
			r#"{
				"layout": "Radial",
				"colormap": "viridis",
				"forces": { "charge": -120 },
				"viewport": { "transition_ms": 0 },
				"size": { "width": 400 }
			}"#,
		)
		.unwrap();
		assert_eq!(config.layout, LayoutMode::Radial);
		assert_eq!(config.colormap.as_deref(), Some("viridis"));
		assert_eq!(config.forces.charge, -120.0);
		assert_eq!(config.forces.link_distance, 30.0);
		assert_eq!(config.viewport.transition_ms, 0.0);
		assert_eq!(config.viewport.fit_padding, 0.25);
		assert_eq!(config.size.width, 400.0);
		assert_eq!(config.size.height, 600.0);
		assert_eq!(config.click_window_ms, 250.0);
	}

	#[test]
	fn malformed_config_is_a_parse_error() {
		assert!(matches!(
			GraphConfig::from_json("{ \"layout\": 3 }"),
			Err(crate::error::Error::Parse(_))
		));
	}
}
