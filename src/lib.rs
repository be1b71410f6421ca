//! graph-plot: Interactive graph and tree visualization.
//!
//! This crate provides a WASM-based plot component that lays graphs out with a
//! force simulation or as hierarchical trees, with pan/zoom, off-screen
//! locators, and keyed incremental rendering onto a canvas.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;
pub mod error;

pub use components::graph::{GraphCanvas, GraphConfig, GraphData, GraphLink, GraphNode, GraphState, LayoutMode, PlotKind};
pub use error::{Error, Result};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("graph-plot: logging initialized");
}

/// Text of the script element with the given id.
fn script_text(id: &str) -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(id)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Decodes the JSON in script element `id`, logging and discarding bad input.
fn load_script<T: DeserializeOwned>(id: &str) -> Option<T> {
	let json_text = script_text(id)?;
	match serde_json::from_str::<T>(&json_text) {
		Ok(value) => Some(value),
		Err(e) => {
			warn!("graph-plot: failed to parse #{id}: {}", Error::from(e));
			None
		}
	}
}

/// Load graph data from a script element with id="graph-data".
/// Expected format: JSON with { nodes: [...], links: [...] }
fn load_graph_data() -> Option<GraphData> {
	let data: GraphData = load_script("graph-data")?;
	if let Err(e) = data.validate() {
		warn!("graph-plot: rejected graph data: {e}");
		return None;
	}
	info!(
		"graph-plot: loaded {} nodes, {} links",
		data.nodes.len(),
		data.links.len()
	);
	Some(data)
}

/// Load engine settings from a script element with id="graph-config".
fn load_graph_config() -> Option<GraphConfig> {
	load_script("graph-config")
}

/// Main application component.
/// Loads graph data and settings from the DOM and renders the plot.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let graph_data = load_graph_data().unwrap_or_default();
	let graph_signal = Signal::derive(move || graph_data.clone());
	let config = load_graph_config().unwrap_or_default();
	let kind = if config.layout.is_tree() {
		PlotKind::Tree
	} else {
		PlotKind::Graph
	};

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Graph Plot" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-graph">
			<GraphCanvas data=graph_signal config=config kind=kind fullscreen=true />
			<div class="graph-overlay">
				<h1>"Graph"</h1>
				<p class="subtitle">"Drag nodes to pin them. Scroll to zoom. Drag background to pan. Double-click to collapse."</p>
			</div>
		</div>
	}
}
