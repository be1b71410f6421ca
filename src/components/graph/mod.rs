//! Graph and tree visualization component.
//!
//! Renders an interactive graph on an HTML canvas with:
//! - Force-directed layout or a hierarchical tree layout (vertical,
//!   horizontal, radial)
//! - Pan, wheel zoom, zoom-to-fit and node dragging
//! - Off-screen locator arrows for vertices outside the view
//! - Keyed render records reconciled frame to frame, so vertices that
//!   persist keep their identity and new ones fade in
//!
//! The engine ([`GraphState`]) has no browser dependency; [`GraphCanvas`]
//! hosts it on a canvas and drives it from `requestAnimationFrame`.
//!
//! # Example
//!
//! ```ignore
//! use graph_plot::components::graph::{GraphCanvas, GraphData, GraphLink, GraphNode};
//!
//! let data = GraphData::new(
//!     vec![GraphNode::new("a").with_label("Node A"), GraphNode::new("b")],
//!     vec![GraphLink::directed("a", "b")],
//! );
//!
//! view! { <GraphCanvas data=data fullscreen=true /> }
//! ```

pub mod canvas;
mod component;
pub mod config;
pub mod events;
pub mod geometry;
pub mod highlight;
pub mod locator;
pub mod reconcile;
pub mod render;
pub mod scale;
pub mod simulation;
pub mod state;
pub mod theme;
pub mod tree;
pub mod types;
pub mod viewport;

pub use component::GraphCanvas;
pub use config::GraphConfig;
pub use events::{NodeClick, SpaceClick, SubscriptionId};
pub use state::GraphState;
pub use theme::Theme;
pub use types::{GraphData, GraphLink, GraphNode, LayoutMode, PlotKind};
pub use viewport::{Transform, Viewport};
