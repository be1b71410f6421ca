//! Hover highlighting with smooth fades.
//!
//! Every highlighted vertex carries its own intensity in `[0, 1]` that eases
//! toward 1 while it is the hovered vertex or one of its neighbours, and back
//! toward 0 afterwards. A short hold keeps the highlight from flickering when
//! the pointer skims the edge of a hit area.

use std::collections::{HashMap, HashSet};

/// Seconds a highlight stays at full strength after the pointer leaves.
const MIN_HOLD_TIME: f64 = 0.12;
const FADE_IN_SPEED: f64 = 6.0;
const FADE_OUT_SPEED: f64 = 4.0;
/// Intensities below this are dropped.
const VISIBLE: f64 = 0.005;

/// Per-vertex hover intensities, keyed by vertex id.
#[derive(Clone, Debug, Default)]
pub struct HighlightState {
	hovered: Option<String>,
	targets: HashSet<String>,
	intensity: HashMap<String, f64>,
	ring: HashMap<String, f64>,
	hold: HashMap<String, f64>,
	max: f64,
}

impl HighlightState {
	/// Id of the hovered vertex, if any.
	pub fn hovered(&self) -> Option<&str> {
		self.hovered.as_deref()
	}

	/// Hovers `id` (or nothing) and highlights its neighbours along `links`.
	pub fn set_hover<'a>(&mut self, id: Option<&str>, links: impl IntoIterator<Item = (&'a str, &'a str)>) {
		if self.hovered.as_deref() == id {
			return;
		}
		self.hovered = id.map(str::to_owned);
		self.targets.clear();
		let Some(id) = id else {
			return;
		};
		self.targets.insert(id.to_owned());
		for (source, target) in links {
			if source == id {
				self.targets.insert(target.to_owned());
			} else if target == id {
				self.targets.insert(source.to_owned());
			}
		}
		for target in &self.targets {
			self.hold.insert(target.clone(), MIN_HOLD_TIME);
		}
	}

	/// Eases intensities toward their targets over `dt` seconds.
	pub fn tick(&mut self, dt: f64) {
		let rise = 1.0 - (-FADE_IN_SPEED * dt).exp();
		let decay = (-FADE_OUT_SPEED * dt).exp();

		for id in &self.targets {
			let value = self.intensity.entry(id.clone()).or_insert(0.0);
			*value += (1.0 - *value) * rise;
		}
		if let Some(id) = &self.hovered {
			let value = self.ring.entry(id.clone()).or_insert(0.0);
			*value += (1.0 - *value) * rise;
		}

		let targets = &self.targets;
		self.hold.retain(|id, remaining| {
			if targets.contains(id) {
				return true;
			}
			*remaining -= dt;
			*remaining > 0.0
		});

		let hold = &self.hold;
		let mut max: f64 = 0.0;
		self.intensity.retain(|id, value| {
			if !targets.contains(id) && !hold.contains_key(id) {
				*value *= decay;
			}
			max = max.max(*value);
			*value > VISIBLE
		});

		let hovered = self.hovered.as_deref();
		self.ring.retain(|id, value| {
			if hovered != Some(id.as_str()) && !hold.contains_key(id) {
				*value *= decay;
			}
			*value > VISIBLE
		});
		self.max = max;
	}

	/// Drops state for vertices that no longer exist.
	pub fn retain(&mut self, live: impl Fn(&str) -> bool) {
		self.intensity.retain(|id, _| live(id));
		self.ring.retain(|id, _| live(id));
		self.hold.retain(|id, _| live(id));
		self.targets.retain(|id| live(id));
		if self.hovered.as_deref().is_some_and(|id| !live(id)) {
			self.hovered = None;
		}
	}

	/// Smoothed intensity of a vertex: 1 for the hovered vertex and its neighbours, fading to 0.
	pub fn node_intensity(&self, id: &str) -> f64 {
		self.intensity.get(id).copied().unwrap_or(0.0)
	}

	/// Intensity of the hover ring, which only follows the hovered vertex.
	pub fn ring_intensity(&self, id: &str) -> f64 {
		self.ring.get(id).copied().unwrap_or(0.0)
	}

	/// Geometric mean of the endpoint intensities.
	pub fn edge_intensity(&self, source: &str, target: &str) -> f64 {
		(self.node_intensity(source) * self.node_intensity(target)).sqrt()
	}

	/// Largest vertex intensity after the last tick.
	pub fn max_intensity(&self) -> f64 {
		self.max
	}
}
