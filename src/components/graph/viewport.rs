//! Pan and zoom viewport.
//!
//! The [`Transform`] is the single source of truth for what is on screen:
//! `screen = data * k + (x, y)`. Pointer gestures and programmatic
//! [`Viewport::zoom_to_fit`] both change it, and every change is emitted
//! synchronously to subscribers.

use log::debug;
use serde::Deserialize;

use super::events::{EventChannel, SubscriptionId};
use super::geometry::Bounds;

/// Pan and zoom transform from data space to screen space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
	/// Horizontal translation in screen pixels.
	pub x: f64,
	/// Vertical translation in screen pixels.
	pub y: f64,
	/// Zoom factor (1.0 = 100%).
	pub k: f64,
}

impl Default for Transform {
	fn default() -> Self {
		Self::IDENTITY
	}
}

impl Transform {
	/// No pan, zoom 1.
	pub const IDENTITY: Transform = Transform {
		x: 0.0,
		y: 0.0,
		k: 1.0,
	};

	/// Transform with translation `(x, y)` and zoom `k`.
	pub fn new(x: f64, y: f64, k: f64) -> Self {
		Self { x, y, k }
	}

	/// Data space to screen space.
	pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
		(x * self.k + self.x, y * self.k + self.y)
	}

	/// Screen space to data space.
	pub fn invert(&self, sx: f64, sy: f64) -> (f64, f64) {
		((sx - self.x) / self.k, (sy - self.y) / self.k)
	}

	/// Rescales to `k`, keeping the data point under screen `(sx, sy)` fixed.
	pub fn zoom_about(&self, sx: f64, sy: f64, k: f64) -> Self {
		let ratio = k / self.k;
		Self {
			x: sx - (sx - self.x) * ratio,
			y: sy - (sy - self.y) * ratio,
			k,
		}
	}

	/// Interpolates toward `to`; scale is interpolated geometrically.
	fn lerp(&self, to: &Transform, t: f64) -> Self {
		Self {
			x: self.x + (to.x - self.x) * t,
			y: self.y + (to.y - self.y) * t,
			k: self.k * (to.k / self.k).powf(t),
		}
	}
}

/// Modifier keys held during a gesture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
	/// Control key.
	pub ctrl: bool,
	/// Shift key.
	pub shift: bool,
	/// Alt key.
	pub alt: bool,
	/// Meta key.
	pub meta: bool,
}

/// Pointer input in screen pixels relative to the plot area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Gesture {
	/// Pointer pressed.
	DragStart {
		/// Pointer x.
		x: f64,
		/// Pointer y.
		y: f64,
		/// DOM button index; 0 is the primary button.
		button: i16,
		/// Keys held at press time.
		modifiers: Modifiers,
	},
	/// Pointer moved while pressed.
	Drag {
		/// Pointer x.
		x: f64,
		/// Pointer y.
		y: f64,
	},
	/// Pointer released.
	DragEnd,
	/// Wheel scrolled.
	Wheel {
		/// Pointer x.
		x: f64,
		/// Pointer y.
		y: f64,
		/// Scroll amount; positive zooms out.
		delta_y: f64,
		/// Keys held while scrolling.
		modifiers: Modifiers,
	},
	/// Reserved for node expand/collapse; never zooms.
	DoubleClick {
		/// Pointer x.
		x: f64,
		/// Pointer y.
		y: f64,
	},
}

/// Viewport tuning.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewportConfig {
	/// Allowed zoom range `(min, max)`.
	pub scale_extent: (f64, f64),
	/// Zoom factor applied per wheel notch.
	pub wheel_factor: f64,
	/// Extra room around fitted bounds, as a fraction of their size.
	pub fit_padding: f64,
	/// Duration of the zoom-to-fit transition in milliseconds.
	pub transition_ms: f64,
}

impl Default for ViewportConfig {
	fn default() -> Self {
		Self {
			scale_extent: (0.02, 50.0),
			wheel_factor: 1.1,
			fit_padding: 0.25,
			transition_ms: 500.0,
		}
	}
}

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Copy, Debug)]
struct PanState {
	start_x: f64,
	start_y: f64,
	transform_start: Transform,
}

#[derive(Clone, Copy, Debug)]
struct Transition {
	from: Transform,
	to: Transform,
	duration_ms: f64,
	elapsed_ms: f64,
}

fn ease_cubic_in_out(t: f64) -> f64 {
	if t < 0.5 {
		4.0 * t * t * t
	} else {
		let u = -2.0 * t + 2.0;
		1.0 - u * u * u / 2.0
	}
}

/// Owns the transform, the viewport size, gesture state and subscribers.
pub struct Viewport {
	transform: Transform,
	width: f64,
	height: f64,
	config: ViewportConfig,
	pan: Option<PanState>,
	transition: Option<Transition>,
	changes: EventChannel<Transform>,
}

impl Viewport {
	/// Viewport of the given size, centered on the data origin at zoom 1.
	pub fn new(width: f64, height: f64, config: ViewportConfig) -> Self {
		Self {
			transform: Transform::new(width / 2.0, height / 2.0, 1.0),
			width,
			height,
			config,
			pan: None,
			transition: None,
			changes: EventChannel::new(),
		}
	}

	/// Current transform.
	pub fn transform(&self) -> Transform {
		self.transform
	}

	/// Where the transform is heading: the transition end, or the current transform.
	pub fn target(&self) -> Transform {
		self.transition.map_or(self.transform, |t| t.to)
	}

	/// Viewport width and height in pixels.
	pub fn size(&self) -> (f64, f64) {
		(self.width, self.height)
	}

	/// Updates the size; the transform is left unchanged.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	/// True while a zoom-to-fit transition runs.
	pub fn is_animating(&self) -> bool {
		self.transition.is_some()
	}

	/// True between a pan start and its end.
	pub fn is_panning(&self) -> bool {
		self.pan.is_some()
	}

	/// Subscribes to every transform change.
	pub fn subscribe(&mut self, callback: impl FnMut(&Transform) + 'static) -> SubscriptionId {
		self.changes.subscribe(callback)
	}

	/// Removes a subscription. False when the id was unknown.
	pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
		self.changes.unsubscribe(id)
	}

	/// Sets the transform immediately, cancelling any transition.
	pub fn set_transform(&mut self, transform: Transform) {
		self.transition = None;
		self.update(transform);
	}

	fn update(&mut self, transform: Transform) {
		if transform == self.transform {
			return;
		}
		self.transform = transform;
		self.changes.emit(&transform);
	}

	fn clamp_k(&self, k: f64) -> f64 {
		let (min, max) = self.config.scale_extent;
		k.clamp(min, max)
	}

	/// Frames `bounds` with `padding` around them, animated over the configured duration.
	///
	/// Returns false (and leaves the transform alone) for zero-extent bounds or
	/// an empty viewport.
	pub fn zoom_to_fit(&mut self, bounds: &Bounds, padding: f64) -> bool {
		if bounds.is_degenerate() || self.width <= 0.0 || self.height <= 0.0 {
			return false;
		}
		let s = (1.0 + padding) * (bounds.width() / self.width).max(bounds.height() / self.height);
		if !(s.is_finite() && s > 0.0) {
			return false;
		}
		let k = self.clamp_k(1.0 / s);
		let (cx, cy) = bounds.center();
		let to = Transform::new(self.width / 2.0 - k * cx, self.height / 2.0 - k * cy, k);
		debug!("viewport: zoom to fit k={:.3}", k);
		if self.config.transition_ms <= 0.0 {
			self.set_transform(to);
		} else {
			self.transition = Some(Transition {
				from: self.transform,
				to,
				duration_ms: self.config.transition_ms,
				elapsed_ms: 0.0,
			});
		}
		true
	}

	/// Advances any running transition by `dt_ms`. Returns whether the transform changed.
	pub fn advance(&mut self, dt_ms: f64) -> bool {
		let Some(mut transition) = self.transition else {
			return false;
		};
		transition.elapsed_ms += dt_ms.max(0.0);
		let t = (transition.elapsed_ms / transition.duration_ms).min(1.0);
		let next = transition
			.from
			.lerp(&transition.to, ease_cubic_in_out(t));
		self.transition = (t < 1.0).then_some(transition);
		let before = self.transform;
		self.update(if t < 1.0 { next } else { transition.to });
		before != self.transform
	}

	/// Applies pointer input. Returns whether the gesture was consumed.
	///
	/// Drags with a non-primary button or with ctrl held are ignored, as are
	/// double clicks.
	pub fn on_gesture(&mut self, gesture: Gesture) -> bool {
		match gesture {
			Gesture::DragStart {
				x,
				y,
				button,
				modifiers,
			} => {
				if button != 0 || modifiers.ctrl {
					return false;
				}
				self.transition = None;
				self.pan = Some(PanState {
					start_x: x,
					start_y: y,
					transform_start: self.transform,
				});
				true
			}
			Gesture::Drag { x, y } => {
				let Some(pan) = self.pan else {
					return false;
				};
				self.update(Transform {
					x: pan.transform_start.x + (x - pan.start_x),
					y: pan.transform_start.y + (y - pan.start_y),
					k: pan.transform_start.k,
				});
				true
			}
			Gesture::DragEnd => self.pan.take().is_some(),
			Gesture::Wheel { x, y, delta_y, .. } => {
				if delta_y == 0.0 {
					return false;
				}
				self.transition = None;
				let factor = if delta_y > 0.0 {
					1.0 / self.config.wheel_factor
				} else {
					self.config.wheel_factor
				};
				let k = self.clamp_k(self.transform.k * factor);
				self.update(self.transform.zoom_about(x, y, k));
				true
			}
			Gesture::DoubleClick { .. } => false,
		}
	}
}
