//! Typed event channels and click disambiguation.
//!
//! [`EventChannel`] is a single-threaded observer list: listeners subscribe for
//! every emission or for the next one only, and can be removed by id.
//! [`ClickTracker`] turns raw pointer clicks into single or double clicks using
//! a click counter and a time window instead of platform `dblclick` events.

use std::fmt;

/// Handle returned by [`EventChannel::subscribe`], used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Delivery {
	Every,
	Once,
}

struct Listener<T> {
	id: SubscriptionId,
	delivery: Delivery,
	callback: Box<dyn FnMut(&T)>,
}

/// Observer list for one event type.
pub struct EventChannel<T> {
	next_id: u64,
	listeners: Vec<Listener<T>>,
}

impl<T> Default for EventChannel<T> {
	fn default() -> Self {
		Self {
			next_id: 0,
			listeners: Vec::new(),
		}
	}
}

impl<T> fmt::Debug for EventChannel<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("EventChannel")
			.field("listeners", &self.listeners.len())
			.finish()
	}
}

impl<T> EventChannel<T> {
	/// Creates a channel with no subscribers.
	pub fn new() -> Self {
		Self::default()
	}

	/// Calls `callback` on every emission until unsubscribed.
	pub fn subscribe(&mut self, callback: impl FnMut(&T) + 'static) -> SubscriptionId {
		self.add(Delivery::Every, Box::new(callback))
	}

	/// Calls `callback` on the next emission only.
	pub fn subscribe_once(&mut self, callback: impl FnMut(&T) + 'static) -> SubscriptionId {
		self.add(Delivery::Once, Box::new(callback))
	}

	fn add(&mut self, delivery: Delivery, callback: Box<dyn FnMut(&T)>) -> SubscriptionId {
		let id = SubscriptionId(self.next_id);
		self.next_id += 1;
		self.listeners.push(Listener {
			id,
			delivery,
			callback,
		});
		id
	}

	/// Returns false if `id` was not subscribed (or a once-listener already fired).
	pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
		let before = self.listeners.len();
		self.listeners.retain(|l| l.id != id);
		self.listeners.len() != before
	}

	/// Delivers `event` synchronously in subscription order. Returns the number of listeners called.
	pub fn emit(&mut self, event: &T) -> usize {
		let delivered = self.listeners.len();
		for listener in &mut self.listeners {
			(listener.callback)(event);
		}
		self.listeners.retain(|l| l.delivery == Delivery::Every);
		delivered
	}

	/// Number of live subscriptions.
	pub fn len(&self) -> usize {
		self.listeners.len()
	}

	/// Whether nobody is subscribed.
	pub fn is_empty(&self) -> bool {
		self.listeners.is_empty()
	}
}

/// What a click landed on.
#[derive(Clone, Debug, PartialEq)]
pub enum ClickTarget {
	/// A vertex, by id.
	Node(String),
	/// Empty canvas at a plot-area position.
	Empty {
		/// Plot-area x in pixels.
		x: f64,
		/// Plot-area y in pixels.
		y: f64,
	},
}

impl ClickTarget {
	fn same_as(&self, other: &ClickTarget) -> bool {
		match (self, other) {
			(ClickTarget::Node(a), ClickTarget::Node(b)) => a == b,
			(ClickTarget::Empty { .. }, ClickTarget::Empty { .. }) => true,
			_ => false,
		}
	}
}

/// A resolved click.
#[derive(Clone, Debug, PartialEq)]
pub enum Click {
	/// No second click arrived within the window.
	Single(ClickTarget),
	/// Two clicks on the same target within the window.
	Double(ClickTarget),
}

#[derive(Clone, Debug)]
struct PendingClick {
	target: ClickTarget,
	at_ms: f64,
}

/// Disambiguates single from double clicks.
///
/// A first click is held for `window_ms`. A second click on the same target
/// inside the window resolves as [`Click::Double`]; otherwise the held click
/// resolves as [`Click::Single`] once the window passes (see [`ClickTracker::poll`])
/// or when a click on a different target arrives.
#[derive(Clone, Debug)]
pub struct ClickTracker {
	window_ms: f64,
	pending: Option<PendingClick>,
}

impl ClickTracker {
	/// Creates a tracker that holds a first click for `window_ms`.
	pub fn new(window_ms: f64) -> Self {
		Self {
			window_ms: window_ms.max(0.0),
			pending: None,
		}
	}

	/// Records a click at `now_ms`, returning any click that resolved because of it.
	pub fn register(&mut self, target: ClickTarget, now_ms: f64) -> Option<Click> {
		match self.pending.take() {
			Some(prev) if prev.target.same_as(&target) && now_ms - prev.at_ms <= self.window_ms => {
				Some(Click::Double(prev.target))
			}
			Some(prev) => {
				self.pending = Some(PendingClick {
					target,
					at_ms: now_ms,
				});
				Some(Click::Single(prev.target))
			}
			None => {
				self.pending = Some(PendingClick {
					target,
					at_ms: now_ms,
				});
				None
			}
		}
	}

	/// Resolves a held click as single once its window has elapsed.
	pub fn poll(&mut self, now_ms: f64) -> Option<Click> {
		let expired = self
			.pending
			.as_ref()
			.is_some_and(|p| now_ms - p.at_ms > self.window_ms);
		if expired {
			self.pending.take().map(|p| Click::Single(p.target))
		} else {
			None
		}
	}

	/// Whether a first click is waiting for its window to pass.
	pub fn is_pending(&self) -> bool {
		self.pending.is_some()
	}
}

/// Payload for node click events.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeClick {
	/// Id of the clicked vertex.
	pub id: String,
}

/// Payload for clicks on empty canvas, in screen pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpaceClick {
	/// Plot-area x of the click.
	pub x: f64,
	/// Plot-area y of the click.
	pub y: f64,
}

/// Subscriptions exposed by [`GraphState`](super::state::GraphState).
#[derive(Debug, Default)]
pub struct GraphEvents {
	/// A vertex clicked once.
	pub single_click_node: EventChannel<NodeClick>,
	/// A vertex double clicked. Fired after the subtree toggle in tree layouts.
	pub double_click_node: EventChannel<NodeClick>,
	/// Empty canvas clicked, once or twice.
	pub click_empty_space: EventChannel<SpaceClick>,
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;
	use std::rc::Rc;

	use super::*;

	#[test]
	fn every_and_once_delivery() {
		let seen = Rc::new(RefCell::new(Vec::new()));
		let mut channel = EventChannel::<u32>::new();
		let s = seen.clone();
		channel.subscribe(move |v| s.borrow_mut().push(("every", *v)));
		let s = seen.clone();
		channel.subscribe_once(move |v| s.borrow_mut().push(("once", *v)));

		assert_eq!(channel.emit(&1), 2);
		assert_eq!(channel.emit(&2), 1);
		assert_eq!(
			*seen.borrow(),
			vec![("every", 1), ("once", 1), ("every", 2)]
		);
	}

	#[test]
	fn unsubscribe_stops_delivery() {
		let count = Rc::new(RefCell::new(0));
		let mut channel = EventChannel::<()>::new();
		let c = count.clone();
		let id = channel.subscribe(move |_| *c.borrow_mut() += 1);
		channel.emit(&());
		assert!(channel.unsubscribe(id));
		assert!(!channel.unsubscribe(id));
		channel.emit(&());
		assert_eq!(*count.borrow(), 1);
		assert!(channel.is_empty());
	}

	#[test]
	fn two_quick_clicks_are_a_double_click() {
		let mut clicks = ClickTracker::new(250.0);
		let node = || ClickTarget::Node("a".into());
		assert_eq!(clicks.register(node(), 0.0), None);
		assert_eq!(clicks.register(node(), 120.0), Some(Click::Double(node())));
		assert!(!clicks.is_pending());
		assert_eq!(clicks.poll(1000.0), None);
	}

	#[test]
	fn lone_click_resolves_after_window() {
		let mut clicks = ClickTracker::new(250.0);
		clicks.register(ClickTarget::Empty { x: 1.0, y: 2.0 }, 0.0);
		assert_eq!(clicks.poll(200.0), None);
		assert_eq!(
			clicks.poll(251.0),
			Some(Click::Single(ClickTarget::Empty { x: 1.0, y: 2.0 }))
		);
	}

	#[test]
	fn slow_or_different_second_click_flushes_the_first() {
		let mut clicks = ClickTracker::new(250.0);
		clicks.register(ClickTarget::Node("a".into()), 0.0);
		assert_eq!(
			clicks.register(ClickTarget::Node("b".into()), 50.0),
			Some(Click::Single(ClickTarget::Node("a".into())))
		);
		assert_eq!(
			clicks.register(ClickTarget::Node("b".into()), 400.0),
			Some(Click::Single(ClickTarget::Node("b".into())))
		);
		assert!(clicks.is_pending());
	}
}
