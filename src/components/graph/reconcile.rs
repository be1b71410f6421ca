//! Key-based set reconciliation.
//!
//! Matches a previous generation of records against the next one by a stable
//! key (vertex id, or `source-target` for edges) and splits the result into
//! enter, update and exit sets. Updates receive transient state from their
//! previous record through a caller-supplied `carry` function.

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};

/// Records with a stable reconciliation key.
pub trait Keyed {
	/// Identity of the item across generations.
	fn key(&self) -> Cow<'_, str>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Slot {
	Enter(usize),
	Update(usize),
}

/// Outcome of [`reconcile`].
///
/// `enter` and `update` are each in next-data order; [`Reconciliation::into_live`]
/// interleaves them back into that order. `exit` keeps previous order.
#[derive(Clone, Debug)]
pub struct Reconciliation<T> {
	/// Items whose key is new.
	pub enter: Vec<T>,
	/// Items whose key was already live, after the carry closure ran.
	pub update: Vec<T>,
	/// Previous items whose key is gone.
	pub exit: Vec<T>,
	order: Vec<Slot>,
}

impl<T> Reconciliation<T> {
	/// True when no key entered or exited.
	pub fn is_unchanged(&self) -> bool {
		self.enter.is_empty() && self.exit.is_empty()
	}

	/// The live set (enter + update) in next-data order; exits are dropped.
	pub fn into_live(self) -> Vec<T> {
		let mut enter: Vec<Option<T>> = self.enter.into_iter().map(Some).collect();
		let mut update: Vec<Option<T>> = self.update.into_iter().map(Some).collect();
		self.order
			.into_iter()
			.filter_map(|slot| match slot {
				Slot::Enter(i) => enter[i].take(),
				Slot::Update(i) => update[i].take(),
			})
			.collect()
	}
}

/// Reconciles `previous` with `next` using `key_fn`.
///
/// For each next record whose key existed before, `carry(&old, &mut new)` runs
/// before it lands in `update`. Repeated keys in `next` keep their first
/// occurrence only, so no key is ever both entered and exited.
pub fn reconcile_by<T, K, F, C>(previous: Vec<T>, next: Vec<T>, key_fn: F, mut carry: C) -> Reconciliation<T>
where
	F: Fn(&T) -> K,
	K: Eq + std::hash::Hash,
	C: FnMut(&T, &mut T),
{
	let mut old: HashMap<K, T> = HashMap::with_capacity(previous.len());
	let mut old_order = Vec::with_capacity(previous.len());
	for record in previous {
		let key = key_fn(&record);
		if !old.contains_key(&key) {
			old_order.push(key_fn(&record));
			old.insert(key, record);
		}
	}

	let mut seen = HashSet::with_capacity(next.len());
	let mut enter = Vec::new();
	let mut update = Vec::new();
	let mut order = Vec::with_capacity(next.len());
	for mut record in next {
		let key = key_fn(&record);
		if seen.contains(&key) {
			continue;
		}
		match old.remove(&key) {
			Some(prev) => {
				carry(&prev, &mut record);
				order.push(Slot::Update(update.len()));
				update.push(record);
			}
			None => {
				order.push(Slot::Enter(enter.len()));
				enter.push(record);
			}
		}
		seen.insert(key);
	}

	let exit = old_order
		.into_iter()
		.filter_map(|key| old.remove(&key))
		.collect();

	Reconciliation {
		enter,
		update,
		exit,
		order,
	}
}

/// [`reconcile_by`] keyed through [`Keyed`].
pub fn reconcile<T, C>(previous: Vec<T>, next: Vec<T>, carry: C) -> Reconciliation<T>
where
	T: Keyed,
	C: FnMut(&T, &mut T),
{
	reconcile_by(previous, next, |r| r.key().into_owned(), carry)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[derive(Clone, Debug, PartialEq)]
	struct Rec {
		id: &'static str,
		data: u32,
		transient: u32,
	}

	impl Keyed for Rec {
		fn key(&self) -> Cow<'_, str> {
			Cow::Borrowed(self.id)
		}
	}

	fn rec(id: &'static str, data: u32) -> Rec {
		Rec {
			id,
			data,
			transient: 0,
		}
	}

	fn ids(records: &[Rec]) -> Vec<&'static str> {
		records.iter().map(|r| r.id).collect()
	}

	#[test]
	fn splits_enter_update_exit() {
		let previous = vec![rec("a", 1), rec("b", 1), rec("c", 1)];
		let next = vec![rec("d", 2), rec("b", 2), rec("a", 2)];
		let result = reconcile(previous, next, |_, _| {});
		assert_eq!(ids(&result.enter), vec!["d"]);
		assert_eq!(ids(&result.update), vec!["b", "a"]);
		assert_eq!(ids(&result.exit), vec!["c"]);
		assert_eq!(ids(&result.into_live()), vec!["d", "b", "a"]);
	}

	#[test]
	fn updates_carry_transient_state() {
		let mut old = rec("a", 1);
		old.transient = 7;
		let result = reconcile(vec![old], vec![rec("a", 2)], |prev, next| {
			next.transient = prev.transient
		});
		assert_eq!(
			result.update,
			vec![Rec {
				id: "a",
				data: 2,
				transient: 7
			}]
		);
	}

	#[test]
	fn reconciling_same_data_twice_is_unchanged() {
		let data = vec![rec("a", 1), rec("b", 1)];
		let first = reconcile(Vec::new(), data.clone(), |_, _| {});
		assert_eq!(first.enter.len(), 2);
		let live = first.into_live();
		let second = reconcile(live, data, |_, _| {});
		assert!(second.is_unchanged());
		assert_eq!(second.update.len(), 2);
	}

	#[test]
	fn duplicate_next_keys_never_enter_and_exit() {
		let result = reconcile(
			vec![rec("a", 1)],
			vec![rec("a", 2), rec("a", 3), rec("b", 1), rec("b", 2)],
			|_, _| {},
		);
		assert_eq!(ids(&result.update), vec!["a"]);
		assert_eq!(result.update[0].data, 2);
		assert_eq!(ids(&result.enter), vec!["b"]);
		assert!(result.exit.is_empty());
	}

	#[test]
	fn custom_key_function() {
		let result = reconcile_by(vec![(1, "x")], vec![(1, "y"), (2, "z")], |r| r.0, |_, _| {});
		assert_eq!(result.update, vec![(1, "y")]);
		assert_eq!(result.enter, vec![(2, "z")]);
	}
}
