// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Event and user property maps.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A JSON object of properties attached to an event or a user.
///
/// Values are forwarded to the native SDK untouched, so anything
/// representable as JSON is accepted.
///
/// # Example
///
/// ```
/// use loom_native_analytics_core::Properties;
///
/// let props = Properties::new()
///     .insert("item", "x")
///     .insert("quantity", 2)
///     .insert("gift", false);
/// assert_eq!(props.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Properties {
	inner: Map<String, Value>,
}

impl Properties {
	/// Creates an empty property map.
	pub fn new() -> Self {
		Self { inner: Map::new() }
	}

	/// Adds a property, replacing any previous value under the same key.
	pub fn insert<K, V>(mut self, key: K, value: V) -> Self
	where
		K: Into<String>,
		V: Into<Value>,
	{
		self.inner.insert(key.into(), value.into());
		self
	}

	/// Extends this map with `other`. Keys in `other` win.
	pub fn merge(mut self, other: Properties) -> Self {
		self.inner.extend(other.inner);
		self
	}

	pub fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}

	pub fn len(&self) -> usize {
		self.inner.len()
	}

	pub fn get(&self, key: &str) -> Option<&Value> {
		self.inner.get(key)
	}

	/// Builds properties from an arbitrary JSON value.
	///
	/// Returns `None` unless the value is an object.
	pub fn from_value(value: Value) -> Option<Self> {
		match value {
			Value::Object(inner) => Some(Self { inner }),
			_ => None,
		}
	}

	pub fn into_value(self) -> Value {
		Value::Object(self.inner)
	}
}

impl From<Map<String, Value>> for Properties {
	fn from(inner: Map<String, Value>) -> Self {
		Self { inner }
	}
}

impl From<Properties> for Value {
	fn from(props: Properties) -> Self {
		props.into_value()
	}
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Properties {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		iter
			.into_iter()
			.fold(Self::new(), |props, (k, v)| props.insert(k, v))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use serde_json::json;

	#[test]
	fn new_is_empty() {
		let props = Properties::new();
		assert!(props.is_empty());
		assert_eq!(props.len(), 0);
	}

	#[test]
	fn insert_replaces_existing_key() {
		let props = Properties::new().insert("plan", "free").insert("plan", "pro");
		assert_eq!(props.len(), 1);
		assert_eq!(props.get("plan"), Some(&json!("pro")));
	}

	#[test]
	fn merge_prefers_other() {
		let base = Properties::new().insert("a", 1).insert("b", 2);
		let overlay = Properties::new().insert("b", 20).insert("c", 3);

		let merged = base.merge(overlay);

		assert_eq!(merged.into_value(), json!({"a": 1, "b": 20, "c": 3}));
	}

	#[test]
	fn from_value_requires_object() {
		assert!(Properties::from_value(json!({"item": "x"})).is_some());
		assert!(Properties::from_value(json!("item")).is_none());
		assert!(Properties::from_value(Value::Null).is_none());
	}

	#[test]
	fn serializes_as_plain_object() {
		let props = Properties::new().insert("item", "x");
		assert_eq!(serde_json::to_string(&props).unwrap(), r#"{"item":"x"}"#);

		let parsed: Properties = serde_json::from_str(r#"{"count":3}"#).unwrap();
		assert_eq!(parsed.get("count"), Some(&json!(3)));
	}

	#[test]
	fn collects_from_pairs() {
		let props: Properties = vec![("item", "x"), ("color", "red")].into_iter().collect();
		assert_eq!(props.len(), 2);
		assert_eq!(props.get("color"), Some(&json!("red")));
	}

	proptest! {
		#[test]
		fn len_counts_distinct_keys(keys in proptest::collection::vec("[a-z]{1,8}", 0..20)) {
			let distinct: std::collections::HashSet<_> = keys.iter().cloned().collect();
			let props: Properties = keys.iter().map(|k| (k.clone(), true)).collect();
			prop_assert_eq!(props.len(), distinct.len());
		}
	}
}
