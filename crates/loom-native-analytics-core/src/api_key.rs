// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! API key wrapper for native SDK initialization.
//!
//! The key is handed to the native SDK once, at initialization. Everywhere
//! else it only travels through configuration and logs, so formatting is
//! redacted and the backing memory is wiped on drop.

use std::fmt;

use serde::{Deserialize, Deserializer};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Placeholder printed instead of the key.
pub const REDACTED: &str = "[REDACTED]";

/// An analytics API key.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct ApiKey(String);

impl ApiKey {
	/// Wraps a raw key. No validation is performed here; see [`ApiKey::is_valid`].
	pub fn new(key: impl Into<String>) -> Self {
		Self(key.into())
	}

	/// Returns `true` if the key can be used to initialize a bridge.
	///
	/// Any non-empty string is accepted; the native SDK decides whether the
	/// key is actually known to the analytics backend.
	pub fn is_valid(&self) -> bool {
		!self.0.is_empty()
	}

	/// Exposes the raw key. Only call this at the bridge boundary.
	pub fn expose(&self) -> &str {
		&self.0
	}
}

impl fmt::Debug for ApiKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("ApiKey").field(&REDACTED).finish()
	}
}

impl fmt::Display for ApiKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(REDACTED)
	}
}

impl<'de> Deserialize<'de> for ApiKey {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		String::deserialize(deserializer).map(Self::new)
	}
}

impl From<String> for ApiKey {
	fn from(key: String) -> Self {
		Self::new(key)
	}
}

impl From<&str> for ApiKey {
	fn from(key: &str) -> Self {
		Self::new(key)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn empty_key_is_invalid() {
		assert!(!ApiKey::new("").is_valid());
	}

	#[test]
	fn non_empty_key_is_valid() {
		assert!(ApiKey::new("a1b2c3").is_valid());
	}

	#[test]
	fn expose_returns_raw_key() {
		let key = ApiKey::new("a1b2c3");
		assert_eq!(key.expose(), "a1b2c3");
	}

	#[test]
	fn debug_is_redacted() {
		let key = ApiKey::new("super-secret");
		assert_eq!(format!("{key:?}"), "ApiKey(\"[REDACTED]\")");
	}

	#[test]
	fn deserializes_from_plain_string() {
		let key: ApiKey = serde_json::from_str("\"a1b2c3\"").unwrap();
		assert_eq!(key.expose(), "a1b2c3");
	}

	proptest! {
		#[test]
		fn formatting_never_leaks_key(raw in "[a-zA-Z0-9]{12,40}") {
			let key = ApiKey::new(raw.clone());
			let shown = format!("{key}");
			let debugged = format!("{key:?}");
			prop_assert!(!shown.contains(&raw));
			prop_assert!(!debugged.contains(&raw));
		}
	}
}
