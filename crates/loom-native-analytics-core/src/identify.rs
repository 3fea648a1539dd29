// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! User identity coercion.
//!
//! Native SDKs only accept string user IDs (or null to log the user out).
//! Hosts frequently hold numeric IDs, so the facade accepts any JSON value and
//! converts it here.

use serde_json::Value;

/// Converts a loosely typed user ID into what the bridge accepts.
///
/// - `null` clears the user ID
/// - strings are forwarded as-is
/// - numbers and booleans use their textual form (`12345` becomes `"12345"`)
/// - arrays and objects are serialized to compact JSON
pub fn normalize_user_id(user_id: Value) -> Option<String> {
	match user_id {
		Value::Null => None,
		Value::String(id) => Some(id),
		other => Some(other.to_string()),
	}
}
