// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Initialization options for the analytics client.

use loom_native_analytics_core::ApiKey;
use serde_json::Value;

use crate::error::{AnalyticsError, Result};

/// Arguments used to initialize the native SDK.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientOptions {
	pub api_key: ApiKey,
	/// Whether the native SDK should emit session start/end events.
	pub track_session_events: bool,
	/// Prepended to every logged event name.
	pub event_prefix: Option<String>,
}

impl ClientOptions {
	pub fn new(api_key: impl Into<ApiKey>, track_session_events: bool) -> Self {
		Self {
			api_key: api_key.into(),
			track_session_events,
			event_prefix: None,
		}
	}

	/// Sets the event prefix (builder pattern). Empty prefixes are ignored.
	pub fn with_event_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.event_prefix = Some(prefix.into()).filter(|p| !p.is_empty());
		self
	}

	/// Reads options from a loosely typed host object.
	///
	/// Expects `{"apiKey": "...", "trackSessionEvents": true, "eventPrefix": "app_"}`.
	/// `apiKey` must be a non-empty string. `trackSessionEvents` only counts
	/// when it is exactly `true`; any other value disables session events.
	/// `eventPrefix` is kept when it is a non-empty string.
	pub fn from_value(value: &Value) -> Result<Self> {
		let api_key = match value.get("apiKey") {
			Some(Value::String(key)) if !key.is_empty() => ApiKey::new(key.as_str()),
			Some(Value::String(_)) => {
				return Err(AnalyticsError::invalid_argument("apiKey must not be empty"));
			}
			Some(Value::Null) | None => {
				return Err(AnalyticsError::invalid_argument(
					"a client must be constructed with an apiKey",
				));
			}
			Some(other) => {
				return Err(AnalyticsError::invalid_argument(format!(
					"apiKey must be a string, got {}",
					json_type_name(other)
				)));
			}
		};

		let track_session_events = matches!(value.get("trackSessionEvents"), Some(Value::Bool(true)));

		let event_prefix = value
			.get("eventPrefix")
			.and_then(Value::as_str)
			.filter(|p| !p.is_empty())
			.map(str::to_string);

		Ok(Self {
			api_key,
			track_session_events,
			event_prefix,
		})
	}
}

fn json_type_name(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "boolean",
		Value::Number(_) => "number",
		Value::String(_) => "string",
		Value::Array(_) => "array",
		Value::Object(_) => "object",
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn with_event_prefix_ignores_empty() {
		let options = ClientOptions::new("key", false).with_event_prefix("");
		assert_eq!(options.event_prefix, None);

		let options = ClientOptions::new("key", false).with_event_prefix("app_");
		assert_eq!(options.event_prefix.as_deref(), Some("app_"));
	}

	#[test]
	fn from_value_reads_all_fields() {
		let options = ClientOptions::from_value(&json!({
			"apiKey": "a1b2c3",
			"trackSessionEvents": true,
			"eventPrefix": "app_",
		}))
		.unwrap();

		assert_eq!(options.api_key.expose(), "a1b2c3");
		assert!(options.track_session_events);
		assert_eq!(options.event_prefix.as_deref(), Some("app_"));
	}

	#[test]
	fn from_value_rejects_missing_key() {
		let err = ClientOptions::from_value(&json!({})).unwrap_err();
		assert!(matches!(err, AnalyticsError::InvalidArgument(_)));

		let err = ClientOptions::from_value(&json!({"apiKey": null})).unwrap_err();
		assert!(matches!(err, AnalyticsError::InvalidArgument(_)));
	}

	#[test]
	fn from_value_rejects_non_string_key() {
		let err = ClientOptions::from_value(&json!({"apiKey": 42})).unwrap_err();
		assert_eq!(
			err,
			AnalyticsError::InvalidArgument("apiKey must be a string, got number".to_string())
		);
	}

	#[test]
	fn from_value_rejects_empty_key() {
		let err = ClientOptions::from_value(&json!({"apiKey": ""})).unwrap_err();
		assert!(matches!(err, AnalyticsError::InvalidArgument(_)));
	}

	#[test]
	fn track_session_events_is_strict() {
		for flag in [json!("true"), json!(1), json!(null), json!(false), json!({})] {
			let options =
				ClientOptions::from_value(&json!({"apiKey": "k", "trackSessionEvents": flag}))
					.unwrap();
			assert!(!options.track_session_events, "{flag} must not enable sessions");
		}
	}

	#[test]
	fn non_string_prefix_is_ignored() {
		let options = ClientOptions::from_value(&json!({"apiKey": "k", "eventPrefix": 7})).unwrap();
		assert_eq!(options.event_prefix, None);
	}
}
