// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Layered client configuration.

use loom_native_analytics_core::{ApiKey, Platform};
use serde::Deserialize;

use crate::error::ConfigError;
use crate::options::ClientOptions;

/// One source's view of the configuration. Unset fields defer to lower
/// precedence sources.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct NativeAnalyticsConfigLayer {
	pub api_key: Option<ApiKey>,
	pub track_session_events: Option<bool>,
	pub event_prefix: Option<String>,
	pub platform: Option<Platform>,
}

impl NativeAnalyticsConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.api_key.is_some() {
			self.api_key = other.api_key;
		}
		if other.track_session_events.is_some() {
			self.track_session_events = other.track_session_events;
		}
		if other.event_prefix.is_some() {
			self.event_prefix = other.event_prefix;
		}
		if other.platform.is_some() {
			self.platform = other.platform;
		}
	}

	pub fn finalize(self) -> Result<NativeAnalyticsConfig, ConfigError> {
		let api_key = self
			.api_key
			.filter(ApiKey::is_valid)
			.ok_or_else(|| ConfigError::MissingField("api_key".to_string()))?;

		Ok(NativeAnalyticsConfig {
			api_key,
			track_session_events: self.track_session_events.unwrap_or(false),
			event_prefix: self.event_prefix.filter(|p| !p.is_empty()),
			platform: self.platform.unwrap_or_else(Platform::current),
		})
	}
}

/// Fully resolved client configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct NativeAnalyticsConfig {
	pub api_key: ApiKey,
	pub track_session_events: bool,
	pub event_prefix: Option<String>,
	pub platform: Platform,
}

impl NativeAnalyticsConfig {
	/// Initialization options derived from this configuration.
	pub fn options(&self) -> ClientOptions {
		ClientOptions {
			api_key: self.api_key.clone(),
			track_session_events: self.track_session_events,
			event_prefix: self.event_prefix.clone(),
		}
	}
}
