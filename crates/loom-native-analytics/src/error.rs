// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the native analytics SDK.

use std::path::PathBuf;

use thiserror::Error;

/// Analytics client errors.
///
/// Failures reported by the native SDK itself are not represented here: they
/// arrive through the returned [`BridgeCall`](loom_native_analytics_core::BridgeCall)
/// as a [`BridgeError`](loom_native_analytics_core::BridgeError).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalyticsError {
	/// The client was constructed with an unusable argument.
	#[error("invalid argument: {0}")]
	InvalidArgument(String),

	/// No native analytics bridge is available.
	#[error("missing dependency: {0}")]
	MissingDependency(String),

	/// A method was called before the client was initialized.
	#[error("{method} was called before the analytics client was initialized")]
	NotInitialized {
		/// Name of the method that was called.
		method: &'static str,
	},
}

impl AnalyticsError {
	pub fn invalid_argument(msg: impl Into<String>) -> Self {
		Self::InvalidArgument(msg.into())
	}

	pub fn missing_dependency(msg: impl Into<String>) -> Self {
		Self::MissingDependency(msg.into())
	}
}

/// Result type alias for analytics operations.
pub type Result<T> = std::result::Result<T, AnalyticsError>;

/// Errors that can occur while loading client configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Config or secret file could not be read.
	#[error("failed to read {path}: {source}")]
	FileRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// TOML parsing error.
	#[error("TOML parse error in {path}: {source}")]
	TomlParse {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	/// A value could not be interpreted.
	#[error("invalid value for {key}: {message}")]
	InvalidValue { key: String, message: String },

	/// A required setting was not provided by any source.
	#[error("missing required field: {0}")]
	MissingField(String),
}

impl ConfigError {
	pub fn invalid_value(key: impl Into<String>, message: impl Into<String>) -> Self {
		Self::InvalidValue {
			key: key.into(),
			message: message.into(),
		}
	}
}
