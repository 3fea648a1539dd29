// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: built-in defaults, a TOML file, and environment
//! variables.

use std::path::{Path, PathBuf};

use loom_native_analytics_core::{ApiKey, Platform};
use tracing::{debug, trace};

use crate::config::{NativeAnalyticsConfig, NativeAnalyticsConfigLayer};
use crate::error::ConfigError;

/// Default environment variable prefix.
pub const ENV_PREFIX: &str = "LOOM_NATIVE_ANALYTICS";

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<NativeAnalyticsConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<NativeAnalyticsConfigLayer, ConfigError> {
		Ok(NativeAnalyticsConfigLayer {
			track_session_events: Some(false),
			..Default::default()
		})
	}
}

/// TOML file configuration source. A missing file contributes nothing.
pub struct TomlSource {
	path: PathBuf,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<NativeAnalyticsConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(NativeAnalyticsConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let layer = toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
			path: self.path.clone(),
			source: e,
		})?;

		trace!("parsed config layer from TOML");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Convention: `<PREFIX>_API_KEY`, `<PREFIX>_TRACK_SESSION_EVENTS`,
/// `<PREFIX>_EVENT_PREFIX`, `<PREFIX>_PLATFORM`. The API key may instead be
/// read from the file named by `<PREFIX>_API_KEY_FILE`.
pub struct EnvSource {
	prefix: String,
}

impl EnvSource {
	pub fn new() -> Self {
		Self::with_prefix(ENV_PREFIX)
	}

	pub fn with_prefix(prefix: impl Into<String>) -> Self {
		Self {
			prefix: prefix.into(),
		}
	}

	fn var_name(&self, field: &str) -> String {
		format!("{}_{}", self.prefix, field)
	}

	fn load_api_key(&self) -> Result<Option<ApiKey>, ConfigError> {
		if let Some(key) = env_var(&self.var_name("API_KEY")) {
			return Ok(Some(ApiKey::new(key)));
		}

		let Some(path) = env_var(&self.var_name("API_KEY_FILE")) else {
			return Ok(None);
		};

		let path = PathBuf::from(path);
		let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::FileRead {
			path: path.clone(),
			source: e,
		})?;
		debug!(path = %path.display(), "loaded API key from file");
		Ok(Some(ApiKey::new(content.trim())))
	}

	fn load_platform(&self) -> Result<Option<Platform>, ConfigError> {
		let name = self.var_name("PLATFORM");
		match env_var(&name) {
			Some(v) => v
				.parse()
				.map(Some)
				.map_err(|message: String| ConfigError::invalid_value(name, message)),
			None => Ok(None),
		}
	}
}

impl Default for EnvSource {
	fn default() -> Self {
		Self::new()
	}
}

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<NativeAnalyticsConfigLayer, ConfigError> {
		debug!(prefix = %self.prefix, "loading environment variables");
		Ok(NativeAnalyticsConfigLayer {
			api_key: self.load_api_key()?,
			track_session_events: env_bool(&self.var_name("TRACK_SESSION_EVENTS")),
			event_prefix: env_var(&self.var_name("EVENT_PREFIX")),
			platform: self.load_platform()?,
		})
	}
}

fn env_var(name: &str) -> Option<String> {
	std::env::var(name).ok().filter(|s| !s.is_empty())
}

fn env_bool(name: &str) -> Option<bool> {
	env_var(name).map(|v| v.eq_ignore_ascii_case("true") || v == "1")
}

/// Merges `sources` in precedence order and resolves the result.
pub fn load_from_sources(
	mut sources: Vec<Box<dyn ConfigSource>>,
) -> Result<NativeAnalyticsConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = NativeAnalyticsConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		merged.merge(source.load()?);
	}

	merged.finalize()
}

/// Loads configuration with standard precedence.
///
/// Precedence (highest to lowest):
/// 1. Environment variables (`LOOM_NATIVE_ANALYTICS_*`)
/// 2. Config file at `path`, when given
/// 3. Built-in defaults
pub fn load_config(path: Option<&Path>) -> Result<NativeAnalyticsConfig, ConfigError> {
	let mut sources: Vec<Box<dyn ConfigSource>> = vec![Box::new(DefaultsSource)];
	if let Some(path) = path {
		sources.push(Box::new(TomlSource::new(path)));
	}
	sources.push(Box::new(EnvSource::new()));

	load_from_sources(sources)
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;
	use tempfile::NamedTempFile;

	// Each test uses its own prefix so parallel tests never share variables.
	fn env_source(prefix: &str) -> EnvSource {
		EnvSource::with_prefix(format!("LOOM_NATIVE_ANALYTICS_TEST_{prefix}"))
	}

	fn toml_file(content: &str) -> NamedTempFile {
		let mut file = NamedTempFile::new().unwrap();
		file.write_all(content.as_bytes()).unwrap();
		file
	}

	#[test]
	fn precedence_ordering() {
		assert!(Precedence::Defaults < Precedence::ConfigFile);
		assert!(Precedence::ConfigFile < Precedence::Environment);
	}

	#[test]
	fn missing_toml_file_is_skipped() {
		let layer = TomlSource::new("/nonexistent/native-analytics.toml")
			.load()
			.unwrap();
		assert_eq!(layer, NativeAnalyticsConfigLayer::default());
	}

	#[test]
	fn invalid_toml_reports_path() {
		let file = toml_file("api_key = [");
		let err = TomlSource::new(file.path()).load().unwrap_err();
		assert!(matches!(err, ConfigError::TomlParse { path, .. } if path == file.path()));
	}

	#[test]
	fn env_source_reads_all_fields() {
		let source = env_source("ALL");
		std::env::set_var("LOOM_NATIVE_ANALYTICS_TEST_ALL_API_KEY", "env-key");
		std::env::set_var("LOOM_NATIVE_ANALYTICS_TEST_ALL_TRACK_SESSION_EVENTS", "1");
		std::env::set_var("LOOM_NATIVE_ANALYTICS_TEST_ALL_EVENT_PREFIX", "env_");
		std::env::set_var("LOOM_NATIVE_ANALYTICS_TEST_ALL_PLATFORM", "android");

		let layer = source.load().unwrap();

		assert_eq!(layer.api_key, Some(ApiKey::new("env-key")));
		assert_eq!(layer.track_session_events, Some(true));
		assert_eq!(layer.event_prefix.as_deref(), Some("env_"));
		assert_eq!(layer.platform, Some(Platform::Android));
	}

	#[test]
	fn env_source_reads_api_key_file() {
		let file = toml_file("file-key\n");
		std::env::set_var(
			"LOOM_NATIVE_ANALYTICS_TEST_FILE_API_KEY_FILE",
			file.path().as_os_str(),
		);

		let layer = env_source("FILE").load().unwrap();
		assert_eq!(layer.api_key, Some(ApiKey::new("file-key")));
	}

	#[test]
	fn env_source_rejects_unknown_platform() {
		std::env::set_var("LOOM_NATIVE_ANALYTICS_TEST_BADPLAT_PLATFORM", "symbian");

		let err = env_source("BADPLAT").load().unwrap_err();
		assert!(
			matches!(err, ConfigError::InvalidValue { key, .. } if key == "LOOM_NATIVE_ANALYTICS_TEST_BADPLAT_PLATFORM")
		);
	}

	#[test]
	fn env_source_empty_when_unset() {
		let layer = env_source("UNSET").load().unwrap();
		assert_eq!(layer, NativeAnalyticsConfigLayer::default());
	}

	#[test]
	fn environment_overrides_file() {
		let file = toml_file(
			r#"
api_key = "file-key"
event_prefix = "file_"
track_session_events = true
"#,
		);
		std::env::set_var("LOOM_NATIVE_ANALYTICS_TEST_MERGE_EVENT_PREFIX", "env_");

		let config = load_from_sources(vec![
			Box::new(env_source("MERGE")),
			Box::new(TomlSource::new(file.path())),
			Box::new(DefaultsSource),
		])
		.unwrap();

		assert_eq!(config.api_key.expose(), "file-key");
		assert_eq!(config.event_prefix.as_deref(), Some("env_"));
		assert!(config.track_session_events);
	}

	#[test]
	fn defaults_alone_fail_without_api_key() {
		let err = load_from_sources(vec![Box::new(DefaultsSource)]).unwrap_err();
		assert!(matches!(err, ConfigError::MissingField(_)));
	}
}
