// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Analytics client that forwards calls to the native bridge.

use chrono::{DateTime, Utc};
use loom_native_analytics_core::{
	normalize_user_id, ApiKey, BridgeCall, BridgeRegistry, NativeBridge, Platform, Properties, Revenue,
	RevenueDispatch, SharedBridge,
};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::NativeAnalyticsConfig;
use crate::error::{AnalyticsError, Result};
use crate::options::ClientOptions;

/// Where the builder looks for the native bridge.
enum BridgeSource {
	Global,
	Resolved(Option<SharedBridge>),
}

/// Builder for constructing an [`AnalyticsClient`].
pub struct AnalyticsClientBuilder {
	api_key: Option<ApiKey>,
	track_session_events: bool,
	event_prefix: Option<String>,
	platform: Option<Platform>,
	bridge: BridgeSource,
}

impl AnalyticsClientBuilder {
	/// Creates a new builder with default settings.
	pub fn new() -> Self {
		Self {
			api_key: None,
			track_session_events: false,
			event_prefix: None,
			platform: None,
			bridge: BridgeSource::Global,
		}
	}

	/// Sets the API key passed to the native SDK.
	pub fn api_key(mut self, key: impl Into<ApiKey>) -> Self {
		self.api_key = Some(key.into());
		self
	}

	/// Enables or disables native session start/end events.
	pub fn track_session_events(mut self, enabled: bool) -> Self {
		self.track_session_events = enabled;
		self
	}

	/// Sets a prefix prepended to every logged event name.
	pub fn event_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.event_prefix = Some(prefix.into());
		self
	}

	/// Overrides platform detection.
	pub fn platform(mut self, platform: Platform) -> Self {
		self.platform = Some(platform);
		self
	}

	/// Uses `bridge` instead of looking one up in the global registry.
	pub fn bridge(mut self, bridge: SharedBridge) -> Self {
		self.bridge = BridgeSource::Resolved(Some(bridge));
		self
	}

	/// Resolves the bridge from `registry` instead of the global registry.
	pub fn registry(mut self, registry: &BridgeRegistry) -> Self {
		self.bridge = BridgeSource::Resolved(registry.bridge());
		self
	}

	/// Applies options parsed from a host, e.g. via [`ClientOptions::from_value`].
	pub fn options(mut self, options: &ClientOptions) -> Self {
		self.api_key = Some(options.api_key.clone());
		self.track_session_events = options.track_session_events;
		self.event_prefix = options.event_prefix.clone();
		self
	}

	/// Applies a loaded configuration.
	pub fn config(mut self, config: &NativeAnalyticsConfig) -> Self {
		self.platform = Some(config.platform);
		self.options(&config.options())
	}

	/// Builds and initializes the client.
	pub fn build(self) -> Result<AnalyticsClient> {
		let api_key = self
			.api_key
			.ok_or_else(|| AnalyticsError::invalid_argument("a client must be constructed with an API key"))?;

		let mut options = ClientOptions::new(api_key, self.track_session_events);
		if let Some(prefix) = self.event_prefix {
			options = options.with_event_prefix(prefix);
		}

		let platform = self.platform.unwrap_or_else(Platform::current);
		let mut client = match self.bridge {
			BridgeSource::Global => AnalyticsClient::from_registry(BridgeRegistry::global(), platform),
			BridgeSource::Resolved(bridge) => AnalyticsClient::detached(bridge, platform),
		};

		client.initialize(options)?;
		Ok(client)
	}
}

impl Default for AnalyticsClientBuilder {
	fn default() -> Self {
		Self::new()
	}
}

/// Facade over a platform-native analytics SDK.
///
/// Every method other than [`AnalyticsClient::initialize`] fails with
/// [`AnalyticsError::NotInitialized`] until initialization has succeeded.
/// Forwarding methods return the bridge's [`BridgeCall`] without awaiting it.
///
/// # Example
///
/// ```ignore
/// use loom_native_analytics::{AnalyticsClient, Properties};
///
/// let mut client = AnalyticsClient::builder()
///     .api_key("a1b2c3")
///     .track_session_events(true)
///     .event_prefix("app_")
///     .build()?;
///
/// // Fire and forget
/// let _ = client.log_event("purchase", Properties::new().insert("item", "x"))?;
///
/// // Or wait for the native SDK
/// let device_id = client.get_device_id()?.await?;
///
/// client.set_log_event_prefix("new_")?;
/// ```
pub struct AnalyticsClient {
	bridge: Option<SharedBridge>,
	platform: Platform,
	revenue_dispatch: RevenueDispatch,
	event_prefix: Option<String>,
	initialized: bool,
}

impl AnalyticsClient {
	/// Creates a new builder for constructing an AnalyticsClient.
	pub fn builder() -> AnalyticsClientBuilder {
		AnalyticsClientBuilder::new()
	}

	/// Constructs and initializes a client using the globally registered
	/// bridge and the detected platform.
	pub fn new(
		api_key: impl Into<ApiKey>,
		track_session_events: bool,
		event_prefix: Option<&str>,
	) -> Result<Self> {
		let mut builder = Self::builder()
			.api_key(api_key)
			.track_session_events(track_session_events);
		if let Some(prefix) = event_prefix {
			builder = builder.event_prefix(prefix);
		}
		builder.build()
	}

	/// Creates an uninitialized client bound to whatever bridge `registry`
	/// currently holds.
	pub fn from_registry(registry: &BridgeRegistry, platform: Platform) -> Self {
		Self::detached(registry.bridge(), platform)
	}

	/// Creates an uninitialized client bound to `bridge`.
	pub fn with_bridge(bridge: SharedBridge, platform: Platform) -> Self {
		Self::detached(Some(bridge), platform)
	}

	fn detached(bridge: Option<SharedBridge>, platform: Platform) -> Self {
		Self {
			bridge,
			platform,
			revenue_dispatch: RevenueDispatch::for_platform(platform),
			event_prefix: None,
			initialized: false,
		}
	}

	/// Initializes the native SDK.
	///
	/// Fails with [`AnalyticsError::InvalidArgument`] for an empty API key and
	/// [`AnalyticsError::MissingDependency`] when no bridge is available. On
	/// failure the client stays uninitialized. Once initialized, further calls
	/// are ignored.
	pub fn initialize(&mut self, options: ClientOptions) -> Result<()> {
		if self.initialized {
			warn!("Analytics client already initialized, ignoring initialize call");
			return Ok(());
		}

		if !options.api_key.is_valid() {
			return Err(AnalyticsError::invalid_argument(
				"a client must be constructed with an API key",
			));
		}

		let bridge = self.bridge.as_ref().ok_or_else(|| {
			AnalyticsError::missing_dependency(
				"no native analytics bridge found; is the native SDK installed and registered?",
			)
		})?;

		if let Some(prefix) = options.event_prefix.filter(|p| !p.is_empty()) {
			self.event_prefix = Some(prefix);
		}

		bridge.initialize(options.api_key.expose(), options.track_session_events);
		self.initialized = true;

		info!(
			api_key = %options.api_key,
			track_session_events = options.track_session_events,
			platform = %self.platform,
			event_prefix = ?self.event_prefix,
			"Analytics client initialized"
		);

		Ok(())
	}

	/// Returns true once initialization has succeeded.
	pub fn is_initialized(&self) -> bool {
		self.initialized
	}

	pub fn event_prefix(&self) -> Option<&str> {
		self.event_prefix.as_deref()
	}

	pub fn platform(&self) -> Platform {
		self.platform
	}

	pub fn revenue_dispatch(&self) -> RevenueDispatch {
		self.revenue_dispatch
	}

	// --------------------------------------------------
	// Identify
	// --------------------------------------------------

	/// Sets the user ID. `null` clears it; other values are converted to
	/// strings (`12345` becomes `"12345"`).
	pub fn set_user_id(&self, user_id: impl Into<Value>) -> Result<BridgeCall<()>> {
		let bridge = self.bridge("set_user_id")?;
		let user_id = normalize_user_id(user_id.into());
		debug!(clear = user_id.is_none(), "Forwarding set_user_id");
		Ok(bridge.set_user_id(user_id))
	}

	pub fn set_user_properties(&self, properties: Properties) -> Result<BridgeCall<()>> {
		let bridge = self.bridge("set_user_properties")?;
		debug!(count = properties.len(), "Forwarding set_user_properties");
		Ok(bridge.set_user_properties(properties))
	}

	pub fn set_opt_out(&self, opt_out: bool) -> Result<BridgeCall<()>> {
		let bridge = self.bridge("set_opt_out")?;
		debug!(opt_out, "Forwarding set_opt_out");
		Ok(bridge.set_opt_out(opt_out))
	}

	pub fn clear_user_properties(&self) -> Result<BridgeCall<()>> {
		let bridge = self.bridge("clear_user_properties")?;
		debug!("Forwarding clear_user_properties");
		Ok(bridge.clear_user_properties())
	}

	pub fn get_device_id(&self) -> Result<BridgeCall<String>> {
		let bridge = self.bridge("get_device_id")?;
		debug!("Forwarding get_device_id");
		Ok(bridge.get_device_id())
	}

	pub fn regenerate_device_id(&self) -> Result<BridgeCall<()>> {
		let bridge = self.bridge("regenerate_device_id")?;
		debug!("Forwarding regenerate_device_id");
		Ok(bridge.regenerate_device_id())
	}

	/// Replaces the event prefix. Local only; nothing is sent to the bridge.
	/// An empty prefix disables prefixing.
	pub fn set_log_event_prefix(&mut self, prefix: impl Into<String>) -> Result<()> {
		self.bridge("set_log_event_prefix")?;
		let prefix = prefix.into();
		debug!(prefix = %prefix, "Event prefix changed");
		self.event_prefix = Some(prefix).filter(|p| !p.is_empty());
		Ok(())
	}

	// --------------------------------------------------
	// Track
	// --------------------------------------------------

	/// Logs an event.
	///
	/// Non-empty properties go through the bridge's with-properties entry
	/// point. Absent properties and an empty map both use the plain entry
	/// point, so `{}` never reaches `log_event_with_props`.
	pub fn log_event(
		&self,
		name: &str,
		properties: impl Into<Option<Properties>>,
	) -> Result<BridgeCall<()>> {
		let bridge = self.bridge("log_event")?;
		let event_name = self.event_name(name);

		match properties.into().filter(|p| !p.is_empty()) {
			Some(properties) => {
				debug!(event_name = %event_name, count = properties.len(), "Forwarding log_event with properties");
				Ok(bridge.log_event_with_props(event_name, properties))
			}
			None => {
				debug!(event_name = %event_name, "Forwarding log_event");
				Ok(bridge.log_event(event_name))
			}
		}
	}

	/// Logs an event at `timestamp` (milliseconds since the Unix epoch).
	///
	/// Properties are always forwarded, as an empty map when not supplied.
	pub fn log_event_with_timestamp(
		&self,
		name: &str,
		timestamp: i64,
		properties: impl Into<Option<Properties>>,
	) -> Result<BridgeCall<()>> {
		let bridge = self.bridge("log_event_with_timestamp")?;
		let event_name = self.event_name(name);
		let properties = properties.into().unwrap_or_default();

		debug!(event_name = %event_name, timestamp, "Forwarding log_event_with_timestamp");
		Ok(bridge.log_event_with_timestamp(event_name, timestamp, properties))
	}

	/// Logs an event at `at`. See [`AnalyticsClient::log_event_with_timestamp`].
	pub fn log_event_at(
		&self,
		name: &str,
		at: DateTime<Utc>,
		properties: impl Into<Option<Properties>>,
	) -> Result<BridgeCall<()>> {
		self.log_event_with_timestamp(name, at.timestamp_millis(), properties)
	}

	// --------------------------------------------------
	// Revenue
	// --------------------------------------------------

	/// Logs revenue. The receipt only reaches the bridge on platforms whose
	/// native SDK accepts one.
	pub fn log_revenue(
		&self,
		product_id: &str,
		quantity: u32,
		amount: f64,
		receipt: Option<&str>,
	) -> Result<BridgeCall<()>> {
		let bridge = self.bridge("log_revenue")?;

		let mut revenue = Revenue::new(product_id, quantity, amount);
		if let Some(receipt) = receipt {
			revenue = revenue.with_receipt(receipt);
		}
		let call = self.revenue_dispatch.shape(revenue);

		debug!(
			product_id = %product_id,
			quantity,
			dispatch = ?self.revenue_dispatch,
			"Forwarding log_revenue"
		);
		Ok(bridge.log_revenue(call))
	}

	// --------------------------------------------------
	// User properties
	// --------------------------------------------------

	pub fn set_user_property(&self, property: &str, value: impl Into<Value>) -> Result<BridgeCall<()>> {
		let bridge = self.bridge("set_user_property")?;
		debug!(property = %property, "Forwarding set_user_property");
		Ok(bridge.set_user_property(property.to_string(), value.into()))
	}

	pub fn unset_user_property(&self, property: &str) -> Result<BridgeCall<()>> {
		let bridge = self.bridge("unset_user_property")?;
		debug!(property = %property, "Forwarding unset_user_property");
		Ok(bridge.unset_user_property(property.to_string()))
	}

	pub fn add_to_user_property(&self, property: &str, amount: f64) -> Result<BridgeCall<()>> {
		let bridge = self.bridge("add_to_user_property")?;
		debug!(property = %property, amount, "Forwarding add_to_user_property");
		Ok(bridge.add_to_user_property(property.to_string(), amount))
	}

	pub fn set_user_property_once(
		&self,
		property: &str,
		value: impl Into<Value>,
	) -> Result<BridgeCall<()>> {
		let bridge = self.bridge("set_user_property_once")?;
		debug!(property = %property, "Forwarding set_user_property_once");
		Ok(bridge.set_user_property_once(property.to_string(), value.into()))
	}

	/// Initialization guard. `method` names the caller in the error.
	fn bridge(&self, method: &'static str) -> Result<&dyn NativeBridge> {
		match (&self.bridge, self.initialized) {
			(Some(bridge), true) => Ok(&**bridge),
			_ => Err(AnalyticsError::NotInitialized { method }),
		}
	}

	fn event_name(&self, name: &str) -> String {
		match &self.event_prefix {
			Some(prefix) => format!("{prefix}{name}"),
			None => name.to_string(),
		}
	}
}

impl std::fmt::Debug for AnalyticsClient {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("AnalyticsClient")
			.field("platform", &self.platform)
			.field("revenue_dispatch", &self.revenue_dispatch)
			.field("event_prefix", &self.event_prefix)
			.field("initialized", &self.initialized)
			.field("has_bridge", &self.bridge.is_some())
			.finish()
	}
}
