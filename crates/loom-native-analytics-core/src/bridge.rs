// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The native analytics bridge contract.
//!
//! A bridge is the platform-native analytics SDK seen from Rust. Every call
//! except [`NativeBridge::initialize`] hands back a [`BridgeCall`]: the native
//! side may complete the work asynchronously, and the caller decides whether
//! to await it. Dropping a `BridgeCall` without polling it is allowed; bridges
//! must not rely on the future being driven to perform the call.
//!
//! # Example
//!
//! ```
//! use loom_native_analytics_core::{BridgeCall, NativeBridge, NoOpBridge};
//!
//! let bridge = NoOpBridge;
//! bridge.initialize("a1b2c3", true);
//! let pending: BridgeCall<()> = bridge.log_event("app_open".to_string());
//! # drop(pending);
//! ```

use std::sync::Arc;

use futures::future::{self, BoxFuture};
use serde_json::Value;

use crate::error::BridgeError;
use crate::platform::RevenueCall;
use crate::properties::Properties;

/// Pending result of a bridge call.
pub type BridgeCall<T> = BoxFuture<'static, Result<T, BridgeError>>;

/// Type alias for a shared bridge handle.
pub type SharedBridge = Arc<dyn NativeBridge>;

/// Returns a bridge call that has already completed successfully.
pub fn resolved<T: Send + 'static>(value: T) -> BridgeCall<T> {
	Box::pin(future::ready(Ok(value)))
}

/// Returns a bridge call that has already failed with `error`.
pub fn rejected<T: Send + 'static>(error: BridgeError) -> BridgeCall<T> {
	Box::pin(future::ready(Err(error)))
}

/// Capability surface of a platform-native analytics SDK.
///
/// Implementations perform the native call when the method is invoked and
/// return a [`BridgeCall`] that completes when the native side reports back.
pub trait NativeBridge: Send + Sync + 'static {
	/// Configures the native SDK. Fire-and-forget.
	fn initialize(&self, api_key: &str, track_session_events: bool);

	fn set_user_id(&self, user_id: Option<String>) -> BridgeCall<()>;

	fn set_user_properties(&self, properties: Properties) -> BridgeCall<()>;

	fn set_opt_out(&self, opt_out: bool) -> BridgeCall<()>;

	fn clear_user_properties(&self) -> BridgeCall<()>;

	/// Resolves to the identifier the native SDK assigned to this device.
	fn get_device_id(&self) -> BridgeCall<String>;

	fn regenerate_device_id(&self) -> BridgeCall<()>;

	/// Logs an event that carries no properties.
	fn log_event(&self, name: String) -> BridgeCall<()>;

	/// Logs an event with properties. Kept separate from [`NativeBridge::log_event`]
	/// because native SDKs expose two distinct entry points.
	fn log_event_with_props(&self, name: String, properties: Properties) -> BridgeCall<()>;

	/// Logs an event at an explicit time, in milliseconds since the Unix epoch.
	fn log_event_with_timestamp(
		&self,
		name: String,
		timestamp: i64,
		properties: Properties,
	) -> BridgeCall<()>;

	/// Logs revenue using the argument list of the running platform.
	fn log_revenue(&self, revenue: RevenueCall) -> BridgeCall<()>;

	fn set_user_property(&self, property: String, value: Value) -> BridgeCall<()>;

	fn unset_user_property(&self, property: String) -> BridgeCall<()>;

	fn add_to_user_property(&self, property: String, amount: f64) -> BridgeCall<()>;

	fn set_user_property_once(&self, property: String, value: Value) -> BridgeCall<()>;
}

/// A bridge that accepts and discards every call.
///
/// Useful on hosts that ship without a native analytics SDK.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpBridge;

impl NativeBridge for NoOpBridge {
	fn initialize(&self, _api_key: &str, _track_session_events: bool) {}

	fn set_user_id(&self, _user_id: Option<String>) -> BridgeCall<()> {
		resolved(())
	}

	fn set_user_properties(&self, _properties: Properties) -> BridgeCall<()> {
		resolved(())
	}

	fn set_opt_out(&self, _opt_out: bool) -> BridgeCall<()> {
		resolved(())
	}

	fn clear_user_properties(&self) -> BridgeCall<()> {
		resolved(())
	}

	fn get_device_id(&self) -> BridgeCall<String> {
		resolved(String::new())
	}

	fn regenerate_device_id(&self) -> BridgeCall<()> {
		resolved(())
	}

	fn log_event(&self, _name: String) -> BridgeCall<()> {
		resolved(())
	}

	fn log_event_with_props(&self, _name: String, _properties: Properties) -> BridgeCall<()> {
		resolved(())
	}

	fn log_event_with_timestamp(
		&self,
		_name: String,
		_timestamp: i64,
		_properties: Properties,
	) -> BridgeCall<()> {
		resolved(())
	}

	fn log_revenue(&self, _revenue: RevenueCall) -> BridgeCall<()> {
		resolved(())
	}

	fn set_user_property(&self, _property: String, _value: Value) -> BridgeCall<()> {
		resolved(())
	}

	fn unset_user_property(&self, _property: String) -> BridgeCall<()> {
		resolved(())
	}

	fn add_to_user_property(&self, _property: String, _amount: f64) -> BridgeCall<()> {
		resolved(())
	}

	fn set_user_property_once(&self, _property: String, _value: Value) -> BridgeCall<()> {
		resolved(())
	}
}
