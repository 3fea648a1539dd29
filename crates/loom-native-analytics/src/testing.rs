// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! A recording bridge for tests.
//!
//! Enabled with the `testing` feature.

use loom_native_analytics_core::{
	rejected, resolved, BridgeCall, BridgeError, NativeBridge, Properties, RevenueCall,
};
use parking_lot::Mutex;
use serde_json::Value;

/// One call received by a [`RecordingBridge`].
#[derive(Debug, Clone, PartialEq)]
pub enum BridgeInvocation {
	Initialize {
		api_key: String,
		track_session_events: bool,
	},
	SetUserId(Option<String>),
	SetUserProperties(Properties),
	SetOptOut(bool),
	ClearUserProperties,
	GetDeviceId,
	RegenerateDeviceId,
	LogEvent(String),
	LogEventWithProps(String, Properties),
	LogEventWithTimestamp(String, i64, Properties),
	LogRevenue(RevenueCall),
	SetUserProperty(String, Value),
	UnsetUserProperty(String),
	AddToUserProperty(String, f64),
	SetUserPropertyOnce(String, Value),
}

/// Bridge that records every invocation and resolves immediately.
///
/// Call [`RecordingBridge::reject_with`] to make subsequent calls fail with a
/// given native error.
#[derive(Debug, Default)]
pub struct RecordingBridge {
	invocations: Mutex<Vec<BridgeInvocation>>,
	device_id: Mutex<String>,
	rejection: Mutex<Option<BridgeError>>,
}

impl RecordingBridge {
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the value `get_device_id` resolves to.
	pub fn with_device_id(self, device_id: impl Into<String>) -> Self {
		*self.device_id.lock() = device_id.into();
		self
	}

	/// Makes every later call resolve to `error`.
	pub fn reject_with(&self, error: BridgeError) {
		*self.rejection.lock() = Some(error);
	}

	pub fn invocations(&self) -> Vec<BridgeInvocation> {
		self.invocations.lock().clone()
	}

	pub fn last_invocation(&self) -> Option<BridgeInvocation> {
		self.invocations.lock().last().cloned()
	}

	pub fn clear(&self) {
		self.invocations.lock().clear();
	}

	fn record<T: Send + 'static>(&self, invocation: BridgeInvocation, value: T) -> BridgeCall<T> {
		self.invocations.lock().push(invocation);
		match self.rejection.lock().clone() {
			Some(error) => rejected(error),
			None => resolved(value),
		}
	}
}

impl NativeBridge for RecordingBridge {
	fn initialize(&self, api_key: &str, track_session_events: bool) {
		self.invocations.lock().push(BridgeInvocation::Initialize {
			api_key: api_key.to_string(),
			track_session_events,
		});
	}

	fn set_user_id(&self, user_id: Option<String>) -> BridgeCall<()> {
		self.record(BridgeInvocation::SetUserId(user_id), ())
	}

	fn set_user_properties(&self, properties: Properties) -> BridgeCall<()> {
		self.record(BridgeInvocation::SetUserProperties(properties), ())
	}

	fn set_opt_out(&self, opt_out: bool) -> BridgeCall<()> {
		self.record(BridgeInvocation::SetOptOut(opt_out), ())
	}

	fn clear_user_properties(&self) -> BridgeCall<()> {
		self.record(BridgeInvocation::ClearUserProperties, ())
	}

	fn get_device_id(&self) -> BridgeCall<String> {
		let device_id = self.device_id.lock().clone();
		self.record(BridgeInvocation::GetDeviceId, device_id)
	}

	fn regenerate_device_id(&self) -> BridgeCall<()> {
		self.record(BridgeInvocation::RegenerateDeviceId, ())
	}

	fn log_event(&self, name: String) -> BridgeCall<()> {
		self.record(BridgeInvocation::LogEvent(name), ())
	}

	fn log_event_with_props(&self, name: String, properties: Properties) -> BridgeCall<()> {
		self.record(BridgeInvocation::LogEventWithProps(name, properties), ())
	}

	fn log_event_with_timestamp(
		&self,
		name: String,
		timestamp: i64,
		properties: Properties,
	) -> BridgeCall<()> {
		self.record(
			BridgeInvocation::LogEventWithTimestamp(name, timestamp, properties),
			(),
		)
	}

	fn log_revenue(&self, revenue: RevenueCall) -> BridgeCall<()> {
		self.record(BridgeInvocation::LogRevenue(revenue), ())
	}

	fn set_user_property(&self, property: String, value: Value) -> BridgeCall<()> {
		self.record(BridgeInvocation::SetUserProperty(property, value), ())
	}

	fn unset_user_property(&self, property: String) -> BridgeCall<()> {
		self.record(BridgeInvocation::UnsetUserProperty(property), ())
	}

	fn add_to_user_property(&self, property: String, amount: f64) -> BridgeCall<()> {
		self.record(BridgeInvocation::AddToUserProperty(property, amount), ())
	}

	fn set_user_property_once(&self, property: String, value: Value) -> BridgeCall<()> {
		self.record(BridgeInvocation::SetUserPropertyOnce(property, value), ())
	}
}
