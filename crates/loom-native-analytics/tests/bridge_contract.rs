// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::Arc;

use futures::channel::oneshot;
use futures::FutureExt;
use loom_native_analytics::{
	resolved, AnalyticsClient, AnalyticsError, BridgeCall, BridgeError, BridgeRegistry,
	ClientOptions, NativeBridge, Platform, Properties, RevenueCall,
};
use parking_lot::Mutex;
use serde_json::{json, Value};

/// Bridge whose event calls stay pending until the test completes them,
/// the way a native SDK acknowledges work on its own thread.
#[derive(Default)]
struct DeferredBridge {
	initialized_with: Mutex<Option<(String, bool)>>,
	events: Mutex<Vec<String>>,
	pending: Mutex<Vec<oneshot::Sender<Result<(), BridgeError>>>>,
}

impl DeferredBridge {
	fn defer(&self) -> BridgeCall<()> {
		let (tx, rx) = oneshot::channel();
		self.pending.lock().push(tx);
		Box::pin(rx.map(|result| {
			result.unwrap_or_else(|_| Err(BridgeError::new("E_CANCELLED", "native call dropped")))
		}))
	}

	fn complete_all(&self, result: Result<(), BridgeError>) {
		for tx in self.pending.lock().drain(..) {
			let _ = tx.send(result.clone());
		}
	}
}

impl NativeBridge for DeferredBridge {
	fn initialize(&self, api_key: &str, track_session_events: bool) {
		*self.initialized_with.lock() = Some((api_key.to_string(), track_session_events));
	}

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
		resolved("device-from-native".to_string())
	}

	fn regenerate_device_id(&self) -> BridgeCall<()> {
		resolved(())
	}

	fn log_event(&self, name: String) -> BridgeCall<()> {
		self.events.lock().push(name);
		self.defer()
	}

	fn log_event_with_props(&self, name: String, _properties: Properties) -> BridgeCall<()> {
		self.events.lock().push(name);
		self.defer()
	}

	fn log_event_with_timestamp(
		&self,
		name: String,
		_timestamp: i64,
		_properties: Properties,
	) -> BridgeCall<()> {
		self.events.lock().push(name);
		self.defer()
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

#[test]
fn calls_reach_native_side_before_being_awaited() {
	let bridge = Arc::new(DeferredBridge::default());
	let client = AnalyticsClient::builder()
		.api_key("a1b2c3")
		.event_prefix("app_")
		.bridge(bridge.clone())
		.platform(Platform::Android)
		.build()
		.unwrap();

	let mut pending = client.log_event("open", None).unwrap();

	assert_eq!(*bridge.events.lock(), vec!["app_open".to_string()]);
	assert!((&mut pending).now_or_never().is_none());

	bridge.complete_all(Ok(()));
	assert_eq!(tokio_test::block_on(pending), Ok(()));
}

#[tokio::test]
async fn native_rejection_is_returned_as_is() {
	let bridge = Arc::new(DeferredBridge::default());
	let client = AnalyticsClient::builder()
		.api_key("a1b2c3")
		.bridge(bridge.clone())
		.build()
		.unwrap();

	let pending = client
		.log_event("purchase", Properties::new().insert("item", "x"))
		.unwrap();
	let native = BridgeError::new("E_INVALID_EVENT", "event rejected by native SDK");
	bridge.complete_all(Err(native.clone()));

	assert_eq!(pending.await, Err(native));
}

#[tokio::test]
async fn json_options_drive_initialization() {
	let bridge = Arc::new(DeferredBridge::default());
	let registry = BridgeRegistry::new();
	registry.register(bridge.clone());

	let options = ClientOptions::from_value(&json!({
		"apiKey": "a1b2c3",
		"trackSessionEvents": "yes",
		"eventPrefix": "web_",
	}))
	.unwrap();

	let mut client = AnalyticsClient::from_registry(&registry, Platform::Ios);
	client.initialize(options).unwrap();

	assert_eq!(
		*bridge.initialized_with.lock(),
		Some(("a1b2c3".to_string(), false))
	);
	assert_eq!(client.event_prefix(), Some("web_"));
	assert_eq!(
		client.get_device_id().unwrap().await.unwrap(),
		"device-from-native"
	);
}

#[test]
fn non_string_api_key_never_initializes() {
	let bridge = Arc::new(DeferredBridge::default());

	let err = ClientOptions::from_value(&json!({"apiKey": 42})).unwrap_err();

	assert!(matches!(err, AnalyticsError::InvalidArgument(_)));
	assert!(bridge.initialized_with.lock().is_none());
}

#[test]
fn global_registry_backs_the_single_call_constructor() {
	assert!(matches!(
		AnalyticsClient::new("a1b2c3", true, None),
		Err(AnalyticsError::MissingDependency(_))
	));

	let bridge = Arc::new(DeferredBridge::default());
	BridgeRegistry::global().register(bridge.clone());

	let client = AnalyticsClient::new("a1b2c3", true, Some("app_")).unwrap();

	assert!(client.is_initialized());
	assert_eq!(client.platform(), Platform::current());
	assert_eq!(
		*bridge.initialized_with.lock(),
		Some(("a1b2c3".to_string(), true))
	);

	BridgeRegistry::global().unregister();
}
