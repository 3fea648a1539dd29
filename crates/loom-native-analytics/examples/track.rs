// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Example: Forward a few analytics calls through the no-op bridge.
//!
//! Run with:
//!   LOOM_NATIVE_ANALYTICS_API_KEY=demo RUST_LOG=debug \
//!     cargo run --example track -p loom-native-analytics
//!
//! Pass a TOML file path as the first argument to layer file configuration
//! under the environment.

use std::path::PathBuf;
use std::sync::Arc;

use loom_native_analytics::{load_config, AnalyticsClient, BridgeRegistry, NoOpBridge, Properties};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
		.init();

	let config_path = std::env::args().nth(1).map(PathBuf::from);
	let config = load_config(config_path.as_deref())?;

	// A real host registers its native SDK here.
	BridgeRegistry::global().register(Arc::new(NoOpBridge));

	let mut client = AnalyticsClient::builder().config(&config).build()?;
	println!("Initialized for platform {}", client.platform());

	client.set_user_id(12345)?.await?;
	client
		.set_user_properties(Properties::new().insert("plan", "pro"))?
		.await?;

	client
		.log_event("purchase", Properties::new().insert("item", "x"))?
		.await?;
	client.log_event_at("checkout", chrono::Utc::now(), None)?.await?;
	client
		.log_revenue("sku1", 2, 9.99, Some("receiptABC"))?
		.await?;

	client.set_log_event_prefix("demo_")?;
	client.log_event("done", None)?.await?;

	let device_id = client.get_device_id()?.await?;
	println!("Device ID: {:?}", device_id);

	Ok(())
}
