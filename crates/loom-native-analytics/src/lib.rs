// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Native analytics SDK for Loom.
//!
//! This crate is a thin facade over a platform-native analytics SDK. It
//! checks that the SDK was initialized, shapes a few arguments, and forwards
//! every call to a [`NativeBridge`]. Network transmission, batching, retries
//! and device identifiers all live in the native SDK.
//!
//! # Features
//!
//! - **Initialization guard**: every call fails with
//!   [`AnalyticsError::NotInitialized`] until the SDK is configured
//! - **Event prefixing**: an optional prefix applied to every logged event
//! - **Platform-aware revenue**: receipts are only forwarded where the native
//!   SDK accepts them
//! - **Layered configuration**: defaults, TOML file, environment variables
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use loom_native_analytics::{AnalyticsClient, BridgeRegistry, Properties};
//!
//! // Native host, at startup
//! BridgeRegistry::global().register(Arc::new(my_native_bridge));
//!
//! // Application code
//! let mut client = AnalyticsClient::new("a1b2c3", true, Some("app_"))?;
//! client.set_user_id(12345)?;
//! client.log_event("purchase", Properties::new().insert("item", "x"))?;
//! client.log_revenue("sku1", 2, 9.99, Some("receiptABC"))?;
//! ```

mod client;
mod config;
mod error;
mod options;
mod sources;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use client::{AnalyticsClient, AnalyticsClientBuilder};
pub use config::{NativeAnalyticsConfig, NativeAnalyticsConfigLayer};
pub use error::{AnalyticsError, ConfigError, Result};
pub use options::ClientOptions;
pub use sources::{
	load_config, load_from_sources, ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource,
	ENV_PREFIX,
};

// Re-export core types for convenience
pub use loom_native_analytics_core::{
	rejected, resolved, ApiKey, BridgeCall, BridgeError, BridgeRegistry, NativeBridge, NoOpBridge,
	Platform, Properties, Revenue, RevenueCall, RevenueDispatch, SharedBridge,
};
