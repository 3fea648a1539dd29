// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core types for the Loom native analytics proxy.
//!
//! This crate defines the contract between the analytics facade
//! (`loom-native-analytics`) and a platform-native analytics SDK. The native
//! SDK owns transmission, batching, persistence and device identifiers; this
//! crate only describes the shape of the calls made into it.
//!
//! # Overview
//!
//! - [`NativeBridge`]: the capability surface a native SDK exposes
//! - [`BridgeCall`]: the pending result handed back by every bridge call
//! - [`BridgeRegistry`]: where native hosts publish their bridge
//! - [`Platform`] and [`RevenueDispatch`]: per-platform revenue call shapes
//! - [`Properties`]: builder for event and user properties
//! - [`ApiKey`]: redacting wrapper for the SDK API key

pub mod api_key;
pub mod bridge;
pub mod error;
pub mod identify;
pub mod platform;
pub mod properties;
pub mod registry;

pub use api_key::{ApiKey, REDACTED};
pub use bridge::{rejected, resolved, BridgeCall, NativeBridge, NoOpBridge, SharedBridge};
pub use error::BridgeError;
pub use identify::normalize_user_id;
pub use platform::{Platform, Revenue, RevenueCall, RevenueDispatch};
pub use properties::Properties;
pub use registry::BridgeRegistry;
