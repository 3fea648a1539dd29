// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Registry through which native hosts publish their analytics bridge.
//!
//! # Lifecycle
//!
//! 1. The native host calls [`BridgeRegistry::register`] on
//!    [`BridgeRegistry::global`] during startup.
//! 2. Analytics clients resolve the bridge once, when they are constructed.
//! 3. [`BridgeRegistry::unregister`] removes the bridge for clients created
//!    afterwards. Clients that already hold a handle keep using it.
//!
//! Tests and embedders that need isolation create their own registry with
//! [`BridgeRegistry::new`].

use std::sync::OnceLock;

use parking_lot::RwLock;

use crate::bridge::SharedBridge;

static GLOBAL_REGISTRY: OnceLock<BridgeRegistry> = OnceLock::new();

/// Holds at most one native bridge.
#[derive(Default)]
pub struct BridgeRegistry {
	slot: RwLock<Option<SharedBridge>>,
}

impl BridgeRegistry {
	pub fn new() -> Self {
		Self {
			slot: RwLock::new(None),
		}
	}

	/// The process-wide registry.
	pub fn global() -> &'static BridgeRegistry {
		GLOBAL_REGISTRY.get_or_init(BridgeRegistry::new)
	}

	/// Publishes `bridge`, returning the previously registered one.
	pub fn register(&self, bridge: SharedBridge) -> Option<SharedBridge> {
		self.slot.write().replace(bridge)
	}

	/// Removes the registered bridge.
	pub fn unregister(&self) -> Option<SharedBridge> {
		self.slot.write().take()
	}

	/// Returns a handle to the registered bridge, if any.
	pub fn bridge(&self) -> Option<SharedBridge> {
		self.slot.read().clone()
	}

	pub fn is_registered(&self) -> bool {
		self.slot.read().is_some()
	}
}

impl std::fmt::Debug for BridgeRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("BridgeRegistry")
			.field("registered", &self.is_registered())
			.finish()
	}
}
