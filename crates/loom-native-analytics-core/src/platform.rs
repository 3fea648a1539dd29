// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Runtime platform detection and per-platform revenue call shapes.
//!
//! Native SDKs disagree on the revenue signature: iOS accepts an App Store
//! receipt alongside the product, quantity and price, every other platform
//! takes only the first three. [`RevenueDispatch`] is chosen once from the
//! [`Platform`] and turns a caller's [`Revenue`] into the [`RevenueCall`] the
//! bridge expects.

use serde::{Deserialize, Serialize};

/// Operating system the native SDK runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
	Ios,
	Android,
	Macos,
	Windows,
	Linux,
	Other,
}

impl Platform {
	/// Detects the platform from the compilation target.
	pub fn current() -> Self {
		if cfg!(target_os = "ios") {
			Platform::Ios
		} else if cfg!(target_os = "android") {
			Platform::Android
		} else if cfg!(target_os = "macos") {
			Platform::Macos
		} else if cfg!(target_os = "windows") {
			Platform::Windows
		} else if cfg!(target_os = "linux") {
			Platform::Linux
		} else {
			Platform::Other
		}
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			Platform::Ios => "ios",
			Platform::Android => "android",
			Platform::Macos => "macos",
			Platform::Windows => "windows",
			Platform::Linux => "linux",
			Platform::Other => "other",
		}
	}
}

impl std::fmt::Display for Platform {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

impl std::str::FromStr for Platform {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"ios" => Ok(Platform::Ios),
			"android" => Ok(Platform::Android),
			"macos" => Ok(Platform::Macos),
			"windows" => Ok(Platform::Windows),
			"linux" => Ok(Platform::Linux),
			"other" => Ok(Platform::Other),
			_ => Err(format!("invalid platform: {}", s)),
		}
	}
}

/// A revenue record as supplied by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct Revenue {
	pub product_id: String,
	pub quantity: u32,
	/// Unit price.
	pub amount: f64,
	/// Store receipt, only honoured on platforms that validate receipts.
	pub receipt: Option<String>,
}

impl Revenue {
	pub fn new(product_id: impl Into<String>, quantity: u32, amount: f64) -> Self {
		Self {
			product_id: product_id.into(),
			quantity,
			amount,
			receipt: None,
		}
	}

	/// Attaches a store receipt (builder pattern).
	pub fn with_receipt(mut self, receipt: impl Into<String>) -> Self {
		self.receipt = Some(receipt.into());
		self
	}
}

/// The revenue arguments as the native bridge receives them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "signature", rename_all = "snake_case")]
pub enum RevenueCall {
	/// Four-argument form. `receipt` is forwarded even when absent.
	WithReceipt {
		product_id: String,
		quantity: u32,
		amount: f64,
		receipt: Option<String>,
	},
	/// Three-argument form. There is no receipt slot at all.
	Basic {
		product_id: String,
		quantity: u32,
		amount: f64,
	},
}

impl RevenueCall {
	pub fn product_id(&self) -> &str {
		match self {
			RevenueCall::WithReceipt { product_id, .. } | RevenueCall::Basic { product_id, .. } => {
				product_id
			}
		}
	}
}

/// Strategy for shaping revenue calls on the running platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevenueDispatch {
	WithReceipt,
	WithoutReceipt,
}

impl RevenueDispatch {
	/// Only iOS bridges accept a receipt argument.
	pub fn for_platform(platform: Platform) -> Self {
		match platform {
			Platform::Ios => RevenueDispatch::WithReceipt,
			_ => RevenueDispatch::WithoutReceipt,
		}
	}

	/// Converts the caller's revenue into this platform's bridge arguments.
	pub fn shape(&self, revenue: Revenue) -> RevenueCall {
		let Revenue {
			product_id,
			quantity,
			amount,
			receipt,
		} = revenue;

		match self {
			RevenueDispatch::WithReceipt => RevenueCall::WithReceipt {
				product_id,
				quantity,
				amount,
				receipt,
			},
			RevenueDispatch::WithoutReceipt => RevenueCall::Basic {
				product_id,
				quantity,
				amount,
			},
		}
	}
}
