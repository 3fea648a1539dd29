// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Errors raised by a native bridge.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A rejection produced by the native analytics SDK.
///
/// Bridges report failures as a code plus a human readable message, the same
/// shape a native promise rejection carries. The facade hands these back to
/// the caller untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{code}: {message}")]
pub struct BridgeError {
	/// Machine readable error code chosen by the native SDK.
	pub code: String,
	/// Description of the failure.
	pub message: String,
}

impl BridgeError {
	/// Creates a new bridge error.
	pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
		Self {
			code: code.into(),
			message: message.into(),
		}
	}
}
