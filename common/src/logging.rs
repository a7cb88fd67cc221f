// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! Status-tagged logging for device code.
//!
//! Every event carries a `status` field the orchestrator's formatter keys on.
//! The macros go through the `tracing` re-exported by this crate, so device
//! crates log without depending on `tracing` themselves.
//!
//! [`fact!`](crate::fact) is the one event every extraction emits: the
//! interface, the fact that was asked for, and the value read off the device.

#[doc(hidden)]
pub use tracing;

#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => {
        $crate::logging::tracing::info!(status = "info", $($arg)+)
    };
}

#[macro_export]
macro_rules! success {
    ($($arg:tt)+) => {
        $crate::logging::tracing::info!(status = "success", $($arg)+)
    };
}

#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => {
        $crate::logging::tracing::debug!(status = "debug", $($arg)+)
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => {
        $crate::logging::tracing::error!(status = "error", $($arg)+)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => {
        $crate::logging::tracing::warn!(status = "warn", $($arg)+)
    };
}

/// Records a fact extracted from `interface`, e.g.
/// `fact!("br-lan", "IPv4 address", addr)`.
#[macro_export]
macro_rules! fact {
    ($interface:expr, $fact:expr, $value:expr) => {
        match (&$interface, &$fact, &$value) {
            (interface, fact, value) => $crate::logging::tracing::debug!(
                status = "fact",
                interface = %interface,
                fact = %fact,
                "{} {} is {}",
                interface,
                fact,
                value
            ),
        }
    };
}
