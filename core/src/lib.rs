// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! OpenWrt device adapter.
//!
//! Connects to an OpenWrt appliance through an injected console factory and
//! reads interface facts (addresses, netmask, MAC) from its shell.

pub mod console;
pub mod device;
pub mod dns;
pub mod error;
pub mod firewall;
pub mod hardware;
pub mod registry;
pub mod software;
pub mod templates;

#[cfg(test)]
mod testing;

pub use device::OpenWrt;
pub use error::DeviceError;
pub use registry::DeviceRegistry;
