// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! **Medium Access Control (MAC)** address helpers.
//!
//! Devices report their hardware address as a raw sysfs dump
//! (`/sys/class/net/<iface>/address`), which is a single line with a trailing
//! newline and sometimes a stray carriage return from the console.

use pnet::util::MacAddr;

/// Strips the surrounding whitespace of a sysfs hardware-address dump.
///
/// The remainder is returned as-is, without validating it.
pub fn clean_sysfs_dump(raw: &str) -> &str {
    raw.trim()
}

/// Parses a colon-separated MAC address into its octets.
pub fn to_mac_addr(mac: &str) -> Option<MacAddr> {
    mac.trim().parse::<MacAddr>().ok()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
