// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Interface Fact Models
//!
//! Typed facts extracted from the raw output of network tools run on a device.
//!
//! All of these are transient: they are built fresh for every extraction call
//! and never cached, so they always reflect the device at the time of the call.

use std::fmt;
use std::net::Ipv4Addr;

use pnet::util::MacAddr;

use crate::utils::ip::Ipv6Scope;
use crate::utils::mac;

/// IPv4 address and netmask of an interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ipv4Info {
    pub address: Ipv4Addr,
    pub netmask: Ipv4Addr,
}

/// One `inet6` entry of an interface, as printed by the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ipv6AddressEntry {
    /// The address token exactly as it appeared, minus any `/NN` suffix.
    pub address: String,
    pub scope: Ipv6Scope,
}

impl Ipv6AddressEntry {
    pub fn new(address: impl Into<String>, scope: Ipv6Scope) -> Self {
        Self {
            address: address.into(),
            scope,
        }
    }
}

/// A hardware address as reported by the device.
///
/// Kept as text since devices are free to report whatever sysfs holds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MacAddress(String);

impl MacAddress {
    /// Wraps a raw sysfs dump, dropping surrounding whitespace.
    pub fn from_sysfs(raw: &str) -> Self {
        Self(mac::clean_sysfs_dump(raw).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The 6 octets, if the reported value is a well-formed MAC.
    pub fn to_mac_addr(&self) -> Option<MacAddr> {
        mac::to_mac_addr(&self.0)
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<MacAddress> for String {
    fn from(mac: MacAddress) -> Self {
        mac.0
    }
}
