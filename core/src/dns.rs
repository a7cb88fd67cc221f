// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use std::net::IpAddr;

use owrt_common::debug;
use owrt_common::error::ConsoleError;

use crate::console::ConsoleHandle;

const RESOLV_CONF: &str = "/etc/resolv.conf";

/// DNS view of a device, bound to its networking console.
#[derive(Debug, Clone)]
pub struct Dns {
    console: ConsoleHandle,
    device_name: String,
}

impl Dns {
    pub fn new(console: ConsoleHandle, device_name: impl Into<String>) -> Self {
        Self {
            console,
            device_name: device_name.into(),
        }
    }

    pub fn device_name(&self) -> &str {
        &self.device_name
    }

    /// Name servers configured in the device's resolver, in file order.
    ///
    /// Entries that are not IP addresses are skipped.
    pub fn nameservers(&self) -> Result<Vec<IpAddr>, ConsoleError> {
        let output = self.console.execute_command(&format!("cat {RESOLV_CONF}"))?;

        let servers = output
            .lines()
            .filter_map(|line| {
                let mut parts = line.split_whitespace();
                match (parts.next(), parts.next()) {
                    (Some("nameserver"), Some(addr)) => Some(addr),
                    _ => None,
                }
            })
            .filter_map(|addr| match addr.parse::<IpAddr>() {
                Ok(ip) => Some(ip),
                Err(_) => {
                    debug!(device = %self.device_name, "Ignoring nameserver entry '{addr}'");
                    None
                }
            })
            .collect();

        Ok(servers)
    }
}
