// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use serde::Deserialize;

const DEFAULT_PORT: &str = "22";
const DEFAULT_USERNAME: &str = "root";
const DEFAULT_PASSWORD: &str = "root";

/// Global options handed down by the orchestrator for the whole run.
///
/// These are usually mapped from the orchestrator's command-line arguments
/// and are shared by every device in the testbed.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Persists the raw console transcript of every session.
    ///
    /// The flag is forwarded untouched to the connection factory; this crate
    /// never writes logs itself.
    pub save_console_logs: bool,
}

/// Inventory entry describing a single OpenWrt device.
///
/// Mirrors one device block of the testbed inventory. Only `name` and
/// `connection_type` are mandatory; the management credentials fall back to
/// the stock OpenWrt `root`/`root` account on port 22.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeviceConfig {
    /// Name of the device inside the testbed (e.g. `board`).
    pub name: String,

    /// Device type used to pick a constructor from the registry.
    #[serde(rename = "type", default = "default_type")]
    pub device_type: String,

    /// Transport kind understood by the connection factory (e.g. `ssh_connection`).
    pub connection_type: String,

    /// Management IP address of the device.
    #[serde(default)]
    pub ipaddr: Option<String>,

    /// Management connection port.
    #[serde(default = "default_port")]
    pub port: String,

    /// Management connection username.
    #[serde(default = "default_username")]
    pub username: String,

    /// Management connection password.
    #[serde(default = "default_password")]
    pub password: String,

    /// MAC address of the CPE as recorded in the inventory.
    #[serde(default)]
    pub mac: Option<String>,
}

fn default_type() -> String {
    "OpenWRT".to_string()
}

fn default_port() -> String {
    DEFAULT_PORT.to_string()
}

fn default_username() -> String {
    DEFAULT_USERNAME.to_string()
}

fn default_password() -> String {
    DEFAULT_PASSWORD.to_string()
}

impl DeviceConfig {
    /// Builds a config with default credentials for the given transport.
    pub fn new(name: impl Into<String>, connection_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            device_type: default_type(),
            connection_type: connection_type.into(),
            ipaddr: None,
            port: default_port(),
            username: default_username(),
            password: default_password(),
            mac: None,
        }
    }

    /// Parses a single device entry from TOML.
    pub fn from_toml_str(s: &str) -> anyhow::Result<Self> {
        toml::from_str(s).map_err(|e| anyhow::anyhow!("Invalid device config: {e}"))
    }
}
