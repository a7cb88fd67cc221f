// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! Capability contracts every OpenWrt adapter has to fulfil.
//!
//! A device is split in two roles: hardware (console lifecycle, inventory
//! facts) and software (what is read from the running system). The device
//! itself ties both together and is what the orchestrator talks to.

use std::collections::HashMap;
use std::net::{Ipv4Addr, Ipv6Addr};

use async_trait::async_trait;
use owrt_common::config::DeviceConfig;
use owrt_common::error::{ConsoleError, FactError};
use pnet::ipnetwork::Ipv4Network;

use crate::console::ConsoleHandle;
use crate::dns::Dns;
use crate::error::DeviceError;
use crate::firewall::IptablesFirewall;

/// Named interactive consoles of a device.
pub type InteractiveConsoles = HashMap<String, ConsoleHandle>;

#[async_trait]
pub trait OpenWrtHardware: Send {
    fn config(&self) -> &DeviceConfig;

    /// MAC address recorded in the inventory.
    fn mac_address(&self) -> Option<&str>;

    fn connect_to_console(&mut self, device_name: &str) -> Result<(), ConsoleError>;

    async fn connect_to_console_async(&mut self, device_name: &str) -> Result<(), ConsoleError>;

    /// Closes the console. Calling it with no open session is a no-op.
    fn disconnect_from_console(&mut self) -> Result<(), ConsoleError>;

    fn get_interactive_consoles(&self) -> InteractiveConsoles;
}

pub trait OpenWrtSoftware {
    fn lan_iface(&self) -> &str;

    fn gui_password(&self) -> &str;

    fn lan_gateway_ipv4(&self) -> Result<Ipv4Addr, FactError>;

    fn lan_gateway_ipv6(&self) -> Result<Ipv6Addr, FactError>;

    fn lan_network_ipv4(&self) -> Result<Ipv4Network, FactError>;

    fn dns(&self) -> &Dns;

    fn firewall(&self) -> &IptablesFirewall;

    fn get_interface_ipv4addr(&self, interface: &str) -> Result<String, FactError>;

    /// Global IPv6 address of the interface.
    fn get_interface_ipv6addr(&self, interface: &str) -> Result<String, FactError>;

    fn get_interface_mac_addr(&self, interface: &str) -> Result<String, FactError>;

    /// Console for a usage such as `networking`, `wifi` or `default_shell`.
    fn get_console(&self, usage: &str) -> Result<ConsoleHandle, FactError>;
}

pub trait OpenWrtDevice {
    type Hardware: OpenWrtHardware;
    type Software: OpenWrtSoftware;

    fn hw(&self) -> &Self::Hardware;

    /// Fails until the device has been booted.
    fn sw(&self) -> Result<&Self::Software, DeviceError>;

    fn mac(&self) -> Option<&str>;

    fn wan_iface(&self) -> &str;

    fn lan_iface(&self) -> &str;

    fn gui_password(&self) -> &str;

    fn lan_gateway(&self) -> Ipv4Addr;

    fn lan_network(&self) -> Ipv4Network;

    fn get_interface_ipaddr(&self, interface: &str) -> Result<String, DeviceError>;

    fn get_interface_ip6addr(&self, interface: &str) -> Result<String, DeviceError>;
}

/// What the orchestrator sees of any registered device.
#[async_trait]
pub trait BoardfarmDevice: Send {
    fn device_name(&self) -> &str;

    fn device_type(&self) -> &str;

    /// Brings the device up without flashing or rebooting it.
    fn skip_boot(&mut self) -> Result<(), DeviceError>;

    async fn skip_boot_async(&mut self) -> Result<(), DeviceError>;

    fn get_interactive_consoles(&self) -> InteractiveConsoles;

    fn disconnect(&mut self) -> Result<(), DeviceError>;
}
