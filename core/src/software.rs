// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # OpenWrt Software
//!
//! Reads interface facts from the running system.
//!
//! Every fact costs exactly one command on the networking console; the answer
//! is parsed by [`owrt_common::parse`] and nothing is cached between calls.
//! Failures are returned to the caller as-is, there are no retries here.

use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use owrt_common::fact;
use owrt_common::error::FactError;
use owrt_common::models::interface::{Ipv4Info, Ipv6AddressEntry, MacAddress};
use owrt_common::parse;
use owrt_common::utils::ip::{self, Ipv6Scope};
use pnet::ipnetwork::Ipv4Network;

use crate::console::ConsoleHandle;
use crate::dns::Dns;
use crate::firewall::IptablesFirewall;
use crate::hardware::OpenWrtHw;
use crate::templates::{OpenWrtHardware, OpenWrtSoftware};

const LAN_IFACE: &str = "br-lan";
const GUI_PASSWORD: &str = "admin";

/// What a console is going to be used for.
///
/// OpenWrt exposes a single shell, so every usage maps to the same console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleUsage {
    Networking,
    Wifi,
    DefaultShell,
}

impl FromStr for ConsoleUsage {
    type Err = FactError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "networking" => Ok(ConsoleUsage::Networking),
            "wifi" => Ok(ConsoleUsage::Wifi),
            "default_shell" => Ok(ConsoleUsage::DefaultShell),
            other => Err(FactError::UnknownUsage(other.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OpenWrtSw {
    console: ConsoleHandle,
    dns: Dns,
    firewall: IptablesFirewall,
}

impl OpenWrtSw {
    /// Binds the software layer to the hardware's open console.
    pub fn new(hardware: &OpenWrtHw) -> Result<Self, FactError> {
        let console = hardware.get_console()?;
        let networking = console.clone();
        Ok(Self {
            dns: Dns::new(networking.clone(), hardware.config().name.clone()),
            firewall: IptablesFirewall::new(networking),
            console,
        })
    }

    fn console_for(&self, usage: ConsoleUsage) -> &ConsoleHandle {
        match usage {
            ConsoleUsage::Networking | ConsoleUsage::Wifi | ConsoleUsage::DefaultShell => &self.console,
        }
    }

    fn ifconfig(&self, interface: &str) -> Result<String, FactError> {
        let output = self
            .console_for(ConsoleUsage::Networking)
            .execute_command(&format!("ifconfig {interface}"))?;
        Ok(output)
    }

    pub fn get_interface_ipv4_netmask(&self, interface: &str) -> Result<String, FactError> {
        let report = self.ifconfig(interface)?;
        let netmask = parse::ipv4_netmask(interface, &report)?;
        fact!(interface, "IPv4 netmask", netmask);
        Ok(netmask)
    }

    /// Address and netmask from a single `ifconfig` run.
    pub fn get_interface_ipv4_info(&self, interface: &str) -> Result<Ipv4Info, FactError> {
        let report = self.ifconfig(interface)?;
        parse::ipv4_info(interface, &report)
    }

    /// First IPv6 address of `scope`, e.g. `global` or `link-local`.
    pub fn get_interface_ipv6_address(&self, interface: &str, scope: &str) -> Result<String, FactError> {
        let scope: Ipv6Scope = scope
            .parse()
            .map_err(|e| FactError::unsupported_scope(interface, e))?;
        let report = self.ifconfig(interface)?;
        let addr = parse::ipv6_address(interface, &report, scope)?;
        fact!(interface, format!("IPv6 {scope} address"), addr);
        Ok(addr)
    }

    pub fn get_interface_ipv6_entries(&self, interface: &str) -> Result<Vec<Ipv6AddressEntry>, FactError> {
        let report = self.ifconfig(interface)?;
        parse::ipv6_entries(interface, &report)
    }

    /// Subnet of `interface`, built non-strictly from its address and netmask.
    pub fn get_lan_network(&self, interface: &str) -> Result<Ipv4Network, FactError> {
        let info = self.get_interface_ipv4_info(interface)?;
        parse::lan_network(interface, &info)
    }
}

impl OpenWrtSoftware for OpenWrtSw {
    fn lan_iface(&self) -> &str {
        LAN_IFACE
    }

    fn gui_password(&self) -> &str {
        GUI_PASSWORD
    }

    fn lan_gateway_ipv4(&self) -> Result<Ipv4Addr, FactError> {
        let interface = self.lan_iface();
        let addr = self.get_interface_ipv4addr(interface)?;
        addr.parse().map_err(|_| {
            FactError::parse(interface, "IPv4 address", format!("'{addr}' is not a dotted-quad address"))
        })
    }

    fn lan_gateway_ipv6(&self) -> Result<Ipv6Addr, FactError> {
        let interface = self.lan_iface();
        let addr = self.get_interface_ipv6addr(interface)?;
        ip::parse_ipv6(&addr).ok_or_else(|| {
            FactError::parse(interface, "IPv6 global address", format!("'{addr}' is not an IPv6 address"))
        })
    }

    fn lan_network_ipv4(&self) -> Result<Ipv4Network, FactError> {
        self.get_lan_network(self.lan_iface())
    }

    fn dns(&self) -> &Dns {
        &self.dns
    }

    fn firewall(&self) -> &IptablesFirewall {
        &self.firewall
    }

    fn get_interface_ipv4addr(&self, interface: &str) -> Result<String, FactError> {
        let report = self.ifconfig(interface)?;
        let addr = parse::ipv4_address(interface, &report)?;
        fact!(interface, "IPv4 address", addr);
        Ok(addr)
    }

    fn get_interface_ipv6addr(&self, interface: &str) -> Result<String, FactError> {
        self.get_interface_ipv6_address(interface, Ipv6Scope::Global.as_str())
    }

    fn get_interface_mac_addr(&self, interface: &str) -> Result<String, FactError> {
        let raw = self
            .console_for(ConsoleUsage::Networking)
            .execute_command(&format!("cat /sys/class/net/{interface}/address"))?;
        Ok(MacAddress::from_sysfs(&raw).into())
    }

    fn get_console(&self, usage: &str) -> Result<ConsoleHandle, FactError> {
        let usage: ConsoleUsage = usage.parse()?;
        Ok(self.console_for(usage).clone())
    }
}
