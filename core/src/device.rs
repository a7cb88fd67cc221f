// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! The OpenWrt device as registered with the orchestrator.
//!
//! Owns the hardware (and through it the console) and builds the software
//! layer once the console is up.

use std::net::Ipv4Addr;
use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use owrt_common::config::{Config, DeviceConfig};
use owrt_common::{info, success};
use pnet::ipnetwork::Ipv4Network;

use crate::console::ConnectionFactory;
use crate::error::DeviceError;
use crate::hardware::OpenWrtHw;
use crate::software::OpenWrtSw;
use crate::templates::{BoardfarmDevice, InteractiveConsoles, OpenWrtDevice, OpenWrtHardware, OpenWrtSoftware};

const WAN_IFACE: &str = "br-wan";
const LAN_IFACE: &str = "br-lan";
const GUI_PASSWORD: &str = "admin";
const LAN_GATEWAY: Ipv4Addr = Ipv4Addr::new(192, 168, 0, 1);
const LAN_NETWORK: Ipv4Addr = Ipv4Addr::new(192, 168, 0, 0);
const LAN_PREFIX: u8 = 24;

static DEFAULT_LAN: OnceLock<Ipv4Network> = OnceLock::new();

/// Factory-default LAN `192.168.0.0/24`.
fn default_lan() -> Ipv4Network {
    *DEFAULT_LAN.get_or_init(|| {
        default_lan()
    })
}

pub struct OpenWrt {
    config: DeviceConfig,
    hw: OpenWrtHw,
    sw: Option<OpenWrtSw>,
}

impl OpenWrt {
    pub fn new(config: DeviceConfig, cfg: &Config, factory: Arc<dyn ConnectionFactory>) -> Self {
        Self {
            hw: OpenWrtHw::new(config.clone(), cfg.clone(), factory),
            sw: None,
            config,
        }
    }

    fn init_software(&mut self) -> Result<(), DeviceError> {
        self.sw = Some(OpenWrtSw::new(&self.hw)?);
        success!("{} is ready", self.config.name);
        Ok(())
    }
}

impl OpenWrtDevice for OpenWrt {
    type Hardware = OpenWrtHw;
    type Software = OpenWrtSw;

    fn hw(&self) -> &OpenWrtHw {
        &self.hw
    }

    fn sw(&self) -> Result<&OpenWrtSw, DeviceError> {
        self.sw
            .as_ref()
            .ok_or_else(|| DeviceError::NotInitialized(self.config.name.clone()))
    }

    fn mac(&self) -> Option<&str> {
        self.config.mac.as_deref()
    }

    fn wan_iface(&self) -> &str {
        WAN_IFACE
    }

    fn lan_iface(&self) -> &str {
        LAN_IFACE
    }

    fn gui_password(&self) -> &str {
        GUI_PASSWORD
    }

    /// Factory-default gateway, not read from the device.
    fn lan_gateway(&self) -> Ipv4Addr {
        LAN_GATEWAY
    }

    /// Factory-default LAN, not read from the device.
    fn lan_network(&self) -> Ipv4Network {
        default_lan()
    }

    fn get_interface_ipaddr(&self, interface: &str) -> Result<String, DeviceError> {
        Ok(self.sw()?.get_interface_ipv4addr(interface)?)
    }

    fn get_interface_ip6addr(&self, interface: &str) -> Result<String, DeviceError> {
        Ok(self.sw()?.get_interface_ipv6addr(interface)?)
    }
}

#[async_trait]
impl BoardfarmDevice for OpenWrt {
    fn device_name(&self) -> &str {
        &self.config.name
    }

    fn device_type(&self) -> &str {
        &self.config.device_type
    }

    fn skip_boot(&mut self) -> Result<(), DeviceError> {
        info!(
            "Initializing {}({}) device with skip-boot option",
            self.device_name(),
            self.device_type()
        );
        let name = self.config.name.clone();
        self.hw.connect_to_console(&name)?;
        self.init_software()
    }

    async fn skip_boot_async(&mut self) -> Result<(), DeviceError> {
        info!(
            "Initializing {}({}) device with async skip-boot option",
            self.device_name(),
            self.device_type()
        );
        let name = self.config.name.clone();
        self.hw.connect_to_console_async(&name).await?;
        self.init_software()
    }

    fn get_interactive_consoles(&self) -> InteractiveConsoles {
        self.hw.get_interactive_consoles()
    }

    /// Closes the console and drops the software layer.
    fn disconnect(&mut self) -> Result<(), DeviceError> {
        self.sw = None;
        Ok(self.hw.disconnect_from_console()?)
    }
}
