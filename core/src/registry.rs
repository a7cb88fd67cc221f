// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! Device-type discovery.
//!
//! The orchestrator asks a [`DeviceRegistry`] for a constructor by type name.
//! The registry is a plain value built from a static table at start-up.

use std::collections::BTreeMap;
use std::sync::Arc;

use owrt_common::config::{Config, DeviceConfig};
use owrt_common::debug;

use crate::console::ConnectionFactory;
use crate::device::OpenWrt;
use crate::error::DeviceError;
use crate::templates::BoardfarmDevice;

pub type DeviceConstructor =
    fn(DeviceConfig, &Config, Arc<dyn ConnectionFactory>) -> Box<dyn BoardfarmDevice>;

const KNOWN_DEVICES: &[(&str, DeviceConstructor)] = &[("OpenWRT", new_openwrt)];

fn new_openwrt(
    config: DeviceConfig,
    cfg: &Config,
    factory: Arc<dyn ConnectionFactory>,
) -> Box<dyn BoardfarmDevice> {
    Box::new(OpenWrt::new(config, cfg, factory))
}

#[derive(Debug, Clone)]
pub struct DeviceRegistry {
    constructors: BTreeMap<String, DeviceConstructor>,
}

impl Default for DeviceRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl DeviceRegistry {
    /// Registry holding every device type shipped with this crate.
    pub fn builtin() -> Self {
        let constructors = KNOWN_DEVICES
            .iter()
            .map(|(name, ctor)| (name.to_string(), *ctor))
            .collect();
        Self { constructors }
    }

    /// Adds (or replaces) a device type.
    pub fn with(mut self, device_type: impl Into<String>, ctor: DeviceConstructor) -> Self {
        self.constructors.insert(device_type.into(), ctor);
        self
    }

    pub fn device_types(&self) -> impl Iterator<Item = &str> {
        self.constructors.keys().map(String::as_str)
    }

    pub fn contains(&self, device_type: &str) -> bool {
        self.constructors.contains_key(device_type)
    }

    /// Builds the device described by `config.device_type`.
    pub fn create(
        &self,
        config: DeviceConfig,
        cfg: &Config,
        factory: Arc<dyn ConnectionFactory>,
    ) -> Result<Box<dyn BoardfarmDevice>, DeviceError> {
        let ctor = self
            .constructors
            .get(&config.device_type)
            .ok_or_else(|| DeviceError::UnknownDeviceType(config.device_type.clone()))?;
        debug!("Creating {} device {}", config.device_type, config.name);
        Ok(ctor(config, cfg, factory))
    }
}
