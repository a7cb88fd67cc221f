// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! OpenWrt hardware: owns the device console and its lifecycle.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use owrt_common::config::{Config, DeviceConfig};
use owrt_common::error::ConsoleError;
use owrt_common::{debug, error, info, warn};

use crate::console::{ConnectionFactory, ConnectionParams, Console, ConsoleHandle};
use crate::templates::{InteractiveConsoles, OpenWrtHardware};

const SHELL_PROMPT: &str = r"root@OpenWrt:~#";

pub struct OpenWrtHw {
    config: DeviceConfig,
    cfg: Config,
    factory: Arc<dyn ConnectionFactory>,
    console: Option<ConsoleHandle>,
    shell_prompt: Vec<String>,
}

impl OpenWrtHw {
    pub fn new(config: DeviceConfig, cfg: Config, factory: Arc<dyn ConnectionFactory>) -> Self {
        Self {
            config,
            cfg,
            factory,
            console: None,
            shell_prompt: vec![SHELL_PROMPT.to_string()],
        }
    }

    /// The open console, if any.
    pub fn get_console(&self) -> Result<ConsoleHandle, ConsoleError> {
        self.console.clone().ok_or(ConsoleError::NotConnected)
    }

    pub fn is_connected(&self) -> bool {
        self.console.is_some()
    }

    fn connection_params(&self, device_name: &str) -> ConnectionParams {
        ConnectionParams {
            connection_type: self.config.connection_type.clone(),
            name: format!("{device_name}.console"),
            username: self.config.username.clone(),
            password: self.config.password.clone(),
            ip_addr: self.config.ipaddr.clone(),
            port: self.config.port.clone(),
            shell_prompt: self.shell_prompt.clone(),
            save_console_logs: self.cfg.save_console_logs,
        }
    }

    fn open_console(&self, device_name: &str) -> Result<(String, Box<dyn Console>), ConsoleError> {
        let params = self.connection_params(device_name);
        debug!(
            verbosity = 1,
            "Opening {} console {} to {}:{}",
            params.connection_type,
            params.name,
            params.ip_addr.as_deref().unwrap_or("-"),
            params.port
        );
        let console = self.factory.connect(&params)?;
        Ok((params.name, console))
    }

    /// Installs a new session, then closes the one it replaces.
    ///
    /// The new session stays in place even if the old one fails to close.
    fn attach(&mut self, name: String, console: Box<dyn Console>) {
        info!("Connected to {name}");
        let previous = self.console.replace(ConsoleHandle::new(name, console));
        if let Some(previous) = previous {
            info!("Closing {}", previous.name());
            if let Err(e) = previous.close() {
                warn!("Closing {} failed: {e}", previous.name());
            }
        }
    }
}

/// Closes a session whose login failed. The login error is what the caller
/// gets back, a close failure is only logged.
fn abandon(name: &str, mut console: Box<dyn Console>, err: ConsoleError) -> ConsoleError {
    error!("Login on {name} failed: {err}");
    if let Err(e) = console.close() {
        warn!("Closing {name} failed: {e}");
    }
    err
}

#[async_trait]
impl OpenWrtHardware for OpenWrtHw {
    fn config(&self) -> &DeviceConfig {
        &self.config
    }

    fn mac_address(&self) -> Option<&str> {
        self.config.mac.as_deref()
    }

    fn connect_to_console(&mut self, device_name: &str) -> Result<(), ConsoleError> {
        let (name, mut console) = self.open_console(device_name)?;
        if let Err(e) = console.login_to_server(&self.config.password) {
            return Err(abandon(&name, console, e));
        }
        self.attach(name, console);
        Ok(())
    }

    async fn connect_to_console_async(&mut self, device_name: &str) -> Result<(), ConsoleError> {
        let (name, mut console) = self.open_console(device_name)?;
        if let Err(e) = console.login_to_server_async(&self.config.password).await {
            return Err(abandon(&name, console, e));
        }
        self.attach(name, console);
        Ok(())
    }

    fn disconnect_from_console(&mut self) -> Result<(), ConsoleError> {
        let Some(console) = self.console.take() else {
            return Ok(());
        };
        info!("Closing {}", console.name());
        console
            .close()
            .inspect_err(|e| warn!("Closing {} failed: {e}", console.name()))
    }

    fn get_interactive_consoles(&self) -> InteractiveConsoles {
        let mut consoles = HashMap::new();
        if let Some(console) = &self.console {
            consoles.insert("console".to_string(), console.clone());
        }
        consoles
    }
}
