// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! Console session contracts.
//!
//! The session engine itself (prompt matching, login sequencing, timeouts)
//! lives outside this crate. Device code only sees the [`Console`] and
//! [`ConnectionFactory`] traits and shares the device's single session through
//! a [`ConsoleHandle`].

use std::fmt;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use owrt_common::debug;
use owrt_common::error::ConsoleError;

/// An interactive shell session on a device.
#[async_trait]
pub trait Console: Send {
    /// Runs `command` and returns everything printed before the next prompt.
    fn execute_command(&mut self, command: &str) -> Result<String, ConsoleError>;

    /// Blocking login.
    fn login_to_server(&mut self, password: &str) -> Result<(), ConsoleError>;

    /// Suspend-capable login, same post-condition as [`Console::login_to_server`].
    async fn login_to_server_async(&mut self, password: &str) -> Result<(), ConsoleError>;

    fn close(&mut self) -> Result<(), ConsoleError>;
}

/// Everything a factory needs to open a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionParams {
    /// Transport kind, e.g. `ssh_connection` or `local_cmd`.
    pub connection_type: String,
    /// Session name, `<device>.console` by convention.
    pub name: String,
    pub username: String,
    pub password: String,
    pub ip_addr: Option<String>,
    pub port: String,
    /// Regexes matching the shell prompt.
    pub shell_prompt: Vec<String>,
    pub save_console_logs: bool,
}

/// Opens console sessions. Injected into every device.
pub trait ConnectionFactory: Send + Sync {
    fn connect(&self, params: &ConnectionParams) -> Result<Box<dyn Console>, ConsoleError>;
}

/// Shared access to a device's single console.
///
/// Clones refer to the same session. Commands are serialized by the inner
/// lock, so at most one is in flight at a time.
#[derive(Clone)]
pub struct ConsoleHandle {
    name: Arc<str>,
    inner: Arc<Mutex<Box<dyn Console>>>,
}

impl ConsoleHandle {
    pub fn new(name: impl Into<Arc<str>>, console: Box<dyn Console>) -> Self {
        Self {
            name: name.into(),
            inner: Arc::new(Mutex::new(console)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn execute_command(&self, command: &str) -> Result<String, ConsoleError> {
        debug!(console = %self.name, "Executing '{command}'");
        let mut console = self.inner.lock().map_err(|_| ConsoleError::Poisoned)?;
        console.execute_command(command)
    }

    pub fn close(&self) -> Result<(), ConsoleError> {
        let mut console = self.inner.lock().map_err(|_| ConsoleError::Poisoned)?;
        console.close()
    }

    /// True when both handles drive the same session.
    pub fn same_session(&self, other: &ConsoleHandle) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for ConsoleHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleHandle").field("name", &self.name).finish()
    }
}
