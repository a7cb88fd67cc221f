// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! In-memory console used by the unit tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use owrt_common::error::ConsoleError;

use crate::console::{ConnectionFactory, ConnectionParams, Console};

#[derive(Debug, Default)]
struct LogState {
    commands: Vec<String>,
    logins: Vec<String>,
    async_logins: Vec<String>,
    closes: usize,
}

/// Observes what was done to a [`ScriptedConsole`] and its clones.
#[derive(Debug, Clone, Default)]
pub struct ConsoleLog(Arc<Mutex<LogState>>);

impl ConsoleLog {
    pub fn commands(&self) -> Vec<String> {
        self.0.lock().unwrap().commands.clone()
    }

    pub fn logins(&self) -> Vec<String> {
        self.0.lock().unwrap().logins.clone()
    }

    pub fn async_logins(&self) -> Vec<String> {
        self.0.lock().unwrap().async_logins.clone()
    }

    pub fn closes(&self) -> usize {
        self.0.lock().unwrap().closes
    }
}

/// Answers commands from a fixed table; unknown commands print nothing.
#[derive(Debug, Clone, Default)]
pub struct ScriptedConsole {
    responses: HashMap<String, String>,
    failure: Option<ConsoleError>,
    login_failure: Option<ConsoleError>,
    close_failure: Option<ConsoleError>,
    log: ConsoleLog,
}

impl ScriptedConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, command: &str, output: &str) -> Self {
        self.responses.insert(command.to_string(), output.to_string());
        self
    }

    pub fn fail_with(mut self, err: ConsoleError) -> Self {
        self.failure = Some(err);
        self
    }

    pub fn refuse_login(mut self, err: ConsoleError) -> Self {
        self.login_failure = Some(err);
        self
    }

    /// Counts the close attempt, then fails it.
    pub fn fail_close(mut self, err: ConsoleError) -> Self {
        self.close_failure = Some(err);
        self
    }

    pub fn log(&self) -> ConsoleLog {
        self.log.clone()
    }
}

#[async_trait]
impl Console for ScriptedConsole {
    fn execute_command(&mut self, command: &str) -> Result<String, ConsoleError> {
        self.log.0.lock().unwrap().commands.push(command.to_string());
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        Ok(self.responses.get(command).cloned().unwrap_or_default())
    }

    fn login_to_server(&mut self, password: &str) -> Result<(), ConsoleError> {
        self.log.0.lock().unwrap().logins.push(password.to_string());
        self.login_failure.clone().map_or(Ok(()), Err)
    }

    async fn login_to_server_async(&mut self, password: &str) -> Result<(), ConsoleError> {
        self.log.0.lock().unwrap().async_logins.push(password.to_string());
        self.login_failure.clone().map_or(Ok(()), Err)
    }

    fn close(&mut self) -> Result<(), ConsoleError> {
        self.log.0.lock().unwrap().closes += 1;
        self.close_failure.clone().map_or(Ok(()), Err)
    }
}

/// Hands out clones of one scripted console and remembers the parameters.
#[derive(Debug, Default)]
pub struct ScriptedFactory {
    console: ScriptedConsole,
    params: Mutex<Vec<ConnectionParams>>,
}

impl ScriptedFactory {
    pub fn new(console: ScriptedConsole) -> Self {
        Self {
            console,
            params: Mutex::new(Vec::new()),
        }
    }

    pub fn params(&self) -> Vec<ConnectionParams> {
        self.params.lock().unwrap().clone()
    }
}

impl ConnectionFactory for ScriptedFactory {
    fn connect(&self, params: &ConnectionParams) -> Result<Box<dyn Console>, ConsoleError> {
        self.params.lock().unwrap().push(params.clone());
        Ok(Box::new(self.console.clone()))
    }
}
