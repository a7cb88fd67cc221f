// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use owrt_common::error::{ConsoleError, FactError};
use thiserror::Error;

/// Failures raised by device-level operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeviceError {
    /// The software layer is only available after a (skip-)boot.
    #[error("device '{0}' has not been initialized")]
    NotInitialized(String),

    /// No constructor is registered for the requested device type.
    #[error("unknown device type: {0}")]
    UnknownDeviceType(String),

    /// The device answered a command with an error message.
    #[error("'{command}' was rejected: {output}")]
    CommandRejected { command: String, output: String },

    #[error(transparent)]
    Fact(#[from] FactError),

    #[error(transparent)]
    Console(#[from] ConsoleError),
}
