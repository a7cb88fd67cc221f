// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! Error taxonomy for interface fact extraction.
//!
//! [`FactError`] is what callers see when a fact cannot be produced. Faults that
//! originate in the console transport are carried as [`ConsoleError`] and are
//! never reinterpreted on the way up.

use thiserror::Error;

/// Failures raised by a console session (the remote-command channel).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConsoleError {
    /// No session is open on the device.
    #[error("console is not connected")]
    NotConnected,
    /// The expected prompt did not show up in time.
    #[error("timed out waiting for '{0}'")]
    Timeout(String),
    /// The underlying transport went away mid-session.
    #[error("console connection lost")]
    ConnectionLost,
    /// Login was rejected by the device.
    #[error("authentication failed for user '{0}'")]
    Authentication(String),
    /// A previous holder of the console panicked while issuing a command.
    #[error("console lock poisoned")]
    Poisoned,
    /// Anything else the transport reports.
    #[error("console transport error: {0}")]
    Transport(String),
}

/// A scope name that is not part of the IPv6 scope vocabulary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unsupported IPv6 address scope: {0}")]
pub struct UnknownScope(pub String);

/// Failures raised while turning command output into a network fact.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FactError {
    /// The requested address family or scope is absent from the report.
    #[error("no {fact} found on interface {interface}")]
    AddressNotFound { interface: String, fact: String },

    /// The report does not have the expected shape.
    #[error("failed to parse {fact} of interface {interface}: {reason}")]
    Parse {
        interface: String,
        fact: String,
        reason: String,
    },

    /// A console was requested for a usage outside the known set.
    #[error("unknown console usage: {0}")]
    UnknownUsage(String),

    /// An IPv6 scope name outside the known set was asked of an interface.
    #[error("cannot look up IPv6 {scope} address on interface {interface}: unsupported scope")]
    UnsupportedScope { interface: String, scope: String },

    #[error(transparent)]
    Console(#[from] ConsoleError),
}

impl FactError {
    pub fn not_found(interface: &str, fact: impl Into<String>) -> Self {
        Self::AddressNotFound {
            interface: interface.to_string(),
            fact: fact.into(),
        }
    }

    pub fn unsupported_scope(interface: &str, UnknownScope(scope): UnknownScope) -> Self {
        Self::UnsupportedScope {
            interface: interface.to_string(),
            scope,
        }
    }

    pub fn parse(interface: &str, fact: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parse {
            interface: interface.to_string(),
            fact: fact.into(),
            reason: reason.into(),
        }
    }
}
