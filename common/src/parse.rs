// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Interface Report Parsing
//!
//! Extracts network facts from the textual output of `ifconfig <iface>`.
//!
//! Both the legacy BusyBox layout (`inet addr:10.0.0.5 ... Mask:255.255.255.0`)
//! and the bare layout (`inet6 2001:db8::1/64`) are understood. Reports are
//! only ever borrowed; nothing here mutates or keeps them.
//!
//! Address order follows the order of the report text. When the device tool
//! reorders its output the picked address changes with it.

use std::net::Ipv4Addr;
use std::sync::OnceLock;

use pnet::ipnetwork::Ipv4Network;
use regex::Regex;

use crate::error::FactError;
use crate::models::interface::{Ipv4Info, Ipv6AddressEntry};
use crate::utils::ip::{self, Ipv6Scope};

const NETMASK_MARKER: &str = "Mask:";

static INET_RE: OnceLock<Regex> = OnceLock::new();
static INET6_RE: OnceLock<Regex> = OnceLock::new();

/// Address family marker used by `ifconfig`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    /// `inet`
    V4,
    /// `inet6`
    V6,
}

impl Family {
    fn marker(&self) -> &'static str {
        match self {
            Family::V4 => "inet",
            Family::V6 => "inet6",
        }
    }

    /// Marker, optional legacy `addr:` label, then the address up to `/` or whitespace.
    fn regex(&self) -> &'static Regex {
        let cell = match self {
            Family::V4 => &INET_RE,
            Family::V6 => &INET6_RE,
        };
        cell.get_or_init(|| {
            let pattern = format!(r"{}\s(?:addr:)?\s*([^\s/]+)", self.marker());
            Regex::new(&pattern).expect("address pattern is a valid regex")
        })
    }
}

/// Returns every address token of `family`, in textual order.
pub fn ip_tokens(report: &str, family: Family) -> Vec<&str> {
    family
        .regex()
        .captures_iter(report)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect()
}

/// The first IPv4 address of the report.
pub fn ipv4_address(interface: &str, report: &str) -> Result<String, FactError> {
    first_ipv4(interface, report).map(|(token, _)| token.to_string())
}

/// The token following the last `Mask:` marker of the report.
pub fn ipv4_netmask(interface: &str, report: &str) -> Result<String, FactError> {
    netmask_token(interface, report).map(|(token, _)| token.to_string())
}

/// Address and netmask of the report, both typed.
pub fn ipv4_info(interface: &str, report: &str) -> Result<Ipv4Info, FactError> {
    let (_, address) = first_ipv4(interface, report)?;
    let (_, netmask) = netmask_token(interface, report)?;
    Ok(Ipv4Info { address, netmask })
}

fn first_ipv4<'a>(interface: &str, report: &'a str) -> Result<(&'a str, Ipv4Addr), FactError> {
    let fact = "IPv4 address";
    let Some(token) = ip_tokens(report, Family::V4).into_iter().next() else {
        return Err(FactError::not_found(interface, fact));
    };

    let addr = token.parse::<Ipv4Addr>().map_err(|_| {
        FactError::parse(interface, fact, format!("'{token}' is not a dotted-quad address"))
    })?;

    Ok((token, addr))
}

fn netmask_token<'a>(interface: &str, report: &'a str) -> Result<(&'a str, Ipv4Addr), FactError> {
    let fact = "IPv4 netmask";
    let Some((_, after)) = report.rsplit_once(NETMASK_MARKER) else {
        return Err(FactError::parse(
            interface,
            fact,
            format!("missing '{NETMASK_MARKER}' marker"),
        ));
    };

    let Some(token) = after.split_whitespace().next() else {
        return Err(FactError::parse(
            interface,
            fact,
            format!("nothing follows '{NETMASK_MARKER}'"),
        ));
    };

    let netmask = token.parse::<Ipv4Addr>().map_err(|_| {
        FactError::parse(interface, fact, format!("'{token}' is not a dotted-quad netmask"))
    })?;

    Ok((token, netmask))
}

/// Every IPv6 address of the report, classified by scope.
pub fn ipv6_entries(interface: &str, report: &str) -> Result<Vec<Ipv6AddressEntry>, FactError> {
    ip_tokens(report, Family::V6)
        .into_iter()
        .map(|token| classify_token(interface, token).map(|scope| Ipv6AddressEntry::new(token, scope)))
        .collect()
}

/// The first IPv6 address of the report that belongs to `scope`.
///
/// Tokens are checked in textual order; a malformed token met before a match
/// aborts the search.
pub fn ipv6_address(interface: &str, report: &str, scope: Ipv6Scope) -> Result<String, FactError> {
    for token in ip_tokens(report, Family::V6) {
        let addr = ip::parse_ipv6(token).ok_or_else(|| invalid_ipv6(interface, token))?;
        if scope.matches(&addr) {
            return Ok(token.to_string());
        }
    }

    Err(FactError::not_found(interface, format!("IPv6 {scope} address")))
}

/// The network an interface lives in, from its address and netmask.
///
/// Construction is non-strict: the address normally has host bits set.
pub fn lan_network(interface: &str, info: &Ipv4Info) -> Result<Ipv4Network, FactError> {
    ip::network_non_strict(info.address, info.netmask)
        .map_err(|e| FactError::parse(interface, "IPv4 network", e.to_string()))
}

fn classify_token(interface: &str, token: &str) -> Result<Ipv6Scope, FactError> {
    ip::parse_ipv6(token)
        .map(|addr| ip::classify(&addr))
        .ok_or_else(|| invalid_ipv6(interface, token))
}

fn invalid_ipv6(interface: &str, token: &str) -> FactError {
    FactError::parse(interface, "IPv6 address", format!("'{token}' is not an IPv6 address"))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
