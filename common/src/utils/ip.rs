// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! IPv6 address scope classification.
//!
//! Scope predicates come from [`std::net::Ipv6Addr`]. The deprecated
//! site-local block has no std predicate, so it is checked with an
//! [`Ipv6Network`] containment test instead.

use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;
use std::sync::OnceLock;

use pnet::ipnetwork::{Ipv4Network, Ipv6Network};

use crate::error::UnknownScope;

static SITE_LOCAL: OnceLock<Ipv6Network> = OnceLock::new();

/// `fec0::/10`, deprecated by RFC 3879.
fn site_local() -> &'static Ipv6Network {
    SITE_LOCAL.get_or_init(|| {
        Ipv6Network::new(Ipv6Addr::new(0xfec0, 0, 0, 0, 0, 0, 0, 0), 10)
            .expect("fec0::/10 is a valid network")
    })
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ipv6Scope {
    Global,
    LinkLocal,
    SiteLocal,
    UniqueLocal,
    Loopback,
    Multicast,
    #[default]
    Unspecified,
}

impl Ipv6Scope {
    pub const ALL: [Ipv6Scope; 7] = [
        Ipv6Scope::Global,
        Ipv6Scope::LinkLocal,
        Ipv6Scope::SiteLocal,
        Ipv6Scope::UniqueLocal,
        Ipv6Scope::Loopback,
        Ipv6Scope::Multicast,
        Ipv6Scope::Unspecified,
    ];

    /// Canonical (underscore) name of the scope.
    pub fn as_str(&self) -> &'static str {
        match self {
            Ipv6Scope::Global => "global",
            Ipv6Scope::LinkLocal => "link_local",
            Ipv6Scope::SiteLocal => "site_local",
            Ipv6Scope::UniqueLocal => "unique_local",
            Ipv6Scope::Loopback => "loopback",
            Ipv6Scope::Multicast => "multicast",
            Ipv6Scope::Unspecified => "unspecified",
        }
    }

    /// Answers "is `addr` of this kind".
    ///
    /// An address can satisfy more than one predicate only through
    /// [`Ipv6Scope::Global`] being the complement of the others.
    pub fn matches(&self, addr: &Ipv6Addr) -> bool {
        match self {
            Ipv6Scope::Global => is_global(addr),
            Ipv6Scope::LinkLocal => addr.is_unicast_link_local(),
            Ipv6Scope::SiteLocal => site_local().contains(*addr),
            Ipv6Scope::UniqueLocal => addr.is_unique_local(),
            Ipv6Scope::Loopback => addr.is_loopback(),
            Ipv6Scope::Multicast => addr.is_multicast(),
            Ipv6Scope::Unspecified => addr.is_unspecified(),
        }
    }
}

impl fmt::Display for Ipv6Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Ipv6Scope {
    type Err = UnknownScope;

    /// Accepts both `link-local` and `link_local` spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('-', "_").to_ascii_lowercase();
        Ipv6Scope::ALL
            .into_iter()
            .find(|scope| scope.as_str() == normalized)
            .ok_or_else(|| UnknownScope(s.to_string()))
    }
}

/// Returns the single scope an address belongs to.
pub fn classify(addr: &Ipv6Addr) -> Ipv6Scope {
    match true {
        _ if addr.is_unspecified() => Ipv6Scope::Unspecified,
        _ if addr.is_loopback() => Ipv6Scope::Loopback,
        _ if addr.is_multicast() => Ipv6Scope::Multicast,
        _ if addr.is_unicast_link_local() => Ipv6Scope::LinkLocal,
        _ if site_local().contains(*addr) => Ipv6Scope::SiteLocal,
        _ if addr.is_unique_local() => Ipv6Scope::UniqueLocal,
        _ => Ipv6Scope::Global,
    }
}

/// An address is global when no narrower scope claims it.
pub fn is_global(addr: &Ipv6Addr) -> bool {
    classify(addr) == Ipv6Scope::Global
}

/// Strips an interface zone (`fe80::1%br-lan`) and parses the rest.
pub fn parse_ipv6(token: &str) -> Option<Ipv6Addr> {
    let addr = token.split_once('%').map_or(token, |(addr, _zone)| addr);
    addr.parse().ok()
}

/// Builds the network an interface address lives in.
///
/// Host bits in `addr` are accepted and cleared, so `192.168.0.1` with
/// `255.255.255.0` yields `192.168.0.0/24`.
pub fn network_non_strict(
    addr: Ipv4Addr,
    netmask: Ipv4Addr,
) -> Result<Ipv4Network, pnet::ipnetwork::IpNetworkError> {
    let iface = Ipv4Network::with_netmask(addr, netmask)?;
    Ipv4Network::new(iface.network(), iface.prefix())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
