// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

#![cfg(test)]
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::sync::Arc;

use owrt_common::config::{Config, DeviceConfig};
use owrt_common::error::{ConsoleError, FactError};
use owrt_core::device::OpenWrt;
use owrt_core::error::DeviceError;
use owrt_core::registry::DeviceRegistry;
use owrt_core::templates::{BoardfarmDevice, OpenWrtDevice, OpenWrtSoftware};
use pnet::ipnetwork::Ipv4Network;

use crate::utils::FakeFactory;

const INVENTORY: &str = r#"
name = "board"
type = "OpenWRT"
connection_type = "ssh_connection"
ipaddr = "10.64.38.17"
mac = "00:11:22:33:44:55"
"#;

fn booted_device(factory: &FakeFactory) -> anyhow::Result<OpenWrt> {
    let config = DeviceConfig::from_toml_str(INVENTORY)?;
    let mut dev = OpenWrt::new(config, &Config::default(), Arc::new(factory.clone()));
    dev.skip_boot()?;
    Ok(dev)
}

#[test]
fn test_registry_builds_booting_device() {
    let factory = FakeFactory::new();
    let config = DeviceConfig::from_toml_str(INVENTORY).unwrap();

    let mut dev = DeviceRegistry::builtin()
        .create(config, &Config::default(), Arc::new(factory.clone()))
        .unwrap();
    let result = dev.skip_boot();

    assert!(result.is_ok(), "Skip-boot failed: {:?}", result.err());
    assert_eq!(dev.device_name(), "board");
    assert_eq!(dev.get_interactive_consoles().len(), 1);

    let transcript = factory.transcript.lock().unwrap();
    assert_eq!(transcript.logins, 1);
    assert_eq!(transcript.params[0].name, "board.console");
    assert_eq!(transcript.params[0].ip_addr.as_deref(), Some("10.64.38.17"));
}

#[test]
fn test_registry_rejects_unknown_type() {
    let mut config = DeviceConfig::from_toml_str(INVENTORY).unwrap();
    config.device_type = "RDKB".into();

    let result = DeviceRegistry::builtin().create(config, &Config::default(), Arc::new(FakeFactory::new()));

    assert!(
        matches!(result, Err(DeviceError::UnknownDeviceType(ref name)) if name == "RDKB"),
        "Unknown device type was accepted"
    );
}

#[test]
fn test_lan_facts_from_live_console() {
    let factory = FakeFactory::new();
    let dev = booted_device(&factory).unwrap();
    let sw = dev.sw().unwrap();

    assert_eq!(dev.get_interface_ipaddr("br-lan").unwrap(), "192.168.1.1");
    assert_eq!(sw.get_interface_ipv4_netmask("br-lan").unwrap(), "255.255.255.0");
    assert_eq!(sw.lan_gateway_ipv4().unwrap(), Ipv4Addr::new(192, 168, 1, 1));
    assert_eq!(
        sw.lan_network_ipv4().unwrap(),
        Ipv4Network::new(Ipv4Addr::new(192, 168, 1, 0), 24).unwrap()
    );
    assert_eq!(sw.get_interface_mac_addr("br-lan").unwrap(), "00:11:22:33:44:55");
}

#[test]
fn test_ipv6_scopes_on_lan() {
    let factory = FakeFactory::new();
    let dev = booted_device(&factory).unwrap();
    let sw = dev.sw().unwrap();

    // The unique-local address is listed first but is not global.
    assert_eq!(dev.get_interface_ip6addr("br-lan").unwrap(), "2001:db8:10::1");
    assert_eq!(
        sw.lan_gateway_ipv6().unwrap(),
        "2001:db8:10::1".parse::<Ipv6Addr>().unwrap()
    );
    assert_eq!(
        sw.get_interface_ipv6_address("br-lan", "link-local").unwrap(),
        "fe80::211:22ff:fe33:4455"
    );
    assert_eq!(
        sw.get_interface_ipv6_address("br-lan", "unique_local").unwrap(),
        "fd12:3456:789a::1"
    );
    assert_eq!(sw.get_interface_ipv6_entries("br-lan").unwrap().len(), 3);
}

#[test]
fn test_missing_facts_are_reported() {
    let factory = FakeFactory::new();
    let dev = booted_device(&factory).unwrap();
    let sw = dev.sw().unwrap();

    let err = dev.get_interface_ip6addr("br-wan").unwrap_err();
    assert!(
        matches!(err, DeviceError::Fact(FactError::AddressNotFound { .. })),
        "Unexpected error: {err:?}"
    );

    let err = sw.get_interface_ipv4addr("eth9").unwrap_err();
    assert!(matches!(err, FactError::AddressNotFound { .. }), "Unexpected error: {err:?}");

    let before = factory.commands().len();
    let err = sw.get_interface_ipv6_address("br-lan", "galactic").unwrap_err();
    assert!(
        matches!(err, FactError::UnsupportedScope { ref interface, ref scope } if interface == "br-lan" && scope == "galactic"),
        "Unexpected error: {err:?}"
    );
    assert_eq!(factory.commands().len(), before, "Unsupported scope reached the console");
}

#[test]
fn test_wan_network_is_not_strict() {
    let factory = FakeFactory::new();
    let dev = booted_device(&factory).unwrap();

    let network = dev.sw().unwrap().get_lan_network("br-wan").unwrap();

    assert_eq!(network.to_string(), "10.64.38.0/23");
}

#[test]
fn test_consoles_and_helpers_share_the_session() {
    let factory = FakeFactory::new();
    let dev = booted_device(&factory).unwrap();
    let sw = dev.sw().unwrap();

    let networking = sw.get_console("networking").unwrap();
    assert!(networking.same_session(&sw.get_console("wifi").unwrap()));
    assert!(networking.same_session(&sw.get_console("default_shell").unwrap()));
    assert!(matches!(sw.get_console("serial"), Err(FactError::UnknownUsage(_))));

    let nameservers = sw.dns().nameservers().unwrap();
    assert_eq!(
        nameservers,
        vec![IpAddr::V4(Ipv4Addr::LOCALHOST), IpAddr::V6(Ipv6Addr::LOCALHOST)]
    );
    assert!(sw.firewall().is_iptable_empty().unwrap());
}

#[tokio::test]
async fn test_async_skip_boot() {
    let factory = FakeFactory::new();
    let config = DeviceConfig::from_toml_str(INVENTORY).unwrap();
    let mut dev = DeviceRegistry::builtin()
        .create(config, &Config::default(), Arc::new(factory.clone()))
        .unwrap();

    let result = dev.skip_boot_async().await;

    assert!(result.is_ok(), "Async skip-boot failed: {:?}", result.err());
    assert_eq!(factory.transcript.lock().unwrap().logins, 1);
}

#[test]
fn test_rejected_login_leaves_device_down() {
    let factory = FakeFactory::refusing_login();
    let config = DeviceConfig::from_toml_str(INVENTORY).unwrap();
    let mut dev = OpenWrt::new(config, &Config::default(), Arc::new(factory.clone()));

    let err = dev.skip_boot().unwrap_err();

    assert!(
        matches!(err, DeviceError::Console(ConsoleError::Authentication(_))),
        "Unexpected error: {err:?}"
    );
    assert!(dev.sw().is_err());
    assert!(dev.get_interactive_consoles().is_empty());

    let transcript = factory.transcript.lock().unwrap();
    assert_eq!(transcript.params.len(), 1);
    assert_eq!(transcript.closes, transcript.params.len(), "Rejected session was left open");
}

#[test]
fn test_disconnect_is_idempotent() {
    let factory = FakeFactory::new();
    let mut dev = booted_device(&factory).unwrap();

    dev.disconnect().unwrap();
    dev.disconnect().unwrap();

    assert_eq!(factory.transcript.lock().unwrap().closes, 1);
    assert!(matches!(dev.sw(), Err(DeviceError::NotInitialized(_))));
}
