// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

mod device;

pub mod utils {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use owrt_common::error::ConsoleError;
    use owrt_core::console::{ConnectionFactory, ConnectionParams, Console};

    /// `ifconfig br-lan` as printed by BusyBox on a stock router.
    pub const BR_LAN: &str = "\
br-lan    Link encap:Ethernet  HWaddr 00:11:22:33:44:55
          inet addr:192.168.1.1  Bcast:192.168.1.255  Mask:255.255.255.0
          inet6 addr: fe80::211:22ff:fe33:4455/64 Scope:Link
          inet6 addr: fd12:3456:789a::1/60 Scope:Global
          inet6 addr: 2001:db8:10::1/64 Scope:Global
          UP BROADCAST RUNNING MULTICAST  MTU:1500  Metric:1
";

    /// `ifconfig br-wan` for a WAN that only got a link-local address.
    pub const BR_WAN: &str = "\
br-wan    Link encap:Ethernet  HWaddr 00:11:22:33:44:56
          inet addr:10.64.38.17  Bcast:10.64.39.255  Mask:255.255.254.0
          inet6 addr: fe80::211:22ff:fe33:4456/64 Scope:Link
";

    pub const RESOLV_CONF: &str = "\
search lan
nameserver 127.0.0.1
nameserver ::1
";

    #[derive(Debug, Default)]
    pub struct Transcript {
        pub commands: Vec<String>,
        pub logins: usize,
        pub closes: usize,
        pub params: Vec<ConnectionParams>,
    }

    /// Console of a simulated router, answering the commands the adapter uses.
    pub struct FakeRouter {
        transcript: Arc<Mutex<Transcript>>,
        refuse_login: bool,
    }

    impl FakeRouter {
        fn answer(command: &str) -> String {
            match command {
                "ifconfig br-lan" => BR_LAN.to_string(),
                "ifconfig br-wan" => BR_WAN.to_string(),
                "cat /sys/class/net/br-lan/address" => "00:11:22:33:44:55\n".to_string(),
                "cat /etc/resolv.conf" => RESOLV_CONF.to_string(),
                other => match other.strip_prefix("ifconfig ") {
                    Some(iface) => {
                        format!("ifconfig: {iface}: error fetching interface information: Device not found\n")
                    }
                    None => String::new(),
                },
            }
        }
    }

    #[async_trait]
    impl Console for FakeRouter {
        fn execute_command(&mut self, command: &str) -> Result<String, ConsoleError> {
            self.transcript.lock().unwrap().commands.push(command.to_string());
            Ok(Self::answer(command))
        }

        fn login_to_server(&mut self, _password: &str) -> Result<(), ConsoleError> {
            if self.refuse_login {
                return Err(ConsoleError::Authentication("Login incorrect".into()));
            }
            self.transcript.lock().unwrap().logins += 1;
            Ok(())
        }

        async fn login_to_server_async(&mut self, password: &str) -> Result<(), ConsoleError> {
            tokio::task::yield_now().await;
            self.login_to_server(password)
        }

        fn close(&mut self) -> Result<(), ConsoleError> {
            self.transcript.lock().unwrap().closes += 1;
            Ok(())
        }
    }

    /// Hands out [`FakeRouter`] consoles sharing one transcript.
    #[derive(Clone, Default)]
    pub struct FakeFactory {
        pub transcript: Arc<Mutex<Transcript>>,
        refuse_login: bool,
    }

    impl FakeFactory {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn refusing_login() -> Self {
            Self {
                refuse_login: true,
                ..Self::default()
            }
        }

        pub fn commands(&self) -> Vec<String> {
            self.transcript.lock().unwrap().commands.clone()
        }
    }

    impl ConnectionFactory for FakeFactory {
        fn connect(&self, params: &ConnectionParams) -> Result<Box<dyn Console>, ConsoleError> {
            self.transcript.lock().unwrap().params.push(params.clone());
            Ok(Box::new(FakeRouter {
                transcript: self.transcript.clone(),
                refuse_login: self.refuse_login,
            }))
        }
    }
}
