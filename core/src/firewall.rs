// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! Thin `iptables`/`ip6tables` front-end over the networking console.
//!
//! Every call is a single command. Nothing is cached: the rule set is read
//! back from the device each time.

use owrt_common::debug;

use crate::console::ConsoleHandle;
use crate::error::DeviceError;

const DEFAULT_LIST_OPTS: &str = "-nvL";
const DEFAULT_LIST_EXTRA: &str = "--line-number";

/// Markers `iptables` prints when it refuses a command.
const REJECTION_MARKERS: &[&str] = &["Bad argument", "Bad rule", "iptables v", "ip6tables v", "No chain"];

#[derive(Debug, Clone, Copy)]
enum Table {
    V4,
    V6,
}

impl Table {
    fn binary(&self) -> &'static str {
        match self {
            Table::V4 => "iptables",
            Table::V6 => "ip6tables",
        }
    }
}

#[derive(Debug, Clone)]
pub struct IptablesFirewall {
    console: ConsoleHandle,
}

impl IptablesFirewall {
    pub fn new(console: ConsoleHandle) -> Self {
        Self { console }
    }

    pub fn get_iptables_list(&self, opts: &str, extra_opts: &str) -> Result<String, DeviceError> {
        self.list(Table::V4, opts, extra_opts)
    }

    pub fn get_ip6tables_list(&self, opts: &str, extra_opts: &str) -> Result<String, DeviceError> {
        self.list(Table::V6, opts, extra_opts)
    }

    /// True when no chain of the IPv4 filter table holds a rule.
    pub fn is_iptable_empty(&self) -> Result<bool, DeviceError> {
        self.is_empty(Table::V4)
    }

    pub fn is_ip6table_empty(&self) -> Result<bool, DeviceError> {
        self.is_empty(Table::V6)
    }

    /// Drops INPUT traffic matching `option ip` (e.g. `-s 10.0.0.2`).
    pub fn add_drop_rule_iptables(&self, option: &str, ip: &str) -> Result<(), DeviceError> {
        self.run(Table::V4, &format!("-I INPUT 1 {option} {ip} -j DROP"))
    }

    pub fn del_drop_rule_iptables(&self, option: &str, ip: &str) -> Result<(), DeviceError> {
        self.run(Table::V4, &format!("-D INPUT {option} {ip} -j DROP"))
    }

    pub fn add_drop_rule_ip6tables(&self, option: &str, ip: &str) -> Result<(), DeviceError> {
        self.run(Table::V6, &format!("-I INPUT 1 {option} {ip} -j DROP"))
    }

    pub fn del_drop_rule_ip6tables(&self, option: &str, ip: &str) -> Result<(), DeviceError> {
        self.run(Table::V6, &format!("-D INPUT {option} {ip} -j DROP"))
    }

    fn list(&self, table: Table, opts: &str, extra_opts: &str) -> Result<String, DeviceError> {
        let command = format!("{} {opts} {extra_opts}", table.binary());
        let command = command.trim_end();
        let output = self.console.execute_command(command)?;
        check_rejection(command, &output)?;
        Ok(output)
    }

    fn is_empty(&self, table: Table) -> Result<bool, DeviceError> {
        let listing = self.list(table, DEFAULT_LIST_OPTS, DEFAULT_LIST_EXTRA)?;
        // With --line-number every rule row starts with its index.
        let rules = listing
            .lines()
            .filter(|line| {
                line.split_whitespace()
                    .next()
                    .is_some_and(|first| first.parse::<u32>().is_ok())
            })
            .count();
        debug!("{} holds {rules} rule(s)", table.binary());
        Ok(rules == 0)
    }

    fn run(&self, table: Table, args: &str) -> Result<(), DeviceError> {
        let command = format!("{} {args}", table.binary());
        let output = self.console.execute_command(&command)?;
        check_rejection(&command, &output)
    }
}

fn check_rejection(command: &str, output: &str) -> Result<(), DeviceError> {
    if REJECTION_MARKERS.iter().any(|marker| output.contains(marker)) {
        return Err(DeviceError::CommandRejected {
            command: command.to_string(),
            output: output.trim().to_string(),
        });
    }
    Ok(())
}
