// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Check command definitions.
//!
//! A [`Command`] only holds the unexpanded command line; macro substitution
//! happens at dispatch time in an external collaborator (see spec §1, §6).

use serde::{Deserialize, Serialize};

crate::define_id! {
    /// Unique name of a check command definition.
    pub struct CommandName;
}

/// A named check command: a shell command line with `$MACRO$`-style
/// placeholders left unexpanded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub name: CommandName,
    /// Unexpanded command line, e.g. `/usr/lib/monitoring-plugins/check_http -H $HOSTADDRESS$`.
    pub line: String,
}

impl Command {
    pub fn new(name: impl Into<CommandName>, line: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            line: line.into(),
        }
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
