// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command-line macro expansion for dispatched checks (spec §6
//! `host_lookup`/`service_lookup` collaborators). Notification command
//! macros are out of scope; this covers only the `$HOSTNAME$`/
//! `$HOSTADDRESS$`/`$SERVICEDESC$`/`$ARGn$` tokens a check command needs.

use monitor_core::{Host, Service};

pub fn expand_host_command_line(template: &str, host: &Host, args: &[String]) -> String {
    substitute(template, host.name.as_str(), &host.address, None, args)
}

pub fn expand_service_command_line(template: &str, host: &Host, service: &Service, args: &[String]) -> String {
    substitute(
        template,
        host.name.as_str(),
        &host.address,
        Some(service.key.description.as_str()),
        args,
    )
}

fn substitute(template: &str, host_name: &str, host_address: &str, service_desc: Option<&str>, args: &[String]) -> String {
    let mut out = template.replace("$HOSTNAME$", host_name).replace("$HOSTADDRESS$", host_address);
    if let Some(desc) = service_desc {
        out = out.replace("$SERVICEDESC$", desc);
    }
    for (i, arg) in args.iter().enumerate() {
        out = out.replace(&format!("$ARG{}$", i + 1), arg);
    }
    out
}

#[cfg(test)]
#[path = "macros_tests.rs"]
mod tests;
