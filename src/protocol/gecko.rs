//! geckodriver extension commands

use super::{CommandDescriptor, Parameter, ProtocolFamily};
use crate::environment::EnvironmentPredicates;
use crate::transport::HttpMethod::{self, Get, Post};

fn applies(environment: &EnvironmentPredicates) -> bool {
    environment.is_firefox
}

const fn command(
    name: &'static str,
    method: HttpMethod,
    endpoint: &'static str,
    parameters: &'static [Parameter],
) -> CommandDescriptor {
    CommandDescriptor::new(ProtocolFamily::Gecko, name, method, endpoint, parameters, applies)
}

pub static COMMANDS: &[CommandDescriptor] = &[
    command("getMozContext", Get, "/session/:sessionId/moz/context", &[]),
    command(
        "setMozContext",
        Post,
        "/session/:sessionId/moz/context",
        &[param!("context": String)],
    ),
    command(
        "installAddOn",
        Post,
        "/session/:sessionId/moz/addon/install",
        &[param!("addon": String), param!("temporary": Boolean)],
    ),
    command(
        "uninstallAddOn",
        Post,
        "/session/:sessionId/moz/addon/uninstall",
        &[param!("id": String)],
    ),
    command("fullPageScreenshot", Get, "/session/:sessionId/moz/screenshot/full", &[]),
];
