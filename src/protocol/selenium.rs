//! Selenium standalone / Grid extension commands

use super::{CommandDescriptor, Parameter, ProtocolFamily};
use crate::environment::EnvironmentPredicates;
use crate::transport::HttpMethod::{self, Delete, Get, Post};

fn applies(environment: &EnvironmentPredicates) -> bool {
    environment.is_selenium_standalone
}

const fn command(
    name: &'static str,
    method: HttpMethod,
    endpoint: &'static str,
    parameters: &'static [Parameter],
) -> CommandDescriptor {
    CommandDescriptor::new(ProtocolFamily::Selenium, name, method, endpoint, parameters, applies)
}

pub static COMMANDS: &[CommandDescriptor] = &[
    command("file", Post, "/session/:sessionId/se/file", &[param!("file": String)]),
    command("getDownloadableFiles", Get, "/session/:sessionId/se/files", &[]),
    command(
        "downloadFile",
        Post,
        "/session/:sessionId/se/files",
        &[param!("name": String)],
    ),
    command("deleteDownloadableFiles", Delete, "/session/:sessionId/se/files", &[]),
    command("getHubConfig", Get, "/grid/api/hub", &[]),
];
