//! chromedriver extension commands

use super::{CommandDescriptor, Parameter, ProtocolFamily};
use crate::environment::EnvironmentPredicates;
use crate::transport::HttpMethod::{self, Delete, Get, Post};

fn applies(environment: &EnvironmentPredicates) -> bool {
    environment.is_chrome
}

const fn command(
    name: &'static str,
    method: HttpMethod,
    endpoint: &'static str,
    parameters: &'static [Parameter],
) -> CommandDescriptor {
    CommandDescriptor::new(ProtocolFamily::Chromium, name, method, endpoint, parameters, applies)
}

pub static COMMANDS: &[CommandDescriptor] = &[
    command("isLoading", Get, "/session/:sessionId/is_loading", &[]),
    command("takeHeapSnapshot", Get, "/session/:sessionId/chromium/heap_snapshot", &[]),
    command("getNetworkConditions", Get, "/session/:sessionId/chromium/network_conditions", &[]),
    command(
        "setNetworkConditions",
        Post,
        "/session/:sessionId/chromium/network_conditions",
        &[param!("network_conditions": Object), param!("network_name"?: String)],
    ),
    command(
        "deleteNetworkConditions",
        Delete,
        "/session/:sessionId/chromium/network_conditions",
        &[],
    ),
    command(
        "sendCommand",
        Post,
        "/session/:sessionId/chromium/send_command",
        &[param!("cmd": String), param!("params": Object)],
    ),
    command(
        "sendCommandAndGetResult",
        Post,
        "/session/:sessionId/chromium/send_command_and_get_result",
        &[param!("cmd": String), param!("params": Object)],
    ),
    command(
        "launchChromeApp",
        Post,
        "/session/:sessionId/chromium/launch_app",
        &[param!("id": String)],
    ),
    command("getCastSinks", Get, "/session/:sessionId/goog/cast/get_sinks", &[]),
    command(
        "selectCastSink",
        Post,
        "/session/:sessionId/goog/cast/set_sink_to_use",
        &[param!("sinkName": String)],
    ),
    command(
        "startCastTabMirroring",
        Post,
        "/session/:sessionId/goog/cast/start_tab_mirroring",
        &[param!("sinkName": String)],
    ),
    command(
        "stopCasting",
        Post,
        "/session/:sessionId/goog/cast/stop_casting",
        &[param!("sinkName": String)],
    ),
    command("shutdown", Post, "/shutdown", &[]),
];
