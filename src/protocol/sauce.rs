//! Sauce Labs extension commands

use super::{CommandDescriptor, Parameter, ProtocolFamily};
use crate::environment::EnvironmentPredicates;
use crate::transport::HttpMethod::{self, Get, Post};

fn applies(environment: &EnvironmentPredicates) -> bool {
    environment.is_sauce
}

const fn command(
    name: &'static str,
    method: HttpMethod,
    endpoint: &'static str,
    parameters: &'static [Parameter],
) -> CommandDescriptor {
    CommandDescriptor::new(ProtocolFamily::Sauce, name, method, endpoint, parameters, applies)
}

pub static COMMANDS: &[CommandDescriptor] = &[
    command("getPageLogs", Get, "/session/:sessionId/log/:type", &[]),
    command(
        "sauceThrottleNetwork",
        Post,
        "/session/:sessionId/sauce/ondemand/throttle/network",
        &[param!("condition": Any)],
    ),
    command(
        "throttleCPU",
        Post,
        "/session/:sessionId/sauce/ondemand/throttle/cpu",
        &[param!("rate": Number)],
    ),
    command(
        "interceptRequest",
        Post,
        "/session/:sessionId/sauce/ondemand/intercept",
        &[param!("rule": Object)],
    ),
    command(
        "assertPerformance",
        Post,
        "/session/:sessionId/sauce/ondemand/performance",
        &[param!("name": String), param!("metrics"?: Array)],
    ),
    command(
        "jankinessCheck",
        Post,
        "/session/:sessionId/sauce/ondemand/performance/scroll",
        &[],
    ),
    command(
        "mockRequest",
        Post,
        "/session/:sessionId/sauce/ondemand/mock",
        &[param!("url": String), param!("filterOptions"?: Object)],
    ),
    command(
        "mockRequestRespond",
        Post,
        "/session/:sessionId/sauce/ondemand/mock/:mockId",
        &[param!("payload": Any)],
    ),
];
