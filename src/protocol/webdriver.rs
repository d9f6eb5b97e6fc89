//! W3C WebDriver commands
//!
//! <https://www.w3.org/TR/webdriver/>

use super::{CommandDescriptor, Parameter, ProtocolFamily};
use crate::environment::EnvironmentPredicates;
use crate::transport::HttpMethod::{self, Delete, Get, Post};

fn applies(environment: &EnvironmentPredicates) -> bool {
    environment.is_w3c
}

const fn command(
    name: &'static str,
    method: HttpMethod,
    endpoint: &'static str,
    parameters: &'static [Parameter],
) -> CommandDescriptor {
    CommandDescriptor::new(ProtocolFamily::WebDriver, name, method, endpoint, parameters, applies)
}

pub static COMMANDS: &[CommandDescriptor] = &[
    command("newSession", Post, "/session", &[param!("capabilities": Object)]),
    command("deleteSession", Delete, "/session/:sessionId", &[]),
    command("status", Get, "/status", &[]),
    command("getTimeouts", Get, "/session/:sessionId/timeouts", &[]),
    command(
        "setTimeouts",
        Post,
        "/session/:sessionId/timeouts",
        &[
            param!("implicit"?: Number),
            param!("pageLoad"?: Number),
            param!("script"?: Number),
        ],
    ),
    command("getUrl", Get, "/session/:sessionId/url", &[]),
    command("navigateTo", Post, "/session/:sessionId/url", &[param!("url": String)]),
    command("back", Post, "/session/:sessionId/back", &[]),
    command("forward", Post, "/session/:sessionId/forward", &[]),
    command("refresh", Post, "/session/:sessionId/refresh", &[]),
    command("getTitle", Get, "/session/:sessionId/title", &[]),
    command("getWindowHandle", Get, "/session/:sessionId/window", &[]),
    command("closeWindow", Delete, "/session/:sessionId/window", &[]),
    command("switchToWindow", Post, "/session/:sessionId/window", &[param!("handle": String)]),
    command("createWindow", Post, "/session/:sessionId/window/new", &[param!("type"?: String)]),
    command("getWindowHandles", Get, "/session/:sessionId/window/handles", &[]),
    command("switchToFrame", Post, "/session/:sessionId/frame", &[param!("id": Any)]),
    command("switchToParentFrame", Post, "/session/:sessionId/frame/parent", &[]),
    command("getWindowRect", Get, "/session/:sessionId/window/rect", &[]),
    command(
        "setWindowRect",
        Post,
        "/session/:sessionId/window/rect",
        &[
            param!("x"?: Number),
            param!("y"?: Number),
            param!("width"?: Number),
            param!("height"?: Number),
        ],
    ),
    command("maximizeWindow", Post, "/session/:sessionId/window/maximize", &[]),
    command("minimizeWindow", Post, "/session/:sessionId/window/minimize", &[]),
    command("fullscreenWindow", Post, "/session/:sessionId/window/fullscreen", &[]),
    command(
        "findElement",
        Post,
        "/session/:sessionId/element",
        &[param!("using": String), param!("value": String)],
    ),
    command(
        "findElements",
        Post,
        "/session/:sessionId/elements",
        &[param!("using": String), param!("value": String)],
    ),
    command(
        "findElementFromElement",
        Post,
        "/session/:sessionId/element/:elementId/element",
        &[param!("using": String), param!("value": String)],
    ),
    command(
        "findElementsFromElement",
        Post,
        "/session/:sessionId/element/:elementId/elements",
        &[param!("using": String), param!("value": String)],
    ),
    command("getActiveElement", Get, "/session/:sessionId/element/active", &[]),
    command("isElementSelected", Get, "/session/:sessionId/element/:elementId/selected", &[]),
    command(
        "getElementAttribute",
        Get,
        "/session/:sessionId/element/:elementId/attribute/:name",
        &[],
    ),
    command(
        "getElementProperty",
        Get,
        "/session/:sessionId/element/:elementId/property/:name",
        &[],
    ),
    command(
        "getElementCSSValue",
        Get,
        "/session/:sessionId/element/:elementId/css/:propertyName",
        &[],
    ),
    command("getElementText", Get, "/session/:sessionId/element/:elementId/text", &[]),
    command("getElementTagName", Get, "/session/:sessionId/element/:elementId/name", &[]),
    command("getElementRect", Get, "/session/:sessionId/element/:elementId/rect", &[]),
    command("isElementEnabled", Get, "/session/:sessionId/element/:elementId/enabled", &[]),
    command("elementClick", Post, "/session/:sessionId/element/:elementId/click", &[]),
    command("elementClear", Post, "/session/:sessionId/element/:elementId/clear", &[]),
    command(
        "elementSendKeys",
        Post,
        "/session/:sessionId/element/:elementId/value",
        &[param!("text": String)],
    ),
    command("getPageSource", Get, "/session/:sessionId/source", &[]),
    command(
        "executeScript",
        Post,
        "/session/:sessionId/execute/sync",
        &[param!("script": String), param!("args": Array)],
    ),
    command(
        "executeAsyncScript",
        Post,
        "/session/:sessionId/execute/async",
        &[param!("script": String), param!("args": Array)],
    ),
    command("getAllCookies", Get, "/session/:sessionId/cookie", &[]),
    command("addCookie", Post, "/session/:sessionId/cookie", &[param!("cookie": Object)]),
    command("deleteAllCookies", Delete, "/session/:sessionId/cookie", &[]),
    command("getNamedCookie", Get, "/session/:sessionId/cookie/:name", &[]),
    command("deleteCookie", Delete, "/session/:sessionId/cookie/:name", &[]),
    command("performActions", Post, "/session/:sessionId/actions", &[param!("actions": Array)]),
    command("releaseActions", Delete, "/session/:sessionId/actions", &[]),
    command("dismissAlert", Post, "/session/:sessionId/alert/dismiss", &[]),
    command("acceptAlert", Post, "/session/:sessionId/alert/accept", &[]),
    command("getAlertText", Get, "/session/:sessionId/alert/text", &[]),
    command("sendAlertText", Post, "/session/:sessionId/alert/text", &[param!("text": String)]),
    command("takeScreenshot", Get, "/session/:sessionId/screenshot", &[]),
    command(
        "takeElementScreenshot",
        Get,
        "/session/:sessionId/element/:elementId/screenshot",
        &[],
    ),
    command(
        "printPage",
        Post,
        "/session/:sessionId/print",
        &[
            param!("orientation"?: String),
            param!("scale"?: Number),
            param!("background"?: Boolean),
            param!("pageRanges"?: Array),
        ],
    ),
];
