//! Legacy JSONWire protocol commands
//!
//! Only offered to remote ends that answered the handshake with the legacy
//! envelope.

use super::{CommandDescriptor, Parameter, ProtocolFamily};
use crate::environment::EnvironmentPredicates;
use crate::transport::HttpMethod::{self, Delete, Get, Post};

fn applies(environment: &EnvironmentPredicates) -> bool {
    !environment.is_w3c
}

const fn command(
    name: &'static str,
    method: HttpMethod,
    endpoint: &'static str,
    parameters: &'static [Parameter],
) -> CommandDescriptor {
    CommandDescriptor::new(ProtocolFamily::JsonWire, name, method, endpoint, parameters, applies)
}

pub static COMMANDS: &[CommandDescriptor] = &[
    command("status", Get, "/status", &[]),
    command(
        "newSession",
        Post,
        "/session",
        &[
            param!("desiredCapabilities": Object),
            param!("requiredCapabilities"?: Object),
        ],
    ),
    command("getSessions", Get, "/sessions", &[]),
    command("getSession", Get, "/session/:sessionId", &[]),
    command("deleteSession", Delete, "/session/:sessionId", &[]),
    command(
        "setTimeouts",
        Post,
        "/session/:sessionId/timeouts",
        &[param!("type": String), param!("ms": Number)],
    ),
    command(
        "setAsyncTimeout",
        Post,
        "/session/:sessionId/timeouts/async_script",
        &[param!("ms": Number)],
    ),
    command(
        "setImplicitTimeout",
        Post,
        "/session/:sessionId/timeouts/implicit_wait",
        &[param!("ms": Number)],
    ),
    command("getWindowHandle", Get, "/session/:sessionId/window_handle", &[]),
    command("getWindowHandles", Get, "/session/:sessionId/window_handles", &[]),
    command("getUrl", Get, "/session/:sessionId/url", &[]),
    command("navigateTo", Post, "/session/:sessionId/url", &[param!("url": String)]),
    command("forward", Post, "/session/:sessionId/forward", &[]),
    command("back", Post, "/session/:sessionId/back", &[]),
    command("refresh", Post, "/session/:sessionId/refresh", &[]),
    command(
        "executeScript",
        Post,
        "/session/:sessionId/execute",
        &[param!("script": String), param!("args": Array)],
    ),
    command(
        "executeAsyncScript",
        Post,
        "/session/:sessionId/execute_async",
        &[param!("script": String), param!("args": Array)],
    ),
    command("takeScreenshot", Get, "/session/:sessionId/screenshot", &[]),
    command("switchToFrame", Post, "/session/:sessionId/frame", &[param!("id": Any)]),
    command("switchToParentFrame", Post, "/session/:sessionId/frame/parent", &[]),
    command("switchToWindow", Post, "/session/:sessionId/window", &[param!("name": String)]),
    command("closeWindow", Delete, "/session/:sessionId/window", &[]),
    command("getWindowSize", Get, "/session/:sessionId/window/:windowHandle/size", &[]),
    command(
        "setWindowSize",
        Post,
        "/session/:sessionId/window/:windowHandle/size",
        &[param!("width": Number), param!("height": Number)],
    ),
    command("getWindowPosition", Get, "/session/:sessionId/window/:windowHandle/position", &[]),
    command(
        "setWindowPosition",
        Post,
        "/session/:sessionId/window/:windowHandle/position",
        &[param!("x": Number), param!("y": Number)],
    ),
    command("maximizeWindow", Post, "/session/:sessionId/window/:windowHandle/maximize", &[]),
    command("getAllCookies", Get, "/session/:sessionId/cookie", &[]),
    command("addCookie", Post, "/session/:sessionId/cookie", &[param!("cookie": Object)]),
    command("deleteAllCookies", Delete, "/session/:sessionId/cookie", &[]),
    command("deleteCookie", Delete, "/session/:sessionId/cookie/:name", &[]),
    command("getPageSource", Get, "/session/:sessionId/source", &[]),
    command("getTitle", Get, "/session/:sessionId/title", &[]),
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
    command("getActiveElement", Post, "/session/:sessionId/element/active", &[]),
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
    command("elementClick", Post, "/session/:sessionId/element/:elementId/click", &[]),
    command("elementSubmit", Post, "/session/:sessionId/element/:elementId/submit", &[]),
    command("getElementText", Get, "/session/:sessionId/element/:elementId/text", &[]),
    command(
        "elementSendKeys",
        Post,
        "/session/:sessionId/element/:elementId/value",
        &[param!("value": Array)],
    ),
    command("sendKeys", Post, "/session/:sessionId/keys", &[param!("value": Array)]),
    command("getElementTagName", Get, "/session/:sessionId/element/:elementId/name", &[]),
    command("elementClear", Post, "/session/:sessionId/element/:elementId/clear", &[]),
    command("isElementSelected", Get, "/session/:sessionId/element/:elementId/selected", &[]),
    command("isElementEnabled", Get, "/session/:sessionId/element/:elementId/enabled", &[]),
    command(
        "getElementAttribute",
        Get,
        "/session/:sessionId/element/:elementId/attribute/:name",
        &[],
    ),
    command(
        "elementIdEquals",
        Get,
        "/session/:sessionId/element/:elementId/equals/:otherId",
        &[],
    ),
    command("isElementDisplayed", Get, "/session/:sessionId/element/:elementId/displayed", &[]),
    command("getElementLocation", Get, "/session/:sessionId/element/:elementId/location", &[]),
    command(
        "getElementLocationInView",
        Get,
        "/session/:sessionId/element/:elementId/location_in_view",
        &[],
    ),
    command("getElementSize", Get, "/session/:sessionId/element/:elementId/size", &[]),
    command(
        "getElementCSSValue",
        Get,
        "/session/:sessionId/element/:elementId/css/:propertyName",
        &[],
    ),
    command("getOrientation", Get, "/session/:sessionId/orientation", &[]),
    command(
        "setOrientation",
        Post,
        "/session/:sessionId/orientation",
        &[param!("orientation": String)],
    ),
    command("getAlertText", Get, "/session/:sessionId/alert_text", &[]),
    command("sendAlertText", Post, "/session/:sessionId/alert_text", &[param!("text": String)]),
    command("acceptAlert", Post, "/session/:sessionId/accept_alert", &[]),
    command("dismissAlert", Post, "/session/:sessionId/dismiss_alert", &[]),
    command(
        "moveToElement",
        Post,
        "/session/:sessionId/moveto",
        &[
            param!("element"?: String),
            param!("xoffset"?: Number),
            param!("yoffset"?: Number),
        ],
    ),
    command("buttonDown", Post, "/session/:sessionId/buttondown", &[param!("button"?: Number)]),
    command("buttonUp", Post, "/session/:sessionId/buttonup", &[param!("button"?: Number)]),
    command("positionClick", Post, "/session/:sessionId/click", &[param!("button"?: Number)]),
    command("positionDoubleClick", Post, "/session/:sessionId/doubleclick", &[]),
    command("getLogTypes", Get, "/session/:sessionId/log/types", &[]),
    command("getLogs", Post, "/session/:sessionId/log", &[param!("type": String)]),
    command("getGeoLocation", Get, "/session/:sessionId/location", &[]),
    command(
        "setGeoLocation",
        Post,
        "/session/:sessionId/location",
        &[param!("location": Object)],
    ),
];
