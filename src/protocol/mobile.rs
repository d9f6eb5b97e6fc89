//! Appium / mobile JSONWire commands
//!
//! Most commands apply to any mobile session; some are specific to one
//! platform and carry a narrower predicate.

use super::{Applicability, CommandDescriptor, Parameter, ProtocolFamily};
use crate::environment::EnvironmentPredicates;
use crate::transport::HttpMethod::{self, Get, Post};

fn mobile(environment: &EnvironmentPredicates) -> bool {
    environment.is_mobile
}

fn ios(environment: &EnvironmentPredicates) -> bool {
    environment.is_mobile && environment.is_ios
}

fn android(environment: &EnvironmentPredicates) -> bool {
    environment.is_mobile && environment.is_android
}

const fn gated(
    applicability: Applicability,
    name: &'static str,
    method: HttpMethod,
    endpoint: &'static str,
    parameters: &'static [Parameter],
) -> CommandDescriptor {
    CommandDescriptor::new(ProtocolFamily::Mobile, name, method, endpoint, parameters, applicability)
}

const fn command(
    name: &'static str,
    method: HttpMethod,
    endpoint: &'static str,
    parameters: &'static [Parameter],
) -> CommandDescriptor {
    gated(mobile, name, method, endpoint, parameters)
}

const APP_ID: &[Parameter] = &[param!("appId"?: String), param!("bundleId"?: String)];

pub static COMMANDS: &[CommandDescriptor] = &[
    command("getContext", Get, "/session/:sessionId/context", &[]),
    command("switchContext", Post, "/session/:sessionId/context", &[param!("name": String)]),
    command("getContexts", Get, "/session/:sessionId/contexts", &[]),
    command("getOrientation", Get, "/session/:sessionId/orientation", &[]),
    command(
        "setOrientation",
        Post,
        "/session/:sessionId/orientation",
        &[param!("orientation": String)],
    ),
    command("lock", Post, "/session/:sessionId/appium/device/lock", &[param!("seconds"?: Number)]),
    command("unlock", Post, "/session/:sessionId/appium/device/unlock", &[]),
    command("isLocked", Post, "/session/:sessionId/appium/device/is_locked", &[]),
    command(
        "hideKeyboard",
        Post,
        "/session/:sessionId/appium/device/hide_keyboard",
        &[
            param!("strategy"?: String),
            param!("key"?: String),
            param!("keyCode"?: String),
            param!("keyName"?: String),
        ],
    ),
    command("isKeyboardShown", Get, "/session/:sessionId/appium/device/is_keyboard_shown", &[]),
    command(
        "installApp",
        Post,
        "/session/:sessionId/appium/device/install_app",
        &[param!("appPath": String)],
    ),
    command("removeApp", Post, "/session/:sessionId/appium/device/remove_app", APP_ID),
    command("isAppInstalled", Post, "/session/:sessionId/appium/device/app_installed", APP_ID),
    command("activateApp", Post, "/session/:sessionId/appium/device/activate_app", APP_ID),
    command("terminateApp", Post, "/session/:sessionId/appium/device/terminate_app", APP_ID),
    command("queryAppState", Post, "/session/:sessionId/appium/device/app_state", APP_ID),
    command(
        "backgroundApp",
        Post,
        "/session/:sessionId/appium/app/background",
        &[param!("seconds"?: Any)],
    ),
    command(
        "pushFile",
        Post,
        "/session/:sessionId/appium/device/push_file",
        &[param!("path": String), param!("data": String)],
    ),
    command(
        "pullFile",
        Post,
        "/session/:sessionId/appium/device/pull_file",
        &[param!("path": String)],
    ),
    command("getDeviceTime", Get, "/session/:sessionId/appium/device/system_time", &[]),
    command("getSettings", Get, "/session/:sessionId/appium/settings", &[]),
    command(
        "updateSettings",
        Post,
        "/session/:sessionId/appium/settings",
        &[param!("settings": Object)],
    ),
    command("touchPerform", Post, "/session/:sessionId/touch/perform", &[param!("actions": Array)]),
    gated(ios, "shake", Post, "/session/:sessionId/appium/device/shake", &[]),
    gated(
        ios,
        "touchId",
        Post,
        "/session/:sessionId/appium/simulator/touch_id",
        &[param!("match": Boolean)],
    ),
    gated(
        ios,
        "toggleEnrollTouchId",
        Post,
        "/session/:sessionId/appium/simulator/toggle_touch_id_enrollment",
        &[param!("enabled"?: Boolean)],
    ),
    gated(
        android,
        "startActivity",
        Post,
        "/session/:sessionId/appium/device/start_activity",
        &[
            param!("appPackage": String),
            param!("appActivity": String),
            param!("appWaitPackage"?: String),
            param!("appWaitActivity"?: String),
        ],
    ),
    gated(
        android,
        "getCurrentActivity",
        Get,
        "/session/:sessionId/appium/device/current_activity",
        &[],
    ),
    gated(
        android,
        "getCurrentPackage",
        Get,
        "/session/:sessionId/appium/device/current_package",
        &[],
    ),
    gated(android, "toggleWiFi", Post, "/session/:sessionId/appium/device/toggle_wifi", &[]),
    gated(
        android,
        "pressKeyCode",
        Post,
        "/session/:sessionId/appium/device/press_keycode",
        &[
            param!("keycode": Number),
            param!("metastate"?: Number),
            param!("flags"?: Number),
        ],
    ),
    gated(
        android,
        "getDisplayDensity",
        Get,
        "/session/:sessionId/appium/device/display_density",
        &[],
    ),
    gated(
        android,
        "getPerformanceData",
        Post,
        "/session/:sessionId/appium/getPerformanceData",
        &[
            param!("packageName": String),
            param!("dataType": String),
            param!("dataReadTimeout"?: Number),
        ],
    ),
    gated(android, "getNetworkConnection", Get, "/session/:sessionId/network_connection", &[]),
    gated(
        android,
        "setNetworkConnection",
        Post,
        "/session/:sessionId/network_connection",
        &[param!("type": Number)],
    ),
];
