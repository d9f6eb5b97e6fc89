//! Environment predicate derivation

use phf::phf_map;
use serde_json::Value;
use tracing::debug;

use super::{EnvironmentPredicates, HandshakeResponse};
use crate::capabilities::CapabilityMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Platform {
    Ios,
    Android,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Browser {
    Chrome,
    Firefox,
}

/// Lower-cased `platformName` values of mobile platforms
static MOBILE_PLATFORMS: phf::Map<&'static str, Platform> = phf_map! {
    "ios" => Platform::Ios,
    "tvos" => Platform::Ios,
    "iphone" => Platform::Ios,
    "ipad" => Platform::Ios,
    "android" => Platform::Android,
};

/// Lower-cased `browserName` values with vendor-specific command sets
static BROWSERS: phf::Map<&'static str, Browser> = phf_map! {
    "chrome" => Browser::Chrome,
    "chromium" => Browser::Chrome,
    "googlechrome" => Browser::Chrome,
    "chrome-headless-shell" => Browser::Chrome,
    "firefox" => Browser::Firefox,
    "mozilla firefox" => Browser::Firefox,
};

/// Capabilities that only mobile automation servers accept or return
const MOBILE_MARKERS: &[&str] = &[
    "deviceName",
    "app",
    "appPackage",
    "appActivity",
    "bundleId",
    "automationName",
    "udid",
];

/// Derive predicates from a successful handshake.
///
/// Only the returned capabilities are consulted; the dialect comes from the
/// envelope shape.
pub fn detect(response: &HandshakeResponse) -> EnvironmentPredicates {
    let capabilities = response.capabilities();
    let platform = string_cap(capabilities, &["platformName", "platform"])
        .or_else(|| string_cap(capabilities, &["browserName"]))
        .and_then(|name| MOBILE_PLATFORMS.get(name.to_ascii_lowercase().as_str()).copied());
    let browser = string_cap(capabilities, &["browserName"])
        .and_then(|name| BROWSERS.get(name.to_ascii_lowercase().as_str()).copied());
    let device_name = string_cap(capabilities, &["deviceName"])
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let has_mobile_marker = MOBILE_MARKERS.iter().any(|marker| has_cap(capabilities, marker));

    let is_ios = platform == Some(Platform::Ios) || device_name.contains("iphone") || device_name.contains("ipad");
    let is_android = platform == Some(Platform::Android)
        || has_cap(capabilities, "appPackage")
        || device_name.contains("android");

    let predicates = EnvironmentPredicates {
        is_w3c: response.is_w3c(),
        is_mobile: is_ios || is_android || has_mobile_marker,
        is_ios,
        is_android,
        is_chrome: browser == Some(Browser::Chrome)
            || capabilities.contains_key("goog:chromeOptions")
            || capabilities.get("chrome").is_some_and(Value::is_object),
        is_firefox: browser == Some(Browser::Firefox) || has_prefix(capabilities, "moz:"),
        is_sauce: has_prefix(capabilities, "sauce:"),
        is_selenium_standalone: capabilities.contains_key("webdriver.remote.sessionid")
            || has_prefix(capabilities, "se:"),
    };

    debug!("Detected environment: {:?}", predicates);
    predicates
}

/// First string value among `keys`, also trying the `appium:` prefixed form
fn string_cap<'a>(capabilities: &'a CapabilityMap, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|key| {
        capabilities
            .get(*key)
            .or_else(|| capabilities.get(&format!("appium:{}", key)))
            .and_then(Value::as_str)
    })
}

fn has_cap(capabilities: &CapabilityMap, key: &str) -> bool {
    capabilities.contains_key(key) || capabilities.contains_key(&format!("appium:{}", key))
}

fn has_prefix(capabilities: &CapabilityMap, prefix: &str) -> bool {
    capabilities.keys().any(|key| key.starts_with(prefix))
}
