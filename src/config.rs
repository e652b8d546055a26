//! Run configuration: which browser to drive, where its WebDriver server lives, how long to
//! wait, and where the three demo targets are hosted.
//!
//! Everything is read from `DEMO_E2E_*` environment variables so the same scenarios can be
//! retargeted (e.g. at a self-hosted TodoMVC build) without touching code.

use crate::error::ConfigError;
use crate::wait::Timing;
use serde_json::map;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

/// Entry URL of the TodoMVC demo.
pub const TODO_URL: &str = "https://demo.playwright.dev/todomvc";
/// Entry URL of the Sauce Labs storefront demo.
pub const SHOP_URL: &str = "https://www.saucedemo.com/";
/// Base URL of the JSONPlaceholder fake REST API.
pub const API_URL: &str = "https://jsonplaceholder.typicode.com";

const PREFIX: &str = "DEMO_E2E_";

/// A browser backend reachable through a WebDriver server.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Browser {
    /// Firefox through `geckodriver`.
    Firefox,
    /// Chrome or Chromium through `chromedriver`.
    Chrome,
}

impl Browser {
    /// The name used in configuration and test names.
    pub fn name(self) -> &'static str {
        match self {
            Browser::Firefox => "firefox",
            Browser::Chrome => "chrome",
        }
    }

    /// Where the driver for this browser listens by default.
    pub fn default_webdriver(self) -> &'static str {
        match self {
            Browser::Firefox => "http://localhost:4444",
            Browser::Chrome => "http://localhost:9515",
        }
    }

    /// Session capabilities for this browser.
    pub fn capabilities(self, headless: bool) -> map::Map<String, serde_json::Value> {
        let mut caps = map::Map::new();
        match self {
            Browser::Firefox => {
                let args: &[&str] = if headless { &["-headless"] } else { &[] };
                caps.insert("browserName".to_string(), "firefox".into());
                caps.insert(
                    "moz:firefoxOptions".to_string(),
                    serde_json::json!({ "args": args }),
                );
            }
            Browser::Chrome => {
                let mut args = vec!["--disable-gpu", "--no-sandbox", "--disable-dev-shm-usage"];
                if headless {
                    args.insert(0, "--headless");
                }
                caps.insert("browserName".to_string(), "chrome".into());
                caps.insert(
                    "goog:chromeOptions".to_string(),
                    serde_json::json!({ "args": args }),
                );
            }
        }
        caps
    }
}

impl FromStr for Browser {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "firefox" | "gecko" | "geckodriver" => Ok(Browser::Firefox),
            "chrome" | "chromium" | "chromedriver" => Ok(Browser::Chrome),
            _ => Err(ConfigError::UnknownBrowser(s.to_string())),
        }
    }
}

impl fmt::Display for Browser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Configuration for one run of the suite.
#[derive(Clone, Debug)]
pub struct Config {
    /// The browser to drive.
    pub browser: Browser,
    /// The WebDriver server URL. `None` means the browser's default port on localhost.
    pub webdriver: Option<Url>,
    /// Whether to ask the browser to run without a window.
    pub headless: bool,
    /// How long actions and assertions keep retrying, and how often.
    pub timing: Timing,
    /// Entry URL of the list-management demo.
    pub todo_url: Url,
    /// Entry URL of the storefront demo.
    pub shop_url: Url,
    /// Base URL of the REST API.
    pub api_url: Url,
    /// Where to write screenshots of failed scenarios, if anywhere.
    pub artifacts: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            browser: Browser::Firefox,
            webdriver: None,
            headless: true,
            timing: Timing::default(),
            todo_url: Url::parse(TODO_URL).expect("TODO_URL is a valid url"),
            shop_url: Url::parse(SHOP_URL).expect("SHOP_URL is a valid url"),
            api_url: Url::parse(API_URL).expect("API_URL is a valid url"),
            artifacts: None,
        }
    }
}

impl Config {
    /// Read configuration from `DEMO_E2E_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    ///
    /// Keys are passed with their `DEMO_E2E_` prefix. Missing or empty values fall back to the
    /// defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| -> Option<(String, String)> {
            let key = format!("{}{}", PREFIX, name);
            lookup(&key)
                .filter(|v| !v.trim().is_empty())
                .map(|v| (key, v))
        };

        let mut config = Config::default();
        if let Some((_, v)) = get("BROWSER") {
            config.browser = v.parse()?;
        }
        if let Some((key, v)) = get("WEBDRIVER") {
            config.webdriver = Some(parse_url(&key, &v)?);
        }
        if let Some((key, v)) = get("HEADLESS") {
            config.headless = parse_bool(&key, &v)?;
        }
        if let Some((key, v)) = get("TIMEOUT_MS") {
            config.timing.timeout = parse_millis(&key, &v)?;
        }
        if let Some((key, v)) = get("POLL_MS") {
            config.timing.interval = parse_millis(&key, &v)?;
        }
        if let Some((key, v)) = get("TODO_URL") {
            config.todo_url = parse_url(&key, &v)?;
        }
        if let Some((key, v)) = get("SHOP_URL") {
            config.shop_url = parse_url(&key, &v)?;
        }
        if let Some((key, v)) = get("API_URL") {
            config.api_url = parse_url(&key, &v)?;
        }
        if let Some((_, v)) = get("ARTIFACTS") {
            config.artifacts = Some(PathBuf::from(v));
        }
        Ok(config)
    }

    /// The WebDriver URL to connect to, falling back to the browser's default.
    pub fn webdriver_url(&self) -> String {
        match self.webdriver {
            Some(ref url) => url.to_string(),
            None => self.browser.default_webdriver().to_string(),
        }
    }
}

fn invalid(key: &str, value: &str, reason: impl fmt::Display) -> ConfigError {
    ConfigError::Invalid {
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_url(key: &str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value.trim()).map_err(|e| invalid(key, value, e))
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid(key, value, "expected a boolean")),
    }
}

fn parse_millis(key: &str, value: &str) -> Result<Duration, ConfigError> {
    let ms: u64 = value
        .trim()
        .parse()
        .map_err(|e| invalid(key, value, e))?;
    if ms == 0 {
        return Err(invalid(key, value, "must be greater than zero"));
    }
    Ok(Duration::from_millis(ms))
}
