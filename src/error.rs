//! Errors that fail a scenario, and the taxonomy reports sort them into.
//!
//! Everything a scenario can hit ends up as a [`ScenarioError`]; [`ScenarioError::kind`] says
//! whether the page misbehaved, the test could not drive it, or the environment was broken.
use fantoccini::error::{CmdError, NewSessionError};
use http::StatusCode;
use std::io::Error as IOError;
use std::time::Duration;
use thiserror::Error;
use url::ParseError;

/// The broad class a scenario failure belongs to.
///
/// Assertion and interaction failures are reported identically, but an interaction failure
/// usually points at a locator or timing defect rather than a behavioral regression.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum FailureKind {
    /// Observed state did not match the expected state within the timeout.
    Assertion,
    /// An element could not be found, seen, or interacted with within the timeout.
    Interaction,
    /// The browser, the WebDriver server, or a remote target could not be reached.
    Environment,
}

/// An error that fails a single scenario.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// An assertion kept failing until its timeout elapsed.
    #[error("expected {subject} {expected}, but found {actual} (waited {waited:?})")]
    Assertion {
        /// What was being observed, e.g. a rendered locator chain or `page url`.
        subject: String,
        /// Human readable description of the expected state.
        expected: String,
        /// The last observation made before giving up.
        actual: String,
        /// How long the assertion kept retrying.
        waited: Duration,
    },

    /// A user action could not be carried out.
    #[error("could not {action} {target}: {reason}")]
    Interaction {
        /// The action that was attempted (`click`, `fill`, ...).
        action: &'static str,
        /// The rendered locator chain of the element the action targeted.
        target: String,
        /// Why the action failed.
        reason: InteractionFailure,
    },

    /// A page failed to load.
    #[error("could not load {url}: {source}")]
    Navigation {
        /// The URL that was requested.
        url: String,
        /// The underlying WebDriver failure.
        #[source]
        source: CmdError,
    },

    /// The HTTP(S) connector used to reach the WebDriver server could not be set up.
    #[error("could not set up a connection to webdriver at {webdriver}: {source}")]
    Connect {
        /// The WebDriver endpoint the session was going to use.
        webdriver: String,
        /// Usually a TLS backend that failed to initialize.
        #[source]
        source: IOError,
    },

    /// No WebDriver session could be established.
    #[error("webdriver session could not be created: {0}")]
    Session(#[from] NewSessionError),

    /// A WebDriver command outside of any particular action failed.
    #[error("webdriver command failed: {0}")]
    Command(#[from] CmdError),

    /// A call to the REST API failed below the level of an assertion.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The run configuration was invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The scenario runtime could not be started, or an artifact could not be written.
    #[error("scenario runtime failed: {0}")]
    Runtime(#[from] IOError),

    /// The task driving the scenario was cancelled before it finished.
    #[error("scenario task was cancelled")]
    Cancelled,
}

impl ScenarioError {
    /// Classify this error into the assertion / interaction / environment taxonomy.
    pub fn kind(&self) -> FailureKind {
        match self {
            ScenarioError::Assertion { .. } => FailureKind::Assertion,
            ScenarioError::Interaction { .. } => FailureKind::Interaction,
            ScenarioError::Navigation { .. }
            | ScenarioError::Connect { .. }
            | ScenarioError::Session(..)
            | ScenarioError::Command(..)
            | ScenarioError::Api(..)
            | ScenarioError::Config(..)
            | ScenarioError::Runtime(..)
            | ScenarioError::Cancelled => FailureKind::Environment,
        }
    }

    /// Returns true if this error is a failed assertion.
    pub fn is_assertion(&self) -> bool {
        matches!(self, ScenarioError::Assertion { .. })
    }

    pub(crate) fn interaction(
        action: &'static str,
        target: impl ToString,
        reason: InteractionFailure,
    ) -> Self {
        ScenarioError::Interaction {
            action,
            target: target.to_string(),
            reason,
        }
    }
}

/// Why an action on a [`Target`](crate::Target) failed.
#[derive(Debug, Error)]
pub enum InteractionFailure {
    /// Nothing matched the locator chain before the timeout.
    #[error("no element matched within {0:?}")]
    NotFound(Duration),

    /// An element matched, but it never became displayed.
    #[error("element stayed hidden for {0:?}")]
    NotVisible(Duration),

    /// An un-indexed locator matched more than one element.
    #[error("{0} elements matched where exactly one was expected")]
    Ambiguous(usize),

    /// An indexed locator pointed past the end of the matched elements.
    #[error("index {index} is out of range for {len} matching elements")]
    OutOfRange {
        /// The requested index.
        index: usize,
        /// How many elements matched at the time of the last attempt.
        len: usize,
    },

    /// A checkbox did not reach the requested state after being clicked.
    #[error("checkbox did not become {}", checkbox_state(.0))]
    StateUnchanged(bool),

    /// The WebDriver server rejected the command.
    #[error(transparent)]
    Driver(#[from] CmdError),
}

fn checkbox_state(checked: &bool) -> &'static str {
    if *checked {
        "checked"
    } else {
        "unchecked"
    }
}

/// An error from the REST API client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The API base URL, or an endpoint derived from it, is invalid.
    #[error("invalid api url: {0}")]
    BadUrl(#[from] ParseError),

    /// The HTTP request could not be assembled.
    #[error("could not build request: {0}")]
    Request(#[from] http::Error),

    /// The TLS connector could not be initialized.
    #[error("could not set up tls: {0}")]
    Tls(#[from] IOError),

    /// The request body could not be serialized.
    #[error("could not encode request body: {0}")]
    Encode(#[from] serde_json::Error),

    /// The server could not be reached, or the connection broke mid-request.
    #[error("request to {url} failed: {source}")]
    Transport {
        /// The endpoint that was called.
        url: String,
        /// The underlying client failure.
        #[source]
        source: hyper_util::client::legacy::Error,
    },

    /// The response body could not be read.
    #[error("could not read response body: {0}")]
    Body(#[from] hyper::Error),

    /// The response body was not the JSON shape the caller asked for.
    #[error("response from {url} ({status}) was not the expected json: {source}")]
    Decode {
        /// The endpoint that was called.
        url: String,
        /// The status the server answered with.
        status: StatusCode,
        /// The decoding failure.
        #[source]
        source: serde_json::Error,
    },
}

/// An invalid configuration value.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A key held a value that could not be interpreted.
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        /// The configuration key, including its prefix.
        key: String,
        /// The raw value found.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// An unsupported browser name was requested.
    #[error("unsupported browser backend {0:?} (expected \"firefox\" or \"chrome\")")]
    UnknownBrowser(String),
}
