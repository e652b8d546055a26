//! WebDriver sessions and scoped acquisition.

use crate::config::Config;
use crate::error::ScenarioError;
use crate::net;
use crate::selector::Selector;
use crate::target::Target;
use crate::wait::Timing;
use fantoccini::{Client, ClientBuilder};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use url::Url;

/// A live browser session plus the configuration it was opened with.
///
/// Cloning is cheap; all clones drive the same browser window.
#[derive(Clone, Debug)]
pub struct Session {
    client: Client,
    config: Arc<Config>,
}

impl Session {
    /// Open a session on the configured browser.
    pub async fn connect(config: Config) -> Result<Self, ScenarioError> {
        let webdriver = config.webdriver_url();
        info!(browser = %config.browser, %webdriver, headless = config.headless, "opening session");

        let connector = net::connector().map_err(|source| ScenarioError::Connect {
            webdriver: webdriver.clone(),
            source,
        })?;
        let mut builder = ClientBuilder::new(connector);
        builder.capabilities(config.browser.capabilities(config.headless));
        let client = builder.connect(&webdriver).await?;

        Ok(Session {
            client,
            config: Arc::new(config),
        })
    }

    /// The underlying WebDriver client.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// The configuration this session runs under.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The default retry budget for targets and assertions.
    pub fn timing(&self) -> Timing {
        self.config.timing
    }

    /// A live handle on the elements `selector` matches.
    pub fn locate(&self, selector: Selector) -> Target {
        Target::new(self.client.clone(), selector, self.config.timing)
    }

    /// Load `url` and wait for it to finish loading.
    pub async fn goto(&self, url: &Url) -> Result<(), ScenarioError> {
        info!(%url, "navigating");
        self.client
            .goto(url.as_str())
            .await
            .map_err(|source| ScenarioError::Navigation {
                url: url.to_string(),
                source,
            })
    }

    /// The URL of the current page.
    pub async fn current_url(&self) -> Result<Url, ScenarioError> {
        Ok(self.client.current_url().await?)
    }

    /// The title of the current page.
    pub async fn title(&self) -> Result<String, ScenarioError> {
        Ok(self.client.title().await?)
    }

    /// A cookie of the current page by name.
    pub async fn cookie(
        &self,
        name: &str,
    ) -> Result<Option<cookie::Cookie<'static>>, ScenarioError> {
        let cookies = self.client.get_all_cookies().await?;
        Ok(cookies
            .into_iter()
            .find(|c| c.name() == name)
            .map(|c| c.into_owned()))
    }

    /// Write a PNG screenshot of the current viewport to `path`.
    pub async fn screenshot_to(&self, path: &Path) -> Result<(), ScenarioError> {
        let png = self.client.screenshot().await?;
        if let Some(dir) = path.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }
        tokio::fs::write(path, png).await?;
        Ok(())
    }

    /// End the session and close the browser.
    pub async fn close(self) -> Result<(), ScenarioError> {
        Ok(self.client.close().await?)
    }
}

/// Where the failure screenshot of scenario `name` goes.
fn artifact_path(dir: &Path, name: &str, browser: &str) -> PathBuf {
    let stem: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    dir.join(format!("{}-{}.png", stem.trim_matches('_'), browser))
}

/// Run `body` against a fresh session, then release the session no matter how the body ended.
///
/// The body runs on its own task, so a panicking assertion cannot skip the cleanup. If the body
/// fails or panics and an artifact directory is configured, a screenshot of the page is saved
/// first. Panics are resumed once the session is closed.
pub async fn with_session<F, Fut>(config: Config, name: &str, body: F) -> Result<(), ScenarioError>
where
    F: FnOnce(Session) -> Fut,
    Fut: Future<Output = Result<(), ScenarioError>> + Send + 'static,
{
    let session = Session::connect(config).await?;
    let browser = session.config.browser;
    info!(scenario = name, %browser, "scenario started");

    let outcome = tokio::spawn(body(session.clone())).await;

    if !matches!(outcome, Ok(Ok(()))) {
        if let Some(ref dir) = session.config.artifacts {
            let path = artifact_path(dir, name, browser.name());
            match session.screenshot_to(&path).await {
                Ok(()) => info!(path = %path.display(), "saved failure screenshot"),
                Err(e) => warn!(error = %e, "could not capture failure screenshot"),
            }
        }
    }

    if let Err(e) = session.close().await {
        warn!(scenario = name, error = %e, "could not close session");
    }

    match outcome {
        Ok(result) => {
            match result {
                Ok(()) => info!(scenario = name, %browser, "scenario passed"),
                Err(ref e) => warn!(scenario = name, %browser, error = %e, "scenario failed"),
            }
            result
        }
        Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
        Err(_) => Err(ScenarioError::Cancelled),
    }
}

/// Blocking entry point for a single scenario on `browser`.
///
/// Configuration comes from the environment, with the browser overridden. The scenario runs on
/// a dedicated current-thread runtime so it can be called from a plain `#[test]`.
pub fn run_scenario<F, Fut>(name: &str, browser: &str, body: F) -> Result<(), ScenarioError>
where
    F: FnOnce(Session) -> Fut,
    Fut: Future<Output = Result<(), ScenarioError>> + Send + 'static,
{
    let mut config = Config::from_env()?;
    config.browser = browser.parse()?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(with_session(config, name, body))
}
