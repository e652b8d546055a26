//! Quick end-to-end check of the configured targets.
//!
//! Runs one short flow per demo and exits non-zero if any of them fails. Handy for checking
//! that a WebDriver server, a browser, and network access are all in place before running the
//! full ignored suite.

use clap::{Parser, ValueEnum};
use demo_e2e::api::TodoApi;
use demo_e2e::config::{Browser, Config};
use demo_e2e::pages::{SaucePage, TodoPage};
use demo_e2e::session::with_session;
use demo_e2e::{expect, expect_page, ScenarioError};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use url::Url;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Flow {
    /// Add, complete and reopen a todo
    Todo,
    /// Log in, fill and empty the cart
    Shop,
    /// Fetch a todo from the REST API
    Api,
}

#[derive(Parser)]
#[command(name = "demo-e2e-smoke")]
#[command(about = "Smoke-test the TodoMVC, storefront and REST API demos")]
#[command(version)]
struct Cli {
    /// Browser to drive (firefox or chrome)
    #[arg(short, long, env = "DEMO_E2E_BROWSER")]
    browser: Option<Browser>,

    /// WebDriver server URL
    #[arg(short, long, env = "DEMO_E2E_WEBDRIVER")]
    webdriver: Option<Url>,

    /// Show the browser window
    #[arg(long)]
    headed: bool,

    /// Directory for failure screenshots
    #[arg(long, env = "DEMO_E2E_ARTIFACTS")]
    artifacts: Option<PathBuf>,

    /// Flows to run (default: all)
    #[arg(short, long, value_enum)]
    only: Vec<Flow>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

async fn todo_flow(config: Config) -> Result<(), ScenarioError> {
    with_session(config, "smoke::todo", |session| async move {
        let todos = TodoPage::open(&session).await?;
        todos.add_todo("Buy milk").await?;
        expect(todos.counter()).to_have_text("1 item left").await?;
        todos.check_todo(0).await?;
        expect(todos.counter()).to_have_text("0 items left").await?;
        todos.uncheck_todo(0).await?;
        expect(todos.counter()).to_have_text("1 item left").await
    })
    .await
}

async fn shop_flow(config: Config) -> Result<(), ScenarioError> {
    with_session(config, "smoke::shop", |session| async move {
        let shop = SaucePage::new(&session);
        shop.login_as_standard_user().await?;
        expect_page(&session).to_have_url_containing("inventory").await?;
        shop.add_to_cart("sauce-labs-backpack").await?;
        expect(&shop.cart_badge()).to_have_text("1").await?;
        shop.remove_from_cart("sauce-labs-backpack").await?;
        expect(&shop.cart_badge()).not().to_be_visible().await
    })
    .await
}

async fn api_flow(config: Config) -> Result<(), ScenarioError> {
    let api = TodoApi::from_config(&config)?;
    let res = api.get(1).await?;
    if res.status.is_success() && res.is_json() && res.body.id == 1 {
        Ok(())
    } else {
        Err(ScenarioError::Assertion {
            subject: format!("GET {}todos/1", api.base()),
            expected: "to answer 200 with a json todo".to_string(),
            actual: format!("{} {:?}", res.status, res.content_type()),
            waited: Default::default(),
        })
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };
    if let Some(browser) = cli.browser {
        config.browser = browser;
    }
    if cli.webdriver.is_some() {
        config.webdriver = cli.webdriver;
    }
    if cli.headed {
        config.headless = false;
    }
    if cli.artifacts.is_some() {
        config.artifacts = cli.artifacts;
    }

    let flows = if cli.only.is_empty() {
        vec![Flow::Todo, Flow::Shop, Flow::Api]
    } else {
        cli.only
    };

    let mut failed = 0;
    for flow in flows {
        let result = match flow {
            Flow::Todo => todo_flow(config.clone()).await,
            Flow::Shop => shop_flow(config.clone()).await,
            Flow::Api => api_flow(config.clone()).await,
        };
        match result {
            Ok(()) => info!(?flow, "ok"),
            Err(e) => {
                failed += 1;
                error!(?flow, kind = ?e.kind(), error = %e, "failed");
            }
        }
    }

    if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
