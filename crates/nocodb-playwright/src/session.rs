// BrowserSession - one Playwright browser, context and page per test
//
// Launch order: Playwright server → browser → context (base URL, clipboard
// permissions) → page → network gate. Shutdown runs in reverse.

use crate::config::{BrowserKind, E2eConfig};
use crate::error::{Error, Result};
use crate::network::NetworkGate;
use crate::pages::{BasePage, DashboardPage, ExpandedFormPage};
use playwright_rs::{
    Browser, BrowserContext, BrowserContextOptions, LaunchOptions, Page, Playwright,
};
use url::Url;

/// Permissions granted to the context so share URLs can be read back.
const CLIPBOARD_PERMISSIONS: [&str; 2] = ["clipboard-read", "clipboard-write"];

/// A running browser session against the application under test.
pub struct BrowserSession {
    config: E2eConfig,
    playwright: Playwright,
    browser: Browser,
    context: BrowserContext,
    page: Page,
    network: NetworkGate,
}

impl BrowserSession {
    /// Launches a browser configured from `NOCODB_E2E_*` environment variables.
    pub async fn launch_from_env() -> Result<Self> {
        Self::launch(E2eConfig::from_env()?).await
    }

    /// Launches Playwright and opens a page with the network gate installed.
    pub async fn launch(config: E2eConfig) -> Result<Self> {
        tracing::debug!(
            "Launching {:?} (headless: {}) against {}",
            config.browser,
            config.headless,
            config.base_url
        );

        let playwright = Playwright::launch().await?;
        let browser_type = match config.browser {
            BrowserKind::Chromium => playwright.chromium(),
            BrowserKind::Firefox => playwright.firefox(),
            BrowserKind::Webkit => playwright.webkit(),
        };

        let mut launch_options = LaunchOptions::new().headless(config.headless);
        if let Some(slow_mo) = config.slow_mo_ms {
            launch_options = launch_options.slow_mo(slow_mo);
        }
        let browser = browser_type.launch_with_options(launch_options).await?;

        let mut context_options =
            BrowserContextOptions::builder().base_url(config.base_url.clone());
        // Only Chromium understands the clipboard permission names.
        if config.browser == BrowserKind::Chromium {
            context_options = context_options.permissions(
                CLIPBOARD_PERMISSIONS
                    .iter()
                    .map(|p| p.to_string())
                    .collect(),
            );
        }
        let context = browser
            .new_context_with_options(context_options.build())
            .await?;
        let page = context.new_page().await?;

        let network = NetworkGate::install(
            &page,
            &config.data_api_glob(),
            config.request_timeout_duration(),
        )
        .await?;

        Ok(Self {
            config,
            playwright,
            browser,
            context,
            page,
            network,
        })
    }

    pub fn config(&self) -> &E2eConfig {
        &self.config
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn network(&self) -> &NetworkGate {
        &self.network
    }

    /// Navigates to `path`, resolved against the configured base URL.
    pub async fn goto(&self, path: &str) -> Result<()> {
        let url = Url::parse(&self.config.base_url)?.join(path)?;
        tracing::debug!("Navigating to {}", url);
        self.page.goto(url.as_str(), None).await?;
        Ok(())
    }

    pub fn base_page(&self) -> BasePage {
        BasePage::new(
            self.page.clone(),
            self.network.clone(),
            self.config.assertion_timeout_duration(),
        )
    }

    pub async fn dashboard(&self) -> DashboardPage {
        DashboardPage::new(self.base_page()).await
    }

    pub async fn expanded_form(&self) -> ExpandedFormPage {
        ExpandedFormPage::new(&self.dashboard().await)
    }

    /// Closes context and browser, then stops the Playwright server.
    ///
    /// Every step runs even if an earlier one fails; the first failure is
    /// returned.
    pub async fn close(self) -> Result<()> {
        let context = self.context.close().await;
        let browser = self.browser.close().await;
        let server = self.playwright.shutdown().await;
        first_error([
            ("context", context),
            ("browser", browser),
            ("playwright server", server),
        ])
    }
}

fn first_error<I>(steps: I) -> Result<()>
where
    I: IntoIterator<Item = (&'static str, playwright_rs::Result<()>)>,
{
    let mut first = None;
    for (what, outcome) in steps {
        if let Err(e) = outcome {
            tracing::warn!("Failed to close {}: {}", what, e);
            first.get_or_insert_with(|| Error::from(e).context(format!("close {}", what)));
        }
    }
    first.map_or(Ok(()), Err)
}
