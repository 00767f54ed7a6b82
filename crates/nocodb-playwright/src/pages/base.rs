// BasePage - behaviour shared by every NocoDB page object
//
// Owns the root page handle and the network gate. Page objects compose a
// BasePage instead of inheriting from it.

use crate::error::Result;
use crate::network::{NetworkGate, ObservedRequest, RequestMatcher};
use crate::selectors;
use playwright_rs::{Locator, Page, expect};
use std::future::Future;
use std::time::Duration;

/// Root page handle plus the helpers every page object needs.
#[derive(Clone)]
pub struct BasePage {
    page: Page,
    network: NetworkGate,
    assertion_timeout: Duration,
}

impl BasePage {
    pub fn new(page: Page, network: NetworkGate, assertion_timeout: Duration) -> Self {
        Self {
            page,
            network,
            assertion_timeout,
        }
    }

    /// The browser page everything is rendered in
    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn network(&self) -> &NetworkGate {
        &self.network
    }

    pub fn assertion_timeout(&self) -> Duration {
        self.assertion_timeout
    }

    /// Page-level locator, for overlays rendered outside any scoped root.
    pub async fn locator(&self, selector: &str) -> Locator {
        self.page.locator(selector).await
    }

    /// Waits until a toast notification containing `message` is visible.
    pub async fn verify_toast(&self, message: &str) -> Result<()> {
        tracing::debug!("Verifying toast '{}'", message);
        let toast = self
            .locator(&selectors::has_text(selectors::TOAST, message))
            .await
            .last();
        expect(toast)
            .with_timeout(self.assertion_timeout)
            .to_be_visible()
            .await?;
        Ok(())
    }

    /// Waits until the element is hidden or detached.
    pub async fn wait_hidden(&self, locator: Locator) -> Result<()> {
        expect(locator)
            .with_timeout(self.assertion_timeout)
            .to_be_hidden()
            .await?;
        Ok(())
    }

    /// Waits until the element is visible.
    pub async fn wait_visible(&self, locator: Locator) -> Result<()> {
        expect(locator)
            .with_timeout(self.assertion_timeout)
            .to_be_visible()
            .await?;
        Ok(())
    }

    /// Reads the system clipboard through the page.
    ///
    /// Chromium needs the `clipboard-read` permission on the context, which
    /// `BrowserSession` grants.
    pub async fn get_clipboard_text(&self) -> Result<String> {
        let text: String = self
            .page
            .evaluate::<(), String>("() => navigator.clipboard.readText()", None)
            .await?;
        Ok(text)
    }

    /// Runs a UI action and waits for the data API request it triggers.
    pub async fn wait_for_request<F, Fut>(
        &self,
        matcher: &RequestMatcher,
        action: F,
    ) -> Result<ObservedRequest>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<()>>,
    {
        let observed = self.network.wait_for(matcher, action).await?;
        tracing::debug!("UI action triggered {} {}", observed.method, observed.url);
        Ok(observed)
    }
}

/// Reads an element's text with icon glyph names removed.
///
/// Material icons render their ligature name ("refresh", "content_copy")
/// as text content, which would otherwise pollute menu labels.
pub async fn text_excluding_icons(locator: &Locator) -> Result<String> {
    let text = locator.text_content().await?.unwrap_or_default();

    let icons = locator.locator(selectors::ICON_GLYPH);
    let mut icon_texts = Vec::new();
    for i in 0..icons.count().await? {
        if let Some(icon_text) = icons.nth(i as i32).text_content().await? {
            icon_texts.push(icon_text);
        }
    }

    Ok(strip_icon_text(&text, &icon_texts))
}

/// Removes the first occurrence of each icon text, then trims.
pub(crate) fn strip_icon_text(text: &str, icon_texts: &[String]) -> String {
    let mut remaining = text.to_string();
    for icon in icon_texts.iter().filter(|icon| !icon.is_empty()) {
        if let Some(pos) = remaining.find(icon.as_str()) {
            remaining.replace_range(pos..pos + icon.len(), "");
        }
    }
    remaining.trim().to_string()
}
