// LinkRecordPage - modal listing records that can be linked to a relation field

use crate::error::Result;
use crate::pages::BasePage;
use crate::selectors;
use playwright_rs::Locator;

#[derive(Clone)]
pub struct LinkRecordPage {
    base: BasePage,
}

impl LinkRecordPage {
    pub fn new(base: BasePage) -> Self {
        Self { base }
    }

    pub async fn get(&self) -> Locator {
        self.base.locator(selectors::LINK_RECORD_MODAL).await
    }

    /// Clicks the first record card whose text contains `title` and waits
    /// for the modal to close.
    pub async fn select(&self, title: &str) -> Result<()> {
        tracing::debug!("Linking record '{}'", title);
        let modal = self.get().await;
        self.base.wait_visible(modal.clone()).await?;
        modal
            .locator(&selectors::has_text(selectors::CHILD_CARD, title))
            .first()
            .click(None)
            .await?;
        self.base.wait_hidden(modal).await
    }
}
