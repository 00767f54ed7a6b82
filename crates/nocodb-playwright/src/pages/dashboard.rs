// DashboardPage - scoped root for everything inside the NocoDB dashboard

use crate::error::Result;
use crate::pages::{BasePage, DateTimeCellPage, LinkRecordPage};
use crate::selectors;
use playwright_rs::{Locator, Page};

/// The dashboard shell: supplies the root locator that page objects for
/// individual surfaces narrow down from.
#[derive(Clone)]
pub struct DashboardPage {
    base: BasePage,
    root: Locator,
}

impl DashboardPage {
    pub async fn new(base: BasePage) -> Self {
        let root = base.locator(selectors::DASHBOARD_ROOT).await;
        Self { base, root }
    }

    /// Root locator of the dashboard
    pub fn get(&self) -> Locator {
        self.root.clone()
    }

    pub fn base(&self) -> &BasePage {
        &self.base
    }

    pub fn page(&self) -> &Page {
        self.base.page()
    }

    /// Waits for the full-page loader to go away.
    pub async fn wait_for_loader_to_disappear(&self) -> Result<()> {
        tracing::debug!("Waiting for dashboard loader to disappear");
        let loader = self.base.locator(selectors::DASHBOARD_LOADER).await;
        self.base.wait_hidden(loader).await
    }

    /// The link-record modal opened from relation fields
    pub fn link_record(&self) -> LinkRecordPage {
        LinkRecordPage::new(self.base.clone())
    }

    /// The date-time picker opened from date-time cells
    pub fn date_time_cell(&self) -> DateTimeCellPage {
        DateTimeCellPage::new(self.base.clone())
    }
}
