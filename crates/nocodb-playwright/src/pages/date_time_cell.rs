// DateTimeCellPage - the date/time picker dropdown of date-time cells
//
// The picker renders as a page-level overlay, so every locator starts from
// the visible `.ant-picker-dropdown` rather than from the cell.

use crate::error::Result;
use crate::pages::BasePage;
use crate::selectors;
use playwright_rs::Locator;

#[derive(Clone)]
pub struct DateTimeCellPage {
    base: BasePage,
}

impl DateTimeCellPage {
    pub fn new(base: BasePage) -> Self {
        Self { base }
    }

    /// The open picker dropdown
    pub async fn get(&self) -> Locator {
        self.base
            .locator(selectors::VISIBLE_PICKER_DROPDOWN)
            .await
            .last()
    }

    /// Picks a calendar day; `date` is `YYYY-MM-DD`.
    pub async fn select_date(&self, date: &str) -> Result<()> {
        tracing::debug!("Selecting date {}", date);
        let picker = self.get().await;
        self.base.wait_visible(picker.clone()).await?;
        picker
            .locator(&selectors::picker_date_cell(date))
            .click(None)
            .await?;
        Ok(())
    }

    /// Picks hour and minute in the time panel columns.
    pub async fn select_time(&self, hour: u8, minute: u8) -> Result<()> {
        tracing::debug!("Selecting time {:02}:{:02}", hour, minute);
        let picker = self.get().await;
        picker
            .locator(&selectors::picker_time_cell(1, hour))
            .click(None)
            .await?;
        picker
            .locator(&selectors::picker_time_cell(2, minute))
            .click(None)
            .await?;
        Ok(())
    }

    /// Confirms the selection and waits for the picker to close.
    pub async fn save(&self) -> Result<()> {
        let picker = self.get().await;
        picker
            .locator(selectors::PICKER_OK_BUTTON)
            .click(None)
            .await?;
        let open_pickers = self.base.locator(selectors::VISIBLE_PICKER_DROPDOWN).await;
        self.base.wait_hidden(open_pickers.last()).await
    }
}
