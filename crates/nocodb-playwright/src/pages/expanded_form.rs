// ExpandedFormPage - the record drawer opened from a grid row
//
// Wraps the `.nc-drawer-expanded-form` drawer: filling fields by column
// type, saving, the overflow menu (duplicate/delete/close), share URLs and
// the per-role affordance checks.
//
// Overlays (dropdown menus, pickers, confirm dialogs, toasts) render at the
// page level, so they are located from the page rather than the drawer.

use crate::config::DATA_API_PATH;
use crate::error::{Error, Result};
use crate::expectations::{expect_count, expect_poll};
use crate::field::FieldInput;
use crate::network::RequestMatcher;
use crate::pages::base::text_excluding_icons;
use crate::pages::{BasePage, DashboardPage};
use crate::role::Role;
use crate::selectors;
use playwright_rs::{Locator, Page, expect};
use url::Url;

pub const MENU_DUPLICATE_ROW: &str = "Duplicate Row";
pub const MENU_DELETE_ROW: &str = "Delete Row";
pub const MENU_CLOSE: &str = "Close";

pub const TOAST_COPIED: &str = "Copied to clipboard";
pub const TOAST_UPDATED: &str = "updated successfully.";

/// Options for [`ExpandedFormPage::save`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOptions {
    /// Gate the save on the grid's listing refresh (`GET`). When `false`,
    /// gate on the record creation request (`POST`) instead.
    pub wait_for_rows_data: bool,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            wait_for_rows_data: true,
        }
    }
}

impl SaveOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn wait_for_rows_data(mut self, enabled: bool) -> Self {
        self.wait_for_rows_data = enabled;
        self
    }

    fn request_matcher(&self) -> RequestMatcher {
        let method = if self.wait_for_rows_data { "GET" } else { "POST" };
        RequestMatcher::new(DATA_API_PATH).method(method)
    }
}

/// Page object for the expanded form drawer.
#[derive(Clone)]
pub struct ExpandedFormPage {
    dashboard: DashboardPage,
    add_new_table_button: Locator,
    duplicate_row_button: Locator,
    delete_row_button: Locator,
    copy_url_button: Locator,
    save_button: Locator,
    toggle_comments_button: Locator,
    more_actions_button: Locator,
}

impl ExpandedFormPage {
    pub fn new(dashboard: &DashboardPage) -> Self {
        let root = dashboard.get();
        Self {
            dashboard: dashboard.clone(),
            add_new_table_button: root.locator(selectors::ADD_NEW_TABLE),
            duplicate_row_button: root.locator(selectors::DUPLICATE_ROW_BUTTON),
            delete_row_button: root.locator(selectors::DELETE_ROW_BUTTON),
            copy_url_button: root.locator(selectors::COPY_ROW_URL_BUTTON),
            save_button: root.locator(selectors::SAVE_BUTTON),
            toggle_comments_button: root.locator(selectors::TOGGLE_COMMENTS_BUTTON),
            more_actions_button: root.locator(selectors::MORE_ACTIONS_BUTTON),
        }
    }

    /// The drawer itself
    pub fn get(&self) -> Locator {
        self.dashboard.get().locator(selectors::EXPANDED_FORM)
    }

    fn base(&self) -> &BasePage {
        self.dashboard.base()
    }

    fn page(&self) -> &Page {
        self.dashboard.page()
    }

    pub fn add_new_table_button(&self) -> &Locator {
        &self.add_new_table_button
    }

    pub fn save_button(&self) -> &Locator {
        &self.save_button
    }

    /// Opens the drawer's overflow menu and clicks the item containing `menu_item`.
    pub async fn click_3dots_menu(&self, menu_item: &str) -> Result<()> {
        tracing::debug!("Expanded form menu: {}", menu_item);
        self.get()
            .locator(selectors::THREE_DOTS_TRIGGER)
            .last()
            .click(None)
            .await?;

        let menu = self.open_dropdown().await?;
        menu.locator(&selectors::has_text(
            selectors::DROPDOWN_MENU_ITEM,
            menu_item,
        ))
        .click(None)
        .await?;
        Ok(())
    }

    /// Waits for the most recently opened dropdown to become visible.
    async fn open_dropdown(&self) -> Result<Locator> {
        let menu = self
            .base()
            .locator(selectors::VISIBLE_DROPDOWN)
            .await
            .last();
        self.base().wait_visible(menu.clone()).await?;
        Ok(menu)
    }

    /// Duplicates the record: waits for the insert request, then for the
    /// dashboard loader to go away.
    pub async fn click_duplicate_row(&self) -> Result<()> {
        let matcher = RequestMatcher::new(DATA_API_PATH).method("POST");
        self.base()
            .wait_for_request(&matcher, || self.click_3dots_menu(MENU_DUPLICATE_ROW))
            .await
            .map_err(|e| e.context("duplicate row"))?;
        self.dashboard.wait_for_loader_to_disappear().await
    }

    /// Deletes the record, confirming the dialog.
    pub async fn click_delete_row(&self) -> Result<()> {
        self.click_3dots_menu(MENU_DELETE_ROW).await?;
        self.base()
            .locator(selectors::CONFIRM_OK_BUTTON)
            .await
            .click(None)
            .await?;
        Ok(())
    }

    /// Number of visible "duplicate row" buttons; 0 when the action is unavailable.
    pub async fn is_disabled_duplicate_row(&self) -> Result<usize> {
        Ok(self.duplicate_row_button.count().await?)
    }

    /// Number of visible "delete row" buttons; 0 when the action is unavailable.
    pub async fn is_disabled_delete_row(&self) -> Result<usize> {
        Ok(self.delete_row_button.count().await?)
    }

    /// Copies the record's share URL and returns it from the clipboard.
    pub async fn get_share_row_url(&self) -> Result<String> {
        self.copy_url_button.click(None).await?;
        self.base().verify_toast(TOAST_COPIED).await?;
        self.base().get_clipboard_text().await
    }

    /// Opens the expanded form for `row_id` by URL on the current view.
    pub async fn goto_using_url_and_row_id(&self, row_id: &str) -> Result<()> {
        let url = expanded_form_url(&self.page().url(), row_id)?;
        tracing::debug!("Opening expanded form via {}", url);
        self.page().goto(&url, None).await?;
        self.dashboard.wait_for_loader_to_disappear().await
    }

    /// Fills the field of `column_title` using the widget for the input's type.
    pub async fn fill_field(&self, column_title: &str, input: &FieldInput) -> Result<()> {
        tracing::debug!(
            "Filling {} field '{}'",
            input.type_name(),
            column_title
        );
        let field = self.get().locator(&selectors::expanded_column(column_title));
        field.hover(None).await?;

        match input {
            FieldInput::Text(value) => {
                field.locator(selectors::FIELD_INPUT).fill(value, None).await?;
            }
            FieldInput::GeoData(point) => {
                let base = self.base();
                base.locator(selectors::GEO_SET_LOCATION_BUTTON)
                    .await
                    .click(None)
                    .await?;
                base.locator(selectors::GEO_LATITUDE)
                    .await
                    .fill(&point.latitude, None)
                    .await?;
                base.locator(selectors::GEO_LONGITUDE)
                    .await
                    .fill(&point.longitude, None)
                    .await?;
                base.locator(selectors::GEO_SAVE).await.click(None).await?;
            }
            FieldInput::BelongsTo(title) => {
                field
                    .locator(selectors::FIELD_ACTION_ICON)
                    .click(None)
                    .await?;
                self.dashboard.link_record().select(title).await?;
            }
            FieldInput::HasMany(title) | FieldInput::ManyToMany(title) => {
                field
                    .locator(selectors::CHILD_LIST_LINK_TO)
                    .click(None)
                    .await?;
                self.dashboard.link_record().select(title).await?;
            }
            FieldInput::DateTime(value) => {
                field.locator(selectors::FIELD_CELL).click(None).await?;
                let picker = self.dashboard.date_time_cell();
                picker.select_date(&value.date).await?;
                picker.select_time(value.hour, value.minute).await?;
                picker.save().await?;
            }
        }
        Ok(())
    }

    /// String-typed variant of [`fill_field`](Self::fill_field).
    ///
    /// `field_type` is one of `text`, `geodata`, `belongsTo`, `hasMany`,
    /// `manyToMany`, `dateTime`.
    pub async fn fill_field_as(
        &self,
        column_title: &str,
        field_type: &str,
        value: &str,
    ) -> Result<()> {
        let input = FieldInput::parse(field_type, value)?;
        self.fill_field(column_title, &input).await
    }

    /// Saves the record and waits for the drawer to close and the success toast.
    ///
    /// The save is gated on the data API *request* being sent (`GET` listing
    /// or `POST` insert, see [`SaveOptions`]), not on its response:
    /// `playwright-rs` has no response event, so the response body
    /// (`pageInfo`) is never inspected. The success toast, which the app only
    /// shows once the response is applied, stands in for that check.
    pub async fn save(&self, options: SaveOptions) -> Result<()> {
        let matcher = options.request_matcher();
        tracing::debug!("Saving expanded form, waiting for {}", matcher);

        let save_button = self.get().locator(selectors::SAVE_BUTTON);
        self.base()
            .wait_for_request(&matcher, move || async move {
                save_button.click(None).await?;
                Ok(())
            })
            .await
            .map_err(|e| e.context("save expanded form"))?;

        self.get().press("Escape", None).await?;
        self.base().wait_hidden(self.get()).await?;
        self.base().verify_toast(TOAST_UPDATED).await?;

        let spinner = self.base().locator(selectors::GRID_LOAD_SPINNER).await;
        self.base().wait_hidden(spinner).await
    }

    /// Asserts the drawer header, and optionally that the page URL contains `url`.
    pub async fn verify(&self, header: &str, url: Option<&str>) -> Result<()> {
        let header_locator = self.get().locator(selectors::EXPANDED_FORM_HEADER).last();
        expect(header_locator)
            .with_timeout(self.base().assertion_timeout())
            .to_contain_text(header)
            .await?;

        if let Some(url) = url {
            let page = self.page().clone();
            expect_poll("page URL", move || {
                let page = page.clone();
                async move { Ok(page.url()) }
            })
            .with_timeout(self.base().assertion_timeout())
            .to_contain(url)
            .await?;
        }
        Ok(())
    }

    /// Closes the drawer with the keyboard.
    pub async fn escape(&self) -> Result<()> {
        self.page().keyboard().press("Escape", None).await?;
        self.base().wait_hidden(self.get()).await
    }

    /// Closes the drawer through the overflow menu.
    pub async fn close(&self) -> Result<()> {
        self.click_3dots_menu(MENU_CLOSE).await
    }

    /// Opens a linked child record's card inside a relation field.
    pub async fn open_child_card(&self, column: &str, title: &str) -> Result<()> {
        self.get()
            .locator(&selectors::expanded_column(column))
            .locator(&selectors::has_text(selectors::CHILD_CARD, title))
            .click(None)
            .await?;
        Ok(())
    }

    /// Asserts how many expanded forms are stacked open.
    pub async fn verify_count(&self, count: usize) -> Result<()> {
        let drawers = self.base().locator(selectors::EXPANDED_FORM_CONTENT).await;
        expect_count(drawers)
            .with_timeout(self.base().assertion_timeout())
            .to_equal(count)
            .await
    }

    /// Asserts the affordances `role` should see, then closes the drawer.
    ///
    /// Checks the overflow menu items (text and order), whether save is
    /// enabled, and whether the comments toggle is rendered. Owner, editor
    /// and creator get the full menu, an enabled save button and the toggle.
    /// Every other role gets `Reload`/`Close`, a disabled save button and no
    /// toggle.
    pub async fn verify_role_access(&self, role: impl Into<Role>) -> Result<()> {
        let role = role.into();
        tracing::debug!("Verifying expanded form access for role '{}'", role);

        expect_single(&self.copy_url_button, "copy row URL button").await?;
        expect_single(&self.more_actions_button, "more actions button").await?;

        self.more_actions_button.click(None).await?;
        let menu = self.open_dropdown().await?;
        let items = menu.locator(selectors::DROPDOWN_MENU_ITEM);

        let mut labels = Vec::new();
        for i in 0..items.count().await? {
            labels.push(text_excluding_icons(&items.nth(i as i32)).await?);
        }
        let expected = role.expected_menu_items();
        if labels != expected {
            return Err(Error::AssertionFailed(format!(
                "role '{}': expected menu items {:?}, found {:?}",
                role, expected, labels
            )));
        }

        let save_enabled = self.save_button.is_enabled().await?;
        if save_enabled != role.can_edit() {
            return Err(Error::AssertionFailed(format!(
                "role '{}': expected save button to be {}",
                role,
                if role.can_edit() { "enabled" } else { "disabled" }
            )));
        }

        let comment_toggles = self.toggle_comments_button.count().await?;
        let expected_toggles = usize::from(role.shows_comments_toggle());
        if comment_toggles != expected_toggles {
            return Err(Error::AssertionFailed(format!(
                "role '{}': expected {} comments toggle(s), found {}",
                role, expected_toggles, comment_toggles
            )));
        }

        self.page().keyboard().press("Escape", None).await?;
        Ok(())
    }
}

async fn expect_single(locator: &Locator, what: &str) -> Result<()> {
    let count = locator.count().await?;
    if count != 1 {
        return Err(Error::AssertionFailed(format!(
            "expected exactly one {}, found {}",
            what, count
        )));
    }
    Ok(())
}

/// Builds the URL that opens `row_id` in the expanded form of the current view.
///
/// Drops the current query string and appends `?rowId=`. Hash-routed URLs
/// keep their route: `http://h/#/nc/p/t?x=1` becomes `http://h/#/nc/p/t?rowId=7`.
pub fn expanded_form_url(current_url: &str, row_id: &str) -> Result<String> {
    let parsed = Url::parse(current_url)?;
    let origin = parsed.origin().ascii_serialization();

    let full = parsed.as_str();
    let route = full.strip_prefix(origin.as_str()).unwrap_or(parsed.path());
    let route = route.split('?').next().unwrap_or_default();
    let route = route.trim_start_matches('/');

    Ok(format!("{}/{}?rowId={}", origin, route, row_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expanded_form_url_hash_route() {
        assert_eq!(
            expanded_form_url("http://localhost:8080/#/nc/p_abc/md_xyz?view=grid", "7").unwrap(),
            "http://localhost:8080/#/nc/p_abc/md_xyz?rowId=7"
        );
    }

    #[test]
    fn test_expanded_form_url_replaces_existing_row_id() {
        assert_eq!(
            expanded_form_url("http://localhost:3000/#/nc/p/t?rowId=1", "2").unwrap(),
            "http://localhost:3000/#/nc/p/t?rowId=2"
        );
    }

    #[test]
    fn test_expanded_form_url_path_route() {
        assert_eq!(
            expanded_form_url("https://app.nocodb.test/dashboard/table?x=1#frag", "42").unwrap(),
            "https://app.nocodb.test/dashboard/table?rowId=42"
        );
        assert_eq!(
            expanded_form_url("http://127.0.0.1:5000/", "1").unwrap(),
            "http://127.0.0.1:5000/?rowId=1"
        );
    }

    #[test]
    fn test_expanded_form_url_rejects_relative() {
        assert!(matches!(
            expanded_form_url("/nc/p/t", "1"),
            Err(Error::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_save_options_pick_request_method() {
        let default = SaveOptions::default();
        assert!(default.wait_for_rows_data);
        assert_eq!(
            default.request_matcher(),
            RequestMatcher::new("api/v1/db/data/noco/").method("GET")
        );
        assert_eq!(
            SaveOptions::new().wait_for_rows_data(false).request_matcher(),
            RequestMatcher::new("api/v1/db/data/noco/").method("POST")
        );
    }
}
