// Selectors - CSS/text selectors mirrored from the NocoDB UI
//
// Every selector the page objects use lives here so a DOM change in the
// application under test is a one-line fix.
//
// Selectors compose with Playwright's `>>` chaining: page objects build a
// root locator and narrow it with `Locator::locator()`.

/// Root of the dashboard. Every scoped locator starts here.
pub const DASHBOARD_ROOT: &str = "html";

/// Full-page loader shown while the dashboard fetches data.
pub const DASHBOARD_LOADER: &str = r#"[data-testid="nc-loading"]"#;

/// Spinner shown over the grid while rows reload.
pub const GRID_LOAD_SPINNER: &str = r#"[data-testid="grid-load-spinner"]"#;

/// The expanded form drawer.
pub const EXPANDED_FORM: &str = ".nc-drawer-expanded-form";

/// Drawer content panes; one per open expanded form.
pub const EXPANDED_FORM_CONTENT: &str = ".nc-drawer-expanded-form .ant-drawer-content";

pub const EXPANDED_FORM_HEADER: &str = ".nc-expanded-form-header";

pub const ADD_NEW_TABLE: &str = ".nc-add-new-table";
pub const DUPLICATE_ROW_BUTTON: &str = ".nc-duplicate-row:visible";
pub const DELETE_ROW_BUTTON: &str = ".nc-delete-row:visible";
pub const COPY_ROW_URL_BUTTON: &str = ".nc-copy-row-url:visible";
pub const TOGGLE_COMMENTS_BUTTON: &str = ".nc-toggle-comments:visible";
pub const SAVE_BUTTON: &str = "button.nc-expand-form-save-btn";
pub const MORE_ACTIONS_BUTTON: &str = ".nc-expand-form-more-actions";

/// Trigger of the drawer's overflow ("3 dots") menu.
pub const THREE_DOTS_TRIGGER: &str = ".nc-icon-transition.ant-dropdown-trigger";

/// Open dropdown overlay; rendered at the page level, outside the drawer.
pub const VISIBLE_DROPDOWN: &str = ".ant-dropdown:visible";
pub const DROPDOWN_MENU_ITEM: &str = ".ant-dropdown-menu-item";

/// Icon glyphs render their name as text; stripped when reading menu labels.
pub const ICON_GLYPH: &str = ".material-symbols";

pub const CONFIRM_OK_BUTTON: &str = r#".ant-btn-primary:has-text("OK")"#;

pub const TOAST: &str = ".ant-message .ant-message-notice-content";

pub const FIELD_INPUT: &str = "input";
pub const FIELD_CELL: &str = ".nc-cell";
pub const FIELD_ACTION_ICON: &str = ".nc-action-icon";
pub const CHILD_CARD: &str = ".ant-card";

pub const CHILD_LIST_LINK_TO: &str = r#"[data-testid="nc-child-list-button-link-to"]"#;

pub const GEO_SET_LOCATION_BUTTON: &str = r#"[data-testid="nc-geo-data-set-location-button"]"#;
pub const GEO_LATITUDE: &str = r#"[data-testid="nc-geo-data-latitude"]"#;
pub const GEO_LONGITUDE: &str = r#"[data-testid="nc-geo-data-longitude"]"#;
pub const GEO_SAVE: &str = r#"[data-testid="nc-geo-data-save"]"#;

pub const LINK_RECORD_MODAL: &str = ".nc-modal-link-record";

pub const VISIBLE_PICKER_DROPDOWN: &str = ".ant-picker-dropdown:visible";
pub const PICKER_TIME_COLUMN: &str = ".ant-picker-time-panel-column";
pub const PICKER_TIME_CELL: &str = ".ant-picker-time-panel-cell";
pub const PICKER_OK_BUTTON: &str = ".ant-picker-ok button";

/// Escapes a value for use inside a double-quoted selector string.
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' | '\\' => {
                out.push('\\');
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}

/// `base:has-text("text")`: case-insensitive substring match on rendered text.
pub fn has_text(base: &str, text: &str) -> String {
    format!("{}:has-text({})", base, quote(text))
}

/// `[data-testid="id"]`
pub fn test_id(id: &str) -> String {
    format!("[data-testid={}]", quote(id))
}

/// Field wrapper for a column inside the expanded form.
pub fn expanded_column(column_title: &str) -> String {
    test_id(&format!("nc-expand-col-{}", column_title))
}

/// Date cell of the picker calendar (`title` is `YYYY-MM-DD`).
pub fn picker_date_cell(date: &str) -> String {
    format!("td[title={}]", quote(date))
}

/// Cell with the given two-digit label in the n-th (1-based) time column.
pub fn picker_time_cell(column: usize, value: u8) -> String {
    format!(
        "{}:nth-child({}) {}",
        PICKER_TIME_COLUMN,
        column,
        has_text(PICKER_TIME_CELL, &format!("{:02}", value))
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_escapes_quotes_and_backslashes() {
        assert_eq!(quote("Title"), r#""Title""#);
        assert_eq!(quote(r#"say "hi""#), r#""say \"hi\"""#);
        assert_eq!(quote(r"a\b"), r#""a\\b""#);
    }

    #[test]
    fn test_has_text() {
        assert_eq!(
            has_text(DROPDOWN_MENU_ITEM, "Duplicate Row"),
            r#".ant-dropdown-menu-item:has-text("Duplicate Row")"#
        );
    }

    #[test]
    fn test_expanded_column() {
        assert_eq!(
            expanded_column("Country"),
            r#"[data-testid="nc-expand-col-Country"]"#
        );
        assert_eq!(
            expanded_column(r#"My "col""#),
            r#"[data-testid="nc-expand-col-My \"col\""]"#
        );
    }

    #[test]
    fn test_overlay_selectors_only_match_open_overlays() {
        assert_eq!(VISIBLE_DROPDOWN, ".ant-dropdown:visible");
        assert_eq!(VISIBLE_PICKER_DROPDOWN, ".ant-picker-dropdown:visible");
    }

    #[test]
    fn test_picker_cells() {
        assert_eq!(picker_date_cell("2024-03-09"), r#"td[title="2024-03-09"]"#);
        assert_eq!(
            picker_time_cell(2, 5),
            r#".ant-picker-time-panel-column:nth-child(2) .ant-picker-time-panel-cell:has-text("05")"#
        );
    }
}
