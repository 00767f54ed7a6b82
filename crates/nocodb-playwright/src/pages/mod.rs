// Page objects for the NocoDB dashboard
//
// Composition mirrors the UI: a BasePage holds the browser page, the
// DashboardPage supplies the scoped root locator, and surface-specific page
// objects narrow that root further.

pub mod base;
pub mod dashboard;
pub mod date_time_cell;
pub mod expanded_form;
pub mod link_record;

pub use base::BasePage;
pub use dashboard::DashboardPage;
pub use date_time_cell::DateTimeCellPage;
pub use expanded_form::{ExpandedFormPage, SaveOptions};
pub use link_record::LinkRecordPage;
