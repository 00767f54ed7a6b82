//! nocodb-playwright: page objects for NocoDB's expanded record form
//!
//! Drives the "expanded form" drawer of a NocoDB grid through
//! [`playwright_rs`]: filling fields by column type, saving, the overflow
//! menu, share URLs and role-based affordance checks.
//!
//! # Examples
//!
//! ## Edit and save a record
//!
//! ```ignore
//! use nocodb_playwright::{BrowserSession, E2eConfig, FieldInput, SaveOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let session = BrowserSession::launch(E2eConfig::from_env()?).await?;
//!     session.goto("/#/nc/p_sakila/md_country").await?;
//!
//!     let form = session.expanded_form().await;
//!     form.goto_using_url_and_row_id("1").await?;
//!     form.fill_field("Country", &FieldInput::text("Afghanistan (updated)")).await?;
//!     form.save(SaveOptions::default()).await?;
//!
//!     session.close().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Verify what a role can do
//!
//! ```ignore
//! use nocodb_playwright::{BrowserSession, E2eConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let session = BrowserSession::launch(E2eConfig::from_env()?).await?;
//!     let form = session.expanded_form().await;
//!     form.goto_using_url_and_row_id("1").await?;
//!
//!     // Viewers get a read-only menu, a disabled save button and no comments
//!     form.verify_role_access("Viewer").await?;
//!
//!     session.close().await?;
//!     Ok(())
//! }
//! ```

pub mod config;
mod error;
pub mod expectations;
pub mod field;
pub mod network;
pub mod pages;
pub mod role;
pub mod selectors;
mod session;

// Re-export error types
pub use error::{Error, Result};

// Re-export configuration
pub use config::{BrowserKind, E2eConfig};

// Re-export session and page objects
pub use pages::{
    BasePage, DashboardPage, DateTimeCellPage, ExpandedFormPage, LinkRecordPage, SaveOptions,
};
pub use session::BrowserSession;

// Re-export field and role types
pub use field::{DateTimeInput, FieldInput, GeoPoint};
pub use role::Role;

// Re-export network gate types
pub use network::{NetworkGate, ObservedRequest, RequestMatcher};

// Re-export polling assertions
pub use expectations::{expect_count, expect_poll};
