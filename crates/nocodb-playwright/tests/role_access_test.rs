// Integration tests for ExpandedFormPage::verify_role_access
//
// The stand-in dashboard renders the form for the role named in its path,
// so each role gets its own view of the same record.

mod common;

use nocodb_playwright::{BrowserSession, Error, Role};
use test_server::TestServer;

async fn open_row_as(session: &BrowserSession, role: &str, row_id: &str) {
    open_row_at(session, &TestServer::table_path(role), row_id).await;
}

async fn open_row_at(session: &BrowserSession, path: &str, row_id: &str) {
    session
        .goto(path)
        .await
        .expect("Failed to open table view");
    let form = session.expanded_form().await;
    form.goto_using_url_and_row_id(row_id)
        .await
        .expect("Failed to open expanded form");
    form.verify("Country: Afghanistan", Some("rowId=1"))
        .await
        .expect("Expanded form should be open");
}

#[tokio::test]
async fn test_role_access_for_each_role() {
    common::init_tracing();
    let server = TestServer::start().await;
    let session = common::launch_session(&server.url()).await;

    for role in ["owner", "creator", "editor", "commenter", "viewer", "guest"] {
        open_row_as(&session, role, "1").await;
        let form = session.expanded_form().await;

        form.verify_role_access(role)
            .await
            .unwrap_or_else(|e| panic!("Role '{}' should see its affordances: {}", role, e));

        form.escape().await.expect("Failed to close drawer");
    }

    session.close().await.expect("Failed to close session");
    server.shutdown();
}

#[tokio::test]
async fn test_role_names_are_case_insensitive() {
    common::init_tracing();
    let server = TestServer::start().await;
    let session = common::launch_session(&server.url()).await;

    open_row_as(&session, "editor", "1").await;
    let form = session.expanded_form().await;
    form.verify_role_access("Editor")
        .await
        .expect("Capitalised role name should be accepted");

    session.close().await.expect("Failed to close session");
    server.shutdown();
}

#[tokio::test]
async fn test_viewer_is_not_an_editor() {
    common::init_tracing();
    let server = TestServer::start().await;
    let session = common::launch_session(&server.url()).await;

    open_row_as(&session, "viewer", "1").await;
    let form = session.expanded_form().await;

    assert_eq!(form.is_disabled_duplicate_row().await.unwrap(), 0);
    assert_eq!(form.is_disabled_delete_row().await.unwrap(), 0);

    let result = form.verify_role_access(Role::Owner).await;
    match result {
        Err(Error::AssertionFailed(message)) => {
            assert!(message.contains("menu items"), "unexpected message: {}", message);
        }
        other => panic!("Expected AssertionFailed, got {:?}", other),
    }

    session.close().await.expect("Failed to close session");
    server.shutdown();
}

async fn expect_role_mismatch(quirk: &str, role: &str, expected_message: &str) {
    common::init_tracing();
    let server = TestServer::start().await;
    let session = common::launch_session(&server.url()).await;

    open_row_at(&session, &TestServer::quirky_table_path(role, quirk), "1").await;
    let form = session.expanded_form().await;

    match form.verify_role_access(role).await {
        Err(Error::AssertionFailed(message)) => {
            assert!(
                message.contains(expected_message),
                "unexpected message: {}",
                message
            );
        }
        other => panic!("Expected AssertionFailed, got {:?}", other),
    }

    session.close().await.expect("Failed to close session");
    server.shutdown();
}

#[tokio::test]
async fn test_enabled_save_for_viewer_fails() {
    expect_role_mismatch("save-enabled", "viewer", "save button").await;
}

#[tokio::test]
async fn test_comments_toggle_for_commenter_fails() {
    expect_role_mismatch("comments-toggle", "commenter", "comments toggle").await;
}

#[tokio::test]
async fn test_extra_menu_item_fails() {
    expect_role_mismatch("extra-menu-item", "owner", "menu items").await;
}

#[tokio::test]
async fn test_owner_sees_row_actions() {
    common::init_tracing();
    let server = TestServer::start().await;
    let session = common::launch_session(&server.url()).await;

    open_row_as(&session, "owner", "1").await;
    let form = session.expanded_form().await;

    assert_eq!(form.is_disabled_duplicate_row().await.unwrap(), 1);
    assert_eq!(form.is_disabled_delete_row().await.unwrap(), 1);
    assert!(form.save_button().is_enabled().await.unwrap());

    session.close().await.expect("Failed to close session");
    server.shutdown();
}
