// Role - Workspace/base roles and the UI affordances each one unlocks
//
// NocoDB gates editing on three privileged roles. Everything else is
// read-only and gets neither the row actions nor the comments toggle in the
// expanded form.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Overflow menu of the expanded form for roles that may edit records.
pub const EDITOR_MENU_ITEMS: [&str; 4] = ["Reload", "Duplicate row", "Delete row", "Close"];

/// Overflow menu of the expanded form for read-only roles.
pub const READ_ONLY_MENU_ITEMS: [&str; 2] = ["Reload", "Close"];

/// A user role as named by the application.
///
/// Parsing is case-insensitive and never fails: names outside the known
/// set become [`Role::Other`] and are treated as having no privileges.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Owner,
    Creator,
    Editor,
    Commenter,
    Viewer,
    Other(String),
}

impl Role {
    /// Owner, creator and editor may modify records.
    pub fn can_edit(&self) -> bool {
        matches!(self, Role::Owner | Role::Creator | Role::Editor)
    }

    /// Whether the comments toggle is rendered in the expanded form.
    /// Only editing roles get it.
    pub fn shows_comments_toggle(&self) -> bool {
        self.can_edit()
    }

    /// Overflow menu labels, in display order.
    pub fn expected_menu_items(&self) -> &'static [&'static str] {
        if self.can_edit() {
            &EDITOR_MENU_ITEMS
        } else {
            &READ_ONLY_MENU_ITEMS
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Role::Owner => "owner",
            Role::Creator => "creator",
            Role::Editor => "editor",
            Role::Commenter => "commenter",
            Role::Viewer => "viewer",
            Role::Other(name) => name,
        }
    }
}

impl From<&str> for Role {
    fn from(name: &str) -> Self {
        let lowered = name.trim().to_lowercase();
        match lowered.as_str() {
            "owner" => Role::Owner,
            "creator" => Role::Creator,
            "editor" => Role::Editor,
            "commenter" => Role::Commenter,
            "viewer" => Role::Viewer,
            _ => Role::Other(lowered),
        }
    }
}

impl From<String> for Role {
    fn from(name: String) -> Self {
        Role::from(name.as_str())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl FromStr for Role {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Role::from(s))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
