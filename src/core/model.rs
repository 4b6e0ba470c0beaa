//! Domain values exchanged with the Pages service.
//!
//! These are plain immutable values. The core never inspects the identity
//! fields of a [`Session`] beyond its bearer token, and pages are keyed by
//! their identifier alone.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a page, stable across updates.
pub type PageId = String;

/// Account identity returned by the server alongside a session token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

/// An authenticated principal.
///
/// Created only from a successful register or connect call. A session is
/// never mutated; switching sessions means deactivating and activating again.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque bearer token attached to authenticated calls.
    pub token: String,
    /// Identity fields as returned by the server.
    #[serde(default)]
    pub account: Option<Account>,
}

impl Session {
    /// Session carrying only a bearer token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            account: None,
        }
    }
}

/// A single user document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub id: PageId,
    /// Owning account, assigned by the server.
    #[serde(default)]
    pub account_id: String,
    pub text: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl Page {
    /// Page with the given id and text, stamped with the current time.
    pub fn new(id: impl Into<PageId>, text: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            account_id: String::new(),
            text: text.into(),
            created: now,
            modified: now,
        }
    }
}

impl std::fmt::Display for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Page-list response.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagesSet {
    pub pages: Vec<Page>,
    pub total: i64,
    pub page: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_displays_its_text() {
        let page = Page::new("a", "hello there");
        assert_eq!(page.to_string(), "hello there");
    }

    #[test]
    fn session_without_account_deserializes() {
        let session: Session = serde_json::from_str(r#"{"token":"t1"}"#).unwrap();
        assert_eq!(session, Session::new("t1"));
    }

    #[test]
    fn new_page_has_matching_timestamps() {
        let page = Page::new("a", "hi");
        assert_eq!(page.created, page.modified);
        assert!(page.account_id.is_empty());
    }
}
