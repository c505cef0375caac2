//! Plaintext credential types used by callers of the vault.
//!
//! These types only ever live in memory.  Their persisted counterpart,
//! with ciphertext-typed sensitive fields, is `format::StoredCredential`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// What kind of secret a credential holds.  Informational only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Login,
    Note,
    Card,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Note => "note",
            Self::Card => "card",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "login" => Ok(Self::Login),
            "note" => Ok(Self::Note),
            "card" => Ok(Self::Card),
            other => Err(format!(
                "unknown category '{other}' (expected login, note, or card)"
            )),
        }
    }
}

/// A decrypted credential from the in-memory working set.
///
/// Never serialized: there is deliberately no `Serialize` impl, so a
/// plaintext credential cannot end up in storage by accident.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    /// Opaque unique id, assigned by the vault and never reused.
    pub id: String,
    /// Display label, usually a hostname such as `github.com`.
    pub website: String,
    pub username: String,
    pub password: String,
    pub notes: Option<String>,
    pub category: Category,
    /// Milliseconds since the Unix epoch.
    pub created_at: i64,
    /// Milliseconds since the Unix epoch.
    pub updated_at: i64,
    /// Cosmetic icon URL.
    pub favicon: Option<String>,
}

impl Credential {
    /// Case-insensitive substring match on `website` or `username`.
    /// An empty query matches everything.
    pub fn matches_search(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.website.to_lowercase().contains(&query)
            || self.username.to_lowercase().contains(&query)
    }
}

/// Icon URL derived from a website when the caller supplies none.
pub fn default_favicon(website: &str) -> String {
    format!("https://www.google.com/s2/favicons?domain={website}&sz=32")
}

/// Input to `PasswordVault::save_credential`: a credential without the
/// fields the vault assigns (id and timestamps).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewCredential {
    pub website: String,
    pub username: String,
    pub password: String,
    pub notes: Option<String>,
    pub category: Category,
    pub favicon: Option<String>,
}

impl NewCredential {
    /// A plain website login, the shape a detected-login event delivers.
    pub fn login(
        website: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            website: website.into(),
            username: username.into(),
            password: password.into(),
            ..Self::default()
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn with_favicon(mut self, favicon: impl Into<String>) -> Self {
        self.favicon = Some(favicon.into());
        self
    }

    /// Fill in `favicon` from the website if it is unset or empty.
    pub fn with_default_favicon(mut self) -> Self {
        if self.favicon.as_deref().map_or(true, str::is_empty) {
            self.favicon = Some(default_favicon(&self.website));
        }
        self
    }
}

/// A partial update for `PasswordVault::update_credential`.
///
/// `None` leaves a field untouched.  For the optional fields,
/// `Some(None)` (or `Some(Some(""))`) clears the value.  An empty
/// `password` is ignored rather than stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialUpdate {
    pub website: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub notes: Option<Option<String>>,
    pub category: Option<Category>,
    pub favicon: Option<Option<String>>,
}

impl CredentialUpdate {
    /// Returns `true` if applying this update would change nothing but
    /// the `updated_at` timestamp.
    pub fn is_empty(&self) -> bool {
        self.website.is_none()
            && self.username.is_none()
            && self.password.as_deref().map_or(true, str::is_empty)
            && self.notes.is_none()
            && self.category.is_none()
            && self.favicon.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!("Login".parse::<Category>().unwrap(), Category::Login);
        assert_eq!("CARD".parse::<Category>().unwrap(), Category::Card);
        assert!("wallet".parse::<Category>().is_err());
    }

    #[test]
    fn category_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Category::Note).unwrap(), "\"note\"");
    }

    #[test]
    fn empty_password_update_is_empty() {
        let update = CredentialUpdate {
            password: Some(String::new()),
            ..CredentialUpdate::default()
        };
        assert!(update.is_empty());

        let update = CredentialUpdate {
            notes: Some(None),
            ..CredentialUpdate::default()
        };
        assert!(!update.is_empty());
    }

    fn sample(website: &str, username: &str) -> Credential {
        Credential {
            id: "1".into(),
            website: website.into(),
            username: username.into(),
            password: "p".into(),
            notes: None,
            category: Category::Login,
            created_at: 0,
            updated_at: 0,
            favicon: None,
        }
    }

    #[test]
    fn search_matches_website_or_username_ignoring_case() {
        let c = sample("GitHub.com", "Alice");
        assert!(c.matches_search("github"));
        assert!(c.matches_search("HUB.C"));
        assert!(c.matches_search("alice"));
        assert!(c.matches_search(""));
        assert!(!c.matches_search("gitlab"));
        // Secrets are not searched.
        assert!(!c.matches_search("p"));
    }

    #[test]
    fn default_favicon_fills_only_missing_icon() {
        let derived = NewCredential::login("github.com", "alice", "pw").with_default_favicon();
        assert_eq!(
            derived.favicon.as_deref(),
            Some("https://www.google.com/s2/favicons?domain=github.com&sz=32")
        );

        let explicit = NewCredential::login("github.com", "alice", "pw")
            .with_favicon("https://example.org/icon.png")
            .with_default_favicon();
        assert_eq!(explicit.favicon.as_deref(), Some("https://example.org/icon.png"));

        let blank = NewCredential::login("a.io", "u", "pw")
            .with_favicon("")
            .with_default_favicon();
        assert_eq!(blank.favicon, Some(default_favicon("a.io")));
    }
}
