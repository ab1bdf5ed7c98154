//! Comments embedded in a recipe document.
//!
//! A comment's like count is never stored separately: it is always the
//! length of the `liked_by` set, so the two cannot drift apart.

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Identifier assigned to a comment at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommentId(Uuid);

impl CommentId {
    /// Generate a fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identifier from its string form.
    pub fn parse(value: impl AsRef<str>) -> Result<Self, uuid::Error> {
        Uuid::parse_str(value.as_ref()).map(Self)
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Normalise a caller-supplied identity string for comparisons.
///
/// Identities are email-like strings supplied by the client; matching is
/// case-insensitive and ignores surrounding whitespace.
pub fn normalise_identity(value: &str) -> String {
    value.trim().to_lowercase()
}

/// A user-attributed text entry on a recipe.
///
/// ## Invariants
/// - `likes() == liked_by().len()` at all times.
/// - `liked_by` holds normalised identities with no duplicates.
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    id: CommentId,
    author: String,
    text: String,
    posted_at: DateTime<Utc>,
    liked_by: Vec<String>,
}

impl Comment {
    /// Create a new comment with a fresh id, no likes, and `posted_at = now`.
    pub fn new(author: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: CommentId::random(),
            author: author.into(),
            text: text.into(),
            posted_at: Utc::now(),
            liked_by: Vec::new(),
        }
    }

    /// Identifier assigned at creation.
    pub fn id(&self) -> CommentId {
        self.id
    }

    /// Display name of the comment's author.
    pub fn author(&self) -> &str {
        self.author.as_str()
    }

    /// Comment body.
    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    /// Creation timestamp.
    pub fn posted_at(&self) -> DateTime<Utc> {
        self.posted_at
    }

    /// Number of distinct users who like this comment.
    pub fn likes(&self) -> usize {
        self.liked_by.len()
    }

    /// Whether the given identity currently likes this comment.
    pub fn liked_by(&self, identity: &str) -> bool {
        let identity = normalise_identity(identity);
        self.liked_by.iter().any(|entry| *entry == identity)
    }

    /// Toggle the given identity's like. Returns `true` when the identity
    /// likes the comment after the call.
    pub fn toggle_like(&mut self, identity: &str) -> bool {
        let identity = normalise_identity(identity);
        if let Some(position) = self.liked_by.iter().position(|entry| *entry == identity) {
            self.liked_by.remove(position);
            false
        } else {
            self.liked_by.push(identity);
            true
        }
    }

    /// Ownership check for delete authorisation: the requester identity
    /// must equal the author, case-insensitively and ignoring whitespace.
    pub fn is_owned_by(&self, requester: &str) -> bool {
        normalise_identity(&self.author) == normalise_identity(requester)
    }
}
