//! User document: identity, credentials digest, and recipe references.

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::recipe::RecipeId;

/// Identifier assigned to a user document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identifier from its string form.
    pub fn parse(value: impl AsRef<str>) -> Result<Self, uuid::Error> {
        Uuid::parse_str(value.as_ref()).map(Self)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation errors for [`EmailAddress`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmailValidationError {
    #[error("email must not be empty")]
    Empty,
    #[error("email must contain a local part and a domain")]
    Malformed,
}

/// A normalised email address: trimmed and lowercased at construction, so
/// equality is case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and normalise an address.
    pub fn new(value: impl AsRef<str>) -> Result<Self, EmailValidationError> {
        let normalised = value.as_ref().trim().to_lowercase();
        if normalised.is_empty() {
            return Err(EmailValidationError::Empty);
        }
        match normalised.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {
                Ok(Self(normalised))
            }
            _ => Err(EmailValidationError::Malformed),
        }
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Partial update for a user's profile. Blank strings are normalised to
/// `None` before the patch reaches the domain.
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub profile_image_ref: Option<String>,
}

/// Public view of a user, safe to return to clients (no digest).
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    pub email: EmailAddress,
    pub profile_image_ref: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// An application user document.
///
/// ## Invariants
/// - `saved_recipe_ids` holds no duplicates.
/// - `created_recipe_ids` is append-only except for owner-gated deletes.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    id: UserId,
    name: String,
    email: EmailAddress,
    password_digest: String,
    profile_image_ref: Option<String>,
    saved_recipe_ids: Vec<RecipeId>,
    created_recipe_ids: Vec<RecipeId>,
    created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with no saved or created recipes.
    pub fn new(name: impl Into<String>, email: EmailAddress, password_digest: String) -> Self {
        Self {
            id: UserId::random(),
            name: name.into(),
            email,
            password_digest,
            profile_image_ref: None,
            saved_recipe_ids: Vec::new(),
            created_recipe_ids: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Stored password digest, only ever compared through the hasher port.
    pub fn password_digest(&self) -> &str {
        self.password_digest.as_str()
    }

    pub fn profile_image_ref(&self) -> Option<&str> {
        self.profile_image_ref.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Bookmarked recipe references, in save order.
    pub fn saved_recipe_ids(&self) -> &[RecipeId] {
        &self.saved_recipe_ids
    }

    /// References to recipes this user created, in creation order.
    pub fn created_recipe_ids(&self) -> &[RecipeId] {
        &self.created_recipe_ids
    }

    /// Whether the recipe is already bookmarked.
    pub fn has_saved(&self, recipe_id: RecipeId) -> bool {
        self.saved_recipe_ids.contains(&recipe_id)
    }

    /// Bookmark a recipe. Returns `false` when it was already present.
    pub fn save_recipe(&mut self, recipe_id: RecipeId) -> bool {
        if self.has_saved(recipe_id) {
            return false;
        }
        self.saved_recipe_ids.push(recipe_id);
        true
    }

    /// Remove a bookmark. Returns `true` when something was removed.
    pub fn unsave_recipe(&mut self, recipe_id: RecipeId) -> bool {
        let before = self.saved_recipe_ids.len();
        self.saved_recipe_ids.retain(|id| *id != recipe_id);
        self.saved_recipe_ids.len() != before
    }

    /// Record authorship of a newly created recipe.
    pub fn record_creation(&mut self, recipe_id: RecipeId) {
        self.created_recipe_ids.push(recipe_id);
    }

    /// Drop the authorship entry for a deleted recipe.
    pub fn forget_creation(&mut self, recipe_id: RecipeId) {
        self.created_recipe_ids.retain(|id| *id != recipe_id);
    }

    /// Whether this user created the given recipe; gates edit and delete.
    pub fn owns_recipe(&self, recipe_id: RecipeId) -> bool {
        self.created_recipe_ids.contains(&recipe_id)
    }

    /// Apply a partial profile update.
    pub fn apply_profile_patch(&mut self, patch: ProfilePatch) {
        let ProfilePatch {
            name,
            profile_image_ref,
        } = patch;
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(image_ref) = profile_image_ref {
            self.profile_image_ref = Some(image_ref);
        }
    }

    /// Public profile projection.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            profile_image_ref: self.profile_image_ref.clone(),
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
pub(crate) fn fixture_user(name: &str, email: &str) -> User {
    User::new(
        name,
        EmailAddress::new(email).expect("fixture email is valid"),
        "$argon2id$fixture".to_owned(),
    )
}
