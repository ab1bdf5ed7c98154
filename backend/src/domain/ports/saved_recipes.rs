//! Driving port for a user's saved-recipe bookmarks.

use async_trait::async_trait;

use crate::domain::recipe::{Recipe, RecipeId};
use crate::domain::user::UserId;
use crate::domain::Error;

/// Idempotent-set membership over recipe references, per user.
///
/// `save` surfaces duplicates as `Conflict`; `unsave` succeeds as a no-op
/// when the reference is absent. The asymmetry is deliberate.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SavedRecipes: Send + Sync {
    /// Bookmark a recipe for the user.
    async fn save(&self, user_id: UserId, recipe_id: RecipeId) -> Result<(), Error>;

    /// Remove a bookmark; succeeds even when it was never saved.
    async fn unsave(&self, user_id: UserId, recipe_id: RecipeId) -> Result<(), Error>;

    /// Resolve the user's bookmarks to full recipes, skipping references
    /// that no longer resolve.
    async fn list(&self, user_id: UserId) -> Result<Vec<Recipe>, Error>;
}
