//! Driving port for recipe creation and owner-gated mutation.

use async_trait::async_trait;

use crate::domain::recipe::{Recipe, RecipeDraft, RecipeId, RecipePatch};
use crate::domain::user::UserId;
use crate::domain::Error;

/// Authoring operations gated on the creator's ownership ledger.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeAuthoring: Send + Sync {
    /// Create a recipe owned by the user and record it in their ledger.
    async fn create(&self, user_id: UserId, draft: RecipeDraft) -> Result<Recipe, Error>;

    /// Apply a partial update; only the creator may edit.
    async fn edit(
        &self,
        user_id: UserId,
        recipe_id: RecipeId,
        patch: RecipePatch,
    ) -> Result<Recipe, Error>;

    /// Delete a recipe; only the creator may delete.
    async fn delete(&self, user_id: UserId, recipe_id: RecipeId) -> Result<(), Error>;

    /// Resolve the user's created recipes, skipping references that no
    /// longer resolve.
    async fn list_created(&self, user_id: UserId) -> Result<Vec<Recipe>, Error>;
}
