//! Saved-recipe bookmarks: set membership over recipe references.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, warn};

use crate::domain::locks::MutationLocks;
use crate::domain::ports::{RecipeRepository, SavedRecipes, UserRepository};
use crate::domain::recipe::{Recipe, RecipeId};
use crate::domain::user::UserId;
use crate::domain::Error;

/// Maintains the saved-recipe references on user documents.
///
/// Writes run under the user's mutation lock so two saves landing together
/// cannot produce a duplicate reference.
pub struct SavedRecipeRegistry<U, R> {
    users: Arc<U>,
    recipes: Arc<R>,
    locks: Arc<MutationLocks>,
}

impl<U, R> SavedRecipeRegistry<U, R> {
    pub fn new(users: Arc<U>, recipes: Arc<R>, locks: Arc<MutationLocks>) -> Self {
        Self {
            users,
            recipes,
            locks,
        }
    }
}

#[async_trait]
impl<U, R> SavedRecipes for SavedRecipeRegistry<U, R>
where
    U: UserRepository,
    R: RecipeRepository,
{
    async fn save(&self, user_id: UserId, recipe_id: RecipeId) -> Result<(), Error> {
        // The recipe must exist before we touch the user document.
        if self.recipes.find_by_id(recipe_id).await?.is_none() {
            return Err(Error::not_found("recipe not found"));
        }

        let _guard = self.locks.acquire(user_id.to_string()).await;
        let mut user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| Error::not_found("user not found"))?;
        if !user.save_recipe(recipe_id) {
            return Err(Error::conflict("recipe already saved")
                .with_details(json!({ "recipeId": recipe_id.to_string() })));
        }
        self.users.update(&user).await?;
        debug!(user_id = %user_id, recipe_id = %recipe_id, "recipe saved");
        Ok(())
    }

    async fn unsave(&self, user_id: UserId, recipe_id: RecipeId) -> Result<(), Error> {
        let _guard = self.locks.acquire(user_id.to_string()).await;
        let mut user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| Error::not_found("user not found"))?;
        // Removing an absent bookmark is a success, not an error.
        if user.unsave_recipe(recipe_id) {
            self.users.update(&user).await?;
            debug!(user_id = %user_id, recipe_id = %recipe_id, "recipe unsaved");
        }
        Ok(())
    }

    async fn list(&self, user_id: UserId) -> Result<Vec<Recipe>, Error> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| Error::not_found("user not found"))?;

        let mut recipes = Vec::with_capacity(user.saved_recipe_ids().len());
        for recipe_id in user.saved_recipe_ids() {
            // A bookmark may outlive its recipe; skip dangling references
            // instead of failing the whole listing.
            match self.recipes.find_by_id(*recipe_id).await? {
                Some(recipe) => recipes.push(recipe),
                None => {
                    warn!(user_id = %user_id, recipe_id = %recipe_id, "skipping dangling bookmark");
                }
            }
        }
        Ok(recipes)
    }
}
