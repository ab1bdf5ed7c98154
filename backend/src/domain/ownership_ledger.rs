//! Recipe authoring gated by the creator's ownership ledger.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, warn};

use crate::domain::locks::MutationLocks;
use crate::domain::ports::{RecipeAuthoring, RecipeRepository, UserRepository};
use crate::domain::recipe::{Recipe, RecipeDraft, RecipeId, RecipePatch};
use crate::domain::user::UserId;
use crate::domain::Error;

/// Creates recipes and records authorship on the user document; edit and
/// delete consult the same ledger for authorisation.
pub struct RecipeOwnershipLedger<U, R> {
    users: Arc<U>,
    recipes: Arc<R>,
    locks: Arc<MutationLocks>,
}

impl<U, R> RecipeOwnershipLedger<U, R> {
    pub fn new(users: Arc<U>, recipes: Arc<R>, locks: Arc<MutationLocks>) -> Self {
        Self {
            users,
            recipes,
            locks,
        }
    }
}

fn field_error(message: &str, field: &str) -> Error {
    Error::invalid_request(message).with_details(json!({ "field": field }))
}

fn validate_draft(draft: &RecipeDraft) -> Result<(), Error> {
    if draft.name.trim().is_empty() {
        return Err(field_error("recipe name must not be empty", "name"));
    }
    if draft.category.trim().is_empty() {
        return Err(field_error("recipe category must not be empty", "category"));
    }
    if draft.instructions.trim().is_empty() {
        return Err(field_error(
            "recipe instructions must not be empty",
            "instructions",
        ));
    }
    if draft.ingredients.is_empty() {
        return Err(field_error(
            "at least one ingredient is required",
            "ingredients",
        ));
    }
    if draft
        .ingredients
        .iter()
        .any(|ingredient| ingredient.name.trim().is_empty())
    {
        return Err(field_error(
            "ingredient names must not be empty",
            "ingredients",
        ));
    }
    Ok(())
}

impl<U, R> RecipeOwnershipLedger<U, R>
where
    U: UserRepository,
    R: RecipeRepository,
{
    async fn load_user(&self, user_id: UserId) -> Result<crate::domain::user::User, Error> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| Error::not_found("user not found"))
    }

    async fn load_recipe(&self, recipe_id: RecipeId) -> Result<Recipe, Error> {
        self.recipes
            .find_by_id(recipe_id)
            .await?
            .ok_or_else(|| Error::not_found("recipe not found"))
    }
}

#[async_trait]
impl<U, R> RecipeAuthoring for RecipeOwnershipLedger<U, R>
where
    U: UserRepository,
    R: RecipeRepository,
{
    async fn create(&self, user_id: UserId, draft: RecipeDraft) -> Result<Recipe, Error> {
        validate_draft(&draft)?;

        let _guard = self.locks.acquire(user_id.to_string()).await;
        let mut user = self.load_user(user_id).await?;

        let recipe = Recipe::new(draft);
        self.recipes.insert(&recipe).await?;

        user.record_creation(recipe.id());
        if let Err(err) = self.users.update(&user).await {
            // Without a ledger entry the recipe would be permanently
            // uneditable, so take it back out.
            if let Err(cleanup) = self.recipes.delete(recipe.id()).await {
                warn!(
                    recipe_id = %recipe.id(),
                    error = %cleanup,
                    "failed to remove recipe after ledger write failure"
                );
            }
            return Err(err.into());
        }
        debug!(user_id = %user_id, recipe_id = %recipe.id(), "recipe created");
        Ok(recipe)
    }

    async fn edit(
        &self,
        user_id: UserId,
        recipe_id: RecipeId,
        patch: RecipePatch,
    ) -> Result<Recipe, Error> {
        let user = self.load_user(user_id).await?;

        let _guard = self.locks.acquire(recipe_id.to_string()).await;
        let mut recipe = self.load_recipe(recipe_id).await?;
        if !user.owns_recipe(recipe_id) {
            return Err(Error::forbidden("only the creator may edit this recipe")
                .with_details(json!({ "recipeId": recipe_id.to_string() })));
        }

        recipe.apply_patch(patch);
        self.recipes.update(&recipe).await?;
        debug!(user_id = %user_id, recipe_id = %recipe_id, "recipe edited");
        Ok(recipe)
    }

    async fn delete(&self, user_id: UserId, recipe_id: RecipeId) -> Result<(), Error> {
        // Lock order is user then recipe everywhere both are held.
        let _user_guard = self.locks.acquire(user_id.to_string()).await;
        let mut user = self.load_user(user_id).await?;

        let _recipe_guard = self.locks.acquire(recipe_id.to_string()).await;
        self.load_recipe(recipe_id).await?;
        if !user.owns_recipe(recipe_id) {
            return Err(Error::forbidden("only the creator may delete this recipe")
                .with_details(json!({ "recipeId": recipe_id.to_string() })));
        }

        self.recipes.delete(recipe_id).await?;
        user.forget_creation(recipe_id);
        self.users.update(&user).await?;
        debug!(user_id = %user_id, recipe_id = %recipe_id, "recipe deleted");
        Ok(())
    }

    async fn list_created(&self, user_id: UserId) -> Result<Vec<Recipe>, Error> {
        let user = self.load_user(user_id).await?;

        let mut recipes = Vec::with_capacity(user.created_recipe_ids().len());
        for recipe_id in user.created_recipe_ids() {
            match self.recipes.find_by_id(*recipe_id).await? {
                Some(recipe) => recipes.push(recipe),
                None => {
                    warn!(user_id = %user_id, recipe_id = %recipe_id, "skipping dangling ledger entry");
                }
            }
        }
        Ok(recipes)
    }
}
