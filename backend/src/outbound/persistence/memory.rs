//! In-process document stores backing the repository ports.
//!
//! Documents live in a `HashMap` behind an async `RwLock` and are cloned
//! on the way in and out, matching the whole-document read-modify-write
//! model the domain services assume. These adapters are infallible; the
//! store error variants exist for adapters backed by a real database.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::ports::{RecipeRepository, RecipeStoreError, UserRepository, UserStoreError};
use crate::domain::recipe::{Recipe, RecipeId};
use crate::domain::user::{EmailAddress, User, UserId};

/// User documents keyed by id.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserStoreError> {
        self.users
            .write()
            .await
            .insert(*user.id().as_uuid(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: UserId) -> Result<Option<User>, UserStoreError> {
        Ok(self.users.read().await.get(user_id.as_uuid()).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserStoreError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| user.email() == email)
            .cloned())
    }

    async fn update(&self, user: &User) -> Result<(), UserStoreError> {
        self.users
            .write()
            .await
            .insert(*user.id().as_uuid(), user.clone());
        Ok(())
    }

    async fn delete(&self, user_id: UserId) -> Result<bool, UserStoreError> {
        Ok(self.users.write().await.remove(user_id.as_uuid()).is_some())
    }
}

/// Recipe documents keyed by id.
#[derive(Default)]
pub struct InMemoryRecipeRepository {
    recipes: RwLock<HashMap<Uuid, Recipe>>,
}

impl InMemoryRecipeRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecipeRepository for InMemoryRecipeRepository {
    async fn insert(&self, recipe: &Recipe) -> Result<(), RecipeStoreError> {
        self.recipes
            .write()
            .await
            .insert(*recipe.id().as_uuid(), recipe.clone());
        Ok(())
    }

    async fn find_by_id(&self, recipe_id: RecipeId) -> Result<Option<Recipe>, RecipeStoreError> {
        Ok(self.recipes.read().await.get(recipe_id.as_uuid()).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Recipe>, RecipeStoreError> {
        Ok(self.recipes.read().await.values().cloned().collect())
    }

    async fn update(&self, recipe: &Recipe) -> Result<(), RecipeStoreError> {
        self.recipes
            .write()
            .await
            .insert(*recipe.id().as_uuid(), recipe.clone());
        Ok(())
    }

    async fn delete(&self, recipe_id: RecipeId) -> Result<bool, RecipeStoreError> {
        Ok(self
            .recipes
            .write()
            .await
            .remove(recipe_id.as_uuid())
            .is_some())
    }
}
