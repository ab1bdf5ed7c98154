//! Rating submission against a recipe's rating history.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::locks::MutationLocks;
use crate::domain::ports::{RatingCommand, RecipeRepository};
use crate::domain::recipe::{Rating, RecipeId};
use crate::domain::Error;

/// Appends ratings and keeps the stored average consistent with the
/// history. The read-modify-write runs under the recipe's mutation lock so
/// concurrent submissions are all reflected in the final average.
pub struct RatingAggregator<R> {
    recipes: Arc<R>,
    locks: Arc<MutationLocks>,
}

impl<R> RatingAggregator<R> {
    pub fn new(recipes: Arc<R>, locks: Arc<MutationLocks>) -> Self {
        Self { recipes, locks }
    }
}

#[async_trait]
impl<R> RatingCommand for RatingAggregator<R>
where
    R: RecipeRepository,
{
    async fn submit(&self, recipe_id: RecipeId, rating: Rating) -> Result<f64, Error> {
        let _guard = self.locks.acquire(recipe_id.to_string()).await;
        let mut recipe = self
            .recipes
            .find_by_id(recipe_id)
            .await?
            .ok_or_else(|| Error::not_found("recipe not found"))?;
        let average = recipe.submit_rating(rating);
        self.recipes.update(&recipe).await?;
        debug!(recipe_id = %recipe_id, value = rating.value(), average, "rating recorded");
        Ok(average)
    }
}
