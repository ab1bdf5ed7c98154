//! Driving port for rating submission.

use async_trait::async_trait;

use crate::domain::recipe::{Rating, RecipeId};
use crate::domain::Error;

/// Append a rating to a recipe's history and maintain the average.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RatingCommand: Send + Sync {
    /// Submit an already-validated rating. Returns the new average.
    async fn submit(&self, recipe_id: RecipeId, rating: Rating) -> Result<f64, Error>;
}
