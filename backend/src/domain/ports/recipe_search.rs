//! Driving port for recipe lookup and filtered search.

use async_trait::async_trait;

use crate::domain::recipe::{Recipe, RecipeId};
use crate::domain::Error;

/// Raw filter strings as supplied by the client. Blank or absent values
/// mean "not provided"; the search engine normalises them.
#[derive(Debug, Clone, Default)]
pub struct SearchFilters {
    /// Case-insensitive substring match against the recipe name.
    pub name: Option<String>,
    /// Comma-separated ingredient tokens; every token must match some
    /// ingredient name.
    pub ingredients: Option<String>,
}

/// Search and single-document lookup over the recipe collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeSearch: Send + Sync {
    /// Evaluate the filters over the whole collection, sorted by average
    /// rating descending. An empty result is a successful outcome.
    async fn search(&self, filters: SearchFilters) -> Result<Vec<Recipe>, Error>;

    /// Resolve a single recipe or fail with `NotFound`.
    async fn fetch(&self, id: RecipeId) -> Result<Recipe, Error>;
}
