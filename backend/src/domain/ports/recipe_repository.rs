//! Port abstraction for recipe document persistence.

use async_trait::async_trait;

use crate::domain::recipe::{Recipe, RecipeId};
use crate::domain::Error;

/// Persistence errors raised by recipe store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecipeStoreError {
    /// The store could not be reached.
    #[error("recipe store connection failed: {message}")]
    Connection { message: String },
    /// A query or mutation failed during execution.
    #[error("recipe store query failed: {message}")]
    Query { message: String },
}

impl RecipeStoreError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

impl From<RecipeStoreError> for Error {
    fn from(err: RecipeStoreError) -> Self {
        match err {
            RecipeStoreError::Connection { message } => {
                Error::service_unavailable(format!("recipe store unavailable: {message}"))
            }
            RecipeStoreError::Query { message } => {
                Error::internal(format!("recipe store error: {message}"))
            }
        }
    }
}

/// Document-store operations over recipe documents.
///
/// `update` writes the whole document back; callers are expected to hold
/// the per-document mutation lock across read-modify-write sequences.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Insert a new recipe document.
    async fn insert(&self, recipe: &Recipe) -> Result<(), RecipeStoreError>;

    /// Fetch a recipe by identifier.
    async fn find_by_id(&self, id: RecipeId) -> Result<Option<Recipe>, RecipeStoreError>;

    /// Fetch every recipe document. Filtering happens in the domain.
    async fn find_all(&self) -> Result<Vec<Recipe>, RecipeStoreError>;

    /// Replace an existing recipe document.
    async fn update(&self, recipe: &Recipe) -> Result<(), RecipeStoreError>;

    /// Delete a recipe document. Returns `true` when a document was removed.
    async fn delete(&self, id: RecipeId) -> Result<bool, RecipeStoreError>;
}
