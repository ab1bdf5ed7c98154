//! Driving port for a recipe's comment board.

use async_trait::async_trait;

use crate::domain::comment::{Comment, CommentId};
use crate::domain::recipe::RecipeId;
use crate::domain::Error;

/// A comment annotated for a particular viewer.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentView {
    pub comment: Comment,
    /// Whether the viewer supplied to the operation likes this comment.
    pub liked_by_caller: bool,
}

/// Operations scoped to one recipe's embedded comment collection.
///
/// Every operation returns the updated collection in display order:
/// most likes first, ties broken by recency.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentBoard: Send + Sync {
    /// Append a comment attributed to `author`.
    async fn add(
        &self,
        recipe_id: RecipeId,
        author: String,
        text: String,
    ) -> Result<Vec<CommentView>, Error>;

    /// List the board, annotating each entry for the optional viewer.
    async fn list(
        &self,
        recipe_id: RecipeId,
        viewer: Option<String>,
    ) -> Result<Vec<CommentView>, Error>;

    /// Delete a comment; the requester must be its author.
    async fn delete(
        &self,
        recipe_id: RecipeId,
        comment_id: CommentId,
        requester: String,
    ) -> Result<Vec<CommentView>, Error>;

    /// Toggle the identity's like on a comment.
    async fn toggle_like(
        &self,
        recipe_id: RecipeId,
        comment_id: CommentId,
        identity: String,
    ) -> Result<Vec<CommentView>, Error>;
}
