//! Comment board operations over a recipe's embedded comments.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::domain::comment::CommentId;
use crate::domain::locks::MutationLocks;
use crate::domain::ports::{CommentBoard, CommentView, RecipeRepository};
use crate::domain::recipe::{Recipe, RecipeId};
use crate::domain::Error;

/// Mutates the comment collection embedded in a recipe document.
///
/// Writes run under the recipe's mutation lock; a like toggle and a delete
/// landing together therefore cannot lose either change.
pub struct CommentBoardService<R> {
    recipes: Arc<R>,
    locks: Arc<MutationLocks>,
}

impl<R> CommentBoardService<R> {
    pub fn new(recipes: Arc<R>, locks: Arc<MutationLocks>) -> Self {
        Self { recipes, locks }
    }
}

/// Project the board into display order, annotated for the viewer.
fn board_views(recipe: &Recipe, viewer: Option<&str>) -> Vec<CommentView> {
    recipe
        .comments_sorted()
        .into_iter()
        .map(|comment| CommentView {
            liked_by_caller: viewer.is_some_and(|identity| comment.liked_by(identity)),
            comment: comment.clone(),
        })
        .collect()
}

impl<R> CommentBoardService<R>
where
    R: RecipeRepository,
{
    async fn load(&self, recipe_id: RecipeId) -> Result<Recipe, Error> {
        self.recipes
            .find_by_id(recipe_id)
            .await?
            .ok_or_else(|| Error::not_found("recipe not found"))
    }
}

#[async_trait]
impl<R> CommentBoard for CommentBoardService<R>
where
    R: RecipeRepository,
{
    async fn add(
        &self,
        recipe_id: RecipeId,
        author: String,
        text: String,
    ) -> Result<Vec<CommentView>, Error> {
        if author.trim().is_empty() {
            return Err(Error::invalid_request("comment author must not be empty")
                .with_details(json!({ "field": "author" })));
        }
        if text.trim().is_empty() {
            return Err(Error::invalid_request("comment text must not be empty")
                .with_details(json!({ "field": "text" })));
        }

        let _guard = self.locks.acquire(recipe_id.to_string()).await;
        let mut recipe = self.load(recipe_id).await?;
        let comment_id = recipe.add_comment(author, text);
        self.recipes.update(&recipe).await?;
        debug!(recipe_id = %recipe_id, comment_id = %comment_id, "comment added");
        Ok(board_views(&recipe, None))
    }

    async fn list(
        &self,
        recipe_id: RecipeId,
        viewer: Option<String>,
    ) -> Result<Vec<CommentView>, Error> {
        let recipe = self.load(recipe_id).await?;
        Ok(board_views(&recipe, viewer.as_deref()))
    }

    async fn delete(
        &self,
        recipe_id: RecipeId,
        comment_id: CommentId,
        requester: String,
    ) -> Result<Vec<CommentView>, Error> {
        let _guard = self.locks.acquire(recipe_id.to_string()).await;
        let mut recipe = self.load(recipe_id).await?;

        let owned = recipe
            .comment(comment_id)
            .ok_or_else(|| Error::not_found("comment not found"))?
            .is_owned_by(&requester);
        if !owned {
            return Err(Error::forbidden("only the comment's author may delete it")
                .with_details(json!({ "commentId": comment_id.to_string() })));
        }

        recipe.remove_comment(comment_id);
        self.recipes.update(&recipe).await?;
        debug!(recipe_id = %recipe_id, comment_id = %comment_id, "comment deleted");
        Ok(board_views(&recipe, Some(&requester)))
    }

    async fn toggle_like(
        &self,
        recipe_id: RecipeId,
        comment_id: CommentId,
        identity: String,
    ) -> Result<Vec<CommentView>, Error> {
        let _guard = self.locks.acquire(recipe_id.to_string()).await;
        let mut recipe = self.load(recipe_id).await?;

        let now_liked = recipe
            .comment_mut(comment_id)
            .ok_or_else(|| Error::not_found("comment not found"))?
            .toggle_like(&identity);
        self.recipes.update(&recipe).await?;
        debug!(
            recipe_id = %recipe_id,
            comment_id = %comment_id,
            now_liked,
            "comment like toggled"
        );
        Ok(board_views(&recipe, Some(&identity)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockRecipeRepository;
    use crate::domain::recipe::fixture_recipe;
    use crate::domain::ErrorCode;
    use mockall::predicate::eq;
    use rstest::rstest;

    fn service_for(
        recipe: Recipe,
        expect_update: bool,
    ) -> CommentBoardService<MockRecipeRepository> {
        let mut repo = MockRecipeRepository::new();
        let recipe_id = recipe.id();
        repo.expect_find_by_id()
            .with(eq(recipe_id))
            .times(1)
            .return_once(move |_| Ok(Some(recipe)));
        if expect_update {
            repo.expect_update().times(1).return_once(|_| Ok(()));
        }
        CommentBoardService::new(Arc::new(repo), Arc::new(MutationLocks::new()))
    }

    #[tokio::test]
    async fn add_returns_the_updated_board() {
        let recipe = fixture_recipe("Mojito", &["Light Rum"]);
        let recipe_id = recipe.id();
        let service = service_for(recipe, true);

        let board = service
            .add(recipe_id, "alice".to_owned(), "great with mint".to_owned())
            .await
            .expect("add succeeds");
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].comment.author(), "alice");
        assert!(!board[0].liked_by_caller);
    }

    #[rstest]
    #[case("   ", "text", "author")]
    #[case("alice", "", "text")]
    #[tokio::test]
    async fn add_rejects_blank_fields(
        #[case] author: &str,
        #[case] text: &str,
        #[case] field: &str,
    ) {
        let repo = MockRecipeRepository::new();
        let service = CommentBoardService::new(Arc::new(repo), Arc::new(MutationLocks::new()));

        let err = service
            .add(RecipeId::random(), author.to_owned(), text.to_owned())
            .await
            .expect_err("blank input rejected");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            err.details().and_then(|d| d.get("field")),
            Some(&json!(field))
        );
    }

    #[tokio::test]
    async fn list_annotates_likes_for_the_viewer() {
        let mut recipe = fixture_recipe("Daiquiri", &["Light Rum"]);
        let liked = recipe.add_comment("alice", "liked one");
        recipe.add_comment("bob", "other one");
        recipe
            .comment_mut(liked)
            .expect("comment present")
            .toggle_like("carol@x.com");
        let recipe_id = recipe.id();
        let service = service_for(recipe, false);

        let board = service
            .list(recipe_id, Some("CAROL@X.COM".to_owned()))
            .await
            .expect("list succeeds");
        assert_eq!(board.len(), 2);
        // Liked comment sorts first and carries the viewer flag.
        assert_eq!(board[0].comment.id(), liked);
        assert!(board[0].liked_by_caller);
        assert!(!board[1].liked_by_caller);
    }

    #[tokio::test]
    async fn delete_requires_ownership() {
        let mut recipe = fixture_recipe("Daiquiri", &["Light Rum"]);
        let comment_id = recipe.add_comment("alice", "mine");
        let recipe_id = recipe.id();
        let service = service_for(recipe, false);

        let err = service
            .delete(recipe_id, comment_id, "mallory".to_owned())
            .await
            .expect_err("non-owner rejected");
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[tokio::test]
    async fn delete_by_the_author_removes_the_comment() {
        let mut recipe = fixture_recipe("Daiquiri", &["Light Rum"]);
        let comment_id = recipe.add_comment("alice", "mine");
        recipe.add_comment("bob", "keeps");
        let recipe_id = recipe.id();
        let service = service_for(recipe, true);

        let board = service
            .delete(recipe_id, comment_id, "  ALICE ".to_owned())
            .await
            .expect("delete succeeds");
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].comment.author(), "bob");
    }

    #[tokio::test]
    async fn deleting_an_unknown_comment_is_not_found() {
        let recipe = fixture_recipe("Daiquiri", &["Light Rum"]);
        let recipe_id = recipe.id();
        let service = service_for(recipe, false);

        let err = service
            .delete(recipe_id, CommentId::random(), "alice".to_owned())
            .await
            .expect_err("unknown comment");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn toggle_like_flags_the_caller_in_the_response() {
        let mut recipe = fixture_recipe("Daiquiri", &["Light Rum"]);
        let comment_id = recipe.add_comment("alice", "text");
        let recipe_id = recipe.id();
        let service = service_for(recipe, true);

        let board = service
            .toggle_like(recipe_id, comment_id, "carol@x.com".to_owned())
            .await
            .expect("toggle succeeds");
        assert_eq!(board[0].comment.likes(), 1);
        assert!(board[0].liked_by_caller);
    }

    #[tokio::test]
    async fn concurrent_toggles_by_distinct_users_are_both_recorded() {
        use crate::outbound::persistence::InMemoryRecipeRepository;

        let repo = Arc::new(InMemoryRecipeRepository::new());
        let mut recipe = fixture_recipe("Daiquiri", &["Light Rum"]);
        let comment_id = recipe.add_comment("alice", "text");
        let recipe_id = recipe.id();
        crate::domain::ports::RecipeRepository::insert(repo.as_ref(), &recipe)
            .await
            .expect("seed recipe");

        let service = Arc::new(CommentBoardService::new(
            Arc::clone(&repo),
            Arc::new(MutationLocks::new()),
        ));
        let mut handles = Vec::new();
        for identity in ["carol@x.com", "dave@x.com", "erin@x.com"] {
            let service = Arc::clone(&service);
            handles.push(tokio::spawn(async move {
                service
                    .toggle_like(recipe_id, comment_id, identity.to_owned())
                    .await
            }));
        }
        for handle in handles {
            handle.await.expect("task completes").expect("toggle succeeds");
        }

        let stored = crate::domain::ports::RecipeRepository::find_by_id(repo.as_ref(), recipe_id)
            .await
            .expect("lookup succeeds")
            .expect("recipe present");
        assert_eq!(
            stored.comment(comment_id).expect("comment present").likes(),
            3
        );
    }
}
