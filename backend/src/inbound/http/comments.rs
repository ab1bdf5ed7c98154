//! Comment API handlers.
//!
//! ```text
//! POST   /drink-recipes/{id}/comments                 {"author":"alice","text":"..."}
//! GET    /drink-recipes/{id}/comments?viewer=
//! DELETE /drink-recipes/{id}/comments/{cid}?requester=
//! PUT    /drink-recipes/{id}/comments/{cid}/like      {"identity":"carol@x.com"}
//! ```
//!
//! Every mutation returns the whole board in display order so clients can
//! re-render without a follow-up read.

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Error;
use crate::domain::ports::CommentView;
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_comment_id, parse_recipe_id};

/// Comment representation returned by every comment endpoint.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: String,
    pub author: String,
    pub text: String,
    pub posted_at: DateTime<Utc>,
    pub likes: usize,
    /// Whether the identity supplied with the request likes this comment.
    pub liked_by_caller: bool,
}

impl From<&CommentView> for CommentResponse {
    fn from(view: &CommentView) -> Self {
        Self {
            id: view.comment.id().to_string(),
            author: view.comment.author().to_owned(),
            text: view.comment.text().to_owned(),
            posted_at: view.comment.posted_at(),
            likes: view.comment.likes(),
            liked_by_caller: view.liked_by_caller,
        }
    }
}

fn to_responses(board: &[CommentView]) -> Vec<CommentResponse> {
    board.iter().map(CommentResponse::from).collect()
}

/// Body for `POST /drink-recipes/{id}/comments`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddCommentRequest {
    pub author: String,
    pub text: String,
}

/// Append a comment to a recipe's board.
#[utoipa::path(
    post,
    path = "/drink-recipes/{id}/comments",
    params(("id" = String, Path, description = "Recipe id")),
    request_body = AddCommentRequest,
    responses(
        (status = 201, description = "Updated board", body = [CommentResponse]),
        (status = 400, description = "Blank author or text", body = Error),
        (status = 404, description = "Unknown recipe", body = Error)
    ),
    tags = ["comments"],
    operation_id = "addComment"
)]
#[post("/drink-recipes/{id}/comments")]
pub async fn add(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<AddCommentRequest>,
) -> ApiResult<HttpResponse> {
    let recipe_id = parse_recipe_id(&path)?;
    let body = payload.into_inner();
    let board = state.comments.add(recipe_id, body.author, body.text).await?;
    Ok(HttpResponse::Created().json(to_responses(&board)))
}

/// Query parameters for listing a board.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    /// Identity used to compute `likedByCaller`; omit for anonymous reads.
    #[serde(default)]
    pub viewer: Option<String>,
}

/// List a recipe's comments in display order.
#[utoipa::path(
    get,
    path = "/drink-recipes/{id}/comments",
    params(
        ("id" = String, Path, description = "Recipe id"),
        ListQuery
    ),
    responses(
        (status = 200, description = "Comment board", body = [CommentResponse]),
        (status = 404, description = "Unknown recipe", body = Error)
    ),
    tags = ["comments"],
    operation_id = "listComments"
)]
#[get("/drink-recipes/{id}/comments")]
pub async fn list(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<ListQuery>,
) -> ApiResult<web::Json<Vec<CommentResponse>>> {
    let recipe_id = parse_recipe_id(&path)?;
    let board = state
        .comments
        .list(recipe_id, query.into_inner().viewer)
        .await?;
    Ok(web::Json(to_responses(&board)))
}

/// Query parameters for deleting a comment.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct DeleteQuery {
    /// Identity claiming the delete; must match the comment's author.
    pub requester: String,
}

/// Delete a comment; only its author may do so.
#[utoipa::path(
    delete,
    path = "/drink-recipes/{id}/comments/{cid}",
    params(
        ("id" = String, Path, description = "Recipe id"),
        ("cid" = String, Path, description = "Comment id"),
        DeleteQuery
    ),
    responses(
        (status = 200, description = "Updated board", body = [CommentResponse]),
        (status = 403, description = "Not the author", body = Error),
        (status = 404, description = "Unknown recipe or comment", body = Error)
    ),
    tags = ["comments"],
    operation_id = "deleteComment"
)]
#[delete("/drink-recipes/{id}/comments/{cid}")]
pub async fn delete(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
    query: web::Query<DeleteQuery>,
) -> ApiResult<web::Json<Vec<CommentResponse>>> {
    let (id, cid) = path.into_inner();
    let recipe_id = parse_recipe_id(&id)?;
    let comment_id = parse_comment_id(&cid)?;
    let board = state
        .comments
        .delete(recipe_id, comment_id, query.into_inner().requester)
        .await?;
    Ok(web::Json(to_responses(&board)))
}

/// Body for the like toggle.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LikeRequest {
    /// Identity whose like is toggled.
    pub identity: String,
}

/// Toggle the caller's like on a comment.
#[utoipa::path(
    put,
    path = "/drink-recipes/{id}/comments/{cid}/like",
    params(
        ("id" = String, Path, description = "Recipe id"),
        ("cid" = String, Path, description = "Comment id")
    ),
    request_body = LikeRequest,
    responses(
        (status = 200, description = "Updated board", body = [CommentResponse]),
        (status = 404, description = "Unknown recipe or comment", body = Error)
    ),
    tags = ["comments"],
    operation_id = "toggleCommentLike"
)]
#[put("/drink-recipes/{id}/comments/{cid}/like")]
pub async fn toggle_like(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
    payload: web::Json<LikeRequest>,
) -> ApiResult<web::Json<Vec<CommentResponse>>> {
    let (id, cid) = path.into_inner();
    let recipe_id = parse_recipe_id(&id)?;
    let comment_id = parse_comment_id(&cid)?;
    let board = state
        .comments
        .toggle_like(recipe_id, comment_id, payload.into_inner().identity)
        .await?;
    Ok(web::Json(to_responses(&board)))
}
